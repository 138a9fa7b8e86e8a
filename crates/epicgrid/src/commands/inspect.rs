use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use crate::config::Config;
use crate::epic::connections;
use crate::epic::{Epic, TaskStatus};
use crate::layout::{self, LayoutError, NodeId};

/// Print a summary of an epic's dependency graph: per-batch task and edge
/// counts, column depth, and a cycle check that surfaces exactly the
/// failure a render would hit.
pub fn run(file: &Path) -> Result<()> {
    let epic = Epic::from_path(file)?;
    let task_config = Config::load_or_default().task_cell_config();

    println!("{}", epic.title.bold());
    println!(
        "  {} batches, {} tasks",
        epic.batches.len(),
        epic.task_count()
    );

    let declared = connections::declared_batch_connections(&epic);
    let derived = connections::derived_batch_connections(&epic);
    let merged = connections::dedup(
        declared
            .iter()
            .chain(derived.iter())
            .copied()
            .collect::<Vec<_>>(),
    );
    println!(
        "  {} batch edges ({} declared, {} derived)",
        merged.len(),
        declared.len(),
        derived.len()
    );
    println!();

    for batch in &epic.batches {
        let batch_connections = connections::task_connections(batch);
        let ids: Vec<NodeId> = batch.tasks.iter().map(|t| t.id).collect();

        let dropped: usize = batch
            .tasks
            .iter()
            .flat_map(|t| &t.depends_on)
            .filter(|&dep| !ids.contains(dep))
            .count();

        print!(
            "  {} {} ({} tasks, {} edges",
            "•".dimmed(),
            batch.title,
            batch.tasks.len(),
            batch_connections.len()
        );
        if dropped > 0 {
            print!(", {dropped} cross-batch");
        }
        print!(")");

        match layout::layout(&ids, &batch_connections, &task_config) {
            Ok(layouts) => {
                let depth = layouts.values().map(|r| r.col).max().map_or(0, |c| c + 1);
                println!(" {} {depth} columns", "::".dimmed());
            }
            Err(LayoutError::Cycle { ids }) => {
                let listed = ids
                    .iter()
                    .map(|id| id.to_string())
                    .collect::<Vec<_>>()
                    .join(" -> ");
                println!();
                println!("    {} dependency cycle: {listed}", "cycle".red().bold());
            }
            Err(err) => {
                println!();
                println!("    {} {err}", "error".red().bold());
            }
        }

        let blocked = batch
            .tasks
            .iter()
            .filter(|t| t.status == TaskStatus::Blocked)
            .count();
        if blocked > 0 {
            println!("    {} {blocked} blocked", "!".yellow());
        }
    }

    Ok(())
}
