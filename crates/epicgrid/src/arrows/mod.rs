pub mod batch;
pub mod path;
pub mod task;
pub mod types;

#[cfg(test)]
mod tests;

use crate::layout::{BatchCellConfig, Connection, GridRect, LayoutMap, TaskCellConfig};

pub use types::{ArrowPath, PathKind};

/// Relative grid position of a connection's endpoints. Decides the routing
/// strategy; the order here is the classification priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ArrowClass {
    /// Target in a later column: plain left-to-right connector.
    Horizontal,
    /// Same column, different rows: connector within the column.
    Vertical,
    /// Target in an earlier column: needs a detour around the column band.
    Backwards,
    /// Same cell or otherwise unclassified.
    Fallback,
}

fn classify(from: &GridRect, to: &GridRect) -> ArrowClass {
    if from.col < to.col {
        ArrowClass::Horizontal
    } else if from.col > to.col {
        ArrowClass::Backwards
    } else if from.row != to.row {
        ArrowClass::Vertical
    } else {
        ArrowClass::Fallback
    }
}

/// Route task-level connections as smooth curves.
///
/// Arrows come back in the same order as the input connections, one per
/// connection whose endpoints both have a layout. A connection with a
/// missing endpoint is skipped, not an error: upstream extraction filters
/// edges by scope, so partial layout sets are expected. Nothing is
/// deduplicated here; callers own the uniqueness of their edge sets.
pub fn route_task_arrows(
    connections: &[Connection],
    layouts: &LayoutMap,
    config: &TaskCellConfig,
) -> Vec<ArrowPath> {
    let mut arrows = Vec::with_capacity(connections.len());
    for conn in connections {
        let (Some(from), Some(to)) = (layouts.get(&conn.from), layouts.get(&conn.to)) else {
            continue;
        };
        arrows.push(task::route(conn, from, to, config));
    }
    arrows
}

/// Route batch-level connections as orthogonal polylines.
///
/// Same contract and skip rule as [`route_task_arrows`], one level up.
pub fn route_batch_arrows(
    connections: &[Connection],
    layouts: &LayoutMap,
    config: &BatchCellConfig,
) -> Vec<ArrowPath> {
    let mut arrows = Vec::with_capacity(connections.len());
    for conn in connections {
        let (Some(from), Some(to)) = (layouts.get(&conn.from), layouts.get(&conn.to)) else {
            continue;
        };
        arrows.push(batch::route(conn, from, to, config));
    }
    arrows
}
