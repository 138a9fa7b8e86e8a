//! The diagram pipeline: epic document in, positioned rects and routed
//! arrows out, at both nesting levels.
//!
//! Task grids are laid out first (one independent pure computation per
//! batch, fanned out via rayon), because batch container sizes depend on
//! their task layouts' bounding boxes. Batch containers then go through the
//! same engine with variable sizing, and both arrow routers run over the
//! results. Everything is recomputed from scratch on every call.

use std::collections::BTreeMap;

use rayon::prelude::*;
use serde::Serialize;

use crate::arrows::{self, ArrowPath};
use crate::epic::connections;
use crate::epic::{Batch, Epic};
use crate::layout::{
    self, BatchCellConfig, BatchSizing, LayoutError, LayoutMap, NodeId, TaskCellConfig,
};

/// Padding between a batch border and its task grid.
pub const BATCH_PADDING: f64 = 32.0;
/// Height of the batch title strip above the task grid.
pub const BATCH_HEADER: f64 = 36.0;

/// Layout and routing configuration for one build.
#[derive(Debug, Clone)]
pub struct DiagramConfig {
    pub task: TaskCellConfig,
    pub batch: BatchCellConfig,
    /// Derive inter-batch edges from cross-batch task dependencies, in
    /// addition to the ones declared on the batches.
    pub derived_edges: bool,
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self {
            task: TaskCellConfig::default(),
            batch: BatchCellConfig::default(),
            derived_edges: true,
        }
    }
}

/// One batch's internal layout. Coordinates are batch-local: (0, 0) is the
/// top-left corner of the task grid, before padding and title strip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchDiagram {
    pub layouts: LayoutMap,
    pub arrows: Vec<ArrowPath>,
}

/// A fully built epic diagram.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EpicDiagram {
    pub batch_layouts: LayoutMap,
    pub batch_arrows: Vec<ArrowPath>,
    pub batches: BTreeMap<NodeId, BatchDiagram>,
}

/// Build the complete two-level diagram for an epic.
pub fn build(epic: &Epic, config: &DiagramConfig) -> Result<EpicDiagram, LayoutError> {
    let built: Vec<(NodeId, BatchDiagram)> = epic
        .batches
        .par_iter()
        .map(|batch| build_batch(batch, &config.task).map(|built| (batch.id, built)))
        .collect::<Result<_, LayoutError>>()?;

    let mut sizing = BatchSizing::new(config.batch.clone(), empty_container_size(&config.task));
    for (id, diagram) in &built {
        let (width, height) = container_size(diagram, &config.task);
        sizing.insert(*id, width, height);
    }

    let batch_ids: Vec<NodeId> = epic.batches.iter().map(|b| b.id).collect();
    let mut batch_connections = connections::declared_batch_connections(epic);
    if config.derived_edges {
        batch_connections.extend(connections::derived_batch_connections(epic));
    }
    // The router draws duplicates verbatim; dedup the merged set here.
    let batch_connections = connections::dedup(batch_connections);

    let batch_layouts = layout::layout(&batch_ids, &batch_connections, &sizing)?;
    let batch_arrows = arrows::route_batch_arrows(&batch_connections, &batch_layouts, &config.batch);

    Ok(EpicDiagram {
        batch_layouts,
        batch_arrows,
        batches: built.into_iter().collect(),
    })
}

fn build_batch(batch: &Batch, config: &TaskCellConfig) -> Result<BatchDiagram, LayoutError> {
    let ids: Vec<NodeId> = batch.tasks.iter().map(|t| t.id).collect();
    let task_connections = connections::task_connections(batch);
    let layouts = layout::layout(&ids, &task_connections, config)?;
    let arrows = arrows::route_task_arrows(&task_connections, &layouts, config);
    Ok(BatchDiagram { layouts, arrows })
}

/// Container size for a batch: the task grid's bounding box plus padding on
/// every side and the title strip on top.
fn container_size(diagram: &BatchDiagram, task: &TaskCellConfig) -> (f64, f64) {
    if diagram.layouts.is_empty() {
        return empty_container_size(task);
    }
    let right = diagram.layouts.values().map(|r| r.right()).fold(0.0, f64::max);
    let bottom = diagram
        .layouts
        .values()
        .map(|r| r.bottom())
        .fold(0.0, f64::max);
    (
        right + 2.0 * BATCH_PADDING,
        bottom + BATCH_HEADER + 2.0 * BATCH_PADDING,
    )
}

/// An empty batch still occupies a one-cell footprint.
fn empty_container_size(task: &TaskCellConfig) -> (f64, f64) {
    (
        task.cell_width + 2.0 * BATCH_PADDING,
        task.cell_height + BATCH_HEADER + 2.0 * BATCH_PADDING,
    )
}
