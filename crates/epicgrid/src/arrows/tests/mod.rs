mod simple;

use crate::layout::{
    BatchCellConfig, Connection, GridRect, LayoutMap, NodeId, TaskCellConfig, layout,
};

use super::types::PathKind;
use super::{route_batch_arrows, route_task_arrows};

/// A fixed task cell at the given grid position under the default spacing.
fn task_rect(col: usize, row: usize) -> GridRect {
    let config = TaskCellConfig::default();
    GridRect {
        x: col as f64 * (config.cell_width + config.horizontal_gap),
        y: row as f64 * (config.cell_height + config.vertical_gap),
        width: config.cell_width,
        height: config.cell_height,
        row,
        col,
    }
}

/// An arbitrary batch container rect.
fn batch_rect(x: f64, y: f64, width: f64, height: f64, col: usize, row: usize) -> GridRect {
    GridRect {
        x,
        y,
        width,
        height,
        row,
        col,
    }
}

fn layouts(entries: &[(NodeId, GridRect)]) -> LayoutMap {
    entries.iter().copied().collect()
}

fn conn(from: NodeId, to: NodeId) -> Connection {
    Connection::new(from, to)
}

/// Parse the `M x y` anchor a path starts at.
fn path_start(path: &str) -> (f64, f64) {
    let mut tokens = path.split_whitespace();
    assert_eq!(tokens.next(), Some("M"), "path must open with a move: {path}");
    let x = tokens.next().and_then(|t| t.parse().ok());
    let y = tokens.next().and_then(|t| t.parse().ok());
    match (x, y) {
        (Some(x), Some(y)) => (x, y),
        _ => panic!("unparseable move command in {path}"),
    }
}

/// The final coordinate pair of a path.
fn path_end(path: &str) -> (f64, f64) {
    let nums: Vec<f64> = path
        .split_whitespace()
        .filter_map(|t| t.trim_end_matches(',').parse().ok())
        .collect();
    assert!(nums.len() >= 2, "path too short: {path}");
    (nums[nums.len() - 2], nums[nums.len() - 1])
}

/// Count occurrences of a command letter in a path.
fn command_count(path: &str, op: &str) -> usize {
    path.split_whitespace().filter(|t| *t == op).count()
}
