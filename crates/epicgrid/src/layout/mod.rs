pub mod grid;
pub mod types;

#[cfg(test)]
mod tests;

pub use grid::layout;
pub use types::{
    BatchCellConfig, BatchSizing, CellSizing, Connection, GridRect, LayoutError, LayoutMap,
    NodeId, TaskCellConfig,
};
