use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// Node identifier within one layout scope (a task id or a batch id).
pub type NodeId = u64;

/// A directed dependency edge used for drawing.
///
/// `to` depends on `from`; the arrow is drawn from `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Connection {
    pub from: NodeId,
    pub to: NodeId,
}

impl Connection {
    pub fn new(from: NodeId, to: NodeId) -> Self {
        Self { from, to }
    }
}

/// A node's grid cell and the pixel rect derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub row: usize,
    pub col: usize,
}

impl GridRect {
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }
}

/// The layout engine's output: exactly one entry per input node.
///
/// A BTreeMap so that iteration order (and therefore any rendering built on
/// top of it) is deterministic for a given input.
pub type LayoutMap = BTreeMap<NodeId, GridRect>;

/// Grid-cell sizing strategy.
///
/// The engine asks the strategy for per-node cell dimensions and the gaps
/// between columns and rows. Tasks use fixed cells; batches use per-node
/// container sizes.
pub trait CellSizing {
    fn cell_size(&self, id: NodeId) -> (f64, f64);
    fn horizontal_gap(&self) -> f64;
    fn vertical_gap(&self) -> f64;

    /// Checked once before layout runs.
    fn validate(&self) -> Result<(), LayoutError>;
}

/// Fixed-size cells for task grids.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskCellConfig {
    pub cell_width: f64,
    pub cell_height: f64,
    pub horizontal_gap: f64,
    pub vertical_gap: f64,
}

impl Default for TaskCellConfig {
    fn default() -> Self {
        Self {
            cell_width: 180.0,
            cell_height: 80.0,
            horizontal_gap: 60.0,
            vertical_gap: 40.0,
        }
    }
}

impl CellSizing for TaskCellConfig {
    fn cell_size(&self, _id: NodeId) -> (f64, f64) {
        (self.cell_width, self.cell_height)
    }

    fn horizontal_gap(&self) -> f64 {
        self.horizontal_gap
    }

    fn vertical_gap(&self) -> f64 {
        self.vertical_gap
    }

    fn validate(&self) -> Result<(), LayoutError> {
        check_dimension("cell_width", self.cell_width)?;
        check_dimension("cell_height", self.cell_height)?;
        check_dimension("horizontal_gap", self.horizontal_gap)?;
        check_dimension("vertical_gap", self.vertical_gap)
    }
}

/// Gaps between batch containers. Container sizes themselves are per-batch
/// and live in [`BatchSizing`].
#[derive(Debug, Clone, PartialEq)]
pub struct BatchCellConfig {
    pub horizontal_gap: f64,
    pub vertical_gap: f64,
}

impl Default for BatchCellConfig {
    fn default() -> Self {
        Self {
            horizontal_gap: 80.0,
            vertical_gap: 60.0,
        }
    }
}

/// Variable-size containers for batch grids.
///
/// Each batch's width and height are registered up front (derived from its
/// task layout's bounding box); ids without an entry fall back to
/// `default_size` so an unexpectedly bare batch still occupies a cell.
#[derive(Debug, Clone)]
pub struct BatchSizing {
    pub config: BatchCellConfig,
    sizes: BTreeMap<NodeId, (f64, f64)>,
    default_size: (f64, f64),
}

impl BatchSizing {
    pub fn new(config: BatchCellConfig, default_size: (f64, f64)) -> Self {
        Self {
            config,
            sizes: BTreeMap::new(),
            default_size,
        }
    }

    pub fn insert(&mut self, id: NodeId, width: f64, height: f64) {
        self.sizes.insert(id, (width, height));
    }
}

impl CellSizing for BatchSizing {
    fn cell_size(&self, id: NodeId) -> (f64, f64) {
        self.sizes.get(&id).copied().unwrap_or(self.default_size)
    }

    fn horizontal_gap(&self) -> f64 {
        self.config.horizontal_gap
    }

    fn vertical_gap(&self) -> f64 {
        self.config.vertical_gap
    }

    fn validate(&self) -> Result<(), LayoutError> {
        check_dimension("horizontal_gap", self.config.horizontal_gap)?;
        check_dimension("vertical_gap", self.config.vertical_gap)?;
        check_dimension("default_width", self.default_size.0)?;
        check_dimension("default_height", self.default_size.1)?;
        for &(width, height) in self.sizes.values() {
            check_dimension("width", width)?;
            check_dimension("height", height)?;
        }
        Ok(())
    }
}

fn check_dimension(name: &'static str, value: f64) -> Result<(), LayoutError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(LayoutError::InvalidDimension { name, value })
    }
}

/// Why a layout could not be produced.
///
/// Everything else the engine tolerates: connections referencing unknown ids
/// contribute nothing, and an empty node set yields an empty mapping.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// The dependency graph contains a cycle; columns cannot be assigned.
    /// `ids` lists the cycle's members in traversal order.
    Cycle { ids: Vec<NodeId> },
    /// Two nodes in the same scope share an identifier.
    DuplicateNode { id: NodeId },
    /// A configured size or gap is zero, negative, or not finite.
    InvalidDimension { name: &'static str, value: f64 },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cycle { ids } => {
                write!(f, "dependency cycle involving nodes: ")?;
                for (idx, id) in ids.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{id}")?;
                }
                Ok(())
            }
            Self::DuplicateNode { id } => write!(f, "duplicate node id {id}"),
            Self::InvalidDimension { name, value } => {
                write!(f, "invalid {name}: {value} (must be a positive number)")
            }
        }
    }
}

impl std::error::Error for LayoutError {}
