use std::collections::BTreeMap;

use serde::Serialize;

use crate::config::RowPolicy;
use crate::ir::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct GridPosition {
    pub column: usize,
    pub row: usize,
}

impl GridPosition {
    pub const fn new(column: usize, row: usize) -> Self {
        Self { column, row }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub root: NodeId,
    pub policy: RowPolicy,
    pub positions: BTreeMap<NodeId, GridPosition>,
    /// Nodes in the order they were laid out (breadth first).
    pub visit_order: Vec<NodeId>,
    /// Number of occupied columns.
    pub columns: usize,
    /// One past the largest row in use.
    pub rows: usize,
}

impl Layout {
    pub fn position(&self, id: &str) -> Option<GridPosition> {
        self.positions.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn into_positions(self) -> BTreeMap<NodeId, GridPosition> {
        self.positions
    }
}

/// A laid-out node mapped onto the pixel grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub from: NodeId,
    pub to: NodeId,
}
