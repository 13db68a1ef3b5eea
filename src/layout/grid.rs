use std::collections::{BTreeMap, HashSet};

use crate::config::{GridConfig, Orientation};
use crate::ir::{Graph, NodeId};

use super::{CellBox, GridPosition, Layout, Link};

pub fn cell_box(position: GridPosition, grid: &GridConfig) -> CellBox {
    let step_x = grid.cell_width + grid.gap_x;
    let step_y = grid.cell_height + grid.gap_y;
    let (across, down) = match grid.orientation {
        Orientation::LeftToRight => (position.column, position.row),
        Orientation::TopDown => (position.row, position.column),
    };
    CellBox {
        x: across as f32 * step_x,
        y: down as f32 * step_y,
        width: grid.cell_width,
        height: grid.cell_height,
    }
}

pub fn place_cells(layout: &Layout, grid: &GridConfig) -> BTreeMap<NodeId, CellBox> {
    layout
        .positions
        .iter()
        .map(|(id, position)| (id.clone(), cell_box(*position, grid)))
        .collect()
}

/// Width and height covered by the placed cells.
pub fn extent(cells: &BTreeMap<NodeId, CellBox>) -> (f32, f32) {
    cells.values().fold((0.0_f32, 0.0_f32), |(w, h), cell| {
        (w.max(cell.x + cell.width), h.max(cell.y + cell.height))
    })
}

/// Connectors between laid-out nodes, in visit order and then edge order.
/// Repeated edges between the same pair collapse to one link.
pub fn links(layout: &Layout, graph: &Graph) -> Vec<Link> {
    let mut seen: HashSet<(&str, &str)> = HashSet::new();
    let mut out = Vec::new();
    for from in &layout.visit_order {
        for to in graph.targets(from) {
            if !layout.positions.contains_key(to) {
                continue;
            }
            if seen.insert((from.as_str(), to)) {
                out.push(Link {
                    from: from.clone(),
                    to: to.to_string(),
                });
            }
        }
    }
    out
}
