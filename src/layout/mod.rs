mod error;
pub mod grid;
pub(crate) mod types;
pub use error::*;
pub use types::*;

use crate::config::{LayoutConfig, RowPolicy};
use crate::ir::{Graph, NodeId};
use std::collections::{BTreeMap, HashSet, VecDeque};

/// Grid positions of every node reachable from `root`, with the default
/// configuration.
pub fn layout(graph: &Graph, root: &str) -> Result<BTreeMap<NodeId, GridPosition>> {
    compute_layout(graph, root, &LayoutConfig::default()).map(Layout::into_positions)
}

/// Breadth-first layering of the nodes reachable from `root`.
///
/// The column of a node is its layer. Its row is the value the per-layer
/// counter had when its parent enqueued it; later visits of the same node
/// are dropped, so the first path to reach it wins. Edges to ids missing
/// from the graph are skipped and do not consume a row.
pub fn compute_layout(graph: &Graph, root: &str, config: &LayoutConfig) -> Result<Layout> {
    let Some((root_id, _)) = graph.nodes.get_key_value(root) else {
        return Err(LayoutError::InvalidRoot {
            root: root.to_string(),
        });
    };

    let mut queue: VecDeque<(&str, usize, usize)> = VecDeque::from([(root_id.as_str(), 0, 0)]);
    let mut visited: HashSet<&str> = HashSet::new();
    let mut positions: BTreeMap<NodeId, GridPosition> = BTreeMap::new();
    let mut visit_order: Vec<NodeId> = Vec::new();
    let mut next_row = 0usize;
    let mut last_layer = 0usize;
    let mut columns = 0usize;
    let mut rows = 0usize;

    while let Some((node_id, layer, order)) = queue.pop_front() {
        if !visited.insert(node_id) {
            tracing::trace!(node = node_id, layer, "revisit dropped");
            continue;
        }

        if layer != last_layer && config.row_policy == RowPolicy::ResetPerLayer {
            next_row = 0;
        }
        last_layer = layer;

        if let Some(node) = graph.nodes.get(node_id) {
            for target in node.targets.iter().flatten() {
                match graph.nodes.get_key_value(target.as_str()) {
                    Some((target_id, _)) => {
                        queue.push_back((target_id.as_str(), layer + 1, next_row));
                        next_row += 1;
                    }
                    None => {
                        tracing::trace!(node = node_id, target = %target, "dangling edge skipped");
                    }
                }
            }
        }

        columns = columns.max(layer + 1);
        rows = rows.max(order + 1);
        positions.insert(node_id.to_string(), GridPosition::new(layer, order));
        visit_order.push(node_id.to_string());
    }

    tracing::debug!(
        root = %root_id,
        nodes = positions.len(),
        columns,
        rows,
        policy = ?config.row_policy,
        "layout computed"
    );

    Ok(Layout {
        root: root_id.clone(),
        policy: config.row_policy,
        positions,
        visit_order,
        columns,
        rows,
    })
}
