use crate::config::{GridConfig, RowPolicy};
use crate::ir::Graph;
use crate::layout::grid::{extent, links, place_cells};
use crate::layout::{Layout, Link};
use serde::Serialize;
use std::fmt::Write as _;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutDump {
    pub root: String,
    pub policy: RowPolicy,
    pub columns: usize,
    pub rows: usize,
    pub width: f32,
    pub height: f32,
    pub nodes: Vec<NodeDump>,
    pub links: Vec<Link>,
}

#[derive(Debug, Serialize)]
pub struct NodeDump {
    pub id: String,
    pub label: String,
    pub column: usize,
    pub row: usize,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl LayoutDump {
    /// Nodes are listed in visit order.
    pub fn from_layout(layout: &Layout, graph: &Graph, grid: &GridConfig) -> Self {
        let cells = place_cells(layout, grid);
        let (width, height) = extent(&cells);

        let nodes = layout
            .visit_order
            .iter()
            .filter_map(|id| {
                let position = layout.positions.get(id)?;
                let cell = cells.get(id)?;
                let label = graph
                    .node(id)
                    .map(|node| node.label.clone())
                    .unwrap_or_else(|| id.clone());
                Some(NodeDump {
                    id: id.clone(),
                    label,
                    column: position.column,
                    row: position.row,
                    x: cell.x,
                    y: cell.y,
                    width: cell.width,
                    height: cell.height,
                })
            })
            .collect();

        LayoutDump {
            root: layout.root.clone(),
            policy: layout.policy,
            columns: layout.columns,
            rows: layout.rows,
            width,
            height,
            nodes,
            links: links(layout, graph),
        }
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// One `column row id` line per node.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            let _ = writeln!(out, "{}\t{}\t{}", node.column, node.row, node.id);
        }
        out
    }
}

pub fn write_layout_dump(
    path: &Path,
    layout: &Layout,
    graph: &Graph,
    grid: &GridConfig,
) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = LayoutDump::from_layout(layout, graph, grid);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}
