use serde::{Deserialize, Serialize};
use std::path::Path;

/// What happens to the row counter when the traversal moves on to the next
/// layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RowPolicy {
    /// Start every layer at row 0.
    #[default]
    ResetPerLayer,
    /// Keep counting from wherever the previous layer stopped.
    CarryForward,
}

impl RowPolicy {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "reset" | "resetPerLayer" => Some(Self::ResetPerLayer),
            "carry" | "carryForward" => Some(Self::CarryForward),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Orientation {
    /// Layers grow to the right, rows stack downwards.
    #[default]
    LeftToRight,
    /// Layers grow downwards, rows run to the right.
    TopDown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridConfig {
    pub cell_width: f32,
    pub cell_height: f32,
    pub gap_x: f32,
    pub gap_y: f32,
    pub orientation: Orientation,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cell_width: 2.0,
            cell_height: 2.0,
            gap_x: 0.0,
            gap_y: 0.0,
            orientation: Orientation::LeftToRight,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutConfig {
    pub row_policy: RowPolicy,
    pub grid: GridConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub layout: LayoutConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    row_policy: Option<RowPolicy>,
    grid: Option<GridFile>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GridFile {
    cell_width: Option<f32>,
    cell_height: Option<f32>,
    gap: Option<f32>,
    gap_x: Option<f32>,
    gap_y: Option<f32>,
    orientation: Option<Orientation>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };

    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let parsed: ConfigFile = serde_json::from_str(contents)?;

    if let Some(policy) = parsed.row_policy {
        config.layout.row_policy = policy;
    }

    if let Some(grid) = parsed.grid {
        let target = &mut config.layout.grid;
        if let Some(v) = grid.cell_width {
            target.cell_width = v;
        }
        if let Some(v) = grid.cell_height {
            target.cell_height = v;
        }
        // `gap` sets both axes; the per-axis keys win when present.
        if let Some(v) = grid.gap {
            target.gap_x = v;
            target.gap_y = v;
        }
        if let Some(v) = grid.gap_x {
            target.gap_x = v;
        }
        if let Some(v) = grid.gap_y {
            target.gap_y = v;
        }
        if let Some(v) = grid.orientation {
            target.orientation = v;
        }
    }

    if config.layout.grid.cell_width <= 0.0 || config.layout.grid.cell_height <= 0.0 {
        anyhow::bail!("grid cells must have a positive size");
    }
    if config.layout.grid.gap_x < 0.0 || config.layout.grid.gap_y < 0.0 {
        anyhow::bail!("grid gaps cannot be negative");
    }

    Ok(config)
}
