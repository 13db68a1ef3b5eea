use chapter_layout::{LayoutOptions, RowPolicy, layout_story_source};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChapterLayoutOptions {
    chapter: Option<String>,
    root: Option<String>,
    row_policy: Option<RowPolicy>,
    cell_width: Option<f32>,
    cell_height: Option<f32>,
    gap: Option<f32>,
}

fn build_layout_options(options: ChapterLayoutOptions) -> LayoutOptions {
    let mut layout_options = LayoutOptions {
        chapter: options.chapter,
        root: options.root,
        ..LayoutOptions::default()
    };

    if let Some(policy) = options.row_policy {
        layout_options.layout.row_policy = policy;
    }
    let grid = &mut layout_options.layout.grid;
    if let Some(width) = options.cell_width.filter(|w| *w > 0.0) {
        grid.cell_width = width;
    }
    if let Some(height) = options.cell_height.filter(|h| *h > 0.0) {
        grid.cell_height = height;
    }
    if let Some(gap) = options.gap.filter(|g| *g >= 0.0) {
        grid.gap_x = gap;
        grid.gap_y = gap;
    }

    layout_options
}

fn layout_json(story_json: &str, options_json: Option<&str>) -> Result<String, String> {
    let options = match options_json {
        Some(raw_options) => serde_json::from_str::<ChapterLayoutOptions>(raw_options)
            .map_err(|error| error.to_string())?,
        None => ChapterLayoutOptions::default(),
    };
    let dump = layout_story_source(story_json, &build_layout_options(options))
        .map_err(|error| error.to_string())?;
    serde_json::to_string(&dump).map_err(|error| error.to_string())
}

/// Lays out a story document and returns the layout dump as JSON.
#[wasm_bindgen]
pub fn layout_story_json(story_json: &str, options_json: Option<String>) -> Result<String, JsValue> {
    layout_json(story_json, options_json.as_deref()).map_err(|error| JsValue::from_str(&error))
}

#[cfg(test)]
mod tests {
    use crate::{ChapterLayoutOptions, build_layout_options, layout_json};
    use chapter_layout::RowPolicy;

    const STORY: &str = r#"{"root":"a","episodes":{"a":{"reactions":[{"nextEpisode":"b"},{"nextEpisode":"c"}]},"b":{},"c":{}}}"#;

    #[test]
    fn lays_out_story_with_default_options() {
        let json = layout_json(STORY, None).expect("story should lay out");
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["nodes"].as_array().map(Vec::len), Some(3));
        assert_eq!(value["nodes"][2]["row"], 1);
    }

    #[test]
    fn options_override_grid_and_policy() {
        let options: ChapterLayoutOptions =
            serde_json::from_str(r#"{"rowPolicy":"carryForward","cellWidth":120,"gap":-3}"#)
                .unwrap();
        let built = build_layout_options(options);
        assert_eq!(built.layout.row_policy, RowPolicy::CarryForward);
        assert_eq!(built.layout.grid.cell_width, 120.0);
        assert_eq!(built.layout.grid.gap_x, 0.0);
    }

    #[test]
    fn reports_bad_root() {
        let err = layout_json(STORY, Some(r#"{"root":"zzz"}"#)).unwrap_err();
        assert!(err.contains("zzz"));
    }
}
