#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod parser;
pub mod story;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, GridConfig, LayoutConfig, Orientation, RowPolicy, load_config};
pub use ir::{Graph, Node, NodeId};
pub use layout::{GridPosition, Layout, LayoutError, compute_layout, layout};
pub use layout_dump::LayoutDump;
pub use parser::{StoryError, parse_story};
pub use story::{Chapter, Episode, Reaction, ReactionKind, Story, sample_story};

#[derive(Debug, Clone, Default)]
pub struct LayoutOptions {
    pub layout: LayoutConfig,
    /// Lay out only this chapter, starting at its root.
    pub chapter: Option<String>,
    /// Start from this episode instead of the story or chapter root.
    pub root: Option<String>,
}

/// Resolves the graph and root a story should be laid out from.
pub fn story_graph(story: &Story, options: &LayoutOptions) -> Result<(Graph, NodeId), StoryError> {
    let (graph, root) = match options.chapter.as_deref() {
        Some(name) => story.chapter_graph(name)?,
        None => (story.to_graph(), story.root.clone()),
    };
    let root = options.root.clone().unwrap_or(root);
    Ok((graph, root))
}

pub fn layout_story(story: &Story, options: &LayoutOptions) -> anyhow::Result<LayoutDump> {
    let (graph, root) = story_graph(story, options)?;
    let layout = compute_layout(&graph, &root, &options.layout)?;
    Ok(LayoutDump::from_layout(&layout, &graph, &options.layout.grid))
}

/// Parses a story document and lays it out in one go.
pub fn layout_story_source(input: &str, options: &LayoutOptions) -> anyhow::Result<LayoutDump> {
    let story = parse_story(input)?;
    layout_story(&story, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    const STORY: &str = r#"{
        root: "a",
        episodes: {
            a: { reactions: [ { nextEpisode: "b" }, { nextEpisode: "c" } ] },
            b: { reactions: [ { nextEpisode: "d" } ] },
            c: {},
            d: {},
        },
        chapters: [ { name: "late", root: "b", episodes: ["b", "d"] } ],
    }"#;

    #[test]
    fn lays_out_whole_story_from_its_root() {
        let dump = layout_story_source(STORY, &LayoutOptions::default()).unwrap();
        assert_eq!(dump.root, "a");
        assert_eq!(dump.nodes.len(), 4);
        assert_eq!(dump.columns, 3);
    }

    #[test]
    fn chapter_and_root_override() {
        let options = LayoutOptions {
            chapter: Some("late".to_string()),
            ..LayoutOptions::default()
        };
        let dump = layout_story_source(STORY, &options).unwrap();
        assert_eq!(dump.root, "b");
        assert_eq!(dump.nodes.len(), 2);

        let options = LayoutOptions {
            root: Some("c".to_string()),
            ..LayoutOptions::default()
        };
        let dump = layout_story_source(STORY, &options).unwrap();
        assert_eq!(dump.nodes.len(), 1);
    }

    #[test]
    fn chapter_root_outside_member_list_is_laid_out() {
        let input = r#"{
            root: "a",
            episodes: { a: { reactions: [ { nextEpisode: "b" } ] }, b: {} },
            chapters: [ { name: "c", root: "a", episodes: ["b"] } ],
        }"#;
        let options = LayoutOptions {
            chapter: Some("c".to_string()),
            ..LayoutOptions::default()
        };
        let dump = layout_story_source(input, &options).unwrap();
        let ids: Vec<&str> = dump.nodes.iter().map(|node| node.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn unknown_root_override_is_an_invalid_root() {
        let options = LayoutOptions {
            root: Some("nowhere".to_string()),
            ..LayoutOptions::default()
        };
        let err = layout_story_source(STORY, &options).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LayoutError>(),
            Some(LayoutError::InvalidRoot { .. })
        ));
    }
}
