use std::collections::BTreeMap;

use serde::Deserialize;
use thiserror::Error;

use crate::story::{Chapter, Episode, Reaction, ReactionKind, Story};

#[derive(Debug, Error)]
pub enum StoryError {
    #[error("malformed story document: {0}")]
    Syntax(#[from] json5::Error),
    #[error("story root `{root}` is not an episode")]
    MissingRoot { root: String },
    #[error("chapter `{chapter}` starts at `{root}`, which is not an episode")]
    MissingChapterRoot { chapter: String, root: String },
    #[error("no chapter named `{name}`")]
    UnknownChapter { name: String },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoryFile {
    root: String,
    #[serde(alias = "eMap")]
    episodes: BTreeMap<String, EpisodeFile>,
    #[serde(default)]
    chapters: Vec<ChapterFile>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct EpisodeFile {
    name: Option<String>,
    scene_id: Option<String>,
    reactions: Vec<ReactionFile>,
    /// Editor save format: reactions wrapped together with their
    /// conditions and actions, which the layout does not need.
    reaction_reasolvers: Vec<ResolverFile>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ResolverFile {
    reaction: ReactionFile,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ReactionFile {
    id: Option<String>,
    #[serde(alias = "type")]
    kind: Option<ReactionKindFile>,
    title: Option<String>,
    next_episode: Option<String>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
enum ReactionKindFile {
    #[serde(alias = "closed_text")]
    ClosedText,
    #[serde(alias = "open_text")]
    OpenText,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChapterFile {
    name: String,
    root: String,
    #[serde(default)]
    episodes: Vec<String>,
}

/// Parses a story document (JSON or JSON5).
///
/// Episode ids are the keys of `episodes`. Reactions pointing at unknown
/// episodes are kept as they are; only the story and chapter roots are
/// checked.
pub fn parse_story(input: &str) -> Result<Story, StoryError> {
    let file: StoryFile = json5::from_str(input)?;

    let mut episodes = BTreeMap::new();
    for (id, episode) in file.episodes {
        let reactions = episode
            .reactions
            .into_iter()
            .chain(episode.reaction_reasolvers.into_iter().map(|resolver| resolver.reaction))
            .enumerate()
            .map(|(idx, reaction)| build_reaction(&id, idx, reaction))
            .collect();
        let name = episode.name.unwrap_or_else(|| id.clone());
        episodes.insert(
            id.clone(),
            Episode {
                id,
                name,
                scene_id: episode.scene_id,
                reactions,
            },
        );
    }

    if !episodes.contains_key(&file.root) {
        return Err(StoryError::MissingRoot { root: file.root });
    }

    let mut chapters = Vec::with_capacity(file.chapters.len());
    for chapter in file.chapters {
        if !episodes.contains_key(&chapter.root) {
            return Err(StoryError::MissingChapterRoot {
                chapter: chapter.name,
                root: chapter.root,
            });
        }
        chapters.push(Chapter {
            name: chapter.name,
            root: chapter.root,
            episodes: chapter.episodes,
        });
    }

    Ok(Story {
        root: file.root,
        episodes,
        chapters,
    })
}

fn build_reaction(episode_id: &str, idx: usize, reaction: ReactionFile) -> Reaction {
    let kind = match (reaction.kind, reaction.title) {
        (Some(ReactionKindFile::OpenText), _) => ReactionKind::OpenText,
        (_, title) => ReactionKind::ClosedText {
            title: title.unwrap_or_default(),
        },
    };
    Reaction {
        id: reaction
            .id
            .unwrap_or_else(|| format!("{episode_id}_reaction_{idx}")),
        kind,
        next_episode: reaction.next_episode.filter(|next| !next.is_empty()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_json5_story() {
        let input = r#"{
            // comments and trailing commas are fine
            root: "a",
            episodes: {
                a: { name: "Start", reactions: [
                    { title: "go", nextEpisode: "b" },
                    { kind: "openText" },
                ] },
                b: { sceneId: "forest" },
            },
        }"#;
        let story = parse_story(input).unwrap();
        assert_eq!(story.root, "a");
        let a = &story.episodes["a"];
        assert_eq!(a.name, "Start");
        assert_eq!(a.reactions.len(), 2);
        assert_eq!(a.reactions[0].title(), Some("go"));
        assert_eq!(a.reactions[0].next_episode.as_deref(), Some("b"));
        assert_eq!(a.reactions[1].kind, ReactionKind::OpenText);
        assert_eq!(a.reactions[1].id, "a_reaction_1");
        let b = &story.episodes["b"];
        assert_eq!(b.name, "b");
        assert_eq!(b.scene_id.as_deref(), Some("forest"));
    }

    #[test]
    fn accepts_emap_alias_and_plain_json() {
        let input = r#"{"root":"x","eMap":{"x":{"reactions":[{"nextEpisode":"ghost"}]}}}"#;
        let story = parse_story(input).unwrap();
        assert_eq!(
            story.episodes["x"].reactions[0].next_episode.as_deref(),
            Some("ghost")
        );
    }

    #[test]
    fn reads_reactions_from_editor_resolvers() {
        let input = r#"{"root":"e1","eMap":{
            "e1":{"reactionReasolvers":[
                {"reaction":{"id":"r1","type":"closed_text","title":"go","nextEpisode":"e2"}},
                {"condition":{"type":"equals"},"reaction":{"type":"open_text"},"actions":[]}
            ]},
            "e2":{}
        }}"#;
        let story = parse_story(input).unwrap();
        let reactions = &story.episodes["e1"].reactions;
        assert_eq!(reactions.len(), 2);
        assert_eq!(reactions[0].id, "r1");
        assert_eq!(reactions[0].title(), Some("go"));
        assert_eq!(reactions[0].next_episode.as_deref(), Some("e2"));
        assert_eq!(reactions[1].kind, ReactionKind::OpenText);
        assert_eq!(story.to_graph().targets("e1").collect::<Vec<_>>(), vec!["e2"]);
    }

    #[test]
    fn empty_next_episode_is_treated_as_absent() {
        let input = r#"{"root":"x","episodes":{"x":{"reactions":[{"nextEpisode":""}]}}}"#;
        let story = parse_story(input).unwrap();
        assert_eq!(story.episodes["x"].reactions[0].next_episode, None);
    }

    #[test]
    fn rejects_missing_root() {
        let err = parse_story(r#"{"root":"nope","episodes":{"x":{}}}"#).unwrap_err();
        assert!(matches!(err, StoryError::MissingRoot { ref root } if root == "nope"));
    }

    #[test]
    fn rejects_chapter_with_unknown_root() {
        let input = r#"{"root":"x","episodes":{"x":{}},"chapters":[{"name":"c","root":"y"}]}"#;
        let err = parse_story(input).unwrap_err();
        assert!(matches!(err, StoryError::MissingChapterRoot { .. }));
    }

    #[test]
    fn rejects_malformed_documents() {
        assert!(matches!(
            parse_story("{ root: "),
            Err(StoryError::Syntax(_))
        ));
    }
}
