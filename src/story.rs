use std::collections::{BTreeMap, BTreeSet};

use crate::ir::{Graph, NodeId};
use crate::parser::StoryError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReactionKind {
    ClosedText { title: String },
    OpenText,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reaction {
    pub id: String,
    pub kind: ReactionKind,
    pub next_episode: Option<NodeId>,
}

impl Reaction {
    pub fn closed_text(id: &str, title: &str, next_episode: Option<&str>) -> Self {
        Self {
            id: id.to_string(),
            kind: ReactionKind::ClosedText {
                title: title.to_string(),
            },
            next_episode: next_episode.map(str::to_string),
        }
    }

    pub fn title(&self) -> Option<&str> {
        match &self.kind {
            ReactionKind::ClosedText { title } => Some(title),
            ReactionKind::OpenText => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Episode {
    pub id: NodeId,
    pub name: String,
    pub scene_id: Option<String>,
    pub reactions: Vec<Reaction>,
}

impl Episode {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            scene_id: None,
            reactions: Vec::new(),
        }
    }
}

/// A named view over the story. An empty member list means every episode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chapter {
    pub name: String,
    pub root: NodeId,
    pub episodes: Vec<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Story {
    pub root: NodeId,
    pub episodes: BTreeMap<NodeId, Episode>,
    pub chapters: Vec<Chapter>,
}

impl Story {
    pub fn to_graph(&self) -> Graph {
        self.graph_of(|_| true)
    }

    /// Graph restricted to the chapter's members, plus the chapter root.
    /// Reactions leading out of the chapter dangle and are dropped by the
    /// layout.
    pub fn chapter_graph(&self, name: &str) -> Result<(Graph, NodeId), StoryError> {
        let chapter = self
            .chapters
            .iter()
            .find(|chapter| chapter.name == name)
            .ok_or_else(|| StoryError::UnknownChapter {
                name: name.to_string(),
            })?;
        if chapter.episodes.is_empty() {
            return Ok((self.to_graph(), chapter.root.clone()));
        }
        let mut members: BTreeSet<&str> = chapter.episodes.iter().map(String::as_str).collect();
        members.insert(chapter.root.as_str());
        let graph = self.graph_of(|id| members.contains(id));
        Ok((graph, chapter.root.clone()))
    }

    fn graph_of(&self, include: impl Fn(&str) -> bool) -> Graph {
        let mut graph = Graph::new();
        for episode in self.episodes.values() {
            if !include(&episode.id) {
                continue;
            }
            let node = graph.ensure_node(&episode.id, Some(episode.name.clone()));
            node.targets = episode
                .reactions
                .iter()
                .map(|reaction| reaction.next_episode.clone())
                .collect();
        }
        graph
    }
}

/// Synthetic story: `count` episodes hanging off a root, where the parent
/// moves down to every third new episode.
pub fn sample_story(count: usize) -> Story {
    let mut episodes = BTreeMap::new();
    let root_id = "episode_root".to_string();
    let mut root = Episode::new(&root_id, "root");
    root.reactions
        .push(Reaction::closed_text("reaction_root", "dummy", None));
    episodes.insert(root_id.clone(), root);

    let mut parent = root_id.clone();
    for idx in 0..count {
        let id = format!("episode_{idx:04}");
        let mut episode = Episode::new(&id, &format!("dummy_{idx}"));
        episode
            .reactions
            .push(Reaction::closed_text(&format!("reaction_{idx:04}_0"), "dummy", None));
        episodes.insert(id.clone(), episode);

        if let Some(parent_episode) = episodes.get_mut(&parent) {
            let reaction_id = format!("reaction_{idx:04}_in");
            let title = format!("to_dummy_{idx}");
            parent_episode
                .reactions
                .push(Reaction::closed_text(&reaction_id, &title, Some(&id)));
        }
        if idx % 3 == 0 {
            parent = id;
        }
    }

    Story {
        root: root_id,
        episodes,
        chapters: Vec::new(),
    }
}
