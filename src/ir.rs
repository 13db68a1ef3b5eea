use std::collections::BTreeMap;

pub type NodeId = String;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: NodeId,
    pub label: String,
    /// Outgoing edge targets in edge order. `None` is an edge without a
    /// target; `Some` may name a node that is not in the graph.
    pub targets: Vec<Option<NodeId>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    pub nodes: BTreeMap<NodeId, Node>,
}

impl Graph {
    pub fn new() -> Self {
        Self {
            nodes: BTreeMap::new(),
        }
    }

    pub fn ensure_node(&mut self, id: &str, label: Option<String>) -> &mut Node {
        let entry = self.nodes.entry(id.to_string()).or_insert(Node {
            id: id.to_string(),
            label: id.to_string(),
            targets: Vec::new(),
        });
        if let Some(label) = label {
            entry.label = label;
        }
        entry
    }

    /// Appends an edge `from -> to`. Creates `from` when missing; `to` is
    /// left alone so the edge may dangle.
    pub fn add_edge(&mut self, from: &str, to: &str) {
        self.ensure_node(from, None).targets.push(Some(to.to_string()));
    }

    pub fn add_open_edge(&mut self, from: &str) {
        self.ensure_node(from, None).targets.push(None);
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Targets of `id` that are present in the graph, in edge order.
    /// Duplicates are kept.
    pub fn targets<'a>(&'a self, id: &str) -> impl Iterator<Item = &'a str> + use<'a> {
        self.nodes
            .get(id)
            .into_iter()
            .flat_map(|node| node.targets.iter())
            .filter_map(|target| target.as_deref())
            .filter(move |target| self.nodes.contains_key(*target))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
