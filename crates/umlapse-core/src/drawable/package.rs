use super::ChangeReason;
use crate::animation::Animation;

/// A package, drawn as a cluster around the views it contains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    id: String,
    name: String,
    parent: Option<String>,
    nodes: Vec<String>,
    subclusters: Vec<String>,
}

impl Package {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            parent: None,
            nodes: Vec::new(),
            subclusters: Vec::new(),
        }
    }

    pub fn with_parent(mut self, parent: Option<String>) -> Self {
        self.parent = parent;
        self
    }

    pub fn with_nodes(mut self, nodes: Vec<String>) -> Self {
        self.nodes = nodes;
        self
    }

    pub fn with_subclusters(mut self, subclusters: Vec<String>) -> Self {
        self.subclusters = subclusters;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    /// Identifiers of the views drawn inside this package.
    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    pub fn subclusters(&self) -> &[String] {
        &self.subclusters
    }

    pub(super) fn changes_since(&self, previous: &Package) -> Vec<ChangeReason> {
        let mut reasons = Vec::new();
        if self.name != previous.name {
            reasons.push(ChangeReason::Name);
        }
        if self.parent != previous.parent {
            reasons.push(ChangeReason::ParentPackage);
        }
        if self.nodes != previous.nodes {
            reasons.push(ChangeReason::ContainedElements);
        }
        if self.subclusters != previous.subclusters {
            reasons.push(ChangeReason::Subclusters);
        }
        reasons
    }

    pub(super) fn render(&self, animation: &mut Animation, highlight: bool) {
        animation.create_cluster(&self.id, self.parent.as_deref());
        animation.make_cluster_visible(&self.id, highlight);
        for node in &self.nodes {
            animation.add_node_to_cluster(&self.id, node);
        }
        for subcluster in &self.subclusters {
            animation.create_cluster(subcluster, Some(self.id.as_str()));
            animation.make_cluster_visible(subcluster, false);
        }
    }
}
