//! Materialized animation steps.
//!
//! A [`Step`] holds the graph state of one frame after replaying the queued
//! actions. Node and edge presence, labels and render options live in the
//! step they were recorded in; highlight marks never outlive their step.

use std::collections::{HashMap, HashSet};

use indexmap::IndexSet;

use super::cluster::ClusterTree;
use crate::style::FrameStyle;

/// A directed edge as `(from, to)` node identifiers.
pub type Edge = (String, String);

/// Graph state of a single animation frame.
#[derive(Debug, Default, Clone)]
pub struct Step {
    pub(super) nodes: IndexSet<String>,
    pub(super) edges: IndexSet<Edge>,
    pub(super) highlighted_nodes: HashSet<String>,
    pub(super) highlighted_edges: HashSet<Edge>,
    pub(super) labels: HashMap<String, String>,
    pub(super) node_options: HashMap<String, Vec<String>>,
    pub(super) edge_options: HashMap<Edge, Vec<String>>,
    pub(super) clusters: ClusterTree,
    pub(super) visible_clusters: HashSet<String>,
    pub(super) highlighted_clusters: HashSet<String>,
}

impl Step {
    /// Active node identifiers in the order they were first added.
    pub fn nodes(&self) -> &IndexSet<String> {
        &self.nodes
    }

    /// Active edges in the order they were first added.
    pub fn edges(&self) -> &IndexSet<Edge> {
        &self.edges
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.contains(id)
    }

    pub fn contains_edge(&self, from: &str, to: &str) -> bool {
        self.edges.contains(&edge(from, to))
    }

    pub fn is_node_highlighted(&self, id: &str) -> bool {
        self.highlighted_nodes.contains(id)
    }

    pub fn is_edge_highlighted(&self, from: &str, to: &str) -> bool {
        self.highlighted_edges.contains(&edge(from, to))
    }

    pub fn label(&self, id: &str) -> Option<&str> {
        self.labels.get(id).map(String::as_str)
    }

    pub fn node_options(&self, id: &str) -> Option<&[String]> {
        self.node_options.get(id).map(Vec::as_slice)
    }

    pub fn edge_options(&self, from: &str, to: &str) -> Option<&[String]> {
        self.edge_options.get(&edge(from, to)).map(Vec::as_slice)
    }

    pub fn clusters(&self) -> &ClusterTree {
        &self.clusters
    }

    pub fn is_cluster_visible(&self, id: &str) -> bool {
        self.visible_clusters.contains(id)
    }

    pub fn is_cluster_highlighted(&self, id: &str) -> bool {
        self.highlighted_clusters.contains(id)
    }

    /// Attribute list of a node statement in this step.
    ///
    /// `hide` forces the invisible style regardless of presence.
    pub(super) fn node_attributes(&self, id: &str, hide: bool, style: &FrameStyle) -> Vec<String> {
        let label = self.labels.get(id);
        let highlighted = self.highlighted_nodes.contains(id);
        let present = self.nodes.contains(id);

        if hide {
            let mut attrs: Vec<String> = label.map(|l| format!("label={l}")).into_iter().collect();
            attrs.push("style=invis".to_string());
            return attrs;
        }

        if let Some(options) = self.node_options.get(id).filter(|_| highlighted || present) {
            let color = if highlighted {
                style.node_highlight_color()
            } else {
                style.node_color()
            };
            let mut attrs = options.clone();
            attrs.push(format!("color=\"{color}\""));
            attrs.extend(label.map(|l| format!("label={l}")));
            return attrs;
        }

        let mut attrs: Vec<String> = label.map(|l| format!("label={l}")).into_iter().collect();
        if highlighted {
            attrs.push(format!("color=\"{}\"", style.node_highlight_color()));
        } else if !present {
            attrs.push("style=invis".to_string());
        } else {
            attrs.push(format!("color=\"{}\"", style.node_color()));
        }
        attrs
    }

    /// Attribute list of an edge statement in this step.
    pub(super) fn edge_attributes(
        &self,
        edge: &Edge,
        hide: bool,
        style: &FrameStyle,
    ) -> Vec<String> {
        if hide {
            return vec!["style=invis".to_string()];
        }

        let highlighted = self.highlighted_edges.contains(edge);
        let color = if highlighted {
            style.edge_highlight_color()
        } else {
            style.edge_color()
        };

        let mut attrs = self
            .edge_options
            .get(edge)
            .filter(|_| highlighted || self.edges.contains(edge))
            .cloned()
            .unwrap_or_default();
        attrs.push(format!("color=\"{color}\""));
        attrs
    }
}

fn edge(from: &str, to: &str) -> Edge {
    (from.to_string(), to.to_string())
}
