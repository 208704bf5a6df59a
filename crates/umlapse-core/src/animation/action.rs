//! Queued animation actions.
//!
//! Every mutation requested on an [`Animation`](super::Animation) is stored
//! as an [`Action`] and only applied when the steps are replayed. Actions
//! always mutate the last step.

use super::step::{Edge, Step};

/// A single queued mutation of the animation state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Starts a new step. Presence is never copied into the new step; the
    /// flag records whether the caller asked for a clean slate.
    NextStep { clean: bool },
    AddNode { id: String, options: Vec<String> },
    HighlightNode { id: String },
    LabelNode { id: String, label: String },
    UnlabelNode { id: String },
    RemoveNode { id: String },
    AddEdge { from: String, to: String, options: Vec<String> },
    HighlightEdge { from: String, to: String },
    RemoveEdge { from: String, to: String },
    CreateCluster { id: String, parent: Option<String> },
    AddNodeToCluster { cluster: String, node: String },
    ShowCluster { id: String, highlight: bool },
    HideCluster { id: String },
}

impl Action {
    /// Applies this action to the last step of `steps`, pushing a new step
    /// for [`Action::NextStep`].
    pub(super) fn apply(&self, steps: &mut Vec<Step>) {
        if let Action::NextStep { .. } = self {
            steps.push(Step::default());
            return;
        }

        if steps.is_empty() {
            steps.push(Step::default());
        }
        let last = steps.len() - 1;
        let step = &mut steps[last];

        match self {
            Action::NextStep { .. } => {}
            Action::AddNode { id, options } => {
                step.nodes.insert(id.clone());
                if options.is_empty() {
                    step.node_options.remove(id);
                } else {
                    step.node_options.insert(id.clone(), options.clone());
                }
            }
            Action::HighlightNode { id } => {
                step.nodes.insert(id.clone());
                step.highlighted_nodes.insert(id.clone());
            }
            Action::LabelNode { id, label } => {
                step.nodes.insert(id.clone());
                step.labels.insert(id.clone(), label.clone());
            }
            Action::UnlabelNode { id } => {
                step.nodes.insert(id.clone());
                step.labels.remove(id);
            }
            Action::RemoveNode { id } => {
                step.nodes.shift_remove(id);
                step.highlighted_nodes.remove(id);
                step.labels.remove(id);
                step.edges.retain(|(from, to)| from != id && to != id);
                step.highlighted_edges
                    .retain(|(from, to)| from != id && to != id);
            }
            Action::AddEdge { from, to, options } => {
                let edge: Edge = (from.clone(), to.clone());
                step.nodes.insert(from.clone());
                step.nodes.insert(to.clone());
                step.edges.insert(edge.clone());
                if options.is_empty() {
                    step.edge_options.remove(&edge);
                } else {
                    step.edge_options.insert(edge, options.clone());
                }
            }
            Action::HighlightEdge { from, to } => {
                let edge: Edge = (from.clone(), to.clone());
                step.nodes.insert(from.clone());
                step.nodes.insert(to.clone());
                step.edges.insert(edge.clone());
                step.highlighted_edges.insert(edge);
            }
            Action::RemoveEdge { from, to } => {
                let edge: Edge = (from.clone(), to.clone());
                step.edges.shift_remove(&edge);
                step.highlighted_edges.remove(&edge);
            }
            Action::CreateCluster { id, parent } => {
                step.clusters.create(id, parent.as_deref());
            }
            Action::AddNodeToCluster { cluster, node } => {
                step.clusters.add_node(cluster, node);
            }
            Action::ShowCluster { id, highlight } => {
                step.visible_clusters.insert(id.clone());
                if *highlight {
                    step.highlighted_clusters.insert(id.clone());
                }
            }
            Action::HideCluster { id } => {
                step.visible_clusters.remove(id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn replay(actions: &[Action]) -> Vec<Step> {
        let mut steps = vec![Step::default()];
        for action in actions {
            action.apply(&mut steps);
        }
        steps
    }

    fn add_node(id: &str) -> Action {
        Action::AddNode {
            id: id.to_string(),
            options: Vec::new(),
        }
    }

    fn add_edge(from: &str, to: &str) -> Action {
        Action::AddEdge {
            from: from.to_string(),
            to: to.to_string(),
            options: Vec::new(),
        }
    }

    #[test]
    fn test_next_step_starts_empty() {
        for clean in [true, false] {
            let steps = replay(&[add_node("a"), Action::NextStep { clean }]);
            assert_eq!(steps.len(), 2);
            assert!(steps[0].contains_node("a"));
            assert!(steps[1].nodes().is_empty());
        }
    }

    #[test]
    fn test_add_edge_adds_endpoints() {
        let steps = replay(&[add_edge("a", "b")]);
        assert!(steps[0].contains_node("a"));
        assert!(steps[0].contains_node("b"));
        assert!(steps[0].contains_edge("a", "b"));
        assert!(!steps[0].contains_edge("b", "a"));
    }

    #[test]
    fn test_remove_node_drops_touching_edges() {
        let steps = replay(&[
            add_edge("a", "b"),
            add_edge("b", "c"),
            add_edge("c", "d"),
            Action::HighlightEdge {
                from: "a".to_string(),
                to: "b".to_string(),
            },
            Action::HighlightNode { id: "b".to_string() },
            Action::LabelNode {
                id: "b".to_string(),
                label: "\"B\"".to_string(),
            },
            Action::RemoveNode { id: "b".to_string() },
        ]);

        let step = &steps[0];
        assert!(!step.contains_node("b"));
        assert!(!step.is_node_highlighted("b"));
        assert_eq!(step.label("b"), None);
        assert!(!step.contains_edge("a", "b"));
        assert!(!step.is_edge_highlighted("a", "b"));
        assert!(!step.contains_edge("b", "c"));
        assert!(step.contains_edge("c", "d"));
    }

    #[test]
    fn test_remove_edge_keeps_nodes() {
        let steps = replay(&[
            add_edge("a", "b"),
            Action::RemoveEdge {
                from: "a".to_string(),
                to: "b".to_string(),
            },
        ]);
        assert!(steps[0].edges().is_empty());
        assert!(steps[0].contains_node("a"));
        assert!(steps[0].contains_node("b"));
    }

    #[test]
    fn test_highlight_is_per_step() {
        let steps = replay(&[
            Action::HighlightNode { id: "a".to_string() },
            Action::NextStep { clean: false },
            add_node("a"),
        ]);
        assert!(steps[0].is_node_highlighted("a"));
        assert!(!steps[1].is_node_highlighted("a"));
        assert!(steps[1].contains_node("a"));
    }

    #[test]
    fn test_label_and_unlabel() {
        let steps = replay(&[
            Action::LabelNode {
                id: "a".to_string(),
                label: "\"A\"".to_string(),
            },
            Action::UnlabelNode { id: "a".to_string() },
        ]);
        assert!(steps[0].contains_node("a"));
        assert_eq!(steps[0].label("a"), None);
    }

    #[test]
    fn test_add_node_without_options_clears_options() {
        let steps = replay(&[
            Action::AddNode {
                id: "a".to_string(),
                options: vec!["shape=record".to_string()],
            },
            add_node("a"),
        ]);
        assert_eq!(steps[0].node_options("a"), None);
    }

    #[test]
    fn test_cluster_visibility() {
        let steps = replay(&[
            Action::CreateCluster {
                id: "pkg".to_string(),
                parent: None,
            },
            Action::ShowCluster {
                id: "pkg".to_string(),
                highlight: true,
            },
            Action::ShowCluster {
                id: "other".to_string(),
                highlight: false,
            },
            Action::HideCluster {
                id: "other".to_string(),
            },
        ]);
        assert!(steps[0].is_cluster_visible("pkg"));
        assert!(steps[0].is_cluster_highlighted("pkg"));
        assert!(!steps[0].is_cluster_visible("other"));
        assert!(!steps[0].is_cluster_highlighted("other"));
    }
}
