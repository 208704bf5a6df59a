//! Incremental graph animation.
//!
//! An [`Animation`] records a queue of [`Action`]s. Replaying the queue
//! produces one [`Step`] per frame, and [`Animation::frames`] serializes every
//! step into a standalone graph description.
//!
//! # Example
//!
//! ```
//! # use umlapse_core::animation::{Animation, RankHints};
//! let mut animation = Animation::default();
//! animation.add_node("a", Vec::new());
//! animation.next_step(false);
//! animation.add_edge("a", "b", Vec::new());
//! animation.highlight_edge("a", "b");
//!
//! let frames = animation.frames(&RankHints::default());
//! assert_eq!(frames.len(), 2);
//! // `b` is declared, but invisible, in the first frame.
//! assert!(frames[0].contains("\"b\" [style=invis];"));
//! ```

mod action;
mod cluster;
mod frame;
mod step;

use indexmap::IndexSet;
use log::debug;

pub use action::Action;
pub use cluster::{Cluster, ClusterMember, ClusterTree};
pub use step::{Edge, Step};

use crate::style::FrameStyle;
use frame::FrameWriter;

/// Actor and use-case node ids used to pin use-case diagrams into ranks.
#[derive(Debug, Default, Clone)]
pub struct RankHints {
    actors: IndexSet<String>,
    use_cases: IndexSet<String>,
}

impl RankHints {
    pub fn add_actor(&mut self, id: impl Into<String>) {
        self.actors.insert(id.into());
    }

    pub fn add_use_case(&mut self, id: impl Into<String>) {
        self.use_cases.insert(id.into());
    }

    pub fn actors(&self) -> &IndexSet<String> {
        &self.actors
    }

    pub fn use_cases(&self) -> &IndexSet<String> {
        &self.use_cases
    }

    /// Returns `true` when any actor or use case was recorded.
    pub fn is_use_case_diagram(&self) -> bool {
        !self.actors.is_empty() || !self.use_cases.is_empty()
    }
}

/// Queue of animation actions plus the style used to serialize them.
#[derive(Debug, Default, Clone)]
pub struct Animation {
    style: FrameStyle,
    actions: Vec<Action>,
}

impl Animation {
    pub fn new(style: FrameStyle) -> Self {
        Self {
            style,
            actions: Vec::new(),
        }
    }

    pub fn style(&self) -> &FrameStyle {
        &self.style
    }

    /// Actions queued so far, in order.
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Starts a new frame.
    pub fn next_step(&mut self, clean: bool) {
        self.actions.push(Action::NextStep { clean });
    }

    /// Adds a node to the current frame. Empty `options` clears any options
    /// recorded for the node in this frame.
    pub fn add_node(&mut self, id: &str, options: Vec<String>) {
        self.actions.push(Action::AddNode {
            id: id.to_string(),
            options,
        });
    }

    pub fn highlight_node(&mut self, id: &str) {
        self.actions.push(Action::HighlightNode { id: id.to_string() });
    }

    /// Sets the label of a node. `label` is emitted verbatim, so it must
    /// already be quoted or an HTML-like `<...>` label.
    pub fn label_node(&mut self, id: &str, label: impl Into<String>) {
        self.actions.push(Action::LabelNode {
            id: id.to_string(),
            label: label.into(),
        });
    }

    pub fn unlabel_node(&mut self, id: &str) {
        self.actions.push(Action::UnlabelNode { id: id.to_string() });
    }

    /// Removes a node and every edge touching it from the current frame.
    pub fn remove_node(&mut self, id: &str) {
        self.actions.push(Action::RemoveNode { id: id.to_string() });
    }

    pub fn add_edge(&mut self, from: &str, to: &str, options: Vec<String>) {
        self.actions.push(Action::AddEdge {
            from: from.to_string(),
            to: to.to_string(),
            options,
        });
    }

    pub fn highlight_edge(&mut self, from: &str, to: &str) {
        self.actions.push(Action::HighlightEdge {
            from: from.to_string(),
            to: to.to_string(),
        });
    }

    pub fn remove_edge(&mut self, from: &str, to: &str) {
        self.actions.push(Action::RemoveEdge {
            from: from.to_string(),
            to: to.to_string(),
        });
    }

    pub fn create_cluster(&mut self, id: &str, parent: Option<&str>) {
        self.actions.push(Action::CreateCluster {
            id: id.to_string(),
            parent: parent.map(str::to_string),
        });
    }

    pub fn add_node_to_cluster(&mut self, cluster: &str, node: &str) {
        self.actions.push(Action::AddNodeToCluster {
            cluster: cluster.to_string(),
            node: node.to_string(),
        });
    }

    pub fn make_cluster_visible(&mut self, id: &str, highlight: bool) {
        self.actions.push(Action::ShowCluster {
            id: id.to_string(),
            highlight,
        });
    }

    pub fn make_cluster_invisible(&mut self, id: &str) {
        self.actions.push(Action::HideCluster { id: id.to_string() });
    }

    /// Replays the queued actions. There is always at least one step.
    pub fn steps(&self) -> Vec<Step> {
        let mut steps = vec![Step::default()];
        for action in &self.actions {
            action.apply(&mut steps);
        }
        steps
    }

    /// Serializes every step into a graph description.
    pub fn frames(&self, ranks: &RankHints) -> Vec<String> {
        let steps = self.steps();
        let writer = FrameWriter::new(&self.style, ranks, &steps);
        let frames: Vec<String> = steps.iter().map(|step| writer.write(step)).collect();

        debug!(actions = self.actions.len(), frames = frames.len(); "Serialized animation frames");
        frames
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn frame_lines(frame: &str) -> Vec<&str> {
        frame.lines().collect()
    }

    #[test]
    fn test_starts_with_one_empty_step() {
        let animation = Animation::default();
        let steps = animation.steps();
        assert_eq!(steps.len(), 1);
        assert!(steps[0].nodes().is_empty());

        let frames = animation.frames(&RankHints::default());
        assert_eq!(frames.len(), 1);
        assert!(frames[0].starts_with("digraph G {"));
        assert!(frames[0].ends_with('}'));
    }

    #[test]
    fn test_frame_count_follows_boundaries() {
        let mut animation = Animation::default();
        animation.add_node("a", Vec::new());
        animation.next_step(false);
        animation.next_step(true);
        assert_eq!(animation.frames(&RankHints::default()).len(), 3);
    }

    #[test]
    fn test_default_frame_layout() {
        let mut animation = Animation::default();
        animation.add_edge("a", "b", vec!["style=dashed".to_string()]);
        animation.highlight_node("a");

        let frames = animation.frames(&RankHints::default());
        assert_eq!(
            frame_lines(&frames[0]),
            vec![
                "digraph G {",
                "bgcolor=\"transparent\"",
                "pad=\".25\"",
                "ranksep=\".75\"",
                "nodesep=\".75\"",
                "node[style=filled,fillcolor=\"purple\",width=2,height=2]",
                "edge[dir=back,arrowtail=vee]",
                "\"a\" [color=\"red\"];",
                "\"b\" [color=\"#FFFFFF\"];",
                "\"a\" -> \"b\" [style=dashed,color=\"magenta3\"];",
                "}",
            ]
        );
    }

    #[test]
    fn test_absent_elements_are_invisible() {
        let mut animation = Animation::default();
        animation.add_node("a", Vec::new());
        animation.next_step(false);
        animation.add_edge("b", "c", Vec::new());

        let frames = animation.frames(&RankHints::default());
        let first = frame_lines(&frames[0]);
        assert!(first.contains(&"\"a\" [color=\"#FFFFFF\"];"));
        assert!(first.contains(&"\"b\" [style=invis];"));
        assert!(first.contains(&"\"b\" -> \"c\" [style=invis];"));

        let second = frame_lines(&frames[1]);
        assert!(second.contains(&"\"a\" [style=invis];"));
        assert!(second.contains(&"\"b\" -> \"c\" [color=\"magenta3\"];"));
    }

    #[test]
    fn test_clusters_are_numbered_uniquely() {
        let mut animation = Animation::default();
        animation.create_cluster("outer", None);
        animation.make_cluster_visible("outer", true);
        animation.create_cluster("inner", Some("outer"));
        animation.make_cluster_visible("inner", false);
        animation.create_cluster("other", None);
        animation.add_node_to_cluster("inner", "a");
        animation.add_node("a", Vec::new());

        let frames = animation.frames(&RankHints::default());
        let lines = frame_lines(&frames[0]);
        let start = lines
            .iter()
            .position(|line| line.starts_with("subgraph"))
            .expect("cluster block");
        assert_eq!(
            &lines[start..start + 10],
            &[
                "subgraph cluster_0 {",
                "subgraph cluster_1 {",
                "\"a\" [color=\"#FFFFFF\"];",
                "color=\"black\"",
                "}",
                "color=\"red\"",
                "}",
                "subgraph cluster_2 {",
                "color=\"white\"",
                "}",
            ]
        );
    }

    #[test]
    fn test_rank_groups_for_use_case_diagrams() {
        let mut animation = Animation::default();
        for id in ["actor1", "actor2", "actor3", "uc"] {
            animation.add_node(id, Vec::new());
        }
        let mut ranks = RankHints::default();
        ranks.add_actor("actor1");
        ranks.add_actor("actor2");
        ranks.add_actor("actor3");
        ranks.add_use_case("uc");

        let frames = animation.frames(&ranks);
        let lines = frame_lines(&frames[0]);
        assert!(lines.contains(&"rankdir=\"LR\""));
        assert!(lines.contains(&"{rank=min;\"actor1\";}"));
        assert!(lines.contains(&"{rank=same;\"uc\";}"));
        assert!(lines.contains(&"{rank=max;\"actor2\";\"actor3\";}"));
    }

    #[test]
    fn test_font_attributes_in_header() {
        let style = FrameStyle::default().with_font("/fonts", "Sans");
        let animation = Animation::new(style);
        let frames = animation.frames(&RankHints::default());
        let lines = frame_lines(&frames[0]);
        assert_eq!(lines[1], "fontpath=\"/fonts\"");
        assert_eq!(lines[2], "fontname=\"Sans\"");
        assert!(lines.contains(
            &"node[style=filled,fillcolor=\"purple\",width=2,height=2,fontpath=\"/fonts\",fontname=\"Sans\"]"
        ));
        assert!(lines.contains(
            &"edge[dir=back,arrowtail=vee,fontpath=\"/fonts\",fontname=\"Sans\"]"
        ));
    }

    #[test]
    fn test_identifiers_are_escaped() {
        let mut animation = Animation::default();
        animation.add_node("a\"b", Vec::new());
        let frames = animation.frames(&RankHints::default());
        assert!(frames[0].contains("\"a\\\"b\" [color=\"#FFFFFF\"];"));
    }

    #[derive(Debug, Clone)]
    enum Op {
        AddNode(u8),
        AddEdge(u8, u8),
        RemoveNode(u8),
        RemoveEdge(u8, u8),
        Highlight(u8),
        Next(bool),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0u8..6).prop_map(Op::AddNode),
            (0u8..6, 0u8..6).prop_map(|(a, b)| Op::AddEdge(a, b)),
            (0u8..6).prop_map(Op::RemoveNode),
            (0u8..6, 0u8..6).prop_map(|(a, b)| Op::RemoveEdge(a, b)),
            (0u8..6).prop_map(Op::Highlight),
            any::<bool>().prop_map(Op::Next),
        ]
    }

    fn node(n: u8) -> String {
        format!("n{n}")
    }

    proptest! {
        #[test]
        fn prop_every_frame_declares_global_sets(
            ops in prop::collection::vec(op_strategy(), 0..40)
        ) {
            let mut animation = Animation::default();
            for op in &ops {
                match op {
                    Op::AddNode(n) => animation.add_node(&node(*n), Vec::new()),
                    Op::AddEdge(a, b) => animation.add_edge(&node(*a), &node(*b), Vec::new()),
                    Op::RemoveNode(n) => animation.remove_node(&node(*n)),
                    Op::RemoveEdge(a, b) => animation.remove_edge(&node(*a), &node(*b)),
                    Op::Highlight(n) => animation.highlight_node(&node(*n)),
                    Op::Next(clean) => animation.next_step(*clean),
                }
            }

            let steps = animation.steps();
            let frames = animation.frames(&RankHints::default());
            prop_assert_eq!(frames.len(), steps.len());

            let mut nodes = IndexSet::new();
            let mut edges = IndexSet::new();
            for step in &steps {
                nodes.extend(step.nodes().iter().cloned());
                edges.extend(step.edges().iter().cloned());
            }

            for (step, frame) in steps.iter().zip(&frames) {
                for id in &nodes {
                    let prefix = format!("\"{id}\" [");
                    let line = frame.lines().find(|line| line.starts_with(&prefix));
                    prop_assert!(line.is_some(), "node {} missing from frame", id);
                    let invisible = line.is_some_and(|line| line.contains("style=invis"));
                    prop_assert_eq!(invisible, !step.contains_node(id));
                }
                for (from, to) in &edges {
                    let prefix = format!("\"{from}\" -> \"{to}\" [");
                    let line = frame.lines().find(|line| line.starts_with(&prefix));
                    prop_assert!(line.is_some(), "edge {} -> {} missing from frame", from, to);
                    let invisible = line.is_some_and(|line| line.contains("style=invis"));
                    prop_assert_eq!(invisible, !step.contains_edge(from, to));
                }
            }
        }
    }
}
