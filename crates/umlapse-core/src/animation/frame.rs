//! Graph-description frame serialization.
//!
//! Every frame declares the union of all nodes and edges ever added across
//! the animation. Elements absent from a step are drawn invisible so the
//! layout engine places them identically in every frame.

use indexmap::IndexSet;

use super::{
    RankHints,
    cluster::{Cluster, ClusterMember},
    step::{Edge, Step},
};
use crate::{identifier::escape_quoted, style::FrameStyle};

/// Global node and edge sets of an animation.
pub(super) struct GlobalSets {
    nodes: IndexSet<String>,
    edges: IndexSet<Edge>,
}

impl GlobalSets {
    pub(super) fn collect(steps: &[Step]) -> Self {
        let mut nodes = IndexSet::new();
        let mut edges = IndexSet::new();
        for step in steps {
            nodes.extend(step.nodes().iter().cloned());
            edges.extend(step.edges().iter().cloned());
        }
        Self { nodes, edges }
    }
}

/// Writes one frame per step.
pub(super) struct FrameWriter<'a> {
    style: &'a FrameStyle,
    ranks: &'a RankHints,
    globals: GlobalSets,
}

impl<'a> FrameWriter<'a> {
    pub(super) fn new(style: &'a FrameStyle, ranks: &'a RankHints, steps: &[Step]) -> Self {
        Self {
            style,
            ranks,
            globals: GlobalSets::collect(steps),
        }
    }

    pub(super) fn write(&self, step: &Step) -> String {
        let mut lines = self.header();

        let mut counter = 0;
        for cluster in step.clusters().roots() {
            self.write_cluster(step, cluster, &mut counter, &mut lines);
        }

        for id in &self.globals.nodes {
            let attrs = step.node_attributes(id, !step.contains_node(id), self.style);
            lines.push(format!("\"{}\" [{}];", escape_quoted(id), attrs.join(",")));
        }

        for edge in &self.globals.edges {
            let attrs = step.edge_attributes(edge, !step.edges().contains(edge), self.style);
            lines.push(format!(
                "\"{}\" -> \"{}\" [{}];",
                escape_quoted(&edge.0),
                escape_quoted(&edge.1),
                attrs.join(",")
            ));
        }

        lines.push("}".to_string());
        lines.join("\n")
    }

    fn header(&self) -> Vec<String> {
        let style = self.style;
        let fonts = style.font_attributes();

        let mut lines = vec!["digraph G {".to_string()];
        lines.extend(fonts.iter().cloned());
        lines.push(format!("bgcolor=\"{}\"", escape_quoted(style.background_color())));
        lines.push("pad=\".25\"".to_string());
        lines.push("ranksep=\".75\"".to_string());
        lines.push("nodesep=\".75\"".to_string());
        if self.ranks.is_use_case_diagram() {
            lines.push("rankdir=\"LR\"".to_string());
        }

        let mut node_defaults = vec![
            "style=filled".to_string(),
            format!("fillcolor=\"{}\"", escape_quoted(style.node_fill_color())),
            "width=2".to_string(),
            "height=2".to_string(),
        ];
        node_defaults.extend(fonts.iter().cloned());
        lines.push(format!("node[{}]", node_defaults.join(",")));

        let mut edge_defaults = vec!["dir=back".to_string(), "arrowtail=vee".to_string()];
        edge_defaults.extend(fonts);
        lines.push(format!("edge[{}]", edge_defaults.join(",")));

        if self.ranks.is_use_case_diagram() {
            let actors: Vec<&String> = self.ranks.actors().iter().collect();
            let (first, second) = actors.split_at(actors.len() / 2);
            lines.push(rank_group("min", first.iter().copied()));
            lines.push(rank_group("same", self.ranks.use_cases().iter()));
            lines.push(rank_group("max", second.iter().copied()));
        }

        lines
    }

    fn write_cluster(
        &self,
        step: &Step,
        cluster: &Cluster,
        counter: &mut usize,
        lines: &mut Vec<String>,
    ) {
        lines.push(format!("subgraph cluster_{counter} {{"));
        *counter += 1;

        for member in cluster.members() {
            match member {
                ClusterMember::Node(id) => {
                    let attrs = step.node_attributes(id, false, self.style);
                    lines.push(format!("\"{}\" [{}];", escape_quoted(id), attrs.join(",")));
                }
                ClusterMember::Cluster(nested) => {
                    self.write_cluster(step, nested, counter, lines);
                }
            }
        }

        let color = if step.is_cluster_highlighted(cluster.id()) {
            self.style.cluster_highlight_color()
        } else if step.is_cluster_visible(cluster.id()) {
            self.style.cluster_color()
        } else {
            self.style.cluster_default_color()
        };
        lines.push(format!("color=\"{}\"", escape_quoted(color)));
        lines.push("}".to_string());
    }
}

fn rank_group<'s>(rank: &str, ids: impl Iterator<Item = &'s String>) -> String {
    let members: String = ids.map(|id| format!("\"{}\";", escape_quoted(id))).collect();
    format!("{{rank={rank};{members}}}")
}
