//! Relationships between classifiers.
//!
//! A single [`Association`] type covers plain associations, dependencies,
//! generalizations and interface realizations. The edge style is picked in
//! priority order: aggregation kind first, then the relationship kind.

use super::{ChangeReason, add_edge};
use crate::{
    animation::Animation,
    identifier::{escape_html, escape_quoted},
    tree::AggregationKind,
};

/// The relationship flavour of an [`Association`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssociationKind {
    #[default]
    Association,
    Dependency,
    Generalization,
    Realization,
}

/// An edge between two classifiers.
#[derive(Debug, Clone)]
pub struct Association {
    id: String,
    kind: AssociationKind,
    from: String,
    to: String,
    name: String,
    multiplicities: (String, String),
    directed: bool,
    aggregation: AggregationKind,
    stereotype: Option<String>,
}

impl PartialEq for Association {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.from == other.from
            && self.to == other.to
            && self.name == other.name
            && self.multiplicities == other.multiplicities
            && self.directed == other.directed
    }
}

impl Association {
    pub fn new(
        id: impl Into<String>,
        kind: AssociationKind,
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            from: from.into(),
            to: to.into(),
            name: String::new(),
            multiplicities: (String::new(), String::new()),
            directed: false,
            aggregation: AggregationKind::None,
            stereotype: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the multiplicities drawn at the head and tail ends.
    pub fn with_multiplicities(mut self, head: impl Into<String>, tail: impl Into<String>) -> Self {
        self.multiplicities = (head.into(), tail.into());
        self
    }

    pub fn with_directed(mut self, directed: bool) -> Self {
        self.directed = directed;
        self
    }

    pub fn with_aggregation(mut self, aggregation: AggregationKind) -> Self {
        self.aggregation = aggregation;
        self
    }

    pub fn with_stereotype(mut self, stereotype: Option<String>) -> Self {
        self.stereotype = stereotype;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> AssociationKind {
        self.kind
    }

    pub fn from(&self) -> &str {
        &self.from
    }

    pub fn to(&self) -> &str {
        &self.to
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn multiplicities(&self) -> (&str, &str) {
        (&self.multiplicities.0, &self.multiplicities.1)
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn aggregation(&self) -> AggregationKind {
        self.aggregation
    }

    pub fn stereotype(&self) -> Option<&str> {
        self.stereotype.as_deref()
    }

    pub(super) fn changes_since(&self, previous: &Association) -> Vec<ChangeReason> {
        let mut reasons = Vec::new();
        if self.name != previous.name {
            reasons.push(ChangeReason::Name);
        }
        if self.from != previous.from {
            reasons.push(ChangeReason::Tail);
        }
        if self.to != previous.to {
            reasons.push(ChangeReason::Head);
        }
        if self.directed != previous.directed {
            reasons.push(ChangeReason::Directedness);
        }
        if self.aggregation != previous.aggregation {
            reasons.push(ChangeReason::Aggregatedness);
        }
        if self.multiplicities != previous.multiplicities {
            reasons.push(ChangeReason::Multiplicities);
        }
        reasons
    }

    pub(super) fn render(&self, animation: &mut Animation, highlight: bool) {
        let mut options = vec![self.label()];
        options.extend(self.arrow_options().iter().map(|option| option.to_string()));
        options.push(format!("fontcolor=\"{}\"", animation.style().edge_font_color()));

        let (head, tail) = self.multiplicities();
        if !head.is_empty() {
            options.push(format!("headlabel=\"  {}  \"", escape_quoted(head)));
        }
        if !tail.is_empty() {
            options.push(format!("taillabel=\"  {}  \"", escape_quoted(tail)));
        }

        add_edge(animation, &self.from, &self.to, options, highlight);
    }

    fn label(&self) -> String {
        match &self.stereotype {
            Some(stereotype) => format!(
                "label=<{}<br/>&#171;<i>{}</i>&#187;>",
                escape_html(&self.name),
                escape_html(stereotype)
            ),
            None => format!("label=\" {} \"", escape_quoted(&self.name)),
        }
    }

    fn arrow_options(&self) -> &'static [&'static str] {
        match (self.aggregation, self.kind) {
            (AggregationKind::Shared, _) => &["arrowtail=ediamond"],
            (AggregationKind::Composite, _) => &["arrowtail=diamond"],
            (_, AssociationKind::Dependency) => &["style=dashed"],
            (_, AssociationKind::Generalization) => &["arrowtail=empty"],
            (_, AssociationKind::Realization) => &["arrowtail=empty", "style=dashed"],
            (_, AssociationKind::Association) if self.directed => &[],
            (_, AssociationKind::Association) => &["arrowtail=none"],
        }
    }
}
