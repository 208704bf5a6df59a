use super::{ChangeReason, ElementKind, add_edge};
use crate::{animation::Animation, identifier::escape_html};

/// Whether a use-case relationship is an `include` or an `extend`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InclusionKind {
    Include,
    Extend,
}

impl InclusionKind {
    /// Kind tag, shown both in the edge label and in changelog lines.
    pub(super) fn element_kind(self) -> ElementKind {
        match self {
            Self::Include => ElementKind::Inclusion,
            Self::Extend => ElementKind::Extension,
        }
    }
}

/// An include or extend relationship between two use cases.
#[derive(Debug, Clone)]
pub struct Inclusion {
    id: String,
    kind: InclusionKind,
    from: String,
    to: String,
    name: String,
}

impl PartialEq for Inclusion {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.from == other.from
            && self.to == other.to
            && self.name == other.name
    }
}

impl Inclusion {
    pub fn new(
        id: impl Into<String>,
        kind: InclusionKind,
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            from: from.into(),
            to: to.into(),
            name: String::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> InclusionKind {
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

    pub(super) fn changes_since(&self, previous: &Inclusion) -> Vec<ChangeReason> {
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
        reasons
    }

    pub(super) fn render(&self, animation: &mut Animation, highlight: bool) {
        let options = vec![
            format!(
                "label=<{}<br/>&#171;<i>{}</i>&#187;>",
                escape_html(&self.name),
                self.kind.element_kind()
            ),
            format!("fontcolor=\"{}\"", animation.style().edge_font_color()),
        ];
        add_edge(animation, &self.from, &self.to, options, highlight);
    }
}
