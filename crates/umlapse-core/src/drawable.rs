//! Drawable diagram elements.
//!
//! A [`Drawable`] is one diagram element materialized from a revision: its
//! semantic attributes (an [`Element`]) plus the list of [`ChangeReason`]s
//! describing how it differs from the same element in the previous revision.
//!
//! Every element kind implements the same contract:
//!
//! - **equality** over a fixed set of key fields ([`PartialEq`] on each
//!   element type),
//! - **diffing** against the previous element with the same identity
//!   ([`Element::changes_since`]),
//! - **rendering** into an [`Animation`] ([`Drawable::render`]),
//! - **describing** the change as a changelog line ([`Drawable::describe`]).

mod association;
mod class;
mod inclusion;
mod named;
mod package;
mod reason;

use std::fmt;

use crate::animation::Animation;

pub use association::{Association, AssociationKind};
pub use class::Class;
pub use inclusion::{Inclusion, InclusionKind};
pub use named::{Actor, Interface, UseCase};
pub use package::Package;
pub use reason::ChangeReason;

/// Sentinel text returned by [`Drawable::describe`] for unchanged elements.
///
/// Callers building a changelog must filter it out.
pub const NO_CHANGES: &str = "No changes.";

/// Identifier of the layout spacer node.
pub const SPACER_ID: &str = "invisibleNode";

/// Kind of a diagram element, displayed as the noun used in changelog lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Class,
    Interface,
    Association,
    Package,
    UseCase,
    Actor,
    Inclusion,
    Extension,
    Spacer,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let noun = match self {
            Self::Class => "class",
            Self::Interface => "interface",
            Self::Association => "association",
            Self::Package => "package",
            Self::UseCase => "use-case",
            Self::Actor => "actor",
            Self::Inclusion => "inclusion",
            Self::Extension => "extension",
            Self::Spacer => "spacer",
        };
        write!(f, "{noun}")
    }
}

/// A changelog line produced by [`Drawable::describe`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    text: String,
    id: String,
    kind: ElementKind,
    name: String,
}

impl LogEntry {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `true` for the [`NO_CHANGES`] sentinel.
    pub fn is_unchanged(&self) -> bool {
        self.text == NO_CHANGES
    }
}

/// Placeholder node used to pad layouts. Never equal to anything,
/// including itself.
#[derive(Debug, Default, Clone)]
pub struct InvisibleSpacer;

impl PartialEq for InvisibleSpacer {
    fn eq(&self, _other: &Self) -> bool {
        false
    }
}

/// The semantic attributes of a diagram element.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Class(Class),
    Interface(Interface),
    Association(Association),
    Package(Package),
    UseCase(UseCase),
    Actor(Actor),
    Inclusion(Inclusion),
    InvisibleSpacer(InvisibleSpacer),
}

impl Element {
    pub fn id(&self) -> &str {
        match self {
            Self::Class(class) => class.id(),
            Self::Interface(interface) => interface.id(),
            Self::Association(association) => association.id(),
            Self::Package(package) => package.id(),
            Self::UseCase(use_case) => use_case.id(),
            Self::Actor(actor) => actor.id(),
            Self::Inclusion(inclusion) => inclusion.id(),
            Self::InvisibleSpacer(_) => SPACER_ID,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Class(class) => class.name(),
            Self::Interface(interface) => interface.name(),
            Self::Association(association) => association.name(),
            Self::Package(package) => package.name(),
            Self::UseCase(use_case) => use_case.name(),
            Self::Actor(actor) => actor.name(),
            Self::Inclusion(inclusion) => inclusion.name(),
            Self::InvisibleSpacer(_) => "",
        }
    }

    pub fn kind(&self) -> ElementKind {
        match self {
            Self::Class(_) => ElementKind::Class,
            Self::Interface(_) => ElementKind::Interface,
            Self::Association(_) => ElementKind::Association,
            Self::Package(_) => ElementKind::Package,
            Self::UseCase(_) => ElementKind::UseCase,
            Self::Actor(_) => ElementKind::Actor,
            Self::Inclusion(inclusion) => inclusion.kind().element_kind(),
            Self::InvisibleSpacer(_) => ElementKind::Spacer,
        }
    }

    /// Fields that differ from `previous`, in a fixed order per kind.
    ///
    /// Returns `None` when `previous` is a different kind of element.
    pub fn changes_since(&self, previous: &Element) -> Option<Vec<ChangeReason>> {
        let reasons = match (self, previous) {
            (Self::Class(current), Self::Class(previous)) => current.changes_since(previous),
            (Self::Interface(current), Self::Interface(previous)) => {
                name_change(current.name(), previous.name())
            }
            (Self::Association(current), Self::Association(previous)) => {
                current.changes_since(previous)
            }
            (Self::Package(current), Self::Package(previous)) => current.changes_since(previous),
            (Self::UseCase(current), Self::UseCase(previous)) => {
                name_change(current.name(), previous.name())
            }
            (Self::Actor(current), Self::Actor(previous)) => {
                name_change(current.name(), previous.name())
            }
            (Self::Inclusion(current), Self::Inclusion(previous)) => {
                current.changes_since(previous)
            }
            (Self::InvisibleSpacer(_), Self::InvisibleSpacer(_)) => Vec::new(),
            _ => return None,
        };
        Some(reasons)
    }
}

fn name_change(current: &str, previous: &str) -> Vec<ChangeReason> {
    if current == previous {
        Vec::new()
    } else {
        vec![ChangeReason::Name]
    }
}

/// A diagram element together with its change reasons.
#[derive(Debug, Clone)]
pub struct Drawable {
    element: Element,
    reasons: Vec<ChangeReason>,
}

impl PartialEq for Drawable {
    /// Compares the element key fields only; change reasons are ignored.
    fn eq(&self, other: &Self) -> bool {
        self.element == other.element
    }
}

impl From<Element> for Drawable {
    fn from(element: Element) -> Self {
        Self {
            element,
            reasons: Vec::new(),
        }
    }
}

impl Drawable {
    pub fn new(element: Element, reasons: Vec<ChangeReason>) -> Self {
        Self { element, reasons }
    }

    pub fn element(&self) -> &Element {
        &self.element
    }

    pub fn id(&self) -> &str {
        self.element.id()
    }

    pub fn name(&self) -> &str {
        self.element.name()
    }

    pub fn kind(&self) -> ElementKind {
        self.element.kind()
    }

    /// Change reasons relative to the previous revision. Empty means
    /// unchanged.
    pub fn reasons(&self) -> &[ChangeReason] {
        &self.reasons
    }

    pub fn is_changed(&self) -> bool {
        !self.reasons.is_empty()
    }

    /// Emits the element into `animation`, highlighted when changed.
    pub fn render(&self, animation: &mut Animation) -> (&str, ElementKind) {
        let highlight = self.is_changed();
        match &self.element {
            Element::Class(class) => class.render(animation, highlight),
            Element::Interface(interface) => interface.render(animation, highlight),
            Element::Association(association) => association.render(animation, highlight),
            Element::Package(package) => package.render(animation, highlight),
            Element::UseCase(use_case) => use_case.render(animation, highlight),
            Element::Actor(actor) => actor.render(animation, highlight),
            Element::Inclusion(inclusion) => inclusion.render(animation, highlight),
            Element::InvisibleSpacer(_) => {
                add_node(
                    animation,
                    SPACER_ID,
                    vec!["fontcolor=transparent".to_string(), "shape=none".to_string()],
                    highlight,
                );
                animation.label_node(SPACER_ID, "\" \"");
            }
        }
        (self.id(), self.kind())
    }

    /// Produces the changelog line for this element.
    ///
    /// `already_created` tells whether the element was introduced by an
    /// earlier revision of the log.
    pub fn describe(&self, already_created: bool) -> LogEntry {
        let kind = self.kind();
        let name = self.name();

        let text = match (&self.element, already_created) {
            (Element::InvisibleSpacer(_), _) => NO_CHANGES.to_string(),
            (_, false) => format!("The {kind} [{name}] was added."),
            (_, true) if self.is_changed() => {
                let reasons: Vec<String> = self.reasons.iter().map(ToString::to_string).collect();
                format!("The {kind} [{name}] was changed. ({})", reasons.join(", "))
            }
            (_, true) => NO_CHANGES.to_string(),
        };

        LogEntry {
            text,
            id: self.id().to_string(),
            kind,
            name: name.to_string(),
        }
    }
}

/// Adds a node, highlighting it when requested.
fn add_node(animation: &mut Animation, id: &str, options: Vec<String>, highlight: bool) {
    animation.add_node(id, options);
    if highlight {
        animation.highlight_node(id);
    }
}

/// Adds the edge for a relationship from `from` to `to`.
///
/// The edge is stored head first and drawn with `dir=back`, so arrow tails
/// set in `options` end up at `to`.
fn add_edge(
    animation: &mut Animation,
    from: &str,
    to: &str,
    options: Vec<String>,
    highlight: bool,
) {
    animation.add_edge(to, from, options);
    if highlight {
        animation.highlight_edge(to, from);
    }
}
