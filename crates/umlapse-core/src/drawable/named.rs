//! Elements identified by a name only: interfaces, use cases and actors.

use super::add_node;
use crate::{animation::Animation, identifier::escape_quoted};

macro_rules! named_element {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name {
            id: String,
            name: String,
        }

        impl $name {
            pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
                Self {
                    id: id.into(),
                    name: name.into(),
                }
            }

            pub fn id(&self) -> &str {
                &self.id
            }

            pub fn name(&self) -> &str {
                &self.name
            }
        }
    };
}

named_element!(
    /// A UML interface, drawn as a circle.
    Interface
);
named_element!(
    /// A use case, drawn as an ellipse on the middle rank.
    UseCase
);
named_element!(
    /// An actor, drawn as a stick figure image with the name below it.
    Actor
);

/// Blank lines pushing an actor's name below its image.
const ACTOR_LABEL_PADDING: usize = 9;

impl Interface {
    pub(super) fn render(&self, animation: &mut Animation, highlight: bool) {
        let options = vec![
            "shape=circle".to_string(),
            format!("fontcolor=\"{}\"", animation.style().node_font_color()),
        ];
        add_node(animation, &self.id, options, highlight);
        animation.label_node(&self.id, format!("\"{}\"", escape_quoted(&self.name)));
    }
}

impl UseCase {
    pub(super) fn render(&self, animation: &mut Animation, highlight: bool) {
        let options = vec![
            format!("fontcolor=\"{}\"", animation.style().node_font_color()),
            "shape=ellipse".to_string(),
            "height=0.5".to_string(),
            "rank=\"sink\"".to_string(),
        ];
        add_node(animation, &self.id, options, highlight);
        animation.label_node(&self.id, format!("\"{}\"", escape_quoted(&self.name)));
    }
}

impl Actor {
    pub(super) fn render(&self, animation: &mut Animation, highlight: bool) {
        let style = animation.style();
        let mut options = vec![
            format!("fontcolor=\"{}\"", style.node_font_color()),
            "shape=none".to_string(),
        ];
        if let Some(image) = style.actor_image() {
            options.push(format!("image=\"{}\"", escape_quoted(image)));
        }
        options.extend([
            "fillcolor=transparent".to_string(),
            "width=0.5".to_string(),
            "height=0.5".to_string(),
            "rank=\"source\"".to_string(),
        ]);

        add_node(animation, &self.id, options, highlight);
        let padding = " \\n".repeat(ACTOR_LABEL_PADDING);
        animation.label_node(&self.id, format!("\"{padding}{}\"", escape_quoted(&self.name)));
    }
}
