//! Class elements, drawn as record nodes.

use super::{ChangeReason, add_node};
use crate::{animation::Animation, identifier::escape_html};

/// A UML class with its attribute and method compartments.
#[derive(Debug, Clone)]
pub struct Class {
    id: String,
    name: String,
    methods: Vec<String>,
    attributes: Vec<String>,
    stereotype: Option<String>,
}

impl PartialEq for Class {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.name == other.name
            && self.methods == other.methods
            && self.attributes == other.attributes
    }
}

impl Class {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            methods: Vec::new(),
            attributes: Vec::new(),
            stereotype: None,
        }
    }

    pub fn with_methods(mut self, methods: Vec<String>) -> Self {
        self.methods = methods;
        self
    }

    pub fn with_attributes(mut self, attributes: Vec<String>) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn with_stereotype(mut self, stereotype: Option<String>) -> Self {
        self.stereotype = stereotype;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn methods(&self) -> &[String] {
        &self.methods
    }

    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    pub fn stereotype(&self) -> Option<&str> {
        self.stereotype.as_deref()
    }

    pub(super) fn changes_since(&self, previous: &Class) -> Vec<ChangeReason> {
        let mut reasons = Vec::new();
        if self.name != previous.name {
            reasons.push(ChangeReason::Name);
        }
        if self.methods != previous.methods {
            reasons.push(ChangeReason::Methods);
        }
        if self.attributes != previous.attributes {
            reasons.push(ChangeReason::Attributes);
        }
        reasons
    }

    pub(super) fn render(&self, animation: &mut Animation, highlight: bool) {
        let options = vec![
            format!("fontcolor=\"{}\"", animation.style().node_font_color()),
            "shape=record".to_string(),
        ];
        add_node(animation, &self.id, options, highlight);
        animation.label_node(&self.id, self.record_label());
    }

    /// HTML-like record label: the name (with stereotype) on top, then the
    /// attribute and method compartments.
    fn record_label(&self) -> String {
        let mut label = String::from("<{");
        if let Some(stereotype) = &self.stereotype {
            label.push_str(&format!("&#171;<i>{}</i>&#187;<br/>", escape_html(stereotype)));
        }
        label.push_str(&escape_html(&self.name));
        label.push('|');
        for attribute in &self.attributes {
            label.push_str(&escape_html(attribute));
            label.push_str("<br/>");
        }
        label.push('|');
        for method in &self.methods {
            label.push_str(&escape_html(method));
            label.push_str("<br/>");
        }
        label.push_str("}>");
        label
    }
}
