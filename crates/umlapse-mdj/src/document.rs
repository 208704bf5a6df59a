//! Raw `.mdj` document shape and its conversion into revision trees.
//!
//! Only the fields the diff engine reads are declared; everything else in
//! the document is ignored. Missing values become empty strings, `false`,
//! or [`AggregationKind::None`].

use log::trace;
use serde::Deserialize;
use umlapse_core::tree::{AggregationKind, AssociationEnd, TreeNode};

use crate::error::ParseError;

/// A `{"$ref": "<id>"}` cross-reference.
#[derive(Debug, Default, Deserialize)]
struct Reference {
    #[serde(rename = "$ref", default)]
    target: Option<String>,
}

/// Stereotypes are stored either inline as text or as a reference to a
/// stereotype element.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Stereotype {
    Text(String),
    Reference(Reference),
}

impl Stereotype {
    fn into_value(self) -> Option<String> {
        match self {
            Self::Text(text) if text.is_empty() => None,
            Self::Text(text) => Some(text),
            Self::Reference(reference) => reference.target,
        }
    }
}

/// Navigability is a boolean in older documents and a keyword
/// (`"navigable"`, `"notNavigable"`, `"unspecified"`) in newer ones.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Navigability {
    Flag(bool),
    Keyword(String),
}

impl Navigability {
    fn is_navigable(&self) -> bool {
        match self {
            Self::Flag(flag) => *flag,
            Self::Keyword(keyword) => keyword == "navigable",
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawEnd {
    #[serde(default)]
    navigable: Option<Navigability>,
    #[serde(default)]
    aggregation: Option<String>,
    #[serde(default)]
    multiplicity: Option<String>,
}

impl RawEnd {
    fn into_end(self, owner: &str) -> Result<AssociationEnd, ParseError> {
        let aggregation = match self.aggregation.as_deref() {
            None => AggregationKind::None,
            Some(value) => value.parse().map_err(|_| ParseError::InvalidAggregation {
                id: owner.to_string(),
                value: value.to_string(),
            })?,
        };
        let navigable = self.navigable.as_ref().is_some_and(Navigability::is_navigable);
        Ok(AssociationEnd::new(
            navigable,
            aggregation,
            self.multiplicity.unwrap_or_default(),
        ))
    }
}

/// One JSON object of the document.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawNode {
    #[serde(rename = "_id", default)]
    id: String,
    #[serde(rename = "_type", default)]
    kind: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    name_label: Option<Reference>,
    #[serde(default)]
    stereotype: Option<Stereotype>,
    #[serde(default)]
    head: Option<Reference>,
    #[serde(default)]
    tail: Option<Reference>,
    #[serde(default)]
    model: Option<Reference>,
    #[serde(default)]
    name_compartment: Option<Reference>,
    #[serde(default)]
    contained_views: Vec<Reference>,
    #[serde(default)]
    end1: Option<RawEnd>,
    #[serde(default)]
    end2: Option<RawEnd>,
    #[serde(default)]
    owned_elements: Vec<RawNode>,
    #[serde(default)]
    owned_views: Vec<RawNode>,
    #[serde(default)]
    sub_views: Vec<RawNode>,
}

impl RawNode {
    /// Converts this object and all of its children into a [`TreeNode`].
    pub(crate) fn into_tree(self) -> Result<TreeNode, ParseError> {
        trace!(id = self.id.as_str(), kind = self.kind.as_str(); "Building tree node");

        let end1 = self.end1.unwrap_or_default().into_end(&self.id)?;
        let end2 = self.end2.unwrap_or_default().into_end(&self.id)?;

        let mut node = TreeNode::new(self.id, self.kind)
            .with_name(self.name.unwrap_or_default())
            .with_text(self.text.unwrap_or_default())
            .with_contained_views(self.contained_views.into_iter().filter_map(|view| view.target))
            .with_ends(end1, end2);

        if let Some(label) = target(self.name_label) {
            node = node.with_name_label(label);
        }
        if let Some(stereotype) = self.stereotype.and_then(Stereotype::into_value) {
            node = node.with_stereotype(stereotype);
        }
        if let Some(head) = target(self.head) {
            node = node.with_head(head);
        }
        if let Some(tail) = target(self.tail) {
            node = node.with_tail(tail);
        }
        if let Some(model) = target(self.model) {
            node = node.with_model(model);
        }
        if let Some(compartment) = target(self.name_compartment) {
            node = node.with_name_compartment(compartment);
        }

        for element in self.owned_elements {
            node = node.with_owned_element(element.into_tree()?);
        }
        for view in self.owned_views {
            node = node.with_owned_view(view.into_tree()?);
        }
        for subview in self.sub_views {
            node = node.with_subview(subview.into_tree()?);
        }

        Ok(node)
    }
}

fn target(reference: Option<Reference>) -> Option<String> {
    reference.and_then(|reference| reference.target)
}
