//! Parsed revision trees.
//!
//! A [`TreeNode`] is one node of a model document as produced by a document
//! parser. Every node carries the union of the fields any element kind
//! needs; fields that do not apply to a kind stay empty. The diff engine only
//! reads trees and never mutates them.
//!
//! # Children
//!
//! Each node owns three ordered child collections, always visited in this
//! order:
//!
//! 1. owned elements (model elements)
//! 2. owned views (diagram elements)
//! 3. subviews (compartments and labels of a view)

use std::{collections::HashMap, fmt, str::FromStr};

use crate::identifier::strip_reference_marker;

/// Aggregation kind of an association end.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggregationKind {
    #[default]
    None,
    Shared,
    Composite,
}

impl FromStr for AggregationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "none" => Ok(Self::None),
            "shared" => Ok(Self::Shared),
            "composite" => Ok(Self::Composite),
            _ => Err(format!("Invalid aggregation kind: {s}")),
        }
    }
}

impl fmt::Display for AggregationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Shared => write!(f, "shared"),
            Self::Composite => write!(f, "composite"),
        }
    }
}

/// One end of an association model element.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AssociationEnd {
    navigable: bool,
    aggregation: AggregationKind,
    multiplicity: String,
}

impl AssociationEnd {
    /// Creates an association end.
    pub fn new(
        navigable: bool,
        aggregation: AggregationKind,
        multiplicity: impl Into<String>,
    ) -> Self {
        Self {
            navigable,
            aggregation,
            multiplicity: multiplicity.into(),
        }
    }

    pub fn navigable(&self) -> bool {
        self.navigable
    }

    pub fn aggregation(&self) -> AggregationKind {
        self.aggregation
    }

    /// Multiplicity text, empty when unspecified.
    pub fn multiplicity(&self) -> &str {
        &self.multiplicity
    }
}

/// A node of a parsed revision tree.
///
/// Built once per revision by a parser, immutable afterwards. Construction
/// uses the `with_*` methods:
///
/// ```
/// use umlapse_core::tree::TreeNode;
///
/// let class = TreeNode::new("cls", "UMLClass").with_name("Order");
/// let project = TreeNode::new("project", "Project").with_owned_element(class);
///
/// assert_eq!(project.find_by_id("cls").map(TreeNode::name), Some("Order"));
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TreeNode {
    id: String,
    kind: String,
    name: String,
    text: String,
    name_label: Option<String>,
    stereotype: Option<String>,
    head: Option<String>,
    tail: Option<String>,
    model: Option<String>,
    name_compartment: Option<String>,
    contained_views: Vec<String>,
    end1: AssociationEnd,
    end2: AssociationEnd,
    owned_elements: Vec<TreeNode>,
    owned_views: Vec<TreeNode>,
    subviews: Vec<TreeNode>,
}

impl TreeNode {
    /// Creates a node with the given identifier and type tag.
    pub fn new(id: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_name_label(mut self, name_label: impl Into<String>) -> Self {
        self.name_label = Some(name_label.into());
        self
    }

    pub fn with_stereotype(mut self, stereotype: impl Into<String>) -> Self {
        self.stereotype = Some(stereotype.into());
        self
    }

    /// Sets the relationship endpoints, `tail` being the source view.
    pub fn with_endpoints(mut self, tail: impl Into<String>, head: impl Into<String>) -> Self {
        self.tail = Some(tail.into());
        self.head = Some(head.into());
        self
    }

    pub fn with_head(mut self, head: impl Into<String>) -> Self {
        self.head = Some(head.into());
        self
    }

    pub fn with_tail(mut self, tail: impl Into<String>) -> Self {
        self.tail = Some(tail.into());
        self
    }

    /// Sets the identifier of the model element a view presents.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_name_compartment(mut self, name_compartment: impl Into<String>) -> Self {
        self.name_compartment = Some(name_compartment.into());
        self
    }

    pub fn with_contained_views<I, S>(mut self, views: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.contained_views = views.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_ends(mut self, end1: AssociationEnd, end2: AssociationEnd) -> Self {
        self.end1 = end1;
        self.end2 = end2;
        self
    }

    pub fn with_owned_element(mut self, element: TreeNode) -> Self {
        self.owned_elements.push(element);
        self
    }

    pub fn with_owned_view(mut self, view: TreeNode) -> Self {
        self.owned_views.push(view);
        self
    }

    pub fn with_subview(mut self, subview: TreeNode) -> Self {
        self.subviews.push(subview);
        self
    }

    /// Identifier as stored in the document, reference marker included.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Identifier with the reference marker removed.
    pub fn bare_id(&self) -> String {
        strip_reference_marker(&self.id).into_owned()
    }

    /// Type tag such as `UMLClassView`.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn name_label(&self) -> Option<&str> {
        self.name_label.as_deref()
    }

    pub fn stereotype(&self) -> Option<&str> {
        self.stereotype.as_deref()
    }

    pub fn head(&self) -> Option<&str> {
        self.head.as_deref()
    }

    pub fn tail(&self) -> Option<&str> {
        self.tail.as_deref()
    }

    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    pub fn name_compartment(&self) -> Option<&str> {
        self.name_compartment.as_deref()
    }

    /// Identifiers of the views a package view visually contains.
    pub fn contained_views(&self) -> &[String] {
        &self.contained_views
    }

    pub fn end1(&self) -> &AssociationEnd {
        &self.end1
    }

    pub fn end2(&self) -> &AssociationEnd {
        &self.end2
    }

    pub fn owned_elements(&self) -> &[TreeNode] {
        &self.owned_elements
    }

    pub fn owned_views(&self) -> &[TreeNode] {
        &self.owned_views
    }

    pub fn subviews(&self) -> &[TreeNode] {
        &self.subviews
    }

    /// Iterates over all direct children: owned elements, then owned views,
    /// then subviews.
    pub fn children(&self) -> impl Iterator<Item = &TreeNode> {
        self.owned_elements
            .iter()
            .chain(self.owned_views.iter())
            .chain(self.subviews.iter())
    }

    /// Depth-first search for the first node whose identifier equals `id`.
    ///
    /// The node itself is checked first, then each child subtree in
    /// [`children`](Self::children) order.
    pub fn find_by_id(&self, id: &str) -> Option<&TreeNode> {
        if self.id == id {
            return Some(self);
        }
        self.children().find_map(|child| child.find_by_id(id))
    }

    /// Returns the last subview with the given type tag, optionally
    /// restricted to a specific identifier.
    pub fn subview(&self, kind: &str, id: Option<&str>) -> Option<&TreeNode> {
        self.subviews
            .iter()
            .rev()
            .find(|view| view.kind == kind && id.is_none_or(|id| view.id == id))
    }

    /// Visits this node and all descendants in depth-first pre-order.
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }

    /// Lists `(name, bare id)` of every diagram node in this tree, in
    /// depth-first order.
    pub fn diagrams(&self) -> Vec<(String, String)> {
        self.walk()
            .filter(|node| node.kind.contains("Diagram"))
            .map(|node| (node.name.clone(), node.bare_id()))
            .collect()
    }
}

/// Depth-first pre-order iterator over a [`TreeNode`] and its descendants.
#[derive(Debug)]
pub struct Walk<'a> {
    stack: Vec<&'a TreeNode>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a TreeNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        let children: Vec<&TreeNode> = node.children().collect();
        self.stack.extend(children.into_iter().rev());
        Some(node)
    }
}

/// Identifier index over one revision tree.
///
/// Built once per revision and equivalent to calling
/// [`TreeNode::find_by_id`] on the root: when several nodes share an
/// identifier the first one in depth-first order wins.
#[derive(Debug)]
pub struct TreeIndex<'a> {
    root: &'a TreeNode,
    nodes: HashMap<&'a str, &'a TreeNode>,
}

impl<'a> TreeIndex<'a> {
    /// Indexes every node reachable from `root`.
    pub fn new(root: &'a TreeNode) -> Self {
        let mut nodes = HashMap::new();
        for node in root.walk() {
            nodes.entry(node.id()).or_insert(node);
        }
        Self { root, nodes }
    }

    pub fn root(&self) -> &'a TreeNode {
        self.root
    }

    pub fn get(&self, id: &str) -> Option<&'a TreeNode> {
        self.nodes.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
