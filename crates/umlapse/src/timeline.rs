//! Timeslice building.
//!
//! A [`Timeslice`] is the flattened list of [`Drawable`]s of one revision.
//! [`build_timeslices`] walks every revision tree in order, materializes a
//! drawable for each diagram view within the [`DiagramScope`], and diffs it
//! against the element with the same identifier in the previous timeslice.
//!
//! Building is all-or-nothing: the first [`StructuralError`] discards every
//! timeslice built so far.

use std::{convert::Infallible, fmt, str::FromStr};

use indexmap::IndexSet;
use log::{debug, error, info, trace};

use umlapse_core::{
    drawable::{
        Actor, Association, AssociationKind, ChangeReason, Class, Drawable, Element, Inclusion,
        InclusionKind, Interface, Package, UseCase,
    },
    identifier::strip_reference_marker,
    tree::{TreeIndex, TreeNode},
};

use crate::error::{StructuralError, UmlapseError};

const ALL_DIAGRAMS: &str = "all";

/// Which diagrams contribute views to the timeslices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum DiagramScope {
    #[default]
    All,
    /// A single diagram, identified by its marker-stripped identifier.
    Diagram(String),
}

impl DiagramScope {
    /// Parses a scope selector: the literal `all`, or a diagram identifier
    /// with or without reference markers.
    pub fn from_id(id: &str) -> Self {
        if id == ALL_DIAGRAMS {
            Self::All
        } else {
            Self::Diagram(strip_reference_marker(id).into_owned())
        }
    }

    /// Returns `true` when the views owned by `node` are in scope.
    pub fn includes(&self, node: &TreeNode) -> bool {
        match self {
            Self::All => true,
            Self::Diagram(id) => strip_reference_marker(node.id()) == id.as_str(),
        }
    }
}

impl FromStr for DiagramScope {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_id(s))
    }
}

impl fmt::Display for DiagramScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "{ALL_DIAGRAMS}"),
            Self::Diagram(id) => write!(f, "{id}"),
        }
    }
}

/// The drawables of one revision, in traversal order.
///
/// Not comparable: drawable equality ignores change reasons.
#[derive(Debug, Clone, Default)]
pub struct Timeslice {
    drawables: Vec<Drawable>,
}

impl Timeslice {
    pub fn new(drawables: Vec<Drawable>) -> Self {
        Self { drawables }
    }

    pub fn drawables(&self) -> &[Drawable] {
        &self.drawables
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Drawable> {
        self.drawables.iter()
    }

    pub fn len(&self) -> usize {
        self.drawables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drawables.is_empty()
    }

    /// Returns the last drawable with the given identifier.
    ///
    /// Identifiers should be unique within a timeslice; when they are not,
    /// the drawable added last wins.
    pub fn find(&self, id: &str) -> Option<&Drawable> {
        self.drawables.iter().rev().find(|drawable| drawable.id() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.drawables.iter().any(|drawable| drawable.id() == id)
    }
}

impl<'a> IntoIterator for &'a Timeslice {
    type Item = &'a Drawable;
    type IntoIter = std::slice::Iter<'a, Drawable>;

    fn into_iter(self) -> Self::IntoIter {
        self.drawables.iter()
    }
}

/// Builds one timeslice per revision.
///
/// # Errors
///
/// Returns [`UmlapseError::Structural`] for the first revision that cannot
/// be materialized. No timeslice is returned in that case.
pub fn build_timeslices(
    revisions: &[TreeNode],
    scope: &DiagramScope,
) -> Result<Vec<Timeslice>, UmlapseError> {
    info!(revisions = revisions.len(), scope:% = scope; "Building timeslices");

    let mut timeslices: Vec<Timeslice> = Vec::with_capacity(revisions.len());
    for (index, revision) in revisions.iter().enumerate() {
        let number = index + 1;
        let timeslice = RevisionDiff::new(revision, scope, timeslices.last())
            .run()
            .map_err(|err| {
                error!(revision = number, err:% = err; "Aborting timeslice building");
                UmlapseError::new_structural_error(number, err)
            })?;

        debug!(
            revision = number,
            drawables = timeslice.len(),
            changed = timeslice.iter().filter(|d| d.is_changed()).count();
            "Revision diffed"
        );
        timeslices.push(timeslice);
    }

    Ok(timeslices)
}

/// Same as [`build_timeslices`], reporting failure as a flag.
///
/// Returns the timeslices and `false` on success, or an empty list and
/// `true` when any revision is malformed.
pub fn build_timeslices_or_empty(
    revisions: &[TreeNode],
    scope: &DiagramScope,
) -> (Vec<Timeslice>, bool) {
    match build_timeslices(revisions, scope) {
        Ok(timeslices) => (timeslices, false),
        Err(_) => (Vec::new(), true),
    }
}

/// Lists `(name, id)` of every diagram across all revisions.
///
/// Identifiers are marker-stripped. A diagram present in several revisions
/// is listed once, at its first appearance.
pub fn list_diagrams(revisions: &[TreeNode]) -> Vec<(String, String)> {
    let diagrams: IndexSet<(String, String)> =
        revisions.iter().flat_map(TreeNode::diagrams).collect();
    diagrams.into_iter().collect()
}

/// Diff state of a single revision.
struct RevisionDiff<'a> {
    index: TreeIndex<'a>,
    scope: &'a DiagramScope,
    previous: Option<&'a Timeslice>,
    drawables: Vec<Drawable>,
}

impl<'a> RevisionDiff<'a> {
    fn new(root: &'a TreeNode, scope: &'a DiagramScope, previous: Option<&'a Timeslice>) -> Self {
        Self {
            index: TreeIndex::new(root),
            scope,
            previous,
            drawables: Vec::new(),
        }
    }

    fn run(mut self) -> Result<Timeslice, StructuralError> {
        let root = self.index.root();
        self.visit(root)?;
        Ok(Timeslice::new(self.drawables))
    }

    fn visit(&mut self, node: &'a TreeNode) -> Result<(), StructuralError> {
        if self.scope.includes(node) {
            for view in node.owned_views() {
                if let Some(element) = self.materialize(view)? {
                    let drawable = self.diff(element)?;
                    self.drawables.push(drawable);
                }
            }
        }

        for child in node.children() {
            self.visit(child)?;
        }
        Ok(())
    }

    fn diff(&self, element: Element) -> Result<Drawable, StructuralError> {
        let previous = self.previous.and_then(|timeslice| timeslice.find(element.id()));
        let reasons = match previous {
            None => vec![ChangeReason::Created],
            Some(previous) => {
                element
                    .changes_since(previous.element())
                    .ok_or_else(|| StructuralError::KindMismatch {
                        id: element.id().to_string(),
                        previous: previous.kind(),
                        current: element.kind(),
                    })?
            }
        };

        trace!(id = element.id(), kind:% = element.kind(), reasons:? = reasons; "Diffed element");
        Ok(Drawable::new(element, reasons))
    }

    /// Builds the element for a view, or `None` for view types that are not
    /// drawn.
    fn materialize(&self, view: &'a TreeNode) -> Result<Option<Element>, StructuralError> {
        let element = match view.kind() {
            "UMLClassView" => Element::Class(self.class(view)?),
            "UMLInterfaceView" => Element::Interface(self.interface(view)?),
            "UMLAssociationView" => {
                Element::Association(self.association(view, AssociationKind::Association)?)
            }
            "UMLDependencyView" => {
                Element::Association(self.association(view, AssociationKind::Dependency)?)
            }
            "UMLGeneralizationView" => {
                Element::Association(self.association(view, AssociationKind::Generalization)?)
            }
            "UMLInterfaceRealizationView" => {
                Element::Association(self.association(view, AssociationKind::Realization)?)
            }
            "UMLPackageView" => Element::Package(self.package(view)?),
            "UMLUseCaseView" => Element::UseCase(self.use_case(view)?),
            "UMLActorView" => Element::Actor(Actor::new(view.id(), self.model(view)?.name())),
            "UMLIncludeView" => Element::Inclusion(self.inclusion(view, InclusionKind::Include)?),
            "UMLExtendView" => Element::Inclusion(self.inclusion(view, InclusionKind::Extend)?),
            other => {
                trace!(id = view.id(), kind = other; "Skipping view");
                return Ok(None);
            }
        };
        Ok(Some(element))
    }

    fn class(&self, view: &'a TreeNode) -> Result<Class, StructuralError> {
        let model = self.model(view)?;
        let attributes =
            compartment_texts(view, "UMLAttributeCompartmentView", "UMLAttributeView")?;
        let methods = compartment_texts(view, "UMLOperationCompartmentView", "UMLOperationView")?;

        Ok(Class::new(view.id(), model.name())
            .with_attributes(attributes)
            .with_methods(methods)
            .with_stereotype(self.stereotype(model)))
    }

    fn interface(&self, view: &'a TreeNode) -> Result<Interface, StructuralError> {
        let name_view = subview(view, "UMLNameCompartmentView", None)?;
        let label = subview(name_view, "LabelView", name_view.name_label())?;
        Ok(Interface::new(view.id(), label.text()))
    }

    fn association(
        &self,
        view: &'a TreeNode,
        kind: AssociationKind,
    ) -> Result<Association, StructuralError> {
        let model = self.model(view)?;
        let tail = reference(view, view.tail(), "tail")?;
        let head = reference(view, view.head(), "head")?;

        Ok(Association::new(view.id(), kind, tail, head)
            .with_name(model.name())
            .with_directed(!model.end1().navigable())
            .with_aggregation(model.end2().aggregation())
            .with_multiplicities(model.end1().multiplicity(), model.end2().multiplicity())
            .with_stereotype(self.stereotype(model)))
    }

    fn package(&self, view: &'a TreeNode) -> Result<Package, StructuralError> {
        let compartment = reference(view, view.name_compartment(), "nameCompartment")?;
        let name = view
            .find_by_id(compartment)
            .ok_or_else(|| unresolved(view, compartment))?
            .text();

        Ok(Package::new(view.id(), name).with_nodes(view.contained_views().to_vec()))
    }

    fn use_case(&self, view: &'a TreeNode) -> Result<UseCase, StructuralError> {
        let compartment_id = reference(view, view.name_compartment(), "nameCompartment")?;
        let compartment = view
            .find_by_id(compartment_id)
            .ok_or_else(|| unresolved(view, compartment_id))?;
        let model = self.model(compartment)?;
        Ok(UseCase::new(view.id(), model.name()))
    }

    fn inclusion(
        &self,
        view: &'a TreeNode,
        kind: InclusionKind,
    ) -> Result<Inclusion, StructuralError> {
        let model = self.model(view)?;
        let tail = reference(view, view.tail(), "tail")?;
        let head = reference(view, view.head(), "head")?;
        Ok(Inclusion::new(view.id(), kind, tail, head).with_name(model.name()))
    }

    /// Resolves the model element of `view` anywhere in the revision.
    fn model(&self, view: &TreeNode) -> Result<&'a TreeNode, StructuralError> {
        let target = reference(view, view.model(), "model")?;
        self.index.get(target).ok_or_else(|| unresolved(view, target))
    }

    /// Stereotype text of a model element. Stereotypes that reference another
    /// element are shown by that element's name.
    fn stereotype(&self, model: &TreeNode) -> Option<String> {
        model.stereotype().map(|stereotype| {
            self.index
                .get(stereotype)
                .map_or(stereotype, TreeNode::name)
                .to_string()
        })
    }
}

fn reference<'n>(
    node: &TreeNode,
    value: Option<&'n str>,
    field: &'static str,
) -> Result<&'n str, StructuralError> {
    value.ok_or_else(|| StructuralError::MissingReference {
        id: node.id().to_string(),
        field,
    })
}

fn unresolved(node: &TreeNode, target: &str) -> StructuralError {
    StructuralError::UnresolvedReference {
        id: node.id().to_string(),
        target: target.to_string(),
    }
}

fn subview<'n>(
    view: &'n TreeNode,
    kind: &'static str,
    id: Option<&str>,
) -> Result<&'n TreeNode, StructuralError> {
    view.subview(kind, id).ok_or_else(|| StructuralError::MissingSubview {
        id: view.id().to_string(),
        kind,
    })
}

/// Texts of the `item_kind` entries inside the `compartment_kind` subview.
fn compartment_texts(
    view: &TreeNode,
    compartment_kind: &'static str,
    item_kind: &str,
) -> Result<Vec<String>, StructuralError> {
    let compartment = subview(view, compartment_kind, None)?;
    Ok(compartment
        .subviews()
        .iter()
        .filter(|item| item.kind() == item_kind)
        .map(|item| item.text().to_string())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class_view(id: &str, model: &str) -> TreeNode {
        TreeNode::new(id, "UMLClassView")
            .with_model(model)
            .with_subview(TreeNode::new(format!("{id}-attrs"), "UMLAttributeCompartmentView"))
            .with_subview(TreeNode::new(format!("{id}-ops"), "UMLOperationCompartmentView"))
    }

    fn revision(diagram_views: Vec<TreeNode>, models: Vec<TreeNode>) -> TreeNode {
        let mut diagram = TreeNode::new("/diagram", "UMLClassDiagram").with_name("Main");
        for view in diagram_views {
            diagram = diagram.with_owned_view(view);
        }
        let mut model = TreeNode::new("model", "UMLModel").with_owned_element(diagram);
        for element in models {
            model = model.with_owned_element(element);
        }
        TreeNode::new("project", "Project").with_owned_element(model)
    }

    #[test]
    fn test_scope_from_id() {
        assert_eq!(DiagramScope::from_id("all"), DiagramScope::All);
        assert_eq!(
            DiagramScope::from_id("/d1"),
            DiagramScope::Diagram("d1".to_string())
        );
        assert_eq!(
            "d2".parse::<DiagramScope>(),
            Ok(DiagramScope::Diagram("d2".to_string()))
        );
        assert_eq!(DiagramScope::All.to_string(), "all");
    }

    #[test]
    fn test_scope_includes_marker_stripped() {
        let scope = DiagramScope::from_id("d1");
        assert!(scope.includes(&TreeNode::new("/d1", "UMLClassDiagram")));
        assert!(!scope.includes(&TreeNode::new("d2", "UMLClassDiagram")));
        assert!(DiagramScope::All.includes(&TreeNode::new("d2", "UMLClassDiagram")));
    }

    #[test]
    fn test_class_compartments() {
        let view = TreeNode::new("v1", "UMLClassView")
            .with_model("c1")
            .with_subview(
                TreeNode::new("attrs", "UMLAttributeCompartmentView")
                    .with_subview(TreeNode::new("a1", "UMLAttributeView").with_text("+id: int"))
                    .with_subview(TreeNode::new("x", "LabelView").with_text("ignored")),
            )
            .with_subview(
                TreeNode::new("ops", "UMLOperationCompartmentView")
                    .with_subview(TreeNode::new("o1", "UMLOperationView").with_text("+run()")),
            );
        let tree = revision(
            vec![view],
            vec![
                TreeNode::new("c1", "UMLClass")
                    .with_name("Job")
                    .with_stereotype("st"),
            ],
        );

        let timeslices = build_timeslices(&[tree], &DiagramScope::All).expect("valid revision");
        let Element::Class(class) = timeslices[0].drawables()[0].element() else {
            panic!("expected a class");
        };
        assert_eq!(class.name(), "Job");
        assert_eq!(class.attributes(), ["+id: int".to_string()]);
        assert_eq!(class.methods(), ["+run()".to_string()]);
        assert_eq!(class.stereotype(), Some("st"));
    }

    #[test]
    fn test_stereotype_reference_resolves_to_name() {
        let tree = revision(
            vec![class_view("v1", "c1")],
            vec![
                TreeNode::new("c1", "UMLClass").with_name("Job").with_stereotype("st1"),
                TreeNode::new("st1", "UMLStereotype").with_name("entity"),
            ],
        );

        let timeslices = build_timeslices(&[tree], &DiagramScope::All).expect("valid revision");
        let Element::Class(class) = timeslices[0].drawables()[0].element() else {
            panic!("expected a class");
        };
        assert_eq!(class.stereotype(), Some("entity"));
    }

    #[test]
    fn test_missing_compartment_aborts() {
        let view = TreeNode::new("v1", "UMLClassView").with_model("c1");
        let tree = revision(vec![view], vec![TreeNode::new("c1", "UMLClass")]);

        let err = build_timeslices(&[tree], &DiagramScope::All).expect_err("missing compartment");
        assert!(matches!(
            err,
            UmlapseError::Structural {
                revision: 1,
                source: StructuralError::MissingSubview { .. }
            }
        ));
    }

    #[test]
    fn test_unresolved_model_aborts() {
        let tree = revision(vec![class_view("v1", "missing")], Vec::new());
        let err = build_timeslices(&[tree], &DiagramScope::All).expect_err("unresolved model");
        assert!(matches!(
            err,
            UmlapseError::Structural {
                source: StructuralError::UnresolvedReference { ref target, .. },
                ..
            } if target == "missing"
        ));
    }

    #[test]
    fn test_kind_mismatch_aborts() {
        let first = revision(
            vec![TreeNode::new("v1", "UMLActorView").with_model("m1")],
            vec![TreeNode::new("m1", "UMLActor").with_name("User")],
        );
        let second = revision(
            vec![class_view("v1", "m1")],
            vec![TreeNode::new("m1", "UMLClass").with_name("User")],
        );

        let err = build_timeslices(&[first, second], &DiagramScope::All).expect_err("kind changed");
        assert!(matches!(
            err,
            UmlapseError::Structural {
                revision: 2,
                source: StructuralError::KindMismatch { .. }
            }
        ));
    }

    #[test]
    fn test_unknown_views_are_skipped() {
        let tree = revision(
            vec![TreeNode::new("note", "UMLNoteView").with_text("hello")],
            Vec::new(),
        );
        let timeslices = build_timeslices(&[tree], &DiagramScope::All).expect("valid revision");
        assert!(timeslices[0].is_empty());
    }

    #[test]
    fn test_interface_name_from_label() {
        let view = TreeNode::new("i1", "UMLInterfaceView").with_subview(
            TreeNode::new("nc", "UMLNameCompartmentView")
                .with_name_label("lbl")
                .with_subview(TreeNode::new("other", "LabelView").with_text("Stereotype"))
                .with_subview(TreeNode::new("lbl", "LabelView").with_text("Runnable"))
                .with_subview(TreeNode::new("after", "LabelView").with_text("Namespace")),
        );
        let tree = revision(vec![view], Vec::new());

        let timeslices = build_timeslices(&[tree], &DiagramScope::All).expect("valid revision");
        assert_eq!(timeslices[0].drawables()[0].name(), "Runnable");
    }

    #[test]
    fn test_timeslice_find_is_last_match() {
        let timeslice = Timeslice::new(vec![
            Drawable::from(Element::Actor(Actor::new("a", "First"))),
            Drawable::from(Element::Actor(Actor::new("a", "Second"))),
        ]);
        assert_eq!(timeslice.find("a").map(Drawable::name), Some("Second"));
        assert!(timeslice.contains("a"));
        assert!(!timeslice.contains("b"));
    }
}
