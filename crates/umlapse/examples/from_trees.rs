//! Example: Animating a history built from revision trees
//!
//! Builds two revisions of a small class diagram directly from tree nodes,
//! without a model document, and prints the frames and the changelog.

use umlapse::{
    HistoryBuilder,
    timeline::DiagramScope,
    tree::{AggregationKind, AssociationEnd, TreeNode},
};

fn class_view(id: &str, model: &str, attributes: &[&str]) -> TreeNode {
    let mut compartment = TreeNode::new(format!("{id}-attrs"), "UMLAttributeCompartmentView");
    for (index, attribute) in attributes.iter().enumerate() {
        let item = TreeNode::new(format!("{id}-attr-{index}"), "UMLAttributeView");
        compartment = compartment.with_subview(item.with_text(*attribute));
    }

    TreeNode::new(id, "UMLClassView")
        .with_model(model)
        .with_subview(compartment)
        .with_subview(TreeNode::new(format!("{id}-ops"), "UMLOperationCompartmentView"))
}

fn revision(views: Vec<TreeNode>, models: Vec<TreeNode>) -> TreeNode {
    let mut diagram = TreeNode::new("/main", "UMLClassDiagram").with_name("Main");
    for view in views {
        diagram = diagram.with_owned_view(view);
    }

    let mut model = TreeNode::new("model", "UMLModel").with_owned_element(diagram);
    for element in models {
        model = model.with_owned_element(element);
    }
    TreeNode::new("project", "Project").with_name("Shop").with_owned_element(model)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let order = TreeNode::new("order", "UMLClass").with_name("Order");
    let item = TreeNode::new("item", "UMLClass").with_name("Item");
    let contains = TreeNode::new("contains", "UMLAssociation")
        .with_name("contains")
        .with_ends(
            AssociationEnd::new(false, AggregationKind::None, "1"),
            AssociationEnd::new(true, AggregationKind::Composite, "0..*"),
        );

    // Revision 1: a lone order class.
    let first = revision(vec![class_view("v-order", "order", &[])], vec![order.clone()]);

    // Revision 2: the order gains an attribute and owns its items.
    let second = revision(
        vec![
            class_view("v-order", "order", &["+id: int"]),
            class_view("v-item", "item", &[]),
            TreeNode::new("v-contains", "UMLAssociationView")
                .with_model("contains")
                .with_endpoints("v-order", "v-item"),
        ],
        vec![order, item, contains],
    );

    let builder = HistoryBuilder::default();
    let timeslices = builder.timeslices(&[first, second], &DiagramScope::All)?;

    for (index, frame) in builder.render_frames(&timeslices).iter().enumerate() {
        println!("// frame {}\n{frame}\n", index + 1);
    }
    print!("{}", builder.changelog(&timeslices, None, None));

    Ok(())
}
