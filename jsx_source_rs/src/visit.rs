//! Mutable depth-first traversal over the markup tree.
//!
//! Implement [`VisitMut`] and override the methods you care about; the
//! default bodies call the matching `walk_*` function so children keep being
//! visited. Order is pre-order and follows the source: an opening element is
//! visited before the markup nested in its attribute values, which comes
//! before the element's children.

use crate::tree::{AttributeItem, AttributeValue, Element, Node, OpeningElement, Program};

pub trait VisitMut {
    fn visit_program(&mut self, program: &mut Program) {
        walk_program(self, program);
    }

    fn visit_node(&mut self, node: &mut Node) {
        walk_node(self, node);
    }

    fn visit_element(&mut self, element: &mut Element) {
        walk_element(self, element);
    }

    fn visit_opening_element(&mut self, opening: &mut OpeningElement) {
        walk_opening_element(self, opening);
    }

    fn visit_attribute_item(&mut self, item: &mut AttributeItem) {
        walk_attribute_item(self, item);
    }
}

pub fn walk_program<V: VisitMut + ?Sized>(visitor: &mut V, program: &mut Program) {
    walk_nodes(visitor, &mut program.body);
}

pub fn walk_nodes<V: VisitMut + ?Sized>(visitor: &mut V, nodes: &mut [Node]) {
    for node in nodes {
        visitor.visit_node(node);
    }
}

pub fn walk_node<V: VisitMut + ?Sized>(visitor: &mut V, node: &mut Node) {
    match node {
        Node::Element(element) => visitor.visit_element(element),
        Node::Fragment(children) | Node::Expression(children) => walk_nodes(visitor, children),
        Node::Text(_) => {}
    }
}

pub fn walk_element<V: VisitMut + ?Sized>(visitor: &mut V, element: &mut Element) {
    visitor.visit_opening_element(&mut element.opening);
    walk_nodes(visitor, &mut element.children);
}

pub fn walk_opening_element<V: VisitMut + ?Sized>(visitor: &mut V, opening: &mut OpeningElement) {
    // Index loop: a visitor may append to the list while we walk it.
    let mut index = 0;
    while index < opening.attributes.len() {
        visitor.visit_attribute_item(&mut opening.attributes[index]);
        index += 1;
    }
}

pub fn walk_attribute_item<V: VisitMut + ?Sized>(visitor: &mut V, item: &mut AttributeItem) {
    match item {
        AttributeItem::Attribute(attr) => {
            if let Some(AttributeValue::Markup(nodes)) = &mut attr.value {
                walk_nodes(visitor, nodes);
            }
        }
        AttributeItem::Spread(nodes) => walk_nodes(visitor, nodes),
    }
}

struct OpeningElementVisitor<F> {
    callback: F,
}

impl<F: FnMut(&mut OpeningElement)> VisitMut for OpeningElementVisitor<F> {
    fn visit_opening_element(&mut self, opening: &mut OpeningElement) {
        (self.callback)(opening);
        walk_opening_element(self, opening);
    }
}

/// Call `callback` on every opening element reachable from `program`, in
/// document order.
pub fn for_each_opening_element_mut<F>(program: &mut Program, callback: F)
where
    F: FnMut(&mut OpeningElement),
{
    let mut visitor = OpeningElementVisitor { callback };
    visitor.visit_program(program);
}
