//! Write appended attributes back into the original source text.
//!
//! No code generation: the source is copied as-is and every attribute the
//! annotation pass appended is spliced in right before the tag's `>` or `/>`.
//! Elements without a recorded origin (synthetic nodes) are ignored.

use crate::tree::{
    Attribute, AttributeItem, AttributeValue, Element, Node, OpeningElement, Program,
};

/// Source text with appended attributes inserted.
///
/// If nothing was appended the result equals `source` byte for byte.
pub fn emit_source(source: &str, program: &Program) -> String {
    let mut insertions = Vec::new();
    collect_nodes(&program.body, &mut insertions);
    if insertions.is_empty() {
        return source.to_string();
    }
    insertions.sort_by_key(|(offset, _)| *offset);

    let extra: usize = insertions.iter().map(|(_, text)| text.len()).sum();
    let mut out = String::with_capacity(source.len() + extra);
    let mut cursor = 0;
    for (offset, text) in insertions {
        let offset = offset.clamp(cursor, source.len());
        out.push_str(&source[cursor..offset]);
        out.push_str(&text);
        cursor = offset;
    }
    out.push_str(&source[cursor..]);
    out
}

fn collect_nodes(nodes: &[Node], insertions: &mut Vec<(usize, String)>) {
    for node in nodes {
        match node {
            Node::Element(element) => collect_element(element, insertions),
            Node::Fragment(children) | Node::Expression(children) => {
                collect_nodes(children, insertions)
            }
            Node::Text(_) => {}
        }
    }
}

fn collect_element(element: &Element, insertions: &mut Vec<(usize, String)>) {
    if let Some(insertion) = render_insertion(&element.opening) {
        insertions.push(insertion);
    }
    for item in &element.opening.attributes {
        match item {
            AttributeItem::Attribute(Attribute {
                value: Some(AttributeValue::Markup(nodes)),
                ..
            })
            | AttributeItem::Spread(nodes) => collect_nodes(nodes, insertions),
            AttributeItem::Attribute(_) => {}
        }
    }
    collect_nodes(&element.children, insertions);
}

fn render_insertion(opening: &OpeningElement) -> Option<(usize, String)> {
    let origin = opening.origin?;
    let rendered: Vec<String> = opening
        .appended_attributes()
        .iter()
        .filter_map(|item| match item {
            AttributeItem::Attribute(attr) => render_attribute(attr),
            AttributeItem::Spread(_) => None,
        })
        .collect();
    if rendered.is_empty() {
        return None;
    }

    let joined = rendered.join(" ");
    let text = if origin.padded {
        format!("{joined} ")
    } else {
        format!(" {joined}")
    };
    Some((origin.insert_at, text))
}

/// `name`, `name="value"`, or `name={"..."}` when both quote kinds or an `&`
/// (entity start) appear.
/// Markup values cannot be rendered without a code generator and are dropped.
fn render_attribute(attr: &Attribute) -> Option<String> {
    match &attr.value {
        None => Some(attr.name.to_string()),
        Some(AttributeValue::String(value)) => Some(format!("{}={}", attr.name, quote(value))),
        Some(AttributeValue::Markup(_)) => None,
    }
}

fn quote(value: &str) -> String {
    if value.contains('&') {
        format!("{{{}}}", serde_json::Value::String(value.to_string()))
    } else if !value.contains('"') {
        format!("\"{value}\"")
    } else if !value.contains('\'') {
        format!("'{value}'")
    } else {
        format!("{{{}}}", serde_json::Value::String(value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{SourceOrigin, TagName};

    fn opening(insert_at: usize, padded: bool, appended: &[(&str, &str)]) -> OpeningElement {
        let mut opening = OpeningElement::new(TagName::Identifier("div".into())).at(1, 0);
        opening.origin = Some(SourceOrigin {
            insert_at,
            attribute_count: 0,
            padded,
        });
        for (name, value) in appended {
            opening
                .attributes
                .push(AttributeItem::Attribute(Attribute::string(*name, *value)));
        }
        opening
    }

    #[test]
    fn untouched_tree_round_trips() {
        let source = "<div>Hello</div>";
        let program = Program::new(vec![Node::Element(Element::new(
            opening(4, false, &[]),
            vec![Node::Text("Hello".into())],
        ))]);
        assert_eq!(emit_source(source, &program), source);
    }

    #[test]
    fn splices_before_closing_bracket() {
        let source = "<div>Hello</div>";
        let program = Program::new(vec![Node::Element(Element::new(
            opening(4, false, &[("data-source", "test.tsx:1:0")]),
            vec![],
        ))]);
        assert_eq!(
            emit_source(source, &program),
            r#"<div data-source="test.tsx:1:0">Hello</div>"#
        );
    }

    #[test]
    fn padded_self_closing_keeps_single_spaces() {
        let source = "<Component />";
        let program = Program::new(vec![Node::Element(Element::new(
            opening(11, true, &[("data-source", "a.tsx:1:0")]),
            vec![],
        ))]);
        assert_eq!(
            emit_source(source, &program),
            r#"<Component data-source="a.tsx:1:0" />"#
        );
    }

    #[test]
    fn nested_insertions_keep_order() {
        let source = "<a><b/></a>";
        let inner = Element::new(opening(5, false, &[("x", "2")]), vec![]);
        let outer = Element::new(opening(2, false, &[("x", "1")]), vec![Node::Element(inner)]);
        let program = Program::new(vec![Node::Element(outer)]);
        assert_eq!(emit_source(source, &program), r#"<a x="1"><b x="2"/></a>"#);
    }

    #[test]
    fn quotes_values_that_contain_quotes() {
        assert_eq!(quote("plain"), "\"plain\"");
        assert_eq!(quote(r#"say "hi""#), r#"'say "hi"'"#);
        assert_eq!(quote(r#"it's "x""#), r#"{"it's \"x\""}"#);
    }

    #[test]
    fn ampersands_use_expression_form() {
        assert_eq!(quote("a&amp;b.tsx:1:0"), r#"{"a&amp;b.tsx:1:0"}"#);

        let source = "<div/>";
        let program = Program::new(vec![Node::Element(Element::new(
            opening(4, false, &[("data-source", "R&D/App.tsx:1:0")]),
            vec![],
        ))]);
        assert_eq!(
            emit_source(source, &program),
            r#"<div data-source={"R&D/App.tsx:1:0"}/>"#
        );
    }
}
