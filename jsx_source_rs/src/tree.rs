//! Markup tree consumed by the annotation pass.
//!
//! The tree only models what the pass and the emitter need: elements, their
//! opening tags with ordered attribute lists, fragments, text, and the markup
//! reachable from inside JavaScript expressions. Anything else in a source
//! file (statements, plain expressions, types) is not represented.
//!
//! Positions follow JS tooling conventions: 1-based line, 0-based column.

use std::fmt;

use serde::Serialize;

/// Top-level node of one file: markup roots in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    pub body: Vec<Node>,
}

impl Program {
    pub fn new(body: Vec<Node>) -> Self {
        Self { body }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    /// `<>...</>`: groups children, has no opening element of its own.
    Fragment(Vec<Node>),
    Text(String),
    /// Markup found inside an expression container or spread child.
    Expression(Vec<Node>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub opening: OpeningElement,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(opening: OpeningElement, children: Vec<Node>) -> Self {
        Self { opening, children }
    }
}

/// Opening tag of an element, self-closing tags included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpeningElement {
    pub tag: TagName,
    pub attributes: Vec<AttributeItem>,
    /// Start of the tag (`<`). `None` for synthetic nodes; those are never annotated.
    pub position: Option<SourcePosition>,
    /// Where the element came from in the original text, if it was parsed.
    pub origin: Option<SourceOrigin>,
}

impl OpeningElement {
    pub fn new(tag: TagName) -> Self {
        Self {
            tag,
            attributes: Vec::new(),
            position: None,
            origin: None,
        }
    }

    pub fn at(mut self, line: u32, column: u32) -> Self {
        self.position = Some(SourcePosition { line, column });
        self
    }

    pub fn with_attribute(mut self, item: AttributeItem) -> Self {
        self.attributes.push(item);
        self
    }

    /// First attribute whose identifier name equals `name`. Spreads and
    /// namespaced names never match.
    pub fn find_attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find_map(|item| match item {
            AttributeItem::Attribute(attr) if attr.name.is_identifier(name) => Some(attr),
            _ => None,
        })
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.find_attribute(name).is_some()
    }

    /// Attributes appended after parsing, i.e. not present in the source text.
    pub fn appended_attributes(&self) -> &[AttributeItem] {
        let parsed = self
            .origin
            .map(|origin| origin.attribute_count)
            .unwrap_or(0)
            .min(self.attributes.len());
        &self.attributes[parsed..]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SourcePosition {
    /// 1-based line.
    pub line: u32,
    /// 0-based column.
    pub column: u32,
}

/// Byte-level bookkeeping recorded by the parser for the emitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceOrigin {
    /// Byte offset right before the closing `>` or `/>` of the opening tag.
    pub insert_at: usize,
    /// Number of attribute items written in the source.
    pub attribute_count: usize,
    /// Whitespace already precedes `insert_at`.
    pub padded: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagName {
    /// `div`, `Show`: the only form exclusion lists apply to.
    Identifier(String),
    /// `svg:rect`
    Namespaced { namespace: String, name: String },
    /// `Foo.Bar`, `this.Thing`, kept as written.
    Member(String),
}

impl TagName {
    pub fn identifier(&self) -> Option<&str> {
        match self {
            Self::Identifier(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for TagName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identifier(name) | Self::Member(name) => f.write_str(name),
            Self::Namespaced { namespace, name } => write!(f, "{namespace}:{name}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeItem {
    Attribute(Attribute),
    /// `{...props}`, with any markup found in the spread argument.
    Spread(Vec<Node>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: AttributeName,
    pub value: Option<AttributeValue>,
}

impl Attribute {
    pub fn string(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: AttributeName::Identifier(name.into()),
            value: Some(AttributeValue::String(value.into())),
        }
    }

    pub fn string_value(&self) -> Option<&str> {
        match &self.value {
            Some(AttributeValue::String(value)) => Some(value),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeName {
    Identifier(String),
    Namespaced { namespace: String, name: String },
}

impl AttributeName {
    pub fn is_identifier(&self, name: &str) -> bool {
        matches!(self, Self::Identifier(own) if own == name)
    }
}

impl fmt::Display for AttributeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identifier(name) => f.write_str(name),
            Self::Namespaced { namespace, name } => write!(f, "{namespace}:{name}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    String(String),
    /// Expression container, element or fragment value.
    Markup(Vec<Node>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_attribute_ignores_spreads_and_namespaces() {
        let opening = OpeningElement::new(TagName::Identifier("div".into()))
            .with_attribute(AttributeItem::Spread(Vec::new()))
            .with_attribute(AttributeItem::Attribute(Attribute {
                name: AttributeName::Namespaced {
                    namespace: "data".into(),
                    name: "source".into(),
                },
                value: None,
            }))
            .with_attribute(AttributeItem::Attribute(Attribute::string("id", "main")));

        assert!(!opening.has_attribute("data:source"));
        assert!(!opening.has_attribute("source"));
        assert_eq!(
            opening.find_attribute("id").and_then(Attribute::string_value),
            Some("main")
        );
    }

    #[test]
    fn appended_attributes_start_after_parsed_ones() {
        let mut opening = OpeningElement::new(TagName::Identifier("div".into()))
            .with_attribute(AttributeItem::Attribute(Attribute::string("id", "a")));
        opening.origin = Some(SourceOrigin {
            insert_at: 12,
            attribute_count: 1,
            padded: false,
        });
        assert!(opening.appended_attributes().is_empty());

        opening
            .attributes
            .push(AttributeItem::Attribute(Attribute::string("data-source", "x")));
        assert_eq!(opening.appended_attributes().len(), 1);
    }

    #[test]
    fn synthetic_element_reports_everything_as_appended() {
        let opening = OpeningElement::new(TagName::Member("Foo.Bar".into()))
            .with_attribute(AttributeItem::Attribute(Attribute::string("a", "b")));
        assert_eq!(opening.appended_attributes().len(), 1);
        assert_eq!(opening.tag.to_string(), "Foo.Bar");
        assert_eq!(opening.tag.identifier(), None);
    }
}
