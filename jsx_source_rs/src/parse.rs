//! Source text to markup tree, using OXC.
//!
//! The whole file is parsed as JS/TS, then every JSX element and fragment is
//! lowered into [`crate::tree`] nodes. Markup buried inside expressions
//! (`{items.map(i => <li/>)}`, `fallback={<div/>}`, `{...{ icon: <Icon/> }}`)
//! ends up in `Node::Expression` / `AttributeValue::Markup` in source order, so
//! the annotation pass sees elements in the same order a JS traversal would.

use std::path::Path;

use oxc_allocator::Allocator;
use oxc_ast::ast::{
    JSXAttributeItem, JSXAttributeName, JSXAttributeValue, JSXChild, JSXElement, JSXElementName,
    JSXFragment, JSXOpeningElement,
};
use oxc_ast_visit::Visit;
use oxc_parser::Parser;
use oxc_span::{GetSpan, SourceType, Span};
use tracing::debug;

use crate::error::{Error, Result};
use crate::tree::{
    self, Attribute, AttributeItem, AttributeName, AttributeValue, Node, OpeningElement,
    SourceOrigin, SourcePosition, TagName,
};

/// Parse `source` and lower its markup into a [`tree::Program`].
///
/// `path` only picks the dialect: `.ts`/`.mts`/`.cts` parse without JSX,
/// everything else (including unknown extensions) with JSX + TypeScript.
pub fn parse_markup(source: &str, path: &Path) -> Result<tree::Program> {
    let allocator = Allocator::default();
    let ret = Parser::new(&allocator, source, source_type_for(path)).parse();

    if !ret.errors.is_empty() {
        debug!(
            path = %path.display(),
            errors = ret.errors.len(),
            "parser reported errors"
        );
        return Err(Error::Parse {
            path: path.display().to_string(),
            messages: ret.errors.iter().map(|err| err.to_string()).collect(),
        });
    }

    let lowerer = Lowerer::new(source);
    let body = lowerer.collect(|collector| collector.visit_program(&ret.program));
    Ok(tree::Program::new(body))
}

fn source_type_for(path: &Path) -> SourceType {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    // JSX in plain .ts files clashes with `<T>` casts and generics.
    let plain_typescript = matches!(ext, "ts" | "mts" | "cts");
    SourceType::from_path(path)
        .unwrap_or_else(|_| SourceType::tsx())
        .with_jsx(!plain_typescript)
}

/// Byte offset -> (1-based line, 0-based UTF-16 column).
///
/// Lines break on every JS line terminator: `\n`, `\r`, `\r\n` (one break),
/// U+2028 and U+2029.
struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        let mut chars = source.char_indices().peekable();
        while let Some((idx, ch)) = chars.next() {
            match ch {
                '\r' if matches!(chars.peek(), Some((_, '\n'))) => {}
                '\n' | '\r' | '\u{2028}' | '\u{2029}' => line_starts.push(idx + ch.len_utf8()),
                _ => {}
            }
        }
        Self { line_starts }
    }

    fn position(&self, source: &str, offset: usize) -> SourcePosition {
        let offset = offset.min(source.len());
        let line = self.line_starts.partition_point(|&start| start <= offset);
        let line_start = self.line_starts[line.saturating_sub(1)];
        let column = source
            .get(line_start..offset)
            .map(|prefix| prefix.encode_utf16().count())
            .unwrap_or(0);
        SourcePosition {
            line: line as u32,
            column: column as u32,
        }
    }
}

struct Lowerer<'s> {
    source: &'s str,
    lines: LineIndex,
}

impl<'s> Lowerer<'s> {
    fn new(source: &'s str) -> Self {
        Self {
            source,
            lines: LineIndex::new(source),
        }
    }

    /// Run `visit` with a fresh collector and return the markup it found.
    fn collect(&self, visit: impl FnOnce(&mut MarkupCollector<'_, 's>)) -> Vec<Node> {
        let mut collector = MarkupCollector {
            lowerer: self,
            nodes: Vec::new(),
        };
        visit(&mut collector);
        collector.nodes
    }

    fn text(&self, span: Span) -> &'s str {
        self.source
            .get(span.start as usize..span.end as usize)
            .unwrap_or_default()
    }

    fn element(&self, element: &JSXElement<'_>) -> tree::Element {
        tree::Element::new(
            self.opening_element(&element.opening_element),
            self.children(&element.children),
        )
    }

    fn children(&self, children: &[JSXChild<'_>]) -> Vec<Node> {
        children.iter().map(|child| self.child(child)).collect()
    }

    fn child(&self, child: &JSXChild<'_>) -> Node {
        match child {
            JSXChild::Text(text) => Node::Text(text.value.to_string()),
            JSXChild::Element(element) => Node::Element(self.element(element)),
            JSXChild::Fragment(fragment) => Node::Fragment(self.children(&fragment.children)),
            // Expression containers and spread children.
            other => Node::Expression(self.collect(|collector| collector.visit_jsx_child(other))),
        }
    }

    fn opening_element(&self, opening: &JSXOpeningElement<'_>) -> OpeningElement {
        let attributes: Vec<AttributeItem> = opening
            .attributes
            .iter()
            .map(|item| self.attribute_item(item))
            .collect();
        let origin = self
            .insertion_point(opening.span)
            .map(|(insert_at, padded)| SourceOrigin {
                insert_at,
                attribute_count: attributes.len(),
                padded,
            });

        OpeningElement {
            tag: self.tag_name(&opening.name),
            position: Some(self.lines.position(self.source, opening.span.start as usize)),
            origin,
            attributes,
        }
    }

    /// Offset right before the tag's closing `/>` or `>`.
    fn insertion_point(&self, span: Span) -> Option<(usize, bool)> {
        let end = span.end as usize;
        let head = self.source.get(..end)?;
        let insert_at = if head.ends_with("/>") {
            end - 2
        } else if head.ends_with('>') {
            end - 1
        } else {
            return None;
        };
        let padded = head[..insert_at].ends_with(char::is_whitespace);
        Some((insert_at, padded))
    }

    fn tag_name(&self, name: &JSXElementName<'_>) -> TagName {
        match name {
            JSXElementName::Identifier(ident) => TagName::Identifier(ident.name.to_string()),
            JSXElementName::IdentifierReference(ident) => {
                TagName::Identifier(ident.name.to_string())
            }
            JSXElementName::NamespacedName(namespaced) => TagName::Namespaced {
                namespace: namespaced.namespace.name.to_string(),
                name: namespaced.name.name.to_string(),
            },
            // Member expressions and `this`.
            other => TagName::Member(self.text(other.span()).to_string()),
        }
    }

    fn attribute_item(&self, item: &JSXAttributeItem<'_>) -> AttributeItem {
        match item {
            JSXAttributeItem::Attribute(attr) => AttributeItem::Attribute(Attribute {
                name: match &attr.name {
                    JSXAttributeName::Identifier(ident) => {
                        AttributeName::Identifier(ident.name.to_string())
                    }
                    JSXAttributeName::NamespacedName(namespaced) => AttributeName::Namespaced {
                        namespace: namespaced.namespace.name.to_string(),
                        name: namespaced.name.name.to_string(),
                    },
                },
                value: attr.value.as_ref().map(|value| self.attribute_value(value)),
            }),
            JSXAttributeItem::SpreadAttribute(spread) => AttributeItem::Spread(
                self.collect(|collector| collector.visit_expression(&spread.argument)),
            ),
        }
    }

    fn attribute_value(&self, value: &JSXAttributeValue<'_>) -> AttributeValue {
        match value {
            JSXAttributeValue::StringLiteral(literal) => {
                AttributeValue::String(literal.value.to_string())
            }
            other => AttributeValue::Markup(
                self.collect(|collector| collector.visit_jsx_attribute_value(other)),
            ),
        }
    }
}

/// Walks arbitrary JS and lowers the outermost JSX it meets. Nested markup is
/// handled by the lowering itself, so the walk stops at each element/fragment.
struct MarkupCollector<'l, 's> {
    lowerer: &'l Lowerer<'s>,
    nodes: Vec<Node>,
}

impl<'a> Visit<'a> for MarkupCollector<'_, '_> {
    fn visit_jsx_element(&mut self, it: &JSXElement<'a>) {
        self.nodes.push(Node::Element(self.lowerer.element(it)));
    }

    fn visit_jsx_fragment(&mut self, it: &JSXFragment<'a>) {
        self.nodes
            .push(Node::Fragment(self.lowerer.children(&it.children)));
    }
}
