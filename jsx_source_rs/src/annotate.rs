//! The annotation pass.
//!
//! Stamps every opening element of a markup tree with an attribute holding
//! the element's source location, e.g.
//!
//! ```text
//! <div>Hello</div>   ->   <div data-source="src/App.tsx:1:0">Hello</div>
//! ```
//!
//! The pass runs at most once per [`FileContext`], leaves elements that
//! already carry the attribute alone, and skips excluded tags and elements
//! without a source position.

use serde::Serialize;
use tracing::{debug, trace};

use crate::context::FileContext;
use crate::location::Location;
use crate::options::{PluginOptions, ResolvedOptions, resolve};
use crate::tree::{Attribute, AttributeItem, OpeningElement, Program};
use crate::visit::{VisitMut, walk_opening_element};

/// What a single call to [`annotate`] did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PassOutcome {
    /// `disabled` was set; nothing touched, guard left as it was.
    Disabled,
    /// Another registration already traversed this file.
    AlreadyVisited,
    Completed(AnnotationStats),
}

impl PassOutcome {
    pub fn stats(&self) -> Option<&AnnotationStats> {
        match self {
            Self::Completed(stats) => Some(stats),
            _ => None,
        }
    }
}

/// One injected attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Annotation {
    pub tag: String,
    pub location: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnnotationStats {
    pub annotated: Vec<Annotation>,
    pub skipped_unpositioned: usize,
    pub skipped_excluded: usize,
    pub skipped_existing: usize,
}

/// Run the annotation pass over `program`.
///
/// `options` may be absent; defaults apply. The tree is mutated in place:
/// eligible opening elements get one attribute appended at the end of their
/// attribute list.
pub fn annotate(
    program: &mut Program,
    file: &mut FileContext,
    options: Option<&PluginOptions>,
) -> PassOutcome {
    let options = resolve(options);
    if options.disabled {
        debug!(file = ?file.filename(), "source annotation disabled");
        return PassOutcome::Disabled;
    }

    if file.guard().is_set() {
        debug!(file = ?file.filename(), "file already annotated, skipping pass");
        return PassOutcome::AlreadyVisited;
    }
    file.guard_mut().set();

    let display_name = file.display_name();
    let mut annotator = Annotator {
        options: &options,
        display_name: &display_name,
        stats: AnnotationStats::default(),
    };
    annotator.visit_program(program);

    debug!(
        file = %display_name,
        annotated = annotator.stats.annotated.len(),
        excluded = annotator.stats.skipped_excluded,
        existing = annotator.stats.skipped_existing,
        "annotation pass finished"
    );
    PassOutcome::Completed(annotator.stats)
}

struct Annotator<'o> {
    options: &'o ResolvedOptions,
    display_name: &'o str,
    stats: AnnotationStats,
}

impl Annotator<'_> {
    fn annotate_opening(&mut self, opening: &mut OpeningElement) {
        let Some(position) = opening.position else {
            self.stats.skipped_unpositioned += 1;
            return;
        };

        if let Some(tag) = opening.tag.identifier() {
            if self.options.is_excluded(tag) {
                trace!(tag, "tag excluded");
                self.stats.skipped_excluded += 1;
                return;
            }
        }

        let location = Location {
            display_name: self.display_name,
            line: position.line,
            column: position.column,
        }
        .to_string();

        if opening.has_attribute(&self.options.attribute_name) {
            trace!(tag = %opening.tag, %location, "attribute already present");
            self.stats.skipped_existing += 1;
            return;
        }

        trace!(tag = %opening.tag, %location, "annotating");
        opening.attributes.push(AttributeItem::Attribute(Attribute::string(
            self.options.attribute_name.clone(),
            location.clone(),
        )));
        self.stats.annotated.push(Annotation {
            tag: opening.tag.to_string(),
            location,
        });
    }
}

impl VisitMut for Annotator<'_> {
    fn visit_opening_element(&mut self, opening: &mut OpeningElement) {
        self.annotate_opening(opening);
        walk_opening_element(self, opening);
    }
}
