//! Parse, annotate, emit: the whole pipeline for one file.
//!
//! # Example
//!
//! ```rust
//! use jsx_source::{PluginOptions, TransformOptions, transform_source};
//!
//! let options = TransformOptions::new("src/App.tsx").register(Some(PluginOptions::default()));
//! let out = transform_source("<div>Hello</div>", &options).unwrap();
//! assert_eq!(out.code, r#"<div data-source="src/App.tsx:1:0">Hello</div>"#);
//! ```

use std::path::Path;

use serde::Serialize;

use crate::annotate::{PassOutcome, annotate};
use crate::context::FileContext;
use crate::emit::emit_source;
use crate::error::Result;
use crate::location::UNKNOWN_FILENAME;
use crate::options::PluginOptions;
use crate::parse::parse_markup;

/// How a file is processed.
#[derive(Debug, Clone, Default)]
pub struct TransformOptions {
    /// Name of the file; also picks the parser dialect.
    pub filename: Option<String>,
    /// Prefix removed from `filename` in generated locations.
    pub source_root: Option<String>,
    /// One entry per registration of the annotation pass, in pipeline order.
    /// `None` registers the pass without options.
    pub plugins: Vec<Option<PluginOptions>>,
}

impl TransformOptions {
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: Some(filename.into()),
            ..Default::default()
        }
    }

    pub fn with_source_root(mut self, root: impl Into<String>) -> Self {
        self.source_root = Some(root.into());
        self
    }

    pub fn register(mut self, options: Option<PluginOptions>) -> Self {
        self.plugins.push(options);
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TransformOutput {
    pub code: String,
    /// Outcome of each registration, same order as `TransformOptions::plugins`.
    pub passes: Vec<PassOutcome>,
}

impl TransformOutput {
    /// Number of attributes injected across all passes.
    pub fn annotated_count(&self) -> usize {
        self.passes
            .iter()
            .filter_map(PassOutcome::stats)
            .map(|stats| stats.annotated.len())
            .sum()
    }
}

/// Run every registered pass over `source` against a single file context.
pub fn transform_source(source: &str, options: &TransformOptions) -> Result<TransformOutput> {
    let dialect_path = Path::new(options.filename.as_deref().unwrap_or(UNKNOWN_FILENAME));
    let mut program = parse_markup(source, dialect_path)?;
    let mut file = FileContext::new(
        options.filename.as_deref(),
        options.source_root.as_deref(),
    );

    let passes = options
        .plugins
        .iter()
        .map(|plugin| annotate(&mut program, &mut file, plugin.as_ref()))
        .collect();

    Ok(TransformOutput {
        code: emit_source(source, &program),
        passes,
    })
}
