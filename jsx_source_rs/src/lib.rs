//! # jsx-source
//!
//! Stamps every JSX element with the place it was written, so devtools,
//! inspectors and error overlays can jump from a rendered node straight back
//! to the source:
//!
//! ```text
//! <Show when={open()}>            <Show when={open()} data-source="src/App.tsx:1:0">
//!   <div>Hello</div>        ->      <div data-source="src/App.tsx:2:2">Hello</div>
//! </Show>                         </Show>
//! ```
//!
//! ## Library Usage
//!
//! ```rust
//! use jsx_source::{PluginOptions, TransformOptions, transform_source};
//!
//! let options = TransformOptions::new("/project/src/App.tsx")
//!     .with_source_root("/project/")
//!     .register(Some(PluginOptions {
//!         ignore_tags: Some(vec!["Show".into()]),
//!         ..Default::default()
//!     }));
//!
//! let out = transform_source("<Show><b/></Show>", &options).unwrap();
//! assert_eq!(out.code, r#"<Show><b data-source="src/App.tsx:1:6"/></Show>"#);
//! ```
//!
//! Hosts that already have a tree call [`annotate`] directly with their own
//! [`tree::Program`] and a [`FileContext`] per file.
//!
//! ## CLI Usage
//!
//! ```bash
//! jsx-source src/App.tsx                 # print annotated source
//! jsx-source -w --root "$PWD/" src/*.tsx # rewrite in place
//! jsx-source --json -i Fragment App.tsx  # JSON report
//! ```

// ============================================================================
// Core Modules
// ============================================================================

/// The annotation pass: [`annotate`](annotate::annotate) and its outcome types.
pub mod annotate;

/// Per-file context carrying the one-shot [`PassGuard`](context::PassGuard).
pub mod context;

/// Display names and `file:line:column` strings.
pub mod location;

/// Plugin options and defaults.
pub mod options;

/// Markup tree model.
pub mod tree;

/// Mutable depth-first traversal over [`tree`].
pub mod visit;

// ============================================================================
// Source handling
// ============================================================================

/// OXC-backed parser lowering JS/TS source into a [`tree::Program`].
pub mod parse;

/// Splices appended attributes back into source text.
pub mod emit;

/// Parse + annotate + emit for one file.
pub mod transform;

// ============================================================================
// Tooling
// ============================================================================

/// Command-line interface.
pub mod cli;

/// `jsx-source.toml` loading.
pub mod config;

/// Error type for everything outside the annotation pass.
pub mod error;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use annotate::{Annotation, AnnotationStats, PassOutcome, annotate};
pub use context::{FileContext, PassGuard};
pub use error::{Error, Result};
pub use location::resolve_display_name;
pub use options::{DEFAULT_ATTRIBUTE_NAME, PluginOptions, ResolvedOptions, resolve};
pub use parse::parse_markup;
pub use transform::{TransformOptions, TransformOutput, transform_source};
