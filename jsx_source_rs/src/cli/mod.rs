//! Command-line interface for the `jsx-source` binary.
//!
//! ```text
//! jsx-source src/App.tsx                     # print annotated source
//! jsx-source -w src/**/*.tsx --root "$PWD/"  # rewrite files in place
//! jsx-source --json -i Show -i For App.tsx   # report what would be stamped
//! ```
//!
//! Flags override values from `jsx-source.toml`.

pub mod entrypoint;

use std::path::PathBuf;

use clap::Parser;

use crate::options::PluginOptions;

#[derive(Parser, Debug)]
#[command(name = "jsx-source")]
#[command(about = "Stamp JSX elements with the file, line and column they were written at")]
#[command(version)]
pub struct Args {
    /// Files to annotate
    #[arg(required = true, value_name = "FILES")]
    pub files: Vec<PathBuf>,

    /// Attribute to inject (default: data-source)
    #[arg(short, long, value_name = "NAME")]
    pub attribute: Option<String>,

    /// Tag never annotated; repeat for more
    #[arg(short = 'i', long = "ignore-tag", value_name = "TAG")]
    pub ignore_tags: Vec<String>,

    /// Prefix removed from file paths in generated locations
    #[arg(long, value_name = "PREFIX")]
    pub root: Option<String>,

    /// Config file (default: ./jsx-source.toml when present)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Skip annotation, emit files unchanged
    #[arg(long)]
    pub disabled: bool,

    /// Rewrite files in place instead of printing them
    #[arg(short, long, conflicts_with = "json")]
    pub write: bool,

    /// Print a JSON report of injected attributes instead of code
    #[arg(long)]
    pub json: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Args {
    /// Options given on the command line; unset flags stay `None`.
    pub fn plugin_options(&self) -> PluginOptions {
        PluginOptions {
            ignore_tags: (!self.ignore_tags.is_empty()).then(|| self.ignore_tags.clone()),
            attribute: self.attribute.clone(),
            disabled: self.disabled.then_some(true),
        }
    }
}
