//! CLI entry point: load config, transform every file, print or write.

use std::fs;
use std::io::Write;
use std::path::Path;

use console::style;
use serde::Serialize;
use tracing::info;

use crate::annotate::PassOutcome;
use crate::cli::Args;
use crate::config::JsxSourceConfig;
use crate::error::Error;
use crate::options::PluginOptions;
use crate::transform::{TransformOptions, TransformOutput, transform_source};

/// Per-file entry of the `--json` report.
#[derive(Debug, Serialize)]
struct FileReport {
    file: String,
    #[serde(flatten)]
    outcome: PassOutcome,
}

/// Run the CLI with parsed arguments. This is the shared main() body.
pub fn run(args: &Args) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => JsxSourceConfig::try_load_from_path(path)?,
        None => JsxSourceConfig::load(Path::new(".")),
    };

    let options = config.options.merged_with(&args.plugin_options());
    options.validate()?;
    let root = args.root.clone().or(config.root);

    let mut reports = Vec::new();
    let mut written = 0usize;
    let mut annotated = 0usize;
    let stdout = std::io::stdout();

    for path in &args.files {
        let output = transform_path(path, root.as_deref(), &options)?;
        annotated += output.annotated_count();

        if args.json {
            reports.push(FileReport {
                file: path.display().to_string(),
                outcome: output
                    .passes
                    .into_iter()
                    .next()
                    .unwrap_or(PassOutcome::Disabled),
            });
        } else if args.write {
            if output.annotated_count() > 0 {
                fs::write(path, &output.code).map_err(|e| Error::io(path, e))?;
                written += 1;
                info!(file = %path.display(), "rewritten");
            }
        } else {
            let mut out = stdout.lock();
            out.write_all(output.code.as_bytes())?;
            out.flush()?;
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else if args.write {
        eprintln!(
            "{} {} element(s) annotated in {} file(s)",
            style("✓").green().bold(),
            annotated,
            written
        );
    }
    Ok(())
}

fn transform_path(
    path: &Path,
    root: Option<&str>,
    options: &PluginOptions,
) -> anyhow::Result<TransformOutput> {
    let source = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let mut transform = TransformOptions::new(path.to_string_lossy()).register(Some(options.clone()));
    transform.source_root = root.map(str::to_string);
    Ok(transform_source(&source, &transform)?)
}
