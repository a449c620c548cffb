use std::any::Any;
use std::panic;

use clap::Parser;
use jsx_source::cli::{Args, entrypoint};

/// Whether a panic came from writing to a closed stdout (`jsx-source ... | head`).
fn is_broken_pipe(payload: &(dyn Any + Send)) -> bool {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .is_some_and(|message| message.contains("Broken pipe"))
}

fn exit_quietly_on_broken_pipe() {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        if is_broken_pipe(info.payload()) {
            std::process::exit(0);
        }
        previous(info);
    }));
}

fn main() -> anyhow::Result<()> {
    exit_quietly_on_broken_pipe();
    let args = Args::parse();

    // Logs go to stderr, stdout carries the annotated code or JSON report.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| args.log_level.parse().unwrap_or_default()),
        )
        .init();

    entrypoint::run(&args)
}
