//! commentmark CLI - render a markdown document as a source-code comment block.
//!
//! Reads the document from a file (or standard input), formats it with the
//! comment-block backend and prints the result to standard output.

mod error;
mod input;
mod output;
mod render;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use error::CliError;
use output::Output;
use render::RenderArgs;

/// commentmark - markdown to comment block converter.
#[derive(Parser)]
#[command(name = "commentmark", version, about)]
struct Cli {
    #[command(flatten)]
    render: RenderArgs,
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN.
    // Logs go to stderr; stdout carries only the rendered document.
    let filter = if cli.render.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = cli.render.execute(&output) {
        if let CliError::Read(source) = &err {
            tracing::debug!(error = %source, "Failed to read input");
            output.error("I/O errors found while reading input.");
        } else {
            output.error(&format!("Error: {err}"));
        }
        std::process::exit(err.exit_code());
    }
}
