//! Inliner CLI - flatten a C++ source file into a single translation unit

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::Cli;
use inliner::ops::flatten::{flatten, FlattenOptions};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("inliner=debug")
    } else {
        EnvFilter::new("inliner=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    let opts = FlattenOptions {
        output: cli.output,
        source_root: cli.source_root,
        keep_comments: cli.keep_comments,
        keep_blank_lines: cli.keep_blank_lines,
        guard_marker: Some(cli.guard_marker),
    };

    let result = flatten(&cli.input, &opts)?;

    eprintln!(
        "    Finished `{}` -> {} ({} files, {} lines)",
        cli.input.display(),
        result.output.display(),
        result.files,
        result.lines
    );

    Ok(())
}
