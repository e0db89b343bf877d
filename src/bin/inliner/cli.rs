//! CLI definitions using clap.

use std::path::PathBuf;

use clap::Parser;

use inliner::directive::DEFAULT_GUARD_MARKER;

/// Inliner - flatten local includes of a C++ source tree into one file
///
/// Comments and blank lines are stripped by default; use
/// `--keep-comments` and `--keep-blank-lines` to preserve them.
#[derive(Parser)]
#[command(name = "inliner")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Entry source file to flatten
    pub input: PathBuf,

    /// Destination file (defaults to output.cpp in the current directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Keep comments instead of stripping them
    #[arg(long)]
    pub keep_comments: bool,

    /// Keep blank lines instead of dropping them
    #[arg(long)]
    pub keep_blank_lines: bool,

    /// Directory local includes resolve against
    /// (defaults to the ../src sibling of the executable)
    #[arg(long)]
    pub source_root: Option<PathBuf>,

    /// Include-guard marker; lines containing it are dropped
    #[arg(long, default_value = DEFAULT_GUARD_MARKER)]
    pub guard_marker: String,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
