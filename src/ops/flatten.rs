//! The flatten operation: expand an entry file and write the result.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::expand::{ExpandOptions, Expander};
use crate::util;

/// Default output file name, resolved in the current working directory.
pub const DEFAULT_OUTPUT: &str = "output.cpp";

/// Options for a flatten run.
#[derive(Debug, Clone, Default)]
pub struct FlattenOptions {
    /// Destination file; defaults to `output.cpp` in the working directory.
    pub output: Option<PathBuf>,
    /// Directory local includes resolve against; defaults to the `../src`
    /// sibling of the running executable.
    pub source_root: Option<PathBuf>,
    /// Keep comments instead of stripping them.
    pub keep_comments: bool,
    /// Keep blank lines instead of dropping them.
    pub keep_blank_lines: bool,
    /// Include-guard marker token; `None` keeps the default.
    pub guard_marker: Option<String>,
}

/// Summary of a completed flatten run.
#[derive(Debug)]
pub struct FlattenResult {
    /// Where the flattened document was written.
    pub output: PathBuf,
    /// Number of files read: the entry plus each expanded include.
    pub files: usize,
    /// Number of lines written.
    pub lines: usize,
}

/// Flatten `entry` into a single translation unit on disk.
pub fn flatten(entry: &Path, opts: &FlattenOptions) -> Result<FlattenResult> {
    let source_root = match &opts.source_root {
        Some(root) => root.clone(),
        None => default_source_root()?,
    };
    let output = opts
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));

    let mut expand_opts = ExpandOptions {
        strip_comments: !opts.keep_comments,
        keep_blank_lines: opts.keep_blank_lines,
        ..ExpandOptions::default()
    };
    if let Some(marker) = &opts.guard_marker {
        expand_opts.guard_marker = marker.clone();
    }

    tracing::debug!(
        "flattening {} against {}",
        entry.display(),
        source_root.display()
    );

    let expansion = Expander::new(source_root, expand_opts).expand(entry)?;
    let files = expansion.files;
    let lines = expansion.lines.len();
    util::fs::write_string(&output, &expansion.into_document())?;

    Ok(FlattenResult {
        output,
        files,
        lines,
    })
}

/// The fixed source root: a `src` directory sitting next to the
/// directory the executable runs from.
pub fn default_source_root() -> Result<PathBuf> {
    let exe = env::current_exe().context("failed to locate the running executable")?;
    let dir = exe
        .parent()
        .context("executable path has no parent directory")?;
    Ok(dir.join("..").join("src"))
}
