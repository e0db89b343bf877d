//! Line-local comment stripping.
//!
//! The stripper is a pure, stateless, per-line filter: it never tracks
//! whether a previous line opened a block comment. Lines carrying `/*`
//! or `*/` are dropped whole, and interior lines of a multi-line block
//! comment are only caught when they start with the conventional `* `
//! continuation marker. Interior lines without the marker survive as
//! ordinary code; that is an accepted limit of the heuristic, not a
//! behavior to fix here.

use regex::Regex;

/// Heuristic comment filter for C++-like source lines.
pub struct CommentStripper {
    /// Line that is entirely a `//` comment, leading whitespace allowed.
    line_comment: Regex,
    /// Continuation line inside a conventionally formatted block comment.
    continuation: Regex,
    /// First trailing `//` comment and the whitespace before it.
    trailing: Regex,
}

impl CommentStripper {
    /// Compile the comment patterns.
    pub fn new() -> Self {
        CommentStripper {
            line_comment: Regex::new(r"^\s*//").unwrap(),
            continuation: Regex::new(r"^\s*\* ").unwrap(),
            trailing: Regex::new(r"\s*//").unwrap(),
        }
    }

    /// Strip `line`, returning `None` when the whole line should be
    /// dropped and `Some` with any trailing comment removed otherwise.
    ///
    /// The trailing line terminator is preserved on kept lines.
    pub fn strip(&self, line: &str) -> Option<String> {
        let (body, terminator) = split_terminator(line);

        if body.contains("/*") || body.contains("*/") {
            return None;
        }
        if self.line_comment.is_match(body) || self.continuation.is_match(body) {
            return None;
        }

        match self.trailing.find(body) {
            Some(found) => {
                let kept = &body[..found.start()];
                if kept.is_empty() {
                    None
                } else {
                    Some(format!("{}{}", kept, terminator))
                }
            }
            None => Some(line.to_string()),
        }
    }
}

impl Default for CommentStripper {
    fn default() -> Self {
        CommentStripper::new()
    }
}

/// Split a line into its content and its trailing terminator.
fn split_terminator(line: &str) -> (&str, &str) {
    if let Some(body) = line.strip_suffix("\r\n") {
        (body, "\r\n")
    } else if let Some(body) = line.strip_suffix('\n') {
        (body, "\n")
    } else {
        (line, "")
    }
}
