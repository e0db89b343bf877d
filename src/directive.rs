//! Recognition of local include directives and include-guard lines.
//!
//! Recognition is a textual pattern match, not C++ parsing. The include
//! pattern only accepts quoted names made of lowercase letters and
//! underscores (optionally `src/`-prefixed, optionally ending in `.hpp`),
//! so system includes like `#include <vector>` never match and survive
//! into the flattened output verbatim.

use regex::Regex;

/// Default include-guard marker token.
///
/// The guard pattern is project-specific: the library this tool was built
/// for writes `#ifndef GEOMETRY_POINT_HPP_` style guards, so any line
/// carrying the marker is boilerplate to elide.
pub const DEFAULT_GUARD_MARKER: &str = "GEOMETRY_";

/// A reference extracted from a local include directive.
///
/// The name is normalized: a leading `src/` prefix is stripped, so the
/// same header reached via different spellings collapses to one key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IncludeRef {
    name: String,
}

impl IncludeRef {
    /// The normalized relative file name, e.g. `point.hpp`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Consume the reference, yielding the normalized name.
    pub fn into_name(self) -> String {
        self.name
    }
}

/// Compiled matcher for local include lines.
pub struct IncludePattern {
    regex: Regex,
}

impl IncludePattern {
    /// Compile the include pattern.
    pub fn new() -> Self {
        // One whitespace character between `#include` and the opening
        // quote, matching the narrow style of the target codebase.
        let regex = Regex::new(r#"#include\s"((?:src/)?[a-z_]+(?:\.hpp)?)""#).unwrap();
        IncludePattern { regex }
    }

    /// Extract the referenced file from `line`, if it is a local include.
    pub fn extract(&self, line: &str) -> Option<IncludeRef> {
        let captures = self.regex.captures(line)?;
        let raw = captures.get(1).map_or("", |m| m.as_str());
        let name = raw.strip_prefix("src/").unwrap_or(raw);
        Some(IncludeRef {
            name: name.to_string(),
        })
    }
}

impl Default for IncludePattern {
    fn default() -> Self {
        IncludePattern::new()
    }
}

/// Matcher for include-guard boilerplate lines.
///
/// A line is a guard line when it contains the marker token anywhere,
/// which covers the `#ifndef`/`#define` pair and a trailing
/// `#endif  // MARKER_..._` alike.
#[derive(Debug, Clone)]
pub struct GuardMarker {
    token: String,
}

impl GuardMarker {
    /// Create a matcher for the given marker token.
    pub fn new(token: impl Into<String>) -> Self {
        GuardMarker {
            token: token.into(),
        }
    }

    /// Check whether `line` is include-guard boilerplate.
    pub fn matches(&self, line: &str) -> bool {
        !self.token.is_empty() && line.contains(&self.token)
    }
}

impl Default for GuardMarker {
    fn default() -> Self {
        GuardMarker::new(DEFAULT_GUARD_MARKER)
    }
}

/// Check whether a line is exactly a lone line terminator.
///
/// Whitespace-only lines are not blank.
pub fn is_blank(line: &str) -> bool {
    line == "\n" || line == "\r\n"
}
