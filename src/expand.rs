//! Depth-first include expansion.
//!
//! The expander walks an entry file line by line, replacing each
//! recognized local include in place with the recursively expanded
//! content of the referenced file. Every include name is expanded at
//! most once per run: the visited set both deduplicates diamond
//! includes and terminates cycles, because a name is recorded before
//! its file is descended into.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::comment::CommentStripper;
use crate::directive::{is_blank, GuardMarker, IncludePattern, DEFAULT_GUARD_MARKER};

/// Error during include expansion.
#[derive(Debug, Error)]
pub enum ExpandError {
    #[error("failed to read entry file: {path}")]
    EntryUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read included file `{name}` at {path} (included from {referenced_from})")]
    IncludeUnreadable {
        name: String,
        path: PathBuf,
        referenced_from: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Options controlling one expansion run.
#[derive(Debug, Clone)]
pub struct ExpandOptions {
    /// Strip comments from content lines.
    pub strip_comments: bool,
    /// Keep blank lines instead of dropping them.
    pub keep_blank_lines: bool,
    /// Include-guard marker token; lines containing it are dropped.
    pub guard_marker: String,
}

impl Default for ExpandOptions {
    fn default() -> Self {
        ExpandOptions {
            strip_comments: true,
            keep_blank_lines: false,
            guard_marker: DEFAULT_GUARD_MARKER.to_string(),
        }
    }
}

/// The flattened result of one expansion run.
#[derive(Debug)]
pub struct Expansion {
    /// Output lines in visitation order, terminators intact.
    pub lines: Vec<String>,
    /// Number of files read: the entry plus each expanded include.
    pub files: usize,
}

impl Expansion {
    /// Concatenate the lines into the final document.
    pub fn into_document(self) -> String {
        self.lines.concat()
    }
}

/// Per-invocation traversal state.
///
/// Keys are normalized include names, inserted before recursing so that
/// a file reached again while its own expansion is still in progress is
/// skipped rather than recursed into.
struct Traversal {
    visited: HashSet<String>,
    files: usize,
}

/// Depth-first include expander rooted at a single source directory.
///
/// Includes resolve one level against `source_root` regardless of how
/// deeply the including file is nested; the including file's own
/// directory never participates in resolution.
pub struct Expander {
    source_root: PathBuf,
    options: ExpandOptions,
    include: IncludePattern,
    guard: GuardMarker,
    stripper: CommentStripper,
}

impl Expander {
    /// Create an expander resolving includes against `source_root`.
    pub fn new(source_root: impl Into<PathBuf>, options: ExpandOptions) -> Self {
        let guard = GuardMarker::new(options.guard_marker.clone());
        Expander {
            source_root: source_root.into(),
            options,
            include: IncludePattern::new(),
            guard,
            stripper: CommentStripper::new(),
        }
    }

    /// Expand `entry` into an ordered flat sequence of lines.
    pub fn expand(&self, entry: &Path) -> Result<Expansion, ExpandError> {
        let content = fs::read_to_string(entry).map_err(|source| ExpandError::EntryUnreadable {
            path: entry.to_path_buf(),
            source,
        })?;

        let mut state = Traversal {
            visited: HashSet::new(),
            files: 1,
        };
        let mut lines = Vec::new();
        self.expand_lines(&content, entry, &mut state, &mut lines)?;

        Ok(Expansion {
            lines,
            files: state.files,
        })
    }

    /// Process one file's content, appending output lines in order.
    fn expand_lines(
        &self,
        content: &str,
        origin: &Path,
        state: &mut Traversal,
        out: &mut Vec<String>,
    ) -> Result<(), ExpandError> {
        for line in content.split_inclusive('\n') {
            if !self.options.keep_blank_lines && is_blank(line) {
                continue;
            }
            if self.guard.matches(line) {
                continue;
            }

            if let Some(include) = self.include.extract(line) {
                if !state.visited.insert(include.name().to_string()) {
                    tracing::debug!("skipping `{}` (already expanded)", include.name());
                    continue;
                }

                let path = self.source_root.join(include.name());
                let nested =
                    fs::read_to_string(&path).map_err(|source| ExpandError::IncludeUnreadable {
                        name: include.name().to_string(),
                        path: path.clone(),
                        referenced_from: origin.to_path_buf(),
                        source,
                    })?;

                tracing::debug!("expanding `{}` into {}", include.name(), path.display());
                state.files += 1;
                self.expand_lines(&nested, &path, state, out)?;
                continue;
            }

            if self.options.strip_comments {
                if let Some(kept) = self.stripper.strip(line) {
                    out.push(kept);
                }
            } else {
                out.push(line.to_string());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn write_header(root: &Path, name: &str, content: &str) {
        fs::write(root.join(name), content).unwrap();
    }

    fn expander(root: &Path) -> Expander {
        Expander::new(root, ExpandOptions::default())
    }

    #[test]
    fn test_file_without_includes_is_unchanged() {
        let tmp = TempDir::new().unwrap();
        let entry = tmp.path().join("main.cpp");
        fs::write(&entry, "int main() {\nreturn 0;\n}\n").unwrap();

        let result = expander(tmp.path()).expand(&entry).unwrap();
        assert_eq!(result.lines, vec!["int main() {\n", "return 0;\n", "}\n"]);
        assert_eq!(result.files, 1);
    }

    #[test]
    fn test_include_expands_in_place() {
        let tmp = TempDir::new().unwrap();
        write_header(tmp.path(), "point.hpp", "struct Point {};\n");
        let entry = tmp.path().join("main.cpp");
        fs::write(&entry, "#include \"point.hpp\"\nstruct S {};\n").unwrap();

        let result = expander(tmp.path()).expand(&entry).unwrap();
        assert_eq!(result.lines, vec!["struct Point {};\n", "struct S {};\n"]);
        assert_eq!(result.files, 2);
    }

    #[test]
    fn test_order_is_preserved_around_expansion() {
        let tmp = TempDir::new().unwrap();
        write_header(tmp.path(), "x.hpp", "M1();\nM2();\n");
        let entry = tmp.path().join("main.cpp");
        fs::write(&entry, "L1();\n#include \"x.hpp\"\nL2();\n").unwrap();

        let result = expander(tmp.path()).expand(&entry).unwrap();
        assert_eq!(
            result.lines,
            vec!["L1();\n", "M1();\n", "M2();\n", "L2();\n"]
        );
    }

    #[test]
    fn test_diamond_include_expands_once() {
        let tmp = TempDir::new().unwrap();
        write_header(tmp.path(), "d.hpp", "struct D {};\n");
        write_header(tmp.path(), "b.hpp", "#include \"d.hpp\"\nstruct B {};\n");
        write_header(tmp.path(), "c.hpp", "#include \"d.hpp\"\nstruct C {};\n");
        let entry = tmp.path().join("a.cpp");
        fs::write(&entry, "#include \"b.hpp\"\n#include \"c.hpp\"\n").unwrap();

        let result = expander(tmp.path()).expand(&entry).unwrap();
        assert_eq!(
            result.lines,
            vec!["struct D {};\n", "struct B {};\n", "struct C {};\n"]
        );
        // D appears once, at its first depth-first encounter.
        assert_eq!(result.files, 4);
    }

    #[test]
    fn test_include_cycle_terminates() {
        let tmp = TempDir::new().unwrap();
        write_header(tmp.path(), "a.hpp", "#include \"b.hpp\"\nstruct A {};\n");
        write_header(tmp.path(), "b.hpp", "#include \"a.hpp\"\nstruct B {};\n");
        let entry = tmp.path().join("main.cpp");
        fs::write(&entry, "#include \"a.hpp\"\n").unwrap();

        let result = expander(tmp.path()).expand(&entry).unwrap();
        // a.hpp is mid-expansion when b.hpp references it back, so the
        // repeat visit is elided and the walk terminates.
        assert_eq!(result.lines, vec!["struct B {};\n", "struct A {};\n"]);
    }

    #[test]
    fn test_src_prefix_shares_visited_key() {
        let tmp = TempDir::new().unwrap();
        write_header(tmp.path(), "foo.hpp", "struct Foo {};\n");
        let entry = tmp.path().join("main.cpp");
        fs::write(
            &entry,
            "#include \"src/foo.hpp\"\n#include \"foo.hpp\"\n",
        )
        .unwrap();

        let result = expander(tmp.path()).expand(&entry).unwrap();
        assert_eq!(result.lines, vec!["struct Foo {};\n"]);
        assert_eq!(result.files, 2);
    }

    #[test]
    fn test_guard_lines_are_elided() {
        let tmp = TempDir::new().unwrap();
        write_header(
            tmp.path(),
            "point.hpp",
            "#ifndef GEOMETRY_POINT_HPP_\n#define GEOMETRY_POINT_HPP_\nstruct Point {};\n#endif  // GEOMETRY_POINT_HPP_\n",
        );
        let entry = tmp.path().join("main.cpp");
        fs::write(&entry, "#include \"point.hpp\"\n").unwrap();

        for strip_comments in [true, false] {
            let options = ExpandOptions {
                strip_comments,
                ..ExpandOptions::default()
            };
            let result = Expander::new(tmp.path(), options).expand(&entry).unwrap();
            assert_eq!(result.lines, vec!["struct Point {};\n"]);
        }
    }

    #[test]
    fn test_system_includes_pass_through() {
        let tmp = TempDir::new().unwrap();
        let entry = tmp.path().join("main.cpp");
        fs::write(&entry, "#include <vector>\nint main() {}\n").unwrap();

        let result = expander(tmp.path()).expand(&entry).unwrap();
        assert_eq!(result.lines, vec!["#include <vector>\n", "int main() {}\n"]);
    }

    #[test]
    fn test_blank_lines_dropped_by_default() {
        let tmp = TempDir::new().unwrap();
        let entry = tmp.path().join("main.cpp");
        fs::write(&entry, "int a;\n\nint b;\n").unwrap();

        let result = expander(tmp.path()).expand(&entry).unwrap();
        assert_eq!(result.lines, vec!["int a;\n", "int b;\n"]);
    }

    #[test]
    fn test_blank_lines_kept_on_request() {
        let tmp = TempDir::new().unwrap();
        let entry = tmp.path().join("main.cpp");
        fs::write(&entry, "int a;\n\nint b;\n").unwrap();

        let options = ExpandOptions {
            keep_blank_lines: true,
            ..ExpandOptions::default()
        };
        let result = Expander::new(tmp.path(), options).expand(&entry).unwrap();
        assert_eq!(result.lines, vec!["int a;\n", "\n", "int b;\n"]);
    }

    #[test]
    fn test_comments_stripped_in_expanded_content() {
        let tmp = TempDir::new().unwrap();
        write_header(tmp.path(), "point.hpp", "// a comment\nstruct Point {};\n");
        let entry = tmp.path().join("main.cpp");
        fs::write(&entry, "#include \"point.hpp\"\nstruct S {};\n").unwrap();

        let result = expander(tmp.path()).expand(&entry).unwrap();
        assert_eq!(result.into_document(), "struct Point {};\nstruct S {};\n");
    }

    #[test]
    fn test_comments_kept_on_request() {
        let tmp = TempDir::new().unwrap();
        let entry = tmp.path().join("main.cpp");
        fs::write(&entry, "// keep me\nint x;  // and my tail\n").unwrap();

        let options = ExpandOptions {
            strip_comments: false,
            ..ExpandOptions::default()
        };
        let result = Expander::new(tmp.path(), options).expand(&entry).unwrap();
        assert_eq!(
            result.lines,
            vec!["// keep me\n", "int x;  // and my tail\n"]
        );
    }

    #[test]
    fn test_missing_entry_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let err = expander(tmp.path())
            .expand(&tmp.path().join("nope.cpp"))
            .unwrap_err();
        assert!(matches!(err, ExpandError::EntryUnreadable { .. }));
    }

    #[test]
    fn test_missing_include_names_the_referrer() {
        let tmp = TempDir::new().unwrap();
        let entry = tmp.path().join("main.cpp");
        fs::write(&entry, "#include \"ghost.hpp\"\n").unwrap();

        let err = expander(tmp.path()).expand(&entry).unwrap_err();
        match err {
            ExpandError::IncludeUnreadable {
                name,
                referenced_from,
                ..
            } => {
                assert_eq!(name, "ghost.hpp");
                assert_eq!(referenced_from, entry);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
