//! Directory listing for the documentation tree.
//!
//! The scanner is the single-level primitive: it classifies one directory's
//! entries into markdown files and subdirectories. The recursive walk lives
//! in [`crate::sidebar`], which drives the scanner level by level.

use std::fs;
use std::path::Path;

use crate::name::has_markdown_extension;

/// One directory level, classified and sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirListing {
    /// Markdown file names, sorted lexicographically.
    pub files: Vec<String>,
    /// Subdirectory names, sorted lexicographically.
    pub subdirs: Vec<String>,
}

/// List one directory level.
///
/// Entries whose name starts with `.` or `_` are excluded. Regular files
/// are kept only with a markdown extension (case-insensitive); anything
/// else is ignored. Both lists are sorted lexicographically by name, so
/// sibling ordering never depends on filesystem enumeration order.
///
/// An unreadable directory degrades to an empty listing with a warning;
/// a partially broken subtree must not abort rendering of the rest of
/// the sidebar.
#[must_use]
pub fn scan(dir: &Path) -> DirListing {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            tracing::warn!(dir = %dir.display(), error = %err, "Failed to read directory");
            return DirListing::default();
        }
    };

    let mut listing = DirListing::default();
    for entry in entries.filter_map(Result::ok) {
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') || name.starts_with('_') {
            continue;
        }

        let Ok(file_type) = entry.file_type() else {
            continue;
        };
        if file_type.is_dir() {
            listing.subdirs.push(name);
        } else if file_type.is_file() && has_markdown_extension(&name) {
            listing.files.push(name);
        }
    }

    listing.files.sort();
    listing.subdirs.sort();
    listing
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn create_test_dir() -> tempfile::TempDir {
        tempfile::tempdir().unwrap()
    }

    #[test]
    fn test_scan_classifies_and_sorts() {
        let temp_dir = create_test_dir();
        fs::write(temp_dir.path().join("b.md"), "# B").unwrap();
        fs::write(temp_dir.path().join("a.md"), "# A").unwrap();
        fs::create_dir(temp_dir.path().join("z")).unwrap();
        fs::create_dir(temp_dir.path().join("x")).unwrap();

        let listing = scan(temp_dir.path());

        assert_eq!(listing.files, vec!["a.md", "b.md"]);
        assert_eq!(listing.subdirs, vec!["x", "z"]);
    }

    #[test]
    fn test_scan_skips_hidden_and_underscore_entries() {
        let temp_dir = create_test_dir();
        fs::write(temp_dir.path().join("visible.md"), "# V").unwrap();
        fs::write(temp_dir.path().join("_draft.md"), "# D").unwrap();
        fs::create_dir(temp_dir.path().join(".git")).unwrap();
        fs::create_dir(temp_dir.path().join("_internal")).unwrap();

        let listing = scan(temp_dir.path());

        assert_eq!(listing.files, vec!["visible.md"]);
        assert!(listing.subdirs.is_empty());
    }

    #[test]
    fn test_scan_ignores_non_markdown_files() {
        let temp_dir = create_test_dir();
        fs::write(temp_dir.path().join("image.png"), [0u8; 4]).unwrap();
        fs::write(temp_dir.path().join("notes.txt"), "notes").unwrap();
        fs::write(temp_dir.path().join("page.md"), "# Page").unwrap();
        fs::write(temp_dir.path().join("UPPER.MD"), "# Upper").unwrap();

        let listing = scan(temp_dir.path());

        assert_eq!(listing.files, vec!["UPPER.MD", "page.md"]);
    }

    #[test]
    fn test_scan_missing_dir_returns_empty() {
        let listing = scan(Path::new("/nonexistent/docs"));

        assert_eq!(listing, DirListing::default());
    }

    #[test]
    fn test_scan_empty_dir() {
        let temp_dir = create_test_dir();

        let listing = scan(temp_dir.path());

        assert!(listing.files.is_empty());
        assert!(listing.subdirs.is_empty());
    }
}
