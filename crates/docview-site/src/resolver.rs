//! URL path to markdown file resolution.
//!
//! Maps a requested URL path onto a concrete markdown file under the docs
//! root, applying directory index fallback (`index.md`, then `README.md`)
//! and rejecting anything that is not a markdown document. Path traversal
//! out of the docs root is rejected before touching the filesystem.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::name::has_markdown_extension;

/// A resolved, read markdown document.
#[derive(Debug, Clone)]
pub struct ResolvedDocument {
    /// The raw path from the URL, without leading slash. Empty for the
    /// docs root.
    pub requested_path: String,
    /// Concrete markdown file on disk. Always exists at read time and
    /// always carries a markdown extension.
    pub file_path: PathBuf,
    /// File content decoded as UTF-8.
    pub markdown: String,
    /// True when the request named a directory and an index file answered
    /// it. Drives the final breadcrumb entry's linkability.
    pub is_index: bool,
}

/// Resolution failure.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// Requested path does not map to any existing markdown file.
    #[error("Documentation page not found: {0}")]
    NotFound(String),
    /// Requested path is an existing file without a markdown extension.
    #[error("Not a markdown document: {0}")]
    InvalidTarget(String),
    /// The file existed but could not be read.
    #[error("Failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Resolve a requested URL path to a markdown document under `docs_root`.
///
/// An empty `requested_path` means the root itself. Directories resolve
/// through their `index.md`, falling back to `README.md` (both matched
/// case-insensitively). Performs exactly one content read; directory
/// disambiguation costs one stat plus one directory listing.
pub fn resolve(requested_path: &str, docs_root: &Path) -> Result<ResolvedDocument, ResolveError> {
    let not_found = || ResolveError::NotFound(requested_path.to_owned());

    // Normalize segments and refuse to climb above the docs root.
    let segments = contained_segments(requested_path).ok_or_else(not_found)?;
    let mut candidate = docs_root.to_path_buf();
    for segment in &segments {
        candidate.push(segment);
    }

    let metadata = fs::metadata(&candidate).map_err(|_| not_found())?;

    let (file_path, is_index) = if metadata.is_dir() {
        let index = find_index_file(&candidate).ok_or_else(not_found)?;
        (index, true)
    } else if has_markdown_extension(&candidate.file_name().unwrap_or_default().to_string_lossy()) {
        (candidate, false)
    } else {
        return Err(ResolveError::InvalidTarget(requested_path.to_owned()));
    };

    let markdown = fs::read_to_string(&file_path).map_err(|source| ResolveError::Io {
        path: file_path.clone(),
        source,
    })?;

    Ok(ResolvedDocument {
        requested_path: requested_path.to_owned(),
        file_path,
        markdown,
        is_index,
    })
}

/// Split a requested path into normalized segments.
///
/// Returns `None` when `..` segments would escape the docs root. `.` and
/// empty segments are dropped.
fn contained_segments(requested_path: &str) -> Option<Vec<&str>> {
    let mut segments = Vec::new();
    for segment in requested_path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop()?;
            }
            other => segments.push(other),
        }
    }
    Some(segments)
}

/// Find a directory's index file: `index.md` first, then `README.md`,
/// both matched case-insensitively against the directory's entries.
fn find_index_file(dir: &Path) -> Option<PathBuf> {
    let names: Vec<String> = fs::read_dir(dir)
        .ok()?
        .filter_map(Result::ok)
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();

    ["index.md", "README.md"].iter().find_map(|wanted| {
        names
            .iter()
            .find(|name| name.eq_ignore_ascii_case(wanted))
            .map(|name| dir.join(name))
    })
}
