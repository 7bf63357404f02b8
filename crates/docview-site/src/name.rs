//! Display titles from filesystem entry names.

use std::sync::OnceLock;

use regex::Regex;

/// Anchored pattern for numeric ordering prefixes like `01_` or `02-`.
fn ordering_prefix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+[-_]").expect("valid pattern"))
}

/// Convert a filesystem entry name into a display title.
///
/// Strips a trailing markdown extension, strips a leading numeric ordering
/// prefix (`01_intro` becomes `intro`), replaces `-`/`_` separators with
/// spaces and uppercases the first character of each word.
///
/// Examples: `03_getting-started.md` becomes `Getting Started`,
/// `API_reference` becomes `API Reference`.
#[must_use]
pub fn format_name(name: &str) -> String {
    let stem = strip_markdown_extension(name);
    let stem = ordering_prefix().replace(stem, "");
    let spaced = stem.replace(['-', '_'], " ");

    spaced
        .split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Strip a trailing markdown extension, case-insensitively.
#[must_use]
pub fn strip_markdown_extension(name: &str) -> &str {
    for ext in [".markdown", ".md"] {
        // Byte-level suffix compare; a match guarantees the cut point is
        // a char boundary since the extension is pure ASCII
        let Some(cut) = name.len().checked_sub(ext.len()) else {
            continue;
        };
        if cut > 0 && name.as_bytes()[cut..].eq_ignore_ascii_case(ext.as_bytes()) {
            return &name[..cut];
        }
    }
    name
}

/// Whether a file name carries a markdown extension, case-insensitively.
#[must_use]
pub fn has_markdown_extension(name: &str) -> bool {
    strip_markdown_extension(name).len() != name.len()
}

/// Uppercase the first character of a word, leaving the rest untouched.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
