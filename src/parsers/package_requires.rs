//! Extraction of `Package-Requires:` headers from Emacs Lisp sources.
//!
//! Only single-line headers are recognized. The token extractor is shallow:
//! a parenthesized item contributes the first symbol inside it and anything
//! after that symbol (usually a version string) is dropped.

use regex::Regex;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

static HEADER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*;;;?\s*Package-Requires:\s*\((.*)\)\s*$").unwrap()
});

static DEPENDENCY_TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([\w-]+)[^)]*\)|([\w-]+)").unwrap());

/// Returns the dependency list captured from a header line, or `None` when
/// the line is not a `Package-Requires:` header.
pub fn parse_header_line(line: &str) -> Option<&str> {
    HEADER_PATTERN
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|list| list.as_str().trim())
}

/// Splits a captured dependency list into package names.
///
/// `(emacs "27.1") (beta "0.1") gamma` yields `emacs`, `beta`, `gamma`.
pub fn extract_dependency_names(list: &str) -> Vec<String> {
    DEPENDENCY_TOKEN_PATTERN
        .captures_iter(list)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|name| name.as_str().to_string())
        .collect()
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PackageRequiresParser;

impl PackageRequiresParser {
    pub fn new() -> Self {
        Self
    }

    /// Collects the dependencies declared by every header line in `source`.
    pub fn parse_source(&self, source: &str) -> BTreeSet<String> {
        let mut dependencies = BTreeSet::new();
        for line in source.lines() {
            let Some(list) = parse_header_line(line) else {
                continue;
            };
            if list.is_empty() {
                continue;
            }
            dependencies.extend(extract_dependency_names(list));
        }
        dependencies
    }

    /// Reads `file_path` and collects its declared dependencies.
    ///
    /// Invalid UTF-8 is replaced rather than rejected, so only I/O failures
    /// surface as errors.
    pub fn parse_file(&self, file_path: &Path) -> std::io::Result<BTreeSet<String>> {
        let bytes = fs::read(file_path)?;
        Ok(self.parse_source(&String::from_utf8_lossy(&bytes)))
    }
}
