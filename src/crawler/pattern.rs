//! Element selection patterns
//!
//! A small XPath subset sufficient for sitemap documents: a `/`-separated
//! chain of element names, either anchored at the document root (`/a/b`) or
//! matching anywhere (`//a/b`). `*` matches any single element name.

use crate::PatternError;
use std::fmt;

/// A parsed element path used to select text nodes from an XML document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionPattern {
    source: String,
    segments: Vec<String>,
    anchored: bool,
}

impl SelectionPattern {
    /// Parses a pattern string
    ///
    /// # Example
    ///
    /// ```
    /// use sitemap_batcher::crawler::SelectionPattern;
    ///
    /// let pattern = SelectionPattern::parse("//sitemap/loc").unwrap();
    /// assert!(pattern.matches(&["sitemapindex", "sitemap", "loc"]));
    /// assert!(!pattern.matches(&["urlset", "url", "loc"]));
    /// ```
    pub fn parse(pattern: &str) -> Result<Self, PatternError> {
        let trimmed = pattern.trim();
        if trimmed.is_empty() {
            return Err(PatternError::Empty);
        }

        let (anchored, path) = if let Some(rest) = trimmed.strip_prefix("//") {
            (false, rest)
        } else if let Some(rest) = trimmed.strip_prefix('/') {
            (true, rest)
        } else {
            (false, trimmed)
        };

        let segments: Vec<String> = path.split('/').map(str::to_string).collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(PatternError::EmptySegment(trimmed.to_string()));
        }

        Ok(Self {
            source: trimmed.to_string(),
            segments,
            anchored,
        })
    }

    /// Returns true if the element path (root first, local names) matches
    pub fn matches<S: AsRef<str>>(&self, path: &[S]) -> bool {
        if path.len() < self.segments.len() {
            return false;
        }
        if self.anchored && path.len() != self.segments.len() {
            return false;
        }

        let tail = &path[path.len() - self.segments.len()..];
        self.segments
            .iter()
            .zip(tail)
            .all(|(segment, name)| segment == "*" || segment == name.as_ref())
    }

    /// Returns the pattern as written
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl fmt::Display for SelectionPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
