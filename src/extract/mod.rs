//! Link extraction
//!
//! Scans raw content bodies for anchor tags and collects the distinct
//! `href` values. This is a best-effort pattern match over text, not an
//! HTML parser; unquoted or malformed attributes are not recognized.

use crate::error::Result;
use ahash::AHashSet;
use regex::Regex;

/// Anchor tags with a single- or double-quoted href, matched case-insensitively.
const ANCHOR_PATTERN: &str = r#"(?i)<a\s+(?:[^>]*?\s+)?href=(?:"([^"]*)"|'([^']*)')"#;

/// Extracts the set of link targets from a content body
pub struct LinkExtractor {
    pattern: Regex,
}

impl LinkExtractor {
    /// Create a new extractor with the anchor pattern compiled
    pub fn new() -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(ANCHOR_PATTERN)?,
        })
    }

    /// Extract all distinct href values from a body of text
    ///
    /// Returns URLs in first-occurrence order with duplicates collapsed.
    /// Empty input yields an empty set, never an error.
    pub fn extract(&self, text: &str) -> Vec<String> {
        let mut seen = AHashSet::new();
        let mut links = Vec::new();

        for caps in self.pattern.captures_iter(text) {
            let href = caps
                .get(1)
                .or_else(|| caps.get(2))
                .map(|m| m.as_str().to_string());
            if let Some(href) = href {
                if seen.insert(href.clone()) {
                    links.push(href);
                }
            }
        }

        links
    }
}
