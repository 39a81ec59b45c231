//! Link classification data model and reader
//!
//! A classification is an ordered mapping from URL to an editor-assigned
//! label. Submitted label tokens are sanitized on the way in: only the two
//! schema.org property names are recognized, everything else is unset.

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

/// Label an editor can assign to a link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LinkLabel {
    /// schema.org relatedLink
    #[serde(rename = "relatedLink")]
    Related,
    /// schema.org significantLink
    #[serde(rename = "significantLink")]
    Significant,
}

impl LinkLabel {
    /// The schema.org property name used as the submission token
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkLabel::Related => "relatedLink",
            LinkLabel::Significant => "significantLink",
        }
    }

    /// Parse a submitted token
    ///
    /// Unrecognized tokens (including the empty string) mean unset; they are
    /// never rejected.
    pub fn parse(token: &str) -> Option<Self> {
        match token.trim() {
            "relatedLink" => Some(LinkLabel::Related),
            "significantLink" => Some(LinkLabel::Significant),
            _ => None,
        }
    }
}

/// Ordered URL -> label mapping for one content item
///
/// Each URL appears at most once; a `None` label is an explicitly unset
/// entry. An absent URL also reads as unset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Classification {
    entries: Vec<(String, Option<LinkLabel>)>,
}

impl Classification {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a classification from caller-submitted (URL, token) pairs
    ///
    /// Tokens are sanitized through [`LinkLabel::parse`]; a repeated URL
    /// keeps the last submitted token.
    pub fn from_submission<I, U, T>(submitted: I) -> Self
    where
        I: IntoIterator<Item = (U, T)>,
        U: Into<String>,
        T: AsRef<str>,
    {
        let mut classification = Self::new();
        for (url, token) in submitted {
            classification.insert(url.into(), LinkLabel::parse(token.as_ref()));
        }
        classification
    }

    /// Insert or replace the label for a URL
    pub fn insert(&mut self, url: String, label: Option<LinkLabel>) {
        if let Some(entry) = self.entries.iter_mut().find(|(u, _)| *u == url) {
            entry.1 = label;
        } else {
            self.entries.push((url, label));
        }
    }

    /// Label stored for a URL; absent URLs read as unset
    pub fn label_for(&self, url: &str) -> Option<LinkLabel> {
        self.entries
            .iter()
            .find(|(u, _)| u == url)
            .and_then(|(_, label)| *label)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterate entries in store order
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<LinkLabel>)> {
        self.entries
            .iter()
            .map(|(url, label)| (url.as_str(), *label))
    }

    /// Partition into the two label lists, dropping unset entries
    ///
    /// Store order is preserved and each list is deduplicated.
    pub fn partition(&self) -> ClassifiedLinks {
        let mut seen = AHashSet::new();
        let mut links = ClassifiedLinks::default();

        for (url, label) in &self.entries {
            let Some(label) = label else { continue };
            if !seen.insert(url.clone()) {
                continue;
            }
            match label {
                LinkLabel::Significant => links.significant.push(url.clone()),
                LinkLabel::Related => links.related.push(url.clone()),
            }
        }

        links
    }
}

/// A classification partitioned by label
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedLinks {
    #[serde(rename = "significantLink")]
    pub significant: Vec<String>,
    #[serde(rename = "relatedLink")]
    pub related: Vec<String>,
}

impl ClassifiedLinks {
    /// True when neither list holds a URL
    pub fn is_empty(&self) -> bool {
        self.significant.is_empty() && self.related.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_recognized_tokens() {
        assert_eq!(LinkLabel::parse("relatedLink"), Some(LinkLabel::Related));
        assert_eq!(
            LinkLabel::parse("significantLink"),
            Some(LinkLabel::Significant)
        );
    }

    #[test]
    fn test_parse_unrecognized_tokens_are_unset() {
        assert_eq!(LinkLabel::parse(""), None);
        assert_eq!(LinkLabel::parse("none"), None);
        assert_eq!(LinkLabel::parse("RELATEDLINK"), None);
        assert_eq!(LinkLabel::parse("<script>"), None);
    }

    #[test]
    fn test_from_submission_sanitizes() {
        let classification = Classification::from_submission(vec![
            ("https://a.com", "relatedLink"),
            ("https://b.com", "bogus"),
            ("https://c.com", "significantLink"),
        ]);

        assert_eq!(classification.len(), 3);
        assert_eq!(
            classification.label_for("https://a.com"),
            Some(LinkLabel::Related)
        );
        assert_eq!(classification.label_for("https://b.com"), None);
        assert_eq!(
            classification.label_for("https://c.com"),
            Some(LinkLabel::Significant)
        );
    }

    #[test]
    fn test_from_submission_last_token_wins() {
        let classification = Classification::from_submission(vec![
            ("https://a.com", "relatedLink"),
            ("https://a.com", "significantLink"),
        ]);

        assert_eq!(classification.len(), 1);
        assert_eq!(
            classification.label_for("https://a.com"),
            Some(LinkLabel::Significant)
        );
    }

    #[test]
    fn test_absent_url_reads_as_unset() {
        let classification = Classification::new();
        assert_eq!(classification.label_for("https://nowhere.com"), None);
    }

    #[test]
    fn test_partition_drops_unset_and_preserves_order() {
        let classification = Classification::from_submission(vec![
            ("https://sig1.com", "significantLink"),
            ("https://rel1.com", "relatedLink"),
            ("https://skip.com", ""),
            ("https://sig2.com", "significantLink"),
        ]);

        let links = classification.partition();
        assert_eq!(links.significant, vec!["https://sig1.com", "https://sig2.com"]);
        assert_eq!(links.related, vec!["https://rel1.com"]);
    }

    #[test]
    fn test_partition_never_duplicates_across_lists() {
        let classification = Classification::from_submission(vec![
            ("https://a.com", "significantLink"),
            ("https://b.com", "relatedLink"),
        ]);

        let links = classification.partition();
        for url in &links.significant {
            assert!(!links.related.contains(url));
        }
        assert_eq!(links.significant.len(), 1);
        assert_eq!(links.related.len(), 1);
    }

    #[test]
    fn test_partition_empty() {
        let links = Classification::new().partition();
        assert!(links.is_empty());
    }
}
