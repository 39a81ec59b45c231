//! Content item identity and body sourcing
//!
//! Content items are identified by an opaque id plus a kind discriminator.
//! Posts and pages carry their own body; term bodies come from an externally
//! supplied rich-text field selected by configuration.

use crate::config::IntegrationsConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Kind of content item a classification belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Post,
    Page,
    Term,
}

impl ContentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Post => "post",
            ContentKind::Page => "page",
            ContentKind::Term => "term",
        }
    }

    /// Parse a kind token as it appears on the command line and in storage
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "post" => Some(ContentKind::Post),
            "page" => Some(ContentKind::Page),
            "term" => Some(ContentKind::Term),
            _ => None,
        }
    }
}

/// Identity of a content item owning a classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentItemId {
    pub kind: ContentKind,
    pub id: String,
}

impl ContentItemId {
    pub fn new(kind: ContentKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }
}

impl fmt::Display for ContentItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind.as_str(), self.id)
    }
}

/// Resolve the body text for a term from its rich-text fields
///
/// Yields the configured field's content only when the term integration is
/// enabled, a field name is configured, and the field is present with
/// non-empty content. Everything else degrades to `None` ("no links found").
pub fn term_field_body<'a>(
    fields: &'a HashMap<String, String>,
    integrations: &IntegrationsConfig,
) -> Option<&'a str> {
    if !integrations.term_fields {
        return None;
    }

    let field_name = integrations.term_field_name.trim();
    if field_name.is_empty() {
        return None;
    }

    fields
        .get(field_name)
        .map(String::as_str)
        .filter(|body| !body.is_empty())
}
