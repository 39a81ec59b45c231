//! Schemalinks - schema.org link classification for published content
//!
//! Extracts hyperlinks from content-item bodies, lets editors classify each
//! one as a schema.org `relatedLink` or `significantLink`, persists the
//! classifications per item, and emits them as JSON-LD - standalone or merged
//! into an existing structured-data graph.

pub mod classify;
pub mod cli;
pub mod config;
pub mod content;
pub mod error;
pub mod extract;
pub mod schema;
pub mod store;

pub use error::{Result, SchemaLinksError};
