//! CLI command definitions and parsing
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "schemalinks",
    version,
    about = "Classify content hyperlinks as schema.org relatedLink/significantLink and emit JSON-LD",
    long_about = "Schemalinks scans content bodies for hyperlinks, stores an editor-chosen \
                  relatedLink/significantLink label per URL, and emits the classification as \
                  JSON-LD - standalone or merged into an existing structured-data graph."
)]
pub struct Cli {
    /// Global config file path (defaults to ~/.config/schemalinks/config.toml)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List links found in a content body, joined with any stored labels
    Scan {
        /// Content kind
        #[arg(short, long, value_parser = ["post", "page", "term"], default_value = "post")]
        kind: String,

        /// Content item id; when given, stored labels are shown next to each link
        #[arg(short, long)]
        id: Option<String>,

        /// Body file to scan (defaults to stdin)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// JSON object of term rich-text fields; the configured field is scanned
        #[arg(long, value_name = "FILE")]
        fields: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Save a submitted URL -> label mapping for a content item
    Save {
        /// Content kind
        #[arg(short, long, value_parser = ["post", "page", "term"])]
        kind: String,

        /// Content item id
        #[arg(short, long)]
        id: String,

        /// URL=LABEL pair, repeatable; LABEL is relatedLink, significantLink or empty
        #[arg(short, long = "set", value_name = "URL=LABEL")]
        set: Vec<String>,

        /// JSON object file mapping URL -> label token
        #[arg(short, long, value_name = "FILE")]
        map: Option<PathBuf>,
    },

    /// Remove the stored classification for a content item
    Clear {
        /// Content kind
        #[arg(short, long, value_parser = ["post", "page", "term"])]
        kind: String,

        /// Content item id
        #[arg(short, long)]
        id: String,
    },

    /// Show the stored classification for a content item
    Show {
        /// Content kind
        #[arg(short, long, value_parser = ["post", "page", "term"])]
        kind: String,

        /// Content item id
        #[arg(short, long)]
        id: String,

        /// Show the partitioned label lists instead of the raw mapping
        #[arg(long)]
        partition: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Emit JSON-LD for one render pass of a content item
    Emit {
        /// Content kind
        #[arg(short, long, value_parser = ["post", "page", "term"])]
        kind: String,

        /// Content item id
        #[arg(short, long)]
        id: String,

        /// Page name for the standalone object
        #[arg(short, long)]
        name: String,

        /// Page URL for the standalone object
        #[arg(short, long)]
        url: String,

        /// Structured-data graph JSON to merge into (used when the seo_graph
        /// integration is enabled; otherwise a standalone block is emitted)
        #[arg(short, long, value_name = "FILE")]
        graph: Option<PathBuf>,

        /// Treat the render as a category archive (CollectionPage nodes match)
        #[arg(long)]
        collection: bool,
    },

    /// Show store location and statistics
    Status,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Initialize default configuration
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },

    /// Validate configuration file
    Validate {
        /// Path to config file (defaults to standard location)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
