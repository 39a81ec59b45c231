use std::collections::{BTreeMap, HashMap};
use std::io::Read;
use std::path::{Path, PathBuf};

use schemalinks::classify::Classification;
use schemalinks::cli::{Cli, Commands, ConfigAction};
use schemalinks::config::Config;
use schemalinks::content::{self, ContentItemId, ContentKind};
use schemalinks::error::{Result, SchemaLinksError};
use schemalinks::extract::LinkExtractor;
use schemalinks::schema::{self, EmissionMode, PageContext, RenderScope};
use schemalinks::store::ClassificationStore;
use serde_json::json;

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse_args();

    // Initialize logging
    init_logging(cli.verbose);

    // Handle commands
    match cli.command {
        Commands::Scan {
            kind,
            id,
            file,
            fields,
            json,
        } => {
            cmd_scan(cli.config, &kind, id, file, fields, json)?;
        }
        Commands::Save { kind, id, set, map } => {
            cmd_save(cli.config, &kind, &id, &set, map)?;
        }
        Commands::Clear { kind, id } => {
            cmd_clear(cli.config, &kind, &id)?;
        }
        Commands::Show {
            kind,
            id,
            partition,
            json,
        } => {
            cmd_show(cli.config, &kind, &id, partition, json)?;
        }
        Commands::Emit {
            kind,
            id,
            name,
            url,
            graph,
            collection,
        } => {
            cmd_emit(cli.config, &kind, &id, name, url, graph, collection)?;
        }
        Commands::Status => {
            cmd_status(cli.config)?;
        }
        Commands::Config { action } => {
            cmd_config(cli.config, action)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_filter = if verbose {
        "schemalinks=debug"
    } else {
        "schemalinks=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_scan(
    config_path: Option<PathBuf>,
    kind: &str,
    id: Option<String>,
    file: Option<PathBuf>,
    fields: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let config = load_config(config_path)?;
    let kind = parse_kind(kind)?;

    let body = read_body(file, fields, &config)?;
    let extractor = LinkExtractor::new()?;
    let links = body
        .as_deref()
        .map(|text| extractor.extract(text))
        .unwrap_or_default();

    // Join in stored labels when an item id is given
    let stored = match &id {
        Some(id) => {
            let store = open_store(&config)?;
            store.load(&ContentItemId::new(kind, id.clone()))?
        }
        None => Classification::new(),
    };

    if json {
        let entries: Vec<serde_json::Value> = links
            .iter()
            .map(|url| {
                json!({
                    "url": url,
                    "label": stored.label_for(url).map(|l| l.as_str()),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries).map_err(|e| {
            SchemaLinksError::Json {
                source: e,
                context: "Failed to serialize scan results".to_string(),
            }
        })?);
        return Ok(());
    }

    if links.is_empty() {
        println!("No links found in this content.");
        return Ok(());
    }

    for url in &links {
        let label = stored.label_for(url).map(|l| l.as_str()).unwrap_or("-");
        println!("{:>16}  {}", label, url);
    }

    Ok(())
}

fn cmd_save(
    config_path: Option<PathBuf>,
    kind: &str,
    id: &str,
    set: &[String],
    map: Option<PathBuf>,
) -> Result<()> {
    let config = load_config(config_path)?;
    let item = ContentItemId::new(parse_kind(kind)?, id);

    let mut submitted: Vec<(String, String)> = Vec::new();

    if let Some(map_path) = map {
        let content = std::fs::read_to_string(&map_path).map_err(|e| SchemaLinksError::Io {
            source: e,
            context: format!("Failed to read map file: {:?}", map_path),
        })?;
        let entries: BTreeMap<String, String> =
            serde_json::from_str(&content).map_err(|e| SchemaLinksError::Json {
                source: e,
                context: format!("Failed to parse map file: {:?}", map_path),
            })?;
        submitted.extend(entries);
    }

    for pair in set {
        let (url, label) = pair.split_once('=').ok_or_else(|| {
            anyhow::anyhow!("Invalid --set value '{}', expected URL=LABEL", pair)
        })?;
        submitted.push((url.to_string(), label.to_string()));
    }

    let store = open_store(&config)?;
    store.save(&item, &submitted)?;

    if submitted.is_empty() {
        println!("✓ Cleared stored classification for {}", item);
    } else {
        println!(
            "✓ Saved {} link classification(s) for {}",
            submitted.len(),
            item
        );
    }

    Ok(())
}

fn cmd_clear(config_path: Option<PathBuf>, kind: &str, id: &str) -> Result<()> {
    let config = load_config(config_path)?;
    let item = ContentItemId::new(parse_kind(kind)?, id);

    let store = open_store(&config)?;
    store.save(&item, &[])?;

    println!("✓ Cleared stored classification for {}", item);
    Ok(())
}

fn cmd_show(
    config_path: Option<PathBuf>,
    kind: &str,
    id: &str,
    partition: bool,
    json: bool,
) -> Result<()> {
    let config = load_config(config_path)?;
    let item = ContentItemId::new(parse_kind(kind)?, id);

    let store = open_store(&config)?;
    let classification = store.load(&item)?;

    if partition {
        let links = classification.partition();
        if json {
            println!("{}", serde_json::to_string_pretty(&links).map_err(|e| {
                SchemaLinksError::Json {
                    source: e,
                    context: "Failed to serialize classified links".to_string(),
                }
            })?);
        } else {
            println!("significantLink ({}):", links.significant.len());
            for url in &links.significant {
                println!("  {}", url);
            }
            println!("relatedLink ({}):", links.related.len());
            for url in &links.related {
                println!("  {}", url);
            }
        }
        return Ok(());
    }

    if json {
        let entries: Vec<serde_json::Value> = classification
            .iter()
            .map(|(url, label)| json!({"url": url, "label": label.map(|l| l.as_str())}))
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries).map_err(|e| {
            SchemaLinksError::Json {
                source: e,
                context: "Failed to serialize classification".to_string(),
            }
        })?);
        return Ok(());
    }

    if classification.is_empty() {
        println!("No stored classification for {}.", item);
        return Ok(());
    }

    for (url, label) in classification.iter() {
        println!("{:>16}  {}", label.map(|l| l.as_str()).unwrap_or("-"), url);
    }

    Ok(())
}

fn cmd_emit(
    config_path: Option<PathBuf>,
    kind: &str,
    id: &str,
    name: String,
    url: String,
    graph: Option<PathBuf>,
    collection: bool,
) -> Result<()> {
    let config = load_config(config_path)?;
    let item = ContentItemId::new(parse_kind(kind)?, id);

    let store = open_store(&config)?;
    let links = store.classified_links(&item)?;

    let graph_nodes = match graph {
        Some(graph_path) => {
            let content =
                std::fs::read_to_string(&graph_path).map_err(|e| SchemaLinksError::Io {
                    source: e,
                    context: format!("Failed to read graph file: {:?}", graph_path),
                })?;
            let nodes: Vec<serde_json::Value> =
                serde_json::from_str(&content).map_err(|e| SchemaLinksError::Json {
                    source: e,
                    context: format!("Failed to parse graph file: {:?}", graph_path),
                })?;
            Some(nodes)
        }
        None => None,
    };

    let scope = if collection {
        RenderScope::Archive
    } else {
        RenderScope::Singular
    };

    match EmissionMode::select(&config.integrations, graph_nodes.is_some()) {
        EmissionMode::Merge => {
            // graph_nodes is always present in merge mode
            let merged = schema::merge_into_graph(graph_nodes.unwrap_or_default(), &links, scope);
            println!("{}", serde_json::to_string_pretty(&merged).map_err(|e| {
                SchemaLinksError::Json {
                    source: e,
                    context: "Failed to serialize merged graph".to_string(),
                }
            })?);
        }
        EmissionMode::Standalone => {
            let page = PageContext { name, url };
            if let Some(object) = schema::standalone_object(&page, &links) {
                println!("{}", schema::render_script_tag(&object));
            } else {
                tracing::debug!("No classified links for {}; nothing emitted", item);
            }
        }
    }

    Ok(())
}

fn cmd_status(config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config(config_path)?;
    let data_dir = expand_path(&config.storage.data_dir)?;

    let store = open_store(&config)?;
    let stats = store.database().stats()?;

    println!("Schemalinks Status");
    println!("==================");
    println!("\nData directory: {}", data_dir.display());
    println!("Classified items: {}", stats.item_count);
    println!("Stored entries: {}", stats.entry_count);
    println!("\nIntegrations:");
    println!(
        "  term_fields: {} (field: '{}')",
        config.integrations.term_fields, config.integrations.term_field_name
    );
    println!("  seo_graph: {}", config.integrations.seo_graph);

    Ok(())
}

fn cmd_config(config_path: Option<PathBuf>, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let config = load_config(config_path)?;
            let json =
                serde_json::to_string_pretty(&config).map_err(|e| SchemaLinksError::Json {
                    source: e,
                    context: "Failed to serialize config".to_string(),
                })?;
            println!("{}", json);
        }
        ConfigAction::Init { force } => {
            let path = match config_path {
                Some(path) => path,
                None => Config::default_path()?,
            };

            if path.exists() && !force {
                println!("Configuration file already exists at: {}", path.display());
                println!("Use --force to overwrite");
                return Ok(());
            }

            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| SchemaLinksError::Io {
                    source: e,
                    context: format!("Failed to create config directory: {:?}", parent),
                })?;
            }

            let config = Config::default();
            config.save(&path)?;

            println!("✓ Configuration initialized at: {}", path.display());
        }
        ConfigAction::Validate { file } => {
            let path = match file.or(config_path) {
                Some(path) => path,
                None => Config::default_path()?,
            };
            let config = Config::load(&path)?;
            println!("✓ Configuration is valid");
            println!("  Schema version: {}", config.meta.schema_version);
        }
    }

    Ok(())
}

/// Resolve the body text to scan
///
/// A fields file routes through the term rich-text integration; otherwise the
/// body comes from the given file or stdin. `None` means "no content" and
/// degrades to an empty link set.
fn read_body(
    file: Option<PathBuf>,
    fields: Option<PathBuf>,
    config: &Config,
) -> Result<Option<String>> {
    if let Some(fields_path) = fields {
        let content = std::fs::read_to_string(&fields_path).map_err(|e| SchemaLinksError::Io {
            source: e,
            context: format!("Failed to read fields file: {:?}", fields_path),
        })?;
        let fields: HashMap<String, String> =
            serde_json::from_str(&content).map_err(|e| SchemaLinksError::Json {
                source: e,
                context: format!("Failed to parse fields file: {:?}", fields_path),
            })?;

        return Ok(content::term_field_body(&fields, &config.integrations).map(String::from));
    }

    if let Some(file_path) = file {
        let body = std::fs::read_to_string(&file_path).map_err(|e| SchemaLinksError::Io {
            source: e,
            context: format!("Failed to read body file: {:?}", file_path),
        })?;
        return Ok(Some(body));
    }

    let mut body = String::new();
    std::io::stdin()
        .read_to_string(&mut body)
        .map_err(|e| SchemaLinksError::Io {
            source: e,
            context: "Failed to read body from stdin".to_string(),
        })?;
    Ok(Some(body))
}

fn parse_kind(token: &str) -> Result<ContentKind> {
    ContentKind::parse(token).ok_or_else(|| SchemaLinksError::UnknownContentKind(token.to_string()))
}

fn open_store(config: &Config) -> Result<ClassificationStore> {
    let data_dir = expand_path(&config.storage.data_dir)?;
    ClassificationStore::open(data_dir)
}

fn load_config(config_path: Option<PathBuf>) -> Result<Config> {
    let path = match config_path {
        Some(path) => path,
        None => Config::default_path()?,
    };

    if !path.exists() {
        tracing::warn!(
            "Config file not found, using defaults. Run 'schemalinks config init' to create one."
        );
        return Ok(Config::default());
    }

    Config::load(&path)
}

fn expand_path(path: &Path) -> Result<PathBuf> {
    let path_str = path
        .to_str()
        .ok_or_else(|| SchemaLinksError::Config("Invalid path encoding".to_string()))?;

    if let Some(stripped) = path_str.strip_prefix("~/") {
        let home = dirs::home_dir().ok_or_else(|| {
            SchemaLinksError::Config("Cannot determine home directory".to_string())
        })?;
        Ok(home.join(stripped))
    } else {
        Ok(path.to_path_buf())
    }
}
