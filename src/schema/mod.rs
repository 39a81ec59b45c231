//! JSON-LD emission
//!
//! Builds the schema.org output for one render pass: either a standalone
//! `WebPage` object wrapped in a script tag, or the classified link lists
//! merged into an externally supplied structured-data graph.

use crate::classify::ClassifiedLinks;
use crate::config::IntegrationsConfig;
use serde_json::{json, Value};

/// Page identity used for the standalone object
#[derive(Debug, Clone)]
pub struct PageContext {
    pub name: String,
    pub url: String,
}

/// Which graph node types a render pass may attach to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderScope {
    /// A single post or page; only `WebPage` nodes match
    Singular,
    /// A category archive; `WebPage` and `CollectionPage` nodes match
    Archive,
}

impl RenderScope {
    fn matches_type(&self, node_type: &str) -> bool {
        match self {
            RenderScope::Singular => node_type == "WebPage",
            RenderScope::Archive => node_type == "WebPage" || node_type == "CollectionPage",
        }
    }
}

/// How the classified links leave the system for one render pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmissionMode {
    /// Emit a standalone JSON-LD script block
    Standalone,
    /// Attach to an externally supplied structured-data graph
    Merge,
}

impl EmissionMode {
    /// Select the emission path
    ///
    /// Merge applies only when the integration is enabled in configuration
    /// and a graph was actually supplied at render time; exactly one path
    /// runs per render.
    pub fn select(integrations: &IntegrationsConfig, graph_detected: bool) -> Self {
        if integrations.seo_graph && graph_detected {
            EmissionMode::Merge
        } else {
            EmissionMode::Standalone
        }
    }
}

/// Build the standalone JSON-LD object for a content item
///
/// Returns `None` when both label lists are empty: absence of output, not an
/// empty object, signals "no classification". Empty lists are omitted from
/// the object entirely.
pub fn standalone_object(page: &PageContext, links: &ClassifiedLinks) -> Option<Value> {
    if links.is_empty() {
        return None;
    }

    let mut object = json!({
        "@context": "https://schema.org",
        "@type": "WebPage",
        "name": page.name,
        "url": page.url,
    });
    attach_links(&mut object, links);

    Some(object)
}

/// Wrap a JSON-LD object in the script tag emitted into the document head
pub fn render_script_tag(object: &Value) -> String {
    format!(r#"<script type="application/ld+json">{}</script>"#, object)
}

/// Attach the label lists to the first matching node of a graph
///
/// Only the first node whose `@type` matches the scope is modified; every
/// other node is returned untouched. A graph with no matching node passes
/// through unchanged - the classification is dropped for that render, which
/// is surfaced as a warning rather than silently.
pub fn merge_into_graph(
    mut graph: Vec<Value>,
    links: &ClassifiedLinks,
    scope: RenderScope,
) -> Vec<Value> {
    if links.is_empty() {
        return graph;
    }

    for node in graph.iter_mut() {
        let matched = node
            .get("@type")
            .and_then(Value::as_str)
            .map(|t| scope.matches_type(t))
            .unwrap_or(false);

        if matched {
            attach_links(node, links);
            return graph;
        }
    }

    tracing::warn!(
        "No {} node in structured-data graph; classified links dropped this render",
        match scope {
            RenderScope::Singular => "WebPage",
            RenderScope::Archive => "WebPage/CollectionPage",
        }
    );
    graph
}

fn attach_links(node: &mut Value, links: &ClassifiedLinks) {
    if let Some(object) = node.as_object_mut() {
        if !links.significant.is_empty() {
            object.insert("significantLink".to_string(), json!(links.significant));
        }
        if !links.related.is_empty() {
            object.insert("relatedLink".to_string(), json!(links.related));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> PageContext {
        PageContext {
            name: "Example Page".to_string(),
            url: "https://example.com/page".to_string(),
        }
    }

    fn significant_only() -> ClassifiedLinks {
        ClassifiedLinks {
            significant: vec!["https://example.com/sig".to_string()],
            related: vec![],
        }
    }

    #[test]
    fn test_standalone_single_significant_link() {
        let object = standalone_object(&page(), &significant_only()).unwrap();

        assert_eq!(object["@context"], "https://schema.org");
        assert_eq!(object["@type"], "WebPage");
        assert_eq!(object["name"], "Example Page");
        assert_eq!(object["url"], "https://example.com/page");
        assert_eq!(
            object["significantLink"],
            json!(["https://example.com/sig"])
        );
        assert!(object.get("relatedLink").is_none());
    }

    #[test]
    fn test_standalone_no_classified_links_emits_nothing() {
        assert!(standalone_object(&page(), &ClassifiedLinks::default()).is_none());
    }

    #[test]
    fn test_script_tag_rendering() {
        let object = standalone_object(&page(), &significant_only()).unwrap();
        let tag = render_script_tag(&object);

        assert!(tag.starts_with(r#"<script type="application/ld+json">{"#));
        assert!(tag.ends_with("}</script>"));
        // serde_json leaves slashes unescaped
        assert!(tag.contains("https://example.com/sig"));
    }

    #[test]
    fn test_merge_attaches_to_first_webpage_only() {
        let graph = vec![
            json!({"@type": "Article", "headline": "A"}),
            json!({"@type": "WebPage", "url": "https://example.com"}),
            json!({"@type": "WebPage", "url": "https://example.com/other"}),
        ];
        let links = ClassifiedLinks {
            significant: vec![],
            related: vec!["https://example.com/rel".to_string()],
        };

        let merged = merge_into_graph(graph, &links, RenderScope::Singular);

        assert_eq!(merged[0], json!({"@type": "Article", "headline": "A"}));
        assert_eq!(
            merged[1]["relatedLink"],
            json!(["https://example.com/rel"])
        );
        assert!(merged[1].get("significantLink").is_none());
        assert!(merged[2].get("relatedLink").is_none());
    }

    #[test]
    fn test_merge_preserves_other_node_properties() {
        let graph = vec![json!({
            "@type": "WebPage",
            "url": "https://example.com",
            "breadcrumb": {"@id": "#breadcrumb"},
        })];

        let merged = merge_into_graph(graph, &significant_only(), RenderScope::Singular);

        assert_eq!(merged[0]["url"], "https://example.com");
        assert_eq!(merged[0]["breadcrumb"], json!({"@id": "#breadcrumb"}));
        assert_eq!(
            merged[0]["significantLink"],
            json!(["https://example.com/sig"])
        );
    }

    #[test]
    fn test_merge_no_matching_node_passes_through() {
        let graph = vec![json!({"@type": "Article"}), json!({"@type": "Person"})];

        let merged = merge_into_graph(graph.clone(), &significant_only(), RenderScope::Singular);
        assert_eq!(merged, graph);
    }

    #[test]
    fn test_merge_empty_classification_leaves_graph_untouched() {
        let graph = vec![json!({"@type": "WebPage"})];

        let merged = merge_into_graph(graph.clone(), &ClassifiedLinks::default(), RenderScope::Singular);
        assert_eq!(merged, graph);
    }

    #[test]
    fn test_archive_scope_matches_collection_page() {
        let graph = vec![json!({"@type": "CollectionPage"})];

        let singular = merge_into_graph(graph.clone(), &significant_only(), RenderScope::Singular);
        assert!(singular[0].get("significantLink").is_none());

        let archive = merge_into_graph(graph, &significant_only(), RenderScope::Archive);
        assert_eq!(
            archive[0]["significantLink"],
            json!(["https://example.com/sig"])
        );
    }

    #[test]
    fn test_emission_mode_selection() {
        let mut integrations = IntegrationsConfig::default();
        assert_eq!(
            EmissionMode::select(&integrations, true),
            EmissionMode::Standalone
        );

        integrations.seo_graph = true;
        assert_eq!(
            EmissionMode::select(&integrations, false),
            EmissionMode::Standalone
        );
        assert_eq!(
            EmissionMode::select(&integrations, true),
            EmissionMode::Merge
        );
    }
}
