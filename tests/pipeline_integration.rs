//! End-to-end pipeline: extract links from a body, classify, emit JSON-LD

use std::collections::HashMap;

use schemalinks::config::IntegrationsConfig;
use schemalinks::content::{self, ContentItemId, ContentKind};
use schemalinks::extract::LinkExtractor;
use schemalinks::schema::{self, EmissionMode, PageContext, RenderScope};
use schemalinks::store::ClassificationStore;
use serde_json::json;
use tempfile::TempDir;

const BODY: &str = r#"
    <p>Intro with a <a href="https://example.com/guide">guide</a> and a
    <a href="https://example.com/reference">reference</a>, plus the guide
    again: <a href="https://example.com/guide">here</a>.</p>
    <p>Also an <a href='https://example.com/aside'>aside</a>.</p>
"#;

#[test]
fn test_extract_classify_emit_standalone() {
    let dir = TempDir::new().unwrap();
    let store = ClassificationStore::open(dir.path().to_path_buf()).unwrap();
    let item = ContentItemId::new(ContentKind::Post, "7");

    // Extract: three distinct links, duplicates collapsed
    let extractor = LinkExtractor::new().unwrap();
    let links = extractor.extract(BODY);
    assert_eq!(
        links,
        vec![
            "https://example.com/guide",
            "https://example.com/reference",
            "https://example.com/aside",
        ]
    );

    // Classify: editor labels two of them, leaves one unset
    let submitted: Vec<(String, String)> = vec![
        (links[0].clone(), "significantLink".to_string()),
        (links[1].clone(), "relatedLink".to_string()),
        (links[2].clone(), String::new()),
    ];
    store.save(&item, &submitted).unwrap();

    // Emit: standalone object carries only the labeled links
    let classified = store.classified_links(&item).unwrap();
    let page = PageContext {
        name: "Guide Hub".to_string(),
        url: "https://example.com/hub".to_string(),
    };
    let object = schema::standalone_object(&page, &classified).unwrap();

    assert_eq!(object["@type"], "WebPage");
    assert_eq!(
        object["significantLink"],
        json!(["https://example.com/guide"])
    );
    assert_eq!(
        object["relatedLink"],
        json!(["https://example.com/reference"])
    );

    let tag = schema::render_script_tag(&object);
    assert!(tag.starts_with(r#"<script type="application/ld+json">"#));
    assert!(tag.contains("https://example.com/guide"));
}

#[test]
fn test_extract_classify_emit_merge() {
    let dir = TempDir::new().unwrap();
    let store = ClassificationStore::open(dir.path().to_path_buf()).unwrap();
    let item = ContentItemId::new(ContentKind::Post, "8");

    store
        .save(
            &item,
            &[(
                "https://example.com/guide".to_string(),
                "relatedLink".to_string(),
            )],
        )
        .unwrap();

    let integrations = IntegrationsConfig {
        seo_graph: true,
        ..IntegrationsConfig::default()
    };
    assert_eq!(
        EmissionMode::select(&integrations, true),
        EmissionMode::Merge
    );

    let graph = vec![
        json!({"@type": "Article", "headline": "Post 8"}),
        json!({"@type": "WebPage", "url": "https://example.com/post-8"}),
    ];
    let classified = store.classified_links(&item).unwrap();
    let merged = schema::merge_into_graph(graph, &classified, RenderScope::Singular);

    assert_eq!(merged[0], json!({"@type": "Article", "headline": "Post 8"}));
    assert_eq!(merged[1]["url"], "https://example.com/post-8");
    assert_eq!(
        merged[1]["relatedLink"],
        json!(["https://example.com/guide"])
    );
}

#[test]
fn test_term_field_pipeline_degrades_without_configuration() {
    let mut fields = HashMap::new();
    fields.insert(
        "category_editor".to_string(),
        r#"<a href="https://example.com/topic">topic</a>"#.to_string(),
    );

    // Disabled integration: no body, hence no links
    let disabled = IntegrationsConfig::default();
    assert_eq!(content::term_field_body(&fields, &disabled), None);

    // Enabled with the right field name: links flow through the extractor
    let enabled = IntegrationsConfig {
        term_fields: true,
        term_field_name: "category_editor".to_string(),
        seo_graph: false,
    };
    let body = content::term_field_body(&fields, &enabled).unwrap();
    let extractor = LinkExtractor::new().unwrap();
    assert_eq!(extractor.extract(body), vec!["https://example.com/topic"]);
}

#[test]
fn test_term_classification_merges_into_collection_page() {
    let dir = TempDir::new().unwrap();
    let store = ClassificationStore::open(dir.path().to_path_buf()).unwrap();
    let term = ContentItemId::new(ContentKind::Term, "news");

    store
        .save(
            &term,
            &[(
                "https://example.com/topic".to_string(),
                "significantLink".to_string(),
            )],
        )
        .unwrap();

    let graph = vec![
        json!({"@type": "CollectionPage", "url": "https://example.com/category/news"}),
    ];
    let classified = store.classified_links(&term).unwrap();
    let merged = schema::merge_into_graph(graph, &classified, RenderScope::Archive);

    assert_eq!(
        merged[0]["significantLink"],
        json!(["https://example.com/topic"])
    );
}
