// Reload semantics: the listing endpoints fully replace the local registries

#[path = "testutils/mod.rs"]
mod testutils;

use arangomap::{CollectionKind, EdgeDefinition, Error, GraphSchema};
use serde_json::json;
use std::collections::BTreeSet;
use testutils::test_fixture::{collection_item, graph_item, TestFixture, DB_NAME};

#[test]
fn test_reload_classifies_collections() {
    let fixture = TestFixture::new();
    fixture.register_collection("Humans", CollectionKind::Document);
    fixture.set_collections(vec![
        collection_item("_graphs", 2, true),
        collection_item("people", 2, false),
        collection_item("knows", 3, false),
        collection_item("Humans", 2, false),
        collection_item("mystery", 9, false),
    ]);

    let db = fixture.database();
    let names: BTreeSet<&str> = db.collections().keys().map(String::as_str).collect();
    assert_eq!(
        names,
        BTreeSet::from(["_graphs", "people", "knows", "Humans", "mystery"])
    );

    let graphs = &db.collections()["_graphs"];
    assert!(graphs.is_system());
    assert!(graphs.schema().is_none());

    let people = &db.collections()["people"];
    assert!(!people.is_system());
    assert_eq!(people.kind(), CollectionKind::Document);

    let knows = &db.collections()["knows"];
    assert!(knows.is_edge());

    let humans = &db.collections()["Humans"];
    assert_eq!(humans.schema().map(|s| s.name.as_str()), Some("Humans"));

    // Unknown wire types degrade to document collections
    let mystery = &db.collections()["mystery"];
    assert_eq!(mystery.kind(), CollectionKind::Document);
    assert!(mystery.schema().is_none());
}

#[test]
fn test_reload_replaces_registry() {
    let fixture = TestFixture::new();
    fixture.set_collections(vec![
        collection_item("alpha", 2, false),
        collection_item("beta", 2, false),
    ]);
    let mut db = fixture.database();
    assert!(db.has_collection("alpha"));

    fixture.set_collections(vec![
        collection_item("beta", 2, false),
        collection_item("gamma", 3, false),
    ]);
    db.reload().unwrap();

    let names: BTreeSet<&str> = db.collection_names().collect();
    assert_eq!(names, BTreeSet::from(["beta", "gamma"]));
    assert_eq!(db.graph_names().count(), 0);
    assert!(!db.has_collection("alpha"));
}

#[test]
fn test_reload_loads_collections_before_graphs() {
    let fixture = TestFixture::new();
    let _db = fixture.database();

    let urls: Vec<String> = fixture
        .session
        .requests()
        .into_iter()
        .map(|r| r.url)
        .collect();
    assert_eq!(urls, vec![fixture.url("collection"), fixture.url("gharial")]);
}

#[test]
fn test_reload_graphs_uses_registered_types() {
    let fixture = TestFixture::new();
    fixture.register_graph(
        GraphSchema::new("social")
            .with_edge_definition(EdgeDefinition::new("knows", &["people"], &["people"])),
    );
    fixture.set_graphs(vec![
        graph_item(
            "social",
            json!([{"collection": "knows", "from": ["people"], "to": ["people"]}]),
        ),
        graph_item("routes", json!([])),
    ]);

    let db = fixture.database();
    assert!(db.has_graph("social"));
    assert!(db.has_graph("routes"));
    assert!(db.graph("social").unwrap().schema().is_some());
    assert!(db.graph("routes").unwrap().schema().is_none());
    assert_eq!(
        db.graph("social").unwrap().edge_definitions(),
        vec![EdgeDefinition::new("knows", &["people"], &["people"])]
    );
}

#[test]
fn test_listing_failure_is_update_error() {
    let fixture = TestFixture::new();
    let payload = json!({"error": true, "code": 401, "errorNum": 11, "errorMessage": "not authorized"});
    fixture
        .session
        .route("GET", &fixture.url("collection"), 401, payload.clone());

    let err = fixture.connection.database(DB_NAME).unwrap_err();
    match err {
        Error::Update { message, payload: raw } => {
            assert_eq!(message, "not authorized");
            assert_eq!(raw, payload);
        }
        other => panic!("expected update error, got {:?}", other),
    }
}

#[test]
fn test_graph_listing_failure_is_update_error() {
    let fixture = TestFixture::new();
    let mut db = fixture.database();
    fixture.session.route(
        "GET",
        &fixture.url("gharial"),
        503,
        json!({"error": true, "errorMessage": "service unavailable"}),
    );

    let err = db.reload_graphs().unwrap_err();
    assert!(matches!(err, Error::Update { .. }));
    assert_eq!(err.message(), "service unavailable");
}

#[test]
fn test_urls_and_display() {
    let fixture = TestFixture::new();
    let db = fixture.database();

    assert_eq!(db.url(), fixture.url("").trim_end_matches('/'));
    assert_eq!(db.collections_url(), fixture.url("collection"));
    assert_eq!(db.cursors_url(), fixture.url("cursor"));
    assert_eq!(db.explain_url(), fixture.url("explain"));
    assert_eq!(db.graphs_url(), fixture.url("gharial"));
    assert_eq!(db.transaction_url(), fixture.url("transaction"));
    assert_eq!(db.to_string(), "ArangoDB database: testdb");
}
