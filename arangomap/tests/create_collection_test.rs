// Collection creation: local validation first, then a single POST

#[path = "testutils/mod.rs"]
mod testutils;

use arangomap::{CollectionKind, CollectionSchema, Error};
use serde_json::{json, Map, Value};
use testutils::test_fixture::{collection_item, TestFixture};

fn props(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => panic!("properties must be an object"),
    }
}

fn created(name: &str, wire_type: u64) -> Value {
    json!({
        "error": false,
        "code": 200,
        "id": "4242",
        "name": name,
        "type": wire_type,
        "isSystem": false,
        "status": 3,
    })
}

#[test]
fn test_duplicate_name_fails_without_request() {
    let fixture = TestFixture::new();
    fixture.set_collections(vec![collection_item("people", 2, false)]);
    let mut db = fixture.database();
    let before = fixture.session.request_count();

    let err = db
        .create_collection("Collection", props(json!({"name": "people"})))
        .unwrap_err();

    assert!(matches!(err, Error::Creation { .. }), "got {:?}", err);
    assert!(err.message().contains("people"));
    assert_eq!(fixture.session.request_count(), before);
}

#[test]
fn test_generic_collection_requires_name() {
    let fixture = TestFixture::new();
    let mut db = fixture.database();
    let before = fixture.session.request_count();

    let err = db
        .create_collection("Collection", props(json!({"waitForSync": true})))
        .unwrap_err();

    assert!(matches!(err, Error::Validation(_)), "got {:?}", err);
    assert_eq!(fixture.session.request_count(), before);
}

#[test]
fn test_generic_collection_created_and_registered() {
    let fixture = TestFixture::new();
    fixture
        .session
        .route("POST", &fixture.url("collection"), 200, created("x", 2));
    let mut db = fixture.database();

    let collection = db
        .create_collection("Collection", props(json!({"name": "x"})))
        .unwrap();
    assert_eq!(collection.name(), "x");
    assert_eq!(collection.kind(), CollectionKind::Document);
    assert!(collection.schema().is_none());

    assert!(db.has_collection("x"));
    let listings = fixture.listing_count();
    assert_eq!(db.collection("x").unwrap().name(), "x");
    assert_eq!(fixture.listing_count(), listings, "lookup must not reload");

    let body = &fixture.session.bodies("POST", &fixture.url("collection"))[0];
    assert_eq!(body, &json!({"name": "x", "type": 2}));
}

#[test]
fn test_generic_edges_sets_edge_type() {
    let fixture = TestFixture::new();
    fixture
        .session
        .route("POST", &fixture.url("collection"), 200, created("links", 3));
    let mut db = fixture.database();

    let collection = db
        .create_collection("Edges", props(json!({"name": "links"})))
        .unwrap();
    assert!(collection.is_edge());

    let body = &fixture.session.bodies("POST", &fixture.url("collection"))[0];
    assert_eq!(body["type"], json!(3));
}

#[test]
fn test_registered_type_merges_properties_and_forces_name() {
    let fixture = TestFixture::new();
    fixture
        .registry
        .register_collection(
            CollectionSchema::edges("Follows")
                .with_property("waitForSync", json!(true))
                .with_property("journalSize", json!(1048576)),
        )
        .unwrap();
    fixture
        .session
        .route("POST", &fixture.url("collection"), 200, created("Follows", 3));
    let mut db = fixture.database();

    let collection = db
        .create_collection(
            "Follows",
            props(json!({"name": "ignored", "waitForSync": false})),
        )
        .unwrap();
    assert_eq!(collection.name(), "Follows");
    assert!(collection.is_edge());
    assert_eq!(collection.schema().unwrap().name, "Follows");

    let body = &fixture.session.bodies("POST", &fixture.url("collection"))[0];
    assert_eq!(
        body,
        &json!({
            "name": "Follows",
            "waitForSync": false,
            "journalSize": 1048576,
            "type": 3,
        })
    );
}

#[test]
fn test_unknown_type_fails_without_request() {
    let fixture = TestFixture::new();
    let mut db = fixture.database();
    let before = fixture.session.request_count();

    let err = db.create_collection("Robots", Map::new()).unwrap_err();
    assert!(matches!(err, Error::Validation(ref m) if m.contains("Robots")));
    assert_eq!(fixture.session.request_count(), before);
}

#[test]
fn test_server_rejection_is_creation_error() {
    let fixture = TestFixture::new();
    let payload = json!({
        "error": true,
        "code": 409,
        "errorNum": 1207,
        "errorMessage": "duplicate name"
    });
    fixture
        .session
        .route("POST", &fixture.url("collection"), 409, payload.clone());
    let mut db = fixture.database();

    let err = db
        .create_collection("Collection", props(json!({"name": "taken"})))
        .unwrap_err();
    assert!(matches!(err, Error::Creation { .. }));
    assert_eq!(err.message(), "duplicate name");
    assert_eq!(err.payload(), Some(&payload));
    assert!(!db.has_collection("taken"));
}

#[test]
fn test_error_flag_with_200_is_creation_error() {
    let fixture = TestFixture::new();
    fixture.session.route(
        "POST",
        &fixture.url("collection"),
        200,
        json!({"error": true, "errorMessage": "illegal name"}),
    );
    let mut db = fixture.database();

    let err = db
        .create_collection("Collection", props(json!({"name": "bad name"})))
        .unwrap_err();
    assert_eq!(err.message(), "illegal name");
}
