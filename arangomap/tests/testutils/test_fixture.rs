//! Test fixture for ArangoMap integration tests
//!
//! Every fixture owns its own MockSession and SchemaRegistry, so tests never
//! share state through the process-wide registry.

use super::mock_session::MockSession;
use arangomap::{
    CollectionKind, CollectionSchema, Connection, Database, DbHandle, GraphSchema,
    ProgressReporter, SchemaRegistry,
};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub const ENDPOINT: &str = "http://arangodb.test:8529";
pub const DB_NAME: &str = "testdb";

/// Reporter that counts calls and remembers the last label
#[derive(Default)]
pub struct CountingReporter {
    pub started: AtomicUsize,
    pub items: AtomicUsize,
    pub last_label: parking_lot::Mutex<Option<String>>,
}

impl ProgressReporter for CountingReporter {
    fn start(&self, label: &str) {
        self.started.fetch_add(1, Ordering::SeqCst);
        *self.last_label.lock() = Some(label.to_string());
    }

    fn item(&self) {
        self.items.fetch_add(1, Ordering::SeqCst);
    }
}

pub struct TestFixture {
    pub session: Arc<MockSession>,
    pub registry: Arc<SchemaRegistry>,
    pub reporter: Arc<CountingReporter>,
    pub connection: Arc<Connection>,
}

impl TestFixture {
    /// Fixture whose database lists no collections and no graphs
    pub fn new() -> Self {
        let _ = env_logger::builder().is_test(true).try_init();

        let session = Arc::new(MockSession::new());
        let registry = Arc::new(SchemaRegistry::new());
        let reporter = Arc::new(CountingReporter::default());
        let connection = Arc::new(
            Connection::with_session(ENDPOINT, session.clone())
                .with_registry(registry.clone())
                .with_reporter(reporter.clone()),
        );

        let fixture = Self {
            session,
            registry,
            reporter,
            connection,
        };
        fixture.set_collections(vec![]);
        fixture.set_graphs(vec![]);
        fixture
    }

    /// Full URL of an API path in the test database
    pub fn url(&self, path: &str) -> String {
        format!("{}/_db/{}/_api/{}", ENDPOINT, DB_NAME, path)
    }

    /// Route the collection listing
    pub fn set_collections(&self, items: Vec<Value>) {
        self.session.route(
            "GET",
            &self.url("collection"),
            200,
            json!({"error": false, "code": 200, "result": items}),
        );
    }

    /// Route the graph listing
    pub fn set_graphs(&self, items: Vec<Value>) {
        self.session.route(
            "GET",
            &self.url("gharial"),
            200,
            json!({"error": false, "code": 200, "graphs": items}),
        );
    }

    pub fn register_collection(&self, name: &str, kind: CollectionKind) {
        self.registry
            .register_collection(CollectionSchema::new(name, kind))
            .expect("collection type should register");
    }

    pub fn register_graph(&self, schema: GraphSchema) {
        self.registry.register_graph(schema);
    }

    /// Open the test database eagerly
    pub fn database(&self) -> Database {
        self.connection
            .database(DB_NAME)
            .expect("database should load from the mock listings")
    }

    pub fn db_handle(&self) -> DbHandle {
        self.connection.db_handle(DB_NAME)
    }

    /// Number of full reloads seen so far (collection listings)
    pub fn listing_count(&self) -> usize {
        self.session.count("GET", &self.url("collection"))
    }

    pub fn started(&self) -> usize {
        self.reporter.started.load(Ordering::SeqCst)
    }

    pub fn items(&self) -> usize {
        self.reporter.items.load(Ordering::SeqCst)
    }
}

/// Collection descriptor as the listing endpoint returns it
pub fn collection_item(name: &str, wire_type: u64, is_system: bool) -> Value {
    json!({
        "id": format!("{}", 1000 + name.len()),
        "name": name,
        "status": 3,
        "type": wire_type,
        "isSystem": is_system,
        "globallyUniqueId": format!("h{}", name),
    })
}

/// Graph description as the gharial listing returns it
pub fn graph_item(name: &str, edge_definitions: Value) -> Value {
    json!({
        "_key": name,
        "_id": format!("_graphs/{}", name),
        "_rev": "_h1",
        "name": name,
        "edgeDefinitions": edge_definitions,
        "orphanCollections": [],
    })
}
