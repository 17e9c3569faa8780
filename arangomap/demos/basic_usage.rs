//! Basic usage example for ArangoMap
//!
//! Walks through the main operations against a running ArangoDB server:
//! - Registering collection and graph types
//! - Opening a database lazily
//! - Creating collections and a graph
//! - Running AQL and a server-side transaction
//! - Dropping everything again
//!
//! The server is taken from ARANGO_URL / ARANGO_USERNAME / ARANGO_PASSWORD.
//!
//! Run with: cargo run --example basic_usage

use arangomap::{
    AqlQueryOptions, CollectionSchema, Connection, ConnectionConfig, EdgeDefinition, Error,
    GraphOptions, GraphSchema, SchemaRegistry, TransactionCollections, TransactionOptions,
};
use serde_json::{json, Map};
use std::sync::Arc;

fn main() -> Result<(), Error> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    println!("=== ArangoMap Basic Usage Example ===\n");

    // 1. Register types
    println!("1. Registering types...");
    let registry = SchemaRegistry::global();
    registry.register_collection(
        CollectionSchema::document("Humans").with_property("waitForSync", json!(true)),
    )?;
    registry.register_collection(CollectionSchema::edges("Friendships"))?;
    registry.register_graph(GraphSchema::new("FriendGraph").with_edge_definition(
        EdgeDefinition::new("Friendships", &["Humans"], &["Humans"]),
    ));
    println!("   ✓ Humans, Friendships, FriendGraph\n");

    // 2. Connect; nothing is loaded until first use
    println!("2. Connecting...");
    let config = ConnectionConfig::from_env();
    let connection = Arc::new(Connection::new(config)?);
    let mut db = connection.db_handle("_system");
    println!("   ✓ {} (loaded: {})\n", db, db.is_loaded());

    // 3. Collections and graph
    println!("3. Creating collections and graph...");
    db.create_collection("Humans", Map::new())?;
    db.create_collection("Friendships", Map::new())?;
    let mut scratch = Map::new();
    scratch.insert("name".to_string(), json!("scratch"));
    db.create_collection("Collection", scratch)?;
    db.create_graph("FriendGraph", GraphOptions::default())?;
    println!(
        "   ✓ {} collections, {} graphs\n",
        db.collections()?.len(),
        db.graphs()?.len()
    );

    // 4. AQL
    println!("4. Running AQL...");
    let mut insert = db.aql_query(
        "FOR n IN @names INSERT {name: n} INTO Humans",
        AqlQueryOptions::default().bind_var("names", json!(["Alice", "Bob", "Carol"])),
    )?;
    insert.execute()?;

    let mut cursor = db.aql_query(
        "FOR h IN Humans SORT h.name RETURN h",
        AqlQueryOptions::default().batch_size(2).count(true),
    )?;
    println!("   Found {:?} humans:", cursor.count()?);
    for row in cursor.collect_all()? {
        if let Some(doc) = row.as_document() {
            println!("   - {} {:?}", doc.id(), doc.get("name"));
        }
    }
    println!();

    // 5. Transaction
    println!("5. Running a transaction...");
    let result = db.transaction(
        &TransactionCollections::default().read("Humans"),
        "function () { return require('@arangodb').db.Humans.count(); }",
        TransactionOptions::default(),
    )?;
    println!("   ✓ Server answered {}\n", result["result"]);

    // 6. Cleanup
    println!("6. Dropping collections...");
    db.drop_all_collections()?;
    println!("   ✓ Done");

    Ok(())
}
