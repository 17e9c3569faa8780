// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! ArangoMap - object mapping over the ArangoDB HTTP API
//!
//! Databases, collections, graphs and AQL cursors are local objects whose
//! methods issue REST calls and turn the JSON answers into typed handles or
//! typed errors.
//!
//! # Quick Start
//!
//! ```no_run
//! use arangomap::{Connection, ConnectionConfig, AqlQueryOptions};
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), arangomap::Error> {
//! let conn = Arc::new(Connection::new(ConnectionConfig::from_env())?);
//! let mut db = conn.database("_system")?;
//!
//! let mut props = serde_json::Map::new();
//! props.insert("name".into(), "people".into());
//! db.create_collection("Collection", props)?;
//!
//! let mut cursor = db.aql_query("FOR p IN people RETURN p", AqlQueryOptions::default());
//! for row in cursor.collect_all()? {
//!     println!("{:?}", row);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`connection`] - HTTP session, progress reporting, entry point
//! - [`database`] - Database facade and its lazy handle
//! - [`schema`] - Registered collection and graph types
//! - [`collection`] - Collection and document handles
//! - [`graph`] - Graph handles
//! - [`query`] - AQL cursors
//! - [`error`] - Error types

pub mod collection;
pub mod config;
pub mod connection;
pub mod database;
pub mod error;
pub mod graph;
pub mod query;
pub mod schema;

pub use collection::{Collection, Document};
pub use config::ConnectionConfig;
pub use connection::{Connection, HttpResponse, HttpSession, LogReporter, ProgressReporter, Session};
pub use database::{
    Database, DbHandle, GraphOptions, TransactionCollections, TransactionOptions,
};
pub use error::{Error, Result};
pub use graph::Graph;
pub use query::{AqlQuery, AqlQueryOptions, QueryRow};
pub use schema::{CollectionKind, CollectionSchema, EdgeDefinition, GraphSchema, SchemaRegistry};

/// ArangoMap version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
