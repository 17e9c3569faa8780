// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Database facade
//!
//! A [`Database`] is the local source of truth for which collections and
//! graphs exist in one server database, and the entry point for creating them,
//! running AQL and executing server-side transactions.
//!
//! Both registries are owned maps that a reload replaces wholesale. Operations
//! that change them take `&mut self`; share a database across threads only
//! behind the caller's own lock.

pub mod handle;
pub mod scope;

pub use handle::DbHandle;
pub use scope::DbScope;

use crate::collection::{document::split_id, Collection, Document};
use crate::connection::Connection;
use crate::error::{has_error_flag, server_message, Error, Result};
use crate::graph::Graph;
use crate::query::{AqlQuery, AqlQueryOptions};
use crate::schema::{CollectionKind, ResolvedCollection, SchemaRegistry, SYSTEM_PREFIX};
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Settings for [`Database::create_graph`]
#[derive(Debug, Clone, PartialEq)]
pub struct GraphOptions {
    /// Let the server create referenced collections that do not exist yet.
    /// When false, every referenced collection must already be known locally.
    pub create_collections: bool,
    pub is_smart: bool,
    pub number_of_shards: Option<u64>,
    pub smart_graph_attribute: Option<String>,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            create_collections: true,
            is_smart: false,
            number_of_shards: None,
            smart_graph_attribute: None,
        }
    }
}

/// Collections a server-side transaction declares up front
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TransactionCollections {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub read: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub write: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub exclusive: Vec<String>,
}

impl TransactionCollections {
    pub fn read(mut self, name: &str) -> Self {
        self.read.push(name.to_string());
        self
    }

    pub fn write(mut self, name: &str) -> Self {
        self.write.push(name.to_string());
        self
    }

    pub fn exclusive(mut self, name: &str) -> Self {
        self.exclusive.push(name.to_string());
        self
    }
}

/// Settings for [`Database::transaction`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionOptions {
    pub wait_for_sync: bool,
    /// Seconds to wait for collection locks
    pub lock_timeout: Option<u64>,
    /// Passed as the single argument of the action function
    pub params: Option<Value>,
}

pub struct Database {
    name: String,
    scope: DbScope,
    collections: HashMap<String, Collection>,
    graphs: HashMap<String, Graph>,
}

impl Database {
    /// Open `name` and load its collections and graphs
    pub fn new(connection: Arc<Connection>, name: &str) -> Result<Self> {
        let mut database = Self {
            name: name.to_string(),
            scope: DbScope::new(connection, name),
            collections: HashMap::new(),
            graphs: HashMap::new(),
        };
        database.reload()?;
        Ok(database)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn connection(&self) -> &Arc<Connection> {
        self.scope.connection()
    }

    fn registry(&self) -> &SchemaRegistry {
        self.scope.connection().registry()
    }

    pub fn url(&self) -> String {
        self.scope.api_url()
    }

    pub fn collections_url(&self) -> String {
        self.scope.url("collection")
    }

    pub fn cursors_url(&self) -> String {
        self.scope.url("cursor")
    }

    pub fn explain_url(&self) -> String {
        self.scope.url("explain")
    }

    pub fn graphs_url(&self) -> String {
        self.scope.url("gharial")
    }

    pub fn transaction_url(&self) -> String {
        self.scope.url("transaction")
    }

    pub fn collections(&self) -> &HashMap<String, Collection> {
        &self.collections
    }

    pub fn graphs(&self) -> &HashMap<String, Graph> {
        &self.graphs
    }

    pub fn collection_names(&self) -> impl Iterator<Item = &str> {
        self.collections.keys().map(String::as_str)
    }

    pub fn graph_names(&self) -> impl Iterator<Item = &str> {
        self.graphs.keys().map(String::as_str)
    }

    /// Local lookup, never reloads
    pub fn graph(&self, name: &str) -> Option<&Graph> {
        self.graphs.get(name)
    }

    pub fn has_collection(&self, name: &str) -> bool {
        self.collections.contains_key(name)
    }

    pub fn has_graph(&self, name: &str) -> bool {
        self.graphs.contains_key(name)
    }

    /// Replace the collection map with the server's listing
    pub fn reload_collections(&mut self) -> Result<()> {
        let response = self.scope.session().get(&self.collections_url())?;
        if response.status != 200 {
            return Err(Error::Update {
                message: server_message(response.status, &response.body),
                payload: response.body,
            });
        }

        let items = response
            .body
            .get("result")
            .and_then(Value::as_array)
            .ok_or_else(|| {
                Error::InvalidResponse("collection listing has no 'result' array".to_string())
            })?;

        let mut collections = HashMap::with_capacity(items.len());
        for item in items {
            let collection = self.classify_collection(item)?;
            collections.insert(collection.name().to_string(), collection);
        }

        log::debug!(
            "Loaded {} collections for database {}",
            collections.len(),
            self.name
        );
        self.collections = collections;
        Ok(())
    }

    fn classify_collection(&self, item: &Value) -> Result<Collection> {
        let name = item.get("name").and_then(Value::as_str).ok_or_else(|| {
            Error::InvalidResponse(format!("collection descriptor without name: {}", item))
        })?;
        let system = item.get("isSystem").and_then(Value::as_bool).unwrap_or(false);
        let wire_type = item.get("type").and_then(Value::as_u64);
        let wire_kind = wire_type.and_then(CollectionKind::from_wire);

        let (kind, schema) = if system {
            (wire_kind.unwrap_or(CollectionKind::Document), None)
        } else if let Some(schema) = self.registry().collection_schema(name) {
            (schema.kind, Some(schema))
        } else {
            match wire_kind {
                Some(kind) => (kind, None),
                None => {
                    log::warn!(
                        "Collection '{}' has unknown type {:?}, loading it as a document collection",
                        name,
                        wire_type
                    );
                    (CollectionKind::Document, None)
                }
            }
        };

        Ok(Collection::new(
            self.scope.clone(),
            name,
            kind,
            system,
            schema,
            item.clone(),
        ))
    }

    /// Replace the graph map with the server's listing
    pub fn reload_graphs(&mut self) -> Result<()> {
        let response = self.scope.session().get(&self.graphs_url())?;
        if response.status != 200 {
            return Err(Error::Update {
                message: server_message(response.status, &response.body),
                payload: response.body,
            });
        }

        let items = response
            .body
            .get("graphs")
            .and_then(Value::as_array)
            .ok_or_else(|| {
                Error::InvalidResponse("graph listing has no 'graphs' array".to_string())
            })?;

        let mut graphs = HashMap::with_capacity(items.len());
        for item in items {
            let name = item
                .get("_key")
                .or_else(|| item.get("name"))
                .and_then(Value::as_str)
                .ok_or_else(|| {
                    Error::InvalidResponse(format!("graph description without _key: {}", item))
                })?;
            let schema = self.registry().graph_schema(name);
            graphs.insert(
                name.to_string(),
                Graph::new(self.scope.clone(), name, schema, item.clone()),
            );
        }

        log::debug!("Loaded {} graphs for database {}", graphs.len(), self.name);
        self.graphs = graphs;
        Ok(())
    }

    /// Reload collections, then graphs
    pub fn reload(&mut self) -> Result<()> {
        self.reload_collections()?;
        self.reload_graphs()
    }

    /// Create a collection of a registered type, or a generic `Collection` /
    /// `Edges` one
    ///
    /// `properties` override the type's declared defaults. A registered type
    /// always creates the collection named after the type; generic types need
    /// a `name` property.
    pub fn create_collection(
        &mut self,
        type_name: &str,
        properties: Map<String, Value>,
    ) -> Result<&Collection> {
        let resolved = self.registry().resolve_collection(type_name)?;

        let mut payload = resolved.default_properties();
        payload.extend(properties);

        let name = match &resolved {
            ResolvedCollection::Named(schema) => {
                payload.insert("name".to_string(), json!(schema.name));
                schema.name.clone()
            }
            ResolvedCollection::Generic(_) => payload
                .get("name")
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or_else(|| {
                    Error::Validation(
                        "a 'name' property must be supplied to create a generic collection"
                            .to_string(),
                    )
                })?,
        };

        if self.collections.contains_key(&name) {
            return Err(Error::creation(format!(
                "Database {} already has a collection named {}",
                self.name, name
            )));
        }

        let kind = resolved.kind();
        payload.insert("type".to_string(), json!(kind.wire_type()));

        let response = self
            .scope
            .session()
            .post(&self.collections_url(), &Value::Object(payload))?;
        if response.status != 200 || has_error_flag(&response.body) {
            return Err(Error::Creation {
                message: server_message(response.status, &response.body),
                payload: response.body,
            });
        }

        let created_name = response
            .body
            .get("name")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or(name);
        let collection = Collection::new(
            self.scope.clone(),
            &created_name,
            kind,
            false,
            resolved.schema(),
            response.body,
        );
        log::info!("Created collection {} in database {}", created_name, self.name);

        self.collections.insert(created_name.clone(), collection);
        Ok(&self.collections[&created_name])
    }

    /// Create the registered graph type `name`
    ///
    /// Every collection the graph references must be a registered collection
    /// type, and edge definitions must point at registered edge types. These
    /// checks run before any request is sent.
    pub fn create_graph(&mut self, name: &str, options: GraphOptions) -> Result<&Graph> {
        let registry = self.registry();
        let schema = registry
            .graph_schema(name)
            .ok_or_else(|| Error::Validation(format!("'{}' is not a defined Graph", name)))?;

        let check_collections = |names: &[String]| -> Result<()> {
            match names.iter().find(|n| !registry.is_collection(n)) {
                Some(missing) => Err(Error::Validation(format!(
                    "'{}' is not a defined Collection",
                    missing
                ))),
                None => Ok(()),
            }
        };

        let mut edge_definitions = Vec::with_capacity(schema.edge_definitions.len());
        for definition in &schema.edge_definitions {
            if !registry.is_edge_collection(&definition.edges_collection) {
                return Err(Error::Validation(format!(
                    "'{}' is not a defined Edge Collection",
                    definition.edges_collection
                )));
            }
            check_collections(&definition.from_collections)?;
            check_collections(&definition.to_collections)?;
            edge_definitions.push(definition.to_json());
        }
        check_collections(&schema.orphan_collections)?;

        if !options.create_collections {
            let referenced = schema
                .edge_definitions
                .iter()
                .flat_map(|d| d.referenced_collections())
                .chain(schema.orphan_collections.iter().map(String::as_str));
            for collection in referenced {
                if !self.collections.contains_key(collection) {
                    return Err(Error::Validation(format!(
                        "'{}' does not exist in database {}",
                        collection, self.name
                    )));
                }
            }
        }

        let mut payload = json!({
            "name": name,
            "edgeDefinitions": edge_definitions,
            "orphanCollections": schema.orphan_collections,
        });
        if options.is_smart {
            payload["isSmart"] = json!(true);
        }
        let mut graph_options = Map::new();
        if let Some(shards) = options.number_of_shards {
            graph_options.insert("numberOfShards".to_string(), json!(shards));
        }
        if let Some(attribute) = options.smart_graph_attribute {
            graph_options.insert("smartGraphAttribute".to_string(), json!(attribute));
        }
        if !graph_options.is_empty() {
            payload["options"] = Value::Object(graph_options);
        }

        let response = self.scope.session().post(&self.graphs_url(), &payload)?;
        if !matches!(response.status, 201 | 202) {
            return Err(Error::Creation {
                message: server_message(response.status, &response.body),
                payload: response.body,
            });
        }

        let info = response.body.get("graph").cloned().unwrap_or(Value::Null);
        let graph = Graph::new(self.scope.clone(), name, Some(schema), info);
        log::info!("Created graph {} in database {}", name, self.name);

        self.graphs.insert(name.to_string(), graph);
        Ok(&self.graphs[name])
    }

    /// Drop every graph, then every non-system collection
    ///
    /// Dropped entries leave the local maps; nothing is reloaded.
    pub fn drop_all_collections(&mut self) -> Result<()> {
        let mut graph_names: Vec<String> = self.graphs.keys().cloned().collect();
        graph_names.sort();
        for name in graph_names {
            if let Some(graph) = self.graphs.get(&name) {
                graph.delete()?;
            }
            self.graphs.remove(&name);
        }

        let mut collection_names: Vec<String> = self
            .collections
            .keys()
            .filter(|name| !name.starts_with(SYSTEM_PREFIX))
            .cloned()
            .collect();
        collection_names.sort();
        for name in collection_names {
            if let Some(collection) = self.collections.get(&name) {
                collection.delete()?;
            }
            self.collections.remove(&name);
        }
        Ok(())
    }

    /// Build a cursor for `query`; nothing is sent until results are needed
    pub fn aql_query(&self, query: &str, options: AqlQueryOptions) -> AqlQuery {
        AqlQuery::new(self.scope.clone(), query, options)
    }

    /// Ask the server for the execution plan(s); the answer is returned as is
    pub fn explain_aql_query(
        &self,
        query: &str,
        bind_vars: Map<String, Value>,
        all_plans: bool,
    ) -> Result<Value> {
        let payload = json!({
            "query": query,
            "bindVars": bind_vars,
            "allPlans": all_plans,
        });
        let response = self.scope.session().post(&self.explain_url(), &payload)?;
        Ok(response.body)
    }

    /// Parse `query` on the server without running it
    pub fn validate_aql_query(
        &self,
        query: &str,
        bind_vars: Option<Map<String, Value>>,
        options: Option<Map<String, Value>>,
    ) -> Result<Value> {
        let payload = json!({
            "query": query,
            "bindVars": bind_vars.unwrap_or_default(),
            "options": options.unwrap_or_default(),
        });
        let response = self.scope.session().post(&self.cursors_url(), &payload)?;
        if response.status == 201 && !has_error_flag(&response.body) {
            Ok(response.body)
        } else {
            Err(Error::Query {
                message: server_message(response.status, &response.body),
                query: query.to_string(),
                payload: response.body,
            })
        }
    }

    /// Run `action` (a JavaScript function body) as a server-side transaction
    pub fn transaction(
        &self,
        collections: &TransactionCollections,
        action: &str,
        options: TransactionOptions,
    ) -> Result<Value> {
        let mut payload = json!({
            "collections": collections,
            "action": action,
            "waitForSync": options.wait_for_sync,
        });
        if let Some(timeout) = options.lock_timeout {
            payload["lockTimeout"] = json!(timeout);
        }
        if let Some(params) = options.params {
            payload["params"] = params;
        }

        let connection = self.scope.connection();
        connection.report_start(action);
        let response = self.scope.session().post(&self.transaction_url(), &payload)?;
        connection.report_item();

        if matches!(response.status, 200 | 201 | 202) && !has_error_flag(&response.body) {
            Ok(response.body)
        } else {
            Err(Error::Transaction {
                message: server_message(response.status, &response.body),
                action: action.to_string(),
                payload: response.body,
            })
        }
    }

    /// Collection by name, reloading once on a local miss
    pub fn collection(&mut self, name: &str) -> Result<&Collection> {
        if !self.collections.contains_key(name) {
            log::debug!(
                "Collection {} not known locally, reloading database {}",
                name,
                self.name
            );
            self.reload()?;
        }
        self.collections
            .get(name)
            .ok_or_else(|| Error::NotFound(format!("Can't find any collection named : {}", name)))
    }

    /// Fetch a document by its `collection/key` id
    pub fn fetch_document(&mut self, id: &str) -> Result<Document> {
        let (collection, key) = split_id(id).ok_or_else(|| {
            Error::Validation(format!("'{}' is not a document id (collection/key)", id))
        })?;
        self.collection(collection)?.fetch_document(key)
    }
}

impl fmt::Display for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ArangoDB database: {}", self.name)
    }
}

impl fmt::Debug for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Database")
            .field("name", &self.name)
            .field("collections", &self.collections.len())
            .field("graphs", &self.graphs.len())
            .finish()
    }
}
