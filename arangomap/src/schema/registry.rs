// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Collection and graph type registry
//!
//! Maps a type name to the schema used to build and validate handles of that
//! type. Names that are not registered fall back to the generic handles: the
//! `Collection` and `Edges` collection types and the plain graph.

use super::types::{CollectionKind, CollectionSchema, GraphSchema};
use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;

/// Generic document collection type name
pub const GENERIC_COLLECTION: &str = "Collection";
/// Generic edge collection type name
pub const GENERIC_EDGES: &str = "Edges";
/// Reserved for system collections
pub const SYSTEM_COLLECTION: &str = "SystemCollection";

/// Process-wide registry used by connections that are not given their own
static GLOBAL_REGISTRY: Lazy<Arc<SchemaRegistry>> = Lazy::new(|| Arc::new(SchemaRegistry::new()));

/// Outcome of resolving a collection type name
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedCollection {
    /// A registered type; the collection name is the type name
    Named(Arc<CollectionSchema>),
    /// `Collection` or `Edges`; the caller supplies the name
    Generic(CollectionKind),
}

impl ResolvedCollection {
    pub fn kind(&self) -> CollectionKind {
        match self {
            ResolvedCollection::Named(schema) => schema.kind,
            ResolvedCollection::Generic(kind) => *kind,
        }
    }

    pub fn schema(&self) -> Option<Arc<CollectionSchema>> {
        match self {
            ResolvedCollection::Named(schema) => Some(schema.clone()),
            ResolvedCollection::Generic(_) => None,
        }
    }

    /// Declared creation defaults, empty for generic types
    pub fn default_properties(&self) -> Map<String, Value> {
        match self {
            ResolvedCollection::Named(schema) => schema.properties.clone(),
            ResolvedCollection::Generic(_) => Map::new(),
        }
    }
}

#[derive(Debug, Default)]
pub struct SchemaRegistry {
    collections: RwLock<HashMap<String, Arc<CollectionSchema>>>,
    graphs: RwLock<HashMap<String, Arc<GraphSchema>>>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The shared process-wide registry
    pub fn global() -> Arc<SchemaRegistry> {
        GLOBAL_REGISTRY.clone()
    }

    /// Register a collection type. Re-registering a name replaces it.
    pub fn register_collection(&self, schema: CollectionSchema) -> Result<()> {
        if is_reserved(&schema.name) {
            return Err(Error::Validation(format!(
                "'{}' is a reserved collection type name",
                schema.name
            )));
        }

        let name = schema.name.clone();
        let previous = self.collections.write().insert(name.clone(), Arc::new(schema));
        if previous.is_some() {
            log::warn!("Replaced collection type: {}", name);
        } else {
            log::info!("Registered collection type: {}", name);
        }
        Ok(())
    }

    /// Register a graph type. Re-registering a name replaces it.
    pub fn register_graph(&self, schema: GraphSchema) {
        let name = schema.name.clone();
        let previous = self.graphs.write().insert(name.clone(), Arc::new(schema));
        if previous.is_some() {
            log::warn!("Replaced graph type: {}", name);
        } else {
            log::info!("Registered graph type: {}", name);
        }
    }

    pub fn unregister_collection(&self, name: &str) -> Option<Arc<CollectionSchema>> {
        self.collections.write().remove(name)
    }

    pub fn unregister_graph(&self, name: &str) -> Option<Arc<GraphSchema>> {
        self.graphs.write().remove(name)
    }

    pub fn collection_schema(&self, name: &str) -> Option<Arc<CollectionSchema>> {
        self.collections.read().get(name).cloned()
    }

    pub fn graph_schema(&self, name: &str) -> Option<Arc<GraphSchema>> {
        self.graphs.read().get(name).cloned()
    }

    /// True if `name` is a registered collection type of any kind
    pub fn is_collection(&self, name: &str) -> bool {
        self.collections.read().contains_key(name)
    }

    /// True if `name` is a registered edge collection type
    pub fn is_edge_collection(&self, name: &str) -> bool {
        self.collections
            .read()
            .get(name)
            .map(|schema| schema.kind == CollectionKind::Edge)
            .unwrap_or(false)
    }

    /// Resolve a type name for collection creation
    pub fn resolve_collection(&self, type_name: &str) -> Result<ResolvedCollection> {
        match type_name {
            GENERIC_COLLECTION => Ok(ResolvedCollection::Generic(CollectionKind::Document)),
            GENERIC_EDGES => Ok(ResolvedCollection::Generic(CollectionKind::Edge)),
            _ => self
                .collection_schema(type_name)
                .map(ResolvedCollection::Named)
                .ok_or_else(|| {
                    Error::Validation(format!("'{}' is not a defined Collection", type_name))
                }),
        }
    }

    pub fn collection_type_names(&self) -> Vec<String> {
        self.collections.read().keys().cloned().collect()
    }

    pub fn graph_type_names(&self) -> Vec<String> {
        self.graphs.read().keys().cloned().collect()
    }
}

fn is_reserved(name: &str) -> bool {
    matches!(name, GENERIC_COLLECTION | GENERIC_EDGES | SYSTEM_COLLECTION)
}
