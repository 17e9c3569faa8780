// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Collection and graph type declarations

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Wire value of `type` for document collections
pub const COLLECTION_DOCUMENT_TYPE: u64 = 2;
/// Wire value of `type` for edge collections
pub const COLLECTION_EDGE_TYPE: u64 = 3;
/// Names starting with this prefix belong to system collections
pub const SYSTEM_PREFIX: &str = "_";

/// Storage kind of a collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CollectionKind {
    Document,
    Edge,
}

impl CollectionKind {
    pub fn wire_type(self) -> u64 {
        match self {
            CollectionKind::Document => COLLECTION_DOCUMENT_TYPE,
            CollectionKind::Edge => COLLECTION_EDGE_TYPE,
        }
    }

    /// `None` for type codes this client does not know about
    pub fn from_wire(code: u64) -> Option<Self> {
        match code {
            COLLECTION_DOCUMENT_TYPE => Some(CollectionKind::Document),
            COLLECTION_EDGE_TYPE => Some(CollectionKind::Edge),
            _ => None,
        }
    }
}

/// A registered collection type
///
/// The type name doubles as the collection name: creating a collection of a
/// registered type always creates the collection of that name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionSchema {
    pub name: String,
    pub kind: CollectionKind,
    /// Default creation properties (`waitForSync`, `keyOptions`, ...)
    #[serde(default)]
    pub properties: Map<String, Value>,
}

impl CollectionSchema {
    pub fn new(name: &str, kind: CollectionKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            properties: Map::new(),
        }
    }

    pub fn document(name: &str) -> Self {
        Self::new(name, CollectionKind::Document)
    }

    pub fn edges(name: &str) -> Self {
        Self::new(name, CollectionKind::Edge)
    }

    pub fn with_property(mut self, key: &str, value: Value) -> Self {
        self.properties.insert(key.to_string(), value);
        self
    }
}

/// One edge collection and the vertex collections it may connect
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeDefinition {
    #[serde(rename = "collection")]
    pub edges_collection: String,
    #[serde(rename = "from")]
    pub from_collections: Vec<String>,
    #[serde(rename = "to")]
    pub to_collections: Vec<String>,
}

impl EdgeDefinition {
    pub fn new(edges_collection: &str, from: &[&str], to: &[&str]) -> Self {
        Self {
            edges_collection: edges_collection.to_string(),
            from_collections: from.iter().map(|s| s.to_string()).collect(),
            to_collections: to.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Wire form: `{"collection": .., "from": [..], "to": [..]}`
    pub fn to_json(&self) -> Value {
        serde_json::json!({
            "collection": self.edges_collection,
            "from": self.from_collections,
            "to": self.to_collections,
        })
    }

    /// Every collection this definition references, edge collection first
    pub fn referenced_collections(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.edges_collection.as_str())
            .chain(self.from_collections.iter().map(String::as_str))
            .chain(self.to_collections.iter().map(String::as_str))
    }
}

/// A registered graph type; its name is the graph's name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphSchema {
    pub name: String,
    #[serde(default)]
    pub edge_definitions: Vec<EdgeDefinition>,
    #[serde(default)]
    pub orphan_collections: Vec<String>,
}

impl GraphSchema {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            edge_definitions: Vec::new(),
            orphan_collections: Vec::new(),
        }
    }

    pub fn with_edge_definition(mut self, definition: EdgeDefinition) -> Self {
        self.edge_definitions.push(definition);
        self
    }

    pub fn with_orphan_collection(mut self, name: &str) -> Self {
        self.orphan_collections.push(name.to_string());
        self
    }
}
