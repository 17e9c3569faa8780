// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Documents returned by the server

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// A stored document: the `_id`/`_key`/`_rev` privileged fields plus the
/// remaining attributes
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    collection: String,
    id: String,
    key: String,
    rev: Option<String>,
    store: Map<String, Value>,
}

impl Document {
    /// Build from a server JSON object. `None` unless it carries a
    /// well-formed `_id`.
    pub fn from_json(value: Value) -> Option<Self> {
        let Value::Object(mut store) = value else {
            return None;
        };

        let id = match store.remove("_id") {
            Some(Value::String(id)) => id,
            _ => return None,
        };
        let (collection, id_key) = id.split_once('/')?;
        let collection = collection.to_string();
        let key = match store.remove("_key") {
            Some(Value::String(key)) => key,
            _ => id_key.to_string(),
        };
        let rev = match store.remove("_rev") {
            Some(Value::String(rev)) => Some(rev),
            _ => None,
        };

        Some(Self {
            collection,
            id,
            key,
            rev,
            store,
        })
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn rev(&self) -> Option<&str> {
        self.rev.as_deref()
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.store.get(field)
    }

    /// Attributes other than the privileged ones
    pub fn store(&self) -> &Map<String, Value> {
        &self.store
    }

    /// Deserialize the attributes into `T`
    pub fn deserialize<T: DeserializeOwned>(&self) -> crate::Result<T> {
        Ok(serde_json::from_value(Value::Object(self.store.clone()))?)
    }

    /// Full JSON form, privileged fields included
    pub fn to_json(&self) -> Value {
        let mut object = self.store.clone();
        object.insert("_id".to_string(), Value::String(self.id.clone()));
        object.insert("_key".to_string(), Value::String(self.key.clone()));
        if let Some(rev) = &self.rev {
            object.insert("_rev".to_string(), Value::String(rev.clone()));
        }
        Value::Object(object)
    }
}

/// Split `"collection/key"`; exactly one separator, both parts non-empty
pub(crate) fn split_id(id: &str) -> Option<(&str, &str)> {
    match id.split_once('/') {
        Some((collection, key)) if !collection.is_empty() && is_valid_key(key) => {
            Some((collection, key))
        }
        _ => None,
    }
}

/// Keys are single path segments
pub(crate) fn is_valid_key(key: &str) -> bool {
    !key.is_empty() && !key.contains('/')
}
