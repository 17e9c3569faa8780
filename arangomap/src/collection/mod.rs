// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Collection handles
//!
//! A [`Collection`] is the local view of one server collection: its kind,
//! whether it is a system collection, the registered type it was built from
//! (if any) and the descriptor the server returned.

pub mod document;

pub use document::Document;

use document::is_valid_key;

use crate::database::DbScope;
use crate::error::{has_error_flag, server_message, Error, Result};
use crate::schema::{CollectionKind, CollectionSchema};
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Collection {
    name: String,
    kind: CollectionKind,
    system: bool,
    schema: Option<Arc<CollectionSchema>>,
    info: Value,
    scope: DbScope,
}

impl Collection {
    pub(crate) fn new(
        scope: DbScope,
        name: &str,
        kind: CollectionKind,
        system: bool,
        schema: Option<Arc<CollectionSchema>>,
        info: Value,
    ) -> Self {
        Self {
            name: name.to_string(),
            kind,
            system,
            schema,
            info,
            scope,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> CollectionKind {
        self.kind
    }

    pub fn is_system(&self) -> bool {
        self.system
    }

    pub fn is_edge(&self) -> bool {
        self.kind == CollectionKind::Edge
    }

    /// Registered type this handle was built from; `None` for generic handles
    pub fn schema(&self) -> Option<&Arc<CollectionSchema>> {
        self.schema.as_ref()
    }

    /// Descriptor as returned by the server
    pub fn info(&self) -> &Value {
        &self.info
    }

    pub fn database(&self) -> &str {
        self.scope.database()
    }

    pub fn url(&self) -> String {
        self.scope.url(&format!("collection/{}", self.name))
    }

    /// Drop the collection on the server
    pub fn delete(&self) -> Result<()> {
        let response = self.scope.session().delete(&self.url())?;
        if response.status == 200 && !has_error_flag(&response.body) {
            log::debug!("Dropped collection {}", self.name);
            Ok(())
        } else {
            Err(Error::Deletion {
                message: server_message(response.status, &response.body),
                payload: response.body,
            })
        }
    }

    /// Fetch a document of this collection by key
    pub fn fetch_document(&self, key: &str) -> Result<Document> {
        if !is_valid_key(key) {
            return Err(Error::Validation(format!(
                "'{}' is not a document key of collection '{}'",
                key, self.name
            )));
        }
        let url = self.scope.url(&format!("document/{}/{}", self.name, key));
        let response = self.scope.session().get(&url)?;
        match response.status {
            200 | 304 => Document::from_json(response.body).ok_or_else(|| {
                Error::InvalidResponse(format!("'{}/{}' is not a document", self.name, key))
            }),
            404 => Err(Error::NotFound(format!(
                "no document '{}' in collection '{}'",
                key, self.name
            ))),
            status => Err(Error::Document {
                message: server_message(status, &response.body),
                payload: response.body,
            }),
        }
    }
}
