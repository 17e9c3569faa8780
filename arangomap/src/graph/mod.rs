// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Graph handles backed by the gharial API

use crate::database::DbScope;
use crate::error::{has_error_flag, server_message, Error, Result};
use crate::schema::{EdgeDefinition, GraphSchema};
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Graph {
    name: String,
    schema: Option<Arc<GraphSchema>>,
    info: Value,
    scope: DbScope,
}

impl Graph {
    pub(crate) fn new(
        scope: DbScope,
        name: &str,
        schema: Option<Arc<GraphSchema>>,
        info: Value,
    ) -> Self {
        Self {
            name: name.to_string(),
            schema,
            info,
            scope,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Registered type this handle was built from; `None` for generic graphs
    pub fn schema(&self) -> Option<&Arc<GraphSchema>> {
        self.schema.as_ref()
    }

    /// Graph description as returned by the server
    pub fn info(&self) -> &Value {
        &self.info
    }

    /// Edge definitions reported by the server, or the registered ones when
    /// the description carries none
    pub fn edge_definitions(&self) -> Vec<EdgeDefinition> {
        self.info
            .get("edgeDefinitions")
            .and_then(|defs| serde_json::from_value(defs.clone()).ok())
            .or_else(|| self.schema.as_ref().map(|s| s.edge_definitions.clone()))
            .unwrap_or_default()
    }

    pub fn orphan_collections(&self) -> Vec<String> {
        self.info
            .get("orphanCollections")
            .and_then(|orphans| serde_json::from_value(orphans.clone()).ok())
            .or_else(|| self.schema.as_ref().map(|s| s.orphan_collections.clone()))
            .unwrap_or_default()
    }

    pub fn url(&self) -> String {
        self.scope.url(&format!("gharial/{}", self.name))
    }

    /// Drop the graph definition on the server; its collections are kept
    pub fn delete(&self) -> Result<()> {
        let response = self.scope.session().delete(&self.url())?;
        match response.status {
            200 | 201 | 202 if !has_error_flag(&response.body) => {
                log::debug!("Dropped graph {}", self.name);
                Ok(())
            }
            status => Err(Error::Deletion {
                message: server_message(status, &response.body),
                payload: response.body,
            }),
        }
    }
}
