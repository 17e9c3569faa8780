// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Per-database API addressing shared by every handle of one database

use crate::connection::{Connection, Session};
use std::sync::Arc;

/// Connection plus database name; resolves `/_db/{name}/_api` URLs
#[derive(Debug, Clone)]
pub struct DbScope {
    connection: Arc<Connection>,
    database: String,
}

impl DbScope {
    pub fn new(connection: Arc<Connection>, database: &str) -> Self {
        Self {
            connection,
            database: database.to_string(),
        }
    }

    pub fn connection(&self) -> &Arc<Connection> {
        &self.connection
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    pub fn session(&self) -> &dyn Session {
        self.connection.session()
    }

    /// `{endpoint}/_db/{database}/_api`
    pub fn api_url(&self) -> String {
        format!(
            "{}/_db/{}/_api",
            self.connection.endpoint_url(),
            self.database
        )
    }

    /// `{api_url}/{path}`
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.api_url(), path.trim_start_matches('/'))
    }
}
