// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Lazily loaded database
//!
//! Opening a [`Database`] lists its collections and graphs immediately. A
//! [`DbHandle`] only remembers the connection and the name; the first
//! operation that needs the database loads it, exactly as
//! [`Database::new`] would, and every later call goes straight to the loaded
//! database.

use super::{Database, GraphOptions, TransactionCollections, TransactionOptions};
use crate::collection::{Collection, Document};
use crate::connection::Connection;
use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::query::{AqlQuery, AqlQueryOptions};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

enum State {
    Unloaded {
        connection: Arc<Connection>,
        name: String,
    },
    Loaded(Box<Database>),
}

pub struct DbHandle {
    state: State,
}

impl DbHandle {
    pub fn new(connection: Arc<Connection>, name: &str) -> Self {
        Self {
            state: State::Unloaded {
                connection,
                name: name.to_string(),
            },
        }
    }

    pub fn name(&self) -> &str {
        match &self.state {
            State::Unloaded { name, .. } => name.as_str(),
            State::Loaded(database) => database.name(),
        }
    }

    pub fn connection(&self) -> &Arc<Connection> {
        match &self.state {
            State::Unloaded { connection, .. } => connection,
            State::Loaded(database) => database.connection(),
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.state, State::Loaded(_))
    }

    /// The loaded database, loading it on first call
    ///
    /// A failed load leaves the handle unloaded so the next call retries.
    pub fn load(&mut self) -> Result<&mut Database> {
        if let State::Unloaded { connection, name } = &self.state {
            log::debug!("Loading database {} on first use", name);
            let database = Database::new(connection.clone(), name)?;
            self.state = State::Loaded(Box::new(database));
        }

        match &mut self.state {
            State::Loaded(database) => Ok(database.as_mut()),
            State::Unloaded { name, .. } => {
                Err(Error::NotFound(format!("database {} is not loaded", name)))
            }
        }
    }

    /// Consume the handle, loading the database if needed
    pub fn into_database(mut self) -> Result<Database> {
        self.load()?;
        match self.state {
            State::Loaded(database) => Ok(*database),
            State::Unloaded { name, .. } => {
                Err(Error::NotFound(format!("database {} is not loaded", name)))
            }
        }
    }

    pub fn reload(&mut self) -> Result<()> {
        self.load()?.reload()
    }

    pub fn reload_collections(&mut self) -> Result<()> {
        self.load()?.reload_collections()
    }

    pub fn reload_graphs(&mut self) -> Result<()> {
        self.load()?.reload_graphs()
    }

    pub fn collections(&mut self) -> Result<&HashMap<String, Collection>> {
        Ok(self.load()?.collections())
    }

    pub fn graphs(&mut self) -> Result<&HashMap<String, Graph>> {
        Ok(self.load()?.graphs())
    }

    pub fn has_collection(&mut self, name: &str) -> Result<bool> {
        Ok(self.load()?.has_collection(name))
    }

    pub fn has_graph(&mut self, name: &str) -> Result<bool> {
        Ok(self.load()?.has_graph(name))
    }

    pub fn create_collection(
        &mut self,
        type_name: &str,
        properties: Map<String, Value>,
    ) -> Result<&Collection> {
        self.load()?.create_collection(type_name, properties)
    }

    pub fn create_graph(&mut self, name: &str, options: GraphOptions) -> Result<&Graph> {
        self.load()?.create_graph(name, options)
    }

    pub fn drop_all_collections(&mut self) -> Result<()> {
        self.load()?.drop_all_collections()
    }

    pub fn aql_query(&mut self, query: &str, options: AqlQueryOptions) -> Result<AqlQuery> {
        Ok(self.load()?.aql_query(query, options))
    }

    pub fn explain_aql_query(
        &mut self,
        query: &str,
        bind_vars: Map<String, Value>,
        all_plans: bool,
    ) -> Result<Value> {
        self.load()?.explain_aql_query(query, bind_vars, all_plans)
    }

    pub fn validate_aql_query(
        &mut self,
        query: &str,
        bind_vars: Option<Map<String, Value>>,
        options: Option<Map<String, Value>>,
    ) -> Result<Value> {
        self.load()?.validate_aql_query(query, bind_vars, options)
    }

    pub fn transaction(
        &mut self,
        collections: &TransactionCollections,
        action: &str,
        options: TransactionOptions,
    ) -> Result<Value> {
        self.load()?.transaction(collections, action, options)
    }

    pub fn collection(&mut self, name: &str) -> Result<&Collection> {
        self.load()?.collection(name)
    }

    pub fn fetch_document(&mut self, id: &str) -> Result<Document> {
        self.load()?.fetch_document(id)
    }
}

impl fmt::Display for DbHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ArangoDB database: {}", self.name())
    }
}

impl fmt::Debug for DbHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbHandle")
            .field("name", &self.name())
            .field("loaded", &self.is_loaded())
            .finish()
    }
}
