// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Server connection
//!
//! A [`Connection`] bundles the endpoint URL, the HTTP [`Session`], the type
//! registry used to build handles and the progress reporter. Databases are
//! opened from it, either eagerly ([`Connection::database`]) or lazily
//! ([`Connection::db_handle`]).

pub mod progress;
pub mod session;

pub use progress::{LogReporter, ProgressReporter};
pub use session::{HttpResponse, HttpSession, Session};

use crate::config::ConnectionConfig;
use crate::database::{Database, DbHandle};
use crate::error::Result;
use crate::schema::SchemaRegistry;
use std::fmt;
use std::sync::Arc;

pub struct Connection {
    endpoint_url: String,
    session: Arc<dyn Session>,
    registry: Arc<SchemaRegistry>,
    reporter: Arc<dyn ProgressReporter>,
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("endpoint_url", &self.endpoint_url)
            .finish()
    }
}

impl Connection {
    /// Connect over HTTP using `config`
    ///
    /// No request is sent until a database is used.
    pub fn new(config: ConnectionConfig) -> Result<Self> {
        let session = HttpSession::new(&config)?;
        Ok(Self::with_session(&config.url, Arc::new(session)))
    }

    /// Build a connection over an existing session
    ///
    /// Uses the process-wide registry and a [`LogReporter`].
    pub fn with_session(endpoint_url: &str, session: Arc<dyn Session>) -> Self {
        Self {
            endpoint_url: endpoint_url.trim_end_matches('/').to_string(),
            session,
            registry: SchemaRegistry::global(),
            reporter: Arc::new(LogReporter::new()),
        }
    }

    pub fn with_registry(mut self, registry: Arc<SchemaRegistry>) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn endpoint_url(&self) -> &str {
        &self.endpoint_url
    }

    pub fn session(&self) -> &dyn Session {
        self.session.as_ref()
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    pub fn report_start(&self, label: &str) {
        self.reporter.start(label);
    }

    pub fn report_item(&self) {
        self.reporter.item();
    }

    /// Open a database, loading its collections and graphs right away
    pub fn database(self: &Arc<Self>, name: &str) -> Result<Database> {
        Database::new(self.clone(), name)
    }

    /// Open a database lazily; nothing is loaded until first use
    pub fn db_handle(self: &Arc<Self>, name: &str) -> DbHandle {
        DbHandle::new(self.clone(), name)
    }
}
