// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! AQL query cursors
//!
//! An [`AqlQuery`] is built without touching the network. The first call that
//! needs results posts the query to `/cursor`; further batches are pulled with
//! `PUT /cursor/{id}` while the server reports `hasMore`.

use crate::collection::Document;
use crate::database::DbScope;
use crate::error::{has_error_flag, server_message, Error, Result};
use serde_json::{json, Map, Value};

/// Request settings for an AQL cursor
#[derive(Debug, Clone, PartialEq)]
pub struct AqlQueryOptions {
    /// Results per batch
    pub batch_size: usize,
    /// Keep results as plain JSON instead of wrapping documents
    pub raw_results: bool,
    pub bind_vars: Map<String, Value>,
    /// Cursor `options` member, passed through
    pub options: Map<String, Value>,
    /// Ask the server for the total result count
    pub count: bool,
    /// Ask for the count ignoring the last top-level LIMIT
    pub full_count: bool,
    /// Additional top-level request members such as `ttl`
    pub extra: Map<String, Value>,
}

impl Default for AqlQueryOptions {
    fn default() -> Self {
        Self {
            batch_size: 100,
            raw_results: false,
            bind_vars: Map::new(),
            options: Map::new(),
            count: false,
            full_count: false,
            extra: Map::new(),
        }
    }
}

impl AqlQueryOptions {
    pub fn batch_size(mut self, n: usize) -> Self {
        self.batch_size = n;
        self
    }

    pub fn raw_results(mut self, raw: bool) -> Self {
        self.raw_results = raw;
        self
    }

    pub fn bind_var(mut self, name: &str, value: Value) -> Self {
        self.bind_vars.insert(name.to_string(), value);
        self
    }

    pub fn option(mut self, name: &str, value: Value) -> Self {
        self.options.insert(name.to_string(), value);
        self
    }

    pub fn count(mut self, count: bool) -> Self {
        self.count = count;
        self
    }

    pub fn full_count(mut self, full_count: bool) -> Self {
        self.full_count = full_count;
        self
    }

    pub fn extra(mut self, name: &str, value: Value) -> Self {
        self.extra.insert(name.to_string(), value);
        self
    }
}

/// One result item
#[derive(Debug, Clone, PartialEq)]
pub enum QueryRow {
    Raw(Value),
    Document(Document),
}

impl QueryRow {
    pub fn as_document(&self) -> Option<&Document> {
        match self {
            QueryRow::Document(doc) => Some(doc),
            QueryRow::Raw(_) => None,
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            QueryRow::Raw(value) => value.clone(),
            QueryRow::Document(doc) => doc.to_json(),
        }
    }
}

#[derive(Debug)]
pub struct AqlQuery {
    scope: DbScope,
    query: String,
    options: AqlQueryOptions,
    executed: bool,
    cursor_id: Option<String>,
    has_more: bool,
    rows: Vec<QueryRow>,
    count: Option<u64>,
    full_count: Option<u64>,
}

impl AqlQuery {
    pub(crate) fn new(scope: DbScope, query: &str, options: AqlQueryOptions) -> Self {
        Self {
            scope,
            query: query.to_string(),
            options,
            executed: false,
            cursor_id: None,
            has_more: false,
            rows: Vec::new(),
            count: None,
            full_count: None,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn options(&self) -> &AqlQueryOptions {
        &self.options
    }

    pub fn is_executed(&self) -> bool {
        self.executed
    }

    /// True while the server holds further batches
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Executed and no batch left on the server
    pub fn is_exhausted(&self) -> bool {
        self.executed && !self.has_more
    }

    /// Body posted to `/cursor`
    pub fn payload(&self) -> Value {
        let mut options = self.options.options.clone();
        if self.options.full_count {
            options.insert("fullCount".to_string(), Value::Bool(true));
        }

        let mut payload = self.options.extra.clone();
        payload.insert("query".to_string(), json!(self.query));
        payload.insert("batchSize".to_string(), json!(self.options.batch_size));
        payload.insert(
            "bindVars".to_string(),
            Value::Object(self.options.bind_vars.clone()),
        );
        payload.insert("options".to_string(), Value::Object(options));
        payload.insert("count".to_string(), json!(self.options.count));
        Value::Object(payload)
    }

    /// Send the query unless already sent
    pub fn execute(&mut self) -> Result<()> {
        if self.executed {
            return Ok(());
        }

        let response = self
            .scope
            .session()
            .post(&self.scope.url("cursor"), &self.payload())?;
        self.absorb(response.status, response.body, 201)?;
        self.executed = true;
        Ok(())
    }

    /// The current batch, executing the query first if needed
    pub fn rows(&mut self) -> Result<&[QueryRow]> {
        self.execute()?;
        Ok(&self.rows)
    }

    /// Replace the current batch with the next one
    ///
    /// Returns `false` once the cursor is exhausted.
    pub fn next_batch(&mut self) -> Result<bool> {
        if !self.executed {
            self.execute()?;
            return Ok(true);
        }
        if !self.has_more {
            return Ok(false);
        }
        let Some(id) = self.cursor_id.clone() else {
            return Ok(false);
        };

        let url = self.scope.url(&format!("cursor/{}", id));
        let response = self.scope.session().put(&url, &json!({}))?;
        self.absorb(response.status, response.body, 200)?;
        Ok(true)
    }

    /// Drain every batch
    pub fn collect_all(&mut self) -> Result<Vec<QueryRow>> {
        self.execute()?;
        let mut all = std::mem::take(&mut self.rows);
        while self.next_batch()? {
            all.append(&mut self.rows);
        }
        Ok(all)
    }

    /// Total result count; only present when requested with `count`
    pub fn count(&mut self) -> Result<Option<u64>> {
        self.execute()?;
        Ok(self.count)
    }

    /// Count ignoring the last LIMIT; only present when requested with `full_count`
    pub fn full_count(&mut self) -> Result<Option<u64>> {
        self.execute()?;
        Ok(self.full_count)
    }

    fn absorb(&mut self, status: u16, body: Value, expected: u16) -> Result<()> {
        if status != expected || has_error_flag(&body) {
            return Err(Error::Query {
                message: server_message(status, &body),
                query: self.query.clone(),
                payload: body,
            });
        }

        self.has_more = body.get("hasMore").and_then(Value::as_bool).unwrap_or(false);
        if let Some(id) = body.get("id").and_then(Value::as_str) {
            self.cursor_id = Some(id.to_string());
        }
        if let Some(count) = body.get("count").and_then(Value::as_u64) {
            self.count = Some(count);
        }
        if let Some(full) = body
            .pointer("/extra/stats/fullCount")
            .and_then(Value::as_u64)
        {
            self.full_count = Some(full);
        }

        let raw = self.options.raw_results;
        self.rows = match body.get("result") {
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| to_row(item.clone(), raw))
                .collect(),
            _ => Vec::new(),
        };
        Ok(())
    }
}

fn to_row(item: Value, raw: bool) -> QueryRow {
    if raw {
        return QueryRow::Raw(item);
    }
    match Document::from_json(item.clone()) {
        Some(doc) => QueryRow::Document(doc),
        None => QueryRow::Raw(item),
    }
}
