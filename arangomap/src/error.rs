// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Error types for ArangoMap
//!
//! Server-sourced errors carry the server's `errorMessage` unmodified along
//! with the decoded response body.

use serde_json::Value;
use thiserror::Error;

/// Result type alias for ArangoMap operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for ArangoMap operations
#[derive(Error, Debug)]
pub enum Error {
    /// Refreshing the collection or graph listing failed
    #[error("Update error: {message}")]
    Update { message: String, payload: Value },

    /// Creating a collection or graph failed
    #[error("Creation error: {message}")]
    Creation { message: String, payload: Value },

    /// AQL validation or execution failed
    #[error("Query error: {message} (query: {query})")]
    Query {
        message: String,
        query: String,
        payload: Value,
    },

    /// Server-side transaction failed
    #[error("Transaction error: {message}")]
    Transaction {
        message: String,
        action: String,
        payload: Value,
    },

    /// Dropping a collection or graph failed
    #[error("Deletion error: {message}")]
    Deletion { message: String, payload: Value },

    /// Fetching a document failed
    #[error("Document error: {message}")]
    Document { message: String, payload: Value },

    /// Resource not found errors
    #[error("Not found: {0}")]
    NotFound(String),

    /// Local validation errors, raised before any request is sent
    #[error("Validation error: {0}")]
    Validation(String),

    /// Transport errors
    #[error("Connection error: {0}")]
    Connection(String),

    /// The server answered with something that is not JSON
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Creation error raised locally, with no server payload
    pub(crate) fn creation(message: impl Into<String>) -> Self {
        Error::Creation {
            message: message.into(),
            payload: Value::Null,
        }
    }

    /// The message as reported by the server (or the local reason)
    pub fn message(&self) -> String {
        match self {
            Error::Update { message, .. }
            | Error::Creation { message, .. }
            | Error::Query { message, .. }
            | Error::Transaction { message, .. }
            | Error::Deletion { message, .. }
            | Error::Document { message, .. } => message.clone(),
            Error::NotFound(m)
            | Error::Validation(m)
            | Error::Connection(m)
            | Error::InvalidResponse(m) => m.clone(),
            Error::Serialization(e) => e.to_string(),
        }
    }

    /// The decoded response body that caused the error, if any
    pub fn payload(&self) -> Option<&Value> {
        match self {
            Error::Update { payload, .. }
            | Error::Creation { payload, .. }
            | Error::Query { payload, .. }
            | Error::Transaction { payload, .. }
            | Error::Deletion { payload, .. }
            | Error::Document { payload, .. } => Some(payload),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::Connection(format!("request timed out: {}", err))
        } else if err.is_connect() {
            Error::Connection(format!("connection failed: {}", err))
        } else {
            Error::Connection(err.to_string())
        }
    }
}

/// Extract the server's `errorMessage`, falling back to the HTTP status
pub(crate) fn server_message(status: u16, body: &Value) -> String {
    body.get("errorMessage")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP {}", status))
}

/// True when the body carries `"error": true`
pub(crate) fn has_error_flag(body: &Value) -> bool {
    body.get("error").and_then(Value::as_bool).unwrap_or(false)
}
