// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! HTTP session abstraction
//!
//! Everything above this module talks to the server through the [`Session`]
//! trait: one blocking request in, a status code and a decoded JSON body out.
//! [`HttpSession`] is the production implementation over `reqwest`.

use crate::config::ConnectionConfig;
use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use reqwest::{Client, Method};
use serde_json::Value;

// Shared by every thread: pooled connections keep their background tasks on
// these workers, so any caller thread can reuse them. Requests are driven
// from synchronous code; must not be called from inside another runtime.
static HTTP_RUNTIME: Lazy<tokio::runtime::Runtime> = Lazy::new(|| {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .thread_name("arangomap-http")
        .enable_all()
        .build()
        .expect("Failed to create runtime for HTTP requests")
});

/// Status code and decoded body of one round trip
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    /// Decoded JSON body, `Value::Null` when the body was empty
    pub body: Value,
}

impl HttpResponse {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }
}

/// Blocking request/response transport
pub trait Session: Send + Sync {
    fn get(&self, url: &str) -> Result<HttpResponse>;

    fn post(&self, url: &str, body: &Value) -> Result<HttpResponse>;

    fn put(&self, url: &str, body: &Value) -> Result<HttpResponse>;

    fn delete(&self, url: &str) -> Result<HttpResponse>;
}

/// [`Session`] over a pooled `reqwest` client with basic auth
pub struct HttpSession {
    client: Client,
    username: String,
    password: String,
}

impl std::fmt::Debug for HttpSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpSession")
            .field("username", &self.username)
            .finish()
    }
}

impl HttpSession {
    pub fn new(config: &ConnectionConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .pool_max_idle_per_host(config.max_idle_per_host)
            .danger_accept_invalid_certs(!config.verify_certificates)
            .build()?;

        Ok(Self {
            client,
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }

    fn send(&self, method: Method, url: &str, body: Option<&Value>) -> Result<HttpResponse> {
        log::debug!("{} {}", method, url);

        let mut request = self
            .client
            .request(method, url)
            .basic_auth(&self.username, Some(&self.password));
        if let Some(body) = body {
            request = request.json(body);
        }

        HTTP_RUNTIME.block_on(async move {
            let response = request.send().await?;
            let status = response.status().as_u16();
            let text = response.text().await?;
            let body = decode_body(&text)?;
            Ok::<_, Error>(HttpResponse { status, body })
        })
    }
}

impl Session for HttpSession {
    fn get(&self, url: &str) -> Result<HttpResponse> {
        self.send(Method::GET, url, None)
    }

    fn post(&self, url: &str, body: &Value) -> Result<HttpResponse> {
        self.send(Method::POST, url, Some(body))
    }

    fn put(&self, url: &str, body: &Value) -> Result<HttpResponse> {
        self.send(Method::PUT, url, Some(body))
    }

    fn delete(&self, url: &str) -> Result<HttpResponse> {
        self.send(Method::DELETE, url, None)
    }
}

fn decode_body(text: &str) -> Result<Value> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(text).map_err(|e| {
        let preview: String = text.chars().take(120).collect();
        Error::InvalidResponse(format!("{} in body '{}'", e, preview))
    })
}
