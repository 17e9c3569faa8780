// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Connection configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default server endpoint
pub const DEFAULT_URL: &str = "http://127.0.0.1:8529";

/// Settings used to build an HTTP session against the server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Server endpoint, without a trailing slash
    pub url: String,

    /// Basic auth user
    pub username: String,

    /// Basic auth password
    pub password: String,

    /// Per-request timeout
    pub timeout: Duration,

    /// Reject invalid TLS certificates
    pub verify_certificates: bool,

    /// Idle connections kept per host
    pub max_idle_per_host: usize,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            username: "root".to_string(),
            password: String::new(),
            timeout: Duration::from_secs(60),
            verify_certificates: true,
            max_idle_per_host: 10,
        }
    }
}

impl ConnectionConfig {
    /// Defaults overridden by `ARANGO_URL`, `ARANGO_USERNAME`,
    /// `ARANGO_PASSWORD` and `ARANGO_TIMEOUT_SECS` when set
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("ARANGO_URL") {
            config = config.with_url(&url);
        }
        if let Ok(username) = std::env::var("ARANGO_USERNAME") {
            config.username = username;
        }
        if let Ok(password) = std::env::var("ARANGO_PASSWORD") {
            config.password = password;
        }
        if let Ok(secs) = std::env::var("ARANGO_TIMEOUT_SECS") {
            match secs.parse::<u64>() {
                Ok(secs) => config.timeout = Duration::from_secs(secs),
                Err(_) => log::warn!("Ignoring invalid ARANGO_TIMEOUT_SECS value '{}'", secs),
            }
        }

        config
    }

    pub fn with_url(mut self, url: &str) -> Self {
        self.url = url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_credentials(mut self, username: &str, password: &str) -> Self {
        self.username = username.to_string();
        self.password = password.to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_verify_certificates(mut self, verify: bool) -> Self {
        self.verify_certificates = verify;
        self
    }
}
