//! Scripted in-memory session
//!
//! Responses are keyed by method and full URL. Each key holds a queue: every
//! request pops the front response, except the last one which is kept and
//! served again. Unrouted requests get a 404 with an error body.

use arangomap::{HttpResponse, Result, Session};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: String,
    pub url: String,
    pub body: Option<Value>,
}

#[derive(Default)]
pub struct MockSession {
    routes: Mutex<HashMap<(String, String), VecDeque<HttpResponse>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace whatever is routed at `method url` with a single response
    pub fn route(&self, method: &str, url: &str, status: u16, body: Value) {
        let mut queue = VecDeque::new();
        queue.push_back(HttpResponse::new(status, body));
        self.routes
            .lock()
            .insert((method.to_string(), url.to_string()), queue);
    }

    /// Queue an additional response at `method url`
    pub fn push(&self, method: &str, url: &str, status: u16, body: Value) {
        self.routes
            .lock()
            .entry((method.to_string(), url.to_string()))
            .or_default()
            .push_back(HttpResponse::new(status, body));
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    /// Number of requests sent to `method url`
    pub fn count(&self, method: &str, url: &str) -> usize {
        self.requests
            .lock()
            .iter()
            .filter(|r| r.method == method && r.url == url)
            .count()
    }

    /// Bodies of every request sent to `method url`, oldest first
    pub fn bodies(&self, method: &str, url: &str) -> Vec<Value> {
        self.requests
            .lock()
            .iter()
            .filter(|r| r.method == method && r.url == url)
            .filter_map(|r| r.body.clone())
            .collect()
    }

    /// Number of requests of `method` whatever the URL
    pub fn count_method(&self, method: &str) -> usize {
        self.requests
            .lock()
            .iter()
            .filter(|r| r.method == method)
            .count()
    }

    fn respond(&self, method: &str, url: &str, body: Option<&Value>) -> Result<HttpResponse> {
        self.requests.lock().push(RecordedRequest {
            method: method.to_string(),
            url: url.to_string(),
            body: body.cloned(),
        });

        let mut routes = self.routes.lock();
        let response = match routes.get_mut(&(method.to_string(), url.to_string())) {
            Some(queue) if queue.len() > 1 => queue.pop_front(),
            Some(queue) => queue.front().cloned(),
            None => None,
        };

        Ok(response.unwrap_or_else(|| {
            HttpResponse::new(
                404,
                json!({
                    "error": true,
                    "code": 404,
                    "errorMessage": format!("no route for {} {}", method, url)
                }),
            )
        }))
    }
}

impl Session for MockSession {
    fn get(&self, url: &str) -> Result<HttpResponse> {
        self.respond("GET", url, None)
    }

    fn post(&self, url: &str, body: &Value) -> Result<HttpResponse> {
        self.respond("POST", url, Some(body))
    }

    fn put(&self, url: &str, body: &Value) -> Result<HttpResponse> {
        self.respond("PUT", url, Some(body))
    }

    fn delete(&self, url: &str) -> Result<HttpResponse> {
        self.respond("DELETE", url, None)
    }
}
