//! Canned-response transport shared by unit tests.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

use crate::api::{ApiError, Transport};

/// Serves registered JSON bodies by exact URL and records every request.
/// Unregistered URLs answer 404.
#[derive(Default)]
pub struct StubTransport {
    responses: HashMap<String, Value>,
    failing: HashSet<String>,
    calls: Mutex<Vec<String>>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_json(mut self, url: &str, body: Value) -> Self {
        self.responses.insert(url.to_string(), body);
        self
    }

    /// Make `url` fail with a server error.
    pub fn with_failure(mut self, url: &str) -> Self {
        self.failing.insert(url.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.calls().len()
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn get_json(&self, url: &str) -> Result<Value> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(url.to_string());
        }

        if self.failing.contains(url) {
            return Err(ApiError::ServerError(format!("stubbed failure for {}", url)).into());
        }

        self.responses
            .get(url)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(url.to_string()).into())
    }
}
