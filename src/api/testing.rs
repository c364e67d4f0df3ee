//! Scripted in-memory transport for tests.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::transport::{CatalogTransport, RawResponse};
use crate::error::Result;

/// Answers requests from per-route response queues.
///
/// A route matches when its key is a substring of the request URL; the first
/// registered match wins. The last response of a queue is repeated once the
/// queue runs dry. Unmatched URLs get a 404.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    routes: Mutex<Vec<(String, VecDeque<RawResponse>)>>,
    log: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(self, key: &str, responses: Vec<RawResponse>) -> Self {
        self.routes
            .lock()
            .unwrap()
            .push((key.to_string(), responses.into_iter().collect()));
        self
    }

    /// URLs requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }
}

#[async_trait]
impl CatalogTransport for ScriptedTransport {
    async fn get(&self, url: &str, _token: &str) -> Result<RawResponse> {
        self.log.lock().unwrap().push(url.to_string());

        let mut routes = self.routes.lock().unwrap();
        let response = routes
            .iter_mut()
            .find(|(key, _)| url.contains(key.as_str()))
            .and_then(|(_, queue)| {
                if queue.len() > 1 {
                    queue.pop_front()
                } else {
                    queue.front().cloned()
                }
            });

        Ok(response.unwrap_or_else(|| status(404).with_body("Not Found")))
    }
}

pub fn json_ok(body: &str) -> RawResponse {
    RawResponse {
        status: 200,
        retry_after: None,
        body: body.to_string(),
    }
}

pub fn status(code: u16) -> RawResponse {
    RawResponse {
        status: code,
        retry_after: None,
        body: String::new(),
    }
}

impl RawResponse {
    pub fn with_retry_after(mut self, seconds: u64) -> Self {
        self.retry_after = Some(Duration::from_secs(seconds));
        self
    }

    pub fn with_body(mut self, body: &str) -> Self {
        self.body = body.to_string();
        self
    }
}
