//! Fact Source Abstraction
//!
//! Provides a generic interface for fetching number trivia over HTTP.
//! Supports both the real blocking HTTP implementation and fake sources for
//! testing. The source reports status and body verbatim; interpreting the
//! status code is the requester's job.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Fact source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactSourceConfig {
    pub timeout_secs: u64,
}

impl Default for FactSourceConfig {
    fn default() -> Self {
        Self { timeout_secs: 30 }
    }
}

/// Raw response from the trivia service
#[derive(Debug, Clone, PartialEq)]
pub struct FactResponse {
    pub status: u16,
    pub body: String,
}

/// Transport-level failures
#[derive(Debug, Clone, thiserror::Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Http(String),

    #[error("request timed out after {0} seconds")]
    Timeout(u64),
}

/// Generic fact source trait
pub trait FactSource: Send + Sync {
    /// Fetch one trivia response from the given endpoint
    fn fetch(&self, end_point: &str) -> Result<FactResponse, TransportError>;
}

/// Real fact source implementation using blocking HTTP
pub struct HttpFactSource {
    config: FactSourceConfig,
    client: reqwest::blocking::Client,
}

impl HttpFactSource {
    pub fn new(config: FactSourceConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {}", e))?;

        Ok(Self { config, client })
    }
}

impl FactSource for HttpFactSource {
    fn fetch(&self, end_point: &str) -> Result<FactResponse, TransportError> {
        let response = self.client.get(end_point).send().map_err(|e| {
            if e.is_timeout() {
                TransportError::Timeout(self.config.timeout_secs)
            } else {
                TransportError::Http(format!("Request failed: {}", e))
            }
        })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| TransportError::Http(format!("Failed to read body: {}", e)))?;

        Ok(FactResponse { status, body })
    }
}

/// Fake fact source for testing
pub struct FakeFactSource {
    responses: std::sync::Mutex<Vec<Result<FactResponse, TransportError>>>,
    call_count: std::sync::Mutex<usize>,
}

impl FakeFactSource {
    /// Create a fake source with pre-defined responses
    pub fn new(responses: Vec<Result<FactResponse, TransportError>>) -> Self {
        Self {
            responses: std::sync::Mutex::new(responses),
            call_count: std::sync::Mutex::new(0),
        }
    }

    /// Create a fake source that always returns the given status and body
    pub fn always(status: u16, body: &str) -> Self {
        Self::new(vec![Ok(FactResponse {
            status,
            body: body.to_string(),
        })])
    }

    /// Create a fake source that always returns a transport error
    pub fn always_error(error: TransportError) -> Self {
        Self::new(vec![Err(error)])
    }

    /// Get the number of fetches made
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

impl FactSource for FakeFactSource {
    fn fetch(&self, _end_point: &str) -> Result<FactResponse, TransportError> {
        let mut count = self.call_count.lock().unwrap();
        *count += 1;

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Err(TransportError::Http("fake source exhausted".to_string()));
        }

        if responses.len() == 1 {
            // Keep returning the same response
            responses[0].clone()
        } else {
            // Pop and return next response
            responses.remove(0)
        }
    }
}
