//! The seam that performs one HTTP exchange.

use async_trait::async_trait;
use thiserror::Error;

use super::request::{HttpMethod, RequestEnvelope};

/// Raw response as seen by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
  pub status: u16,
  /// `None` when the body could not be read.
  pub body: Option<Vec<u8>>,
}

/// A failure before any HTTP status was received.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct TransportError {
  pub code: Option<u16>,
  pub message: String,
}

#[async_trait]
pub trait Transport: Send + Sync {
  async fn send(&self, envelope: RequestEnvelope) -> Result<TransportResponse, TransportError>;
}

/// Transport backed by a shared `reqwest` client with its default policies.
#[derive(Clone, Default)]
pub struct ReqwestTransport {
  client: reqwest::Client,
}

impl ReqwestTransport {
  pub fn new() -> Self {
    Self::default()
  }
}

#[async_trait]
impl Transport for ReqwestTransport {
  async fn send(&self, envelope: RequestEnvelope) -> Result<TransportResponse, TransportError> {
    let method = match envelope.method {
      HttpMethod::Get => reqwest::Method::GET,
      HttpMethod::Post => reqwest::Method::POST,
    };

    let mut builder = self.client.request(method, envelope.url);
    for (name, value) in &envelope.headers {
      builder = builder.header(name.as_str(), value.as_str());
    }
    if let Some(body) = envelope.body {
      builder = builder.body(body);
    }

    let response = builder.send().await.map_err(|e| TransportError {
      code: e.status().map(|s| s.as_u16()),
      message: e.to_string(),
    })?;

    let status = response.status().as_u16();
    let body = match response.bytes().await {
      Ok(bytes) => Some(bytes.to_vec()),
      Err(e) => {
        tracing::warn!(status, error = %e, "Failed to read response body");
        None
      }
    };

    Ok(TransportResponse { status, body })
  }
}
