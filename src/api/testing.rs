//! In-process transport for tests: replays canned responses, records envelopes.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use super::request::RequestEnvelope;
use super::transport::{Transport, TransportError, TransportResponse};

#[derive(Default)]
pub struct StubTransport {
  responses: Mutex<VecDeque<Result<TransportResponse, TransportError>>>,
  requests: Mutex<Vec<RequestEnvelope>>,
}

impl StubTransport {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn push(&self, response: Result<TransportResponse, TransportError>) {
    self.responses.lock().unwrap().push_back(response);
  }

  pub fn push_body(&self, status: u16, body: &[u8]) {
    self.push(Ok(TransportResponse {
      status,
      body: Some(body.to_vec()),
    }));
  }

  pub fn push_json(&self, status: u16, value: serde_json::Value) {
    self.push_body(status, &serde_json::to_vec(&value).unwrap());
  }

  pub fn push_failure(&self, code: Option<u16>, message: &str) {
    self.push(Err(TransportError {
      code,
      message: message.to_string(),
    }));
  }

  pub fn requests(&self) -> Vec<RequestEnvelope> {
    self.requests.lock().unwrap().clone()
  }

  pub fn call_count(&self) -> usize {
    self.requests.lock().unwrap().len()
  }
}

#[async_trait]
impl Transport for StubTransport {
  async fn send(&self, envelope: RequestEnvelope) -> Result<TransportResponse, TransportError> {
    self.requests.lock().unwrap().push(envelope);
    self
      .responses
      .lock()
      .unwrap()
      .pop_front()
      .unwrap_or_else(|| {
        Err(TransportError {
          code: None,
          message: "no stubbed response".to_string(),
        })
      })
  }
}
