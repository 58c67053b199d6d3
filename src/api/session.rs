//! Executes typed requests: build, intercept, dispatch once, map the response.

use std::sync::Arc;

use super::error::ApiError;
use super::interceptor::Interceptor;
use super::request::{Decodable, HttpRequest, RequestBuilder};
use super::transport::Transport;

/// Remote session against a fixed host.
///
/// Cheap to clone; the transport and interceptor chain are shared.
#[derive(Clone)]
pub struct ApiSession {
  builder: RequestBuilder,
  transport: Arc<dyn Transport>,
  interceptors: Arc<Vec<Box<dyn Interceptor>>>,
}

impl ApiSession {
  pub fn new(builder: RequestBuilder, transport: Arc<dyn Transport>) -> Self {
    Self {
      builder,
      transport,
      interceptors: Arc::new(Vec::new()),
    }
  }

  /// Replace the interceptor chain. Interceptors run in list order.
  pub fn with_interceptors(mut self, interceptors: Vec<Box<dyn Interceptor>>) -> Self {
    self.interceptors = Arc::new(interceptors);
    self
  }

  /// Perform one exchange for `request`. There is no retry.
  pub async fn request<R: HttpRequest>(&self, request: &R) -> Result<R::Response, ApiError> {
    let path = request.path().to_string();

    let mut envelope = self.builder.build(request)?;
    for interceptor in self.interceptors.iter() {
      interceptor.intercept(&mut envelope, request.authorized());
    }

    tracing::debug!(method = envelope.method.as_str(), url = %envelope.url, "Dispatching request");

    let response = self.transport.send(envelope).await.map_err(|e| {
      tracing::warn!(url = %path, error = %e, "Transport failure");
      ApiError::Server {
        url: path.clone(),
        status_code: e.code,
      }
    })?;

    let status = response.status;
    let body = response.body.ok_or_else(|| ApiError::NoData {
      url: path.clone(),
      status_code: Some(status),
    })?;

    match status {
      200..=299 => <R::Response as Decodable>::decode(body).map_err(|e| {
        tracing::warn!(url = %path, error = %e, "Response decoding failed");
        ApiError::Decoding { url: path }
      }),
      401 => Err(ApiError::Unauthorized {
        url: path,
        status_code: Some(status),
      }),
      _ => {
        tracing::warn!(url = %path, status, "Unexpected response status");
        Err(ApiError::Unknown {
          url: path,
          status_code: Some(status),
        })
      }
    }
  }
}
