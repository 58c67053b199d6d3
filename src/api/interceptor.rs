//! Pre-dispatch mutators for outgoing envelopes.

use std::sync::Arc;

use super::request::RequestEnvelope;
use crate::session::SessionDataSource;

/// Mutates an envelope before it is dispatched.
pub trait Interceptor: Send + Sync {
  fn intercept(&self, envelope: &mut RequestEnvelope, authorized: bool);
}

/// Attaches the stored session token as a bearer header on authorized requests.
pub struct AuthorizationInterceptor {
  session: Arc<dyn SessionDataSource>,
}

impl AuthorizationInterceptor {
  pub fn new(session: Arc<dyn SessionDataSource>) -> Self {
    Self { session }
  }
}

impl Interceptor for AuthorizationInterceptor {
  fn intercept(&self, envelope: &mut RequestEnvelope, authorized: bool) {
    if !authorized {
      return;
    }

    let token = match self.session.get() {
      Ok(Some(token)) => token,
      Ok(None) => {
        tracing::debug!(url = %envelope.url, "No session token for authorized request");
        return;
      }
      Err(e) => {
        tracing::warn!(error = %e, "Failed to read session token");
        return;
      }
    };

    tracing::trace!("Session token attached to authorized request");
    envelope.set_header("Authorization", format!("Bearer {}", token));
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::api::request::{HttpMethod, RequestBuilder};
  use crate::api::requests::HerosRequest;
  use crate::session::MemorySessionStore;

  fn envelope() -> RequestEnvelope {
    RequestBuilder::new("https", "dragonball.keepcoding.education")
      .build(&HerosRequest::new(""))
      .unwrap()
  }

  fn store_with(token: Option<&str>) -> Arc<MemorySessionStore> {
    let store = Arc::new(MemorySessionStore::new());
    if let Some(token) = token {
      store.set(token.as_bytes()).unwrap();
    }
    store
  }

  #[test]
  fn test_bearer_added_when_authorized_and_token_present() {
    let interceptor = AuthorizationInterceptor::new(store_with(Some("abc.def.ghi")));
    let mut envelope = envelope();
    interceptor.intercept(&mut envelope, true);
    assert_eq!(envelope.header("Authorization"), Some("Bearer abc.def.ghi"));
    assert_eq!(envelope.method, HttpMethod::Post);
  }

  #[test]
  fn test_untouched_when_not_authorized() {
    let interceptor = AuthorizationInterceptor::new(store_with(Some("abc.def.ghi")));
    let mut envelope = envelope();
    let before = envelope.clone();
    interceptor.intercept(&mut envelope, false);
    assert_eq!(envelope, before);
  }

  #[test]
  fn test_untouched_without_token() {
    let interceptor = AuthorizationInterceptor::new(store_with(None));
    let mut envelope = envelope();
    let before = envelope.clone();
    interceptor.intercept(&mut envelope, true);
    assert_eq!(envelope, before);
  }

  #[test]
  fn test_overrides_existing_authorization_header() {
    let interceptor = AuthorizationInterceptor::new(store_with(Some("fresh")));
    let mut envelope = envelope();
    envelope.set_header("Authorization", "Bearer stale");
    interceptor.intercept(&mut envelope, true);
    assert_eq!(envelope.header("Authorization"), Some("Bearer fresh"));
  }
}
