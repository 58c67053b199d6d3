use async_trait::async_trait;
use std::sync::Arc;

use super::{Login, Logout};
use crate::api::requests::LoginRequest;
use crate::api::ApiSession;
use crate::domain::error::{AppError, LoginError};
use crate::domain::validation::{validate, Pattern};
use crate::session::SessionDataSource;
use crate::store::StoreDataProvider;

/// Validates credentials, exchanges them for a token and stores it.
pub struct LoginUseCase {
  api: ApiSession,
  session: Arc<dyn SessionDataSource>,
}

impl LoginUseCase {
  pub fn new(api: ApiSession, session: Arc<dyn SessionDataSource>) -> Self {
    Self { api, session }
  }
}

#[async_trait]
impl Login for LoginUseCase {
  async fn run(&self, username: &str, password: &str) -> Result<(), LoginError> {
    let username = validate(username, Pattern::Email).map_err(LoginError::Regex)?;
    let password = validate(password, Pattern::Password).map_err(LoginError::Regex)?;

    let token = self
      .api
      .request(&LoginRequest::new(username, password))
      .await
      .map_err(|e| {
        tracing::error!(error = %e, "Login failed");
        LoginError::from(e)
      })?;

    self.session.set(&token.into_inner()).map_err(|e| {
      tracing::error!(error = %e, "Failed to store session token");
      LoginError::Unknown
    })?;

    tracing::info!("Logged in, session token stored");
    Ok(())
  }
}

/// Clears the session token and, when wired with a store, the cached data.
pub struct LogoutUseCase {
  session: Arc<dyn SessionDataSource>,
  store: Option<Arc<StoreDataProvider>>,
}

impl LogoutUseCase {
  pub fn new(session: Arc<dyn SessionDataSource>) -> Self {
    Self {
      session,
      store: None,
    }
  }

  /// Also wipe the local store on logout.
  pub fn with_store(mut self, store: Arc<StoreDataProvider>) -> Self {
    self.store = Some(store);
    self
  }
}

impl Logout for LogoutUseCase {
  fn run(&self) -> Result<(), AppError> {
    let token = self.session.get().map_err(|e| {
      tracing::error!(error = %e, "Failed to read session token");
      AppError::Unknown
    })?;

    if token.is_none() {
      tracing::error!("Session token not found, unable to logout");
      return Err(AppError::Session);
    }

    self.session.clear().map_err(|e| {
      tracing::error!(error = %e, "Failed to clear session token");
      AppError::Unknown
    })?;

    if let Some(store) = &self.store {
      store.clear().map_err(AppError::storage)?;
    }

    tracing::info!("Logged out");
    Ok(())
  }
}
