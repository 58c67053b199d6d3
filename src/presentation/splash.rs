use std::sync::Arc;

use crate::session::SessionDataSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplashState {
  /// No stored token
  Login,
  /// A token is stored
  Logged,
}

/// Decides where the app starts.
pub struct SplashViewModel {
  session: Arc<dyn SessionDataSource>,
}

impl SplashViewModel {
  pub fn new(session: Arc<dyn SessionDataSource>) -> Self {
    Self { session }
  }

  pub fn state(&self) -> SplashState {
    match self.session.get() {
      Ok(Some(_)) => SplashState::Logged,
      Ok(None) => SplashState::Login,
      Err(e) => {
        tracing::warn!(error = %e, "Could not read session token");
        SplashState::Login
      }
    }
  }
}
