use std::sync::Arc;

use super::query::{Query, QueryState};
use crate::domain::usecases::Login;
use crate::domain::validation::RegexLintError;
use crate::domain::LoginError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginState {
  Idle,
  Loading,
  /// Token stored
  Ready,
  /// Transport or system failure, shown instead of the form
  FullScreenError(String),
  /// Field rejected before any request
  InlineError(RegexLintError),
}

pub struct LoginViewModel {
  login: Arc<dyn Login>,
  query: Option<Query<(), LoginError>>,
  state: LoginState,
}

impl LoginViewModel {
  pub fn new(login: Arc<dyn Login>) -> Self {
    Self {
      login,
      query: None,
      state: LoginState::Idle,
    }
  }

  pub fn state(&self) -> &LoginState {
    &self.state
  }

  pub fn login(&mut self, email: &str, password: &str) {
    let login = self.login.clone();
    let email = email.to_string();
    let password = password.to_string();

    self.query = Some(Query::spawn(async move {
      login.run(&email, &password).await
    }));
    self.state = LoginState::Loading;
  }

  /// Apply a delivered result without blocking.
  pub fn poll(&mut self) -> bool {
    let changed = self.query.as_mut().is_some_and(Query::poll);
    if changed {
      self.apply();
    }
    changed
  }

  /// Wait for the pending login to finish.
  pub async fn wait(&mut self) -> bool {
    let changed = match self.query.as_mut() {
      Some(query) => query.wait().await,
      None => false,
    };
    if changed {
      self.apply();
    }
    changed
  }

  fn apply(&mut self) {
    let Some(query) = self.query.take() else {
      return;
    };

    self.state = match query.into_state() {
      QueryState::Success(()) => LoginState::Ready,
      QueryState::Error(e) => match e.regex() {
        Some(field) => LoginState::InlineError(field),
        None => LoginState::FullScreenError(e.reason()),
      },
      QueryState::Aborted => LoginState::FullScreenError(LoginError::Unknown.reason()),
      QueryState::Loading => LoginState::Loading,
    };
  }
}
