//! Use-case level errors.

use thiserror::Error;

use super::validation::RegexLintError;
use crate::api::ApiError;

/// Errors surfaced by the "get" use cases and logout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
  #[error("Empty list")]
  EmptyList,

  #[error("Not found")]
  NotFound,

  /// Reason passed through from the transport layer.
  #[error("{0}")]
  Network(String),

  #[error("Session not found")]
  Session,

  #[error("Local store error: {0}")]
  Storage(String),

  #[error("Unknown error")]
  Unknown,
}

impl AppError {
  pub fn reason(&self) -> String {
    self.to_string()
  }

  pub(crate) fn storage(err: impl std::fmt::Display) -> Self {
    AppError::Storage(err.to_string())
  }
}

impl From<ApiError> for AppError {
  fn from(err: ApiError) -> Self {
    AppError::Network(err.reason())
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoginError {
  /// Input rejected before any network call.
  #[error("{0}")]
  Regex(RegexLintError),

  #[error("{0}")]
  Network(String),

  #[error("Login unknown error")]
  Unknown,
}

impl LoginError {
  pub fn reason(&self) -> String {
    self.to_string()
  }

  pub fn regex(&self) -> Option<RegexLintError> {
    match self {
      LoginError::Regex(e) => Some(*e),
      _ => None,
    }
  }
}

impl From<ApiError> for LoginError {
  fn from(err: ApiError) -> Self {
    LoginError::Network(err.reason())
  }
}
