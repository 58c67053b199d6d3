//! Transport-level error taxonomy.

use thiserror::Error;

/// Reason reported for a 401 response.
pub const UNAUTHORIZED_REASON: &str = "Wrong email or password. Please log in again.";

/// Errors produced by the request pipeline.
///
/// Every variant carries the request path it was raised for. The `Display`
/// output is the human-readable reason that use cases pass through.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
  #[error("Malformed URL")]
  MalformedUrl { url: String },

  #[error("Bad request")]
  BadRequest { url: String },

  #[error("There was a server error")]
  Server {
    url: String,
    status_code: Option<u16>,
  },

  #[error("No data provided")]
  NoData {
    url: String,
    status_code: Option<u16>,
  },

  #[error("Decoding failed")]
  Decoding { url: String },

  #[error("{}", UNAUTHORIZED_REASON)]
  Unauthorized {
    url: String,
    status_code: Option<u16>,
  },

  #[error("Unknown server error")]
  Unknown {
    url: String,
    status_code: Option<u16>,
  },
}

impl ApiError {
  /// Human-readable reason, as surfaced to the user.
  pub fn reason(&self) -> String {
    self.to_string()
  }

  /// Path of the request that failed.
  pub fn url(&self) -> &str {
    match self {
      Self::MalformedUrl { url }
      | Self::BadRequest { url }
      | Self::Server { url, .. }
      | Self::NoData { url, .. }
      | Self::Decoding { url }
      | Self::Unauthorized { url, .. }
      | Self::Unknown { url, .. } => url,
    }
  }

  /// HTTP status (or transport code) attached to the error, if any.
  pub fn status_code(&self) -> Option<u16> {
    match self {
      Self::Server { status_code, .. }
      | Self::NoData { status_code, .. }
      | Self::Unauthorized { status_code, .. }
      | Self::Unknown { status_code, .. } => *status_code,
      Self::MalformedUrl { .. } | Self::BadRequest { .. } | Self::Decoding { .. } => None,
    }
  }
}
