//! Input format checks run before any login request.

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("valid email pattern")
});

// At least four characters, no whitespace.
static PASSWORD: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^\S{4,}$").expect("valid password pattern"));

/// The field whose format was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RegexLintError {
  #[error("Invalid email format")]
  Email,

  #[error("Invalid password format")]
  Password,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
  Email,
  Password,
}

impl Pattern {
  fn regex(&self) -> &'static Regex {
    match self {
      Pattern::Email => &*EMAIL,
      Pattern::Password => &*PASSWORD,
    }
  }

  fn error(&self) -> RegexLintError {
    match self {
      Pattern::Email => RegexLintError::Email,
      Pattern::Password => RegexLintError::Password,
    }
  }
}

/// Return the input unchanged when it matches `pattern`.
pub fn validate<'a>(data: &'a str, pattern: Pattern) -> Result<&'a str, RegexLintError> {
  if pattern.regex().is_match(data) {
    Ok(data)
  } else {
    Err(pattern.error())
  }
}
