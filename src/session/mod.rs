//! Storage for the opaque authorization token.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;

/// Key name the token is stored under.
pub const TOKEN_KEY: &str = "jwt";

#[derive(Debug, Error)]
pub enum SessionError {
  #[error("Session storage I/O failed: {0}")]
  Io(#[from] io::Error),

  #[error("Session storage lock poisoned")]
  Poisoned,
}

/// Key-value token storage with get/set/clear.
pub trait SessionDataSource: Send + Sync {
  fn get(&self) -> Result<Option<String>, SessionError>;

  /// Store the raw token bytes as returned by the login endpoint.
  fn set(&self, token: &[u8]) -> Result<(), SessionError>;

  fn clear(&self) -> Result<(), SessionError>;
}

fn normalize(token: &[u8]) -> Option<String> {
  let token = String::from_utf8_lossy(token).trim().to_string();
  (!token.is_empty()).then_some(token)
}

/// Process-local token storage, used by tests and `--ephemeral` runs.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
  token: Mutex<Option<String>>,
}

impl MemorySessionStore {
  pub fn new() -> Self {
    Self::default()
  }
}

impl SessionDataSource for MemorySessionStore {
  fn get(&self) -> Result<Option<String>, SessionError> {
    let token = self.token.lock().map_err(|_| SessionError::Poisoned)?;
    Ok(token.clone())
  }

  fn set(&self, token: &[u8]) -> Result<(), SessionError> {
    let mut slot = self.token.lock().map_err(|_| SessionError::Poisoned)?;
    *slot = normalize(token);
    Ok(())
  }

  fn clear(&self) -> Result<(), SessionError> {
    let mut slot = self.token.lock().map_err(|_| SessionError::Poisoned)?;
    *slot = None;
    Ok(())
  }
}

/// Token stored in a single owner-readable file named after [`TOKEN_KEY`].
#[derive(Debug, Clone)]
pub struct FileSessionStore {
  path: PathBuf,
}

impl FileSessionStore {
  /// Use `dir` as the session directory; it is created on first write.
  pub fn new(dir: &Path) -> Self {
    Self {
      path: dir.join(TOKEN_KEY),
    }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  fn write_private(&self, contents: &str) -> io::Result<()> {
    if let Some(parent) = self.path.parent() {
      fs::create_dir_all(parent)?;
    }

    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
      use std::os::unix::fs::OpenOptionsExt;
      options.mode(0o600);
    }

    let mut file = options.open(&self.path)?;
    file.write_all(contents.as_bytes())?;
    file.sync_all()
  }
}

impl SessionDataSource for FileSessionStore {
  fn get(&self) -> Result<Option<String>, SessionError> {
    match fs::read(&self.path) {
      Ok(bytes) => Ok(normalize(&bytes)),
      Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
      Err(e) => Err(e.into()),
    }
  }

  fn set(&self, token: &[u8]) -> Result<(), SessionError> {
    match normalize(token) {
      Some(token) => {
        self.write_private(&token)?;
        tracing::trace!(path = %self.path.display(), "Session token saved");
        Ok(())
      }
      None => self.clear(),
    }
  }

  fn clear(&self) -> Result<(), SessionError> {
    match fs::remove_file(&self.path) {
      Ok(()) => {
        tracing::trace!("Session token cleared");
        Ok(())
      }
      Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
      Err(e) => Err(e.into()),
    }
  }
}
