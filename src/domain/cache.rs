//! Local-first fetch policy shared by the "get" use cases.
//!
//! 1. Read the local store for the scoping key; a non-empty result is returned as is
//! 2. On a miss, issue exactly one remote request for the same key
//! 3. Persist a non-empty payload, then re-read the store so the returned
//!    models carry resolved owners
//!
//! An empty payload is an [`AppError::EmptyList`] and leaves the store as it
//! was; a transport failure becomes [`AppError::Network`]. Nothing retries.

use color_eyre::Result as EyreResult;
use std::future::Future;
use std::sync::Arc;

use super::error::AppError;
use crate::api::ApiError;
use crate::store::StoreDataProvider;

/// Where a result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheSource {
  /// Served from the local store without a network call
  Local,
  /// Fetched remotely, persisted, then re-read locally
  Remote,
}

#[derive(Debug, Clone)]
pub struct CacheResult<T> {
  pub data: T,
  pub source: CacheSource,
}

impl<T> CacheResult<T> {
  pub fn from_local(data: T) -> Self {
    Self {
      data,
      source: CacheSource::Local,
    }
  }

  pub fn from_remote(data: T) -> Self {
    Self {
      data,
      source: CacheSource::Remote,
    }
  }
}

/// Runs the local-first policy against a shared store.
#[derive(Clone)]
pub struct CacheLayer {
  store: Arc<StoreDataProvider>,
}

impl CacheLayer {
  pub fn new(store: Arc<StoreDataProvider>) -> Self {
    Self { store }
  }

  pub fn store(&self) -> &StoreDataProvider {
    &self.store
  }

  /// Fetch a list with the local-first policy.
  ///
  /// `local` reads the store for the scoping key and is called again after a
  /// remote payload has been persisted by `persist`. `key` is only used for
  /// logging.
  pub async fn fetch_list<T, D, L, F, Fut, P>(
    &self,
    kind: &'static str,
    key: &str,
    local: L,
    fetcher: F,
    persist: P,
  ) -> Result<CacheResult<Vec<T>>, AppError>
  where
    L: Fn(&StoreDataProvider) -> EyreResult<Vec<T>>,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<Vec<D>, ApiError>>,
    P: FnOnce(&StoreDataProvider, &[D]) -> EyreResult<usize>,
  {
    let cached = local(&self.store).map_err(AppError::storage)?;
    if !cached.is_empty() {
      tracing::info!(kind, key, count = cached.len(), "Served from local store");
      return Ok(CacheResult::from_local(cached));
    }

    let payload = match fetcher().await {
      Ok(payload) => payload,
      Err(e) => {
        tracing::error!(kind, key, error = %e, "Remote fetch failed");
        return Err(e.into());
      }
    };

    if payload.is_empty() {
      tracing::info!(kind, key, "Unexpected empty list from remote");
      return Err(AppError::EmptyList);
    }

    let written = persist(&self.store, &payload).map_err(AppError::storage)?;
    let data = local(&self.store).map_err(AppError::storage)?;
    if data.is_empty() {
      tracing::warn!(kind, key, written, "Remote payload did not match the scoping key");
    } else {
      tracing::info!(kind, key, count = data.len(), "Fetched from remote");
    }

    Ok(CacheResult::from_remote(data))
  }
}
