//! One-shot async results handed back to the owner's task.
//!
//! [`Query::spawn`] runs a use-case future on the runtime. Its single result
//! waits in a oneshot channel until the owner applies it with
//! [`Query::poll`] (non-blocking, for event loops) or [`Query::wait`]. The
//! state therefore only ever changes on the owner's task.
//!
//! ```ignore
//! let use_case = get_heros.clone();
//! let mut query = Query::spawn(async move { use_case.run("").await });
//! query.wait().await;
//! if let Some(heros) = query.state().data() {
//!     render(heros);
//! }
//! ```

use std::future::Future;
use tokio::sync::oneshot;

#[derive(Debug, Clone, PartialEq)]
pub enum QueryState<T, E> {
  /// Spawned, result not applied yet
  Loading,
  Success(T),
  Error(E),
  /// The task ended without a result
  Aborted,
}

impl<T, E> QueryState<T, E> {
  pub fn is_loading(&self) -> bool {
    matches!(self, QueryState::Loading)
  }

  pub fn data(&self) -> Option<&T> {
    if let QueryState::Success(data) = self {
      Some(data)
    } else {
      None
    }
  }

  pub fn error(&self) -> Option<&E> {
    if let QueryState::Error(e) = self {
      Some(e)
    } else {
      None
    }
  }
}

/// Handle to a spawned use-case run.
pub struct Query<T, E> {
  state: QueryState<T, E>,
  pending: Option<oneshot::Receiver<Result<T, E>>>,
}

impl<T: Send + 'static, E: Send + 'static> Query<T, E> {
  /// Spawn `future` on the current runtime.
  pub fn spawn<Fut>(future: Fut) -> Self
  where
    Fut: Future<Output = Result<T, E>> + Send + 'static,
  {
    let (tx, rx) = oneshot::channel();
    tokio::spawn(async move {
      // The owner may have dropped the handle
      let _ = tx.send(future.await);
    });

    Self {
      state: QueryState::Loading,
      pending: Some(rx),
    }
  }

  pub fn state(&self) -> &QueryState<T, E> {
    &self.state
  }

  pub fn into_state(self) -> QueryState<T, E> {
    self.state
  }

  /// Apply the result if it has arrived. Returns `true` if the state changed.
  pub fn poll(&mut self) -> bool {
    let Some(rx) = self.pending.as_mut() else {
      return false;
    };

    match rx.try_recv() {
      Ok(result) => self.settle(Some(result)),
      Err(oneshot::error::TryRecvError::Empty) => return false,
      Err(oneshot::error::TryRecvError::Closed) => self.settle(None),
    }
    true
  }

  /// Wait for the result and apply it. Returns `false` if it was already applied.
  pub async fn wait(&mut self) -> bool {
    let Some(rx) = self.pending.as_mut() else {
      return false;
    };

    let result = rx.await.ok();
    self.settle(result);
    true
  }

  fn settle(&mut self, result: Option<Result<T, E>>) {
    self.pending = None;
    self.state = match result {
      Some(Ok(data)) => QueryState::Success(data),
      Some(Err(e)) => QueryState::Error(e),
      None => {
        tracing::error!("Query task ended without a result");
        QueryState::Aborted
      }
    };
  }
}

impl<T: std::fmt::Debug, E: std::fmt::Debug> std::fmt::Debug for Query<T, E> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Query")
      .field("state", &self.state)
      .field("pending", &self.pending.is_some())
      .finish()
  }
}
