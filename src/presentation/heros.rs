use std::sync::Arc;

use super::query::{Query, QueryState};
use crate::domain::usecases::{GetHeros, SortHeros};
use crate::domain::{AppError, Hero};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HerosState {
  Idle,
  Loading,
  Ready,
  Error(String),
}

/// Hero list: remote-backed load plus local re-sorting.
pub struct HerosViewModel {
  get_heros: Arc<dyn GetHeros>,
  sort_heros: Arc<dyn SortHeros>,
  query: Option<Query<Vec<Hero>, AppError>>,
  /// Name the current list was loaded for; empty means all heroes.
  scope: String,
  heros: Vec<Hero>,
  state: HerosState,
}

impl HerosViewModel {
  pub fn new(get_heros: Arc<dyn GetHeros>, sort_heros: Arc<dyn SortHeros>) -> Self {
    Self {
      get_heros,
      sort_heros,
      query: None,
      scope: String::new(),
      heros: Vec::new(),
      state: HerosState::Idle,
    }
  }

  pub fn state(&self) -> &HerosState {
    &self.state
  }

  pub fn heros(&self) -> &[Hero] {
    &self.heros
  }

  /// Start loading heroes; an empty name loads all of them.
  pub fn load(&mut self, name: &str) {
    let get_heros = self.get_heros.clone();
    let name = name.to_string();
    self.scope = name.clone();

    self.query = Some(Query::spawn(async move { get_heros.run(&name).await }));
    self.state = HerosState::Loading;
  }

  pub fn poll(&mut self) -> bool {
    let changed = self.query.as_mut().is_some_and(Query::poll);
    if changed {
      self.apply();
    }
    changed
  }

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

  /// Re-sort by name. Runs synchronously.
  ///
  /// The full list is re-read sorted from the store; a list loaded for one
  /// name keeps its scope and is sorted in place.
  pub fn sort(&mut self, ascending: bool) {
    if !self.scope.is_empty() {
      self.heros.sort_by(|a, b| {
        let order = (a.display_name(), &a.identifier).cmp(&(b.display_name(), &b.identifier));
        if ascending {
          order
        } else {
          order.reverse()
        }
      });
      return;
    }

    match self.sort_heros.run(ascending) {
      Ok(heros) => {
        self.heros = heros;
        self.state = HerosState::Ready;
      }
      Err(e) => self.state = HerosState::Error(e.reason()),
    }
  }

  fn apply(&mut self) {
    let Some(query) = self.query.take() else {
      return;
    };

    match query.into_state() {
      QueryState::Success(heros) => {
        self.heros = heros;
        self.state = HerosState::Ready;
      }
      QueryState::Error(e) => self.state = HerosState::Error(e.reason()),
      QueryState::Aborted | QueryState::Loading => {
        self.state = HerosState::Error(AppError::Unknown.reason())
      }
    }
  }
}
