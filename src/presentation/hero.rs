use std::sync::Arc;

use super::query::{Query, QueryState};
use crate::domain::usecases::{GetHeros, GetLocations, GetTransformations};
use crate::domain::{AppError, Hero, Location, Transformation};

/// A hero with everything the detail screen shows.
#[derive(Debug, Clone, PartialEq)]
pub struct HeroDetail {
  pub hero: Hero,
  pub transformations: Vec<Transformation>,
  pub locations: Vec<Location>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum HeroState {
  Idle,
  Loading,
  Ready(HeroDetail),
  Error(String),
}

pub struct HeroViewModel {
  get_heros: Arc<dyn GetHeros>,
  get_transformations: Arc<dyn GetTransformations>,
  get_locations: Arc<dyn GetLocations>,
  query: Option<Query<HeroDetail, AppError>>,
  state: HeroState,
}

impl HeroViewModel {
  pub fn new(
    get_heros: Arc<dyn GetHeros>,
    get_transformations: Arc<dyn GetTransformations>,
    get_locations: Arc<dyn GetLocations>,
  ) -> Self {
    Self {
      get_heros,
      get_transformations,
      get_locations,
      query: None,
      state: HeroState::Idle,
    }
  }

  pub fn state(&self) -> &HeroState {
    &self.state
  }

  /// Load the hero named `name`, then its transformations and locations
  /// concurrently.
  pub fn load(&mut self, name: &str) {
    let get_heros = self.get_heros.clone();
    let get_transformations = self.get_transformations.clone();
    let get_locations = self.get_locations.clone();
    let name = name.to_string();

    self.query = Some(Query::spawn(async move {
      let hero = get_heros
        .run(&name)
        .await?
        .into_iter()
        .next()
        .ok_or(AppError::NotFound)?;

      let (transformations, locations) = futures::join!(
        get_transformations.run(&hero.identifier),
        get_locations.run(&hero.identifier)
      );

      Ok::<_, AppError>(HeroDetail {
        transformations: or_empty("transformations", transformations),
        locations: or_empty("locations", locations),
        hero,
      })
    }));
    self.state = HeroState::Loading;
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

  fn apply(&mut self) {
    let Some(query) = self.query.take() else {
      return;
    };

    self.state = match query.into_state() {
      QueryState::Success(detail) => HeroState::Ready(detail),
      QueryState::Error(e) => HeroState::Error(e.reason()),
      QueryState::Aborted | QueryState::Loading => HeroState::Error(AppError::Unknown.reason()),
    };
  }
}

// The hero is shown even when its transformations or locations fail to load.
fn or_empty<T>(kind: &'static str, result: Result<Vec<T>, AppError>) -> Vec<T> {
  match result {
    Ok(items) => items,
    Err(AppError::EmptyList) => Vec::new(),
    Err(e) => {
      tracing::error!(kind, error = %e, "Hero detail load failed");
      Vec::new()
    }
  }
}
