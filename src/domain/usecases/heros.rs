use async_trait::async_trait;
use color_eyre::Result as EyreResult;

use super::{GetHeros, SortHeros};
use crate::api::requests::HerosRequest;
use crate::api::ApiSession;
use crate::domain::cache::{CacheLayer, CacheResult};
use crate::domain::error::AppError;
use crate::domain::models::Hero;
use crate::store::{HeroFilter, SortOrder, StoreDataProvider};

pub struct GetHerosUseCase {
  cache: CacheLayer,
  api: ApiSession,
}

impl GetHerosUseCase {
  pub fn new(cache: CacheLayer, api: ApiSession) -> Self {
    Self { cache, api }
  }

  /// Same as [`GetHeros::run`], also reporting where the result came from.
  pub async fn fetch(&self, name: &str) -> Result<CacheResult<Vec<Hero>>, AppError> {
    self
      .cache
      .fetch_list(
        "hero",
        name,
        |store| local_heros(store, name),
        || {
          let api = self.api.clone();
          let request = HerosRequest::new(name);
          async move { api.request(&request).await }
        },
        |store, heros| store.insert_heros(heros),
      )
      .await
  }
}

fn local_heros(store: &StoreDataProvider, name: &str) -> EyreResult<Vec<Hero>> {
  if name.is_empty() {
    return Ok(
      store
        .fetch_heros(SortOrder::Ascending)?
        .into_iter()
        .map(Hero::from)
        .collect(),
    );
  }

  Ok(
    store
      .fetch_hero(HeroFilter::Name(name))?
      .map(Hero::from)
      .into_iter()
      .collect(),
  )
}

#[async_trait]
impl GetHeros for GetHerosUseCase {
  async fn run(&self, name: &str) -> Result<Vec<Hero>, AppError> {
    self.fetch(name).await.map(|result| result.data)
  }
}

/// Sorts the heroes already in the store; never goes to the network.
pub struct SortHerosUseCase {
  cache: CacheLayer,
}

impl SortHerosUseCase {
  pub fn new(cache: CacheLayer) -> Self {
    Self { cache }
  }
}

impl SortHeros for SortHerosUseCase {
  fn run(&self, ascending: bool) -> Result<Vec<Hero>, AppError> {
    let heros: Vec<Hero> = self
      .cache
      .store()
      .fetch_heros(SortOrder::from_ascending(ascending))
      .map_err(AppError::storage)?
      .into_iter()
      .map(Hero::from)
      .collect();

    if heros.is_empty() {
      return Err(AppError::EmptyList);
    }
    Ok(heros)
  }
}
