use async_trait::async_trait;
use color_eyre::Result as EyreResult;

use super::GetLocations;
use crate::api::requests::LocationsRequest;
use crate::api::ApiSession;
use crate::domain::cache::{CacheLayer, CacheResult};
use crate::domain::error::AppError;
use crate::domain::mappers;
use crate::domain::models::Location;
use crate::store::StoreDataProvider;

pub struct GetLocationsUseCase {
  cache: CacheLayer,
  api: ApiSession,
}

impl GetLocationsUseCase {
  pub fn new(cache: CacheLayer, api: ApiSession) -> Self {
    Self { cache, api }
  }

  pub async fn fetch(&self, hero_id: &str) -> Result<CacheResult<Vec<Location>>, AppError> {
    self
      .cache
      .fetch_list(
        "location",
        hero_id,
        |store| local_locations(store, hero_id),
        || {
          let api = self.api.clone();
          let request = LocationsRequest::new(hero_id);
          async move { api.request(&request).await }
        },
        |store, locations| store.insert_locations(locations),
      )
      .await
  }
}

fn local_locations(store: &StoreDataProvider, hero_id: &str) -> EyreResult<Vec<Location>> {
  Ok(
    store
      .fetch_locations(hero_id)?
      .into_iter()
      .filter_map(mappers::location)
      .collect(),
  )
}

#[async_trait]
impl GetLocations for GetLocationsUseCase {
  async fn run(&self, hero_id: &str) -> Result<Vec<Location>, AppError> {
    self.fetch(hero_id).await.map(|result| result.data)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::cache::CacheSource;
  use crate::domain::usecases::testing::Harness;
  use crate::fixtures;

  #[tokio::test]
  async fn test_fetch_then_serve_locally() {
    let harness = Harness::new();
    harness.store.insert_heros(&fixtures::hero_dtos()).unwrap();
    harness.transport.push_json(
      200,
      serde_json::json!([{
        "id": "ACB5ABB7-8C85-4A0F-872C-5467EDD23D7F",
        "longitud": "-115.3154276",
        "latitud": "36.1251954",
        "dateShow": "2022-09-26T00:00:00Z",
        "hero": { "id": fixtures::PICCOLO_ID }
      }]),
    );
    let use_case = GetLocationsUseCase::new(harness.cache(), harness.api.clone());

    let first = use_case.fetch(fixtures::PICCOLO_ID).await.unwrap();
    assert_eq!(first.source, CacheSource::Remote);
    assert_eq!(first.data.len(), 1);
    assert_eq!(first.data[0].hero.name.as_deref(), Some("Piccolo"));
    assert_eq!(
      first.data[0].coordinate(),
      Some((36.1251954, -115.3154276))
    );

    let second = use_case.fetch(fixtures::PICCOLO_ID).await.unwrap();
    assert_eq!(second.source, CacheSource::Local);
    assert_eq!(second.data, first.data);
    assert_eq!(harness.transport.call_count(), 1);
    assert_eq!(
      harness.transport.requests()[0].url.path(),
      "/api/heros/locations"
    );
  }

  #[tokio::test]
  async fn test_payload_for_unknown_owner_returns_empty() {
    let harness = Harness::new();
    harness.transport.push_json(
      200,
      serde_json::to_value(fixtures::piccolo_location_dtos()).unwrap(),
    );
    let use_case = GetLocationsUseCase::new(harness.cache(), harness.api.clone());

    // Piccolo is not stored, so the persisted location is an orphan
    let locations = use_case.run(fixtures::PICCOLO_ID).await.unwrap();

    assert!(locations.is_empty());
    assert_eq!(harness.store.counts().unwrap().locations, 1);
  }

  #[tokio::test]
  async fn test_empty_payload() {
    let harness = Harness::new();
    harness.transport.push_json(200, serde_json::json!([]));
    let use_case = GetLocationsUseCase::new(harness.cache(), harness.api.clone());

    assert_eq!(
      use_case.run(fixtures::PICCOLO_ID).await.unwrap_err(),
      AppError::EmptyList
    );
  }
}
