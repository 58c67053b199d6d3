use async_trait::async_trait;
use color_eyre::Result as EyreResult;

use super::{GetTransformation, GetTransformations};
use crate::api::requests::TransformationsRequest;
use crate::api::ApiSession;
use crate::domain::cache::{CacheLayer, CacheResult};
use crate::domain::error::AppError;
use crate::domain::mappers;
use crate::domain::models::Transformation;
use crate::store::StoreDataProvider;

pub struct GetTransformationsUseCase {
  cache: CacheLayer,
  api: ApiSession,
}

impl GetTransformationsUseCase {
  pub fn new(cache: CacheLayer, api: ApiSession) -> Self {
    Self { cache, api }
  }

  pub async fn fetch(&self, hero_id: &str) -> Result<CacheResult<Vec<Transformation>>, AppError> {
    self
      .cache
      .fetch_list(
        "transformation",
        hero_id,
        |store| local_transformations(store, hero_id),
        || {
          let api = self.api.clone();
          let request = TransformationsRequest::new(hero_id);
          async move { api.request(&request).await }
        },
        |store, transformations| store.insert_transformations(transformations),
      )
      .await
  }
}

fn local_transformations(store: &StoreDataProvider, hero_id: &str) -> EyreResult<Vec<Transformation>> {
  Ok(
    store
      .fetch_transformations(hero_id)?
      .into_iter()
      .filter_map(mappers::transformation)
      .collect(),
  )
}

#[async_trait]
impl GetTransformations for GetTransformationsUseCase {
  async fn run(&self, hero_id: &str) -> Result<Vec<Transformation>, AppError> {
    self.fetch(hero_id).await.map(|result| result.data)
  }
}

/// Looks up one transformation in the store; never goes to the network.
pub struct GetTransformationUseCase {
  cache: CacheLayer,
}

impl GetTransformationUseCase {
  pub fn new(cache: CacheLayer) -> Self {
    Self { cache }
  }
}

impl GetTransformation for GetTransformationUseCase {
  fn run(&self, identifier: &str) -> Result<Transformation, AppError> {
    let found = self
      .cache
      .store()
      .fetch_transformation(identifier)
      .map_err(AppError::storage)?
      .and_then(mappers::transformation);

    match found {
      Some(transformation) => {
        tracing::info!(identifier, "Transformation served from local store");
        Ok(transformation)
      }
      None => {
        tracing::error!(identifier, "Transformation not found in local store");
        Err(AppError::NotFound)
      }
    }
  }
}
