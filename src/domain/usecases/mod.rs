//! Use cases consumed by the view models.
//!
//! Each use case is a trait so view models can be driven by test doubles; the
//! concrete types take their collaborators explicitly at construction.

mod heros;
mod locations;
mod session;
mod transformations;

use async_trait::async_trait;

use super::error::{AppError, LoginError};
use super::models::{Hero, Location, Transformation};

pub use heros::{GetHerosUseCase, SortHerosUseCase};
pub use locations::GetLocationsUseCase;
pub use session::{LoginUseCase, LogoutUseCase};
pub use transformations::{GetTransformationUseCase, GetTransformationsUseCase};

/// All heroes for an empty name, otherwise the hero with exactly that name.
#[async_trait]
pub trait GetHeros: Send + Sync {
  async fn run(&self, name: &str) -> Result<Vec<Hero>, AppError>;
}

/// Locally stored heroes sorted by name.
pub trait SortHeros: Send + Sync {
  fn run(&self, ascending: bool) -> Result<Vec<Hero>, AppError>;
}

#[async_trait]
pub trait GetTransformations: Send + Sync {
  async fn run(&self, hero_id: &str) -> Result<Vec<Transformation>, AppError>;
}

/// A locally stored transformation by identifier.
pub trait GetTransformation: Send + Sync {
  fn run(&self, identifier: &str) -> Result<Transformation, AppError>;
}

#[async_trait]
pub trait GetLocations: Send + Sync {
  async fn run(&self, hero_id: &str) -> Result<Vec<Location>, AppError>;
}

#[async_trait]
pub trait Login: Send + Sync {
  async fn run(&self, username: &str, password: &str) -> Result<(), LoginError>;
}

pub trait Logout: Send + Sync {
  fn run(&self) -> Result<(), AppError>;
}
