//! Domain models, the local-first fetch policy and the use cases built on it.

pub mod cache;
mod error;
pub mod mappers;
mod models;
pub mod usecases;
pub mod validation;

pub use error::{AppError, LoginError};
pub use models::{Hero, Location, Transformation};
