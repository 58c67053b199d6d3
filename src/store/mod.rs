//! Local persisted store for heroes and their transformations and locations.
//!
//! Owner relationships are plain `hero_id` columns resolved when rows are
//! inserted and joined back when they are read; rows whose owner cannot be
//! resolved stay in the store but never show up in owner-scoped queries.

mod entities;
mod provider;
mod schema;

pub use entities::{
  HeroEntity, HeroFilter, LocationEntity, Related, SortOrder, StoreCounts, TransformationEntity,
};
pub use provider::StoreDataProvider;
