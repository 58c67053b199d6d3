//! Persisted row types and their construction from wire DTOs.

use crate::api::dto::{HeroDto, LocationDto, TransformationDto};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeroEntity {
  pub identifier: String,
  pub name: Option<String>,
  pub info: Option<String>,
  pub photo: Option<String>,
  pub favorite: Option<bool>,
}

impl HeroEntity {
  /// `None` when the payload has no identifier.
  pub fn from_dto(dto: &HeroDto) -> Option<Self> {
    Some(Self {
      identifier: dto.identifier.clone()?,
      name: dto.name.clone(),
      info: dto.info.clone(),
      photo: dto.photo.clone(),
      favorite: dto.favorite,
    })
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformationEntity {
  pub identifier: String,
  pub name: Option<String>,
  pub info: Option<String>,
  pub photo: Option<String>,
  pub hero_id: Option<String>,
}

impl TransformationEntity {
  /// `hero_id` is the owner as resolved against the store, not the raw wire value.
  pub fn from_dto(dto: &TransformationDto, hero_id: Option<String>) -> Option<Self> {
    Some(Self {
      identifier: dto.identifier.clone()?,
      name: dto.name.clone(),
      info: dto.info.clone(),
      photo: dto.photo.clone(),
      hero_id,
    })
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationEntity {
  pub identifier: String,
  pub latitude: Option<String>,
  pub longitude: Option<String>,
  pub date: Option<String>,
  pub hero_id: Option<String>,
}

impl LocationEntity {
  pub fn from_dto(dto: &LocationDto, hero_id: Option<String>) -> Option<Self> {
    Some(Self {
      identifier: dto.identifier.clone()?,
      latitude: dto.latitude.clone(),
      longitude: dto.longitude.clone(),
      date: dto.date.clone(),
      hero_id,
    })
  }
}

/// A row together with its owner, resolved at read time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Related<T> {
  pub entity: T,
  pub hero: Option<HeroEntity>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
  #[default]
  Ascending,
  Descending,
}

impl SortOrder {
  pub fn from_ascending(ascending: bool) -> Self {
    if ascending {
      SortOrder::Ascending
    } else {
      SortOrder::Descending
    }
  }

  pub(crate) fn sql(&self) -> &'static str {
    match self {
      SortOrder::Ascending => "ASC",
      SortOrder::Descending => "DESC",
    }
  }
}

/// Predicate for single-hero lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeroFilter<'a> {
  Identifier(&'a str),
  Name(&'a str),
}

/// Row counts per entity kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreCounts {
  pub heros: usize,
  pub transformations: usize,
  pub locations: usize,
}

impl StoreCounts {
  pub fn is_empty(&self) -> bool {
    self.heros == 0 && self.transformations == 0 && self.locations == 0
  }
}
