//! Stored entity to domain model conversions.

use chrono::{DateTime, Utc};

use super::models::{Hero, Location, Transformation};
use crate::store::{HeroEntity, LocationEntity, Related, TransformationEntity};

impl From<HeroEntity> for Hero {
  fn from(entity: HeroEntity) -> Self {
    Hero {
      identifier: entity.identifier,
      name: entity.name,
      info: entity.info,
      photo: entity.photo,
      favorite: entity.favorite,
    }
  }
}

/// `None` for orphans: a transformation is only meaningful with its hero.
pub fn transformation(related: Related<TransformationEntity>) -> Option<Transformation> {
  let hero = related.hero?;
  let entity = related.entity;
  Some(Transformation {
    identifier: entity.identifier,
    name: entity.name,
    info: entity.info,
    photo: entity.photo,
    hero: hero.into(),
  })
}

pub fn location(related: Related<LocationEntity>) -> Option<Location> {
  let hero = related.hero?;
  let entity = related.entity;
  Some(Location {
    date: entity.date.as_deref().and_then(parse_date),
    identifier: entity.identifier,
    latitude: entity.latitude,
    longitude: entity.longitude,
    hero: hero.into(),
  })
}

fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
  match DateTime::parse_from_rfc3339(raw) {
    Ok(date) => Some(date.with_timezone(&Utc)),
    Err(e) => {
      tracing::debug!(raw, error = %e, "Ignoring unparseable location date");
      None
    }
  }
}
