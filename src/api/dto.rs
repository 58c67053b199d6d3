//! Wire representations of API payloads.
//!
//! These types are separate from the stored entities and domain models so the
//! wire names (`description`, `latitud`, `dateShow`, ...) stay at the edge.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeroDto {
  #[serde(rename = "id", default)]
  pub identifier: Option<String>,
  #[serde(default)]
  pub name: Option<String>,
  #[serde(rename = "description", default)]
  pub info: Option<String>,
  #[serde(default)]
  pub photo: Option<String>,
  #[serde(default)]
  pub favorite: Option<bool>,
}

impl HeroDto {
  /// Reference to a hero by identifier only, as nested in other payloads.
  pub fn reference(identifier: impl Into<String>) -> Self {
    Self {
      identifier: Some(identifier.into()),
      ..Self::default()
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransformationDto {
  #[serde(rename = "id", default)]
  pub identifier: Option<String>,
  #[serde(default)]
  pub name: Option<String>,
  #[serde(rename = "description", default)]
  pub info: Option<String>,
  #[serde(default)]
  pub photo: Option<String>,
  #[serde(default)]
  pub hero: Option<HeroDto>,
}

impl TransformationDto {
  pub fn owner_id(&self) -> Option<&str> {
    self.hero.as_ref().and_then(|h| h.identifier.as_deref())
  }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationDto {
  #[serde(rename = "id", default)]
  pub identifier: Option<String>,
  #[serde(rename = "longitud", default)]
  pub longitude: Option<String>,
  #[serde(rename = "latitud", default)]
  pub latitude: Option<String>,
  #[serde(rename = "dateShow", default)]
  pub date: Option<String>,
  #[serde(default)]
  pub hero: Option<HeroDto>,
}

impl LocationDto {
  pub fn owner_id(&self) -> Option<&str> {
    self.hero.as_ref().and_then(|h| h.identifier.as_deref())
  }
}
