use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct Hero {
  pub identifier: String,
  pub name: Option<String>,
  pub info: Option<String>,
  pub photo: Option<String>,
  pub favorite: Option<bool>,
}

impl Hero {
  pub fn display_name(&self) -> &str {
    self.name.as_deref().unwrap_or(&self.identifier)
  }

  pub fn is_favorite(&self) -> bool {
    self.favorite.unwrap_or(false)
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transformation {
  pub identifier: String,
  pub name: Option<String>,
  pub info: Option<String>,
  pub photo: Option<String>,
  pub hero: Hero,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Location {
  pub identifier: String,
  /// Decimal degrees, as sent by the server.
  pub latitude: Option<String>,
  pub longitude: Option<String>,
  pub date: Option<DateTime<Utc>>,
  pub hero: Hero,
}

impl Location {
  /// `(latitude, longitude)` when both parse as finite numbers.
  pub fn coordinate(&self) -> Option<(f64, f64)> {
    let latitude: f64 = self.latitude.as_deref()?.trim().parse().ok()?;
    let longitude: f64 = self.longitude.as_deref()?.trim().parse().ok()?;
    (latitude.is_finite() && longitude.is_finite()).then_some((latitude, longitude))
  }
}
