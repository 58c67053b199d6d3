//! Concrete API endpoints.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Serialize;
use std::collections::BTreeMap;

use super::dto::{HeroDto, LocationDto, TransformationDto};
use super::request::{HttpMethod, HttpRequest, RawBody};

#[derive(Debug, Serialize)]
struct NameBody<'a> {
  name: &'a str,
}

#[derive(Debug, Serialize)]
struct IdBody<'a> {
  id: &'a str,
}

/// `POST /api/auth/login` with Basic credentials; responds with the raw token.
#[derive(Debug, Clone)]
pub struct LoginRequest {
  authorization: String,
}

impl LoginRequest {
  pub fn new(username: &str, password: &str) -> Self {
    let credentials = STANDARD.encode(format!("{}:{}", username, password));
    Self {
      authorization: format!("Basic {}", credentials),
    }
  }
}

impl HttpRequest for LoginRequest {
  type Response = RawBody;

  fn path(&self) -> &str {
    "/api/auth/login"
  }

  fn method(&self) -> HttpMethod {
    HttpMethod::Post
  }

  fn headers(&self) -> BTreeMap<String, String> {
    BTreeMap::from([("Authorization".to_string(), self.authorization.clone())])
  }
}

/// `POST /api/heros/all`; an empty name lists every hero.
#[derive(Debug, Clone)]
pub struct HerosRequest {
  name: String,
}

impl HerosRequest {
  pub fn new(name: &str) -> Self {
    Self {
      name: name.to_string(),
    }
  }
}

impl HttpRequest for HerosRequest {
  type Response = Vec<HeroDto>;

  fn path(&self) -> &str {
    "/api/heros/all"
  }

  fn method(&self) -> HttpMethod {
    HttpMethod::Post
  }

  fn body(&self) -> serde_json::Result<Option<Vec<u8>>> {
    serde_json::to_vec(&NameBody { name: &self.name }).map(Some)
  }

  fn authorized(&self) -> bool {
    true
  }
}

/// `POST /api/heros/tranformations` for one hero (the path typo is the server's).
#[derive(Debug, Clone)]
pub struct TransformationsRequest {
  hero_id: String,
}

impl TransformationsRequest {
  pub fn new(hero_id: &str) -> Self {
    Self {
      hero_id: hero_id.to_string(),
    }
  }
}

impl HttpRequest for TransformationsRequest {
  type Response = Vec<TransformationDto>;

  fn path(&self) -> &str {
    "/api/heros/tranformations"
  }

  fn method(&self) -> HttpMethod {
    HttpMethod::Post
  }

  fn body(&self) -> serde_json::Result<Option<Vec<u8>>> {
    serde_json::to_vec(&IdBody { id: &self.hero_id }).map(Some)
  }

  fn authorized(&self) -> bool {
    true
  }
}

/// `POST /api/heros/locations` for one hero.
#[derive(Debug, Clone)]
pub struct LocationsRequest {
  hero_id: String,
}

impl LocationsRequest {
  pub fn new(hero_id: &str) -> Self {
    Self {
      hero_id: hero_id.to_string(),
    }
  }
}

impl HttpRequest for LocationsRequest {
  type Response = Vec<LocationDto>;

  fn path(&self) -> &str {
    "/api/heros/locations"
  }

  fn method(&self) -> HttpMethod {
    HttpMethod::Post
  }

  fn body(&self) -> serde_json::Result<Option<Vec<u8>>> {
    serde_json::to_vec(&IdBody { id: &self.hero_id }).map(Some)
  }

  fn authorized(&self) -> bool {
    true
  }
}
