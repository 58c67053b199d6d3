//! Declarative request descriptions and envelope construction.

use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use url::Url;

use super::error::ApiError;

/// HTTP methods used by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
  Get,
  Post,
}

impl HttpMethod {
  pub fn as_str(&self) -> &'static str {
    match self {
      HttpMethod::Get => "GET",
      HttpMethod::Post => "POST",
    }
  }
}

/// A response type the pipeline knows how to produce from a 2xx body.
pub trait Decodable: Sized {
  fn decode(body: Vec<u8>) -> Result<Self, serde_json::Error>;
}

/// JSON list responses.
impl<T: DeserializeOwned> Decodable for Vec<T> {
  fn decode(body: Vec<u8>) -> Result<Self, serde_json::Error> {
    serde_json::from_slice(&body)
  }
}

/// Opaque response body, returned verbatim without JSON parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBody(pub Vec<u8>);

impl RawBody {
  pub fn into_inner(self) -> Vec<u8> {
    self.0
  }
}

impl Decodable for RawBody {
  fn decode(body: Vec<u8>) -> Result<Self, serde_json::Error> {
    Ok(RawBody(body))
  }
}

/// Description of a single API call.
///
/// Implementors only state what differs from the defaults: no query
/// parameters, no extra headers, no body and no authorization.
pub trait HttpRequest: Send + Sync {
  /// Expected type of a successful response.
  type Response: Decodable + Send;

  fn path(&self) -> &str;

  fn method(&self) -> HttpMethod;

  fn query_parameters(&self) -> Option<Vec<(String, String)>> {
    None
  }

  fn headers(&self) -> BTreeMap<String, String> {
    BTreeMap::new()
  }

  /// JSON-encoded body, if the request carries one.
  fn body(&self) -> serde_json::Result<Option<Vec<u8>>> {
    Ok(None)
  }

  /// Whether the bearer token must be attached.
  fn authorized(&self) -> bool {
    false
  }
}

/// Outgoing request, fully built and ready for the interceptor chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestEnvelope {
  pub method: HttpMethod,
  pub url: Url,
  pub headers: BTreeMap<String, String>,
  pub body: Option<Vec<u8>>,
}

impl RequestEnvelope {
  pub fn header(&self, name: &str) -> Option<&str> {
    self.headers.get(name).map(String::as_str)
  }

  pub fn set_header(&mut self, name: &str, value: impl Into<String>) {
    self.headers.insert(name.to_string(), value.into());
  }
}

/// Builds envelopes against a fixed scheme and host.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
  scheme: String,
  host: String,
}

impl RequestBuilder {
  pub fn new(scheme: impl Into<String>, host: impl Into<String>) -> Self {
    Self {
      scheme: scheme.into(),
      host: host.into(),
    }
  }

  fn default_headers() -> BTreeMap<String, String> {
    BTreeMap::from([
      (
        "Content-Type".to_string(),
        "application/json; charset=utf-8".to_string(),
      ),
      ("Accept".to_string(), "application/json".to_string()),
    ])
  }

  /// Build the request URL from host, path and query parameters.
  pub fn url<R: HttpRequest + ?Sized>(&self, request: &R) -> Result<Url, ApiError> {
    let path = request.path();
    let malformed = || ApiError::MalformedUrl {
      url: path.to_string(),
    };

    if !path.starts_with('/') {
      return Err(malformed());
    }

    let mut url =
      Url::parse(&format!("{}://{}", self.scheme, self.host)).map_err(|_| malformed())?;
    if url.cannot_be_a_base() || url.host_str().is_none() {
      return Err(malformed());
    }
    url.set_path(path);

    if let Some(params) = request.query_parameters().filter(|p| !p.is_empty()) {
      url.query_pairs_mut().extend_pairs(params);
    }

    Ok(url)
  }

  /// Build the full envelope: method, merged headers and encoded body.
  pub fn build<R: HttpRequest + ?Sized>(&self, request: &R) -> Result<RequestEnvelope, ApiError> {
    let url = self.url(request)?;

    let body = request.body().map_err(|_| ApiError::BadRequest {
      url: request.path().to_string(),
    })?;

    // Request-specific headers win on conflict
    let mut headers = Self::default_headers();
    headers.extend(request.headers());

    Ok(RequestEnvelope {
      method: request.method(),
      url,
      headers,
      body,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde::ser::Error as _;

  struct FakeRequest {
    path: &'static str,
    query: Option<Vec<(String, String)>>,
    headers: BTreeMap<String, String>,
    body: Option<serde_json::Value>,
    broken_body: bool,
  }

  impl FakeRequest {
    fn new(path: &'static str) -> Self {
      Self {
        path,
        query: None,
        headers: BTreeMap::new(),
        body: None,
        broken_body: false,
      }
    }
  }

  impl HttpRequest for FakeRequest {
    type Response = Vec<serde_json::Value>;

    fn path(&self) -> &str {
      self.path
    }

    fn method(&self) -> HttpMethod {
      HttpMethod::Post
    }

    fn query_parameters(&self) -> Option<Vec<(String, String)>> {
      self.query.clone()
    }

    fn headers(&self) -> BTreeMap<String, String> {
      self.headers.clone()
    }

    fn body(&self) -> serde_json::Result<Option<Vec<u8>>> {
      if self.broken_body {
        return Err(serde_json::Error::custom("unencodable"));
      }
      self.body.as_ref().map(serde_json::to_vec).transpose()
    }
  }

  fn builder() -> RequestBuilder {
    RequestBuilder::new("https", "dragonball.keepcoding.education")
  }

  #[test]
  fn test_url_from_host_and_path() {
    let url = builder().url(&FakeRequest::new("/api/heros/all")).unwrap();
    assert_eq!(
      url.as_str(),
      "https://dragonball.keepcoding.education/api/heros/all"
    );
  }

  #[test]
  fn test_url_with_query_parameters() {
    let mut request = FakeRequest::new("/api/heros/all");
    request.query = Some(vec![("name".to_string(), "Son Goku".to_string())]);
    let url = builder().url(&request).unwrap();
    assert_eq!(url.query(), Some("name=Son+Goku"));
  }

  #[test]
  fn test_empty_query_parameters_leave_no_query() {
    let mut request = FakeRequest::new("/api/heros/all");
    request.query = Some(Vec::new());
    let url = builder().url(&request).unwrap();
    assert_eq!(url.query(), None);
  }

  #[test]
  fn test_malformed_host() {
    let builder = RequestBuilder::new("https", "not a host");
    let err = builder.build(&FakeRequest::new("/api/heros/all")).unwrap_err();
    assert_eq!(
      err,
      ApiError::MalformedUrl {
        url: "/api/heros/all".to_string()
      }
    );
  }

  #[test]
  fn test_relative_path_is_malformed() {
    let err = builder().build(&FakeRequest::new("api/heros/all")).unwrap_err();
    assert!(matches!(err, ApiError::MalformedUrl { .. }));
  }

  #[test]
  fn test_default_headers() {
    let envelope = builder().build(&FakeRequest::new("/api/heros/all")).unwrap();
    assert_eq!(
      envelope.header("Content-Type"),
      Some("application/json; charset=utf-8")
    );
    assert_eq!(envelope.header("Accept"), Some("application/json"));
    assert_eq!(envelope.method, HttpMethod::Post);
    assert!(envelope.body.is_none());
  }

  #[test]
  fn test_request_headers_win_on_conflict() {
    let mut request = FakeRequest::new("/api/auth/login");
    request
      .headers
      .insert("Accept".to_string(), "text/plain".to_string());
    request
      .headers
      .insert("Authorization".to_string(), "Basic abc".to_string());

    let envelope = builder().build(&request).unwrap();
    assert_eq!(envelope.header("Accept"), Some("text/plain"));
    assert_eq!(envelope.header("Authorization"), Some("Basic abc"));
    assert_eq!(
      envelope.header("Content-Type"),
      Some("application/json; charset=utf-8")
    );
  }

  #[test]
  fn test_body_is_json_encoded() {
    let mut request = FakeRequest::new("/api/heros/all");
    request.body = Some(serde_json::json!({ "name": "" }));
    let envelope = builder().build(&request).unwrap();
    assert_eq!(envelope.body.as_deref(), Some(br#"{"name":""}"#.as_slice()));
  }

  #[test]
  fn test_body_encoding_failure_is_bad_request() {
    let mut request = FakeRequest::new("/api/heros/all");
    request.broken_body = true;
    let err = builder().build(&request).unwrap_err();
    assert_eq!(
      err,
      ApiError::BadRequest {
        url: "/api/heros/all".to_string()
      }
    );
  }

  #[test]
  fn test_raw_body_is_not_parsed() {
    let raw = RawBody::decode(b"not json at all".to_vec()).unwrap();
    assert_eq!(raw.into_inner(), b"not json at all".to_vec());
  }

  #[test]
  fn test_json_list_decoding_rejects_garbage() {
    assert!(<Vec<serde_json::Value>>::decode(b"<html>".to_vec()).is_err());
  }
}
