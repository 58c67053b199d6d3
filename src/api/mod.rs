//! Typed HTTP request pipeline for the heroes API.
//!
//! A request is described declaratively by an [`HttpRequest`] implementation,
//! turned into a [`RequestEnvelope`] by [`RequestBuilder`], passed through the
//! [`Interceptor`] chain and dispatched exactly once by [`ApiSession`] over a
//! [`Transport`].

pub mod dto;
mod error;
mod interceptor;
mod request;
pub mod requests;
mod session;
mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use error::ApiError;
pub use interceptor::{AuthorizationInterceptor, Interceptor};
pub use request::{Decodable, HttpMethod, HttpRequest, RawBody, RequestBuilder, RequestEnvelope};
pub use session::ApiSession;
pub use transport::{ReqwestTransport, Transport, TransportError, TransportResponse};
