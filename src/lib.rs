//! Client for the Dragon Ball heroes API with a local-first SQLite cache.

pub mod api;
pub mod app;
pub mod config;
pub mod domain;
pub mod logging;
pub mod presentation;
pub mod session;
pub mod store;

#[cfg(test)]
mod fixtures;
