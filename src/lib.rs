//! Core library exports for the question catalog.
//!
//! The `data` feature exposes the domain model and the Diesel-backed
//! repositories, `server` adds forms, services and actix-web routes, and
//! `client` adds an HTTP client for the catalog API. The browsing/search
//! view model in [`client::view`] is always available.

pub mod client;
pub mod domain;
pub mod dto;

#[cfg(feature = "data")]
pub mod db;
#[cfg(feature = "data")]
pub mod error_conversions;
#[cfg(feature = "data")]
pub mod models;
#[cfg(feature = "data")]
pub mod repository;
#[cfg(feature = "data")]
pub mod schema;

#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod services;
