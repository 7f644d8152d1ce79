//! Client side of the catalog: the browsing/search view model and, with the
//! `client` feature, an HTTP client for the API.

#[cfg(feature = "client")]
pub mod api;
pub mod view;
