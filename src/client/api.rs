use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::domain::question::Question;
use crate::dto::categories::CategoryDto;
use crate::dto::envelope::{ErrorEnvelope, ListEnvelope};

/// Blanket limit applied to every call; there are no retries.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server responded {status}: {message}")]
    Server { status: u16, message: String },
}

/// Async client for the `/api` endpoints.
#[derive(Debug, Clone)]
pub struct CatalogApi {
    http: Client,
    base_url: String,
}

impl CatalogApi {
    /// `base_url` points at the API root, e.g. `http://localhost:5000/api`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let http = Client::builder().timeout(DEFAULT_TIMEOUT).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub async fn categories(&self) -> Result<Vec<CategoryDto>, ApiError> {
        self.fetch_list(self.http.get(self.endpoint("categories")))
            .await
    }

    pub async fn questions(&self) -> Result<Vec<Question>, ApiError> {
        self.fetch_list(self.http.get(self.endpoint("questions")))
            .await
    }

    /// Searches question titles. The term is sent as-is; blank terms are the
    /// caller's to suppress.
    pub async fn search_questions(&self, term: &str) -> Result<Vec<Question>, ApiError> {
        self.fetch_list(
            self.http
                .get(self.endpoint("questions/search"))
                .query(&[("search", term)]),
        )
        .await
    }

    async fn fetch_list<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<Vec<T>, ApiError> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = match response.json::<ErrorEnvelope>().await {
                Ok(envelope) => envelope.error,
                Err(_) => status.canonical_reason().unwrap_or("unknown error").to_string(),
            };
            log::warn!("Catalog API error {status}: {message}");
            return Err(ApiError::Server {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: ListEnvelope<T> = response.json().await?;
        Ok(envelope.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_endpoints_without_double_slashes() {
        let api = CatalogApi::new("http://localhost:5000/api/").unwrap();

        assert_eq!(api.endpoint("categories"), "http://localhost:5000/api/categories");
        assert_eq!(
            api.endpoint("/questions/search"),
            "http://localhost:5000/api/questions/search"
        );
    }

    #[test]
    fn decodes_server_envelope() {
        let body = r#"{"success":true,"count":1,"data":[
            {"id":1,"title":"Reverse a Linked List","url":{"yt_link":"https://youtu.be/rll"},"tags":["list"]}
        ]}"#;

        let envelope: ListEnvelope<Question> = serde_json::from_str(body).unwrap();

        assert_eq!(envelope.count, 1);
        assert!(envelope.data[0].url.p1_link.is_none());
        assert_eq!(envelope.data[0].tags[0].as_str(), "list");
    }
}
