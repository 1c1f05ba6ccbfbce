//! HTTP client for the point-of-sale backend.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::debug;

use crate::{
    api::{ApiError, FieldErrors, OrderApi},
    catalog::CatalogItem,
    orders::OrderPayload,
};

/// Configuration for connecting to the backend.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Backend base URL, e.g. `"http://localhost:8000/api"`.
    pub base_url: String,

    /// Bearer token attached to every outgoing request.
    pub token: String,
}

/// Backend client attaching the bearer token to every request.
#[derive(Debug, Clone)]
pub struct PosClient {
    config: ApiConfig,
    http: Client,
}

impl PosClient {
    /// Create a new client from the given configuration.
    #[must_use]
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl OrderApi for PosClient {
    async fn load_catalog(&self) -> Result<Vec<CatalogItem>, ApiError> {
        let url = self.url("items");

        debug!(%url, "loading catalog");

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.config.token)
            .send()
            .await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(ApiError::UnexpectedResponse(format!(
                "catalog load failed with status {status}: {text}"
            )));
        }

        let items: Vec<CatalogItem> = response.json().await?;

        debug!(count = items.len(), "catalog loaded");

        Ok(items)
    }

    async fn submit_order(&self, payload: &OrderPayload) -> Result<String, ApiError> {
        let url = self.url("orders");

        debug!(%url, lines = payload.items.len(), "submitting order");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.token)
            .json(payload)
            .send()
            .await?;

        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }

        if status == StatusCode::UNPROCESSABLE_ENTITY {
            let body: ValidationBody = response.json().await?;

            return Err(ApiError::Validation(first_messages(body)));
        }

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();

            return Err(ApiError::UnexpectedResponse(format!(
                "order submission failed with status {status}: {text}"
            )));
        }

        let body: ConfirmationBody = response.json().await?;

        body.message.ok_or_else(|| {
            ApiError::UnexpectedResponse("success response carried no message".to_string())
        })
    }
}

#[derive(Debug, Deserialize)]
struct ConfirmationBody {
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ValidationBody {
    #[serde(default)]
    errors: std::collections::BTreeMap<String, Vec<String>>,
}

/// Keep the first message per field; that is what gets shown inline next to
/// the input.
fn first_messages(body: ValidationBody) -> FieldErrors {
    body.errors
        .into_iter()
        .filter_map(|(field, mut messages)| {
            if messages.is_empty() {
                None
            } else {
                Some((field, messages.remove(0)))
            }
        })
        .collect()
}
