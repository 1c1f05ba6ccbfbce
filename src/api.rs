//! Backend API seam.

use std::collections::BTreeMap;

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;

use crate::{catalog::CatalogItem, orders::OrderPayload};

/// Per-field validation messages from a 422 response, first message per
/// field, keyed by field name.
pub type FieldErrors = BTreeMap<String, String>;

/// Errors surfaced by the backend API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The bearer token was rejected (401); the operator must sign in again.
    #[error("authentication rejected; sign in again")]
    Unauthorized,

    /// The backend rejected one or more fields (422). The cart and entered
    /// fields are preserved so the operator can correct and retry.
    #[error("validation failed for {} field(s)", .0.len())]
    Validation(FieldErrors),

    /// The backend returned a response this client does not understand.
    #[error("unexpected response from backend: {0}")]
    UnexpectedResponse(String),
}

/// The two backend operations this client performs.
///
/// Kept behind a trait so the order workflow can be exercised without a
/// network in tests.
#[automock]
#[async_trait]
pub trait OrderApi: Send + Sync {
    /// Loads the catalog of purchasable items.
    async fn load_catalog(&self) -> Result<Vec<CatalogItem>, ApiError>;

    /// Submits an order payload, returning the server confirmation message.
    async fn submit_order(&self, payload: &OrderPayload) -> Result<String, ApiError>;
}
