//! Client configuration.

use clap::Args;

use crate::client::ApiConfig;

/// Backend connection settings, from flags or environment.
#[derive(Debug, Args)]
pub struct BackendConfig {
    /// Backend API base URL
    #[arg(long, env = "POS_API_URL", default_value = "http://localhost:8000/api")]
    pub api_url: String,

    /// Bearer token for the backend API
    #[arg(long, env = "POS_API_TOKEN", hide_env_values = true)]
    pub api_token: String,
}

impl BackendConfig {
    /// Builds the client configuration for [`crate::client::PosClient`].
    #[must_use]
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            base_url: self.api_url.clone(),
            token: self.api_token.clone(),
        }
    }
}
