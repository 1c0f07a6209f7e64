//! Factory for building the server client from configuration.

use anyhow::{Context, Result};
use log::{info, warn};
use std::sync::Arc;

use super::{DatasourceApi, HttpApi};
use crate::config::ApiConfig;

/// Create the API client described by `config`.
///
/// The token is read from the environment variable named by
/// `config.token_env`; a missing token is logged and requests are sent
/// unauthenticated, leaving the server to refuse them.
///
/// # Errors
/// Returns error if the collection URL is invalid or the HTTP client cannot be built
pub fn create_api(config: &ApiConfig) -> Result<Arc<dyn DatasourceApi>> {
    let url = config.collection_url();
    let token = config.token();
    if token.is_none() {
        warn!("{} is not set, sending requests without an API token", config.token_env);
    }
    if config.accept_invalid_certs {
        warn!("TLS certificate verification is disabled for {}", url);
    }

    let api = HttpApi::new(&url, token, config.accept_invalid_certs)
        .with_context(|| format!("Failed to set up client for {}", url))?;
    info!("Using data source collection at {}", url);
    Ok(Arc::new(api))
}
