//! Server abstraction for the `datasources` REST collection.
//!
//! This module defines the interface the synchronization layer uses to reach
//! the server, along with the error type every implementation reports.

use async_trait::async_trait;
use serde::Deserialize;

use crate::datasource::DataSource;

pub mod factory;
pub mod http;

pub use http::HttpApi;

/// Error types for server operations.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Server rejected the request ({status}): {message}")]
    Status { status: u16, message: String },

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Envelope wrapped around every server response.
///
/// Successful calls carry `data`; failed calls carry `errorDetails`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub result: Option<String>,
    pub data: Option<T>,
    #[serde(default)]
    pub error_details: Option<String>,
}

/// Payload of the list call: `{ "datasources": [...] }`
#[derive(Debug, Deserialize)]
pub struct DatasourceList {
    pub datasources: Vec<DataSource>,
}

/// Operations on the server-side data source collection.
///
/// Every method issues exactly one request; implementations must not retry,
/// since a create that already reached the server has side effects.
#[async_trait]
pub trait DatasourceApi: Send + Sync {
    /// `GET {base}`
    async fn fetch_all(&self) -> Result<Vec<DataSource>, ApiError>;

    /// `PUT {base}` with the full data source
    async fn create(&self, source: &DataSource) -> Result<(), ApiError>;

    /// `POST {base}/{id}` with the full data source
    async fn update(&self, id: &str, source: &DataSource) -> Result<(), ApiError>;

    /// `POST {base}/{id}` with only the fields to change
    async fn update_partial(&self, id: &str, fields: serde_json::Value) -> Result<(), ApiError>;

    /// `DELETE {base}/{id}`
    async fn delete(&self, id: &str) -> Result<(), ApiError>;
}
