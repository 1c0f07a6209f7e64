//! HTTP implementation of [`DatasourceApi`] over `reqwest`.

use async_trait::async_trait;
use log::debug;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::Serialize;

use super::{ApiError, ApiResponse, DatasourceApi, DatasourceList};
use crate::constants::API_TOKEN_HEADER;
use crate::datasource::DataSource;

/// Client for the `datasources` collection of a live server.
///
/// No timeout or retry policy is configured here; requests use the transport
/// defaults and are attempted once.
pub struct HttpApi {
    client: Client,
    base: Url,
    token: Option<String>,
}

impl HttpApi {
    /// Create a client for the collection rooted at `base_url`
    /// (for example `https://server/rudder/api/latest/datasources`).
    pub fn new(base_url: &str, token: Option<String>, accept_invalid_certs: bool) -> Result<Self, ApiError> {
        let base = Url::parse(base_url).map_err(|e| ApiError::InvalidData(format!("invalid URL '{}': {}", base_url, e)))?;
        if base.cannot_be_a_base() {
            return Err(ApiError::InvalidData(format!("URL '{}' cannot be used as a base", base_url)));
        }

        let client = Client::builder()
            .danger_accept_invalid_certs(accept_invalid_certs)
            .build()
            .map_err(|e| ApiError::Network(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client, base, token })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// URL of a single data source, `{base}/{id}`, with the id percent-encoded.
    ///
    /// An empty id would address the collection itself and is rejected.
    pub fn item_url(&self, id: &str) -> Result<Url, ApiError> {
        if id.is_empty() {
            return Err(ApiError::InvalidData("empty data source id".to_string()));
        }
        let mut url = self.base.clone();
        // cannot_be_a_base was rejected in new()
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(id);
        }
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        debug!("{} {}", method, url);
        let builder = self.client.request(method, url);
        match &self.token {
            Some(token) => builder.header(API_TOKEN_HEADER, token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let response = builder.send().await.map_err(|e| ApiError::Network(e.to_string()))?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ApiError::Auth(format!("server answered {}", status)));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: error_message(&body).unwrap_or(body),
            });
        }

        Ok(response)
    }

    /// Send a request whose successful answer carries no payload we need,
    /// still honoring an `"result": "error"` envelope.
    async fn send_unit<B: Serialize + ?Sized>(&self, method: Method, url: Url, body: Option<&B>) -> Result<(), ApiError> {
        let mut builder = self.request(method, url);
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = self.send(builder).await?;
        let status = response.status().as_u16();
        let text = response.text().await.map_err(|e| ApiError::Network(e.to_string()))?;

        if text.trim().is_empty() {
            return Ok(());
        }
        match serde_json::from_str::<ApiResponse<serde_json::Value>>(&text) {
            Ok(envelope) if envelope.result.as_deref() == Some("error") => Err(ApiError::Status {
                status,
                message: envelope.error_details.unwrap_or_else(|| "unknown error".to_string()),
            }),
            _ => Ok(()),
        }
    }
}

/// Extract `errorDetails` from an error body, if it is an API envelope
fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ApiResponse<serde_json::Value>>(body)
        .ok()
        .and_then(|envelope| envelope.error_details)
}

#[async_trait]
impl DatasourceApi for HttpApi {
    async fn fetch_all(&self) -> Result<Vec<DataSource>, ApiError> {
        let response = self.send(self.request(Method::GET, self.base.clone())).await?;
        let envelope: ApiResponse<DatasourceList> = response
            .json()
            .await
            .map_err(|e| ApiError::InvalidData(e.to_string()))?;

        if envelope.result.as_deref() == Some("error") {
            return Err(ApiError::Status {
                status: 200,
                message: envelope.error_details.unwrap_or_else(|| "unknown error".to_string()),
            });
        }

        envelope
            .data
            .map(|list| list.datasources)
            .ok_or_else(|| ApiError::InvalidData("response has no data".to_string()))
    }

    async fn create(&self, source: &DataSource) -> Result<(), ApiError> {
        self.send_unit(Method::PUT, self.base.clone(), Some(source)).await
    }

    async fn update(&self, id: &str, source: &DataSource) -> Result<(), ApiError> {
        self.send_unit(Method::POST, self.item_url(id)?, Some(source)).await
    }

    async fn update_partial(&self, id: &str, fields: serde_json::Value) -> Result<(), ApiError> {
        self.send_unit(Method::POST, self.item_url(id)?, Some(&fields)).await
    }

    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.send_unit::<()>(Method::DELETE, self.item_url(id)?, None).await
    }
}
