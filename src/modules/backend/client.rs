//! Thin typed wrapper over `reqwest` for the category/member backend
//!
//! Every call is a single round-trip: no retry, no idempotency key, no local
//! cache. Error bodies are expected to carry a `message` field that is
//! surfaced to the operator verbatim.

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::core::config::BackendConfig;
use crate::core::error::{AppError, Result};

/// `{ message, data }` wrapper used by every single-entity and list endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataEnvelope<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: T,
}

/// `{ message, deletedId }` returned by delete endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedEnvelope {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub deleted_id: i64,
}

/// Backend error body
#[derive(Debug, Deserialize)]
struct BackendErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// HTTP client for the remote REST backend
pub struct BackendClient {
    http_client: Client,
    base_url: String,
}

impl BackendClient {
    /// Build a client from configuration
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        debug!("GET {}", url);
        self.send(self.http_client.get(&url), "GET", &url).await
    }

    pub async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let url = self.url(path);
        debug!("GET {} (with query)", url);
        self.send(self.http_client.get(&url).query(query), "GET", &url)
            .await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.url(path);
        debug!("POST {}", url);
        self.send(self.http_client.post(&url).json(body), "POST", &url)
            .await
    }

    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.url(path);
        debug!("PUT {}", url);
        self.send(self.http_client.put(&url).json(body), "PUT", &url)
            .await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        debug!("DELETE {}", url);
        self.send(self.http_client.delete(&url), "DELETE", &url)
            .await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        method: &str,
        url: &str,
    ) -> Result<T> {
        let response = request.send().await.map_err(|e| {
            error!("Backend request failed: {} {} - {}", method, url, e);
            AppError::ExternalServiceError(format!("Failed to reach backend: {}", e))
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = error_from_response(status, &body);
            warn!("Backend error: {} {} - HTTP {} - {}", method, url, status, err);
            return Err(err);
        }

        response.json::<T>().await.map_err(|e| {
            error!("Failed to parse backend response: {} {} - {}", method, url, e);
            AppError::Internal(format!("Failed to parse backend response: {}", e))
        })
    }
}

/// Map a non-2xx backend response onto the error taxonomy
fn error_from_response(status: StatusCode, body: &str) -> AppError {
    let message = serde_json::from_str::<BackendErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));

    match status {
        StatusCode::NOT_FOUND => AppError::NotFound(message),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            AppError::BadRequest(message)
        }
        StatusCode::UNAUTHORIZED => AppError::Unauthorized(message),
        StatusCode::FORBIDDEN => AppError::Forbidden(message),
        StatusCode::CONFLICT => AppError::Conflict(message),
        _ => AppError::ExternalServiceError(message),
    }
}
