//! Client for the video summarizer backend.
//!
//! Wraps the two backend endpoints and the data types they exchange. The
//! [`VideoApi`] trait is the seam the application container talks to, with
//! [`ApiClient`] as the HTTP implementation.

use crate::error::{ApiError, HEALTH_FAILED_MESSAGE, PROCESS_FAILED_MESSAGE};
use crate::utils::{endpoint_url, extract_error_detail};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Path of the processing endpoint.
const PROCESS_PATH: &str = "/api/videos/process";

/// Path of the health endpoint.
const HEALTH_PATH: &str = "/api/health";

/// A single submission to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessingRequest {
    /// YouTube video URL, as typed.
    pub youtube_url: String,

    /// Gemini API key, as typed.
    pub gemini_api_key: String,
}

/// A timestamped segment of a summarized video.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Chapter {
    pub timestamp: String,
    pub title: String,
    pub description: String,
}

/// Summary returned by the backend for one video.
///
/// Missing fields decode as empty values and render as empty text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingResult {
    pub video_title: String,
    pub duration: String,
    pub summary: String,
    pub chapters: Vec<Chapter>,
}

/// Body of the health endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthStatus {
    pub status: String,
    pub service: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Operations offered by the summarizer backend.
#[async_trait]
pub trait VideoApi: Send + Sync {
    /// Submits a video for summarization.
    async fn process_video(
        &self,
        youtube_url: &str,
        gemini_api_key: &str,
    ) -> Result<ProcessingResult, ApiError>;

    /// Checks that the backend is reachable and healthy.
    async fn check_health(&self) -> Result<HealthStatus, ApiError>;
}

/// HTTP client for the summarizer backend.
///
/// Every call is a single attempt with no timeout.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Creates a client for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Returns the base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl VideoApi for ApiClient {
    async fn process_video(
        &self,
        youtube_url: &str,
        gemini_api_key: &str,
    ) -> Result<ProcessingResult, ApiError> {
        let url = endpoint_url(&self.base_url, PROCESS_PATH)?;
        let body = ProcessingRequest {
            youtube_url: youtube_url.to_string(),
            gemini_api_key: gemini_api_key.to_string(),
        };

        tracing::debug!(%url, youtube_url, "submitting video for processing");

        let response = self.client.post(url).json(&body).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let raw = response.bytes().await.unwrap_or_default();
            let message =
                extract_error_detail(&raw).unwrap_or_else(|| PROCESS_FAILED_MESSAGE.to_string());
            tracing::warn!(status, %message, "video processing failed");
            return Err(ApiError::Status { status, message });
        }

        let result = response.json::<ProcessingResult>().await?;
        tracing::debug!(chapters = result.chapters.len(), "video processed");
        Ok(result)
    }

    async fn check_health(&self) -> Result<HealthStatus, ApiError> {
        let url = endpoint_url(&self.base_url, HEALTH_PATH)?;
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            tracing::warn!(status, "health check failed");
            return Err(ApiError::Status {
                status,
                message: HEALTH_FAILED_MESSAGE.to_string(),
            });
        }

        Ok(response.json::<HealthStatus>().await?)
    }
}
