use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::error::RequestError;
use super::messages::{
    LieDetectResponse, ParticipantRole, SessionRequest, TranscriptResponse, UploadResponse,
};
use super::transport::AnalysisTransport;
use crate::config::ApiConfig;
use crate::media::{MediaRef, VIDEO_MIME};

const USER_AGENT: &str = concat!("liedetect-client/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the lie-detection service
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, RequestError> {
        Self::with_base_url(&config.base_url, config.timeout())
    }

    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self, RequestError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| RequestError::Network(e.to_string()))?;

        let base_url = base_url.trim_end_matches('/').to_string();
        info!("Analysis service at {}", base_url);

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Turn a response into `T`, or into `RequestError::Status` with the
    /// full body when the status is not 2xx.
    async fn handle_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, RequestError> {
        if !response.status().is_success() {
            return Err(Self::status_error(response).await);
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| RequestError::Decode(e.to_string()))
    }

    /// Build `RequestError::Status` from a non-2xx response, keeping the
    /// full body, or a placeholder naming the read error.
    async fn status_error(response: reqwest::Response) -> RequestError {
        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => format!("<failed to read error body: {}>", e),
        };
        warn!("Service returned {}: {}", status, body);

        RequestError::Status {
            status: status.as_u16(),
            body,
        }
    }

    async fn post_session<T: DeserializeOwned>(
        &self,
        path: &str,
        session_id: &str,
    ) -> Result<T, RequestError> {
        let url = self.endpoint(path);
        debug!(session_id = %session_id, url = %url, "POST");

        let response = self
            .http
            .post(&url)
            .header(ACCEPT, "application/json")
            .json(&SessionRequest {
                session_id: session_id.to_string(),
            })
            .send()
            .await?;

        Self::handle_response(response).await
    }

    /// `GET /health`; any 2xx counts as healthy
    pub async fn health(&self) -> Result<(), RequestError> {
        let response = self.http.get(self.endpoint("health")).send().await?;

        if !response.status().is_success() {
            return Err(Self::status_error(response).await);
        }

        Ok(())
    }

    /// `GET /session/{id}`: the service's stored record for a session
    pub async fn session(&self, session_id: &str) -> Result<serde_json::Value, RequestError> {
        let response = self
            .http
            .get(self.endpoint(&format!("session/{}", session_id)))
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        Self::handle_response(response).await
    }
}

#[async_trait]
impl AnalysisTransport for ApiClient {
    async fn upload(
        &self,
        media: &MediaRef,
        role: ParticipantRole,
        session_id: &str,
    ) -> Result<UploadResponse, RequestError> {
        let bytes = media
            .load()
            .await
            .map_err(|e| RequestError::Media(format!("{:#}", e)))?;
        let size = bytes.len();

        let video = Part::bytes(bytes)
            .file_name(MediaRef::upload_file_name(session_id))
            .mime_str(VIDEO_MIME)
            .map_err(|e| RequestError::Media(e.to_string()))?;

        let form = Form::new()
            .text("sessionId", session_id.to_string())
            .text("role", role.as_str())
            .part("video", video);

        info!(
            "Uploading {} ({} bytes) for session {} as {}",
            media, size, session_id, role
        );

        let response = self
            .http
            .post(self.endpoint("upload"))
            .header(ACCEPT, "application/json")
            .multipart(form)
            .send()
            .await?;

        let uploaded: UploadResponse = Self::handle_response(response).await?;

        info!(
            "Upload stored for session {} (video={}, audio={:?})",
            uploaded.session_id, uploaded.video_key, uploaded.audio_key
        );

        Ok(uploaded)
    }

    async fn analyze(&self, session_id: &str) -> Result<LieDetectResponse, RequestError> {
        let response: LieDetectResponse = self.post_session("liedetect", session_id).await?;
        response.summary.validate()?;

        info!(
            "Lie detection finished for session {} (lieProbability={:.2})",
            session_id, response.summary.lie_probability
        );

        Ok(response)
    }

    async fn transcript(&self, session_id: &str) -> Result<TranscriptResponse, RequestError> {
        let response: TranscriptResponse = self.post_session("transcript", session_id).await?;
        if let Some(summary) = &response.summary {
            summary.validate()?;
        }

        info!(
            "Transcript received for session {} ({} chars, summary={})",
            session_id,
            response.transcript.len(),
            response.summary.is_some()
        );

        Ok(response)
    }

    fn name(&self) -> &str {
        "http"
    }
}
