use async_trait::async_trait;

use super::error::RequestError;
use super::messages::{LieDetectResponse, ParticipantRole, TranscriptResponse, UploadResponse};
use crate::media::MediaRef;

/// Remote operations the session orchestrator depends on
///
/// Implementations:
/// - `ApiClient`: HTTP client for the lie-detection service
/// - test doubles that script responses and count calls
///
/// None of the operations retry on their own; every failure is reported as
/// a single `RequestError`.
#[async_trait]
pub trait AnalysisTransport: Send + Sync {
    /// Store the recorded video for `session_id`
    async fn upload(
        &self,
        media: &MediaRef,
        role: ParticipantRole,
        session_id: &str,
    ) -> Result<UploadResponse, RequestError>;

    /// Run the multi-modal lie-detection pipeline on an uploaded session
    async fn analyze(&self, session_id: &str) -> Result<LieDetectResponse, RequestError>;

    /// Fetch (or compute) the transcript of an uploaded session
    async fn transcript(&self, session_id: &str) -> Result<TranscriptResponse, RequestError>;

    /// Transport name for logging
    fn name(&self) -> &str;
}
