use super::state::AppState;
use crate::api::ParticipantRole;
use crate::error::SubmitError;
use crate::media::MediaRef;
use crate::session::{SessionSummary, SubmissionState};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    /// Path of the recorded video on this machine
    pub video_path: String,

    /// Participant role (defaults to the configured role)
    pub role: Option<ParticipantRole>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateResponse {
    pub state: String,
    pub busy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<SessionSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&SubmissionState> for StateResponse {
    fn from(state: &SubmissionState) -> Self {
        let (result, error) = match state {
            SubmissionState::Complete(result) => (Some(result.clone()), None),
            SubmissionState::Failed { error, .. } => (None, Some(error.to_string())),
            _ => (None, None),
        };

        Self {
            state: state.name().to_string(),
            busy: state.is_busy(),
            session_id: state.session_id().map(str::to_string),
            result,
            error,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error: String,
    /// Status returned by the analysis service, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upstream_status: Option<u16>,
}

fn error_response(
    status: StatusCode,
    error: String,
    upstream_status: Option<u16>,
) -> Response {
    (
        status,
        Json(ErrorResponse {
            error,
            upstream_status,
        }),
    )
        .into_response()
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /state
/// Current submission state
pub async fn get_state(State(state): State<AppState>) -> impl IntoResponse {
    let current = state.orchestrator.state();
    (StatusCode::OK, Json(StateResponse::from(&current)))
}

/// POST /submit
/// Upload a recorded video and wait for the merged summary
pub async fn submit(
    State(state): State<AppState>,
    Json(req): Json<SubmitRequest>,
) -> impl IntoResponse {
    let role = req.role.unwrap_or(state.default_role);

    let media = match MediaRef::open(&req.video_path) {
        Ok(media) => media,
        Err(e) => {
            warn!("Rejecting submit for {}: {:#}", req.video_path, e);
            return error_response(StatusCode::BAD_REQUEST, format!("{:#}", e), None);
        }
    };

    info!("Submit requested for {} as {}", media, role);

    match state.orchestrator.submit(&media, role).await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(e @ SubmitError::Busy { .. }) => {
            warn!("{}", e);
            error_response(StatusCode::CONFLICT, e.to_string(), None)
        }
        Err(e @ SubmitError::TaskFailed { .. }) => {
            error!("Submission failed: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string(), None)
        }
        Err(e) => {
            error!("Submission failed: {}", e);
            let upstream = e.status();
            error_response(StatusCode::BAD_GATEWAY, e.to_string(), upstream)
        }
    }
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
