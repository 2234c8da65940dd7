pub mod api;
pub mod config;
pub mod error;
pub mod http;
pub mod media;
pub mod session;

pub use api::{
    AnalysisSummary, AnalysisTransport, ApiClient, LieDetectResponse, ParticipantRole,
    RequestError, TranscriptResponse, UploadResponse,
};
pub use config::Config;
pub use error::{AnalysisStage, SubmitError};
pub use http::{create_router, AppState};
pub use media::MediaRef;
pub use session::{
    merge, SessionIdGenerator, SessionOrchestrator, SessionSummary, SubmissionState, Summary,
};
