//! Client side of the lie-detection service
//!
//! - `POST /upload` - store the recorded video (multipart)
//! - `POST /liedetect` - run the scoring pipeline
//! - `POST /transcript` - speech-to-text, optionally with a refreshed summary
//! - `GET /health`, `GET /session/{id}` - diagnostics

pub mod client;
pub mod error;
pub mod messages;
pub mod transport;

pub use client::ApiClient;
pub use error::RequestError;
pub use messages::{
    AnalysisSummary, LieDetectResponse, ParticipantRole, SessionRequest, TranscriptResponse,
    UploadResponse,
};
pub use transport::AnalysisTransport;
