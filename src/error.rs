use std::fmt;
use thiserror::Error;

use crate::api::RequestError;

/// Which member of the analysis pair failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisStage {
    LieDetect,
    Transcript,
}

impl fmt::Display for AnalysisStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisStage::LieDetect => f.write_str("Lie detection"),
            AnalysisStage::Transcript => f.write_str("Transcript"),
        }
    }
}

/// Why a submission did not produce a summary
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmitError {
    /// The upload failed; no analysis was requested
    #[error("Upload failed: {0}")]
    Upload(#[source] RequestError),

    /// One of the analysis pair failed after a successful upload
    #[error("{stage} failed: {source}")]
    Analysis {
        stage: AnalysisStage,
        #[source]
        source: RequestError,
    },

    /// An analysis task died before reporting a result
    #[error("{stage} task failed: {reason}")]
    TaskFailed { stage: AnalysisStage, reason: String },

    /// Another submission is still uploading or analyzing
    #[error("A submission is already in progress (session {session_id})")]
    Busy { session_id: String },
}

impl SubmitError {
    /// Upstream HTTP status, when the service answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            SubmitError::Upload(source) | SubmitError::Analysis { source, .. } => source.status(),
            _ => None,
        }
    }

    pub fn is_upload(&self) -> bool {
        matches!(self, SubmitError::Upload(_))
    }

    pub fn is_analysis(&self) -> bool {
        matches!(
            self,
            SubmitError::Analysis { .. } | SubmitError::TaskFailed { .. }
        )
    }
}
