use super::summary::SessionSummary;
use crate::error::SubmitError;

/// Where a submission currently is
///
/// `Idle → Uploading → Analyzing → Complete`, with `Failed` reachable from
/// both busy states. The uploading and analyzing predicates are derived
/// from this single value, so they are never true at the same time.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Uploading {
        session_id: String,
    },
    Analyzing {
        session_id: String,
    },
    Complete(SessionSummary),
    Failed {
        session_id: String,
        error: SubmitError,
    },
}

impl SubmissionState {
    pub fn name(&self) -> &'static str {
        match self {
            SubmissionState::Idle => "idle",
            SubmissionState::Uploading { .. } => "uploading",
            SubmissionState::Analyzing { .. } => "analyzing",
            SubmissionState::Complete(_) => "complete",
            SubmissionState::Failed { .. } => "failed",
        }
    }

    pub fn session_id(&self) -> Option<&str> {
        match self {
            SubmissionState::Idle => None,
            SubmissionState::Uploading { session_id }
            | SubmissionState::Analyzing { session_id }
            | SubmissionState::Failed { session_id, .. } => Some(session_id),
            SubmissionState::Complete(result) => Some(&result.session_id),
        }
    }

    pub fn is_uploading(&self) -> bool {
        matches!(self, SubmissionState::Uploading { .. })
    }

    pub fn is_analyzing(&self) -> bool {
        matches!(self, SubmissionState::Analyzing { .. })
    }

    pub fn is_busy(&self) -> bool {
        self.is_uploading() || self.is_analyzing()
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SubmissionState::Complete(_) | SubmissionState::Failed { .. }
        )
    }
}
