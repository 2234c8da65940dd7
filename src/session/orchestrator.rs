use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use super::id::SessionIdGenerator;
use super::state::SubmissionState;
use super::summary::{merge, SessionSummary};
use crate::api::{AnalysisTransport, ParticipantRole, RequestError};
use crate::error::{AnalysisStage, SubmitError};
use crate::media::MediaRef;

/// Drives one submission at a time: upload, then lie detection and
/// transcript in parallel, then merge.
///
/// Observers poll `state()` or `subscribe()` for changes; only the
/// orchestrator writes the state.
pub struct SessionOrchestrator {
    /// Remote service
    transport: Arc<dyn AnalysisTransport>,

    /// Session id source for new attempts
    ids: SessionIdGenerator,

    /// Current submission state
    state: watch::Sender<SubmissionState>,
}

impl SessionOrchestrator {
    pub fn new(transport: Arc<dyn AnalysisTransport>) -> Self {
        info!("Session orchestrator using {} transport", transport.name());

        let (state, _) = watch::channel(SubmissionState::Idle);

        Self {
            transport,
            ids: SessionIdGenerator::new(),
            state,
        }
    }

    /// Snapshot of the current state
    pub fn state(&self) -> SubmissionState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state transition
    pub fn subscribe(&self) -> watch::Receiver<SubmissionState> {
        self.state.subscribe()
    }

    pub fn is_busy(&self) -> bool {
        self.state.borrow().is_busy()
    }

    pub fn is_uploading(&self) -> bool {
        self.state.borrow().is_uploading()
    }

    pub fn is_analyzing(&self) -> bool {
        self.state.borrow().is_analyzing()
    }

    /// Upload `media` and analyze it.
    ///
    /// Every call starts over with a new session id. Calling this while a
    /// previous submission is still running returns `SubmitError::Busy` and
    /// leaves the running one alone.
    pub async fn submit(
        &self,
        media: &MediaRef,
        role: ParticipantRole,
    ) -> Result<SessionSummary, SubmitError> {
        let session_id = self.begin()?;
        let _release = BusyRelease {
            state: &self.state,
            session_id: &session_id,
        };

        info!(session_id = %session_id, role = %role, "Uploading {}", media);

        let uploaded = match self.transport.upload(media, role, &session_id).await {
            Ok(uploaded) => uploaded,
            Err(e) => {
                error!(session_id = %session_id, "Upload failed: {}", e);
                return Err(self.fail(&session_id, SubmitError::Upload(e)));
            }
        };

        if uploaded.session_id != session_id {
            warn!(
                session_id = %session_id,
                echoed = %uploaded.session_id,
                "Upload acknowledged under a different session id; keeping the local one"
            );
        }

        self.state.send_replace(SubmissionState::Analyzing {
            session_id: session_id.clone(),
        });
        info!(session_id = %session_id, "Upload confirmed, starting analysis");

        // Both run as their own tasks; on the first error the other handle is
        // dropped, which detaches the task rather than cancelling it.
        let analysis = {
            let transport = Arc::clone(&self.transport);
            let id = session_id.clone();
            settle(
                tokio::spawn(async move { transport.analyze(&id).await }),
                AnalysisStage::LieDetect,
            )
        };
        let transcript = {
            let transport = Arc::clone(&self.transport);
            let id = session_id.clone();
            settle(
                tokio::spawn(async move { transport.transcript(&id).await }),
                AnalysisStage::Transcript,
            )
        };

        let (analysis, transcript) = match futures::future::try_join(analysis, transcript).await {
            Ok(pair) => pair,
            Err(e) => {
                error!(session_id = %session_id, "Analysis failed: {}", e);
                return Err(self.fail(&session_id, e));
            }
        };

        let result = SessionSummary {
            session_id: session_id.clone(),
            summary: merge(&analysis.summary, &transcript),
        };

        info!(
            session_id = %session_id,
            lie_probability = result.summary.lie_probability,
            "Session complete"
        );

        self.state.send_replace(SubmissionState::Complete(result.clone()));

        Ok(result)
    }

    /// Move to `Uploading` with a fresh id, unless a submission is running.
    fn begin(&self) -> Result<String, SubmitError> {
        let mut started = None;
        let mut running = None;

        self.state.send_if_modified(|state| {
            if state.is_busy() {
                running = state.session_id().map(str::to_string);
                return false;
            }

            let session_id = self.ids.next_id();
            *state = SubmissionState::Uploading {
                session_id: session_id.clone(),
            };
            started = Some(session_id);
            true
        });

        match started {
            Some(session_id) => Ok(session_id),
            None => {
                let session_id = running.unwrap_or_default();
                warn!(session_id = %session_id, "Rejecting submit while busy");
                Err(SubmitError::Busy { session_id })
            }
        }
    }

    fn fail(&self, session_id: &str, error: SubmitError) -> SubmitError {
        self.state.send_replace(SubmissionState::Failed {
            session_id: session_id.to_string(),
            error: error.clone(),
        });
        error
    }
}

/// Puts the orchestrator back to `Idle` if a `submit` future is dropped
/// while its attempt is still the busy one.
///
/// Normal exits publish `Complete` or `Failed` first, so the check below
/// finds nothing to undo. Analysis tasks already spawned keep running
/// detached; their results are discarded.
struct BusyRelease<'a> {
    state: &'a watch::Sender<SubmissionState>,
    session_id: &'a str,
}

impl Drop for BusyRelease<'_> {
    fn drop(&mut self) {
        let released = self.state.send_if_modified(|state| {
            if state.is_busy() && state.session_id() == Some(self.session_id) {
                *state = SubmissionState::Idle;
                true
            } else {
                false
            }
        });

        if released {
            warn!(session_id = %self.session_id, "Submission abandoned by caller");
        }
    }
}

/// Wait for one analysis task and tag its failure with the stage.
async fn settle<T>(
    task: JoinHandle<Result<T, RequestError>>,
    stage: AnalysisStage,
) -> Result<T, SubmitError> {
    match task.await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(source)) => Err(SubmitError::Analysis { stage, source }),
        Err(e) => Err(SubmitError::TaskFailed {
            stage,
            reason: e.to_string(),
        }),
    }
}
