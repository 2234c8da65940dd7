// Shared test doubles for the submission tests

#![allow(dead_code)]

use async_trait::async_trait;
use liedetect_client::{
    AnalysisSummary, AnalysisTransport, LieDetectResponse, MediaRef, ParticipantRole,
    RequestError, SubmissionState, TranscriptResponse, UploadResponse,
};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, OnceLock};
use std::time::Duration;
use tokio::sync::{watch, Notify};

/// Scores used by the end-to-end scenario
pub fn scenario_analysis() -> AnalysisSummary {
    AnalysisSummary {
        lie_probability: 0.72,
        audio_score: 0.6,
        macro_score: 0.8,
        micro_score: 0.65,
        comparison_vector: vec![0.1, 0.2, 0.3],
        audio_vector: None,
        macro_vector: None,
        llm_vector: None,
        alignment_score: None,
        transcript: None,
    }
}

pub const SCENARIO_TRANSCRIPT: &str = "I was home all night.";

pub fn status_error(status: u16, body: &str) -> RequestError {
    RequestError::Status {
        status,
        body: body.to_string(),
    }
}

/// In-memory transport with scripted outcomes, call counters and gates
///
/// Each operation pops its next scripted outcome; when the script is empty
/// it succeeds with the scenario values.
#[derive(Default)]
pub struct ScriptedTransport {
    pub upload_script: Mutex<VecDeque<Result<(), RequestError>>>,
    pub analyze_script: Mutex<VecDeque<Result<AnalysisSummary, RequestError>>>,
    pub transcript_script: Mutex<VecDeque<Result<TranscriptResponse, RequestError>>>,

    pub upload_calls: AtomicUsize,
    pub analyze_calls: AtomicUsize,
    pub transcript_calls: AtomicUsize,

    /// Session id the upload ack reports instead of the one it was sent
    pub upload_echo: Mutex<Option<String>>,

    /// Session ids passed to upload, in call order
    pub uploaded_ids: Mutex<Vec<String>>,
    /// Session ids passed to analyze and transcript
    pub analyzed_ids: Mutex<Vec<String>>,

    /// When set, the call waits for a notification before answering
    pub upload_gate: Option<Notify>,
    pub analyze_gate: Option<Notify>,
    pub transcript_gate: Option<Notify>,

    pub analyze_finished: AtomicBool,
    pub transcript_finished: AtomicBool,

    /// Orchestrator state as seen from inside each call
    pub observer: OnceLock<watch::Receiver<SubmissionState>>,
    pub observed: Mutex<Vec<(&'static str, SubmissionState)>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gate_upload(mut self) -> Self {
        self.upload_gate = Some(Notify::new());
        self
    }

    pub fn gate_analyze(mut self) -> Self {
        self.analyze_gate = Some(Notify::new());
        self
    }

    pub fn gate_transcript(mut self) -> Self {
        self.transcript_gate = Some(Notify::new());
        self
    }

    pub fn script_upload(self, outcome: Result<(), RequestError>) -> Self {
        self.upload_script.lock().unwrap().push_back(outcome);
        self
    }

    pub fn script_analyze(self, outcome: Result<AnalysisSummary, RequestError>) -> Self {
        self.analyze_script.lock().unwrap().push_back(outcome);
        self
    }

    pub fn script_transcript(self, outcome: Result<TranscriptResponse, RequestError>) -> Self {
        self.transcript_script.lock().unwrap().push_back(outcome);
        self
    }

    pub fn echo_upload_as(self, session_id: &str) -> Self {
        *self.upload_echo.lock().unwrap() = Some(session_id.to_string());
        self
    }

    pub fn observe(&self, rx: watch::Receiver<SubmissionState>) {
        let _ = self.observer.set(rx);
    }

    fn record(&self, call: &'static str) {
        if let Some(rx) = self.observer.get() {
            let state = rx.borrow().clone();
            self.observed.lock().unwrap().push((call, state));
        }
    }

    pub fn observed(&self) -> Vec<(&'static str, SubmissionState)> {
        self.observed.lock().unwrap().clone()
    }
}

#[async_trait]
impl AnalysisTransport for ScriptedTransport {
    async fn upload(
        &self,
        _media: &MediaRef,
        role: ParticipantRole,
        session_id: &str,
    ) -> Result<UploadResponse, RequestError> {
        self.upload_calls.fetch_add(1, Ordering::SeqCst);
        self.uploaded_ids.lock().unwrap().push(session_id.to_string());
        self.record("upload");

        if let Some(gate) = &self.upload_gate {
            gate.notified().await;
        }

        let echoed = self
            .upload_echo
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| session_id.to_string());

        let outcome = self.upload_script.lock().unwrap().pop_front().unwrap_or(Ok(()));
        outcome.map(|_| UploadResponse {
            video_key: format!("sessions/{}/video.mp4", echoed),
            session_id: echoed,
            audio_key: None,
            role: Some(role.to_string()),
            bucket: None,
            content_type: None,
        })
    }

    async fn analyze(&self, session_id: &str) -> Result<LieDetectResponse, RequestError> {
        self.analyze_calls.fetch_add(1, Ordering::SeqCst);
        self.analyzed_ids.lock().unwrap().push(session_id.to_string());
        self.record("analyze");

        if let Some(gate) = &self.analyze_gate {
            gate.notified().await;
        }

        let outcome = self
            .analyze_script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(scenario_analysis()));
        self.analyze_finished.store(true, Ordering::SeqCst);

        outcome.map(|summary| LieDetectResponse {
            session_id: session_id.to_string(),
            summary,
        })
    }

    async fn transcript(&self, session_id: &str) -> Result<TranscriptResponse, RequestError> {
        self.transcript_calls.fetch_add(1, Ordering::SeqCst);
        self.analyzed_ids.lock().unwrap().push(session_id.to_string());
        self.record("transcript");

        if let Some(gate) = &self.transcript_gate {
            gate.notified().await;
        }

        let outcome = self
            .transcript_script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Ok(TranscriptResponse {
                    session_id: session_id.to_string(),
                    transcript: SCENARIO_TRANSCRIPT.to_string(),
                    summary: None,
                })
            });
        self.transcript_finished.store(true, Ordering::SeqCst);

        outcome
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Poll `condition` until it holds or two seconds pass
pub async fn wait_until(condition: impl Fn() -> bool) -> bool {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
    while tokio::time::Instant::now() < deadline {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    condition()
}
