//! Session submission
//!
//! This module provides the `SessionOrchestrator` that takes one recorded
//! video through the service:
//! - Session id generation
//! - Upload, then lie detection and transcript in parallel
//! - Merge of both results into a `Summary`
//! - Observable submission state (idle/uploading/analyzing/complete/failed)

mod id;
mod orchestrator;
mod state;
mod summary;

pub use id::SessionIdGenerator;
pub use orchestrator::SessionOrchestrator;
pub use state::SubmissionState;
pub use summary::{merge, SessionSummary, Summary};
