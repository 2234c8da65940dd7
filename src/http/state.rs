use crate::api::ParticipantRole;
use crate::session::SessionOrchestrator;
use std::sync::Arc;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// The one orchestrator this process drives
    pub orchestrator: Arc<SessionOrchestrator>,

    /// Role used when a submit request does not name one
    pub default_role: ParticipantRole,
}

impl AppState {
    pub fn new(orchestrator: Arc<SessionOrchestrator>, default_role: ParticipantRole) -> Self {
        Self {
            orchestrator,
            default_role,
        }
    }
}
