//! Local status API for a presentation layer
//!
//! - GET /health - Health check
//! - GET /state - Current submission state
//! - POST /submit - Upload and analyze a recorded video

mod handlers;
mod routes;
mod state;

pub use handlers::{ErrorResponse, StateResponse, SubmitRequest};
pub use routes::create_router;
pub use state::AppState;
