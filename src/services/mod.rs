//! External Services
//!
//! This module contains services that interact with external systems:
//! - api: Background worker that runs backend calls off the UI thread

pub mod api;

// Re-export commonly used types for convenience
pub use api::{spawn_api_service, ApiRequest, ApiResponse, SessionRequest, SessionResponse};
