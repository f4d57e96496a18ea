//! Common DTO types

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Generic acknowledgement
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Unix time in milliseconds
    pub timestamp: i64,
    /// Advice providers in fallback order
    pub providers: Vec<String>,
}
