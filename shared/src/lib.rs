use serde::{Deserialize, Serialize};

/// Greeting returned by `/`.
pub const HOME_MESSAGE: &str = "Django Python API - Testing Auto-Docker Extension";

/// Status reported by `/health/` while the server is up.
pub const HEALTHY: &str = "healthy";

/// Response body for `/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomeResponse {
    pub message: String,
}

impl HomeResponse {
    pub fn new() -> Self {
        Self {
            message: HOME_MESSAGE.to_string(),
        }
    }
}

impl Default for HomeResponse {
    fn default() -> Self {
        Self::new()
    }
}

/// Health check response from `/health/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: HEALTHY.to_string(),
        }
    }
}
