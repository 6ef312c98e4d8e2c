//! Request and response bodies

use serde::{Deserialize, Serialize};

use crate::matcher::CategoryMatch;

/// Machine-readable error codes
pub mod error_codes {
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const PARSE_ERROR: &str = "PARSE_ERROR";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const UNKNOWN_STEP: &str = "UNKNOWN_STEP";
}

/// Error body returned by every endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

fn default_candidate_limit() -> usize {
    5
}

/// Largest accepted `limit` on match requests
pub const MAX_CANDIDATES: usize = 50;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRequest {
    pub category_name: String,
    #[serde(default = "default_candidate_limit")]
    pub limit: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResponse {
    /// False when no configuration is available for the category
    pub available: bool,
    #[serde(rename = "match")]
    pub best: Option<CategoryMatch>,
    pub candidates: Vec<CategoryMatch>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub catalog_categories: usize,
    pub configured_subcategories: usize,
    pub active_sessions: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepStateResponse {
    pub step_number: u32,
    pub expanded: bool,
    pub completed: bool,
    pub completed_count: usize,
    pub finished: bool,
}
