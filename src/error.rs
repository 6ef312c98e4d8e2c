//! Crate-level error type

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::checklist::ChecklistError;
use crate::config::ConfigError;
use crate::session::SessionError;

/// Errors surfaced by the dismantling core and its service layer
#[derive(Debug, Error)]
pub enum DismantleError {
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Checklist error: {0}")]
    Checklist(#[from] ChecklistError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, DismantleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wraps_checklist_error() {
        let err: DismantleError = ChecklistError::Validation("weight must be positive".to_string()).into();
        assert!(err.to_string().contains("weight must be positive"));
    }
}
