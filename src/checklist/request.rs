//! Parsing of user-supplied checklist requests

use thiserror::Error;

use super::models::ChecklistRequest;
use crate::components::Component;

/// Heaviest single component accepted, in kg
pub const MAX_COMPONENT_WEIGHT_KG: f64 = 10_000.0;

/// Checklist input errors
#[derive(Debug, Error)]
pub enum ChecklistError {
    #[error("Invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid checklist request: {0}")]
    Validation(String),
}

/// Parse and validate a raw `{ category, subcategory, components }` blob.
///
/// An empty component list is accepted.
pub fn parse_checklist_request(text: &str) -> Result<ChecklistRequest, ChecklistError> {
    let request: ChecklistRequest = serde_json::from_str(text)?;
    validate(&request)?;
    Ok(request)
}

fn validate(request: &ChecklistRequest) -> Result<(), ChecklistError> {
    if request.category.trim().is_empty() {
        return Err(ChecklistError::Validation("category cannot be empty".to_string()));
    }
    validate_components(&request.components)
}

/// Check component types and weights, wherever the components come from
pub fn validate_components(components: &[Component]) -> Result<(), ChecklistError> {
    for (index, component) in components.iter().enumerate() {
        if component.component_type.trim().is_empty() {
            return Err(ChecklistError::Validation(format!(
                "components[{}].type cannot be empty",
                index
            )));
        }
        if !component.weight_kg.is_finite() || component.weight_kg < 0.0 {
            return Err(ChecklistError::Validation(format!(
                "components[{}].weight must be a non-negative number",
                index
            )));
        }
        if component.weight_kg > MAX_COMPONENT_WEIGHT_KG {
            return Err(ChecklistError::Validation(format!(
                "components[{}].weight cannot exceed {} kg",
                index, MAX_COMPONENT_WEIGHT_KG
            )));
        }
    }

    Ok(())
}
