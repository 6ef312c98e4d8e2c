//! Data models for lots and plans

use serde::{Deserialize, Serialize};

use crate::checklist::{validate_components, Checklist, ChecklistError};
use crate::components::{Component, EquipmentItem};
use crate::matcher::CategoryMatch;

/// Reuse grade assigned to a lot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
}

/// Lot as supplied by the case-file API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lot {
    pub code: String,
    pub category_name: String,
    pub grade: Grade,
    #[serde(default)]
    pub weight_kg: f64,
    #[serde(default)]
    pub components: Vec<Component>,
    #[serde(default)]
    pub equipment: Vec<EquipmentItem>,
}

impl Lot {
    /// Reject lots whose code is blank or whose recorded components are unusable
    pub fn validate(&self) -> Result<(), ChecklistError> {
        if self.code.trim().is_empty() {
            return Err(ChecklistError::Validation("lot code cannot be empty".to_string()));
        }
        if !self.weight_kg.is_finite() || self.weight_kg < 0.0 {
            return Err(ChecklistError::Validation(
                "weightKg must be a non-negative number".to_string(),
            ));
        }
        validate_components(&self.components)
    }
}

/// Where a plan's component list came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentSource {
    Recorded,
    Synthesized,
}

impl ComponentSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentSource::Recorded => "recorded",
            ComponentSource::Synthesized => "synthesized",
        }
    }
}

/// Everything the dismantling panel shows for a lot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DismantlingPlan {
    pub lot_code: String,
    pub grade: Grade,
    /// `None` when no catalog subcategory is close enough
    pub configuration: Option<CategoryMatch>,
    pub component_source: ComponentSource,
    pub components: Vec<Component>,
    pub checklist: Checklist,
}
