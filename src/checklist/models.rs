//! Data models for dismantling checklists

use serde::{Deserialize, Serialize};

use crate::components::Component;

/// Urgency of a dismantling step
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepPriority {
    Low = 1,
    Medium = 2,
    High = 3,
    Critical = 4,
}

/// Input to the generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistRequest {
    pub category: String,
    #[serde(default)]
    pub subcategory: String,
    pub components: Vec<Component>,
}

impl ChecklistRequest {
    pub fn new(category: impl Into<String>, subcategory: impl Into<String>, components: Vec<Component>) -> Self {
        Self {
            category: category.into(),
            subcategory: subcategory.into(),
            components,
        }
    }
}

/// One numbered dismantling step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistStep {
    /// 1-based, dense
    pub step_number: u32,
    pub action: String,
    pub tools: Vec<String>,
    pub ppe: Vec<String>,
    pub estimated_minutes: u32,
    pub output_stream: String,
    /// Estimated kg CO₂ avoided
    pub eco_value: f64,
    pub priority: StepPriority,
}

/// Rollup over the generated steps and input components
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistSummary {
    pub total_minutes: u32,
    pub total_steps: u32,
    /// 0 when the total weight is 0
    pub recyclable_percentage: u32,
    /// Rounded to 1 decimal
    pub total_eco_value: f64,
    pub main_streams: Vec<String>,
    /// Rounded to 2 decimals
    pub total_weight_kg: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checklist {
    pub steps: Vec<ChecklistStep>,
    pub summary: ChecklistSummary,
}

impl Checklist {
    pub fn step(&self, step_number: u32) -> Option<&ChecklistStep> {
        self.steps.iter().find(|step| step.step_number == step_number)
    }

    pub fn contains_step(&self, step_number: u32) -> bool {
        self.step(step_number).is_some()
    }

    pub fn streams(&self) -> impl Iterator<Item = &str> {
        self.steps.iter().map(|step| step.output_stream.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_serialization() {
        assert_eq!(serde_json::to_string(&StepPriority::Critical).unwrap(), "\"critical\"");
        assert!(StepPriority::Critical > StepPriority::High);
    }

    #[test]
    fn test_step_camel_case() {
        let step = ChecklistStep {
            step_number: 1,
            action: "Préparer".to_string(),
            tools: vec![],
            ppe: vec![],
            estimated_minutes: 3,
            output_stream: "preparation".to_string(),
            eco_value: 0.0,
            priority: StepPriority::High,
        };
        let json = serde_json::to_value(&step).unwrap();
        assert_eq!(json["stepNumber"], 1);
        assert_eq!(json["outputStream"], "preparation");
        assert_eq!(json["priority"], "high");
    }
}
