//! Checklist generator

use tracing::debug;

use super::models::{Checklist, ChecklistRequest, ChecklistStep, ChecklistSummary};
use super::rules::{RuleContext, StepDraft, RULES};
use crate::components::Component;

/// Share of total weight reported as recyclable
pub const RECYCLABLE_SHARE: f64 = 0.85;

/// Streams reported in every summary.
///
/// This list is not derived from the emitted steps: a checklist without a
/// battery still reports `batteries-lithium`.
pub const MAIN_STREAMS: [&str; 4] = [
    "batteries-lithium",
    "metaux-precieux",
    "plastiques-tries",
    "DEEE-ecrans",
];

/// Deterministic, stateless checklist generator
#[derive(Debug, Clone, Copy, Default)]
pub struct ChecklistGenerator;

impl ChecklistGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Generate steps and summary for a request.
    ///
    /// Never fails; an empty component list yields only the preparation and
    /// final-sort steps.
    pub fn generate(&self, request: &ChecklistRequest) -> Checklist {
        let ctx = RuleContext::new(&request.category, &request.components);

        let steps: Vec<ChecklistStep> = RULES
            .iter()
            .filter(|rule| (rule.applies)(&ctx))
            .map(|rule| (rule.build)(&ctx))
            .zip(1u32..)
            .map(|(draft, step_number)| into_step(draft, step_number))
            .collect();

        let summary = summarize(&steps, &request.components);

        debug!(
            "Generated {} dismantling steps for '{}' ({} components, {} min)",
            summary.total_steps,
            request.category,
            request.components.len(),
            summary.total_minutes
        );

        Checklist { steps, summary }
    }
}

fn into_step(draft: StepDraft, step_number: u32) -> ChecklistStep {
    ChecklistStep {
        step_number,
        action: draft.action.to_string(),
        tools: draft.tools.iter().map(|s| s.to_string()).collect(),
        ppe: draft.ppe.iter().map(|s| s.to_string()).collect(),
        estimated_minutes: draft.estimated_minutes,
        output_stream: draft.output_stream.to_string(),
        eco_value: finite_or_zero(draft.eco_value),
        priority: draft.priority,
    }
}

/// Rollup over emitted steps and input components
pub fn summarize(steps: &[ChecklistStep], components: &[Component]) -> ChecklistSummary {
    let total_minutes = steps.iter().map(|s| s.estimated_minutes).sum();
    let total_eco_value = finite_or_zero(round_to(steps.iter().map(|s| s.eco_value).sum(), 1));
    let total_weight_kg = finite_or_zero(round_to(components.iter().map(|c| c.weight_kg).sum(), 2));

    let recyclable_percentage = if total_weight_kg > 0.0 {
        let recyclable_weight = total_weight_kg * RECYCLABLE_SHARE;
        (recyclable_weight / total_weight_kg * 100.0).round() as u32
    } else {
        0
    };

    ChecklistSummary {
        total_minutes,
        total_steps: steps.len() as u32,
        recyclable_percentage,
        total_eco_value,
        main_streams: MAIN_STREAMS.iter().map(|s| s.to_string()).collect(),
        total_weight_kg,
    }
}

/// Overflowing sums are reported as 0, never as NaN or infinity
fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    fn laptop_request() -> ChecklistRequest {
        ChecklistRequest::new(
            "equipements-informatiques",
            "ordinateurs-portables",
            vec![
                Component::new("batterie-lithium", 0.3, "lithium-ion"),
                Component::new("ecran-lcd", 0.5, "verre-lcd"),
                Component::new("carte-mere", 0.2, "pcb"),
                Component::new("coque-plastique", 0.8, "plastique-abs"),
            ],
        )
    }

    #[test]
    fn test_laptop_steps() {
        let checklist = ChecklistGenerator::new().generate(&laptop_request());
        let streams: Vec<_> = checklist.streams().collect();
        assert_eq!(
            streams,
            vec![
                "preparation",
                "securite",
                "batteries-lithium",
                "DEEE-ecrans",
                "composants-reemploi",
                "metaux-precieux",
                "plastiques-tries",
                "tri-final",
            ]
        );
        assert_eq!(checklist.summary.total_minutes, 48);
        assert_eq!(checklist.summary.total_steps, 8);
        assert!((checklist.summary.total_eco_value - 58.3).abs() < 1e-9);
        assert!((checklist.summary.total_weight_kg - 1.8).abs() < 1e-9);
        assert_eq!(checklist.summary.recyclable_percentage, 85);
    }

    #[test]
    fn test_empty_components() {
        let checklist =
            ChecklistGenerator::new().generate(&ChecklistRequest::new("informatique", "", vec![]));
        assert_eq!(checklist.steps.len(), 2);
        assert_eq!(checklist.summary.recyclable_percentage, 0);
        assert_eq!(checklist.summary.total_weight_kg, 0.0);
        assert_eq!(checklist.summary.total_minutes, 7);
        assert_eq!(checklist.summary.total_eco_value, 10.0);
    }

    #[test]
    fn test_main_streams_are_fixed() {
        let checklist =
            ChecklistGenerator::new().generate(&ChecklistRequest::new("informatique", "", vec![]));
        assert_eq!(checklist.summary.main_streams, MAIN_STREAMS.to_vec());
    }

    #[test]
    fn test_disk_without_motherboard() {
        let request = ChecklistRequest::new(
            "informatique",
            "",
            vec![Component::new("disque-dur", 0.6, "aluminium")],
        );
        let checklist = ChecklistGenerator::new().generate(&request);
        let streams: Vec<_> = checklist.streams().collect();
        assert_eq!(streams, vec!["preparation", "composants-reemploi", "tri-final"]);
        assert_eq!(checklist.steps[1].eco_value, 25.0);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(58.2999999, 1), 58.3);
        assert_eq!(round_to(1.005_1, 2), 1.01);
    }

    #[test]
    fn test_overflowing_weights_stay_finite() {
        let request = ChecklistRequest::new(
            "informatique",
            "",
            vec![
                Component::new("batterie-lithium", 1e308, ""),
                Component::new("batterie-secours", 1e308, ""),
            ],
        );
        let checklist = ChecklistGenerator::new().generate(&request);

        assert!(checklist.steps.iter().all(|s| s.eco_value.is_finite()));
        assert_eq!(checklist.summary.total_weight_kg, 0.0);
        assert_eq!(checklist.summary.recyclable_percentage, 0);
        assert!(checklist.summary.total_eco_value.is_finite());

        let json = serde_json::to_value(&checklist.summary).unwrap();
        assert!(json["totalWeightKg"].is_number());
        assert!(json["totalEcoValue"].is_number());
    }
}
