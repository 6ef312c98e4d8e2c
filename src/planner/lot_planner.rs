//! Plan assembly for a lot

use std::sync::Arc;
use tracing::{debug, info};

use super::models::{ComponentSource, DismantlingPlan, Lot};
use crate::checklist::{ChecklistGenerator, ChecklistRequest};
use crate::components::{decompose, decompose_all, Component};
use crate::matcher::CategoryMatcher;

/// Builds dismantling plans from lots
pub struct DismantlingPlanner {
    matcher: Arc<CategoryMatcher>,
    generator: ChecklistGenerator,
}

impl DismantlingPlanner {
    pub fn new(matcher: Arc<CategoryMatcher>, generator: ChecklistGenerator) -> Self {
        Self { matcher, generator }
    }

    pub fn matcher(&self) -> &Arc<CategoryMatcher> {
        &self.matcher
    }

    pub fn generator(&self) -> &ChecklistGenerator {
        &self.generator
    }

    /// Recorded components when present, otherwise a decomposition of each
    /// equipment item (or of the category label alone)
    pub fn components_for(&self, lot: &Lot) -> (ComponentSource, Vec<Component>) {
        if !lot.components.is_empty() {
            return (ComponentSource::Recorded, lot.components.clone());
        }

        let components = if lot.equipment.is_empty() {
            decompose("", &lot.category_name)
        } else {
            decompose_all(&lot.equipment, &lot.category_name)
        };
        debug!(
            "Synthesized {} components for lot {} from {} equipment items",
            components.len(),
            lot.code,
            lot.equipment.len()
        );
        (ComponentSource::Synthesized, components)
    }

    /// Checklist request for a lot, without matching
    pub fn request_for(&self, lot: &Lot, subcategory: &str) -> (ComponentSource, ChecklistRequest) {
        let (source, components) = self.components_for(lot);
        (
            source,
            ChecklistRequest::new(lot.category_name.clone(), subcategory, components),
        )
    }

    pub fn plan(&self, lot: &Lot) -> DismantlingPlan {
        let configuration = self.matcher.find_best_match(&lot.category_name);
        let subcategory = configuration
            .as_ref()
            .map(|m| m.matched_sub_category.as_str())
            .unwrap_or("");

        let (component_source, request) = self.request_for(lot, subcategory);
        let checklist = self.generator.generate(&request);

        info!(
            "Planned lot {}: configuration={}, {} steps, {} components ({})",
            lot.code,
            configuration
                .as_ref()
                .map(|m| m.matched_sub_category.as_str())
                .unwrap_or("unavailable"),
            checklist.summary.total_steps,
            request.components.len(),
            component_source.as_str()
        );

        DismantlingPlan {
            lot_code: lot.code.clone(),
            grade: lot.grade,
            configuration,
            component_source,
            components: request.components,
            checklist,
        }
    }
}
