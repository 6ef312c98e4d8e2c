//! Best-match selection over the catalog

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use super::normalize::normalize;
use super::similarity::similarity;
use crate::catalog::{DismantlingCatalog, DismantlingConfig};
use crate::config::MatcherSettings;

/// Matcher configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatcherConfig {
    /// Scores below this are treated as spurious
    pub min_score: u32,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self { min_score: 20 }
    }
}

impl From<&MatcherSettings> for MatcherConfig {
    fn from(settings: &MatcherSettings) -> Self {
        Self {
            min_score: settings.min_score,
        }
    }
}

/// A subcategory selected for a lot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryMatch {
    pub config: DismantlingConfig,
    pub matched_sub_category: String,
    pub matched_category: String,
    pub score: u32,
}

/// Matches lot category names against an immutable catalog
pub struct CategoryMatcher {
    catalog: Arc<DismantlingCatalog>,
    config: MatcherConfig,
}

impl CategoryMatcher {
    pub fn new(catalog: Arc<DismantlingCatalog>, config: MatcherConfig) -> Self {
        Self { catalog, config }
    }

    pub fn with_defaults(catalog: Arc<DismantlingCatalog>) -> Self {
        Self::new(catalog, MatcherConfig::default())
    }

    pub fn catalog(&self) -> &Arc<DismantlingCatalog> {
        &self.catalog
    }

    pub fn config(&self) -> MatcherConfig {
        self.config
    }

    /// Find the best configured subcategory for a lot category name.
    ///
    /// Ties keep the first candidate in catalog order. `None` means no
    /// subcategory reached the minimum score.
    pub fn find_best_match(&self, lot_category_name: &str) -> Option<CategoryMatch> {
        let target = normalize(lot_category_name);
        if target.is_empty() {
            debug!("Empty lot category name, no dismantling configuration");
            return None;
        }

        let mut best: Option<(u32, CategoryMatch)> = None;
        for (category, sub, config) in self.catalog.configured_subcategories() {
            let score = similarity(&normalize(&sub.label), &target);
            let improves = best.as_ref().map_or(true, |(best_score, _)| score > *best_score);
            if improves {
                best = Some((
                    score,
                    CategoryMatch {
                        config: config.clone(),
                        matched_sub_category: sub.label.clone(),
                        matched_category: category.label.clone(),
                        score,
                    },
                ));
            }
        }

        match best {
            Some((score, matched)) if score >= self.config.min_score => {
                debug!(
                    "Matched '{}' to {} / {} (score {})",
                    lot_category_name, matched.matched_category, matched.matched_sub_category, score
                );
                Some(matched)
            }
            _ => {
                debug!("No dismantling configuration for '{}'", lot_category_name);
                None
            }
        }
    }

    /// Qualifying candidates, best first; equal scores keep catalog order
    pub fn rank(&self, lot_category_name: &str, limit: usize) -> Vec<CategoryMatch> {
        let target = normalize(lot_category_name);
        if target.is_empty() {
            return Vec::new();
        }

        let mut candidates: Vec<CategoryMatch> = self
            .catalog
            .configured_subcategories()
            .filter_map(|(category, sub, config)| {
                let score = similarity(&normalize(&sub.label), &target);
                (score >= self.config.min_score).then(|| CategoryMatch {
                    config: config.clone(),
                    matched_sub_category: sub.label.clone(),
                    matched_category: category.label.clone(),
                    score,
                })
            })
            .collect();

        // stable sort keeps catalog order among ties
        candidates.sort_by(|a, b| b.score.cmp(&a.score));
        candidates.truncate(limit);
        candidates
    }
}
