//! Lot dismantling plans
//!
//! Joins the category matcher and the checklist generator for a lot coming
//! from the case-file API.

pub mod models;
pub mod lot_planner;

pub use models::{ComponentSource, DismantlingPlan, Grade, Lot};
pub use lot_planner::DismantlingPlanner;
