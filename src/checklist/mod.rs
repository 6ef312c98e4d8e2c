//! Dismantling checklist generation
//!
//! Turns a component list into an ordered, numbered sequence of dismantling
//! steps with tools, PPE, time, destination stream and eco-value, plus a
//! rollup summary. Generation is pure and deterministic.

pub mod models;
pub mod rules;
pub mod generator;
pub mod request;

pub use generator::{ChecklistGenerator, MAIN_STREAMS, RECYCLABLE_SHARE};
pub use models::{Checklist, ChecklistRequest, ChecklistStep, ChecklistSummary, StepPriority};
pub use request::{parse_checklist_request, validate_components, ChecklistError, MAX_COMPONENT_WEIGHT_KG};
