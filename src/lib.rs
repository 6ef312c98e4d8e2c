//! WEEE lot dismantling core
//!
//! - Category matching of lots against the dismantling catalog
//! - Component decomposition from equipment names
//! - Rule-based dismantling checklist generation
//! - Interactive checklist sessions behind an HTTP API

pub mod api;
pub mod catalog;
pub mod checklist;
pub mod components;
pub mod config;
pub mod error;
pub mod logging;
pub mod matcher;
pub mod metrics;
pub mod planner;
pub mod session;

pub use error::{DismantleError, Result};
