//! Session data models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::state::StepInteractionState;
use crate::checklist::{Checklist, ChecklistRequest};

/// Session errors
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Checklist session {0} not found")]
    NotFound(Uuid),

    #[error("Step {step} does not exist in a {total}-step checklist")]
    UnknownStep { step: u32, total: u32 },
}

/// What produced the checklist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SessionOrigin {
    /// User-supplied JSON request
    Json,
    /// Lot selected in the case file
    Lot { code: String },
}

/// Which per-step flag to flip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepToggle {
    Expanded,
    Completed,
}

impl StepToggle {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepToggle::Expanded => "expanded",
            StepToggle::Completed => "completed",
        }
    }
}

/// A generated checklist and the user's progress through it
#[derive(Debug, Clone)]
pub struct ChecklistSession {
    pub id: Uuid,
    pub origin: SessionOrigin,
    pub request: ChecklistRequest,
    pub checklist: Checklist,
    pub state: StepInteractionState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ChecklistSession {
    pub fn new(origin: SessionOrigin, request: ChecklistRequest, checklist: Checklist) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            origin,
            request,
            checklist,
            state: StepInteractionState::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the checklist; expand and complete flags start over
    pub fn regenerate(&mut self, origin: SessionOrigin, request: ChecklistRequest, checklist: Checklist) {
        self.origin = origin;
        self.request = request;
        self.checklist = checklist;
        self.state.reset();
        self.updated_at = Utc::now();
    }

    /// Flip a flag on an existing step; returns the new value
    pub fn toggle(&mut self, step_number: u32, toggle: StepToggle) -> Result<bool, SessionError> {
        if !self.checklist.contains_step(step_number) {
            return Err(SessionError::UnknownStep {
                step: step_number,
                total: self.checklist.summary.total_steps,
            });
        }

        let value = match toggle {
            StepToggle::Expanded => self.state.toggle_expanded(step_number),
            StepToggle::Completed => self.state.toggle_completed(step_number),
        };
        self.updated_at = Utc::now();
        Ok(value)
    }

    pub fn is_finished(&self) -> bool {
        self.state.completed_count() == self.checklist.steps.len()
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            id: self.id,
            origin: self.origin.clone(),
            category: self.request.category.clone(),
            subcategory: self.request.subcategory.clone(),
            checklist: self.checklist.clone(),
            expanded_steps: self.state.expanded_steps().collect(),
            completed_steps: self.state.completed_steps().collect(),
            completed_count: self.state.completed_count(),
            finished: self.is_finished(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Serializable snapshot of a session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub id: Uuid,
    pub origin: SessionOrigin,
    pub category: String,
    pub subcategory: String,
    pub checklist: Checklist,
    pub expanded_steps: Vec<u32>,
    pub completed_steps: Vec<u32>,
    pub completed_count: usize,
    pub finished: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
