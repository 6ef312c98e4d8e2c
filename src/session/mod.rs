//! Interactive checklist sessions
//!
//! Per-checklist UI state (expanded / completed steps) and a concurrent
//! store of live sessions.

pub mod state;
pub mod models;
pub mod store;

pub use models::{ChecklistSession, SessionError, SessionOrigin, SessionView, StepToggle};
pub use state::StepInteractionState;
pub use store::SessionStore;
