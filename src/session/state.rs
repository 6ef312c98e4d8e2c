//! Expand / complete toggles keyed by step number

use std::collections::BTreeSet;

/// Two independent flags per step, both off by default
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepInteractionState {
    expanded: BTreeSet<u32>,
    completed: BTreeSet<u32>,
}

impl StepInteractionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the detail panel; returns the new value
    pub fn toggle_expanded(&mut self, step_number: u32) -> bool {
        flip(&mut self.expanded, step_number)
    }

    /// Flip the checked-off flag; returns the new value
    pub fn toggle_completed(&mut self, step_number: u32) -> bool {
        flip(&mut self.completed, step_number)
    }

    pub fn is_expanded(&self, step_number: u32) -> bool {
        self.expanded.contains(&step_number)
    }

    pub fn is_completed(&self, step_number: u32) -> bool {
        self.completed.contains(&step_number)
    }

    pub fn expanded_steps(&self) -> impl Iterator<Item = u32> + '_ {
        self.expanded.iter().copied()
    }

    pub fn completed_steps(&self) -> impl Iterator<Item = u32> + '_ {
        self.completed.iter().copied()
    }

    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    pub fn reset(&mut self) {
        self.expanded.clear();
        self.completed.clear();
    }
}

fn flip(set: &mut BTreeSet<u32>, step_number: u32) -> bool {
    if set.remove(&step_number) {
        false
    } else {
        set.insert(step_number);
        true
    }
}
