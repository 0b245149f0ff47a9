use std::collections::HashSet;

use super::step::{QueryStep, StepKey};

/// Ordered steps of one request, without duplicate identities
#[derive(Debug, Clone, Default)]
pub struct QueryPlan {
    steps: Vec<QueryStep>,
    keys: HashSet<StepKey>,
    /// Requested dictionaries and languages no engine supports
    unmatched: Vec<String>,
}

impl QueryPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` and leaves the plan untouched when a step with the
    /// same identity is already planned
    pub fn add_step(&mut self, step: QueryStep) -> bool {
        if !self.keys.insert(step.key()) {
            tracing::debug!("Skipping duplicate step {}", step);
            return false;
        }
        self.steps.push(step);
        true
    }

    pub fn add_unmatched(&mut self, requested: impl Into<String>) {
        self.unmatched.push(requested.into());
    }

    pub fn steps(&self) -> &[QueryStep] {
        &self.steps
    }

    pub fn unmatched(&self) -> &[String] {
        &self.unmatched
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Same steps in the same order
impl PartialEq for QueryPlan {
    fn eq(&self, other: &Self) -> bool {
        self.steps == other.steps
    }
}

impl Eq for QueryPlan {}
