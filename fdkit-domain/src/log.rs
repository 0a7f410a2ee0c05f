//! Derivation logs: ordered records of each reasoning step.
//!
//! Logs are produced once per call and handed to the caller; nothing in the engine reads
//! them back.

use crate::attrs::AttributeSet;
use crate::dependency::FunctionalDependency;
use crate::set::DependencySet;
use std::fmt;

/// One step of a closure computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClosureStep {
    pub index: usize,
    /// The attributes known after this step.
    pub attrs: AttributeSet,
    /// The dependency applied at this step; `None` for step 0 (the given source).
    pub via: Option<FunctionalDependency>,
}

/// Non-fatal signal raised by a closure computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClosureDiagnostic {
    /// The closure loop ran more rounds than its bound allows. The result is partial.
    RoundLimitExceeded { rounds: usize, limit: usize },
}

impl fmt::Display for ClosureDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClosureDiagnostic::RoundLimitExceeded { rounds, limit } => write!(
                f,
                "closure stopped after {rounds} rounds (limit {limit}); result may be partial"
            ),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClosureLog {
    steps: Vec<ClosureStep>,
    diagnostic: Option<ClosureDiagnostic>,
}

impl ClosureLog {
    pub(crate) fn given(source: &AttributeSet) -> Self {
        Self {
            steps: vec![ClosureStep {
                index: 0,
                attrs: source.clone(),
                via: None,
            }],
            diagnostic: None,
        }
    }

    pub(crate) fn push(&mut self, attrs: &AttributeSet, via: &FunctionalDependency) {
        let index = self.steps.len();
        self.steps.push(ClosureStep {
            index,
            attrs: attrs.clone(),
            via: Some(via.clone()),
        });
    }

    pub(crate) fn flag(&mut self, diagnostic: ClosureDiagnostic) {
        self.diagnostic = Some(diagnostic);
    }

    pub fn steps(&self) -> &[ClosureStep] {
        &self.steps
    }

    pub fn diagnostic(&self) -> Option<ClosureDiagnostic> {
        self.diagnostic
    }

    /// Dependencies applied, in application order.
    pub fn applied(&self) -> impl Iterator<Item = &FunctionalDependency> {
        self.steps.iter().filter_map(|s| s.via.as_ref())
    }
}

/// A left-hand-side reduction made while building a minimal cover.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Minimization {
    pub before: FunctionalDependency,
    pub after: FunctionalDependency,
}

/// Record of the three minimal-cover phases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverLog {
    /// Phase 1 output.
    pub standard_form: DependencySet,
    /// Phase 2 substitutions, in the order they were made.
    pub minimizations: Vec<Minimization>,
    /// Working set once phase 2 finished.
    pub minimized: DependencySet,
    /// Phase 3 removals, in the order they were made.
    pub redundant: Vec<FunctionalDependency>,
    pub cover: DependencySet,
}

impl CoverLog {
    pub(crate) fn new(standard_form: &DependencySet) -> Self {
        Self {
            standard_form: standard_form.clone(),
            minimizations: Vec::new(),
            minimized: standard_form.clone(),
            redundant: Vec::new(),
            cover: standard_form.clone(),
        }
    }
}
