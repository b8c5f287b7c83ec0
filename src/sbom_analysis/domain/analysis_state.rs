use crate::shared::error::AnalysisError;
use serde::Serialize;
use std::fmt;

/// Lifecycle state of one analysis run
///
/// ```text
/// Idle -> Parsing -> Enriching -> Scoring -> Complete
///            |           |
///            v           v
///          Failed    Cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AnalysisState {
    Idle,
    Parsing,
    Enriching,
    Scoring,
    Complete,
    Failed,
    Cancelled,
}

impl AnalysisState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            AnalysisState::Complete | AnalysisState::Failed | AnalysisState::Cancelled
        )
    }

    pub fn can_transition_to(&self, next: AnalysisState) -> bool {
        use AnalysisState::*;
        matches!(
            (self, next),
            (Idle, Parsing)
                | (Parsing, Enriching)
                | (Parsing, Failed)
                | (Enriching, Scoring)
                | (Enriching, Cancelled)
                | (Scoring, Complete)
        )
    }
}

impl fmt::Display for AnalysisState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// State machine guarding the transitions of a single run
///
/// A finished machine is never reused; a new run gets a new instance.
#[derive(Debug, Clone)]
pub struct AnalysisStateMachine {
    current: AnalysisState,
    history: Vec<AnalysisState>,
}

impl AnalysisStateMachine {
    pub fn new() -> Self {
        Self {
            current: AnalysisState::Idle,
            history: vec![AnalysisState::Idle],
        }
    }

    pub fn current(&self) -> AnalysisState {
        self.current
    }

    /// Every state visited so far, starting with `Idle`
    pub fn history(&self) -> &[AnalysisState] {
        &self.history
    }

    pub fn transition(&mut self, next: AnalysisState) -> Result<(), AnalysisError> {
        if !self.current.can_transition_to(next) {
            return Err(AnalysisError::InvalidTransition {
                from: self.current.to_string(),
                to: next.to_string(),
            });
        }
        self.current = next;
        self.history.push(next);
        Ok(())
    }
}

impl Default for AnalysisStateMachine {
    fn default() -> Self {
        Self::new()
    }
}
