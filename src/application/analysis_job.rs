use crate::sbom_analysis::domain::{AnalysisState, AnalysisStateMachine};
use crate::shared::error::AnalysisError;
use crate::shared::CancellationToken;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

/// AnalysisJob - Handle on a single analysis run
///
/// Cloning the job yields another handle to the same run, so a caller can
/// keep one clone to observe the state or cancel while the use case drives
/// the other. A job is single-use: once it has left `Idle` it cannot be
/// submitted again.
#[derive(Debug, Clone)]
pub struct AnalysisJob {
    id: Uuid,
    machine: Arc<Mutex<AnalysisStateMachine>>,
    cancellation: CancellationToken,
}

impl AnalysisJob {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            machine: Arc::new(Mutex::new(AnalysisStateMachine::new())),
            cancellation: CancellationToken::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> AnalysisState {
        self.lock().current()
    }

    /// States visited so far, starting with `Idle`
    pub fn history(&self) -> Vec<AnalysisState> {
        self.lock().history().to_vec()
    }

    /// Requests cancellation; honoured at the next enrichment batch boundary
    pub fn cancel(&self) {
        self.cancellation.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancellation.clone()
    }

    pub(crate) fn transition(&self, next: AnalysisState) -> Result<(), AnalysisError> {
        let mut machine = self.lock();
        let from = machine.current();
        machine.transition(next)?;
        tracing::info!(job = %self.id, %from, to = %next, "Analysis state changed");
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, AnalysisStateMachine> {
        // The machine is always left consistent, so a poisoned lock is still usable.
        self.machine.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for AnalysisJob {
    fn default() -> Self {
        Self::new()
    }
}
