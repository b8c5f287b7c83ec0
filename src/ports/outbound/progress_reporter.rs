/// Progress snapshot pushed at enrichment batch boundaries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressEvent {
    /// Components enriched so far
    pub completed: usize,
    pub total: usize,
    /// 0..=100
    pub percentage: u8,
    pub message: String,
}

impl ProgressEvent {
    /// Creates an event, deriving `percentage` from `completed / total`
    ///
    /// An empty run (`total == 0`) is reported as 100 %.
    pub fn new(completed: usize, total: usize, message: impl Into<String>) -> Self {
        let percentage = if total == 0 {
            100
        } else {
            ((completed.min(total) as f64 / total as f64) * 100.0).round() as u8
        };
        Self {
            completed,
            total,
            percentage,
            message: message.into(),
        }
    }
}

/// ProgressReporter port for reporting progress during an analysis
///
/// This port abstracts progress reporting (e.g., a progress bar on stderr)
/// to provide user feedback while components are being enriched.
/// It is push-style: the enrichment use case invokes it synchronously,
/// once per batch.
///
/// Any `Fn(&ProgressEvent)` closure is a ProgressReporter, so callers can
/// pass a plain callback as the progress sink.
pub trait ProgressReporter: Send + Sync {
    /// Reports progress after a batch completed
    ///
    /// # Arguments
    /// * `event` - Completed/total counts, percentage and status message
    fn report_progress(&self, event: &ProgressEvent);

    /// Reports an informational message
    fn report(&self, _message: &str) {}

    /// Reports an error or warning message
    ///
    /// Used as the diagnostic channel for recovered lookup failures.
    fn report_error(&self, _message: &str) {}

    /// Reports completion of an operation
    fn report_completion(&self, _message: &str) {}
}

impl<F> ProgressReporter for F
where
    F: Fn(&ProgressEvent) + Send + Sync,
{
    fn report_progress(&self, event: &ProgressEvent) {
        self(event)
    }
}

/// ProgressReporter that discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProgressReporter;

impl ProgressReporter for NoopProgressReporter {
    fn report_progress(&self, _event: &ProgressEvent) {}
}
