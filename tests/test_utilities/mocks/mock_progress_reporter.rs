use sbom_analyzer::prelude::*;
use std::sync::{Arc, Mutex};

/// Mock ProgressReporter for testing that captures events and messages
#[derive(Default, Clone)]
pub struct MockProgressReporter {
    pub events: Arc<Mutex<Vec<ProgressEvent>>>,
    pub messages: Arc<Mutex<Vec<String>>>,
}

impl MockProgressReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_events(&self) -> Vec<ProgressEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn get_messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }

    pub fn completed_values(&self) -> Vec<usize> {
        self.get_events().iter().map(|e| e.completed).collect()
    }
}

impl ProgressReporter for MockProgressReporter {
    fn report_progress(&self, event: &ProgressEvent) {
        self.events.lock().unwrap().push(event.clone());
    }

    fn report(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }

    fn report_error(&self, message: &str) {
        self.messages
            .lock()
            .unwrap()
            .push(format!("Error: {}", message));
    }

    fn report_completion(&self, message: &str) {
        self.messages
            .lock()
            .unwrap()
            .push(format!("Completed: {}", message));
    }
}
