//! Mock backend for testing without a real server.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use ludoteca_core::error::ApiError;
use ludoteca_core::model::{Activity, Child, Classroom, ProgressRecord};
use ludoteca_core::traits::{Backend, ProgressSink};

/// An in-memory backend with scripted data and failure injection.
#[derive(Default)]
pub struct MockBackend {
    pub children: Vec<Child>,
    pub classrooms: Vec<Classroom>,
    pub activities: Vec<Activity>,
    pub progress: Vec<ProgressRecord>,
    pub report_text: String,
    /// Fail this many submit calls before succeeding.
    fail_submits: AtomicU32,
    submit_count: AtomicU32,
    submitted: Mutex<Vec<ProgressRecord>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `n` submit calls fail with a network error.
    pub fn fail_next_submits(&self, n: u32) {
        self.fail_submits.store(n, Ordering::SeqCst);
    }

    /// Number of submit calls received, including failed ones.
    pub fn submit_count(&self) -> u32 {
        self.submit_count.load(Ordering::SeqCst)
    }

    /// Records that reached the backend successfully.
    pub fn submitted(&self) -> Vec<ProgressRecord> {
        self.submitted.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProgressSink for MockBackend {
    async fn submit(&self, record: &ProgressRecord) -> Result<(), ApiError> {
        self.submit_count.fetch_add(1, Ordering::SeqCst);
        let remaining = self.fail_submits.load(Ordering::SeqCst);
        if remaining > 0 {
            self.fail_submits.store(remaining - 1, Ordering::SeqCst);
            return Err(ApiError::Network("mock: injected failure".into()));
        }
        self.submitted.lock().unwrap().push(record.clone());
        Ok(())
    }
}

#[async_trait]
impl Backend for MockBackend {
    async fn list_children(&self) -> Result<Vec<Child>, ApiError> {
        Ok(self.children.clone())
    }

    async fn fetch_child(&self, id: &str) -> Result<Child, ApiError> {
        self.children
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("crianca {id}")))
    }

    async fn list_classrooms(&self) -> Result<Vec<Classroom>, ApiError> {
        Ok(self.classrooms.clone())
    }

    async fn list_activities(&self) -> Result<Vec<Activity>, ApiError> {
        Ok(self.activities.clone())
    }

    async fn progress_for_child(
        &self,
        child_id: &str,
    ) -> Result<Vec<ProgressRecord>, ApiError> {
        Ok(self
            .progress
            .iter()
            .filter(|r| r.child_id == child_id)
            .cloned()
            .collect())
    }

    async fn generate_report(&self, _child_id: &str) -> Result<String, ApiError> {
        Ok(self.report_text.clone())
    }
}
