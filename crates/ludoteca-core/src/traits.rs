//! Backend collaborator traits.
//!
//! These async traits are the seam between the session engine and the
//! remote REST backend; `ludoteca-api` implements them over HTTP and tests
//! use in-memory mocks.

use async_trait::async_trait;

use crate::error::ApiError;
use crate::model::{Activity, Child, Classroom, ProgressRecord};

/// Where finished-session progress records are sent.
///
/// Submission is NOT idempotent: resubmitting after a failure may create a
/// duplicate record on the backend. The engine documents this rather than
/// deduplicating.
#[async_trait]
pub trait ProgressSink: Send + Sync {
    /// Persist one progress record.
    async fn submit(&self, record: &ProgressRecord) -> Result<(), ApiError>;
}

/// Full read/write surface of the remote backend.
#[async_trait]
pub trait Backend: ProgressSink {
    async fn list_children(&self) -> Result<Vec<Child>, ApiError>;

    async fn fetch_child(&self, id: &str) -> Result<Child, ApiError>;

    async fn list_classrooms(&self) -> Result<Vec<Classroom>, ApiError>;

    async fn list_activities(&self) -> Result<Vec<Activity>, ApiError>;

    /// Prior progress records for one child, oldest first.
    async fn progress_for_child(&self, child_id: &str)
        -> Result<Vec<ProgressRecord>, ApiError>;

    /// Ask the AI-report endpoint for a narrative over the child's history.
    async fn generate_report(&self, child_id: &str) -> Result<String, ApiError>;
}
