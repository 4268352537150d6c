use async_trait::async_trait;
use thiserror::Error;

use crate::models::{AnswerMap, Exam, SubmissionResult};

/// Errors surfaced by a backend.
#[derive(Debug, Clone, Error)]
pub enum BackendError {
    #[error("exam not found: {0}")]
    NotFound(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("submission rejected: {0}")]
    Rejected(String),
}

/// The backend collaborator behind an exam attempt.
///
/// Injected into [`ExamSessionController`](crate::session::ExamSessionController)
/// so the core can be driven against a real service or an in-process fake.
/// The controller enforces at-most-one `submit_exam` call per attempt on its
/// side; implementations must not be relied on to deduplicate.
#[async_trait]
pub trait ExamBackend: Send + Sync + 'static {
    /// Fetch the exam definition.
    async fn fetch_exam(&self, exam_id: &str) -> Result<Exam, BackendError>;

    /// Fetch this student's prior submission for the exam, if any.
    async fn fetch_prior_submission(
        &self,
        exam_id: &str,
    ) -> Result<Option<SubmissionResult>, BackendError>;

    /// Deliver the answers for grading.
    async fn submit_exam(
        &self,
        exam_id: &str,
        answers: &AnswerMap,
    ) -> Result<SubmissionResult, BackendError>;
}
