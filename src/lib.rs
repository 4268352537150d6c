//! # exam-session
//!
//! The session core behind a timed exam attempt: answer tracking, a
//! deadline-anchored countdown with auto-submit, and at-most-once delivery
//! to a pluggable backend. UI-framework agnostic; the bundled TUI is a demo
//! consumer of the same public API.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use exam_session::{
//!     backend::LocalBackend, data::load_exam_from_json,
//!     session::{ExamSessionController, SubmitTrigger},
//!     SessionError,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), SessionError> {
//!     let definition = load_exam_from_json("demos/exam.json")?;
//!     let exam_id = definition.id.clone();
//!     let backend = LocalBackend::new(definition);
//!
//!     let session = ExamSessionController::load(backend, &exam_id).await?;
//!     session.set_answer("q1", "Jupiter".to_string()).await;
//!     session.submit(SubmitTrigger::Manual).await?;
//!     Ok(())
//! }
//! ```

pub mod app;
pub mod backend;
pub mod data;
pub mod models;
pub mod session;
pub mod terminal;
mod ui;

use thiserror::Error;

use crate::backend::BackendError;
use crate::data::LoadError;

/// Error type for session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Exam or prior-submission fetch failed; no session was created.
    #[error("failed to load exam: {0}")]
    Load(#[source] BackendError),
    /// Delivery failed; the guard is in `Failed` and a retry is allowed.
    #[error("failed to submit exam: {0}")]
    Submit(#[source] BackendError),
    /// Exam definition file problem (demo binary).
    #[error(transparent)]
    Data(#[from] LoadError),
    /// Terminal IO problem (demo binary).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
