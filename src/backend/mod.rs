//! The backend collaborator: trait seam plus an in-process implementation.

mod api;
mod local;

pub use api::{BackendError, ExamBackend};
pub use local::LocalBackend;
