//! Exam definition files for the demo binary and the local backend.

mod loader;

pub use loader::{load_exam_from_json, ExamDefinition, LoadError, QuestionDefinition};
