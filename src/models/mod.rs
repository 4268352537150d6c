//! Domain types shared by the session core, the backend seam, and the UI.

mod exam;
mod question;
mod submission;

pub use exam::{derive_status, Exam, ExamSettings, ExamStatus};
pub use question::{Question, QuestionKind};
pub use submission::{AnswerMap, SubmissionResult};
