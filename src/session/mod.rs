//! The exam-session core: answer store, countdown, submission guard, and the
//! controller that orchestrates them for one attempt.

mod answers;
mod controller;
mod guard;
mod timer;

pub use answers::AnswerStore;
pub use controller::{ExamSessionController, SessionSnapshot, SubmitOutcome, SubmitTrigger};
pub use guard::{BeginOutcome, SubmissionGuard, SubmissionState};
pub use timer::{CountdownTimer, TimerState};
