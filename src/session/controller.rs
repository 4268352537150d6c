use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;
use tokio::task::AbortHandle;
use tokio::time::{sleep_until, Instant};

use crate::backend::ExamBackend;
use crate::models::{derive_status, AnswerMap, Exam, ExamStatus, SubmissionResult};
use crate::SessionError;

use super::answers::AnswerStore;
use super::guard::{BeginOutcome, SubmissionGuard, SubmissionState};
use super::timer::{CountdownTimer, TimerState};

/// What caused a submit call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitTrigger {
    /// The student asked to submit.
    Manual,
    /// The countdown reached zero.
    Timeout,
}

/// Result of a submit call, for the UI to act on.
#[derive(Debug, Clone)]
pub enum SubmitOutcome {
    /// Delivered and graded.
    Submitted(SubmissionResult),
    /// A previous delivery already succeeded; its result is returned again.
    AlreadySubmitted(SubmissionResult),
    /// A delivery is in flight; nothing was sent.
    InFlight,
    /// Manual submit with unanswered questions: the caller must confirm
    /// (via [`ExamSessionController::submit_confirmed`]) before delivery.
    ConfirmationRequired { unanswered: Vec<String> },
    /// The exam is not open for submission (missed or upcoming).
    NotSubmittable(ExamStatus),
}

/// Point-in-time view of the attempt for rendering.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub status: ExamStatus,
    /// Seconds left on a timed attempt, `None` if untimed.
    pub remaining_seconds: Option<u64>,
    /// Questions with a non-empty answer.
    pub answered: usize,
    pub total: usize,
    pub answers: AnswerMap,
    pub submission: SubmissionState,
}

/// All mutable attempt state, behind one lock.
///
/// The expiry task and UI events interleave by locking this; the lock is the
/// "single event loop" of the attempt and is never held across a backend call.
struct SessionState {
    exam: Exam,
    status: ExamStatus,
    answers: AnswerStore,
    guard: SubmissionGuard,
    timer: CountdownTimer,
    expiry_task: Option<AbortHandle>,
}

struct Inner<B> {
    backend: B,
    session: Mutex<SessionState>,
}

/// Orchestrates one student's attempt at one exam: load, answer, countdown,
/// at-most-once submission, and status reporting.
///
/// Cheap to clone; clones share the same attempt.
pub struct ExamSessionController<B: ExamBackend> {
    inner: Arc<Inner<B>>,
}

impl<B: ExamBackend> Clone for ExamSessionController<B> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<B: ExamBackend> ExamSessionController<B> {
    /// Fetch the exam and any prior submission, classify the attempt, and
    /// start the countdown for a timed available exam.
    ///
    /// A load failure creates no session; the caller retries with a fresh
    /// `load`.
    pub async fn load(backend: B, exam_id: &str) -> Result<Self, SessionError> {
        let exam = backend
            .fetch_exam(exam_id)
            .await
            .map_err(SessionError::Load)?;
        let prior = backend
            .fetch_prior_submission(exam_id)
            .await
            .map_err(SessionError::Load)?;

        let now = Utc::now();
        let status = derive_status(&exam, prior.as_ref(), now);
        let guard = match prior {
            Some(result) => SubmissionGuard::submitted(result),
            None => SubmissionGuard::new(),
        };
        let duration = match status {
            ExamStatus::Available => exam.effective_duration_seconds(now),
            _ => None,
        };

        tracing::info!(exam_id, status = ?status, timed = duration.is_some(), "exam session loaded");

        let controller = Self {
            inner: Arc::new(Inner {
                backend,
                session: Mutex::new(SessionState {
                    exam,
                    status,
                    answers: AnswerStore::new(),
                    guard,
                    timer: CountdownTimer::new(),
                    expiry_task: None,
                }),
            }),
        };

        if let Some(seconds) = duration {
            controller.start_timer(seconds).await;
        }

        Ok(controller)
    }

    /// Arm the countdown and spawn the task that fires the auto-submit.
    async fn start_timer(&self, duration_seconds: u64) {
        let mut session = self.inner.session.lock().await;
        let Some(deadline) = session.timer.arm(duration_seconds) else {
            return;
        };

        let controller = self.clone();
        let handle = tokio::spawn(async move {
            controller.run_expiry(deadline).await;
        });
        session.expiry_task = Some(handle.abort_handle());
    }

    async fn run_expiry(&self, deadline: Instant) {
        sleep_until(deadline).await;

        // try_expire is the single point deciding whether this wake-up still
        // counts; a cancelled or already-expired timer fires nothing.
        let fired = {
            let mut session = self.inner.session.lock().await;
            let fired = session.timer.try_expire();
            if fired {
                // This task is now the submit path; drop its own abort handle
                // so the success branch cannot cancel the delivery mid-flight.
                session.expiry_task = None;
            }
            fired
        };
        if !fired {
            return;
        }

        tracing::info!("countdown expired, auto-submitting");
        if let Err(err) = self.submit(SubmitTrigger::Timeout).await {
            // Guard is now Failed; the UI sees it in the snapshot and may retry.
            tracing::warn!(error = %err, "auto-submit failed");
        }
    }

    /// Record the student's answer for a question.
    ///
    /// Silently ignored once a submission has begun or succeeded, once the
    /// countdown has expired, when the exam is not available, or for an
    /// unknown question id. These are programming or late-event cases, never
    /// user-visible errors.
    pub async fn set_answer(&self, question_id: &str, value: String) {
        let mut session = self.inner.session.lock().await;

        if session.status != ExamStatus::Available {
            tracing::debug!(question_id, status = ?session.status, "answer ignored: exam not open");
            return;
        }
        match session.guard.state() {
            SubmissionState::Submitting | SubmissionState::Submitted(_) => {
                tracing::debug!(question_id, "answer ignored: submission underway or done");
                return;
            }
            SubmissionState::NotSubmitted | SubmissionState::Failed(_) => {}
        }
        if session.timer.state() == TimerState::Expired {
            tracing::debug!(question_id, "answer ignored: time is up");
            return;
        }
        if session.exam.question(question_id).is_none() {
            tracing::warn!(question_id, "answer ignored: unknown question id");
            return;
        }

        session.answers.set(question_id, value);
    }

    /// Submit the attempt.
    ///
    /// A manual trigger with unanswered questions returns
    /// [`SubmitOutcome::ConfirmationRequired`] instead of delivering; the
    /// caller decides and then calls [`submit_confirmed`](Self::submit_confirmed).
    /// A timeout trigger delivers unconditionally with whatever answers exist.
    pub async fn submit(&self, trigger: SubmitTrigger) -> Result<SubmitOutcome, SessionError> {
        self.do_submit(trigger, false).await
    }

    /// Submit after the caller confirmed delivering with unanswered questions.
    pub async fn submit_confirmed(&self) -> Result<SubmitOutcome, SessionError> {
        self.do_submit(SubmitTrigger::Manual, true).await
    }

    async fn do_submit(
        &self,
        trigger: SubmitTrigger,
        confirmed: bool,
    ) -> Result<SubmitOutcome, SessionError> {
        let (exam_id, answers) = {
            let mut session = self.inner.session.lock().await;

            // The guard decides first so duplicate triggers short-circuit
            // before any confirmation round-trip.
            match session.guard.state() {
                SubmissionState::Submitted(result) => {
                    return Ok(SubmitOutcome::AlreadySubmitted(result.clone()));
                }
                SubmissionState::Submitting => return Ok(SubmitOutcome::InFlight),
                SubmissionState::NotSubmitted | SubmissionState::Failed(_) => {}
            }

            if matches!(session.status, ExamStatus::Missed | ExamStatus::Upcoming) {
                return Ok(SubmitOutcome::NotSubmittable(session.status));
            }

            if trigger == SubmitTrigger::Manual && !confirmed {
                let unanswered = session.answers.unanswered(&session.exam.questions);
                if !unanswered.is_empty() {
                    return Ok(SubmitOutcome::ConfirmationRequired { unanswered });
                }
            }

            match session.guard.begin() {
                BeginOutcome::Proceed => {}
                BeginOutcome::InFlight => return Ok(SubmitOutcome::InFlight),
                BeginOutcome::AlreadySubmitted(result) => {
                    return Ok(SubmitOutcome::AlreadySubmitted(result));
                }
            }

            (session.exam.id.clone(), session.answers.snapshot())
        };

        tracing::info!(exam_id = %exam_id, trigger = ?trigger, answers = answers.len(), "submitting exam");

        match self.inner.backend.submit_exam(&exam_id, &answers).await {
            Ok(result) => {
                let mut session = self.inner.session.lock().await;
                session.guard.complete(result.clone());
                session.status = ExamStatus::Taken;
                session.timer.cancel();
                if let Some(task) = session.expiry_task.take() {
                    task.abort();
                }
                tracing::info!(exam_id = %exam_id, score = result.score, "submission accepted");
                Ok(SubmitOutcome::Submitted(result))
            }
            Err(err) => {
                let mut session = self.inner.session.lock().await;
                session.guard.fail(err.to_string());
                tracing::warn!(exam_id = %exam_id, error = %err, "submission failed, retry possible");
                Err(SessionError::Submit(err))
            }
        }
    }

    /// Current view of the attempt.
    pub async fn snapshot(&self) -> SessionSnapshot {
        let session = self.inner.session.lock().await;
        SessionSnapshot {
            status: session.status,
            remaining_seconds: session.timer.remaining_seconds(),
            answered: session.answers.count(),
            total: session.exam.questions.len(),
            answers: session.answers.snapshot(),
            submission: session.guard.state().clone(),
        }
    }

    /// Ids of questions still unanswered, in exam order.
    pub async fn unanswered(&self) -> Vec<String> {
        let session = self.inner.session.lock().await;
        session.answers.unanswered(&session.exam.questions)
    }

    /// The loaded exam definition. Immutable for the attempt's duration.
    pub async fn exam(&self) -> Exam {
        self.inner.session.lock().await.exam.clone()
    }

    /// Tear down the attempt when the UI leaves the exam.
    ///
    /// Cancels the countdown so no auto-submit fires against a dead screen.
    /// An in-flight submission is left to complete on its own task.
    pub async fn close(&self) {
        let mut session = self.inner.session.lock().await;
        session.timer.cancel();
        if let Some(task) = session.expiry_task.take() {
            task.abort();
        }
    }
}
