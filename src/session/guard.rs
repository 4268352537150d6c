use crate::models::SubmissionResult;

/// Delivery state of the attempt's single submission.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionState {
    NotSubmitted,
    Submitting,
    Submitted(SubmissionResult),
    Failed(String),
}

impl Default for SubmissionState {
    fn default() -> Self {
        Self::NotSubmitted
    }
}

/// Outcome of asking the guard to begin a delivery.
#[derive(Debug, Clone)]
pub enum BeginOutcome {
    /// The caller owns the delivery and must report back.
    Proceed,
    /// Another delivery is in flight; do nothing.
    InFlight,
    /// A delivery already succeeded; here is its result.
    AlreadySubmitted(SubmissionResult),
}

/// At-most-once enforcement for backend submission.
///
/// Manual submit, timer expiry, and duplicate taps all funnel through
/// [`begin`](SubmissionGuard::begin); only the first caller past the gate may
/// invoke the backend. `Failed` re-opens the gate for a retry, `Submitted`
/// closes it for good.
#[derive(Debug, Default)]
pub struct SubmissionGuard {
    state: SubmissionState,
}

impl SubmissionGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Guard for an attempt whose submission already exists on the server.
    /// The gate starts closed and every submit returns the prior result.
    pub fn submitted(result: SubmissionResult) -> Self {
        Self {
            state: SubmissionState::Submitted(result),
        }
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    /// Try to take ownership of the delivery.
    pub fn begin(&mut self) -> BeginOutcome {
        match &self.state {
            SubmissionState::NotSubmitted | SubmissionState::Failed(_) => {
                self.state = SubmissionState::Submitting;
                BeginOutcome::Proceed
            }
            SubmissionState::Submitting => BeginOutcome::InFlight,
            SubmissionState::Submitted(result) => BeginOutcome::AlreadySubmitted(result.clone()),
        }
    }

    /// Record a successful delivery. Terminal.
    pub fn complete(&mut self, result: SubmissionResult) {
        debug_assert_eq!(self.state, SubmissionState::Submitting);
        self.state = SubmissionState::Submitted(result);
    }

    /// Record a failed delivery, re-opening the gate for retry.
    pub fn fail(&mut self, message: String) {
        debug_assert_eq!(self.state, SubmissionState::Submitting);
        self.state = SubmissionState::Failed(message);
    }
}
