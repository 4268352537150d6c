use tokio::time::{Duration, Instant};

/// Timer lifecycle. Untimed exams never leave `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Idle,
    Running,
    Expired,
}

/// Deadline-anchored countdown for a timed attempt.
///
/// Remaining time is always computed as `max(0, deadline - now)` from the
/// absolute deadline stored at arm time, so paused or delayed ticks (host
/// suspension, a busy event loop) can never award or steal time. The struct
/// holds only state; the task that sleeps until the deadline lives in the
/// controller, which calls [`try_expire`](CountdownTimer::try_expire) under
/// the session lock to make expiry observable exactly once.
#[derive(Debug)]
pub struct CountdownTimer {
    state: TimerState,
    deadline: Option<Instant>,
}

impl Default for CountdownTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl CountdownTimer {
    pub fn new() -> Self {
        Self {
            state: TimerState::Idle,
            deadline: None,
        }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    /// Start the countdown. Returns the deadline for the expiry task.
    ///
    /// Only valid from `Idle`; a second call is ignored and returns `None`.
    pub fn arm(&mut self, duration_seconds: u64) -> Option<Instant> {
        if self.state != TimerState::Idle {
            return None;
        }
        let deadline = Instant::now() + Duration::from_secs(duration_seconds);
        self.state = TimerState::Running;
        self.deadline = Some(deadline);
        Some(deadline)
    }

    /// Seconds left, clamped at zero. `None` unless running or expired.
    pub fn remaining_seconds(&self) -> Option<u64> {
        match self.state {
            TimerState::Idle => None,
            TimerState::Expired => Some(0),
            TimerState::Running => self
                .deadline
                .map(|d| d.saturating_duration_since(Instant::now()).as_secs()),
        }
    }

    /// Transition to `Expired` if the deadline has passed.
    ///
    /// Returns `true` exactly once per attempt; the caller fires the
    /// auto-submit on that `true`.
    pub fn try_expire(&mut self) -> bool {
        if self.state != TimerState::Running {
            return false;
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => {
                self.state = TimerState::Expired;
                true
            }
            _ => false,
        }
    }

    /// Stop the countdown. Idempotent; a no-op after expiry.
    pub fn cancel(&mut self) {
        if self.state == TimerState::Running {
            self.state = TimerState::Idle;
            self.deadline = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use tokio::time::advance;

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_remaining_anchored_to_deadline() {
        let mut timer = CountdownTimer::new();
        assert_eq!(timer.remaining_seconds(), None);

        timer.arm(60).unwrap();
        assert_eq!(timer.remaining_seconds(), Some(60));

        // One big jump, as after a host suspension: remaining resyncs from
        // the deadline instead of counting missed ticks.
        advance(Duration::from_secs(45)).await;
        assert_eq!(timer.remaining_seconds(), Some(15));

        advance(Duration::from_secs(100)).await;
        assert_eq!(timer.remaining_seconds(), Some(0));
    }

    #[tokio::test(start_paused = true)]
    async fn test_expires_exactly_once() {
        let mut timer = CountdownTimer::new();
        timer.arm(10).unwrap();

        assert!(!timer.try_expire());
        advance(Duration::from_secs(10)).await;

        assert!(timer.try_expire());
        assert_eq!(timer.state(), TimerState::Expired);
        assert!(!timer.try_expire());
        assert_eq!(timer.remaining_seconds(), Some(0));
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_arm_ignored() {
        let mut timer = CountdownTimer::new();
        timer.arm(10).unwrap();
        assert!(timer.arm(99).is_none());
        assert_eq!(timer.remaining_seconds(), Some(10));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_is_idempotent() {
        let mut timer = CountdownTimer::new();
        timer.arm(10).unwrap();

        timer.cancel();
        assert_eq!(timer.state(), TimerState::Idle);
        timer.cancel();
        assert_eq!(timer.remaining_seconds(), None);

        // Cancel after expiry keeps the expired state.
        let mut timer = CountdownTimer::new();
        timer.arm(1).unwrap();
        advance(Duration::from_secs(2)).await;
        assert!(timer.try_expire());
        timer.cancel();
        assert_eq!(timer.state(), TimerState::Expired);
    }
}
