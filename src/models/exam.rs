use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Question, SubmissionResult};

/// An exam definition as served by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exam {
    pub id: String,
    pub title: String,
    pub questions: Vec<Question>,
    #[serde(default)]
    pub settings: ExamSettings,
    /// Deadline after which an unattempted exam counts as missed.
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    /// Earliest moment the exam may be taken.
    #[serde(default)]
    pub opens_at: Option<DateTime<Utc>>,
}

/// Timing settings for an exam.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExamSettings {
    #[serde(default)]
    pub timed: bool,
    #[serde(default)]
    pub duration_minutes: u32,
}

impl Exam {
    pub fn total_points(&self) -> u32 {
        self.questions.iter().map(|q| q.points).sum()
    }

    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    /// Timer duration in seconds, clamped so it never outlives the due date.
    pub fn effective_duration_seconds(&self, now: DateTime<Utc>) -> Option<u64> {
        if !self.settings.timed {
            return None;
        }
        let duration = u64::from(self.settings.duration_minutes) * 60;
        match self.due_date {
            Some(due) if due > now => {
                let until_due = (due - now).num_seconds().max(0) as u64;
                Some(duration.min(until_due))
            }
            _ => Some(duration),
        }
    }
}

/// Availability of an exam for the current student.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExamStatus {
    /// Open for taking right now.
    Available,
    /// A submission already exists; terminal.
    Taken,
    /// Due date passed without a submission; terminal.
    Missed,
    /// Opens at some future time.
    Upcoming,
}

/// Classify an exam from server metadata and any prior submission.
///
/// A prior submission always wins, regardless of due date.
pub fn derive_status(
    exam: &Exam,
    prior: Option<&SubmissionResult>,
    now: DateTime<Utc>,
) -> ExamStatus {
    if prior.is_some() {
        return ExamStatus::Taken;
    }
    if let Some(due) = exam.due_date {
        if due <= now {
            return ExamStatus::Missed;
        }
    }
    if let Some(opens) = exam.opens_at {
        if opens > now {
            return ExamStatus::Upcoming;
        }
    }
    ExamStatus::Available
}
