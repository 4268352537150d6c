use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Answers keyed by question id. One answer per question, last write wins.
pub type AnswerMap = HashMap<String, String>;

/// Result of a graded submission, as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionResult {
    pub submission_id: Uuid,
    pub score: u32,
    pub total_points: u32,
    pub percentage: f64,
    pub submitted_at: DateTime<Utc>,
}

impl SubmissionResult {
    pub fn new(score: u32, total_points: u32, submitted_at: DateTime<Utc>) -> Self {
        let percentage = if total_points > 0 {
            f64::from(score) / f64::from(total_points) * 100.0
        } else {
            0.0
        };

        Self {
            submission_id: Uuid::new_v4(),
            score,
            total_points,
            percentage,
            submitted_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage() {
        let result = SubmissionResult::new(12, 16, Utc::now());
        assert_eq!(result.percentage, 75.0);

        // An exam with no points never divides by zero.
        let empty = SubmissionResult::new(0, 0, Utc::now());
        assert_eq!(empty.percentage, 0.0);
    }
}
