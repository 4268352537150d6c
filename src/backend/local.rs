use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use crate::data::ExamDefinition;
use crate::models::{AnswerMap, Exam, QuestionKind, SubmissionResult};

use super::{BackendError, ExamBackend};

/// In-process backend serving a single exam from a local definition.
///
/// Grades MCQ answers against the definition's answer key; free-text answers
/// are matched case-insensitively when a key is present and otherwise left
/// ungraded. Used by the demo binary and as a reference grader in tests.
pub struct LocalBackend {
    exam: Exam,
    answer_key: HashMap<String, String>,
    recorded: Mutex<Option<SubmissionResult>>,
}

impl LocalBackend {
    pub fn new(definition: ExamDefinition) -> Self {
        let (exam, answer_key) = definition.split();
        Self {
            exam,
            answer_key,
            recorded: Mutex::new(None),
        }
    }

    fn grade(&self, answers: &AnswerMap) -> SubmissionResult {
        let mut score = 0;

        for question in &self.exam.questions {
            let Some(answer) = answers.get(&question.id) else {
                continue;
            };
            let Some(key) = self.answer_key.get(&question.id) else {
                // No key: pending manual review, worth 0 here.
                continue;
            };

            let correct = match question.kind {
                QuestionKind::Mcq { .. } => answer == key,
                QuestionKind::Text => answer.trim().eq_ignore_ascii_case(key.trim()),
            };
            if correct {
                score += question.points;
            }
        }

        SubmissionResult::new(score, self.exam.total_points(), Utc::now())
    }
}

#[async_trait]
impl ExamBackend for LocalBackend {
    async fn fetch_exam(&self, exam_id: &str) -> Result<Exam, BackendError> {
        if exam_id != self.exam.id {
            return Err(BackendError::NotFound(exam_id.to_string()));
        }
        Ok(self.exam.clone())
    }

    async fn fetch_prior_submission(
        &self,
        exam_id: &str,
    ) -> Result<Option<SubmissionResult>, BackendError> {
        if exam_id != self.exam.id {
            return Err(BackendError::NotFound(exam_id.to_string()));
        }
        Ok(self.recorded.lock().await.clone())
    }

    async fn submit_exam(
        &self,
        exam_id: &str,
        answers: &AnswerMap,
    ) -> Result<SubmissionResult, BackendError> {
        if exam_id != self.exam.id {
            return Err(BackendError::NotFound(exam_id.to_string()));
        }

        let mut recorded = self.recorded.lock().await;
        if recorded.is_some() {
            return Err(BackendError::Rejected(
                "a submission already exists for this exam".to_string(),
            ));
        }

        let result = self.grade(answers);
        tracing::info!(
            exam_id,
            score = result.score,
            total = result.total_points,
            "graded local submission"
        );
        *recorded = Some(result.clone());
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn definition() -> ExamDefinition {
        serde_json::from_str(
            r#"{
                "id": "e1",
                "title": "Sample",
                "settings": {"timed": false, "duration_minutes": 0},
                "questions": [
                    {"id": "q1", "text": "2+2?", "type": "mcq",
                     "options": ["3", "4"], "points": 5, "answer": "4"},
                    {"id": "q2", "text": "Capital of France?", "type": "text",
                     "points": 5, "answer": "Paris"},
                    {"id": "q3", "text": "Essay.", "type": "text", "points": 10}
                ]
            }"#,
        )
        .unwrap()
    }

    fn answers(pairs: &[(&str, &str)]) -> AnswerMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[tokio::test]
    async fn test_grades_against_answer_key() {
        let backend = LocalBackend::new(definition());
        let result = backend
            .submit_exam("e1", &answers(&[("q1", "4"), ("q2", "  paris "), ("q3", "...")]))
            .await
            .unwrap();

        // q1 exact, q2 case-insensitive, q3 has no key.
        assert_eq!(result.score, 10);
        assert_eq!(result.total_points, 20);
        assert_eq!(result.percentage, 50.0);
    }

    #[tokio::test]
    async fn test_second_submission_rejected() {
        let backend = LocalBackend::new(definition());
        backend.submit_exam("e1", &answers(&[])).await.unwrap();

        let err = backend.submit_exam("e1", &answers(&[])).await.unwrap_err();
        assert!(matches!(err, BackendError::Rejected(_)));
    }

    #[tokio::test]
    async fn test_prior_submission_round_trip() {
        let backend = LocalBackend::new(definition());
        assert!(backend.fetch_prior_submission("e1").await.unwrap().is_none());

        let result = backend.submit_exam("e1", &answers(&[("q1", "4")])).await.unwrap();
        let prior = backend.fetch_prior_submission("e1").await.unwrap().unwrap();
        assert_eq!(prior.submission_id, result.submission_id);
    }

    #[tokio::test]
    async fn test_unknown_exam() {
        let backend = LocalBackend::new(definition());
        assert!(matches!(
            backend.fetch_exam("nope").await.unwrap_err(),
            BackendError::NotFound(_)
        ));
    }
}
