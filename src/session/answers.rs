use crate::models::{AnswerMap, Question};

/// In-memory answers for the active attempt.
///
/// One answer per question id, last write wins. Empty values are allowed and
/// reported as unanswered; the question-id validity check and the
/// no-writes-after-submit rule live in the controller.
#[derive(Debug, Default)]
pub struct AnswerStore {
    entries: AnswerMap,
}

impl AnswerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record or overwrite the answer for a question.
    pub fn set(&mut self, question_id: &str, value: String) {
        self.entries.insert(question_id.to_string(), value);
    }

    /// Number of questions with a non-empty answer.
    pub fn count(&self) -> usize {
        self.entries.values().filter(|v| !v.is_empty()).count()
    }

    /// Ids of questions with no answer (or an empty one), in question order.
    pub fn unanswered(&self, questions: &[Question]) -> Vec<String> {
        questions
            .iter()
            .filter(|q| self.entries.get(&q.id).is_none_or(|v| v.is_empty()))
            .map(|q| q.id.clone())
            .collect()
    }

    /// Snapshot of the current answers, as sent to the backend.
    pub fn snapshot(&self) -> AnswerMap {
        self.entries.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::QuestionKind;

    fn questions() -> Vec<Question> {
        ["q1", "q2", "q3"]
            .iter()
            .map(|id| Question {
                id: id.to_string(),
                text: format!("Question {}", id),
                kind: QuestionKind::Text,
                points: 1,
            })
            .collect()
    }

    #[test]
    fn test_last_write_wins() {
        let mut store = AnswerStore::new();
        store.set("q1", "first".to_string());
        store.set("q1", "second".to_string());
        assert_eq!(
            store.snapshot().get("q1").map(String::as_str),
            Some("second")
        );
        assert_eq!(store.count(), 1);
    }

    #[test]
    fn test_unanswered_in_question_order() {
        let mut store = AnswerStore::new();
        store.set("q3", "late".to_string());
        store.set("q2", "".to_string());

        // q1 missing and q2 empty both count; order follows the exam.
        assert_eq!(store.unanswered(&questions()), ["q1", "q2"]);
        assert_eq!(store.count(), 1);
    }

    #[test]
    fn test_all_answered() {
        let mut store = AnswerStore::new();
        for q in questions() {
            store.set(&q.id, "yes".to_string());
        }
        assert!(store.unanswered(&questions()).is_empty());
        assert_eq!(store.count(), 3);
    }
}
