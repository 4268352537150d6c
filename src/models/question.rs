use serde::{Deserialize, Serialize};

/// A single exam question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// Identifier unique within the exam.
    pub id: String,
    pub text: String,
    #[serde(flatten)]
    pub kind: QuestionKind,
    /// Points awarded for a correct answer.
    pub points: u32,
}

/// Question kind, tagged as `"type"` on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum QuestionKind {
    /// Multiple choice; the answer value is the chosen option text.
    Mcq { options: Vec<String> },
    /// Free text; the answer value is whatever the student typed.
    Text,
}

impl Question {
    /// Options for an MCQ question, empty for free text.
    pub fn options(&self) -> &[String] {
        match &self.kind {
            QuestionKind::Mcq { options } => options,
            QuestionKind::Text => &[],
        }
    }

    pub fn is_mcq(&self) -> bool {
        matches!(self.kind, QuestionKind::Mcq { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_wire_shape() {
        let json = r#"{
            "id": "q1",
            "text": "Largest planet?",
            "type": "mcq",
            "options": ["Mars", "Jupiter"],
            "points": 5
        }"#;
        let q: Question = serde_json::from_str(json).unwrap();
        assert_eq!(q.id, "q1");
        assert_eq!(q.options(), ["Mars", "Jupiter"]);
        assert!(q.is_mcq());

        let json = r#"{"id": "q2", "text": "Explain.", "type": "text", "points": 10}"#;
        let q: Question = serde_json::from_str(json).unwrap();
        assert!(!q.is_mcq());
        assert!(q.options().is_empty());
    }
}
