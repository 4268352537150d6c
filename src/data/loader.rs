use std::collections::HashMap;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;

use crate::models::{Exam, ExamSettings, Question};

/// Error loading an exam definition file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
    #[error("{path} must contain at least one question")]
    Empty { path: String },
}

/// An exam definition with the grading key embedded, as stored on disk.
#[derive(Debug, Clone, Deserialize)]
pub struct ExamDefinition {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub settings: ExamSettings,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub opens_at: Option<DateTime<Utc>>,
    pub questions: Vec<QuestionDefinition>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuestionDefinition {
    #[serde(flatten)]
    pub question: Question,
    /// Grading key; absent for manually reviewed questions.
    #[serde(default)]
    pub answer: Option<String>,
}

impl ExamDefinition {
    /// Split into the student-facing exam and the grader's answer key.
    pub fn split(self) -> (Exam, HashMap<String, String>) {
        let mut questions = Vec::with_capacity(self.questions.len());
        let mut key = HashMap::new();

        for q in self.questions {
            if let Some(answer) = q.answer {
                key.insert(q.question.id.clone(), answer);
            }
            questions.push(q.question);
        }

        let exam = Exam {
            id: self.id,
            title: self.title,
            questions,
            settings: self.settings,
            due_date: self.due_date,
            opens_at: self.opens_at,
        };
        (exam, key)
    }
}

/// Load an exam definition from a JSON file.
pub fn load_exam_from_json<P: AsRef<Path>>(path: P) -> Result<ExamDefinition, LoadError> {
    let path = path.as_ref();
    let display = path.display().to_string();

    let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: display.clone(),
        source,
    })?;
    let definition: ExamDefinition =
        serde_json::from_str(&content).map_err(|source| LoadError::Parse {
            path: display.clone(),
            source,
        })?;

    if definition.questions.is_empty() {
        return Err(LoadError::Empty { path: display });
    }

    Ok(definition)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_separates_answer_key() {
        let definition: ExamDefinition = serde_json::from_str(
            r#"{
                "id": "e1",
                "title": "Sample",
                "questions": [
                    {"id": "q1", "text": "2+2?", "type": "mcq",
                     "options": ["3", "4"], "points": 5, "answer": "4"},
                    {"id": "q2", "text": "Essay.", "type": "text", "points": 10}
                ]
            }"#,
        )
        .unwrap();

        let (exam, key) = definition.split();
        assert_eq!(exam.questions.len(), 2);
        assert_eq!(key.get("q1").map(String::as_str), Some("4"));
        assert!(!key.contains_key("q2"));
        // Defaults: untimed, no due date.
        assert!(!exam.settings.timed);
        assert!(exam.due_date.is_none());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            load_exam_from_json("does-not-exist.json").unwrap_err(),
            LoadError::Io { .. }
        ));
    }
}
