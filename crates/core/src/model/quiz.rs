use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("quiz title is empty")]
    EmptyTitle,
    #[error("question {index} has no text")]
    EmptyQuestion { index: usize },
    #[error("invalid quiz definition: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub text: String,
    /// Several choices may be picked (checkboxes) instead of one (radios).
    #[serde(default)]
    pub multiple: bool,
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl Quiz {
    /// Parse and validate a quiz definition.
    ///
    /// # Errors
    ///
    /// Returns `QuizError` if the JSON is malformed or the title or a question
    /// text is blank.
    pub fn from_json(raw: &str) -> Result<Self, QuizError> {
        let quiz: Self = serde_json::from_str(raw)?;
        quiz.validate()?;
        Ok(quiz)
    }

    /// # Errors
    ///
    /// Returns `QuizError` if the title or a question text is blank.
    pub fn validate(&self) -> Result<(), QuizError> {
        if self.title.trim().is_empty() {
            return Err(QuizError::EmptyTitle);
        }
        if let Some(index) = self.questions.iter().position(|q| q.text.trim().is_empty()) {
            return Err(QuizError::EmptyQuestion { index });
        }
        Ok(())
    }

    /// Built-in quiz used when no definition file is configured.
    #[must_use]
    pub fn sample() -> Self {
        fn question(text: &str, multiple: bool, choices: &[&str]) -> Question {
            Question {
                text: text.to_string(),
                multiple,
                choices: choices
                    .iter()
                    .map(|c| Choice {
                        text: (*c).to_string(),
                    })
                    .collect(),
            }
        }

        Self {
            title: "Amphibian basics".to_string(),
            description: "A short warm-up quiz.".to_string(),
            questions: vec![
                question(
                    "Which order do frogs and toads belong to?",
                    false,
                    &["Anura", "Urodela", "Squamata"],
                ),
                question(
                    "Where is the tympanum of a frog located?",
                    false,
                    &[
                        "Behind the eye",
                        "Inside the upper jaw",
                        "In the middle of the back",
                    ],
                ),
                question(
                    "Which of these do adult frogs use to breathe?",
                    true,
                    &["Lungs", "Skin", "Gills"],
                ),
                question(
                    "Which hormone drives tadpole metamorphosis?",
                    false,
                    &["Thyroid hormone", "Insulin", "Melatonin"],
                ),
            ],
        }
    }
}
