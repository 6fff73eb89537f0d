// src/models/question.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::AppError;

/// Whether a question has one correct option or several.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    Single,
    Multiple,
}

impl QuestionType {
    /// `Single` iff exactly one option is correct.
    pub fn from_answer(answer: &[usize]) -> Self {
        if answer.len() == 1 {
            QuestionType::Single
        } else {
            QuestionType::Multiple
        }
    }
}

/// One entry of the question bank, as persisted in the bank JSON file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct QuestionRecord {
    /// Question number assigned by the source document.
    pub id: i64,

    /// Prompt text with whitespace normalized.
    pub question: String,

    /// Answer choices, addressed by 0-based index.
    #[validate(custom(function = validate_options))]
    pub options: Vec<String>,

    /// 0-based indices of the correct options.
    #[validate(length(min = 1))]
    pub answer: Vec<usize>,

    /// Mapped to the JSON key `type` since `type` is a reserved keyword in Rust.
    #[serde(rename = "type")]
    pub question_type: QuestionType,
}

impl QuestionRecord {
    /// Builds a record, deriving the type from the answer cardinality.
    pub fn new(id: i64, question: String, options: Vec<String>, answer: Vec<usize>) -> Self {
        let question_type = QuestionType::from_answer(&answer);
        Self {
            id,
            question,
            options,
            answer,
            question_type,
        }
    }

    /// Checks field constraints plus the cross-field ones `validator` cannot express.
    pub fn check(&self) -> Result<(), AppError> {
        self.validate().map_err(|e| {
            AppError::InvalidBank(format!("question {}: {}", self.id, e))
        })?;

        if let Some(bad) = self.answer.iter().find(|&&i| i >= self.options.len()) {
            return Err(AppError::InvalidBank(format!(
                "question {}: answer index {} out of range for {} options",
                self.id,
                bad,
                self.options.len()
            )));
        }

        if self.question_type != QuestionType::from_answer(&self.answer) {
            return Err(AppError::InvalidBank(format!(
                "question {}: type {:?} does not match {} correct option(s)",
                self.id,
                self.question_type,
                self.answer.len()
            )));
        }

        Ok(())
    }

    /// Option texts for the given indices, skipping any that are out of range.
    pub fn option_texts(&self, indices: &[usize]) -> Vec<String> {
        indices
            .iter()
            .filter_map(|&i| self.options.get(i).cloned())
            .collect()
    }
}

/// DTO for sending a question to the client (excludes the answer).
#[derive(Debug, Serialize)]
pub struct PublicQuestion {
    pub id: i64,
    pub question: String,
    pub options: Vec<String>,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
}

impl From<&QuestionRecord> for PublicQuestion {
    fn from(record: &QuestionRecord) -> Self {
        Self {
            id: record.id,
            question: record.question.clone(),
            options: record.options.clone(),
            question_type: record.question_type,
        }
    }
}

fn validate_options(options: &[String]) -> Result<(), validator::ValidationError> {
    if options.is_empty() {
        return Err(validator::ValidationError::new("options_cannot_be_empty"));
    }
    if options.iter().any(|opt| opt.trim().is_empty()) {
        return Err(validator::ValidationError::new("option_cannot_be_blank"));
    }
    Ok(())
}
