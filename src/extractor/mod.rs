// src/extractor/mod.rs

//! Offline conversion of a question document plus an answer key into a
//! question bank file.

pub mod answer_key;
pub mod assemble;
pub mod document;
pub mod segment;

use std::fs;
use std::path::Path;

use crate::{bank::save_bank, error::AppError, models::question::QuestionRecord};

pub use answer_key::{ParseFailure, answer_indices, parse_answer_key, parse_answer_string};
pub use assemble::{ExtractionReport, assemble_bank};
pub use document::{DocumentSource, InMemoryDocument, PlainTextDocument};
pub use segment::{SegmentedQuestion, segment_questions};

/// Builds bank records from a document and the answer-key text.
pub fn extract(
    document: &dyn DocumentSource,
    answer_key: &str,
) -> Result<(Vec<QuestionRecord>, ExtractionReport), AppError> {
    let questions = segment_questions(&document.full_text()?);
    let answers = parse_answer_key(answer_key);

    tracing::info!("Questions found in document: {}", questions.len());
    tracing::info!("Answers found in answer key: {}", answers.len());

    Ok(assemble_bank(&questions, &answers))
}

/// Runs the whole pipeline: read both inputs, assemble, write the bank.
pub fn run(
    document_path: impl AsRef<Path>,
    answer_key_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
) -> Result<ExtractionReport, AppError> {
    let answer_key_path = answer_key_path.as_ref();
    let answer_key = fs::read_to_string(answer_key_path).map_err(|e| {
        AppError::Io(format!(
            "failed to read answer key {}: {}",
            answer_key_path.display(),
            e
        ))
    })?;

    let document = PlainTextDocument::new(document_path);
    let (records, report) = extract(&document, &answer_key)?;

    save_bank(output_path.as_ref(), &records)?;
    tracing::info!(
        "Extracted {} questions ({} without answer, {} with unusable answer, {} orphan answers)",
        report.emitted,
        report.missing_answer,
        report.unusable_answer,
        report.orphan_answers
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::question::QuestionType;

    #[test]
    fn extracts_multiple_choice_record() {
        let document = InMemoryDocument(vec![
            "Задание 1\nКакие буквы гласные?\n1) A\n2) B\n3) C\n".to_string(),
        ]);
        let (records, report) = extract(&document, "№1 1,3\n").unwrap();

        assert_eq!(report.emitted, 1);
        let record = &records[0];
        assert_eq!(record.id, 1);
        assert_eq!(record.question, "Какие буквы гласные?");
        assert_eq!(record.options, vec!["A", "B", "C"]);
        assert_eq!(record.answer, vec![0, 2]);
        assert_eq!(record.question_type, QuestionType::Multiple);
    }

    #[test]
    fn question_may_span_pages() {
        let document = InMemoryDocument(vec![
            "Задание 1\nНачало вопроса".to_string(),
            "1) Да\n2) Нет\nЗадание 2 Ещё\n1) X\n".to_string(),
        ]);
        let (records, _) = extract(&document, "1 2\n2 1\n").unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].question, "Начало вопроса");
        assert_eq!(records[0].options, vec!["Да", "Нет"]);
        assert_eq!(records[0].answer, vec![1]);
    }
}
