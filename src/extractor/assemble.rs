// src/extractor/assemble.rs

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use super::{answer_key::parse_answer_string, segment::SegmentedQuestion};
use crate::models::question::QuestionRecord;

/// Counts gathered while joining questions with the answer key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractionReport {
    pub questions_found: usize,
    pub answers_found: usize,
    pub emitted: usize,
    /// Questions with no line in the answer key.
    pub missing_answer: usize,
    /// Questions whose answer line gave no usable option indices.
    pub unusable_answer: usize,
    /// Answer-key lines with no matching question.
    pub orphan_answers: usize,
}

/// Joins segmented questions with raw answers by question number.
///
/// Only questions with a usable answer are emitted, in document order.
pub fn assemble_bank(
    questions: &[SegmentedQuestion],
    answers: &BTreeMap<i64, String>,
) -> (Vec<QuestionRecord>, ExtractionReport) {
    let mut report = ExtractionReport {
        questions_found: questions.len(),
        answers_found: answers.len(),
        ..Default::default()
    };
    let mut records = Vec::with_capacity(questions.len());

    for q in questions {
        let Some(raw) = answers.get(&q.number) else {
            tracing::warn!("No answer found for question {}", q.number);
            report.missing_answer += 1;
            continue;
        };

        let mut indices = match parse_answer_string(raw) {
            Ok(indices) => indices,
            Err(reason) => {
                tracing::warn!("Unusable answer {:?} for question {}: {}", raw, q.number, reason);
                report.unusable_answer += 1;
                continue;
            }
        };
        indices.sort_unstable();
        indices.dedup();

        if let Some(bad) = indices.iter().find(|&&i| i >= q.options.len()) {
            tracing::warn!(
                "Answer option {} for question {} exceeds its {} options",
                bad + 1,
                q.number,
                q.options.len()
            );
            report.unusable_answer += 1;
            continue;
        }

        records.push(QuestionRecord::new(
            q.number,
            q.question_text.clone(),
            q.options.clone(),
            indices,
        ));
    }

    let numbers: HashSet<i64> = questions.iter().map(|q| q.number).collect();
    report.orphan_answers = answers.keys().filter(|n| !numbers.contains(n)).count();
    if report.orphan_answers > 0 {
        tracing::warn!(
            "{} answer(s) have no matching question",
            report.orphan_answers
        );
    }

    report.emitted = records.len();
    (records, report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::question::QuestionType;

    fn question(number: i64, options: &[&str]) -> SegmentedQuestion {
        SegmentedQuestion {
            number,
            question_text: format!("Вопрос {}", number),
            options: options.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn key(entries: &[(i64, &str)]) -> BTreeMap<i64, String> {
        entries.iter().map(|(n, a)| (*n, a.to_string())).collect()
    }

    #[test]
    fn emits_only_answered_questions() {
        let questions = vec![question(1, &["A", "B", "C"]), question(2, &["A", "B"])];
        let (records, report) = assemble_bank(&questions, &key(&[(1, "1,3")]));

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, 1);
        assert_eq!(records[0].answer, vec![0, 2]);
        assert_eq!(records[0].question_type, QuestionType::Multiple);
        assert_eq!(report.missing_answer, 1);
        assert_eq!(report.emitted, 1);
    }

    #[test]
    fn single_answer_is_single_type() {
        let (records, _) = assemble_bank(&[question(5, &["A", "B"])], &key(&[(5, "2")]));
        assert_eq!(records[0].answer, vec![1]);
        assert_eq!(records[0].question_type, QuestionType::Single);
    }

    #[test]
    fn duplicate_indices_collapse() {
        let (records, _) = assemble_bank(&[question(1, &["A", "B", "C"])], &key(&[(1, "3,1,3")]));
        assert_eq!(records[0].answer, vec![0, 2]);
        assert_eq!(records[0].question_type, QuestionType::Multiple);
    }

    #[test]
    fn empty_or_out_of_range_answers_are_dropped() {
        let questions = vec![question(1, &["A", "B"]), question(2, &["A", "B"])];
        let (records, report) = assemble_bank(&questions, &key(&[(1, "нет"), (2, "5")]));

        assert!(records.is_empty());
        assert_eq!(report.unusable_answer, 2);
        assert_eq!(report.missing_answer, 0);
    }

    #[test]
    fn counts_answers_without_questions() {
        let (_, report) = assemble_bank(&[question(1, &["A"])], &key(&[(1, "1"), (9, "2"), (10, "1")]));
        assert_eq!(report.orphan_answers, 2);
        assert_eq!(report.answers_found, 3);
        assert_eq!(report.questions_found, 1);
    }
}
