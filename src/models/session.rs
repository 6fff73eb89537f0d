// src/models/session.rs

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rand::{Rng, seq::IndexedRandom, seq::SliceRandom};
use serde::{Deserialize, Serialize};

/// Form field prefix for a question's answer, e.g. `q12`.
pub const ANSWER_FIELD_PREFIX: &str = "q";

/// Where a session is in the quiz flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    InProgress,
    Submitted,
}

/// One user's quiz attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Drawn questions, in display order.
    pub question_ids: Vec<i64>,

    /// Selected 0-based option indices per question id.
    /// Unanswered questions have no entry at all.
    pub answers: BTreeMap<i64, Vec<usize>>,

    pub submitted_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Starts a fresh attempt over the given questions.
    pub fn start(question_ids: Vec<i64>) -> Self {
        Self {
            question_ids,
            answers: BTreeMap::new(),
            submitted_at: None,
        }
    }

    pub fn status(&self) -> SessionStatus {
        if self.submitted_at.is_some() {
            SessionStatus::Submitted
        } else {
            SessionStatus::InProgress
        }
    }

    /// Replaces the stored answers with a submission.
    /// Answers for questions outside this session are ignored.
    pub fn submit(&mut self, answers: BTreeMap<i64, Vec<usize>>) {
        self.answers = answers
            .into_iter()
            .filter(|(id, _)| self.question_ids.contains(id))
            .collect();
        self.submitted_at = Some(Utc::now());
    }
}

/// Draws `min(count, ids.len())` distinct ids uniformly, in random order.
pub fn select_question_ids<R: Rng + ?Sized>(ids: &[i64], count: usize, rng: &mut R) -> Vec<i64> {
    let mut selected: Vec<i64> = ids.choose_multiple(rng, count.min(ids.len())).copied().collect();
    selected.shuffle(rng);
    selected
}

/// Reads submitted answers for the session's questions out of form pairs.
///
/// A field may repeat (checkboxes). Every value of a question must parse as
/// an option index, otherwise that question is logged and left unanswered.
pub fn collect_answers(question_ids: &[i64], form: &[(String, String)]) -> BTreeMap<i64, Vec<usize>> {
    let mut answers = BTreeMap::new();

    for &q_id in question_ids {
        let key = format!("{}{}", ANSWER_FIELD_PREFIX, q_id);
        let values: Vec<&str> = form
            .iter()
            .filter(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
            .collect();

        if values.is_empty() {
            continue;
        }

        match values
            .iter()
            .map(|v| v.trim().parse::<usize>())
            .collect::<Result<Vec<_>, _>>()
        {
            Ok(mut indices) => {
                // Selections form a set.
                indices.sort_unstable();
                indices.dedup();
                answers.insert(q_id, indices);
            }
            Err(e) => {
                tracing::warn!(
                    "Error converting values for question {}: {:?} ({})",
                    q_id,
                    values,
                    e
                );
            }
        }
    }

    answers
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};
    use std::collections::HashSet;

    fn form(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn selection_is_capped_and_distinct() {
        let ids: Vec<i64> = (1..=120).collect();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..20 {
            let selected = select_question_ids(&ids, 50, &mut rng);
            assert_eq!(selected.len(), 50);
            let unique: HashSet<_> = selected.iter().collect();
            assert_eq!(unique.len(), 50);
            assert!(selected.iter().all(|id| ids.contains(id)));
        }
    }

    #[test]
    fn small_bank_is_fully_selected() {
        let ids = vec![3, 9, 4];
        let mut rng = StdRng::seed_from_u64(1);
        let mut selected = select_question_ids(&ids, 50, &mut rng);
        selected.sort();
        assert_eq!(selected, vec![3, 4, 9]);
    }

    #[test]
    fn empty_bank_selects_nothing() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(select_question_ids(&[], 50, &mut rng).is_empty());
    }

    #[test]
    fn collects_single_and_repeated_values() {
        let answers = collect_answers(
            &[1, 2, 3],
            &form(&[("q1", "0"), ("q2", "1"), ("q2", "2"), ("other", "5")]),
        );
        assert_eq!(answers.get(&1), Some(&vec![0]));
        assert_eq!(answers.get(&2), Some(&vec![1, 2]));
        assert!(!answers.contains_key(&3));
    }

    #[test]
    fn repeated_value_counts_once() {
        let answers = collect_answers(
            &[1, 2],
            &form(&[("q1", "0"), ("q1", "0"), ("q2", "2"), ("q2", "1"), ("q2", "2")]),
        );
        assert_eq!(answers.get(&1), Some(&vec![0]));
        assert_eq!(answers.get(&2), Some(&vec![1, 2]));
    }

    #[test]
    fn malformed_value_drops_only_that_question() {
        let answers = collect_answers(&[1, 2], &form(&[("q1", "x"), ("q1", "0"), ("q2", "1")]));
        assert!(!answers.contains_key(&1));
        assert_eq!(answers.get(&2), Some(&vec![1]));
    }

    #[test]
    fn fields_for_foreign_questions_are_ignored() {
        let answers = collect_answers(&[1], &form(&[("q7", "0")]));
        assert!(answers.is_empty());
    }

    #[test]
    fn submit_keeps_answers_within_session() {
        let mut session = Session::start(vec![1, 2]);
        assert_eq!(session.status(), SessionStatus::InProgress);

        let mut answers = BTreeMap::new();
        answers.insert(1, vec![0]);
        answers.insert(5, vec![1]);
        session.submit(answers);

        assert_eq!(session.status(), SessionStatus::Submitted);
        assert_eq!(session.answers.len(), 1);
        assert!(session.answers.contains_key(&1));
    }

    #[test]
    fn answers_serialize_with_string_keys() {
        let mut session = Session::start(vec![4]);
        session.answers.insert(4, vec![2]);
        let value = serde_json::to_value(&session).unwrap();
        assert_eq!(value["answers"]["4"], serde_json::json!([2]));
    }
}
