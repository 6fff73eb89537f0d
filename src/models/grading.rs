// src/models/grading.rs

use serde::Serialize;

use crate::{
    bank::QuestionBank,
    config::NO_ANSWER_MARKER,
    models::session::{Session, SessionStatus},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GradeStatus {
    Correct,
    Incorrect,
    Unanswered,
}

/// Outcome for one question, with option texts resolved for display.
#[derive(Debug, Clone, Serialize)]
pub struct GradedQuestion {
    pub id: i64,
    pub question: String,
    pub options: Vec<String>,
    pub status: GradeStatus,
    pub user_answers: Vec<String>,
    pub correct_answers: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GradeReport {
    /// `in_progress` until the answers have been submitted.
    pub status: SessionStatus,
    pub score: usize,
    pub total: usize,
    pub questions: Vec<GradedQuestion>,
}

/// Exact set comparison; no partial credit for multi-answer questions.
pub fn grade_answer(correct: &[usize], submitted: Option<&[usize]>) -> GradeStatus {
    let Some(submitted) = submitted else {
        return GradeStatus::Unanswered;
    };

    let mut correct = correct.to_vec();
    correct.sort_unstable();
    let mut user = submitted.to_vec();
    user.sort_unstable();

    if user == correct {
        GradeStatus::Correct
    } else {
        GradeStatus::Incorrect
    }
}

/// Grades every question of the session against the bank.
pub fn grade_session(bank: &QuestionBank, session: &Session) -> GradeReport {
    let mut questions = Vec::with_capacity(session.question_ids.len());

    for &q_id in &session.question_ids {
        let Some(record) = bank.get(q_id) else {
            tracing::warn!("Session refers to unknown question {}", q_id);
            continue;
        };

        let submitted = session.answers.get(&q_id).map(Vec::as_slice);
        let status = grade_answer(&record.answer, submitted);

        let mut correct = record.answer.clone();
        correct.sort_unstable();

        let user_answers = match submitted {
            Some(picks) => {
                let mut picks = picks.to_vec();
                picks.sort_unstable();
                record.option_texts(&picks)
            }
            None => vec![NO_ANSWER_MARKER.to_string()],
        };

        questions.push(GradedQuestion {
            id: record.id,
            question: record.question.clone(),
            options: record.options.clone(),
            status,
            user_answers,
            correct_answers: record.option_texts(&correct),
        });
    }

    let score = questions
        .iter()
        .filter(|q| q.status == GradeStatus::Correct)
        .count();

    GradeReport {
        status: session.status(),
        score,
        total: questions.len(),
        questions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::question::QuestionRecord;

    fn bank() -> QuestionBank {
        let options = || vec!["A".to_string(), "B".to_string(), "C".to_string()];
        QuestionBank::from_records(vec![
            QuestionRecord::new(1, "Один".to_string(), options(), vec![0]),
            QuestionRecord::new(2, "Два".to_string(), options(), vec![1, 2]),
        ])
        .unwrap()
    }

    #[test]
    fn unanswered_never_scores() {
        assert_eq!(grade_answer(&[0], None), GradeStatus::Unanswered);
    }

    #[test]
    fn single_answer_must_match() {
        assert_eq!(grade_answer(&[1], Some(&[1][..])), GradeStatus::Correct);
        assert_eq!(grade_answer(&[1], Some(&[0][..])), GradeStatus::Incorrect);
    }

    #[test]
    fn multiple_answer_needs_exact_set() {
        assert_eq!(grade_answer(&[0, 2], Some(&[2, 0][..])), GradeStatus::Correct);
        assert_eq!(grade_answer(&[0, 2], Some(&[0][..])), GradeStatus::Incorrect);
        assert_eq!(grade_answer(&[0, 2], Some(&[0, 1, 2][..])), GradeStatus::Incorrect);
    }

    #[test]
    fn submitted_empty_list_is_incorrect_not_unanswered() {
        assert_eq!(grade_answer(&[0], Some(&[][..])), GradeStatus::Incorrect);
    }

    #[test]
    fn scores_partial_submission() {
        let mut session = Session::start(vec![1, 2]);
        session.answers.insert(1, vec![0]);

        let report = grade_session(&bank(), &session);

        assert_eq!(report.status, SessionStatus::InProgress);
        assert_eq!(report.score, 1);
        assert_eq!(report.total, 2);
        assert_eq!(report.questions[0].status, GradeStatus::Correct);
        assert_eq!(report.questions[0].user_answers, vec!["A"]);
        assert_eq!(report.questions[1].status, GradeStatus::Unanswered);
        assert_eq!(report.questions[1].user_answers, vec![NO_ANSWER_MARKER]);
        assert_eq!(report.questions[1].correct_answers, vec!["B", "C"]);
    }

    #[test]
    fn subset_of_multi_answer_is_incorrect() {
        let mut session = Session::start(vec![2]);
        session.answers.insert(2, vec![2]);

        let report = grade_session(&bank(), &session);
        assert_eq!(report.score, 0);
        assert_eq!(report.questions[0].status, GradeStatus::Incorrect);
        assert_eq!(report.questions[0].user_answers, vec!["C"]);
    }

    #[test]
    fn out_of_range_pick_is_incorrect_and_not_displayed() {
        let mut session = Session::start(vec![1]);
        session.answers.insert(1, vec![9]);

        let report = grade_session(&bank(), &session);
        assert_eq!(report.questions[0].status, GradeStatus::Incorrect);
        assert!(report.questions[0].user_answers.is_empty());
    }

    #[test]
    fn report_carries_submission_status() {
        let mut session = Session::start(vec![1, 2]);
        let mut answers = std::collections::BTreeMap::new();
        answers.insert(2, vec![2, 1]);
        session.submit(answers);

        let report = grade_session(&bank(), &session);
        assert_eq!(report.status, SessionStatus::Submitted);
        assert_eq!(report.score, 1);
        assert_eq!(report.questions[0].status, GradeStatus::Unanswered);
    }
}
