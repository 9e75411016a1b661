//! Exam backend API: the [`ExamApi`] trait, its wire types and the HTTP
//! implementation.

pub mod error;
pub mod http;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::exam::{ExamRecord, FavoriteSet, IncorrectSet, UserAnswers};
use crate::session::Session;
use crate::types::QuestionId;

pub use error::ApiError;
pub use http::HttpExamApi;

/// One saved answer as the backend reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub topic_number: u32,
    /// Zero-based
    pub question_index: u32,
    pub selected_options: Vec<usize>,
}

impl AnswerRecord {
    pub fn question_id(&self) -> QuestionId {
        QuestionId::new(self.topic_number, self.question_index)
    }
}

/// One starred question as the backend reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteRecord {
    pub topic_number: u32,
    pub question_index: u32,
}

impl From<QuestionId> for FavoriteRecord {
    fn from(id: QuestionId) -> Self {
        Self {
            topic_number: id.topic,
            question_index: id.index,
        }
    }
}

impl From<FavoriteRecord> for QuestionId {
    fn from(record: FavoriteRecord) -> Self {
        QuestionId::new(record.topic_number, record.question_index)
    }
}

/// Body of `POST /api/save-answer`.
#[derive(Debug, Serialize)]
pub struct SaveAnswerRequest<'a> {
    pub exam_id: &'a str,
    pub topic_number: u32,
    pub question_index: u32,
    pub selected_options: &'a [usize],
}

/// Body of `POST /api/favorite`.
#[derive(Debug, Serialize)]
pub struct FavoriteRequest<'a> {
    pub exam_id: &'a str,
    pub topic_number: u32,
    pub question_index: u32,
}

/// Body of `POST /api/submit-answers`.
#[derive(Debug, Serialize)]
pub struct SubmitRequest<'a> {
    pub exam_id: &'a str,
    /// Keyed by "T<topic> Q<number>"
    pub user_answers: BTreeMap<String, Vec<usize>>,
}

impl<'a> SubmitRequest<'a> {
    pub fn new(exam_id: &'a str, answers: &UserAnswers) -> Self {
        Self {
            exam_id,
            user_answers: answers
                .iter()
                .map(|(id, selected)| (id.to_string(), selected.clone()))
                .collect(),
        }
    }
}

/// Outcome of grading a submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionResult {
    pub total_questions: u32,
    pub correct_answers: u32,
    /// Percentage, rounded to two decimals
    pub score: f64,
    pub passed: bool,
    pub incorrect_questions: Vec<QuestionId>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AnswersEnvelope {
    pub answers: Vec<AnswerRecord>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FavoritesEnvelope {
    pub favorites: Vec<FavoriteRecord>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct IncorrectEnvelope {
    pub incorrect_questions: Vec<QuestionId>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FavoriteToggled {
    pub is_favorite: bool,
}

pub fn answers_from_records(records: Vec<AnswerRecord>) -> UserAnswers {
    records
        .into_iter()
        .map(|r| (r.question_id(), r.selected_options))
        .collect()
}

pub fn favorites_from_records(records: Vec<FavoriteRecord>) -> FavoriteSet {
    records.into_iter().map(QuestionId::from).collect()
}

/// Operations against the exam backend. Every call is scoped to the
/// session's exam and authenticated with its bearer token.
pub trait ExamApi: Send + Sync + 'static {
    /// Fetch the full exam record
    fn fetch_exam(
        &self,
        session: &Session,
    ) -> impl std::future::Future<Output = Result<ExamRecord>> + Send;

    /// Fetch the user's saved answers
    fn fetch_answers(
        &self,
        session: &Session,
    ) -> impl std::future::Future<Output = Result<UserAnswers>> + Send;

    /// Persist the selection for one question
    fn save_answer(
        &self,
        session: &Session,
        question: QuestionId,
        selected: &[usize],
    ) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Fetch the user's starred questions
    fn fetch_favorites(
        &self,
        session: &Session,
    ) -> impl std::future::Future<Output = Result<FavoriteSet>> + Send;

    /// Flip the star on one question. Returns whether it is now starred.
    fn toggle_favorite(
        &self,
        session: &Session,
        question: QuestionId,
    ) -> impl std::future::Future<Output = Result<bool>> + Send;

    /// Fetch the incorrect set from the latest graded submission
    fn fetch_incorrect(
        &self,
        session: &Session,
    ) -> impl std::future::Future<Output = Result<IncorrectSet>> + Send;

    /// Grade the given answers
    fn submit_answers(
        &self,
        session: &Session,
        answers: &UserAnswers,
    ) -> impl std::future::Future<Output = Result<SubmissionResult>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_request_keys_by_display_id() {
        let answers: UserAnswers = [
            (QuestionId::new(1, 0), vec![0, 2]),
            (QuestionId::new(2, 4), vec![1]),
        ]
        .into_iter()
        .collect();

        let body = serde_json::to_value(SubmitRequest::new("acme-100", &answers)).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "exam_id": "acme-100",
                "user_answers": {"T1 Q1": [0, 2], "T2 Q5": [1]},
            })
        );
    }

    #[test]
    fn test_submission_result_parses_backend_shape() {
        let result: SubmissionResult = serde_json::from_str(
            r#"{"total_questions": 4, "correct_answers": 3, "score": 75.0,
                "passed": true, "incorrect_questions": ["T1 Q2"]}"#,
        )
        .unwrap();
        assert!(result.passed);
        assert_eq!(result.incorrect_questions, vec![QuestionId::new(1, 1)]);
    }

    #[test]
    fn test_records_convert_to_zero_based_ids() {
        let answers = answers_from_records(vec![AnswerRecord {
            topic_number: 3,
            question_index: 0,
            selected_options: vec![1],
        }]);
        assert_eq!(answers.get(QuestionId::new(3, 0)), &[1]);

        let favorites = favorites_from_records(vec![FavoriteRecord {
            topic_number: 1,
            question_index: 4,
        }]);
        assert!(favorites.contains(QuestionId::new(1, 4)));
    }
}
