//! In-memory `ExamApi` that grades submissions the way the backend does.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::Mutex;
use reqwest::StatusCode;
use tokio::sync::Notify;

use drill::api::ApiError;
use drill::{
    DrillError, ExamApi, ExamRecord, FavoriteSet, IncorrectSet, QuestionId, Result, Session,
    SubmissionResult, UserAnswers,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteFailure {
    Server,
    Unauthorized,
}

impl WriteFailure {
    fn error(self) -> DrillError {
        match self {
            WriteFailure::Server => {
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "database is locked").into()
            }
            WriteFailure::Unauthorized => ApiError::new(StatusCode::UNAUTHORIZED, "").into(),
        }
    }
}

#[derive(Default)]
pub struct FakeExamApi {
    pub exam: Mutex<ExamRecord>,
    pub answers: Mutex<UserAnswers>,
    pub favorites: Mutex<FavoriteSet>,
    pub incorrect: Mutex<IncorrectSet>,
    /// One entry per backend call, e.g. "save_answer T1 Q2 [1]"
    pub calls: Mutex<Vec<String>>,
    pub fail_writes: Mutex<Option<WriteFailure>>,
    /// When set, `submit_answers` waits for a notification before grading
    pub submit_gate: Mutex<Option<Arc<Notify>>>,
}

impl FakeExamApi {
    pub fn new(exam: ExamRecord) -> Self {
        Self {
            exam: Mutex::new(exam),
            ..Default::default()
        }
    }

    pub fn with_answers(self, answers: UserAnswers) -> Self {
        *self.answers.lock() = answers;
        self
    }

    pub fn with_favorites(self, favorites: FavoriteSet) -> Self {
        *self.favorites.lock() = favorites;
        self
    }

    pub fn with_incorrect(self, incorrect: Vec<QuestionId>) -> Self {
        *self.incorrect.lock() = IncorrectSet::new(incorrect);
        self
    }

    pub fn failing_writes(self, failure: WriteFailure) -> Self {
        *self.fail_writes.lock() = Some(failure);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().push(call);
    }

    fn write_result(&self) -> Result<()> {
        match *self.fail_writes.lock() {
            Some(failure) => Err(failure.error()),
            None => Ok(()),
        }
    }

    fn grade(&self, answers: &UserAnswers) -> SubmissionResult {
        let exam = self.exam.lock();
        let mut total = 0;
        let mut correct = 0;
        let mut incorrect = Vec::new();

        for id in exam.all_question_ids() {
            let Some(question) = exam.question(id) else {
                continue;
            };
            total += 1;
            let expected: HashSet<usize> = question.correct_options().into_iter().collect();
            let given: HashSet<usize> = answers.get(id).iter().copied().collect();
            if expected == given {
                correct += 1;
            } else {
                incorrect.push(id);
            }
        }

        let score = if total == 0 {
            0.0
        } else {
            (correct as f64 / total as f64 * 10000.0).round() / 100.0
        };
        SubmissionResult {
            total_questions: total,
            correct_answers: correct,
            score,
            passed: score >= 75.0,
            incorrect_questions: incorrect,
        }
    }
}

impl ExamApi for FakeExamApi {
    async fn fetch_exam(&self, session: &Session) -> Result<ExamRecord> {
        self.record(format!("fetch_exam {}", session.exam_id()));
        Ok(self.exam.lock().clone())
    }

    async fn fetch_answers(&self, _session: &Session) -> Result<UserAnswers> {
        self.record("fetch_answers".to_string());
        Ok(self.answers.lock().clone())
    }

    async fn save_answer(
        &self,
        _session: &Session,
        question: QuestionId,
        selected: &[usize],
    ) -> Result<()> {
        self.record(format!("save_answer {question} {selected:?}"));
        self.write_result()?;
        self.answers.lock().set(question, selected.to_vec());
        Ok(())
    }

    async fn fetch_favorites(&self, _session: &Session) -> Result<FavoriteSet> {
        self.record("fetch_favorites".to_string());
        Ok(self.favorites.lock().clone())
    }

    async fn toggle_favorite(&self, _session: &Session, question: QuestionId) -> Result<bool> {
        self.record(format!("toggle_favorite {question}"));
        self.write_result()?;
        Ok(self.favorites.lock().toggle(question))
    }

    async fn fetch_incorrect(&self, _session: &Session) -> Result<IncorrectSet> {
        self.record("fetch_incorrect".to_string());
        Ok(self.incorrect.lock().clone())
    }

    async fn submit_answers(
        &self,
        _session: &Session,
        answers: &UserAnswers,
    ) -> Result<SubmissionResult> {
        self.record("submit_answers".to_string());
        let gate = self.submit_gate.lock().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        let result = self.grade(answers);
        *self.incorrect.lock() = IncorrectSet::new(result.incorrect_questions.clone());
        Ok(result)
    }
}
