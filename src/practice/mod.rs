//! Async adapter between the navigation controller and the exam backend.
//!
//! [`PracticeSession`] loads the exam and the user's data, forwards view
//! actions to the [`NavigationController`], and sends the backend writes
//! those actions queue without waiting for them. A failed write is logged
//! and surfaced as an error toast; local state is never rolled back.

pub mod fetch;
pub mod input;
pub mod render;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::api::{ExamApi, SubmissionResult};
use crate::error::{DrillError, Result};
use crate::exam::{ExamRecord, FavoriteSet, IncorrectSet, UserAnswers};
use crate::nav::{Navigation, NavigationController, OptionToggle, PendingWrite, Tab};
use crate::notify::{Notifier, Toast};
use crate::session::Session;
use crate::types::{Direction, QuestionId};

pub use fetch::FetchSlot;
pub use input::{Command, parse_command};

struct UserData {
    answers: UserAnswers,
    favorites: FavoriteSet,
    incorrect: IncorrectSet,
}

async fn load_user_data<A: ExamApi>(api: Arc<A>, session: Session) -> Result<UserData> {
    let (answers, favorites, incorrect) = tokio::try_join!(
        api.fetch_answers(&session),
        api.fetch_favorites(&session),
        api.fetch_incorrect(&session),
    )?;
    Ok(UserData {
        answers,
        favorites,
        incorrect,
    })
}

async fn load_all<A: ExamApi>(api: Arc<A>, session: Session) -> Result<(ExamRecord, UserData)> {
    tokio::try_join!(
        api.fetch_exam(&session),
        load_user_data(Arc::clone(&api), session.clone()),
    )
}

pub struct PracticeSession<A: ExamApi> {
    api: Arc<A>,
    controller: NavigationController,
    notifier: Arc<dyn Notifier>,
    loads: FetchSlot,
    writes: Vec<JoinHandle<()>>,
    /// Set once any write is rejected with 401
    expired: Arc<AtomicBool>,
}

impl<A: ExamApi> PracticeSession<A> {
    /// Loads the exam, answers, favorites and incorrect set concurrently and
    /// starts on the first question of the first topic.
    pub async fn open(api: Arc<A>, session: Session, notifier: Arc<dyn Notifier>) -> Result<Self> {
        let mut loads = FetchSlot::new();
        let (exam, data) = loads
            .begin(load_all(Arc::clone(&api), session.clone()))
            .await?;

        info!(
            exam = %session.exam_id(),
            questions = exam.question_count(),
            answered = data.answers.iter().count(),
            favorites = data.favorites.len(),
            incorrect = data.incorrect.len(),
            "loaded exam"
        );

        let mut controller = NavigationController::new(exam, session, Arc::clone(&notifier));
        controller.load_user_data(data.answers, data.favorites, data.incorrect);

        Ok(Self {
            api,
            controller,
            notifier,
            loads,
            writes: Vec::new(),
            expired: Arc::new(AtomicBool::new(false)),
        })
    }

    pub fn controller(&self) -> &NavigationController {
        &self.controller
    }

    /// True once the backend rejected a background write as unauthorized.
    pub fn is_expired(&self) -> bool {
        self.expired.load(Ordering::Acquire)
    }

    /// Aborts a load in progress. The aborted call returns
    /// [`DrillError::Cancelled`] and leaves state untouched.
    pub fn cancel_load(&mut self) {
        self.loads.abort();
    }

    /// Re-fetches answers, favorites and the incorrect set.
    pub async fn reload(&mut self) -> Result<()> {
        let load = self.loads.begin(load_user_data(
            Arc::clone(&self.api),
            self.controller.session().clone(),
        ));
        let data = load.await?;
        self.controller
            .load_user_data(data.answers, data.favorites, data.incorrect);
        Ok(())
    }

    pub fn navigate(&mut self, direction: Direction) -> Navigation {
        self.controller.navigate(direction)
    }

    pub fn change_tab(&mut self, tab: Tab) -> Navigation {
        self.controller.change_tab(tab)
    }

    pub fn change_topic(&mut self, topic: u32) -> Result<Navigation> {
        self.controller.change_topic(topic)
    }

    pub fn select_question(&mut self, id: QuestionId) -> Navigation {
        self.controller.select_question(id)
    }

    pub fn toggle_option(&mut self, option: usize) -> OptionToggle {
        let outcome = self.controller.toggle_option(option);
        self.dispatch_writes();
        outcome
    }

    pub fn toggle_favorite(&mut self) -> Option<bool> {
        let starred = self.controller.toggle_favorite();
        self.dispatch_writes();
        starred
    }

    pub fn toggle_answer_reveal(&mut self) -> bool {
        self.controller.toggle_answer_reveal()
    }

    /// Questions across the exam still lacking a complete selection.
    pub fn unanswered_count(&self) -> usize {
        self.controller.unanswered_count()
    }

    /// Grades every answer and replaces the incorrect set with the result.
    ///
    /// Navigation requests made while the submission is in flight are
    /// dropped.
    pub async fn submit(&mut self) -> Result<SubmissionResult> {
        let lock = self.controller.lock().clone();
        let Some(_permit) = lock.try_acquire() else {
            return Err(DrillError::Other(
                "another transition is in progress".to_string(),
            ));
        };

        let result = self
            .api
            .submit_answers(self.controller.session(), self.controller.answers())
            .await?;

        info!(
            score = result.score,
            passed = result.passed,
            incorrect = result.incorrect_questions.len(),
            "submitted answers"
        );
        self.controller
            .apply_submission(result.incorrect_questions.clone());
        Ok(result)
    }

    /// Waits for every write sent so far to finish.
    pub async fn flush(&mut self) {
        for handle in self.writes.drain(..) {
            if let Err(e) = handle.await {
                warn!("write task failed: {e}");
            }
        }
    }

    fn dispatch_writes(&mut self) {
        self.writes.retain(|handle| !handle.is_finished());

        for write in self.controller.take_pending_writes() {
            let api = Arc::clone(&self.api);
            let notifier = Arc::clone(&self.notifier);
            let session = self.controller.session().clone();
            let expired = Arc::clone(&self.expired);

            self.writes.push(tokio::spawn(async move {
                let (question, action, result) = match write {
                    PendingWrite::SaveAnswer {
                        exam_id,
                        question,
                        selected,
                    } => {
                        let session = session.for_exam(exam_id);
                        let result = api.save_answer(&session, question, &selected).await;
                        (question, "save answer", result)
                    }
                    PendingWrite::ToggleFavorite { exam_id, question } => {
                        let session = session.for_exam(exam_id);
                        let result = api.toggle_favorite(&session, question).await.map(|_| ());
                        (question, "update favorite", result)
                    }
                };

                if let Err(e) = result {
                    if e.is_session_expired() {
                        expired.store(true, Ordering::Release);
                    }
                    report_write_failure(notifier.as_ref(), question, action, &e);
                }
            }));
        }
    }
}

fn report_write_failure(notifier: &dyn Notifier, question: QuestionId, action: &str, error: &DrillError) {
    warn!(%question, action, "backend write failed: {error}");
    let toast = if error.is_session_expired() {
        Toast::error(error.to_string())
    } else {
        Toast::error(format!("Could not {action} for {question}: {error}"))
    };
    notifier.notify(toast);
}
