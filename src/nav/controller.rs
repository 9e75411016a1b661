//! The exam navigation controller.
//!
//! Owns the in-memory snapshot of one practice session (exam, answers,
//! favorites, incorrect set), the active topic and tab, and each tab's
//! cursor. Every mutation recomputes the subsequences before anything reads
//! them. Persistence is not done here: mutations queue [`PendingWrite`]s
//! that the caller drains and sends without waiting on the result.

use std::sync::Arc;

use tracing::debug;

use crate::error::{DrillError, Result};
use crate::exam::{ExamRecord, FavoriteSet, IncorrectSet, Question, UserAnswers};
use crate::nav::counter::{DisplayLabel, compute_label};
use crate::nav::cursor::{Cursor, TabCursorStore};
use crate::nav::filter::{Subsequences, compute_subsequences};
use crate::nav::lock::NavigationLock;
use crate::nav::resolver::{cross_topic_incorrect, resolve_for_tab, resolve_index};
use crate::nav::tab::Tab;
use crate::notify::{Notifier, Toast};
use crate::session::Session;
use crate::types::{Direction, QuestionId};

/// Result of a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// The view now shows this question.
    Moved(QuestionId),
    /// Nothing to move to; the control for this direction should be disabled,
    /// or the tab shows its empty-state placeholder.
    NoTarget,
    /// Another transition holds the navigation lock; the request was dropped.
    Busy,
}

impl Navigation {
    pub fn target(self) -> Option<QuestionId> {
        match self {
            Navigation::Moved(id) => Some(id),
            Navigation::NoTarget | Navigation::Busy => None,
        }
    }
}

/// Outcome of toggling an answer option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionToggle {
    Selected,
    Deselected,
    /// The question already has its required number of selections.
    LimitReached,
    /// No such option on the current question.
    OutOfRange,
    /// The current question does not exist (empty topic).
    NoQuestion,
}

/// A backend write queued by an optimistic local mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingWrite {
    SaveAnswer {
        exam_id: String,
        question: QuestionId,
        selected: Vec<usize>,
    },
    ToggleFavorite {
        exam_id: String,
        question: QuestionId,
    },
}

pub struct NavigationController {
    exam: ExamRecord,
    session: Session,
    notifier: Arc<dyn Notifier>,

    topic: u32,
    current: QuestionId,
    tab: Tab,

    answers: UserAnswers,
    favorites: FavoriteSet,
    incorrect: IncorrectSet,

    cursors: TabCursorStore,
    subsequences: Subsequences,
    lock: NavigationLock,
    answers_visible: bool,
    pending: Vec<PendingWrite>,
}

impl NavigationController {
    /// Starts on the first question of the exam's first topic, ALL tab.
    pub fn new(exam: ExamRecord, session: Session, notifier: Arc<dyn Notifier>) -> Self {
        let topic = exam.first_topic().unwrap_or(1);
        let current = QuestionId::new(topic, 0);
        let start = exam.question(current).map(|_| current);

        let mut controller = Self {
            exam,
            session,
            notifier,
            topic,
            current,
            tab: Tab::All,
            answers: UserAnswers::new(),
            favorites: FavoriteSet::new(),
            incorrect: IncorrectSet::default(),
            cursors: TabCursorStore::new(start),
            subsequences: Subsequences::default(),
            lock: NavigationLock::new(),
            answers_visible: true,
            pending: Vec::new(),
        };
        controller.recompute();
        controller
    }

    /// Replaces the user's answers, favorites and incorrect set wholesale.
    pub fn load_user_data(
        &mut self,
        answers: UserAnswers,
        favorites: FavoriteSet,
        incorrect: IncorrectSet,
    ) {
        self.answers = answers;
        self.favorites = favorites;
        self.incorrect = incorrect;
        self.recompute();
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn exam(&self) -> &ExamRecord {
        &self.exam
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn topic(&self) -> u32 {
        self.topic
    }

    pub fn current(&self) -> QuestionId {
        self.current
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn subsequences(&self) -> &Subsequences {
        &self.subsequences
    }

    /// The active tab's subsequence.
    pub fn subsequence(&self) -> &[QuestionId] {
        self.subsequences.for_tab(self.tab)
    }

    pub fn cursor(&self, tab: Tab) -> Cursor {
        self.cursors.get(tab)
    }

    pub fn answers(&self) -> &UserAnswers {
        &self.answers
    }

    pub fn favorites(&self) -> &FavoriteSet {
        &self.favorites
    }

    pub fn incorrect(&self) -> &IncorrectSet {
        &self.incorrect
    }

    /// Shared handle on the navigation lock, for callers that need to hold
    /// it across an async transition.
    pub fn lock(&self) -> &NavigationLock {
        &self.lock
    }

    pub fn answers_visible(&self) -> bool {
        self.answers_visible
    }

    /// The question the view should render, or `None` for the active tab's
    /// empty-state placeholder.
    pub fn displayed(&self) -> Option<QuestionId> {
        if self.subsequence().is_empty() {
            None
        } else {
            Some(self.current)
        }
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.displayed().and_then(|id| self.exam.question(id))
    }

    pub fn selected_options(&self) -> &[usize] {
        self.answers.get(self.current)
    }

    pub fn is_favorite(&self) -> bool {
        self.favorites.contains(self.current)
    }

    /// "Current X of Y" for the active tab, always derived from the latest
    /// subsequences.
    pub fn label(&self) -> DisplayLabel {
        compute_label(self.subsequence(), &self.cursors.get(self.tab))
    }

    /// Questions across the whole exam without a complete selection.
    pub fn unanswered_count(&self) -> usize {
        self.exam
            .all_question_ids()
            .into_iter()
            .filter(|&id| {
                self.exam
                    .question(id)
                    .is_some_and(|q| !self.answers.is_answered(id, q))
            })
            .count()
    }

    /// Hands over the writes queued since the last call.
    pub fn take_pending_writes(&mut self) -> Vec<PendingWrite> {
        std::mem::take(&mut self.pending)
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    /// Moves one step within the active tab.
    pub fn navigate(&mut self, direction: Direction) -> Navigation {
        let Some(_permit) = self.lock.try_acquire() else {
            debug!("navigation dropped: transition in progress");
            return Navigation::Busy;
        };

        let resolution = resolve_for_tab(
            self.tab,
            &self.subsequences,
            &self.incorrect,
            self.current,
            direction,
        );

        let Some(resolution) = resolution else {
            debug!(tab = %self.tab, current = %self.current, ?direction, "no navigation target");
            return Navigation::NoTarget;
        };

        if let Some(topic) = resolution.topic_switch {
            self.switch_topic(topic);
            self.notifier.notify(Toast::info(format!(
                "Switched to topic {topic} to review incorrect questions"
            )));
        }

        debug!(tab = %self.tab, from = %self.current, to = %resolution.target, "navigated");
        self.show(resolution.index, resolution.target)
    }

    /// Switches tabs, restoring the tab's last question when it is still
    /// part of the tab, else its first question, else the empty state.
    pub fn change_tab(&mut self, tab: Tab) -> Navigation {
        let Some(_permit) = self.lock.try_acquire() else {
            return Navigation::Busy;
        };

        self.tab = tab;
        self.enter_tab(true)
    }

    /// Jumps straight to `id`, switching topic when needed.
    pub fn select_question(&mut self, id: QuestionId) -> Navigation {
        let Some(_permit) = self.lock.try_acquire() else {
            return Navigation::Busy;
        };

        if self.exam.question(id).is_none() {
            return Navigation::NoTarget;
        }
        // An empty target tab shows no question, so there is nothing to select.
        let target_empty = if id.topic == self.topic {
            self.subsequence().is_empty()
        } else {
            compute_subsequences(
                &self.exam,
                id.topic,
                &self.favorites,
                &self.answers,
                &self.incorrect,
            )
            .for_tab(self.tab)
            .is_empty()
        };
        if target_empty {
            return Navigation::NoTarget;
        }
        if id.topic != self.topic {
            self.switch_topic(id.topic);
        }

        if let Some(index) = self.subsequence().iter().position(|q| *q == id) {
            self.cursors.set(self.tab, index, id);
        }
        self.current = id;
        Navigation::Moved(id)
    }

    /// Makes `topic` active and re-enters the active tab within it.
    pub fn change_topic(&mut self, topic: u32) -> Result<Navigation> {
        if !self.exam.has_topic(topic) {
            return Err(DrillError::InvalidTopic(topic));
        }
        let Some(_permit) = self.lock.try_acquire() else {
            return Ok(Navigation::Busy);
        };

        self.switch_topic(topic);
        self.current = QuestionId::new(topic, 0);
        Ok(self.enter_tab(false))
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Selects or deselects `option` on the current question, capped at
    /// the question's required-selection count.
    pub fn toggle_option(&mut self, option: usize) -> OptionToggle {
        let Some(id) = self.displayed() else {
            return OptionToggle::NoQuestion;
        };
        let Some(question) = self.exam.question(id) else {
            return OptionToggle::NoQuestion;
        };
        if option >= question.options.len() {
            return OptionToggle::OutOfRange;
        }
        let required = question.required_selections();

        let mut selected = self.answers.get(id).to_vec();
        let outcome = if let Some(pos) = selected.iter().position(|o| *o == option) {
            selected.remove(pos);
            OptionToggle::Deselected
        } else if selected.len() >= required {
            self.notifier.notify(Toast::warning(format!(
                "This question takes {required} selection{}; deselect one first",
                if required == 1 { "" } else { "s" }
            )));
            return OptionToggle::LimitReached;
        } else {
            selected.push(option);
            OptionToggle::Selected
        };

        self.answers.set(id, selected.clone());
        self.pending.push(PendingWrite::SaveAnswer {
            exam_id: self.session.exam_id().to_string(),
            question: id,
            selected,
        });
        self.recompute();
        outcome
    }

    /// Stars or unstars the current question. Returns the new state, or
    /// `None` when there is no question to star.
    ///
    /// Unstarring the displayed question while FAVORITES is active moves
    /// to the nearest remaining favorite ahead of it.
    pub fn toggle_favorite(&mut self) -> Option<bool> {
        let id = self.displayed()?;
        self.exam.question(id)?;

        let starred = self.favorites.toggle(id);
        self.pending.push(PendingWrite::ToggleFavorite {
            exam_id: self.session.exam_id().to_string(),
            question: id,
        });
        self.recompute();

        if self.tab == Tab::Favorites && !starred {
            self.reconcile_active_tab();
        }
        Some(starred)
    }

    /// Replaces the incorrect set with a fresh submission's result.
    pub fn apply_submission(&mut self, incorrect: Vec<QuestionId>) {
        self.incorrect = IncorrectSet::new(incorrect);
        self.cursors.reset(Tab::Incorrect);
        self.recompute();
    }

    pub fn toggle_answer_reveal(&mut self) -> bool {
        self.answers_visible = !self.answers_visible;
        self.answers_visible
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn recompute(&mut self) {
        self.subsequences = compute_subsequences(
            &self.exam,
            self.topic,
            &self.favorites,
            &self.answers,
            &self.incorrect,
        );
    }

    fn switch_topic(&mut self, topic: u32) {
        self.topic = topic;
        self.recompute();
    }

    fn show(&mut self, index: usize, target: QuestionId) -> Navigation {
        self.current = target;
        self.cursors.set(self.tab, index, target);
        Navigation::Moved(target)
    }

    /// Picks the question to show on entering the active tab. Callers hold
    /// the navigation permit.
    fn enter_tab(&mut self, allow_topic_jump: bool) -> Navigation {
        let subsequence = self.subsequence();

        if subsequence.is_empty() {
            if allow_topic_jump && self.tab == Tab::Incorrect {
                if let Some(jump) = cross_topic_incorrect(&self.incorrect, self.topic) {
                    if let Some(topic) = jump.topic_switch {
                        self.switch_topic(topic);
                    }
                    return self.show(jump.index, jump.target);
                }
                if self.incorrect.is_empty() {
                    self.notifier
                        .notify(Toast::info("There are no incorrect questions. Great job!"));
                }
            }
            debug!(tab = %self.tab, topic = self.topic, "tab is empty");
            return Navigation::NoTarget;
        }

        let remembered = self.cursors.get(self.tab).last_question.and_then(|last| {
            subsequence
                .iter()
                .position(|id| *id == last)
                .map(|index| (index, last))
        });
        let (index, target) = remembered.unwrap_or((0, subsequence[0]));
        self.show(index, target)
    }

    /// Re-resolves forward when the displayed question left the active tab.
    fn reconcile_active_tab(&mut self) {
        let Some(_permit) = self.lock.try_acquire() else {
            return;
        };
        let subsequence = self.subsequence();
        if subsequence.contains(&self.current) {
            return;
        }
        if let Some(index) = resolve_index(subsequence, self.current, Direction::Forward) {
            let target = subsequence[index];
            self.show(index, target);
        }
    }
}
