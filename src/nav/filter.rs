//! Filter engine: derives each tab's subsequence for the active topic.
//!
//! Subsequences are always recomputed from scratch. Topics hold tens of
//! questions, so there is no incremental patching to keep consistent.

use crate::exam::{ExamRecord, FavoriteSet, IncorrectSet, UserAnswers};
use crate::nav::Tab;
use crate::types::QuestionId;

/// The five ordered question lists for one topic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Subsequences {
    pub all: Vec<QuestionId>,
    pub favorites: Vec<QuestionId>,
    pub answered: Vec<QuestionId>,
    pub unanswered: Vec<QuestionId>,
    pub incorrect: Vec<QuestionId>,
}

impl Subsequences {
    pub fn for_tab(&self, tab: Tab) -> &[QuestionId] {
        match tab {
            Tab::All => &self.all,
            Tab::Favorites => &self.favorites,
            Tab::Answered => &self.answered,
            Tab::Unanswered => &self.unanswered,
            Tab::Incorrect => &self.incorrect,
        }
    }
}

/// Computes every tab's subsequence for `topic`.
///
/// `favorites` and `incorrect` keep their own iteration order; `all`,
/// `answered` and `unanswered` follow exam order. `answered` and
/// `unanswered` partition `all`.
pub fn compute_subsequences(
    exam: &ExamRecord,
    topic: u32,
    favorites: &FavoriteSet,
    answers: &UserAnswers,
    incorrect: &IncorrectSet,
) -> Subsequences {
    let all = exam.question_ids(topic);

    let (answered, unanswered): (Vec<QuestionId>, Vec<QuestionId>) =
        all.iter().copied().partition(|&id| {
            exam.question(id)
                .is_some_and(|question| answers.is_answered(id, question))
        });

    let favorites = favorites
        .iter()
        .copied()
        .filter(|id| id.in_topic(topic))
        .collect();

    let incorrect = incorrect
        .iter()
        .copied()
        .filter(|id| id.in_topic(topic))
        .collect();

    Subsequences {
        all,
        favorites,
        answered,
        unanswered,
        incorrect,
    }
}
