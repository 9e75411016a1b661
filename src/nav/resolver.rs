//! Navigation resolver: picks the next question to show within a tab.
//!
//! Rules, uniform across tabs:
//! - empty subsequence: no target
//! - single element: that element, in both directions
//! - current is a member: step by one, no wraparound past either end
//! - current is not a member (it just dropped out of the filter): nearest
//!   question number in the travel direction, wrapping to the opposite end
//!   when nothing lies that way
//!
//! The INCORRECT tab additionally jumps topics when the active topic has no
//! incorrect questions but another topic does; see [`resolve_for_tab`].

use crate::exam::IncorrectSet;
use crate::nav::{Subsequences, Tab};
use crate::types::{Direction, QuestionId};

/// Outcome of resolving a move within a tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub target: QuestionId,
    /// Index of `target` in the subsequence it was resolved against.
    pub index: usize,
    /// Set when resolution required switching the active topic.
    pub topic_switch: Option<u32>,
}

/// Resolves the next question within one subsequence.
pub fn resolve_next(
    subsequence: &[QuestionId],
    current: QuestionId,
    direction: Direction,
) -> Option<QuestionId> {
    resolve_index(subsequence, current, direction).map(|i| subsequence[i])
}

/// Like [`resolve_next`] but returns the position within `subsequence`.
pub fn resolve_index(
    subsequence: &[QuestionId],
    current: QuestionId,
    direction: Direction,
) -> Option<usize> {
    match subsequence.len() {
        0 => None,
        1 => Some(0),
        len => match subsequence.iter().position(|id| *id == current) {
            Some(i) => {
                let j = i.checked_add_signed(direction.step())?;
                (j < len).then_some(j)
            }
            None => nearest_by_number(subsequence, current, direction),
        },
    }
}

/// Fallback for a current question that is absent from the subsequence.
fn nearest_by_number(
    subsequence: &[QuestionId],
    current: QuestionId,
    direction: Direction,
) -> Option<usize> {
    let numbered = subsequence.iter().enumerate().map(|(i, id)| (id.index, i));

    match direction {
        Direction::Forward => numbered
            .clone()
            .filter(|(n, _)| *n > current.index)
            .min()
            .or_else(|| numbered.min()),
        Direction::Backward => numbered
            .clone()
            .filter(|(n, _)| *n < current.index)
            .max()
            .or_else(|| numbered.max()),
    }
    .map(|(_, i)| i)
}

/// Resolves a move for `tab`, including the INCORRECT tab's topic jump.
///
/// When the active topic has no incorrect questions but the global set is
/// non-empty, the topic of the first globally-incorrect entry becomes the
/// target topic and its first incorrect question is selected.
pub fn resolve_for_tab(
    tab: Tab,
    subsequences: &Subsequences,
    incorrect: &IncorrectSet,
    current: QuestionId,
    direction: Direction,
) -> Option<Resolution> {
    let subsequence = subsequences.for_tab(tab);

    if tab == Tab::Incorrect && subsequence.is_empty() {
        return cross_topic_incorrect(incorrect, current.topic);
    }

    resolve_index(subsequence, current, direction).map(|index| Resolution {
        target: subsequence[index],
        index,
        topic_switch: None,
    })
}

/// First incorrect question outside `active_topic`, as a topic jump.
pub fn cross_topic_incorrect(incorrect: &IncorrectSet, active_topic: u32) -> Option<Resolution> {
    let first = incorrect.first()?;
    if first.in_topic(active_topic) {
        // The caller's subsequence was empty, so the sets disagree; stay put.
        return None;
    }
    Some(Resolution {
        target: first,
        index: 0,
        topic_switch: Some(first.topic),
    })
}
