use std::fmt;

use crate::nav::Cursor;
use crate::types::QuestionId;

/// The "current X of Y" label for the active tab.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisplayLabel {
    pub current: usize,
    pub total: usize,
}

impl fmt::Display for DisplayLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {}", self.current, self.total)
    }
}

/// Derives the label from a tab's cursor and its current subsequence.
///
/// Prefers the 1-based position of the cursor's last question. When that
/// question has left the subsequence, falls back to the cursor index,
/// clamped into range.
pub fn compute_label(subsequence: &[QuestionId], cursor: &Cursor) -> DisplayLabel {
    let total = subsequence.len();
    if total == 0 {
        return DisplayLabel::default();
    }

    let current = cursor
        .last_question
        .and_then(|last| subsequence.iter().position(|id| *id == last))
        .map(|i| i + 1)
        .unwrap_or_else(|| (cursor.index + 1).clamp(1, total));

    DisplayLabel { current, total }
}
