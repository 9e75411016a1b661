//! Per-tab remembered positions.

use crate::nav::Tab;
use crate::types::QuestionId;

/// A tab's remembered position: an index into that tab's own subsequence
/// and the question last shown there.
///
/// The index is only meaningful in its tab's coordinate space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    pub index: usize,
    pub last_question: Option<QuestionId>,
}

/// One [`Cursor`] per [`Tab`]. Lives as long as the practice view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabCursorStore {
    cursors: [Cursor; 5],
}

impl TabCursorStore {
    /// Seeds the ALL tab with the session's starting question.
    pub fn new(start: Option<QuestionId>) -> Self {
        let mut store = Self::default();
        if let Some(id) = start {
            store.set(Tab::All, id.index as usize, id);
        }
        store
    }

    pub fn get(&self, tab: Tab) -> Cursor {
        self.cursors[tab.ordinal()]
    }

    /// Overwrites `tab`'s cursor. Bounds are the caller's concern.
    pub fn set(&mut self, tab: Tab, index: usize, question: QuestionId) {
        self.cursors[tab.ordinal()] = Cursor {
            index,
            last_question: Some(question),
        };
    }

    pub fn reset(&mut self, tab: Tab) {
        self.cursors[tab.ordinal()] = Cursor::default();
    }
}
