//! Exam data and the per-user sets the navigation core filters against.
//!
//! The [`ExamRecord`] is loaded wholesale per session and never patched.
//! [`UserAnswers`], [`FavoriteSet`] and [`IncorrectSet`] are the mutable
//! in-memory snapshots the practice view edits optimistically.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Deserializer, Serialize};

use crate::types::QuestionId;

/// A community vote annotation attached to a question.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Vote {
    #[serde(default)]
    pub answer: String,
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub is_most_voted: bool,
}

/// One question of a topic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Question {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub options: Vec<String>,
    /// Answer code, one letter per correct option (`"B"`, `"AD"`). The
    /// backend may also send it as a list (`["A", "D"]`).
    #[serde(default, deserialize_with = "deserialize_answer_code")]
    pub answer: String,
    #[serde(default, rename = "answerDescription")]
    pub explanation: Option<String>,
    #[serde(default)]
    pub votes: Vec<Vote>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AnswerCode {
    Letters(String),
    List(Vec<String>),
}

fn deserialize_answer_code<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match AnswerCode::deserialize(deserializer)? {
        AnswerCode::Letters(code) => code,
        AnswerCode::List(letters) => letters.concat(),
    })
}

impl Question {
    /// Number of options the question expects to be selected.
    ///
    /// Equal to the answer code's length; a question without an answer code
    /// still expects one selection.
    pub fn required_selections(&self) -> usize {
        self.answer.chars().count().max(1)
    }

    /// Option indices the answer code designates (`"AC"` -> `[0, 2]`).
    pub fn correct_options(&self) -> Vec<usize> {
        self.answer
            .chars()
            .filter(|c| c.is_ascii_alphabetic())
            .map(|c| (c.to_ascii_uppercase() as u8 - b'A') as usize)
            .collect()
    }
}

/// A full exam: topic number to ordered question list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExamRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub provider: String,
    #[serde(default, rename = "examTitle")]
    pub title: String,
    #[serde(default, rename = "examCode")]
    pub code: String,
    #[serde(default)]
    pub topics: BTreeMap<u32, Vec<Question>>,
}

impl ExamRecord {
    pub fn topic_numbers(&self) -> Vec<u32> {
        self.topics.keys().copied().collect()
    }

    pub fn first_topic(&self) -> Option<u32> {
        self.topics.keys().next().copied()
    }

    pub fn has_topic(&self, topic: u32) -> bool {
        self.topics.contains_key(&topic)
    }

    /// Questions of a topic; empty for unknown topics.
    pub fn questions(&self, topic: u32) -> &[Question] {
        self.topics.get(&topic).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn question(&self, id: QuestionId) -> Option<&Question> {
        self.questions(id.topic).get(id.index as usize)
    }

    /// Every question identifier of a topic, in exam order.
    pub fn question_ids(&self, topic: u32) -> Vec<QuestionId> {
        (0..self.questions(topic).len() as u32)
            .map(|index| QuestionId::new(topic, index))
            .collect()
    }

    /// Every question identifier of the exam, topic by topic.
    pub fn all_question_ids(&self) -> Vec<QuestionId> {
        self.topics
            .keys()
            .flat_map(|&topic| self.question_ids(topic))
            .collect()
    }

    pub fn question_count(&self) -> usize {
        self.topics.values().map(Vec::len).sum()
    }

    /// Human-readable name: `"CODE: Title"` when a code exists.
    pub fn display_name(&self) -> String {
        match (self.code.is_empty(), self.title.is_empty()) {
            (false, false) => format!("{}: {}", self.code, self.title),
            (true, false) => self.title.clone(),
            _ => self.id.clone(),
        }
    }
}

/// The user's current option selections, keyed by question.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserAnswers {
    selections: HashMap<QuestionId, Vec<usize>>,
}

impl UserAnswers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: QuestionId) -> &[usize] {
        self.selections.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn set(&mut self, id: QuestionId, selected: Vec<usize>) {
        self.selections.insert(id, selected);
    }

    /// A question counts as answered once its selection reaches the
    /// required-selection count.
    pub fn is_answered(&self, id: QuestionId, question: &Question) -> bool {
        self.get(id).len() >= question.required_selections()
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&QuestionId, &Vec<usize>)> {
        self.selections.iter()
    }
}

impl FromIterator<(QuestionId, Vec<usize>)> for UserAnswers {
    fn from_iter<I: IntoIterator<Item = (QuestionId, Vec<usize>)>>(iter: I) -> Self {
        Self {
            selections: iter.into_iter().collect(),
        }
    }
}

/// Starred questions in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FavoriteSet {
    ids: Vec<QuestionId>,
}

impl FavoriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: QuestionId) -> bool {
        self.ids.contains(&id)
    }

    /// Stars or unstars `id`. Returns whether it is starred afterwards.
    pub fn toggle(&mut self, id: QuestionId) -> bool {
        if let Some(pos) = self.ids.iter().position(|f| *f == id) {
            self.ids.remove(pos);
            false
        } else {
            self.ids.push(id);
            true
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &QuestionId> {
        self.ids.iter()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl FromIterator<QuestionId> for FavoriteSet {
    fn from_iter<I: IntoIterator<Item = QuestionId>>(iter: I) -> Self {
        let mut set = FavoriteSet::new();
        for id in iter {
            if !set.contains(id) {
                set.ids.push(id);
            }
        }
        set
    }
}

/// Questions flagged incorrect by the most recent submission, in the
/// order the backend reported them. Only ever replaced wholesale.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IncorrectSet {
    ids: Vec<QuestionId>,
}

impl IncorrectSet {
    pub fn new(ids: Vec<QuestionId>) -> Self {
        Self { ids }
    }

    pub fn first(&self) -> Option<QuestionId> {
        self.ids.first().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &QuestionId> {
        self.ids.iter()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
