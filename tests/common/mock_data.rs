//! Exam records and controllers for tests.

use std::collections::BTreeMap;
use std::sync::Arc;

use drill::{ExamRecord, NavigationController, Question, QuestionId, Session, ToastQueue};

pub const EXAM_ID: &str = "acme-ACE: Cloud Engineer";

/// A single-answer question with four options; `answer` is the letter code.
pub fn question(text: &str, answer: &str) -> Question {
    Question {
        question: text.to_string(),
        options: vec![
            "Option A".to_string(),
            "Option B".to_string(),
            "Option C".to_string(),
            "Option D".to_string(),
        ],
        answer: answer.to_string(),
        ..Default::default()
    }
}

/// An exam whose topics hold `sizes[i]` questions each, numbered from 1.
/// Every question's correct answer is A.
pub fn exam_with_topics(sizes: &[(u32, usize)]) -> ExamRecord {
    let topics = sizes
        .iter()
        .map(|&(topic, size)| {
            let questions = (1..=size)
                .map(|n| question(&format!("Topic {topic} question {n}"), "A"))
                .collect();
            (topic, questions)
        })
        .collect::<BTreeMap<_, _>>();

    ExamRecord {
        id: EXAM_ID.to_string(),
        provider: "acme".to_string(),
        title: "Cloud Engineer".to_string(),
        code: "ACE".to_string(),
        topics,
    }
}

/// Topic 1 with five questions.
pub fn five_question_exam() -> ExamRecord {
    exam_with_topics(&[(1, 5)])
}

pub fn controller(exam: ExamRecord) -> (NavigationController, Arc<ToastQueue>) {
    let toasts = Arc::new(ToastQueue::new());
    let ctl = NavigationController::new(exam, Session::new(EXAM_ID, None), toasts.clone());
    (ctl, toasts)
}

/// `q(1, 3)` is "T1 Q3".
pub fn q(topic: u32, number: u32) -> QuestionId {
    QuestionId::new(topic, number - 1)
}
