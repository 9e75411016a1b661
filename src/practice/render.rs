//! Plain-text rendering of the practice view.
//!
//! Every function takes a `color` flag so callers decide whether ANSI
//! styling is wanted; tests render without it.

use std::fmt;

use owo_colors::{OwoColorize, Style};

use crate::api::SubmissionResult;
use crate::exam::Question;
use crate::nav::{NavigationController, Tab};
use crate::notify::{Toast, ToastLevel};

fn styled(text: impl fmt::Display, style: Style, color: bool) -> String {
    if color {
        text.style(style).to_string()
    } else {
        text.to_string()
    }
}

fn option_letter(index: usize) -> char {
    u8::try_from(index)
        .ok()
        .and_then(|i| b'A'.checked_add(i))
        .map(char::from)
        .unwrap_or('?')
}

/// Exam name, active topic and the "X of Y" label.
pub fn render_header(ctl: &NavigationController, color: bool) -> String {
    format!(
        "{}  |  Topic {}  |  {}",
        styled(ctl.exam().display_name(), Style::new().bold(), color),
        ctl.topic(),
        styled(ctl.label(), Style::new().cyan(), color),
    )
}

/// Every tab with its size for the active topic; the active tab bracketed.
pub fn render_tab_bar(ctl: &NavigationController, color: bool) -> String {
    Tab::ALL
        .iter()
        .map(|&tab| {
            let text = format!("{} ({})", tab.label(), ctl.subsequences().for_tab(tab).len());
            if tab == ctl.tab() {
                styled(format!("[{text}]"), Style::new().bold().cyan(), color)
            } else {
                styled(text, Style::new().dimmed(), color)
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}

pub fn render_question(ctl: &NavigationController, color: bool) -> String {
    let (Some(id), Some(question)) = (ctl.displayed(), ctl.current_question()) else {
        return styled(ctl.tab().empty_message(), Style::new().dimmed(), color);
    };

    let mut lines = Vec::new();
    let star = if ctl.is_favorite() { " *" } else { "" };
    lines.push(styled(format!("{id}{star}"), Style::new().bold(), color));
    lines.push(question.question.clone());
    lines.push(String::new());

    let selected = ctl.selected_options();
    for (index, option) in question.options.iter().enumerate() {
        let line = format!(
            "  [{}] {}. {}",
            if selected.contains(&index) { "x" } else { " " },
            option_letter(index),
            option
        );
        if selected.contains(&index) {
            lines.push(styled(line, Style::new().green(), color));
        } else {
            lines.push(line);
        }
    }

    let required = question.required_selections();
    if required > 1 {
        lines.push(String::new());
        lines.push(format!("Select {required} options."));
    }

    if ctl.answers_visible() {
        lines.extend(render_answer(question, color));
    }

    lines.join("\n")
}

fn render_answer(question: &Question, color: bool) -> Vec<String> {
    let mut lines = vec![String::new()];
    if !question.answer.is_empty() {
        lines.push(format!(
            "Answer: {}",
            styled(&question.answer, Style::new().bold().green(), color)
        ));
    }
    if let Some(explanation) = question.explanation.as_deref().filter(|e| !e.is_empty()) {
        lines.push(format!("Explanation: {explanation}"));
    }
    if !question.votes.is_empty() {
        let votes = question
            .votes
            .iter()
            .map(|v| {
                if v.is_most_voted {
                    format!("{} ({}, most voted)", v.answer, v.count)
                } else {
                    format!("{} ({})", v.answer, v.count)
                }
            })
            .collect::<Vec<_>>()
            .join(", ");
        lines.push(format!("Votes: {votes}"));
    }
    lines
}

/// The whole screen: header, tab bar and the displayed question.
pub fn render_view(ctl: &NavigationController, color: bool) -> String {
    format!(
        "{}\n{}\n\n{}",
        render_header(ctl, color),
        render_tab_bar(ctl, color),
        render_question(ctl, color)
    )
}

/// Score line for a submission. The verdict is the backend's own.
pub fn render_submission(result: &SubmissionResult, color: bool) -> String {
    let verdict = if result.passed {
        styled("PASSED", Style::new().bold().green(), color)
    } else {
        styled("FAILED", Style::new().bold().red(), color)
    };
    let mut text = format!(
        "Score: {:.2}% ({} of {} correct)  {}",
        result.score, result.correct_answers, result.total_questions, verdict
    );
    if !result.incorrect_questions.is_empty() {
        let ids = result
            .incorrect_questions
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        text.push_str(&format!("\nIncorrect: {ids}"));
    }
    text
}

pub fn render_toast(toast: &Toast, color: bool) -> String {
    match toast.level {
        ToastLevel::Info => styled(&toast.message, Style::new().blue(), color),
        ToastLevel::Warning => format!(
            "{} {}",
            styled("warning:", Style::new().yellow().bold(), color),
            toast.message
        ),
        ToastLevel::Error => format!(
            "{} {}",
            styled("error:", Style::new().red().bold(), color),
            toast.message
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exam::{ExamRecord, Vote};
    use crate::notify::TracingNotifier;
    use crate::session::Session;
    use crate::types::QuestionId;
    use std::collections::BTreeMap;
    use std::sync::Arc;

    fn controller() -> NavigationController {
        let q1 = Question {
            question: "Which one?".to_string(),
            options: vec!["Alpha".into(), "Beta".into(), "Gamma".into()],
            answer: "B".to_string(),
            explanation: Some("Because beta.".to_string()),
            votes: vec![Vote {
                answer: "B".to_string(),
                count: 3,
                is_most_voted: true,
            }],
        };
        let q2 = Question {
            question: "Pick two.".to_string(),
            options: vec!["One".into(), "Two".into(), "Three".into()],
            answer: "AC".to_string(),
            ..Default::default()
        };
        let exam = ExamRecord {
            id: "acme-ACE".to_string(),
            provider: "acme".to_string(),
            title: "Cloud Engineer".to_string(),
            code: "ACE".to_string(),
            topics: BTreeMap::from([(1, vec![q1, q2])]),
        };
        NavigationController::new(exam, Session::new("acme-ACE", None), Arc::new(TracingNotifier))
    }

    #[test]
    fn test_render_view_answered_and_starred() {
        let mut ctl = controller();
        ctl.toggle_option(1);
        ctl.toggle_favorite();

        insta::assert_snapshot!(render_view(&ctl, false), @r"
        ACE: Cloud Engineer  |  Topic 1  |  1 of 2
        [ALL QUESTIONS (2)]  FAVORITES (1)  ANSWERED (1)  UNANSWERED (1)  INCORRECT (0)

        T1 Q1 *
        Which one?

          [ ] A. Alpha
          [x] B. Beta
          [ ] C. Gamma

        Answer: B
        Explanation: Because beta.
        Votes: B (3, most voted)
        ");
    }

    #[test]
    fn test_render_multi_select_hidden_answer() {
        let mut ctl = controller();
        ctl.select_question(QuestionId::new(1, 1));
        ctl.toggle_answer_reveal();

        insta::assert_snapshot!(render_question(&ctl, false), @r"
        T1 Q2
        Pick two.

          [ ] A. One
          [ ] B. Two
          [ ] C. Three

        Select 2 options.
        ");
    }

    #[test]
    fn test_render_empty_tab_placeholder() {
        let mut ctl = controller();
        ctl.change_tab(Tab::Favorites);
        assert_eq!(render_question(&ctl, false), "There are no favorited questions.");
        assert!(render_header(&ctl, false).ends_with("0 of 0"));
    }

    #[test]
    fn test_render_submission() {
        let result = SubmissionResult {
            total_questions: 4,
            correct_answers: 3,
            score: 75.0,
            passed: true,
            incorrect_questions: vec![QuestionId::new(1, 1), QuestionId::new(2, 0)],
        };
        insta::assert_snapshot!(render_submission(&result, false), @r"
        Score: 75.00% (3 of 4 correct)  PASSED
        Incorrect: T1 Q2, T2 Q1
        ");
    }

    #[test]
    fn test_render_submission_without_local_threshold() {
        // A backend pass at 80% must not sit next to a stricter local mark.
        let result = SubmissionResult {
            total_questions: 5,
            correct_answers: 4,
            score: 80.0,
            passed: true,
            incorrect_questions: vec![QuestionId::new(1, 4)],
        };
        let text = render_submission(&result, false);
        assert!(!text.contains("pass mark"));
        insta::assert_snapshot!(text, @r"
        Score: 80.00% (4 of 5 correct)  PASSED
        Incorrect: T1 Q5
        ");
    }

    #[test]
    fn test_render_toast_prefixes() {
        assert_eq!(render_toast(&Toast::error("boom"), false), "error: boom");
        assert_eq!(render_toast(&Toast::warning("careful"), false), "warning: careful");
        assert_eq!(render_toast(&Toast::info("fyi"), false), "fyi");
    }

    #[test]
    fn test_option_letters() {
        assert_eq!(option_letter(0), 'A');
        assert_eq!(option_letter(25), 'Z');
    }
}
