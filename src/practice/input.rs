//! Parsing of practice prompt commands.

use crate::error::{DrillError, Result};
use crate::nav::Tab;
use crate::types::QuestionId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Next,
    Previous,
    Tab(Tab),
    Topic(u32),
    /// Question number within the active topic
    GoNumber(u32),
    Go(QuestionId),
    /// Zero-based option indices, toggled in order
    Toggle(Vec<usize>),
    Star,
    Reveal,
    Submit,
    Reload,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  n, next            next question in the current tab
  p, prev            previous question in the current tab
  t, tab <name>      switch tab: all, favorites, answered, unanswered, incorrect
  topic <n>          switch topic
  g, go <n|T1 Q3>    jump to a question
  a..m, 1..99        toggle an option (several letters toggle several)
  s, star            star or unstar the question
  r, reveal          show or hide the answer
  submit             grade all answers
  reload             reload answers, favorites and results
  h, help            this help
  q, quit            leave";

/// Parses one prompt line. Blank lines yield `None`.
pub fn parse_command(line: &str) -> Result<Option<Command>> {
    let line = line.trim();
    let Some((word, rest)) = split_word(line) else {
        return Ok(None);
    };

    let command = match word.to_lowercase().as_str() {
        "n" | "next" => Command::Next,
        "p" | "prev" | "previous" => Command::Previous,
        "s" | "star" => Command::Star,
        "r" | "reveal" => Command::Reveal,
        "submit" => Command::Submit,
        "reload" => Command::Reload,
        "h" | "help" | "?" => Command::Help,
        "q" | "quit" | "exit" => Command::Quit,
        "t" | "tab" if !rest.is_empty() => Command::Tab(rest.parse()?),
        "topic" => Command::Topic(parse_number(rest, "topic")?),
        "g" | "go" if !rest.is_empty() => {
            if let Ok(id) = rest.parse::<QuestionId>() {
                Command::Go(id)
            } else {
                Command::GoNumber(parse_number(rest, "question")?)
            }
        }
        _ if rest.is_empty() => Command::Toggle(parse_options(word)?),
        _ => {
            return Err(DrillError::Other(format!(
                "unknown command '{line}', type 'help' for a list"
            )));
        }
    };
    Ok(Some(command))
}

fn split_word(line: &str) -> Option<(&str, &str)> {
    if line.is_empty() {
        return None;
    }
    Some(match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    })
}

fn parse_number(value: &str, what: &str) -> Result<u32> {
    value
        .parse::<u32>()
        .ok()
        .filter(|n| *n > 0)
        .ok_or_else(|| DrillError::Other(format!("expected a {what} number, got '{value}'")))
}

/// `"2"` -> `[1]`, `"ac"` -> `[0, 2]`
fn parse_options(word: &str) -> Result<Vec<usize>> {
    if let Ok(number) = word.parse::<usize>() {
        return match number {
            0 => Err(DrillError::Other("options are numbered from 1".to_string())),
            n => Ok(vec![n - 1]),
        };
    }

    if word.chars().all(|c| c.is_ascii_alphabetic()) {
        return Ok(word
            .chars()
            .map(|c| (c.to_ascii_lowercase() as u8 - b'a') as usize)
            .collect());
    }

    Err(DrillError::Other(format!(
        "unknown command '{word}', type 'help' for a list"
    )))
}
