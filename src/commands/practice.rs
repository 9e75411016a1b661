//! `drill practice`: the interactive practice loop.

use std::io::{self, IsTerminal, Write};
use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};

use super::interactive::confirm;
use crate::api::{ExamApi, HttpExamApi};
use crate::config::Config;
use crate::error::{DrillError, Result};
use crate::nav::{Navigation, OptionToggle, Tab};
use crate::notify::ToastQueue;
use crate::practice::input::HELP;
use crate::practice::render::{render_submission, render_toast, render_view};
use crate::practice::{Command, PracticeSession, parse_command};
use crate::session::Session;
use crate::types::{Direction, QuestionId};

/// Options for starting a practice session
pub struct PracticeOptions {
    pub exam_id: String,
    pub topic: Option<u32>,
    pub tab: Option<Tab>,
}

pub async fn cmd_practice(options: PracticeOptions) -> Result<()> {
    let config = Config::load()?;
    let session = Session::from_config(&config, options.exam_id);
    if !session.is_authenticated() {
        return Err(DrillError::Auth(
            "no token configured. Set DRILL_TOKEN or run: drill config set auth.token <token>"
                .to_string(),
        ));
    }

    let api = Arc::new(HttpExamApi::from_config(&config)?);
    let toasts = Arc::new(ToastQueue::new());
    let mut practice = PracticeSession::open(api, session, toasts.clone()).await?;

    if let Some(topic) = options.topic {
        practice.change_topic(topic)?;
    }
    if let Some(tab) = options.tab {
        practice.change_tab(tab);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = io::stdout();
    let color = stdout.is_terminal();
    let loop_result = run_practice_loop(
        &mut practice,
        &toasts,
        &mut lines,
        &mut stdout,
        color,
    )
    .await;

    practice.flush().await;
    for toast in toasts.drain() {
        eprintln!("{}", render_toast(&toast, color));
    }
    loop_result
}

/// Reads commands from `lines` until `q` or end of input, redrawing the
/// view after each one.
///
/// Returns [`DrillError::SessionExpired`] as soon as the backend rejects the
/// user's token.
pub async fn run_practice_loop<A, R, W>(
    practice: &mut PracticeSession<A>,
    toasts: &ToastQueue,
    lines: &mut Lines<R>,
    out: &mut W,
    color: bool,
) -> Result<()>
where
    A: ExamApi,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    writeln!(out, "{}", render_view(practice.controller(), color))?;

    loop {
        for toast in toasts.drain() {
            writeln!(out, "{}", render_toast(&toast, color))?;
        }
        if practice.is_expired() {
            return Err(DrillError::SessionExpired);
        }

        write!(out, "> ")?;
        out.flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                writeln!(out, "{e}")?;
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Help => {
                writeln!(out, "{HELP}")?;
                continue;
            }
            Command::Next => step(practice, out, Direction::Forward)?,
            Command::Previous => step(practice, out, Direction::Backward)?,
            Command::Tab(tab) => {
                practice.change_tab(tab);
            }
            Command::Topic(topic) => {
                if let Err(e) = practice.change_topic(topic) {
                    writeln!(out, "{e}")?;
                    continue;
                }
            }
            Command::GoNumber(number) => {
                let topic = practice.controller().topic();
                go(practice, out, QuestionId::new(topic, number - 1))?;
            }
            Command::Go(id) => go(practice, out, id)?,
            Command::Toggle(options) => {
                for option in options {
                    match practice.toggle_option(option) {
                        OptionToggle::OutOfRange => writeln!(out, "No option {}.", option + 1)?,
                        OptionToggle::NoQuestion => {
                            writeln!(out, "No question is shown.")?;
                            break;
                        }
                        OptionToggle::Selected
                        | OptionToggle::Deselected
                        | OptionToggle::LimitReached => {}
                    }
                }
            }
            Command::Star => {
                if practice.toggle_favorite().is_none() {
                    writeln!(out, "No question is shown.")?;
                }
            }
            Command::Reveal => {
                practice.toggle_answer_reveal();
            }
            Command::Submit => {
                let unanswered = practice.unanswered_count();
                if unanswered > 0 {
                    let prompt = format!(
                        "You have {unanswered} unanswered question(s). Are you sure you want to submit?"
                    );
                    if !confirm(lines, out, &prompt).await? {
                        continue;
                    }
                }
                match practice.submit().await {
                    Ok(result) => writeln!(out, "{}", render_submission(&result, color))?,
                    Err(e) if e.is_session_expired() => return Err(e),
                    Err(e) => writeln!(out, "Submission failed: {e}")?,
                }
            }
            Command::Reload => match practice.reload().await {
                Ok(()) => {}
                Err(e) if e.is_session_expired() => return Err(e),
                Err(e) => writeln!(out, "Reload failed: {e}")?,
            },
        }

        writeln!(out, "\n{}", render_view(practice.controller(), color))?;
    }

    Ok(())
}

fn step<A: ExamApi, W: Write>(
    practice: &mut PracticeSession<A>,
    out: &mut W,
    direction: Direction,
) -> Result<()> {
    if practice.navigate(direction) == Navigation::NoTarget
        && !practice.controller().subsequence().is_empty()
    {
        let edge = match direction {
            Direction::Forward => "last",
            Direction::Backward => "first",
        };
        writeln!(out, "Already at the {edge} question of this tab.")?;
    }
    Ok(())
}

fn go<A: ExamApi, W: Write>(
    practice: &mut PracticeSession<A>,
    out: &mut W,
    id: QuestionId,
) -> Result<()> {
    if practice.select_question(id) == Navigation::NoTarget {
        if practice.controller().exam().question(id).is_some() {
            writeln!(out, "{id} is not in the current tab.")?;
        } else {
            writeln!(out, "There is no question {id}.")?;
        }
    }
    Ok(())
}
