//! `drill progress`: per-topic counts for one exam.

use std::sync::Arc;

use owo_colors::OwoColorize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::api::HttpExamApi;
use crate::config::Config;
use crate::error::Result;
use crate::nav::{NavigationController, compute_subsequences};
use crate::notify::TracingNotifier;
use crate::practice::PracticeSession;
use crate::session::Session;

/// A row in the progress table
#[derive(Debug, Clone, PartialEq, Eq, Tabled)]
pub struct TopicRow {
    #[tabled(rename = "Topic")]
    pub topic: u32,
    #[tabled(rename = "Questions")]
    pub questions: usize,
    #[tabled(rename = "Answered")]
    pub answered: usize,
    #[tabled(rename = "Unanswered")]
    pub unanswered: usize,
    #[tabled(rename = "Favorites")]
    pub favorites: usize,
    #[tabled(rename = "Incorrect")]
    pub incorrect: usize,
}

/// One row per topic, in topic order.
pub fn progress_rows(ctl: &NavigationController) -> Vec<TopicRow> {
    let exam = ctl.exam();
    exam.topic_numbers()
        .into_iter()
        .map(|topic| {
            let subsequences = compute_subsequences(
                exam,
                topic,
                ctl.favorites(),
                ctl.answers(),
                ctl.incorrect(),
            );
            TopicRow {
                topic,
                questions: subsequences.all.len(),
                answered: subsequences.answered.len(),
                unanswered: subsequences.unanswered.len(),
                favorites: subsequences.favorites.len(),
                incorrect: subsequences.incorrect.len(),
            }
        })
        .collect()
}

/// One-line summary under the table.
pub fn progress_summary(rows: &[TopicRow], pass_mark: u8) -> String {
    let total: usize = rows.iter().map(|r| r.questions).sum();
    let answered: usize = rows.iter().map(|r| r.answered).sum();
    let incorrect: usize = rows.iter().map(|r| r.incorrect).sum();
    let percent = if total == 0 {
        0.0
    } else {
        answered as f64 * 100.0 / total as f64
    };
    format!(
        "Answered {answered} of {total} ({percent:.1}%), {incorrect} incorrect in the last submission, pass mark {pass_mark}%"
    )
}

pub async fn cmd_progress(exam_id: &str) -> Result<()> {
    let config = Config::load()?;
    let session = Session::from_config(&config, exam_id);
    let api = Arc::new(HttpExamApi::from_config(&config)?);
    let practice = PracticeSession::open(api, session, Arc::new(TracingNotifier)).await?;

    let ctl = practice.controller();
    let rows = progress_rows(ctl);
    if rows.is_empty() {
        println!("{} has no questions.", ctl.exam().display_name());
        return Ok(());
    }

    println!("{}\n", ctl.exam().display_name().bold());
    let summary = progress_summary(&rows, config.pass_mark);
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
    println!("{}", summary.dimmed());
    Ok(())
}
