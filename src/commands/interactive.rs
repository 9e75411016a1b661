//! Interactive user prompting
//!
//! Prompts read from the same line stream as the practice loop, so a
//! confirmation answer is never mistaken for a command.

use std::io::Write;

use tokio::io::{AsyncBufRead, Lines};

use crate::error::Result;

/// Prompt user for yes/no confirmation
///
/// Returns `true` only for `y` or `yes` (any case). End of input counts as no.
pub async fn confirm<R, W>(lines: &mut Lines<R>, out: &mut W, prompt: &str) -> Result<bool>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    write!(out, "{prompt} [y/N] ")?;
    out.flush()?;

    let answer = lines.next_line().await?.unwrap_or_default();
    let answer = answer.trim();
    Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
}
