use clap::{ArgAction, Parser, Subcommand};

use crate::nav::Tab;

#[derive(Parser)]
#[command(name = "drill")]
#[command(about = "Terminal client for certification exam practice")]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Practice an exam interactively
    #[command(visible_alias = "p")]
    Practice {
        /// Exam ID (e.g., 'acme-ACE: Cloud Engineer')
        exam_id: String,

        /// Topic to start in (default: the first topic)
        #[arg(long)]
        topic: Option<u32>,

        /// Tab to start on: all, favorites, answered, unanswered, incorrect
        #[arg(long, value_parser = parse_tab)]
        tab: Option<Tab>,
    },

    /// Show per-topic progress for an exam
    Progress {
        /// Exam ID
        exam_id: String,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Key: api_url, auth.token, request_timeout, pass_mark
        key: String,
        /// Value to set
        value: String,
    },
    /// Print the configuration file path
    Path,
}

/// Default log filter for a given `-v` count
pub fn log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn parse_tab(s: &str) -> Result<Tab, String> {
    s.parse::<Tab>().map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_practice_args() {
        let cli = Cli::parse_from([
            "drill", "practice", "acme-ACE", "--topic", "2", "--tab", "fav", "-vv",
        ]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Practice { exam_id, topic, tab } => {
                assert_eq!(exam_id, "acme-ACE");
                assert_eq!(topic, Some(2));
                assert_eq!(tab, Some(Tab::Favorites));
            }
            _ => panic!("expected practice"),
        }
    }

    #[test]
    fn test_bad_tab_is_rejected() {
        assert!(Cli::try_parse_from(["drill", "practice", "x-y", "--tab", "nope"]).is_err());
    }

    #[test]
    fn test_log_level() {
        assert_eq!(log_level(0), "warn");
        assert_eq!(log_level(2), "debug");
        assert_eq!(log_level(9), "trace");
    }
}
