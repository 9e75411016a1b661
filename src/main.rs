use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use drill::cli::{Cli, Commands, ConfigAction, log_level};
use drill::commands::{
    PracticeOptions, cmd_config_path, cmd_config_set, cmd_config_show, cmd_practice, cmd_progress,
};

/// Logs go to stderr so they never interleave with the practice prompt.
/// `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("drill={}", log_level(verbose))));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Practice {
            exam_id,
            topic,
            tab,
        } => cmd_practice(PracticeOptions {
            exam_id,
            topic,
            tab,
        })
        .await,
        Commands::Progress { exam_id } => cmd_progress(&exam_id).await,
        Commands::Config { action } => match action {
            ConfigAction::Show => cmd_config_show(),
            ConfigAction::Set { key, value } => cmd_config_set(&key, &value),
            ConfigAction::Path => cmd_config_path(),
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
