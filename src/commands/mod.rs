mod config;
pub mod interactive;
mod practice;
mod progress;

pub use config::{cmd_config_path, cmd_config_set, cmd_config_show, format_config};
pub use practice::{PracticeOptions, cmd_practice, run_practice_loop};
pub use progress::{TopicRow, cmd_progress, progress_rows, progress_summary};
