//! Configuration commands.
//!
//! - `config show`: Display current configuration
//! - `config set`: Set a configuration value
//! - `config path`: Print the config file location

use owo_colors::OwoColorize;

use crate::config::Config;
use crate::error::Result;

/// Mask a sensitive value by showing only the first 2 and last 2 characters
pub fn mask_sensitive_value(value: &str) -> String {
    let char_count = value.chars().count();
    if char_count > 4 {
        let first: String = value.chars().take(2).collect();
        let last: String = value.chars().skip(char_count - 2).collect();
        format!("{first}...{last}")
    } else {
        "****".to_string()
    }
}

/// Text for `config show`; effective values, environment overrides included.
pub fn format_config(config: &Config, path: &str) -> String {
    let token = match config.token() {
        Some(token) => mask_sensitive_value(&token),
        None => "not configured".dimmed().to_string(),
    };

    let mut text = String::new();
    text.push_str(&format!("{}\n\n", "Configuration:".cyan().bold()));
    text.push_str(&format!("{}: {}\n", "api_url".cyan(), config.api_url()));
    text.push_str(&format!("{}: {}\n", "auth.token".cyan(), token));
    text.push_str(&format!(
        "{}: {}s\n",
        "request_timeout".cyan(),
        config.request_timeout
    ));
    text.push_str(&format!("{}: {}%\n", "pass_mark".cyan(), config.pass_mark));
    text.push('\n');
    text.push_str(&format!("{}", format!("Config file: {path}").dimmed()));
    text
}

/// Show current configuration
pub fn cmd_config_show() -> Result<()> {
    let config = Config::load()?;
    let path = Config::config_path()?;
    println!("{}", format_config(&config, &path.display().to_string()));
    Ok(())
}

/// Set a configuration value
pub fn cmd_config_set(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load()?;
    let key = config.set(key, value)?;
    config.save()?;

    if key == "auth.token" {
        println!("Set {}", key.cyan());
    } else {
        println!("Set {} to {}", key.cyan(), value);
    }
    Ok(())
}

/// Print the config file path
pub fn cmd_config_path() -> Result<()> {
    println!("{}", Config::config_path()?.display());
    Ok(())
}
