use clap::Subcommand;
use serde_json::json;

use guestlog::config::{DEFAULT_API_URL, DEFAULT_FILE_PATH};
use guestlog::{GuestlogConfig, Result};

use crate::output::{self, Column};

#[derive(Subcommand)]
pub enum ConfigCmd {
    /// Show the effective configuration
    Get,
    /// Set a value in ~/.guestlog/config.toml
    Set {
        /// Key to set (owner, repo, token, file_path, api_url)
        key: String,
        /// Value
        value: String,
    },
}

const CONFIG_COLUMNS: &[Column] = &[
    Column::new("Owner", "owner"),
    Column::new("Repo", "repo"),
    Column::new("Token", "token"),
    Column::new("File path", "file_path"),
    Column::new("API URL", "api_url"),
];

/// `effective` is the merged view (file plus flags and environment); `set`
/// only ever touches the file.
pub fn run(cmd: ConfigCmd, effective: &GuestlogConfig, output_format: &str) -> Result<()> {
    match cmd {
        ConfigCmd::Get => {
            let value = json!({
                "owner": effective.owner,
                "repo": effective.repo,
                "token": effective.token.as_ref().map(|_| "***"),
                "file_path": effective.file_path.as_deref().unwrap_or(DEFAULT_FILE_PATH),
                "api_url": effective.api_url.as_deref().unwrap_or(DEFAULT_API_URL),
            });
            output::render(&value, CONFIG_COLUMNS, output_format);
        }
        ConfigCmd::Set { key, value } => {
            let mut config = GuestlogConfig::load();
            config.set(&key, value)?;
            config.save()?;
            output::print_success(&format!(
                "Set '{key}' in {}",
                GuestlogConfig::config_path().display()
            ));
        }
    }
    Ok(())
}
