//! Runtime configuration assembled from CLI flags and environment.

use std::path::PathBuf;

use bankapi::BankConfig;

use crate::cli::Cli;

/// Log file used while the TUI owns the terminal.
const LOG_FILE: &str = "bankdash.log";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the account service.
    pub server_url: String,
    /// Directory for the saved session and the TUI log.
    pub data_dir: PathBuf,
}

impl AppConfig {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            server_url: cli.server_url.clone(),
            data_dir: cli.data_dir.clone().unwrap_or_else(default_data_dir),
        }
    }

    pub fn bank_config(&self) -> BankConfig {
        BankConfig {
            server_url: self.server_url.clone(),
        }
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join(LOG_FILE)
    }
}

/// Platform data directory, falling back to `./.bankdash`.
pub fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|p| p.join("bankdash"))
        .unwrap_or_else(|| PathBuf::from(".bankdash"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_explicit_flags_win() {
        let cli = Cli::parse_from([
            "bankdash",
            "--server-url",
            "http://bank.test/api",
            "--data-dir",
            "/tmp/bd",
            "show",
        ]);
        let config = AppConfig::from_cli(&cli);
        assert_eq!(config.bank_config().server_url, "http://bank.test/api");
        assert_eq!(config.log_path(), PathBuf::from("/tmp/bd/bankdash.log"));
    }
}
