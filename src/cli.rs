use std::path::PathBuf;

use bankapi::config::DEFAULT_SERVER_URL;
use bankapi::AccountDraft;
use clap::{Parser, Subcommand};

/// bankdash: account dashboard client.
#[derive(Parser, Debug)]
#[command(name = "bankdash", version)]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,

    /// Account service base URL
    #[arg(long, env = "BANKDASH_SERVER_URL", default_value = DEFAULT_SERVER_URL, global = true)]
    pub server_url: String,

    /// Directory holding the saved session
    #[arg(long, env = "BANKDASH_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Print results as JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Launch the interactive dashboard
    Tui,

    #[command(flatten)]
    Session(SessionCommand),
}

/// One-shot commands sharing the saved session with the TUI.
#[derive(Subcommand, Debug)]
pub enum SessionCommand {
    /// Log in as an existing user
    Login(LoginArgs),

    /// Register a new account and log in
    Register(RegisterArgs),

    /// Refresh and print the dashboard
    Show,

    /// Submit a transaction
    Add(AddArgs),

    /// Forget the saved session
    Logout,
}

/// Arguments for the `login` subcommand.
#[derive(Parser, Debug)]
pub struct LoginArgs {
    /// User id
    pub user: String,
}

/// Arguments for the `register` subcommand.
#[derive(Parser, Debug)]
pub struct RegisterArgs {
    /// User id
    #[arg(long)]
    pub user: String,

    /// Currency label (e.g. $, EUR)
    #[arg(long)]
    pub currency: String,

    /// Account description
    #[arg(long, default_value = "")]
    pub description: String,

    /// Opening balance
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub balance: String,
}

impl From<RegisterArgs> for AccountDraft {
    fn from(args: RegisterArgs) -> Self {
        AccountDraft {
            user: args.user,
            currency: args.currency,
            description: args.description,
            balance: args.balance,
        }
    }
}

/// Arguments for the `add` subcommand.
#[derive(Parser, Debug)]
pub struct AddArgs {
    /// What the transaction is for
    #[arg(long)]
    pub object: String,

    /// Signed amount (negative for debits)
    #[arg(long, allow_hyphen_values = true)]
    pub amount: String,

    /// Date (YYYY-MM-DD); defaults to today
    #[arg(long)]
    pub date: Option<String>,
}
