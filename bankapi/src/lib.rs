pub mod client;
pub mod config;
pub mod error;
pub mod rest;
pub mod types;

// ---- Top-level re-exports for ergonomic usage ----

// Client
pub use client::{AccountResult, Bank, TransactionResult};
pub use config::BankConfig;
pub use error::{BankError, Result, UNKNOWN_ERROR};

// REST client
pub use rest::BankHttpClient;

// Wire types
pub use types::{Account, AccountDraft, ErrorResult, Transaction, TransactionDraft};
