use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::transaction::Transaction;

/// An account as returned by the service.
///
/// `balance` is authoritative as of the response that carried it; the client
/// never recomputes it from `transactions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub user: String,
    #[serde(default)]
    pub description: String,
    pub currency: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
    /// Oldest first, in the order the service returned them.
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

/// Fields submitted when registering a new account.
///
/// Values are forwarded as entered; the service validates them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountDraft {
    pub user: String,
    pub currency: String,
    pub description: String,
    pub balance: String,
}
