use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A transaction recorded by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Server-assigned identifier, when the service provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Stored by the service as submitted; not necessarily ISO 8601.
    pub date: String,
    pub object: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

/// Fields submitted when creating a transaction, forwarded as entered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionDraft {
    pub date: String,
    pub object: String,
    pub amount: String,
}
