use tracing::{debug, warn};

use crate::config::BankConfig;
use crate::error::Result;
use crate::rest::BankHttpClient;
use crate::types::*;

/// Outcome of an operation that yields an account.
pub type AccountResult = std::result::Result<Account, ErrorResult>;

/// Outcome of an operation that yields a recorded transaction.
pub type TransactionResult = std::result::Result<Transaction, ErrorResult>;

/// Account service client.
///
/// Every operation resolves to either the decoded resource or an
/// [`ErrorResult`]; nothing is thrown past this boundary and no request is
/// retried.
#[derive(Debug, Clone)]
pub struct Bank {
    /// Base URL of the account service.
    pub server_url: String,
    /// HTTP client.
    pub http_client: BankHttpClient,
}

impl Bank {
    /// Create a client for the configured service.
    pub fn new(config: BankConfig) -> Result<Self> {
        let http_client = BankHttpClient::new(&config.server_url)?;
        Ok(Self {
            server_url: config.server_url,
            http_client,
        })
    }

    /// Fetch an account by user id.
    pub async fn get_account(&self, user: &str) -> AccountResult {
        let result = self.http_client.get_account(user).await;
        settle("get_account", result)
    }

    /// Register a new account.
    pub async fn create_account(&self, draft: &AccountDraft) -> AccountResult {
        let result = self.http_client.create_account(draft).await;
        settle("create_account", result)
    }

    /// Append a transaction to a user's account.
    pub async fn create_transaction(
        &self,
        user: &str,
        draft: &TransactionDraft,
    ) -> TransactionResult {
        let result = self.http_client.create_transaction(user, draft).await;
        settle("create_transaction", result)
    }
}

/// Normalize a low-level result into the uniform error shape.
fn settle<T>(op: &str, result: Result<T>) -> std::result::Result<T, ErrorResult> {
    match result {
        Ok(value) => {
            debug!(op, "request succeeded");
            Ok(value)
        }
        Err(e) => {
            warn!(op, error = %e, "request failed");
            Err(e.into())
        }
    }
}
