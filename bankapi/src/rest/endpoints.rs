use crate::error::Result;
use crate::rest::BankHttpClient;
use crate::types::*;

impl BankHttpClient {
    // --- Accounts ---

    /// GET /accounts/{user} - Account with its full transaction history.
    pub async fn get_account(&self, user: &str) -> Result<Account> {
        self.get(&["accounts", user]).await
    }

    /// POST /accounts - Register a new account.
    pub async fn create_account(&self, draft: &AccountDraft) -> Result<Account> {
        self.post(&["accounts"], draft).await
    }

    // --- Transactions ---

    /// POST /accounts/{user}/transactions - Append a transaction; replies with
    /// the transaction as recorded.
    pub async fn create_transaction(
        &self,
        user: &str,
        draft: &TransactionDraft,
    ) -> Result<Transaction> {
        self.post(&["accounts", user, "transactions"], draft).await
    }
}
