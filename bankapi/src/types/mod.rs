pub mod account;
pub mod error;
pub mod transaction;

pub use account::{Account, AccountDraft};
pub use error::ErrorResult;
pub use transaction::{Transaction, TransactionDraft};
