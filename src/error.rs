use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("account service client error: {0}")]
    Bank(#[from] bankapi::BankError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("not signed in")]
    NotSignedIn,

    /// The request was answered with an error shown on the surface.
    #[error("{0}")]
    Rejected(String),
}
