/// Default base URL of the account service.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:5000/api";

/// Configuration for the account service client.
#[derive(Debug, Clone)]
pub struct BankConfig {
    /// Base URL of the account service API (e.g. `http://localhost:5000/api`).
    pub server_url: String,
}

impl Default for BankConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
        }
    }
}
