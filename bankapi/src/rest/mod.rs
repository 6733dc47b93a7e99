pub mod endpoints;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::error::{BankError, Result};
use crate::types::ErrorResult;

/// HTTP client wrapper for the account service REST API.
#[derive(Debug, Clone)]
pub struct BankHttpClient {
    client: Client,
    base_url: Url,
}

impl BankHttpClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))?;
        if base_url.cannot_be_a_base() {
            return Err(BankError::InvalidBaseUrl(base_url.to_string()));
        }
        Ok(Self {
            client: Client::new(),
            base_url,
        })
    }

    /// Build a URL below the base, percent-encoding each path segment.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// GET a JSON resource. No body and no content type are sent.
    pub async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T> {
        let url = self.url(segments);
        debug!(%url, "GET");
        let resp = self.client.get(url).send().await?;
        decode(resp).await
    }

    /// POST a JSON body and decode the JSON reply.
    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<T> {
        let url = self.url(segments);
        debug!(%url, "POST");
        let resp = self
            .client
            .post(url)
            .header("content-type", "application/json")
            .body(serde_json::to_vec(body)?)
            .send()
            .await?;
        decode(resp).await
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }
}

/// Decode a reply body regardless of status.
///
/// An `{"error": ...}` body wins over the status code. Any other non-success
/// reply becomes [`BankError::Http`] carrying the raw body.
async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T> {
    let status = resp.status();
    let body = resp.text().await?;

    let value: serde_json::Value = match serde_json::from_str(&body) {
        Ok(value) => value,
        Err(_) if !status.is_success() => {
            return Err(BankError::Http {
                status: status.as_u16(),
                message: body,
            })
        }
        Err(e) => return Err(BankError::Json(e)),
    };

    if let Some(ErrorResult { error }) = ErrorResult::from_body(&value) {
        return Err(BankError::Service(error));
    }

    if !status.is_success() {
        return Err(BankError::Http {
            status: status.as_u16(),
            message: body,
        });
    }

    serde_json::from_value(value).map_err(BankError::Json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_encodes_segments() {
        let client = BankHttpClient::new("http://localhost:5000/api/").unwrap();
        let url = client.url(&["accounts", "jane doe/x"]);
        assert_eq!(url.as_str(), "http://localhost:5000/api/accounts/jane%20doe%2Fx");
    }

    #[test]
    fn test_url_without_base_path() {
        let client = BankHttpClient::new("http://localhost:5000").unwrap();
        let url = client.url(&["accounts"]);
        assert_eq!(url.as_str(), "http://localhost:5000/accounts");
    }

    #[test]
    fn test_rejects_non_base_url() {
        assert!(matches!(
            BankHttpClient::new("mailto:bank@example.com"),
            Err(BankError::InvalidBaseUrl(_))
        ));
    }
}
