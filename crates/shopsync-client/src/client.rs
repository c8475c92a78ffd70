//! HTTP client for the Shopify Admin REST API.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Client;

use crate::error::ClientError;
use crate::pager::CatalogRecord;
use crate::retry::retry_fixed;
use crate::types::CountEnvelope;

/// Header carrying the Admin API access token.
const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

/// HTTP client for a Shopify store's Admin REST API.
///
/// Handles rate limiting (429), not-found (404), and other non-2xx responses
/// as typed errors. Each request is retried on transient failures with a
/// fixed delay, up to `max_attempts` total attempts per call.
///
/// The base URL is passed per call rather than held by the client so tests
/// can point the same client at a mock server.
pub struct ShopifyClient {
    client: Client,
    /// Total attempts allowed per request, including the first.
    max_attempts: u32,
    /// Fixed delay in seconds between attempts.
    retry_delay_secs: u64,
}

impl ShopifyClient {
    /// Creates a `ShopifyClient` with configured timeout, `User-Agent`,
    /// access token, and retry policy.
    ///
    /// The token is installed as a default `X-Shopify-Access-Token` header
    /// and marked sensitive so it never shows up in request logs.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidAccessToken`] if the token contains
    /// bytes that cannot appear in an HTTP header, or [`ClientError::Http`]
    /// if the underlying `reqwest::Client` cannot be constructed.
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        access_token: &str,
        max_attempts: u32,
        retry_delay_secs: u64,
    ) -> Result<Self, ClientError> {
        let mut token =
            HeaderValue::from_str(access_token).map_err(|e| ClientError::InvalidAccessToken {
                reason: e.to_string(),
            })?;
        token.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(ACCESS_TOKEN_HEADER, token);

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            max_attempts,
            retry_delay_secs,
        })
    }

    /// Fetches the total record count from the resource's `count.json`
    /// endpoint, with automatic retry on transient errors.
    ///
    /// # Errors
    ///
    /// - [`ClientError::RateLimited`] — HTTP 429 after all attempts exhausted.
    /// - [`ClientError::NotFound`] — HTTP 404 (not retried).
    /// - [`ClientError::UnexpectedStatus`] — other non-2xx (5xx retried, 4xx not).
    /// - [`ClientError::Http`] — network failure after all attempts exhausted.
    /// - [`ClientError::Deserialize`] — body is not a count envelope (not retried).
    pub async fn count<T: CatalogRecord>(&self, base_url: &str) -> Result<u64, ClientError> {
        let url = endpoint_url(base_url, T::COUNT_PATH);

        retry_fixed(self.max_attempts, self.retry_delay_secs, || {
            let url = url.clone();
            async move {
                let body = self.get_json(&url).await?;
                let parsed = serde_json::from_str::<CountEnvelope>(&body).map_err(|e| {
                    ClientError::Deserialize {
                        context: format!("{} count from {url}", T::KIND),
                        source: e,
                    }
                })?;
                Ok(parsed.count)
            }
        })
        .await
    }

    /// Fetches one page of records with identifiers greater than `since_id`,
    /// limited to `limit`, with automatic retry on transient errors.
    ///
    /// The Admin API returns records in ascending identifier order when paged
    /// this way, which is what makes `since_id` a usable cursor.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`Self::count`].
    pub async fn fetch_page<T: CatalogRecord>(
        &self,
        base_url: &str,
        since_id: i64,
        limit: u32,
    ) -> Result<Vec<T>, ClientError> {
        let url = format!(
            "{}?since_id={since_id}&limit={limit}",
            endpoint_url(base_url, T::LIST_PATH)
        );

        retry_fixed(self.max_attempts, self.retry_delay_secs, || {
            let url = url.clone();
            async move {
                let body = self.get_json(&url).await?;
                T::parse_page(&body).map_err(|e| ClientError::Deserialize {
                    context: format!("{} page from {url}", T::KIND),
                    source: e,
                })
            }
        })
        .await
    }

    /// Performs one GET and maps the HTTP status to the error taxonomy,
    /// returning the raw body on success.
    async fn get_json(&self, url: &str) -> Result<String, ClientError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(2);
            return Err(ClientError::RateLimited {
                url: url.to_owned(),
                retry_after_secs,
            });
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound {
                url: url.to_owned(),
            });
        }

        if !status.is_success() {
            return Err(ClientError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        Ok(response.text().await?)
    }
}

/// Joins the API base URL and a resource path, tolerating a trailing slash
/// on the base.
fn endpoint_url(base_url: &str, path: &str) -> String {
    format!("{}/{path}", base_url.trim_end_matches('/'))
}
