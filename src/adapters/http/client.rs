//! Paginated list API client

use crate::adapters::http::models::ListResponse;
use crate::config::{RetryConfig, SecretString, SourceConfig};
use crate::core::bulk::{Page, PageRequest, PageSource};
use crate::domain::{Result, SourceError, TabexError};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::marker::PhantomData;
use std::time::Duration;
use url::Url;

/// [`PageSource`] backed by a remote list endpoint
pub struct HttpPageSource<R = serde_json::Value> {
    client: Client,
    url: Url,
    api_token: Option<SecretString>,
    filters: BTreeMap<String, String>,
    retry: RetryConfig,
    _rows: PhantomData<fn() -> R>,
}

impl<R> HttpPageSource<R> {
    /// Builds a client for the configured endpoint
    ///
    /// # Errors
    ///
    /// Returns a configuration error if no base URL is set, the URL does not
    /// parse or the HTTP client cannot be built.
    pub fn new(config: &SourceConfig) -> Result<Self> {
        let base_url = config.base_url.as_deref().ok_or_else(|| {
            TabexError::Configuration("source.base_url is required for remote sources".to_string())
        })?;
        let url = endpoint_url(base_url, &config.endpoint)?;

        let mut client_builder = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(30));

        if !config.tls_verify {
            tracing::warn!(url = %url, "TLS certificate verification disabled");
            client_builder = client_builder.danger_accept_invalid_certs(true);
        }

        let client = client_builder.build().map_err(|e| {
            TabexError::Configuration(format!("Failed to build HTTP client: {e}"))
        })?;

        Ok(Self {
            client,
            url,
            api_token: config.api_token.clone(),
            filters: config.filters.clone(),
            retry: config.retry.clone(),
            _rows: PhantomData,
        })
    }

    /// Endpoint the pages are requested from
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Retry a request with exponential backoff
    ///
    /// Client errors (4xx) are returned immediately.
    async fn retry_request<F, T, Fut>(&self, operation: F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<T>>,
    {
        let max_retries = self.retry.max_retries.max(1);
        let mut attempt = 0;

        loop {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(e) => {
                    attempt += 1;
                    if attempt >= max_retries || !is_retryable(&e) {
                        return Err(e);
                    }

                    let delay_ms = backoff_delay_ms(&self.retry, attempt);

                    tracing::warn!(
                        attempt = attempt,
                        max_retries = max_retries,
                        delay_ms = delay_ms,
                        error = %e,
                        "Retrying request after error"
                    );

                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                }
            }
        }
    }
}

impl<R: DeserializeOwned> HttpPageSource<R> {
    async fn request_page(&self, request: PageRequest) -> Result<ListResponse<R>> {
        let mut query: Vec<(String, String)> = vec![
            ("page".to_string(), request.page.to_string()),
            ("limit".to_string(), request.limit.to_string()),
        ];
        query.extend(self.filters.iter().map(|(k, v)| (k.clone(), v.clone())));

        let mut builder = self.client.get(self.url.clone()).query(&query);
        if let Some(token) = &self.api_token {
            builder = builder.bearer_auth(token.expose_secret().as_ref());
        }

        let response = builder.send().await.map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            let error = if status.is_server_error() {
                SourceError::ServerError {
                    status: status.as_u16(),
                    message,
                }
            } else {
                SourceError::ClientError {
                    status: status.as_u16(),
                    message,
                }
            };
            return Err(error.into());
        }

        response
            .json::<ListResponse<R>>()
            .await
            .map_err(|e| SourceError::InvalidResponse(e.to_string()).into())
    }
}

#[async_trait]
impl<R> PageSource<R> for HttpPageSource<R>
where
    R: DeserializeOwned + Send + 'static,
{
    async fn fetch_page(&self, request: PageRequest) -> Result<Page<R>> {
        tracing::debug!(url = %self.url, page = request.page, limit = request.limit, "Fetching page");

        let response = self.retry_request(|| self.request_page(request)).await?;

        let page = Page::new(response.items, response.pagination.pages);
        Ok(match response.pagination.total {
            Some(total) => page.with_total(total),
            None => page,
        })
    }
}

fn endpoint_url(base_url: &str, endpoint: &str) -> Result<Url> {
    let joined = if endpoint.trim().is_empty() {
        base_url.to_string()
    } else {
        format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    };

    Url::parse(&joined)
        .map_err(|e| TabexError::Configuration(format!("Invalid source URL '{joined}': {e}")))
}

fn map_transport_error(error: reqwest::Error) -> TabexError {
    if error.is_timeout() {
        SourceError::Timeout(error.to_string()).into()
    } else {
        SourceError::ConnectionFailed(error.to_string()).into()
    }
}

fn is_retryable(error: &TabexError) -> bool {
    !matches!(error, TabexError::Source(SourceError::ClientError { .. }))
}

fn backoff_delay_ms(retry: &RetryConfig, attempt: usize) -> u64 {
    let factor = retry
        .backoff_multiplier
        .powi(attempt.saturating_sub(1) as i32);
    let delay_ms = (retry.initial_delay_ms as f64 * factor) as u64;
    delay_ms.min(retry.max_delay_ms)
}
