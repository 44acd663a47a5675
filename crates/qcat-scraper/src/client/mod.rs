//! HTTP client for the catalog service's category and product endpoints.

mod fetch_all;

use std::time::Duration;

use qcat_core::AppConfig;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ScraperError;
use crate::rate_limit::{retry_with_backoff, FetchOutcome, RetryPolicy};
use crate::types::{CategoriesResponse, CategorySummary, ProductsResponse, RawRecord};

/// HTTP verb for [`CatalogClient::send_once`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMethod {
    /// Parameters go in the query string.
    Get,
    /// Parameters go in a JSON object body.
    Post,
}

/// Client for the catalog service.
///
/// Static mobile-client headers are attached to every request. Each logical
/// request goes through the [`RetryPolicy`]; a request that never succeeds
/// comes back as [`FetchOutcome::Exhausted`] rather than an error.
pub struct CatalogClient {
    pub(super) client: Client,
    pub(super) policy: RetryPolicy,
    categories_url: String,
    products_url: String,
    latitude: f64,
    longitude: f64,
}

impl CatalogClient {
    /// Builds a client from the run configuration.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::InvalidBaseUrl`] if `base_url` does not parse.
    /// - [`ScraperError::InvalidHeader`] if a configured header value is not
    ///   a valid HTTP header value.
    /// - [`ScraperError::Client`] if the underlying `reqwest::Client` cannot be
    ///   constructed.
    pub fn new(config: &AppConfig) -> Result<Self, ScraperError> {
        reqwest::Url::parse(&config.base_url).map_err(|e| ScraperError::InvalidBaseUrl {
            base_url: config.base_url.clone(),
            reason: e.to_string(),
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(&config.user_agent)
            .default_headers(static_headers(config)?)
            .build()?;

        Ok(Self {
            client,
            policy: RetryPolicy::from_config(config),
            categories_url: config.categories_url(),
            products_url: config.products_url(),
            latitude: config.latitude,
            longitude: config.longitude,
        })
    }

    #[must_use]
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Performs exactly one request and decodes the body as JSON.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::Timeout`] / [`ScraperError::Connection`] on transport failure.
    /// - [`ScraperError::RateLimited`] on HTTP 429.
    /// - [`ScraperError::HttpStatus`] on any other status than 200.
    /// - [`ScraperError::Deserialize`] if the body is not JSON.
    pub async fn send_once(
        &self,
        url: &str,
        params: &[(&str, Value)],
        method: RequestMethod,
    ) -> Result<Value, ScraperError> {
        let request = match method {
            RequestMethod::Get => self.client.get(url).query(params),
            RequestMethod::Post => {
                let body: serde_json::Map<String, Value> = params
                    .iter()
                    .map(|(k, v)| ((*k).to_owned(), v.clone()))
                    .collect();
                self.client.post(url).json(&body)
            }
        };

        let response = request
            .send()
            .await
            .map_err(|e| ScraperError::from_transport(url, e))?;
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ScraperError::RateLimited {
                url: url.to_owned(),
            });
        }

        if status != reqwest::StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(
                url,
                status = status.as_u16(),
                body = %truncate(&body, 200),
                "non-200 response body"
            );
            return Err(ScraperError::HttpStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ScraperError::from_transport(url, e))?;
        serde_json::from_str::<Value>(&body).map_err(|e| ScraperError::Deserialize {
            context: format!("response from {url}"),
            source: e,
        })
    }

    /// Sends a request through the retry policy and decodes it into `T`.
    ///
    /// A body that is JSON but not shaped like `T` counts as a failed attempt.
    pub async fn request_json<T>(
        &self,
        url: &str,
        params: &[(&str, Value)],
        method: RequestMethod,
    ) -> FetchOutcome<T>
    where
        T: DeserializeOwned,
    {
        retry_with_backoff(&self.policy, url, || async move {
            let payload = self.send_once(url, params, method).await?;
            serde_json::from_value::<T>(payload).map_err(|e| ScraperError::Deserialize {
                context: format!("payload from {url}"),
                source: e,
            })
        })
        .await
    }

    /// Fetches the category listing for the configured location.
    ///
    /// Returns an empty list when the listing cannot be retrieved.
    pub async fn fetch_categories(&self) -> Vec<CategorySummary> {
        let params = [
            ("latitude", Value::from(self.latitude)),
            ("longitude", Value::from(self.longitude)),
        ];

        match self
            .request_json::<CategoriesResponse>(&self.categories_url, &params, RequestMethod::Get)
            .await
        {
            FetchOutcome::Data(response) => {
                tracing::info!(count = response.categories.len(), "found categories");
                response.categories
            }
            FetchOutcome::Exhausted => {
                tracing::error!(url = %self.categories_url, "could not fetch category listing");
                Vec::new()
            }
        }
    }

    /// Fetches one page of a category's product listing.
    pub async fn fetch_products_page(
        &self,
        category_id: &str,
        page: u32,
        limit: u32,
    ) -> FetchOutcome<Vec<RawRecord>> {
        let params = self.products_params(category_id, page, limit);

        match self
            .request_json::<ProductsResponse>(&self.products_url, &params, RequestMethod::Get)
            .await
        {
            FetchOutcome::Data(response) => {
                tracing::info!(
                    category_id,
                    page,
                    count = response.products.len(),
                    "fetched products page"
                );
                FetchOutcome::Data(response.products)
            }
            FetchOutcome::Exhausted => FetchOutcome::Exhausted,
        }
    }

    fn products_params(
        &self,
        category_id: &str,
        page: u32,
        limit: u32,
    ) -> Vec<(&'static str, Value)> {
        vec![
            ("category_id", Value::from(category_id)),
            ("latitude", Value::from(self.latitude)),
            ("longitude", Value::from(self.longitude)),
            ("page", Value::from(page)),
            ("limit", Value::from(limit)),
        ]
    }
}

/// Headers the mobile client sends with every call.
fn static_headers(config: &AppConfig) -> Result<HeaderMap, ScraperError> {
    let mut headers = HeaderMap::new();
    headers.insert(
        reqwest::header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    headers.insert(
        reqwest::header::ACCEPT,
        HeaderValue::from_static("application/json"),
    );
    for (name, value) in [
        ("app-version", config.app_version.as_str()),
        ("platform", config.platform.as_str()),
    ] {
        let value = HeaderValue::from_str(value).map_err(|e| ScraperError::InvalidHeader {
            name: name.to_owned(),
            reason: e.to_string(),
        })?;
        headers.insert(HeaderName::from_static(name), value);
    }
    Ok(headers)
}

fn truncate(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
