use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use shared::{
    domain::SectionSummary,
    error::DataSourceError,
    protocol::{CategoryProductsResponse, FeaturedProductsResponse},
};
use tracing::debug;
use url::Url;

use crate::{config::Settings, CatalogDataSource};

/// [`CatalogDataSource`] backed by the catalog backend's REST surface.
pub struct HttpCatalogSource {
    http: Client,
    base_url: String,
    retry_attempts: u32,
    retry_delay: Duration,
}

impl HttpCatalogSource {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::from_settings(&Settings {
            api_base_url: base_url.into(),
            ..Settings::default()
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let base_url = settings.api_base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url)
            .with_context(|| format!("invalid catalog api base url '{base_url}'"))?;
        let http = Client::builder()
            .timeout(Duration::from_millis(settings.request_timeout_ms))
            .build()
            .context("failed to build catalog http client")?;
        Ok(Self {
            http,
            base_url,
            retry_attempts: settings.retry_attempts,
            retry_delay: Duration::from_millis(settings.retry_delay_ms),
        })
    }

    /// GET with JSON decode. Transport failures are retried up to the
    /// configured attempt count; a decoded-but-wrong response is not.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = format!("{}/{path}", self.base_url);
        let mut attempt = 0;
        loop {
            match self.try_get(&url, query).await {
                Ok(value) => return Ok(value),
                Err(err) => {
                    let retryable = matches!(err, DataSourceError::Transport(_));
                    if !retryable || attempt >= self.retry_attempts {
                        return Err(err.into());
                    }
                    attempt += 1;
                    debug!(%url, attempt, "retrying catalog request after transport error");
                    tokio::time::sleep(self.retry_delay).await;
                }
            }
        }
    }

    async fn try_get<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, DataSourceError> {
        let response = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|err| DataSourceError::Transport(err.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(DataSourceError::UnexpectedStatus {
                status: status.as_u16(),
            });
        }
        response
            .json::<T>()
            .await
            .map_err(|err| DataSourceError::Decode(err.to_string()))
    }
}

#[async_trait]
impl CatalogDataSource for HttpCatalogSource {
    async fn featured_products(&self, limit: u32) -> Result<FeaturedProductsResponse> {
        self.get_json("products/featured", &[("limit", limit.to_string())])
            .await
    }

    async fn products_by_category(&self, slug: &str) -> Result<CategoryProductsResponse> {
        self.get_json(&format!("products/category/{slug}"), &[])
            .await
    }

    async fn sections(&self) -> Result<Vec<SectionSummary>> {
        // The public sections endpoint answers with a bare JSON array.
        self.get_json("sections", &[]).await
    }
}

#[cfg(test)]
#[path = "tests/http_tests.rs"]
mod tests;
