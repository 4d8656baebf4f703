//! Statistics Backend Client
//!
//! HTTP client for the read-only dashboard endpoints.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use super::dto::{CategoryList, EventFilter, EventList, SummaryStats, TrendAnalysis, TrendPeriod};
use super::error::{FetchError, FetchResult};
use crate::config::ApiConfig;

/// Data source consumed by the dashboard controller
#[async_trait]
pub trait DashboardApi: Send + Sync {
    /// `GET /api/summary`
    async fn fetch_summary(&self) -> FetchResult<SummaryStats>;

    /// `GET /api/categories`
    async fn fetch_categories(&self) -> FetchResult<CategoryList>;
}

/// `reqwest`-backed client for the statistics backend
#[derive(Debug, Clone)]
pub struct DashboardClient {
    client: Client,
    base_url: String,
}

impl DashboardClient {
    /// Create a client for the configured backend
    pub fn new(config: &ApiConfig) -> FetchResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(FetchError::Network)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a GET request and reject non-2xx responses
    async fn get(&self, path: &str) -> FetchResult<Response> {
        let url = self.url(path);
        tracing::debug!(url = %url, "GET");

        let response = self.client.get(&url).send().await?;

        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            Err(FetchError::Status {
                status: status.as_u16(),
                message: if text.is_empty() {
                    status.canonical_reason().unwrap_or("Unknown error").to_string()
                } else {
                    text
                },
            })
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> FetchResult<T> {
        let body = self.get(path).await?.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Fetch event-frequency trends, optionally for one category
    pub async fn fetch_trends(
        &self,
        category: Option<&str>,
        period: TrendPeriod,
    ) -> FetchResult<TrendAnalysis> {
        let mut path = format!("/api/trends?period={}", period.as_str());
        if let Some(category) = category {
            path.push_str(&format!("&category={}", urlencoding::encode(category)));
        }
        self.get_json(&path).await
    }

    /// Fetch the events matching a filter
    pub async fn fetch_events(&self, filter: &EventFilter) -> FetchResult<EventList> {
        self.get_json(&format!("/api/events{}", filter.to_query_string()))
            .await
    }

    /// Fetch the server-rendered map HTML for a filter
    pub async fn fetch_map(&self, filter: &EventFilter) -> FetchResult<String> {
        let response = self
            .get(&format!("/api/map{}", filter.to_query_string()))
            .await?;
        Ok(response.text().await?)
    }
}

#[async_trait]
impl DashboardApi for DashboardClient {
    async fn fetch_summary(&self) -> FetchResult<SummaryStats> {
        self.get_json("/api/summary").await
    }

    async fn fetch_categories(&self) -> FetchResult<CategoryList> {
        self.get_json("/api/categories").await
    }
}
