//! Event Map Collaborator
//!
//! The map view is owned elsewhere. The dashboard only asks it to refresh
//! for the current filter and waits for the outcome.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::api::{DashboardClient, EventFilter, FetchError};

/// Errors reported by a map refresh
#[derive(Error, Debug)]
pub enum MapError {
    #[error("Map fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("Map rendering failed: {0}")]
    Render(String),
}

/// Refreshes the event map for a filter
#[async_trait]
pub trait MapUpdater: Send + Sync {
    async fn update_map(&self, filter: &EventFilter) -> Result<(), MapError>;
}

/// Most recently fetched map
#[derive(Debug, Clone)]
pub struct MapSnapshot {
    pub html: String,
    pub filter: EventFilter,
    pub fetched_at: DateTime<Utc>,
}

/// Map updater backed by the server-rendered `/api/map` endpoint
pub struct HttpMapUpdater {
    client: Arc<DashboardClient>,
    latest: RwLock<Option<MapSnapshot>>,
}

impl HttpMapUpdater {
    pub fn new(client: Arc<DashboardClient>) -> Self {
        Self {
            client,
            latest: RwLock::new(None),
        }
    }

    pub async fn latest(&self) -> Option<MapSnapshot> {
        self.latest.read().await.clone()
    }
}

#[async_trait]
impl MapUpdater for HttpMapUpdater {
    async fn update_map(&self, filter: &EventFilter) -> Result<(), MapError> {
        let html = self.client.fetch_map(filter).await?;
        if html.trim().is_empty() {
            return Err(MapError::Render("backend returned an empty map".to_string()));
        }

        tracing::debug!(bytes = html.len(), "Map refreshed");

        *self.latest.write().await = Some(MapSnapshot {
            html,
            filter: filter.clone(),
            fetched_at: Utc::now(),
        });

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;
    use axum::routing::get;
    use axum::Router;

    async fn updater_for(router: Router) -> HttpMapUpdater {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        let client = DashboardClient::new(&ApiConfig {
            base_url: format!("http://{}", addr),
            request_timeout_secs: 5,
        })
        .unwrap();
        HttpMapUpdater::new(Arc::new(client))
    }

    #[tokio::test]
    async fn test_update_stores_snapshot() {
        let updater =
            updater_for(Router::new().route("/api/map", get(|| async { "<div>map</div>" }))).await;
        assert!(updater.latest().await.is_none());

        let filter = EventFilter {
            min_magnitude: Some(2.0),
            ..Default::default()
        };
        updater.update_map(&filter).await.unwrap();

        let snapshot = updater.latest().await.unwrap();
        assert_eq!(snapshot.html, "<div>map</div>");
        assert_eq!(snapshot.filter, filter);
    }

    #[tokio::test]
    async fn test_empty_map_is_error() {
        let updater = updater_for(Router::new().route("/api/map", get(|| async { "  " }))).await;
        let result = updater.update_map(&EventFilter::default()).await;
        assert!(matches!(result, Err(MapError::Render(_))));
        assert!(updater.latest().await.is_none());
    }

    #[tokio::test]
    async fn test_fetch_failure_propagates() {
        let updater = updater_for(Router::new()).await;
        let result = updater.update_map(&EventFilter::default()).await;
        assert!(matches!(result, Err(MapError::Fetch(FetchError::Status { status: 404, .. }))));
    }
}
