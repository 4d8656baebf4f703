//! Statistics Backend API
//!
//! Client side of the read-only backend that aggregates natural events.
//!
//! # Endpoints
//!
//! - `GET /api/summary` - Category, magnitude and daily event counts
//! - `GET /api/categories` - Selectable event categories
//! - `GET /api/trends` - Event frequency per period
//! - `GET /api/events` - Filtered event list
//! - `GET /api/map` - Server-rendered map HTML for a filter
//!
//! Non-2xx responses, transport failures and malformed bodies all
//! surface as [`FetchError`].

pub mod client;
pub mod dto;
pub mod error;

pub use client::{DashboardApi, DashboardClient};
pub use dto::{
    Category, CategoryList, CountSeries, Event, EventFilter, EventList, MagnitudeBuckets,
    SummaryStats, TrendAnalysis, TrendPeriod,
};
pub use error::{FetchError, FetchResult};
