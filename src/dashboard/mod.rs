//! Dashboard View Controller
//!
//! Binds backend statistics to the dashboard widgets.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐  tick / request  ┌──────────────────────┐
//! │ RefreshScheduler │ ───────────────▶ │ DashboardController  │
//! └──────────────────┘                  │  ├─ charts (x3)      │
//!                                       │  ├─ magnitude slider │
//!          ┌──────────────┐  summary    │  ├─ event-type select│
//!          │ DashboardApi │ ──────────▶ │  └─ loading overlay  │
//!          └──────────────┘             └──────────┬───────────┘
//!                                                  │ filter
//!                                           ┌──────▼──────┐
//!                                           │ MapUpdater  │
//!                                           └─────────────┘
//! ```

pub mod charts;
pub mod controller;
pub mod loading;
pub mod refresh;

#[cfg(test)]
mod test_support;

pub use charts::DashboardChart;
pub use controller::{ControllerStatus, DashboardController};
pub use loading::{LoadingGuard, LoadingIndicator};
pub use refresh::{RefreshHandle, RefreshScheduler};
