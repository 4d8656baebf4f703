//! Summary → chart transforms
//!
//! Each dashboard chart has a fixed mount point, a fixed visual
//! configuration and a pure function from [`SummaryStats`] to [`ChartData`].

use crate::api::{MagnitudeBuckets, SummaryStats};
use crate::widgets::page::{CATEGORY_CHART, FREQUENCY_CHART, MAGNITUDE_CHART};
use crate::widgets::{ChartConfig, ChartData, ChartKind, LegendPosition};

/// Doughnut slice palette, cycled when there are more categories
const CATEGORY_COLORS: [&str; 9] = [
    "#FF6384", // Red
    "#36A2EB", // Blue
    "#FFCE56", // Yellow
    "#4BC0C0", // Teal
    "#9966FF", // Purple
    "#FF9F40", // Orange
    "#8BC34A", // Green
    "#795548", // Brown
    "#607D8B", // Slate
];

/// Low / medium / high, same ramp as the map markers
const MAGNITUDE_COLORS: [&str; 3] = ["#FFEB3B", "#FF9800", "#F44336"];

const FREQUENCY_COLOR: &str = "#2196F3";

/// The three charts on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardChart {
    Category,
    Magnitude,
    Frequency,
}

impl DashboardChart {
    pub const ALL: [DashboardChart; 3] = [
        DashboardChart::Category,
        DashboardChart::Magnitude,
        DashboardChart::Frequency,
    ];

    pub fn mount_id(&self) -> &'static str {
        match self {
            DashboardChart::Category => CATEGORY_CHART,
            DashboardChart::Magnitude => MAGNITUDE_CHART,
            DashboardChart::Frequency => FREQUENCY_CHART,
        }
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            DashboardChart::Category => 0,
            DashboardChart::Magnitude => 1,
            DashboardChart::Frequency => 2,
        }
    }

    /// Fixed visual configuration.
    ///
    /// The doughnut gets the whole palette; slices past its end reuse it
    /// from the start, including categories that first appear on update.
    pub fn config(&self) -> ChartConfig {
        match self {
            DashboardChart::Category => ChartConfig::new(ChartKind::Doughnut, "Events by Category")
                .dataset_label("Events")
                .colors(CATEGORY_COLORS)
                .legend(LegendPosition::Right),
            DashboardChart::Magnitude => {
                ChartConfig::new(ChartKind::Bar, "Events by Magnitude")
                    .dataset_label("Number of Events")
                    .colors(MAGNITUDE_COLORS)
                    .legend(LegendPosition::Hidden)
                    .begin_at_zero(true)
            }
            DashboardChart::Frequency => ChartConfig::new(ChartKind::Line, "Daily Event Frequency")
                .dataset_label("Events per Day")
                .colors([FREQUENCY_COLOR])
                .legend(LegendPosition::Top)
                .begin_at_zero(true)
                .tension(0.1),
        }
    }

    pub fn data(&self, stats: &SummaryStats) -> ChartData {
        match self {
            DashboardChart::Category => category_data(stats),
            DashboardChart::Magnitude => magnitude_data(stats),
            DashboardChart::Frequency => frequency_data(stats),
        }
    }
}

/// One slice per category, in the order the backend listed them
pub fn category_data(stats: &SummaryStats) -> ChartData {
    ChartData::from_points(
        stats
            .categories
            .iter()
            .map(|(title, count)| (title, count as f64)),
    )
}

/// Exactly three bars, `[low, medium, high]`
pub fn magnitude_data(stats: &SummaryStats) -> ChartData {
    ChartData::from_points(
        MagnitudeBuckets::LABELS
            .into_iter()
            .zip(stats.magnitudes.counts())
            .map(|(label, count)| (label, count as f64)),
    )
}

/// Daily counts in calendar order
pub fn frequency_data(stats: &SummaryStats) -> ChartData {
    ChartData::from_points(
        stats
            .daily_counts
            .sorted_by_date()
            .iter()
            .map(|(date, count)| (date, count as f64)),
    )
}
