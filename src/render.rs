//! Text Rendering
//!
//! Plain-text views of headless dashboards and backend responses, used by
//! the command-line front end.

use std::fmt::Write;

use crate::api::{CategoryList, EventList, SummaryStats, TrendAnalysis};
use crate::dashboard::{ControllerStatus, DashboardChart};
use crate::headless::{ChartSnapshot, HeadlessChartFactory, HeadlessPage};

/// Width of the longest bar
pub const BAR_WIDTH: usize = 40;

/// Render a chart as one horizontal bar per label, scaled to the largest value
pub fn render_chart(snapshot: &ChartSnapshot, width: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", snapshot.title, snapshot.kind.as_str());
    let _ = writeln!(out, "{}", "-".repeat(width + 24));

    if snapshot.data.is_empty() {
        out.push_str("  (no data)\n");
        return out;
    }

    let label_width = snapshot
        .data
        .labels()
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0)
        .min(20);
    let max = snapshot.data.max_value().unwrap_or(0.0);

    for (label, value) in snapshot.data.points() {
        let filled = if max > 0.0 {
            ((value / max) * width as f64).round() as usize
        } else {
            0
        };
        let label: String = label.chars().take(label_width).collect();
        let _ = writeln!(
            out,
            "  {:<lw$} |{:<w$}| {}",
            label,
            "#".repeat(filled.min(width)),
            value,
            lw = label_width,
            w = width
        );
    }

    out
}

/// Render every chart plus the filter controls and controller status
pub fn render_dashboard(
    charts: &HeadlessChartFactory,
    page: &HeadlessPage,
    status: &ControllerStatus,
) -> String {
    let mut out = String::new();

    for chart in DashboardChart::ALL {
        match charts.snapshot(chart.mount_id()) {
            Some(snapshot) => out.push_str(&render_chart(&snapshot, BAR_WIDTH)),
            None => {
                let _ = writeln!(out, "{}: not initialized", chart.mount_id());
            }
        }
        out.push('\n');
    }

    let _ = writeln!(out, "Magnitude: {}", page.magnitude_values.text());

    let options = page.event_type.options();
    let types: Vec<&str> = std::iter::once("All Events")
        .chain(options.iter().map(|o| o.label.as_str()))
        .collect();
    let _ = writeln!(out, "Event types: {}", types.join(", "));

    let refreshed = status
        .last_refresh
        .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "never".to_string());
    let _ = writeln!(
        out,
        "Refreshes: {} (last: {})  Failures: {}",
        status.refreshes, refreshed, status.failures
    );
    if let Some(error) = &status.last_error {
        let _ = writeln!(out, "Last error: {}", error);
    }

    out
}

pub fn summary_table(stats: &SummaryStats) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Events: {}", stats.event_count);
    let _ = writeln!(out);

    let _ = writeln!(out, "{:<30} {:>8}", "Category", "Count");
    let _ = writeln!(out, "{}", "-".repeat(39));
    for (title, count) in stats.categories.iter() {
        let _ = writeln!(out, "{:<30} {:>8}", title, count);
    }
    let _ = writeln!(out, "{:<30} {:>8}", "Total", stats.categories.total());
    let _ = writeln!(out);

    let _ = writeln!(out, "{:<30} {:>8}", "Magnitude", "Count");
    let _ = writeln!(out, "{}", "-".repeat(39));
    for (label, count) in crate::api::MagnitudeBuckets::LABELS
        .iter()
        .zip(stats.magnitudes.counts())
    {
        let _ = writeln!(out, "{:<30} {:>8}", label, count);
    }
    let _ = writeln!(out, "{:<30} {:>8}", "Total", stats.magnitudes.total());
    let _ = writeln!(out);

    let _ = writeln!(out, "{:<30} {:>8}", "Date", "Count");
    let _ = writeln!(out, "{}", "-".repeat(39));
    for (date, count) in stats.daily_counts.sorted_by_date().iter() {
        let _ = writeln!(out, "{:<30} {:>8}", date, count);
    }

    out
}

pub fn categories_table(list: &CategoryList) -> String {
    if list.categories.is_empty() {
        return "No categories available.\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(out, "{:<20} {}", "ID", "Title");
    let _ = writeln!(out, "{}", "-".repeat(50));
    for category in &list.categories {
        let _ = writeln!(out, "{:<20} {}", category.id, category.title);
    }
    out
}

pub fn trends_table(trends: &TrendAnalysis) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<12} {:>8}", "Period", "Count");
    let _ = writeln!(out, "{}", "-".repeat(21));
    for (period, count) in trends.periods.iter().zip(&trends.counts) {
        let _ = writeln!(out, "{:<12} {:>8}", period, count);
    }
    let _ = writeln!(out);

    let direction = if trends.trend > 0.0 {
        "rising"
    } else if trends.trend < 0.0 {
        "falling"
    } else {
        "flat"
    };
    let _ = writeln!(
        out,
        "Trend: {:+.2} ({})  Average: {:.1}  Min: {}  Max: {}",
        trends.trend, direction, trends.average, trends.min, trends.max
    );
    out
}

pub fn events_table(list: &EventList) -> String {
    if list.events.is_empty() {
        return "No events match the filter.\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<10} {:<20} {:>9}  {}",
        "Date", "Category", "Magnitude", "Title"
    );
    let _ = writeln!(out, "{}", "-".repeat(72));
    for event in &list.events {
        let magnitude = event
            .magnitude_value
            .map(|m| format!("{:.1}", m))
            .unwrap_or_else(|| "-".to_string());
        let _ = writeln!(
            out,
            "{:<10} {:<20} {:>9}  {}",
            event.date().unwrap_or("-"),
            event.category_title().unwrap_or("-"),
            magnitude,
            event.title
        );
    }
    let _ = writeln!(out, "\n{} events", list.events.len());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::{ChartConfig, ChartData, ChartFactory, ChartKind, SelectControl, StatusText};

    fn snapshot(data: ChartData) -> ChartSnapshot {
        ChartSnapshot {
            mount_id: "categoryChart".to_string(),
            kind: ChartKind::Doughnut,
            title: "Events by Category".to_string(),
            data,
            colors: Vec::new(),
            redraws: 0,
            generation: 1,
        }
    }

    #[test]
    fn test_bars_scale_to_max() {
        let text = render_chart(
            &snapshot(ChartData::from_points([("Quake", 4.0), ("Flood", 2.0)])),
            10,
        );
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Events by Category (doughnut)");
        assert_eq!(lines[2], "  Quake |##########| 4");
        assert_eq!(lines[3], "  Flood |#####     | 2");
    }

    #[test]
    fn test_empty_chart() {
        let text = render_chart(&snapshot(ChartData::default()), 10);
        assert!(text.contains("(no data)"));
    }

    #[test]
    fn test_all_zero_values() {
        let text = render_chart(&snapshot(ChartData::from_points([("Low", 0.0)])), 4);
        assert!(text.contains("  Low |    | 0"));
    }

    #[test]
    fn test_dashboard_view() {
        let charts = HeadlessChartFactory::new();
        charts
            .create(
                "magnitudeChart",
                ChartConfig::new(ChartKind::Bar, "Events by Magnitude"),
                ChartData::from_points([("Low", 3.0)]),
            )
            .unwrap();
        let page = HeadlessPage::new();
        page.magnitude_values.set_text("0.0 - 10.0");
        page.event_type.append_option("eq", "Earthquakes");

        let text = render_dashboard(&charts, &page, &ControllerStatus::default());

        assert!(text.contains("categoryChart: not initialized"));
        assert!(text.contains("Events by Magnitude (bar)"));
        assert!(text.contains("Magnitude: 0.0 - 10.0"));
        assert!(text.contains("Event types: All Events, Earthquakes"));
        assert!(text.contains("Refreshes: 0 (last: never)  Failures: 0"));
    }

    #[test]
    fn test_dashboard_view_without_categories() {
        let text = render_dashboard(
            &HeadlessChartFactory::new(),
            &HeadlessPage::new(),
            &ControllerStatus::default(),
        );
        assert!(text.contains("Event types: All Events\n"));
    }

    #[test]
    fn test_summary_table_sorts_dates() {
        let stats: SummaryStats = serde_json::from_str(
            r#"{
                "event_count": 7,
                "categories": {"Quake": 5, "Flood": 2},
                "magnitudes": {"low": 3, "medium": 2, "high": 2},
                "daily_counts": {"2024-01-02": 3, "2024-01-01": 4}
            }"#,
        )
        .unwrap();

        let text = summary_table(&stats);
        assert!(text.starts_with("Events: 7"));
        assert_eq!(text.matches(&format!("{:<30} {:>8}", "Total", 7)).count(), 2);
        let first = text.find("2024-01-01").unwrap();
        let second = text.find("2024-01-02").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_trend_direction() {
        let trends: TrendAnalysis = serde_json::from_str(
            r#"{"periods": ["2024-01", "2024-02"], "counts": [3, 5], "trend": 2.0, "average": 4.0, "max": 5, "min": 3}"#,
        )
        .unwrap();
        let text = trends_table(&trends);
        assert!(text.contains("Trend: +2.00 (rising)"));
        assert!(text.contains("2024-02"));
    }

    #[test]
    fn test_events_table() {
        let list: EventList = serde_json::from_str(
            r#"{"events": [{
                "id": "EONET_1",
                "title": "Wildfire near Town",
                "categories": [{"id": "wildfires", "title": "Wildfires"}],
                "geometry": [{"date": "2024-03-01T00:00:00Z", "coordinates": [1.0, 2.0]}],
                "magnitudeValue": 4.25
            }]}"#,
        )
        .unwrap();

        let text = events_table(&list);
        assert!(text.contains("2024-03-01"));
        assert!(text.contains("Wildfires"));
        assert!(text.contains("4.2") || text.contains("4.3"));
        assert!(text.contains("1 events"));

        assert_eq!(events_table(&EventList::default()), "No events match the filter.\n");
    }
}
