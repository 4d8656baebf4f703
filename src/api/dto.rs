//! Data Transfer Objects
//!
//! Response types for the statistics backend endpoints, plus the
//! filter parameters shared by `/api/events` and `/api/map`.

use chrono::NaiveDate;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

// ============================================
// SUMMARY DTOs
// ============================================

/// Aggregated statistics returned by `GET /api/summary`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SummaryStats {
    /// Total number of cached events
    #[serde(default)]
    pub event_count: u64,
    /// Event count per category title
    pub categories: CountSeries,
    /// Event count per magnitude bucket
    pub magnitudes: MagnitudeBuckets,
    /// Event count per `YYYY-MM-DD` date
    pub daily_counts: CountSeries,
}

/// Fixed three-bucket magnitude histogram
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct MagnitudeBuckets {
    #[serde(default)]
    pub low: u64,
    #[serde(default)]
    pub medium: u64,
    #[serde(default)]
    pub high: u64,
}

impl MagnitudeBuckets {
    /// Bucket labels, always in `[low, medium, high]` order
    pub const LABELS: [&'static str; 3] = ["Low", "Medium", "High"];

    /// Bucket counts in `[low, medium, high]` order
    pub fn counts(&self) -> [u64; 3] {
        [self.low, self.medium, self.high]
    }

    pub fn total(&self) -> u64 {
        self.low + self.medium + self.high
    }
}

/// Label → count mapping that keeps the key order of the JSON object
/// it was decoded from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountSeries(Vec<(String, u64)>);

impl CountSeries {
    pub fn from_pairs<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, u64)>,
        K: Into<String>,
    {
        Self(pairs.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn get(&self, key: &str) -> Option<u64> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| *v)
    }

    pub fn total(&self) -> u64 {
        self.0.iter().map(|(_, v)| v).sum()
    }

    /// Copy of the series ordered by calendar date.
    ///
    /// Keys that are not `YYYY-MM-DD` dates sort after all dates, by string.
    pub fn sorted_by_date(&self) -> CountSeries {
        let mut pairs = self.0.clone();
        pairs.sort_by_cached_key(|(key, _)| {
            let date = NaiveDate::parse_from_str(key, "%Y-%m-%d").ok();
            (date.is_none(), date, key.clone())
        });
        Self(pairs)
    }
}

impl<'de> Deserialize<'de> for CountSeries {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CountSeriesVisitor;

        impl<'de> Visitor<'de> for CountSeriesVisitor {
            type Value = CountSeries;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of labels to non-negative counts")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut pairs = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, value)) = map.next_entry::<String, u64>()? {
                    pairs.push((key, value));
                }
                Ok(CountSeries(pairs))
            }
        }

        deserializer.deserialize_map(CountSeriesVisitor)
    }
}

impl Serialize for CountSeries {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

// ============================================
// CATEGORY DTOs
// ============================================

/// Category list returned by `GET /api/categories`
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct CategoryList {
    #[serde(default)]
    pub categories: Vec<Category>,
}

/// A selectable event category
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Category {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

// ============================================
// TREND DTOs
// ============================================

/// Grouping period for trend analysis
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TrendPeriod {
    Daily,
    Weekly,
    #[default]
    Monthly,
}

impl TrendPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendPeriod::Daily => "daily",
            TrendPeriod::Weekly => "weekly",
            TrendPeriod::Monthly => "monthly",
        }
    }
}

impl FromStr for TrendPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "daily" | "day" => Ok(TrendPeriod::Daily),
            "weekly" | "week" => Ok(TrendPeriod::Weekly),
            "monthly" | "month" => Ok(TrendPeriod::Monthly),
            other => Err(format!(
                "unknown period '{}' (expected daily, weekly or monthly)",
                other
            )),
        }
    }
}

impl fmt::Display for TrendPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trend analysis returned by `GET /api/trends`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TrendAnalysis {
    #[serde(default)]
    pub periods: Vec<String>,
    #[serde(default)]
    pub counts: Vec<u64>,
    #[serde(default)]
    pub trend: f64,
    #[serde(default)]
    pub average: f64,
    #[serde(default)]
    pub max: u64,
    #[serde(default)]
    pub min: u64,
}

// ============================================
// EVENT DTOs
// ============================================

/// Filtered event list returned by `GET /api/events`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct EventList {
    #[serde(default)]
    pub events: Vec<Event>,
}

/// A single natural event
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub categories: Vec<EventCategory>,
    #[serde(default)]
    pub geometry: Vec<Geometry>,
    #[serde(rename = "magnitudeValue", default)]
    pub magnitude_value: Option<f64>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EventCategory {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Geometry {
    pub date: String,
    #[serde(default)]
    pub coordinates: serde_json::Value,
}

impl Event {
    /// Title of the first listed category
    pub fn category_title(&self) -> Option<&str> {
        self.categories.first().map(|c| c.title.as_str())
    }

    /// `YYYY-MM-DD` of the first geometry entry
    pub fn date(&self) -> Option<&str> {
        self.geometry
            .first()
            .map(|g| g.date.get(..10).unwrap_or(g.date.as_str()))
    }
}

// ============================================
// FILTER
// ============================================

/// Query filter shared by the events and map endpoints
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventFilter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub event_type: Option<String>,
    pub min_magnitude: Option<f64>,
    pub max_magnitude: Option<f64>,
}

impl EventFilter {
    pub fn is_empty(&self) -> bool {
        self.query_pairs().is_empty()
    }

    /// Set parameters as `(name, value)` pairs in backend order
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();

        if let Some(start) = self.start_date {
            pairs.push(("start_date", start.format("%Y-%m-%d").to_string()));
        }
        if let Some(end) = self.end_date {
            pairs.push(("end_date", end.format("%Y-%m-%d").to_string()));
        }
        if let Some(event_type) = self.event_type.as_deref().filter(|t| !t.is_empty()) {
            pairs.push(("event_type", event_type.to_string()));
        }
        if let Some(min) = self.min_magnitude {
            pairs.push(("min_magnitude", format!("{:.1}", min)));
        }
        if let Some(max) = self.max_magnitude {
            pairs.push(("max_magnitude", format!("{:.1}", max)));
        }

        pairs
    }

    /// URL-encoded query string, including the leading `?` when non-empty
    pub fn to_query_string(&self) -> String {
        let pairs = self.query_pairs();
        if pairs.is_empty() {
            return String::new();
        }

        let encoded: Vec<String> = pairs
            .iter()
            .map(|(name, value)| format!("{}={}", name, urlencoding::encode(value)))
            .collect();

        format!("?{}", encoded.join("&"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_preserves_wire_order() {
        let json = r#"{
            "event_count": 7,
            "categories": {"Quake": 5, "Flood": 2},
            "magnitudes": {"high": 2, "low": 3, "medium": 2},
            "daily_counts": {"2024-01-02": 3, "2024-01-01": 4}
        }"#;

        let stats: SummaryStats = serde_json::from_str(json).unwrap();
        let categories: Vec<_> = stats.categories.iter().collect();
        assert_eq!(categories, vec![("Quake", 5), ("Flood", 2)]);
        assert_eq!(stats.magnitudes.counts(), [3, 2, 2]);
        assert_eq!(stats.daily_counts.get("2024-01-01"), Some(4));
        assert_eq!(stats.event_count, 7);
    }

    #[test]
    fn test_summary_missing_section_is_rejected() {
        let json = r#"{"categories": {}, "magnitudes": {"low": 0, "medium": 0, "high": 0}}"#;
        assert!(serde_json::from_str::<SummaryStats>(json).is_err());
    }

    #[test]
    fn test_negative_count_is_rejected() {
        let json = r#"{"Quake": -1}"#;
        assert!(serde_json::from_str::<CountSeries>(json).is_err());
    }

    #[test]
    fn test_sorted_by_date() {
        let series = CountSeries::from_pairs([
            ("2024-01-10", 1),
            ("unknown", 9),
            ("2024-01-02", 3),
            ("2023-12-31", 2),
        ]);

        let keys: Vec<_> = series.sorted_by_date().iter().map(|(k, _)| k.to_string()).collect();
        assert_eq!(keys, vec!["2023-12-31", "2024-01-02", "2024-01-10", "unknown"]);
        assert_eq!(series.total(), 15);
    }

    #[test]
    fn test_count_series_serializes_as_object() {
        let series = CountSeries::from_pairs([("b", 1), ("a", 2)]);
        assert_eq!(serde_json::to_string(&series).unwrap(), r#"{"b":1,"a":2}"#);
    }

    #[test]
    fn test_category_list_defaults_to_empty() {
        let list: CategoryList = serde_json::from_str("{}").unwrap();
        assert!(list.categories.is_empty());

        let list: CategoryList =
            serde_json::from_str(r#"{"categories":[{"id":"eq","title":"Earthquake"}]}"#).unwrap();
        assert_eq!(list.categories[0].id, "eq");
        assert_eq!(list.categories[0].description, None);
    }

    #[test]
    fn test_event_accessors() {
        let json = r#"{
            "id": "EONET_1",
            "title": "Wildfire - Region",
            "categories": [{"id": "wildfires", "title": "Wildfires"}],
            "geometry": [{"date": "2024-03-05T12:00:00Z", "coordinates": [10.0, 20.0]}],
            "magnitudeValue": 4.5
        }"#;

        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.category_title(), Some("Wildfires"));
        assert_eq!(event.date(), Some("2024-03-05"));
        assert_eq!(event.magnitude_value, Some(4.5));
    }

    #[test]
    fn test_trend_period_parse() {
        assert_eq!("weekly".parse::<TrendPeriod>(), Ok(TrendPeriod::Weekly));
        assert_eq!("Month".parse::<TrendPeriod>(), Ok(TrendPeriod::Monthly));
        assert!("hourly".parse::<TrendPeriod>().is_err());
        assert_eq!(TrendPeriod::default().as_str(), "monthly");
    }

    #[test]
    fn test_filter_query_string() {
        assert_eq!(EventFilter::default().to_query_string(), "");

        let filter = EventFilter {
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1),
            end_date: None,
            event_type: Some("severe storms".to_string()),
            min_magnitude: Some(2.5),
            max_magnitude: Some(10.0),
        };

        assert_eq!(
            filter.to_query_string(),
            "?start_date=2024-01-01&event_type=severe%20storms&min_magnitude=2.5&max_magnitude=10.0"
        );
    }

    #[test]
    fn test_filter_ignores_blank_event_type() {
        let filter = EventFilter {
            event_type: Some(String::new()),
            ..Default::default()
        };
        assert!(filter.is_empty());
    }
}
