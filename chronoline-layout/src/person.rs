//! Person records and filter state

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Local-storage key under which filter selections persist across sessions.
pub const FILTER_STORAGE_KEY: &str = "chronoline-filters";

/// One historical figure, as served by the API.
///
/// Years use astronomical numbering: negative values are BCE. The invariant
/// `birth_year <= death_year` holds for every stored record, and when a reign
/// is present it lies within the life interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: String,
    pub name: String,
    pub birth_year: i32,
    pub death_year: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reign_start: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reign_end: Option<i32>,
    pub category: String,
    /// Possibly a `/`-delimited composite of several country names.
    pub country: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub achievements: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub achievement_year_1: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub achievement_year_2: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub achievement_year_3: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Person {
    /// Individual country names: the `country` field split on `/`, trimmed.
    pub fn country_tokens(&self) -> impl Iterator<Item = &str> {
        self.country.split('/').map(str::trim).filter(|t| !t.is_empty())
    }

    /// The achievement years that are actually set, paired with their
    /// position (which aligns with the first three `achievements` entries).
    pub fn achievement_years(&self) -> Vec<(usize, i32)> {
        [
            self.achievement_year_1,
            self.achievement_year_2,
            self.achievement_year_3,
        ]
        .into_iter()
        .enumerate()
        .filter_map(|(index, year)| year.map(|y| (index, y)))
        .collect()
    }
}

/// Inclusive year range a record's life interval must overlap to pass the
/// time filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: i32,
    pub end: i32,
}

impl Default for TimeRange {
    fn default() -> Self {
        Self {
            start: -800,
            end: 2000,
        }
    }
}

/// Active filter selections, owned by the client and persisted as JSON under
/// [`FILTER_STORAGE_KEY`].
///
/// Empty category/country selections mean "no restriction".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterState {
    pub categories: Vec<String>,
    pub countries: Vec<String>,
    pub time_range: TimeRange,
    pub show_achievements: bool,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            categories: Vec::new(),
            countries: Vec::new(),
            time_range: TimeRange::default(),
            show_achievements: true,
        }
    }
}

impl FilterState {
    /// Restore persisted filters. Missing fields fall back individually;
    /// a malformed document falls back to the defaults wholesale.
    pub fn from_json(raw: &str) -> Self {
        serde_json::from_str(raw).unwrap_or_else(|e| {
            debug!(error = %e, "discarding malformed persisted filters");
            Self::default()
        })
    }

    /// Serialize for persistence.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}
