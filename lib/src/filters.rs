// lib/src/filters.rs

//! Single-select list filters, the search bar's multi-select toggle set and
//! the map viewport.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};
use tracing::debug;

use models::{BloodType, Classification, DistanceRange, ModelError, SearchUrgency};

/// Reserved filter value that selects every record.
pub const ALL_SENTINEL: &str = "all";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Selection<T> {
    #[default]
    All,
    Only(T),
}

impl<T: Copy + PartialEq> Selection<T> {
    pub fn matches(&self, value: T) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(selected) => *selected == value,
        }
    }
}

impl<T: Classification> Selection<T> {
    pub fn code(&self) -> &'static str {
        match self {
            Selection::All => ALL_SENTINEL,
            Selection::Only(value) => value.code(),
        }
    }

    /// Parses a query value; empty or `all` selects everything.
    pub fn parse(raw: Option<&str>) -> Result<Self, ModelError> {
        match raw.map(str::trim) {
            None | Some("") | Some(ALL_SENTINEL) => Ok(Selection::All),
            Some(code) => T::parse_code(code)
                .map(Selection::Only)
                .ok_or_else(|| ModelError::unknown(T::KIND, code)),
        }
    }
}

impl<T: Classification> Serialize for Selection<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

/// Order-preserving subsequence of `items` whose key matches `selection`.
pub fn filter_by<'a, T, C, F>(items: &'a [T], selection: Selection<C>, key: F) -> Vec<&'a T>
where
    C: Copy + PartialEq,
    F: Fn(&T) -> C,
{
    items.iter().filter(|item| selection.matches(key(item))).collect()
}

/// Small set with toggle semantics. Iterates in the order values were first
/// selected and never holds duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToggleSet<T> {
    values: Vec<T>,
}

impl<T> Default for ToggleSet<T> {
    fn default() -> Self {
        ToggleSet { values: Vec::new() }
    }
}

impl<T: Copy + PartialEq> ToggleSet<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, value: T) -> bool {
        self.values.contains(&value)
    }

    /// Returns false when the value was already present.
    pub fn insert(&mut self, value: T) -> bool {
        if self.contains(value) {
            return false;
        }
        self.values.push(value);
        true
    }

    /// Returns false when the value was absent.
    pub fn remove(&mut self, value: T) -> bool {
        let before = self.values.len();
        self.values.retain(|selected| *selected != value);
        before != self.values.len()
    }

    /// Flips membership and reports whether the value is now selected.
    pub fn toggle(&mut self, value: T) -> bool {
        if self.remove(value) {
            false
        } else {
            self.values.push(value);
            true
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        self.values.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<T: Copy + PartialEq> FromIterator<T> for ToggleSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = ToggleSet::new();
        for value in iter {
            set.insert(value);
        }
        set
    }
}

/// State of the dashboard search bar.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilters {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub blood_type: Option<BloodType>,
    #[serde(default)]
    pub distance: Option<DistanceRange>,
    #[serde(default)]
    pub urgency: ToggleSet<SearchUrgency>,
}

/// One interaction with the search bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "value", rename_all = "camelCase")]
pub enum FilterChange {
    SetQuery(String),
    SetBloodType(Option<BloodType>),
    SetDistance(Option<DistanceRange>),
    ToggleUrgency(SearchUrgency),
    Clear,
}

impl SearchFilters {
    pub fn apply(&mut self, change: FilterChange) {
        debug!(?change, "Applying search filter change");
        match change {
            FilterChange::SetQuery(query) => self.query = query,
            FilterChange::SetBloodType(blood_type) => self.blood_type = blood_type,
            FilterChange::SetDistance(distance) => self.distance = distance,
            FilterChange::ToggleUrgency(level) => {
                self.urgency.toggle(level);
            }
            FilterChange::Clear => *self = SearchFilters::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.query.trim().is_empty()
            && self.blood_type.is_none()
            && self.distance.is_none()
            && self.urgency.is_empty()
    }
}

impl fmt::Display for SearchFilters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let urgency: Vec<_> = self.urgency.iter().map(|level| level.code()).collect();
        write!(
            f,
            "query='{}' blood_type={} distance={} urgency=[{}]",
            self.query,
            self.blood_type.map(|b| b.code()).unwrap_or("-"),
            self.distance.map(|d| d.code()).unwrap_or("-"),
            urgency.join(",")
        )
    }
}

pub const DEFAULT_MAP_ZOOM: u8 = 13;
pub const MIN_MAP_ZOOM: u8 = 10;
pub const MAX_MAP_ZOOM: u8 = 18;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MapViewport {
    pub zoom: u8,
}

impl Default for MapViewport {
    fn default() -> Self {
        MapViewport { zoom: DEFAULT_MAP_ZOOM }
    }
}

impl MapViewport {
    pub fn with_zoom(zoom: u8) -> Self {
        MapViewport {
            zoom: zoom.clamp(MIN_MAP_ZOOM, MAX_MAP_ZOOM),
        }
    }

    pub fn zoom_in(&mut self) -> u8 {
        self.zoom = self.zoom.saturating_add(1).min(MAX_MAP_ZOOM);
        self.zoom
    }

    pub fn zoom_out(&mut self) -> u8 {
        self.zoom = self.zoom.saturating_sub(1).max(MIN_MAP_ZOOM);
        self.zoom
    }
}

impl FromStr for FilterChange {
    type Err = serde_json::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_str(s)
    }
}
