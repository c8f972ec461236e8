use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::conflict::ConflictRecord;
use crate::constants::DEFAULT_DEPARTURE;
use crate::time::{parse_clock_minutes, shift_departure};

/// One planned train movement, as supplied by the caller
///
/// Unknown fields are kept in `extra` and written back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub train_id: String,
    #[serde(default = "default_departure")]
    pub departure_time: String,
    #[serde(default, alias = "section", skip_serializing_if = "Option::is_none")]
    pub section_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, rename = "currentStation", skip_serializing_if = "Option::is_none")]
    pub current_station: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_speed_kmph: Option<f64>,
    // Written by the resolver
    #[serde(default)]
    pub conflicts: Vec<ConflictRecord>,
    #[serde(default, alias = "ai_resolved")]
    pub resolved: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay_reason: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_departure() -> String {
    DEFAULT_DEPARTURE.to_string()
}

impl ScheduleEntry {
    #[must_use]
    pub fn new(train_id: impl Into<String>, departure_time: impl Into<String>) -> Self {
        Self {
            train_id: train_id.into(),
            departure_time: departure_time.into(),
            section_id: None,
            source: None,
            current_station: None,
            destination: None,
            route: None,
            max_speed_kmph: None,
            conflicts: Vec::new(),
            resolved: false,
            delay_reason: None,
            extra: Map::new(),
        }
    }

    #[must_use]
    pub fn on_section(mut self, section_id: impl Into<String>) -> Self {
        self.section_id = Some(section_id.into());
        self
    }

    #[must_use]
    pub fn from_station(mut self, station: impl Into<String>) -> Self {
        self.source = Some(station.into());
        self
    }

    #[must_use]
    pub fn with_speed(mut self, max_speed_kmph: f64) -> Self {
        self.max_speed_kmph = Some(max_speed_kmph);
        self
    }

    /// Departure as minutes since midnight (`0` when unparseable)
    #[must_use]
    pub fn departure_minutes(&self) -> i64 {
        parse_clock_minutes(&self.departure_time)
    }

    /// Section id, treating an empty string as absent
    #[must_use]
    pub fn section_key(&self) -> Option<&str> {
        self.section_id.as_deref().filter(|s| !s.is_empty())
    }

    /// Station this entry occupies a platform at: `source`, then `currentStation`, then `default`
    #[must_use]
    pub fn station_or<'a>(&'a self, default: &'a str) -> &'a str {
        [self.source.as_deref(), self.current_station.as_deref()]
            .into_iter()
            .flatten()
            .find(|s| !s.is_empty())
            .unwrap_or(default)
    }

    #[must_use]
    pub fn speed_or(&self, default_kmph: f64) -> f64 {
        self.max_speed_kmph.unwrap_or(default_kmph)
    }

    /// Push the departure back by `delay_minutes` and record why
    pub fn apply_delay(&mut self, delay_minutes: i64, reason: String) {
        self.departure_time = shift_departure(&self.departure_time, delay_minutes);
        self.resolved = true;
        self.delay_reason = Some(reason);
    }
}
