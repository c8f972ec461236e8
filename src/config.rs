use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_CAPACITY_PER_HOUR, DEFAULT_PLATFORM_COUNT, DEFAULT_SECTION_LENGTH_KM, DEFAULT_SPEED_KMPH,
    DEFAULT_STATION, HUB_PLATFORM_COUNT, HUB_STATION, LOCATION_WINDOW, MIN_DELAY_MINUTES,
    MIN_TRAVEL_MINUTES, PLATFORM_OCCUPANCY_MINUTES, RESOLVER_LABEL, SAFETY_BUFFER_MINUTES,
};
use crate::error::{Error, Result};
use crate::models::StationDescriptor;

/// Tunable defaults and thresholds for conflict resolution
///
/// Every field has a default, so a partial JSON document (or `{}`) is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolverConfig {
    #[serde(default = "default_speed_kmph")]
    pub default_speed_kmph: f64,
    #[serde(default = "default_section_length_km")]
    pub default_section_length_km: f64,
    #[serde(default = "default_capacity_per_hour")]
    pub default_capacity_per_hour: u32,
    #[serde(default = "default_min_travel_minutes")]
    pub min_travel_minutes: i64,
    #[serde(default = "default_safety_buffer_minutes")]
    pub safety_buffer_minutes: i64,
    #[serde(default = "default_min_delay_minutes")]
    pub min_delay_minutes: i64,
    #[serde(default = "default_platform_occupancy_minutes")]
    pub platform_occupancy_minutes: i64,
    #[serde(default = "default_station")]
    pub default_station: String,
    #[serde(default = "default_hub_station")]
    pub hub_station: String,
    #[serde(default = "default_hub_platform_count")]
    pub hub_platform_count: usize,
    #[serde(default = "default_platform_count")]
    pub default_platform_count: usize,
    /// Per-station platform counts, taking precedence over the hub/default lookup
    #[serde(default)]
    pub platform_counts: HashMap<String, usize>,
    /// KM range reported for section overlaps, as fractions of the section length
    #[serde(default = "default_location_window")]
    pub location_window: (f64, f64),
    #[serde(default = "default_resolver_label")]
    pub resolver_label: String,
}

fn default_speed_kmph() -> f64 {
    DEFAULT_SPEED_KMPH
}

fn default_section_length_km() -> f64 {
    DEFAULT_SECTION_LENGTH_KM
}

fn default_capacity_per_hour() -> u32 {
    DEFAULT_CAPACITY_PER_HOUR
}

fn default_min_travel_minutes() -> i64 {
    MIN_TRAVEL_MINUTES
}

fn default_safety_buffer_minutes() -> i64 {
    SAFETY_BUFFER_MINUTES
}

fn default_min_delay_minutes() -> i64 {
    MIN_DELAY_MINUTES
}

fn default_platform_occupancy_minutes() -> i64 {
    PLATFORM_OCCUPANCY_MINUTES
}

fn default_station() -> String {
    DEFAULT_STATION.to_string()
}

fn default_hub_station() -> String {
    HUB_STATION.to_string()
}

fn default_hub_platform_count() -> usize {
    HUB_PLATFORM_COUNT
}

fn default_platform_count() -> usize {
    DEFAULT_PLATFORM_COUNT
}

fn default_location_window() -> (f64, f64) {
    LOCATION_WINDOW
}

fn default_resolver_label() -> String {
    RESOLVER_LABEL.to_string()
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            default_speed_kmph: default_speed_kmph(),
            default_section_length_km: default_section_length_km(),
            default_capacity_per_hour: default_capacity_per_hour(),
            min_travel_minutes: default_min_travel_minutes(),
            safety_buffer_minutes: default_safety_buffer_minutes(),
            min_delay_minutes: default_min_delay_minutes(),
            platform_occupancy_minutes: default_platform_occupancy_minutes(),
            default_station: default_station(),
            hub_station: default_hub_station(),
            hub_platform_count: default_hub_platform_count(),
            default_platform_count: default_platform_count(),
            platform_counts: HashMap::new(),
            location_window: default_location_window(),
            resolver_label: default_resolver_label(),
        }
    }
}

impl ResolverConfig {
    /// Parse and validate a JSON config document
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a value is out of range.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its contents are invalid.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Check every threshold is usable
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        let minute_fields = [
            ("min_travel_minutes", self.min_travel_minutes),
            ("safety_buffer_minutes", self.safety_buffer_minutes),
            ("min_delay_minutes", self.min_delay_minutes),
            ("platform_occupancy_minutes", self.platform_occupancy_minutes),
        ];
        for (field, value) in minute_fields {
            if value < 0 {
                return Err(invalid(field, format!("must not be negative, got {value}")));
            }
        }

        if self.default_speed_kmph.is_nan() || self.default_speed_kmph <= 0.0 {
            return Err(invalid(
                "default_speed_kmph",
                format!("must be positive, got {}", self.default_speed_kmph),
            ));
        }
        if self.default_section_length_km.is_nan() || self.default_section_length_km < 0.0 {
            return Err(invalid(
                "default_section_length_km",
                format!("must not be negative, got {}", self.default_section_length_km),
            ));
        }

        if self.hub_platform_count == 0 {
            return Err(invalid("hub_platform_count", "must be at least 1".to_string()));
        }
        if self.default_platform_count == 0 {
            return Err(invalid("default_platform_count", "must be at least 1".to_string()));
        }
        if let Some((station, _)) = self.platform_counts.iter().find(|(_, count)| **count == 0) {
            return Err(invalid(
                "platform_counts",
                format!("station {station} must have at least 1 platform"),
            ));
        }

        let (low, high) = self.location_window;
        if !(0.0..=1.0).contains(&low) || !(0.0..=1.0).contains(&high) || low > high {
            return Err(invalid(
                "location_window",
                format!("expected 0 <= low <= high <= 1, got ({low}, {high})"),
            ));
        }

        Ok(())
    }

    /// Record each station's platform count as an override
    #[must_use]
    pub fn with_stations(mut self, stations: &[StationDescriptor]) -> Self {
        for station in stations {
            self.platform_counts
                .insert(station.station_id.clone(), station.num_platforms.max(1));
        }
        self
    }

    /// Platforms available at `station`: override, then hub, then default; never below 1
    #[must_use]
    pub fn platform_count(&self, station: &str) -> usize {
        let count = if let Some(&count) = self.platform_counts.get(station) {
            count
        } else if station == self.hub_station {
            self.hub_platform_count
        } else {
            self.default_platform_count
        };
        count.max(1)
    }
}

fn invalid(field: &'static str, reason: String) -> Error {
    Error::InvalidConfig { field, reason }
}
