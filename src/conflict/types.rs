//! Core types for conflict records.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConflictKind {
    SectionOverlap,   // Later departure within the safety buffer of an earlier arrival
    PlatformConflict, // Departures too close together for the station's platforms
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,   // Trains actually overlap on the section
    Medium, // Safety buffer violated only
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConflictRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ConflictKind,
    pub severity: Severity,
    // Earlier-scheduled trains first, the train being checked last
    pub trains: Vec<String>,
    pub location: String,
    #[serde(rename = "resolvedBy")]
    pub resolved_by: String,
    pub suggestion: String,
    #[serde(with = "timestamp_serde")]
    pub timestamp: NaiveTime,
    // Section overlaps only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predicted_delay: Option<i64>,
}

impl ConflictRecord {
    /// Whether `train_id` is one of the trains involved
    #[must_use]
    pub fn involves(&self, train_id: &str) -> bool {
        self.trains.iter().any(|t| t == train_id)
    }

    /// Get a short name for the conflict kind
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self.kind {
            ConflictKind::SectionOverlap => "Section Overlap",
            ConflictKind::PlatformConflict => "Platform Conflict",
        }
    }
}

/// Format a per-call ordinal as a conflict id (`C001`, `C002`, ...)
#[must_use]
pub fn conflict_id(ordinal: usize) -> String {
    format!("C{ordinal:03}")
}

mod timestamp_serde {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M:%S";

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&time.format(FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&s, FORMAT).map_err(serde::de::Error::custom)
    }
}
