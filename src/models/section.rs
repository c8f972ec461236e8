use serde::{Deserialize, Serialize};

/// Static capacity facts about one track section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionDescriptor {
    pub section_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length_km: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity_per_hour: Option<u32>,
    // Carried for callers; not interpreted by conflict detection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintenance_start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintenance_end: Option<String>,
}

impl SectionDescriptor {
    #[must_use]
    pub fn new(section_id: impl Into<String>) -> Self {
        Self {
            section_id: section_id.into(),
            track_id: None,
            length_km: None,
            capacity_per_hour: None,
            maintenance_start: None,
            maintenance_end: None,
        }
    }

    #[must_use]
    pub fn with_length(mut self, length_km: f64) -> Self {
        self.length_km = Some(length_km);
        self
    }

    #[must_use]
    pub fn with_capacity(mut self, capacity_per_hour: u32) -> Self {
        self.capacity_per_hour = Some(capacity_per_hour);
        self
    }
}
