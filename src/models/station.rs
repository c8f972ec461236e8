use serde::{Deserialize, Serialize};

/// Station catalogue record; `num_platforms` can override the platform lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationDescriptor {
    pub station_id: String,
    #[serde(default)]
    pub name: String,
    pub num_platforms: usize,
    #[serde(default)]
    pub avg_dwell_min: u32,
}
