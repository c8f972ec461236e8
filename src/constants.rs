/// Speed assumed for schedule entries without `max_speed_kmph`
pub const DEFAULT_SPEED_KMPH: f64 = 100.0;

/// Section length assumed when a descriptor omits `length_km` (MSH-BRC corridor)
pub const DEFAULT_SECTION_LENGTH_KM: f64 = 85.0;

/// Hourly capacity assumed when a descriptor omits `capacity_per_hour`
pub const DEFAULT_CAPACITY_PER_HOUR: u32 = 8;

/// No movement over a section is modeled as shorter than this
pub const MIN_TRAVEL_MINUTES: i64 = 5;

/// Required gap between one train's arrival and the next departure on a section
pub const SAFETY_BUFFER_MINUTES: i64 = 5;

/// Smallest delay ever applied to resolve a section overlap
pub const MIN_DELAY_MINUTES: i64 = 5;

/// Departures closer than this at one station contend for a platform
pub const PLATFORM_OCCUPANCY_MINUTES: i64 = 10;

/// Station code used when an entry names neither a source nor a current station
pub const DEFAULT_STATION: &str = "MSH";

/// Station with the reduced platform count
pub const HUB_STATION: &str = "MSH";

pub const HUB_PLATFORM_COUNT: usize = 4;

pub const DEFAULT_PLATFORM_COUNT: usize = 6;

/// Illustrative KM window reported for section overlaps, as fractions of section length
pub const LOCATION_WINDOW: (f64, f64) = (0.3, 0.7);

/// Label written into `resolvedBy` on every conflict record
pub const RESOLVER_LABEL: &str = "AI Optimizer";

/// Departure assumed for entries without a `departure_time`
pub const DEFAULT_DEPARTURE: &str = "00:00";
