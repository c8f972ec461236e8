mod platform;
mod section;
mod types;

pub use types::{conflict_id, ConflictKind, ConflictRecord, Severity};

use crate::config::ResolverConfig;
use crate::models::{ScheduleEntry, SectionDescriptor};
use chrono::NaiveTime;
use std::collections::HashMap;

/// Section facts with defaults already applied
#[derive(Debug, Clone, Copy)]
struct SectionInfo {
    length_km: f64,
    capacity_per_hour: u32,
}

/// Read-only inputs shared by both detection passes
#[derive(Debug, Clone)]
pub struct ResolutionContext {
    sections: HashMap<String, SectionInfo>,
    config: ResolverConfig,
}

impl ResolutionContext {
    /// Index `sections` by id, resolving missing lengths and capacities from `config`
    ///
    /// When an id appears more than once the last descriptor wins.
    #[must_use]
    pub fn new(sections: &[SectionDescriptor], config: ResolverConfig) -> Self {
        let sections = sections
            .iter()
            .map(|section| {
                let info = SectionInfo {
                    length_km: section.length_km.unwrap_or(config.default_section_length_km),
                    capacity_per_hour: section
                        .capacity_per_hour
                        .unwrap_or(config.default_capacity_per_hour),
                };
                (section.section_id.clone(), info)
            })
            .collect();

        Self { sections, config }
    }

    #[must_use]
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Effective length of a known section
    #[must_use]
    pub fn section_length_km(&self, section_id: &str) -> Option<f64> {
        self.sections.get(section_id).map(|info| info.length_km)
    }

    /// Effective hourly capacity of a known section
    #[must_use]
    pub fn section_capacity(&self, section_id: &str) -> Option<u32> {
        self.sections.get(section_id).map(|info| info.capacity_per_hour)
    }

    fn section(&self, section_id: &str) -> Option<SectionInfo> {
        self.sections.get(section_id).copied()
    }
}

/// Conflicts found by one resolution call, in emission order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    pub conflicts: Vec<ConflictRecord>,
}

impl Resolution {
    #[must_use]
    pub fn total_conflicts(&self) -> usize {
        self.conflicts.len()
    }

    pub fn of_kind(&self, kind: ConflictKind) -> impl Iterator<Item = &ConflictRecord> {
        self.conflicts.iter().filter(move |c| c.kind == kind)
    }
}

/// Accumulates records and hands out call-local sequential ids
struct ConflictResults<'a> {
    conflicts: Vec<ConflictRecord>,
    detected_at: NaiveTime,
    resolver_label: &'a str,
}

impl<'a> ConflictResults<'a> {
    fn new(detected_at: NaiveTime, resolver_label: &'a str) -> Self {
        Self {
            conflicts: Vec::new(),
            detected_at,
            resolver_label,
        }
    }

    fn push(
        &mut self,
        kind: ConflictKind,
        severity: Severity,
        trains: Vec<String>,
        location: String,
        suggestion: String,
        predicted_delay: Option<i64>,
    ) {
        let record = ConflictRecord {
            id: conflict_id(self.conflicts.len() + 1),
            kind,
            severity,
            trains,
            location,
            resolved_by: self.resolver_label.to_string(),
            suggestion,
            timestamp: self.detected_at,
            predicted_delay,
        };
        crate::debug_log!(
            "{} {} ({:?}) {:?} at {}",
            record.id,
            record.type_name(),
            record.severity,
            record.trains,
            record.location
        );

        self.conflicts.push(record);
    }
}

/// Detect section overlaps and platform contention, delaying trains to resolve overlaps
///
/// Runs the section-overlap pass (which rewrites departures of delayed
/// trains in place) and then the platform pass against the adjusted
/// schedule. Every entry's `conflicts` is replaced with the records naming
/// its train. `detected_at` is stamped on every record; nothing else
/// depends on wall-clock time.
pub fn detect_and_resolve_conflicts(
    schedule: &mut [ScheduleEntry],
    ctx: &ResolutionContext,
    detected_at: NaiveTime,
) -> Resolution {
    let mut results = ConflictResults::new(detected_at, &ctx.config.resolver_label);

    #[cfg(feature = "perf_timing")]
    let section_start = std::time::Instant::now();

    section::check_section_overlaps(schedule, ctx, &mut results);
    let section_count = results.conflicts.len();

    #[cfg(feature = "perf_timing")]
    log::info!("Section-overlap pass: {:?}", section_start.elapsed());

    #[cfg(feature = "perf_timing")]
    let platform_start = std::time::Instant::now();

    platform::check_platform_conflicts(schedule, ctx, &mut results);

    #[cfg(feature = "perf_timing")]
    log::info!("Platform pass: {:?}", platform_start.elapsed());

    for entry in schedule.iter_mut() {
        entry.conflicts = results
            .conflicts
            .iter()
            .filter(|c| c.involves(&entry.train_id))
            .cloned()
            .collect();
    }

    log::info!(
        "Resolved {} schedule entries: {} section overlaps, {} platform conflicts",
        schedule.len(),
        section_count,
        results.conflicts.len() - section_count
    );

    Resolution {
        conflicts: results.conflicts,
    }
}
