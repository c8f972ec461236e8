//! Section-overlap detection and delay-based resolution.

use super::{ConflictKind, ConflictResults, ResolutionContext, Severity};
use crate::logging::debug_log;
use crate::models::ScheduleEntry;
use crate::time::travel_minutes;
use indexmap::IndexMap;

/// Group entry indices by section id, in first-seen order
fn partition_by_section(schedule: &[ScheduleEntry]) -> IndexMap<String, Vec<usize>> {
    let mut by_section: IndexMap<String, Vec<usize>> = IndexMap::new();
    for (idx, entry) in schedule.iter().enumerate() {
        if let Some(section_id) = entry.section_key() {
            by_section.entry(section_id.to_string()).or_default().push(idx);
        }
    }
    by_section
}

/// Check every train on a section against every earlier one, delaying the later train on conflict
///
/// Each train's departure is read once at the start of its own iteration and
/// is not re-read after a delay, so several conflicts against the same train
/// are all measured from its original departure while the delays they apply
/// accumulate. Earlier trains are read as they stand, including any delay
/// applied to them in their own iteration.
pub(super) fn check_section_overlaps(
    schedule: &mut [ScheduleEntry],
    ctx: &ResolutionContext,
    results: &mut ConflictResults,
) {
    let config = ctx.config();
    let (window_low, window_high) = config.location_window;

    for (section_id, mut indices) in partition_by_section(schedule) {
        let Some(section) = ctx.section(&section_id) else {
            debug_log!("Section {} has no descriptor, skipping {} entries", section_id, indices.len());
            continue;
        };
        debug_log!(
            "Section {}: {} entries, {:.1} km, capacity {}/h",
            section_id,
            indices.len(),
            section.length_km,
            section.capacity_per_hour
        );

        // Stable: equal departures keep their schedule order
        indices.sort_by_key(|&idx| schedule[idx].departure_minutes());

        #[allow(clippy::cast_possible_truncation)]
        let location = format!(
            "Section {section_id} (KM {}-{})",
            (section.length_km * window_low) as i64,
            (section.length_km * window_high) as i64
        );

        let arrival_of = |entry: &ScheduleEntry| {
            entry.departure_minutes().saturating_add(travel_minutes(
                entry.speed_or(config.default_speed_kmph),
                section.length_km,
                config.min_travel_minutes,
            ))
        };

        for (i, &current_idx) in indices.iter().enumerate() {
            let departure = schedule[current_idx].departure_minutes();

            for &prev_idx in &indices[..i] {
                let prev_arrival = arrival_of(&schedule[prev_idx]);
                if departure >= prev_arrival.saturating_add(config.safety_buffer_minutes) {
                    continue;
                }

                let severity = if departure < prev_arrival {
                    Severity::High
                } else {
                    Severity::Medium
                };
                let delay = prev_arrival
                    .saturating_sub(departure)
                    .saturating_add(config.safety_buffer_minutes)
                    .max(config.min_delay_minutes);

                let prev_id = schedule[prev_idx].train_id.clone();
                let current_id = schedule[current_idx].train_id.clone();
                let suggestion = format!("Delay {current_id} by {delay} minutes to avoid conflict");

                results.push(
                    ConflictKind::SectionOverlap,
                    severity,
                    vec![prev_id.clone(), current_id],
                    location.clone(),
                    suggestion,
                    Some(delay),
                );

                schedule[current_idx].apply_delay(delay, format!("Conflict with {prev_id}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::{detect_and_resolve_conflicts, Resolution};
    use super::*;
    use crate::config::ResolverConfig;
    use crate::models::SectionDescriptor;
    use chrono::NaiveTime;

    fn resolve(schedule: &mut [ScheduleEntry], sections: &[SectionDescriptor]) -> Resolution {
        let ctx = ResolutionContext::new(sections, ResolverConfig::default());
        let at = NaiveTime::from_hms_opt(8, 0, 0).expect("valid time");
        detect_and_resolve_conflicts(schedule, &ctx, at)
    }

    fn section_conflicts(resolution: &Resolution) -> Vec<&super::super::ConflictRecord> {
        resolution.of_kind(ConflictKind::SectionOverlap).collect()
    }

    #[test]
    fn test_partition_keeps_first_seen_order() {
        let schedule = vec![
            ScheduleEntry::new("A", "06:00").on_section("S2"),
            ScheduleEntry::new("B", "06:00").on_section("S1"),
            ScheduleEntry::new("C", "06:00"),
            ScheduleEntry::new("D", "06:00").on_section("S2"),
        ];
        let by_section = partition_by_section(&schedule);

        let keys: Vec<&str> = by_section.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["S2", "S1"]);
        assert_eq!(by_section["S2"], vec![0, 3]);
    }

    #[test]
    fn test_buffer_violation_is_medium() {
        // 85 km at 85 km/h: A arrives 07:00, B leaves 07:03, inside the 5 minute buffer
        let sections = vec![SectionDescriptor::new("S1")];
        let mut schedule = vec![
            ScheduleEntry::new("A", "06:00").on_section("S1").with_speed(85.0),
            ScheduleEntry::new("B", "07:03").on_section("S1").with_speed(85.0),
        ];

        let resolution = resolve(&mut schedule, &sections);
        let conflicts = section_conflicts(&resolution);

        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].severity, Severity::Medium);
        assert_eq!(conflicts[0].predicted_delay, Some(5));
        assert_eq!(schedule[1].departure_time, "07:08");
    }

    #[test]
    fn test_departure_at_arrival_is_medium() {
        // A arrives 07:00 and B leaves 07:00: not strictly before arrival
        let sections = vec![SectionDescriptor::new("S1")];
        let mut schedule = vec![
            ScheduleEntry::new("A", "06:00").on_section("S1").with_speed(85.0),
            ScheduleEntry::new("B", "07:00").on_section("S1").with_speed(85.0),
        ];

        let resolution = resolve(&mut schedule, &sections);
        let conflicts = section_conflicts(&resolution);

        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].severity, Severity::Medium);
        assert_eq!(conflicts[0].predicted_delay, Some(5));
        assert_eq!(schedule[1].departure_time, "07:05");
    }

    #[test]
    fn test_departure_one_minute_before_arrival_is_high() {
        let sections = vec![SectionDescriptor::new("S1")];
        let mut schedule = vec![
            ScheduleEntry::new("A", "06:00").on_section("S1").with_speed(85.0),
            ScheduleEntry::new("B", "06:59").on_section("S1").with_speed(85.0),
        ];

        let resolution = resolve(&mut schedule, &sections);
        let conflicts = section_conflicts(&resolution);

        assert_eq!(conflicts[0].severity, Severity::High);
        assert_eq!(conflicts[0].predicted_delay, Some(6));
    }

    #[test]
    fn test_crawling_train_still_blocks_section() {
        let sections = vec![SectionDescriptor::new("S1")];
        let mut schedule = vec![
            ScheduleEntry::new("A", "06:00").on_section("S1").with_speed(1e-20).from_station("X"),
            ScheduleEntry::new("B", "06:10").on_section("S1").from_station("Y"),
        ];

        let resolution = resolve(&mut schedule, &sections);
        let conflicts = section_conflicts(&resolution);

        // Travel is capped at 366 days, so B waits that long plus the buffer
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].severity, Severity::High);
        assert_eq!(conflicts[0].predicted_delay, Some(366 * 1440 - 5));
        assert_eq!(schedule[1].departure_time, "06:05");
    }

    #[test]
    fn test_huge_safety_buffer_does_not_overflow() {
        let config = ResolverConfig {
            safety_buffer_minutes: i64::MAX,
            ..ResolverConfig::default()
        };
        let ctx = ResolutionContext::new(&[SectionDescriptor::new("S1")], config);
        let mut schedule = vec![
            ScheduleEntry::new("A", "06:00").on_section("S1").from_station("X"),
            ScheduleEntry::new("B", "23:00").on_section("S1").from_station("Y"),
        ];
        let at = NaiveTime::from_hms_opt(8, 0, 0).expect("valid time");

        let resolution = detect_and_resolve_conflicts(&mut schedule, &ctx, at);

        assert_eq!(resolution.total_conflicts(), 1);
        // A arrives 06:51, 969 minutes before B leaves
        assert_eq!(resolution.conflicts[0].severity, Severity::Medium);
        assert_eq!(resolution.conflicts[0].predicted_delay, Some(i64::MAX - 969));
    }

    #[test]
    fn test_departure_exactly_at_buffer_edge_is_clear() {
        let sections = vec![SectionDescriptor::new("S1")];
        let mut schedule = vec![
            ScheduleEntry::new("A", "06:00").on_section("S1").with_speed(85.0),
            ScheduleEntry::new("B", "07:05").on_section("S1").with_speed(85.0),
        ];

        let resolution = resolve(&mut schedule, &sections);

        assert_eq!(resolution.total_conflicts(), 0);
        assert_eq!(schedule[1].departure_time, "07:05");
    }

    #[test]
    fn test_unknown_section_is_skipped() {
        let sections = vec![SectionDescriptor::new("S1")];
        let mut schedule = vec![
            ScheduleEntry::new("A", "06:00").on_section("GHOST").from_station("ADI"),
            ScheduleEntry::new("B", "06:20").on_section("GHOST").from_station("BRC"),
        ];

        let resolution = resolve(&mut schedule, &sections);

        assert_eq!(resolution.total_conflicts(), 0);
        assert!(schedule.iter().all(|e| !e.resolved));
        assert_eq!(schedule[1].departure_time, "06:20");
    }

    #[test]
    fn test_input_order_does_not_matter() {
        let sections = vec![SectionDescriptor::new("S1")];
        let mut schedule = vec![
            ScheduleEntry::new("LATE", "06:10").on_section("S1").from_station("ADI"),
            ScheduleEntry::new("EARLY", "06:00").on_section("S1").from_station("BRC"),
        ];

        let resolution = resolve(&mut schedule, &sections);
        let conflicts = section_conflicts(&resolution);

        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].trains, vec!["EARLY", "LATE"]);
        assert!(schedule[0].resolved);
        assert!(!schedule[1].resolved);
    }

    #[test]
    fn test_equal_departures_keep_schedule_order() {
        let sections = vec![SectionDescriptor::new("S1")];
        let mut schedule = vec![
            ScheduleEntry::new("FIRST", "06:00").on_section("S1").from_station("ADI"),
            ScheduleEntry::new("SECOND", "06:00").on_section("S1").from_station("BRC"),
        ];

        let resolution = resolve(&mut schedule, &sections);
        let conflicts = section_conflicts(&resolution);

        assert_eq!(conflicts[0].trains, vec!["FIRST", "SECOND"]);
        // Default speed 100 km/h over 85 km: 51 minutes, plus the buffer
        assert_eq!(conflicts[0].predicted_delay, Some(56));
        assert_eq!(schedule[1].departure_time, "06:56");
    }

    #[test]
    fn test_delays_compound_against_original_departure() {
        // 85 km at 85 km/h = 60 minutes per train
        let sections = vec![SectionDescriptor::new("S1")];
        let mut schedule = vec![
            ScheduleEntry::new("A", "06:00").on_section("S1").with_speed(85.0).from_station("X"),
            ScheduleEntry::new("B", "06:30").on_section("S1").with_speed(85.0).from_station("Y"),
            ScheduleEntry::new("C", "06:40").on_section("S1").with_speed(85.0).from_station("Z"),
        ];

        let resolution = resolve(&mut schedule, &sections);
        let delays: Vec<Option<i64>> = resolution.conflicts.iter().map(|c| c.predicted_delay).collect();

        // B: 07:00 + 5 - 06:30 = 35 -> 07:05
        // C vs A: 07:00 + 5 - 06:40 = 25; C vs delayed B (arrives 08:05): 08:05 + 5 - 06:40 = 90
        assert_eq!(delays, vec![Some(35), Some(25), Some(90)]);
        assert_eq!(schedule[1].departure_time, "07:05");
        assert_eq!(schedule[2].departure_time, "08:35");
        assert_eq!(schedule[2].delay_reason.as_deref(), Some("Conflict with B"));
    }

    #[test]
    fn test_all_pairs_not_just_predecessor() {
        // A is slow and still occupies the section when C departs
        let sections = vec![SectionDescriptor::new("S1").with_length(60.0)];
        let mut schedule = vec![
            ScheduleEntry::new("A", "06:00").on_section("S1").with_speed(30.0).from_station("X"),
            ScheduleEntry::new("B", "07:10").on_section("S1").with_speed(120.0).from_station("Y"),
            ScheduleEntry::new("C", "07:50").on_section("S1").with_speed(120.0).from_station("Z"),
        ];

        let resolution = resolve(&mut schedule, &sections);
        let conflicts = section_conflicts(&resolution);

        // A arrives 08:00: B (07:10) and C (07:50) both conflict with it
        assert_eq!(conflicts.len(), 3);
        assert_eq!(conflicts[0].trains, vec!["A", "B"]);
        assert_eq!(conflicts[1].trains, vec!["A", "C"]);
        assert_eq!(conflicts[2].trains, vec!["B", "C"]);
    }

    #[test]
    fn test_zero_speed_uses_travel_floor() {
        let sections = vec![SectionDescriptor::new("S1")];
        let mut schedule = vec![
            ScheduleEntry::new("A", "06:00").on_section("S1").with_speed(0.0).from_station("X"),
            ScheduleEntry::new("B", "06:09").on_section("S1").from_station("Y"),
        ];

        let resolution = resolve(&mut schedule, &sections);
        let conflicts = section_conflicts(&resolution);

        // A arrives 06:05; B at 06:09 is inside the buffer
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].severity, Severity::Medium);
        assert_eq!(conflicts[0].predicted_delay, Some(5));
    }

    #[test]
    fn test_unparseable_departure_is_midnight() {
        let sections = vec![SectionDescriptor::new("S1")];
        let mut schedule = vec![
            ScheduleEntry::new("A", "not a time").on_section("S1").from_station("X"),
            ScheduleEntry::new("B", "00:30").on_section("S1").from_station("Y"),
        ];

        let resolution = resolve(&mut schedule, &sections);
        let conflicts = section_conflicts(&resolution);

        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].trains, vec!["A", "B"]);
        assert_eq!(schedule[0].departure_time, "not a time");
        assert_eq!(schedule[1].departure_time, "00:56");
    }

    #[test]
    fn test_location_uses_configured_window() {
        let config = ResolverConfig {
            location_window: (0.5, 1.0),
            ..ResolverConfig::default()
        };
        let ctx = ResolutionContext::new(&[SectionDescriptor::new("S1").with_length(40.0)], config);
        let mut schedule = vec![
            ScheduleEntry::new("A", "06:00").on_section("S1"),
            ScheduleEntry::new("B", "06:01").on_section("S1"),
        ];
        let at = NaiveTime::from_hms_opt(8, 0, 0).expect("valid time");

        let resolution = detect_and_resolve_conflicts(&mut schedule, &ctx, at);

        assert_eq!(resolution.conflicts[0].location, "Section S1 (KM 20-40)");
    }
}
