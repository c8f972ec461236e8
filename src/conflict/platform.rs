//! Platform contention detection at stations.

use super::{ConflictKind, ConflictResults, ResolutionContext, Severity};
use crate::models::ScheduleEntry;
use indexmap::IndexMap;

/// A departure occupying a platform: (minutes since midnight, index into the schedule)
type Occupancy = (i64, usize);

/// Group departures by station, in first-seen order
fn extract_station_occupancies<'a>(
    schedule: &'a [ScheduleEntry],
    default_station: &'a str,
) -> IndexMap<&'a str, Vec<Occupancy>> {
    let mut by_station: IndexMap<&str, Vec<Occupancy>> = IndexMap::new();
    for (idx, entry) in schedule.iter().enumerate() {
        by_station
            .entry(entry.station_or(default_station))
            .or_default()
            .push((entry.departure_minutes(), idx));
    }
    by_station
}

/// Flag departures that follow recent ones too closely for the station's platforms
///
/// Only the `platform_count` departures immediately before each train are
/// examined, as if platforms were handed out round-robin in departure order.
/// Detection only; the schedule is never modified here.
pub(super) fn check_platform_conflicts(
    schedule: &[ScheduleEntry],
    ctx: &ResolutionContext,
    results: &mut ConflictResults,
) {
    let config = ctx.config();

    for (station, mut occupancies) in extract_station_occupancies(schedule, &config.default_station) {
        occupancies.sort_by_key(|&(departure, _)| departure);
        let platforms = config.platform_count(station);

        for (i, &(current_time, current_idx)) in occupancies.iter().enumerate() {
            let window_start = i.saturating_sub(platforms);
            let mut trains: Vec<String> = occupancies[window_start..i]
                .iter()
                .filter(|&&(prev_time, _)| {
                    current_time.saturating_sub(prev_time) < config.platform_occupancy_minutes
                })
                .map(|&(_, prev_idx)| schedule[prev_idx].train_id.clone())
                .collect();

            if trains.is_empty() {
                continue;
            }

            let current_id = &schedule[current_idx].train_id;
            let suggestion = format!("Reassign {current_id} to Platform {}", (i + 1) % platforms + 1);
            trains.push(current_id.clone());

            results.push(
                ConflictKind::PlatformConflict,
                Severity::Medium,
                trains,
                format!("{station} Junction Platform {}", i % platforms + 1),
                suggestion,
                None,
            );
        }
    }
}
