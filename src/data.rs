use crate::models::{ScheduleEntry, SectionDescriptor, StationDescriptor};

/// Six morning departures from Mehsana over the MSH-BRC section, fastest first
const SAMPLE_DEPARTURES: [(&str, &str, f64); 6] = [
    ("T001", "06:00", 130.0),
    ("T002", "06:15", 120.0),
    ("T003", "06:30", 100.0),
    ("T004", "06:45", 95.0),
    ("T005", "07:00", 80.0),
    ("T006", "07:15", 75.0),
];

/// Sample schedule: every train runs MSH to BRC on section `MSH_BRC`
#[must_use]
pub fn sample_schedule() -> Vec<ScheduleEntry> {
    SAMPLE_DEPARTURES
        .iter()
        .map(|&(train_id, departure, speed)| {
            let mut entry = ScheduleEntry::new(train_id, departure)
                .on_section("MSH_BRC")
                .from_station("MSH")
                .with_speed(speed);
            entry.destination = Some("BRC".to_string());
            entry
        })
        .collect()
}

#[must_use]
pub fn sample_sections() -> Vec<SectionDescriptor> {
    vec![SectionDescriptor::new("MSH_BRC").with_length(85.0).with_capacity(8)]
}

#[must_use]
pub fn sample_stations() -> Vec<StationDescriptor> {
    [
        ("ADI", "Ahmedabad Junction", 8),
        ("MSH", "Mehsana Junction", 2),
        ("BRC", "Vadodara Junction", 6),
    ]
    .into_iter()
    .map(|(station_id, name, num_platforms)| StationDescriptor {
        station_id: station_id.to_string(),
        name: name.to_string(),
        num_platforms,
        avg_dwell_min: 0,
    })
    .collect()
}

/// Scale the sample up to `copies` trains per sample train, staggered a minute apart
#[must_use]
pub fn scaled_schedule(copies: usize) -> Vec<ScheduleEntry> {
    let base = sample_schedule();
    let mut schedule = Vec::with_capacity(base.len() * copies);
    for copy in 0..copies {
        for entry in &base {
            let mut entry = entry.clone();
            entry.train_id = format!("{}-{copy}", entry.train_id);
            entry.departure_time = crate::time::shift_departure(
                &entry.departure_time,
                i64::try_from(copy).unwrap_or(i64::MAX),
            );
            schedule.push(entry);
        }
    }
    schedule
}
