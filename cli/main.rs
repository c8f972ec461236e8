use rail_conflicts::data::{sample_schedule, sample_sections, sample_stations};
use rail_conflicts::{
    detect_and_resolve_conflicts, ConflictRecord, Error, ResolutionContext, ResolverConfig, ScheduleEntry,
    SectionDescriptor, StationDescriptor,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::io::Read;
use std::process::ExitCode;

#[derive(Debug, Deserialize)]
struct ResolveRequest {
    schedule: Vec<ScheduleEntry>,
    #[serde(default)]
    sections: Vec<SectionDescriptor>,
    #[serde(default)]
    stations: Vec<StationDescriptor>,
    #[serde(default)]
    config: ResolverConfig,
}

#[derive(Debug, Serialize)]
struct ResolveResponse {
    schedule: Vec<ScheduleEntry>,
    total_conflicts: usize,
    conflicts: Vec<ConflictRecord>,
}

enum Input {
    Demo,
    Stdin,
    File(String),
}

fn parse_args() -> Input {
    match env::args().nth(1) {
        Some(arg) if arg == "--demo" => Input::Demo,
        Some(arg) if arg != "-" => Input::File(arg),
        _ => Input::Stdin,
    }
}

fn read_request(input: Input) -> Result<ResolveRequest, Error> {
    let json = match input {
        Input::Demo => {
            return Ok(ResolveRequest {
                schedule: sample_schedule(),
                sections: sample_sections(),
                stations: sample_stations(),
                config: ResolverConfig::default(),
            });
        }
        Input::Stdin => {
            let mut json = String::new();
            std::io::stdin().read_to_string(&mut json).map_err(|source| Error::Io {
                path: "<stdin>".to_string(),
                source,
            })?;
            json
        }
        Input::File(path) => std::fs::read_to_string(&path).map_err(|source| Error::Io { path, source })?,
    };

    let request: ResolveRequest = serde_json::from_str(&json)?;
    request.config.validate()?;
    Ok(request)
}

fn run(input: Input) -> Result<String, Error> {
    let request = read_request(input)?;
    let config = request.config.with_stations(&request.stations);
    let ctx = ResolutionContext::new(&request.sections, config);

    let mut schedule = request.schedule;
    let detected_at = chrono::Local::now().time();
    let resolution = detect_and_resolve_conflicts(&mut schedule, &ctx, detected_at);

    let response = ResolveResponse {
        schedule,
        total_conflicts: resolution.total_conflicts(),
        conflicts: resolution.conflicts,
    };
    Ok(serde_json::to_string_pretty(&response)?)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(parse_args()) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("rail-conflicts: {e}");
            ExitCode::FAILURE
        }
    }
}
