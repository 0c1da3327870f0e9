//! Headless simulation CLI.
//!
//! Plays single-player games with the planner and writes records as JSONL.
//!
//! Usage:
//!   cargo run --release --bin simulate -- [OPTIONS]
//!
//! Options:
//!   --games N        Number of games to play (default: 4)
//!   --turns N        Turns per game (default: 400)
//!   --width N        Map width (default: 32)
//!   --height N       Map height (default: 32)
//!   --bank N         Starting bank (default: 5000)
//!   --threads N      Number of parallel threads (default: 4)
//!   --seed N         Random seed, 0 for entropy (default: 0)
//!   --config FILE    Planner configuration as JSON
//!   --record-turns   Include a per-turn log in each record
//!   --output FILE    Output file path (default: stdout)

use std::env;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;
use std::process;
use std::str::FromStr;
use std::time::Instant;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use seamline::config::load_config;
use seamline::simulate::{self, GameRecord, SimConfig};

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,simulate=info,seamline::simulate=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let mut config = SimConfig::default();
    let mut turns: Option<u32> = None;
    let mut output_path: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--games" => config.num_games = value(&args, &mut i),
            "--turns" => turns = Some(value(&args, &mut i)),
            "--width" => config.width = value(&args, &mut i),
            "--height" => config.height = value(&args, &mut i),
            "--bank" => config.initial_bank = value(&args, &mut i),
            "--threads" => config.threads = value(&args, &mut i),
            "--seed" => config.seed = value(&args, &mut i),
            "--config" => {
                let path: String = value(&args, &mut i);
                config.planner = match load_config(Path::new(&path)) {
                    Ok(planner) => planner,
                    Err(e) => {
                        error!("{}", e);
                        process::exit(1);
                    }
                };
            }
            "--record-turns" => config.record_turns = true,
            "--output" => output_path = Some(value(&args, &mut i)),
            "--help" | "-h" => {
                print_usage();
                return;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }
    // Overrides any max_turns from --config.
    if let Some(turns) = turns {
        config.planner.max_turns = turns;
    }

    info!(
        "simulating {} games on {}x{}, {} turns, {} threads",
        config.num_games, config.width, config.height, config.planner.max_turns, config.threads
    );

    let start = Instant::now();
    let games = match simulate::play_games(&config) {
        Ok(games) => games,
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    };
    let elapsed = start.elapsed();
    info!("completed {} games in {:.1}s", games.len(), elapsed.as_secs_f64());
    print_summary(&games);

    let written = match &output_path {
        Some(path) => File::create(path)
            .map_err(simulate::SimError::from)
            .and_then(|file| simulate::write_jsonl(&games, &mut BufWriter::new(file))),
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            simulate::write_jsonl(&games, &mut writer)
        }
    };
    if let Err(e) = written {
        error!("{}", e);
        process::exit(1);
    }
    if let Some(path) = output_path {
        info!("wrote {} games to {}", games.len(), path);
    }
}

/// Reads the value following the flag at `args[*i]`, exiting with usage on
/// a missing or malformed value.
fn value<T: FromStr>(args: &[String], i: &mut usize) -> T {
    let flag = &args[*i];
    *i += 1;
    match args.get(*i).map(|s| s.parse::<T>()) {
        Some(Ok(v)) => v,
        _ => {
            eprintln!("invalid or missing value for {}", flag);
            print_usage();
            process::exit(1);
        }
    }
}

fn print_summary(games: &[GameRecord]) {
    if games.is_empty() {
        return;
    }
    let n = games.len() as f64;
    let bank: f64 = games.iter().map(|g| g.final_bank as f64).sum::<f64>() / n;
    let mined: f64 = games.iter().map(|g| g.stats.halite_mined as f64).sum::<f64>() / n;
    let spawned: f64 = games.iter().map(|g| g.stats.units_spawned as f64).sum::<f64>() / n;
    let collisions: u32 = games.iter().map(|g| g.stats.collisions).sum();
    info!(
        "mean final bank {:.0}, mean mined {:.0}, mean spawned {:.1}, total collisions {}",
        bank, mined, spawned, collisions
    );
}

fn print_usage() {
    eprintln!("Usage: simulate [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --games N        Number of games to play (default: 4)");
    eprintln!("  --turns N        Turns per game (default: 400)");
    eprintln!("  --width N        Map width (default: 32)");
    eprintln!("  --height N       Map height (default: 32)");
    eprintln!("  --bank N         Starting bank (default: 5000)");
    eprintln!("  --threads N      Number of parallel threads (default: 4)");
    eprintln!("  --seed N         Random seed, 0 for entropy (default: 0)");
    eprintln!("  --config FILE    Planner configuration as JSON");
    eprintln!("  --record-turns   Include a per-turn log in each record");
    eprintln!("  --output FILE    Output file path (default: stdout)");
    eprintln!("  --help           Show this help");
}
