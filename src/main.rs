//! Laser Sort headless runner
//!
//! Plays the simulation at a synthetic frame rate with the autopilot at the
//! controls and reports how the run ended.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;

use laser_sort::audio::{AudioManager, LogSink};
use laser_sort::autopilot::Autopilot;
use laser_sort::sim::{GameWorld, Snapshot, TickInput, tick};
use laser_sort::{SimError, Tuning};

#[derive(Parser, Debug)]
#[command(name = "laser-sort", about = "Run a headless Laser Sort game")]
struct Cli {
    /// RNG seed (defaults to the current time)
    #[arg(long)]
    seed: Option<u64>,

    /// Seconds of play to simulate
    #[arg(long, default_value_t = 120.0)]
    seconds: f64,

    /// Synthetic frames per second
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// JSON file overriding gameplay tuning
    #[arg(long)]
    tuning: Option<PathBuf>,

    /// Print the final snapshot as JSON
    #[arg(long)]
    json: bool,

    /// Leave the controls alone and let the bricks fall
    #[arg(long)]
    idle: bool,
}

fn main() -> Result<(), SimError> {
    env_logger::init();
    let cli = Cli::parse();

    let tuning = match &cli.tuning {
        Some(path) => Tuning::load(path)?,
        None => Tuning::default(),
    };
    let seed = cli.seed.unwrap_or_else(clock_seed);
    log::info!(
        "Laser Sort starting: seed {seed}, {}s at {} fps",
        cli.seconds,
        cli.fps
    );

    let mut world = GameWorld::new(seed, tuning, 0.0);
    let mut pilot = Autopilot::default();
    let mut audio = AudioManager::new(Box::new(LogSink));

    let fps = cli.fps.max(1);
    let dt = 1.0 / f64::from(fps);
    let frames = (cli.seconds.max(0.0) * f64::from(fps)).ceil() as u64;

    for frame in 1..=frames {
        let now = frame as f64 * dt;
        let input = if cli.idle {
            TickInput::default()
        } else {
            pilot.plan(&Snapshot::capture(&world), now)
        };
        tick(&mut world, &input, now);
        audio.handle_events(&world.drain_events());
        if world.state.game_over {
            break;
        }
    }

    let snapshot = Snapshot::capture(&world);
    if cli.json {
        println!("{}", snapshot.to_json()?);
    } else {
        let state = &snapshot.state;
        let ending = if state.game_over { "game over" } else { "time up" };
        println!(
            "{ending} after {:.2}s: score {} (lives {} left / {} right, speed {:.3})",
            snapshot.time, state.score, state.left_lives, state.right_lives, state.speed_factor
        );
    }
    log::info!("Played {} sound cues", audio.played());
    Ok(())
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}
