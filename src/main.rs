//! Flappy Sim headless entry point
//!
//! Runs the simulation without a window: the autopilot plays, the run is
//! logged, and the final snapshot is printed as JSON.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use flappy_sim::consts::{HIGH_SCORE_FILE, TICK_MILLIS};
use flappy_sim::sim::{GameEvent, GameMode, InputEvent, TickInput};
use flappy_sim::{FileStore, Session, Tuning};

#[derive(Debug, Parser)]
#[command(name = "flappy-sim", about = "Headless gap-runner simulation")]
struct Args {
    /// Seed for obstacle gap placement
    #[arg(long, default_value_t = 0xF1A9_B12D)]
    seed: u64,

    /// Maximum ticks to simulate
    #[arg(long, default_value_t = 10_000)]
    ticks: u64,

    /// JSON tuning overrides
    #[arg(long)]
    tuning: Option<PathBuf>,

    /// High score file
    #[arg(long, default_value = HIGH_SCORE_FILE)]
    highscore: PathBuf,

    /// Restart after each game over instead of stopping
    #[arg(long)]
    endless: bool,

    /// Sleep between ticks like an interactive host would
    #[arg(long)]
    realtime: bool,

    /// Disable the autopilot (the body just falls)
    #[arg(long)]
    no_autopilot: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    log::info!("Flappy Sim (headless) starting, seed {:#x}", args.seed);

    let tuning = match &args.tuning {
        Some(path) => Tuning::load(path)
            .with_context(|| format!("invalid tuning in {}", path.display()))?,
        None => Tuning::default(),
    };

    let store = FileStore::new(&args.highscore);
    let mut session = Session::seeded(tuning, store, args.seed).context("invalid tuning")?;

    let mut runs = 0u32;
    let mut pending = vec![InputEvent::Flap];
    for _ in 0..args.ticks {
        let input = TickInput {
            events: std::mem::take(&mut pending),
            idle_mode: !args.no_autopilot,
        };

        for event in session.tick(&input) {
            if let GameEvent::GameOver { score, contact } = event {
                runs += 1;
                log::info!("Run {runs} ended with score {score} ({contact:?})");
                if args.endless {
                    pending.push(InputEvent::Flap);
                }
            }
        }

        if session.should_quit() {
            break;
        }
        if session.snapshot().mode == GameMode::GameOver && !args.endless {
            break;
        }
        if args.realtime {
            std::thread::sleep(Duration::from_millis(TICK_MILLIS));
        }
    }

    let snapshot = session.snapshot();
    log::info!(
        "Finished after {} run(s): score {}, high score {}",
        runs,
        snapshot.score,
        snapshot.high_score
    );
    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    Ok(())
}
