//! Headless session driver
//!
//! Stands in for the menu/session collaborator: builds a level for the
//! requested difficulty tier, feeds a scripted input cadence through the
//! fixed-tick loop, and prints a JSON run summary.

use std::time::{Duration, Instant};

use clap::Parser;
use serde::Serialize;

use vector_dash::sim::{tick, FixedTimestep, GameState, SimEvent, TickInput};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Difficulty tier (0-4; other values use the base length)
    #[arg(long, default_value_t = 0)]
    tier: u32,
    /// Session seed
    #[arg(long, default_value_t = 1)]
    seed: u64,
    /// Stop after this many attempts
    #[arg(long, default_value_t = 10)]
    attempts: u32,
    /// Ticks the action input stays held in each cadence period
    #[arg(long, default_value_t = 6)]
    hold_ticks: u64,
    /// Cadence period in ticks
    #[arg(long, default_value_t = 48)]
    period: u64,
    /// Pace the loop against the wall clock instead of running flat out
    #[arg(long)]
    realtime: bool,
    /// Hard tick budget
    #[arg(long, default_value_t = 2_000_000)]
    max_ticks: u64,
}

#[derive(Debug, Serialize)]
struct RunSummary {
    tier: u32,
    seed: u64,
    attempts: u32,
    ticks: u64,
    best_percent: u32,
    deaths: u32,
    mode_changes: u32,
    completed: bool,
}

/// One session: simulation state plus the scripted input edge tracking
struct Session {
    state: GameState,
    input: TickInput,
    key_down: bool,
    hold_ticks: u64,
    period: u64,
    best_percent: u32,
    deaths: u32,
    mode_changes: u32,
}

impl Session {
    fn new(state: GameState, hold_ticks: u64, period: u64) -> Self {
        Self {
            state,
            input: TickInput::default(),
            key_down: false,
            hold_ticks,
            period,
            best_percent: 0,
            deaths: 0,
            mode_changes: 0,
        }
    }

    /// Run one fixed tick with cadence-scripted input
    fn step(&mut self) {
        // Press/release edges only; while held the flag is left alone so
        // single-shot modes can consume it.
        let down = self.state.time_ticks % self.period < self.hold_ticks;
        if down && !self.key_down {
            self.input.hold = true;
        } else if !down && self.key_down {
            self.input.hold = false;
        }
        self.key_down = down;

        for event in tick(&mut self.state, &mut self.input) {
            match event {
                SimEvent::Death { at_x } => {
                    self.deaths += 1;
                    log::info!(
                        "attempt {} died at x {:.0} ({}%)",
                        self.state.attempts,
                        at_x,
                        self.state.progress_percent()
                    );
                }
                SimEvent::ModeChange { mode } => {
                    self.mode_changes += 1;
                    log::info!("mode change: {}", mode.as_str());
                }
                SimEvent::Respawn { attempt } => log::info!("attempt {} started", attempt),
                SimEvent::LevelComplete => log::info!("level complete"),
            }
        }
        self.best_percent = self.best_percent.max(self.state.progress_percent());
    }

    fn done(&self, max_attempts: u32, max_ticks: u64) -> bool {
        self.state.completed
            || self.state.attempts > max_attempts
            || self.state.time_ticks >= max_ticks
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let state = match GameState::new(cli.tier, cli.seed) {
        Ok(state) => state,
        Err(err) => {
            log::error!("level generation failed: {err}");
            std::process::exit(1);
        }
    };
    let mut session = Session::new(state, cli.hold_ticks, cli.period);

    if cli.realtime {
        let mut stepper = FixedTimestep::new();
        let mut last = Instant::now();
        while !session.done(cli.attempts, cli.max_ticks) {
            let now = Instant::now();
            let elapsed = now.duration_since(last).as_secs_f32();
            last = now;
            for _ in 0..stepper.advance(elapsed) {
                session.step();
            }
            std::thread::sleep(Duration::from_millis(4));
        }
    } else {
        while !session.done(cli.attempts, cli.max_ticks) {
            session.step();
        }
    }

    let summary = RunSummary {
        tier: cli.tier,
        seed: cli.seed,
        attempts: session.state.attempts.min(cli.attempts),
        ticks: session.state.time_ticks,
        best_percent: session.best_percent,
        deaths: session.deaths,
        mode_changes: session.mode_changes,
        completed: session.state.completed,
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&summary).expect("summary serializes")
    );
}
