//! Simulation state and core types
//!
//! All state that advances per tick lives here, owned by an explicit
//! [`GameState`] rather than ambient globals. Coordinates are screen-style:
//! the ceiling is y = 0, the ground line is y = `GROUND_Y`, and negative
//! vertical velocity moves the player up.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::level::{self, Level, LevelError};
use crate::consts::*;

/// Movement mode: each variant carries its own control response, gravity
/// behavior, and collision tolerance (see [`super::modes`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    Cube,
    Ship,
    Wave,
    Ball,
    Ufo,
    Robot,
}

impl Mode {
    pub const ALL: [Mode; 6] = [
        Mode::Cube,
        Mode::Ship,
        Mode::Wave,
        Mode::Ball,
        Mode::Ufo,
        Mode::Robot,
    ];

    /// HUD-facing name
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Cube => "CUBE",
            Mode::Ship => "SHIP",
            Mode::Wave => "WAVE",
            Mode::Ball => "BALL",
            Mode::Ufo => "UFO",
            Mode::Robot => "ROBOT",
        }
    }
}

/// The player entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner. `pos.x` is fixed in screen space; world scroll is
    /// tracked by `GameState::camera_x`.
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity per tick (negative = upward)
    pub dy: f32,
    /// Visual rotation in degrees (cosmetic only)
    pub rot: f32,
    pub mode: Mode,
    pub on_ground: bool,
    /// While set, all physics updates are frozen until the respawn fires
    pub dead: bool,
    /// +1.0 normal, -1.0 inverted; only Ball mode flips this
    pub gravity_dir: f32,
}

impl Player {
    /// Canonical spawn state: Cube mode, resting on the ground line
    pub fn spawn() -> Self {
        Self {
            pos: Vec2::new(PLAYER_SCREEN_X, GROUND_Y - PLAYER_SIZE),
            size: Vec2::splat(PLAYER_SIZE),
            dy: 0.0,
            rot: 0.0,
            mode: Mode::Cube,
            on_ground: true,
            dead: false,
            gravity_dir: 1.0,
        }
    }

    /// Bottom edge before this tick's vertical displacement was applied.
    /// The collision resolver uses this to tell a landing from a side hit.
    pub fn prev_bottom(&self) -> f32 {
        self.pos.y - self.dy + self.size.y
    }

    /// Reset to the canonical post-death state
    pub fn respawn(&mut self) {
        *self = Player::spawn();
    }
}

/// Events emitted by the simulation for external collaborators (HUD flash,
/// renderer, session policy)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    /// The player hit a hazard or fatal surface at this world x
    Death { at_x: f32 },
    /// Portal contact switched the movement mode
    ModeChange { mode: Mode },
    /// The scheduled respawn fired; the attempt counter is already bumped
    Respawn { attempt: u32 },
    /// The scroll offset passed the end of the level
    LevelComplete,
}

/// Complete simulation state for one level session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Session seed; per-level RNG derives from this and the restart count
    pub seed: u64,
    /// Difficulty tier requested by the session collaborator
    pub tier: u32,
    pub level: Level,
    pub player: Player,
    /// World-space scroll offset, monotonically increasing while alive
    pub camera_x: f32,
    /// 1-based attempt counter for the current level
    pub attempts: u32,
    /// Fixed ticks elapsed since the level started
    pub time_ticks: u64,
    /// Tick at which the pending respawn fires
    pub respawn_at: Option<u64>,
    /// Set once `camera_x` passes the level length; halts further ticks
    pub completed: bool,
    /// Level starts within this session; drives per-level seed derivation
    restarts: u64,
}

impl GameState {
    /// Create a session on a freshly generated level
    pub fn new(tier: u32, seed: u64) -> Result<Self, LevelError> {
        let level = Self::build_level(tier, seed, 0)?;
        log::info!(
            "level start: tier={} seed={} length={}",
            tier,
            seed,
            level.length()
        );
        Ok(Self {
            seed,
            tier,
            level,
            player: Player::spawn(),
            camera_x: 0.0,
            attempts: 1,
            time_ticks: 0,
            respawn_at: None,
            completed: false,
            restarts: 0,
        })
    }

    fn build_level(tier: u32, seed: u64, restarts: u64) -> Result<Level, LevelError> {
        // Same recipe every session: restart n of seed s always yields the
        // same layout, while successive restarts differ.
        let level_seed = restarts.wrapping_mul(2654435761).wrapping_add(seed);
        let mut rng = Pcg32::seed_from_u64(level_seed);
        level::generate(tier, &mut rng)
    }

    /// Discard the current level and start a fresh one.
    ///
    /// Swaps the obstacle buffer and resets all player state in one call,
    /// cancelling any pending respawn; callers invoke this between ticks,
    /// so the simulation never observes a torn mix of old and new state.
    pub fn restart_level(&mut self, tier: u32) -> Result<(), LevelError> {
        self.restarts += 1;
        self.level = Self::build_level(tier, self.seed, self.restarts)?;
        self.tier = tier;
        self.player = Player::spawn();
        self.camera_x = 0.0;
        self.attempts = 1;
        self.time_ticks = 0;
        self.respawn_at = None;
        self.completed = false;
        log::info!("level restart: tier={} length={}", tier, self.level.length());
        Ok(())
    }

    /// Scroll progress for the HUD, 0..=100. The level length is validated
    /// positive at construction, so this can never divide by zero.
    pub fn progress_percent(&self) -> u32 {
        ((self.camera_x / self.level.length() * 100.0).floor() as u32).min(100)
    }
}
