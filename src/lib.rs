//! Vector Dash - a mode-switching obstacle-runner simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, level generation)
//!
//! Rendering, input-device plumbing, audio, and progress persistence are
//! external collaborators. The crate exposes read-only player and level
//! state for them and consumes a single boolean "hold" signal, sampled once
//! per fixed tick.

pub mod sim;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz; physics constants below are per-tick)
    pub const TICK_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame interval fed to the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// World-space y of the ground line (y grows downward, ceiling at y = 0)
    pub const GROUND_Y: f32 = 540.0;
    /// World scroll per tick
    pub const SCROLL_SPEED: f32 = 8.5;

    /// Player bounding box edge length
    pub const PLAYER_SIZE: f32 = 34.0;
    /// Fixed screen-space x of the player's left edge
    pub const PLAYER_SCREEN_X: f32 = 300.0;
    /// Inward shrink per side for the forgiving hitbox
    pub const HITBOX_INSET: f32 = 10.0;
    /// Height above a block top that still resolves as a landing
    pub const LANDING_TOLERANCE: f32 = 12.0;
    /// Lookahead past the player's right edge before the obstacle scan stops
    pub const SCAN_MARGIN: f32 = 200.0;

    /// Gravity per tick (Cube, Ufo, Robot)
    pub const GRAVITY: f32 = 0.8;
    /// Cube jump impulse (negative = upward)
    pub const CUBE_JUMP: f32 = -12.5;
    /// Ship fall acceleration per tick
    pub const SHIP_FALL: f32 = 0.38;
    /// Ship lift acceleration per tick while held
    pub const SHIP_LIFT: f32 = -0.48;
    /// Wave vertical speed (assigned as velocity, not accumulated)
    pub const WAVE_SPEED: f32 = 9.0;
    /// Ball gravity per tick, scaled by the gravity direction
    pub const BALL_GRAVITY: f32 = 0.85;
    /// Ufo jump impulse
    pub const UFO_JUMP: f32 = -9.0;
    /// Robot jump impulse
    pub const ROBOT_JUMP: f32 = -13.0;

    /// Cube airborne spin, degrees per tick
    pub const CUBE_SPIN_RATE: f32 = 6.0;
    /// Ship tilt per unit of vertical speed, degrees
    pub const SHIP_TILT_FACTOR: f32 = 2.5;
    /// Wave tilt magnitude, degrees
    pub const WAVE_TILT: f32 = 25.0;
    /// Ball roll, degrees per tick, scaled by the gravity direction
    pub const BALL_ROLL_RATE: f32 = 5.0;

    /// Delay between a death and the scheduled respawn (450 ms at 60 Hz)
    pub const RESPAWN_DELAY_TICKS: u64 = 27;
}
