//! Movement state machine
//!
//! One branch per mode, run once per fixed tick before position
//! integration. Ball and Ufo consume the hold flag after acting so a held
//! input triggers exactly once per press; Cube and Robot gate on
//! `on_ground` instead, so holding is safe and the action fires once per
//! landing.

use super::state::{Mode, Player};
use super::tick::TickInput;
use crate::consts::*;

/// Physical constants for one movement mode
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModeParams {
    /// Per-tick vertical acceleration. Wave sets velocity directly and
    /// carries zero here.
    pub gravity: f32,
    /// Magnitude of the hold action: jump impulse (Cube, Ufo, Robot), lift
    /// acceleration (Ship), or vertical speed (Wave). Ball's action is the
    /// gravity flip and carries no impulse.
    pub action: f32,
}

impl Mode {
    /// Per-mode physics constants
    pub const fn params(self) -> ModeParams {
        match self {
            Mode::Cube => ModeParams {
                gravity: GRAVITY,
                action: CUBE_JUMP,
            },
            Mode::Ship => ModeParams {
                gravity: SHIP_FALL,
                action: SHIP_LIFT,
            },
            Mode::Wave => ModeParams {
                gravity: 0.0,
                action: WAVE_SPEED,
            },
            Mode::Ball => ModeParams {
                gravity: BALL_GRAVITY,
                action: 0.0,
            },
            Mode::Ufo => ModeParams {
                gravity: GRAVITY,
                action: UFO_JUMP,
            },
            Mode::Robot => ModeParams {
                gravity: GRAVITY,
                action: ROBOT_JUMP,
            },
        }
    }
}

/// Apply one tick of mode physics: velocity update, hold action, cosmetic
/// rotation. Position integration happens afterwards in the driver.
pub fn apply(player: &mut Player, input: &mut TickInput) {
    let params = player.mode.params();
    match player.mode {
        Mode::Cube => {
            player.dy += params.gravity;
            if player.on_ground && input.hold {
                player.dy = params.action;
                player.on_ground = false;
            }
            if !player.on_ground {
                player.rot += CUBE_SPIN_RATE;
            } else {
                player.rot = (player.rot / 90.0).round() * 90.0;
            }
        }
        Mode::Ship => {
            player.dy += if input.hold { params.action } else { params.gravity };
            player.rot = player.dy * SHIP_TILT_FACTOR;
        }
        Mode::Wave => {
            player.dy = if input.hold { -params.action } else { params.action };
            player.rot = if player.dy > 0.0 { WAVE_TILT } else { -WAVE_TILT };
        }
        Mode::Ball => {
            player.dy += params.gravity * player.gravity_dir;
            if player.on_ground && input.hold {
                player.gravity_dir = -player.gravity_dir;
                player.on_ground = false;
                input.hold = false;
            }
            player.rot += BALL_ROLL_RATE * player.gravity_dir;
        }
        Mode::Ufo => {
            player.dy += params.gravity;
            if input.hold {
                player.dy = params.action;
                input.hold = false;
            }
        }
        Mode::Robot => {
            player.dy += params.gravity;
            if player.on_ground && input.hold {
                player.dy = params.action;
                player.on_ground = false;
            }
        }
    }
}
