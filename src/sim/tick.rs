//! Fixed timestep simulation driver
//!
//! One `tick` call advances the world by exactly 1/60 s; the physics
//! constants are expressed per tick, so jump heights and fall speeds never
//! depend on the rendering frame rate. [`FixedTimestep`] maps variable
//! frame intervals onto whole ticks for the host loop.

use super::collision;
use super::modes;
use super::state::{GameState, SimEvent};
use crate::consts::*;
use serde::{Deserialize, Serialize};

/// Input sampled once per tick. The hold flag is the only state shared
/// with the input collaborator: set on press, cleared on release, and
/// possibly cleared early by modes with single-shot actions.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TickInput {
    /// The abstract "action input currently asserted" signal
    pub hold: bool,
}

/// Advance the simulation by exactly one fixed tick.
///
/// While dead the world is frozen except for the scheduled respawn; once
/// completed the state stops advancing entirely (restart policy belongs to
/// the session collaborator).
pub fn tick(state: &mut GameState, input: &mut TickInput) -> Vec<SimEvent> {
    let mut events = Vec::new();

    if state.completed {
        return events;
    }

    state.time_ticks += 1;

    if state.player.dead {
        if let Some(at) = state.respawn_at {
            if state.time_ticks >= at {
                state.player.respawn();
                state.camera_x = 0.0;
                state.attempts += 1;
                state.respawn_at = None;
                log::debug!("attempt {} started", state.attempts);
                events.push(SimEvent::Respawn {
                    attempt: state.attempts,
                });
            }
        }
        return events;
    }

    state.camera_x += SCROLL_SPEED;

    modes::apply(&mut state.player, input);
    state.player.pos.y += state.player.dy;

    collision::resolve_world_bounds(&mut state.player, state.camera_x, &mut events);
    collision::resolve_obstacles(&mut state.player, state.camera_x, &state.level, &mut events);

    if state.player.dead {
        state.respawn_at = Some(state.time_ticks + RESPAWN_DELAY_TICKS);
    }

    if state.camera_x > state.level.length() {
        state.completed = true;
        events.push(SimEvent::LevelComplete);
    }

    events
}

/// Frame-time accumulator mapping variable wall-clock frames onto whole
/// fixed ticks. Frame gaps are clamped and the substep count capped so a
/// stall cannot snowball into a spiral of death.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedTimestep {
    accumulator: f32,
}

impl FixedTimestep {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one frame's elapsed seconds; returns how many fixed ticks to
    /// run now. Unconsumed time is carried into the next frame.
    pub fn advance(&mut self, elapsed: f32) -> u32 {
        self.accumulator += elapsed.min(MAX_FRAME_DT);
        let mut ticks = 0;
        while self.accumulator >= TICK_DT && ticks < MAX_SUBSTEPS {
            self.accumulator -= TICK_DT;
            ticks += 1;
        }
        ticks
    }
}
