//! Level buffer and procedural generator
//!
//! A level is an ordered run of obstacles along the scroll axis: solid
//! blocks, hazard spikes, and mode-change portals. The buffer is built once
//! per level start, validated, and read-only for the rest of the attempt.

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::rect::Rect;
use super::state::Mode;
use crate::consts::GROUND_Y;

/// Clear run before the first obstacle
const START_OFFSET: f32 = 1000.0;
/// Level length at difficulty scale 1.0
const BASE_LENGTH: f32 = 32000.0;
/// Length multiplier per tier; out-of-range tiers fall back to 1.0
const DIFFICULTY_SCALE: [f32; 5] = [1.0, 1.2, 1.5, 1.8, 2.5];
/// Clear space appended past the final cursor position
const TRAILING_MARGIN: f32 = 1000.0;

/// No portals before this cursor position
const PORTAL_SAFETY_MARGIN: f32 = 5000.0;
/// Portal placement windows repeat with this period
const PORTAL_PERIOD: f32 = 8000.0;
/// Width of the placement window at each period boundary
const PORTAL_WINDOW: f32 = 400.0;
/// Cursor advance after a portal so nothing conflicting follows it
const PORTAL_CLEARANCE: f32 = 600.0;
const PORTAL_WIDTH: f32 = 60.0;

/// Edge length of ground blocks and spikes
const BLOCK_SIZE: f32 = 40.0;
const CUBE_STEP: f32 = 400.0;
const CUBE_SPIKE_OFFSET: f32 = 160.0;
const CUBE_SPIKE_CHANCE: f64 = 0.5;

/// Small step so corridor walls read as continuous
const WAVE_STEP: f32 = 80.0;
const WAVE_WALL_WIDTH: f32 = 80.0;
const WAVE_FLOOR_HEIGHT: f32 = 200.0;
/// Corridor hazard cadence along the cursor
const WAVE_SPIKE_SPACING: f32 = 1000.0;

const SHIP_STEP: f32 = 300.0;
const SHIP_WALL_WIDTH: f32 = 40.0;
const SHIP_WALL_HEIGHT: f32 = 100.0;

/// Obstacle categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Solid: landable from above, lethal from the side or below
    Block,
    /// Lethal on any contact
    Spike,
    /// Trigger volume that switches the player's mode
    Portal,
}

/// One placed obstacle. Immutable once the level is built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    pub rect: Rect,
    /// Mode to switch into on contact; portals only
    pub target: Option<Mode>,
}

impl Obstacle {
    pub fn block(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            kind: ObstacleKind::Block,
            rect: Rect::new(x, y, width, height),
            target: None,
        }
    }

    pub fn spike(x: f32, y: f32) -> Self {
        Self {
            kind: ObstacleKind::Spike,
            rect: Rect::new(x, y, BLOCK_SIZE, BLOCK_SIZE),
            target: None,
        }
    }

    /// Portals span the full vertical extent of the playfield
    pub fn portal(x: f32, target: Mode) -> Self {
        Self {
            kind: ObstacleKind::Portal,
            rect: Rect::new(x, 0.0, PORTAL_WIDTH, GROUND_Y),
            target: Some(target),
        }
    }
}

/// Invariant violations caught when a level buffer is sealed. These are
/// programming errors, rejected here so the per-tick collision path can
/// assume positive extents and sorted order.
#[derive(Debug, Error, PartialEq)]
pub enum LevelError {
    #[error("level length must be positive and finite, got {0}")]
    BadLength(f32),
    #[error("obstacle {index} has non-positive extent {width}x{height}")]
    NonPositiveExtent { index: usize, width: f32, height: f32 },
    #[error("obstacle {index} at x={x} breaks ascending order (previous x={prev_x})")]
    OutOfOrder { index: usize, x: f32, prev_x: f32 },
    #[error("obstacle {index} ends at x={end}, past the level length {length}")]
    PastEnd { index: usize, end: f32, length: f32 },
}

/// A validated, immutable level buffer. Exclusively owns its obstacles for
/// the lifetime of one level attempt; rebuilt on level start, never on a
/// respawn within the same level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    obstacles: Vec<Obstacle>,
    length: f32,
}

impl Level {
    /// Validate and seal a level buffer
    pub fn new(obstacles: Vec<Obstacle>, length: f32) -> Result<Self, LevelError> {
        if !(length.is_finite() && length > 0.0) {
            return Err(LevelError::BadLength(length));
        }
        let mut prev_x = f32::NEG_INFINITY;
        for (index, o) in obstacles.iter().enumerate() {
            if o.rect.size.x <= 0.0 || o.rect.size.y <= 0.0 {
                return Err(LevelError::NonPositiveExtent {
                    index,
                    width: o.rect.size.x,
                    height: o.rect.size.y,
                });
            }
            if o.rect.left() < prev_x {
                return Err(LevelError::OutOfOrder {
                    index,
                    x: o.rect.left(),
                    prev_x,
                });
            }
            if o.rect.right() > length {
                return Err(LevelError::PastEnd {
                    index,
                    end: o.rect.right(),
                    length,
                });
            }
            prev_x = o.rect.left();
        }
        Ok(Self { obstacles, length })
    }

    /// Total world-space extent along the scroll axis
    #[inline]
    pub fn length(&self) -> f32 {
        self.length
    }

    /// Obstacles in ascending x order
    #[inline]
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }
}

/// Build a level for the requested difficulty tier.
///
/// The generator walks a cursor along the scroll axis and places segments
/// shaped for the mode the player is assumed to hold at that point. Placing
/// a portal updates the assumed mode, so downstream segments always match
/// the mode the player actually arrives in.
///
/// The random source is injected; seeding it makes generation fully
/// reproducible.
pub fn generate<R: Rng + ?Sized>(tier: u32, rng: &mut R) -> Result<Level, LevelError> {
    let scale = DIFFICULTY_SCALE
        .get(tier as usize)
        .copied()
        .unwrap_or(1.0);
    let length_limit = BASE_LENGTH * scale;

    let mut obstacles = Vec::new();
    let mut x = START_OFFSET;
    let mut assumed_mode = Mode::Cube;
    let mut last_corridor_spike = x;

    while x < length_limit {
        match assumed_mode {
            Mode::Wave => {
                let top = rng.random_range(100.0..200.0f32);
                let floor_top = rng.random_range(400.0..500.0f32);
                obstacles.push(Obstacle::block(x, 0.0, WAVE_WALL_WIDTH, top));
                obstacles.push(Obstacle::block(x, floor_top, WAVE_WALL_WIDTH, WAVE_FLOOR_HEIGHT));
                if x - last_corridor_spike >= WAVE_SPIKE_SPACING {
                    obstacles.push(Obstacle::spike(x + WAVE_WALL_WIDTH / 2.0, top + 20.0));
                    last_corridor_spike = x;
                }
                x += WAVE_STEP;
            }
            Mode::Ship => {
                obstacles.push(Obstacle::block(x, 0.0, SHIP_WALL_WIDTH, SHIP_WALL_HEIGHT));
                obstacles.push(Obstacle::block(
                    x,
                    GROUND_Y - SHIP_WALL_HEIGHT,
                    SHIP_WALL_WIDTH,
                    SHIP_WALL_HEIGHT,
                ));
                x += SHIP_STEP;
            }
            // Ball, Ufo and Robot are ground-relative jumpers, so they share
            // the Cube ground+hazard layout.
            Mode::Cube | Mode::Ball | Mode::Ufo | Mode::Robot => {
                obstacles.push(Obstacle::block(
                    x,
                    GROUND_Y - BLOCK_SIZE,
                    BLOCK_SIZE,
                    BLOCK_SIZE,
                ));
                if rng.random_bool(CUBE_SPIKE_CHANCE) {
                    obstacles.push(Obstacle::spike(x + CUBE_SPIKE_OFFSET, GROUND_Y - BLOCK_SIZE));
                }
                x += CUBE_STEP;
            }
        }

        if x > PORTAL_SAFETY_MARGIN && x % PORTAL_PERIOD < PORTAL_WINDOW {
            let target = Mode::ALL[rng.random_range(0..Mode::ALL.len())];
            obstacles.push(Obstacle::portal(x, target));
            assumed_mode = target;
            x += PORTAL_CLEARANCE;
        }
    }

    let length = x + TRAILING_MARGIN;
    log::info!(
        "generated tier {} level: {} obstacles, length {}",
        tier,
        obstacles.len(),
        length
    );
    Level::new(obstacles, length)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn gen_level(tier: u32, seed: u64) -> Level {
        let mut rng = Pcg32::seed_from_u64(seed);
        generate(tier, &mut rng).expect("generated level must validate")
    }

    #[test]
    fn test_difficulty_scales_length() {
        let base = gen_level(0, 42);
        let hardest = gen_level(4, 42);
        assert!(base.length() >= BASE_LENGTH);
        assert!(hardest.length() > base.length() * 2.0);
    }

    #[test]
    fn test_unknown_tier_falls_back_to_base_scale() {
        let level = gen_level(99, 42);
        assert!(level.length() >= BASE_LENGTH);
        // One iteration past the limit plus the trailing margin bounds the
        // overshoot.
        assert!(level.length() <= BASE_LENGTH + CUBE_STEP + PORTAL_CLEARANCE + TRAILING_MARGIN);
    }

    #[test]
    fn test_starting_run_is_clear() {
        let level = gen_level(2, 7);
        assert!(!level.obstacles().is_empty());
        for o in level.obstacles() {
            assert!(o.rect.left() >= START_OFFSET);
        }
    }

    #[test]
    fn test_portal_clearance_respected() {
        let level = gen_level(3, 9);
        let portals: Vec<f32> = level
            .obstacles()
            .iter()
            .filter(|o| o.kind == ObstacleKind::Portal)
            .map(|o| o.rect.left())
            .collect();
        assert!(!portals.is_empty());
        for portal_x in portals {
            for o in level.obstacles() {
                if o.rect.left() > portal_x {
                    assert!(o.rect.left() >= portal_x + PORTAL_CLEARANCE);
                }
            }
        }
    }

    #[test]
    fn test_rejects_non_positive_extent() {
        let bad = vec![Obstacle::block(100.0, 0.0, 0.0, 40.0)];
        assert_eq!(
            Level::new(bad, 1000.0).unwrap_err(),
            LevelError::NonPositiveExtent {
                index: 0,
                width: 0.0,
                height: 40.0
            }
        );
    }

    #[test]
    fn test_rejects_unsorted_obstacles() {
        let bad = vec![
            Obstacle::block(500.0, 0.0, 40.0, 40.0),
            Obstacle::block(100.0, 0.0, 40.0, 40.0),
        ];
        assert!(matches!(
            Level::new(bad, 1000.0),
            Err(LevelError::OutOfOrder { index: 1, .. })
        ));
    }

    #[test]
    fn test_rejects_obstacle_past_level_end() {
        let bad = vec![Obstacle::block(100.0, 0.0, 40.0, 40.0)];
        assert!(matches!(
            Level::new(bad, 120.0),
            Err(LevelError::PastEnd { index: 0, .. })
        ));
    }

    #[test]
    fn test_rejects_degenerate_length() {
        assert_eq!(
            Level::new(Vec::new(), 0.0).unwrap_err(),
            LevelError::BadLength(0.0)
        );
        assert!(Level::new(Vec::new(), f32::NAN).is_err());
    }
}
