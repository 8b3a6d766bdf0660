//! Collision resolution
//!
//! Runs after position integration each tick: world bounds first, then a
//! narrow-phase walk over the level's sorted obstacle run. The player's box
//! is shrunk by a fixed margin for solid/hazard tests (the forgiving
//! hitbox); portals are trigger volumes and use the full box.

use super::level::{Level, ObstacleKind};
use super::rect::Rect;
use super::state::{Mode, Player, SimEvent};
use crate::consts::*;

/// Mark the player dead. Idempotent: repeated hazard contact within one
/// tick reports a single death.
pub fn kill(player: &mut Player, camera_x: f32, events: &mut Vec<SimEvent>) {
    if player.dead {
        return;
    }
    player.dead = true;
    events.push(SimEvent::Death {
        at_x: camera_x + player.pos.x,
    });
    log::debug!("death at world x {}", camera_x + player.pos.x);
}

/// Clamp against the ground line and the ceiling.
///
/// Ground contact zeroes velocity and grounds the player. Ceiling contact
/// clamps and zeroes velocity; it is fatal in Ship and Wave mode only.
pub fn resolve_world_bounds(player: &mut Player, camera_x: f32, events: &mut Vec<SimEvent>) {
    if player.pos.y + player.size.y >= GROUND_Y {
        player.pos.y = GROUND_Y - player.size.y;
        player.dy = 0.0;
        player.on_ground = true;
    } else if player.pos.y <= 0.0 {
        player.pos.y = 0.0;
        player.dy = 0.0;
        if matches!(player.mode, Mode::Ship | Mode::Wave) {
            kill(player, camera_x, events);
        }
    } else {
        player.on_ground = false;
    }
}

/// Narrow phase against the level buffer.
///
/// Obstacles are sorted by x, so the walk skips everything already behind
/// the player and stops once an obstacle starts more than `SCAN_MARGIN`
/// past the player's right edge; nothing later can be in range.
pub fn resolve_obstacles(
    player: &mut Player,
    camera_x: f32,
    level: &Level,
    events: &mut Vec<SimEvent>,
) {
    let world = Rect::new(
        camera_x + player.pos.x,
        player.pos.y,
        player.size.x,
        player.size.y,
    );
    let hitbox = world.inset(HITBOX_INSET);

    for obstacle in level.obstacles() {
        if obstacle.rect.left() > hitbox.right() + SCAN_MARGIN {
            break;
        }
        if obstacle.rect.right() < world.left() {
            continue;
        }

        match obstacle.kind {
            ObstacleKind::Spike => {
                if hitbox.overlaps(&obstacle.rect) {
                    kill(player, camera_x, events);
                }
            }
            ObstacleKind::Block => {
                if hitbox.overlaps(&obstacle.rect) {
                    // Landing only if the bottom edge started this tick at
                    // or above the block top, within tolerance; anything
                    // deeper is a side or underside impact.
                    if player.prev_bottom() <= obstacle.rect.top() + LANDING_TOLERANCE {
                        player.pos.y = obstacle.rect.top() - player.size.y;
                        player.dy = 0.0;
                        player.on_ground = true;
                    } else {
                        kill(player, camera_x, events);
                    }
                }
            }
            ObstacleKind::Portal => {
                // Trigger volume: any overlap with the full box counts.
                if world.overlaps(&obstacle.rect) {
                    if let Some(target) = obstacle.target {
                        if player.mode != target {
                            player.mode = target;
                            events.push(SimEvent::ModeChange { mode: target });
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::level::Obstacle;

    /// Block at world x 1000 with its top surface at y 500
    fn one_block_level() -> Level {
        Level::new(vec![Obstacle::block(1000.0, 500.0, 40.0, 40.0)], 2000.0).unwrap()
    }

    /// Camera offset that centers the player's box on world x ~1010..1044
    const CAMERA: f32 = 710.0;

    #[test]
    fn test_landing_on_block_top() {
        let mut player = Player::spawn();
        player.dy = 10.0;
        player.pos.y = 480.0; // previous bottom: 480 - 10 + 34 = 504 <= 512
        player.on_ground = false;
        let mut events = Vec::new();

        resolve_obstacles(&mut player, CAMERA, &one_block_level(), &mut events);

        assert!(!player.dead);
        assert!(player.on_ground);
        assert_eq!(player.pos.y, 500.0 - 34.0);
        assert_eq!(player.dy, 0.0);
        assert!(events.is_empty());
    }

    #[test]
    fn test_side_impact_is_fatal() {
        let mut player = Player::spawn();
        player.dy = 2.0;
        player.pos.y = 490.0; // previous bottom: 522 > 512
        player.on_ground = false;
        let mut events = Vec::new();

        resolve_obstacles(&mut player, CAMERA, &one_block_level(), &mut events);

        assert!(player.dead);
        assert!(matches!(events.as_slice(), [SimEvent::Death { .. }]));
    }

    #[test]
    fn test_spike_is_fatal_from_any_direction() {
        let level = Level::new(vec![Obstacle::spike(1000.0, 500.0)], 2000.0).unwrap();
        let mut player = Player::spawn();
        player.dy = -4.0; // moving upward into it
        player.pos.y = 490.0;
        let mut events = Vec::new();

        resolve_obstacles(&mut player, CAMERA, &level, &mut events);

        assert!(player.dead);
    }

    #[test]
    fn test_portal_switches_mode_without_touching_velocity() {
        let level = Level::new(vec![Obstacle::portal(1000.0, Mode::Ship)], 2000.0).unwrap();
        let mut player = Player::spawn();
        player.dy = 3.5;
        player.pos.y = 200.0;
        let mut events = Vec::new();

        resolve_obstacles(&mut player, CAMERA, &level, &mut events);

        assert_eq!(player.mode, Mode::Ship);
        assert_eq!(player.dy, 3.5);
        assert!(!player.dead);
        assert_eq!(events, vec![SimEvent::ModeChange { mode: Mode::Ship }]);

        // Still overlapping next tick: no duplicate event
        resolve_obstacles(&mut player, CAMERA, &level, &mut events);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_ground_clamp_grounds_player() {
        let mut player = Player::spawn();
        player.pos.y = GROUND_Y - 30.0; // bottom past the ground line
        player.dy = 5.0;
        player.on_ground = false;
        let mut events = Vec::new();

        resolve_world_bounds(&mut player, 0.0, &mut events);

        assert_eq!(player.pos.y, GROUND_Y - player.size.y);
        assert_eq!(player.dy, 0.0);
        assert!(player.on_ground);
        assert!(!player.dead);
    }

    #[test]
    fn test_ceiling_fatal_only_for_ship_and_wave() {
        for (mode, fatal) in [
            (Mode::Cube, false),
            (Mode::Ship, true),
            (Mode::Wave, true),
            (Mode::Ball, false),
            (Mode::Ufo, false),
            (Mode::Robot, false),
        ] {
            let mut player = Player::spawn();
            player.mode = mode;
            player.pos.y = -5.0;
            player.dy = -9.0;
            let mut events = Vec::new();

            resolve_world_bounds(&mut player, 0.0, &mut events);

            assert_eq!(player.pos.y, 0.0);
            assert_eq!(player.dy, 0.0);
            assert_eq!(player.dead, fatal, "mode {:?}", mode);
        }
    }

    #[test]
    fn test_death_is_idempotent() {
        let mut player = Player::spawn();
        let mut events = Vec::new();
        kill(&mut player, 100.0, &mut events);
        let snapshot = player.clone();
        kill(&mut player, 100.0, &mut events);

        assert_eq!(events.len(), 1);
        assert_eq!(player.dead, snapshot.dead);
        assert_eq!(player.pos, snapshot.pos);
    }

    #[test]
    fn test_obstacles_behind_and_far_ahead_are_ignored() {
        let level = Level::new(
            vec![
                Obstacle::spike(100.0, 500.0),  // far behind
                Obstacle::spike(5000.0, 500.0), // far ahead
            ],
            6000.0,
        )
        .unwrap();
        let mut player = Player::spawn();
        let mut events = Vec::new();

        resolve_obstacles(&mut player, CAMERA, &level, &mut events);

        assert!(!player.dead);
        assert!(events.is_empty());
    }
}
