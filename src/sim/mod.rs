//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod level;
pub mod modes;
pub mod rect;
pub mod state;
pub mod tick;

pub use level::{generate, Level, LevelError, Obstacle, ObstacleKind};
pub use modes::ModeParams;
pub use rect::Rect;
pub use state::{GameState, Mode, Player, SimEvent};
pub use tick::{tick, FixedTimestep, TickInput};
