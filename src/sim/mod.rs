//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one step = one frame)
//! - Seeded RNG only
//! - Stable iteration order (obstacles in spawn order)
//! - No rendering, audio or platform dependencies

pub mod observe;
pub mod rect;
pub mod state;
pub mod step;

pub use observe::{Observation, nearest_ahead};
pub use rect::Rect;
pub use state::{CrashCause, GameEvent, GamePhase, Obstacle, ObstacleKind, Player, obstacle_step};
pub use step::{Action, Simulation, StepOutcome};
