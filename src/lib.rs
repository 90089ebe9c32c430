//! Halloween Run - A pixelated side-scroller with an agent-friendly API
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player, obstacles, collisions, rewards)
//! - `config`: Explicit game tuning passed into the simulation
//! - `highscore`: Single-integer high score persistence
//! - `input`: Keyboard/gamepad snapshot to action mapping
//! - `shell`: Drives the simulation for a human or agent, handles restart
//! - `autopilot`: Built-in control policies for headless runs

pub mod autopilot;
pub mod config;
pub mod highscore;
pub mod input;
pub mod shell;
pub mod sim;

pub use config::{ConfigError, CorridorPolicy, SimConfig};
pub use highscore::{HighScoreError, HighScoreStore};
pub use shell::{FrameView, Game};
pub use sim::{Action, Observation, Simulation, StepOutcome};

/// Default game constants, all in internal pixel units
pub mod consts {
    /// Internal (low resolution) canvas; the renderer upscales 4x
    pub const INTERNAL_W: i32 = 200;
    pub const INTERNAL_H: i32 = 150;

    /// Cat (player) size and per-frame movement
    pub const CAT_W: i32 = 10;
    pub const CAT_H: i32 = 10;
    pub const CAT_SPEED_PER_STEP: i32 = 2;
    /// Rightward push while accelerating
    pub const CAT_ACCEL_SPEED_X: i32 = 2;
    /// Leftward drift when not accelerating
    pub const CAT_DRIFT_SPEED_X: i32 = 1;

    /// Obstacle size bounds (inclusive)
    pub const OBSTACLE_MIN_W: i32 = 8;
    pub const OBSTACLE_MAX_W: i32 = 14;
    pub const OBSTACLE_MIN_H: i32 = 8;
    pub const OBSTACLE_MAX_H: i32 = 14;
    /// Per-frame leftward speed at game speed 1.0
    pub const OBSTACLE_BASE_SPEED: f64 = 1.2;

    /// Sky above the path, fence below it
    pub const PATH_MARGIN_TOP: i32 = 40;
    pub const PATH_MARGIN_BOTTOM: i32 = 10;

    /// World speed multiplier bounds
    pub const GAME_SPEED_MIN: f64 = 1.0;
    pub const GAME_SPEED_MAX: f64 = 3.0;
    /// Speed gained every frame regardless of input
    pub const WORLD_SPEED_GROWTH: f64 = 0.001;

    /// Spawn cooldown range in frames, before speed scaling
    pub const SPAWN_MIN_FRAMES: i32 = 45;
    pub const SPAWN_MAX_FRAMES: i32 = 110;
    /// Cooldown never drops below this many frames
    pub const SPAWN_FLOOR_FRAMES: i32 = 20;
    /// Obstacles appear up to this far past the right edge
    pub const SPAWN_X_JITTER: i32 = 20;

    pub const SURVIVE_REWARD: f32 = 0.1;
    pub const CRASH_PENALTY: f32 = -100.0;

    pub const HIGHSCORE_FILE: &str = "highscore.txt";
}
