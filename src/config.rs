//! Simulation tuning
//!
//! Every gameplay constant lives in [`SimConfig`] and is handed to the
//! simulation at construction. Defaults come from [`crate::consts`]; a JSON
//! file may override any subset of fields.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// What happens when the cat tries to leave the vertical play corridor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CorridorPolicy {
    /// Position is clamped back into the corridor, no penalty
    #[default]
    Clamp,
    /// Leaving the corridor ends the episode with the crash penalty
    Crash,
}

impl CorridorPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            CorridorPolicy::Clamp => "clamp",
            CorridorPolicy::Crash => "crash",
        }
    }
}

impl fmt::Display for CorridorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Game tuning passed into [`crate::Simulation::new`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // === Play area ===
    /// Internal canvas width
    pub width: i32,
    /// Internal canvas height
    pub height: i32,
    /// Sky band above the corridor
    pub margin_top: i32,
    /// Fence band below the corridor
    pub margin_bottom: i32,
    /// Vertical corridor exit behaviour
    pub corridor: CorridorPolicy,

    // === Player ===
    pub player_w: i32,
    pub player_h: i32,
    /// Vertical impulse for a single up/down action
    pub move_step: i32,
    /// Horizontal push while accelerating
    pub accel_x: i32,
    /// Horizontal drift (leftward) otherwise
    pub drift_x: i32,

    // === Obstacles ===
    pub obstacle_min_w: i32,
    pub obstacle_max_w: i32,
    pub obstacle_min_h: i32,
    pub obstacle_max_h: i32,
    /// Leftward pixels per frame at speed 1.0
    pub obstacle_base_speed: f64,
    pub spawn_min_frames: i32,
    pub spawn_max_frames: i32,
    pub spawn_floor_frames: i32,
    pub spawn_x_jitter: i32,

    // === World speed ===
    pub speed_min: f64,
    pub speed_max: f64,
    pub speed_growth: f64,

    // === Rewards ===
    pub survive_reward: f32,
    pub crash_penalty: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: INTERNAL_W,
            height: INTERNAL_H,
            margin_top: PATH_MARGIN_TOP,
            margin_bottom: PATH_MARGIN_BOTTOM,
            corridor: CorridorPolicy::Clamp,

            player_w: CAT_W,
            player_h: CAT_H,
            move_step: CAT_SPEED_PER_STEP,
            accel_x: CAT_ACCEL_SPEED_X,
            drift_x: CAT_DRIFT_SPEED_X,

            obstacle_min_w: OBSTACLE_MIN_W,
            obstacle_max_w: OBSTACLE_MAX_W,
            obstacle_min_h: OBSTACLE_MIN_H,
            obstacle_max_h: OBSTACLE_MAX_H,
            obstacle_base_speed: OBSTACLE_BASE_SPEED,
            spawn_min_frames: SPAWN_MIN_FRAMES,
            spawn_max_frames: SPAWN_MAX_FRAMES,
            spawn_floor_frames: SPAWN_FLOOR_FRAMES,
            spawn_x_jitter: SPAWN_X_JITTER,

            speed_min: GAME_SPEED_MIN,
            speed_max: GAME_SPEED_MAX,
            speed_growth: WORLD_SPEED_GROWTH,

            survive_reward: SURVIVE_REWARD,
            crash_penalty: CRASH_PENALTY,
        }
    }
}

impl SimConfig {
    /// Same defaults with a different corridor policy
    pub fn with_corridor(mut self, corridor: CorridorPolicy) -> Self {
        self.corridor = corridor;
        self
    }

    /// Top edge of the play corridor
    #[inline]
    pub fn corridor_top(&self) -> i32 {
        self.margin_top
    }

    /// Bottom edge of the play corridor (exclusive)
    #[inline]
    pub fn corridor_bottom(&self) -> i32 {
        self.height - self.margin_bottom
    }

    /// Game speed mapped to [0, 1]
    pub fn speed_norm(&self, speed: f64) -> f64 {
        let span = self.speed_max - self.speed_min;
        if span <= 0.0 {
            return 0.0;
        }
        ((speed - self.speed_min) / span).clamp(0.0, 1.0)
    }

    /// Parse a (possibly partial) JSON config and validate it
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded simulation config from {}", path.display());
        Ok(config)
    }

    /// Reject configurations that would break simulation invariants
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));

        if self.width <= 0 || self.height <= 0 {
            return invalid(format!("play area must be positive, got {}x{}", self.width, self.height));
        }
        if self.player_w <= 0 || self.player_h <= 0 {
            return invalid(format!("player size must be positive, got {}x{}", self.player_w, self.player_h));
        }
        if self.player_w >= self.width {
            return invalid(format!("player width {} does not fit in width {}", self.player_w, self.width));
        }
        if self.margin_top < 0 || self.margin_bottom < 0 {
            return invalid("corridor margins must be non-negative".to_string());
        }
        if self.move_step < 0 || self.accel_x < 0 || self.drift_x < 0 {
            return invalid("player movement steps must be non-negative".to_string());
        }
        if self.width.checked_add(self.accel_x).is_none()
            || self.height.checked_add(self.move_step).is_none()
        {
            return invalid(format!(
                "player movement ({}, {}) overflows a {}x{} play area",
                self.accel_x, self.move_step, self.width, self.height
            ));
        }
        let corridor_h = self.corridor_bottom().checked_sub(self.corridor_top());
        if corridor_h.is_none_or(|h| h < self.player_h) {
            return invalid(format!(
                "corridor {}..{} is shorter than the player ({})",
                self.corridor_top(),
                self.corridor_bottom(),
                self.player_h
            ));
        }
        if self.obstacle_min_w <= 0 || self.obstacle_min_h <= 0 {
            return invalid("obstacle sizes must be positive".to_string());
        }
        if self.obstacle_min_w > self.obstacle_max_w || self.obstacle_min_h > self.obstacle_max_h {
            return invalid("obstacle size bounds are inverted".to_string());
        }
        if !(self.obstacle_base_speed >= 0.0 && self.obstacle_base_speed.is_finite()) {
            return invalid("obstacle base speed must be finite and non-negative".to_string());
        }
        if self.spawn_floor_frames < 1 || self.spawn_min_frames < 1 {
            return invalid("spawn cooldowns must be at least one frame".to_string());
        }
        if self.spawn_min_frames > self.spawn_max_frames {
            return invalid(format!(
                "spawn range {}..={} is inverted",
                self.spawn_min_frames, self.spawn_max_frames
            ));
        }
        if self.spawn_x_jitter < 0 {
            return invalid("spawn jitter must be non-negative".to_string());
        }
        // Rightmost spawned edge: width + jitter + widest obstacle
        let spawn_reach = self
            .width
            .checked_add(self.spawn_x_jitter)
            .and_then(|x| x.checked_add(self.obstacle_max_w));
        if spawn_reach.is_none() {
            return invalid(format!(
                "spawn position {} + {} (+ obstacle width {}) overflows",
                self.width, self.spawn_x_jitter, self.obstacle_max_w
            ));
        }
        if !(self.speed_min > 0.0 && self.speed_min <= self.speed_max && self.speed_max.is_finite()) {
            return invalid(format!(
                "speed bounds must satisfy 0 < min <= max < inf, got [{}, {}]",
                self.speed_min, self.speed_max
            ));
        }
        if !(self.speed_growth >= 0.0 && self.speed_growth.is_finite()) {
            return invalid("speed growth must be finite and non-negative".to_string());
        }
        Ok(())
    }
}

/// Errors from loading a [`SimConfig`]
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read config: {err}"),
            Self::Parse(err) => write!(f, "failed to parse config: {err}"),
            Self::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}
