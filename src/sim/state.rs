//! Entities and core simulation types
//!
//! The cat and the obstacles are plain records with a rectangle and a
//! per-frame update; nothing here knows about rendering.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;

/// Current phase of an episode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Episode in progress
    Running,
    /// Episode ended, waiting for reset
    Over,
}

/// Why an episode ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrashCause {
    /// Drifted into the left edge of the screen
    LeftEdge,
    /// Left the vertical play corridor (only with `CorridorPolicy::Crash`)
    Corridor,
    /// Hit an obstacle
    Obstacle,
}

/// Things that happened during a step, for the shell to react to
/// (sound effects, persistence)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    ObstacleSpawned { id: u32, kind: ObstacleKind },
    /// First frame of the episode that beats the stored record
    NewHighScore { score: u64 },
    Crashed { cause: CrashCause, score: u64 },
}

/// The player's cat
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub rect: Rect,
    /// Pending one-frame movement, cleared by `update`
    #[serde(skip)]
    delta: IVec2,
}

impl Player {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self {
            rect: Rect::new(x, y, w, h),
            delta: IVec2::ZERO,
        }
    }

    pub fn move_up(&mut self, step: i32) {
        self.delta.y = -step;
    }

    pub fn move_down(&mut self, step: i32) {
        self.delta.y = step;
    }

    pub fn move_right(&mut self, speed: i32) {
        self.delta.x = speed;
    }

    pub fn drift_left(&mut self, speed: i32) {
        self.delta.x = -speed;
    }

    /// Movement queued for the next `update`
    pub fn pending_delta(&self) -> IVec2 {
        self.delta
    }

    /// Apply the queued movement for this frame, then forget it
    pub fn update(&mut self) {
        self.rect.pos += self.delta;
        self.delta = IVec2::ZERO;
    }
}

/// Obstacle flavours (cosmetic only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    Pumpkin,
    Ghost,
    Bat,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 3] = [ObstacleKind::Pumpkin, ObstacleKind::Ghost, ObstacleKind::Bat];

    pub fn as_str(&self) -> &'static str {
        match self {
            ObstacleKind::Pumpkin => "pumpkin",
            ObstacleKind::Ghost => "ghost",
            ObstacleKind::Bat => "bat",
        }
    }

    /// Placeholder fill colour when no sprite frames are available
    pub fn color(&self) -> [u8; 3] {
        match self {
            ObstacleKind::Pumpkin => [239, 125, 14],
            ObstacleKind::Ghost => [200, 200, 255],
            ObstacleKind::Bat => [70, 0, 120],
        }
    }
}

/// A pumpkin, ghost or bat scrolling toward the cat
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    pub rect: Rect,
}

impl Obstacle {
    /// Move left by the per-frame step for the current game speed
    pub fn update(&mut self, base_speed: f64, game_speed: f64) {
        self.rect.pos.x = self.rect.pos.x.saturating_sub(obstacle_step(base_speed, game_speed));
    }

    /// Right edge has passed the left boundary
    #[inline]
    pub fn is_off_screen(&self) -> bool {
        self.rect.right() < 0
    }
}

/// Pixels an obstacle travels in one frame, rounded half to even
pub fn obstacle_step(base_speed: f64, game_speed: f64) -> i32 {
    (base_speed * game_speed).round_ties_even() as i32
}
