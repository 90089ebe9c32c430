//! State vector handed to control agents

use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::state::{Obstacle, Player};
use crate::config::SimConfig;

/// Normalized view of the game, every field in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Observation {
    /// Top of the cat over the play-area height
    pub player_y: f32,
    /// Gap to the nearest obstacle ahead over the play-area width (1.0 if none)
    pub obstacle_distance: f32,
    /// Top of that obstacle over the play-area height (0.0 if none)
    pub obstacle_y: f32,
    /// Game speed mapped from [min, max]
    pub speed: f32,
}

impl Observation {
    /// Build the observation from the current entities
    pub fn capture(
        config: &SimConfig,
        player: &Player,
        obstacles: &[Obstacle],
        game_speed: f64,
    ) -> Self {
        let width = config.width as f32;
        let height = config.height as f32;
        let cat = &player.rect;

        let (distance, obstacle_y) = match nearest_ahead(cat, obstacles) {
            Some(ahead) => {
                let gap = (ahead.rect.left() - cat.right()).max(0) as f32;
                (gap / width, ahead.rect.top() as f32 / height)
            }
            None => (1.0, 0.0),
        };

        Self {
            player_y: unit(cat.top() as f32 / height),
            obstacle_distance: unit(distance),
            obstacle_y: unit(obstacle_y),
            speed: unit(config.speed_norm(game_speed) as f32),
        }
    }

    /// `[player_y, distance_to_next_obstacle, next_obstacle_y, game_speed]`
    pub fn to_array(&self) -> [f32; 4] {
        [self.player_y, self.obstacle_distance, self.obstacle_y, self.speed]
    }
}

impl From<Observation> for [f32; 4] {
    fn from(obs: Observation) -> Self {
        obs.to_array()
    }
}

/// Obstacle whose center is at or right of the cat's center with the
/// smallest center; the first one wins on ties
pub fn nearest_ahead<'a>(cat: &Rect, obstacles: &'a [Obstacle]) -> Option<&'a Obstacle> {
    let cat_x = cat.center_x();
    obstacles
        .iter()
        .filter(|o| o.rect.center_x() >= cat_x)
        .min_by_key(|o| o.rect.center_x())
}

#[inline]
fn unit(v: f32) -> f32 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}
