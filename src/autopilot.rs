//! Built-in control agents
//!
//! Headless runs need something to pick actions. These policies only use the
//! public observation and simulation accessors, exactly like an external
//! agent would.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::shell::Game;
use crate::sim::{Action, Observation, Rect, Simulation};

pub trait Policy {
    fn id(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn reset(&mut self, seed: u64);
    fn act(&mut self, observation: &Observation, sim: &Simulation) -> Action;
}

/// Never touches the controls; drifts into the left edge
#[derive(Debug, Default)]
pub struct IdlePolicy;

impl Policy for IdlePolicy {
    fn id(&self) -> &'static str {
        "idle"
    }

    fn description(&self) -> &'static str {
        "Always no-op"
    }

    fn reset(&mut self, _seed: u64) {}

    fn act(&mut self, _observation: &Observation, _sim: &Simulation) -> Action {
        Action::Noop
    }
}

/// Uniformly random action each frame
#[derive(Debug)]
pub struct RandomPolicy {
    rng: Pcg32,
}

impl RandomPolicy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }
}

impl Policy for RandomPolicy {
    fn id(&self) -> &'static str {
        "random"
    }

    fn description(&self) -> &'static str {
        "Uniform random action every frame"
    }

    fn reset(&mut self, seed: u64) {
        self.rng = Pcg32::seed_from_u64(seed);
    }

    fn act(&mut self, _observation: &Observation, _sim: &Simulation) -> Action {
        Action::ALL[self.rng.random_range(0..Action::ALL.len())]
    }
}

/// Holds a cruising column and sidesteps obstacles that are about to hit
#[derive(Debug, Clone)]
pub struct DodgerPolicy {
    /// Preferred left edge as a fraction of the play-area width
    pub cruise: f32,
    /// Horizontal look-ahead in pixels
    pub lookahead: i32,
    /// Extra vertical clearance in pixels
    pub margin: i32,
}

impl Default for DodgerPolicy {
    fn default() -> Self {
        Self {
            cruise: 0.35,
            lookahead: 36,
            margin: 2,
        }
    }
}

impl DodgerPolicy {
    /// Closest obstacle that is still in front of the cat, within look-ahead,
    /// and overlaps its row (with margin)
    fn threat(&self, cat: &Rect, sim: &Simulation) -> Option<Rect> {
        sim.obstacles()
            .iter()
            .map(|o| o.rect)
            .filter(|r| r.right() > cat.left() && r.left() - cat.right() <= self.lookahead)
            .filter(|r| r.top() < cat.bottom() + self.margin && cat.top() < r.bottom() + self.margin)
            .min_by_key(|r| r.left())
    }
}

impl Policy for DodgerPolicy {
    fn id(&self) -> &'static str {
        "dodger"
    }

    fn description(&self) -> &'static str {
        "Cruises at a fixed column and steps out of the way of incoming obstacles"
    }

    fn reset(&mut self, _seed: u64) {}

    fn act(&mut self, _observation: &Observation, sim: &Simulation) -> Action {
        let cfg = sim.config();
        let cat = sim.player().rect;

        if let Some(threat) = self.threat(&cat, sim) {
            let room_above = threat.top() - cfg.corridor_top();
            let room_below = cfg.corridor_bottom() - threat.bottom();
            let cat_mid = cat.top() + cat.height() / 2;
            let threat_mid = threat.top() + threat.height() / 2;

            // Go around on the side the cat is already leaning toward,
            // unless there is no room for it there
            let fits_above = room_above >= cat.height() + self.margin;
            let fits_below = room_below >= cat.height() + self.margin;
            let go_up = match (fits_above, fits_below) {
                (true, false) => true,
                (false, true) => false,
                _ => cat_mid < threat_mid || (cat_mid == threat_mid && room_above >= room_below),
            };
            return if go_up { Action::MoveUp } else { Action::MoveDown };
        }

        let cruise_x = (cfg.width as f32 * self.cruise) as i32;
        if cat.left() < cruise_x {
            Action::Accelerate
        } else {
            Action::Noop
        }
    }
}

/// Ids accepted by [`create_policy`]
pub fn policy_ids() -> &'static [&'static str] {
    &["idle", "random", "dodger"]
}

pub fn create_policy(id: &str, seed: u64) -> Option<Box<dyn Policy>> {
    match id {
        "idle" => Some(Box::new(IdlePolicy)),
        "random" => Some(Box::new(RandomPolicy::new(seed))),
        "dodger" => Some(Box::new(DodgerPolicy::default())),
        _ => None,
    }
}

/// Result of one headless episode
#[derive(Debug, Clone, Serialize)]
pub struct EpisodeSummary {
    pub policy: String,
    pub episode: u32,
    pub seed: u64,
    pub frames: u64,
    pub score: u64,
    pub high_score: u64,
    pub total_reward: f64,
    /// False when the frame limit was hit first
    pub done: bool,
}

/// Play the game's current episode to the end or `max_frames`
pub fn run_episode(policy: &mut dyn Policy, game: &mut Game, max_frames: u64) -> EpisodeSummary {
    let mut observation = game.sim().observe();
    let mut total_reward = 0.0f64;
    let mut done = game.sim().is_over();

    while !done && game.sim().frame() < max_frames {
        let action = policy.act(&observation, game.sim());
        let outcome = game.tick(action);
        total_reward += f64::from(outcome.reward);
        observation = outcome.observation;
        done = outcome.done;
    }

    let sim = game.sim();
    EpisodeSummary {
        policy: policy.id().to_string(),
        episode: game.episodes(),
        seed: sim.seed(),
        frames: sim.frame(),
        score: sim.score(),
        high_score: sim.high_score(),
        total_reward,
        done,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::highscore::HighScoreStore;
    use crate::sim::ObstacleKind;

    fn game(dir: &tempfile::TempDir, config: SimConfig, seed: u64) -> Game {
        Game::new(config, seed, HighScoreStore::new(dir.path().join("highscore.txt")))
    }

    #[test]
    fn test_every_id_builds() {
        for id in policy_ids() {
            let policy = create_policy(id, 0).unwrap();
            assert_eq!(policy.id(), *id);
        }
        assert!(create_policy("nope", 0).is_none());
    }

    #[test]
    fn test_idle_drifts_out() {
        let dir = tempfile::tempdir().unwrap();
        let config = SimConfig {
            spawn_min_frames: 1_000_000,
            spawn_max_frames: 1_000_000,
            ..Default::default()
        };
        let mut game = game(&dir, config, 1);
        let summary = run_episode(&mut IdlePolicy, &mut game, 10_000);
        assert!(summary.done);
        assert_eq!(summary.frames, 95);
        assert_eq!(summary.score, 94);
        let expected = 94.0 * f64::from(0.1f32) + f64::from(-100.0f32);
        assert!((summary.total_reward - expected).abs() < 1e-6);
    }

    #[test]
    fn test_frame_limit() {
        let dir = tempfile::tempdir().unwrap();
        let mut game = game(&dir, SimConfig::default(), 2);
        let mut policy = RandomPolicy::new(2);
        let summary = run_episode(&mut policy, &mut game, 10);
        assert!(summary.frames <= 10);
        assert_eq!(summary.done, game.sim().is_over());
    }

    #[test]
    fn test_dodger_sidesteps_incoming_obstacle() {
        let dir = tempfile::tempdir().unwrap();
        let config = SimConfig {
            spawn_min_frames: 1_000_000,
            spawn_max_frames: 1_000_000,
            ..Default::default()
        };
        let mut game = game(&dir, config, 3);
        let cat = game.sim().player().rect;
        // Dead ahead, slightly below the cat's centre line
        game.sim_mut().spawn_obstacle_at(
            Rect::new(cat.right() + 20, cat.top() + 2, 10, 10),
            ObstacleKind::Ghost,
        );

        let mut policy = DodgerPolicy::default();
        let observation = game.sim().observe();
        assert_eq!(policy.act(&observation, game.sim()), Action::MoveUp);

        let summary = run_episode(&mut policy, &mut game, 120);
        assert!(!summary.done, "dodger should clear a single obstacle");
    }

    #[test]
    fn test_dodger_cruises_when_clear() {
        let dir = tempfile::tempdir().unwrap();
        let config = SimConfig {
            spawn_min_frames: 1_000_000,
            spawn_max_frames: 1_000_000,
            ..Default::default()
        };
        let mut game = game(&dir, config, 4);
        let mut policy = DodgerPolicy::default();
        let summary = run_episode(&mut policy, &mut game, 500);
        assert!(!summary.done);
        let cruise_x = (game.sim().config().width as f32 * policy.cruise) as i32;
        assert!((game.sim().player().rect.left() - cruise_x).abs() <= 2);
    }
}
