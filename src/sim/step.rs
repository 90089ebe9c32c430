//! Fixed timestep simulation step
//!
//! One call to [`Simulation::step`] advances the game by exactly one frame.
//! This is the whole agent-facing API: `reset` starts an episode, `step`
//! applies one discrete action and reports `(observation, reward, done)`.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::observe::Observation;
use super::rect::Rect;
use super::state::{CrashCause, GameEvent, GamePhase, Obstacle, ObstacleKind, Player};
use crate::config::{CorridorPolicy, SimConfig};

/// Discrete actions, one per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Action {
    #[default]
    Noop,
    MoveUp,
    MoveDown,
    /// Push right, cancelling the leftward drift for this frame
    Accelerate,
}

impl Action {
    pub const ALL: [Action; 4] = [Action::Noop, Action::MoveUp, Action::MoveDown, Action::Accelerate];

    /// Map an agent's integer action; anything unrecognized is a no-op
    pub fn from_index(index: i64) -> Self {
        match index {
            1 => Action::MoveUp,
            2 => Action::MoveDown,
            3 => Action::Accelerate,
            _ => Action::Noop,
        }
    }

    pub fn index(self) -> u8 {
        match self {
            Action::Noop => 0,
            Action::MoveUp => 1,
            Action::MoveDown => 2,
            Action::Accelerate => 3,
        }
    }
}

/// Result of one `step`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepOutcome {
    pub observation: Observation,
    pub reward: f32,
    pub done: bool,
}

/// Owns all per-frame game state
#[derive(Debug, Clone)]
pub struct Simulation {
    config: SimConfig,
    seed: u64,
    rng: Pcg32,
    phase: GamePhase,
    player: Player,
    /// Live obstacles in spawn order
    obstacles: Vec<Obstacle>,
    score: u64,
    high_score: u64,
    game_speed: f64,
    spawn_cooldown: i32,
    /// Background fence offset (cosmetic)
    scroll_x: f32,
    /// Frames stepped this episode
    frame: u64,
    next_id: u32,
    /// NewHighScore already emitted this episode
    record_announced: bool,
    events: Vec<GameEvent>,
}

impl Simulation {
    /// Create a simulation and start the first episode.
    ///
    /// An invalid config is replaced by the defaults.
    pub fn new(config: SimConfig, seed: u64) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(err) => {
                log::warn!("{err}; falling back to default simulation config");
                SimConfig::default()
            }
        };

        let mut sim = Self {
            player: Player::new(0, 0, config.player_w, config.player_h),
            config,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Running,
            obstacles: Vec::new(),
            score: 0,
            high_score: 0,
            game_speed: 0.0,
            spawn_cooldown: 0,
            scroll_x: 0.0,
            frame: 0,
            next_id: 1,
            record_announced: false,
            events: Vec::new(),
        };
        sim.reset();
        sim
    }

    /// Start from a previously persisted record
    pub fn with_high_score(mut self, high_score: u64) -> Self {
        self.high_score = high_score;
        self
    }

    /// Reset to the starting state and return the initial observation
    pub fn reset(&mut self) -> Observation {
        let cfg = &self.config;

        self.score = 0;
        self.phase = GamePhase::Running;
        self.game_speed = cfg.speed_min;
        self.scroll_x = 0.0;
        self.frame = 0;
        self.record_announced = false;
        self.spawn_cooldown = self
            .rng
            .random_range(cfg.spawn_min_frames..=cfg.spawn_max_frames);

        self.obstacles.clear();
        self.events.clear();

        let x = cfg.width / 2 - cfg.player_w / 2;
        let y = cfg.height / 2 - cfg.player_h / 2;
        self.player = Player::new(x, y, cfg.player_w, cfg.player_h);
        self.player.rect.clamp_y(cfg.corridor_top(), cfg.corridor_bottom());

        log::info!(
            "Episode reset (seed {}, first spawn in {} frames)",
            self.seed,
            self.spawn_cooldown
        );
        self.observe()
    }

    /// Advance the game by one frame
    pub fn step(&mut self, action: Action) -> StepOutcome {
        // Terminal: keep reporting the same state with no reward
        if self.phase == GamePhase::Over {
            return self.outcome(0.0);
        }
        self.frame += 1;

        // Difficulty ramps up every frame regardless of input
        self.game_speed = (self.game_speed + self.config.speed_growth).min(self.config.speed_max);

        // Default is a slow drift left; actions override for this frame only
        self.player.drift_left(self.config.drift_x);
        match action {
            Action::Noop => {}
            Action::MoveUp => self.player.move_up(self.config.move_step),
            Action::MoveDown => self.player.move_down(self.config.move_step),
            Action::Accelerate => self.player.move_right(self.config.accel_x),
        }
        self.player.update();

        // Bounds
        let (top, bottom) = (self.config.corridor_top(), self.config.corridor_bottom());
        let left_corridor = !self.player.rect.within_y(top, bottom);
        self.player.rect.clamp_x(0, self.config.width);
        self.player.rect.clamp_y(top, bottom);

        if left_corridor && self.config.corridor == CorridorPolicy::Crash {
            return self.crash(CrashCause::Corridor);
        }
        if self.player.rect.left() <= 0 {
            return self.crash(CrashCause::LeftEdge);
        }

        // Spawning
        self.spawn_cooldown -= 1;
        if self.spawn_cooldown <= 0 {
            self.spawn_obstacle();
        }

        // Obstacles
        let (base_speed, game_speed) = (self.config.obstacle_base_speed, self.game_speed);
        for obstacle in &mut self.obstacles {
            obstacle.update(base_speed, game_speed);
        }
        self.obstacles.retain(|o| !o.is_off_screen());

        let cat = self.player.rect;
        if self.obstacles.iter().any(|o| o.rect.intersects(&cat)) {
            return self.crash(CrashCause::Obstacle);
        }

        // Survived the frame
        self.score += 1;
        self.record_score();

        let width = self.config.width as f32;
        let speed_norm = self.config.speed_norm(game_speed);
        self.scroll_x += (0.2 * game_speed * (1.0 + speed_norm)) as f32;
        if self.scroll_x >= width {
            self.scroll_x -= width;
        }

        self.outcome(self.config.survive_reward)
    }

    /// Current state vector
    pub fn observe(&self) -> Observation {
        Observation::capture(&self.config, &self.player, &self.obstacles, self.game_speed)
    }

    /// Insert an obstacle directly (scripted scenarios and tests)
    pub fn spawn_obstacle_at(&mut self, rect: Rect, kind: ObstacleKind) -> u32 {
        let id = self.next_entity_id();
        self.obstacles.push(Obstacle { id, kind, rect });
        id
    }

    /// Take the events queued since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::Over
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn high_score(&self) -> u64 {
        self.high_score
    }

    pub fn game_speed(&self) -> f64 {
        self.game_speed
    }

    pub fn spawn_cooldown(&self) -> i32 {
        self.spawn_cooldown
    }

    pub fn scroll_x(&self) -> f32 {
        self.scroll_x
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    fn outcome(&self, reward: f32) -> StepOutcome {
        StepOutcome {
            observation: self.observe(),
            reward,
            done: self.is_over(),
        }
    }

    fn crash(&mut self, cause: CrashCause) -> StepOutcome {
        self.phase = GamePhase::Over;
        self.record_score();
        self.events.push(GameEvent::Crashed {
            cause,
            score: self.score,
        });
        log::info!(
            "Episode over after {} frames ({:?}), score {}, high score {}",
            self.frame,
            cause,
            self.score,
            self.high_score
        );
        self.outcome(self.config.crash_penalty)
    }

    fn record_score(&mut self) {
        if self.score > self.high_score {
            self.high_score = self.score;
            if !self.record_announced {
                self.record_announced = true;
                self.events.push(GameEvent::NewHighScore { score: self.score });
            }
        }
    }

    fn spawn_obstacle(&mut self) {
        let cfg = &self.config;
        let top = cfg.corridor_top();
        let y_max = top.max(cfg.corridor_bottom() - cfg.obstacle_min_h);
        let (w_range, h_range) = (
            cfg.obstacle_min_w..=cfg.obstacle_max_w,
            cfg.obstacle_min_h..=cfg.obstacle_max_h,
        );
        let spawn_range = cfg.spawn_min_frames..=cfg.spawn_max_frames;
        let (width, jitter, floor) = (cfg.width, cfg.spawn_x_jitter, cfg.spawn_floor_frames);

        let y = self.rng.random_range(top..=y_max);
        let x = width.saturating_add(self.rng.random_range(0..=jitter));
        let w = self.rng.random_range(w_range);
        let h = self.rng.random_range(h_range);
        let kind = ObstacleKind::ALL[self.rng.random_range(0..ObstacleKind::ALL.len())];

        let id = self.spawn_obstacle_at(Rect::new(x, y, w, h), kind);
        self.events.push(GameEvent::ObstacleSpawned { id, kind });

        // Faster game -> shorter cooldown -> denser field
        let base = self.rng.random_range(spawn_range);
        self.spawn_cooldown = ((f64::from(base) / self.game_speed) as i32).max(floor);

        log::debug!(
            "Spawned {} #{id} at ({x}, {y}) {w}x{h}, next in {} frames",
            kind.as_str(),
            self.spawn_cooldown
        );
    }
}
