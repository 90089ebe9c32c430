//! Game shell
//!
//! Wraps the [`Simulation`] the way a frontend drives it: one `tick` per
//! frame, restart on accelerate after a crash, best-effort high score saves,
//! and a flat [`FrameView`] for whatever draws the frame.

use serde::Serialize;

use crate::config::SimConfig;
use crate::highscore::HighScoreStore;
use crate::sim::{Action, GameEvent, ObstacleKind, Rect, Simulation, StepOutcome};

/// An obstacle as the renderer sees it
#[derive(Debug, Clone, Serialize)]
pub struct ObstacleView {
    pub kind: ObstacleKind,
    pub rect: Rect,
    /// Fallback fill when sprite frames are missing
    pub color: [u8; 3],
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, Serialize)]
pub struct FrameView {
    pub frame: u64,
    pub player: Rect,
    pub obstacles: Vec<ObstacleView>,
    pub score: u64,
    pub high_score: u64,
    pub game_over: bool,
    pub scroll_x: f32,
    pub game_speed: f64,
}

/// Simulation plus persistence and restart handling
pub struct Game {
    sim: Simulation,
    store: HighScoreStore,
    /// Record most recently written to the store
    saved_high_score: u64,
    /// Episodes started, including the current one
    episodes: u32,
}

impl Game {
    /// Load the stored record and start the first episode
    pub fn new(config: SimConfig, seed: u64, store: HighScoreStore) -> Self {
        let high_score = store.load();
        Self {
            sim: Simulation::new(config, seed).with_high_score(high_score),
            store,
            saved_high_score: high_score,
            episodes: 1,
        }
    }

    /// Advance one frame with the player's action.
    ///
    /// After a crash, accelerate starts a new episode; anything else keeps
    /// returning the terminal outcome.
    pub fn tick(&mut self, action: Action) -> StepOutcome {
        let outcome = if self.sim.is_over() {
            if action == Action::Accelerate {
                self.restart();
                StepOutcome {
                    observation: self.sim.observe(),
                    reward: 0.0,
                    done: false,
                }
            } else {
                self.sim.step(action)
            }
        } else {
            self.sim.step(action)
        };

        for event in self.sim.drain_events() {
            if let GameEvent::Crashed { cause, score } = event {
                log::debug!("Crash ({cause:?}) at score {score}");
                self.persist_high_score();
            }
        }
        outcome
    }

    /// Start a new episode unconditionally
    pub fn restart(&mut self) {
        self.sim.reset();
        self.episodes += 1;
        log::info!("Episode {} started", self.episodes);
    }

    /// Persist the record before exit
    pub fn shutdown(&mut self) {
        self.persist_high_score();
    }

    pub fn view(&self) -> FrameView {
        FrameView {
            frame: self.sim.frame(),
            player: self.sim.player().rect,
            obstacles: self
                .sim
                .obstacles()
                .iter()
                .map(|o| ObstacleView {
                    kind: o.kind,
                    rect: o.rect,
                    color: o.kind.color(),
                })
                .collect(),
            score: self.sim.score(),
            high_score: self.sim.high_score(),
            game_over: self.sim.is_over(),
            scroll_x: self.sim.scroll_x(),
            game_speed: self.sim.game_speed(),
        }
    }

    pub fn sim(&self) -> &Simulation {
        &self.sim
    }

    pub fn sim_mut(&mut self) -> &mut Simulation {
        &mut self.sim
    }

    pub fn store(&self) -> &HighScoreStore {
        &self.store
    }

    pub fn episodes(&self) -> u32 {
        self.episodes
    }

    /// Write the record if it changed; failures are ignored and retried on
    /// the next crash or shutdown
    fn persist_high_score(&mut self) {
        let high_score = self.sim.high_score();
        if high_score == self.saved_high_score {
            return;
        }
        match self.store.save(high_score) {
            Ok(()) => self.saved_high_score = high_score,
            Err(err) => log::debug!("Ignoring high score save failure: {err}"),
        }
    }
}
