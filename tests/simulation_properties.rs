//! Agent-facing contract of the simulation, driven through the public API

use halloween_run::sim::{Action, GamePhase, ObstacleKind, Simulation};
use halloween_run::{CorridorPolicy, SimConfig};
use proptest::prelude::*;

fn action_strategy() -> impl Strategy<Value = i64> {
    // Include out-of-range integers, which must act as no-ops
    prop_oneof![0i64..4, -3i64..10]
}

fn corridor_strategy() -> impl Strategy<Value = CorridorPolicy> {
    prop_oneof![Just(CorridorPolicy::Clamp), Just(CorridorPolicy::Crash)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn invariants_hold_for_any_action_sequence(
        seed in any::<u64>(),
        corridor in corridor_strategy(),
        actions in prop::collection::vec(action_strategy(), 1..600),
    ) {
        let config = SimConfig::default().with_corridor(corridor);
        let mut sim = Simulation::new(config.clone(), seed);
        let obs = sim.reset();
        prop_assert!(obs.to_array().iter().all(|v| (0.0..=1.0).contains(v)));

        let mut last_speed = sim.game_speed();
        let mut last_score = sim.score();
        let mut ended = None;

        for raw in actions {
            let out = sim.step(Action::from_index(raw));

            // Normalized observation
            prop_assert!(out.observation.to_array().iter().all(|v| (0.0..=1.0).contains(v)));

            // Speed bounded and non-decreasing
            let speed = sim.game_speed();
            prop_assert!(speed >= config.speed_min && speed <= config.speed_max);
            prop_assert!(speed >= last_speed);
            last_speed = speed;

            // Score non-decreasing
            prop_assert!(sim.score() >= last_score);
            last_score = sim.score();

            // Player stays on screen and inside the corridor
            let cat = sim.player().rect;
            prop_assert!(cat.left() >= 0 && cat.right() <= config.width);
            prop_assert!(cat.top() >= config.corridor_top());
            prop_assert!(cat.bottom() <= config.corridor_bottom());

            // Obstacles keep non-negative size
            prop_assert!(sim.obstacles().iter().all(|o| o.rect.width() >= 0 && o.rect.height() >= 0));

            match ended {
                None if out.done => {
                    prop_assert_eq!(out.reward, config.crash_penalty);
                    prop_assert_eq!(sim.phase(), GamePhase::Over);
                    ended = Some((out.observation, sim.score()));
                }
                None => {
                    prop_assert_eq!(out.reward, config.survive_reward);
                }
                Some((terminal, score)) => {
                    prop_assert!(out.done);
                    prop_assert_eq!(out.reward, 0.0);
                    prop_assert_eq!(out.observation, terminal);
                    prop_assert_eq!(sim.score(), score);
                }
            }
        }

        prop_assert!(sim.high_score() >= sim.score());
        sim.reset();
        prop_assert_eq!(sim.score(), 0);
        prop_assert!(!sim.is_over());
        prop_assert_eq!(sim.game_speed(), config.speed_min);
    }
}

fn quiet_config() -> SimConfig {
    SimConfig {
        spawn_min_frames: 1_000_000,
        spawn_max_frames: 1_000_000,
        ..Default::default()
    }
}

#[test]
fn reset_starts_centered() {
    let mut sim = Simulation::new(SimConfig::default(), 11);
    sim.step(Action::Accelerate);
    sim.step(Action::MoveDown);
    sim.reset();

    let cfg = sim.config();
    let cat = sim.player().rect;
    assert_eq!(sim.score(), 0);
    assert!(!sim.is_over());
    assert_eq!(cat.left(), cfg.width / 2 - cfg.player_w / 2);
    assert_eq!(cat.top(), cfg.height / 2 - cfg.player_h / 2);
}

#[test]
fn noop_drifts_to_left_edge() {
    let mut sim = Simulation::new(quiet_config(), 12);
    let mut frames = 0u64;
    loop {
        let out = sim.step(Action::Noop);
        frames += 1;
        if out.done {
            assert_eq!(out.reward, -100.0);
            break;
        }
        assert_eq!(out.reward, 0.1);
        assert_eq!(sim.score(), frames);
        assert!(frames < 1_000, "drift never reached the edge");
    }
    assert_eq!(sim.score(), frames - 1);
}

#[test]
fn obstacle_on_player_ends_episode() {
    let mut sim = Simulation::new(quiet_config(), 13);
    let cat = sim.player().rect;
    sim.spawn_obstacle_at(cat, ObstacleKind::Pumpkin);
    let out = sim.step(Action::Noop);
    assert!(out.done);
    assert_eq!(out.reward, -100.0);
}

#[test]
fn accelerate_moves_right_and_stops_at_edge() {
    let mut sim = Simulation::new(quiet_config(), 14);
    let start = sim.player().rect.left();
    for _ in 0..10 {
        sim.step(Action::Accelerate);
    }
    assert_eq!(sim.player().rect.left(), start + 20);
    for _ in 0..500 {
        sim.step(Action::Accelerate);
        assert!(sim.player().rect.right() <= sim.config().width);
    }
}

#[test]
fn speed_saturates() {
    let config = SimConfig {
        speed_growth: 0.05,
        ..quiet_config()
    };
    let mut sim = Simulation::new(config, 15);
    for _ in 0..200 {
        sim.step(Action::Accelerate);
        assert!(sim.game_speed() <= sim.config().speed_max);
    }
    assert_eq!(sim.game_speed(), sim.config().speed_max);
}
