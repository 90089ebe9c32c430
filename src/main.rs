//! Halloween Run entry point
//!
//! Runs episodes headlessly with a built-in policy and prints a summary per
//! episode. The graphical frontend lives outside this crate.

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, ValueEnum};

use halloween_run::autopilot::{create_policy, policy_ids, run_episode};
use halloween_run::consts::HIGHSCORE_FILE;
use halloween_run::{CorridorPolicy, Game, HighScoreStore, SimConfig};

#[derive(Parser, Debug)]
#[command(name = "halloween-run")]
#[command(about = "Pixelated Halloween side-scroller, played headlessly by a built-in policy")]
struct Cli {
    /// RNG seed for the simulation and the policy
    #[arg(long, default_value_t = 1)]
    seed: u64,
    /// Number of episodes to play
    #[arg(long, default_value_t = 1)]
    episodes: u32,
    /// Frame limit per episode
    #[arg(long, default_value_t = 20_000)]
    max_frames: u64,
    /// Control policy
    #[arg(long, default_value = "dodger")]
    policy: String,
    /// JSON file overriding simulation tuning
    #[arg(long)]
    config: Option<PathBuf>,
    /// High score file
    #[arg(long, default_value = HIGHSCORE_FILE)]
    highscore: PathBuf,
    /// Override the vertical corridor behaviour from the config
    #[arg(long, value_enum)]
    corridor: Option<CliCorridor>,
    /// Print summaries as JSON lines
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CliCorridor {
    Clamp,
    Crash,
}

impl From<CliCorridor> for CorridorPolicy {
    fn from(value: CliCorridor) -> Self {
        match value {
            CliCorridor::Clamp => CorridorPolicy::Clamp,
            CliCorridor::Crash => CorridorPolicy::Crash,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    log::info!("Halloween Run (native) starting");

    let mut config = match &cli.config {
        Some(path) => SimConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => SimConfig::default(),
    };
    if let Some(corridor) = cli.corridor {
        config.corridor = corridor.into();
    }
    config.validate().context("validating config")?;
    log::info!("Corridor policy: {}", config.corridor);

    let mut policy = create_policy(&cli.policy, cli.seed).ok_or_else(|| {
        anyhow!(
            "unknown policy '{}' (available: {})",
            cli.policy,
            policy_ids().join(", ")
        )
    })?;
    log::info!("Policy {}: {}", policy.id(), policy.description());

    let store = HighScoreStore::new(&cli.highscore);
    let mut game = Game::new(config, cli.seed, store);

    for episode in 0..cli.episodes {
        if episode > 0 {
            game.restart();
        }
        policy.reset(cli.seed.wrapping_add(u64::from(episode)));
        let summary = run_episode(policy.as_mut(), &mut game, cli.max_frames);

        if cli.json {
            println!("{}", serde_json::to_string(&summary)?);
        } else {
            println!(
                "episode {:>3}  frames {:>6}  score {:>6}  high {:>6}  reward {:>9.1}{}",
                summary.episode,
                summary.frames,
                summary.score,
                summary.high_score,
                summary.total_reward,
                if summary.done { "" } else { "  (frame limit)" }
            );
        }
    }

    game.shutdown();
    Ok(())
}
