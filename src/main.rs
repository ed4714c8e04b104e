use anyhow::Result;
use clap::Parser;
use gw_env::{Action, EnvironmentConfig, GridEnvironment};
use gw_grid::Grid;
use gw_rl_model::RandomPolicy;
use gw_rl_rollout::{ParallelRollout, Rollout, RolloutStats, episode_rng};
use rand::{SeedableRng, rngs::SmallRng};
use tracing::info;
use tracing_subscriber::EnvFilter;

const GRID: [[i32; 4]; 3] = [[0, 0, 0, 1], [0, 9, 0, -1], [0, 0, 0, 0]];

#[derive(Parser, Debug)]
#[command(name = "gw", version, about = "Run a random agent in a stochastic grid world")]
struct Cli {
    /// Number of episodes to run.
    #[arg(long, default_value_t = 10)]
    episodes: usize,

    /// Seed for the random source. Uses OS entropy when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Probability that the agent moves in the intended direction.
    #[arg(long, default_value_t = EnvironmentConfig::default().move_prob)]
    move_prob: f64,

    /// Reward for each step that does not end the episode.
    #[arg(long, default_value_t = EnvironmentConfig::default().default_reward, allow_hyphen_values = true)]
    default_reward: f64,

    /// Truncate episodes after this many steps.
    #[arg(long)]
    max_steps: Option<usize>,

    /// Run episodes across a thread pool.
    #[arg(long)]
    parallel: bool,

    /// Worker threads for --parallel. Defaults to the available parallelism.
    #[arg(long, requires = "parallel")]
    threads: Option<usize>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = EnvironmentConfig {
        move_prob: cli.move_prob,
        default_reward: cli.default_reward,
    };
    let grid = Grid::from_codes(&GRID)?;
    let mut env = GridEnvironment::new(grid, config)?;
    let policy = RandomPolicy::<Action>::new();
    let rollout = Rollout {
        max_steps: cli.max_steps,
    };

    info!(?config, episodes = cli.episodes, seed = ?cli.seed, "Starting rollout");

    let summaries = if cli.parallel {
        let seed = cli.seed.unwrap_or_else(rand::random);
        let parallel = ParallelRollout::new(rollout, cli.threads)?;
        parallel.run(|| env.clone(), &policy, seed, cli.episodes)
    } else {
        let mut rng = match cli.seed {
            Some(seed) => episode_rng(seed, 0),
            None => SmallRng::from_os_rng(),
        };
        rollout.run_episodes(&mut env, &policy, &mut rng, cli.episodes)
    };

    for (i, summary) in summaries.iter().enumerate() {
        println!("Episode {i}: Agent gets {} reward.", summary.total_reward);
    }

    if let Some(stats) = RolloutStats::from_summaries(&summaries) {
        info!(
            mean = stats.mean_reward,
            min = stats.min_reward,
            max = stats.max_reward,
            truncated = stats.truncated,
            "Rollout finished"
        );
    }

    Ok(())
}
