mod rollout;
mod stats;

pub use rollout::{EpisodeSummary, ParallelRollout, Rollout, episode_rng};
pub use stats::RolloutStats;
