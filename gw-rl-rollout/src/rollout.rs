use std::{num::NonZeroUsize, thread::available_parallelism, time::Instant};

use gw_rl_model::{Environment, Policy};
use rand::{Rng, SeedableRng, rngs::SmallRng};
use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder, prelude::*};
use tracing::info;

use crate::RolloutStats;

/// Runs whole episodes of an environment under a policy.
#[derive(Debug, Clone, Copy)]
pub struct Rollout {
    /// Episodes still running after this many steps are truncated.
    pub max_steps: Option<usize>,
}

pub struct ParallelRollout {
    thread_pool: ThreadPool,
    rollout: Rollout,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EpisodeSummary<O> {
    pub total_reward: f64,
    pub steps: usize,
    pub final_state: O,
    pub terminated: bool,
    pub truncated: bool,
}

impl Default for Rollout {
    fn default() -> Self {
        Self {
            max_steps: Some(10_000),
        }
    }
}

impl Rollout {
    pub fn run_episode<E, P, R>(
        &self,
        env: &mut E,
        policy: &P,
        rng: &mut R,
    ) -> EpisodeSummary<E::Observation>
    where
        E: Environment,
        P: Policy<E::Observation, E::Action>,
        R: Rng + ?Sized,
    {
        let mut summary = EpisodeSummary {
            total_reward: 0.0,
            steps: 0,
            final_state: env.reset(),
            terminated: false,
            truncated: false,
        };

        loop {
            if self.max_steps.is_some_and(|max| summary.steps >= max) {
                summary.truncated = true;
                break;
            }

            let action = policy.react(&summary.final_state, rng);
            let step = env.step(action, rng);

            summary.steps += 1;
            // A step that could not act carries no reward.
            summary.total_reward += step.reward.unwrap_or(0.0);
            if let Some(state) = step.state {
                summary.final_state = state;
            }

            if step.done {
                summary.terminated = true;
                break;
            }
        }

        summary
    }

    pub fn run_episodes<E, P, R>(
        &self,
        env: &mut E,
        policy: &P,
        rng: &mut R,
        episodes: usize,
    ) -> Vec<EpisodeSummary<E::Observation>>
    where
        E: Environment,
        P: Policy<E::Observation, E::Action>,
        R: Rng + ?Sized,
    {
        let start = Instant::now();
        let summaries: Vec<_> = (0..episodes)
            .map(|_| self.run_episode(env, policy, rng))
            .collect();
        log_summaries(&summaries, start);
        summaries
    }

    /// Runs episodes sequentially, seeding episode `i` with [`episode_rng`].
    ///
    /// Produces the same summaries as [`ParallelRollout::run`] for the same
    /// seed.
    pub fn run_seeded<E, P>(
        &self,
        env: &mut E,
        policy: &P,
        seed: u64,
        episodes: usize,
    ) -> Vec<EpisodeSummary<E::Observation>>
    where
        E: Environment,
        P: Policy<E::Observation, E::Action>,
    {
        let start = Instant::now();
        let summaries: Vec<_> = (0..episodes)
            .map(|i| self.run_episode(env, policy, &mut episode_rng(seed, i)))
            .collect();
        log_summaries(&summaries, start);
        summaries
    }
}

impl ParallelRollout {
    pub fn new(rollout: Rollout, threads: Option<usize>) -> Result<Self, ThreadPoolBuildError> {
        let threads =
            threads.unwrap_or_else(|| available_parallelism().map_or(1, NonZeroUsize::get));
        info!("Initializing rollout thread pool with {} threads", threads);
        Ok(Self {
            thread_pool: ThreadPoolBuilder::new().num_threads(threads).build()?,
            rollout,
        })
    }

    pub fn threads(&self) -> usize {
        self.thread_pool.current_num_threads()
    }

    /// Runs `episodes` independent episodes across the thread pool. Each
    /// thread builds its own environment with `make_env`, and episode `i` is
    /// seeded with [`episode_rng`], so the results do not depend on
    /// scheduling.
    pub fn run<E, P, F>(
        &self,
        make_env: F,
        policy: &P,
        seed: u64,
        episodes: usize,
    ) -> Vec<EpisodeSummary<E::Observation>>
    where
        E: Environment,
        E::Observation: Send,
        P: Policy<E::Observation, E::Action>,
        F: Fn() -> E + Send + Sync,
    {
        let start = Instant::now();
        let rollout = self.rollout;
        let summaries: Vec<_> = self.thread_pool.install(|| {
            (0..episodes)
                .into_par_iter()
                .map_init(&make_env, |env, i| {
                    rollout.run_episode(env, policy, &mut episode_rng(seed, i))
                })
                .collect()
        });
        log_summaries(&summaries, start);
        summaries
    }
}

pub fn episode_rng(seed: u64, episode: usize) -> SmallRng {
    SmallRng::seed_from_u64(seed.wrapping_add(episode as u64))
}

fn log_summaries<O>(summaries: &[EpisodeSummary<O>], start: Instant) {
    if let Some(stats) = RolloutStats::from_summaries(summaries) {
        info!(
            "Completed {} episodes ({} truncated) with average reward {:.4} and average length {:.1} after {:.3}s",
            stats.episodes,
            stats.truncated,
            stats.mean_reward,
            stats.mean_steps,
            start.elapsed().as_secs_f64(),
        );
    }
}
