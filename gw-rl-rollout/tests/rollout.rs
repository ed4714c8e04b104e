use approx::assert_relative_eq;
use gw_env::{Action, GridEnvironment};
use gw_grid::{Grid, Position};
use gw_rl_model::RandomPolicy;
use gw_rl_rollout::{ParallelRollout, Rollout, RolloutStats, episode_rng};

fn make_env() -> GridEnvironment {
    let grid = Grid::from_codes(&[[0, 0, 0, 1], [0, 9, 0, -1], [0, 0, 0, 0]]).unwrap();
    GridEnvironment::with_move_prob(grid, 0.8).unwrap()
}

#[test]
fn greedy_policy_reaches_goal() {
    let mut env = make_env();
    // Up the left column, then right along the top row.
    let policy = |state: &Position| {
        if state.col == 0 && state.row > 0 {
            Action::Up
        } else {
            Action::Right
        }
    };
    let rollout = Rollout::default();

    let summaries = rollout.run_episodes(&mut env, &policy, &mut episode_rng(1, 0), 50);
    assert_eq!(summaries.len(), 50);
    for summary in &summaries {
        assert!(summary.terminated);
        assert!(!summary.truncated);
        assert!(env.grid()[summary.final_state].is_terminal());
        assert!(summary.steps >= 4);
    }

    let stats = RolloutStats::from_summaries(&summaries).unwrap();
    assert_relative_eq!(stats.max_reward, 1.0 - 0.04 * 4.0, epsilon = 1e-9);
}

#[test]
fn episode_reward_accumulates() {
    let mut env = make_env();
    let policy = RandomPolicy::<Action>::new();
    let rollout = Rollout::default();

    for summary in rollout.run_seeded(&mut env, &policy, 9, 100) {
        assert!(summary.terminated);
        let terminal = env.reward(summary.final_state).0;
        let expected = terminal - 0.04 * (summary.steps - 1) as f64;
        assert_relative_eq!(summary.total_reward, expected, epsilon = 1e-9);
    }
}

#[test]
fn truncated_episodes() {
    let mut env = make_env();
    let policy = |_: &Position| Action::Left;
    let rollout = Rollout {
        max_steps: Some(25),
    };

    let summary = rollout.run_episode(&mut env, &policy, &mut episode_rng(3, 0));
    assert!(summary.truncated);
    assert!(!summary.terminated);
    assert_eq!(summary.steps, 25);
    assert_relative_eq!(summary.total_reward, -0.04 * 25.0, epsilon = 1e-9);
}

#[test]
fn parallel_matches_sequential() {
    let policy = RandomPolicy::<Action>::new();
    let rollout = Rollout::default();
    let parallel = ParallelRollout::new(rollout, Some(4)).unwrap();
    assert_eq!(parallel.threads(), 4);

    let sequential = rollout.run_seeded(&mut make_env(), &policy, 1234, 64);
    let concurrent = parallel.run(make_env, &policy, 1234, 64);
    assert_eq!(sequential, concurrent);
}
