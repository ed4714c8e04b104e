
use std::sync::Arc;

use gw_grid::{Grid, Position};
use gw_rl_model::Step;
use rand::Rng;
use tracing::{debug, trace};

use crate::{Action, EnvError, EnvironmentConfig, Transitions};

/// A stochastic grid world.
///
/// Each episode starts in the bottom-left corner. Moves succeed with
/// probability `move_prob` and otherwise drift to one of the perpendicular
/// directions, never the opposite one. Landing on a goal cell ends the
/// episode.
///
/// Calling [`step`](Self::step) after an episode has ended is a caller error;
/// use [`reset`](Self::reset) to begin a new one.
#[derive(Debug, Clone)]
pub struct GridEnvironment {
    grid: Arc<Grid>,
    config: EnvironmentConfig,
    agent: Position,
}

impl GridEnvironment {
    pub fn new(grid: impl Into<Arc<Grid>>, config: EnvironmentConfig) -> Result<Self, EnvError> {
        let grid = grid.into();
        config.validate()?;

        let start = grid.start();
        if !grid.is_actionable(start) {
            return Err(EnvError::StartNotActionable {
                position: start,
                cell: grid[start],
            });
        }

        debug!(
            rows = grid.rows(),
            cols = grid.cols(),
            move_prob = config.move_prob,
            default_reward = config.default_reward,
            "Created grid environment"
        );

        Ok(GridEnvironment {
            grid,
            config,
            agent: start,
        })
    }

    pub fn with_move_prob(grid: impl Into<Arc<Grid>>, move_prob: f64) -> Result<Self, EnvError> {
        Self::new(grid, EnvironmentConfig::with_move_prob(move_prob))
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn config(&self) -> &EnvironmentConfig {
        &self.config
    }

    pub fn row_count(&self) -> usize {
        self.grid.rows()
    }

    pub fn col_count(&self) -> usize {
        self.grid.cols()
    }

    pub fn actions(&self) -> [Action; 4] {
        Action::ALL
    }

    pub fn states(&self) -> Vec<Position> {
        self.grid.valid_states().collect()
    }

    pub fn agent_position(&self) -> Position {
        self.agent
    }

    pub fn can_act_at(&self, state: Position) -> bool {
        self.grid.is_actionable(state)
    }

    pub fn transition_distribution(&self, state: Position, action: Action) -> Transitions {
        Transitions::compute(&self.grid, state, action, self.config.move_prob)
    }

    /// Returns the reward for landing on `state` and whether the episode ends
    /// there.
    pub fn reward(&self, state: Position) -> (f64, bool) {
        match self.grid[state].terminal_reward() {
            Some(reward) => (reward, true),
            None => (self.config.default_reward, false),
        }
    }

    pub fn reset(&mut self) -> Position {
        self.agent = self.grid.start();
        self.agent
    }

    /// Samples the result of taking `action` from `state` without moving the
    /// agent.
    pub fn transit<R: Rng + ?Sized>(
        &self,
        state: Position,
        action: Action,
        rng: &mut R,
    ) -> Step<Position> {
        match self.transition_distribution(state, action).sample(rng) {
            Some(next) => {
                let (reward, done) = self.reward(next);
                Step::new(next, reward, done)
            }
            None => Step::terminal(),
        }
    }

    pub fn step<R: Rng + ?Sized>(&mut self, action: Action, rng: &mut R) -> Step<Position> {
        let step = self.transit(self.agent, action, rng);
        trace!(
            from = ?self.agent,
            ?action,
            to = ?step.state,
            reward = ?step.reward,
            done = step.done,
            "Step"
        );

        if let Some(next) = step.state {
            self.agent = next;
        }
        step
    }
}

impl gw_rl_model::Environment for GridEnvironment {
    type Action = Action;
    type Observation = Position;

    fn reset(&mut self) -> Position {
        GridEnvironment::reset(self)
    }

    fn step<R: Rng + ?Sized>(&mut self, action: Action, rng: &mut R) -> Step<Position> {
        GridEnvironment::step(self, action, rng)
    }
}
