
use bevy_platform::collections::HashMap;
use gw_grid::{Grid, Position};
use rand::{
    Rng,
    distr::{Distribution, weighted::WeightedIndex},
};
use smallvec::SmallVec;

use crate::{Action, EnvError};

/// A probability distribution over the cells reachable in one step.
///
/// Outcomes keep the order in which directions were considered: the intended
/// direction first, then both perpendicular drifts, then the opposite
/// direction. Several directions that end on the same cell share one entry.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Transitions {
    outcomes: SmallVec<[(Position, f64); 4]>,
}

impl Transitions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes the distribution of landing cells when `action` is attempted
    /// from `state`. Empty when `state` admits no action.
    pub fn compute(grid: &Grid, state: Position, action: Action, move_prob: f64) -> Self {
        let mut transitions = Transitions::new();
        if !grid.is_actionable(state) {
            return transitions;
        }

        let drift_prob = (1.0 - move_prob) / 2.0;
        let [left, right] = action.perpendicular();
        let weighted = [
            (action, move_prob),
            (left, drift_prob),
            (right, drift_prob),
            (action.opposite(), 0.0),
        ];

        for (direction, prob) in weighted {
            transitions.insert(neighbor(grid, state, direction), prob);
        }

        transitions
    }

    /// Adds `probability` to the entry for `position`, creating it if needed.
    pub fn insert(&mut self, position: Position, probability: f64) {
        match self.outcomes.iter_mut().find(|(p, _)| *p == position) {
            Some((_, existing)) => *existing += probability,
            None => self.outcomes.push((position, probability)),
        }
    }

    pub fn get(&self, position: Position) -> Option<f64> {
        self.outcomes
            .iter()
            .find(|(p, _)| *p == position)
            .map(|&(_, prob)| prob)
    }

    pub fn probability(&self, position: Position) -> f64 {
        self.get(position).unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Position, f64)> + '_ {
        self.outcomes.iter().copied()
    }

    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.outcomes.iter().map(|&(p, _)| p)
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.outcomes.iter().map(|&(_, prob)| prob).sum()
    }

    /// Draws one landing cell, weighting each outcome by its probability.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Position> {
        if self.is_empty() {
            return None;
        }

        let distr = match WeightedIndex::new(self.outcomes.iter().map(|&(_, prob)| prob)) {
            Ok(distr) => distr,
            Err(err) => {
                panic!("invalid transition weights in {:?}: {err}", self.outcomes);
            }
        };

        Some(self.outcomes[distr.sample(rng)].0)
    }

    pub fn to_map(&self) -> HashMap<Position, f64> {
        self.iter().collect()
    }
}

impl<'a> IntoIterator for &'a Transitions {
    type Item = (Position, f64);
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, (Position, f64)>>;

    fn into_iter(self) -> Self::IntoIter {
        self.outcomes.iter().copied()
    }
}

/// Attempts a single-cell move from `state`.
///
/// The grid edge clamps the move, and a wall blocks it entirely, leaving the
/// agent on `state`.
pub fn attempt_move(grid: &Grid, state: Position, action: Action) -> Result<Position, EnvError> {
    if !grid.is_actionable(state) {
        return Err(EnvError::NotActionable(state));
    }

    Ok(neighbor(grid, state, action))
}

fn neighbor(grid: &Grid, state: Position, action: Action) -> Position {
    let last_row = grid.rows() - 1;
    let last_col = grid.cols() - 1;
    let candidate = match action {
        Action::Up => Position::new(state.row.saturating_sub(1), state.col),
        Action::Down => Position::new((state.row + 1).min(last_row), state.col),
        Action::Left => Position::new(state.row, state.col.saturating_sub(1)),
        Action::Right => Position::new(state.row, (state.col + 1).min(last_col)),
    };

    if grid[candidate].is_wall() {
        state
    } else {
        candidate
    }
}
