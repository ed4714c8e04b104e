pub mod action;
pub mod config;
pub mod env;
pub mod transition;

use gw_grid::{Cell, GridError, Position};
use thiserror::Error;

pub use action::Action;
pub use config::EnvironmentConfig;
pub use env::GridEnvironment;
pub use transition::{Transitions, attempt_move};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EnvError {
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error("move probability {0} is outside [0, 1]")]
    InvalidMoveProbability(f64),
    #[error("default reward {0} is not finite")]
    InvalidDefaultReward(f64),
    #[error("start cell {position} is {cell:?}, expected an open cell")]
    StartNotActionable { position: Position, cell: Cell },
    #[error("can't move from {0}")]
    NotActionable(Position),
}
