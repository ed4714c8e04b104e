use crate::GridError;

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Normal,
    Wall,
    GoalPositive,
    GoalNegative,
}

impl Cell {
    pub const NORMAL_CODE: i32 = 0;
    pub const WALL_CODE: i32 = 9;
    pub const GOAL_POSITIVE_CODE: i32 = 1;
    pub const GOAL_NEGATIVE_CODE: i32 = -1;

    pub fn code(self) -> i32 {
        match self {
            Cell::Normal => Self::NORMAL_CODE,
            Cell::Wall => Self::WALL_CODE,
            Cell::GoalPositive => Self::GOAL_POSITIVE_CODE,
            Cell::GoalNegative => Self::GOAL_NEGATIVE_CODE,
        }
    }

    pub fn is_wall(self) -> bool {
        self == Cell::Wall
    }

    /// Only plain open cells admit an action. Goal cells are absorbing.
    pub fn is_actionable(self) -> bool {
        self == Cell::Normal
    }

    pub fn is_terminal(self) -> bool {
        self.terminal_reward().is_some()
    }

    pub fn terminal_reward(self) -> Option<f64> {
        match self {
            Cell::GoalPositive => Some(1.0),
            Cell::GoalNegative => Some(-1.0),
            Cell::Normal | Cell::Wall => None,
        }
    }
}

impl TryFrom<i32> for Cell {
    type Error = GridError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            Self::NORMAL_CODE => Ok(Cell::Normal),
            Self::WALL_CODE => Ok(Cell::Wall),
            Self::GOAL_POSITIVE_CODE => Ok(Cell::GoalPositive),
            Self::GOAL_NEGATIVE_CODE => Ok(Cell::GoalNegative),
            code => Err(GridError::InvalidCode(code)),
        }
    }
}

impl From<Cell> for i32 {
    fn from(cell: Cell) -> Self {
        cell.code()
    }
}

#[test]
fn test_cell_codes() {
    for cell in [
        Cell::Normal,
        Cell::Wall,
        Cell::GoalPositive,
        Cell::GoalNegative,
    ] {
        assert_eq!(Cell::try_from(cell.code()).unwrap(), cell);
    }
    assert!(matches!(Cell::try_from(2), Err(GridError::InvalidCode(2))));
    assert!(matches!(Cell::try_from(-9), Err(GridError::InvalidCode(-9))));
}

#[test]
fn test_cell_predicates() {
    assert!(Cell::Normal.is_actionable());
    assert!(!Cell::Wall.is_actionable());
    assert!(!Cell::GoalPositive.is_actionable());
    assert!(!Cell::GoalNegative.is_actionable());

    assert!(Cell::Wall.is_wall());
    assert!(!Cell::GoalNegative.is_wall());

    assert!(!Cell::Normal.is_terminal());
    assert!(!Cell::Wall.is_terminal());
    assert_eq!(Cell::GoalPositive.terminal_reward(), Some(1.0));
    assert_eq!(Cell::GoalNegative.terminal_reward(), Some(-1.0));
}
