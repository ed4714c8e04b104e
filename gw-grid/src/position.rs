use std::fmt;

/// A zero-indexed grid coordinate. Row 0 is the top row.
#[derive(Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Position::new(row, col)
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "State({}, {})", self.row, self.col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.row, self.col)
    }
}

#[test]
fn test_position_equality() {
    assert_eq!(Position::new(1, 2), Position::from((1, 2)));
    assert_ne!(Position::new(1, 2), Position::new(2, 1));
    assert_eq!(format!("{:?}", Position::new(2, 0)), "State(2, 0)");
    assert_eq!(Position::new(2, 0).to_string(), "[2, 0]");
}
