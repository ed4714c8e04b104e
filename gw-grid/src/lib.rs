//! Immutable grid geometry for the grid-world environment.

pub mod cell;
pub mod position;

use std::ops::Index;

use thiserror::Error;

pub use cell::Cell;
pub use position::Position;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("grid has no cells")]
    Empty,
    #[error("row {row} has {found} columns, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("invalid cell code {0}")]
    InvalidCode(i32),
    #[error("invalid cell code {code} at {position}")]
    UnknownCode { code: i32, position: Position },
}

/// A rectangular array of cells, stored row-major.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Box<[Cell]>,
}

impl Grid {
    pub fn new(rows: Vec<Vec<Cell>>) -> Result<Self, GridError> {
        let cols = validate_shape(rows.iter().map(Vec::len))?;
        Ok(Grid {
            rows: rows.len(),
            cols,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// Builds a grid from the numeric encoding: `0` normal, `9` wall, `1`
    /// positive goal, `-1` negative goal.
    pub fn from_codes<R>(rows: &[R]) -> Result<Self, GridError>
    where
        R: AsRef<[i32]>,
    {
        let cols = validate_shape(rows.iter().map(|row| row.as_ref().len()))?;
        let mut cells = Vec::with_capacity(rows.len() * cols);
        for (row, codes) in rows.iter().enumerate() {
            for (col, &code) in codes.as_ref().iter().enumerate() {
                let cell = Cell::try_from(code).map_err(|_| GridError::UnknownCode {
                    code,
                    position: Position::new(row, col),
                })?;
                cells.push(cell);
            }
        }

        Ok(Grid {
            rows: rows.len(),
            cols,
            cells: cells.into_boxed_slice(),
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    pub fn get(&self, pos: Position) -> Option<Cell> {
        if self.contains(pos) {
            Some(self.cells[self.offset(pos)])
        } else {
            None
        }
    }

    pub fn is_actionable(&self, pos: Position) -> bool {
        self.get(pos).is_some_and(Cell::is_actionable)
    }

    /// All non-wall positions in row-major order.
    pub fn valid_states(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| !cell.is_wall())
            .map(|(index, _)| self.position(index))
    }

    /// The bottom-left corner, where every episode begins.
    pub fn start(&self) -> Position {
        Position::new(self.rows - 1, 0)
    }

    pub fn to_codes(&self) -> Vec<Vec<i32>> {
        self.cells
            .chunks(self.cols)
            .map(|row| row.iter().map(|cell| cell.code()).collect())
            .collect()
    }

    fn offset(&self, pos: Position) -> usize {
        pos.row * self.cols + pos.col
    }

    fn position(&self, index: usize) -> Position {
        Position::new(index / self.cols, index % self.cols)
    }
}

impl Index<Position> for Grid {
    type Output = Cell;

    fn index(&self, pos: Position) -> &Cell {
        assert!(
            self.contains(pos),
            "position {pos:?} out of bounds for {}x{} grid",
            self.rows,
            self.cols
        );
        &self.cells[self.offset(pos)]
    }
}

impl std::fmt::Debug for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Grid")
            .field("rows", &self.rows)
            .field("cols", &self.cols)
            .field("cells", &self.to_codes())
            .finish()
    }
}

fn validate_shape(mut widths: impl Iterator<Item = usize>) -> Result<usize, GridError> {
    let expected = match widths.next() {
        Some(0) | None => return Err(GridError::Empty),
        Some(width) => width,
    };

    for (row, found) in widths.enumerate() {
        if found != expected {
            return Err(GridError::Ragged {
                row: row + 1,
                expected,
                found,
            });
        }
    }

    Ok(expected)
}
