//! Core domain types for the noughts and crosses board.

use crate::error::{GridParseError, MoveError};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Number of rows and columns on the board.
pub const GRID_SIZE: usize = 3;

/// Occupant of a single cell.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumIter,
)]
pub enum Mark {
    /// Nobody has played here.
    #[default]
    #[display(".")]
    Empty,
    /// Cross (X), moves first.
    #[display("X")]
    Cross,
    /// Nought (O).
    #[display("O")]
    Nought,
}

impl Mark {
    /// Returns the opposing mark. `Empty` has no opponent and maps to itself.
    pub fn opponent(self) -> Self {
        match self {
            Mark::Cross => Mark::Nought,
            Mark::Nought => Mark::Cross,
            Mark::Empty => Mark::Empty,
        }
    }

    /// Returns true for `Cross` and `Nought`.
    pub fn is_player(self) -> bool {
        self != Mark::Empty
    }

    /// Parses a single board character.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'X' | 'x' => Some(Mark::Cross),
            'O' | 'o' => Some(Mark::Nought),
            '.' | '_' | '-' => Some(Mark::Empty),
            _ => None,
        }
    }
}

/// A (row, column) pair on the board.
///
/// Components are signed so that out-of-range input from callers is
/// representable and can be rejected by the move rules instead of wrapping.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[display("({}, {})", row, col)]
pub struct Coord {
    /// Zero-based row.
    pub row: i32,
    /// Zero-based column.
    pub col: i32,
}

impl Coord {
    /// Sentinel for "no coordinate".
    pub const NONE: Coord = Coord { row: -1, col: -1 };

    /// Creates a coordinate.
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Returns true if this is the [`Coord::NONE`] sentinel.
    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    /// Returns true if both components lie inside the board.
    pub fn in_bounds(self) -> bool {
        self.indices().is_some()
    }

    /// Converts to array indices, or `None` when off the board.
    pub(crate) fn indices(self) -> Option<(usize, usize)> {
        let row = usize::try_from(self.row).ok()?;
        let col = usize::try_from(self.col).ok()?;
        (row < GRID_SIZE && col < GRID_SIZE).then_some((row, col))
    }

    pub(crate) fn from_indices(row: usize, col: usize) -> Self {
        // GRID_SIZE is tiny, both casts are lossless.
        Self::new(row as i32, col as i32)
    }
}

/// Lifecycle status of a game.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
pub enum GameStatus {
    /// Moves may still be played.
    #[default]
    #[display("in progress")]
    InProgress,
    /// A terminal position was detected. Never reverts.
    #[display("completed")]
    Completed,
}

/// The 3x3 board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grid {
    cells: [[Mark; GRID_SIZE]; GRID_SIZE],
}

impl Grid {
    /// Creates an empty grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a grid from explicit rows.
    pub fn from_rows(cells: [[Mark; GRID_SIZE]; GRID_SIZE]) -> Self {
        Self { cells }
    }

    /// Returns the rows of the grid.
    pub fn rows(&self) -> &[[Mark; GRID_SIZE]; GRID_SIZE] {
        &self.cells
    }

    /// Returns the mark at `coord`, or `None` when off the board.
    pub fn get(&self, coord: Coord) -> Option<Mark> {
        coord.indices().map(|(row, col)| self.cells[row][col])
    }

    /// Writes `mark` at `coord` without applying any game rules.
    ///
    /// Only the bounds are checked. Use [`crate::Game::set_move`] for a
    /// rule-checked move.
    pub fn set(&mut self, coord: Coord, mark: Mark) -> Result<(), MoveError> {
        let (row, col) = coord.indices().ok_or(MoveError::OutOfBounds(coord))?;
        self.cells[row][col] = mark;
        Ok(())
    }

    /// Checks if the cell at `coord` is on the board and empty.
    pub fn is_empty(&self, coord: Coord) -> bool {
        self.get(coord) == Some(Mark::Empty)
    }

    /// Empty cells in row-major order.
    pub fn empty_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        self.coords().filter(|coord| self.is_empty(*coord))
    }

    /// Every coordinate on the board in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + use<> {
        (0..GRID_SIZE)
            .flat_map(|row| (0..GRID_SIZE).map(move |col| Coord::from_indices(row, col)))
    }

    /// Checks if every cell is occupied.
    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(|mark| mark.is_player())
    }

    /// Returns the mark holding a full row, column or diagonal, if any.
    pub fn winner(&self) -> Option<Mark> {
        let c = &self.cells;
        let line = |a: Mark, b: Mark, d: Mark| (a.is_player() && a == b && b == d).then_some(a);

        for i in 0..GRID_SIZE {
            if let Some(mark) = line(c[i][0], c[i][1], c[i][2]) {
                return Some(mark);
            }
            if let Some(mark) = line(c[0][i], c[1][i], c[2][i]) {
                return Some(mark);
            }
        }

        line(c[0][0], c[1][1], c[2][2]).or_else(|| line(c[0][2], c[1][1], c[2][0]))
    }

    /// Terminal-state check: `(true, winner)` for a line of three,
    /// `(true, Empty)` for a full board, `(false, Empty)` otherwise.
    pub fn is_over(&self) -> (bool, Mark) {
        if let Some(mark) = self.winner() {
            return (true, mark);
        }
        (self.is_full(), Mark::Empty)
    }

    pub(crate) fn put(&mut self, row: usize, col: usize, mark: Mark) {
        self.cells[row][col] = mark;
    }

    pub(crate) fn at(&self, row: usize, col: usize) -> Mark {
        self.cells[row][col]
    }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, row) in self.cells.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for mark in row {
                write!(f, "{}", mark)?;
            }
        }
        Ok(())
    }
}

impl FromStr for Grid {
    type Err = GridParseError;

    /// Parses the compact form `"XX./OO./..."`. Rows may be separated by
    /// `/` or whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut marks = Vec::with_capacity(GRID_SIZE * GRID_SIZE);
        for c in s.chars().filter(|c| *c != '/' && !c.is_whitespace()) {
            marks.push(Mark::from_char(c).ok_or(GridParseError::InvalidCell(c))?);
        }
        if marks.len() != GRID_SIZE * GRID_SIZE {
            return Err(GridParseError::WrongCellCount(marks.len()));
        }

        let mut grid = Grid::new();
        for (i, mark) in marks.into_iter().enumerate() {
            grid.put(i / GRID_SIZE, i % GRID_SIZE, mark);
        }
        Ok(grid)
    }
}
