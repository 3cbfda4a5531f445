use serde::{Deserialize, Serialize};
use std::fmt;

/// A cell coordinate in the puzzle grid (row-major ordering)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Offset this position by a signed delta, returning None if it would go negative
    pub fn offset(self, row_delta: isize, col_delta: isize) -> Option<Self> {
        let row = self.row.checked_add_signed(row_delta)?;
        let col = self.col.checked_add_signed(col_delta)?;
        Some(Self { row, col })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}c{}", self.row + 1, self.col + 1)
    }
}

/// Direction a word runs in the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Across,
    Down,
}

impl Direction {
    /// Unit step (row, col) along this direction
    pub fn delta(self) -> (usize, usize) {
        match self {
            Direction::Across => (0, 1),
            Direction::Down => (1, 0),
        }
    }

    /// Position of the `index`-th cell of a span starting at `start`
    pub fn step(self, start: Position, index: usize) -> Position {
        let (dr, dc) = self.delta();
        Position::new(start.row + dr * index, start.col + dc * index)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Across => write!(f, "Across"),
            Direction::Down => write!(f, "Down"),
        }
    }
}

/// A word/clue pair supplied by the word source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
    pub id: String,
    pub text: String,
    pub clue: String,
    pub language: String,
}

impl WordEntry {
    pub fn new(
        id: impl Into<String>,
        text: impl Into<String>,
        clue: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            clue: clue.into(),
            language: language.into(),
        }
    }

    /// The word as it appears in the grid
    pub fn grid_text(&self) -> String {
        self.text.to_uppercase()
    }

    /// Number of grid cells this word occupies
    pub fn letter_count(&self) -> usize {
        self.grid_text().chars().count()
    }
}

/// A template span that may host a word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Slot {
    pub direction: Direction,
    pub start_row: usize,
    pub start_col: usize,
    pub length: usize,
}

impl Slot {
    pub const fn across(start_row: usize, start_col: usize, length: usize) -> Self {
        Self {
            direction: Direction::Across,
            start_row,
            start_col,
            length,
        }
    }

    pub const fn down(start_row: usize, start_col: usize, length: usize) -> Self {
        Self {
            direction: Direction::Down,
            start_row,
            start_col,
            length,
        }
    }

    pub fn start(&self) -> Position {
        Position::new(self.start_row, self.start_col)
    }

    /// Cells covered when `len` letters are written from the slot start
    pub fn cells(&self, len: usize) -> impl Iterator<Item = Position> + '_ {
        let start = self.start();
        let direction = self.direction;
        (0..len).map(move |i| direction.step(start, i))
    }
}

/// A word bound to a slot with its clue number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedWord {
    pub id: String,
    /// Upper-cased answer
    pub text: String,
    pub clue: String,
    pub direction: Direction,
    pub start_row: usize,
    pub start_col: usize,
    pub clue_number: u32,
}

impl PlacedWord {
    pub fn start(&self) -> Position {
        Position::new(self.start_row, self.start_col)
    }

    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Last cell of the word
    pub fn end(&self) -> Position {
        self.direction
            .step(self.start(), self.len().saturating_sub(1))
    }

    /// Cells of the word in reading order
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        let start = self.start();
        let direction = self.direction;
        (0..self.len()).map(move |i| direction.step(start, i))
    }

    /// Cells paired with the expected letter
    pub fn letters(&self) -> impl Iterator<Item = (Position, char)> + '_ {
        self.cells().zip(self.text.chars())
    }

    /// Index of `pos` within the word, if the word passes through it
    pub fn index_of(&self, pos: Position) -> Option<usize> {
        let index = match self.direction {
            Direction::Across if pos.row == self.start_row && pos.col >= self.start_col => {
                pos.col - self.start_col
            }
            Direction::Down if pos.col == self.start_col && pos.row >= self.start_row => {
                pos.row - self.start_row
            }
            _ => return None,
        };
        (index < self.len()).then_some(index)
    }

    pub fn covers(&self, pos: Position) -> bool {
        self.index_of(pos).is_some()
    }

    /// Expected letter at `pos`
    pub fn letter_at(&self, pos: Position) -> Option<char> {
        self.index_of(pos).and_then(|i| self.text.chars().nth(i))
    }

    /// Short label such as "3-Across"
    pub fn label(&self) -> String {
        format!("{}-{}", self.clue_number, self.direction)
    }
}
