//! Selection state machine.
//!
//! Every transition takes the current [`Selection`] by value and returns the
//! next one, so the direction-toggle and intersection rules can be exercised
//! without an answer grid.

use crate::{Position, PuzzleLayout};
use serde::{Deserialize, Serialize};

/// Arrow key directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Arrow {
    Up,
    Down,
    Left,
    Right,
}

impl Arrow {
    pub fn delta(self) -> (isize, isize) {
        match self {
            Arrow::Up => (-1, 0),
            Arrow::Down => (1, 0),
            Arrow::Left => (0, -1),
            Arrow::Right => (0, 1),
        }
    }
}

/// What the solver currently has selected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Selection {
    /// Nothing focused
    #[default]
    NoSelection,
    /// A cell is focused and input flows along `word`
    WordSelected { cursor: Position, word: usize },
    /// A crossing cell is focused but no word has been chosen yet
    CellOnlySelected { cursor: Position },
}

impl Selection {
    pub fn cursor(&self) -> Option<Position> {
        match *self {
            Selection::NoSelection => None,
            Selection::WordSelected { cursor, .. } | Selection::CellOnlySelected { cursor } => {
                Some(cursor)
            }
        }
    }

    /// Index of the active word in the layout
    pub fn word(&self) -> Option<usize> {
        match *self {
            Selection::WordSelected { word, .. } => Some(word),
            _ => None,
        }
    }

    /// Focus a cell (click). Focusing the cursor cell again cycles through the
    /// words crossing it.
    pub fn focus(self, layout: &PuzzleLayout, pos: Position) -> Self {
        if !layout.is_active(pos) {
            return self;
        }
        let covering = layout.words_at(pos);

        if self.cursor() == Some(pos) && covering.len() > 1 {
            let current = self
                .word()
                .and_then(|w| covering.iter().position(|&c| c == w));
            let word = match current {
                Some(i) => covering[(i + 1) % covering.len()],
                None => covering[0],
            };
            return Selection::WordSelected { cursor: pos, word };
        }

        match covering.as_slice() {
            [] => self,
            [only] => Selection::WordSelected {
                cursor: pos,
                word: *only,
            },
            several => {
                let starting_here = several
                    .iter()
                    .copied()
                    .find(|&i| layout.word(i).is_some_and(|w| w.start() == pos));
                match starting_here {
                    Some(word) => Selection::WordSelected { cursor: pos, word },
                    None => Selection::CellOnlySelected { cursor: pos },
                }
            }
        }
    }

    /// Move one cell from `from` in the arrow's direction
    pub fn navigate(self, layout: &PuzzleLayout, from: Position, arrow: Arrow) -> Self {
        if !layout.is_active(from) {
            return self;
        }
        let (dr, dc) = arrow.delta();
        let dest = match from.offset(dr, dc) {
            Some(dest) if layout.is_active(dest) => dest,
            _ => return self,
        };

        if let Some(word) = self.word() {
            if layout.word(word).is_some_and(|w| w.covers(dest)) {
                return Selection::WordSelected { cursor: dest, word };
            }
        }

        match layout.words_at(dest).as_slice() {
            [only] => Selection::WordSelected {
                cursor: dest,
                word: *only,
            },
            _ => Selection::CellOnlySelected { cursor: dest },
        }
    }

    /// Jump to the start of the next word in clue order, wrapping around
    pub fn tab_next(self, layout: &PuzzleLayout) -> Self {
        let count = layout.word_count();
        if count == 0 {
            return self;
        }
        let next = match self.word() {
            Some(word) => (word + 1) % count,
            None => 0,
        };
        Self::select_word(layout, next).unwrap_or(self)
    }

    /// Select a word directly (clue list), cursor on its first cell
    pub fn select_word(layout: &PuzzleLayout, index: usize) -> Option<Self> {
        layout.word(index).map(|w| Selection::WordSelected {
            cursor: w.start(),
            word: index,
        })
    }

    /// Advance after a letter was written at `pos`. Writing the last cell of
    /// the active word closes the selection.
    pub fn after_input(self, layout: &PuzzleLayout, pos: Position) -> Self {
        let Selection::WordSelected { word, .. } = self else {
            return self;
        };
        let Some(placed) = layout.word(word) else {
            return Selection::NoSelection;
        };
        match placed.index_of(pos) {
            Some(i) if i + 1 >= placed.len() => Selection::NoSelection,
            Some(i) => Selection::WordSelected {
                cursor: placed.direction.step(placed.start(), i + 1),
                word,
            },
            None => self,
        }
    }

    /// Step back after the letter at `pos` was cleared
    pub fn after_delete(self, layout: &PuzzleLayout, pos: Position) -> Self {
        let Selection::WordSelected { word, .. } = self else {
            return self;
        };
        let Some(placed) = layout.word(word) else {
            return Selection::NoSelection;
        };
        match placed.index_of(pos) {
            Some(0) => Selection::WordSelected { cursor: pos, word },
            Some(i) => Selection::WordSelected {
                cursor: placed.direction.step(placed.start(), i - 1),
                word,
            },
            None => self,
        }
    }
}
