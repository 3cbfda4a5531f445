use crate::matcher::SlotMatching;
use crate::{Direction, PlacedWord, Position, Slot};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Grid size in cells
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    pub rows: usize,
    pub cols: usize,
}

impl Dimensions {
    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }
}

/// Which cells are part of some word
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveMask {
    dimensions: Dimensions,
    cells: Vec<bool>,
}

impl ActiveMask {
    fn new(dimensions: Dimensions) -> Self {
        Self {
            dimensions,
            cells: vec![false; dimensions.cell_count()],
        }
    }

    fn index(&self, pos: Position) -> Option<usize> {
        self.dimensions
            .contains(pos)
            .then(|| pos.row * self.dimensions.cols + pos.col)
    }

    fn mark(&mut self, pos: Position) {
        if let Some(cell) = self.index(pos).and_then(|idx| self.cells.get_mut(idx)) {
            *cell = true;
        }
    }

    /// True when there is exactly one flag per cell
    pub fn is_well_formed(&self) -> bool {
        self.cells.len() == self.dimensions.cell_count()
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Out-of-bounds positions are inert
    pub fn is_active(&self, pos: Position) -> bool {
        self.index(pos)
            .and_then(|idx| self.cells.get(idx).copied())
            .unwrap_or(false)
    }

    pub fn active_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }
}

/// Build the active mask for the matched slots.
///
/// Each matched slot contributes as many cells as its word has letters,
/// which may be fewer than the slot length after a near fit.
pub fn assemble_grid(slots: &[Slot], matching: &SlotMatching<'_>) -> ActiveMask {
    let spans: Vec<(&Slot, usize)> = matching
        .iter()
        .filter_map(|(&idx, word)| slots.get(idx).map(|slot| (slot, word.letter_count())))
        .collect();

    let mut max_row = None;
    let mut max_col = None;
    for (slot, len) in &spans {
        let (end_row, end_col) = match slot.direction {
            Direction::Across => (slot.start_row, slot.start_col + len.saturating_sub(1)),
            Direction::Down => (slot.start_row + len.saturating_sub(1), slot.start_col),
        };
        max_row = max_row.max(Some(end_row));
        max_col = max_col.max(Some(end_col));
    }

    let dimensions = Dimensions {
        rows: max_row.map_or(0, |r| r + 1),
        cols: max_col.map_or(0, |c| c + 1),
    };

    let mut mask = ActiveMask::new(dimensions);
    for (slot, len) in spans {
        for pos in slot.cells(len) {
            mask.mark(pos);
        }
    }
    mask
}

/// A cell where two placed words expect different letters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossingConflict {
    pub pos: Position,
    pub first: (String, char),
    pub second: (String, char),
}

impl fmt::Display for CrossingConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} wants '{}', {} wants '{}'",
            self.pos, self.first.0, self.first.1, self.second.0, self.second.1
        )
    }
}

/// A generated puzzle: mask, placed words and size. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleLayout {
    mask: ActiveMask,
    words: Vec<PlacedWord>,
}

impl PuzzleLayout {
    pub(crate) fn new(mask: ActiveMask, words: Vec<PlacedWord>) -> Self {
        Self { mask, words }
    }

    /// Build a layout directly from placed words, deriving the mask from
    /// their spans. Useful for hand-authored puzzles.
    pub fn from_words(words: Vec<PlacedWord>) -> Self {
        let rows = words.iter().map(|w| w.end().row + 1).max().unwrap_or(0);
        let cols = words.iter().map(|w| w.end().col + 1).max().unwrap_or(0);
        let mut mask = ActiveMask::new(Dimensions { rows, cols });
        for word in &words {
            for pos in word.cells() {
                mask.mark(pos);
            }
        }
        Self { mask, words }
    }

    pub fn dimensions(&self) -> Dimensions {
        self.mask.dimensions()
    }

    pub fn active_mask(&self) -> &ActiveMask {
        &self.mask
    }

    /// Placed words in clue order: by start cell, then slot order for a shared start
    pub fn words(&self) -> &[PlacedWord] {
        &self.words
    }

    pub fn word(&self, index: usize) -> Option<&PlacedWord> {
        self.words.get(index)
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    pub fn is_active(&self, pos: Position) -> bool {
        self.mask.is_active(pos)
    }

    /// Indices of words passing through `pos`, in clue order
    pub fn words_at(&self, pos: Position) -> Vec<usize> {
        self.words
            .iter()
            .enumerate()
            .filter(|(_, w)| w.covers(pos))
            .map(|(i, _)| i)
            .collect()
    }

    /// Solution letter at `pos`, taken from the first covering word
    pub fn letter_at(&self, pos: Position) -> Option<char> {
        self.words.iter().find_map(|w| w.letter_at(pos))
    }

    /// Clue number printed in the cell, if a word starts there
    pub fn clue_number_at(&self, pos: Position) -> Option<u32> {
        self.words
            .iter()
            .find(|w| w.start() == pos)
            .map(|w| w.clue_number)
    }

    fn by_direction(&self, direction: Direction) -> Vec<&PlacedWord> {
        let mut list: Vec<&PlacedWord> = self
            .words
            .iter()
            .filter(|w| w.direction == direction)
            .collect();
        list.sort_by_key(|w| w.clue_number);
        list
    }

    /// Across clues ordered by number
    pub fn across(&self) -> Vec<&PlacedWord> {
        self.by_direction(Direction::Across)
    }

    /// Down clues ordered by number
    pub fn down(&self) -> Vec<&PlacedWord> {
        self.by_direction(Direction::Down)
    }

    /// Cells where crossing words disagree on the letter
    pub fn conflicts(&self) -> Vec<CrossingConflict> {
        let mut conflicts = Vec::new();
        for (i, a) in self.words.iter().enumerate() {
            for b in &self.words[i + 1..] {
                for (pos, la) in a.letters() {
                    if let Some(lb) = b.letter_at(pos) {
                        if la != lb {
                            conflicts.push(CrossingConflict {
                                pos,
                                first: (a.label(), la),
                                second: (b.label(), lb),
                            });
                        }
                    }
                }
            }
        }
        conflicts.sort_by_key(|c| c.pos);
        conflicts
    }
}

impl fmt::Display for PuzzleLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dims = self.dimensions();
        for row in 0..dims.rows {
            for col in 0..dims.cols {
                let ch = if self.is_active(Position::new(row, col)) {
                    '.'
                } else {
                    '#'
                };
                write!(f, "{}", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WordEntry;

    #[test]
    fn test_assemble_dimensions() {
        let words = [
            WordEntry::new("a", "ABC", "", "en"),
            WordEntry::new("b", "ABCD", "", "en"),
        ];
        let slots = [Slot::across(1, 2, 5), Slot::down(0, 6, 4)];
        let mut matching = SlotMatching::new();
        matching.insert(0, &words[0]);
        matching.insert(1, &words[1]);

        let mask = assemble_grid(&slots, &matching);
        // Across word uses its own length (3), not the slot length (5)
        assert_eq!(mask.dimensions(), Dimensions { rows: 4, cols: 7 });
        assert!(mask.is_active(Position::new(1, 4)));
        assert!(!mask.is_active(Position::new(1, 5)));
        assert!(mask.is_active(Position::new(3, 6)));
        assert_eq!(mask.active_count(), 7);
    }

    #[test]
    fn test_assemble_empty() {
        let mask = assemble_grid(&[Slot::across(0, 0, 5)], &SlotMatching::new());
        assert_eq!(mask.dimensions(), Dimensions::default());
        assert!(!mask.is_active(Position::new(0, 0)));
    }

    #[test]
    fn test_display_mask() {
        let word = PlacedWord {
            id: "1".into(),
            text: "AB".into(),
            clue: String::new(),
            direction: Direction::Down,
            start_row: 0,
            start_col: 1,
            clue_number: 1,
        };
        let layout = PuzzleLayout::from_words(vec![word]);
        assert_eq!(layout.to_string(), "#.\n#.\n");
    }

    #[test]
    fn test_letter_at_uses_first_covering_word() {
        let across = PlacedWord {
            id: "1".into(),
            text: "CAT".into(),
            clue: String::new(),
            direction: Direction::Across,
            start_row: 0,
            start_col: 0,
            clue_number: 1,
        };
        let down = PlacedWord {
            id: "2".into(),
            text: "TOE".into(),
            clue: String::new(),
            direction: Direction::Down,
            start_row: 0,
            start_col: 2,
            clue_number: 2,
        };
        let layout = PuzzleLayout::from_words(vec![across, down]);
        assert_eq!(layout.letter_at(Position::new(0, 0)), Some('C'));
        assert_eq!(layout.letter_at(Position::new(0, 2)), Some('T'));
        assert_eq!(layout.letter_at(Position::new(2, 2)), Some('E'));
        assert_eq!(layout.letter_at(Position::new(1, 0)), None);
        assert_eq!(layout.letter_at(Position::new(9, 9)), None);
    }

    #[test]
    fn test_truncated_mask_is_inert() {
        let json = r#"{"dimensions":{"rows":3,"cols":3},"cells":[true]}"#;
        let mask: ActiveMask = serde_json::from_str(json).unwrap();
        assert!(!mask.is_well_formed());
        assert!(mask.is_active(Position::new(0, 0)));
        assert!(!mask.is_active(Position::new(2, 2)));
    }
}
