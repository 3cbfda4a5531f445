use super::selection::{Arrow, Selection};
use crate::{Dimensions, PlacedWord, Position, PuzzleLayout};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// The solver's letters, one optional char per cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerGrid {
    dimensions: Dimensions,
    cells: Vec<Option<char>>,
}

impl AnswerGrid {
    pub fn empty(dimensions: Dimensions) -> Self {
        Self {
            dimensions,
            cells: vec![None; dimensions.cell_count()],
        }
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// True when there is exactly one entry per cell. Deserialized grids
    /// may not hold this.
    pub fn is_well_formed(&self) -> bool {
        self.cells.len() == self.dimensions.cell_count()
    }

    fn index(&self, pos: Position) -> Option<usize> {
        self.dimensions
            .contains(pos)
            .then(|| pos.row * self.dimensions.cols + pos.col)
    }

    pub fn get(&self, pos: Position) -> Option<char> {
        self.index(pos)
            .and_then(|idx| self.cells.get(idx).copied())
            .flatten()
    }

    fn set(&mut self, pos: Position, value: Option<char>) {
        if let Some(cell) = self.index(pos).and_then(|idx| self.cells.get_mut(idx)) {
            *cell = value;
        }
    }

    pub fn is_filled(&self, pos: Position) -> bool {
        self.get(pos).is_some()
    }

    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }
}

/// Keys the solving grid reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SolveKey {
    Arrow(Arrow),
    Tab,
    Backspace,
}

/// Outcome of checking the answers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckSummary {
    /// Every word is filled in correctly
    Solved,
    /// No wrong letters so far, but cells remain empty
    InProgress,
    /// This many filled cells are wrong
    Errors(usize),
}

impl fmt::Display for CheckSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckSummary::Solved => write!(f, "Perfect! All answers are correct!"),
            CheckSummary::InProgress => write!(f, "Looking good so far! Keep going."),
            CheckSummary::Errors(n) => write!(
                f,
                "Found {} error{}. Incorrect cells are marked.",
                n,
                if *n == 1 { "" } else { "s" }
            ),
        }
    }
}

/// Per-word progress, as shown next to a clue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordReport {
    pub word_id: String,
    pub clue_number: u32,
    pub direction: crate::Direction,
    /// Filled cells that do not match this word's letter
    pub errors: usize,
    /// Cells of this word filled by hints
    pub revealed_letters: usize,
    /// Every cell holds this word's letter
    pub correct: bool,
}

/// A user action against the solving state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    FocusCell(Position),
    TypeCharacter(Position, char),
    Key(SolveKey, Position),
    SelectWord(usize),
    CheckSolution,
    RevealHint,
}

/// Mutable state of one solving session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveState {
    answers: AnswerGrid,
    selection: Selection,
    highlighted: BTreeSet<Position>,
    hints_used: u32,
    max_hints: u32,
    error_cells: BTreeSet<Position>,
    revealed_cells: BTreeSet<Position>,
}

/// Upper-case a typed character when that yields a single char
fn normalize(ch: char) -> char {
    let mut upper = ch.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(c), None) => c,
        _ => ch,
    }
}

impl SolveState {
    /// Fresh state with an empty answer grid sized to the layout
    pub fn new(layout: &PuzzleLayout, max_hints: u32) -> Self {
        Self {
            answers: AnswerGrid::empty(layout.dimensions()),
            selection: Selection::NoSelection,
            highlighted: BTreeSet::new(),
            hints_used: 0,
            max_hints,
            error_cells: BTreeSet::new(),
            revealed_cells: BTreeSet::new(),
        }
    }

    pub fn answers(&self) -> &AnswerGrid {
        &self.answers
    }

    pub fn cursor(&self) -> Option<Position> {
        self.selection.cursor()
    }

    pub fn active_word_index(&self) -> Option<usize> {
        self.selection.word()
    }

    pub fn active_word<'a>(&self, layout: &'a PuzzleLayout) -> Option<&'a PlacedWord> {
        self.selection.word().and_then(|i| layout.word(i))
    }

    pub fn highlighted(&self) -> &BTreeSet<Position> {
        &self.highlighted
    }

    pub fn error_cells(&self) -> &BTreeSet<Position> {
        &self.error_cells
    }

    pub fn revealed_cells(&self) -> &BTreeSet<Position> {
        &self.revealed_cells
    }

    pub fn hints_used(&self) -> u32 {
        self.hints_used
    }

    pub fn max_hints(&self) -> u32 {
        self.max_hints
    }

    pub fn hints_remaining(&self) -> u32 {
        self.max_hints.saturating_sub(self.hints_used)
    }

    /// Apply one action and return the next state
    pub fn apply(mut self, layout: &PuzzleLayout, action: Action) -> Self {
        match action {
            Action::FocusCell(pos) => {
                self.focus_cell(layout, pos);
            }
            Action::TypeCharacter(pos, ch) => {
                self.type_character(layout, pos, ch);
            }
            Action::Key(key, pos) => {
                self.handle_key(layout, key, pos);
            }
            Action::SelectWord(index) => {
                self.select_word(layout, index);
            }
            Action::CheckSolution => {
                self.check_solution(layout);
            }
            Action::RevealHint => {
                self.reveal_hint(layout);
            }
        }
        self
    }

    fn set_selection(&mut self, layout: &PuzzleLayout, selection: Selection) -> bool {
        let changed = selection != self.selection;
        self.selection = selection;
        self.highlighted = self
            .active_word(layout)
            .map(|w| w.cells().collect())
            .unwrap_or_default();
        changed
    }

    /// Returns true if the selection changed
    pub fn focus_cell(&mut self, layout: &PuzzleLayout, pos: Position) -> bool {
        let next = self.selection.focus(layout, pos);
        self.set_selection(layout, next)
    }

    /// Returns true if the selection changed
    pub fn select_word(&mut self, layout: &PuzzleLayout, index: usize) -> bool {
        match Selection::select_word(layout, index) {
            Some(next) => self.set_selection(layout, next),
            None => false,
        }
    }

    /// Write a letter. Returns false when the input was ignored.
    pub fn type_character(&mut self, layout: &PuzzleLayout, pos: Position, ch: char) -> bool {
        if !layout.is_active(pos) || ch.is_whitespace() || ch.is_control() {
            return false;
        }
        self.answers.set(pos, Some(normalize(ch)));
        self.error_cells.remove(&pos);

        let next = self.selection.after_input(layout, pos);
        self.set_selection(layout, next);
        true
    }

    /// Clear a letter. Returns false when the input was ignored.
    pub fn backspace(&mut self, layout: &PuzzleLayout, pos: Position) -> bool {
        if !layout.is_active(pos) {
            return false;
        }
        self.answers.set(pos, None);
        self.error_cells.remove(&pos);

        let next = self.selection.after_delete(layout, pos);
        self.set_selection(layout, next);
        true
    }

    /// Dispatch navigation, tab and backspace keys
    pub fn handle_key(&mut self, layout: &PuzzleLayout, key: SolveKey, pos: Position) -> bool {
        match key {
            SolveKey::Arrow(arrow) => {
                let next = self.selection.navigate(layout, pos, arrow);
                self.set_selection(layout, next)
            }
            SolveKey::Tab => {
                let next = self.selection.tab_next(layout);
                self.set_selection(layout, next)
            }
            SolveKey::Backspace => self.backspace(layout, pos),
        }
    }

    /// Flag every filled cell that disagrees with a word crossing it
    pub fn check_solution(&mut self, layout: &PuzzleLayout) -> CheckSummary {
        let mut errors = BTreeSet::new();
        for word in layout.words() {
            for (pos, letter) in word.letters() {
                if let Some(answer) = self.answers.get(pos) {
                    if answer != letter {
                        errors.insert(pos);
                    }
                }
            }
        }
        self.error_cells = errors;

        let summary = if !self.error_cells.is_empty() {
            CheckSummary::Errors(self.error_cells.len())
        } else if self.is_grid_complete(layout) {
            CheckSummary::Solved
        } else {
            CheckSummary::InProgress
        };
        debug!("check: {:?}", summary);
        summary
    }

    /// Fill the first empty cell of the active word with its letter.
    /// Returns the revealed cell, or None if nothing was revealed.
    pub fn reveal_hint(&mut self, layout: &PuzzleLayout) -> Option<Position> {
        if self.hints_used >= self.max_hints {
            return None;
        }
        let word = self.active_word(layout)?;
        let (pos, letter) = word
            .letters()
            .find(|(pos, _)| !self.answers.is_filled(*pos))?;

        self.answers.set(pos, Some(letter));
        self.error_cells.remove(&pos);
        self.revealed_cells.insert(pos);
        self.hints_used += 1;
        debug!(
            "revealed '{}' at {} ({}/{} hints)",
            letter, pos, self.hints_used, self.max_hints
        );
        Some(pos)
    }

    /// Whether `word` currently holds exactly its letters
    pub fn is_word_correct(&self, word: &PlacedWord) -> bool {
        word.letters()
            .all(|(pos, letter)| self.answers.get(pos) == Some(letter))
    }

    /// Every cell of every word matches, regardless of error flags
    pub fn is_grid_complete(&self, layout: &PuzzleLayout) -> bool {
        layout.words().iter().all(|w| self.is_word_correct(w))
    }

    /// Ids of the words currently filled in correctly
    pub fn correct_words<'a>(&self, layout: &'a PuzzleLayout) -> Vec<&'a str> {
        layout
            .words()
            .iter()
            .filter(|w| self.is_word_correct(w))
            .map(|w| w.id.as_str())
            .collect()
    }

    pub fn word_reports(&self, layout: &PuzzleLayout) -> Vec<WordReport> {
        layout
            .words()
            .iter()
            .map(|word| {
                let errors = word
                    .letters()
                    .filter(|&(pos, letter)| {
                        matches!(self.answers.get(pos), Some(a) if a != letter)
                    })
                    .count();
                let revealed_letters = word
                    .cells()
                    .filter(|pos| self.revealed_cells.contains(pos))
                    .count();
                WordReport {
                    word_id: word.id.clone(),
                    clue_number: word.clue_number,
                    direction: word.direction,
                    errors,
                    revealed_letters,
                    correct: self.is_word_correct(word),
                }
            })
            .collect()
    }
}
