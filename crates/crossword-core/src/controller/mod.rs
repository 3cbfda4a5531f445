//! Interactive solving over a generated layout.
//!
//! [`SolveController`] owns the immutable [`PuzzleLayout`] and the session's
//! [`SolveState`]. Actions on inert or out-of-bounds cells are ignored rather
//! than reported, and hint requests past the budget are no-ops.

mod selection;
mod state;

pub use selection::{Arrow, Selection};
pub use state::{Action, AnswerGrid, CheckSummary, SolveKey, SolveState, WordReport};

use crate::{EngineConfig, PlacedWord, Position, PuzzleLayout};
use std::collections::BTreeSet;

/// One solving session
#[derive(Debug, Clone)]
pub struct SolveController {
    layout: PuzzleLayout,
    state: SolveState,
}

impl SolveController {
    /// Start a session with the default hint budget
    pub fn new(layout: PuzzleLayout) -> Self {
        Self::with_config(layout, &EngineConfig::default())
    }

    pub fn with_config(layout: PuzzleLayout, config: &EngineConfig) -> Self {
        let state = SolveState::new(&layout, config.max_hints);
        Self { layout, state }
    }

    /// Resume a session from saved state. Returns None if the state does not
    /// fit the layout.
    pub fn resume(layout: PuzzleLayout, state: SolveState) -> Option<Self> {
        if state.answers().dimensions() != layout.dimensions()
            || !state.answers().is_well_formed()
            || !layout.active_mask().is_well_formed()
        {
            return None;
        }
        if let Some(word) = state.active_word_index() {
            if word >= layout.word_count() {
                return None;
            }
        }
        Some(Self { layout, state })
    }

    pub fn layout(&self) -> &PuzzleLayout {
        &self.layout
    }

    pub fn state(&self) -> &SolveState {
        &self.state
    }

    pub fn focus_cell(&mut self, row: usize, col: usize) -> bool {
        self.state.focus_cell(&self.layout, Position::new(row, col))
    }

    pub fn type_character(&mut self, row: usize, col: usize, ch: char) -> bool {
        self.state
            .type_character(&self.layout, Position::new(row, col), ch)
    }

    pub fn handle_key(&mut self, key: SolveKey, row: usize, col: usize) -> bool {
        self.state
            .handle_key(&self.layout, key, Position::new(row, col))
    }

    /// Clue-list selection
    pub fn select_word(&mut self, index: usize) -> bool {
        self.state.select_word(&self.layout, index)
    }

    pub fn check_solution(&mut self) -> CheckSummary {
        self.state.check_solution(&self.layout)
    }

    pub fn reveal_hint(&mut self) -> Option<Position> {
        self.state.reveal_hint(&self.layout)
    }

    pub fn answer_grid(&self) -> &AnswerGrid {
        self.state.answers()
    }

    pub fn cursor(&self) -> Option<Position> {
        self.state.cursor()
    }

    pub fn active_word(&self) -> Option<&PlacedWord> {
        self.state.active_word(&self.layout)
    }

    pub fn highlighted(&self) -> &BTreeSet<Position> {
        self.state.highlighted()
    }

    pub fn error_cells(&self) -> &BTreeSet<Position> {
        self.state.error_cells()
    }

    pub fn revealed_cells(&self) -> &BTreeSet<Position> {
        self.state.revealed_cells()
    }

    pub fn hints_used(&self) -> u32 {
        self.state.hints_used()
    }

    pub fn max_hints(&self) -> u32 {
        self.state.max_hints()
    }

    pub fn hints_remaining(&self) -> u32 {
        self.state.hints_remaining()
    }

    pub fn is_grid_complete(&self) -> bool {
        self.state.is_grid_complete(&self.layout)
    }

    pub fn correct_words(&self) -> Vec<&str> {
        self.state.correct_words(&self.layout)
    }

    pub fn word_reports(&self) -> Vec<WordReport> {
        self.state.word_reports(&self.layout)
    }
}
