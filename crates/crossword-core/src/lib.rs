//! Crossword puzzle engine.
//!
//! Generation turns a flat list of [`WordEntry`] values into a
//! [`PuzzleLayout`] by laying them onto one of a few fixed grid templates:
//!
//! ```
//! use crossword_core::{generate_crossword, SolveController, WordEntry};
//!
//! let words: Vec<WordEntry> = [("cat", "feline"), ("dog", "canine"), ("bird", "flies"),
//!                              ("fish", "swims"), ("lion", "roars")]
//!     .iter()
//!     .enumerate()
//!     .map(|(i, (w, c))| WordEntry::new(i.to_string(), *w, *c, "en"))
//!     .collect();
//!
//! let layout = generate_crossword(&words).unwrap();
//! let mut session = SolveController::new(layout);
//! session.focus_cell(0, 0);
//! session.type_character(0, 0, 'f');
//! assert_eq!(session.cursor().map(|p| (p.row, p.col)), Some((0, 1)));
//! ```
//!
//! The engine is synchronous and does no I/O.

pub mod controller;
pub mod error;
pub mod generator;
pub mod grid;
pub mod matcher;
pub mod numbering;
pub mod template;
pub mod types;

pub use controller::{
    Action, AnswerGrid, Arrow, CheckSummary, Selection, SolveController, SolveKey, SolveState,
    WordReport,
};
pub use error::GenerateError;
pub use generator::{
    generate_crossword, EngineConfig, PuzzleEngine, LENGTH_TOLERANCE, MAX_HINTS, MIN_MATCHED,
    MIN_WORDS,
};
pub use grid::{ActiveMask, CrossingConflict, Dimensions, PuzzleLayout};
pub use template::{select_template, TemplateTier};
pub use types::{Direction, PlacedWord, Position, Slot, WordEntry};
