use crossword_core::{
    Arrow, CheckSummary, EngineConfig, Position, PuzzleLayout, SolveController, SolveKey,
    SolveState,
};
use log::info;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// What a finished (or abandoned) session amounts to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub list_name: String,
    pub hints_used: u32,
    pub max_hints: u32,
    pub word_count: usize,
    pub words_correct: usize,
    pub elapsed_secs: u64,
}

/// Why a hint request revealed nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintRefusal {
    Exhausted,
    NoActiveWord,
    WordComplete,
    Unavailable,
}

/// A solving session with its timer
#[derive(Debug, Clone)]
pub struct Game {
    session: SolveController,
    /// Name of the word list the puzzle came from
    list_name: String,
    /// Start time
    start_time: Instant,
    /// Elapsed time (for pause/resume)
    elapsed: Duration,
    paused: bool,
    completed: bool,
    /// Where the cursor last was, so arrows work after a word closes
    last_cursor: Option<Position>,
}

impl Game {
    pub fn new(layout: PuzzleLayout, max_hints: u32, list_name: &str) -> Self {
        info!(
            "new session: {} words, {}x{} grid",
            layout.word_count(),
            layout.dimensions().rows,
            layout.dimensions().cols
        );
        let session = SolveController::with_config(layout, &EngineConfig::with_max_hints(max_hints));
        Self {
            session,
            list_name: list_name.to_string(),
            start_time: Instant::now(),
            elapsed: Duration::ZERO,
            paused: false,
            completed: false,
            last_cursor: None,
        }
    }

    pub fn session(&self) -> &SolveController {
        &self.session
    }

    pub fn layout(&self) -> &PuzzleLayout {
        self.session.layout()
    }

    pub fn list_name(&self) -> &str {
        &self.list_name
    }

    /// Get the elapsed time
    pub fn elapsed(&self) -> Duration {
        if self.paused || self.completed {
            self.elapsed
        } else {
            self.elapsed + self.start_time.elapsed()
        }
    }

    /// Format the elapsed time as MM:SS
    pub fn elapsed_string(&self) -> String {
        let secs = self.elapsed().as_secs();
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Whether the player has typed or revealed anything yet
    pub fn has_progress(&self) -> bool {
        self.session.answer_grid().filled_count() > 0
    }

    pub fn toggle_pause(&mut self) {
        if self.completed {
            return;
        }

        if self.paused {
            self.start_time = Instant::now();
        } else {
            self.elapsed += self.start_time.elapsed();
        }
        self.paused = !self.paused;
    }

    fn accepts_input(&self) -> bool {
        !self.paused && !self.completed
    }

    fn remember_cursor(&mut self) {
        if let Some(pos) = self.session.cursor() {
            self.last_cursor = Some(pos);
        }
    }

    /// Freeze the timer once every word is filled in correctly
    fn update_completion(&mut self) {
        if self.completed || !self.session.is_grid_complete() {
            return;
        }
        self.elapsed += self.start_time.elapsed();
        self.completed = true;
        info!(
            "puzzle complete in {} with {} hints",
            self.elapsed_string(),
            self.session.hints_used()
        );
    }

    pub fn focus_cell(&mut self, pos: Position) -> bool {
        if !self.accepts_input() {
            return false;
        }
        let changed = self.session.focus_cell(pos.row, pos.col);
        self.remember_cursor();
        changed
    }

    /// Focus the cursor cell again, switching to the crossing word
    pub fn toggle_direction(&mut self) -> bool {
        match self.session.cursor() {
            Some(pos) => self.focus_cell(pos),
            None => false,
        }
    }

    pub fn select_word(&mut self, index: usize) -> bool {
        if !self.accepts_input() {
            return false;
        }
        let changed = self.session.select_word(index);
        self.remember_cursor();
        changed
    }

    /// Type at the cursor. Returns false with no cursor.
    pub fn type_character(&mut self, ch: char) -> bool {
        if !self.accepts_input() {
            return false;
        }
        let Some(pos) = self.session.cursor() else {
            return false;
        };
        let typed = self.session.type_character(pos.row, pos.col, ch);
        self.remember_cursor();
        self.update_completion();
        typed
    }

    /// Move from the cursor, or from where it last was
    pub fn navigate(&mut self, arrow: Arrow) -> bool {
        if !self.accepts_input() {
            return false;
        }
        let Some(from) = self.session.cursor().or(self.last_cursor) else {
            return self.next_word();
        };
        let moved = self
            .session
            .handle_key(SolveKey::Arrow(arrow), from.row, from.col);
        self.remember_cursor();
        moved
    }

    pub fn next_word(&mut self) -> bool {
        if !self.accepts_input() {
            return false;
        }
        let pos = self.session.cursor().unwrap_or(Position::new(0, 0));
        let changed = self.session.handle_key(SolveKey::Tab, pos.row, pos.col);
        self.remember_cursor();
        changed
    }

    /// Select the word before the active one, wrapping around
    pub fn previous_word(&mut self) -> bool {
        let count = self.layout().word_count();
        if count == 0 {
            return false;
        }
        let index = match self.session.state().active_word_index() {
            Some(i) => (i + count - 1) % count,
            None => count - 1,
        };
        self.select_word(index)
    }

    pub fn backspace(&mut self) -> bool {
        if !self.accepts_input() {
            return false;
        }
        let Some(pos) = self.session.cursor() else {
            return false;
        };
        let cleared = self
            .session
            .handle_key(SolveKey::Backspace, pos.row, pos.col);
        self.remember_cursor();
        cleared
    }

    pub fn check(&mut self) -> Option<CheckSummary> {
        if self.paused {
            return None;
        }
        let summary = self.session.check_solution();
        self.update_completion();
        Some(summary)
    }

    pub fn reveal_hint(&mut self) -> Result<Position, HintRefusal> {
        if !self.accepts_input() {
            return Err(HintRefusal::Unavailable);
        }
        if self.session.hints_remaining() == 0 {
            return Err(HintRefusal::Exhausted);
        }
        if self.session.active_word().is_none() {
            return Err(HintRefusal::NoActiveWord);
        }
        let pos = self.session.reveal_hint().ok_or(HintRefusal::WordComplete)?;
        self.update_completion();
        Ok(pos)
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            list_name: self.list_name.clone(),
            hints_used: self.session.hints_used(),
            max_hints: self.session.max_hints(),
            word_count: self.layout().word_count(),
            words_correct: self.session.correct_words().len(),
            elapsed_secs: self.elapsed().as_secs(),
        }
    }

    /// Serialize the session for saving
    pub fn serialize(&self) -> String {
        let state = SaveState {
            list_name: self.list_name.clone(),
            layout: self.layout().clone(),
            state: self.session.state().clone(),
            elapsed_secs: self.elapsed().as_secs(),
        };
        serde_json::to_string(&state).unwrap_or_default()
    }

    /// Restore a saved session. It starts paused.
    pub fn deserialize(json: &str) -> Option<Self> {
        let saved: SaveState = serde_json::from_str(json).ok()?;
        let session = SolveController::resume(saved.layout, saved.state)?;
        let completed = session.is_grid_complete();
        let last_cursor = session.cursor();
        Some(Self {
            session,
            list_name: saved.list_name,
            start_time: Instant::now(),
            elapsed: Duration::from_secs(saved.elapsed_secs),
            paused: !completed,
            completed,
            last_cursor,
        })
    }
}

#[derive(Serialize, Deserialize)]
struct SaveState {
    list_name: String,
    layout: PuzzleLayout,
    state: SolveState,
    elapsed_secs: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::words::sample_word_list;
    use crossword_core::generate_crossword;

    fn sample_game() -> Game {
        let list = sample_word_list();
        let layout = generate_crossword(&list.words).unwrap();
        Game::new(layout, 3, &list.name)
    }

    fn solve_all(game: &mut Game) {
        let words: Vec<_> = game.layout().words().to_vec();
        for (index, word) in words.iter().enumerate() {
            game.select_word(index);
            for ch in word.text.chars() {
                game.type_character(ch);
            }
        }
    }

    #[test]
    fn test_typing_needs_a_cursor() {
        let mut game = sample_game();
        assert!(!game.type_character('m'));
        assert!(game.next_word());
        assert!(game.type_character('m'));
        assert_eq!(game.session().cursor(), Some(Position::new(0, 1)));
    }

    #[test]
    fn test_navigate_after_word_closes() {
        let mut game = sample_game();
        // TULIP runs down from (0,2)
        game.focus_cell(Position::new(0, 2));
        assert_eq!(game.session().active_word().map(|w| w.text.as_str()), Some("TULIP"));
        for ch in "tulip".chars() {
            game.type_character(ch);
        }
        assert_eq!(game.session().cursor(), None);
        // Last cursor was (4,2); moving right lands on POEMS
        assert!(game.navigate(Arrow::Right));
        assert_eq!(game.session().cursor(), Some(Position::new(4, 3)));
    }

    #[test]
    fn test_solving_completes_and_freezes_timer() {
        let mut game = sample_game();
        solve_all(&mut game);
        assert!(game.is_completed());

        let summary = game.summary();
        assert_eq!(summary.word_count, 7);
        assert_eq!(summary.words_correct, 7);
        assert_eq!(summary.hints_used, 0);

        let frozen = game.elapsed();
        std::thread::sleep(Duration::from_millis(5));
        assert_eq!(game.elapsed(), frozen);
        assert!(!game.type_character('x'));
    }

    #[test]
    fn test_previous_word_wraps() {
        let mut game = sample_game();
        assert!(game.previous_word());
        assert_eq!(game.session().active_word().map(|w| w.text.as_str()), Some("PLANNER"));
        assert!(game.previous_word());
        assert_eq!(game.session().active_word().map(|w| w.text.as_str()), Some("POEMS"));
    }

    #[test]
    fn test_pause_blocks_input() {
        let mut game = sample_game();
        game.toggle_pause();
        assert!(game.is_paused());
        assert!(!game.next_word());
        assert_eq!(game.reveal_hint(), Err(HintRefusal::Unavailable));
        game.toggle_pause();
        assert!(game.next_word());
    }

    #[test]
    fn test_hint_refusals() {
        let mut game = sample_game();
        assert_eq!(game.reveal_hint(), Err(HintRefusal::NoActiveWord));

        game.select_word(0);
        assert_eq!(game.reveal_hint(), Ok(Position::new(0, 0)));
        assert_eq!(game.reveal_hint(), Ok(Position::new(0, 1)));
        assert_eq!(game.reveal_hint(), Ok(Position::new(0, 2)));
        assert_eq!(game.reveal_hint(), Err(HintRefusal::Exhausted));
        assert_eq!(game.summary().hints_used, 3);
    }

    #[test]
    fn test_hint_on_complete_word() {
        let mut game = sample_game();
        game.select_word(0);
        for ch in "metal".chars() {
            game.type_character(ch);
        }
        game.select_word(0);
        assert_eq!(game.reveal_hint(), Err(HintRefusal::WordComplete));
    }

    #[test]
    fn test_save_and_restore() {
        let mut game = sample_game();
        game.select_word(0);
        game.type_character('m');
        game.type_character('e');

        let json = game.serialize();
        let restored = Game::deserialize(&json).unwrap();
        assert!(restored.is_paused());
        assert_eq!(restored.list_name(), "Sampler");
        assert_eq!(restored.layout(), game.layout());
        assert_eq!(restored.session().state(), game.session().state());
        assert!(Game::deserialize("{not json").is_none());
    }

    #[test]
    fn test_restore_rejects_truncated_cells() {
        let mut game = sample_game();
        game.select_word(0);
        game.type_character('m');
        let json = game.serialize();

        let mut saved: serde_json::Value = serde_json::from_str(&json).unwrap();
        saved["state"]["answers"]["cells"] = serde_json::json!([]);
        assert!(Game::deserialize(&saved.to_string()).is_none());

        let mut saved: serde_json::Value = serde_json::from_str(&json).unwrap();
        saved["layout"]["mask"]["cells"] = serde_json::json!([true]);
        assert!(Game::deserialize(&saved.to_string()).is_none());
    }
}
