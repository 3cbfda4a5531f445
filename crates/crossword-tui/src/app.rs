use crate::game::{Game, HintRefusal};
use crate::stats::{format_time, SessionResult, StatsManager};
use crate::theme::Theme;
use crate::words::{shuffle_words, WordList};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossword_core::{
    Arrow, EngineConfig, GenerateError, PuzzleEngine, PuzzleLayout, TemplateTier,
};
use log::{info, warn};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Result of handling a key press
pub enum AppAction {
    Continue,
    Quit,
}

/// Current screen state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenState {
    /// Normal solving
    Playing,
    /// Puzzle solved, summary shown
    Complete,
    /// Statistics screen
    Stats,
}

/// How puzzles are built from the word list
#[derive(Debug, Clone, Default)]
pub struct PuzzleOptions {
    /// Force a template instead of choosing by word count
    pub tier: Option<TemplateTier>,
    /// Shuffle the list before each puzzle
    pub shuffle: bool,
    /// Seed for the first shuffle; later puzzles use seed + n
    pub seed: Option<u64>,
    pub config: EngineConfig,
}

/// The main application state
pub struct App {
    /// Current game
    pub game: Game,
    /// Source words for new puzzles
    words: WordList,
    options: PuzzleOptions,
    /// Puzzles generated so far
    puzzles_started: u64,
    /// Color theme
    pub theme: Theme,
    /// Message to display
    pub message: Option<String>,
    /// Message timer
    message_timer: u32,
    /// Current screen state
    pub screen_state: ScreenState,
    /// Statistics manager
    pub stats: StatsManager,
    /// Whether current game has been recorded (to avoid double recording)
    game_recorded: bool,
    save_path: PathBuf,
}

impl App {
    pub fn new(
        words: WordList,
        options: PuzzleOptions,
        stats: StatsManager,
    ) -> Result<Self, GenerateError> {
        let layout = build_layout(&words, &options, 0)?;
        let game = Game::new(layout, options.config.max_hints, &words.name);
        let mut app = Self {
            game,
            words,
            options,
            puzzles_started: 1,
            theme: Theme::dark(),
            message: None,
            message_timer: 0,
            screen_state: ScreenState::Playing,
            stats,
            game_recorded: false,
            save_path: Self::default_save_path(),
        };
        app.announce_conflicts();
        Ok(app)
    }

    /// Redirect saves, for tests
    #[cfg(test)]
    fn with_save_path(mut self, path: PathBuf) -> Self {
        self.save_path = path;
        self
    }

    pub fn get_tick_rate(&self) -> Duration {
        Duration::from_millis(100)
    }

    /// Update timers and detect completion (called every tick)
    pub fn tick(&mut self) {
        if self.message_timer > 0 {
            self.message_timer -= 1;
            if self.message_timer == 0 {
                self.message = None;
            }
        }

        if self.screen_state == ScreenState::Playing && self.game.is_completed() && !self.game_recorded {
            self.record_game(SessionResult::Completed);
            self.screen_state = ScreenState::Complete;
        }
    }

    fn record_game(&mut self, result: SessionResult) {
        if self.game_recorded {
            return;
        }
        self.game_recorded = true;
        let summary = self.game.summary();
        info!(
            "session {:?}: {}/{} words, {} hints, {}",
            result,
            summary.words_correct,
            summary.word_count,
            summary.hints_used,
            format_time(summary.elapsed_secs)
        );
        self.stats.record_session(&summary, result);
    }

    /// Show a temporary message
    pub fn show_message(&mut self, msg: &str) {
        self.message = Some(msg.to_string());
        self.message_timer = 30; // ~3 seconds at 100ms ticks
    }

    fn announce_conflicts(&mut self) {
        let conflicts = self.game.layout().conflicts().len();
        if conflicts > 0 {
            self.show_message(&format!(
                "{} crossing {} disagree; those cells cannot all be correct",
                conflicts,
                if conflicts == 1 { "cell" } else { "cells" }
            ));
        }
    }

    /// Start over with a fresh puzzle from the same list
    pub fn new_puzzle(&mut self) {
        if !self.game.is_completed() && self.game.has_progress() {
            self.record_game(SessionResult::Abandoned);
        }
        match build_layout(&self.words, &self.options, self.puzzles_started) {
            Ok(layout) => {
                self.puzzles_started += 1;
                self.game = Game::new(layout, self.options.config.max_hints, &self.words.name);
                self.game_recorded = false;
                self.screen_state = ScreenState::Playing;
                self.show_message("New puzzle");
                self.announce_conflicts();
            }
            Err(e) => {
                warn!("new puzzle failed: {}", e);
                self.show_message(&format!("Could not build a puzzle: {}", e));
            }
        }
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        match self.screen_state {
            ScreenState::Playing => self.handle_game_key(key),
            ScreenState::Complete => self.handle_complete_key(key),
            ScreenState::Stats => self.handle_stats_key(key),
        }
    }

    fn quit(&mut self) -> AppAction {
        if !self.game.is_completed() && self.game.has_progress() {
            self.record_game(SessionResult::Abandoned);
        }
        AppAction::Quit
    }

    fn handle_game_key(&mut self, key: KeyEvent) -> AppAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return self.handle_control_key(key.code);
        }

        match key.code {
            KeyCode::Esc => return self.quit(),

            KeyCode::Up => {
                self.game.navigate(Arrow::Up);
            }
            KeyCode::Down => {
                self.game.navigate(Arrow::Down);
            }
            KeyCode::Left => {
                self.game.navigate(Arrow::Left);
            }
            KeyCode::Right => {
                self.game.navigate(Arrow::Right);
            }
            KeyCode::Tab => {
                self.game.next_word();
            }
            KeyCode::BackTab => {
                self.game.previous_word();
            }
            KeyCode::Enter => {
                self.game.toggle_direction();
            }
            KeyCode::Backspace | KeyCode::Delete => {
                self.game.backspace();
            }

            KeyCode::Char('?') => self.reveal_hint(),

            KeyCode::Char(c) => {
                if self.game.is_paused() {
                    self.show_message("Paused (Ctrl+P to resume)");
                } else if self.game.session().cursor().is_none() {
                    self.show_message("Select a cell first (Tab or arrows)");
                } else {
                    self.game.type_character(c);
                }
            }

            _ => {}
        }
        AppAction::Continue
    }

    fn handle_control_key(&mut self, code: KeyCode) -> AppAction {
        match code {
            KeyCode::Char('q') => return self.quit(),
            KeyCode::Char('k') => self.check_solution(),
            KeyCode::Char('e') => self.reveal_hint(),
            KeyCode::Char('p') => {
                self.game.toggle_pause();
                if self.game.is_paused() {
                    self.show_message("Paused");
                } else {
                    self.show_message("Resumed");
                }
            }
            KeyCode::Char('n') => self.new_puzzle(),
            KeyCode::Char('s') => self.save_game(),
            KeyCode::Char('l') => self.load_game(),
            KeyCode::Char('g') => self.screen_state = ScreenState::Stats,
            KeyCode::Char('t') => {
                self.theme = self.theme.next();
                let msg = format!("{} theme", self.theme.name);
                self.show_message(&msg);
            }
            _ => {}
        }
        AppAction::Continue
    }

    fn check_solution(&mut self) {
        match self.game.check() {
            Some(summary) => self.show_message(&summary.to_string()),
            None => self.show_message("Paused (Ctrl+P to resume)"),
        }
    }

    fn reveal_hint(&mut self) {
        match self.game.reveal_hint() {
            Ok(_) => {
                let left = self.game.session().hints_remaining();
                self.show_message(&format!(
                    "Hint revealed ({} {} left)",
                    left,
                    if left == 1 { "hint" } else { "hints" }
                ));
            }
            Err(HintRefusal::Exhausted) => self.show_message("No hints left"),
            Err(HintRefusal::NoActiveWord) => self.show_message("Select a word first"),
            Err(HintRefusal::WordComplete) => self.show_message("This word is already complete!"),
            Err(HintRefusal::Unavailable) => {}
        }
    }

    fn handle_complete_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Char('q') => return AppAction::Quit,
            KeyCode::Char('n') | KeyCode::Enter | KeyCode::Char(' ') => self.new_puzzle(),
            KeyCode::Char('s') => self.screen_state = ScreenState::Stats,
            KeyCode::Esc => {
                // Back to the finished grid
                self.screen_state = ScreenState::Playing;
            }
            _ => {}
        }
        AppAction::Continue
    }

    fn handle_stats_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.screen_state = if self.game.is_completed() {
                    ScreenState::Complete
                } else {
                    ScreenState::Playing
                };
            }
            _ => {}
        }
        AppAction::Continue
    }

    /// Get the save file path
    fn default_save_path() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("crossword_save.json")
    }

    fn save_game(&mut self) {
        let json = self.game.serialize();
        match fs::write(&self.save_path, json) {
            Ok(_) => self.show_message("Game saved"),
            Err(e) => {
                warn!("save to {} failed: {}", self.save_path.display(), e);
                self.show_message("Failed to save");
            }
        }
    }

    fn load_game(&mut self) {
        match fs::read_to_string(&self.save_path) {
            Ok(json) => match Game::deserialize(&json) {
                Some(game) => {
                    self.game = game;
                    self.game_recorded = self.game.is_completed();
                    self.screen_state = ScreenState::Playing;
                    self.show_message("Game loaded (Ctrl+P to resume)");
                }
                None => self.show_message("Invalid save file"),
            },
            Err(_) => self.show_message("No save file found"),
        }
    }
}

/// Generate the `n`th puzzle for a word list
fn build_layout(
    list: &WordList,
    options: &PuzzleOptions,
    n: u64,
) -> Result<PuzzleLayout, GenerateError> {
    let mut words = list.words.clone();
    if options.shuffle {
        shuffle_words(&mut words, options.seed.map(|s| s.wrapping_add(n)));
    }
    let engine = PuzzleEngine::new(options.config);
    match options.tier {
        Some(tier) => engine.generate_with_template(&words, tier),
        None => engine.generate(&words),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::words::sample_word_list;
    use crossword_core::Position;

    fn press(app: &mut App, code: KeyCode) -> AppAction {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ctrl(app: &mut App, c: char) -> AppAction {
        app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    fn sample_app() -> App {
        App::new(sample_word_list(), PuzzleOptions::default(), StatsManager::in_memory()).unwrap()
    }

    fn type_word(app: &mut App, word: &str) {
        for c in word.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_typing_without_cursor_shows_message() {
        let mut app = sample_app();
        press(&mut app, KeyCode::Char('m'));
        assert!(app.message.is_some());
        assert_eq!(app.game.session().answer_grid().filled_count(), 0);
    }

    #[test]
    fn test_tab_then_type() {
        let mut app = sample_app();
        press(&mut app, KeyCode::Tab);
        type_word(&mut app, "me");
        let grid = app.game.session().answer_grid();
        assert_eq!(grid.get(Position::new(0, 0)), Some('M'));
        assert_eq!(grid.get(Position::new(0, 1)), Some('E'));
        assert_eq!(app.game.session().cursor(), Some(Position::new(0, 2)));
    }

    #[test]
    fn test_enter_switches_to_crossing_word() {
        let mut app = sample_app();
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Right);
        // (0,2) is where TULIP starts; METAL stays active while moving along it
        assert_eq!(
            app.game.session().active_word().map(|w| w.text.as_str()),
            Some("METAL")
        );
        press(&mut app, KeyCode::Enter);
        assert_eq!(
            app.game.session().active_word().map(|w| w.text.as_str()),
            Some("TULIP")
        );
    }

    #[test]
    fn test_hint_and_check_keys() {
        let mut app = sample_app();
        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.message.as_deref(), Some("Select a word first"));

        press(&mut app, KeyCode::Tab);
        ctrl(&mut app, 'e');
        assert_eq!(app.game.session().hints_used(), 1);

        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Char('x'));
        ctrl(&mut app, 'k');
        assert_eq!(app.game.session().error_cells().len(), 1);
    }

    #[test]
    fn test_solving_reaches_complete_screen() {
        let mut app = sample_app();
        let words: Vec<String> = app.game.layout().words().iter().map(|w| w.text.clone()).collect();
        for word in &words {
            press(&mut app, KeyCode::Tab);
            // Tab from no selection restarts at the first word
            while app.game.session().active_word().map(|w| &w.text) != Some(word) {
                press(&mut app, KeyCode::Tab);
            }
            type_word(&mut app, &word.to_lowercase());
        }
        assert!(app.game.is_completed());
        app.tick();
        assert_eq!(app.screen_state, ScreenState::Complete);
        assert_eq!(app.stats.player.completed, 1);

        // A second tick must not record twice
        app.tick();
        assert_eq!(app.stats.player.total_sessions, 1);

        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.screen_state, ScreenState::Playing);
        assert!(!app.game.is_completed());
    }

    #[test]
    fn test_new_puzzle_records_abandoned_progress() {
        let mut app = sample_app();
        press(&mut app, KeyCode::Tab);
        type_word(&mut app, "m");
        ctrl(&mut app, 'n');
        assert_eq!(app.stats.player.abandoned, 1);
        assert_eq!(app.game.session().answer_grid().filled_count(), 0);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = sample_app();
        assert!(matches!(press(&mut app, KeyCode::Esc), AppAction::Quit));
        let mut app = sample_app();
        assert!(matches!(ctrl(&mut app, 'q'), AppAction::Quit));
        assert_eq!(app.stats.player.total_sessions, 0);
    }

    #[test]
    fn test_pause_blocks_typing() {
        let mut app = sample_app();
        press(&mut app, KeyCode::Tab);
        ctrl(&mut app, 'p');
        press(&mut app, KeyCode::Char('m'));
        assert_eq!(app.game.session().answer_grid().filled_count(), 0);
        ctrl(&mut app, 'p');
        press(&mut app, KeyCode::Char('m'));
        assert_eq!(app.game.session().answer_grid().filled_count(), 1);
    }

    #[test]
    fn test_stats_screen_round_trip() {
        let mut app = sample_app();
        ctrl(&mut app, 'g');
        assert_eq!(app.screen_state, ScreenState::Stats);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.screen_state, ScreenState::Playing);
    }

    #[test]
    fn test_theme_cycles() {
        let mut app = sample_app();
        ctrl(&mut app, 't');
        assert_eq!(app.theme.name, "Light");
        ctrl(&mut app, 't');
        ctrl(&mut app, 't');
        assert_eq!(app.theme.name, "Dark");
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("crossword_save_test_{}.json", std::process::id()));
        let mut app = sample_app().with_save_path(path.clone());
        press(&mut app, KeyCode::Tab);
        type_word(&mut app, "me");
        ctrl(&mut app, 's');

        ctrl(&mut app, 'n');
        assert_eq!(app.game.session().answer_grid().filled_count(), 0);

        ctrl(&mut app, 'l');
        assert!(app.game.is_paused());
        assert_eq!(app.game.session().answer_grid().filled_count(), 2);
        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_forced_tier_and_seeded_shuffle() {
        let options = PuzzleOptions {
            tier: Some(TemplateTier::Small),
            shuffle: true,
            seed: Some(7),
            config: EngineConfig::default(),
        };
        let a = App::new(sample_word_list(), options.clone(), StatsManager::in_memory());
        let b = App::new(sample_word_list(), options, StatsManager::in_memory());
        match (a, b) {
            (Ok(a), Ok(b)) => assert_eq!(a.game.layout(), b.game.layout()),
            (Err(a), Err(b)) => assert_eq!(a, b),
            _ => panic!("seeded generation differed"),
        }
    }
}
