mod app;
mod game;
mod logging;
mod render;
mod stats;
mod theme;
mod words;

use app::{App, PuzzleOptions};
use clap::{Parser, ValueEnum};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use crossword_core::{EngineConfig, TemplateTier, MAX_HINTS};
use log::{error, info};
use stats::StatsManager;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TierArg {
    Small,
    Medium,
    Large,
}

impl From<TierArg> for TemplateTier {
    fn from(tier: TierArg) -> Self {
        match tier {
            TierArg::Small => TemplateTier::Small,
            TierArg::Medium => TemplateTier::Medium,
            TierArg::Large => TemplateTier::Large,
        }
    }
}

/// Crossword puzzles in the terminal
#[derive(Debug, Parser)]
#[command(name = "crossword", version, about)]
struct Args {
    /// JSON word list (defaults to a built-in sampler)
    #[arg(short, long, value_name = "FILE")]
    words: Option<PathBuf>,

    /// Force a grid template instead of choosing by word count
    #[arg(long, value_enum)]
    tier: Option<TierArg>,

    /// Shuffle the word list before each puzzle
    #[arg(long)]
    shuffle: bool,

    /// Seed for --shuffle
    #[arg(long, requires = "shuffle")]
    seed: Option<u64>,

    /// Hints available per puzzle
    #[arg(long, default_value_t = MAX_HINTS)]
    max_hints: u32,

    /// Write logs to this file
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Log at debug level
    #[arg(long)]
    debug: bool,
}

fn invalid_data(e: impl std::fmt::Display) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, e.to_string())
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    logging::init_logger(args.log_file.as_deref(), args.debug)?;

    let list = match &args.words {
        Some(path) => words::load_word_list(path).map_err(invalid_data)?,
        None => words::sample_word_list(),
    };
    words::validate(&list).map_err(invalid_data)?;
    info!("loaded {} words from '{}'", list.words.len(), list.name);

    let options = PuzzleOptions {
        tier: args.tier.map(TemplateTier::from),
        shuffle: args.shuffle,
        seed: args.seed,
        config: EngineConfig::with_max_hints(args.max_hints),
    };
    let app = App::new(list, options, StatsManager::load()).map_err(|e| {
        error!("generation failed: {}", e);
        invalid_data(e)
    })?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let result = run_app(&mut stdout, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout, LeaveAlternateScreen)?;

    if let Err(e) = result {
        error!("terminal loop failed: {}", e);
        eprintln!("Error: {}", e);
    }

    Ok(())
}

fn run_app(stdout: &mut io::Stdout, mut app: App) -> io::Result<()> {
    let mut last_tick = Instant::now();

    loop {
        let tick_rate = app.get_tick_rate();

        render::render(stdout, &app)?;
        stdout.flush()?;

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout.min(Duration::from_millis(33)))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                // Ctrl+C always exits
                if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                    break;
                }

                match app.handle_key(key) {
                    app::AppAction::Continue => {}
                    app::AppAction::Quit => break,
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.tick();
            last_tick = Instant::now();
        }
    }

    Ok(())
}
