use crate::app::{App, ScreenState};
use crate::stats::{format_time, SessionResult};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute,
    style::{Print, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use crossword_core::{PlacedWord, Position};
use std::io;

/// Columns a grid cell takes, including its left border
const CELL_WIDTH: u16 = 4;

pub fn render(stdout: &mut io::Stdout, app: &App) -> io::Result<()> {
    let (term_width, term_height) = terminal::size()?;

    execute!(stdout, Hide, SetBackgroundColor(app.theme.bg), Clear(ClearType::All))?;

    match app.screen_state {
        ScreenState::Playing => render_game_screen(stdout, app, term_width, term_height)?,
        ScreenState::Complete => render_complete_screen(stdout, app, term_width, term_height)?,
        ScreenState::Stats => render_stats_screen(stdout, app, term_width, term_height)?,
    }

    if let Some(ref msg) = app.message {
        render_message(stdout, app, msg, term_width)?;
    }

    execute!(stdout, Show)?;
    Ok(())
}

fn render_game_screen(
    stdout: &mut io::Stdout,
    app: &App,
    term_width: u16,
    term_height: u16,
) -> io::Result<()> {
    let dims = app.game.layout().dimensions();
    let grid_width = dims.cols as u16 * CELL_WIDTH + 1;
    let grid_height = dims.rows as u16 * 2 + 1;

    let start_x = 2;
    let start_y = if term_height > grid_height + 8 { 2 } else { 1 };

    render_grid(stdout, app, start_x, start_y)?;

    let panel_x = start_x + grid_width + 3;
    let panel_width = term_width.saturating_sub(panel_x + 1) as usize;
    let clues_y = render_info_panel(stdout, app, panel_x, start_y, panel_width)?;
    render_clues(stdout, app, panel_x, clues_y + 1, panel_width, term_height)?;

    let controls_y = start_y + grid_height + 1;
    render_controls(stdout, app, start_x, controls_y)?;

    Ok(())
}

fn render_grid(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;
    let layout = app.game.layout();
    let dims = layout.dimensions();

    // Clue numbers sit in the border above their cell:
    // +1--+---+2--+
    // | M | E | T |
    for row in 0..dims.rows {
        let sep_y = y + row as u16 * 2;
        execute!(stdout, MoveTo(x, sep_y), SetBackgroundColor(theme.bg))?;
        for col in 0..dims.cols {
            execute!(stdout, SetForegroundColor(theme.border), Print("+"))?;
            match layout.clue_number_at(Position::new(row, col)) {
                Some(n) => execute!(
                    stdout,
                    SetForegroundColor(theme.number),
                    Print(format!("{:-<3}", n))
                )?,
                None => execute!(stdout, Print("---"))?,
            }
        }
        execute!(stdout, SetForegroundColor(theme.border), Print("+"))?;

        execute!(stdout, MoveTo(x, sep_y + 1))?;
        for col in 0..dims.cols {
            execute!(
                stdout,
                SetBackgroundColor(theme.bg),
                SetForegroundColor(theme.border),
                Print("|")
            )?;
            render_cell(stdout, app, Position::new(row, col))?;
        }
        execute!(
            stdout,
            SetBackgroundColor(theme.bg),
            SetForegroundColor(theme.border),
            Print("|")
        )?;
    }

    let bottom = "+---".repeat(dims.cols) + "+";
    execute!(
        stdout,
        MoveTo(x, y + dims.rows as u16 * 2),
        SetForegroundColor(theme.border),
        Print(bottom)
    )?;
    Ok(())
}

fn render_cell(stdout: &mut io::Stdout, app: &App, pos: Position) -> io::Result<()> {
    let theme = &app.theme;
    let session = app.game.session();

    if !app.game.layout().is_active(pos) {
        execute!(stdout, SetBackgroundColor(theme.block), Print("   "))?;
        return Ok(());
    }

    let bg = if session.cursor() == Some(pos) {
        theme.selected_bg
    } else if session.highlighted().contains(&pos) {
        theme.highlight_bg
    } else {
        theme.bg
    };

    let fg = if session.error_cells().contains(&pos) {
        theme.error
    } else if session.revealed_cells().contains(&pos) {
        theme.revealed
    } else if app.game.is_completed() {
        theme.success
    } else {
        theme.letter
    };

    // Hide the grid while paused
    let content = match session.answer_grid().get(pos) {
        Some(ch) if !app.game.is_paused() => format!(" {} ", ch),
        _ => "   ".to_string(),
    };
    execute!(
        stdout,
        SetBackgroundColor(bg),
        SetForegroundColor(fg),
        Print(content)
    )?;
    Ok(())
}

/// Draws the info panel and returns the first free row below it
fn render_info_panel(
    stdout: &mut io::Stdout,
    app: &App,
    x: u16,
    y: u16,
    width: usize,
) -> io::Result<u16> {
    let theme = &app.theme;
    let game = &app.game;
    let session = game.session();

    execute!(stdout, SetBackgroundColor(theme.bg))?;

    execute!(
        stdout,
        MoveTo(x, y),
        SetForegroundColor(theme.key),
        Print("=== CROSSWORD ===")
    )?;
    execute!(
        stdout,
        MoveTo(x, y + 1),
        SetForegroundColor(theme.fg),
        Print(truncate(game.list_name(), width))
    )?;

    execute!(
        stdout,
        MoveTo(x, y + 3),
        SetForegroundColor(theme.info),
        Print(format!("Time:  {:>8}", game.elapsed_string()))
    )?;

    let hints_color = if session.hints_remaining() == 0 {
        theme.error
    } else {
        theme.info
    };
    execute!(
        stdout,
        MoveTo(x, y + 4),
        SetForegroundColor(hints_color),
        Print(format!(
            "Hints: {:>8}",
            format!("{}/{}", session.hints_used(), session.max_hints())
        ))
    )?;

    let correct = session.correct_words().len();
    let total = game.layout().word_count();
    execute!(
        stdout,
        MoveTo(x, y + 5),
        SetForegroundColor(if correct == total { theme.success } else { theme.info }),
        Print(format!("Words: {:>8}", format!("{}/{}", correct, total)))
    )?;

    let (status, color) = if game.is_completed() {
        ("Solved", theme.success)
    } else if game.is_paused() {
        ("Paused", theme.key)
    } else {
        ("Solving", theme.info)
    };
    execute!(
        stdout,
        MoveTo(x, y + 6),
        SetForegroundColor(theme.info),
        Print("State: "),
        SetForegroundColor(color),
        Print(format!("{:>8}", status))
    )?;

    let mut line = y + 8;
    if let Some(word) = session.active_word() {
        let text = format!("{}: {}", word.label(), word.clue);
        for part in wrap_text(&text, width.max(10)) {
            execute!(
                stdout,
                MoveTo(x, line),
                SetForegroundColor(theme.fg),
                Print(part)
            )?;
            line += 1;
        }
    }
    Ok(line)
}

fn render_clues(
    stdout: &mut io::Stdout,
    app: &App,
    x: u16,
    y: u16,
    width: usize,
    term_height: u16,
) -> io::Result<()> {
    let layout = app.game.layout();
    let mut line = y;
    for (title, words) in [("ACROSS", layout.across()), ("DOWN", layout.down())] {
        if line >= term_height {
            break;
        }
        execute!(
            stdout,
            MoveTo(x, line),
            SetForegroundColor(app.theme.key),
            Print(title)
        )?;
        line += 1;
        for word in words {
            if line >= term_height {
                break;
            }
            render_clue_line(stdout, app, word, x, line, width)?;
            line += 1;
        }
        line += 1;
    }
    Ok(())
}

fn render_clue_line(
    stdout: &mut io::Stdout,
    app: &App,
    word: &PlacedWord,
    x: u16,
    y: u16,
    width: usize,
) -> io::Result<()> {
    let theme = &app.theme;
    let session = app.game.session();
    let active = session.active_word() == Some(word);
    let correct = session.state().is_word_correct(word);

    let color = if active {
        theme.key
    } else if correct {
        theme.success
    } else {
        theme.fg
    };
    let marker = if active { ">" } else { " " };
    let text = format!("{}{:>2}. {} ({})", marker, word.clue_number, word.clue, word.len());
    execute!(
        stdout,
        MoveTo(x, y),
        SetForegroundColor(color),
        Print(truncate(&text, width))
    )?;
    Ok(())
}

fn render_controls(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;

    execute!(stdout, SetBackgroundColor(theme.bg))?;

    let controls = [
        ("Arrows", "Move"),
        ("Tab", "Next word"),
        ("S-Tab", "Prev word"),
        ("Enter", "Direction"),
        ("Bksp", "Clear"),
        ("^K", "Check"),
        ("?/^E", "Hint"),
        ("^P", "Pause"),
        ("^N", "New puzzle"),
        ("^S/^L", "Save/Load"),
        ("^G", "Stats"),
        ("^T", "Theme"),
        ("Esc", "Quit"),
    ];

    // 4 rows per column
    for (i, (key, desc)) in controls.iter().enumerate() {
        let col = i / 4;
        let row = i % 4;
        let cx = x + (col as u16) * 20;
        let cy = y + row as u16;

        execute!(
            stdout,
            MoveTo(cx, cy),
            SetForegroundColor(theme.key),
            Print(format!("{:>7}", key)),
            SetForegroundColor(theme.info),
            Print(format!(" {}", desc))
        )?;
    }

    Ok(())
}

fn render_message(
    stdout: &mut io::Stdout,
    app: &App,
    msg: &str,
    term_width: u16,
) -> io::Result<()> {
    let theme = &app.theme;
    let padded = format!("  {}  ", msg);
    let x = term_width.saturating_sub(padded.chars().count() as u16) / 2;

    execute!(
        stdout,
        MoveTo(x, 0),
        SetForegroundColor(theme.fg),
        SetBackgroundColor(theme.selected_bg),
        Print(&padded),
        SetBackgroundColor(theme.bg)
    )?;

    Ok(())
}

fn render_complete_screen(
    stdout: &mut io::Stdout,
    app: &App,
    term_width: u16,
    term_height: u16,
) -> io::Result<()> {
    let theme = &app.theme;
    let summary = app.game.summary();

    let lines = [
        ("Puzzle Complete!".to_string(), theme.success),
        (String::new(), theme.fg),
        ("Congratulations! You've solved the puzzle.".to_string(), theme.fg),
        (String::new(), theme.fg),
        (format!("Time:            {}", format_time(summary.elapsed_secs)), theme.info),
        (
            format!("Hints used:      {} / {}", summary.hints_used, summary.max_hints),
            theme.info,
        ),
        (
            format!("Words completed: {} / {}", summary.words_correct, summary.word_count),
            theme.info,
        ),
        (String::new(), theme.fg),
        ("n: new puzzle   s: stats   Esc: view grid   q: quit".to_string(), theme.key),
    ];

    let width = lines.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0) as u16;
    let x = term_width.saturating_sub(width) / 2;
    let y = term_height.saturating_sub(lines.len() as u16) / 2;

    for (i, (text, color)) in lines.iter().enumerate() {
        execute!(
            stdout,
            MoveTo(x, y + i as u16),
            SetForegroundColor(*color),
            Print(text)
        )?;
    }
    Ok(())
}

fn render_stats_screen(
    stdout: &mut io::Stdout,
    app: &App,
    term_width: u16,
    term_height: u16,
) -> io::Result<()> {
    let theme = &app.theme;
    let player = &app.stats.player;

    let title = "=== STATISTICS ===";
    let title_x = term_width.saturating_sub(title.len() as u16) / 2;
    execute!(
        stdout,
        MoveTo(title_x, 1),
        SetForegroundColor(theme.key),
        Print(title)
    )?;

    let x = 4u16;
    let y = 3u16;
    let rows = [
        (format!("Sessions:        {}", player.total_sessions), theme.info),
        (format!("Completed:       {}", player.completed), theme.success),
        (format!("Abandoned:       {}", player.abandoned), theme.border),
        (
            format!("Completion rate: {:.1}%", player.completion_rate()),
            theme.fg,
        ),
        (
            format!(
                "Streak:          {} (best {})",
                player.current_streak, player.best_streak
            ),
            theme.info,
        ),
        (
            format!(
                "Best time:       {}",
                player.best_time_secs.map_or("--".to_string(), format_time)
            ),
            theme.info,
        ),
        (
            format!(
                "Average time:    {}",
                player.avg_time_secs().map_or("--".to_string(), format_time)
            ),
            theme.info,
        ),
        (format!("Hints used:      {}", player.total_hints), theme.info),
        (format!("Hint-free:       {}", player.hint_free), theme.info),
    ];
    for (i, (text, color)) in rows.iter().enumerate() {
        execute!(
            stdout,
            MoveTo(x, y + i as u16),
            SetForegroundColor(*color),
            Print(text)
        )?;
    }

    let history_y = y + rows.len() as u16 + 2;
    execute!(
        stdout,
        MoveTo(x, history_y),
        SetForegroundColor(theme.key),
        Print("Recent sessions")
    )?;
    let room = term_height.saturating_sub(history_y + 3) as usize;
    for (i, record) in app.stats.recent_sessions(room.min(10)).iter().enumerate() {
        let (result, color) = match record.result {
            SessionResult::Completed => ("done", theme.success),
            SessionResult::Abandoned => ("left", theme.border),
        };
        let text = format!(
            "{:<20} {:>5}  {:>2}/{:<2} words  {} hints  {}",
            truncate(&record.list_name, 20),
            format_time(record.time_secs),
            record.words_correct,
            record.word_count,
            record.hints_used,
            result
        );
        execute!(
            stdout,
            MoveTo(x, history_y + 1 + i as u16),
            SetForegroundColor(color),
            Print(text)
        )?;
    }

    execute!(
        stdout,
        MoveTo(x, term_height.saturating_sub(2)),
        SetForegroundColor(theme.info),
        Print("Esc: back")
    )?;
    Ok(())
}

fn truncate(text: &str, max_width: usize) -> String {
    if text.chars().count() <= max_width {
        text.to_string()
    } else {
        text.chars().take(max_width).collect()
    }
}

fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.len() + word.len() + 1 > max_width && !current.is_empty() {
            lines.push(current);
            current = String::new();
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
