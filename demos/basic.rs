//! Basic example of using the crossword engine

use crossword_core::{generate_crossword, CheckSummary, Direction, SolveController, WordEntry};

fn main() {
    let words: Vec<WordEntry> = [
        ("cat", "Purring pet"),
        ("dog", "Loyal companion"),
        ("bird", "Has feathers"),
        ("fish", "Lives in water"),
        ("lion", "King of the jungle"),
    ]
    .iter()
    .enumerate()
    .map(|(i, (word, clue))| WordEntry::new(format!("w{}", i + 1), *word, *clue, "en"))
    .collect();

    println!("Generating a puzzle from {} words...\n", words.len());
    let layout = match generate_crossword(&words) {
        Ok(layout) => layout,
        Err(e) => {
            eprintln!("Generation failed: {}", e);
            return;
        }
    };

    println!("Layout ({}x{}):", layout.dimensions().rows, layout.dimensions().cols);
    println!("{}", layout);

    println!("Across:");
    for word in layout.across() {
        println!("  {:>2}. {} ({})", word.clue_number, word.clue, word.len());
    }
    println!("Down:");
    for word in layout.down() {
        println!("  {:>2}. {} ({})", word.clue_number, word.clue, word.len());
    }

    for conflict in layout.conflicts() {
        println!("Crossing conflict: {}", conflict);
    }

    // Solve the first across word by typing, then ask for a hint on the next
    let mut session = SolveController::new(layout.clone());
    if let Some(first) = layout.across().first() {
        session.focus_cell(first.start_row, first.start_col);
        for (pos, letter) in first.letters() {
            session.type_character(pos.row, pos.col, letter);
        }
        println!("\nTyped {} at {}", first.text, first.label());
    }

    if let Some(index) = layout
        .words()
        .iter()
        .position(|w| w.direction == Direction::Down)
    {
        session.select_word(index);
        if let Some(pos) = session.reveal_hint() {
            println!("Hint revealed {} ({} left)", pos, session.hints_remaining());
        }
    }

    match session.check_solution() {
        CheckSummary::Solved => println!("Solved!"),
        summary => println!("{}", summary),
    }
    println!("Correct words: {:?}", session.correct_words());
}
