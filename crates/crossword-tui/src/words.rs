//! Word list loading and validation.
//!
//! Lists are JSON, either a bare array of entries or an object with a `name`
//! and a `words` array. Entries accept `word` or `text` for the answer and
//! `clue` or `definition` for the clue.

use crossword_core::{WordEntry, MIN_WORDS};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

pub const MIN_WORD_LEN: usize = 2;
pub const MAX_WORD_LEN: usize = 30;
pub const MIN_CLUE_LEN: usize = 2;
pub const MAX_CLUE_LEN: usize = 200;
pub const MIN_NAME_LEN: usize = 2;
pub const MAX_NAME_LEN: usize = 50;
/// Most words a single puzzle may be built from
pub const MAX_WORDS: usize = 20;

const DEFAULT_LANGUAGE: &str = "en";

#[derive(Debug, Error)]
pub enum WordListError {
    #[error("failed to read word list: {0}")]
    Io(#[from] io::Error),

    #[error("invalid word list JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("list name must be 2-50 characters, found {0}")]
    NameLength(usize),

    #[error("need at least {required} words, found {found}")]
    TooFewWords { found: usize, required: usize },

    #[error("at most {max} words per puzzle, found {found}")]
    TooManyWords { found: usize, max: usize },

    #[error("entry {index} ({word}): word must be 2-30 characters, found {len}")]
    WordLength {
        index: usize,
        word: String,
        len: usize,
    },

    #[error("entry {index} ({word}): word must not contain spaces")]
    WordWhitespace { index: usize, word: String },

    #[error("entry {index} ({word}): clue must be 2-200 characters, found {len}")]
    ClueLength {
        index: usize,
        word: String,
        len: usize,
    },

    #[error("duplicate word id: {0}")]
    DuplicateId(String),
}

/// A named list of words to build puzzles from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordList {
    pub name: String,
    pub words: Vec<WordEntry>,
}

#[derive(Deserialize)]
struct RawWord {
    #[serde(default)]
    id: Option<String>,
    #[serde(alias = "text")]
    word: String,
    #[serde(alias = "definition")]
    clue: String,
    #[serde(default)]
    language: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawList {
    Bare(Vec<RawWord>),
    Named {
        #[serde(default)]
        name: Option<String>,
        words: Vec<RawWord>,
    },
}

/// Parse a word list from JSON. Entries without an id get `w1`, `w2`, ...
pub fn parse_word_list(json: &str, default_name: &str) -> Result<WordList, WordListError> {
    let (name, raw) = match serde_json::from_str::<RawList>(json)? {
        RawList::Bare(words) => (None, words),
        RawList::Named { name, words } => (name, words),
    };

    let words = raw
        .into_iter()
        .enumerate()
        .map(|(i, w)| {
            WordEntry::new(
                w.id.unwrap_or_else(|| format!("w{}", i + 1)),
                w.word.trim(),
                w.clue.trim(),
                w.language.unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
            )
        })
        .collect();

    Ok(WordList {
        name: name.unwrap_or_else(|| default_name.to_string()),
        words,
    })
}

/// Read and parse a word list file. The file stem names the list unless the
/// file carries its own name.
pub fn load_word_list(path: &Path) -> Result<WordList, WordListError> {
    let json = fs::read_to_string(path)?;
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Word list".to_string());
    parse_word_list(&json, &stem)
}

/// Check a list against the word form rules
pub fn validate(list: &WordList) -> Result<(), WordListError> {
    let name_len = list.name.chars().count();
    if !(MIN_NAME_LEN..=MAX_NAME_LEN).contains(&name_len) {
        return Err(WordListError::NameLength(name_len));
    }

    let found = list.words.len();
    if found < MIN_WORDS {
        return Err(WordListError::TooFewWords {
            found,
            required: MIN_WORDS,
        });
    }
    if found > MAX_WORDS {
        return Err(WordListError::TooManyWords {
            found,
            max: MAX_WORDS,
        });
    }

    let mut ids = HashSet::new();
    for (index, entry) in list.words.iter().enumerate() {
        let len = entry.text.chars().count();
        if !(MIN_WORD_LEN..=MAX_WORD_LEN).contains(&len) {
            return Err(WordListError::WordLength {
                index,
                word: entry.text.clone(),
                len,
            });
        }
        if entry.text.chars().any(char::is_whitespace) {
            return Err(WordListError::WordWhitespace {
                index,
                word: entry.text.clone(),
            });
        }
        let len = entry.clue.chars().count();
        if !(MIN_CLUE_LEN..=MAX_CLUE_LEN).contains(&len) {
            return Err(WordListError::ClueLength {
                index,
                word: entry.text.clone(),
                len,
            });
        }
        if !ids.insert(entry.id.as_str()) {
            return Err(WordListError::DuplicateId(entry.id.clone()));
        }
    }
    Ok(())
}

/// Shuffle in place. A seed makes the order reproducible.
pub fn shuffle_words(words: &mut [WordEntry], seed: Option<u64>) {
    match seed {
        Some(seed) => words.shuffle(&mut StdRng::seed_from_u64(seed)),
        None => words.shuffle(&mut rand::thread_rng()),
    }
}

/// Built-in list used when no file is given. Its crossings all agree, so the
/// puzzle it produces can be solved completely.
pub fn sample_word_list() -> WordList {
    let words = [
        ("planner", "Keeps your appointments in order"),
        ("lantern", "Portable light with a handle"),
        ("island", "Land surrounded by water"),
        ("metal", "Iron or copper, for example"),
        ("poems", "Verses by a poet"),
        ("tulip", "Spring flower from Holland"),
        ("laser", "Concentrated beam of light"),
    ];
    WordList {
        name: "Sampler".to_string(),
        words: words
            .iter()
            .enumerate()
            .map(|(i, (word, clue))| {
                WordEntry::new(format!("w{}", i + 1), *word, *clue, DEFAULT_LANGUAGE)
            })
            .collect(),
    }
}
