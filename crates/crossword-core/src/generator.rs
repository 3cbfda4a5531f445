use crate::grid::{assemble_grid, PuzzleLayout};
use crate::matcher::match_words_to_slots;
use crate::numbering::number_clues;
use crate::{GenerateError, TemplateTier, WordEntry};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Minimum words needed to attempt generation
pub const MIN_WORDS: usize = 5;
/// Minimum slots that must be filled for a puzzle to be accepted
pub const MIN_MATCHED: usize = 5;
/// How many letters shorter than its slot a word may be
pub const LENGTH_TOLERANCE: usize = 2;
/// Hints available per solving session
pub const MAX_HINTS: u32 = 3;

/// Configuration for generation and solving
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Reject word lists shorter than this
    pub min_words: usize,
    /// Reject layouts with fewer filled slots than this
    pub min_matched: usize,
    /// Near-fit tolerance for slot matching
    pub length_tolerance: usize,
    /// Hint budget per session
    pub max_hints: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_words: MIN_WORDS,
            min_matched: MIN_MATCHED,
            length_tolerance: LENGTH_TOLERANCE,
            max_hints: MAX_HINTS,
        }
    }
}

impl EngineConfig {
    /// Only exact-length matches
    pub fn strict() -> Self {
        Self {
            length_tolerance: 0,
            ..Self::default()
        }
    }

    /// Default rules with a different hint budget
    pub fn with_max_hints(max_hints: u32) -> Self {
        Self {
            max_hints,
            ..Self::default()
        }
    }
}

/// Turns word lists into puzzle layouts
#[derive(Debug, Clone, Default)]
pub struct PuzzleEngine {
    pub config: EngineConfig,
}

impl PuzzleEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Generate a layout, choosing the template from the word count
    pub fn generate(&self, words: &[WordEntry]) -> Result<PuzzleLayout, GenerateError> {
        self.check_word_count(words)?;
        self.generate_with_template(words, TemplateTier::for_word_count(words.len()))
    }

    /// Generate a layout on a specific template
    pub fn generate_with_template(
        &self,
        words: &[WordEntry],
        tier: TemplateTier,
    ) -> Result<PuzzleLayout, GenerateError> {
        self.check_word_count(words)?;

        let slots = tier.slots();
        debug!(
            "generating from {} words on {} template ({} slots)",
            words.len(),
            tier,
            slots.len()
        );

        let matching = match_words_to_slots(words, slots, self.config.length_tolerance);
        if matching.len() < self.config.min_matched {
            debug!(
                "only {} slots matched, need {}",
                matching.len(),
                self.config.min_matched
            );
            return Err(GenerateError::UnderMatched {
                matched: matching.len(),
                required: self.config.min_matched,
                tier,
            });
        }

        let mask = assemble_grid(slots, &matching);
        let placed = number_clues(slots, &matching);
        let layout = PuzzleLayout::new(mask, placed);

        for conflict in layout.conflicts() {
            warn!("crossing letters disagree at {}", conflict);
        }

        let dims = layout.dimensions();
        debug!(
            "placed {} words on a {}x{} grid",
            layout.word_count(),
            dims.rows,
            dims.cols
        );
        Ok(layout)
    }

    fn check_word_count(&self, words: &[WordEntry]) -> Result<(), GenerateError> {
        if words.len() < self.config.min_words {
            return Err(GenerateError::InsufficientWords {
                found: words.len(),
                required: self.config.min_words,
            });
        }
        Ok(())
    }
}

/// Generate a crossword with the default rules
pub fn generate_crossword(words: &[WordEntry]) -> Result<PuzzleLayout, GenerateError> {
    PuzzleEngine::default().generate(words)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Dimensions, Direction, Position};

    fn animals() -> Vec<WordEntry> {
        vec![
            WordEntry::new("1", "cat", "feline", "en"),
            WordEntry::new("2", "dog", "canine", "en"),
            WordEntry::new("3", "bird", "flies", "en"),
            WordEntry::new("4", "fish", "swims", "en"),
            WordEntry::new("5", "lion", "roars", "en"),
        ]
    }

    #[test]
    fn test_too_few_words() {
        let words = &animals()[..4];
        assert_eq!(
            generate_crossword(words),
            Err(GenerateError::InsufficientWords {
                found: 4,
                required: 5
            })
        );
        assert!(generate_crossword(&[]).is_err());
    }

    #[test]
    fn test_generate_small() {
        let layout = generate_crossword(&animals()).unwrap();
        assert_eq!(layout.word_count(), 5);
        assert_eq!(layout.dimensions(), Dimensions { rows: 5, cols: 7 });

        let summary: Vec<(&str, u32, Direction)> = layout
            .words()
            .iter()
            .map(|w| (w.text.as_str(), w.clue_number, w.direction))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("FISH", 1, Direction::Across),
                ("CAT", 2, Direction::Down),
                ("BIRD", 3, Direction::Across),
                ("DOG", 4, Direction::Down),
                ("LION", 5, Direction::Across),
            ]
        );
        assert_eq!(layout.words()[0].clue, "swims");
    }

    #[test]
    fn test_under_matched() {
        // Nothing fits a slot of 5 or more
        let words: Vec<WordEntry> = ["a", "b", "c", "d", "e", "f"]
            .iter()
            .map(|t| WordEntry::new(*t, *t, "", "en"))
            .collect();
        let err = generate_crossword(&words).unwrap_err();
        assert_eq!(
            err,
            GenerateError::UnderMatched {
                matched: 0,
                required: 5,
                tier: TemplateTier::Small
            }
        );
        assert!(err.is_retryable());
    }

    #[test]
    fn test_strict_config_rejects_near_fits() {
        let engine = PuzzleEngine::new(EngineConfig::strict());
        assert!(matches!(
            engine.generate(&animals()),
            Err(GenerateError::UnderMatched { matched: 0, .. })
        ));
    }

    #[test]
    fn test_generation_is_deterministic() {
        let a = generate_crossword(&animals()).unwrap();
        let b = generate_crossword(&animals()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_forced_template() {
        let engine = PuzzleEngine::default();
        let words: Vec<WordEntry> = ["elephant", "giraffes", "kangaroo", "antelope", "penguin"]
            .iter()
            .enumerate()
            .map(|(i, t)| WordEntry::new(i.to_string(), *t, "", "en"))
            .collect();
        assert!(engine.generate(&words).is_err());

        let layout = engine
            .generate_with_template(&words, TemplateTier::Medium)
            .unwrap();
        assert_eq!(layout.word_count(), 5);
        assert!(layout.is_active(Position::new(0, 0)));
    }

    #[test]
    fn test_animal_layout_reports_conflicts() {
        let layout = generate_crossword(&animals()).unwrap();
        let conflicts = layout.conflicts();
        // FISH and CAT cross at (0,2): 'S' vs 'C'
        assert!(conflicts
            .iter()
            .any(|c| c.pos == Position::new(0, 2)));
    }

    #[test]
    fn test_words_follow_clue_order() {
        let layout = generate_crossword(&animals()).unwrap();
        let starts: Vec<Position> = layout.words().iter().map(|w| w.start()).collect();
        let mut sorted = starts.clone();
        sorted.sort();
        assert_eq!(starts, sorted);

        let numbers: Vec<u32> = layout.words().iter().map(|w| w.clue_number).collect();
        assert!(numbers.windows(2).all(|pair| pair[0] <= pair[1]));
    }
}
