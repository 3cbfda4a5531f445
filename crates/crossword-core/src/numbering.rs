use crate::matcher::SlotMatching;
use crate::{PlacedWord, Position, Slot};
use std::collections::HashMap;

/// Number the matched slots in reading order and bind their words.
///
/// Slots sharing a start cell share a number. The returned order is the
/// numbering order, with template order breaking ties.
pub fn number_clues(slots: &[Slot], matching: &SlotMatching<'_>) -> Vec<PlacedWord> {
    let mut indices: Vec<usize> = matching
        .keys()
        .copied()
        .filter(|&idx| idx < slots.len())
        .collect();
    indices.sort_by_key(|&idx| slots[idx].start());

    let mut numbers: HashMap<Position, u32> = HashMap::new();
    let mut next_number = 1;

    indices
        .into_iter()
        .map(|idx| {
            let slot = &slots[idx];
            let word = matching[&idx];
            let clue_number = *numbers.entry(slot.start()).or_insert_with(|| {
                let n = next_number;
                next_number += 1;
                n
            });

            PlacedWord {
                id: word.id.clone(),
                text: word.grid_text(),
                clue: word.clue.clone(),
                direction: slot.direction,
                start_row: slot.start_row,
                start_col: slot.start_col,
                clue_number,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Direction, WordEntry};

    #[test]
    fn test_shared_start_shares_number() {
        let words = [
            WordEntry::new("a", "cat", "feline", "en"),
            WordEntry::new("b", "cow", "moo", "en"),
            WordEntry::new("c", "ant", "insect", "en"),
        ];
        let slots = [
            Slot::across(2, 0, 3),
            Slot::across(0, 0, 3),
            Slot::down(0, 0, 3),
        ];
        let mut matching = SlotMatching::new();
        matching.insert(0, &words[0]);
        matching.insert(1, &words[1]);
        matching.insert(2, &words[2]);

        let placed = number_clues(&slots, &matching);
        assert_eq!(placed.len(), 3);

        assert_eq!(placed[0].text, "COW");
        assert_eq!(placed[0].direction, Direction::Across);
        assert_eq!(placed[0].clue_number, 1);

        assert_eq!(placed[1].text, "ANT");
        assert_eq!(placed[1].direction, Direction::Down);
        assert_eq!(placed[1].clue_number, 1);

        assert_eq!(placed[2].text, "CAT");
        assert_eq!(placed[2].clue_number, 2);
    }

    #[test]
    fn test_numbers_are_row_major() {
        let words = [
            WordEntry::new("a", "abc", "", "en"),
            WordEntry::new("b", "abc", "", "en"),
        ];
        let slots = [Slot::down(0, 4, 3), Slot::across(0, 1, 3)];
        let mut matching = SlotMatching::new();
        matching.insert(0, &words[0]);
        matching.insert(1, &words[1]);

        let placed = number_clues(&slots, &matching);
        assert_eq!(placed[0].start(), Position::new(0, 1));
        assert_eq!(placed[0].clue_number, 1);
        assert_eq!(placed[1].start(), Position::new(0, 4));
        assert_eq!(placed[1].clue_number, 2);
    }
}
