use crate::{Slot, WordEntry};
use log::debug;
use std::collections::BTreeMap;

/// Words assigned to slots, keyed by the slot's index in its template
pub type SlotMatching<'w> = BTreeMap<usize, &'w WordEntry>;

/// Greedily assign words to slots by length.
///
/// Longest slots are served first. Each slot takes the first unused word of
/// exactly its length, falling back to the first unused word that is shorter
/// by at most `tolerance` letters. Crossing letters are not checked.
pub fn match_words_to_slots<'w>(
    words: &'w [WordEntry],
    slots: &[Slot],
    tolerance: usize,
) -> SlotMatching<'w> {
    let mut sorted_words: Vec<(usize, &WordEntry)> =
        words.iter().map(|w| (w.letter_count(), w)).collect();
    sorted_words.sort_by(|a, b| b.0.cmp(&a.0));

    let mut slot_order: Vec<usize> = (0..slots.len()).collect();
    slot_order.sort_by(|&a, &b| slots[b].length.cmp(&slots[a].length));

    let mut used = vec![false; sorted_words.len()];
    let mut matching = SlotMatching::new();

    for slot_index in slot_order {
        let length = slots[slot_index].length;

        let exact = sorted_words
            .iter()
            .enumerate()
            .position(|(j, (len, _))| !used[j] && *len == length);

        let chosen = exact.or_else(|| {
            sorted_words.iter().enumerate().position(|(j, (len, _))| {
                !used[j] && *len <= length && length - *len <= tolerance
            })
        });

        match chosen {
            Some(j) => {
                used[j] = true;
                let word = sorted_words[j].1;
                debug!(
                    "slot {} (len {}) <- {:?} (len {})",
                    slot_index, length, word.text, sorted_words[j].0
                );
                matching.insert(slot_index, word);
            }
            None => debug!("slot {} (len {}) left empty", slot_index, length),
        }
    }

    matching
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(texts: &[&str]) -> Vec<WordEntry> {
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| WordEntry::new(format!("w{}", i), *t, "clue", "en"))
            .collect()
    }

    #[test]
    fn test_exact_match_preferred() {
        let words = entries(&["ABC", "ABCDE"]);
        let slots = [Slot::across(0, 0, 5), Slot::down(0, 0, 3)];
        let matching = match_words_to_slots(&words, &slots, 2);
        assert_eq!(matching[&0].text, "ABCDE");
        assert_eq!(matching[&1].text, "ABC");
    }

    #[test]
    fn test_near_fit_only_shorter_words() {
        // A longer word never fits a shorter slot even within tolerance
        let words = entries(&["ABCDEF"]);
        let slots = [Slot::across(0, 0, 5)];
        assert!(match_words_to_slots(&words, &slots, 2).is_empty());

        let words = entries(&["ABC"]);
        let matching = match_words_to_slots(&words, &slots, 2);
        assert_eq!(matching[&0].text, "ABC");
    }

    #[test]
    fn test_tolerance_limit() {
        let words = entries(&["AB"]);
        let slots = [Slot::across(0, 0, 5)];
        assert!(match_words_to_slots(&words, &slots, 2).is_empty());
        assert_eq!(match_words_to_slots(&words, &slots, 3).len(), 1);
    }

    #[test]
    fn test_keyed_by_template_index() {
        // The short slot comes first in template order but is served last
        let words = entries(&["ABC", "ABCDEFG"]);
        let slots = [Slot::across(0, 0, 3), Slot::down(0, 0, 7)];
        let matching = match_words_to_slots(&words, &slots, 2);
        assert_eq!(matching[&0].text, "ABC");
        assert_eq!(matching[&1].text, "ABCDEFG");
    }

    #[test]
    fn test_each_word_used_once() {
        let words = entries(&["ABCDE"]);
        let slots = [Slot::across(0, 0, 5), Slot::down(0, 0, 5)];
        let matching = match_words_to_slots(&words, &slots, 2);
        assert_eq!(matching.len(), 1);
        assert!(matching.contains_key(&0));
    }

    #[test]
    fn test_ties_keep_input_order() {
        let words = entries(&["FIRST", "SECND"]);
        let slots = [Slot::across(0, 0, 5)];
        let matching = match_words_to_slots(&words, &slots, 2);
        assert_eq!(matching[&0].text, "FIRST");
    }
}
