use crate::Slot;
use serde::{Deserialize, Serialize};
use std::fmt;

const SMALL: [Slot; 7] = [
    Slot::across(0, 0, 5),
    Slot::across(2, 0, 6),
    Slot::across(4, 2, 5),
    Slot::across(6, 0, 7),
    Slot::down(0, 2, 5),
    Slot::down(0, 4, 7),
    Slot::down(2, 6, 5),
];

const MEDIUM: [Slot; 10] = [
    Slot::across(0, 0, 8),
    Slot::across(2, 2, 7),
    Slot::across(4, 0, 9),
    Slot::across(6, 1, 8),
    Slot::across(8, 2, 6),
    Slot::down(0, 2, 6),
    Slot::down(0, 5, 7),
    Slot::down(0, 7, 8),
    Slot::down(2, 3, 7),
    Slot::down(2, 8, 6),
];

const LARGE: [Slot; 12] = [
    Slot::across(0, 0, 10),
    Slot::across(2, 1, 9),
    Slot::across(4, 0, 11),
    Slot::across(6, 2, 9),
    Slot::across(8, 0, 10),
    Slot::across(10, 1, 8),
    Slot::down(0, 2, 7),
    Slot::down(0, 5, 9),
    Slot::down(0, 8, 10),
    Slot::down(2, 3, 8),
    Slot::down(2, 10, 8),
    Slot::down(4, 6, 7),
];

/// Size tier of a grid template
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateTier {
    Small,
    Medium,
    Large,
}

impl TemplateTier {
    /// All tiers, smallest first
    pub fn all() -> &'static [TemplateTier] {
        &[TemplateTier::Small, TemplateTier::Medium, TemplateTier::Large]
    }

    /// Largest word count this tier is meant for
    pub fn capacity(self) -> usize {
        match self {
            TemplateTier::Small => 8,
            TemplateTier::Medium => 12,
            TemplateTier::Large => 15,
        }
    }

    /// The slot set, in template order
    pub fn slots(self) -> &'static [Slot] {
        match self {
            TemplateTier::Small => &SMALL,
            TemplateTier::Medium => &MEDIUM,
            TemplateTier::Large => &LARGE,
        }
    }

    /// Smallest tier whose capacity covers `word_count`, else the largest
    pub fn for_word_count(word_count: usize) -> Self {
        Self::all()
            .iter()
            .copied()
            .find(|tier| word_count <= tier.capacity())
            .unwrap_or(TemplateTier::Large)
    }
}

impl fmt::Display for TemplateTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateTier::Small => write!(f, "Small"),
            TemplateTier::Medium => write!(f, "Medium"),
            TemplateTier::Large => write!(f, "Large"),
        }
    }
}

/// Pick the template for a request of `word_count` words
pub fn select_template(word_count: usize) -> (TemplateTier, &'static [Slot]) {
    let tier = TemplateTier::for_word_count(word_count);
    (tier, tier.slots())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_thresholds() {
        assert_eq!(TemplateTier::for_word_count(0), TemplateTier::Small);
        assert_eq!(TemplateTier::for_word_count(5), TemplateTier::Small);
        assert_eq!(TemplateTier::for_word_count(8), TemplateTier::Small);
        assert_eq!(TemplateTier::for_word_count(9), TemplateTier::Medium);
        assert_eq!(TemplateTier::for_word_count(12), TemplateTier::Medium);
        assert_eq!(TemplateTier::for_word_count(13), TemplateTier::Large);
        assert_eq!(TemplateTier::for_word_count(40), TemplateTier::Large);
    }

    #[test]
    fn test_select_template_returns_tier_slots() {
        let (tier, slots) = select_template(10);
        assert_eq!(tier, TemplateTier::Medium);
        assert_eq!(slots.len(), 10);
    }

    #[test]
    fn test_templates_have_unique_slots() {
        for tier in TemplateTier::all() {
            let slots = tier.slots();
            for (i, a) in slots.iter().enumerate() {
                for b in &slots[i + 1..] {
                    assert!(
                        a.start() != b.start() || a.direction != b.direction,
                        "duplicate slot in {} template",
                        tier
                    );
                }
            }
        }
    }
}
