use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::ops::Index;

pub use card::*;
pub use engine::*;
pub use error::*;
pub use records::*;
pub use shuffle::*;
pub use types::*;

mod card;
mod engine;
mod error;
mod records;
mod shuffle;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeckConfig {
    pub pairs: PairCount,
}

impl DeckConfig {
    /// Largest deck whose slots are still addressable by a `SlotIndex`.
    pub const MAX_PAIRS: PairCount = 128;

    pub const fn new_unchecked(pairs: PairCount) -> Self {
        Self { pairs }
    }

    pub fn new(pairs: PairCount) -> Self {
        Self::new_unchecked(pairs.clamp(1, Self::MAX_PAIRS))
    }

    /// The deck the game is classically played with, 6 pairs on a 12 card table.
    pub const fn classic() -> Self {
        Self { pairs: 6 }
    }

    pub const fn total_cards(&self) -> usize {
        slots_for_pairs(self.pairs)
    }
}

/// Identity of a single card: which card it is and what it matches with.
///
/// `value` is an opaque matching key; mapping it to a color or picture is the
/// presentation layer's business.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDefinition {
    pub id: CardId,
    pub value: PairId,
}

/// The full set of cards in canonical order, every value on exactly two cards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<CardDefinition>,
}

impl Deck {
    /// Builds the canonical deck for `pairs` pairs, well formed by construction.
    pub fn with_pair_count(pairs: PairCount) -> Self {
        let pairs = DeckConfig::new(pairs).pairs;
        let cards = (0..slots_for_pairs(pairs))
            .map(|i| CardDefinition {
                id: i as CardId,
                value: (i / 2) as PairId,
            })
            .collect();
        Self { cards }
    }

    /// Builds a deck from explicit cards, validating the pairing rules.
    pub fn from_cards(cards: Vec<CardDefinition>) -> Result<Self> {
        validate_pairing(&cards)?;
        Ok(Self { cards })
    }

    pub fn config(&self) -> DeckConfig {
        DeckConfig {
            pairs: self.pair_count(),
        }
    }

    pub fn pair_count(&self) -> PairCount {
        (self.cards.len() / 2) as PairCount
    }

    pub fn total_cards(&self) -> usize {
        self.cards.len()
    }

    pub fn cards(&self) -> &[CardDefinition] {
        &self.cards
    }
}

/// Checks the multiset rules shared by decks and layouts.
fn validate_pairing(cards: &[CardDefinition]) -> Result<()> {
    if cards.len() % 2 != 0 {
        return Err(GameError::OddDeckSize);
    }

    let mut copies: HashMap<PairId, usize> = HashMap::new();
    for card in cards {
        *copies.entry(card.value).or_insert(0) += 1;
    }
    if copies.values().any(|&count| count != 2) {
        return Err(GameError::UnpairedValue);
    }

    Ok(())
}

/// Shuffled placement of a deck, one card per board slot.
///
/// This is the immutable hidden truth a running game consults; it never
/// changes while the game is being played.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardLayout {
    placed: Vec<CardDefinition>,
}

impl BoardLayout {
    pub fn new_unchecked(placed: Vec<CardDefinition>) -> Self {
        Self { placed }
    }

    pub fn from_placed(placed: Vec<CardDefinition>) -> Result<Self> {
        validate_pairing(&placed)?;
        Ok(Self { placed })
    }

    pub fn config(&self) -> DeckConfig {
        DeckConfig {
            pairs: self.pair_count(),
        }
    }

    pub fn validate_slot(&self, slot: SlotIndex) -> Result<SlotIndex> {
        if (slot as usize) < self.placed.len() {
            Ok(slot)
        } else {
            Err(GameError::InvalidSlot)
        }
    }

    pub fn pair_count(&self) -> PairCount {
        (self.placed.len() / 2) as PairCount
    }

    pub fn total_cards(&self) -> usize {
        self.placed.len()
    }

    pub fn card_at(&self, slot: SlotIndex) -> CardDefinition {
        self.placed[slot as usize]
    }

    pub fn value_at(&self, slot: SlotIndex) -> PairId {
        self.card_at(slot).value
    }

    /// Whether two distinct slots hold cards of the same value.
    pub fn is_match(&self, first: SlotIndex, second: SlotIndex) -> bool {
        first != second && self.value_at(first) == self.value_at(second)
    }

    pub fn iter_slots(&self) -> impl Iterator<Item = (SlotIndex, CardDefinition)> + '_ {
        self.placed
            .iter()
            .enumerate()
            .map(|(slot, &card)| (slot as SlotIndex, card))
    }
}

impl Index<SlotIndex> for BoardLayout {
    type Output = CardDefinition;

    fn index(&self, slot: SlotIndex) -> &Self::Output {
        &self.placed[slot as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: CardId, value: PairId) -> CardDefinition {
        CardDefinition { id, value }
    }

    #[test]
    fn classic_config_is_six_pairs() {
        let config = DeckConfig::classic();

        assert_eq!(config.pairs, 6);
        assert_eq!(config.total_cards(), 12);
    }

    #[test]
    fn canonical_deck_holds_every_value_twice() {
        let deck = Deck::with_pair_count(6);

        assert_eq!(deck.total_cards(), 12);
        assert_eq!(deck.pair_count(), 6);
        for value in 0..6 {
            let copies = deck.cards().iter().filter(|c| c.value == value).count();
            assert_eq!(copies, 2);
        }
    }

    #[test]
    fn odd_card_count_is_rejected() {
        let cards = vec![card(0, 0), card(1, 0), card(2, 1)];

        assert_eq!(Deck::from_cards(cards), Err(GameError::OddDeckSize));
    }

    #[test]
    fn unpaired_value_is_rejected() {
        let cards = vec![card(0, 0), card(1, 0), card(2, 1), card(3, 2)];

        assert_eq!(Deck::from_cards(cards), Err(GameError::UnpairedValue));
    }

    #[test]
    fn layout_matches_by_value_not_by_slot() {
        let layout =
            BoardLayout::from_placed(vec![card(0, 0), card(2, 1), card(1, 0), card(3, 1)]).unwrap();

        assert!(layout.is_match(0, 2));
        assert!(layout.is_match(1, 3));
        assert!(!layout.is_match(0, 1));
        assert!(!layout.is_match(0, 0));
    }

    #[test]
    fn slots_outside_the_layout_are_invalid() {
        let layout = BoardLayout::from_placed(vec![card(0, 0), card(1, 0)]).unwrap();

        assert_eq!(layout.validate_slot(1), Ok(1));
        assert_eq!(layout.validate_slot(2), Err(GameError::InvalidSlot));
    }
}
