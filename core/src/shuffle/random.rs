use super::*;

/// Uniform placement strategy, deterministic for a given seed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RandomShuffler {
    seed: u64,
}

impl RandomShuffler {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl DeckShuffler for RandomShuffler {
    fn shuffle(self, deck: &Deck) -> BoardLayout {
        use rand::prelude::*;

        let mut placed = deck.cards().to_vec();
        let mut rng = SmallRng::seed_from_u64(self.seed);
        placed.shuffle(&mut rng);
        log::debug!("Placed {} cards with seed {}", placed.len(), self.seed);
        BoardLayout::new_unchecked(placed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shuffle_is_a_permutation_of_the_deck() {
        let deck = Deck::with_pair_count(6);

        let layout = RandomShuffler::new(0xDECAF).shuffle(&deck);

        let mut deck_ids: Vec<CardId> = deck.cards().iter().map(|c| c.id).collect();
        let mut placed_ids: Vec<CardId> = layout.iter_slots().map(|(_, c)| c.id).collect();
        deck_ids.sort_unstable();
        placed_ids.sort_unstable();
        assert_eq!(deck_ids, placed_ids);
        assert_eq!(layout.pair_count(), deck.pair_count());
    }

    #[test]
    fn same_seed_places_the_same_layout() {
        let deck = Deck::with_pair_count(6);

        let first = RandomShuffler::new(42).shuffle(&deck);
        let second = RandomShuffler::new(42).shuffle(&deck);

        assert_eq!(first, second);
    }

    #[test]
    fn different_seeds_place_different_layouts() {
        let deck = Deck::with_pair_count(6);

        let first = RandomShuffler::new(0xDECAF).shuffle(&deck);
        let second = RandomShuffler::new(0xC0FFEE).shuffle(&deck);

        assert_ne!(first, second);
    }

    #[test]
    fn shuffled_layout_still_validates() {
        let deck = Deck::with_pair_count(4);

        let layout = RandomShuffler::new(7).shuffle(&deck);

        let cards: Vec<CardDefinition> = layout.iter_slots().map(|(_, c)| c).collect();
        assert!(BoardLayout::from_placed(cards).is_ok());
    }
}
