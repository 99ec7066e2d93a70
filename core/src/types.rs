/// Index of a board slot, counted left to right, top to bottom.
pub type SlotIndex = u8;

/// Identifier unique to a single card within a deck.
pub type CardId = u8;

/// Matching key shared by exactly two cards of a deck.
pub type PairId = u8;

/// Count type used for pair counts and matched-pair totals.
pub type PairCount = u8;

/// Whole seconds elapsed since the game started.
pub type Seconds = u32;

/// Number of board slots needed to place `pairs` pairs of cards.
pub const fn slots_for_pairs(pairs: PairCount) -> usize {
    (pairs as usize) * 2
}
