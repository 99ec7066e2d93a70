use crate::*;
pub use random::*;

mod random;

/// Turns the canonical deck order into the placement a game is played on.
pub trait DeckShuffler {
    fn shuffle(self, deck: &Deck) -> BoardLayout;
}
