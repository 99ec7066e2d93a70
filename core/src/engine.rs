use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::*;

/// Milliseconds a mismatched pair stays face up before it flips back down.
///
/// The embedder owns the actual timer: `flip` hands out a [`FlipBackToken`]
/// and expects [`Game::flip_back`] once this delay has passed.
pub const FLIP_BACK_DELAY_MS: u32 = 800;

/// Valid transitions:
/// - InProgress -> Won
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameState {
    /// Game is running and accepts picks
    InProgress,
    /// Game ended, every pair was found
    Won,
}

impl GameState {
    pub const fn is_won(self) -> bool {
        matches!(self, Self::Won)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::InProgress
    }
}

/// The picks currently face up, in pick order.
///
/// `Two` exists only while a mismatch waits for its flip-back and doubles as
/// the board lock; a third unmatched face-up card is unrepresentable.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    Empty,
    One(SlotIndex),
    Two(SlotIndex, SlotIndex),
}

impl Selection {
    pub const fn is_locked(self) -> bool {
        matches!(self, Self::Two(_, _))
    }

    pub const fn in_progress(self) -> bool {
        matches!(self, Self::One(_))
    }

    pub const fn contains(self, slot: SlotIndex) -> bool {
        match self {
            Self::Empty => false,
            Self::One(first) => first == slot,
            Self::Two(first, second) => first == slot || second == slot,
        }
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::Empty
    }
}

/// Receipt for a pending flip-back, handed out by [`Game::flip`] on a mismatch.
///
/// Carries the mismatched slots and the mismatch epoch, so a callback that
/// outlives its mismatch (or its game) is recognized and ignored.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FlipBackToken {
    first: SlotIndex,
    second: SlotIndex,
    epoch: u32,
}

/// Outcome of picking a slot
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FlipOutcome {
    NoChange,
    /// First pick of a pair turned up
    FirstUp,
    /// Second pick matched the first
    Matched,
    /// Second pick matched and it completed the last pair
    Won,
    /// Second pick did not match, the flip back is due after the delay
    Mismatch(FlipBackToken),
}

impl FlipOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(self) -> bool {
        use FlipOutcome::*;
        match self {
            NoChange => false,
            FirstUp => true,
            Matched => true,
            Won => true,
            Mismatch(_) => true,
        }
    }
}

/// Outcome of a flip-back callback
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FlipBackOutcome {
    NoChange,
    /// The pending pair went face down and the board unlocked
    FlippedBack,
}

impl FlipBackOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::FlippedBack => true,
        }
    }
}

/// Represents a single round from the deal to the win.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Game {
    layout: BoardLayout,
    faces: Vec<CardFace>,
    selection: Selection,
    matched_pairs: PairCount,
    epoch: u32,
    state: GameState,
    started_at: DateTime<Utc>,
    ended_at: Option<DateTime<Utc>>,
}

impl Game {
    /// Deals a fresh game on the given placement; the clock starts at `now`.
    pub fn new(layout: BoardLayout, now: DateTime<Utc>) -> Self {
        let total = layout.total_cards();
        Self {
            layout,
            faces: vec![CardFace::Down; total],
            selection: Selection::Empty,
            matched_pairs: 0,
            epoch: 0,
            state: Default::default(),
            started_at: now,
            ended_at: None,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_won(&self) -> bool {
        self.state.is_won()
    }

    pub fn is_locked(&self) -> bool {
        self.selection.is_locked()
    }

    pub fn selection_in_progress(&self) -> bool {
        self.selection.in_progress()
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn layout(&self) -> &BoardLayout {
        &self.layout
    }

    pub fn pair_count(&self) -> PairCount {
        self.layout.pair_count()
    }

    pub fn total_cards(&self) -> usize {
        self.layout.total_cards()
    }

    pub fn matched_pairs(&self) -> PairCount {
        self.matched_pairs
    }

    pub fn pairs_left(&self) -> PairCount {
        self.layout.pair_count() - self.matched_pairs
    }

    pub fn face_at(&self, slot: SlotIndex) -> CardFace {
        self.faces[slot as usize]
    }

    pub fn card_at(&self, slot: SlotIndex) -> CardDefinition {
        self.layout.card_at(slot)
    }

    /// Whether picking `slot` right now could turn a card up.
    pub fn can_flip(&self, slot: SlotIndex) -> bool {
        if self.state.is_won() || self.selection.is_locked() {
            return false;
        }
        if self.layout.validate_slot(slot).is_err() {
            return false;
        }
        matches!(self.face_at(slot), CardFace::Down)
    }

    /// How many seconds have passed since the deal, frozen once the game is won
    pub fn elapsed_secs(&self, now: DateTime<Utc>) -> Seconds {
        (self.ended_at.unwrap_or(now) - self.started_at)
            .num_seconds()
            .max(0) as Seconds
    }

    /// Picks a slot, turning its card face up.
    ///
    /// The second pick of a pair resolves the selection: equal values are
    /// confirmed on the spot, differing values lock the board until the
    /// returned token is handed back through [`Game::flip_back`].
    pub fn flip(&mut self, slot: SlotIndex, now: DateTime<Utc>) -> Result<FlipOutcome> {
        use FlipOutcome::*;

        let slot = self.layout.validate_slot(slot)?;
        self.check_not_finished()?;

        Ok(match self.selection {
            // a pending mismatch locks every slot until the flip back runs
            Selection::Two(_, _) => NoChange,
            // matched cards and the held first pick are already face up
            _ if self.face_at(slot).is_face_up() => NoChange,
            Selection::Empty => {
                self.faces[slot as usize] = CardFace::Up;
                self.selection = Selection::One(slot);
                log::debug!("First pick at slot {slot}");
                FirstUp
            }
            Selection::One(first) => {
                self.faces[slot as usize] = CardFace::Up;
                if self.layout.is_match(first, slot) {
                    self.confirm_match(first, slot, now)
                } else {
                    self.reject_selection(first, slot)
                }
            }
        })
    }

    /// Turns a mismatched pair back down once its delay has passed.
    ///
    /// Stale tokens, including a second delivery of the same one, change
    /// nothing.
    pub fn flip_back(&mut self, token: FlipBackToken) -> FlipBackOutcome {
        use FlipBackOutcome::*;

        if token.epoch != self.epoch {
            return NoChange;
        }
        let Selection::Two(first, second) = self.selection else {
            return NoChange;
        };
        if (first, second) != (token.first, token.second) {
            return NoChange;
        }

        self.faces[first as usize] = CardFace::Down;
        self.faces[second as usize] = CardFace::Down;
        self.selection = Selection::Empty;
        log::debug!("Flipped back slots {first} and {second}");
        FlippedBack
    }

    fn confirm_match(
        &mut self,
        first: SlotIndex,
        second: SlotIndex,
        now: DateTime<Utc>,
    ) -> FlipOutcome {
        self.faces[first as usize] = CardFace::Matched;
        self.faces[second as usize] = CardFace::Matched;
        // picks reset before the match is counted
        self.selection = Selection::Empty;
        self.matched_pairs += 1;
        log::debug!(
            "Matched slots {first} and {second}, {} pairs left",
            self.pairs_left()
        );

        if self.matched_pairs == self.layout.pair_count() {
            self.state = GameState::Won;
            self.ended_at = Some(now);
            FlipOutcome::Won
        } else {
            FlipOutcome::Matched
        }
    }

    fn reject_selection(&mut self, first: SlotIndex, second: SlotIndex) -> FlipOutcome {
        self.epoch += 1;
        self.selection = Selection::Two(first, second);
        log::debug!("Mismatch at slots {first} and {second}, flip back pending");
        FlipOutcome::Mismatch(FlipBackToken {
            first,
            second,
            epoch: self.epoch,
        })
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.state.is_won() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}
