use serde::{Deserialize, Serialize};

/// Player-visible state of a single board slot.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardFace {
    /// Face down, available for a pick.
    Down,
    /// Face up as part of the current selection.
    Up,
    /// Face up for good, its pair has been found.
    Matched,
}

impl CardFace {
    pub const fn is_face_up(self) -> bool {
        matches!(self, Self::Up | Self::Matched)
    }

    pub const fn is_matched(self) -> bool {
        matches!(self, Self::Matched)
    }
}

impl Default for CardFace {
    fn default() -> Self {
        Self::Down
    }
}
