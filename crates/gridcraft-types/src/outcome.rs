//! Results handed across the render and interaction boundaries.
//!
//! Every click resolves to an [`InteractionOutcome`]. Rejections are ordinary
//! values so headless callers can assert on them without error plumbing.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cell::CellId;
use crate::token::TokenValue;

/// The result of clicking a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum InteractionOutcome {
    /// The cell's token moved into the empty inventory.
    PickedUp {
        /// The cell that was emptied.
        cell: CellId,
        /// The value now held by the player.
        value: TokenValue,
    },
    /// The held token was placed into an empty cell.
    Placed {
        /// The cell that received the token.
        cell: CellId,
        /// The placed value.
        value: TokenValue,
    },
    /// The held token merged with an equal token in the cell.
    Crafted {
        /// The cell holding the merged token.
        cell: CellId,
        /// The doubled value now in the cell.
        value: TokenValue,
        /// Whether this craft reached the win threshold.
        won: bool,
    },
    /// Nothing changed.
    Rejected(RejectionReason),
}

impl InteractionOutcome {
    /// Whether the interaction changed any state.
    pub const fn is_success(&self) -> bool {
        !matches!(self, Self::Rejected(_))
    }

    /// The rejection reason, if the interaction was rejected.
    pub const fn rejection(&self) -> Option<RejectionReason> {
        match self {
            Self::Rejected(reason) => Some(*reason),
            Self::PickedUp { .. } | Self::Placed { .. } | Self::Crafted { .. } => None,
        }
    }
}

/// Why an interaction was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum RejectionReason {
    /// The target is beyond the interaction radius.
    TooFar {
        /// Chebyshev distance from the player to the target.
        distance: u32,
        /// The configured interaction radius.
        radius: u32,
    },
    /// The inventory is empty and so is the target cell.
    NothingToPickUp,
    /// The held token and the cell token differ.
    ValueMismatch {
        /// Value in the inventory.
        held: TokenValue,
        /// Value in the cell.
        found: TokenValue,
    },
    /// Doubling the token would overflow.
    ValueOverflow,
    /// The game has been won; the board is frozen.
    GameWon,
}

/// One visible cell as handed to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct RenderCell {
    /// The cell coordinate.
    pub cell: CellId,
    /// The token in the cell, or `None` when empty.
    pub token: Option<TokenValue>,
}
