//! Player state: position, single-slot inventory, and the win flag.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cell::CellId;
use crate::token::TokenValue;

/// Everything the game knows about the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PlayerState {
    /// The cell the player is standing on.
    pub position: CellId,
    /// The token carried by the player, if any. Holds at most one token.
    pub inventory: Option<TokenValue>,
    /// Set once a craft reaches the win threshold. Never cleared.
    pub won: bool,
}

impl PlayerState {
    /// A fresh player at `position` with an empty inventory.
    pub const fn new(position: CellId) -> Self {
        Self {
            position,
            inventory: None,
            won: false,
        }
    }

    /// Mark the game as won. Has no effect if already won.
    pub const fn mark_won(&mut self) {
        self.won = true;
    }
}
