//! Token values held by cells and by the player's inventory slot.

use core::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// The integer value of a token.
///
/// Tokens start at [`TokenValue::BASE`] and only ever grow by doubling when
/// two equal tokens are crafted together.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export, export_to = "bindings/")]
pub struct TokenValue(pub u64);

impl TokenValue {
    /// Value of a freshly spawned token.
    pub const BASE: Self = Self(1);

    /// Return the inner value.
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Value produced by crafting two tokens of this value.
    ///
    /// Returns `None` on overflow.
    pub const fn doubled(self) -> Option<Self> {
        match self.0.checked_mul(2) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }
}

impl fmt::Display for TokenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TokenValue {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doubling_is_checked() {
        assert_eq!(TokenValue(8).doubled(), Some(TokenValue(16)));
        assert_eq!(TokenValue(u64::MAX).doubled(), None);
    }

    #[test]
    fn serializes_as_bare_number() {
        let json = serde_json::to_string(&TokenValue(4)).ok();
        assert_eq!(json.as_deref(), Some("4"));
    }

    #[test]
    fn deserializes_from_bare_number() {
        let value: Option<TokenValue> = serde_json::from_str("16").ok();
        assert_eq!(value, Some(TokenValue(16)));
    }
}
