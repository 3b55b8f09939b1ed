//! Save blob encoding.
//!
//! A save is a JSON document tagged with a format name and version:
//!
//! ```json
//! {
//!   "format": "gridcraft-save",
//!   "version": 1,
//!   "seed": 0,
//!   "player": { "position": { "i": 0, "j": 0 }, "inventory": 2, "won": false },
//!   "cells": [ { "i": 0, "j": 0, "token": null } ]
//! }
//! ```
//!
//! Every recorded cell is written, including explicit empty markers
//! (`"token": null`), so a reload reproduces the store exactly and a
//! picked-up cell can never respawn. Decoding checks the header before the
//! body, so a blob from a future version is reported as such rather than as
//! malformed.

use gridcraft_types::{CellId, PlayerState, TokenValue};
use gridcraft_world::{SpawnRules, WorldError, WorldStore};
use serde::{Deserialize, Serialize};

/// Format tag written into every save.
pub const SAVE_FORMAT_TAG: &str = "gridcraft-save";

/// Current save format version.
pub const SAVE_FORMAT_VERSION: u32 = 1;

/// Errors raised while encoding or decoding a save blob.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The blob is empty.
    #[error("save blob is empty")]
    Empty,

    /// The blob is not valid JSON or does not match the schema.
    #[error("save blob is malformed: {source}")]
    Malformed {
        /// The underlying JSON error.
        source: serde_json::Error,
    },

    /// The blob is JSON but not a Gridcraft save.
    #[error("unexpected save format {found:?}")]
    WrongFormat {
        /// The format tag found in the blob.
        found: String,
    },

    /// The blob was written by an unsupported format version.
    #[error("unsupported save version {found} (supported: {supported})")]
    UnsupportedVersion {
        /// Version found in the blob.
        found: u32,
        /// Version this build reads.
        supported: u32,
    },

    /// A token value no sequence of spawns and crafts can produce.
    #[error("invalid token value {value} in {location}")]
    InvalidToken {
        /// `inventory`, or the canonical form of the offending cell.
        location: String,
        /// The value found.
        value: u64,
    },

    /// The recorded cells are inconsistent.
    #[error("inconsistent world data: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: WorldError,
    },

    /// Encoding failed.
    #[error("failed to encode save: {source}")]
    Encode {
        /// The underlying JSON error.
        source: serde_json::Error,
    },
}

#[derive(Deserialize)]
struct SaveHeader {
    format: String,
    version: u32,
}

#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct SaveBlob {
    format: String,
    version: u32,
    seed: u64,
    player: PlayerState,
    cells: Vec<CellRecord>,
}

#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct CellRecord {
    i: i32,
    j: i32,
    token: Option<TokenValue>,
}

/// Encode the player and every recorded cell.
pub fn serialize(player: &PlayerState, world: &WorldStore) -> Result<String, CodecError> {
    let blob = SaveBlob {
        format: SAVE_FORMAT_TAG.to_owned(),
        version: SAVE_FORMAT_VERSION,
        seed: world.seed(),
        player: *player,
        cells: world
            .records()
            .map(|(cell, token)| CellRecord {
                i: cell.i,
                j: cell.j,
                token,
            })
            .collect(),
    };
    serde_json::to_string(&blob).map_err(|source| CodecError::Encode { source })
}

/// Decode a save blob.
///
/// The seed comes from the blob; `rules` decide how cells the save never
/// recorded are derived.
pub fn deserialize(blob: &str, rules: SpawnRules) -> Result<(PlayerState, WorldStore), CodecError> {
    if blob.trim().is_empty() {
        return Err(CodecError::Empty);
    }

    let header: SaveHeader =
        serde_json::from_str(blob).map_err(|source| CodecError::Malformed { source })?;
    if header.format != SAVE_FORMAT_TAG {
        return Err(CodecError::WrongFormat {
            found: header.format,
        });
    }
    if header.version != SAVE_FORMAT_VERSION {
        return Err(CodecError::UnsupportedVersion {
            found: header.version,
            supported: SAVE_FORMAT_VERSION,
        });
    }

    let save: SaveBlob =
        serde_json::from_str(blob).map_err(|source| CodecError::Malformed { source })?;
    if let Some(token) = save.player.inventory {
        check_token(token, || "inventory".to_owned())?;
    }
    for record in &save.cells {
        if let Some(token) = record.token {
            check_token(token, || CellId::new(record.i, record.j).canonical())?;
        }
    }

    let records = save
        .cells
        .into_iter()
        .map(|record| (CellId::new(record.i, record.j), record.token));
    let world = WorldStore::from_records(save.seed, rules, records)?;

    Ok((save.player, world))
}

/// Tokens start at a positive base value and only double, so zero never
/// appears in a genuine save.
fn check_token(token: TokenValue, location: impl FnOnce() -> String) -> Result<(), CodecError> {
    if token.get() == 0 {
        return Err(CodecError::InvalidToken {
            location: location(),
            value: token.get(),
        });
    }
    Ok(())
}
