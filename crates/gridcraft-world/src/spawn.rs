//! Deterministic spawn function.
//!
//! Decides whether an untouched cell starts with a token. The decision is a
//! pure function of `(world_seed, cell)`: the same pair always yields the
//! same answer, across runs and across machines.
//!
//! # Determinism
//!
//! The cell's canonical string form (`"i:j"`) is hashed with 64-bit FNV-1a,
//! combined with the world seed through an `xorshift64` step, then passed
//! through the `splitmix64` finalizer so that neighbouring cells land far
//! apart. The top 32 bits become the chance in `[0, 1)`. Nothing here
//! depends on wall-clock time, process state, or the platform hasher.

use gridcraft_types::{CellId, TokenValue};

use crate::error::WorldError;

/// Default probability that an untouched cell spawns a token.
pub const DEFAULT_SPAWN_PROBABILITY: f64 = 0.2;

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// 2^32, the divisor mapping a `u32` into `[0, 1)`.
const U32_RANGE: f64 = 4_294_967_296.0;

/// Rules for deriving the initial content of an untouched cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnRules {
    probability: f64,
    base_value: TokenValue,
}

impl SpawnRules {
    /// Create spawn rules.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidSpawnProbability`] if `probability` is
    /// not within `[0, 1]`.
    pub fn new(probability: f64, base_value: TokenValue) -> Result<Self, WorldError> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(WorldError::InvalidSpawnProbability(probability));
        }
        Ok(Self {
            probability,
            base_value,
        })
    }

    /// Probability that an untouched cell holds a token.
    pub const fn probability(&self) -> f64 {
        self.probability
    }

    /// Value of a spawned token.
    pub const fn base_value(&self) -> TokenValue {
        self.base_value
    }

    /// The token an untouched cell starts with, if any.
    pub fn spawned_token(&self, world_seed: u64, cell: CellId) -> Option<TokenValue> {
        (spawn_chance(world_seed, cell) < self.probability).then_some(self.base_value)
    }
}

impl Default for SpawnRules {
    fn default() -> Self {
        Self {
            probability: DEFAULT_SPAWN_PROBABILITY,
            base_value: TokenValue::BASE,
        }
    }
}

/// Stable pseudo-random value in `[0, 1)` for a cell.
pub fn spawn_chance(world_seed: u64, cell: CellId) -> f64 {
    let hash = mix(world_seed, fnv1a(cell.canonical().as_bytes()));
    let high = u32::try_from(hash >> 32).unwrap_or(u32::MAX);
    f64::from(high) / U32_RANGE
}

/// 64-bit FNV-1a over a byte string.
fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash = FNV_OFFSET_BASIS;
    for &byte in bytes {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// Fold the world seed into a cell hash and scramble the result.
const fn mix(world_seed: u64, cell_hash: u64) -> u64 {
    // 0x517cc1b727220a95 is a well-known mixing constant.
    let mut state = cell_hash ^ world_seed.wrapping_mul(0x517c_c1b7_2722_0a95);

    // xorshift requires non-zero input.
    if state == 0 {
        state = 0xdead_beef_cafe_babe;
    }

    // xorshift64
    state ^= state << 13;
    state ^= state >> 7;
    state ^= state << 17;

    // splitmix64 finalizer
    state = (state ^ (state >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    state = (state ^ (state >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    state ^ (state >> 31)
}
