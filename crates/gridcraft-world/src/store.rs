//! Two-tier world store: recorded cells first, spawn rule as fallback.
//!
//! The [`WorldStore`] is the only source of truth for cell contents. A cell
//! is either *recorded* (present in the override map, authoritative forever)
//! or *untouched* (derived from the spawn rule on demand). The first
//! [`WorldStore::get`] of an untouched cell writes the derived answer back,
//! so later lookups never consult the generator for that cell again.
//!
//! Internally a `BTreeMap<CellId, Option<TokenValue>>` holds the recorded
//! tier. A recorded `None` is an explicit empty marker: a picked-up cell
//! stays empty and never re-rolls its spawn.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use gridcraft_types::{CellId, TokenValue};
use tracing::trace;

use crate::error::WorldError;
use crate::spawn::SpawnRules;

/// Sparse cell store seeded lazily by the spawn function.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldStore {
    /// Seed folded into every spawn decision.
    seed: u64,
    /// How untouched cells are derived.
    rules: SpawnRules,
    /// Recorded cells. `None` marks an authoritative empty cell.
    cells: BTreeMap<CellId, Option<TokenValue>>,
}

impl WorldStore {
    /// Create an empty store; every cell starts untouched.
    pub const fn new(seed: u64, rules: SpawnRules) -> Self {
        Self {
            seed,
            rules,
            cells: BTreeMap::new(),
        }
    }

    /// Rebuild a store from previously recorded cells.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::DuplicateCell`] if a cell appears more than once.
    pub fn from_records<I>(seed: u64, rules: SpawnRules, records: I) -> Result<Self, WorldError>
    where
        I: IntoIterator<Item = (CellId, Option<TokenValue>)>,
    {
        let mut cells = BTreeMap::new();
        for (cell, token) in records {
            match cells.entry(cell) {
                Entry::Occupied(_) => return Err(WorldError::DuplicateCell(cell)),
                Entry::Vacant(slot) => {
                    slot.insert(token);
                }
            }
        }
        Ok(Self { seed, rules, cells })
    }

    /// The world seed.
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// The spawn rules used for untouched cells.
    pub const fn rules(&self) -> &SpawnRules {
        &self.rules
    }

    /// Content of a cell, recording the derived answer on first access.
    pub fn get(&mut self, cell: CellId) -> Option<TokenValue> {
        let seed = self.seed;
        let rules = self.rules;
        *self.cells.entry(cell).or_insert_with(|| {
            let token = rules.spawned_token(seed, cell);
            trace!(%cell, ?token, "cell derived from spawn rule");
            token
        })
    }

    /// Content of a cell without recording anything.
    ///
    /// Always agrees with what [`get`](Self::get) would return.
    pub fn peek(&self, cell: CellId) -> Option<TokenValue> {
        self.cells
            .get(&cell)
            .copied()
            .unwrap_or_else(|| self.rules.spawned_token(self.seed, cell))
    }

    /// Record an authoritative token in a cell.
    pub fn set(&mut self, cell: CellId, value: TokenValue) {
        self.cells.insert(cell, Some(value));
    }

    /// Record a cell as authoritatively empty.
    pub fn clear(&mut self, cell: CellId) {
        self.cells.insert(cell, None);
    }

    /// Whether the cell has been recorded (queried or mutated).
    pub fn is_recorded(&self, cell: CellId) -> bool {
        self.cells.contains_key(&cell)
    }

    /// Number of recorded cells.
    pub fn recorded_count(&self) -> usize {
        self.cells.len()
    }

    /// Iterate over recorded cells in coordinate order.
    pub fn records(&self) -> impl Iterator<Item = (CellId, Option<TokenValue>)> + '_ {
        self.cells.iter().map(|(cell, token)| (*cell, *token))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn always_spawn() -> SpawnRules {
        SpawnRules::new(1.0, TokenValue::BASE).unwrap()
    }

    fn never_spawn() -> SpawnRules {
        SpawnRules::new(0.0, TokenValue::BASE).unwrap()
    }

    #[test]
    fn get_is_stable_and_memoized() {
        let mut store = WorldStore::new(0, SpawnRules::default());
        for i in -10..10 {
            for j in -10..10 {
                let cell = CellId::new(i, j);
                let first = store.get(cell);
                assert!(store.is_recorded(cell));
                assert_eq!(store.get(cell), first);
                assert_eq!(store.peek(cell), first);
            }
        }
        assert_eq!(store.recorded_count(), 400);
    }

    #[test]
    fn peek_does_not_record() {
        let store = WorldStore::new(0, always_spawn());
        assert_eq!(store.peek(CellId::ORIGIN), Some(TokenValue::BASE));
        assert!(!store.is_recorded(CellId::ORIGIN));
    }

    #[test]
    fn clear_never_resurrects_spawn() {
        let mut store = WorldStore::new(0, always_spawn());
        let cell = CellId::new(3, 4);
        assert_eq!(store.get(cell), Some(TokenValue::BASE));
        store.clear(cell);
        assert_eq!(store.get(cell), None);
        assert_eq!(store.peek(cell), None);
        assert!(store.is_recorded(cell));
    }

    #[test]
    fn clear_on_untouched_cell_blocks_spawn() {
        let mut store = WorldStore::new(0, always_spawn());
        let cell = CellId::new(-8, 2);
        store.clear(cell);
        assert_eq!(store.get(cell), None);
    }

    #[test]
    fn set_overrides_rule() {
        let mut store = WorldStore::new(0, never_spawn());
        let cell = CellId::new(1, 1);
        assert_eq!(store.get(cell), None);
        store.set(cell, TokenValue(8));
        assert_eq!(store.get(cell), Some(TokenValue(8)));
    }

    #[test]
    fn from_records_rejects_duplicates() {
        let records = vec![
            (CellId::new(0, 0), Some(TokenValue(2))),
            (CellId::new(0, 0), None),
        ];
        let result = WorldStore::from_records(0, SpawnRules::default(), records);
        assert_eq!(result.err(), Some(WorldError::DuplicateCell(CellId::ORIGIN)));
    }

    #[test]
    fn from_records_preserves_empty_markers() {
        let records = vec![(CellId::new(5, 5), None), (CellId::new(5, 6), Some(TokenValue(4)))];
        let mut store = WorldStore::from_records(1, always_spawn(), records).unwrap();
        assert_eq!(store.get(CellId::new(5, 5)), None);
        assert_eq!(store.get(CellId::new(5, 6)), Some(TokenValue(4)));
        assert_eq!(store.recorded_count(), 2);
    }

    #[test]
    fn records_are_in_coordinate_order() {
        let mut store = WorldStore::new(0, never_spawn());
        store.set(CellId::new(2, 0), TokenValue(1));
        store.set(CellId::new(-1, 5), TokenValue(2));
        store.clear(CellId::new(0, -3));
        let cells: Vec<CellId> = store.records().map(|(cell, _)| cell).collect();
        assert_eq!(cells, vec![CellId::new(-1, 5), CellId::new(0, -3), CellId::new(2, 0)]);
    }
}
