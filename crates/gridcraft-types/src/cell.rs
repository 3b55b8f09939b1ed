//! Grid cell coordinates and movement directions.
//!
//! A [`CellId`] addresses one square of the global grid. The grid is anchored
//! at the origin: `i` counts cells northwards (latitude) and `j` counts cells
//! eastwards (longitude). Both axes are unbounded in either sign.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Integer coordinate of one grid cell.
///
/// Ordering is row-major (`i` first, then `j`), which keeps iteration over a
/// `BTreeMap<CellId, _>` stable across runs.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[ts(export, export_to = "bindings/")]
pub struct CellId {
    /// Row index, growing northwards.
    pub i: i32,
    /// Column index, growing eastwards.
    pub j: i32,
}

impl CellId {
    /// The cell at the grid origin.
    pub const ORIGIN: Self = Self { i: 0, j: 0 };

    /// Create a cell coordinate.
    pub const fn new(i: i32, j: i32) -> Self {
        Self { i, j }
    }

    /// Return the neighbouring cell offset by `(di, dj)`.
    ///
    /// Returns `None` if the result would leave the `i32` range.
    pub const fn offset(self, di: i32, dj: i32) -> Option<Self> {
        let Some(i) = self.i.checked_add(di) else {
            return None;
        };
        let Some(j) = self.j.checked_add(dj) else {
            return None;
        };
        Some(Self { i, j })
    }

    /// Return the adjacent cell in the given direction.
    pub const fn step(self, direction: Direction) -> Option<Self> {
        let (di, dj) = direction.delta();
        self.offset(di, dj)
    }

    /// Chebyshev (king-move) distance: `max(|di|, |dj|)`.
    pub const fn chebyshev_distance(self, other: Self) -> u32 {
        let di = self.i.abs_diff(other.i);
        let dj = self.j.abs_diff(other.j);
        if di > dj { di } else { dj }
    }

    /// Canonical string form, `"i:j"`.
    ///
    /// This is the encoding fed to the spawn hash, so it must never change.
    pub fn canonical(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.i, self.j)
    }
}

/// Error returned when a string is not a valid `"i:j"` cell coordinate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid cell coordinate {input:?}, expected \"i:j\"")]
pub struct ParseCellIdError {
    /// The rejected input.
    pub input: String,
}

impl FromStr for CellId {
    type Err = ParseCellIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseCellIdError {
            input: s.to_owned(),
        };
        let (i, j) = s.split_once(':').ok_or_else(err)?;
        let i = i.trim().parse::<i32>().map_err(|_parse| err())?;
        let j = j.trim().parse::<i32>().map_err(|_parse| err())?;
        Ok(Self { i, j })
    }
}

/// One of the four movement directions on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Direction {
    /// Towards increasing `i`.
    North,
    /// Towards decreasing `i`.
    South,
    /// Towards increasing `j`.
    East,
    /// Towards decreasing `j`.
    West,
}

impl Direction {
    /// All four directions, in N/S/E/W order.
    pub const ALL: [Self; 4] = [Self::North, Self::South, Self::East, Self::West];

    /// Unit offset `(di, dj)` for one step in this direction.
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::North => (1, 0),
            Self::South => (-1, 0),
            Self::East => (0, 1),
            Self::West => (0, -1),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]
mod tests {
    use super::*;

    #[test]
    fn canonical_form_is_unambiguous_for_negatives() {
        assert_eq!(CellId::new(-1, 12).canonical(), "-1:12");
        assert_eq!(CellId::new(11, -2).canonical(), "11:-2");
        assert_ne!(CellId::new(1, 12).canonical(), CellId::new(11, 2).canonical());
    }

    #[test]
    fn parse_roundtrips_display() {
        for cell in [CellId::ORIGIN, CellId::new(-7, 3), CellId::new(i32::MIN, i32::MAX)] {
            let parsed: CellId = cell.to_string().parse().unwrap();
            assert_eq!(parsed, cell);
        }
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("".parse::<CellId>().is_err());
        assert!("3".parse::<CellId>().is_err());
        assert!("a:b".parse::<CellId>().is_err());
        assert!("1:2:3".parse::<CellId>().is_err());
    }

    #[test]
    fn chebyshev_distance_takes_larger_axis() {
        let origin = CellId::ORIGIN;
        assert_eq!(origin.chebyshev_distance(CellId::new(3, -1)), 3);
        assert_eq!(origin.chebyshev_distance(CellId::new(-2, 4)), 4);
        assert_eq!(origin.chebyshev_distance(origin), 0);
    }

    #[test]
    fn chebyshev_distance_does_not_overflow_at_extremes() {
        let a = CellId::new(i32::MIN, 0);
        let b = CellId::new(i32::MAX, 0);
        assert_eq!(a.chebyshev_distance(b), u32::MAX);
    }

    #[test]
    fn step_moves_one_cell() {
        let start = CellId::new(5, 5);
        assert_eq!(start.step(Direction::North), Some(CellId::new(6, 5)));
        assert_eq!(start.step(Direction::South), Some(CellId::new(4, 5)));
        assert_eq!(start.step(Direction::East), Some(CellId::new(5, 6)));
        assert_eq!(start.step(Direction::West), Some(CellId::new(5, 4)));
    }

    #[test]
    fn opposite_steps_cancel() {
        let start = CellId::new(-3, 9);
        for direction in Direction::ALL {
            let (di, dj) = direction.delta();
            assert_eq!(di.abs() + dj.abs(), 1, "{direction:?} is not a unit step");
            let moved = start.step(direction).unwrap();
            let back = moved.offset(-di, -dj).unwrap();
            assert_eq!(back, start);
        }
    }

    #[test]
    fn step_at_edge_of_range_is_none() {
        assert_eq!(CellId::new(i32::MAX, 0).step(Direction::North), None);
        assert_eq!(CellId::new(0, i32::MIN).step(Direction::West), None);
    }
}
