//! Visible-set computation and render tracking.
//!
//! The world is unbounded, so nothing iterates over it. Each view change is
//! turned into a [`CellRange`], the range into a visible set, and the visible
//! set is diffed against what is currently rendered:
//!
//! - cells that *entered* the view need their content looked up and drawn,
//! - cells that *exited* the view need their visuals torn down,
//! - cells that stayed visible are left alone and never re-derived.
//!
//! The [`ViewportTracker`] holds only the transient rendered set, so memory
//! and work scale with the viewport, not with how much of the world has been
//! explored.

use std::collections::BTreeSet;

use gridcraft_types::CellId;
use serde::{Deserialize, Serialize};

use crate::error::WorldError;

/// Default upper bound on the number of cells in one view.
pub const DEFAULT_MAX_VISIBLE_CELLS: u64 = 4096;

/// An inclusive rectangle of cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRange {
    /// Corner with the smallest `i` and `j`.
    pub min: CellId,
    /// Corner with the largest `i` and `j`.
    pub max: CellId,
}

impl CellRange {
    /// Create a range from two opposite corners, in any order.
    pub fn new(a: CellId, b: CellId) -> Self {
        Self {
            min: CellId::new(a.i.min(b.i), a.j.min(b.j)),
            max: CellId::new(a.i.max(b.i), a.j.max(b.j)),
        }
    }

    /// The square of cells within Chebyshev distance `radius` of `center`.
    ///
    /// Clamped at the edges of the `i32` grid.
    pub fn around(center: CellId, radius: u32) -> Self {
        let r = i32::try_from(radius).unwrap_or(i32::MAX);
        Self {
            min: CellId::new(center.i.saturating_sub(r), center.j.saturating_sub(r)),
            max: CellId::new(center.i.saturating_add(r), center.j.saturating_add(r)),
        }
    }

    /// Whether a cell lies inside the range.
    pub const fn contains(&self, cell: CellId) -> bool {
        cell.i >= self.min.i && cell.i <= self.max.i && cell.j >= self.min.j && cell.j <= self.max.j
    }

    /// Number of cells in the range.
    pub fn cell_count(&self) -> u64 {
        let rows = u64::from(self.max.i.abs_diff(self.min.i)).saturating_add(1);
        let cols = u64::from(self.max.j.abs_diff(self.min.j)).saturating_add(1);
        rows.saturating_mul(cols)
    }

    /// Iterate over the cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = CellId> + use<> {
        let (min, max) = (self.min, self.max);
        (min.i..=max.i).flat_map(move |i| (min.j..=max.j).map(move |j| CellId::new(i, j)))
    }
}

/// Every cell in `range`, refusing ranges above `max_cells`.
///
/// # Errors
///
/// Returns [`WorldError::ViewportTooLarge`] if the range holds more than
/// `max_cells` cells.
pub fn compute_visible_set(
    range: &CellRange,
    max_cells: u64,
) -> Result<BTreeSet<CellId>, WorldError> {
    let requested = range.cell_count();
    if requested > max_cells {
        return Err(WorldError::ViewportTooLarge {
            requested,
            limit: max_cells,
        });
    }
    Ok(range.cells().collect())
}

/// Cells that changed visibility in one view update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewportDiff {
    /// Newly visible cells, in coordinate order.
    pub entered: Vec<CellId>,
    /// Cells that are no longer visible, in coordinate order.
    pub exited: Vec<CellId>,
}

impl ViewportDiff {
    /// Whether nothing changed.
    pub fn is_empty(&self) -> bool {
        self.entered.is_empty() && self.exited.is_empty()
    }
}

/// Tracks which cells are currently rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewportTracker {
    rendered: BTreeSet<CellId>,
    max_visible_cells: u64,
}

impl ViewportTracker {
    /// Create a tracker with nothing rendered.
    pub const fn new(max_visible_cells: u64) -> Self {
        Self {
            rendered: BTreeSet::new(),
            max_visible_cells,
        }
    }

    /// Move the view to `range` and report what entered and exited.
    ///
    /// On error the rendered set is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::ViewportTooLarge`] if the range is too large.
    pub fn update(&mut self, range: &CellRange) -> Result<ViewportDiff, WorldError> {
        let visible = compute_visible_set(range, self.max_visible_cells)?;
        let entered = visible.difference(&self.rendered).copied().collect();
        let exited = self.rendered.difference(&visible).copied().collect();
        self.rendered = visible;
        Ok(ViewportDiff { entered, exited })
    }

    /// Drop every rendered cell, returning them for teardown.
    pub fn clear(&mut self) -> Vec<CellId> {
        std::mem::take(&mut self.rendered).into_iter().collect()
    }

    /// Whether a cell is currently rendered.
    pub fn is_rendered(&self, cell: CellId) -> bool {
        self.rendered.contains(&cell)
    }

    /// Number of rendered cells.
    pub fn rendered_count(&self) -> usize {
        self.rendered.len()
    }

    /// Configured limit on cells per view.
    pub const fn max_visible_cells(&self) -> u64 {
        self.max_visible_cells
    }
}

impl Default for ViewportTracker {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_VISIBLE_CELLS)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn range_normalizes_corners() {
        let range = CellRange::new(CellId::new(3, -1), CellId::new(-2, 4));
        assert_eq!(range.min, CellId::new(-2, -1));
        assert_eq!(range.max, CellId::new(3, 4));
        assert_eq!(range.cell_count(), 36);
    }

    #[test]
    fn around_is_a_square_of_side_two_r_plus_one() {
        let range = CellRange::around(CellId::new(10, -10), 3);
        assert_eq!(range.cell_count(), 49);
        assert!(range.contains(CellId::new(13, -7)));
        assert!(!range.contains(CellId::new(14, -10)));
    }

    #[test]
    fn around_clamps_at_grid_edge() {
        let range = CellRange::around(CellId::new(i32::MAX, 0), 2);
        assert_eq!(range.max.i, i32::MAX);
        assert_eq!(range.cell_count(), 15);
    }

    #[test]
    fn cells_iterates_every_cell_once() {
        let range = CellRange::new(CellId::new(0, 0), CellId::new(1, 2));
        let cells: Vec<CellId> = range.cells().collect();
        assert_eq!(
            cells,
            vec![
                CellId::new(0, 0),
                CellId::new(0, 1),
                CellId::new(0, 2),
                CellId::new(1, 0),
                CellId::new(1, 1),
                CellId::new(1, 2),
            ]
        );
    }

    #[test]
    fn visible_set_refuses_oversized_range() {
        let range = CellRange::around(CellId::ORIGIN, 100);
        let result = compute_visible_set(&range, 1_000);
        assert_eq!(
            result.err(),
            Some(WorldError::ViewportTooLarge {
                requested: 40_401,
                limit: 1_000,
            })
        );
    }

    #[test]
    fn first_update_enters_everything() {
        let mut tracker = ViewportTracker::default();
        let diff = tracker.update(&CellRange::around(CellId::ORIGIN, 1)).unwrap();
        assert_eq!(diff.entered.len(), 9);
        assert!(diff.exited.is_empty());
        assert_eq!(tracker.rendered_count(), 9);
    }

    #[test]
    fn pan_reports_only_edges() {
        let mut tracker = ViewportTracker::default();
        tracker.update(&CellRange::around(CellId::ORIGIN, 1)).unwrap();
        let diff = tracker.update(&CellRange::around(CellId::new(0, 1), 1)).unwrap();
        assert_eq!(diff.entered, vec![CellId::new(-1, 2), CellId::new(0, 2), CellId::new(1, 2)]);
        assert_eq!(diff.exited, vec![CellId::new(-1, -1), CellId::new(0, -1), CellId::new(1, -1)]);
        assert_eq!(tracker.rendered_count(), 9);
    }

    #[test]
    fn unchanged_view_is_a_no_op() {
        let mut tracker = ViewportTracker::default();
        let range = CellRange::around(CellId::new(4, 4), 2);
        tracker.update(&range).unwrap();
        assert!(tracker.update(&range).unwrap().is_empty());
    }

    #[test]
    fn failed_update_keeps_rendered_set() {
        let mut tracker = ViewportTracker::new(25);
        tracker.update(&CellRange::around(CellId::ORIGIN, 2)).unwrap();
        assert!(tracker.update(&CellRange::around(CellId::ORIGIN, 3)).is_err());
        assert_eq!(tracker.rendered_count(), 25);
        assert!(tracker.is_rendered(CellId::new(2, 2)));
    }

    #[test]
    fn clear_returns_all_rendered() {
        let mut tracker = ViewportTracker::default();
        tracker.update(&CellRange::around(CellId::ORIGIN, 1)).unwrap();
        assert_eq!(tracker.clear().len(), 9);
        assert_eq!(tracker.rendered_count(), 0);
    }
}
