//! Conversion between map coordinates and grid cells.
//!
//! The grid is anchored at `(0, 0)` degrees. Cell `(i, j)` covers latitudes
//! `[i * size, (i + 1) * size)` and longitudes `[j * size, (j + 1) * size)`.
//! No projection or wrap-around is applied; the grid is a flat overlay.

use gridcraft_types::CellId;
use serde::{Deserialize, Serialize};

use crate::error::WorldError;
use crate::viewport::CellRange;

/// Default edge length of one cell, in degrees.
pub const DEFAULT_CELL_SIZE_DEGREES: f64 = 1e-4;

/// A point on the map, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lng: f64,
}

impl GeoPoint {
    /// Create a map point.
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// An axis-aligned map region, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    /// South-west corner.
    pub south_west: GeoPoint,
    /// North-east corner.
    pub north_east: GeoPoint,
}

impl GeoBounds {
    /// Create a region from two opposite corners, in any order.
    pub fn from_corners(a: GeoPoint, b: GeoPoint) -> Self {
        Self {
            south_west: GeoPoint::new(a.lat.min(b.lat), a.lng.min(b.lng)),
            north_east: GeoPoint::new(a.lat.max(b.lat), a.lng.max(b.lng)),
        }
    }
}

/// Fixed-size square grid laid over the map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    cell_size_degrees: f64,
}

impl GridGeometry {
    /// Create a grid with the given cell edge length.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidCellSize`] unless the size is finite and
    /// strictly positive.
    pub fn new(cell_size_degrees: f64) -> Result<Self, WorldError> {
        if !cell_size_degrees.is_finite() || cell_size_degrees <= 0.0 {
            return Err(WorldError::InvalidCellSize(cell_size_degrees));
        }
        Ok(Self { cell_size_degrees })
    }

    /// Edge length of one cell, in degrees.
    pub const fn cell_size_degrees(&self) -> f64 {
        self.cell_size_degrees
    }

    /// The cell containing a map point.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::NonFiniteCoordinate`] for NaN or infinite input
    /// and [`WorldError::OutOfGrid`] if the cell index does not fit in `i32`.
    pub fn cell_at(&self, point: GeoPoint) -> Result<CellId, WorldError> {
        let i = self.index_for(point.lat)?;
        let j = self.index_for(point.lng)?;
        Ok(CellId::new(i, j))
    }

    /// The map region covered by a cell.
    pub fn cell_bounds(&self, cell: CellId) -> GeoBounds {
        let size = self.cell_size_degrees;
        let south = f64::from(cell.i) * size;
        let west = f64::from(cell.j) * size;
        GeoBounds {
            south_west: GeoPoint::new(south, west),
            north_east: GeoPoint::new(south + size, west + size),
        }
    }

    /// The centre of a cell, where a view should pan to.
    pub fn cell_center(&self, cell: CellId) -> GeoPoint {
        let half = self.cell_size_degrees / 2.0;
        let bounds = self.cell_bounds(cell);
        GeoPoint::new(bounds.south_west.lat + half, bounds.south_west.lng + half)
    }

    /// Every cell whose footprint intersects a map region.
    ///
    /// # Errors
    ///
    /// Propagates the errors of [`cell_at`](Self::cell_at) for either corner.
    pub fn cells_covering(&self, bounds: GeoBounds) -> Result<CellRange, WorldError> {
        let min = self.cell_at(bounds.south_west)?;
        let max = self.cell_at(bounds.north_east)?;
        Ok(CellRange::new(min, max))
    }

    #[allow(clippy::cast_possible_truncation)]
    fn index_for(&self, degrees: f64) -> Result<i32, WorldError> {
        if !degrees.is_finite() {
            return Err(WorldError::NonFiniteCoordinate);
        }
        let index = (degrees / self.cell_size_degrees).floor();
        if index < f64::from(i32::MIN) || index > f64::from(i32::MAX) {
            return Err(WorldError::OutOfGrid);
        }
        // In range and integral after the check above.
        Ok(index as i32)
    }
}

impl Default for GridGeometry {
    fn default() -> Self {
        Self {
            cell_size_degrees: DEFAULT_CELL_SIZE_DEGREES,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    fn grid() -> GridGeometry {
        GridGeometry::new(0.5).unwrap()
    }

    #[test]
    fn cell_at_floors_towards_negative_infinity() {
        let g = grid();
        assert_eq!(g.cell_at(GeoPoint::new(0.0, 0.0)).unwrap(), CellId::new(0, 0));
        assert_eq!(g.cell_at(GeoPoint::new(0.49, 0.51)).unwrap(), CellId::new(0, 1));
        assert_eq!(g.cell_at(GeoPoint::new(-0.01, -0.5)).unwrap(), CellId::new(-1, -1));
        assert_eq!(g.cell_at(GeoPoint::new(-0.51, 1.0)).unwrap(), CellId::new(-2, 2));
    }

    #[test]
    fn cell_center_maps_back_to_cell() {
        let g = GridGeometry::default();
        for cell in [CellId::new(369_894, -1_220_628), CellId::new(-3, 7), CellId::ORIGIN] {
            assert_eq!(g.cell_at(g.cell_center(cell)).unwrap(), cell);
        }
    }

    #[test]
    fn cell_bounds_tile_the_plane() {
        let g = grid();
        let a = g.cell_bounds(CellId::new(2, 3));
        let b = g.cell_bounds(CellId::new(3, 4));
        assert_eq!(a.north_east, b.south_west);
        assert_eq!(a.south_west, GeoPoint::new(1.0, 1.5));
    }

    #[test]
    fn cells_covering_includes_partially_covered_cells() {
        let g = grid();
        let bounds = GeoBounds::from_corners(GeoPoint::new(0.9, -0.2), GeoPoint::new(0.1, 1.2));
        let range = g.cells_covering(bounds).unwrap();
        assert_eq!(range.min, CellId::new(0, -1));
        assert_eq!(range.max, CellId::new(1, 2));
        assert_eq!(range.cell_count(), 8);
    }

    #[test]
    fn rejects_invalid_input() {
        assert!(GridGeometry::new(0.0).is_err());
        assert!(GridGeometry::new(-1.0).is_err());
        assert!(GridGeometry::new(f64::INFINITY).is_err());
        let g = grid();
        assert_eq!(
            g.cell_at(GeoPoint::new(f64::NAN, 0.0)),
            Err(WorldError::NonFiniteCoordinate)
        );
        assert_eq!(g.cell_at(GeoPoint::new(1e12, 0.0)), Err(WorldError::OutOfGrid));
    }
}
