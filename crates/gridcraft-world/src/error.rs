//! Error types for the `gridcraft-world` crate.
//!
//! All fallible operations in this crate return [`WorldError`] through the
//! standard [`Result`] type alias.

use gridcraft_types::CellId;

/// Errors that can occur during world and viewport operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WorldError {
    /// A cell appeared twice while rebuilding the store from records.
    #[error("duplicate cell record: {0}")]
    DuplicateCell(CellId),

    /// The spawn probability is outside `[0, 1]`.
    #[error("spawn probability {0} is outside [0, 1]")]
    InvalidSpawnProbability(f64),

    /// The grid cell size is not a positive finite number of degrees.
    #[error("cell size {0} must be a positive finite number of degrees")]
    InvalidCellSize(f64),

    /// A map coordinate was NaN or infinite.
    #[error("map coordinate is not finite")]
    NonFiniteCoordinate,

    /// A map coordinate falls outside the addressable grid.
    #[error("map coordinate is outside the addressable grid")]
    OutOfGrid,

    /// The requested viewport covers more cells than allowed.
    #[error("viewport of {requested} cells exceeds the limit of {limit}")]
    ViewportTooLarge {
        /// Number of cells the region would cover.
        requested: u64,
        /// Configured maximum.
        limit: u64,
    },
}
