//! Deterministic world model for the Gridcraft grid game.
//!
//! This crate models the world the player walks over: an unbounded square
//! grid whose cells start with or without a token according to a seeded,
//! reproducible spawn rule, plus the player-made changes layered on top.
//!
//! # Modules
//!
//! - [`spawn`] -- Deterministic per-cell spawn chance and spawn rules.
//! - [`store`] -- [`WorldStore`]: recorded cells first, spawn rule as
//!   fallback, memoized on first access.
//! - [`geometry`] -- Map point to cell conversion and cell footprints.
//! - [`viewport`] -- Visible sets and enter/exit diffs for rendering.
//! - [`error`] -- Error types for world operations.

pub mod error;
pub mod geometry;
pub mod spawn;
pub mod store;
pub mod viewport;

// Re-export primary types at crate root.
pub use error::WorldError;
pub use geometry::{DEFAULT_CELL_SIZE_DEGREES, GeoBounds, GeoPoint, GridGeometry};
pub use spawn::{DEFAULT_SPAWN_PROBABILITY, SpawnRules, spawn_chance};
pub use store::WorldStore;
pub use viewport::{
    CellRange, DEFAULT_MAX_VISIBLE_CELLS, ViewportDiff, ViewportTracker, compute_visible_set,
};
