//! Shared type definitions for the Gridcraft grid game.
//!
//! This crate is the single source of truth for the value types that cross
//! the boundary between the game core and the presentation layer. Types
//! defined here flow downstream to `TypeScript` via `ts-rs`.
//!
//! # Modules
//!
//! - [`cell`] -- Grid coordinates and movement directions
//! - [`token`] -- Token values and doubling
//! - [`player`] -- Player position, inventory, and win flag
//! - [`outcome`] -- Interaction outcomes and render cells

pub mod cell;
pub mod outcome;
pub mod player;
pub mod token;

// Re-export all public types at crate root for convenience.
pub use cell::{CellId, Direction, ParseCellIdError};
pub use outcome::{InteractionOutcome, RejectionReason, RenderCell};
pub use player::PlayerState;
pub use token::TokenValue;
