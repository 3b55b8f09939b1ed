//! Game rules, persistence, and orchestration for the Gridcraft grid game.
//!
//! This crate owns the event-driven game loop: a click resolves through the
//! interaction engine, a step moves the player, a view change diffs the
//! rendered set, and save/load moves the whole state through an opaque blob.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `gridcraft-config.yaml` into
//!   strongly-typed structs.
//! - [`interaction`] -- Pick up, place, craft, and rejection rules.
//! - [`persistence`] -- Versioned JSON save blob codec.
//! - [`storage`] -- [`SaveStore`] trait with memory and file backends.
//! - [`game`] -- [`Game`], the single owner of all mutable state.
//!
//! [`SaveStore`]: storage::SaveStore
//! [`Game`]: game::Game

pub mod config;
pub mod game;
pub mod interaction;
pub mod persistence;
pub mod storage;

pub use config::{ConfigError, GameConfig};
pub use game::{Game, GameError, LoadSource, ViewUpdate};
pub use interaction::{InteractionRules, interact};
pub use persistence::{CodecError, SAVE_FORMAT_TAG, SAVE_FORMAT_VERSION, deserialize, serialize};
pub use storage::{FileStore, MemoryStore, SAVE_KEY, SaveStore, StoreError};
