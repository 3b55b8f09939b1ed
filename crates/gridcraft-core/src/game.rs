//! The game controller.
//!
//! [`Game`] owns every piece of mutable state: the player, the world store,
//! and the set of rendered cells. The presentation layer drives it with
//! discrete events (click, step, view change, save, load, reset), each of
//! which runs to completion before the next. Nothing is global and nothing
//! is shared, so no synchronization is needed.

use gridcraft_types::{CellId, Direction, InteractionOutcome, PlayerState, RenderCell};
use gridcraft_world::{
    CellRange, GeoBounds, GeoPoint, GridGeometry, SpawnRules, ViewportTracker, WorldError,
    WorldStore,
};
use tracing::{debug, info, warn};

use crate::config::{ConfigError, GameConfig};
use crate::interaction::{InteractionRules, interact};
use crate::persistence::{self, CodecError};
use crate::storage::{SaveStore, StoreError};

/// Errors surfaced by [`Game`] operations.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// The configuration is unusable.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: ConfigError,
    },

    /// Encoding or decoding a save failed.
    #[error("save codec error: {source}")]
    Codec {
        /// The underlying codec error.
        #[from]
        source: CodecError,
    },

    /// The save store failed.
    #[error("save store error: {source}")]
    Store {
        /// The underlying store error.
        #[from]
        source: StoreError,
    },
}

/// Cells to draw and to tear down after a view change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewUpdate {
    /// Newly visible cells with their content.
    pub entered: Vec<RenderCell>,
    /// Cells whose visuals should be removed.
    pub exited: Vec<CellId>,
}

/// Where a loaded game came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// Restored from the stored blob.
    Restored,
    /// Nothing was stored; a fresh game was started.
    NoSave,
    /// The stored blob was unreadable; a fresh game was started.
    FellBack,
}

/// A single-player game session.
#[derive(Debug, Clone)]
pub struct Game {
    rules: InteractionRules,
    spawn_rules: SpawnRules,
    seed: u64,
    start: CellId,
    grid: GridGeometry,
    neighborhood_radius: u32,
    save_key: String,
    player: PlayerState,
    world: WorldStore,
    viewport: ViewportTracker,
}

impl Game {
    /// Start a fresh game.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Config`] if the configuration is invalid.
    pub fn new(config: &GameConfig) -> Result<Self, GameError> {
        config.validate()?;
        let spawn_rules = config.spawn_rules()?;
        let seed = config.world.seed;
        let start = config.world.start;
        debug!(
            seed,
            %start,
            spawn_probability = spawn_rules.probability(),
            base_value = %spawn_rules.base_value(),
            "Creating game"
        );

        Ok(Self {
            rules: config.interaction_rules(),
            spawn_rules,
            seed,
            start,
            grid: config.grid()?,
            neighborhood_radius: config.viewport.neighborhood_radius,
            save_key: config.storage.save_key.clone(),
            player: PlayerState::new(start),
            world: WorldStore::new(seed, spawn_rules),
            viewport: ViewportTracker::new(config.viewport.max_visible_cells),
        })
    }

    /// Restore a game from a save blob.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Codec`] if the blob cannot be decoded, or
    /// [`GameError::Config`] if the configuration is invalid.
    pub fn from_blob(config: &GameConfig, blob: &str) -> Result<Self, GameError> {
        let mut game = Self::new(config)?;
        let (player, world) = persistence::deserialize(blob, game.spawn_rules)?;
        if world.seed() != game.seed {
            info!(
                saved_seed = world.seed(),
                config_seed = game.seed,
                "Save uses a different world seed, keeping the saved one"
            );
        }
        game.seed = world.seed();
        game.player = player;
        game.world = world;
        Ok(game)
    }

    /// Load the game stored under the configured key, or start fresh.
    ///
    /// A missing, unreadable, or corrupt save is not an error: it is logged
    /// and a fresh game is returned together with the [`LoadSource`].
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Config`] if the configuration is invalid.
    pub fn load(
        config: &GameConfig,
        store: &dyn SaveStore,
    ) -> Result<(Self, LoadSource), GameError> {
        let key = config.storage.save_key.as_str();
        let blob = match store.read(key) {
            Ok(Some(blob)) => blob,
            Ok(None) => {
                info!(key, "No saved game, starting fresh");
                return Ok((Self::new(config)?, LoadSource::NoSave));
            }
            Err(e) => {
                warn!(key, error = %e, "Failed to read saved game, starting fresh");
                return Ok((Self::new(config)?, LoadSource::FellBack));
            }
        };

        match Self::from_blob(config, &blob) {
            Ok(game) => {
                info!(
                    key,
                    position = %game.player.position,
                    recorded_cells = game.world.recorded_count(),
                    won = game.player.won,
                    "Saved game restored"
                );
                Ok((game, LoadSource::Restored))
            }
            Err(GameError::Codec { source }) => {
                warn!(key, error = %source, "Saved game is corrupt, starting fresh");
                Ok((Self::new(config)?, LoadSource::FellBack))
            }
            Err(e) => Err(e),
        }
    }

    /// Encode the current state as a save blob.
    pub fn to_blob(&self) -> Result<String, CodecError> {
        persistence::serialize(&self.player, &self.world)
    }

    /// Write the current state under the configured key.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Codec`] or [`GameError::Store`] on failure.
    pub fn save(&self, store: &mut dyn SaveStore) -> Result<(), GameError> {
        let blob = self.to_blob()?;
        store.write(&self.save_key, &blob)?;
        info!(
            key = %self.save_key,
            bytes = blob.len(),
            recorded_cells = self.world.recorded_count(),
            "Game saved"
        );
        Ok(())
    }

    /// Throw away all progress and start over with the same seed.
    ///
    /// Returns the previously rendered cells for teardown.
    pub fn reset(&mut self) -> Vec<CellId> {
        self.player = PlayerState::new(self.start);
        self.world = WorldStore::new(self.seed, self.spawn_rules);
        let torn_down = self.viewport.clear();
        info!(seed = self.seed, start = %self.start, "Game reset");
        torn_down
    }

    /// Resolve a click on `cell`.
    pub fn click(&mut self, cell: CellId) -> InteractionOutcome {
        let outcome = interact(&mut self.player, &mut self.world, cell, &self.rules);
        match outcome {
            InteractionOutcome::Crafted { value, won: true, .. } => {
                info!(%cell, %value, "Win threshold reached");
            }
            InteractionOutcome::Rejected(reason) => {
                debug!(%cell, ?reason, "Interaction rejected");
            }
            InteractionOutcome::PickedUp { .. }
            | InteractionOutcome::Placed { .. }
            | InteractionOutcome::Crafted { .. } => {
                debug!(%cell, ?outcome, "Interaction applied");
            }
        }
        outcome
    }

    /// Move the player one cell and return the new position.
    ///
    /// A won game is frozen: the position stays put. Stepping off the edge
    /// of the `i32` grid is also a no-op.
    pub fn step(&mut self, direction: Direction) -> CellId {
        if let Some(next) = self.player.position.step(direction) {
            self.move_to(next);
        }
        self.player.position
    }

    /// Put the player on `cell` directly and return the new position.
    ///
    /// A won game is frozen: the position stays put.
    pub fn teleport(&mut self, cell: CellId) -> CellId {
        self.move_to(cell);
        self.player.position
    }

    fn move_to(&mut self, cell: CellId) {
        if self.player.won {
            debug!(%cell, "Movement ignored, game is won");
            return;
        }
        self.player.position = cell;
        debug!(position = %cell, "Player moved");
    }

    /// Change the view to `range`.
    ///
    /// Entered cells are looked up (and recorded) through the world store;
    /// cells that stay visible are not looked up again.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::ViewportTooLarge`] if the range is too large;
    /// the rendered set is unchanged in that case.
    pub fn update_view(&mut self, range: &CellRange) -> Result<ViewUpdate, WorldError> {
        let diff = self.viewport.update(range)?;
        let entered = diff
            .entered
            .into_iter()
            .map(|cell| RenderCell {
                cell,
                token: self.world.get(cell),
            })
            .collect();
        Ok(ViewUpdate {
            entered,
            exited: diff.exited,
        })
    }

    /// Change the view to a map region.
    ///
    /// # Errors
    ///
    /// Returns a [`WorldError`] for non-finite or oversized regions.
    pub fn update_view_geo(&mut self, bounds: GeoBounds) -> Result<ViewUpdate, WorldError> {
        let range = self.grid.cells_covering(bounds)?;
        self.update_view(&range)
    }

    /// Change the view to the neighbourhood around the player.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::ViewportTooLarge`] if the configured
    /// neighbourhood exceeds the view limit.
    pub fn view_around_player(&mut self) -> Result<ViewUpdate, WorldError> {
        let range = self.neighborhood();
        self.update_view(&range)
    }

    /// The square of cells drawn around the player.
    pub fn neighborhood(&self) -> CellRange {
        CellRange::around(self.player.position, self.neighborhood_radius)
    }

    /// Content of a cell, for redrawing after a click. Records nothing.
    pub fn cell(&self, cell: CellId) -> RenderCell {
        RenderCell {
            cell,
            token: self.world.peek(cell),
        }
    }

    /// Map point at the centre of the player's cell.
    pub fn player_center(&self) -> GeoPoint {
        self.grid.cell_center(self.player.position)
    }

    /// The player.
    pub const fn player(&self) -> &PlayerState {
        &self.player
    }

    /// The world store.
    pub const fn world(&self) -> &WorldStore {
        &self.world
    }

    /// The grid geometry.
    pub const fn grid(&self) -> &GridGeometry {
        &self.grid
    }

    /// The interaction rules in force.
    pub const fn rules(&self) -> &InteractionRules {
        &self.rules
    }

    /// The currently rendered cells.
    pub const fn viewport(&self) -> &ViewportTracker {
        &self.viewport
    }

    /// Whether the game has been won.
    pub const fn has_won(&self) -> bool {
        self.player.won
    }
}
