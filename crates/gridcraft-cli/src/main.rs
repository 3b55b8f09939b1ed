//! Terminal front-end for the Gridcraft grid game.
//!
//! Reads one command per line from stdin, drives a [`Game`], and prints an
//! ASCII map of the player's neighbourhood after every command. Progress is
//! saved to disk after each state-changing command and restored on start.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `gridcraft-config.yaml` (or the path given as
//!    the first argument)
//! 2. Initialize structured logging (tracing) on stderr
//! 3. Open the save directory and restore the last game, or start fresh
//! 4. Run the command loop until `quit` or end of input

mod command;
mod error;
mod render;

use std::io::{BufRead, Write};
use std::path::PathBuf;

use gridcraft_core::{FileStore, Game, GameConfig, LoadSource, SaveStore};
use gridcraft_types::CellId;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::command::{Command, HELP};
use crate::error::CliError;

const DEFAULT_CONFIG_PATH: &str = "gridcraft-config.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the terminal fails.
fn main() -> Result<(), CliError> {
    // 1. Load configuration.
    let config = load_config()?;

    // 2. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    info!(
        seed = config.world.seed,
        interaction_radius = config.rules.interaction_radius,
        spawn_probability = config.rules.spawn_probability,
        win_threshold = config.rules.win_threshold,
        "Configuration loaded"
    );

    // 3. Restore or start the game.
    let mut store = FileStore::new(&config.storage.save_dir);
    let (mut game, source) = Game::load(&config, &store)?;
    info!(save_dir = %store.dir().display(), ?source, "Game ready");

    // 4. Command loop.
    let mut out = std::io::stdout().lock();
    if source == LoadSource::FellBack {
        writeln!(out, "(your previous save could not be read; starting a new game)")?;
    }
    writeln!(out, "{HELP}")?;
    draw(&mut game, &mut out)?;

    run(&config, &mut game, &mut store, std::io::stdin().lock(), &mut out)?;

    info!(
        position = %game.player().position,
        won = game.has_won(),
        "gridcraft shutdown complete"
    );
    Ok(())
}

/// Load the configuration file named on the command line, or the default.
///
/// A missing default file is not an error; the built-in defaults are used.
fn load_config() -> Result<GameConfig, CliError> {
    let (path, required) = match std::env::args_os().nth(1) {
        Some(arg) => (PathBuf::from(arg), true),
        None => (PathBuf::from(DEFAULT_CONFIG_PATH), false),
    };

    if required || path.exists() {
        Ok(GameConfig::from_file(&path)?)
    } else {
        let mut config = GameConfig::default();
        config.storage.apply_env_overrides();
        Ok(config)
    }
}

/// Apply commands from `input` until `quit` or end of input.
///
/// The game is saved after every command that changed it. Bad commands and
/// failed saves or loads are reported on `out` and the loop carries on.
fn run(
    config: &GameConfig,
    game: &mut Game,
    store: &mut dyn SaveStore,
    input: impl BufRead,
    out: &mut impl Write,
) -> Result<(), CliError> {
    for line in input.lines() {
        let line = line?;
        let command = match command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                writeln!(out, "{e}")?;
                continue;
            }
        };

        let changed = match command {
            Command::Quit => break,
            Command::Help => {
                writeln!(out, "{HELP}")?;
                false
            }
            Command::Look => {
                draw(game, out)?;
                false
            }
            Command::Move(direction) => {
                let before = game.player().position;
                let after = game.step(direction);
                draw(game, out)?;
                after != before
            }
            Command::Click(cell) => click(game, cell, out)?,
            Command::ClickRelative { di, dj } => match game.player().position.offset(di, dj) {
                Some(cell) => click(game, cell, out)?,
                None => {
                    writeln!(out, "that cell is off the edge of the world")?;
                    false
                }
            },
            Command::Save => {
                save(game, store, out)?;
                false
            }
            Command::Load => {
                match Game::load(config, &*store) {
                    Ok((loaded, source)) => {
                        *game = loaded;
                        writeln!(out, "{}", describe_load(source))?;
                        draw(game, out)?;
                    }
                    Err(e) => writeln!(out, "(could not load: {e})")?,
                }
                false
            }
            Command::Reset => {
                game.reset();
                writeln!(out, "new game")?;
                draw(game, out)?;
                true
            }
        };

        if changed {
            save(game, store, out)?;
        }
    }
    Ok(())
}

fn click(game: &mut Game, cell: CellId, out: &mut impl Write) -> Result<bool, CliError> {
    let outcome = game.click(cell);
    writeln!(out, "{}", render::describe(&outcome))?;
    draw(game, out)?;
    Ok(outcome.is_success())
}

fn draw(game: &mut Game, out: &mut impl Write) -> Result<(), CliError> {
    // Entered cells are derived here; the drawing itself only peeks.
    if let Err(e) = game.view_around_player() {
        warn!(error = %e, "View update failed");
    }
    let range = game.neighborhood();
    writeln!(out, "{}", render::render_grid(game, &range))?;
    Ok(())
}

fn save(game: &Game, store: &mut dyn SaveStore, out: &mut impl Write) -> Result<(), CliError> {
    if let Err(e) = game.save(store) {
        warn!(error = %e, "Save failed");
        writeln!(out, "(could not save: {e})")?;
    }
    Ok(())
}

const fn describe_load(source: LoadSource) -> &'static str {
    match source {
        LoadSource::Restored => "save restored",
        LoadSource::NoSave => "no save found, new game",
        LoadSource::FellBack => "save could not be read, new game",
    }
}
