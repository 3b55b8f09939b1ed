//! Parsing of the line-based command language.

use gridcraft_types::{CellId, Direction};

/// One player command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Move one cell.
    Move(Direction),
    /// Click an absolute cell.
    Click(CellId),
    /// Click a cell relative to the player.
    ClickRelative {
        /// Offset north.
        di: i32,
        /// Offset east.
        dj: i32,
    },
    /// Redraw the neighbourhood.
    Look,
    /// Save now.
    Save,
    /// Reload the last save.
    Load,
    /// Start over.
    Reset,
    /// Print the command list.
    Help,
    /// Leave.
    Quit,
}

/// Why a line could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    /// The first word is not a known command.
    #[error("unknown command {0:?}, try \"help\"")]
    Unknown(String),

    /// The command needs arguments that are missing or extra.
    #[error("usage: {0}")]
    Usage(&'static str),

    /// An argument is not an integer.
    #[error("not an integer: {0:?}")]
    BadNumber(String),
}

/// Text printed by `help`.
pub const HELP: &str = "\
commands:
  n | s | e | w        move one cell north/south/east/west
  click I J            click cell (I, J)
  c DI DJ              click the cell DI north, DJ east of you
  look                 redraw the map
  save | load | reset  manage progress
  help | quit";

/// Parse one input line. Returns `Ok(None)` for a blank line.
pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();

    let command = match head.to_ascii_lowercase().as_str() {
        "n" | "north" => Command::Move(Direction::North),
        "s" | "south" => Command::Move(Direction::South),
        "e" | "east" => Command::Move(Direction::East),
        "w" | "west" => Command::Move(Direction::West),
        "click" => {
            let (i, j) = two_ints(&args, "click I J")?;
            Command::Click(CellId::new(i, j))
        }
        "c" => {
            let (di, dj) = two_ints(&args, "c DI DJ")?;
            Command::ClickRelative { di, dj }
        }
        "look" | "l" => Command::Look,
        "save" => Command::Save,
        "load" => Command::Load,
        "reset" => Command::Reset,
        "help" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_owned())),
    };
    Ok(Some(command))
}

fn two_ints(args: &[&str], usage: &'static str) -> Result<(i32, i32), CommandError> {
    let [a, b] = args else {
        return Err(CommandError::Usage(usage));
    };
    Ok((int(a)?, int(b)?))
}

fn int(word: &str) -> Result<i32, CommandError> {
    word.parse()
        .map_err(|_parse| CommandError::BadNumber(word.to_owned()))
}
