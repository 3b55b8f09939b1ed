//! ASCII rendering of the neighbourhood and of interaction outcomes.
//!
//! North is at the top. Each cell is three characters wide: `@` for the
//! player, the token value for a filled cell, `.` for an empty one.

use std::fmt::Write as _;

use gridcraft_core::Game;
use gridcraft_types::{CellId, InteractionOutcome, RejectionReason};
use gridcraft_world::CellRange;

/// Draw `range` as text, one row per line, followed by a status line.
pub fn render_grid(game: &Game, range: &CellRange) -> String {
    let player = game.player();
    let mut out = String::new();

    for i in (range.min.i..=range.max.i).rev() {
        for j in range.min.j..=range.max.j {
            let rc = game.cell(CellId::new(i, j));
            let glyph = if rc.cell == player.position {
                "@".to_owned()
            } else {
                rc.token.map_or_else(|| ".".to_owned(), |t| t.to_string())
            };
            let _ = write!(out, "{glyph:>3}");
        }
        out.push('\n');
    }

    let holding = player
        .inventory
        .map_or_else(|| "nothing".to_owned(), |t| t.to_string());
    let _ = write!(out, "at {} holding {holding}", player.position);
    if player.won {
        out.push_str(" -- you won!");
    }
    out
}

/// One-line description of an interaction outcome.
pub fn describe(outcome: &InteractionOutcome) -> String {
    match outcome {
        InteractionOutcome::PickedUp { cell, value } => format!("picked up {value} from {cell}"),
        InteractionOutcome::Placed { cell, value } => format!("placed {value} on {cell}"),
        InteractionOutcome::Crafted {
            cell,
            value,
            won: true,
        } => format!("crafted {value} on {cell} -- you won!"),
        InteractionOutcome::Crafted { cell, value, .. } => format!("crafted {value} on {cell}"),
        InteractionOutcome::Rejected(reason) => match reason {
            RejectionReason::TooFar { distance, radius } => {
                format!("too far: {distance} cells away, reach is {radius}")
            }
            RejectionReason::NothingToPickUp => "nothing to pick up there".to_owned(),
            RejectionReason::ValueMismatch { held, found } => {
                format!("cannot combine {held} with {found}")
            }
            RejectionReason::ValueOverflow => "that token cannot grow any further".to_owned(),
            RejectionReason::GameWon => "the game is over, type \"reset\" to play again".to_owned(),
        },
    }
}
