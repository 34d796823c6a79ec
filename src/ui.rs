#![cfg(feature = "std")]

//! Text rendering of the battle grid. Reads engine state only.

use std::collections::BTreeSet;
use std::fmt::Write;

use crate::common::{Cell, Team};
use crate::fleet::Fleet;
use crate::ship::{Orientation, Ship};
use crate::turn::{GameMode, TurnController, TurnPhase};

/// Column label for a grid x coordinate: `A` to `Z`, then `AA`, `AB`, ...
pub fn column_label(x: i32) -> String {
    let mut n = x.max(0) as u32 + 1;
    let mut label = Vec::new();
    while n > 0 {
        n -= 1;
        label.push(b'A' + (n % 26) as u8);
        n /= 26;
    }
    label.iter().rev().map(|&b| b as char).collect()
}

/// Format a cell the way players type it, e.g. `E6` for `(4, 5)`.
pub fn cell_to_string((x, y): Cell) -> String {
    format!("{}{}", column_label(x), y + 1)
}

/// Parse a cell typed as column letters plus 1-based row, e.g. `E6` or `AB3`.
pub fn parse_cell(input: &str) -> Result<Cell, String> {
    let input = input.trim();
    let split = input
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(input.len());
    let (letters, row_str) = input.split_at(split);
    if letters.is_empty() {
        return Err(match input.chars().next() {
            Some(c) => format!("Invalid column '{}' - must be a letter", c),
            None => "Empty cell - expected a column letter and row number (e.g. E6)".to_string(),
        });
    }
    let col = letters
        .bytes()
        .try_fold(0i32, |acc, b| {
            let digit = i32::from(b.to_ascii_uppercase() - b'A') + 1;
            acc.checked_mul(26)?.checked_add(digit)
        })
        .ok_or_else(|| format!("Column '{}' is too large", letters))?;
    let row: i32 = row_str
        .parse()
        .map_err(|_| format!("Invalid row '{}' - must be a number", row_str))?;
    if row < 1 {
        return Err("Row numbers start at 1".to_string());
    }
    Ok((col - 1, row - 1))
}

fn bow_glyph(orientation: Orientation) -> char {
    match orientation {
        Orientation::Up => '^',
        Orientation::Right => '>',
        Orientation::Down => 'v',
        Orientation::Left => '<',
    }
}

fn ship_glyph(ship: &Ship, index: usize) -> char {
    if !ship.is_alive() {
        return 'x';
    }
    if index == 0 {
        return bow_glyph(ship.orientation());
    }
    let armed = usize::from(ship.cannon_capacity()) >= index;
    match (ship.team(), armed, ship.selected) {
        (_, _, true) => '@',
        (Team::A, true, _) => 'A',
        (Team::A, false, _) => 'a',
        (Team::B, true, _) => 'B',
        (Team::B, false, _) => 'b',
    }
}

/// Draw the grid with ships and a highlighted set of cells (`*`). Row 1 is at
/// the bottom, matching the upward y axis.
pub fn render_board(fleet: &Fleet, highlight: &BTreeSet<Cell>) -> String {
    let grid = fleet.grid();
    let width = column_label(grid.cols() - 1).len();
    let mut out = String::new();
    let header: String = (0..grid.cols())
        .map(|x| format!(" {:>width$}", column_label(x)))
        .collect();
    let _ = writeln!(out, "    {}", header);
    for y in (0..grid.rows()).rev() {
        let _ = write!(out, " {:2} ", y + 1);
        for x in 0..grid.cols() {
            let glyph = glyph_at(fleet, (x, y))
                .unwrap_or(if highlight.contains(&(x, y)) { '*' } else { '.' });
            let _ = write!(out, " {:>width$}", glyph);
        }
        let _ = writeln!(out);
    }
    out
}

// Living ships are drawn over any wreck they sail across.
fn glyph_at(fleet: &Fleet, cell: Cell) -> Option<char> {
    let glyph_of = |ship: &Ship| {
        ship.occupied_cells()
            .iter()
            .position(|&c| c == cell)
            .map(|i| ship_glyph(ship, i))
    };
    let (living, wrecks): (Vec<&Ship>, Vec<&Ship>) =
        fleet.ships().iter().partition(|s| s.is_alive());
    living
        .into_iter()
        .chain(wrecks)
        .find_map(glyph_of)
}

/// One line describing a ship for the info panel.
pub fn describe_ship(ship: &Ship) -> String {
    format!(
        "Ship {} ({:?}, length {}) bow {} facing {:?}, cannons {}/{}{}",
        ship.id(),
        ship.team(),
        ship.length(),
        cell_to_string(ship.bow()),
        ship.orientation(),
        ship.cannon_capacity(),
        ship.max_cannon_capacity(),
        if ship.is_alive() { "" } else { " [SUNK]" },
    )
}

/// Key help for the current phase.
pub fn instructions(phase: TurnPhase) -> &'static [&'static str] {
    match phase {
        TurnPhase::SelectA | TurnPhase::SelectB => {
            &["<cell>: select ship (e.g. B3)", "end: end turn", "quit: leave"]
        }
        TurnPhase::MoveA | TurnPhase::MoveB => &[
            "w/s: forward/back",
            "port/starboard: side-step",
            "q/e or a/d: rotate ccw/cw",
            "ok: confirm move",
            "cancel: deselect",
        ],
        TurnPhase::FireA | TurnPhase::FireB => {
            &["fire: broadside", "fire <cell>: aimed shot", "end: end turn"]
        }
        TurnPhase::AiTurn | TurnPhase::GameOver => &[],
    }
}

/// Full screen: turn banner, board, active ship and help.
pub fn render_screen(controller: &TurnController) -> String {
    let mut out = String::new();
    let phase = controller.phase();
    let banner = match (controller.mode(), phase.team()) {
        (_, None) => "GAME OVER",
        (GameMode::TwoPlayer, Some(Team::A)) => "PLAYER 1",
        (GameMode::TwoPlayer, Some(Team::B)) => "PLAYER 2",
        (GameMode::SinglePlayer, Some(Team::A)) => "YOUR TURN",
        (GameMode::SinglePlayer, Some(Team::B)) => "ENEMY TURN",
    };
    let _ = writeln!(out, "== {} :: {} ==", banner, phase.label());
    out.push_str(&render_board(controller.fleet(), &controller.fire_zone_overlay()));
    if let Some(ship) = controller.active_ship().and_then(|id| controller.fleet().ship(id)) {
        let _ = writeln!(out, "{}", describe_ship(ship));
    }
    for line in instructions(phase) {
        let _ = writeln!(out, "  {}", line);
    }
    out
}
