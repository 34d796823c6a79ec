#![cfg(feature = "std")]

//! Interactive text session: translates typed commands into turn controller
//! operations and prints the resulting screen and messages.

use std::io::{BufRead, Write};
use std::thread;
use std::time::Duration;

use crate::common::{Cell, MoveDirection, RotateDirection};
use crate::events::GameEvent;
use crate::turn::{Outcome, TurnController, TurnPhase};
use crate::ui::{cell_to_string, parse_cell, render_screen};

/// Granularity of the AI reveal timer in paced sessions.
const REVEAL_STEP: Duration = Duration::from_millis(100);

/// One typed command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Select(Cell),
    Move(MoveDirection),
    Rotate(RotateDirection),
    Confirm,
    Fire,
    FireAt(Cell),
    EndTurn,
    Cancel,
    Show,
    Help,
    Quit,
}

/// Parse a command line. A bare cell selects the ship on it.
pub fn parse_command(input: &str) -> Result<Command, String> {
    let mut words = input.split_whitespace();
    let first = words
        .next()
        .ok_or("Empty command - type 'help' for a list")?
        .to_ascii_lowercase();
    let arg = words.next();
    let command = match (first.as_str(), arg) {
        ("w" | "forward", None) => Command::Move(MoveDirection::Forward),
        ("s" | "back" | "backward", None) => Command::Move(MoveDirection::Backward),
        ("port", None) => Command::Move(MoveDirection::Port),
        ("starboard", None) => Command::Move(MoveDirection::Starboard),
        ("q" | "a" | "ccw", None) => Command::Rotate(RotateDirection::CounterClockwise),
        ("e" | "d" | "cw", None) => Command::Rotate(RotateDirection::Clockwise),
        ("ok" | "confirm", None) => Command::Confirm,
        ("f" | "fire", None) => Command::Fire,
        ("f" | "fire", Some(cell)) => Command::FireAt(parse_cell(cell)?),
        ("end" | "skip", None) => Command::EndTurn,
        ("cancel" | "tab", None) => Command::Cancel,
        ("show", None) => Command::Show,
        ("help" | "?", None) => Command::Help,
        ("quit" | "exit", None) => Command::Quit,
        ("select", Some(cell)) => Command::Select(parse_cell(cell)?),
        (other, None) => Command::Select(
            parse_cell(other).map_err(|_| format!("Unknown command '{}'", other))?,
        ),
        (other, Some(_)) => return Err(format!("Unknown command '{}'", other)),
    };
    if words.next().is_some() {
        return Err("Too many arguments".to_string());
    }
    Ok(command)
}

/// Session behaviour.
#[derive(Debug, Clone, Copy)]
pub struct SessionOptions {
    /// Sleep through the AI reveal delays instead of printing lines at once.
    pub pace_ai: bool,
}

/// Run a session until the match ends or the player quits. Returns the
/// outcome, or `None` if the player quit first.
pub fn run_session<R: BufRead, W: Write>(
    controller: &mut TurnController,
    options: SessionOptions,
    mut input: R,
    mut output: W,
) -> anyhow::Result<Option<Outcome>> {
    write!(output, "{}", render_screen(controller))?;
    flush_events(controller, &mut output)?;
    loop {
        if controller.phase() == TurnPhase::AiTurn {
            play_ai_turn(controller, options, &mut output)?;
            write!(output, "{}", render_screen(controller))?;
            flush_events(controller, &mut output)?;
            continue;
        }
        if let Some(outcome) = controller.outcome() {
            writeln!(output, "*** {} ***", outcome)?;
            return Ok(Some(outcome));
        }

        write!(output, "> ")?;
        output.flush()?;
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        if line.trim().is_empty() {
            continue;
        }
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(e) => {
                writeln!(output, "{}", e)?;
                continue;
            }
        };
        if command == Command::Quit {
            return Ok(None);
        }
        let accepted = apply(controller, command, &mut output)?;
        if !accepted {
            writeln!(output, "Not possible right now.")?;
        }
        flush_events(controller, &mut output)?;
        if accepted && command != Command::Help {
            write!(output, "{}", render_screen(controller))?;
        }
    }
}

fn apply<W: Write>(controller: &mut TurnController, command: Command, output: &mut W) -> anyhow::Result<bool> {
    let accepted = match command {
        Command::Select(cell) => controller.select_at(cell),
        Command::Move(direction) => controller.move_active(direction),
        Command::Rotate(direction) => controller.rotate_active(direction),
        Command::Confirm => controller.confirm_move(),
        Command::Fire => controller.fire_broadside().is_some(),
        Command::FireAt(cell) => match controller.fire_at(cell) {
            Some(_) => true,
            None if !controller.phase().is_fire() => false,
            None => {
                writeln!(output, "{} is not in the fire zone.", cell_to_string(cell))?;
                return Ok(true);
            }
        },
        Command::EndTurn => controller.end_turn(),
        Command::Cancel => controller.deselect(),
        Command::Show => true,
        Command::Help => {
            for line in crate::ui::instructions(controller.phase()) {
                writeln!(output, "  {}", line)?;
            }
            true
        }
        Command::Quit => true,
    };
    Ok(accepted)
}

fn play_ai_turn<W: Write>(controller: &mut TurnController, options: SessionOptions, output: &mut W) -> anyhow::Result<()> {
    writeln!(output, "Enemy is thinking...")?;
    if !options.pace_ai {
        for line in controller.finish_ai_turn() {
            writeln!(output, "{}", line)?;
        }
        return Ok(());
    }
    while controller.phase() == TurnPhase::AiTurn {
        output.flush()?;
        thread::sleep(REVEAL_STEP);
        if let Some(line) = controller.tick(REVEAL_STEP) {
            writeln!(output, "{}", line)?;
        }
    }
    Ok(())
}

fn flush_events<W: Write>(controller: &mut TurnController, output: &mut W) -> anyhow::Result<()> {
    for event in controller.drain_events() {
        // AI lines were already printed as they were revealed; moves show on
        // the redrawn board.
        if !matches!(event, GameEvent::AiAction { .. } | GameEvent::MoveSucceeded { .. }) {
            writeln!(output, "{}", event)?;
        }
    }
    Ok(())
}
