//! Commonly used types and utilities for ease of import.

pub use crate::{
    CombatResolver, Fleet, GameMode, Grid, HeuristicOpponent, Maneuver, MoveDirection, Opponent,
    Orientation, Outcome, Placement, RotateDirection, Ship, ShipId, Team, TurnController,
    TurnPhase,
};

#[cfg(feature = "std")]
pub use crate::{cli::run_session, init_logging, ui::render_board};
