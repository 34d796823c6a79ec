//! Plain event values emitted by the turn controller for presentation
//! collaborators (sound, message banner, log). The engine never waits on
//! them.

use alloc::string::String;
use core::fmt;

use crate::common::Team;
use crate::ship::ShipId;
use crate::turn::{GameMode, Outcome};

/// Something that just happened in the match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// A side's turn began.
    TurnStarted { team: Team, mode: GameMode },
    /// A ship moved or rotated.
    MoveSucceeded { ship: ShipId },
    /// A broadside was resolved.
    BroadsideResolved {
        ship: ShipId,
        hits: usize,
        destroyed: usize,
    },
    /// A shot at a single cell was resolved.
    ShotResolved {
        ship: ShipId,
        hit: Option<ShipId>,
        destroyed: bool,
    },
    /// An AI log line was revealed.
    AiAction { line: String },
    /// The match ended.
    GameOver { outcome: Outcome },
}

impl GameEvent {
    /// Event-level sound cue name, if the event has one.
    pub fn sound_cue(&self) -> Option<&'static str> {
        match self {
            GameEvent::MoveSucceeded { .. } => Some("move"),
            GameEvent::BroadsideResolved { destroyed, .. } if *destroyed > 0 => Some("destroy"),
            GameEvent::BroadsideResolved { hits, .. } if *hits > 0 => Some("hit"),
            GameEvent::BroadsideResolved { .. } => Some("fire"),
            GameEvent::ShotResolved { destroyed: true, .. } => Some("destroy"),
            GameEvent::ShotResolved { hit: Some(_), .. } => Some("hit"),
            GameEvent::ShotResolved { .. } => Some("fire"),
            _ => None,
        }
    }
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEvent::TurnStarted { team, mode } => match (mode, team) {
                (GameMode::TwoPlayer, Team::A) => write!(f, "PLAYER 1'S TURN!"),
                (GameMode::TwoPlayer, Team::B) => write!(f, "PLAYER 2'S TURN!"),
                (GameMode::SinglePlayer, Team::A) => write!(f, "YOUR TURN!"),
                (GameMode::SinglePlayer, Team::B) => write!(f, "ENEMY TURN"),
            },
            GameEvent::MoveSucceeded { .. } => write!(f, "SHIP MOVED"),
            GameEvent::BroadsideResolved { hits: 0, .. } => write!(f, "NO TARGETS IN RANGE!"),
            GameEvent::BroadsideResolved { destroyed, .. } if *destroyed > 0 => {
                write!(f, "{} SHIP(S) DESTROYED!", destroyed)
            }
            GameEvent::BroadsideResolved { hits, .. } => write!(f, "{} HIT(S)!", hits),
            GameEvent::ShotResolved { hit: None, .. } => write!(f, "MISS!"),
            GameEvent::ShotResolved { destroyed: true, .. } => write!(f, "SHIP DESTROYED!"),
            GameEvent::ShotResolved { .. } => write!(f, "HIT!"),
            GameEvent::AiAction { line } => write!(f, "{}", line),
            GameEvent::GameOver { outcome } => write!(f, "GAME OVER - {}", outcome),
        }
    }
}
