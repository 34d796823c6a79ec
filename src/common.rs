//! Common types for Melee at Sea: grid cells, sides, maneuvers and fleet
//! setup errors.

/// A grid cell as `(x, y)`. Signed so that candidate cells just past an edge
/// can be represented and rejected by bounds checks.
pub type Cell = (i32, i32);

/// One of the two opposing fleets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Team {
    /// The human side, moving first.
    A,
    /// The second human or the AI.
    B,
}

impl Team {
    /// The opposing side.
    pub fn opponent(self) -> Team {
        match self {
            Team::A => Team::B,
            Team::B => Team::A,
        }
    }
}

impl core::fmt::Display for Team {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Team::A => write!(f, "side A"),
            Team::B => write!(f, "side B"),
        }
    }
}

/// Translation of a ship by one cell, relative to its bow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Forward,
    Backward,
    /// One cell to the bow's left.
    Port,
    /// One cell to the bow's right.
    Starboard,
}

/// Quarter turn about the bow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotateDirection {
    Clockwise,
    CounterClockwise,
}

/// A single-step change of pose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Maneuver {
    Move(MoveDirection),
    Rotate(RotateDirection),
}

impl Maneuver {
    /// Every maneuver a ship can attempt in one step.
    pub const ALL: [Maneuver; 6] = [
        Maneuver::Move(MoveDirection::Forward),
        Maneuver::Move(MoveDirection::Backward),
        Maneuver::Move(MoveDirection::Port),
        Maneuver::Move(MoveDirection::Starboard),
        Maneuver::Rotate(RotateDirection::Clockwise),
        Maneuver::Rotate(RotateDirection::CounterClockwise),
    ];
}

/// Errors returned when assembling a fleet. These are fatal configuration
/// errors, reported once before a match starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FleetError {
    /// Ship length outside the supported range.
    InvalidLength(u8),
    /// A ship cell lies outside the grid.
    ShipOutOfBounds { ship: usize, cell: Cell },
    /// Two ships share a cell.
    ShipOverlaps { first: usize, second: usize, cell: Cell },
    /// A side was given no ships.
    EmptySide(Team),
}

impl core::fmt::Display for FleetError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FleetError::InvalidLength(len) => {
                write!(f, "Ship length {} is not supported", len)
            }
            FleetError::ShipOutOfBounds { ship, cell } => write!(
                f,
                "Ship {} is out of bounds at ({}, {})",
                ship, cell.0, cell.1
            ),
            FleetError::ShipOverlaps { first, second, cell } => write!(
                f,
                "Ships {} and {} overlap at ({}, {})",
                first, second, cell.0, cell.1
            ),
            FleetError::EmptySide(team) => write!(f, "No ships placed for {}", team),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FleetError {}
