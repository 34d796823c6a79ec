//! Ship definitions: orientation, pose and the movement legality checks that
//! keep every living ship in bounds and clear of the others.

use alloc::vec::Vec;
use core::fmt;

use crate::common::{Cell, MoveDirection, RotateDirection, Team};
use crate::grid::Grid;

/// Heading of a ship's bow, clockwise from up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    Up,
    Right,
    Down,
    Left,
}

impl Orientation {
    /// Heading in degrees, clockwise from up.
    pub fn degrees(self) -> u16 {
        match self {
            Orientation::Up => 0,
            Orientation::Right => 90,
            Orientation::Down => 180,
            Orientation::Left => 270,
        }
    }

    /// Heading for a multiple of 90 degrees, if any.
    pub fn from_degrees(degrees: i32) -> Option<Self> {
        match degrees.rem_euclid(360) {
            0 => Some(Orientation::Up),
            90 => Some(Orientation::Right),
            180 => Some(Orientation::Down),
            270 => Some(Orientation::Left),
            _ => None,
        }
    }

    /// Unit vector pointing from the body towards the bow.
    pub fn vector(self) -> (i32, i32) {
        match self {
            Orientation::Up => (0, 1),
            Orientation::Right => (1, 0),
            Orientation::Down => (0, -1),
            Orientation::Left => (-1, 0),
        }
    }

    pub fn is_vertical(self) -> bool {
        matches!(self, Orientation::Up | Orientation::Down)
    }

    pub fn clockwise(self) -> Self {
        match self {
            Orientation::Up => Orientation::Right,
            Orientation::Right => Orientation::Down,
            Orientation::Down => Orientation::Left,
            Orientation::Left => Orientation::Up,
        }
    }

    pub fn counter_clockwise(self) -> Self {
        match self {
            Orientation::Up => Orientation::Left,
            Orientation::Left => Orientation::Down,
            Orientation::Down => Orientation::Right,
            Orientation::Right => Orientation::Up,
        }
    }

    /// Heading after a quarter turn.
    pub fn rotated(self, direction: RotateDirection) -> Self {
        match direction {
            RotateDirection::Clockwise => self.clockwise(),
            RotateDirection::CounterClockwise => self.counter_clockwise(),
        }
    }

    /// The two broadside directions, perpendicular to the heading.
    pub fn lateral_vectors(self) -> [(i32, i32); 2] {
        if self.is_vertical() {
            [(-1, 0), (1, 0)]
        } else {
            [(0, -1), (0, 1)]
        }
    }
}

/// Mutable placement of a ship: bow cell plus heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Pose {
    pub bow: Cell,
    pub orientation: Orientation,
}

impl Pose {
    pub const fn new(bow: Cell, orientation: Orientation) -> Self {
        Self { bow, orientation }
    }

    /// Cells covered by a ship of `length` in this pose, bow first.
    pub fn cells(self, length: u8) -> impl Iterator<Item = Cell> {
        let (dx, dy) = self.orientation.vector();
        let (x, y) = self.bow;
        (0..i32::from(length)).map(move |i| (x - dx * i, y - dy * i))
    }

    /// Pose after translating one cell in `direction`.
    pub fn moved(self, direction: MoveDirection) -> Self {
        let (fx, fy) = self.orientation.vector();
        // Port is the bow's left: forward rotated a quarter turn counter-clockwise.
        let (dx, dy) = match direction {
            MoveDirection::Forward => (fx, fy),
            MoveDirection::Backward => (-fx, -fy),
            MoveDirection::Port => (-fy, fx),
            MoveDirection::Starboard => (fy, -fx),
        };
        self.translated(dx, dy)
    }

    /// Pose after translating by an arbitrary offset.
    pub fn translated(self, dx: i32, dy: i32) -> Self {
        Self {
            bow: (self.bow.0 + dx, self.bow.1 + dy),
            ..self
        }
    }

    /// Pose after a quarter turn about the bow.
    pub fn rotated(self, direction: RotateDirection) -> Self {
        Self {
            orientation: self.orientation.rotated(direction),
            ..self
        }
    }
}

/// Index of a ship inside its [`Fleet`](crate::Fleet). Stable for the whole
/// match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ShipId(pub usize);

impl fmt::Display for ShipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A warship: a rigid line of `length` cells trailing behind its bow.
///
/// Cannon capacity doubles as hit points. Every body segment (every cell but
/// the bow) carries one cannon per side while capacity lasts; the ship sinks
/// when capacity reaches zero. Sunk ships stay in the roster for display but
/// no longer block movement or draw fire.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Ship {
    id: ShipId,
    team: Team,
    length: u8,
    pose: Pose,
    cannon_capacity: u8,
    pub has_moved: bool,
    pub has_fired: bool,
    pub selected: bool,
}

impl Ship {
    /// Build a ship at full capacity. Length validation happens when the
    /// ship joins a fleet.
    pub fn new(id: ShipId, team: Team, length: u8, pose: Pose) -> Self {
        Ship {
            id,
            team,
            length,
            pose,
            cannon_capacity: length.saturating_sub(1),
            has_moved: false,
            has_fired: false,
            selected: false,
        }
    }

    pub fn id(&self) -> ShipId {
        self.id
    }

    pub fn team(&self) -> Team {
        self.team
    }

    pub fn length(&self) -> u8 {
        self.length
    }

    pub fn pose(&self) -> Pose {
        self.pose
    }

    pub fn bow(&self) -> Cell {
        self.pose.bow
    }

    pub fn orientation(&self) -> Orientation {
        self.pose.orientation
    }

    /// Remaining cannons per side.
    pub fn cannon_capacity(&self) -> u8 {
        self.cannon_capacity
    }

    /// Cannons per side of an undamaged ship.
    pub fn max_cannon_capacity(&self) -> u8 {
        self.length.saturating_sub(1)
    }

    pub fn is_alive(&self) -> bool {
        self.cannon_capacity > 0
    }

    /// Cannons across both broadsides.
    pub fn total_cannons(&self) -> u8 {
        self.cannon_capacity * 2
    }

    /// Occupied cells, bow first.
    pub fn occupied_cells(&self) -> Vec<Cell> {
        self.pose.cells(self.length).collect()
    }

    /// Cells this ship would cover in `pose`.
    pub fn cells_at(&self, pose: Pose) -> Vec<Cell> {
        pose.cells(self.length).collect()
    }

    /// `true` if this ship covers `cell`.
    pub fn occupies(&self, cell: Cell) -> bool {
        self.pose.cells(self.length).any(|c| c == cell)
    }

    /// `true` if every cell is on the grid and none collides with another
    /// living ship. A ship never collides with itself.
    pub fn can_occupy(&self, cells: &[Cell], grid: &Grid, all_ships: &[Ship]) -> bool {
        if !cells.iter().all(|&c| grid.contains(c)) {
            return false;
        }
        all_ships
            .iter()
            .filter(|other| other.id != self.id && other.is_alive())
            .all(|other| !cells.iter().any(|&c| other.occupies(c)))
    }

    /// Pose reached by moving one cell, if it is legal.
    pub fn try_move(&self, direction: MoveDirection, grid: &Grid, all_ships: &[Ship]) -> Option<Pose> {
        self.legal_pose(self.pose.moved(direction), grid, all_ships)
    }

    /// Pose reached by translating `(dx, dy)` in grid axes, if it is legal.
    pub fn try_move_absolute(&self, dx: i32, dy: i32, grid: &Grid, all_ships: &[Ship]) -> Option<Pose> {
        self.legal_pose(self.pose.translated(dx, dy), grid, all_ships)
    }

    /// Pose reached by a quarter turn about the bow, if it is legal.
    pub fn try_rotate(&self, direction: RotateDirection, grid: &Grid, all_ships: &[Ship]) -> Option<Pose> {
        self.legal_pose(self.pose.rotated(direction), grid, all_ships)
    }

    fn legal_pose(&self, pose: Pose, grid: &Grid, all_ships: &[Ship]) -> Option<Pose> {
        // Wrecks stay where they sank.
        if !self.is_alive() {
            return None;
        }
        let cells = self.cells_at(pose);
        self.can_occupy(&cells, grid, all_ships).then_some(pose)
    }

    pub(crate) fn set_pose(&mut self, pose: Pose) {
        self.pose = pose;
    }

    /// Remove `amount` cannons, stopping at zero. Returns `true` once the
    /// ship is sunk; further damage changes nothing.
    pub fn take_damage(&mut self, amount: u8) -> bool {
        self.cannon_capacity = self.cannon_capacity.saturating_sub(amount);
        self.cannon_capacity == 0
    }

    /// Clear the per-turn action flags.
    pub fn reset_turn_flags(&mut self) {
        self.has_moved = false;
        self.has_fired = false;
        self.selected = false;
    }

    /// `true` once the ship has moved or fired this turn.
    pub fn has_acted(&self) -> bool {
        self.has_moved || self.has_fired
    }
}

impl fmt::Debug for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ship {{ id: {}, team: {:?}, length: {}, bow: ({}, {}), orientation: {:?}, cannons: {}/{} }}",
            self.id,
            self.team,
            self.length,
            self.pose.bow.0,
            self.pose.bow.1,
            self.pose.orientation,
            self.cannon_capacity,
            self.max_cannon_capacity(),
        )
    }
}
