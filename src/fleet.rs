//! The match roster: every ship of both sides plus the grid they sail on.
//!
//! Membership is fixed when the fleet is built; only ship state changes
//! afterwards. All collision and targeting logic receives the roster
//! explicitly.

use alloc::vec::Vec;
use core::ops::Deref;

use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::common::{Cell, FleetError, Maneuver, MoveDirection, RotateDirection, Team};
use crate::config::{roster_lengths, MAX_SHIP_LENGTH, MIN_SHIP_LENGTH};
use crate::grid::Grid;
use crate::ship::{Orientation, Pose, Ship, ShipId};

/// Initial placement of one ship, as produced by fleet setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub team: Team,
    pub length: u8,
    pub pose: Pose,
}

impl Placement {
    pub const fn new(team: Team, length: u8, bow: Cell, orientation: Orientation) -> Self {
        Self {
            team,
            length,
            pose: Pose::new(bow, orientation),
        }
    }
}

/// Both sides' ships on a shared grid.
#[derive(Debug, Clone)]
pub struct Fleet {
    grid: Grid,
    ships: Vec<Ship>,
}

impl Fleet {
    /// Validate the placements and build the roster. Ship ids follow the
    /// placement order.
    pub fn new(
        grid: Grid,
        placements: impl IntoIterator<Item = Placement>,
    ) -> Result<Self, FleetError> {
        let ships: Vec<Ship> = placements
            .into_iter()
            .enumerate()
            .map(|(i, p)| Ship::new(ShipId(i), p.team, p.length, p.pose))
            .collect();

        for ship in &ships {
            if !(MIN_SHIP_LENGTH..=MAX_SHIP_LENGTH).contains(&ship.length()) {
                return Err(FleetError::InvalidLength(ship.length()));
            }
            if let Some(cell) = ship.occupied_cells().into_iter().find(|&c| !grid.contains(c)) {
                return Err(FleetError::ShipOutOfBounds {
                    ship: ship.id().0,
                    cell,
                });
            }
        }
        for (i, first) in ships.iter().enumerate() {
            for second in &ships[i + 1..] {
                if let Some(cell) = first
                    .occupied_cells()
                    .into_iter()
                    .find(|&c| second.occupies(c))
                {
                    return Err(FleetError::ShipOverlaps {
                        first: first.id().0,
                        second: second.id().0,
                        cell,
                    });
                }
            }
        }
        for team in [Team::A, Team::B] {
            if !ships.iter().any(|s| s.team() == team) {
                return Err(FleetError::EmptySide(team));
            }
        }
        Ok(Fleet { grid, ships })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Every ship, sunk or afloat, in id order.
    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    pub fn ship(&self, id: ShipId) -> Option<&Ship> {
        self.ships.get(id.0)
    }

    pub(crate) fn ship_mut(&mut self, id: ShipId) -> Option<&mut Ship> {
        self.ships.get_mut(id.0)
    }

    /// Ships of one side, sunk included.
    pub fn side(&self, team: Team) -> impl Iterator<Item = &Ship> + '_ {
        self.ships.iter().filter(move |s| s.team() == team)
    }

    /// Living ships of one side.
    pub fn living(&self, team: Team) -> impl Iterator<Item = &Ship> + '_ {
        self.side(team).filter(|s| s.is_alive())
    }

    pub fn has_living(&self, team: Team) -> bool {
        self.living(team).next().is_some()
    }

    /// The living ship covering `cell`, if any.
    pub fn ship_at(&self, cell: Cell) -> Option<&Ship> {
        self.ships.iter().find(|s| s.is_alive() && s.occupies(cell))
    }

    /// Translate a ship one cell. Returns `false` and leaves the ship in
    /// place if the new cells are off the grid or blocked. Does not touch
    /// the ship's `has_moved` flag.
    pub fn move_ship(&mut self, id: ShipId, direction: MoveDirection) -> bool {
        let Some(ship) = self.ship(id) else {
            return false;
        };
        let pose = ship.try_move(direction, &self.grid, &self.ships);
        self.commit(id, pose)
    }

    /// Translate a ship by a grid-axis offset, regardless of its heading.
    pub fn move_ship_absolute(&mut self, id: ShipId, dx: i32, dy: i32) -> bool {
        let Some(ship) = self.ship(id) else {
            return false;
        };
        let pose = ship.try_move_absolute(dx, dy, &self.grid, &self.ships);
        self.commit(id, pose)
    }

    /// Turn a ship a quarter turn about its bow. Returns `false` and leaves
    /// the ship unchanged if the swept cells are off the grid or blocked.
    pub fn rotate_ship(&mut self, id: ShipId, direction: RotateDirection) -> bool {
        let Some(ship) = self.ship(id) else {
            return false;
        };
        let pose = ship.try_rotate(direction, &self.grid, &self.ships);
        self.commit(id, pose)
    }

    /// Apply a move or rotation.
    pub fn maneuver(&mut self, id: ShipId, maneuver: Maneuver) -> bool {
        match maneuver {
            Maneuver::Move(direction) => self.move_ship(id, direction),
            Maneuver::Rotate(direction) => self.rotate_ship(id, direction),
        }
    }

    fn commit(&mut self, id: ShipId, pose: Option<Pose>) -> bool {
        match (pose, self.ship_mut(id)) {
            (Some(pose), Some(ship)) => {
                debug!("ship {} -> bow {:?} facing {:?}", id, pose.bow, pose.orientation);
                ship.set_pose(pose);
                true
            }
            _ => false,
        }
    }

    /// Apply `maneuver` on trial. The returned guard derefs to the fleet in
    /// its trial state and restores the ship's pose when dropped. Returns
    /// `None`, with nothing changed, if the maneuver is illegal.
    pub fn trial(&mut self, id: ShipId, maneuver: Maneuver) -> Option<Trial<'_>> {
        let saved = self.ship(id)?.pose();
        if !self.maneuver(id, maneuver) {
            return None;
        }
        Some(Trial {
            fleet: self,
            id,
            saved,
        })
    }

    /// Clear `has_moved`, `has_fired` and `selected` on every ship of a side.
    pub fn reset_turn_flags(&mut self, team: Team) {
        for ship in self.ships.iter_mut().filter(|s| s.team() == team) {
            ship.reset_turn_flags();
        }
    }

    /// Drop the selection highlight from every ship.
    pub fn clear_selection(&mut self) {
        for ship in &mut self.ships {
            ship.selected = false;
        }
    }

    /// Lay out the standard roster: side A on the left edge facing right,
    /// side B on the right edge facing left, on shuffled rows with shuffled
    /// lengths.
    pub fn standard<R: Rng + ?Sized>(grid: Grid, rng: &mut R) -> Result<Self, FleetError> {
        let mut placements = Vec::new();
        for team in [Team::A, Team::B] {
            let mut lengths: Vec<u8> = roster_lengths().collect();
            lengths.shuffle(rng);
            let mut rows: Vec<i32> = (0..grid.rows() - 1).step_by(2).collect();
            rows.shuffle(rng);
            if rows.is_empty() {
                return Err(FleetError::EmptySide(team));
            }
            for (i, &length) in lengths.iter().enumerate() {
                let y = rows[i % rows.len()];
                let placement = match team {
                    Team::A => {
                        Placement::new(team, length, (i32::from(length) - 1, y), Orientation::Right)
                    }
                    Team::B => Placement::new(
                        team,
                        length,
                        (grid.cols() - i32::from(length), y),
                        Orientation::Left,
                    ),
                };
                placements.push(placement);
            }
        }
        Fleet::new(grid, placements)
    }
}

/// A maneuver applied on trial. Read the fleet through it; dropping it rolls
/// the ship back to its saved pose.
pub struct Trial<'a> {
    fleet: &'a mut Fleet,
    id: ShipId,
    saved: Pose,
}

impl Trial<'_> {
    /// The ship under trial.
    pub fn ship(&self) -> &Ship {
        &self.fleet.ships[self.id.0]
    }
}

impl Deref for Trial<'_> {
    type Target = Fleet;

    fn deref(&self) -> &Fleet {
        &*self.fleet
    }
}

impl Drop for Trial<'_> {
    fn drop(&mut self) {
        if let Some(ship) = self.fleet.ship_mut(self.id) {
            ship.set_pose(self.saved);
        }
    }
}
