//! Broadside combat: fire zones, target acquisition and damage resolution.
//!
//! Two zones are computed here and they must not be confused:
//!
//! - the **fire zone** ([`CombatResolver::side_fire_zones`]) is the exact set
//!   of cells a ship can hit right now, one cell abeam of each armed body
//!   segment;
//! - the **threat zone** ([`CombatResolver::threat_zone`]) projects several
//!   cells abeam of every segment and is only a risk estimate for AI scoring.
//!
//! Only the fire zone ever resolves damage.

use alloc::collections::BTreeSet;
use alloc::vec::Vec;

use log::{debug, info};

use crate::common::Cell;
use crate::fleet::Fleet;
use crate::grid::Grid;
use crate::ship::{Ship, ShipId};

/// An enemy ship inside an attacker's fire zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub ship: ShipId,
    /// The target's cells that lie in the fire zone.
    pub hit_cells: Vec<Cell>,
}

/// Damage dealt to one ship.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub ship: ShipId,
    /// `true` if this hit sank the ship.
    pub destroyed: bool,
}

/// Result of firing at a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShotOutcome {
    /// Ship that took the shot, `None` on a miss or an out-of-zone cell.
    pub hit: Option<ShipId>,
    pub destroyed: bool,
}

impl ShotOutcome {
    const MISS: ShotOutcome = ShotOutcome {
        hit: None,
        destroyed: false,
    };
}

/// Resolves fire between ships on one grid.
#[derive(Debug, Clone, Copy)]
pub struct CombatResolver {
    grid: Grid,
}

impl CombatResolver {
    pub fn new(grid: Grid) -> Self {
        Self { grid }
    }

    /// Cells the ship can hit now.
    ///
    /// Only body segments carry cannons. Segments are armed from the bow
    /// outward, so with capacity `c` the segments `1..=c` fire and the ones
    /// nearer the stern have been silenced. Each armed segment covers the one
    /// adjacent cell on either beam.
    pub fn side_fire_zones(&self, ship: &Ship) -> BTreeSet<Cell> {
        let mut zone = BTreeSet::new();
        if !ship.is_alive() {
            return zone;
        }
        let armed = usize::from(ship.cannon_capacity().min(ship.length().saturating_sub(1)));
        let beams = ship.orientation().lateral_vectors();
        for (x, y) in ship.pose().cells(ship.length()).skip(1).take(armed) {
            for (dx, dy) in beams {
                let cell = (x + dx, y + dy);
                if self.grid.contains(cell) {
                    zone.insert(cell);
                }
            }
        }
        zone
    }

    /// Cells within `max_range` abeam of any of the ship's cells, bow
    /// included and ignoring damage. For risk estimates only; never use it to
    /// resolve hits.
    pub fn threat_zone(&self, ship: &Ship, max_range: i32) -> BTreeSet<Cell> {
        let mut zone = BTreeSet::new();
        if !ship.is_alive() {
            return zone;
        }
        let beams = ship.orientation().lateral_vectors();
        for (x, y) in ship.pose().cells(ship.length()) {
            for (dx, dy) in beams {
                for distance in 1..=max_range {
                    let cell = (x + dx * distance, y + dy * distance);
                    if self.grid.contains(cell) {
                        zone.insert(cell);
                    }
                }
            }
        }
        zone
    }

    /// Living enemy ships with at least one cell in the attacker's fire zone,
    /// in roster order, each listed once.
    pub fn targets_in_range(&self, attacker: &Ship, all_ships: &[Ship]) -> Vec<Target> {
        let zone = self.side_fire_zones(attacker);
        if zone.is_empty() {
            return Vec::new();
        }
        all_ships
            .iter()
            .filter(|s| s.team() != attacker.team() && s.is_alive())
            .filter_map(|s| {
                let hit_cells: Vec<Cell> = s
                    .occupied_cells()
                    .into_iter()
                    .filter(|c| zone.contains(c))
                    .collect();
                (!hit_cells.is_empty()).then(|| Target {
                    ship: s.id(),
                    hit_cells,
                })
            })
            .collect()
    }

    /// Fire both broadsides. Every ship in range takes exactly one point of
    /// damage, however many of its cells are covered. Returns nothing if the
    /// attacker is unknown or has no cannons left.
    pub fn fire_broadside(&self, attacker: ShipId, fleet: &mut Fleet) -> Vec<Hit> {
        let targets = match fleet.ship(attacker) {
            Some(ship) if ship.cannon_capacity() > 0 => self.targets_in_range(ship, fleet.ships()),
            _ => return Vec::new(),
        };
        let hits: Vec<Hit> = targets
            .into_iter()
            .filter_map(|t| apply_hit(fleet, t.ship))
            .collect();
        info!(
            "ship {} fired a broadside: {} hit(s), {} destroyed",
            attacker,
            hits.len(),
            hits.iter().filter(|h| h.destroyed).count()
        );
        hits
    }

    /// Fire at one cell. Cells outside the attacker's fire zone, and cells
    /// holding no living enemy, are misses.
    pub fn fire_single(&self, attacker: ShipId, target: Cell, fleet: &mut Fleet) -> ShotOutcome {
        let Some(ship) = fleet.ship(attacker) else {
            return ShotOutcome::MISS;
        };
        if !self.side_fire_zones(ship).contains(&target) {
            debug!("ship {} cannot reach {:?}", attacker, target);
            return ShotOutcome::MISS;
        }
        let team = ship.team();
        let victim = fleet
            .ships()
            .iter()
            .find(|s| s.team() != team && s.is_alive() && s.occupies(target))
            .map(|s| s.id());
        match victim.and_then(|id| apply_hit(fleet, id)) {
            Some(hit) => {
                info!("ship {} hit ship {} at {:?}", attacker, hit.ship, target);
                ShotOutcome {
                    hit: Some(hit.ship),
                    destroyed: hit.destroyed,
                }
            }
            None => ShotOutcome::MISS,
        }
    }
}

fn apply_hit(fleet: &mut Fleet, id: ShipId) -> Option<Hit> {
    let ship = fleet.ship_mut(id)?;
    debug_assert!(ship.is_alive(), "damage applied to sunk ship {}", id);
    if !ship.is_alive() {
        return None;
    }
    let destroyed = ship.take_damage(1);
    if destroyed {
        info!("ship {} sunk", id);
    }
    Some(Hit { ship: id, destroyed })
}
