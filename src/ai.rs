// Heuristic opponent: one ship acts per activation, chosen by a small
// priority scan and a positional score.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use log::debug;
use rand::rngs::SmallRng;
use rand::seq::{IndexedRandom, SliceRandom};

use crate::combat::{CombatResolver, Hit};
use crate::common::{Maneuver, Team};
use crate::config::{
    PENALTY_PER_EXPOSED_CELL, PROXIMITY_HORIZON, SCORE_PER_TARGET_CELL, THREAT_RANGE,
};
use crate::fleet::Fleet;
use crate::ship::{Ship, ShipId};

/// What the acting ship did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiAction {
    Fire,
    Maneuver(Maneuver),
}

/// Outcome of one AI activation. The action has already been applied to the
/// fleet; `lines` describe it for display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AiTurnReport {
    pub ship: Option<ShipId>,
    pub action: Option<AiAction>,
    pub hits: Vec<Hit>,
    pub lines: Vec<String>,
}

/// A side controlled by the computer.
pub trait Opponent {
    /// Act for `team` once, mutating the fleet only through the same move,
    /// rotate and fire operations a human uses.
    fn take_turn(
        &mut self,
        team: Team,
        fleet: &mut Fleet,
        combat: &CombatResolver,
        rng: &mut SmallRng,
    ) -> AiTurnReport;
}

/// Greedy one-ship-per-turn AI.
///
/// Ships are scanned in shuffled order. A ship with an enemy in its fire zone
/// fires; failing that, the first ship with a non-negative best maneuver
/// takes it; failing that, a random ship takes its best legal maneuver.
#[derive(Debug, Clone)]
pub struct HeuristicOpponent {
    threat_range: i32,
}

impl HeuristicOpponent {
    pub fn new() -> Self {
        Self {
            threat_range: THREAT_RANGE,
        }
    }

    /// Score the ship's current pose; higher is better.
    ///
    /// - `+10` for every enemy cell inside its fire zone,
    /// - `-5` for every own cell inside each living enemy's threat zone,
    /// - `+max(0, 10 - d)` for each living enemy at bow-to-bow Manhattan
    ///   distance `d`.
    pub fn evaluate_position(&self, fleet: &Fleet, combat: &CombatResolver, ship: &Ship) -> i32 {
        let mut score = 0;

        for target in combat.targets_in_range(ship, fleet.ships()) {
            score += target.hit_cells.len() as i32 * SCORE_PER_TARGET_CELL;
        }

        let own_cells = ship.occupied_cells();
        for enemy in fleet.living(ship.team().opponent()) {
            let threat = combat.threat_zone(enemy, self.threat_range);
            let exposed = own_cells.iter().filter(|c| threat.contains(c)).count() as i32;
            score -= exposed * PENALTY_PER_EXPOSED_CELL;

            let (sx, sy) = ship.bow();
            let (ex, ey) = enemy.bow();
            let distance = (sx - ex).abs() + (sy - ey).abs();
            score += (PROXIMITY_HORIZON - distance).max(0);
        }

        score
    }

    /// Best legal maneuver for `id` and its score. Each candidate is applied
    /// on trial and rolled back before the next is tried, so the fleet is
    /// unchanged on return. Ties go to the first candidate in shuffled order.
    pub fn best_maneuver(
        &self,
        fleet: &mut Fleet,
        combat: &CombatResolver,
        id: ShipId,
        rng: &mut SmallRng,
    ) -> Option<(Maneuver, i32)> {
        let mut candidates = Maneuver::ALL;
        candidates.shuffle(rng);

        let mut best: Option<(Maneuver, i32)> = None;
        for maneuver in candidates {
            let Some(trial) = fleet.trial(id, maneuver) else {
                continue;
            };
            let score = self.evaluate_position(&trial, combat, trial.ship());
            drop(trial);
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((maneuver, score));
            }
        }
        best
    }

    fn choose(
        &self,
        team: Team,
        fleet: &mut Fleet,
        combat: &CombatResolver,
        rng: &mut SmallRng,
    ) -> Option<(ShipId, AiAction)> {
        let mut alive: Vec<ShipId> = fleet.living(team).map(|s| s.id()).collect();
        alive.shuffle(rng);

        let mut move_candidate = None;
        for &id in &alive {
            let ship = fleet.ship(id)?;
            if !combat.targets_in_range(ship, fleet.ships()).is_empty() {
                return Some((id, AiAction::Fire));
            }
            if move_candidate.is_none() {
                if let Some((maneuver, score)) = self.best_maneuver(fleet, combat, id, rng) {
                    if score >= 0 {
                        move_candidate = Some((id, AiAction::Maneuver(maneuver)));
                    }
                }
            }
        }
        if move_candidate.is_some() {
            return move_candidate;
        }

        let &id = alive.choose(rng)?;
        self.best_maneuver(fleet, combat, id, rng)
            .map(|(maneuver, _)| (id, AiAction::Maneuver(maneuver)))
    }
}

impl Default for HeuristicOpponent {
    fn default() -> Self {
        Self::new()
    }
}

impl Opponent for HeuristicOpponent {
    fn take_turn(
        &mut self,
        team: Team,
        fleet: &mut Fleet,
        combat: &CombatResolver,
        rng: &mut SmallRng,
    ) -> AiTurnReport {
        let mut report = AiTurnReport::default();
        let Some((id, action)) = self.choose(team, fleet, combat, rng) else {
            debug!("{} has no legal action", team);
            return report;
        };
        debug!("{} acts with ship {}: {:?}", team, id, action);
        report.ship = Some(id);

        match action {
            AiAction::Fire => {
                let hits = combat.fire_broadside(id, fleet);
                if let Some(ship) = fleet.ship_mut(id) {
                    ship.has_fired = true;
                }
                if hits.is_empty() {
                    report.lines.push(String::from("Enemy ship fired but missed!"));
                } else {
                    let parts: Vec<&str> = hits
                        .iter()
                        .map(|h| if h.destroyed { "destroyed a ship" } else { "hit a ship" })
                        .collect();
                    report.lines.push(format!("Enemy fired: {}!", parts.join(", ")));
                }
                report.hits = hits;
                report.action = Some(action);
            }
            AiAction::Maneuver(maneuver) => {
                if fleet.maneuver(id, maneuver) {
                    if let Some(ship) = fleet.ship_mut(id) {
                        ship.has_moved = true;
                    }
                    let line = match maneuver {
                        Maneuver::Move(_) => "Enemy ship advanced",
                        Maneuver::Rotate(_) => "Enemy ship maneuvered",
                    };
                    report.lines.push(String::from(line));
                    report.action = Some(action);
                }
            }
        }
        report
    }
}
