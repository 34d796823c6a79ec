//! Turn state machine.
//!
//! A human turn runs select → move → fire for one ship of the side to play.
//! In single-player mode side B is the AI: it acts once, its log lines are
//! revealed on a timer, and then side A plays again. In two-player mode side
//! B mirrors side A's phases.

use alloc::boxed::Box;
use alloc::collections::{BTreeSet, VecDeque};
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;
use core::time::Duration;

use log::{debug, info, warn};
use rand::rngs::SmallRng;

use crate::ai::{AiAction, HeuristicOpponent, Opponent};
use crate::combat::{CombatResolver, Hit, ShotOutcome};
use crate::common::{Cell, MoveDirection, RotateDirection, Team};
use crate::config::{AI_FIRST_REVEAL, AI_REVEAL_INTERVAL};
use crate::events::GameEvent;
use crate::fleet::Fleet;
use crate::ship::ShipId;

/// Who controls side B.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum GameMode {
    SinglePlayer,
    TwoPlayer,
}

/// Current phase of the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnPhase {
    SelectA,
    MoveA,
    FireA,
    AiTurn,
    SelectB,
    MoveB,
    FireB,
    GameOver,
}

impl TurnPhase {
    fn select(team: Team) -> Self {
        match team {
            Team::A => TurnPhase::SelectA,
            Team::B => TurnPhase::SelectB,
        }
    }

    fn moving(team: Team) -> Self {
        match team {
            Team::A => TurnPhase::MoveA,
            Team::B => TurnPhase::MoveB,
        }
    }

    fn fire(team: Team) -> Self {
        match team {
            Team::A => TurnPhase::FireA,
            Team::B => TurnPhase::FireB,
        }
    }

    /// Side whose ships may act in this phase.
    pub fn team(self) -> Option<Team> {
        match self {
            TurnPhase::SelectA | TurnPhase::MoveA | TurnPhase::FireA => Some(Team::A),
            TurnPhase::SelectB | TurnPhase::MoveB | TurnPhase::FireB | TurnPhase::AiTurn => {
                Some(Team::B)
            }
            TurnPhase::GameOver => None,
        }
    }

    pub fn is_select(self) -> bool {
        matches!(self, TurnPhase::SelectA | TurnPhase::SelectB)
    }

    pub fn is_move(self) -> bool {
        matches!(self, TurnPhase::MoveA | TurnPhase::MoveB)
    }

    pub fn is_fire(self) -> bool {
        matches!(self, TurnPhase::FireA | TurnPhase::FireB)
    }

    /// Short banner label.
    pub fn label(self) -> &'static str {
        match self {
            TurnPhase::SelectA => "SELECT SHIP",
            TurnPhase::MoveA => "MOVE/ROTATE",
            TurnPhase::FireA => "FIRE",
            TurnPhase::AiTurn => "ENEMY TURN",
            TurnPhase::SelectB => "P2 SELECT SHIP",
            TurnPhase::MoveB => "P2 MOVE/ROTATE",
            TurnPhase::FireB => "P2 FIRE",
            TurnPhase::GameOver => "GAME OVER",
        }
    }
}

/// How a match ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    Victory(Team),
    /// Both fleets sank in the same action.
    Draw,
}

impl Outcome {
    /// Outcome of the fleet as it stands, or `None` while both sides have a
    /// ship afloat.
    pub fn of(fleet: &Fleet) -> Option<Outcome> {
        Outcome::from_survivors(fleet.has_living(Team::A), fleet.has_living(Team::B))
    }

    /// Outcome given whether each side still has a ship afloat. Mutual
    /// destruction is a draw.
    pub fn from_survivors(a_alive: bool, b_alive: bool) -> Option<Outcome> {
        match (a_alive, b_alive) {
            (true, true) => None,
            (true, false) => Some(Outcome::Victory(Team::A)),
            (false, true) => Some(Outcome::Victory(Team::B)),
            (false, false) => Some(Outcome::Draw),
        }
    }

    pub fn winner(self) -> Option<Team> {
        match self {
            Outcome::Victory(team) => Some(team),
            Outcome::Draw => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Victory(team) => write!(f, "{} wins", team),
            Outcome::Draw => write!(f, "both fleets sunk"),
        }
    }
}

/// AI log lines waiting to be shown, paced by elapsed time. Events describing
/// the AI's action are held back until its first line is shown.
#[derive(Debug, Default)]
struct RevealQueue {
    lines: VecDeque<String>,
    held: Vec<GameEvent>,
    remaining: Duration,
}

enum Reveal {
    Waiting,
    Line(String),
    Done,
}

impl RevealQueue {
    fn start(lines: Vec<String>, held: Vec<GameEvent>) -> Self {
        Self {
            lines: lines.into(),
            held,
            remaining: AI_FIRST_REVEAL,
        }
    }

    fn tick(&mut self, elapsed: Duration) -> Reveal {
        self.remaining = self.remaining.saturating_sub(elapsed);
        if !self.remaining.is_zero() {
            return Reveal::Waiting;
        }
        match self.lines.pop_front() {
            Some(line) => {
                self.remaining = AI_REVEAL_INTERVAL;
                Reveal::Line(line)
            }
            None => Reveal::Done,
        }
    }

    fn release_held(&mut self) -> Vec<GameEvent> {
        core::mem::take(&mut self.held)
    }

    /// Everything not yet shown: pending lines as events, then held events.
    fn flush(&mut self) -> Vec<GameEvent> {
        let mut events: Vec<GameEvent> = self
            .lines
            .drain(..)
            .map(|line| GameEvent::AiAction { line })
            .collect();
        events.append(&mut self.held);
        events
    }
}

/// Owns the fleet and drives the match.
///
/// Every operation is gated on the current phase; calls made in the wrong
/// phase, or that the rules forbid, return `false`/`None` and change
/// nothing.
pub struct TurnController {
    fleet: Fleet,
    combat: CombatResolver,
    mode: GameMode,
    phase: TurnPhase,
    active: Option<ShipId>,
    outcome: Option<Outcome>,
    opponent: Box<dyn Opponent>,
    rng: SmallRng,
    reveal: RevealQueue,
    events: Vec<GameEvent>,
}

impl TurnController {
    /// Start a match with side A to play. Side B is driven by a
    /// [`HeuristicOpponent`] in single-player mode.
    pub fn new(fleet: Fleet, mode: GameMode, rng: SmallRng) -> Self {
        let combat = CombatResolver::new(*fleet.grid());
        let mut controller = Self {
            fleet,
            combat,
            mode,
            phase: TurnPhase::SelectA,
            active: None,
            outcome: None,
            opponent: Box::new(HeuristicOpponent::new()),
            rng,
            reveal: RevealQueue::default(),
            events: Vec::new(),
        };
        controller.start_side(Team::A);
        controller
    }

    /// Replace the AI driving side B.
    pub fn with_opponent(mut self, opponent: Box<dyn Opponent>) -> Self {
        self.opponent = opponent;
        self
    }

    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    pub fn combat(&self) -> &CombatResolver {
        &self.combat
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    /// Ship currently being commanded, if any.
    pub fn active_ship(&self) -> Option<ShipId> {
        self.active
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Take every event emitted since the last call.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        core::mem::take(&mut self.events)
    }

    /// Fire zone to highlight: the active ship's, while it may still fire.
    pub fn fire_zone_overlay(&self) -> BTreeSet<Cell> {
        match self.active_ship_ref() {
            Some(ship) if self.phase.is_fire() && !ship.has_fired => {
                self.combat.side_fire_zones(ship)
            }
            _ => BTreeSet::new(),
        }
    }

    fn active_ship_ref(&self) -> Option<&crate::ship::Ship> {
        self.active.and_then(|id| self.fleet.ship(id))
    }

    /// Pick the ship to command. It must belong to the side to play, be
    /// afloat and not have acted yet this turn.
    pub fn select(&mut self, id: ShipId) -> bool {
        if !self.phase.is_select() {
            return false;
        }
        let Some(team) = self.phase.team() else {
            return false;
        };
        match self.fleet.ship(id) {
            Some(ship) if ship.team() == team && ship.is_alive() && !ship.has_acted() => {}
            _ => return false,
        }
        self.fleet.clear_selection();
        if let Some(ship) = self.fleet.ship_mut(id) {
            ship.selected = true;
        }
        self.active = Some(id);
        self.phase = TurnPhase::moving(team);
        debug!("{} selected ship {}", team, id);
        true
    }

    /// Select the side's ship covering `cell`.
    pub fn select_at(&mut self, cell: Cell) -> bool {
        match self.fleet.ship_at(cell).map(|s| s.id()) {
            Some(id) => self.select(id),
            None => false,
        }
    }

    /// Drop the current selection and return to the select phase. Only
    /// possible while the ship has neither moved nor fired.
    pub fn deselect(&mut self) -> bool {
        if !(self.phase.is_move() || self.phase.is_fire()) {
            return false;
        }
        let (Some(team), Some(ship)) = (self.phase.team(), self.active_ship_ref()) else {
            return false;
        };
        if ship.has_acted() {
            return false;
        }
        self.fleet.clear_selection();
        self.active = None;
        self.phase = TurnPhase::select(team);
        true
    }

    /// Move the active ship one cell.
    pub fn move_active(&mut self, direction: MoveDirection) -> bool {
        self.maneuver_active(|fleet, id| fleet.move_ship(id, direction))
    }

    /// Move the active ship one cell along the grid axes.
    pub fn move_active_absolute(&mut self, dx: i32, dy: i32) -> bool {
        self.maneuver_active(|fleet, id| fleet.move_ship_absolute(id, dx, dy))
    }

    /// Rotate the active ship a quarter turn.
    pub fn rotate_active(&mut self, direction: RotateDirection) -> bool {
        self.maneuver_active(|fleet, id| fleet.rotate_ship(id, direction))
    }

    fn maneuver_active(&mut self, apply: impl FnOnce(&mut Fleet, ShipId) -> bool) -> bool {
        if !self.phase.is_move() {
            return false;
        }
        let Some(id) = self.active else {
            return false;
        };
        if !apply(&mut self.fleet, id) {
            return false;
        }
        if let Some(ship) = self.fleet.ship_mut(id) {
            ship.has_moved = true;
        }
        self.events.push(GameEvent::MoveSucceeded { ship: id });
        true
    }

    /// Finish maneuvering and move on to firing. The active ship is kept but
    /// loses its selection highlight.
    pub fn confirm_move(&mut self) -> bool {
        if !self.phase.is_move() {
            return false;
        }
        let Some(team) = self.phase.team() else {
            return false;
        };
        self.fleet.clear_selection();
        self.phase = TurnPhase::fire(team);
        true
    }

    /// Fire the active ship's broadside and pass the turn. Returns `None` if
    /// firing is not allowed now.
    pub fn fire_broadside(&mut self) -> Option<Vec<Hit>> {
        let id = self.ready_to_fire()?;
        let hits = self.combat.fire_broadside(id, &mut self.fleet);
        self.mark_fired(id);
        self.events.push(GameEvent::BroadsideResolved {
            ship: id,
            hits: hits.len(),
            destroyed: hits.iter().filter(|h| h.destroyed).count(),
        });
        if !self.check_game_over() {
            self.pass_turn();
        }
        Some(hits)
    }

    /// Fire the active ship at one cell of its fire zone and pass the turn.
    /// Cells outside the zone are rejected without using the shot.
    pub fn fire_at(&mut self, cell: Cell) -> Option<ShotOutcome> {
        let id = self.ready_to_fire()?;
        let in_zone = self
            .fleet
            .ship(id)
            .is_some_and(|ship| self.combat.side_fire_zones(ship).contains(&cell));
        if !in_zone {
            debug!("{:?} is outside the fire zone of ship {}", cell, id);
            return None;
        }
        let outcome = self.combat.fire_single(id, cell, &mut self.fleet);
        self.mark_fired(id);
        self.events.push(GameEvent::ShotResolved {
            ship: id,
            hit: outcome.hit,
            destroyed: outcome.destroyed,
        });
        if !self.check_game_over() {
            self.pass_turn();
        }
        Some(outcome)
    }

    fn ready_to_fire(&self) -> Option<ShipId> {
        if !self.phase.is_fire() {
            return None;
        }
        let ship = self.active_ship_ref()?;
        (!ship.has_fired && ship.is_alive()).then(|| ship.id())
    }

    fn mark_fired(&mut self, id: ShipId) {
        if let Some(ship) = self.fleet.ship_mut(id) {
            ship.has_fired = true;
        }
    }

    /// End the human side's turn without firing. Allowed from the select and
    /// fire phases.
    pub fn end_turn(&mut self) -> bool {
        if !(self.phase.is_select() || self.phase.is_fire()) {
            return false;
        }
        if let Some(id) = self.active {
            self.mark_fired(id);
        }
        self.pass_turn();
        true
    }

    /// Advance the AI reveal timer. Returns the next AI log line once its
    /// delay has elapsed. When every line has been shown the controller
    /// checks for game over and otherwise hands the turn back to side A.
    pub fn tick(&mut self, elapsed: Duration) -> Option<String> {
        if self.phase != TurnPhase::AiTurn {
            return None;
        }
        match self.reveal.tick(elapsed) {
            Reveal::Waiting => None,
            Reveal::Line(line) => {
                self.events.push(GameEvent::AiAction { line: line.clone() });
                let held = self.reveal.release_held();
                self.events.extend(held);
                Some(line)
            }
            Reveal::Done => {
                let held = self.reveal.release_held();
                self.events.extend(held);
                if !self.check_game_over() {
                    self.start_side(Team::A);
                }
                None
            }
        }
    }

    /// Reveal every pending AI line at once and finish the AI turn.
    pub fn finish_ai_turn(&mut self) -> Vec<String> {
        let mut lines = Vec::new();
        while self.phase == TurnPhase::AiTurn {
            if let Some(line) = self.tick(AI_FIRST_REVEAL.max(AI_REVEAL_INTERVAL)) {
                lines.push(line);
            }
        }
        lines
    }

    /// Enter [`TurnPhase::GameOver`] if either side has no ship afloat.
    /// Returns `true` once the match is over. Called mid AI turn, the AI's
    /// unrevealed lines and events are emitted ahead of the game over.
    pub fn check_game_over(&mut self) -> bool {
        if self.phase == TurnPhase::GameOver {
            return true;
        }
        let Some(outcome) = Outcome::of(&self.fleet) else {
            return false;
        };
        if self.phase == TurnPhase::AiTurn {
            let pending = self.reveal.flush();
            self.events.extend(pending);
        }
        info!("game over: {}", outcome);
        self.outcome = Some(outcome);
        self.phase = TurnPhase::GameOver;
        self.active = None;
        self.fleet.clear_selection();
        self.events.push(GameEvent::GameOver { outcome });
        true
    }

    fn pass_turn(&mut self) {
        self.fleet.clear_selection();
        self.active = None;
        match (self.phase.team(), self.mode) {
            (Some(Team::A), GameMode::SinglePlayer) => self.start_ai_turn(),
            (Some(Team::A), GameMode::TwoPlayer) => self.start_side(Team::B),
            (Some(Team::B), _) => self.start_side(Team::A),
            (None, _) => warn!("turn passed after game over"),
        }
    }

    fn start_side(&mut self, team: Team) {
        self.phase = TurnPhase::select(team);
        self.active = None;
        self.fleet.reset_turn_flags(team);
        debug!("{} to play", team);
        self.events.push(GameEvent::TurnStarted {
            team,
            mode: self.mode,
        });
    }

    fn start_ai_turn(&mut self) {
        self.phase = TurnPhase::AiTurn;
        self.active = None;
        self.fleet.reset_turn_flags(Team::B);
        self.events.push(GameEvent::TurnStarted {
            team: Team::B,
            mode: self.mode,
        });

        let report = self
            .opponent
            .take_turn(Team::B, &mut self.fleet, &self.combat, &mut self.rng);
        let held = match (report.ship, report.action) {
            (Some(ship), Some(AiAction::Fire)) => vec![GameEvent::BroadsideResolved {
                ship,
                hits: report.hits.len(),
                destroyed: report.hits.iter().filter(|h| h.destroyed).count(),
            }],
            (Some(ship), Some(AiAction::Maneuver(_))) => vec![GameEvent::MoveSucceeded { ship }],
            _ => Vec::new(),
        };
        self.reveal = RevealQueue::start(report.lines, held);
    }
}

impl fmt::Debug for TurnController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TurnController")
            .field("mode", &self.mode)
            .field("phase", &self.phase)
            .field("active", &self.active)
            .field("outcome", &self.outcome)
            .field("fleet", &self.fleet)
            .finish()
    }
}
