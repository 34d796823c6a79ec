use std::cell::Cell;
use std::rc::Rc;

use melee_at_sea::{
    AiAction, AiTurnReport, CombatResolver, Fleet, Grid, HeuristicOpponent, Maneuver,
    MoveDirection, Opponent, Orientation, Placement, Pose, ShipId, Team,
};
use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn scored(enemy: Placement) -> i32 {
    let fleet = Fleet::new(
        Grid::default(),
        vec![enemy, Placement::new(Team::B, 2, (10, 5), Orientation::Left)],
    )
    .unwrap();
    let combat = CombatResolver::new(*fleet.grid());
    let ai = HeuristicOpponent::new();
    ai.evaluate_position(&fleet, &combat, fleet.ship(ShipId(1)).unwrap())
}

#[test]
fn distant_enemy_only_adds_proximity() {
    // Bow distance 4, no exposure, no target.
    assert_eq!(scored(Placement::new(Team::A, 2, (6, 5), Orientation::Up)), 6);
}

#[test]
fn exposure_is_penalised_per_cell() {
    // Both cells inside the enemy's threat zone: -10, distance 3: +7.
    assert_eq!(scored(Placement::new(Team::A, 2, (8, 6), Orientation::Up)), -3);
}

#[test]
fn target_cells_are_rewarded() {
    // One enemy cell in the fire zone: +10, exposure -10, distance 3: +7.
    assert_eq!(scored(Placement::new(Team::A, 3, (12, 6), Orientation::Right)), 7);
}

#[test]
fn ships_in_range_fire_first() {
    let mut fleet = Fleet::new(
        Grid::default(),
        vec![
            Placement::new(Team::A, 3, (6, 7), Orientation::Up),
            Placement::new(Team::B, 4, (5, 8), Orientation::Up),
        ],
    )
    .unwrap();
    let combat = CombatResolver::new(*fleet.grid());
    let mut rng = SmallRng::seed_from_u64(3);
    let report = HeuristicOpponent::new().take_turn(Team::B, &mut fleet, &combat, &mut rng);

    assert_eq!(report.ship, Some(ShipId(1)));
    assert_eq!(report.action, Some(AiAction::Fire));
    assert_eq!(report.hits.len(), 1);
    assert_eq!(report.lines, vec!["Enemy fired: hit a ship!"]);
    assert_eq!(fleet.ship(ShipId(0)).unwrap().cannon_capacity(), 1);
    assert!(fleet.ship(ShipId(1)).unwrap().has_fired);
    assert_eq!(fleet.ship(ShipId(1)).unwrap().bow(), (5, 8));
}

#[test]
fn exactly_one_ship_acts() {
    let mut rng = SmallRng::seed_from_u64(11);
    let mut fleet = Fleet::standard(Grid::default(), &mut rng).unwrap();
    let before: Vec<Pose> = fleet.ships().iter().map(|s| s.pose()).collect();
    let combat = CombatResolver::new(*fleet.grid());

    let report = HeuristicOpponent::new().take_turn(Team::B, &mut fleet, &combat, &mut rng);
    let acted: Vec<ShipId> = fleet
        .ships()
        .iter()
        .filter(|s| s.has_acted())
        .map(|s| s.id())
        .collect();
    assert_eq!(acted.len(), 1);
    assert_eq!(report.ship, Some(acted[0]));
    assert_eq!(fleet.ship(acted[0]).unwrap().team(), Team::B);
    assert!(matches!(report.action, Some(AiAction::Maneuver(_))));
    assert_eq!(report.lines.len(), 1);

    for ship in fleet.ships().iter().filter(|s| s.id() != acted[0]) {
        assert_eq!(ship.pose(), before[ship.id().0]);
    }
}

#[test]
fn trial_rolls_back_on_drop() {
    let mut fleet = Fleet::new(
        Grid::default(),
        vec![
            Placement::new(Team::A, 3, (5, 5), Orientation::Right),
            Placement::new(Team::B, 2, (6, 5), Orientation::Left),
        ],
    )
    .unwrap();
    let astern = Maneuver::Move(MoveDirection::Backward);
    {
        let trial = fleet.trial(ShipId(0), astern).unwrap();
        assert_eq!(trial.ship().bow(), (4, 5));
        assert_eq!(trial.ship_at((3, 5)).map(|s| s.id()), Some(ShipId(0)));
        assert!(trial.ship_at((5, 5)).is_none());
    }
    assert_eq!(fleet.ship(ShipId(0)).unwrap().bow(), (5, 5));
    assert!(!fleet.ship(ShipId(0)).unwrap().has_moved);

    // Illegal maneuvers yield no trial and leave the ship alone.
    assert!(fleet
        .trial(ShipId(0), Maneuver::Move(MoveDirection::Forward))
        .is_none());
    assert_eq!(fleet.ship(ShipId(0)).unwrap().bow(), (5, 5));
}

#[test]
fn boxed_heuristic_drives_a_controller() {
    use melee_at_sea::{GameMode, TurnController, TurnPhase};

    let mut rng = SmallRng::seed_from_u64(5);
    let fleet = Fleet::standard(Grid::default(), &mut rng).unwrap();
    let mut game = TurnController::new(fleet, GameMode::SinglePlayer, rng)
        .with_opponent(Box::new(HeuristicOpponent::default()));
    assert!(game.end_turn());
    assert_eq!(game.phase(), TurnPhase::AiTurn);
    assert_eq!(game.finish_ai_turn().len(), 1);
    assert_eq!(game.phase(), TurnPhase::SelectA);
}

/// Passes every turn and counts how often it was asked. Holds an `Rc`, so it
/// is neither `Send` nor `Sync`.
struct Idle(Rc<Cell<u32>>);

impl Opponent for Idle {
    fn take_turn(
        &mut self,
        _team: Team,
        _fleet: &mut Fleet,
        _combat: &CombatResolver,
        _rng: &mut SmallRng,
    ) -> AiTurnReport {
        self.0.set(self.0.get() + 1);
        AiTurnReport::default()
    }
}

#[test]
fn custom_opponents_need_not_be_send() {
    use melee_at_sea::{GameMode, TurnController, TurnPhase};

    let calls = Rc::new(Cell::new(0));
    let mut rng = SmallRng::seed_from_u64(8);
    let fleet = Fleet::standard(Grid::default(), &mut rng).unwrap();
    let mut game = TurnController::new(fleet, GameMode::SinglePlayer, rng)
        .with_opponent(Box::new(Idle(Rc::clone(&calls))));
    assert!(game.end_turn());
    assert!(game.finish_ai_turn().is_empty());
    assert_eq!(calls.get(), 1);
    assert_eq!(game.phase(), TurnPhase::SelectA);
}

proptest! {
    #[test]
    fn scoring_never_moves_ships(seed in any::<u64>(), pick in 0usize..14, warmup in 0usize..6) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut fleet = Fleet::standard(Grid::default(), &mut rng).unwrap();
        let combat = CombatResolver::new(*fleet.grid());
        let ai = HeuristicOpponent::new();

        for turn in 0..warmup {
            let team = if turn % 2 == 0 { Team::A } else { Team::B };
            fleet.reset_turn_flags(team);
            ai.clone().take_turn(team, &mut fleet, &combat, &mut rng);
        }

        let before: Vec<(Pose, u8)> = fleet
            .ships()
            .iter()
            .map(|s| (s.pose(), s.cannon_capacity()))
            .collect();
        let id = ShipId(pick);
        let best = ai.best_maneuver(&mut fleet, &combat, id, &mut rng);
        let after: Vec<(Pose, u8)> = fleet
            .ships()
            .iter()
            .map(|s| (s.pose(), s.cannon_capacity()))
            .collect();
        prop_assert_eq!(before, after);

        if let Some((maneuver, score)) = best {
            let trial = fleet.trial(id, maneuver).unwrap();
            prop_assert_eq!(ai.evaluate_position(&trial, &combat, trial.ship()), score);
        }
    }
}
