#[cfg(feature = "std")]
mod cli_tests {
    use std::io::Cursor;

    use melee_at_sea::cli::{parse_command, run_session, Command, SessionOptions};
    use melee_at_sea::ui::{cell_to_string, column_label, parse_cell, render_board};
    use melee_at_sea::{
        CombatResolver, Fleet, GameMode, Grid, MoveDirection, Orientation, Outcome, Placement,
        RotateDirection, ShipId, Team, TurnController,
    };
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn game(enemy_bow: (i32, i32), enemy_facing: Orientation) -> TurnController {
        let fleet = Fleet::new(
            Grid::default(),
            vec![
                Placement::new(Team::A, 3, (5, 5), Orientation::Right),
                Placement::new(Team::B, 2, enemy_bow, enemy_facing),
            ],
        )
        .unwrap();
        TurnController::new(fleet, GameMode::SinglePlayer, SmallRng::seed_from_u64(1))
    }

    fn session(controller: &mut TurnController, script: &str) -> (Option<Outcome>, String) {
        let mut out = Vec::new();
        let outcome = run_session(
            controller,
            SessionOptions { pace_ai: false },
            Cursor::new(script.as_bytes()),
            &mut out,
        )
        .unwrap();
        (outcome, String::from_utf8(out).unwrap())
    }

    #[test]
    fn cells_use_letter_and_row() {
        assert_eq!(cell_to_string((4, 5)), "E6");
        assert_eq!(parse_cell("E6"), Ok((4, 5)));
        assert_eq!(parse_cell("a1"), Ok((0, 0)));
        assert!(parse_cell("E0").is_err());
        assert!(parse_cell("6E").is_err());
        assert!(parse_cell("").is_err());
    }

    #[test]
    fn wide_grids_use_two_letter_columns() {
        assert_eq!(column_label(25), "Z");
        assert_eq!(column_label(26), "AA");
        assert_eq!(column_label(27), "AB");
        assert_eq!(column_label(52), "BA");
        assert_eq!(cell_to_string((26, 0)), "AA1");
        assert_eq!(parse_cell("ab3"), Ok((27, 2)));
        for x in 0..800 {
            assert_eq!(parse_cell(&cell_to_string((x, 4))), Ok((x, 4)));
        }

        let fleet = Fleet::new(
            Grid::new(30, 5, 10),
            vec![
                Placement::new(Team::A, 2, (1, 0), Orientation::Right),
                Placement::new(Team::B, 2, (28, 4), Orientation::Left),
            ],
        )
        .unwrap();
        let board = render_board(&fleet, &Default::default());
        let header = board.lines().next().unwrap();
        assert!(header.ends_with(" Z AA AB AC AD"));
        assert!(!board.contains('['));
    }

    #[test]
    fn commands_parse() {
        assert_eq!(parse_command("w"), Ok(Command::Move(MoveDirection::Forward)));
        assert_eq!(parse_command("S"), Ok(Command::Move(MoveDirection::Backward)));
        assert_eq!(parse_command("port"), Ok(Command::Move(MoveDirection::Port)));
        assert_eq!(
            parse_command("q"),
            Ok(Command::Rotate(RotateDirection::CounterClockwise))
        );
        assert_eq!(parse_command("e"), Ok(Command::Rotate(RotateDirection::Clockwise)));
        assert_eq!(parse_command("ok"), Ok(Command::Confirm));
        assert_eq!(parse_command("fire"), Ok(Command::Fire));
        assert_eq!(parse_command("fire D5"), Ok(Command::FireAt((3, 4))));
        assert_eq!(parse_command("  end "), Ok(Command::EndTurn));
        assert_eq!(parse_command("tab"), Ok(Command::Cancel));
        assert_eq!(parse_command("quit"), Ok(Command::Quit));
        assert_eq!(parse_command("F6"), Ok(Command::Select((5, 5))));
        assert_eq!(parse_command("select b2"), Ok(Command::Select((1, 1))));
        assert!(parse_command("").is_err());
        assert!(parse_command("fly away").is_err());
        assert!(parse_command("fire D5 D6").is_err());
    }

    #[test]
    fn board_marks_bows_and_highlights() {
        let controller = game((15, 12), Orientation::Left);
        let highlight = controller.combat().side_fire_zones(controller.fleet().ships().first().unwrap());
        let board = render_board(controller.fleet(), &highlight);
        // Row 6 from the top of the grid holds side A's ship.
        let row = board.lines().find(|l| l.trim_start().starts_with("6 ")).unwrap();
        assert!(row.contains("A A >"));
        let row = board.lines().find(|l| l.trim_start().starts_with("5 ")).unwrap();
        assert!(row.contains("* *"));
        assert!(board.contains('<'));
    }

    #[test]
    fn wrecks_are_drawn_under_living_ships() {
        let mut fleet = Fleet::new(
            Grid::default(),
            vec![
                Placement::new(Team::A, 3, (5, 5), Orientation::Right),
                Placement::new(Team::B, 2, (4, 7), Orientation::Up),
            ],
        )
        .unwrap();
        let combat = CombatResolver::new(*fleet.grid());
        assert!(combat.fire_broadside(ShipId(0), &mut fleet)[0].destroyed);
        let board = render_board(&fleet, &Default::default());
        assert_eq!(board.matches('x').count(), 2);

        // Side-step to port onto the wreck's stern cell.
        assert!(fleet.move_ship(ShipId(0), MoveDirection::Port));
        let board = render_board(&fleet, &Default::default());
        assert_eq!(board.matches('x').count(), 1);
        let row = board.lines().find(|l| l.trim_start().starts_with("7 ")).unwrap();
        assert!(row.contains("A A >"));
    }

    #[test]
    fn scripted_broadside_wins() {
        let mut controller = game((4, 7), Orientation::Up);
        let (outcome, out) = session(&mut controller, "F6\nok\nfire\n");
        assert_eq!(outcome, Some(Outcome::Victory(Team::A)));
        assert!(out.contains("YOUR TURN!"));
        assert!(out.contains("1 SHIP(S) DESTROYED!"));
        assert!(out.contains("*** side A wins ***"));
    }

    #[test]
    fn rejected_commands_are_reported() {
        let mut controller = game((15, 12), Orientation::Left);
        let (outcome, out) = session(&mut controller, "fire\nA1\nfly away\nquit\n");
        assert_eq!(outcome, None);
        assert!(out.contains("Not possible right now."));
        assert!(out.contains("Unknown command 'fly'"));
    }

    #[test]
    fn ai_turn_runs_between_player_turns() {
        let mut controller = game((15, 12), Orientation::Left);
        let (outcome, out) = session(&mut controller, "end\n");
        assert_eq!(outcome, None);
        assert!(out.contains("ENEMY TURN"));
        assert!(out.contains("Enemy ship"));
        assert_eq!(out.matches("YOUR TURN!").count(), 2);
    }

    #[test]
    fn moves_redraw_the_board_without_a_banner() {
        let mut controller = game((15, 12), Orientation::Left);
        let (_, out) = session(&mut controller, "F6\nw\n");
        assert!(!out.contains("SHIP MOVED"));
        assert!(!out.contains("Not possible right now."));
        assert_eq!(controller.fleet().ship(ShipId(0)).unwrap().bow(), (6, 5));
    }

    #[test]
    fn eof_ends_the_session() {
        let mut controller = game((15, 12), Orientation::Left);
        let (outcome, _) = session(&mut controller, "");
        assert_eq!(outcome, None);
    }
}
