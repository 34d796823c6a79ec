use clap::Parser;
use melee_at_sea::{
    init_logging, CombatResolver, Fleet, Grid, HeuristicOpponent, Opponent, Outcome, Team,
};
use rand::{rngs::SmallRng, SeedableRng};
use serde_json::json;

/// Pit the heuristic AI against itself and print a JSON summary.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Seed for fleet layout and AI choices.
    seed: u64,
    #[arg(long, default_value_t = 500)]
    max_rounds: usize,
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let args = Args::parse();

    let mut rng = SmallRng::seed_from_u64(args.seed);
    let mut fleet = Fleet::standard(Grid::default(), &mut rng)?;
    let combat = CombatResolver::new(*fleet.grid());
    let mut side_a = HeuristicOpponent::new();
    let mut side_b = HeuristicOpponent::new();

    let mut rounds = 0;
    let mut outcome = None;
    while rounds < args.max_rounds && outcome.is_none() {
        rounds += 1;
        for (team, ai) in [
            (Team::A, &mut side_a as &mut dyn Opponent),
            (Team::B, &mut side_b as &mut dyn Opponent),
        ] {
            fleet.reset_turn_flags(team);
            ai.take_turn(team, &mut fleet, &combat, &mut rng);
            outcome = Outcome::of(&fleet);
            if outcome.is_some() {
                break;
            }
        }
    }

    let survivors = |team: Team| fleet.living(team).count();
    let result = json!({
        "seed": args.seed,
        "rounds": rounds,
        "outcome": outcome,
        "winner": outcome.and_then(Outcome::winner),
        "survivors": { "A": survivors(Team::A), "B": survivors(Team::B) },
    });
    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
