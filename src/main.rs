use std::io;

use clap::{Parser, Subcommand};
use melee_at_sea::{
    cli::{run_session, SessionOptions},
    init_logging, Fleet, GameMode, Grid, Outcome, Team, TurnController,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Command side A against the computer.
    Play {
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, help = "Show enemy actions at once instead of pacing them")]
        fast: bool,
    },
    /// Two players sharing one terminal.
    Hotseat {
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
    },
}

fn seeded_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(s) => {
            println!("Using fixed seed: {} (game will be reproducible)", s);
            SmallRng::seed_from_u64(s)
        }
        None => {
            let mut seed_rng = rand::rng();
            SmallRng::from_rng(&mut seed_rng)
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    let (mode, seed, pace_ai) = match cli.command {
        Commands::Play { seed, fast } => (GameMode::SinglePlayer, seed, !fast),
        Commands::Hotseat { seed } => (GameMode::TwoPlayer, seed, false),
    };

    let mut rng = seeded_rng(seed);
    let fleet = Fleet::standard(Grid::default(), &mut rng)?;
    let mut controller = TurnController::new(fleet, mode, rng);

    println!("MELEE AT SEA");
    let stdin = io::stdin();
    let outcome = run_session(
        &mut controller,
        SessionOptions { pace_ai },
        stdin.lock(),
        io::stdout(),
    )?;

    match (outcome, mode) {
        (None, _) => println!("Leaving the battle."),
        (Some(Outcome::Draw), _) => println!("Both fleets lie at the bottom of the sea."),
        (Some(Outcome::Victory(Team::A)), GameMode::SinglePlayer) => {
            println!("VICTORY! You have sunk the enemy fleet!")
        }
        (Some(Outcome::Victory(Team::B)), GameMode::SinglePlayer) => {
            println!("DEFEAT. Your fleet has been destroyed.")
        }
        (Some(Outcome::Victory(Team::A)), GameMode::TwoPlayer) => println!("PLAYER 1 WINS!"),
        (Some(Outcome::Victory(Team::B)), GameMode::TwoPlayer) => println!("PLAYER 2 WINS!"),
    }
    Ok(())
}
