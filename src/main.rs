use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use seabattle::ui::{coord_label, parse_coord, print_board, print_player_view};
use seabattle::{
    init_logging, AttackOutcome, BotGunner, BotTick, FirstMove, GameError, GameSession,
    Orientation, Placement, Side, FLEET,
};

#[derive(Parser)]
#[command(author, version, about = "Grid-battle game against a wandering bot", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Clone, Debug)]
enum FirstMoveArg {
    Player,
    Bot,
    Random,
}

impl From<FirstMoveArg> for FirstMove {
    fn from(arg: FirstMoveArg) -> Self {
        match arg {
            FirstMoveArg::Player => FirstMove::Human,
            FirstMoveArg::Bot => FirstMove::Bot,
            FirstMoveArg::Random => FirstMove::Random,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Play an interactive game against the bot.
    Play {
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, value_enum, default_value_t = FirstMoveArg::Random)]
        first: FirstMoveArg,
        #[arg(long, help = "Skip manual placement and deploy the fleet at random")]
        auto: bool,
    },
    /// Watch the bot play both sides of a game.
    Watch {
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, default_value_t = 60, help = "Wander animation cadence in milliseconds")]
        cadence: u64,
    },
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Play { seed, first, auto } => play(seed, first.into(), auto),
        Commands::Watch { seed, cadence } => watch(seed, cadence),
    }
}

fn make_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(s) => SmallRng::seed_from_u64(s),
        None => {
            let mut seed_rng = rand::rng();
            SmallRng::from_rng(&mut seed_rng)
        }
    }
}

fn play(seed: Option<u64>, first: FirstMove, auto: bool) -> anyhow::Result<()> {
    if let Some(s) = seed {
        println!("Using fixed seed: {} (game will be reproducible)", s);
    }
    let mut rng = make_rng(seed);
    let mut session = GameSession::new();
    session.board_mut(Side::Bot).auto_place_fleet(&mut rng)?;
    if auto {
        session.board_mut(Side::Human).auto_place_fleet(&mut rng)?;
    } else {
        place_fleet_interactive(&mut session, &mut rng)?;
    }
    session.start(first, &mut rng)?;

    let mut gunner = BotGunner::new(Side::Bot);
    while !session.is_over() {
        match session.active() {
            Side::Human => human_turn(&mut session)?,
            Side::Bot => bot_turn(&mut session, &mut gunner, &mut rng, 150)?,
        }
    }
    print_result(&session);
    Ok(())
}

fn watch(seed: Option<u64>, cadence: u64) -> anyhow::Result<()> {
    if let Some(s) = seed {
        println!("Using fixed seed: {} (game will be reproducible)", s);
    }
    let mut rng = make_rng(seed);
    let mut session = GameSession::new();
    session.auto_deploy(&mut rng)?;
    session.start(FirstMove::Random, &mut rng)?;

    let mut gunners = [BotGunner::new(Side::Human), BotGunner::new(Side::Bot)];
    while !session.is_over() {
        let idx = match session.active() {
            Side::Human => 0,
            Side::Bot => 1,
        };
        println!("\n{:?} to move:", session.active());
        bot_turn(&mut session, &mut gunners[idx], &mut rng, cadence)?;
    }
    print_result(&session);
    Ok(())
}

fn place_fleet_interactive(
    session: &mut GameSession,
    rng: &mut SmallRng,
) -> anyhow::Result<()> {
    println!("Place your ships (e.g. B4 H). Press enter for random placement.");
    for ship in FLEET {
        loop {
            print_board(session.board(Side::Human), true);
            print!("Place {} (length {}): ", ship, ship.size());
            io::stdout().flush()?;
            let mut line = String::new();
            io::stdin().read_line(&mut line)?;
            let line = line.trim();
            let board = session.board_mut(Side::Human);
            if line.is_empty() {
                let placement = board.random_placement(rng, ship)?;
                board.place_ship(placement)?;
                break;
            }
            let mut parts = line.split_whitespace();
            let coord = parts.next().and_then(parse_coord);
            let orient = parts.next().and_then(|p| p.chars().next()).unwrap_or('H');
            if let Some((x, y)) = coord {
                let orientation = if orient.eq_ignore_ascii_case(&'v') {
                    Orientation::Vertical
                } else {
                    Orientation::Horizontal
                };
                match board.place_ship(Placement::new(ship, orientation, x, y)) {
                    Ok(()) => break,
                    Err(e) => println!("Error: {}", e),
                }
            } else {
                println!("Invalid input");
            }
        }
    }
    Ok(())
}

fn human_turn(session: &mut GameSession) -> anyhow::Result<()> {
    loop {
        print_player_view(session);
        print!("Enter target (e.g. B4): ");
        io::stdout().flush()?;
        let mut line = String::new();
        io::stdin().read_line(&mut line)?;
        let Some((x, y)) = parse_coord(line.trim()) else {
            println!("Invalid coordinate");
            continue;
        };
        match session.fire(x, y) {
            Ok(report) => {
                announce_shot(report.x, report.y, &report.outcome);
                if report.turn_passed || session.is_over() {
                    return Ok(());
                }
                println!("Hit! Shoot again.");
            }
            Err(GameError::AlreadyResolved) => {
                println!("You already attacked that cell.");
            }
            Err(GameError::OutOfBounds { .. }) => {
                println!("That cell is off the board.");
            }
            Err(e) => return Err(e.into()),
        }
    }
}

fn bot_turn(
    session: &mut GameSession,
    gunner: &mut BotGunner,
    rng: &mut SmallRng,
    cadence_ms: u64,
) -> anyhow::Result<()> {
    gunner.start_turn(session, rng);
    loop {
        match gunner.tick(session, rng)? {
            BotTick::Wander { x, y } => {
                print!("\rtaking aim... {}  ", coord_label(x, y));
                io::stdout().flush()?;
                thread::sleep(Duration::from_millis(cadence_ms));
            }
            BotTick::Shot { x, y, outcome } => {
                println!();
                announce_shot(x, y, &outcome);
            }
            BotTick::TurnOver => return Ok(()),
        }
    }
}

fn announce_shot(x: usize, y: usize, outcome: &AttackOutcome) {
    match outcome {
        AttackOutcome::Hit {
            ship, sunk: true, ..
        } => println!("{} -> HIT, {} sunk!", coord_label(x, y), ship),
        AttackOutcome::Hit { .. } => println!("{} -> HIT", coord_label(x, y)),
        AttackOutcome::Miss => println!("{} -> miss", coord_label(x, y)),
    }
}

fn print_result(session: &GameSession) {
    print_player_view(session);
    if let Some(result) = session.result() {
        println!("\nWinner: {:?} in {:.1?}", result.winner, result.elapsed);
        println!(
            "You:     {} shots, {} hits ({:.0}%), {} ships sunk",
            result.human.shots,
            result.human.hits,
            result.human.accuracy() * 100.0,
            result.human.ships_sunk
        );
        println!(
            "Bot:     {} shots, {} hits ({:.0}%), {} ships sunk",
            result.bot.shots,
            result.bot.hits,
            result.bot.accuracy() * 100.0,
            result.bot.ships_sunk
        );
    }
}
