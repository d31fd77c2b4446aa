use rand::rngs::SmallRng;
use rand::SeedableRng;
use seabattle::{BotGunner, BotTick, FirstMove, GameSession, Side};
use serde_json::json;

fn main() -> anyhow::Result<()> {
    seabattle::init_logging();
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: {} <seed> <games>", args[0]);
        std::process::exit(1);
    }
    let seed: u64 = args[1].parse()?;
    let games: u64 = args[2].parse()?;

    let mut wins = (0u32, 0u32);
    let mut summaries = Vec::new();
    for i in 0..games {
        let mut rng = SmallRng::seed_from_u64(seed.wrapping_add(i));
        let mut session = GameSession::new();
        session.auto_deploy(&mut rng)?;
        session.start(FirstMove::Random, &mut rng)?;

        let mut gunners = [BotGunner::new(Side::Human), BotGunner::new(Side::Bot)];
        while !session.is_over() {
            let idx = match session.active() {
                Side::Human => 0,
                Side::Bot => 1,
            };
            let gunner = &mut gunners[idx];
            gunner.start_turn(&session, &mut rng);
            while !matches!(gunner.tick(&mut session, &mut rng)?, BotTick::TurnOver) {}
        }

        let result = session
            .result()
            .ok_or_else(|| anyhow::anyhow!("game ended without a result"))?;
        match result.winner {
            Side::Human => wins.0 += 1,
            Side::Bot => wins.1 += 1,
        }
        summaries.push(json!({
            "winner": result.winner,
            "shots": { "human": result.human.shots, "bot": result.bot.shots },
            "accuracy": { "human": result.human.accuracy(), "bot": result.bot.accuracy() },
            "ships_sunk": { "human": result.human.ships_sunk, "bot": result.bot.ships_sunk },
        }));
    }

    let report = json!({
        "games": games,
        "wins": { "human": wins.0, "bot": wins.1 },
        "results": summaries,
    });
    println!("{}", serde_json::to_string(&report)?);
    Ok(())
}
