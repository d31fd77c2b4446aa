use rand::rngs::SmallRng;
use rand::SeedableRng;
use seabattle::{
    BotGunner, BotTick, FirstMove, GameSession, Side, BOARD_SIZE, BOT_BASE_STEPS,
    BOT_STEPS_PER_HIT,
};

fn started_session(seed: u64, first: FirstMove) -> (GameSession, SmallRng) {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut session = GameSession::new();
    session.auto_deploy(&mut rng).unwrap();
    session.start(first, &mut rng).unwrap();
    (session, rng)
}

#[test]
fn wander_budget_escalates_with_consecutive_hits() {
    assert_eq!(BOT_BASE_STEPS, 5);
    assert_eq!(BOT_STEPS_PER_HIT, 2);
    assert_eq!(BotGunner::wander_budget(0), 5);
    assert_eq!(BotGunner::wander_budget(1), 7);
    assert_eq!(BotGunner::wander_budget(2), 9);
}

#[test]
fn bot_wanders_base_steps_before_shooting() {
    let (mut session, mut rng) = started_session(11, FirstMove::Bot);
    let mut gunner = BotGunner::new(Side::Bot);
    gunner.start_turn(&session, &mut rng);

    for step in 0..BOT_BASE_STEPS {
        match gunner.tick(&mut session, &mut rng).unwrap() {
            BotTick::Wander { x, y } => {
                assert!(x < BOARD_SIZE && y < BOARD_SIZE, "step {step} left the grid");
            }
            other => panic!("expected wander at step {step}, got {other:?}"),
        }
    }
    match gunner.tick(&mut session, &mut rng).unwrap() {
        BotTick::Shot { .. } => {}
        other => panic!("expected shot after the wander budget, got {other:?}"),
    }
}

#[test]
fn committed_target_rerolls_off_resolved_cells() {
    let (mut session, mut rng) = started_session(23, FirstMove::Bot);
    // reveal every empty cell on the human board; only ship cells remain
    // attackable, so any committed shot that did not re-roll would be
    // rejected as already resolved
    let board = session.board_mut(Side::Human);
    let mut open = Vec::new();
    for y in 0..BOARD_SIZE {
        for x in 0..BOARD_SIZE {
            if board.cell(x, y).unwrap().is_empty() {
                open.push((x, y));
            }
        }
    }
    for (x, y) in open {
        board.resolve_attack(x, y).unwrap();
    }

    let mut gunner = BotGunner::new(Side::Bot);
    gunner.start_turn(&session, &mut rng);
    loop {
        match gunner.tick(&mut session, &mut rng).unwrap() {
            BotTick::Wander { .. } => continue,
            BotTick::Shot { outcome, .. } => {
                assert!(outcome.is_hit(), "shot landed on a resolved cell");
                break;
            }
            BotTick::TurnOver => panic!("turn ended without a shot"),
        }
    }
}

#[test]
fn wander_budget_grows_after_each_hit() {
    let (mut session, mut rng) = started_session(31, FirstMove::Bot);
    // with only ship cells left unresolved every shot is a hit, so the
    // wander stretches between shots are deterministic: 5, then 7, then 9
    let board = session.board_mut(Side::Human);
    let mut open = Vec::new();
    for y in 0..BOARD_SIZE {
        for x in 0..BOARD_SIZE {
            if board.cell(x, y).unwrap().is_empty() {
                open.push((x, y));
            }
        }
    }
    for (x, y) in open {
        board.resolve_attack(x, y).unwrap();
    }

    let mut gunner = BotGunner::new(Side::Bot);
    gunner.start_turn(&session, &mut rng);

    for expected in [5u32, 7, 9] {
        let mut wanders = 0;
        loop {
            match gunner.tick(&mut session, &mut rng).unwrap() {
                BotTick::Wander { .. } => wanders += 1,
                BotTick::Shot { outcome, .. } => {
                    assert!(outcome.is_hit());
                    break;
                }
                BotTick::TurnOver => panic!("turn ended mid-streak"),
            }
        }
        assert_eq!(wanders, expected);
    }
    assert_eq!(gunner.consecutive_hits(), 3);
}

#[test]
fn miss_ends_the_turn_and_resets_the_streak() {
    let (mut session, mut rng) = started_session(5, FirstMove::Bot);
    let mut gunner = BotGunner::new(Side::Bot);
    gunner.start_turn(&session, &mut rng);

    let mut last_outcome = None;
    loop {
        match gunner.tick(&mut session, &mut rng).unwrap() {
            BotTick::Wander { .. } => continue,
            BotTick::Shot { outcome, .. } => last_outcome = Some(outcome),
            BotTick::TurnOver => break,
        }
    }
    if session.is_over() {
        return; // bot swept the board in one turn; nothing more to check
    }
    let last = last_outcome.expect("turn ended without a shot");
    assert!(!last.is_hit(), "turn ended on a hit");
    assert_eq!(gunner.consecutive_hits(), 0);
    assert_eq!(session.active(), Side::Human);
}

#[test]
fn machine_stops_once_the_match_is_over() {
    let (mut session, mut rng) = started_session(47, FirstMove::Bot);
    // leave only ship cells so the bot sinks the whole fleet in one turn
    let board = session.board_mut(Side::Human);
    let mut open = Vec::new();
    for y in 0..BOARD_SIZE {
        for x in 0..BOARD_SIZE {
            if board.cell(x, y).unwrap().is_empty() {
                open.push((x, y));
            }
        }
    }
    for (x, y) in open {
        board.resolve_attack(x, y).unwrap();
    }

    let mut gunner = BotGunner::new(Side::Bot);
    gunner.start_turn(&session, &mut rng);
    let mut shots = 0;
    loop {
        match gunner.tick(&mut session, &mut rng).unwrap() {
            BotTick::Wander { .. } => continue,
            BotTick::Shot { .. } => shots += 1,
            BotTick::TurnOver => break,
        }
    }
    assert!(session.is_over());
    assert_eq!(shots, 17);
    // the winning hit still counts toward the streak
    assert_eq!(gunner.consecutive_hits(), 17);
    // once over, every further tick is a no-op
    assert_eq!(
        gunner.tick(&mut session, &mut rng).unwrap(),
        BotTick::TurnOver
    );
}

#[test]
fn gunner_defers_when_it_is_not_its_turn() {
    let (mut session, mut rng) = started_session(3, FirstMove::Human);
    let mut gunner = BotGunner::new(Side::Bot);
    gunner.start_turn(&session, &mut rng);
    assert_eq!(
        gunner.tick(&mut session, &mut rng).unwrap(),
        BotTick::TurnOver
    );
    // and the human board was not touched
    assert_eq!(session.tally(Side::Bot).shots, 0);
}
