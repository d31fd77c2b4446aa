use rand::rngs::SmallRng;
use rand::SeedableRng;
use seabattle::{
    AttackOutcome, ChatTrigger, FirstMove, GameError, GameSession, MatchPhase, Orientation,
    Placement, Side, FLEET, TOTAL_SHIP_CELLS,
};

fn deploy_rows(session: &mut GameSession, side: Side) {
    for (i, ship) in FLEET.into_iter().enumerate() {
        session
            .board_mut(side)
            .place_ship(Placement::new(ship, Orientation::Horizontal, 0, i * 2))
            .unwrap();
    }
}

fn ready_session(first: FirstMove) -> GameSession {
    let mut session = GameSession::new();
    deploy_rows(&mut session, Side::Human);
    deploy_rows(&mut session, Side::Bot);
    let mut rng = SmallRng::seed_from_u64(0);
    session.start(first, &mut rng).unwrap();
    session
}

#[test]
fn start_requires_both_fleets() {
    let mut rng = SmallRng::seed_from_u64(0);
    let mut session = GameSession::new();
    assert_eq!(
        session.start(FirstMove::Human, &mut rng).unwrap_err(),
        GameError::FleetNotReady
    );

    deploy_rows(&mut session, Side::Human);
    assert_eq!(
        session.start(FirstMove::Human, &mut rng).unwrap_err(),
        GameError::FleetNotReady
    );

    deploy_rows(&mut session, Side::Bot);
    session.start(FirstMove::Human, &mut rng).unwrap();
    assert_eq!(session.phase(), MatchPhase::Playing);
    assert_eq!(session.active(), Side::Human);
}

#[test]
fn firing_before_start_is_rejected() {
    let mut session = GameSession::new();
    assert_eq!(session.fire(0, 0).unwrap_err(), GameError::FleetNotReady);
}

#[test]
fn chat_trigger_tracks_the_match_phase() {
    let mut session = GameSession::new();
    assert_eq!(session.chat_trigger(), ChatTrigger::Prologue);
    deploy_rows(&mut session, Side::Human);
    deploy_rows(&mut session, Side::Bot);
    let mut rng = SmallRng::seed_from_u64(0);
    session.start(FirstMove::Human, &mut rng).unwrap();
    assert_eq!(session.chat_trigger(), ChatTrigger::Turn);
}

#[test]
fn hit_keeps_the_turn_and_miss_passes_it() {
    let mut session = ready_session(FirstMove::Human);

    // carrier anchor on the bot board
    let report = session.fire(0, 0).unwrap();
    assert!(report.outcome.is_hit());
    assert!(!report.turn_passed);
    assert_eq!(report.chat_trigger(), ChatTrigger::Hit);
    assert_eq!(session.active(), Side::Human);

    // open water
    let report = session.fire(9, 9).unwrap();
    assert_eq!(report.outcome, AttackOutcome::Miss);
    assert!(report.turn_passed);
    assert_eq!(report.chat_trigger(), ChatTrigger::Miss);
    assert_eq!(session.active(), Side::Bot);

    // now the bot shoots at the human board
    let report = session.fire(9, 9).unwrap();
    assert_eq!(report.attacker, Side::Bot);
    assert!(report.turn_passed);
    assert_eq!(session.active(), Side::Human);
}

#[test]
fn repeat_attack_does_not_consume_the_turn() {
    let mut session = ready_session(FirstMove::Human);
    session.fire(9, 9).unwrap(); // miss, turn passes to bot
    session.fire(9, 9).unwrap(); // bot misses too, back to human
    assert_eq!(session.active(), Side::Human);

    let shots_before = session.tally(Side::Human).shots;
    assert_eq!(session.fire(9, 9).unwrap_err(), GameError::AlreadyResolved);
    assert_eq!(session.active(), Side::Human);
    assert_eq!(session.tally(Side::Human).shots, shots_before);
}

#[test]
fn first_move_selection_is_honored() {
    assert_eq!(ready_session(FirstMove::Human).active(), Side::Human);
    assert_eq!(ready_session(FirstMove::Bot).active(), Side::Bot);
    let random = ready_session(FirstMove::Random);
    assert!(matches!(random.active(), Side::Human | Side::Bot));
}

#[test]
fn sweeping_the_fleet_wins_the_match() {
    let mut session = ready_session(FirstMove::Human);

    let mut targets: Vec<(usize, usize)> = Vec::new();
    for (i, ship) in FLEET.into_iter().enumerate() {
        for x in 0..ship.size() {
            targets.push((x, i * 2));
        }
    }
    assert_eq!(targets.len(), TOTAL_SHIP_CELLS);

    let (last, rest) = targets.split_last().unwrap();
    for &(x, y) in rest {
        let report = session.fire(x, y).unwrap();
        assert!(report.outcome.is_hit());
        assert!(report.winner.is_none());
        assert!(!session.is_over());
    }

    let report = session.fire(last.0, last.1).unwrap();
    assert_eq!(report.outcome.sunk_ship(), Some(FLEET[4]));
    assert_eq!(report.winner, Some(Side::Human));
    assert!(!report.turn_passed);
    assert!(session.is_over());

    let result = session.result().unwrap();
    assert_eq!(result.winner, Side::Human);
    assert_eq!(result.human.shots, 17);
    assert_eq!(result.human.hits, 17);
    assert_eq!(result.human.ships_sunk, 5);
    assert!((result.human.accuracy() - 1.0).abs() < f64::EPSILON);
    assert_eq!(result.bot.shots, 0);

    // no further shots are accepted
    assert_eq!(session.fire(9, 9).unwrap_err(), GameError::MatchOver);
}

#[test]
fn tallies_track_hits_and_misses_per_side() {
    let mut session = ready_session(FirstMove::Human);
    session.fire(0, 0).unwrap(); // hit
    session.fire(9, 9).unwrap(); // miss, turn passes
    session.fire(0, 0).unwrap(); // bot hit
    session.fire(8, 9).unwrap(); // bot miss

    let human = session.tally(Side::Human);
    assert_eq!((human.shots, human.hits), (2, 1));
    assert!((human.accuracy() - 0.5).abs() < f64::EPSILON);

    let bot = session.tally(Side::Bot);
    assert_eq!((bot.shots, bot.hits), (2, 1));
    assert_eq!(session.result(), None);
}

#[test]
fn no_result_until_the_match_ends() {
    let session = ready_session(FirstMove::Human);
    assert!(session.result().is_none());
    assert!(!session.is_over());
}
