//! Rules scenario verification.
//!
//! Each test replays one of the canonical carrom situations against the
//! stroke resolver with a hand-built capture event list, the same shape
//! the integrator produces, and checks the resulting scores, fouls, and
//! turn order.

use carrom_core::core::{MatchConfig, MatchState, PlayerId, TurnPhase};
use carrom_core::rules::{resolve, GameResult};
use carrom_core::stroke::{CaptureEvent, FoulKind, Stroke};
use carrom_core::{BodyId, BodyOwner, CoinColor, PocketId};

fn new_match(player_count: usize) -> MatchState {
    MatchState::new(MatchConfig::new(player_count)).unwrap()
}

/// Deactivate a body and fabricate the capture event the integrator
/// would have emitted for it.
fn capture(state: &mut MatchState, id: BodyId, step: u32) -> CaptureEvent {
    let body = *state.bodies.get(id).unwrap();
    state.bodies.get_mut(id).unwrap().active = false;
    CaptureEvent {
        body: id,
        kind: body.kind,
        owner: body.owner,
        pocket: PocketId(0),
        step,
    }
}

fn own_coin(state: &MatchState, nth: usize) -> BodyId {
    let color = state.color_of(state.active_player);
    state
        .bodies
        .bodies()
        .iter()
        .filter(|b| b.active && b.owner == BodyOwner::Color(color))
        .nth(nth)
        .unwrap()
        .id
}

fn stroke_of(events: Vec<CaptureEvent>) -> Stroke {
    Stroke {
        events: events.into_iter().collect(),
        steps: 120,
    }
}

/// Scenario 1: one own coin pocketed, nothing else. One point, and the
/// same player strikes again.
#[test]
fn test_own_coin_scores_and_retains_turn() {
    let mut state = new_match(2);
    let coin = own_coin(&state, 0);
    let event = capture(&mut state, coin, 14);

    let outcome = resolve(&mut state, stroke_of(vec![event]));

    assert_eq!(outcome.record.points, 1);
    assert!(outcome.record.retained_turn);
    assert_eq!(state.players[PlayerId::new(0)].score, 1);
    assert_eq!(state.active_player, PlayerId::new(0));
}

/// Scenario 2: the queen alone, no own coin. She returns to the center,
/// nothing is scored, the pending flag is down, and the turn passes.
#[test]
fn test_queen_alone_returns_and_turn_passes() {
    let mut state = new_match(2);
    let queen = state.bodies.queen().id;
    let event = capture(&mut state, queen, 30);

    let outcome = resolve(&mut state, stroke_of(vec![event]));

    assert_eq!(outcome.record.points, 0);
    assert!(!outcome.record.queen_covered);
    assert!(state.bodies.queen().active);
    assert!(!state.queen_pending_cover);
    assert_eq!(state.players[PlayerId::new(0)].score, 0);
    assert_eq!(state.active_player, PlayerId::new(1));
}

/// Scenario 3: queen and an own coin in the same stroke. Three for the
/// queen plus one for the coin, and the turn continues.
#[test]
fn test_queen_covered_in_same_stroke() {
    let mut state = new_match(2);
    let queen = state.bodies.queen().id;
    let coin = own_coin(&state, 2);
    let events = vec![
        capture(&mut state, queen, 11),
        capture(&mut state, coin, 26),
    ];

    let outcome = resolve(&mut state, stroke_of(events));

    assert_eq!(outcome.record.points, 4);
    assert!(outcome.record.queen_covered);
    assert!(outcome.record.retained_turn);
    assert!(!state.bodies.queen().active);
    assert_eq!(state.players[PlayerId::new(0)].score, 4);
    assert_eq!(state.active_player, PlayerId::new(0));
}

/// Scenario 4: striker and an own coin together. The foul nullifies the
/// coin's point, the striker goes back to the baseline, and the turn
/// passes.
#[test]
fn test_striker_foul_nullifies_scoring() {
    let mut state = new_match(2);
    let coin = own_coin(&state, 0);
    let striker = state.bodies.striker().id;
    let events = vec![
        capture(&mut state, coin, 8),
        capture(&mut state, striker, 17),
    ];

    let outcome = resolve(&mut state, stroke_of(events));

    assert_eq!(outcome.record.points, 0);
    assert_eq!(outcome.record.fouls.as_slice(), [FoulKind::StrikerPocketed]);
    assert_eq!(state.players[PlayerId::new(0)].score, 0);
    assert_eq!(state.players[PlayerId::new(0)].consecutive_fouls, 1);
    // The coin stays off the board; the striker waits at a baseline
    assert!(!state.bodies.get(coin).unwrap().active);
    assert!(!state.bodies.striker().active);
    assert_eq!(state.active_player, PlayerId::new(1));
}

/// Scenario 5: three consecutive foul strokes. The counter resets after
/// the third and the turn is forced away even though that stroke also
/// pocketed an own coin.
#[test]
fn test_three_consecutive_fouls_forfeit_turn() {
    let mut state = new_match(2);
    let striker = state.bodies.striker().id;

    for expected in [1u8, 2] {
        let event = capture(&mut state, striker, 5);
        resolve(&mut state, stroke_of(vec![event]));
        assert_eq!(state.players[PlayerId::new(0)].consecutive_fouls, expected);
        state.active_player = PlayerId::new(0);
    }

    let coin = own_coin(&state, 1);
    let events = vec![
        capture(&mut state, striker, 3),
        capture(&mut state, coin, 6),
    ];
    let outcome = resolve(&mut state, stroke_of(events));

    assert!(!outcome.record.retained_turn);
    assert_eq!(state.players[PlayerId::new(0)].consecutive_fouls, 0);
    assert_eq!(state.active_player, PlayerId::new(1));
    assert_eq!(state.players[PlayerId::new(0)].score, 0);
}

/// Scenario 6: clearing your color ends the match, but the higher
/// cumulative score decides the winner.
#[test]
fn test_clearing_color_loses_on_score() {
    let mut state = new_match(2);
    state.players[PlayerId::new(0)].score = 2;
    state.players[PlayerId::new(1)].score = 6;

    // Take every white coin off the board but one, then pocket the last
    let white: Vec<BodyId> = state
        .bodies
        .bodies()
        .iter()
        .filter(|b| b.owner == BodyOwner::Color(CoinColor::White))
        .map(|b| b.id)
        .collect();
    for id in &white[..white.len() - 1] {
        state.bodies.get_mut(*id).unwrap().active = false;
    }
    let event = capture(&mut state, white[white.len() - 1], 40);

    let outcome = resolve(&mut state, stroke_of(vec![event]));

    assert_eq!(state.bodies.active_coins(CoinColor::White), 0);
    assert_eq!(outcome.result, Some(GameResult::Winner(PlayerId::new(1))));
    assert_eq!(state.phase, TurnPhase::GameOver);
    assert_eq!(state.players[PlayerId::new(0)].score, 3);
}

/// Resolution is atomic and deterministic: applying the same event list
/// to two clones of a state yields identical results.
#[test]
fn test_resolution_is_reproducible() {
    let mut state = new_match(4);
    state.players[PlayerId::new(0)].score = 2;
    let queen = state.bodies.queen().id;
    let own = own_coin(&state, 0);
    let opponent = {
        let color = state.color_of(state.active_player).opponent();
        state
            .bodies
            .bodies()
            .iter()
            .find(|b| b.active && b.owner == BodyOwner::Color(color))
            .unwrap()
            .id
    };
    let events = vec![
        capture(&mut state, queen, 2),
        capture(&mut state, own, 9),
        capture(&mut state, opponent, 9),
    ];

    let mut left = state.clone();
    let mut right = state.clone();
    let outcome_left = resolve(&mut left, stroke_of(events.clone()));
    let outcome_right = resolve(&mut right, stroke_of(events));

    assert_eq!(outcome_left, outcome_right);
    assert_eq!(left, right);
    assert_eq!(left.history, right.history);
}

/// Opponent-coin fouls restore the coin: the board census is unchanged
/// after resolution.
#[test]
fn test_opponent_coin_census_preserved() {
    let mut state = new_match(2);
    let color = state.color_of(state.active_player).opponent();
    let opponent = state
        .bodies
        .bodies()
        .iter()
        .find(|b| b.active && b.owner == BodyOwner::Color(color))
        .unwrap()
        .id;
    let before = state.bodies.active_coins(color);
    let event = capture(&mut state, opponent, 13);

    resolve(&mut state, stroke_of(vec![event]));

    assert_eq!(state.bodies.active_coins(color), before);
    assert_eq!(state.players[PlayerId::new(0)].consecutive_fouls, 1);
}

/// Four-player matches rotate the turn through all seats on scoreless
/// strokes.
#[test]
fn test_four_player_turn_rotation() {
    let mut state = new_match(4);

    for expected in [1u8, 2, 3, 0] {
        resolve(&mut state, Stroke::empty(60));
        assert_eq!(state.active_player, PlayerId::new(expected));
    }
    assert_eq!(state.stroke_counter, 4);
}
