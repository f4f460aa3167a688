//! Atomic stroke resolution.
//!
//! Consumes a [`Stroke`] exactly once and produces the next match state:
//! fouls first, then restorations, then scoring, then the foul streak,
//! then turn advancement and the win check. The whole batch commits in
//! one call; there is no partial application.
//!
//! ## Rule order
//!
//! 1. Striker pocketed is a foul; the striker goes back to the baseline
//!    and every coin captured in the stroke scores nothing.
//! 2. An opponent-color coin pocketed is a foul; the coin is restored to
//!    an open spot near the board center, never scored.
//! 3. Own-color coins score one point each on a clean stroke.
//! 4. The queen scores three when covered by an own coin in the same
//!    clean stroke; otherwise it returns to the center.
//! 5. A foul stroke bumps the consecutive-foul streak; the third in a
//!    row forfeits the turn and resets the streak.
//! 6. A clean stroke that pocketed at least one own coin retains the
//!    turn; anything else passes it.
//! 7. The match ends when either color is exhausted from the board, and
//!    the highest cumulative score wins.

use smallvec::SmallVec;

use super::GameResult;
use crate::board::{Board, Side};
use crate::body::{BodyId, BodyKind, BodyOwner, CoinColor};
use crate::core::state::{MatchState, TurnPhase};
use crate::stroke::{FoulKind, Stroke, StrokeRecord};

/// What one stroke did to the match, as reported to the caller. The
/// same record is appended to the match history.
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeOutcome {
    pub record: StrokeRecord,
    /// Set when this stroke ended the match.
    pub result: Option<GameResult>,
}

/// Apply a finished stroke to the match state.
///
/// The integrator has already deactivated every captured body; this
/// only interprets the event list. Total and deterministic: any event
/// list yields exactly one next state.
pub fn resolve(state: &mut MatchState, stroke: Stroke) -> StrokeOutcome {
    let player = state.active_player;
    let color = state.color_of(player);
    let board = state.board().clone();
    let player_count = state.config().player_count;

    let mut striker_pocketed = false;
    let mut queen_pocketed = false;
    let mut own_coins = 0usize;
    let mut opponent_coins: SmallVec<[BodyId; 2]> = SmallVec::new();

    for event in &stroke.events {
        match event.kind {
            BodyKind::Striker => striker_pocketed = true,
            BodyKind::Queen => queen_pocketed = true,
            BodyKind::Coin => {
                if event.owner == BodyOwner::Color(color) {
                    own_coins += 1;
                } else {
                    opponent_coins.push(event.body);
                }
            }
        }
    }

    let mut fouls: SmallVec<[FoulKind; 2]> = SmallVec::new();
    if striker_pocketed {
        fouls.push(FoulKind::StrikerPocketed);
    }
    if !opponent_coins.is_empty() {
        fouls.push(FoulKind::OpponentCoinPocketed);
    }
    let foul = !fouls.is_empty();

    // Fouled opponent coins come back near the center, never scored
    for id in &opponent_coins {
        restore_near_center(state, &board, *id);
    }

    // The queen stays captured only when covered on a clean stroke
    let queen_covered = queen_pocketed && !foul && own_coins > 0;
    if queen_pocketed && !queen_covered {
        let queen_id = state.bodies.queen().id;
        restore_near_center(state, &board, queen_id);
    }
    state.queen_pending_cover = false;

    let points = if foul {
        0
    } else {
        own_coins as i64 + if queen_covered { 3 } else { 0 }
    };
    state.players[player].score += points;

    // Foul streak over strokes: one increment per foul stroke
    let mut forced_pass = false;
    if foul {
        state.players[player].consecutive_fouls += 1;
        if state.players[player].consecutive_fouls >= 3 {
            forced_pass = true;
            state.players[player].consecutive_fouls = 0;
        }
    } else {
        state.players[player].consecutive_fouls = 0;
    }

    let retained = !foul && own_coins > 0 && !forced_pass;
    let next = if retained {
        player
    } else {
        player.next(player_count)
    };

    let result = final_result(state);

    // Striker waits, parked, at the upcoming player's baseline
    let side = Side::of(player_count, next).unwrap_or(Side::Bottom);
    state.bodies.park_striker(board.baseline(side).midpoint());

    state.stroke_counter += 1;
    state.active_player = next;
    state.phase = if result.is_some() {
        TurnPhase::GameOver
    } else {
        TurnPhase::AwaitingStrikerPlacement
    };
    state.result = result.clone();

    let record = StrokeRecord {
        stroke_number: state.stroke_counter,
        player,
        points,
        fouls,
        captures: stroke.events,
        queen_covered,
        retained_turn: retained && result.is_none(),
    };
    state.history.push_back(record.clone());

    log::info!(
        "stroke {} by {}: {} points, {} fouls, next {}",
        record.stroke_number,
        player,
        points,
        record.fouls.len(),
        next
    );
    if let Some(result) = &result {
        log::info!("match over: {:?}", result);
    }

    StrokeOutcome { record, result }
}

/// Reactivate a captured body at the nearest open spot to the board
/// center. Deterministic given the current body positions.
fn restore_near_center(state: &mut MatchState, board: &Board, id: BodyId) {
    let Some(radius) = state.bodies.get(id).map(|b| b.radius) else {
        return;
    };
    let occupied = state.bodies.occupied_circles();
    let spot = board.find_open_position(board.center(), radius, &occupied);
    state.bodies.restore(id, spot);
}

/// The win check: once either color is cleared from the board the match
/// ends and the top cumulative score decides. A shared top score between
/// some players is a shared win; between all of them, a draw.
fn final_result(state: &MatchState) -> Option<GameResult> {
    let exhausted = state.bodies.active_coins(CoinColor::White) == 0
        || state.bodies.active_coins(CoinColor::Black) == 0;
    if !exhausted {
        return None;
    }

    let winners = state.players.leaders();
    Some(if winners.len() == state.players.player_count() {
        GameResult::Draw
    } else if winners.len() == 1 {
        GameResult::Winner(winners[0])
    } else {
        GameResult::Winners(winners)
    })
}
