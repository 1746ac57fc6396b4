use crate::combat::resolve_punches;
use crate::input::InputLatch;
use crate::physics::physics_step;
use crate::rules::check_knockout;
use crate::types::*;

/// Core deterministic transition function.
///
/// Sub-step order:
///  0. Early return if match_over (state frozen, tick included)
///  1. Physics per player (held movement, gravity, ground)
///  2. Combat (hit resolution, punch timers)
///  3. Knockout check
///  4. Advance tick
pub fn step(prev: &MatchState, latch: &InputLatch, arena: &Arena) -> MatchState {
    // 0. Nothing moves once the match is decided
    if prev.match_over {
        return prev.clone();
    }

    // 1. Physics
    let players = prev
        .players
        .map(|p| physics_step(&p, &latch.held(p.id), arena));

    // 2. Combat
    let combat = resolve_punches(&players);
    let players = combat.players;

    // 3. Knockout
    let outcome = check_knockout(&players);
    if let Some(outcome) = outcome {
        log::info!("Game over at tick {}: {}", prev.tick + 1, outcome);
    }

    // 4. Advance tick
    MatchState {
        tick: prev.tick + 1,
        players,
        match_over: outcome.is_some(),
        outcome,
    }
}
