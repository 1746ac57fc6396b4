use crate::types::*;

pub fn is_knocked_out(p: &PlayerState) -> bool {
    p.health <= 0
}

/// Decide the match from the current healths. Simultaneous knockouts draw.
pub fn check_knockout(players: &[PlayerState; 2]) -> Option<Outcome> {
    match (is_knocked_out(&players[0]), is_knocked_out(&players[1])) {
        (true, true) => Some(Outcome::Draw),
        (true, false) => Some(Outcome::Winner(PlayerId::Two)),
        (false, true) => Some(Outcome::Winner(PlayerId::One)),
        (false, false) => None,
    }
}
