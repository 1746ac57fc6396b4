//! Punch state machine and hit resolution.
//!
//! Idle → Punching → Recovery → Idle, all driven by one timer that counts
//! down once per tick. The punch is live while the timer is above
//! `PUNCH_COOLDOWN - PUNCH_DURATION`, and a swing lands at most once.

use crate::constants::*;
use crate::types::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PunchPhase {
    Idle,
    Punching,
    Recovery,
}

pub fn punch_phase(p: &PlayerState) -> PunchPhase {
    if p.punching {
        PunchPhase::Punching
    } else if p.punch_timer > 0 {
        PunchPhase::Recovery
    } else {
        PunchPhase::Idle
    }
}

pub fn can_punch(p: &PlayerState) -> bool {
    punch_phase(p) == PunchPhase::Idle
}

pub fn try_start_punch(p: &PlayerState) -> PlayerState {
    if !can_punch(p) {
        return *p;
    }
    log::debug!("{} punches", p.id);
    PlayerState {
        punching: true,
        punch_timer: PUNCH_COOLDOWN,
        hit_landed: false,
        ..*p
    }
}

/// Strict AABB test; boxes that only share an edge do not overlap.
pub fn overlaps(a: &PlayerState, b: &PlayerState) -> bool {
    a.x < b.x + b.width && a.x + a.width > b.x && a.y < b.y + b.height && a.y + a.height > b.y
}

/// One tick of the timer, recomputing whether the punch is still live.
pub fn tick_punch_timer(p: &PlayerState) -> PlayerState {
    let punch_timer = (p.punch_timer - 1).max(0);
    PlayerState {
        punch_timer,
        punching: p.punching && punch_timer > PUNCH_COOLDOWN - PUNCH_DURATION,
        ..*p
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hit {
    pub attacker: PlayerId,
    pub victim: PlayerId,
    pub damage: i32,
}

pub struct CombatResult {
    pub players: [PlayerState; 2],
    pub hits: Vec<Hit>,
}

/// Resolve both players' punches against the same positions, apply damage,
/// then tick both timers.
pub fn resolve_punches(players: &[PlayerState; 2]) -> CombatResult {
    let mut updated = *players;
    let mut hits = Vec::new();

    for attacker in PlayerId::ALL {
        let victim = attacker.opponent();
        let a = &players[attacker.index()];
        if a.punching && !a.hit_landed && overlaps(a, &players[victim.index()]) {
            updated[attacker.index()].hit_landed = true;
            let v = &mut updated[victim.index()];
            v.health = (v.health - PUNCH_DAMAGE).max(0);
            log::debug!("{} hits {} ({} health left)", attacker, victim, v.health);
            hits.push(Hit {
                attacker,
                victim,
                damage: PUNCH_DAMAGE,
            });
        }
    }

    CombatResult {
        players: updated.map(|p| tick_punch_timer(&p)),
        hits,
    }
}
