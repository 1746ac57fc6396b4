use std::fmt;

use serde::{Deserialize, Serialize};

use crate::input::KeyBindings;

// ── Identity ────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerId {
    One,
    Two,
}

impl PlayerId {
    pub const ALL: [PlayerId; 2] = [PlayerId::One, PlayerId::Two];

    pub fn index(self) -> usize {
        match self {
            PlayerId::One => 0,
            PlayerId::Two => 1,
        }
    }

    pub fn opponent(self) -> PlayerId {
        match self {
            PlayerId::One => PlayerId::Two,
            PlayerId::Two => PlayerId::One,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PlayerId::One => "Player 1",
            PlayerId::Two => "Player 2",
        }
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ── Input ───────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Jump,
    Punch,
}

impl Action {
    pub const ALL: [Action; 4] = [Action::MoveLeft, Action::MoveRight, Action::Jump, Action::Punch];

    pub fn index(self) -> usize {
        match self {
            Action::MoveLeft => 0,
            Action::MoveRight => 1,
            Action::Jump => 2,
            Action::Punch => 3,
        }
    }
}

/// A resolved key transition, already mapped through the bindings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    Press(PlayerId, Action),
    Release(PlayerId, Action),
}

/// Facing direction: Right = 1, Left = -1.
pub mod facing {
    pub const RIGHT: i32 = 1;
    pub const LEFT: i32 = -1;
}

// ── Player ──────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub id: PlayerId,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub speed: f64,
    pub vy: f64,
    pub facing: i32,
    pub jumping: bool,
    pub health: i32,
    pub punching: bool,
    /// Counts down once per tick from PUNCH_COOLDOWN after a punch starts.
    pub punch_timer: i32,
    /// Set once the current swing has connected.
    pub hit_landed: bool,
}

// ── Arena ───────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f64,
    pub height: f64,
    pub ground_y: f64,
}

// ── Match State ─────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Winner(PlayerId),
    /// Both players knocked out on the same tick.
    Draw,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Winner(id) => write!(f, "{id} Wins!"),
            Outcome::Draw => f.write_str("Draw!"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchState {
    pub tick: u32,
    /// Index = `PlayerId::index()`.
    pub players: [PlayerState; 2],
    pub match_over: bool,
    pub outcome: Option<Outcome>,
}

impl MatchState {
    pub fn player(&self, id: PlayerId) -> &PlayerState {
        &self.players[id.index()]
    }

    pub fn player_mut(&mut self, id: PlayerId) -> &mut PlayerState {
        &mut self.players[id.index()]
    }
}

// ── Config ──────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    pub arena: Arena,
    pub tick_rate: u32,
    #[serde(default)]
    pub bindings: KeyBindings,
}
