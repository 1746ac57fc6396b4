//! Key bindings and the per-player pressed-state latch.
//!
//! Movement is level-triggered: physics reads the latch every tick.
//! Jump and punch are edge-triggered: they act on the press itself.

use serde::{Deserialize, Serialize};

use crate::combat::try_start_punch;
use crate::error::ConfigError;
use crate::physics::try_jump;
use crate::types::*;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBinding {
    /// DOM `KeyboardEvent.key` value, matched case-sensitively.
    pub key: String,
    pub player: PlayerId,
    pub action: Action,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyBindings(pub Vec<KeyBinding>);

impl Default for KeyBindings {
    fn default() -> Self {
        let bind = |key: &str, player, action| KeyBinding {
            key: key.to_string(),
            player,
            action,
        };
        KeyBindings(vec![
            bind("a", PlayerId::One, Action::MoveLeft),
            bind("d", PlayerId::One, Action::MoveRight),
            bind("w", PlayerId::One, Action::Jump),
            bind("e", PlayerId::One, Action::Punch),
            bind("ArrowLeft", PlayerId::Two, Action::MoveLeft),
            bind("ArrowRight", PlayerId::Two, Action::MoveRight),
            bind("ArrowUp", PlayerId::Two, Action::Jump),
            bind("l", PlayerId::Two, Action::Punch),
        ])
    }
}

impl KeyBindings {
    pub fn resolve(&self, key: &str) -> Option<(PlayerId, Action)> {
        self.0
            .iter()
            .find(|b| b.key == key)
            .map(|b| (b.player, b.action))
    }

    /// Every key bound at most once, every (player, action) reachable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (i, b) in self.0.iter().enumerate() {
            if self.0[..i].iter().any(|prev| prev.key == b.key) {
                return Err(ConfigError::DuplicateKey { key: b.key.clone() });
            }
        }
        for player in PlayerId::ALL {
            for action in Action::ALL {
                if !self.0.iter().any(|b| b.player == player && b.action == action) {
                    return Err(ConfigError::MissingBinding { player, action });
                }
            }
        }
        Ok(())
    }

    pub fn press(&self, key: &str) -> Option<InputEvent> {
        self.resolve(key).map(|(p, a)| InputEvent::Press(p, a))
    }

    pub fn release(&self, key: &str) -> Option<InputEvent> {
        self.resolve(key).map(|(p, a)| InputEvent::Release(p, a))
    }
}

/// Snapshot of one player's held actions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeldActions([bool; 4]);

impl HeldActions {
    pub fn contains(&self, action: Action) -> bool {
        self.0[action.index()]
    }

    pub fn with(mut self, action: Action) -> Self {
        self.0[action.index()] = true;
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputLatch {
    held: [HeldActions; 2],
}

impl InputLatch {
    pub fn press(&mut self, player: PlayerId, action: Action) {
        self.held[player.index()].0[action.index()] = true;
    }

    pub fn release(&mut self, player: PlayerId, action: Action) {
        self.held[player.index()].0[action.index()] = false;
    }

    pub fn held(&self, player: PlayerId) -> HeldActions {
        self.held[player.index()]
    }

    pub fn clear(&mut self) {
        self.held = Default::default();
    }
}

/// Latch the event and fire any edge-triggered action it carries.
/// Player state is left alone once the match is over.
pub fn apply_event(latch: &mut InputLatch, state: &mut MatchState, arena: &Arena, event: InputEvent) {
    match event {
        InputEvent::Release(player, action) => latch.release(player, action),
        InputEvent::Press(player, action) => {
            latch.press(player, action);
            if state.match_over {
                return;
            }
            let p = state.player_mut(player);
            match action {
                Action::Jump => *p = try_jump(p, arena),
                Action::Punch => *p = try_start_punch(p),
                Action::MoveLeft | Action::MoveRight => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;
    use crate::init::{create_initial_state, default_config};

    #[test]
    fn default_bindings_are_valid() {
        assert_eq!(KeyBindings::default().validate(), Ok(()));
    }

    #[test]
    fn resolves_known_keys_only() {
        let b = KeyBindings::default();
        assert_eq!(b.resolve("w"), Some((PlayerId::One, Action::Jump)));
        assert_eq!(b.resolve("l"), Some((PlayerId::Two, Action::Punch)));
        assert_eq!(b.resolve("q"), None);
        // case-sensitive, like the DOM key values
        assert_eq!(b.resolve("W"), None);
    }

    #[test]
    fn duplicate_key_rejected() {
        let mut b = KeyBindings::default();
        b.0.push(KeyBinding {
            key: "a".to_string(),
            player: PlayerId::Two,
            action: Action::Punch,
        });
        assert_eq!(
            b.validate(),
            Err(ConfigError::DuplicateKey { key: "a".to_string() })
        );
    }

    #[test]
    fn missing_action_rejected() {
        let mut b = KeyBindings::default();
        b.0.retain(|k| k.key != "ArrowUp");
        assert_eq!(
            b.validate(),
            Err(ConfigError::MissingBinding {
                player: PlayerId::Two,
                action: Action::Jump
            })
        );
    }

    #[test]
    fn latch_tracks_press_and_release() {
        let mut latch = InputLatch::default();
        latch.press(PlayerId::One, Action::MoveLeft);
        assert!(latch.held(PlayerId::One).contains(Action::MoveLeft));
        assert!(!latch.held(PlayerId::Two).contains(Action::MoveLeft));
        latch.release(PlayerId::One, Action::MoveLeft);
        assert!(!latch.held(PlayerId::One).contains(Action::MoveLeft));
    }

    #[test]
    fn jump_press_fires_once() {
        let config = default_config();
        let mut state = create_initial_state(&config);
        let mut latch = InputLatch::default();
        let jump = InputEvent::Press(PlayerId::One, Action::Jump);

        apply_event(&mut latch, &mut state, &config.arena, jump);
        assert_eq!(state.players[0].vy, JUMP_VELOCITY);
        assert!(state.players[0].jumping);

        // Still on the ground but already jumping: no second impulse
        state.players[0].vy = -3.0;
        apply_event(&mut latch, &mut state, &config.arena, jump);
        assert_eq!(state.players[0].vy, -3.0);
    }

    #[test]
    fn punch_press_starts_swing() {
        let config = default_config();
        let mut state = create_initial_state(&config);
        let mut latch = InputLatch::default();
        apply_event(
            &mut latch,
            &mut state,
            &config.arena,
            InputEvent::Press(PlayerId::Two, Action::Punch),
        );
        assert!(state.players[1].punching);
        assert_eq!(state.players[1].punch_timer, PUNCH_COOLDOWN);
        assert!(!state.players[0].punching);
    }

    #[test]
    fn presses_ignored_after_match_over() {
        let config = default_config();
        let mut state = create_initial_state(&config);
        state.match_over = true;
        let before = state.clone();
        let mut latch = InputLatch::default();
        for action in [Action::Jump, Action::Punch] {
            apply_event(
                &mut latch,
                &mut state,
                &config.arena,
                InputEvent::Press(PlayerId::One, action),
            );
        }
        assert_eq!(state, before);
        // The latch itself still follows the keyboard
        assert!(latch.held(PlayerId::One).contains(Action::Punch));
    }
}
