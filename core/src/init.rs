use crate::constants::*;
use crate::error::ConfigError;
use crate::input::KeyBindings;
use crate::types::*;

/// 800x400 surface with a flat floor; grounded players stand at y = 300.
pub fn arena() -> Arena {
    Arena {
        width: ARENA_WIDTH,
        height: ARENA_HEIGHT,
        ground_y: GROUND_Y,
    }
}

pub fn default_config() -> MatchConfig {
    MatchConfig {
        arena: arena(),
        tick_rate: TICK_RATE,
        bindings: KeyBindings::default(),
    }
}

pub fn check_tick_rate(tick_rate: u32) -> Result<(), ConfigError> {
    match tick_rate {
        0 => Err(ConfigError::ZeroTickRate),
        r if r > MAX_TICK_RATE => Err(ConfigError::TickRateTooHigh {
            tick_rate: r,
            max: MAX_TICK_RATE,
        }),
        _ => Ok(()),
    }
}

pub fn validate_config(config: &MatchConfig) -> Result<(), ConfigError> {
    check_tick_rate(config.tick_rate)?;
    let a = &config.arena;
    if a.width < 2.0 * PLAYER_WIDTH || a.height < PLAYER_HEIGHT {
        return Err(ConfigError::ArenaTooSmall {
            width: a.width,
            height: a.height,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
        });
    }
    if a.ground_y < 0.0 || a.ground_y + PLAYER_HEIGHT > a.height {
        return Err(ConfigError::GroundOutOfBounds { ground_y: a.ground_y });
    }
    config.bindings.validate()
}

/// Grounded at its spawn column, player one facing right and two facing left.
/// Spawn columns are clamped into narrower arenas.
pub fn spawn_player(id: PlayerId, arena: &Arena) -> PlayerState {
    let (x, f) = match id {
        PlayerId::One => (PLAYER_ONE_SPAWN_X, facing::RIGHT),
        PlayerId::Two => (PLAYER_TWO_SPAWN_X, facing::LEFT),
    };
    PlayerState {
        id,
        x: x.min(arena.width - PLAYER_WIDTH).max(0.0),
        y: arena.ground_y,
        width: PLAYER_WIDTH,
        height: PLAYER_HEIGHT,
        speed: PLAYER_SPEED,
        vy: 0.0,
        facing: f,
        jumping: false,
        health: MAX_HEALTH,
        punching: false,
        punch_timer: 0,
        hit_landed: false,
    }
}

pub fn create_initial_state(config: &MatchConfig) -> MatchState {
    MatchState {
        tick: 0,
        players: PlayerId::ALL.map(|id| spawn_player(id, &config.arena)),
        match_over: false,
        outcome: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(validate_config(&default_config()), Ok(()));
    }

    #[test]
    fn zero_tick_rate_rejected() {
        let mut config = default_config();
        config.tick_rate = 0;
        assert_eq!(validate_config(&config), Err(ConfigError::ZeroTickRate));
    }

    #[test]
    fn ground_below_floor_rejected() {
        let mut config = default_config();
        config.arena.ground_y = 350.0;
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::GroundOutOfBounds { .. })
        ));
    }

    #[test]
    fn tiny_arena_rejected() {
        let mut config = default_config();
        config.arena.width = 60.0;
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::ArenaTooSmall { .. })
        ));
    }

    #[test]
    fn initial_state_matches_spawn_table() {
        let state = create_initial_state(&default_config());
        assert_eq!(state.tick, 0);
        assert!(!state.match_over);
        assert_eq!(state.outcome, None);
        assert_eq!(state.players[0].id, PlayerId::One);
        assert_eq!(state.players[0].x, 100.0);
        assert_eq!(state.players[1].x, 650.0);
        for p in &state.players {
            assert_eq!(p.y, GROUND_Y);
            assert_eq!(p.health, MAX_HEALTH);
            assert!(!p.jumping && !p.punching);
        }
    }

    #[test]
    fn config_json_fills_default_bindings() {
        let json = r#"{"arena":{"width":800.0,"height":400.0,"ground_y":300.0},"tick_rate":30}"#;
        let config: MatchConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.tick_rate, 30);
        assert_eq!(config.bindings, KeyBindings::default());
    }
}
