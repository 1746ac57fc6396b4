use thiserror::Error;

/// Boxed surface error, kept as the source of [`RunError::Render`].
pub type RenderError = Box<dyn std::error::Error + Send + Sync>;

use crate::types::{Action, PlayerId};

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("tick rate must be at least 1")]
    ZeroTickRate,
    #[error("tick rate {tick_rate} exceeds the maximum of {max}")]
    TickRateTooHigh { tick_rate: u32, max: u32 },
    #[error("arena {width}x{height} cannot hold two {player_width}x{player_height} players")]
    ArenaTooSmall {
        width: f64,
        height: f64,
        player_width: f64,
        player_height: f64,
    },
    #[error("ground level {ground_y} lies outside the arena")]
    GroundOutOfBounds { ground_y: f64 },
    #[error("key {key:?} is bound more than once")]
    DuplicateKey { key: String },
    #[error("{player} has no key bound to {action:?}")]
    MissingBinding { player: PlayerId, action: Action },
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("renderer failed: {0}")]
    Render(#[source] RenderError),
}
