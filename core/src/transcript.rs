use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::game::Game;
use crate::types::*;

/// A recorded match: the config plus the input events delivered before
/// each tick's update.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    pub config: MatchConfig,
    /// One entry per tick, possibly empty.
    pub frames: Vec<Vec<InputEvent>>,
}

impl Transcript {
    pub fn new(config: MatchConfig) -> Self {
        Transcript {
            config,
            frames: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Append `n` ticks with no input.
    pub fn idle(&mut self, n: usize) -> &mut Self {
        self.frames.extend(std::iter::repeat_with(Vec::new).take(n));
        self
    }

    pub fn push(&mut self, events: Vec<InputEvent>) -> &mut Self {
        self.frames.push(events);
        self
    }
}

/// Play every frame of the transcript through a fresh game. Frames after
/// the knockout are still fed in and change nothing.
pub fn replay(transcript: &Transcript) -> Result<MatchState, ConfigError> {
    let mut game = Game::new(transcript.config.clone())?;
    for events in &transcript.frames {
        for event in events {
            game.apply(*event);
        }
        game.update();
    }
    Ok(game.state().clone())
}
