use crate::error::ConfigError;
use crate::init::{create_initial_state, validate_config};
use crate::input::{apply_event, InputLatch};
use crate::render::{render, Frame};
use crate::step::step;
use crate::types::*;

/// Owns one match: config, state and the keyboard latch.
#[derive(Clone, Debug)]
pub struct Game {
    config: MatchConfig,
    state: MatchState,
    latch: InputLatch,
}

impl Game {
    pub fn new(config: MatchConfig) -> Result<Self, ConfigError> {
        validate_config(&config)?;
        let state = create_initial_state(&config);
        Ok(Game {
            config,
            state,
            latch: InputLatch::default(),
        })
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn is_over(&self) -> bool {
        self.state.match_over
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.state.outcome
    }

    /// Returns false for keys with no binding.
    pub fn key_down(&mut self, key: &str) -> bool {
        match self.config.bindings.press(key) {
            Some(event) => {
                self.apply(event);
                true
            }
            None => {
                log::trace!("ignoring unbound key {key:?}");
                false
            }
        }
    }

    pub fn key_up(&mut self, key: &str) -> bool {
        match self.config.bindings.release(key) {
            Some(event) => {
                self.apply(event);
                true
            }
            None => false,
        }
    }

    pub fn apply(&mut self, event: InputEvent) {
        apply_event(&mut self.latch, &mut self.state, &self.config.arena, event);
    }

    pub fn update(&mut self) {
        self.state = step(&self.state, &self.latch, &self.config.arena);
    }

    pub fn frame(&self) -> Frame {
        render(&self.state, &self.config.arena)
    }

    /// Fresh match with the same config. Held keys are forgotten.
    pub fn reset(&mut self) {
        log::info!("Starting a new match");
        self.state = create_initial_state(&self.config);
        self.latch.clear();
    }
}
