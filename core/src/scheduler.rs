//! Fixed-rate loop driving `Game::update` then rendering, independent of
//! any particular display or clock.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::MAX_TICKS_PER_FRAME;
use crate::error::{ConfigError, RenderError, RunError};
use crate::game::Game;
use crate::init::check_tick_rate;
use crate::render::Renderer;
use crate::types::*;

/// Converts irregular host frame times into whole simulation ticks.
#[derive(Clone, Debug)]
pub struct FixedTimestep {
    interval: Duration,
    accumulator: Duration,
    max_ticks: u32,
}

impl FixedTimestep {
    pub fn new(tick_rate: u32) -> Result<Self, ConfigError> {
        check_tick_rate(tick_rate)?;
        Ok(FixedTimestep {
            interval: Duration::from_nanos(1_000_000_000 / tick_rate as u64),
            accumulator: Duration::ZERO,
            max_ticks: MAX_TICKS_PER_FRAME,
        })
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Number of ticks due after `elapsed` more wall time. Backlog beyond
    /// the per-frame cap is dropped so a stalled host does not spiral.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.accumulator += elapsed;
        let due = self.accumulator.as_nanos() / self.interval.as_nanos();
        if due > self.max_ticks as u128 {
            log::warn!("dropping {} ticks of backlog", due - self.max_ticks as u128);
            self.accumulator = Duration::ZERO;
            return self.max_ticks;
        }
        let due = due as u32;
        self.accumulator -= self.interval * due;
        due
    }
}

/// What the loop needs from its surroundings: input, a surface and a clock.
pub trait Host: Renderer {
    /// Input that arrived since the previous tick, in arrival order.
    fn poll_events(&mut self) -> Vec<InputEvent>;

    fn keep_running(&self, state: &MatchState) -> bool;

    /// Block until the next tick is due. Headless hosts may return at once.
    fn wait(&mut self, interval: Duration);
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Loop iterations, including frames rendered after the knockout.
    pub frames: u64,
    /// Simulation tick the match stopped at.
    pub tick: u32,
    pub match_over: bool,
    pub outcome: Option<Outcome>,
    pub health: [i32; 2],
}

impl RunSummary {
    pub fn of(frames: u64, state: &MatchState) -> Self {
        RunSummary {
            frames,
            tick: state.tick,
            match_over: state.match_over,
            outcome: state.outcome,
            health: state.players.map(|p| p.health),
        }
    }
}

/// Each tick: feed pending input, update, render, present, wait.
/// Paced at the game's configured tick rate. Rendering continues after the
/// knockout until the host stops the loop.
pub fn run<H>(game: &mut Game, host: &mut H) -> Result<RunSummary, RunError>
where
    H: Host,
    H::Error: Into<RenderError>,
{
    let timestep = FixedTimestep::new(game.config().tick_rate)?;
    let mut frames = 0u64;

    while host.keep_running(game.state()) {
        for event in host.poll_events() {
            game.apply(event);
        }
        game.update();
        host.draw(&game.frame())
            .map_err(|e| RunError::Render(e.into()))?;
        frames += 1;
        host.wait(timestep.interval());
    }

    log::debug!("loop stopped after {frames} frames");
    Ok(RunSummary::of(frames, game.state()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MAX_TICK_RATE;
    use crate::init::default_config;
    use crate::render::Frame;

    #[test]
    fn zero_rate_rejected() {
        assert_eq!(FixedTimestep::new(0).unwrap_err(), ConfigError::ZeroTickRate);
    }

    #[test]
    fn sub_nanosecond_interval_rejected() {
        assert_eq!(
            FixedTimestep::new(2_000_000_000).unwrap_err(),
            ConfigError::TickRateTooHigh {
                tick_rate: 2_000_000_000,
                max: MAX_TICK_RATE
            }
        );
        let mut ts = FixedTimestep::new(MAX_TICK_RATE).unwrap();
        assert_eq!(ts.interval(), Duration::from_millis(1));
        assert_eq!(ts.advance(Duration::from_millis(3)), 3);
    }

    #[test]
    fn accumulates_partial_frames() {
        let mut ts = FixedTimestep::new(50).unwrap();
        assert_eq!(ts.interval(), Duration::from_millis(20));
        assert_eq!(ts.advance(Duration::from_millis(15)), 0);
        assert_eq!(ts.advance(Duration::from_millis(15)), 1);
        // 10ms carried over + 50ms
        assert_eq!(ts.advance(Duration::from_millis(50)), 3);
        assert_eq!(ts.advance(Duration::from_millis(10)), 0);
        assert_eq!(ts.advance(Duration::from_millis(10)), 1);
    }

    #[test]
    fn stall_is_capped() {
        let mut ts = FixedTimestep::new(60).unwrap();
        assert_eq!(ts.advance(Duration::from_secs(3)), MAX_TICKS_PER_FRAME);
        assert_eq!(ts.advance(Duration::ZERO), 0);
    }

    /// Scripted host: one batch of events per frame, stops after `limit` frames.
    struct ScriptHost {
        script: Vec<Vec<InputEvent>>,
        frame: usize,
        limit: usize,
        drawn: Vec<Frame>,
        waited: Duration,
    }

    impl Renderer for ScriptHost {
        type Error = String;

        fn draw(&mut self, frame: &Frame) -> Result<(), String> {
            self.drawn.push(frame.clone());
            Ok(())
        }
    }

    impl Host for ScriptHost {
        fn poll_events(&mut self) -> Vec<InputEvent> {
            let events = self.script.get(self.frame).cloned().unwrap_or_default();
            self.frame += 1;
            events
        }

        fn keep_running(&self, _state: &MatchState) -> bool {
            self.frame < self.limit
        }

        fn wait(&mut self, interval: Duration) {
            self.waited += interval;
        }
    }

    #[test]
    fn run_updates_then_renders_each_tick() {
        let config = MatchConfig {
            tick_rate: 50,
            ..default_config()
        };
        let mut game = Game::new(config).unwrap();
        let mut host = ScriptHost {
            script: vec![vec![InputEvent::Press(PlayerId::One, Action::MoveRight)]],
            frame: 0,
            limit: 4,
            drawn: Vec::new(),
            waited: Duration::ZERO,
        };
        let summary = run(&mut game, &mut host).unwrap();
        assert_eq!(summary.frames, 4);
        assert_eq!(summary.tick, 4);
        assert_eq!(host.drawn.len(), 4);
        assert_eq!(host.waited, Duration::from_millis(80));
        assert_eq!(game.state().players[0].x, 120.0);
        assert_eq!(host.drawn[3], game.frame());
    }

    struct BrokenSurface;

    impl Renderer for BrokenSurface {
        type Error = &'static str;

        fn draw(&mut self, _frame: &Frame) -> Result<(), &'static str> {
            Err("context lost")
        }
    }

    impl Host for BrokenSurface {
        fn poll_events(&mut self) -> Vec<InputEvent> {
            Vec::new()
        }

        fn keep_running(&self, _state: &MatchState) -> bool {
            true
        }

        fn wait(&mut self, _interval: Duration) {}
    }

    #[test]
    fn render_failure_stops_loop() {
        let mut game = Game::new(default_config()).unwrap();
        let err = run(&mut game, &mut BrokenSurface).unwrap_err();
        assert_eq!(err.to_string(), "renderer failed: context lost");
        let source = std::error::Error::source(&err).expect("surface error kept as source");
        assert_eq!(source.to_string(), "context lost");
    }
}
