use std::io::Read;
use std::time::{Duration, Instant};

use anyhow::{bail, Context};
use boxbrawl_core::{run, DrawCommand, Frame, Game, Host, InputEvent, MatchState, Renderer, Transcript};

const LOG_ENV: &str = "BOXBRAWL_LOG";

struct Options {
    path: Option<String>,
    realtime: bool,
    verbosity: u8,
}

fn parse_args() -> anyhow::Result<Options> {
    parse_args_from(std::env::args().skip(1))
}

fn parse_args_from(args: impl IntoIterator<Item = String>) -> anyhow::Result<Options> {
    let mut opts = Options {
        path: None,
        realtime: false,
        verbosity: 0,
    };
    for arg in args {
        match arg.as_str() {
            "--realtime" => opts.realtime = true,
            // -v, -vv, -vvv ...; anything past trace is the same as trace
            flag if flag.len() > 1 && flag[1..].bytes().all(|b| b == b'v') => {
                opts.verbosity = opts.verbosity.saturating_add((flag.len() - 1) as u8);
            }
            flag if flag.starts_with('-') => bail!("unknown flag {flag}"),
            path => {
                if opts.path.replace(path.to_string()).is_some() {
                    bail!("expected at most one transcript path");
                }
            }
        }
    }
    Ok(opts)
}

fn setup_logging(verbosity: u8) -> anyhow::Result<()> {
    let level = match (verbosity, std::env::var(LOG_ENV).ok()) {
        (0, Some(v)) => v.parse().with_context(|| format!("bad {LOG_ENV} value {v:?}"))?,
        (0, None) => log::LevelFilter::Info,
        (1, _) => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    fern::Dispatch::new()
        .format(|out, message, record| out.finish(format_args!("[{}] {}", record.level(), message)))
        .level(log::LevelFilter::Warn)
        .level_for("boxbrawl_core", level)
        .level_for("boxbrawl_host", level)
        .chain(std::io::stderr())
        .apply()
        .context("failed to install logger")
}

fn load_transcript(path: Option<&str>) -> anyhow::Result<Transcript> {
    let json_str = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read transcript file {path}"))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read transcript from stdin")?;
            buf
        }
    };
    serde_json::from_str(&json_str).context("failed to parse transcript JSON")
}

/// Feeds transcript frames into the loop and draws nowhere.
struct TranscriptHost {
    frames: Vec<Vec<InputEvent>>,
    cursor: usize,
    realtime: bool,
    commands_drawn: usize,
}

impl Renderer for TranscriptHost {
    type Error = std::convert::Infallible;

    fn draw(&mut self, frame: &Frame) -> Result<(), Self::Error> {
        self.commands_drawn += frame.commands.len();
        if log::log_enabled!(log::Level::Trace) {
            for cmd in &frame.commands {
                if let DrawCommand::Text { text, .. } = cmd {
                    log::trace!("frame {}: {text}", self.cursor);
                }
            }
        }
        Ok(())
    }
}

impl Host for TranscriptHost {
    fn poll_events(&mut self) -> Vec<InputEvent> {
        let events = self.frames.get(self.cursor).cloned().unwrap_or_default();
        self.cursor += 1;
        events
    }

    fn keep_running(&self, _state: &MatchState) -> bool {
        self.cursor < self.frames.len()
    }

    fn wait(&mut self, interval: Duration) {
        if self.realtime {
            std::thread::sleep(interval);
        }
    }
}

fn main() -> anyhow::Result<()> {
    let opts = parse_args()?;
    setup_logging(opts.verbosity)?;

    log::info!("Loading transcript...");
    let transcript = load_transcript(opts.path.as_deref())?;
    let tick_rate = transcript.config.tick_rate;
    log::info!(
        "Replaying {} frames at {} Hz{}",
        transcript.len(),
        tick_rate,
        if opts.realtime { " (real time)" } else { "" }
    );

    let mut game = Game::new(transcript.config.clone()).context("transcript config rejected")?;
    let mut host = TranscriptHost {
        frames: transcript.frames,
        cursor: 0,
        realtime: opts.realtime,
        commands_drawn: 0,
    };

    let start = Instant::now();
    let summary = run(&mut game, &mut host)?;
    log::info!(
        "Done in {:.2}s: {} frames, {} draw commands",
        start.elapsed().as_secs_f64(),
        summary.frames,
        host.commands_drawn
    );
    match summary.outcome {
        Some(outcome) => log::info!("Game Over! {outcome}"),
        None => log::info!("No knockout; health P1={} P2={}", summary.health[0], summary.health[1]),
    }

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
