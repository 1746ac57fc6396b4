use boxbrawl_core::{default_config, Game, MatchConfig, MatchState, Outcome, PlayerState, Renderer};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use web_sys::CanvasRenderingContext2d;

mod browser;
mod canvas;
mod console;

pub use canvas::CanvasRenderer;

/// Install panic hook and console logging so problems show up in the browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
    console::init(log::LevelFilter::Info);
}

/// Raise console logging to debug (punches and hits) or back to info.
#[wasm_bindgen]
pub fn set_verbose_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    console::init(level);
}

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Parse an optional JS config object; `undefined`/`null` means defaults.
fn config_from_js(config: JsValue) -> Result<MatchConfig, JsValue> {
    if config.is_undefined() || config.is_null() {
        return Ok(default_config());
    }
    // JSON.stringify → serde_json keeps externally tagged enums (bindings) intact
    let json_str = js_sys::JSON::stringify(&config)?;
    serde_json::from_str(&String::from(json_str)).map_err(js_err)
}

/// JSON-serializable player state for JS
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsPlayer {
    label: &'static str,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    vy: f64,
    facing: i32,
    jumping: bool,
    health: i32,
    punching: bool,
    punch_timer: i32,
}

/// JSON-serializable match state for JS
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsState {
    tick: u32,
    players: Vec<JsPlayer>,
    game_over: bool,
    /// "Player 1" / "Player 2", or null while running and on a draw.
    winner: Option<&'static str>,
    draw: bool,
}

fn player_to_js(p: &PlayerState) -> JsPlayer {
    JsPlayer {
        label: p.id.label(),
        x: p.x,
        y: p.y,
        width: p.width,
        height: p.height,
        vy: p.vy,
        facing: p.facing,
        jumping: p.jumping,
        health: p.health,
        punching: p.punching,
        punch_timer: p.punch_timer,
    }
}

fn state_to_js(s: &MatchState) -> JsState {
    JsState {
        tick: s.tick,
        players: s.players.iter().map(player_to_js).collect(),
        game_over: s.match_over,
        winner: match s.outcome {
            Some(Outcome::Winner(id)) => Some(id.label()),
            _ => None,
        },
        draw: s.outcome == Some(Outcome::Draw),
    }
}

/// Run the whole game on the canvas with this id: keyboard, loop and drawing.
/// `config` is optional; see `WasmGame::new`.
#[wasm_bindgen]
pub fn run_on_canvas(canvas_id: &str, config: JsValue) -> Result<(), JsValue> {
    browser::start(canvas_id, config_from_js(config)?)
}

/// Match handle for pages that drive their own loop.
#[wasm_bindgen]
pub struct WasmGame {
    inner: Game,
}

#[wasm_bindgen]
impl WasmGame {
    /// Config object: { arena: { width, height, ground_y }, tick_rate, bindings?: [{ key, player, action }] }
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<WasmGame, JsValue> {
        let inner = Game::new(config_from_js(config)?).map_err(js_err)?;
        Ok(WasmGame { inner })
    }

    /// Returns whether the key is bound.
    pub fn key_down(&mut self, key: &str) -> bool {
        self.inner.key_down(key)
    }

    pub fn key_up(&mut self, key: &str) -> bool {
        self.inner.key_up(key)
    }

    /// Advance the simulation by one tick.
    pub fn step(&mut self) {
        self.inner.update();
    }

    pub fn reset(&mut self) {
        self.inner.reset();
    }

    /// Export match state as a JS object.
    pub fn export_state(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&state_to_js(self.inner.state())).map_err(JsValue::from)
    }

    /// Export the current frame's draw list as a JS array.
    pub fn frame(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.frame().commands).map_err(JsValue::from)
    }

    /// Draw the current frame onto a 2D context.
    pub fn draw(&self, ctx: CanvasRenderingContext2d) -> Result<(), JsValue> {
        CanvasRenderer::new(ctx).draw(&self.inner.frame())
    }

    // Quick accessors
    pub fn tick(&self) -> u32 { self.inner.state().tick }
    pub fn game_over(&self) -> bool { self.inner.is_over() }
    pub fn tick_rate(&self) -> u32 { self.inner.config().tick_rate }
    pub fn winner(&self) -> Option<String> {
        match self.inner.outcome() {
            Some(Outcome::Winner(id)) => Some(id.label().to_string()),
            _ => None,
        }
    }
}
