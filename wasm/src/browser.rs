use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use boxbrawl_core::{FixedTimestep, Game, MatchConfig, Renderer};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::KeyboardEvent;

use crate::canvas::CanvasRenderer;

/// Starts a new match once the current one is decided.
pub const REMATCH_KEY: &str = "r";

type FrameCallback = Closure<dyn FnMut(f64)>;

/// Everything the page's callbacks share.
struct App {
    game: Game,
    renderer: CanvasRenderer,
    timestep: FixedTimestep,
    last_timestamp: Option<f64>,
}

impl App {
    fn on_key_down(&mut self, event: &KeyboardEvent) {
        let key = event.key();
        if self.game.is_over() && key == REMATCH_KEY {
            self.game.reset();
            return;
        }
        if self.game.key_down(&key) {
            // arrow keys would otherwise scroll the page
            event.prevent_default();
        }
    }

    fn on_key_up(&mut self, event: &KeyboardEvent) {
        if self.game.key_up(&event.key()) {
            event.prevent_default();
        }
    }

    /// rAF timestamps are milliseconds.
    fn on_animation_frame(&mut self, timestamp: f64) -> Result<(), JsValue> {
        let elapsed_ms = self
            .last_timestamp
            .map(|last| (timestamp - last).max(0.0))
            .unwrap_or(0.0);
        self.last_timestamp = Some(timestamp);

        let due = self.timestep.advance(Duration::from_secs_f64(elapsed_ms / 1000.0));
        for _ in 0..due {
            self.game.update();
        }
        self.renderer.draw(&self.game.frame())
    }
}

fn request_animation_frame(callback: &FrameCallback) {
    let Some(window) = web_sys::window() else {
        log::error!("no window; animation loop stopped");
        return;
    };
    if let Err(e) = window.request_animation_frame(callback.as_ref().unchecked_ref()) {
        log::error!("requestAnimationFrame failed: {e:?}");
    }
}

/// Wire keyboard listeners and the animation loop to the canvas with
/// `canvas_id`. The loop runs until the page is closed.
pub fn start(canvas_id: &str, config: MatchConfig) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let renderer = CanvasRenderer::from_canvas_id(&document, canvas_id)?;
    let timestep =
        FixedTimestep::new(config.tick_rate).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let game = Game::new(config).map_err(|e| JsValue::from_str(&e.to_string()))?;

    let app = Rc::new(RefCell::new(App {
        game,
        renderer,
        timestep,
        last_timestamp: None,
    }));

    let down_app = app.clone();
    let on_down = Closure::<dyn FnMut(KeyboardEvent)>::new(move |e: KeyboardEvent| {
        down_app.borrow_mut().on_key_down(&e);
    });
    document.add_event_listener_with_callback("keydown", on_down.as_ref().unchecked_ref())?;
    on_down.forget();

    let up_app = app.clone();
    let on_up = Closure::<dyn FnMut(KeyboardEvent)>::new(move |e: KeyboardEvent| {
        up_app.borrow_mut().on_key_up(&e);
    });
    document.add_event_listener_with_callback("keyup", on_up.as_ref().unchecked_ref())?;
    on_up.forget();

    // The callback re-schedules itself through this slot.
    let slot: Rc<RefCell<Option<FrameCallback>>> = Rc::new(RefCell::new(None));
    let next = slot.clone();
    *slot.borrow_mut() = Some(Closure::new(move |timestamp: f64| {
        if let Err(e) = app.borrow_mut().on_animation_frame(timestamp) {
            log::error!("frame failed, stopping: {e:?}");
            return;
        }
        if let Some(callback) = next.borrow().as_ref() {
            request_animation_frame(callback);
        }
    }));
    if let Some(callback) = slot.borrow().as_ref() {
        request_animation_frame(callback);
    }

    log::info!("boxbrawl started on #{canvas_id}");
    Ok(())
}
