use boxbrawl_core::{DrawCommand, Frame, Renderer};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

/// Canvas default, restored for text drawn without an explicit font.
const DEFAULT_FONT: &str = "10px sans-serif";

/// Executes frames on a 2D canvas context.
pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        CanvasRenderer { ctx }
    }

    pub fn from_canvas_id(document: &Document, canvas_id: &str) -> Result<Self, JsValue> {
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsValue::from_str(&format!("no element with id {canvas_id:?}")))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| JsValue::from_str(&format!("#{canvas_id} is not a canvas")))?;
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| JsValue::from_str("unexpected 2d context type"))?;
        Ok(CanvasRenderer::new(ctx))
    }
}

impl Renderer for CanvasRenderer {
    type Error = JsValue;

    fn draw(&mut self, frame: &Frame) -> Result<(), JsValue> {
        for cmd in &frame.commands {
            match cmd {
                DrawCommand::Clear { width, height } => {
                    self.ctx.clear_rect(0.0, 0.0, *width, *height);
                }
                DrawCommand::FillRect {
                    x,
                    y,
                    width,
                    height,
                    color,
                } => {
                    self.ctx.set_fill_style_str(color.css());
                    self.ctx.fill_rect(*x, *y, *width, *height);
                }
                DrawCommand::Text {
                    text,
                    x,
                    y,
                    font,
                    color,
                } => {
                    self.ctx.set_font(font.as_deref().unwrap_or(DEFAULT_FONT));
                    self.ctx.set_fill_style_str(color.css());
                    self.ctx.fill_text(text, *x, *y)?;
                }
            }
        }
        Ok(())
    }
}
