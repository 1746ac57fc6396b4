//! Read-only presentation: turns a match state into a list of draw calls.
//! Hosts execute the list on whatever surface they own.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::types::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Blue,
    Orange,
    Yellow,
    Green,
    Black,
    White,
}

impl Color {
    /// CSS colour keyword.
    pub fn css(self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Blue => "blue",
            Color::Orange => "orange",
            Color::Yellow => "yellow",
            Color::Green => "green",
            Color::Black => "black",
            Color::White => "white",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DrawCommand {
    Clear {
        width: f64,
        height: f64,
    },
    FillRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Color,
    },
    Text {
        text: String,
        x: f64,
        y: f64,
        /// CSS font shorthand; `None` means the surface default.
        font: Option<String>,
        color: Color,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub commands: Vec<DrawCommand>,
}

/// A surface that can execute a frame's draw calls.
pub trait Renderer {
    type Error;

    fn draw(&mut self, frame: &Frame) -> Result<(), Self::Error>;
}

pub const GAME_OVER_FONT: &str = "30px Arial";

fn body_color(id: PlayerId) -> Color {
    match id {
        PlayerId::One => Color::Red,
        PlayerId::Two => Color::Blue,
    }
}

fn flash_color(id: PlayerId) -> Color {
    match id {
        PlayerId::One => Color::Orange,
        PlayerId::Two => Color::Yellow,
    }
}

fn fill(x: f64, y: f64, width: f64, height: f64, color: Color) -> DrawCommand {
    DrawCommand::FillRect {
        x,
        y,
        width,
        height,
        color,
    }
}

/// Flash box in front of the player, at head height.
fn punch_flash(p: &PlayerState) -> DrawCommand {
    let x = if p.facing == facing::RIGHT {
        p.x + p.width
    } else {
        p.x - PUNCH_FLASH_SIZE
    };
    fill(x, p.y, PUNCH_FLASH_SIZE, PUNCH_FLASH_SIZE, flash_color(p.id))
}

/// Left edge of a player's health bar.
fn hud_x(id: PlayerId, arena: &Arena) -> f64 {
    match id {
        PlayerId::One => HUD_MARGIN,
        PlayerId::Two => arena.width - (MAX_HEALTH as f64 * HEALTH_BAR_SCALE + HUD_MARGIN),
    }
}

pub fn game_over_text(outcome: Option<Outcome>) -> String {
    match outcome {
        Some(o) => format!("Game Over! {o}"),
        None => "Game Over!".to_string(),
    }
}

pub fn render(state: &MatchState, arena: &Arena) -> Frame {
    let mut commands = vec![DrawCommand::Clear {
        width: arena.width,
        height: arena.height,
    }];

    for p in &state.players {
        commands.push(fill(p.x, p.y, p.width, p.height, body_color(p.id)));
    }

    for p in state.players.iter().filter(|p| p.punching) {
        commands.push(punch_flash(p));
    }

    for p in &state.players {
        let health = p.health.max(0) as f64;
        commands.push(fill(
            hud_x(p.id, arena),
            HUD_MARGIN,
            health * HEALTH_BAR_SCALE,
            HEALTH_BAR_HEIGHT,
            Color::Green,
        ));
    }
    for p in &state.players {
        commands.push(DrawCommand::Text {
            text: p.id.label().to_string(),
            x: hud_x(p.id, arena),
            y: HUD_MARGIN + HEALTH_BAR_HEIGHT + HUD_MARGIN,
            font: None,
            color: Color::Black,
        });
    }

    if state.match_over {
        commands.push(DrawCommand::Text {
            text: game_over_text(state.outcome),
            x: arena.width / 2.0 - 100.0,
            y: arena.height / 2.0,
            font: Some(GAME_OVER_FONT.to_string()),
            color: Color::White,
        });
    }

    Frame { commands }
}
