pub mod combat;
pub mod constants;
pub mod error;
pub mod game;
pub mod init;
pub mod input;
pub mod physics;
pub mod render;
pub mod rules;
pub mod scheduler;
pub mod step;
pub mod transcript;
pub mod types;

pub use constants::*;
pub use error::{ConfigError, RenderError, RunError};
pub use game::Game;
pub use init::*;
pub use input::{InputLatch, KeyBinding, KeyBindings};
pub use physics::{apply_gravity, apply_player_input, land_on_ground, physics_step};
pub use render::{render, Color, DrawCommand, Frame, Renderer};
pub use scheduler::{run, FixedTimestep, Host, RunSummary};
pub use step::step;
pub use transcript::{replay, Transcript};
pub use types::*;
