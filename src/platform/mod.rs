//! Platform abstraction layer
//!
//! The simulation never draws, polls keys or touches storage itself. The
//! runner plugs these collaborators in:
//! - `InputSource`: movement keys held this frame
//! - `Renderer`: reads a level once per frame
//! - `LevelLoader`: supplies level schemes, one string per row

pub mod input;
pub mod storage;

pub use input::ScriptedInput;
pub use storage::{JsonLevelLoader, StaticLevels};

use crate::error::SimError;
use crate::sim::{Level, TickInput};

/// A level scheme: one string per grid row
pub type Scheme = Vec<String>;

pub trait InputSource {
    /// Keys held for the coming frame
    fn poll(&mut self) -> TickInput;
}

pub trait Renderer {
    /// Draw one frame; the level is only borrowed for reading
    fn draw(&mut self, level: &Level);
}

pub trait LevelLoader {
    /// Every scheme in play order
    fn load_schemes(&self) -> Result<Vec<Scheme>, SimError>;
}
