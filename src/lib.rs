//! Tile Platformer - a tile-based 2D platformer simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (vectors, actors, levels, parsing, ticking)
//! - `platform`: Interfaces to the renderer, input and level storage
//! - `settings`: Data-driven runner configuration
//! - `error`: Error taxonomy shared by all fallible APIs

pub mod error;
pub mod platform;
pub mod settings;
pub mod sim;

pub use error::SimError;
pub use settings::{ArcadeTuning, Settings};

/// Game configuration constants
pub mod consts {
    /// Nominal frame time of the headless runner (60 Hz)
    pub const SIM_FRAME: f32 = 1.0 / 60.0;
    /// Largest simulation step; longer frames are split into sub-steps
    pub const MAX_STEP: f32 = 0.05;
    /// Maximum sub-steps per tick (prevent spiral of death)
    pub const MAX_SUBSTEPS: u32 = 100;
    /// Time a level lingers after it is won or lost
    pub const FINISH_DELAY: f32 = 1.0;

    /// Player box, spawned half a cell above its grid cell
    pub const PLAYER_SIZE: (f32, f32) = (0.8, 1.5);
    pub const PLAYER_OFFSET: (f32, f32) = (0.0, -0.5);

    /// Coin box, inset inside its grid cell
    pub const COIN_SIZE: (f32, f32) = (0.6, 0.6);
    pub const COIN_OFFSET: (f32, f32) = (0.2, 0.1);
    /// Phase advanced per unit of time
    pub const COIN_SPRING_SPEED: f32 = 8.0;
    /// Bobbing amplitude in cells
    pub const COIN_SPRING_DIST: f32 = 0.07;
    /// Initial phase range (lower bound inclusive, upper exclusive)
    pub const COIN_PHASE_MIN: f32 = 0.2;
    pub const COIN_PHASE_MAX: f32 = std::f32::consts::PI;

    /// Every fireball occupies exactly one cell
    pub const FIREBALL_SIZE: (f32, f32) = (1.0, 1.0);
    pub const HORIZONTAL_FIREBALL_SPEED: (f32, f32) = (2.0, 0.0);
    pub const VERTICAL_FIREBALL_SPEED: (f32, f32) = (0.0, 2.0);
    pub const FIRE_RAIN_SPEED: (f32, f32) = (0.0, 3.0);
}
