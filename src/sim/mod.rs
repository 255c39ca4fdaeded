//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied time steps only
//! - Seeded RNG only
//! - Stable iteration order (actor insertion order)
//! - No rendering or platform dependencies

pub mod actor;
pub mod entities;
pub mod level;
pub mod parser;
pub mod tick;
pub mod vector;

pub use actor::{Actor, ActorId, ActorKind, CoinSpring, EntityType, FireballKind};
pub use entities::EntityKind;
pub use level::{Grid, Level, LevelStatus, Obstacle, Touched};
pub use parser::{ActorDict, LevelParser, Spawner};
pub use tick::{Arcade, Axis, Contact, Passive, PlayerKinematics, TickInput, TickReport, move_and_collide, tick};
pub use vector::Vector;
