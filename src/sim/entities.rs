//! Concrete entity types and their motion rules
//!
//! - Player: passive body, moved by the driver (see `tick`)
//! - Coin: bobs vertically around its resting spot, never collides
//! - Fireballs: constant speed, detect-then-resolve against the terrain

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::actor::{Actor, ActorKind, CoinSpring, FireballKind};
use super::level::Grid;
use super::vector::Vector;
use crate::consts::*;
use crate::error::SimError;

/// Spawnable entity kinds a level scheme symbol can map to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Player,
    Coin,
    HorizontalFireball,
    VerticalFireball,
    FireRain,
}

impl EntityKind {
    /// Build the entity whose grid cell is `pos`
    pub fn spawn<R: Rng>(self, pos: Vector, rng: &mut R) -> Result<Actor, SimError> {
        match self {
            EntityKind::Player => Actor::player(pos),
            EntityKind::Coin => Actor::coin(pos, rng),
            EntityKind::HorizontalFireball => Actor::horizontal_fireball(pos),
            EntityKind::VerticalFireball => Actor::vertical_fireball(pos),
            EntityKind::FireRain => Actor::fire_rain(pos),
        }
    }
}

impl Actor {
    /// Player standing in cell `pos`; its box pokes half a cell above it
    pub fn player(pos: Vector) -> Result<Self, SimError> {
        let actor = Actor::new(
            pos.plus(PLAYER_OFFSET.into()),
            PLAYER_SIZE.into(),
            Vector::ZERO,
        )?;
        Ok(actor.with_kind(ActorKind::Player))
    }

    /// Coin in cell `pos` with a random initial bobbing phase
    pub fn coin<R: Rng>(pos: Vector, rng: &mut R) -> Result<Self, SimError> {
        let base = pos.plus(COIN_OFFSET.into());
        let actor = Actor::new(base, COIN_SIZE.into(), Vector::ZERO)?;
        let spring = CoinSpring {
            base,
            spring: rng.random_range(COIN_PHASE_MIN..COIN_PHASE_MAX),
            speed: COIN_SPRING_SPEED,
            dist: COIN_SPRING_DIST,
        };
        Ok(actor.with_kind(ActorKind::Coin(spring)))
    }

    /// Fireball with an arbitrary speed that bounces back off obstacles
    pub fn fireball(pos: Vector, speed: Vector) -> Result<Self, SimError> {
        let actor = Actor::new(pos, FIREBALL_SIZE.into(), speed)?;
        Ok(actor.with_kind(ActorKind::Fireball(FireballKind::Bouncing)))
    }

    pub fn horizontal_fireball(pos: Vector) -> Result<Self, SimError> {
        let actor = Actor::new(pos, FIREBALL_SIZE.into(), HORIZONTAL_FIREBALL_SPEED.into())?;
        Ok(actor.with_kind(ActorKind::Fireball(FireballKind::Horizontal)))
    }

    pub fn vertical_fireball(pos: Vector) -> Result<Self, SimError> {
        let actor = Actor::new(pos, FIREBALL_SIZE.into(), VERTICAL_FIREBALL_SPEED.into())?;
        Ok(actor.with_kind(ActorKind::Fireball(FireballKind::Vertical)))
    }

    /// Falling fireball that restarts from its spawn cell when it lands
    pub fn fire_rain(pos: Vector) -> Result<Self, SimError> {
        let actor = Actor::new(pos, FIREBALL_SIZE.into(), FIRE_RAIN_SPEED.into())?;
        Ok(actor.with_kind(ActorKind::Fireball(FireballKind::Rain { start: pos })))
    }

    pub(crate) fn act_coin(&mut self, time: f32) {
        if let ActorKind::Coin(ref mut spring) = self.kind {
            let offset = spring.advance(time);
            self.pos = spring.base.plus(offset);
        }
    }

    pub(crate) fn act_fireball(&mut self, time: f32, grid: &Grid) {
        let next = self.next_position(time);
        if grid.obstacle_at(next, self.size()).is_some() {
            self.handle_obstacle();
        } else {
            self.pos = next;
        }
    }

    /// Fireball response to a blocked move; position stays put this tick
    pub fn handle_obstacle(&mut self) {
        match self.kind {
            ActorKind::Fireball(FireballKind::Rain { start }) => self.pos = start,
            ActorKind::Fireball(_) => self.speed = self.speed.times(-1.0),
            _ => {}
        }
    }
}
