//! Positioned, sized, moving entities
//!
//! An `Actor` is an axis-aligned box with a speed and a closed behaviour
//! variant (`ActorKind`). Actors never hold a reference to their level; the
//! terrain is passed in when an actor needs to query it.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::level::Grid;
use super::vector::Vector;
use crate::error::SimError;

/// Identity of an actor within its level (0 = not yet owned by a level)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ActorId(pub u32);

/// Observable type tag used by the level's win/lose rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Actor,
    Player,
    Coin,
    Fireball,
}

impl EntityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Actor => "actor",
            EntityType::Player => "player",
            EntityType::Coin => "coin",
            EntityType::Fireball => "fireball",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Vertical bobbing state of a coin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoinSpring {
    /// Resting position the bobbing offset is applied to
    pub base: Vector,
    /// Phase accumulator (radians)
    pub spring: f32,
    /// Phase advanced per unit of time
    pub speed: f32,
    /// Amplitude in cells
    pub dist: f32,
}

impl CoinSpring {
    /// Advance the phase and return the new bobbing offset
    pub fn advance(&mut self, time: f32) -> Vector {
        self.spring += self.speed * time;
        self.offset()
    }

    pub fn offset(&self) -> Vector {
        Vector::new(0.0, self.spring.sin() * self.dist)
    }
}

/// Fireball variants; they differ only in initial speed and obstacle response
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FireballKind {
    /// Arbitrary speed, bounces back on obstacles
    Bouncing,
    Horizontal,
    Vertical,
    /// Falls, then restarts from `start` on any obstacle
    Rain { start: Vector },
}

/// Behaviour variant of an actor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ActorKind {
    /// Inert box with no behaviour of its own
    Plain,
    /// Passive body; motion intent is supplied by the driver
    Player,
    Coin(CoinSpring),
    Fireball(FireballKind),
}

impl ActorKind {
    pub fn entity_type(&self) -> EntityType {
        match self {
            ActorKind::Plain => EntityType::Actor,
            ActorKind::Player => EntityType::Player,
            ActorKind::Coin(_) => EntityType::Coin,
            ActorKind::Fireball(_) => EntityType::Fireball,
        }
    }
}

/// A positioned, sized, moving entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub(crate) id: ActorId,
    /// Top-left corner
    pub pos: Vector,
    size: Vector,
    /// Displacement per unit of time
    pub speed: Vector,
    pub kind: ActorKind,
}

impl Actor {
    /// Create a plain actor, rejecting non-finite geometry
    pub fn new(pos: Vector, size: Vector, speed: Vector) -> Result<Self, SimError> {
        check_operand("pos", pos)?;
        check_operand("size", size)?;
        check_operand("speed", speed)?;
        Ok(Self {
            id: ActorId::default(),
            pos,
            size,
            speed,
            kind: ActorKind::Plain,
        })
    }

    pub(crate) fn with_kind(mut self, kind: ActorKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn id(&self) -> ActorId {
        self.id
    }

    pub fn size(&self) -> Vector {
        self.size
    }

    pub fn entity_type(&self) -> EntityType {
        self.kind.entity_type()
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Strict AABB overlap; touching edges do not intersect.
    ///
    /// An actor never intersects itself, and an actor with a negative size
    /// component is never reported as intersecting.
    pub fn is_intersect(&self, other: &Actor) -> bool {
        if std::ptr::eq(self, other) {
            return false;
        }
        if other.size.x < 0.0 || other.size.y < 0.0 {
            return false;
        }
        other.right() > self.left()
            && other.left() < self.right()
            && other.bottom() > self.top()
            && other.top() < self.bottom()
    }

    /// Position after moving at the current speed for `time`
    pub fn next_position(&self, time: f32) -> Vector {
        self.pos.plus(self.speed.times(time))
    }

    /// Advance this actor's own motion by `time` against the level terrain
    pub fn act(&mut self, time: f32, grid: &Grid) {
        match self.kind {
            ActorKind::Plain | ActorKind::Player => {}
            ActorKind::Coin(_) => self.act_coin(time),
            ActorKind::Fireball(_) => self.act_fireball(time, grid),
        }
    }
}

fn check_operand(argument: &'static str, value: Vector) -> Result<(), SimError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(SimError::InvalidOperand {
            argument,
            value: value.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn boxed(x: f32, y: f32, w: f32, h: f32) -> Actor {
        Actor::new(Vector::new(x, y), Vector::new(w, h), Vector::ZERO).unwrap()
    }

    #[test]
    fn test_geometry() {
        let actor = boxed(1.0, 2.0, 3.0, 4.0);
        assert_eq!(actor.left(), 1.0);
        assert_eq!(actor.top(), 2.0);
        assert_eq!(actor.right(), 4.0);
        assert_eq!(actor.bottom(), 6.0);
        assert_eq!(actor.entity_type(), EntityType::Actor);
    }

    #[test]
    fn test_new_rejects_non_finite() {
        let err = Actor::new(Vector::ZERO, Vector::new(f32::NAN, 1.0), Vector::ZERO).unwrap_err();
        assert!(matches!(err, SimError::InvalidOperand { argument: "size", .. }));

        let err = Actor::new(Vector::new(f32::INFINITY, 0.0), Vector::ZERO, Vector::ZERO)
            .unwrap_err();
        assert!(matches!(err, SimError::InvalidOperand { argument: "pos", .. }));

        let err = Actor::new(Vector::ZERO, Vector::ZERO, Vector::new(0.0, f32::NEG_INFINITY))
            .unwrap_err();
        assert!(matches!(err, SimError::InvalidOperand { argument: "speed", .. }));
    }

    #[test]
    fn test_not_intersecting_itself() {
        let actor = boxed(0.0, 0.0, 1.0, 1.0);
        assert!(!actor.is_intersect(&actor));

        // An identical copy is a different actor
        let twin = actor.clone();
        assert!(actor.is_intersect(&twin));
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = boxed(0.0, 0.0, 1.0, 1.0);
        assert!(!a.is_intersect(&boxed(1.0, 0.0, 1.0, 1.0)));
        assert!(!a.is_intersect(&boxed(0.0, 1.0, 1.0, 1.0)));
        assert!(!a.is_intersect(&boxed(-1.0, 0.0, 1.0, 1.0)));
        assert!(!a.is_intersect(&boxed(1.0, 1.0, 1.0, 1.0)));
    }

    #[test]
    fn test_overlap_and_containment() {
        let a = boxed(0.0, 0.0, 2.0, 2.0);
        assert!(a.is_intersect(&boxed(1.5, 1.5, 1.0, 1.0)));
        assert!(a.is_intersect(&boxed(0.5, 0.5, 0.5, 0.5)));
        assert!(boxed(0.5, 0.5, 0.5, 0.5).is_intersect(&a));
    }

    #[test]
    fn test_negative_size_never_intersects() {
        let a = boxed(0.0, 0.0, 2.0, 2.0);
        let malformed = boxed(1.0, 1.0, -0.5, 1.0);
        assert!(!a.is_intersect(&malformed));
    }

    fn unit_box() -> impl Strategy<Value = Actor> {
        (-20i32..20, -20i32..20, 1i32..5, 1i32..5)
            .prop_map(|(x, y, w, h)| boxed(x as f32, y as f32, w as f32, h as f32))
    }

    proptest! {
        #[test]
        fn never_intersects_itself(a in unit_box()) {
            prop_assert!(!a.is_intersect(&a));
        }

        #[test]
        fn disjoint_on_x_never_intersects(a in unit_box(), gap in 0i32..10, y in -20i32..20) {
            let b = boxed(a.right() + gap as f32, y as f32, 1.0, 1.0);
            prop_assert!(!a.is_intersect(&b));
            prop_assert!(!b.is_intersect(&a));
        }

        #[test]
        fn disjoint_on_y_never_intersects(a in unit_box(), gap in 0i32..10, x in -20i32..20) {
            let b = boxed(x as f32, a.bottom() + gap as f32, 1.0, 1.0);
            prop_assert!(!a.is_intersect(&b));
            prop_assert!(!b.is_intersect(&a));
        }

        #[test]
        fn shifted_copy_overlaps(a in unit_box(), dx in 0.0f32..0.9, dy in 0.0f32..0.9) {
            let b = boxed(a.left() + dx, a.top() + dy, a.size().x, a.size().y);
            prop_assert!(a.is_intersect(&b));
            prop_assert!(b.is_intersect(&a));
        }
    }
}
