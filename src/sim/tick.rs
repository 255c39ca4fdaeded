//! Simulation stepping
//!
//! One call to `tick` advances a level by a frame's worth of time, split
//! into sub-steps no longer than `MAX_STEP`. Each sub-step:
//! 1. every actor runs its own motion (`Level::act_all`)
//! 2. the player's speed is steered from input and it moves axis by axis
//! 3. terrain and actor contacts feed `Level::player_touched`
//! 4. the finish countdown advances once the level is decided
//!
//! Collision is detect-then-resolve per sub-step; fast movers can tunnel
//! through thin obstacles when sub-steps are long.

use super::actor::{Actor, EntityType};
use super::level::{Grid, Level, LevelStatus, Obstacle};
use super::vector::Vector;
use crate::consts::{MAX_STEP, MAX_SUBSTEPS};
use crate::settings::ArcadeTuning;

/// Movement keys held during a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// Obstacles that refused a move, per axis
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Contact {
    pub x: Option<Obstacle>,
    pub y: Option<Obstacle>,
}

impl Contact {
    pub fn hits(&self) -> impl Iterator<Item = (Axis, Obstacle)> {
        [(Axis::X, self.x), (Axis::Y, self.y)]
            .into_iter()
            .filter_map(|(axis, hit)| hit.map(|obstacle| (axis, obstacle)))
    }
}

/// Extension point mapping input to player speed (gravity, jumping, ...)
///
/// The core never moves the player on its own. Implementations decide the
/// speed before each move and how it changes when a move is refused.
pub trait PlayerKinematics {
    /// Speed to move with for the coming sub-step
    fn steer(&mut self, speed: Vector, _input: &TickInput, _time: f32) -> Vector {
        speed
    }

    /// Speed after a move along `axis` was refused by `obstacle`
    fn blocked(
        &mut self,
        _axis: Axis,
        _obstacle: Obstacle,
        speed: Vector,
        _input: &TickInput,
    ) -> Vector {
        speed
    }
}

/// Leaves the player's speed exactly as the driver set it
#[derive(Debug, Clone, Copy, Default)]
pub struct Passive;

impl PlayerKinematics for Passive {}

/// Run left/right, fall under gravity, jump off the ground
#[derive(Debug, Clone, Default)]
pub struct Arcade {
    pub tuning: ArcadeTuning,
}

impl Arcade {
    pub fn new(tuning: ArcadeTuning) -> Self {
        Self { tuning }
    }
}

impl PlayerKinematics for Arcade {
    fn steer(&mut self, speed: Vector, input: &TickInput, time: f32) -> Vector {
        let mut x = 0.0;
        if input.left {
            x -= self.tuning.x_speed;
        }
        if input.right {
            x += self.tuning.x_speed;
        }
        Vector::new(x, speed.y + self.tuning.gravity * time)
    }

    fn blocked(&mut self, axis: Axis, _obstacle: Obstacle, speed: Vector, input: &TickInput) -> Vector {
        match axis {
            Axis::X => speed,
            // Landing while up is held turns into a jump
            Axis::Y if input.up && speed.y > 0.0 => Vector::new(speed.x, -self.tuning.jump_speed),
            Axis::Y => Vector::new(speed.x, 0.0),
        }
    }
}

/// What happened during one `tick`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// Sub-steps actually simulated
    pub steps: u32,
    /// Terrain the player bumped into
    pub obstacles: Vec<Obstacle>,
    /// Actors the player touched
    pub touched: Vec<EntityType>,
    pub status: Option<LevelStatus>,
}

/// Move `actor` by its speed, X first then Y; a refused axis stays put
pub fn move_and_collide(actor: &mut Actor, time: f32, grid: &Grid) -> Contact {
    let mut contact = Contact::default();

    let next = actor.pos.plus(Vector::new(actor.speed.x * time, 0.0));
    match grid.obstacle_at(next, actor.size()) {
        Some(obstacle) => contact.x = Some(obstacle),
        None => actor.pos = next,
    }

    let next = actor.pos.plus(Vector::new(0.0, actor.speed.y * time));
    match grid.obstacle_at(next, actor.size()) {
        Some(obstacle) => contact.y = Some(obstacle),
        None => actor.pos = next,
    }

    contact
}

/// Advance `level` by `time`, unless it is already finished
///
/// At most `MAX_SUBSTEPS` sub-steps run; longer frames are clamped to
/// `MAX_STEP * MAX_SUBSTEPS`. Non-finite or non-positive `time` does nothing.
pub fn tick<K>(level: &mut Level, input: &TickInput, time: f32, kinematics: &mut K) -> TickReport
where
    K: PlayerKinematics + ?Sized,
{
    let mut report = TickReport::default();
    if time.is_finite() && time > 0.0 {
        let time = time.min(MAX_STEP * MAX_SUBSTEPS as f32);
        let steps = ((time / MAX_STEP).ceil().max(1.0) as u32).min(MAX_SUBSTEPS);
        let step = time / steps as f32;
        for _ in 0..steps {
            if level.is_finished() {
                break;
            }
            step_once(level, input, step, kinematics, &mut report);
            report.steps += 1;
        }
    }
    report.status = level.status();
    report
}

fn step_once<K>(
    level: &mut Level,
    input: &TickInput,
    step: f32,
    kinematics: &mut K,
    report: &mut TickReport,
) where
    K: PlayerKinematics + ?Sized,
{
    level.act_all(step);

    let mut contact = Contact::default();
    if let Some((player, grid)) = level.player_with_grid() {
        player.speed = kinematics.steer(player.speed, input, step);
        contact = move_and_collide(player, step, grid);
        for (axis, obstacle) in contact.hits() {
            player.speed = kinematics.blocked(axis, obstacle, player.speed, input);
        }
    }

    for (_, obstacle) in contact.hits() {
        report.obstacles.push(obstacle);
        level.player_touched(obstacle, None);
    }

    let hit = level
        .player()
        .and_then(|player| level.actor_at(player))
        .map(|other| (other.entity_type(), other.id()));
    if let Some((entity, id)) = hit {
        report.touched.push(entity);
        level.player_touched(entity, Some(id));
    }

    level.advance_finish_delay(step);
}
