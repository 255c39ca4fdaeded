//! Level state: static obstacle grid, live actors, win/lose status
//!
//! The grid is a flat row-major table of cells. Boundary checks in
//! `obstacle_at` always win over grid contents, and leaving through the
//! bottom edge counts as lava rather than wall.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::actor::{Actor, ActorId, EntityType};
use super::vector::Vector;
use crate::consts::FINISH_DELAY;

/// Static terrain tag of a grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Obstacle {
    Wall,
    Lava,
}

impl Obstacle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Obstacle::Wall => "wall",
            Obstacle::Lava => "lava",
        }
    }
}

impl fmt::Display for Obstacle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal outcome of a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelStatus {
    Won,
    Lost,
}

impl fmt::Display for LevelStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelStatus::Won => f.write_str("won"),
            LevelStatus::Lost => f.write_str("lost"),
        }
    }
}

/// Whatever the player ran into: terrain or another actor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Touched {
    Obstacle(Obstacle),
    Entity(EntityType),
}

impl From<Obstacle> for Touched {
    fn from(obstacle: Obstacle) -> Self {
        Touched::Obstacle(obstacle)
    }
}

impl From<EntityType> for Touched {
    fn from(entity: EntityType) -> Self {
        Touched::Entity(entity)
    }
}

/// Row-major obstacle table; reads outside the table are empty
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Option<Obstacle>>,
}

impl Grid {
    /// Build from possibly ragged rows; width is the longest row
    pub fn from_rows(rows: Vec<Vec<Option<Obstacle>>>) -> Self {
        let height = rows.len();
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        let mut cells = Vec::with_capacity(width * height);
        for mut row in rows {
            row.resize(width, None);
            cells.extend(row);
        }
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Obstacle> {
        if row >= self.height || col >= self.width {
            return None;
        }
        self.cells[row * self.width + col]
    }

    /// Rows top to bottom, each `width` cells long
    pub fn rows(&self) -> impl Iterator<Item = &[Option<Obstacle>]> {
        (0..self.height).map(move |row| &self.cells[row * self.width..(row + 1) * self.width])
    }

    /// Obstacle touched by the box at `pos` with `size`, if any
    pub fn obstacle_at(&self, pos: Vector, size: Vector) -> Option<Obstacle> {
        let start: Vec2 = pos.into();
        let end: Vec2 = pos.plus(size).into();

        if start.x < 0.0 || end.x > self.width as f32 || start.y < 0.0 {
            return Some(Obstacle::Wall);
        }
        if end.y > self.height as f32 {
            return Some(Obstacle::Lava);
        }

        let first = start.floor();
        let last = end.ceil();
        for row in first.y as usize..last.y as usize {
            for col in first.x as usize..last.x as usize {
                if let Some(obstacle) = self.get(row, col) {
                    return Some(obstacle);
                }
            }
        }
        None
    }
}

/// A level in play: terrain, actors and outcome
#[derive(Debug, Clone)]
pub struct Level {
    grid: Grid,
    actors: Vec<Actor>,
    status: Option<LevelStatus>,
    /// Countdown driven by the runner once the level is decided
    pub finish_delay: f32,
    next_id: u32,
}

impl Level {
    /// Create a level owning `actors`; ids are assigned in list order
    pub fn new(grid: Grid, actors: Vec<Actor>) -> Self {
        let mut level = Self {
            grid,
            actors: Vec::with_capacity(actors.len()),
            status: None,
            finish_delay: FINISH_DELAY,
            next_id: 1,
        };
        for actor in actors {
            level.add_actor(actor);
        }
        level
    }

    /// Allocate a new actor ID
    fn next_actor_id(&mut self) -> ActorId {
        let id = ActorId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Take ownership of an actor, appending it to the actor list
    pub fn add_actor(&mut self, mut actor: Actor) -> ActorId {
        let id = self.next_actor_id();
        actor.id = id;
        self.actors.push(actor);
        id
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn status(&self) -> Option<LevelStatus> {
        self.status
    }

    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.actors.iter().find(|actor| actor.id == id)
    }

    /// First actor tagged as the player
    pub fn player(&self) -> Option<&Actor> {
        self.actors
            .iter()
            .find(|actor| actor.entity_type() == EntityType::Player)
    }

    pub fn player_mut(&mut self) -> Option<&mut Actor> {
        self.actors
            .iter_mut()
            .find(|actor| actor.entity_type() == EntityType::Player)
    }

    /// The player alongside the terrain it moves through
    pub(crate) fn player_with_grid(&mut self) -> Option<(&mut Actor, &Grid)> {
        let Level { grid, actors, .. } = self;
        let grid: &Grid = grid;
        actors
            .iter_mut()
            .find(|actor| actor.entity_type() == EntityType::Player)
            .map(move |player| (player, grid))
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_some() && self.finish_delay < 0.0
    }

    /// Earliest-inserted actor intersecting `target`
    pub fn actor_at(&self, target: &Actor) -> Option<&Actor> {
        self.actors.iter().find(|actor| actor.is_intersect(target))
    }

    pub fn obstacle_at(&self, pos: Vector, size: Vector) -> Option<Obstacle> {
        self.grid.obstacle_at(pos, size)
    }

    /// Remove an actor by identity; absent ids are ignored
    pub fn remove_actor(&mut self, id: ActorId) -> Option<Actor> {
        let index = self.actors.iter().position(|actor| actor.id == id)?;
        Some(self.actors.remove(index))
    }

    /// True when no actor of `entity` type remains
    pub fn no_more_actors(&self, entity: EntityType) -> bool {
        self.actors.is_empty() || !self.actors.iter().any(|a| a.entity_type() == entity)
    }

    /// Apply the win/lose rules for something the player touched
    pub fn player_touched(&mut self, touched: impl Into<Touched>, actor: Option<ActorId>) {
        match touched.into() {
            Touched::Obstacle(Obstacle::Lava) | Touched::Entity(EntityType::Fireball) => {
                self.finish(LevelStatus::Lost);
            }
            Touched::Entity(EntityType::Coin) => {
                if let Some(id) = actor {
                    self.remove_actor(id);
                    if self.no_more_actors(EntityType::Coin) {
                        self.finish(LevelStatus::Won);
                    }
                }
            }
            _ => {}
        }
    }

    /// Run every actor's own motion for `time`, in list order
    pub fn act_all(&mut self, time: f32) {
        let Level { grid, actors, .. } = self;
        for actor in actors.iter_mut() {
            actor.act(time, grid);
        }
    }

    /// Count down the linger time after the level is decided
    pub fn advance_finish_delay(&mut self, time: f32) {
        if self.status.is_some() {
            self.finish_delay -= time;
        }
    }

    fn finish(&mut self, status: LevelStatus) {
        if self.status.is_none() {
            log::info!("Level {}", status);
            self.status = Some(status);
        }
    }
}
