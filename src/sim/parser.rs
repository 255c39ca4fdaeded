//! Level scheme parser
//!
//! A scheme is one string per grid row. `x` is wall, `!` is lava, and any
//! symbol found in the parser's `ActorDict` spawns an entity at that cell.

use std::collections::HashMap;
use std::fmt;

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::actor::Actor;
use super::entities::EntityKind;
use super::level::{Grid, Level, Obstacle};
use super::vector::Vector;
use crate::error::SimError;

/// Custom fallible entity constructor
pub type SpawnFn = Box<dyn Fn(Vector, &mut Pcg32) -> Result<Actor, SimError>>;

/// How a dictionary symbol turns into an actor
pub enum Spawner {
    Builtin(EntityKind),
    Custom(SpawnFn),
}

impl Spawner {
    pub fn spawn(&self, pos: Vector, rng: &mut Pcg32) -> Result<Actor, SimError> {
        match self {
            Spawner::Builtin(kind) => kind.spawn(pos, rng),
            Spawner::Custom(build) => build(pos, rng),
        }
    }
}

impl fmt::Debug for Spawner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Spawner::Builtin(kind) => f.debug_tuple("Builtin").field(kind).finish(),
            Spawner::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Symbol to entity-constructor dictionary
#[derive(Debug, Default)]
pub struct ActorDict {
    entries: HashMap<char, Spawner>,
}

impl ActorDict {
    pub fn new() -> Self {
        Self::default()
    }

    /// `@` player, `o` coin, `=` horizontal fireball, `|` vertical fireball, `v` fire rain
    pub fn standard() -> Self {
        Self::new()
            .with('@', EntityKind::Player)
            .with('o', EntityKind::Coin)
            .with('=', EntityKind::HorizontalFireball)
            .with('|', EntityKind::VerticalFireball)
            .with('v', EntityKind::FireRain)
    }

    pub fn with(mut self, symbol: char, kind: EntityKind) -> Self {
        self.entries.insert(symbol, Spawner::Builtin(kind));
        self
    }

    pub fn with_custom<F>(mut self, symbol: char, build: F) -> Self
    where
        F: Fn(Vector, &mut Pcg32) -> Result<Actor, SimError> + 'static,
    {
        self.entries.insert(symbol, Spawner::Custom(Box::new(build)));
        self
    }

    pub fn get(&self, symbol: char) -> Option<&Spawner> {
        self.entries.get(&symbol)
    }

    pub fn contains(&self, symbol: char) -> bool {
        self.entries.contains_key(&symbol)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<HashMap<char, EntityKind>> for ActorDict {
    fn from(kinds: HashMap<char, EntityKind>) -> Self {
        let entries = kinds
            .into_iter()
            .map(|(symbol, kind)| (symbol, Spawner::Builtin(kind)))
            .collect();
        Self { entries }
    }
}

/// Turns schemes into levels; reusable across many parses
#[derive(Debug)]
pub struct LevelParser {
    dict: ActorDict,
    rng: Pcg32,
}

impl LevelParser {
    pub fn new(dict: ActorDict) -> Self {
        Self::with_seed(dict, 0)
    }

    /// Parser whose random entity state (coin phases) follows `seed`
    pub fn with_seed(dict: ActorDict, seed: u64) -> Self {
        Self {
            dict,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn dict(&self) -> &ActorDict {
        &self.dict
    }

    /// Tile language terrain symbols; not configurable
    pub fn obstacle_from_symbol(symbol: char) -> Option<Obstacle> {
        match symbol {
            'x' => Some(Obstacle::Wall),
            '!' => Some(Obstacle::Lava),
            _ => None,
        }
    }

    pub fn actor_from_symbol(&self, symbol: Option<char>) -> Option<&Spawner> {
        symbol.and_then(|s| self.dict.get(s))
    }

    pub fn create_grid<S: AsRef<str>>(&self, scheme: &[S]) -> Grid {
        let rows = scheme
            .iter()
            .map(|line| {
                line.as_ref()
                    .chars()
                    .map(Self::obstacle_from_symbol)
                    .collect()
            })
            .collect();
        Grid::from_rows(rows)
    }

    /// Spawn every dictionary symbol; failing constructors yield no actor
    pub fn create_actors<S: AsRef<str>>(&mut self, scheme: &[S]) -> Vec<Actor> {
        let mut actors = Vec::new();
        for (y, line) in scheme.iter().enumerate() {
            for (x, symbol) in line.as_ref().chars().enumerate() {
                let Some(spawner) = self.dict.get(symbol) else {
                    continue;
                };
                let cell = Vector::new(x as f32, y as f32);
                match spawner.spawn(cell, &mut self.rng) {
                    Ok(actor) => actors.push(actor),
                    Err(e) => log::warn!("Skipping '{}' at {}: {}", symbol, cell, e),
                }
            }
        }
        actors
    }

    pub fn parse<S: AsRef<str>>(&mut self, scheme: &[S]) -> Level {
        let grid = self.create_grid(scheme);
        let actors = self.create_actors(scheme);
        log::debug!(
            "Parsed level {}x{} with {} actors",
            grid.width(),
            grid.height(),
            actors.len()
        );
        Level::new(grid, actors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::EntityType;

    #[test]
    fn test_obstacle_from_symbol() {
        assert_eq!(LevelParser::obstacle_from_symbol('x'), Some(Obstacle::Wall));
        assert_eq!(LevelParser::obstacle_from_symbol('!'), Some(Obstacle::Lava));
        assert_eq!(LevelParser::obstacle_from_symbol(' '), None);
        assert_eq!(LevelParser::obstacle_from_symbol('@'), None);
    }

    #[test]
    fn test_actor_from_symbol() {
        let parser = LevelParser::new(ActorDict::standard());
        assert!(matches!(
            parser.actor_from_symbol(Some('@')),
            Some(Spawner::Builtin(EntityKind::Player))
        ));
        assert!(parser.actor_from_symbol(Some('#')).is_none());
        assert!(parser.actor_from_symbol(None).is_none());
    }

    #[test]
    fn test_create_grid_ragged() {
        let parser = LevelParser::new(ActorDict::new());
        let grid = parser.create_grid(&["x", "  !", ""]);
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.get(0, 0), Some(Obstacle::Wall));
        assert_eq!(grid.get(1, 2), Some(Obstacle::Lava));
        assert_eq!(grid.get(2, 0), None);
    }

    #[test]
    fn test_create_actors_positions() {
        let mut parser = LevelParser::new(ActorDict::standard());
        let actors = parser.create_actors(&["  =", "|  "]);
        assert_eq!(actors.len(), 2);
        assert_eq!(actors[0].pos, Vector::new(2.0, 0.0));
        assert_eq!(actors[1].pos, Vector::new(0.0, 1.0));
    }

    #[test]
    fn test_create_actors_empty_dict() {
        let mut parser = LevelParser::new(ActorDict::new());
        assert!(parser.create_actors(&["@o=", "xx"]).is_empty());
    }

    #[test]
    fn test_failing_constructor_is_skipped() {
        let dict = ActorDict::standard()
            .with_custom('?', |_, _| Err(SimError::construction("broken entity")));
        let mut parser = LevelParser::new(dict);
        let actors = parser.create_actors(&["?@?", "o?"]);
        let types: Vec<_> = actors.iter().map(Actor::entity_type).collect();
        assert_eq!(types, vec![EntityType::Player, EntityType::Coin]);
    }

    #[test]
    fn test_custom_constructor() {
        let dict = ActorDict::new().with_custom('*', |pos, _| {
            Actor::fireball(pos, Vector::new(1.0, 1.0))
        });
        let mut parser = LevelParser::new(dict);
        let actors = parser.create_actors(&[" *"]);
        assert_eq!(actors.len(), 1);
        assert_eq!(actors[0].speed, Vector::new(1.0, 1.0));
    }

    #[test]
    fn test_parse_player_coin_and_floor() {
        let dict = ActorDict::new()
            .with('@', EntityKind::Player)
            .with('o', EntityKind::Coin);
        let mut parser = LevelParser::new(dict);
        let level = parser.parse(&["@ o", "xxxx"]);

        assert!(level.player().is_some());
        let coins = level
            .actors()
            .iter()
            .filter(|a| a.entity_type() == EntityType::Coin)
            .count();
        assert_eq!(coins, 1);
        assert_eq!(level.actors().len(), 2);
        let floor = level.grid().rows().nth(1).unwrap();
        assert_eq!(floor, &[Some(Obstacle::Wall); 4]);
        assert_eq!(level.width(), 4);
        assert_eq!(level.height(), 2);
    }

    #[test]
    fn test_parse_does_not_cross_validate() {
        // Actor symbols leave their cell empty
        let mut parser = LevelParser::new(ActorDict::standard());
        let level = parser.parse(&["x=x"]);
        assert_eq!(level.grid().get(0, 1), None);
        assert_eq!(level.actors().len(), 1);
    }

    #[test]
    fn test_same_seed_same_coins() {
        let scheme = ["o o o"];
        let mut a = LevelParser::with_seed(ActorDict::standard(), 11);
        let mut b = LevelParser::with_seed(ActorDict::standard(), 11);
        let la = a.parse(&scheme);
        let lb = b.parse(&scheme);
        let kinds_a: Vec<_> = la.actors().iter().map(|a| a.kind).collect();
        let kinds_b: Vec<_> = lb.actors().iter().map(|a| a.kind).collect();
        assert_eq!(kinds_a, kinds_b);
    }

    #[test]
    fn test_dict_from_map() {
        let map = HashMap::from([('P', EntityKind::Player)]);
        let dict = ActorDict::from(map);
        assert!(dict.contains('P'));
        assert!(!dict.contains('@'));
    }
}
