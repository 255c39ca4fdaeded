//! Tile Platformer headless runner
//!
//! Plays every level of a pack with scripted input and logs each outcome.
//!
//! Usage: `tile-platformer [LEVELS.json] [SETTINGS.json]`

use std::process::ExitCode;

use tile_platformer::platform::{
    InputSource, JsonLevelLoader, LevelLoader, Renderer, ScriptedInput, StaticLevels,
};
use tile_platformer::sim::{ActorDict, Arcade, Level, LevelParser, LevelStatus, PlayerKinematics, tick};
use tile_platformer::{Settings, SimError};

/// Level used when no pack is given
const DEMO_LEVEL: &[&str] = &[
    "         ",
    "         ",
    "    =    ",
    "       o ",
    " @   !xxx",
    "         ",
    "xxx!     ",
    "         ",
];

/// Logs the player's whereabouts instead of drawing
struct LogRenderer {
    frame: u64,
}

impl Renderer for LogRenderer {
    fn draw(&mut self, level: &Level) {
        self.frame += 1;
        if let Some(player) = level.player() {
            log::trace!(
                "frame {}: player at {}, {} actors",
                self.frame,
                player.pos,
                level.actors().len()
            );
        }
    }
}

/// Drive one level until it finishes or runs out of frames
fn run_level<I, R, K>(
    level: &mut Level,
    input: &mut I,
    renderer: &mut R,
    kinematics: &mut K,
    settings: &Settings,
) -> Option<LevelStatus>
where
    I: InputSource,
    R: Renderer,
    K: PlayerKinematics,
{
    for _ in 0..settings.max_ticks {
        let keys = input.poll();
        tick(level, &keys, settings.frame_time, kinematics);
        renderer.draw(level);
        if level.is_finished() {
            return level.status();
        }
    }
    None
}

/// Play the pack in order; stops at the first level that is not won
fn run(loader: &dyn LevelLoader, settings: &Settings) -> Result<bool, SimError> {
    let schemes = loader.load_schemes()?;
    let mut parser = LevelParser::with_seed(ActorDict::standard(), settings.seed);
    let mut renderer = LogRenderer { frame: 0 };

    for (index, scheme) in schemes.iter().enumerate() {
        let mut level = parser.parse(scheme);
        level.finish_delay = settings.finish_delay;
        let mut input = ScriptedInput::from_script(&settings.script);
        let mut arcade = Arcade::new(settings.arcade);

        match run_level(&mut level, &mut input, &mut renderer, &mut arcade, settings) {
            Some(LevelStatus::Won) => log::info!("Level {} won", index + 1),
            Some(LevelStatus::Lost) => {
                log::info!("Level {} lost", index + 1);
                return Ok(false);
            }
            None => {
                log::warn!("Level {} unfinished after {} frames", index + 1, settings.max_ticks);
                return Ok(false);
            }
        }
    }
    Ok(true)
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Tile Platformer (headless) starting...");

    let mut args = std::env::args().skip(1);
    let levels = args.next();
    let settings = args.next().map(Settings::load).unwrap_or_default();
    log::info!("Using seed {}", settings.seed);

    let result = match levels {
        Some(path) => run(&JsonLevelLoader::new(path), &settings),
        None => run(&StaticLevels::from_rows(&[DEMO_LEVEL]), &settings),
    };

    match result {
        Ok(true) => {
            log::info!("All levels won");
            ExitCode::SUCCESS
        }
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            log::error!("{}", e);
            ExitCode::from(2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_wins_and_stops_on_loss() {
        let win: &[&str] = &["   ", "@ o", "xxx"];
        let lose: &[&str] = &["   ", "@ !", "xxx"];
        let settings = Settings::default();

        assert!(run(&StaticLevels::from_rows(&[win, win]), &settings).unwrap());
        assert!(!run(&StaticLevels::from_rows(&[win, lose, win]), &settings).unwrap());
    }

    #[test]
    fn test_run_gives_up_after_max_ticks() {
        let idle: &[&str] = &["   ", "@ o", "xxx"];
        let settings = Settings {
            script: ".".to_string(),
            max_ticks: 30,
            ..Default::default()
        };
        assert!(!run(&StaticLevels::from_rows(&[idle]), &settings).unwrap());
    }
}
