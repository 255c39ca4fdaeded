//! Scripted input for headless runs and tests

use super::InputSource;
use crate::sim::TickInput;

/// Replays a fixed list of frames, then holds the last one forever
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: Vec<TickInput>,
    cursor: usize,
}

impl ScriptedInput {
    pub fn new(frames: Vec<TickInput>) -> Self {
        Self { frames, cursor: 0 }
    }

    /// Parse a compact script: `l`, `r`, `u` are held keys, `.` is idle,
    /// characters inside `[...]` are held together for one frame.
    pub fn from_script(script: &str) -> Self {
        let mut frames = Vec::new();
        let mut chord: Option<TickInput> = None;
        for c in script.chars() {
            match c {
                '[' => chord = Some(TickInput::default()),
                ']' => frames.extend(chord.take()),
                _ => {
                    let mut frame = chord.unwrap_or_default();
                    match c {
                        'l' => frame.left = true,
                        'r' => frame.right = true,
                        'u' => frame.up = true,
                        '.' => {}
                        _ => continue,
                    }
                    match chord {
                        Some(_) => chord = Some(frame),
                        None => frames.push(frame),
                    }
                }
            }
        }
        Self::new(frames)
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> TickInput {
        let Some(last) = self.frames.len().checked_sub(1) else {
            return TickInput::default();
        };
        let frame = self.frames[self.cursor.min(last)];
        self.cursor += 1;
        frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_script_is_idle() {
        let mut input = ScriptedInput::default();
        assert_eq!(input.poll(), TickInput::default());
        assert_eq!(input.poll(), TickInput::default());
    }

    #[test]
    fn test_script_frames_and_chords() {
        let mut input = ScriptedInput::from_script("r.[ru]l");
        assert_eq!(
            input.poll(),
            TickInput {
                right: true,
                ..Default::default()
            }
        );
        assert_eq!(input.poll(), TickInput::default());
        assert_eq!(
            input.poll(),
            TickInput {
                right: true,
                up: true,
                ..Default::default()
            }
        );
        let left = TickInput {
            left: true,
            ..Default::default()
        };
        assert_eq!(input.poll(), left);
        // Holds the last frame
        assert_eq!(input.poll(), left);
    }

    #[test]
    fn test_unknown_characters_are_ignored() {
        let mut input = ScriptedInput::from_script(" r ?");
        assert!(input.poll().right);
        assert!(input.poll().right);
    }
}
