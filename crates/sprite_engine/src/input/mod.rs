//! Keyboard input as the game sees it
//!
//! Frontends translate their own events into [`Keys`] and hand the engine
//! one [`InputState`] per tick: what is held right now, plus the press and
//! release edges seen since the previous poll.

use bitflags::bitflags;
use std::collections::VecDeque;

bitflags! {
    /// The closed set of game controls
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Keys: u16 {
        /// Rotate counter-clockwise
        const LEFT = 1 << 0;
        /// Rotate clockwise
        const RIGHT = 1 << 1;
        /// Accelerate
        const THRUST = 1 << 2;
        /// Fire (on release)
        const FIRE = 1 << 3;
        /// Raise the shield
        const SHIELD = 1 << 4;
        /// Toggle bounding box display
        const TOGGLE_BOUNDS = 1 << 5;
        /// Toggle collision reactions
        const TOGGLE_COLLISION = 1 << 6;
        /// Start / restart
        const CONFIRM = 1 << 7;
        /// Abandon the round
        const ESCAPE = 1 << 8;
    }
}

/// Snapshot of the controls for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputState {
    /// Keys currently down
    pub held: Keys,
    /// Keys that went down since the previous poll
    pub pressed: Keys,
    /// Keys that went up since the previous poll
    pub released: Keys,
}

impl InputState {
    /// Whether `key` is down
    pub fn is_held(&self, key: Keys) -> bool {
        self.held.contains(key)
    }

    /// Whether `key` went down this tick
    pub fn was_pressed(&self, key: Keys) -> bool {
        self.pressed.contains(key)
    }

    /// Whether `key` went up this tick
    pub fn was_released(&self, key: Keys) -> bool {
        self.released.contains(key)
    }

    /// Derive edges from the previous and current held sets
    pub fn from_transition(previous: Keys, current: Keys) -> Self {
        Self {
            held: current,
            pressed: current - previous,
            released: previous - current,
        }
    }
}

/// Source of per-tick input snapshots
pub trait InputSource {
    /// Collect the input for this tick
    fn poll(&mut self) -> InputState;
}

/// Input played back from a prepared list of held-key sets
///
/// Each poll consumes one entry; once exhausted, nothing is held. Edges are
/// derived from consecutive entries.
#[derive(Debug, Default, Clone)]
pub struct ScriptedInput {
    frames: VecDeque<Keys>,
    previous: Keys,
}

impl ScriptedInput {
    /// Create a script from held-key sets, one per tick
    pub fn new<I: IntoIterator<Item = Keys>>(frames: I) -> Self {
        Self {
            frames: frames.into_iter().collect(),
            previous: Keys::empty(),
        }
    }

    /// Append ticks to the script
    pub fn push(&mut self, keys: Keys) {
        self.frames.push_back(keys);
    }

    /// Ticks left in the script
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> InputState {
        let current = self.frames.pop_front().unwrap_or_default();
        let state = InputState::from_transition(self.previous, current);
        self.previous = current;
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transition_edges() {
        let state = InputState::from_transition(Keys::LEFT | Keys::FIRE, Keys::LEFT | Keys::THRUST);
        assert!(state.is_held(Keys::LEFT));
        assert!(state.was_pressed(Keys::THRUST));
        assert!(!state.was_pressed(Keys::LEFT));
        assert!(state.was_released(Keys::FIRE));
    }

    #[test]
    fn test_script_releases_after_end() {
        let mut input = ScriptedInput::new([Keys::FIRE, Keys::FIRE]);
        assert!(input.poll().was_pressed(Keys::FIRE));
        let held = input.poll();
        assert!(held.is_held(Keys::FIRE) && !held.was_pressed(Keys::FIRE));
        assert!(input.poll().was_released(Keys::FIRE));
        assert_eq!(input.poll(), InputState::default());
        assert_eq!(input.remaining(), 0);
    }
}
