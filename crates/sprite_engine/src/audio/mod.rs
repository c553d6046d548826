//! Audio cues
//!
//! The core only ever asks for a clip to start or stop. Playback is
//! fire-and-forget: failures are logged by the implementation and never
//! reach gameplay code.

#[cfg(feature = "audio")]
pub mod backend;

use std::fmt;
use thiserror::Error;

/// Name of a sound clip known to the audio implementation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClipId(String);

impl ClipId {
    /// Wrap a clip name
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The clip name
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Audio errors
#[derive(Error, Debug)]
pub enum AudioError {
    /// No output device could be opened
    #[error("Audio device unavailable: {0}")]
    DeviceUnavailable(String),

    /// A clip file could not be read
    #[error("Failed to load clip {clip}: {reason}")]
    LoadFailed {
        /// Clip being loaded
        clip: String,
        /// Underlying cause
        reason: String,
    },

    /// Playback of a loaded clip failed
    #[error("Playback failed: {0}")]
    PlaybackFailed(String),

    /// The clip was never loaded
    #[error("Unknown clip: {0}")]
    UnknownClip(String),
}

/// Capability the game uses to trigger sounds
pub trait AudioPlayer {
    /// Start a clip, optionally looping until stopped
    fn play(&mut self, clip: &ClipId, looping: bool);

    /// Stop a clip if it is playing
    fn stop(&mut self, clip: &ClipId);
}

/// Silent player used when audio is disabled or unavailable
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAudio;

impl AudioPlayer for NullAudio {
    fn play(&mut self, clip: &ClipId, looping: bool) {
        log::trace!("(muted) play {} looping={}", clip, looping);
    }

    fn stop(&mut self, clip: &ClipId) {
        log::trace!("(muted) stop {}", clip);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_id_display() {
        let clip = ClipId::new("shoot");
        assert_eq!(clip.to_string(), "shoot");
        assert_eq!(clip.as_str(), "shoot");
        assert_eq!(clip, ClipId::new(String::from("shoot")));
    }

    #[test]
    fn test_null_audio_accepts_everything() {
        let mut audio = NullAudio;
        audio.play(&ClipId::new("music"), true);
        audio.stop(&ClipId::new("music"));
        audio.stop(&ClipId::new("never-played"));
    }
}
