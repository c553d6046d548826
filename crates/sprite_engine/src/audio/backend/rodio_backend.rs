//! Rodio audio backend
//!
//! Clips are read from disk once and kept in memory; every `play` decodes
//! a fresh copy into its own sink. Playing a looping clip replaces any
//! instance of it already playing. Supports WAV and Ogg Vorbis.

use crate::audio::{AudioError, AudioPlayer, ClipId};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use std::collections::HashMap;
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

/// Audio player backed by the default output device
pub struct RodioAudio {
    /// Output stream (must be kept alive)
    _output_stream: OutputStream,
    stream_handle: OutputStreamHandle,
    clips: HashMap<ClipId, Arc<[u8]>>,
    sinks: HashMap<ClipId, Vec<Sink>>,
    volume: f32,
}

impl RodioAudio {
    /// Open the default output device
    pub fn new(volume: f32) -> Result<Self, AudioError> {
        let (output_stream, stream_handle) = OutputStream::try_default()
            .map_err(|e| AudioError::DeviceUnavailable(e.to_string()))?;
        log::info!("Audio output opened (volume {:.2})", volume);
        Ok(Self {
            _output_stream: output_stream,
            stream_handle,
            clips: HashMap::new(),
            sinks: HashMap::new(),
            volume: volume.clamp(0.0, 1.0),
        })
    }

    /// Read a clip file into memory under the given id
    pub fn load<P: AsRef<Path>>(&mut self, clip: ClipId, path: P) -> Result<(), AudioError> {
        let bytes = std::fs::read(path.as_ref()).map_err(|e| AudioError::LoadFailed {
            clip: clip.to_string(),
            reason: format!("{}: {}", path.as_ref().display(), e),
        })?;
        log::debug!("Loaded clip {} ({} bytes)", clip, bytes.len());
        self.clips.insert(clip, Arc::from(bytes));
        Ok(())
    }

    /// Number of clips held in memory
    pub fn clip_count(&self) -> usize {
        self.clips.len()
    }

    fn start(&mut self, clip: &ClipId, looping: bool) -> Result<(), AudioError> {
        let bytes = self
            .clips
            .get(clip)
            .ok_or_else(|| AudioError::UnknownClip(clip.to_string()))?;

        let sink = Sink::try_new(&self.stream_handle)
            .map_err(|e| AudioError::PlaybackFailed(format!("Failed to create sink: {}", e)))?;
        let source = Decoder::new(Cursor::new(bytes.to_vec()))
            .map_err(|e| AudioError::PlaybackFailed(format!("Failed to decode {}: {}", clip, e)))?;

        if looping {
            sink.append(source.repeat_infinite());
        } else {
            sink.append(source);
        }
        sink.set_volume(self.volume);

        let sinks = self.sinks.entry(clip.clone()).or_default();
        if looping {
            // At most one looping instance per clip
            for previous in sinks.drain(..) {
                previous.stop();
            }
        } else {
            sinks.retain(|sink| !sink.empty());
        }
        sinks.push(sink);
        Ok(())
    }
}

impl AudioPlayer for RodioAudio {
    fn play(&mut self, clip: &ClipId, looping: bool) {
        if let Err(e) = self.start(clip, looping) {
            log::warn!("{}", e);
        }
    }

    fn stop(&mut self, clip: &ClipId) {
        if let Some(sinks) = self.sinks.remove(clip) {
            for sink in sinks {
                sink.stop();
            }
        }
    }
}
