//! Time management utilities

use std::cell::Cell;
use std::time::{Duration, Instant};

/// Source of monotonic milliseconds for the game loop
pub trait Clock {
    /// Milliseconds elapsed since the clock's origin
    fn now_millis(&self) -> u64;
}

/// Wall clock measured from the moment it was created
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Create a clock whose origin is now
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        u64::try_from(self.origin.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

/// Hand-driven clock for tests and deterministic replays
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<u64>,
}

impl ManualClock {
    /// Create a clock reading `start` milliseconds
    pub fn new(start: u64) -> Self {
        Self { now: Cell::new(start) }
    }

    /// Move the clock forward
    pub fn advance(&self, millis: u64) {
        self.now.set(self.now.get().saturating_add(millis));
    }

    /// Jump to an absolute reading
    pub fn set(&self, millis: u64) {
        self.now.set(millis);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> u64 {
        self.now.get()
    }
}

/// Counts frames per wall-clock second.
///
/// `frame` returns `true` on the first frame after each full second has
/// elapsed; the engine uses that edge for its amortized sprite purge.
#[derive(Debug, Clone)]
pub struct FrameCounter {
    window_start: u64,
    frames_in_window: u32,
    frame_rate: u32,
    total_frames: u64,
}

impl FrameCounter {
    /// Length of one measuring window in milliseconds
    pub const WINDOW_MILLIS: u64 = 1000;

    /// Create a counter whose first window starts at `now`
    pub fn new(now: u64) -> Self {
        Self {
            window_start: now,
            frames_in_window: 0,
            frame_rate: 0,
            total_frames: 0,
        }
    }

    /// Record one frame at `now`. Returns `true` when a second has elapsed.
    pub fn frame(&mut self, now: u64) -> bool {
        self.frames_in_window += 1;
        self.total_frames += 1;
        if now > self.window_start + Self::WINDOW_MILLIS {
            self.window_start = now;
            self.frame_rate = self.frames_in_window;
            self.frames_in_window = 0;
            true
        } else {
            false
        }
    }

    /// Frames counted during the last complete window
    pub fn frame_rate(&self) -> u32 {
        self.frame_rate
    }

    /// Frames recorded since creation
    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }
}

/// Fixed interval between ticks for a target rate
pub fn tick_interval(ticks_per_second: u32) -> Duration {
    Duration::from_millis(1000 / u64::from(ticks_per_second.max(1)))
}
