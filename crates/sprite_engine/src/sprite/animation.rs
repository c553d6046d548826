//! Frame-cycling animation over a sprite sheet

use crate::foundation::math::Rect;

/// Sheet geometry and playback state for an animated sprite.
///
/// The sheet is a grid `columns` cells wide; frame `n` lives at column
/// `n % columns`, row `n / columns`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Animation {
    /// Number of frames in the cycle
    pub total_frames: i32,

    /// Frame currently shown, always in `[0, total_frames)` when frames exist
    current_frame: i32,

    /// Cells per sheet row
    pub columns: i32,

    /// Width of one cell
    pub frame_width: i32,

    /// Height of one cell
    pub frame_height: i32,

    /// Ticks to wait between frame steps
    pub frame_delay: i32,

    /// Ticks accumulated since the last step
    frame_count: i32,

    /// +1 plays forward, -1 plays backward
    pub direction: i32,
}

impl Animation {
    /// Create a forward-playing animation starting at frame 0
    pub fn new(total_frames: i32, columns: i32, frame_width: i32, frame_height: i32, frame_delay: i32) -> Self {
        Self {
            total_frames,
            current_frame: 0,
            columns,
            frame_width,
            frame_height,
            frame_delay,
            frame_count: 0,
            direction: 1,
        }
    }

    /// Play backward instead of forward
    pub fn reversed(mut self) -> Self {
        self.direction = -self.direction;
        self
    }

    /// Frame currently shown
    pub fn current_frame(&self) -> i32 {
        self.current_frame
    }

    /// Jump to a frame (wrapped into range)
    pub fn set_current_frame(&mut self, frame: i32) {
        self.current_frame = if self.total_frames > 0 {
            frame.rem_euclid(self.total_frames)
        } else {
            0
        };
    }

    /// Whether the last frame of the cycle is showing
    pub fn is_last_frame(&self) -> bool {
        self.current_frame == self.total_frames - 1
    }

    /// One tick of playback: after `frame_delay` idle ticks, step a frame.
    pub fn advance(&mut self) {
        if self.total_frames <= 0 {
            return;
        }
        self.frame_count += 1;
        if self.frame_count > self.frame_delay {
            self.frame_count = 0;
            self.current_frame += self.direction;
            if self.current_frame > self.total_frames - 1 {
                self.current_frame = 0;
            } else if self.current_frame < 0 {
                self.current_frame = self.total_frames - 1;
            }
        }
    }

    /// Sub-rectangle of the sheet holding the current frame
    pub fn source_rect(&self) -> Rect {
        let columns = self.columns.max(1);
        Rect::new(
            (self.current_frame % columns) * self.frame_width,
            (self.current_frame / columns) * self.frame_height,
            self.frame_width,
            self.frame_height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_closes() {
        for (frames, delay) in [(16, 2), (8, 0), (1, 3), (5, 1)] {
            let mut anim = Animation::new(frames, 4, 10, 10, delay);
            anim.set_current_frame(frames / 2);
            let start = anim.current_frame();
            for _ in 0..frames * (delay + 1) {
                anim.advance();
            }
            assert_eq!(anim.current_frame(), start);
        }
    }

    #[test]
    fn test_delay_then_step() {
        let mut anim = Animation::new(4, 4, 10, 10, 2);
        anim.advance();
        anim.advance();
        assert_eq!(anim.current_frame(), 0);
        anim.advance();
        assert_eq!(anim.current_frame(), 1);
    }

    #[test]
    fn test_reverse_wraps_low() {
        let mut anim = Animation::new(3, 3, 10, 10, 0).reversed();
        anim.advance();
        assert_eq!(anim.current_frame(), 2);
        anim.advance();
        anim.advance();
        assert_eq!(anim.current_frame(), 0);
    }

    #[test]
    fn test_source_rect() {
        let mut anim = Animation::new(16, 4, 96, 96, 2);
        anim.set_current_frame(6);
        assert_eq!(anim.source_rect(), Rect::new(192, 96, 96, 96));
        anim.set_current_frame(-1);
        assert_eq!(anim.current_frame(), 15);
        assert_eq!(anim.source_rect(), Rect::new(288, 288, 96, 96));
    }

    #[test]
    fn test_no_frames_is_inert() {
        let mut anim = Animation::new(0, 0, 0, 0, 0);
        anim.advance();
        assert_eq!(anim.current_frame(), 0);
        assert_eq!(anim.source_rect(), Rect::new(0, 0, 0, 0));
    }
}
