//! # Rendering seam
//!
//! The engine draws through the [`Renderer`] trait and never touches a
//! display directly. A frame is bracketed by `begin_frame`/`end_frame`;
//! everything between is drawn in call order, later calls on top.
//!
//! Coordinates are world pixels with the origin at the top-left corner
//! and y growing downwards. Backends scale to whatever surface they own.

use crate::assets::ImageHandle;
use crate::foundation::math::{Rect, Vec2};
use thiserror::Error;

/// 8-bit RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
}

impl Color {
    /// Black
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// White
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Red
    pub const RED: Self = Self::rgb(255, 0, 0);
    /// Green
    pub const GREEN: Self = Self::rgb(0, 255, 0);
    /// Blue
    pub const BLUE: Self = Self::rgb(0, 0, 255);
    /// Yellow
    pub const YELLOW: Self = Self::rgb(255, 255, 0);
    /// Orange
    pub const ORANGE: Self = Self::rgb(255, 200, 0);
    /// Gray
    pub const GRAY: Self = Self::rgb(128, 128, 128);

    /// Build a colour from components
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// How a sprite image is placed on screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawParams {
    /// Top-left corner of the destination
    pub position: Vec2,

    /// Destination size in pixels
    pub width: i32,

    /// Destination size in pixels
    pub height: i32,

    /// Clockwise rotation about the centre, in degrees
    pub rotation: f64,

    /// Sub-rectangle of the image to draw; `None` draws the whole image
    pub source: Option<Rect>,
}

/// Font size classes used by text overlays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextSize {
    /// HUD and legend text
    #[default]
    Normal,
    /// Screen titles
    Large,
}

/// Text appearance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStyle {
    /// Fill colour
    pub color: Color,
    /// Size class
    pub size: TextSize,
    /// Bold face
    pub bold: bool,
}

impl TextStyle {
    /// Regular text in the given colour
    pub const fn plain(color: Color) -> Self {
        Self {
            color,
            size: TextSize::Normal,
            bold: false,
        }
    }

    /// Bold title text in the given colour
    pub const fn title(color: Color) -> Self {
        Self {
            color,
            size: TextSize::Large,
            bold: true,
        }
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::plain(Color::WHITE)
    }
}

/// Rendering errors
#[derive(Error, Debug)]
pub enum RenderError {
    /// The output surface failed
    #[error("Render output error: {0}")]
    Io(#[from] std::io::Error),

    /// Backend specific failure
    #[error("Render backend error: {0}")]
    Backend(String),
}

/// Drawing capability handed to the engine and the game each frame
pub trait Renderer {
    /// Start a new frame, discarding the previous one
    fn begin_frame(&mut self) -> Result<(), RenderError>;

    /// Draw an image
    fn draw_image(&mut self, image: ImageHandle, params: &DrawParams) -> Result<(), RenderError>;

    /// Draw a rectangle; `filled` paints the inside too
    fn draw_rect(&mut self, bounds: Rect, color: Color, filled: bool) -> Result<(), RenderError>;

    /// Draw text with its baseline-left at (x, y)
    fn draw_text(&mut self, text: &str, x: i32, y: i32, style: TextStyle) -> Result<(), RenderError>;

    /// Present the frame
    fn end_frame(&mut self) -> Result<(), RenderError>;
}

/// One recorded renderer call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// `draw_image`
    Image(ImageHandle, DrawParams),
    /// `draw_rect`
    Rect(Rect, Color, bool),
    /// `draw_text`
    Text(String, i32, i32, TextStyle),
}

/// Renderer that keeps the calls of the last frame, for headless runs
#[derive(Debug, Default, Clone)]
pub struct RecordingRenderer {
    commands: Vec<DrawCommand>,
    frames: u64,
}

impl RecordingRenderer {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls made since the last `begin_frame`
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of completed frames
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Number of images drawn in the current frame
    pub fn image_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|command| matches!(command, DrawCommand::Image(..)))
            .count()
    }

    /// Whether any text call contained `needle`
    pub fn has_text(&self, needle: &str) -> bool {
        self.commands
            .iter()
            .any(|command| matches!(command, DrawCommand::Text(text, ..) if text.contains(needle)))
    }
}

impl Renderer for RecordingRenderer {
    fn begin_frame(&mut self) -> Result<(), RenderError> {
        self.commands.clear();
        Ok(())
    }

    fn draw_image(&mut self, image: ImageHandle, params: &DrawParams) -> Result<(), RenderError> {
        self.commands.push(DrawCommand::Image(image, *params));
        Ok(())
    }

    fn draw_rect(&mut self, bounds: Rect, color: Color, filled: bool) -> Result<(), RenderError> {
        self.commands.push(DrawCommand::Rect(bounds, color, filled));
        Ok(())
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32, style: TextStyle) -> Result<(), RenderError> {
        self.commands.push(DrawCommand::Text(text.to_string(), x, y, style));
        Ok(())
    }

    fn end_frame(&mut self) -> Result<(), RenderError> {
        self.frames += 1;
        Ok(())
    }
}
