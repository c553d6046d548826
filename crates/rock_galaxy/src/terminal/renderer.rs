//! Character-cell renderer
//!
//! Frames are composed into an off-screen cell grid sized to the terminal
//! and written out in one go on `end_frame`. World pixels are scaled onto
//! the grid, and each image is drawn as a block of one glyph chosen from
//! its file name.

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Color as TermColor, Print, ResetColor, SetForegroundColor},
    terminal,
};
use sprite_engine::assets::{ImageHandle, ImageRegistry};
use sprite_engine::foundation::math::Rect;
use sprite_engine::render::{Color, DrawParams, RenderError, Renderer, TextStyle};
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    glyph: char,
    color: Color,
}

const BLANK: Cell = Cell {
    glyph: ' ',
    color: Color::WHITE,
};

/// Glyph and colour for an image, or `None` for images that are not drawn
pub fn glyph_for(file_name: &str) -> Option<(char, Color)> {
    let glyph = match file_name {
        "space.png" | "barframe.png" => return None,
        "spaceship.png" => ('A', Color::WHITE),
        "ship_thrust.png" => ('A', Color::YELLOW),
        "ship_shield.png" => ('A', Color::rgb(0, 255, 255)),
        "plasmashot.png" => ('|', Color::rgb(0, 255, 255)),
        "explosion.png" => ('#', Color::RED),
        "explosion2.png" => ('+', Color::ORANGE),
        "bar_health.png" => ('=', Color::RED),
        "bar_shield.png" => ('=', Color::BLUE),
        "powerup_shield2.png" => ('S', Color::rgb(0, 255, 255)),
        "powerup_cola.png" => ('H', Color::RED),
        "powerup_250.png" => ('2', Color::GREEN),
        "powerup_500.png" => ('5', Color::GREEN),
        "powerup_1000.png" => ('K', Color::GREEN),
        "powerup_gun.png" => ('G', Color::YELLOW),
        name if name.starts_with("asteroid") => ('O', Color::rgb(190, 150, 100)),
        name if name.starts_with("medium") => ('o', Color::rgb(190, 150, 100)),
        name if name.starts_with("small") => ('*', Color::GRAY),
        name if name.starts_with("tiny") => ('.', Color::GRAY),
        _ => ('?', Color::WHITE),
    };
    Some(glyph)
}

/// Renderer writing ANSI escapes to any `Write`
pub struct TerminalRenderer<W: Write> {
    out: W,
    images: ImageRegistry,
    world_size: (i32, i32),
    columns: u16,
    rows: u16,
    follow_terminal: bool,
    cells: Vec<Cell>,
}

impl<W: Write> TerminalRenderer<W> {
    /// Renderer that resizes with the current terminal
    pub fn new(out: W, images: ImageRegistry, world_size: (i32, i32)) -> Result<Self, RenderError> {
        let (columns, rows) = terminal::size()?;
        let mut renderer = Self::with_grid(out, images, world_size, columns, rows);
        renderer.follow_terminal = true;
        Ok(renderer)
    }

    /// Renderer with a fixed grid
    pub fn with_grid(out: W, images: ImageRegistry, world_size: (i32, i32), columns: u16, rows: u16) -> Self {
        Self {
            out,
            images,
            world_size: (world_size.0.max(1), world_size.1.max(1)),
            columns: columns.max(1),
            rows: rows.max(1),
            follow_terminal: false,
            cells: vec![BLANK; usize::from(columns.max(1)) * usize::from(rows.max(1))],
        }
    }

    /// The composed row `row` as plain text
    #[cfg(test)]
    pub fn row_text(&self, row: u16) -> String {
        let start = usize::from(row) * usize::from(self.columns);
        self.cells[start..start + usize::from(self.columns)]
            .iter()
            .map(|cell| cell.glyph)
            .collect()
    }

    /// Consume the renderer, returning the writer
    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn column_of(&self, x: f64) -> i64 {
        (x * f64::from(self.columns) / f64::from(self.world_size.0)).floor() as i64
    }

    fn row_of(&self, y: f64) -> i64 {
        (y * f64::from(self.rows) / f64::from(self.world_size.1)).floor() as i64
    }

    fn put(&mut self, column: i64, row: i64, cell: Cell) {
        if column < 0 || row < 0 || column >= i64::from(self.columns) || row >= i64::from(self.rows) {
            return;
        }
        let index = row as usize * usize::from(self.columns) + column as usize;
        self.cells[index] = cell;
    }

    /// Cell span covering a world rectangle, at least one cell each way
    fn span(&self, x: f64, y: f64, width: f64, height: f64) -> (i64, i64, i64, i64) {
        let left = self.column_of(x);
        let top = self.row_of(y);
        let right = self.column_of(x + width).max(left + 1);
        let bottom = self.row_of(y + height).max(top + 1);
        (left, top, right, bottom)
    }
}

fn term_color(color: Color) -> TermColor {
    TermColor::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn begin_frame(&mut self) -> Result<(), RenderError> {
        if self.follow_terminal {
            let (columns, rows) = terminal::size()?;
            self.columns = columns.max(1);
            self.rows = rows.max(1);
        }
        self.cells.clear();
        self.cells
            .resize(usize::from(self.columns) * usize::from(self.rows), BLANK);
        Ok(())
    }

    fn draw_image(&mut self, image: ImageHandle, params: &DrawParams) -> Result<(), RenderError> {
        let Some(info) = self.images.get(image) else {
            return Err(RenderError::Backend("unknown image handle".to_string()));
        };
        let Some((glyph, color)) = glyph_for(info.file_name()) else {
            return Ok(());
        };
        let (left, top, right, bottom) = self.span(
            params.position.x,
            params.position.y,
            f64::from(params.width),
            f64::from(params.height),
        );
        for row in top..bottom {
            for column in left..right {
                self.put(column, row, Cell { glyph, color });
            }
        }
        Ok(())
    }

    fn draw_rect(&mut self, bounds: Rect, color: Color, filled: bool) -> Result<(), RenderError> {
        let (left, top, right, bottom) = self.span(
            f64::from(bounds.x),
            f64::from(bounds.y),
            f64::from(bounds.width),
            f64::from(bounds.height),
        );
        for row in top..bottom {
            for column in left..right {
                let edge = row == top || row == bottom - 1 || column == left || column == right - 1;
                if filled {
                    self.put(column, row, Cell { glyph: '#', color });
                } else if edge {
                    self.put(column, row, Cell { glyph: '.', color });
                }
            }
        }
        Ok(())
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32, style: TextStyle) -> Result<(), RenderError> {
        // Baseline sits at y; text occupies the row above it
        let row = self.row_of(f64::from(y)) - 1;
        let start = self.column_of(f64::from(x));
        for (offset, glyph) in text.chars().enumerate() {
            self.put(start + offset as i64, row.max(0), Cell { glyph, color: style.color });
        }
        Ok(())
    }

    fn end_frame(&mut self) -> Result<(), RenderError> {
        let mut current: Option<Color> = None;
        for row in 0..self.rows {
            queue!(self.out, MoveTo(0, row))?;
            let start = usize::from(row) * usize::from(self.columns);
            let mut line = String::with_capacity(usize::from(self.columns));
            for cell in &self.cells[start..start + usize::from(self.columns)] {
                if cell.glyph != ' ' && current != Some(cell.color) {
                    if !line.is_empty() {
                        queue!(self.out, Print(std::mem::take(&mut line)))?;
                    }
                    queue!(self.out, SetForegroundColor(term_color(cell.color)))?;
                    current = Some(cell.color);
                }
                line.push(cell.glyph);
            }
            queue!(self.out, Print(line))?;
        }
        queue!(self.out, ResetColor)?;
        self.out.flush()?;
        Ok(())
    }
}
