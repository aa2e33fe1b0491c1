//! BoardView: maps a board frame into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::Board;
use crate::fb::{CellStyle, FrameBuffer, Rgb};

/// Glyph for a settled block
pub const SETTLED_GLYPH: char = '#';

/// Glyph for the falling piece
pub const ACTIVE_GLYPH: char = 'X';

/// Shown under the well
pub const HELP_LINE: &str = "ctrl-c to quit. Arrows to move/rotate.";

const WALL_STYLE: CellStyle = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
const WELL_STYLE: CellStyle = CellStyle::new(Rgb::new(80, 80, 90), Rgb::new(30, 30, 40));
const SETTLED_STYLE: CellStyle = CellStyle::new(Rgb::new(170, 170, 180), Rgb::new(60, 60, 75));
const ACTIVE_STYLE: CellStyle = CellStyle::new(Rgb::new(0, 240, 240), Rgb::new(0, 90, 110)).bold();
const HELP_STYLE: CellStyle = CellStyle::new(Rgb::new(140, 140, 140), Rgb::new(0, 0, 0));

/// Character for a frame cell: 0 blank, 1 settled, anything higher active
pub fn glyph(cell: u8) -> char {
    match cell {
        0 => ' ',
        1 => SETTLED_GLYPH,
        _ => ACTIVE_GLYPH,
    }
}

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Draws the visible part of a board as a walled well.
pub struct BoardView {
    /// Board cell width in terminal columns.
    cell_w: u16,
}

impl Default for BoardView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self { cell_w: 2 }
    }
}

impl BoardView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
        }
    }

    /// (width, height) the well occupies: walls, visible rows, floor and help line
    pub fn frame_size(&self, frame: &Board, visible_row_offset: usize) -> (u16, u16) {
        let visible = frame.height().saturating_sub(visible_row_offset);
        let w = (frame.width() as u16) * self.cell_w + 2;
        let h = visible as u16 + 2;
        (w, h)
    }

    /// Render the visible rows of `frame`, centred in the viewport.
    ///
    /// Callers can reuse one framebuffer across frames; it is resized to the
    /// viewport and cleared first.
    pub fn render_into(
        &self,
        frame: &Board,
        visible_row_offset: usize,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);

        let (frame_w, frame_h) = self.frame_size(frame, visible_row_offset);
        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;
        let right_wall = start_x + frame_w - 1;

        for (dy, row) in frame.rows().skip(visible_row_offset).enumerate() {
            let y = start_y + dy as u16;
            fb.put_char(start_x, y, '|', WALL_STYLE);
            for (col, &cell) in row.iter().enumerate() {
                let style = match cell {
                    0 => WELL_STYLE,
                    1 => SETTLED_STYLE,
                    _ => ACTIVE_STYLE,
                };
                let x = start_x + 1 + (col as u16) * self.cell_w;
                for dx in 0..self.cell_w {
                    fb.put_char(x + dx, y, glyph(cell), style);
                }
            }
            fb.put_char(right_wall, y, '|', WALL_STYLE);
        }

        let floor_y = start_y + frame_h - 2;
        for x in start_x..=right_wall {
            fb.put_char(x, floor_y, '-', WALL_STYLE);
        }
        fb.put_str(start_x, floor_y + 1, HELP_LINE, HELP_STYLE);
    }
}

/// Plain-text rendering, one character per cell.
///
/// Used for the game-over report printed after the terminal is restored.
pub fn render_text(frame: &Board, visible_row_offset: usize) -> String {
    let mut out = String::new();
    for row in frame.rows().skip(visible_row_offset) {
        out.push('|');
        out.extend(row.iter().map(|&cell| glyph(cell)));
        out.push_str("|\n");
    }
    out.push_str(&"-".repeat(frame.width() + 2));
    out.push('\n');
    out
}
