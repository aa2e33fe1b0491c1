//! Terminal renderer.
//!
//! Turns board frames (0 empty, 1 settled, 2 falling piece) into a walled
//! well on screen. The drawing itself is pure and goes into a
//! [`FrameBuffer`]; [`TerminalRenderer`] owns the terminal and flushes only
//! the cells that changed since the last frame.

pub mod board_view;
pub mod fb;
pub mod renderer;

pub use tty_tetris_core as core;
pub use tty_tetris_engine as engine;
pub use tty_tetris_types as types;

pub use board_view::{glyph, render_text, BoardView, Viewport, HELP_LINE};
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
