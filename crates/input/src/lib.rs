//! Terminal input.
//!
//! Decodes key presses (arrow keys, a few letter aliases, Ctrl-C / `q`) into
//! [`InputEvent`](crate::types::InputEvent)s and runs the long-lived reader
//! task that feeds them to the game loop.

pub mod map;
pub mod reader;

pub use tty_tetris_types as types;

pub use map::{map_key_event, should_quit};
pub use reader::spawn_input_task;
