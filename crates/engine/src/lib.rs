//! Game loop driver.
//!
//! Bridges the synchronous [`GameState`](tty_tetris_core::GameState) with the
//! two asynchronous event sources that drive it: a per-piece gravity timer and
//! the queue the input task pushes into. The loop is the single owner of the
//! game state, so nothing here needs a lock.
//!
//! Rendering goes through the [`Renderer`] trait, so the loop can be tested
//! under tokio's paused clock with a renderer that just records frames.

pub mod game_loop;

pub use tty_tetris_core as core;
pub use tty_tetris_types as types;

pub use game_loop::{run_game, GameOutcome, Renderer};
