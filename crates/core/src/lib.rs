//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds the rules of the game and nothing else. It has no
//! dependencies on the terminal, the clock or any async runtime; randomness
//! comes in through [`Piece::random`], which takes any `rand::Rng`.
//!
//! # Module Structure
//!
//! - [`piece`]: the seven tetromino grids and the quarter-turn rotation
//! - [`board`]: the settled grid, weighted overlay and full-row compaction
//! - [`placement`]: clamping, rasterizing and collision checks for the falling piece
//! - [`game_state`]: the Spawning / Falling / Locking / GameOver state machine
//!
//! # Example
//!
//! ```
//! use tty_tetris_core::{GameState, MoveOutcome, Phase, Piece, PieceKind};
//! use tty_tetris_types::{GameConfig, Move};
//!
//! let mut game = GameState::new(GameConfig::default());
//! assert_eq!(game.spawn(Piece::new(PieceKind::O)), Phase::Falling);
//!
//! game.apply_move(Move::Left);
//! while game.tick() == MoveOutcome::Moved {}
//!
//! assert_eq!(game.phase(), Phase::Locking);
//! assert_eq!(game.lock(), 0);
//! assert_eq!(game.phase(), Phase::Spawning);
//! ```

pub mod board;
pub mod game_state;
pub mod piece;
pub mod placement;

pub use tty_tetris_types as types;

pub use board::Board;
pub use game_state::{GameState, MoveOutcome, Phase};
pub use piece::{Piece, PieceKind};
pub use placement::{clamp_to_bounds, collided, overshoots_floor, rasterize, ActivePiece};
