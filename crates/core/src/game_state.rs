//! Game state module - the falling-piece state machine
//!
//! `GameState` owns the settled board, the active piece and the cleared-row
//! counter. It is synchronous and deterministic: the caller supplies pieces
//! and feeds it gravity ticks and player moves one at a time, and the async
//! loop in the engine crate decides *when* those happen.
//!
//! ```text
//! Spawning --spawn--> Falling --tick/move lands--> Locking --lock--> Spawning
//!     |
//!     +--boundary row occupied or spawn blocked--> GameOver
//! ```

use std::time::Duration;

use tracing::{debug, info, trace};

use crate::board::Board;
use crate::piece::Piece;
use crate::placement::{clamp_to_bounds, collided, rasterize, ActivePiece};
use crate::types::{GameConfig, Move};

/// Where the state machine currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the next piece
    Spawning,
    /// A piece is in play and accepts ticks and moves
    Falling,
    /// The piece landed; [`GameState::lock`] merges it
    Locking,
    /// Terminal
    GameOver,
}

/// Result of feeding one tick or move to the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The move was applied
    Moved,
    /// The move would collide; state is unchanged
    Rejected,
    /// A downward step collided; the piece now waits in `Locking`
    Landed,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    board: Board,
    active: Option<ActivePiece>,
    phase: Phase,
    rows_cleared: usize,
    pieces_locked: usize,
}

impl GameState {
    /// Create a new game with an empty board
    pub fn new(config: GameConfig) -> Self {
        let board = Board::with_size(config.board_height, config.board_width);
        Self::with_board(config, board)
    }

    /// Create a game on a prepared board
    pub fn with_board(config: GameConfig, board: Board) -> Self {
        Self {
            config,
            board,
            active: None,
            phase: Phase::Spawning,
            rows_cleared: 0,
            pieces_locked: 0,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<&ActivePiece> {
        self.active.as_ref()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Total rows cleared since the game started
    pub fn rows_cleared(&self) -> usize {
        self.rows_cleared
    }

    pub fn pieces_locked(&self) -> usize {
        self.pieces_locked
    }

    /// Gravity period for the next piece
    pub fn drop_interval(&self) -> Duration {
        self.config.drop_interval(self.rows_cleared)
    }

    /// Game over: either already declared, or settled blocks reach the
    /// boundary row at the top of the visible area.
    pub fn is_done(&self) -> bool {
        self.phase == Phase::GameOver || self.board.row_has_blocks(self.config.visible_row_offset)
    }

    /// Put a new piece at the spawn position.
    ///
    /// Ends the game if the boundary row is occupied, or if the new piece
    /// already overlaps settled blocks. Does nothing outside `Spawning`.
    pub fn spawn(&mut self, piece: Piece) -> Phase {
        if self.phase != Phase::Spawning {
            return self.phase;
        }

        let kind = piece.kind();
        let mut active = ActivePiece::spawn_at(piece, self.config.spawn_row, self.config.spawn_col);
        clamp_to_bounds(&mut active, self.board.dims());

        let blocked = collided(&active, &self.board);
        self.active = Some(active);

        if self.is_done() || blocked {
            self.phase = Phase::GameOver;
            info!(
                piece = kind.as_str(),
                blocked,
                rows_cleared = self.rows_cleared,
                pieces_locked = self.pieces_locked,
                "game over"
            );
        } else {
            self.phase = Phase::Falling;
            debug!(
                piece = kind.as_str(),
                interval_ms = self.drop_interval().as_millis() as u64,
                "spawned"
            );
        }
        self.phase
    }

    /// Gravity: move the piece down one row, landing it if that collides
    pub fn tick(&mut self) -> MoveOutcome {
        self.apply_move(Move::Down)
    }

    /// Apply one player move.
    ///
    /// Sideways moves and rotations are clamped into the board, so a rotation
    /// that would poke through a wall or the floor is shifted back inside.
    /// If the clamped candidate overlaps settled cells it is rejected and the
    /// piece keeps its prior position and shape. A downward step is checked
    /// unclamped; passing the floor or hitting a block lands the piece.
    pub fn apply_move(&mut self, mv: Move) -> MoveOutcome {
        if self.phase != Phase::Falling {
            return MoveOutcome::Rejected;
        }
        let Some(current) = self.active.as_ref() else {
            return MoveOutcome::Rejected;
        };

        let mut candidate = match mv {
            Move::Left => current.shifted(0, -1),
            Move::Right => current.shifted(0, 1),
            Move::Rotate => current.rotated(),
            Move::Down => current.shifted(1, 0),
        };

        if mv == Move::Down {
            // The floor check needs the unclamped row, or the piece could
            // never land.
            if collided(&candidate, &self.board) {
                self.phase = Phase::Locking;
                trace!(row = current.row, col = current.col, "landed");
                return MoveOutcome::Landed;
            }
            clamp_to_bounds(&mut candidate, self.board.dims());
        } else {
            // Sideways moves and rotations are pulled back inside the board
            // first; only an overlap with settled cells rejects them.
            clamp_to_bounds(&mut candidate, self.board.dims());
            if collided(&candidate, &self.board) {
                trace!(mv = mv.as_str(), "move rejected");
                return MoveOutcome::Rejected;
            }
        }

        self.active = Some(candidate);
        MoveOutcome::Moved
    }

    /// Merge the landed piece into the board and clear full rows.
    ///
    /// The piece is merged at its last legal position. Returns the rows
    /// cleared by this lock. Does nothing outside `Locking`.
    pub fn lock(&mut self) -> usize {
        if self.phase != Phase::Locking {
            return 0;
        }
        let Some(active) = self.active.take() else {
            self.phase = Phase::Spawning;
            return 0;
        };

        let merged = Board::overlay(&self.board, &rasterize(&active, self.board.dims()), 1, 1);
        debug_assert!(merged.is_settled(), "locked piece overlapped settled cells");

        let (board, cleared) = merged.compact();
        self.board = board;
        self.rows_cleared += cleared;
        self.pieces_locked += 1;
        self.phase = Phase::Spawning;

        if cleared > 0 {
            info!(cleared, total = self.rows_cleared, "rows cleared");
        }
        debug!(
            piece = active.piece.kind().as_str(),
            row = active.row,
            col = active.col,
            "locked"
        );
        cleared
    }

    /// Settled board with the active piece drawn on top (piece cells are 2)
    pub fn frame(&self) -> Board {
        match &self.active {
            Some(active) => {
                Board::overlay(&self.board, &rasterize(active, self.board.dims()), 1, 2)
            }
            None => self.board.clone(),
        }
    }
}
