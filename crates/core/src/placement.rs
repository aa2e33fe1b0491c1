//! Collision and placement logic
//!
//! A candidate position is checked in two steps. First the unclamped
//! candidate is tested against the floor. Then it is clamped into the board,
//! rasterized onto a full-size board and overlaid on the settled cells with
//! weights (1, 1). Any cell that sums to 2 is a collision.

use crate::board::{Board, SETTLED};
use crate::piece::Piece;

/// The falling piece and its offset on the board grid
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub piece: Piece,
    /// Row of the piece's top edge
    pub row: usize,
    /// Column of the piece's left edge
    pub col: usize,
}

impl ActivePiece {
    pub fn spawn_at(piece: Piece, row: usize, col: usize) -> Self {
        Self { piece, row, col }
    }

    /// Row index just past the piece's bottom edge
    pub fn bottom(&self) -> usize {
        self.row + self.piece.height()
    }

    /// Column index just past the piece's right edge
    pub fn right(&self) -> usize {
        self.col + self.piece.width()
    }

    /// Copy moved by the given deltas. Columns saturate at 0 so a shift past
    /// the left wall is corrected by clamping rather than wrapping.
    pub fn shifted(&self, d_row: isize, d_col: isize) -> Self {
        Self {
            piece: self.piece.clone(),
            row: self.row.saturating_add_signed(d_row),
            col: self.col.saturating_add_signed(d_col),
        }
    }

    /// Copy with the piece rotated a quarter turn
    pub fn rotated(&self) -> Self {
        Self {
            piece: self.piece.rotated(),
            row: self.row,
            col: self.col,
        }
    }
}

/// Pull the offsets back so the bounding box fits inside `(height, width)`.
///
/// Columns end up in `[0, width - piece_width]`, rows in
/// `[0, height - piece_height]`. Offsets never go negative, so only the upper
/// bound needs correcting. A piece wider or taller than the board is pinned
/// to offset 0.
pub fn clamp_to_bounds(active: &mut ActivePiece, (height, width): (usize, usize)) {
    let (piece_h, piece_w) = active.piece.dims();
    active.col = active.col.min(width.saturating_sub(piece_w));
    active.row = active.row.min(height.saturating_sub(piece_h));
}

/// Full-board-sized grid with the piece's cells at its offset, everything
/// else zero. Cells that fall outside the board are dropped, so callers
/// should clamp first.
pub fn rasterize(active: &ActivePiece, dims: (usize, usize)) -> Board {
    let mut out = Board::with_size(dims.0, dims.1);
    for (r, c) in active.piece.filled_cells() {
        out.set(active.row + r, active.col + c, SETTLED);
    }
    out
}

/// The piece's bottom edge has passed the board's floor
pub fn overshoots_floor(active: &ActivePiece, board: &Board) -> bool {
    active.bottom() > board.height()
}

/// Whether `active` may occupy its position on `board`.
///
/// True when the piece has gone through the floor, or when the clamped piece
/// overlaid on the settled cells yields a collision marker.
pub fn collided(active: &ActivePiece, board: &Board) -> bool {
    if overshoots_floor(active, board) {
        return true;
    }
    let mut placed = active.clone();
    clamp_to_bounds(&mut placed, board.dims());
    Board::overlay(board, &rasterize(&placed, board.dims()), 1, 1).has_marker()
}
