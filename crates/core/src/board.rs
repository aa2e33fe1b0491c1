//! Board module - the settled grid
//!
//! The board is a fixed-size grid of integer cells stored as a flat row-major
//! array. Row 0 is the top of the spawn buffer, rows grow downward.
//!
//! Cell values:
//! - `0`: empty
//! - `1`: settled block
//! - `2`: transient marker produced by [`Board::overlay`]. With weights (1, 1)
//!   it means "collision"; with weights (1, 2) it marks the active piece for
//!   the renderer. A settled board never stores it.

use crate::types::{BOARD_HEIGHT, BOARD_WIDTH};

pub const EMPTY: u8 = 0;
pub const SETTLED: u8 = 1;
pub const MARKER: u8 = 2;

/// The game board
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    height: usize,
    width: usize,
    /// Flat array of cells, row-major order (row * width + col)
    cells: Vec<u8>,
}

impl Board {
    /// Create an empty board with the standard dimensions (spawn buffer included)
    pub fn new() -> Self {
        Self::with_size(BOARD_HEIGHT, BOARD_WIDTH)
    }

    /// Create an empty board of arbitrary size
    pub fn with_size(height: usize, width: usize) -> Self {
        Self {
            height,
            width,
            cells: vec![EMPTY; height * width],
        }
    }

    /// Build a board from rows of cells.
    ///
    /// # Panics
    ///
    /// Panics if the rows are ragged.
    pub fn from_rows(rows: &[Vec<u8>]) -> Self {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        assert!(
            rows.iter().all(|row| row.len() == width),
            "board rows must all have the same width"
        );
        Self {
            height,
            width,
            cells: rows.concat(),
        }
    }

    #[inline(always)]
    fn index(&self, row: usize, col: usize) -> Option<usize> {
        if row >= self.height || col >= self.width {
            return None;
        }
        Some(row * self.width + col)
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// (height, width)
    pub fn dims(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    /// Cell at (row, col); `None` if out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        self.index(row, col).map(|idx| self.cells[idx])
    }

    /// Set cell at (row, col). Returns false if out of bounds.
    pub fn set(&mut self, row: usize, col: usize, value: u8) -> bool {
        match self.index(row, col) {
            Some(idx) => {
                self.cells[idx] = value;
                true
            }
            None => false,
        }
    }

    /// Slice of one row
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of bounds.
    pub fn row(&self, row: usize) -> &[u8] {
        let start = row * self.width;
        &self.cells[start..start + self.width]
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> + '_ {
        // `chunks(0)` panics, so a zero-width board yields no rows.
        self.cells.chunks(self.width.max(1)).take(self.height)
    }

    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Every cell in the row is a settled block
    pub fn is_row_full(&self, row: usize) -> bool {
        row < self.height && self.row(row).iter().all(|&cell| cell == SETTLED)
    }

    /// Any cell in the row is non-zero
    pub fn row_has_blocks(&self, row: usize) -> bool {
        row < self.height && self.row(row).iter().any(|&cell| cell != EMPTY)
    }

    /// Any cell carries the overlay marker
    pub fn has_marker(&self) -> bool {
        self.cells.iter().any(|&cell| cell >= MARKER)
    }

    /// Every cell is 0 or 1
    pub fn is_settled(&self) -> bool {
        self.cells.iter().all(|&cell| cell <= SETTLED)
    }

    /// Cell-wise weighted sum `a * weight_a + b * weight_b`.
    ///
    /// Weights (1, 1) test for collisions: a cell occupied in both operands
    /// comes out as [`MARKER`]. Weights (1, 2) draw the falling piece over the
    /// settled board so the renderer can tell the two apart.
    ///
    /// # Panics
    ///
    /// Panics if the two boards differ in size. Pieces must be rasterized onto
    /// a full-size board before they are overlaid.
    ///
    /// Also panics if a weighted sum does not fit in a `u8` cell. For boards
    /// of 0/1 cells that takes weights adding up to more than 255.
    pub fn overlay(a: &Board, b: &Board, weight_a: u8, weight_b: u8) -> Board {
        assert_eq!(
            a.dims(),
            b.dims(),
            "overlay operands must have equal dimensions"
        );
        let cells = a
            .cells
            .iter()
            .zip(&b.cells)
            .map(|(&x, &y)| {
                x.checked_mul(weight_a)
                    .zip(y.checked_mul(weight_b))
                    .and_then(|(wx, wy)| wx.checked_add(wy))
                    .unwrap_or_else(|| {
                        panic!("overlay cell overflowed u8: {x} * {weight_a} + {y} * {weight_b}")
                    })
            })
            .collect();
        Board {
            height: a.height,
            width: a.width,
            cells,
        }
    }

    /// Remove every full row and return the compacted board with the number
    /// of rows removed.
    ///
    /// Rows are scanned bottom to top; surviving rows keep their relative
    /// order and slide down, and the vacated rows at the top come back empty.
    /// A row is cleared only if it is full on its own.
    pub fn compact(&self) -> (Board, usize) {
        let mut out = Board::with_size(self.height, self.width);
        let width = self.width;
        let mut write_row = self.height;

        for read_row in (0..self.height).rev() {
            if self.is_row_full(read_row) {
                continue;
            }
            write_row -= 1;
            let src = read_row * width;
            let dst = write_row * width;
            out.cells[dst..dst + width].copy_from_slice(&self.cells[src..src + width]);
        }

        // Rows 0..write_row were never written and are still empty.
        (out, write_row)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
