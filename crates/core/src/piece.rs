//! Piece module - tetromino shapes as 0/1 occupancy grids
//!
//! Each piece is a small rectangular grid stored row-major in a fixed-capacity
//! buffer (no piece is larger than 4 cells on a side). Rotation is a plain
//! quarter-turn transpose-and-reverse; there are no kick tables and no
//! legality checks here. Whether a rotated piece fits is decided by the
//! placement logic.

use arrayvec::ArrayVec;
use rand::Rng;

/// Maximum cells in a piece grid (4x4)
const MAX_CELLS: usize = 16;

/// The seven tetromino kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    Z,
    T,
}

impl PieceKind {
    /// All kinds, in spawn-table order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::T,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::J => "j",
            PieceKind::L => "l",
            PieceKind::O => "o",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::T => "t",
        }
    }

    /// Spawn orientation as rows of 0/1 cells
    pub fn rows(&self) -> &'static [&'static [u8]] {
        match self {
            PieceKind::I => &[&[1], &[1], &[1], &[1]],
            PieceKind::J => &[&[0, 1], &[0, 1], &[1, 1]],
            PieceKind::L => &[&[1, 0], &[1, 0], &[1, 1]],
            PieceKind::O => &[&[1, 1], &[1, 1]],
            PieceKind::S => &[&[1, 0], &[1, 1], &[0, 1]],
            PieceKind::Z => &[&[0, 1], &[1, 1], &[1, 0]],
            PieceKind::T => &[&[0, 1, 0], &[1, 1, 1]],
        }
    }
}

/// A tetromino in its current orientation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: PieceKind,
    height: usize,
    width: usize,
    /// Row-major cells, `height * width` long
    cells: ArrayVec<u8, MAX_CELLS>,
}

impl Piece {
    /// Create a piece of the given kind in its spawn orientation
    pub fn new(kind: PieceKind) -> Self {
        Self::build(kind, kind.rows())
    }

    /// Pick one of the seven kinds uniformly at random
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let idx = rng.gen_range(0..PieceKind::ALL.len());
        Self::new(PieceKind::ALL[idx])
    }

    /// Build a piece from explicit rows, keeping `kind` as its label.
    ///
    /// # Panics
    ///
    /// Panics if `rows` is empty, ragged, larger than 4x4, or contains a value
    /// other than 0 or 1. A malformed shape is a logic defect.
    pub fn from_rows(kind: PieceKind, rows: &[&[u8]]) -> Self {
        Self::build(kind, rows)
    }

    fn build(kind: PieceKind, rows: &[&[u8]]) -> Self {
        assert!(!rows.is_empty(), "piece shape has no rows");
        let width = rows[0].len();
        assert!(width > 0, "piece shape has no columns");
        assert!(
            rows.iter().all(|row| row.len() == width),
            "piece shape is not rectangular"
        );
        assert!(rows.len() * width <= MAX_CELLS, "piece shape exceeds 4x4");

        let mut cells = ArrayVec::new();
        for row in rows {
            for &cell in row.iter() {
                assert!(cell <= 1, "piece cell must be 0 or 1, got {cell}");
                cells.push(cell);
            }
        }

        Self {
            kind,
            height: rows.len(),
            width,
            cells,
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    /// (height, width)
    pub fn dims(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Cell value at (row, col); `None` outside the grid
    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        if row >= self.height || col >= self.width {
            return None;
        }
        Some(self.cells[row * self.width + col])
    }

    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        self.get(row, col) == Some(1)
    }

    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Iterate occupied cells as (row, col) offsets within the piece grid
    pub fn filled_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell != 0)
            .map(move |(idx, _)| (idx / width, idx % width))
    }

    /// Rotate a quarter turn in place.
    ///
    /// For an `h x w` source the result is `w x h` with
    /// `result[r][c] = source[c][w - 1 - r]`.
    pub fn rotate(&mut self) {
        let (h, w) = (self.height, self.width);
        let mut cells = ArrayVec::new();
        for r in 0..w {
            for c in 0..h {
                cells.push(self.cells[c * w + (w - 1 - r)]);
            }
        }
        self.cells = cells;
        self.height = w;
        self.width = h;
    }

    /// Rotated copy, leaving `self` untouched
    pub fn rotated(&self) -> Self {
        let mut next = self.clone();
        next.rotate();
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn every_kind_has_four_cells() {
        for kind in PieceKind::ALL {
            let piece = Piece::new(kind);
            assert_eq!(piece.filled_cells().count(), 4, "{:?}", kind);
        }
    }

    #[test]
    fn rotate_swaps_dimensions() {
        let mut t = Piece::new(PieceKind::T);
        assert_eq!(t.dims(), (2, 3));
        t.rotate();
        assert_eq!(t.dims(), (3, 2));
    }

    #[test]
    fn rotate_follows_transpose_and_reverse() {
        // 010      01
        // 111  ->  11
        //          01
        let t = Piece::new(PieceKind::T).rotated();
        assert_eq!(t.cells(), &[0, 1, 1, 1, 0, 1]);
    }

    #[test]
    fn is_filled_reads_the_grid() {
        let t = Piece::new(PieceKind::T);
        assert!(t.is_filled(0, 1));
        assert!(!t.is_filled(0, 0));
        assert!((0..3).all(|c| t.is_filled(1, c)));
        // Outside the grid
        assert!(!t.is_filled(2, 0));
        assert!(!t.is_filled(0, 3));
    }

    #[test]
    fn rotating_i_gives_horizontal_bar() {
        let i = Piece::new(PieceKind::I).rotated();
        assert_eq!(i.dims(), (1, 4));
        assert!(i.cells().iter().all(|&c| c == 1));
    }

    #[test]
    fn random_covers_all_kinds() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            seen.insert(Piece::random(&mut rng).kind());
        }
        assert_eq!(seen.len(), 7);
    }

    #[test]
    #[should_panic(expected = "no rows")]
    fn empty_shape_is_rejected() {
        Piece::from_rows(PieceKind::O, &[]);
    }

    #[test]
    #[should_panic(expected = "not rectangular")]
    fn ragged_shape_is_rejected() {
        Piece::from_rows(PieceKind::O, &[&[1, 1], &[1]]);
    }
}
