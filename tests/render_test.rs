//! Rendering tests against real game frames

use tty_tetris::core::{Board, GameState, Piece, PieceKind};
use tty_tetris::term::{render_text, BoardView, FrameBuffer, Viewport, HELP_LINE};
use tty_tetris::types::{GameConfig, BOARD_WIDTH, VISIBLE_ROWS};

#[test]
fn text_frame_shows_visible_rows_only() {
    let mut state = GameState::new(GameConfig::default());
    state.spawn(Piece::new(PieceKind::O));
    let text = render_text(&state.frame(), state.config().visible_row_offset);

    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), VISIBLE_ROWS + 1);
    // O spawns in rows 3..=4; only row 4 is visible.
    assert_eq!(lines[0], "|    XX    |");
    assert_eq!(lines[1], "|          |");
    assert_eq!(lines[VISIBLE_ROWS], "-".repeat(BOARD_WIDTH + 2));
}

#[test]
fn text_frame_distinguishes_settled_and_active() {
    let mut board = Board::new();
    board.set(23, 0, 1);
    let mut state = GameState::with_board(GameConfig::default(), board);
    state.spawn(Piece::new(PieceKind::I));
    let text = render_text(&state.frame(), 4);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "|    X     |");
    assert_eq!(lines[19], "|#         |");
}

#[test]
fn board_view_fits_standard_board_in_default_terminal() {
    let view = BoardView::default();
    let board = Board::new();
    let (w, h) = view.frame_size(&board, 4);
    assert_eq!((w, h), (22, 22));

    let mut fb = FrameBuffer::new(0, 0);
    view.render_into(&board, 4, Viewport::new(80, 24), &mut fb);
    assert_eq!(fb.width(), 80);
    let help_row = (0..fb.height())
        .find(|&y| fb.row_text(y).contains("ctrl-c"))
        .unwrap();
    assert!(fb.row_text(help_row).contains(HELP_LINE));
}
