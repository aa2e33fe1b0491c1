//! End-to-end runs of the async loop under tokio's paused clock

use std::time::Duration;

use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::mpsc;
use tokio_test::assert_ok;

use tty_tetris::core::{Board, GameState, Piece, PieceKind};
use tty_tetris::engine::{run_game, GameOutcome, Renderer};
use tty_tetris::types::{GameConfig, InputEvent, Move, GAME_OVER_ROW};

#[derive(Default)]
struct CountingRenderer {
    frames: usize,
    last: Option<Board>,
    offsets: Vec<usize>,
}

impl Renderer for CountingRenderer {
    fn draw(&mut self, frame: &Board, visible_row_offset: usize) -> Result<()> {
        self.frames += 1;
        self.last = Some(frame.clone());
        if !self.offsets.contains(&visible_row_offset) {
            self.offsets.push(visible_row_offset);
        }
        Ok(())
    }
}

#[tokio::test(start_paused = true)]
async fn random_game_runs_to_game_over() {
    let (_tx, rx) = mpsc::channel(8);
    let mut rng = StdRng::seed_from_u64(2024);
    let mut renderer = CountingRenderer::default();

    let outcome = assert_ok!(
        run_game(
            GameState::new(GameConfig::default()),
            || Piece::random(&mut rng),
            rx,
            &mut renderer,
        )
        .await
    );

    let (pieces_locked, final_frame) = match outcome {
        GameOutcome::GameOver {
            pieces_locked,
            final_frame,
            ..
        } => (pieces_locked, final_frame),
        GameOutcome::Quit => panic!("expected game over"),
    };
    assert!(pieces_locked > 0);
    assert!(final_frame.row_has_blocks(GAME_OVER_ROW));
    assert_eq!(renderer.offsets, vec![GAME_OVER_ROW]);
    assert_eq!(renderer.last.as_ref(), Some(&final_frame));
}

#[tokio::test(start_paused = true)]
async fn input_is_handled_between_gravity_ticks() {
    let (tx, rx) = mpsc::channel(8);
    let mut renderer = CountingRenderer::default();
    let state = GameState::new(GameConfig::default());

    let game = tokio::spawn(async move {
        let outcome = run_game(state, || Piece::new(PieceKind::I), rx, &mut renderer).await;
        (outcome, renderer)
    });

    tokio::time::sleep(Duration::from_millis(500)).await;
    tx.send(InputEvent::Move(Move::Rotate)).await.unwrap();
    tokio::time::sleep(Duration::from_millis(1000)).await;
    tx.send(InputEvent::Quit).await.unwrap();

    let (outcome, renderer) = game.await.unwrap();
    assert_eq!(assert_ok!(outcome), GameOutcome::Quit);

    // Spawn, rotate at 500 ms, gravity at 1000 ms.
    assert_eq!(renderer.frames, 3);
    let last = renderer.last.unwrap();
    let active: Vec<(usize, usize)> = (0..last.height())
        .flat_map(|r| (0..last.width()).map(move |c| (r, c)))
        .filter(|&(r, c)| last.get(r, c) == Some(2))
        .collect();
    assert_eq!(active, vec![(4, 4), (4, 5), (4, 6), (4, 7)]);
}

#[tokio::test(start_paused = true)]
async fn cleared_rows_speed_up_the_next_piece() {
    // One-column board: every I clears four rows, two of them reach level 1.
    let config = GameConfig {
        board_height: 12,
        board_width: 1,
        spawn_col: 0,
        ..GameConfig::default()
    };
    let (tx, rx) = mpsc::channel(8);
    let mut renderer = CountingRenderer::default();

    let game = tokio::spawn(async move {
        let outcome = run_game(
            GameState::new(config),
            || Piece::new(PieceKind::I),
            rx,
            &mut renderer,
        )
        .await;
        (outcome, renderer)
    });

    // Each piece falls rows 3 -> 8 (five ticks) then lands on the sixth.
    // Pieces one and two at 1000 ms per tick take 12 s; piece three runs at
    // 500 ms, so after 12 s + 2.5 s it has taken five steps.
    tokio::time::sleep(Duration::from_millis(14_750)).await;
    tx.send(InputEvent::Quit).await.unwrap();

    let (outcome, renderer) = game.await.unwrap();
    assert_eq!(assert_ok!(outcome), GameOutcome::Quit);
    let last = renderer.last.unwrap();
    assert_eq!(last.row(8), &[2]);
    assert_eq!(last.row(7), &[0]);
}
