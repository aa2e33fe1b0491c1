//! The real-time loop.
//!
//! Each piece gets its own gravity timer, armed at spawn with the period
//! derived from the rows cleared so far. While the piece falls, the loop
//! redraws and then waits for whichever comes first, a timer tick or an input
//! event, and handles exactly that one event before redrawing again.

use anyhow::{bail, Result};
use tokio::sync::mpsc;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::core::{Board, GameState, Phase, Piece};
use crate::types::InputEvent;

/// Anything that can show a frame.
///
/// `frame` is the full board with settled cells as 1 and the falling piece as
/// 2; rows above `visible_row_offset` belong to the spawn buffer.
pub trait Renderer {
    fn draw(&mut self, frame: &Board, visible_row_offset: usize) -> Result<()>;
}

/// How a game ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameOutcome {
    /// The stack reached the spawn area
    GameOver {
        rows_cleared: usize,
        pieces_locked: usize,
        /// Last frame shown, blocking piece included
        final_frame: Board,
    },
    /// The player pressed the kill key
    Quit,
}

/// Play one game to completion.
///
/// `next_piece` supplies every spawned piece. `inputs` is the queue the input
/// task pushes into; it closing before the game ends is an error, since the
/// game cannot go on without a terminal.
pub async fn run_game<R, P>(
    mut state: GameState,
    mut next_piece: P,
    mut inputs: mpsc::Receiver<InputEvent>,
    renderer: &mut R,
) -> Result<GameOutcome>
where
    R: Renderer + ?Sized,
    P: FnMut() -> Piece,
{
    let offset = state.config().visible_row_offset;

    loop {
        if state.spawn(next_piece()) == Phase::GameOver {
            let final_frame = state.frame();
            renderer.draw(&final_frame, offset)?;
            return Ok(GameOutcome::GameOver {
                rows_cleared: state.rows_cleared(),
                pieces_locked: state.pieces_locked(),
                final_frame,
            });
        }

        let period = state.drop_interval();
        let mut gravity = time::interval_at(Instant::now() + period, period);
        gravity.set_missed_tick_behavior(MissedTickBehavior::Delay);

        while state.phase() == Phase::Falling {
            renderer.draw(&state.frame(), offset)?;

            tokio::select! {
                _ = gravity.tick() => {
                    state.tick();
                }
                event = inputs.recv() => match event {
                    Some(InputEvent::Move(mv)) => {
                        let outcome = state.apply_move(mv);
                        debug!(mv = mv.as_str(), ?outcome, "input");
                    }
                    Some(InputEvent::Quit) => {
                        info!(rows_cleared = state.rows_cleared(), "quit requested");
                        return Ok(GameOutcome::Quit);
                    }
                    None => bail!("input source closed"),
                },
            }
        }

        state.lock();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PieceKind;
    use crate::types::{GameConfig, Move};

    #[derive(Default)]
    struct Recorder {
        frames: Vec<Board>,
    }

    impl Renderer for Recorder {
        fn draw(&mut self, frame: &Board, _visible_row_offset: usize) -> Result<()> {
            self.frames.push(frame.clone());
            Ok(())
        }
    }

    fn active_cols(frame: &Board) -> Vec<usize> {
        let mut cols: Vec<usize> = (0..frame.height())
            .flat_map(|r| (0..frame.width()).map(move |c| (r, c)))
            .filter(|&(r, c)| frame.get(r, c) == Some(2))
            .map(|(_, c)| c)
            .collect();
        cols.sort_unstable();
        cols.dedup();
        cols
    }

    #[tokio::test(start_paused = true)]
    async fn stacking_o_pieces_ends_the_game() {
        let (_tx, rx) = mpsc::channel(8);
        let mut recorder = Recorder::default();
        let state = GameState::new(GameConfig::default());

        let outcome = run_game(state, || Piece::new(PieceKind::O), rx, &mut recorder)
            .await
            .unwrap();

        // Twenty visible rows hold ten O pieces; the tenth reaches the boundary row.
        match outcome {
            GameOutcome::GameOver {
                rows_cleared,
                pieces_locked,
                final_frame,
            } => {
                assert_eq!(rows_cleared, 0);
                assert_eq!(pieces_locked, 10);
                assert!(final_frame.row_has_blocks(4));
            }
            GameOutcome::Quit => panic!("expected game over"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn moves_are_applied_in_arrival_order() {
        let (tx, rx) = mpsc::channel(8);
        for _ in 0..4 {
            tx.send(InputEvent::Move(Move::Left)).await.unwrap();
        }
        tx.send(InputEvent::Move(Move::Right)).await.unwrap();
        tx.send(InputEvent::Quit).await.unwrap();

        let mut recorder = Recorder::default();
        let state = GameState::new(GameConfig::default());
        let outcome = run_game(state, || Piece::new(PieceKind::O), rx, &mut recorder)
            .await
            .unwrap();

        assert_eq!(outcome, GameOutcome::Quit);
        // One frame before each event: spawn, four lefts, one right.
        let cols: Vec<Vec<usize>> = recorder.frames.iter().map(active_cols).collect();
        assert_eq!(
            cols,
            vec![
                vec![4, 5],
                vec![3, 4],
                vec![2, 3],
                vec![1, 2],
                vec![0, 1],
                vec![1, 2],
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn gravity_moves_the_piece_once_per_period() {
        let (tx, rx) = mpsc::channel(8);
        let mut recorder = Recorder::default();
        let state = GameState::new(GameConfig::default());

        let game = tokio::spawn(async move {
            let outcome = run_game(state, || Piece::new(PieceKind::O), rx, &mut recorder).await;
            (outcome, recorder)
        });

        time::sleep(std::time::Duration::from_millis(2500)).await;
        tx.send(InputEvent::Quit).await.unwrap();
        let (outcome, recorder) = game.await.unwrap();

        assert_eq!(outcome.unwrap(), GameOutcome::Quit);
        // Spawn frame plus two gravity steps at 1000 ms and 2000 ms.
        assert_eq!(recorder.frames.len(), 3);
        let top = |frame: &Board| (0..frame.height()).find(|&r| frame.row(r).contains(&2));
        assert_eq!(top(&recorder.frames[0]), Some(3));
        assert_eq!(top(&recorder.frames[2]), Some(5));
    }

    #[tokio::test(start_paused = true)]
    async fn closed_input_is_an_error() {
        let (tx, rx) = mpsc::channel::<InputEvent>(8);
        drop(tx);
        let mut recorder = Recorder::default();
        let state = GameState::new(GameConfig::default());

        let err = run_game(state, || Piece::new(PieceKind::T), rx, &mut recorder)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("input source closed"));
    }
}
