//! Terminal runner (default binary).
//!
//! Sets up the terminal, starts the input task and plays one game. On game
//! over the final board is printed after the terminal is restored.

use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::{mpsc, watch};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tty_tetris::core::{GameState, Piece};
use tty_tetris::engine::{run_game, GameOutcome};
use tty_tetris::input::spawn_input_task;
use tty_tetris::term::{render_text, TerminalRenderer};
use tty_tetris::types::{GameConfig, INPUT_QUEUE_CAPACITY};

fn main() -> Result<()> {
    let config = GameConfig::from_env();
    init_logging(&config)?;

    let runtime = tokio::runtime::Runtime::new().context("starting tokio runtime")?;
    let visible_row_offset = config.visible_row_offset;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = runtime.block_on(play(config, &mut term));

    // Always try to restore terminal state.
    let _ = term.exit();

    match result? {
        GameOutcome::GameOver {
            rows_cleared,
            final_frame,
            ..
        } => {
            print!("{}", render_text(&final_frame, visible_row_offset));
            println!("You died! Rows cleared: {rows_cleared}");
        }
        GameOutcome::Quit => {}
    }
    Ok(())
}

async fn play(config: GameConfig, term: &mut TerminalRenderer) -> Result<GameOutcome> {
    let (input_tx, input_rx) = mpsc::channel(INPUT_QUEUE_CAPACITY);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let input = spawn_input_task(input_tx, shutdown_rx);

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    info!(seed = ?config.seed, "game starting");

    let state = GameState::new(config);
    let outcome = run_game(state, || Piece::random(&mut rng), input_rx, term).await;

    // Receivers may already be gone if the input task failed.
    let _ = shutdown_tx.send(true);
    let input_result = input.await.context("input task panicked")?;

    match (outcome, input_result) {
        (Err(_), Err(input_err)) => Err(input_err.context("terminal input failed")),
        (outcome, _) => outcome,
    }
}

/// Log to `TETRIS_LOG_PATH` when set; the terminal itself belongs to the game.
fn init_logging(config: &GameConfig) -> Result<()> {
    let Some(path) = config.log_path.as_deref() else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {path}"))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
