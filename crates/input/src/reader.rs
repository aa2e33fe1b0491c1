//! The input task.
//!
//! Terminal reads block, so the reader lives on tokio's blocking pool and
//! never shares a thread with the game loop. It polls with a short timeout so
//! it can notice the shutdown signal between keystrokes, and pushes each
//! decoded event into the bounded queue the loop reads from.

use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::map::map_key_event;
use crate::types::InputEvent;

/// How long one poll waits before re-checking the shutdown signal
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Start the reader.
///
/// The task ends when `shutdown` flips to true, when the loop drops its end
/// of the queue, or on a terminal I/O error, which the handle returns.
pub fn spawn_input_task(
    tx: mpsc::Sender<InputEvent>,
    shutdown: watch::Receiver<bool>,
) -> JoinHandle<Result<()>> {
    tokio::task::spawn_blocking(move || {
        let result = read_loop(&tx, &shutdown);
        if let Err(err) = &result {
            error!(error = %err, "input task failed");
        }
        result
    })
}

fn read_loop(tx: &mpsc::Sender<InputEvent>, shutdown: &watch::Receiver<bool>) -> Result<()> {
    info!("input task started");
    loop {
        if *shutdown.borrow() {
            break;
        }
        if !event::poll(POLL_INTERVAL).context("polling terminal input")? {
            continue;
        }
        let Event::Key(key) = event::read().context("reading terminal input")? else {
            continue;
        };
        let Some(input) = map_key_event(key) else {
            continue;
        };
        if tx.blocking_send(input).is_err() {
            // Receiver gone: the game loop has already finished.
            break;
        }
    }
    debug!("input task stopped");
    Ok(())
}
