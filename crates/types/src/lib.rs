//! Shared types and constants.
//!
//! Everything here is plain data with no external dependencies, usable from
//! the core rules, the async game loop and the terminal collaborators alike.
//!
//! # Board geometry
//!
//! The board is taller than what the player sees. The top
//! [`SPAWN_BUFFER_ROWS`] rows form the spawn buffer where pieces appear
//! before they fall into view:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BOARD_WIDTH` | 10 | Columns |
//! | `SPAWN_BUFFER_ROWS` | 4 | Hidden rows above the visible well |
//! | `VISIBLE_ROWS` | 20 | Rows drawn by the renderer |
//! | `BOARD_HEIGHT` | 24 | Total rows, buffer included |
//! | `SPAWN_ROW` / `SPAWN_COL` | 3 / 4 | Top-left of a freshly spawned piece |
//! | `GAME_OVER_ROW` | 4 | First visible row; any settled cell here ends the game |
//!
//! # Gravity
//!
//! The drop interval starts at [`BASE_DROP_MS`] and halves every
//! [`ROWS_PER_SPEEDUP`] cleared rows, never going below
//! [`DROP_INTERVAL_MIN_MS`].
//!
//! ```
//! use std::time::Duration;
//! use tty_tetris_types::GameConfig;
//!
//! let config = GameConfig::default();
//! assert_eq!(config.drop_interval(0), Duration::from_millis(1000));
//! assert_eq!(config.drop_interval(5), Duration::from_millis(500));
//! assert_eq!(config.drop_interval(500), Duration::from_millis(100));
//! ```

use std::time::Duration;

/// Board width in cells
pub const BOARD_WIDTH: usize = 10;

/// Rows above the visible play area
pub const SPAWN_BUFFER_ROWS: usize = 4;

/// Rows the renderer shows
pub const VISIBLE_ROWS: usize = 20;

/// Total board height, spawn buffer included
pub const BOARD_HEIGHT: usize = SPAWN_BUFFER_ROWS + VISIBLE_ROWS;

/// Row offset of a freshly spawned piece (last row of the spawn buffer)
pub const SPAWN_ROW: usize = SPAWN_BUFFER_ROWS - 1;

/// Column offset of a freshly spawned piece
pub const SPAWN_COL: usize = 4;

/// Boundary row checked for game over right after every spawn
pub const GAME_OVER_ROW: usize = SPAWN_BUFFER_ROWS;

/// Gravity interval before any row is cleared
pub const BASE_DROP_MS: u64 = 1000;

/// Cleared rows needed to halve the drop interval
pub const ROWS_PER_SPEEDUP: usize = 5;

/// Fastest gravity the game will ever reach
pub const DROP_INTERVAL_MIN_MS: u64 = 100;

/// Capacity of the queue between the input task and the game loop
pub const INPUT_QUEUE_CAPACITY: usize = 8;

/// A player move. Carries no payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    /// Shift one column left
    Left,
    /// Shift one column right
    Right,
    /// Rotate 90° clockwise
    Rotate,
    /// Drop one row
    Down,
}

impl Move {
    pub fn as_str(&self) -> &'static str {
        match self {
            Move::Left => "left",
            Move::Right => "right",
            Move::Rotate => "rotate",
            Move::Down => "down",
        }
    }
}

/// Event produced by the input decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Move(Move),
    /// Kill keystroke: leave immediately, no game-over report
    Quit,
}

/// Runtime tunables.
///
/// Geometry defaults to the constants above; only the acceleration curve,
/// the RNG seed and the log destination are read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub board_height: usize,
    pub board_width: usize,
    pub spawn_row: usize,
    pub spawn_col: usize,
    /// First visible row; also the game-over boundary row
    pub visible_row_offset: usize,
    pub base_drop_ms: u64,
    pub min_drop_ms: u64,
    pub rows_per_speedup: usize,
    pub seed: Option<u64>,
    pub log_path: Option<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_height: BOARD_HEIGHT,
            board_width: BOARD_WIDTH,
            spawn_row: SPAWN_ROW,
            spawn_col: SPAWN_COL,
            visible_row_offset: GAME_OVER_ROW,
            base_drop_ms: BASE_DROP_MS,
            min_drop_ms: DROP_INTERVAL_MIN_MS,
            rows_per_speedup: ROWS_PER_SPEEDUP,
            seed: None,
            log_path: None,
        }
    }
}

impl GameConfig {
    /// Create from environment variables.
    ///
    /// - `TETRIS_BASE_DROP_MS`: starting gravity interval
    /// - `TETRIS_MIN_DROP_MS`: gravity floor
    /// - `TETRIS_SEED`: fixed piece sequence
    /// - `TETRIS_LOG_PATH`: write logs to this file
    pub fn from_env() -> Self {
        use std::env;

        let defaults = Self::default();

        let base_drop_ms = env::var("TETRIS_BASE_DROP_MS")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .filter(|&ms: &u64| ms > 0)
            .unwrap_or(defaults.base_drop_ms);

        let min_drop_ms = env::var("TETRIS_MIN_DROP_MS")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .filter(|&ms: &u64| ms > 0)
            .unwrap_or(defaults.min_drop_ms);

        let seed = env::var("TETRIS_SEED")
            .ok()
            .and_then(|s| s.trim().parse().ok());

        let log_path = env::var("TETRIS_LOG_PATH")
            .ok()
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) });

        Self {
            base_drop_ms,
            min_drop_ms,
            seed,
            log_path,
            ..defaults
        }
    }

    /// Gravity interval after `rows_cleared` total cleared rows.
    ///
    /// Halves every `rows_per_speedup` rows and is floored at `min_drop_ms`.
    pub fn drop_interval(&self, rows_cleared: usize) -> Duration {
        let level = rows_cleared / self.rows_per_speedup.max(1);
        let ms = u32::try_from(level)
            .ok()
            .and_then(|shift| self.base_drop_ms.checked_shr(shift))
            .unwrap_or(0);
        Duration::from_millis(ms.max(self.min_drop_ms))
    }
}
