//! Terminal falling-block game (workspace facade crate).
//!
//! Re-exports the component crates under short names so the binary, the
//! integration tests and the benches can write `tty_tetris::core::Board`.

pub use tty_tetris_core as core;
pub use tty_tetris_engine as engine;
pub use tty_tetris_input as input;
pub use tty_tetris_term as term;
pub use tty_tetris_types as types;
