//! Board model: gravity-aware grid, players, line axes, and the immutable
//! game state handed to the engine.

mod axis;
mod board;
mod player;
mod state;

pub use axis::Axis;
pub use board::{Board, Cell, MovePosition, STANDARD_COLS, STANDARD_ROWS};
pub use player::Player;
pub use state::{GameOutcome, GameState, DEFAULT_MATCHES_NEEDED};
