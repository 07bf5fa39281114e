//! # Drop Connect
//!
//! Move-selection engine for gravity-drop connection games: a fixed grid,
//! pieces fall to the lowest empty cell of a column, and the first player to
//! line up a configurable number of pieces wins (four on the classic 7x6
//! board).
//!
//! ## Modules
//!
//! - [`game`]: Board model: gravity-aware grid, players, axes, game state
//! - [`ai`]: Pattern detection, heuristic evaluation, minimax search, move
//!   selection, and the agent trait
//! - [`config`]: Evaluation weights, presets, search settings, TOML loading
//! - [`error`]: Structured error types
//!
//! ```
//! use drop_connect::ai::choose_move;
//! use drop_connect::config::Preset;
//! use drop_connect::game::GameState;
//!
//! let state = GameState::initial();
//! let mv = choose_move(&state, Preset::Medium.config()).unwrap();
//! assert_eq!(mv.col, 3);
//! ```

pub mod ai;
pub mod config;
pub mod error;
pub mod game;
