use std::path::PathBuf;

/// Errors raised while constructing or validating a board or game state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("board must have at least one row and one column (got {width}x{height})")]
    EmptyBoard { width: usize, height: usize },

    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown cell '{ch}' at row {row}, column {col}")]
    UnknownCell { ch: char, row: usize, col: usize },

    #[error("piece at row {row}, column {col} has an empty cell beneath it")]
    FloatingPiece { row: usize, col: usize },

    #[error("run length must be at least 2 (got {0})")]
    RunLengthTooShort(usize),

    #[error("run length {matches} cannot fit on a {width}x{height} board")]
    RunLengthTooLong {
        matches: usize,
        width: usize,
        height: usize,
    },
}

/// Errors from dropping a piece into a column.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column {0} is full")]
    ColumnFull(usize),

    #[error("column {col} is out of range (board has {width} columns)")]
    InvalidColumn { col: usize, width: usize },
}

/// Errors from the move-selection engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("no legal move: every column is full")]
    NoLegalMove,

    #[error("invalid board: {0}")]
    Board(#[from] BoardError),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),

    #[error("unknown preset '{0}' (expected 'easy', 'medium', or 'hard')")]
    UnknownPreset(String),
}
