use super::{Board, MovePosition, Player};
use crate::ai::patterns;
use crate::error::BoardError;

/// Default number of pieces in a line needed to win.
pub const DEFAULT_MATCHES_NEEDED: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Winner(Player),
    Draw,
}

/// A position handed to the engine: board, the move that produced it,
/// whose turn is next, and the winning run length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    last_move: Option<MovePosition>,
    to_move: Player,
    matches_needed: usize,
}

impl GameState {
    /// Validate and build a state. The run length must be at least 2 and fit
    /// along at least one board dimension.
    pub fn new(
        board: Board,
        last_move: Option<MovePosition>,
        to_move: Player,
        matches_needed: usize,
    ) -> Result<Self, BoardError> {
        if matches_needed < 2 {
            return Err(BoardError::RunLengthTooShort(matches_needed));
        }
        if matches_needed > board.width().max(board.height()) {
            return Err(BoardError::RunLengthTooLong {
                matches: matches_needed,
                width: board.width(),
                height: board.height(),
            });
        }
        Ok(GameState {
            board,
            last_move,
            to_move,
            matches_needed,
        })
    }

    /// Empty 7x6 board, first player to move, four to win
    pub fn initial() -> Self {
        GameState {
            board: Board::standard(),
            last_move: None,
            to_move: Player::First,
            matches_needed: DEFAULT_MATCHES_NEEDED,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn last_move(&self) -> Option<MovePosition> {
        self.last_move
    }

    pub fn to_move(&self) -> Player {
        self.to_move
    }

    pub fn matches_needed(&self) -> usize {
        self.matches_needed
    }

    /// Winner if any run of the winning length exists, draw if the board is
    /// full, otherwise `None`.
    pub fn outcome(&self) -> Option<GameOutcome> {
        if let Some(winner) = patterns::winner(&self.board, self.last_move, self.matches_needed) {
            Some(GameOutcome::Winner(winner))
        } else if self.board.is_full() {
            Some(GameOutcome::Draw)
        } else {
            None
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.outcome().is_some()
    }

    /// Successor state after the player to move drops at `pos`.
    /// `pos` must come from `board().available_moves()`.
    pub fn apply(&self, pos: MovePosition) -> GameState {
        GameState {
            board: self.board.apply_move(pos, self.to_move),
            last_move: Some(pos),
            to_move: self.to_move.other(),
            matches_needed: self.matches_needed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play_columns(cols: &[usize]) -> GameState {
        let mut state = GameState::initial();
        for &col in cols {
            let pos = state
                .board()
                .available_moves()
                .into_iter()
                .find(|m| m.col == col)
                .unwrap();
            state = state.apply(pos);
        }
        state
    }

    #[test]
    fn test_initial_state() {
        let state = GameState::initial();
        assert_eq!(state.to_move(), Player::First);
        assert_eq!(state.last_move(), None);
        assert!(!state.is_terminal());
        assert_eq!(state.board().available_moves().len(), 7);
    }

    #[test]
    fn test_apply() {
        let state = GameState::initial();
        let next = state.apply(MovePosition::new(5, 3));

        assert_eq!(next.to_move(), Player::Second);
        assert_eq!(next.last_move(), Some(MovePosition::new(5, 3)));
        assert_eq!(next.board().get(5, 3), Some(Player::First));
        assert_eq!(state.board().get(5, 3), None);
    }

    #[test]
    fn test_win_detection() {
        // First fills the bottom row 0..4, Second stacks on top of 0..3
        let state = play_columns(&[0, 0, 1, 1, 2, 2, 3]);
        assert_eq!(state.outcome(), Some(GameOutcome::Winner(Player::First)));
    }

    #[test]
    fn test_draw_on_full_board_without_runs() {
        // Columns alternate in pairs so no four line up in any direction
        let board: Board = "\
            XXOOXXO\n\
            OOXXOOX\n\
            XXOOXXO\n\
            OOXXOOX\n\
            XXOOXXO\n\
            OOXXOOX"
            .parse()
            .unwrap();
        let state = GameState::new(board, None, Player::First, 4).unwrap();
        assert_eq!(state.outcome(), Some(GameOutcome::Draw));
    }

    #[test]
    fn test_run_length_validation() {
        let board = Board::standard();
        assert_eq!(
            GameState::new(board.clone(), None, Player::First, 1),
            Err(BoardError::RunLengthTooShort(1))
        );
        assert_eq!(
            GameState::new(board.clone(), None, Player::First, 8),
            Err(BoardError::RunLengthTooLong {
                matches: 8,
                width: 7,
                height: 6
            })
        );
        assert!(GameState::new(board, None, Player::Second, 7).is_ok());
    }
}
