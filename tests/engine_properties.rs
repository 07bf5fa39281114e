//! Property tests for the board model and the engine.
//!
//! Positions are generated by replaying random column sequences from the
//! empty board, skipping full columns and stopping once the game is over,
//! so every generated board is reachable in real play.
use drop_connect::ai::{analyze, Evaluator};
use drop_connect::config::{
    EvaluationConfig, ImmediateWeights, RunWeights, SearchConfig, ShortRunWeights,
};
use drop_connect::game::{Board, GameState, MovePosition, Player};
use proptest::prelude::*;

fn replay(width: usize, height: usize, cols: &[usize]) -> GameState {
    let board = Board::new(width, height).unwrap();
    let mut state = GameState::new(board, None, Player::First, 4).unwrap();
    for &col in cols {
        if state.is_terminal() {
            break;
        }
        if let Some(row) = state.board().landing_row(col % width) {
            state = state.apply(MovePosition::new(row, col % width));
        }
    }
    state
}

fn assert_gravity(board: &Board) {
    for col in 0..board.width() {
        let mut seen_piece = false;
        for row in 0..board.height() {
            match board.get(row, col) {
                Some(_) => seen_piece = true,
                None => assert!(!seen_piece, "floating gap at row {row} col {col}"),
            }
        }
    }
}

fn symmetric_config() -> EvaluationConfig {
    EvaluationConfig {
        immediate: ImmediateWeights {
            can_win: 900.0,
            must_block: 900.0,
            fork_opportunity: 5000.0,
        },
        run_minus_one: RunWeights {
            both_ends_open: 120.0,
            one_end_open: 60.0,
            block_opponent_both_ends: 120.0,
            block_opponent_one_end: 60.0,
        },
        run_minus_two: ShortRunWeights {
            both_ends_open: 20.0,
            one_end_open: 8.0,
            block_opponent_both_ends: 20.0,
            block_opponent_one_end: 8.0,
            center_column: 6.0,
        },
        ..EvaluationConfig::default()
    }
}

proptest! {
    #[test]
    fn replayed_boards_respect_gravity(
        width in 4usize..9,
        height in 4usize..8,
        cols in prop::collection::vec(0usize..16, 0..60),
    ) {
        let state = replay(width, height, &cols);
        let board = state.board();
        assert_gravity(board);

        let moves = board.available_moves();
        let open_cols = (0..width).filter(|&c| !board.is_column_full(c)).count();
        prop_assert_eq!(moves.len(), open_cols);
        for mv in moves {
            prop_assert!(board.at(mv).is_none());
            prop_assert!(board.is_playable(mv));
            prop_assert_eq!(board.landing_row(mv.col), Some(mv.row));
        }
    }

    #[test]
    fn apply_move_leaves_the_source_untouched(
        cols in prop::collection::vec(0usize..7, 0..40),
        pick in any::<prop::sample::Index>(),
    ) {
        let state = replay(7, 6, &cols);
        let board = state.board().clone();
        let moves = board.available_moves();
        prop_assume!(!moves.is_empty());

        let mv = moves[pick.index(moves.len())];
        let next = board.apply_move(mv, state.to_move());
        prop_assert_eq!(&board, state.board());
        prop_assert_eq!(next.piece_count(), board.piece_count() + 1);
        prop_assert_eq!(next.at(mv), Some(state.to_move()));
        assert_gravity(&next);
    }

    #[test]
    fn text_form_reparses_to_the_same_board(cols in prop::collection::vec(0usize..7, 0..42)) {
        let state = replay(7, 6, &cols);
        let text = state.board().to_string();
        let parsed: Board = text.parse().unwrap();
        prop_assert_eq!(&parsed, state.board());
    }

    #[test]
    fn symmetric_weights_score_both_sides_oppositely(
        cols in prop::collection::vec(0usize..7, 0..42),
    ) {
        let config = symmetric_config();
        let eval = Evaluator::new(&config, 4);
        let state = replay(7, 6, &cols);
        let board = state.board();

        let first = eval.evaluate(board, Player::First, None, 0);
        let second = eval.evaluate(board, Player::Second, None, 0);
        prop_assert_eq!(first, -second);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn engine_always_picks_an_available_move(
        cols in prop::collection::vec(0usize..7, 0..36),
        depth_limit in 1usize..4,
        alpha_beta in any::<bool>(),
    ) {
        let state = replay(7, 6, &cols);
        prop_assume!(!state.is_terminal());

        let search = SearchConfig { depth_limit, alpha_beta, ..SearchConfig::default() };
        let report = analyze(&state, &EvaluationConfig::default(), &search).unwrap();
        prop_assert!(state.board().available_moves().contains(&report.chosen));
        prop_assert_eq!(report.candidates.len(), state.board().available_moves().len());
        prop_assert!(report.candidates.iter().all(|c| c.score <= report.score));
    }
}
