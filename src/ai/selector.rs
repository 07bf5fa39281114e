use serde::Serialize;

use super::heuristic::Evaluator;
use super::minimax::Minimax;
use crate::config::{EvaluationConfig, SearchConfig};
use crate::error::EngineError;
use crate::game::{GameState, MovePosition};

/// Search score of one root move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CandidateScore {
    pub position: MovePosition,
    pub score: i64,
}

/// Result of a full root search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchReport {
    pub chosen: MovePosition,
    pub score: i64,
    /// Every root move, left to right
    pub candidates: Vec<CandidateScore>,
    pub nodes: u64,
}

/// Search every available move for the player to move and report the best.
///
/// Ties go to the leftmost column among the best-scoring moves.
pub fn analyze(
    state: &GameState,
    config: &EvaluationConfig,
    search: &SearchConfig,
) -> Result<SearchReport, EngineError> {
    let board = state.board();
    let me = state.to_move();
    let moves = board.available_moves();
    if moves.is_empty() {
        return Err(EngineError::NoLegalMove);
    }

    log::debug!(
        "choosing move for {} on {}x{} board ({} pieces, {} candidates, depth {}, {:?})",
        me.name(),
        board.width(),
        board.height(),
        board.piece_count(),
        moves.len(),
        search.depth_limit,
        search.terminal_rule,
    );

    let evaluator = Evaluator::new(config, state.matches_needed());
    let mut minimax = Minimax::new(evaluator, me, *search);
    let candidates: Vec<CandidateScore> = moves
        .into_iter()
        .map(|position| {
            let child = board.apply_move(position, me);
            let score = minimax.search(&child, position, 1, false);
            log::trace!("candidate col {} row {}: {score}", position.col, position.row);
            CandidateScore { position, score }
        })
        .collect();

    let best = candidates
        .iter()
        .skip(1)
        .fold(candidates[0], |best, c| if c.score > best.score { *c } else { best });

    log::debug!(
        "chose col {} row {} with score {} after {} nodes",
        best.position.col,
        best.position.row,
        best.score,
        minimax.nodes()
    );

    Ok(SearchReport {
        chosen: best.position,
        score: best.score,
        candidates,
        nodes: minimax.nodes(),
    })
}

/// Pick a move with the default search settings.
pub fn choose_move(state: &GameState, config: &EvaluationConfig) -> Result<MovePosition, EngineError> {
    choose_move_with(state, config, &SearchConfig::default())
}

pub fn choose_move_with(
    state: &GameState,
    config: &EvaluationConfig,
    search: &SearchConfig,
) -> Result<MovePosition, EngineError> {
    analyze(state, config, search).map(|report| report.chosen)
}
