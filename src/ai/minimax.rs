use crate::config::{SearchConfig, TerminalRule};
use crate::game::{Board, MovePosition, Player};

use super::heuristic::Evaluator;

/// Depth-limited minimax, always scored from the engine player's side.
///
/// Every step works on a fresh board produced by `Board::apply_move`; no
/// ancestor board is ever modified.
pub struct Minimax<'a> {
    evaluator: Evaluator<'a>,
    me: Player,
    search: SearchConfig,
    nodes: u64,
}

impl<'a> Minimax<'a> {
    pub fn new(evaluator: Evaluator<'a>, me: Player, search: SearchConfig) -> Self {
        Minimax {
            evaluator,
            me,
            search,
            nodes: 0,
        }
    }

    /// Nodes visited so far, root children included.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Score of `board`, reached by `last_move`, `depth` plies below the root.
    /// `maximizing` is true when the engine player moves next.
    pub fn search(&mut self, board: &Board, last_move: MovePosition, depth: usize, maximizing: bool) -> i64 {
        self.node(board, Some(last_move), depth, maximizing, i64::MIN, i64::MAX)
    }

    fn node(
        &mut self,
        board: &Board,
        last_move: Option<MovePosition>,
        depth: usize,
        maximizing: bool,
        mut alpha: i64,
        mut beta: i64,
    ) -> i64 {
        self.nodes += 1;

        match self.search.terminal_rule {
            TerminalRule::NonZeroScore => {
                let score = self.evaluator.evaluate(board, self.me, last_move, depth);
                if score != 0 {
                    return score;
                }
                if board.is_full() {
                    return self.evaluator.config().terminal.tie;
                }
                if depth >= self.search.depth_limit {
                    return score;
                }
            }
            TerminalRule::GameOver => {
                if let Some(score) = self.evaluator.terminal_score(board, self.me, last_move, depth) {
                    return score;
                }
                if depth >= self.search.depth_limit {
                    return self.evaluator.evaluate(board, self.me, last_move, depth);
                }
            }
        }

        let mover = if maximizing { self.me } else { self.me.other() };
        let mut moves = board.available_moves();
        if self.search.alpha_beta {
            order_center_first(board, &mut moves);
        }

        let mut best = if maximizing { i64::MIN } else { i64::MAX };
        for mv in moves {
            let child = board.apply_move(mv, mover);
            let score = self.node(&child, Some(mv), depth + 1, !maximizing, alpha, beta);
            if maximizing {
                best = best.max(score);
                alpha = alpha.max(best);
            } else {
                best = best.min(score);
                beta = beta.min(best);
            }
            if self.search.alpha_beta && alpha >= beta {
                break;
            }
        }
        best
    }
}

/// Sort moves by distance from the central columns, left first on ties.
fn order_center_first(board: &Board, moves: &mut [MovePosition]) {
    let (lo, hi) = board.central_columns();
    moves.sort_by_key(|m| {
        let distance = if m.col < lo {
            lo - m.col
        } else {
            m.col.saturating_sub(hi)
        };
        (distance, m.col)
    });
}
