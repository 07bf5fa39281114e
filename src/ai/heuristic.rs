//! Heuristic evaluation of a position from one player's point of view.
//!
//! Terms, in precedence order:
//! - terminal outcome (returned on its own, nothing else is scored)
//! - immediate threats and forks
//! - runs one short of winning that are not yet threats
//! - runs two short of winning
//! - positional value
//! - penalties

use serde::Serialize;

use super::patterns::{self, Run};
use crate::config::EvaluationConfig;
use crate::game::{Board, MovePosition, Player};

/// Share of `adjacent_to_pieces` earned by each empty cell next to a piece.
const CONNECT_FRACTION: f64 = 0.1;
/// Share of `center_control` for a piece high up in a central column.
const CENTER_HEIGHT_FRACTION: f64 = 0.25;
/// Rows counted as foundation, from the bottom up.
const FOUNDATION_ROWS: usize = 3;

/// Per-term totals of a non-terminal evaluation, signed from the mover's side.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Breakdown {
    pub threats: f64,
    pub near_runs: f64,
    pub short_runs: f64,
    pub positional: f64,
    pub penalties: f64,
}

impl Breakdown {
    pub fn total(&self) -> i64 {
        (self.threats + self.near_runs + self.short_runs + self.positional + self.penalties).round()
            as i64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Evaluation {
    /// Win, loss (depth-adjusted) or tie
    Terminal(i64),
    Heuristic(Breakdown),
}

impl Evaluation {
    pub fn score(&self) -> i64 {
        match self {
            Evaluation::Terminal(score) => *score,
            Evaluation::Heuristic(breakdown) => breakdown.total(),
        }
    }
}

/// Scores boards with a fixed weight set and winning run length.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'a> {
    config: &'a EvaluationConfig,
    matches_needed: usize,
}

impl<'a> Evaluator<'a> {
    pub fn new(config: &'a EvaluationConfig, matches_needed: usize) -> Self {
        Evaluator {
            config,
            matches_needed,
        }
    }

    pub fn config(&self) -> &'a EvaluationConfig {
        self.config
    }

    pub fn matches_needed(&self) -> usize {
        self.matches_needed
    }

    /// Score for a finished game, or `None` if play continues.
    ///
    /// Wins lose a point per ply of depth and losses gain one, so faster wins
    /// and slower losses rank higher.
    pub fn terminal_score(
        &self,
        board: &Board,
        mover: Player,
        last_move: Option<MovePosition>,
        depth: usize,
    ) -> Option<i64> {
        let terminal = &self.config.terminal;
        let depth = depth as i64;
        match patterns::winner(board, last_move, self.matches_needed) {
            Some(winner) if winner == mover => Some(terminal.win - depth),
            Some(_) => Some(depth + terminal.loss),
            None if board.is_full() => Some(terminal.tie),
            None => None,
        }
    }

    /// Signed score from `mover`'s perspective; positive favors `mover`.
    pub fn evaluate(
        &self,
        board: &Board,
        mover: Player,
        last_move: Option<MovePosition>,
        depth: usize,
    ) -> i64 {
        self.evaluate_detailed(board, mover, last_move, depth).score()
    }

    pub fn evaluate_detailed(
        &self,
        board: &Board,
        mover: Player,
        last_move: Option<MovePosition>,
        depth: usize,
    ) -> Evaluation {
        if let Some(score) = self.terminal_score(board, mover, last_move, depth) {
            return Evaluation::Terminal(score);
        }

        let opponent = mover.other();
        Evaluation::Heuristic(Breakdown {
            threats: self.threat_score(board, mover, opponent),
            near_runs: self.near_run_score(board, mover, Side::Own)
                - self.near_run_score(board, opponent, Side::Opponent),
            short_runs: self.short_run_score(board, mover, Side::Own)
                - self.short_run_score(board, opponent, Side::Opponent),
            positional: self.positional_value(board, mover) - self.positional_value(board, opponent),
            penalties: self.penalty(board, opponent) - self.penalty(board, mover),
        })
    }

    fn threat_score(&self, board: &Board, mover: Player, opponent: Player) -> f64 {
        let weights = &self.config.immediate;
        let mine = patterns::immediate_threats(board, mover, self.matches_needed);
        let theirs = patterns::immediate_threats(board, opponent, self.matches_needed);

        let mut score =
            mine.len() as f64 * weights.can_win - theirs.len() as f64 * weights.must_block;
        // Fork: more than one threatening run at once
        if mine.len() > 1 {
            score += weights.fork_opportunity;
        }
        if theirs.len() > 1 {
            score -= weights.fork_opportunity;
        }
        score
    }

    /// Runs one short of winning with no playable end, valued by how many of
    /// their ends are still empty. Runs with a playable end are immediate
    /// threats and scored there.
    fn near_run_score(&self, board: &Board, player: Player, side: Side) -> f64 {
        let weights = &self.config.run_minus_one;
        let (both, one) = match side {
            Side::Own => (weights.both_ends_open, weights.one_end_open),
            Side::Opponent => (
                weights.block_opponent_both_ends,
                weights.block_opponent_one_end,
            ),
        };

        patterns::find_runs(board, player, self.matches_needed.saturating_sub(1))
            .iter()
            .filter(|run| patterns::open_ends(board, &run.cells, run.axis).count() == 0)
            // Empty ends, not playable ones: every run left here has no playable end
            .map(|run| match patterns::empty_ends(board, &run.cells, run.axis).count() {
                2 => both,
                1 => one,
                _ => 0.0,
            })
            .sum()
    }

    /// Runs two short of winning, valued by playable ends, plus a flat bonus
    /// for touching a central column.
    fn short_run_score(&self, board: &Board, player: Player, side: Side) -> f64 {
        let weights = &self.config.run_minus_two;
        let (both, one) = match side {
            Side::Own => (weights.both_ends_open, weights.one_end_open),
            Side::Opponent => (
                weights.block_opponent_both_ends,
                weights.block_opponent_one_end,
            ),
        };

        patterns::find_runs(board, player, self.matches_needed.saturating_sub(2))
            .iter()
            .map(|run| {
                let base = match patterns::open_ends(board, &run.cells, run.axis).count() {
                    2 => both,
                    1 => one,
                    _ => return 0.0,
                };
                if touches_center(board, run) {
                    base + weights.center_column
                } else {
                    base
                }
            })
            .sum()
    }

    /// Static value of `player`'s pieces, rounded to one decimal place.
    fn positional_value(&self, board: &Board, player: Player) -> f64 {
        let weights = &self.config.positional;
        let mut value = 0.0;

        for pos in board.pieces(player) {
            let central = board.is_center_column(pos.col);
            let beside = board.is_beside_center(pos.col);

            if central {
                value += weights.center_control;
                if pos.row < board.height() / 2 {
                    value += weights.center_control * CENTER_HEIGHT_FRACTION;
                }
            } else if beside {
                value += weights.center_control / 2.0;
            }

            let from_bottom = board.height() - 1 - pos.row;
            if from_bottom < FOUNDATION_ROWS {
                value += weights.foundation_pieces * (FOUNDATION_ROWS - from_bottom) as f64
                    / FOUNDATION_ROWS as f64;
            }

            if board.neighbors_of(pos, player) > 0 {
                value += weights.adjacent_to_pieces;
            } else if central || beside {
                value += weights.one_in_row_center;
            } else {
                value += weights.one_in_row_edge;
            }
        }

        let connecting = board
            .positions()
            .filter(|&pos| board.at(pos).is_none() && connects_to(board, pos, player))
            .count();
        value += connecting as f64 * weights.adjacent_to_pieces * CONNECT_FRACTION;

        (value * 10.0).round() / 10.0
    }

    /// Magnitude of `player`'s penalties.
    fn penalty(&self, board: &Board, player: Player) -> f64 {
        let weights = &self.config.penalties;

        let isolated = board
            .pieces(player)
            .filter(|&pos| board.neighbors_of(pos, player) == 0)
            .count();
        let edge = board
            .pieces(player)
            .filter(|&pos| board.is_edge_column(pos.col))
            .count();

        let mut penalty = isolated as f64 * weights.isolated_pieces + edge as f64 * weights.edge_columns;
        if edge as f64 > board.height() as f64 / 2.0 {
            penalty += edge as f64 * weights.edge_columns;
        }

        // Runs that can never grow into a win along their axis
        let sealed = patterns::segments(board, player)
            .iter()
            .filter(|run| {
                run.len() >= 2
                    && run.len() < self.matches_needed
                    && patterns::empty_ends(board, &run.cells, run.axis).count() == 0
            })
            .count();
        penalty + sealed as f64 * weights.blocking_own_sequence
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Own,
    Opponent,
}

fn touches_center(board: &Board, run: &Run) -> bool {
    run.cells.iter().any(|p| board.is_center_column(p.col))
}

/// True if an empty cell has one of `player`'s pieces beside it, directly
/// below it, or diagonally next to it.
fn connects_to(board: &Board, pos: MovePosition, player: Player) -> bool {
    const LINKS: [(isize, isize); 7] = [(0, -1), (0, 1), (1, 0), (-1, -1), (-1, 1), (1, -1), (1, 1)];
    LINKS
        .iter()
        .filter_map(|&step| board.offset(pos, step, 1))
        .any(|p| board.at(p) == Some(player))
}
