//! Run detection along the four axes, open-end analysis under gravity, and
//! immediate-threat detection.

use serde::Serialize;

use crate::game::{Axis, Board, MovePosition, Player};

/// A maximal line of same-player pieces, cells ordered front to back along
/// `axis`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Run {
    pub player: Player,
    pub axis: Axis,
    pub cells: Vec<MovePosition>,
}

impl Run {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Which cells just beyond a run's ends qualify as open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OpenEnds {
    pub front: bool,
    pub back: bool,
}

impl OpenEnds {
    pub fn count(&self) -> usize {
        usize::from(self.front) + usize::from(self.back)
    }
}

/// A run one short of winning with at least one playable completing cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Threat {
    pub run: Run,
    pub winning_moves: Vec<MovePosition>,
    pub axis: Axis,
}

/// Cells just before the first and just after the last cell of a run.
fn end_cells(board: &Board, cells: &[MovePosition], axis: Axis) -> (Option<MovePosition>, Option<MovePosition>) {
    let step = axis.step();
    let front = cells.first().and_then(|&p| board.offset(p, step, -1));
    let back = cells.last().and_then(|&p| board.offset(p, step, 1));
    (front, back)
}

fn ends_where(
    board: &Board,
    cells: &[MovePosition],
    axis: Axis,
    open: impl Fn(MovePosition) -> bool,
) -> OpenEnds {
    let (front, back) = end_cells(board, cells, axis);
    OpenEnds {
        front: front.is_some_and(&open),
        back: back.is_some_and(&open),
    }
}

/// Ends where a piece could land right now. The cell below a vertical run
/// is never empty, so vertical runs are open at most at the top.
pub fn open_ends(board: &Board, cells: &[MovePosition], axis: Axis) -> OpenEnds {
    ends_where(board, cells, axis, |p| board.is_playable(p))
}

/// Ends that are empty, whether or not a piece could land there yet.
pub fn empty_ends(board: &Board, cells: &[MovePosition], axis: Axis) -> OpenEnds {
    ends_where(board, cells, axis, |p| board.at(p).is_none())
}

/// Every maximal line of `player`'s pieces along every axis. A lone piece
/// appears once per axis.
pub fn segments(board: &Board, player: Player) -> Vec<Run> {
    let mut runs = Vec::new();
    for axis in Axis::ALL {
        let step = axis.step();
        for start in board.pieces(player) {
            let continues_backwards = board
                .offset(start, step, -1)
                .is_some_and(|p| board.at(p) == Some(player));
            if continues_backwards {
                continue;
            }
            let mut cells = vec![start];
            let mut cursor = start;
            while let Some(next) = board.offset(cursor, step, 1) {
                if board.at(next) != Some(player) {
                    break;
                }
                cells.push(next);
                cursor = next;
            }
            runs.push(Run {
                player,
                axis,
                cells,
            });
        }
    }
    runs
}

/// Maximal runs of exactly `length` pieces for `player`.
pub fn find_runs(board: &Board, player: Player, length: usize) -> Vec<Run> {
    if length == 0 {
        return Vec::new();
    }
    segments(board, player)
        .into_iter()
        .filter(|run| run.len() == length)
        .collect()
}

/// Length of the longest line through `pos` held by the piece on it.
pub fn longest_line_through(board: &Board, pos: MovePosition) -> usize {
    let Some(player) = board.at(pos) else {
        return 0;
    };
    Axis::ALL
        .iter()
        .map(|axis| {
            let step = axis.step();
            let count_from = |sign: isize| {
                (1..)
                    .map_while(|k| board.offset(pos, step, sign * k))
                    .take_while(|&p| board.at(p) == Some(player))
                    .count()
            };
            1 + count_from(-1) + count_from(1)
        })
        .max()
        .unwrap_or(1)
}

/// True when the piece on `pos` is part of a line of at least `matches_needed`.
pub fn completes_run(board: &Board, pos: MovePosition, matches_needed: usize) -> bool {
    longest_line_through(board, pos) >= matches_needed
}

/// The winning player, if any. With a last move only lines through it are
/// checked; without one the whole board is scanned.
pub fn winner(board: &Board, last_move: Option<MovePosition>, matches_needed: usize) -> Option<Player> {
    match last_move {
        Some(pos) => board
            .at(pos)
            .filter(|_| completes_run(board, pos, matches_needed)),
        None => [Player::First, Player::Second].into_iter().find(|&player| {
            segments(board, player)
                .iter()
                .any(|run| run.len() >= matches_needed)
        }),
    }
}

/// Runs of `matches_needed - 1` that `player` could complete with one drop.
pub fn immediate_threats(board: &Board, player: Player, matches_needed: usize) -> Vec<Threat> {
    find_runs(board, player, matches_needed.saturating_sub(1))
        .into_iter()
        .filter_map(|run| {
            let (front, back) = end_cells(board, &run.cells, run.axis);
            let winning_moves: Vec<MovePosition> = [front, back]
                .into_iter()
                .flatten()
                .filter(|&p| board.is_playable(p))
                .collect();
            if winning_moves.is_empty() {
                return None;
            }
            let axis = run.axis;
            Some(Threat {
                run,
                winning_moves,
                axis,
            })
        })
        .collect()
}
