mod agent;
pub mod heuristic;
pub mod minimax;
pub mod patterns;
mod random;
pub mod selector;

pub use agent::{Agent, MinimaxAgent};
pub use heuristic::{Breakdown, Evaluation, Evaluator};
pub use minimax::Minimax;
pub use patterns::{OpenEnds, Run, Threat};
pub use random::RandomAgent;
pub use selector::{analyze, choose_move, choose_move_with, CandidateScore, SearchReport};
