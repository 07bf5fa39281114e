use crate::config::{EngineConfig, EvaluationConfig, Preset, SearchConfig};
use crate::error::EngineError;
use crate::game::{GameState, MovePosition};

use super::selector;

/// Anything that can pick a move for the player to move.
pub trait Agent {
    /// Select a landing cell for `state.to_move()`.
    fn select_move(&mut self, state: &GameState) -> Result<MovePosition, EngineError>;

    /// Return the agent's display name.
    fn name(&self) -> &str;
}

/// Minimax search over the pattern heuristic.
#[derive(Debug, Clone)]
pub struct MinimaxAgent {
    evaluation: EvaluationConfig,
    search: SearchConfig,
}

impl MinimaxAgent {
    pub fn new(evaluation: EvaluationConfig, search: SearchConfig) -> Self {
        MinimaxAgent { evaluation, search }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        MinimaxAgent::new(config.evaluation, config.search)
    }

    pub fn from_preset(preset: Preset) -> Self {
        MinimaxAgent::new(*preset.config(), SearchConfig::default())
    }

    pub fn evaluation(&self) -> &EvaluationConfig {
        &self.evaluation
    }

    pub fn search(&self) -> &SearchConfig {
        &self.search
    }
}

impl Agent for MinimaxAgent {
    fn select_move(&mut self, state: &GameState) -> Result<MovePosition, EngineError> {
        selector::choose_move_with(state, &self.evaluation, &self.search)
    }

    fn name(&self) -> &str {
        "Minimax"
    }
}
