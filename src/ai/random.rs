use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use super::agent::Agent;
use crate::error::EngineError;
use crate::game::{GameState, MovePosition};

/// An agent that selects uniformly at random from available moves.
pub struct RandomAgent {
    rng: StdRng,
}

impl RandomAgent {
    pub fn new() -> Self {
        RandomAgent {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Reproducible sequence of choices
    pub fn with_seed(seed: u64) -> Self {
        RandomAgent {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for RandomAgent {
    fn select_move(&mut self, state: &GameState) -> Result<MovePosition, EngineError> {
        let moves = state.board().available_moves();
        if moves.is_empty() {
            return Err(EngineError::NoLegalMove);
        }
        let idx = self.rng.random_range(0..moves.len());
        Ok(moves[idx])
    }

    fn name(&self) -> &str {
        "Random"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Player;

    #[test]
    fn test_random_agent_selects_available_move() {
        let mut agent = RandomAgent::with_seed(7);
        let state = GameState::initial();
        let moves = state.board().available_moves();

        for _ in 0..100 {
            let mv = agent.select_move(&state).unwrap();
            assert!(moves.contains(&mv), "{mv} is not available");
        }
    }

    #[test]
    fn test_random_agents_finish_a_small_game() {
        let mut agents = [RandomAgent::with_seed(1), RandomAgent::with_seed(2)];
        let board = crate::game::Board::new(5, 4).unwrap();
        let mut state = GameState::new(board, None, Player::First, 3).unwrap();
        let mut plies = 0;

        while !state.is_terminal() {
            let agent = &mut agents[state.to_move() as usize];
            state = state.apply(agent.select_move(&state).unwrap());
            plies += 1;
        }

        assert!(plies <= 20);
        assert!(state.outcome().is_some());
    }

    #[test]
    fn test_same_seed_same_choices() {
        let state = GameState::initial();
        let mut a = RandomAgent::with_seed(42);
        let mut b = RandomAgent::with_seed(42);
        for _ in 0..20 {
            assert_eq!(a.select_move(&state), b.select_move(&state));
        }
    }

    #[test]
    fn test_random_agent_name() {
        let agent = RandomAgent::new();
        assert_eq!(agent.name(), "Random");
    }
}
