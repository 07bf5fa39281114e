use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    First,
    Second,
}

impl Player {
    /// Get the other player
    pub fn other(self) -> Player {
        match self {
            Player::First => Player::Second,
            Player::Second => Player::First,
        }
    }

    /// Character used for this player's pieces in the text board format
    pub fn symbol(self) -> char {
        match self {
            Player::First => 'X',
            Player::Second => 'O',
        }
    }

    /// Parse a piece character; accepts both `X`/`O` and `R`/`Y`
    pub fn from_symbol(ch: char) -> Option<Player> {
        match ch.to_ascii_uppercase() {
            'X' | 'R' => Some(Player::First),
            'O' | 'Y' => Some(Player::Second),
            _ => None,
        }
    }

    /// Get player name for display
    pub fn name(self) -> &'static str {
        match self {
            Player::First => "First",
            Player::Second => "Second",
        }
    }
}

impl std::str::FromStr for Player {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "first" | "1" | "x" | "r" => Ok(Player::First),
            "second" | "2" | "o" | "y" => Ok(Player::Second),
            other => Err(format!("unknown player '{other}' (expected 'first' or 'second')")),
        }
    }
}
