//! Game configuration.
//!
//! All pile sizes are fixed for the lifetime of a game and passed to setup
//! through [`GameConfig`].

use crate::game::GameError;
use crate::pile::Brick;
use serde::{Deserialize, Serialize};

/// Number of bricks in a standard deck
pub const STANDARD_DECK_SIZE: Brick = 60;

/// Number of slots in a standard tower
pub const STANDARD_TOWER_SIZE: usize = 10;

/// Bricks placed on the discard pile before the first turn
pub const STANDARD_INITIAL_DISCARD: usize = 1;

/// Immutable sizing for a single game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Bricks are numbered `1..=deck_size`
    pub deck_size: Brick,
    /// Slots per player tower
    pub tower_size: usize,
    /// Bricks moved from the main pile to the discard pile during setup
    pub initial_discard_size: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            deck_size: STANDARD_DECK_SIZE,
            tower_size: STANDARD_TOWER_SIZE,
            initial_discard_size: STANDARD_INITIAL_DISCARD,
        }
    }
}

impl GameConfig {
    /// Width of the value range each tower slot owns
    pub fn slot_width(&self) -> Brick {
        self.deck_size / self.tower_size as Brick
    }

    /// Bricks handed out before the first turn (both towers plus discard seed)
    pub fn dealt_bricks(&self) -> usize {
        self.tower_size * 2 + self.initial_discard_size
    }

    /// Check that a game can be set up with these sizes
    pub fn validate(&self) -> Result<(), GameError> {
        if self.tower_size == 0 {
            return Err(GameError::InvalidConfig("tower size must be positive".into()));
        }
        if self.initial_discard_size == 0 {
            return Err(GameError::InvalidConfig(
                "discard pile must start with at least one brick".into(),
            ));
        }
        if self.deck_size as usize % self.tower_size != 0 {
            return Err(GameError::InvalidConfig(format!(
                "deck size {} is not a multiple of tower size {}",
                self.deck_size, self.tower_size
            )));
        }
        // The main pile must still hold a brick after the deal.
        if (self.deck_size as usize) <= self.dealt_bricks() {
            return Err(GameError::InvalidConfig(format!(
                "deck of {} bricks cannot deal {} bricks and keep a main pile",
                self.deck_size,
                self.dealt_bricks()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.slot_width(), 6);
        assert_eq!(config.dealt_bricks(), 21);
    }

    #[test]
    fn test_uneven_deck_rejected() {
        let config = GameConfig {
            deck_size: 61,
            ..GameConfig::default()
        };
        assert!(matches!(config.validate(), Err(GameError::InvalidConfig(_))));
    }

    #[test]
    fn test_deck_too_small_rejected() {
        let config = GameConfig {
            deck_size: 20,
            ..GameConfig::default()
        };
        assert!(matches!(config.validate(), Err(GameError::InvalidConfig(_))));
    }

    #[test]
    fn test_empty_discard_seed_rejected() {
        let config = GameConfig {
            initial_discard_size: 0,
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
