//! Core game state machine.
//!
//! This module contains the main `GameState` struct and all turn logic.

use crate::actions::{BrickSource, GameAction, GameEvent};
use crate::bot::Bot;
use crate::config::GameConfig;
use crate::pile::{refill_from_discard_if_empty, Brick, Pile, PileKind};
use crate::replace::attempt_replace;
use crate::tower::Tower;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// The two sides of the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    Human,
    Computer,
}

impl Player {
    /// Who moves on a given turn: odd turns are the human's, even the computer's
    pub fn on_turn(turn: u32) -> Self {
        if turn % 2 == 0 {
            Player::Computer
        } else {
            Player::Human
        }
    }

    pub fn opponent(self) -> Self {
        match self {
            Player::Human => Player::Computer,
            Player::Computer => Player::Human,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Human => write!(f, "human"),
            Player::Computer => write!(f, "computer"),
        }
    }
}

/// Game phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Between turns: the win check and refill have not run yet
    AwaitingTurn,

    /// Human must choose between the discard top and the main pile
    HumanToMove,

    /// Human has seen the main pile top and must use or discard it
    HumanPeeked { brick: Brick },

    /// Human holds a brick and must pick the tower brick it replaces
    HumanPlacing {
        brick: Brick,
        /// Pile the held brick still sits on until it is placed
        source: BrickSource,
    },

    /// Computer's turn
    ComputerToMove,

    /// Game is over
    Finished { winner: Player },
}

/// Errors that can occur when setting up or playing a game
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum GameError {
    #[error("The {0} pile is empty")]
    EmptyPile(PileKind),

    #[error("Brick {0} is not in your tower")]
    InvalidSelection(Brick),

    #[error("Brick {0} does not belong to any tower slot")]
    InvalidBrick(Brick),

    #[error("Invalid action for current phase")]
    InvalidPhase,

    #[error("Not your turn")]
    NotYourTurn,

    #[error("Game is over")]
    GameOver,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid deck: {0}")]
    InvalidDeck(String),
}

impl GameError {
    /// An empty main pile means the refill bookkeeping broke; play cannot go on
    pub fn is_fatal(&self) -> bool {
        matches!(self, GameError::EmptyPile(PileKind::Main))
    }
}

/// The complete game state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Sizes this game was dealt with
    pub config: GameConfig,
    /// Shared draw pile
    pub main_pile: Pile,
    /// Shared discard pile, newest brick on top
    pub discard_pile: Pile,
    /// The computer's tower
    pub computer_tower: Tower,
    /// The human's tower
    pub human_tower: Tower,
    /// Turn number (starts at 1)
    pub turn_number: u32,
    /// Current game phase
    pub phase: GamePhase,
}

impl GameState {
    /// Create a new game with a freshly shuffled deck
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        Self::with_rng(config, &mut rand::thread_rng())
    }

    /// Create a new game, shuffling the deck with `rng`
    pub fn with_rng<R: Rng + ?Sized>(config: GameConfig, rng: &mut R) -> Result<Self, GameError> {
        config.validate()?;
        let mut main_pile = Pile::from_bricks(PileKind::Main, 1..=config.deck_size);
        main_pile.shuffle(rng);
        Self::deal(config, main_pile)
    }

    /// Create a game from a fixed deck order (first brick is the top)
    pub fn from_deck(config: GameConfig, deck: Vec<Brick>) -> Result<Self, GameError> {
        config.validate()?;

        let mut sorted = deck.clone();
        sorted.sort_unstable();
        if !sorted.iter().copied().eq(1..=config.deck_size) {
            return Err(GameError::InvalidDeck(format!(
                "expected each brick 1..={} exactly once",
                config.deck_size
            )));
        }

        Self::deal(config, Pile::from_bricks(PileKind::Main, deck))
    }

    /// Deal alternately to the computer and the human, then seed the discard pile
    fn deal(config: GameConfig, mut main_pile: Pile) -> Result<Self, GameError> {
        let mut computer = Vec::with_capacity(config.tower_size);
        let mut human = Vec::with_capacity(config.tower_size);

        for i in 0..config.tower_size * 2 {
            let brick = main_pile.remove_top()?;
            if i % 2 == 0 {
                computer.push(brick);
            } else {
                human.push(brick);
            }
        }

        let mut discard_pile = Pile::new(PileKind::Discard);
        for _ in 0..config.initial_discard_size {
            discard_pile.push_front(main_pile.remove_top()?);
        }

        Ok(Self {
            config,
            main_pile,
            discard_pile,
            computer_tower: Tower::new(computer),
            human_tower: Tower::new(human),
            turn_number: 1,
            phase: GamePhase::AwaitingTurn,
        })
    }

    /// Player whose turn it is
    pub fn current_player(&self) -> Player {
        Player::on_turn(self.turn_number)
    }

    pub fn tower(&self, player: Player) -> &Tower {
        match player {
            Player::Human => &self.human_tower,
            Player::Computer => &self.computer_tower,
        }
    }

    pub fn discard_top(&self) -> Result<Brick, GameError> {
        self.discard_pile.peek_top()
    }

    pub fn main_top(&self) -> Result<Brick, GameError> {
        self.main_pile.peek_top()
    }

    /// Check if the game is finished
    pub fn is_finished(&self) -> bool {
        matches!(self.phase, GamePhase::Finished { .. })
    }

    /// Get the winner if the game is finished
    pub fn winner(&self) -> Option<Player> {
        if let GamePhase::Finished { winner } = self.phase {
            Some(winner)
        } else {
            None
        }
    }

    /// Check if any tower is stable. The computer's tower is checked first,
    /// so it wins if both stabilise together.
    pub fn check_winner(&self) -> Option<Player> {
        [Player::Computer, Player::Human]
            .into_iter()
            .find(|&player| self.tower(player).is_stable())
    }

    /// Every brick of the deck is in exactly one pile or tower
    pub fn is_conserved(&self) -> bool {
        let mut bricks: Vec<Brick> = self
            .main_pile
            .iter()
            .chain(self.discard_pile.iter())
            .chain(self.computer_tower.bricks().iter().copied())
            .chain(self.human_tower.bricks().iter().copied())
            .collect();
        bricks.sort_unstable();
        bricks.into_iter().eq(1..=self.config.deck_size)
    }

    /// Snapshot of the whole state as JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Begin the current turn: check for a winner, refill the main pile if it
    /// ran out, and hand the move to the player on turn
    pub fn start_turn<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Vec<GameEvent>, GameError> {
        match self.phase {
            GamePhase::Finished { .. } => return Err(GameError::GameOver),
            GamePhase::AwaitingTurn => {}
            _ => return Err(GameError::InvalidPhase),
        }

        let mut events = Vec::new();

        if let Some(winner) = self.check_winner() {
            self.phase = GamePhase::Finished { winner };
            events.push(GameEvent::GameWon {
                player: winner,
                turn: self.turn_number,
            });
            return Ok(events);
        }

        let transferred = refill_from_discard_if_empty(&mut self.main_pile, &mut self.discard_pile, rng);
        if transferred > 0 {
            events.push(GameEvent::MainPileRefilled { transferred });
        }

        let player = self.current_player();
        self.phase = match player {
            Player::Human => GamePhase::HumanToMove,
            Player::Computer => GamePhase::ComputerToMove,
        };
        events.push(GameEvent::TurnStarted {
            turn: self.turn_number,
            player,
            discard_top: self.discard_pile.peek_top()?,
        });

        Ok(events)
    }

    /// Apply a human action to the game state
    pub fn apply_action(&mut self, action: GameAction) -> Result<Vec<GameEvent>, GameError> {
        let mut events = Vec::new();

        match (self.phase, action) {
            (GamePhase::Finished { .. }, _) => return Err(GameError::GameOver),
            (GamePhase::ComputerToMove, _) => return Err(GameError::NotYourTurn),

            // ==================== Turn Opening ====================
            (GamePhase::HumanToMove, GameAction::UseDiscard) => {
                let brick = self.discard_pile.peek_top()?;
                self.phase = GamePhase::HumanPlacing {
                    brick,
                    source: BrickSource::Discard,
                };
            }

            (GamePhase::HumanToMove, GameAction::PeekMain) => {
                let brick = self.main_pile.peek_top()?;
                self.phase = GamePhase::HumanPeeked { brick };
                events.push(GameEvent::MainPilePeeked { brick });
            }

            // ==================== After Peeking ====================
            (GamePhase::HumanPeeked { brick }, GameAction::UseMainBrick) => {
                self.phase = GamePhase::HumanPlacing {
                    brick,
                    source: BrickSource::Main,
                };
            }

            (GamePhase::HumanPeeked { brick }, GameAction::DiscardMainBrick) => {
                self.main_pile.remove_top()?;
                self.discard_pile.push_front(brick);
                events.push(GameEvent::BrickDiscarded {
                    player: Player::Human,
                    brick,
                });
                events.push(self.end_turn(Player::Human));
            }

            // ==================== Placement ====================
            (GamePhase::HumanPlacing { brick, source }, GameAction::Replace(target)) => {
                let slot = self
                    .human_tower
                    .position(target)
                    .ok_or(GameError::InvalidSelection(target))?;

                self.pile_mut(source).remove_top()?;
                if !attempt_replace(brick, target, &mut self.human_tower, &mut self.discard_pile) {
                    self.pile_mut(source).push_front(brick);
                    return Err(GameError::InvalidSelection(target));
                }

                events.push(GameEvent::BrickPlaced {
                    player: Player::Human,
                    brick,
                    source,
                    slot,
                    displaced: target,
                });
                events.push(self.end_turn(Player::Human));
            }

            _ => return Err(GameError::InvalidPhase),
        }

        Ok(events)
    }

    /// Let the bot play the computer's turn
    pub fn play_computer_turn(&mut self, bot: &Bot) -> Result<Vec<GameEvent>, GameError> {
        match self.phase {
            GamePhase::ComputerToMove => {}
            GamePhase::Finished { .. } => return Err(GameError::GameOver),
            GamePhase::AwaitingTurn => return Err(GameError::InvalidPhase),
            _ => return Err(GameError::NotYourTurn),
        }

        let played = bot.play(&mut self.computer_tower, &mut self.main_pile, &mut self.discard_pile)?;
        Ok(vec![played.to_event(), self.end_turn(Player::Computer)])
    }

    fn pile_mut(&mut self, source: BrickSource) -> &mut Pile {
        match source {
            BrickSource::Main => &mut self.main_pile,
            BrickSource::Discard => &mut self.discard_pile,
        }
    }

    fn end_turn(&mut self, player: Player) -> GameEvent {
        self.turn_number += 1;
        self.phase = GamePhase::AwaitingTurn;
        GameEvent::TurnEnded {
            player,
            next_turn: self.turn_number,
        }
    }
}
