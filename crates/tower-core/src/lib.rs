//! Tower Blaster - a tower-sorting tile game engine
//!
//! This crate provides the core game logic for Tower Blaster, including:
//! - Main and discard piles with front-ordered draw semantics
//! - Player towers and the stability (win) check
//! - The replacement step that swaps a brick into a tower
//! - A deterministic computer opponent
//! - Game state machine with turn sequencing and a referee loop
//!
//! # Architecture
//!
//! The engine performs no I/O. A front end implements [`Collaborator`] to
//! supply human decisions and display state, and drives the game through
//! [`Referee`] (or through [`GameState`] directly).
//!
//! # Modules
//!
//! - [`config`]: Deck, tower and discard sizes
//! - [`pile`]: Ordered brick piles
//! - [`tower`]: Player towers
//! - [`replace`]: Tower slot replacement
//! - [`bot`]: Computer opponent policy
//! - [`game`]: Game state machine
//! - [`referee`]: Turn loop against an I/O collaborator

pub mod actions;
pub mod bot;
pub mod config;
pub mod game;
pub mod pile;
pub mod referee;
pub mod replace;
pub mod tower;

// Re-export commonly used types
pub use actions::{BrickSource, GameAction, GameEvent, MainPileDecision, MoveChoice};
pub use bot::{slot_for, Bot, BotMove, SlotRange};
pub use config::GameConfig;
pub use game::{GameError, GamePhase, GameState, Player};
pub use pile::{Brick, Pile, PileKind};
pub use referee::{Collaborator, Referee, RefereeError};
pub use replace::attempt_replace;
pub use tower::Tower;
