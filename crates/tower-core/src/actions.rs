//! Game actions that the human player can take.
//!
//! This module defines all possible human actions in the game and the events
//! that result from those actions (and from the computer's turns).

use crate::game::Player;
use crate::pile::Brick;
use serde::{Deserialize, Serialize};

/// Opening decision of a human turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveChoice {
    /// Take the top brick of the discard pile
    UseDiscard,
    /// Look at the top brick of the main pile before deciding
    PeekMain,
}

/// What to do with a peeked main pile brick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MainPileDecision {
    /// Place it into the tower
    Use,
    /// Throw it onto the discard pile and end the turn
    Discard,
}

/// Pile a placed brick was taken from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrickSource {
    Main,
    Discard,
}

/// All possible actions the human can take
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameAction {
    // ==================== Turn Opening ====================
    /// Pick up the discard pile's top brick
    UseDiscard,
    /// Reveal the main pile's top brick
    PeekMain,

    // ==================== After Peeking ====================
    /// Keep the revealed main pile brick for placement
    UseMainBrick,
    /// Discard the revealed main pile brick, ending the turn
    DiscardMainBrick,

    // ==================== Placement ====================
    /// Swap the held brick for the tower brick with this value
    Replace(Brick),
}

impl From<MoveChoice> for GameAction {
    fn from(choice: MoveChoice) -> Self {
        match choice {
            MoveChoice::UseDiscard => GameAction::UseDiscard,
            MoveChoice::PeekMain => GameAction::PeekMain,
        }
    }
}

impl From<MainPileDecision> for GameAction {
    fn from(decision: MainPileDecision) -> Self {
        match decision {
            MainPileDecision::Use => GameAction::UseMainBrick,
            MainPileDecision::Discard => GameAction::DiscardMainBrick,
        }
    }
}

/// Events that occur as a result of actions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A new turn began
    TurnStarted {
        turn: u32,
        player: Player,
        discard_top: Brick,
    },

    /// The empty main pile was rebuilt from the discard pile
    MainPileRefilled { transferred: usize },

    /// The human looked at the main pile's top brick
    MainPilePeeked { brick: Brick },

    /// A brick went into a tower, pushing another onto the discard pile
    BrickPlaced {
        player: Player,
        brick: Brick,
        source: BrickSource,
        slot: usize,
        displaced: Brick,
    },

    /// A drawn brick went straight to the discard pile
    BrickDiscarded { player: Player, brick: Brick },

    /// Turn ended
    TurnEnded { player: Player, next_turn: u32 },

    /// A player's tower is stable
    GameWon { player: Player, turn: u32 },
}
