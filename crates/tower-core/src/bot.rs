//! Computer opponent for Tower Blaster.
//!
//! The bot is fully deterministic. Each tower slot owns a band of brick
//! values (`slot_width` wide, 6 for the standard deck): slot `s` covers
//! `6s..=6s+6`, and a brick that is an exact multiple of the width belongs to
//! the slot below. On its turn the bot:
//! 1. Takes the discard top if the brick currently in that brick's slot is
//!    outside the slot's band.
//! 2. Otherwise draws from the main pile and places the drawn brick the same
//!    way, or discards it if its slot is already satisfied.

use crate::actions::{BrickSource, GameEvent};
use crate::config::GameConfig;
use crate::game::{GameError, Player};
use crate::pile::{Brick, Pile};
use crate::tower::Tower;
use serde::{Deserialize, Serialize};

/// Tower slot a brick belongs to, or `None` for brick 0
pub fn slot_for(brick: Brick, width: Brick) -> Option<usize> {
    let slot = brick / width;
    let slot = if brick % width == 0 {
        slot.checked_sub(1)?
    } else {
        slot
    };
    Some(slot as usize)
}

/// The band of values a slot is happy to hold (both ends inclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotRange {
    pub slot: usize,
    pub low: Brick,
    pub high: Brick,
}

impl SlotRange {
    /// Range of the slot `brick` maps to
    pub fn for_brick(brick: Brick, width: Brick) -> Option<Self> {
        let slot = slot_for(brick, width)?;
        let low = width * slot as Brick;
        Some(Self {
            slot,
            low,
            high: low + width,
        })
    }

    /// Whether `value` sits outside this slot's band
    pub fn is_misplaced(&self, value: Brick) -> bool {
        value > self.high || value < self.low
    }
}

/// What the bot did on its turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BotMove {
    /// Took the discard top into `slot`
    TookDiscard {
        brick: Brick,
        slot: usize,
        displaced: Brick,
    },
    /// Drew from the main pile and placed the brick into `slot`
    PlacedDrawn {
        brick: Brick,
        slot: usize,
        displaced: Brick,
    },
    /// Drew from the main pile and discarded the brick
    DiscardedDrawn { brick: Brick },
}

impl BotMove {
    /// Event describing this move
    pub fn to_event(&self) -> GameEvent {
        match *self {
            BotMove::TookDiscard {
                brick,
                slot,
                displaced,
            } => GameEvent::BrickPlaced {
                player: Player::Computer,
                brick,
                source: BrickSource::Discard,
                slot,
                displaced,
            },
            BotMove::PlacedDrawn {
                brick,
                slot,
                displaced,
            } => GameEvent::BrickPlaced {
                player: Player::Computer,
                brick,
                source: BrickSource::Main,
                slot,
                displaced,
            },
            BotMove::DiscardedDrawn { brick } => GameEvent::BrickDiscarded {
                player: Player::Computer,
                brick,
            },
        }
    }
}

/// The computer player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bot {
    slot_width: Brick,
}

impl Default for Bot {
    fn default() -> Self {
        Self::new(&GameConfig::default())
    }
}

impl Bot {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            slot_width: config.slot_width(),
        }
    }

    pub fn slot_width(&self) -> Brick {
        self.slot_width
    }

    /// Slot `brick` would go into, if the brick there now is out of band
    fn misplaced_slot(&self, tower: &Tower, brick: Brick) -> Result<Option<usize>, GameError> {
        let range =
            SlotRange::for_brick(brick, self.slot_width).ok_or(GameError::InvalidBrick(brick))?;
        let current = tower.get(range.slot).ok_or(GameError::InvalidBrick(brick))?;
        Ok(range.is_misplaced(current).then_some(range.slot))
    }

    /// Play one turn, mutating the bot's tower and the shared piles.
    ///
    /// Exactly one brick ends up newly on top of `discard`.
    pub fn play(&self, tower: &mut Tower, main: &mut Pile, discard: &mut Pile) -> Result<BotMove, GameError> {
        let discard_top = discard.peek_top()?;
        if let Some(slot) = self.misplaced_slot(tower, discard_top)? {
            discard.remove_top()?;
            let displaced = tower
                .replace_at(slot, discard_top)
                .ok_or(GameError::InvalidBrick(discard_top))?;
            discard.push_front(displaced);
            return Ok(BotMove::TookDiscard {
                brick: discard_top,
                slot,
                displaced,
            });
        }

        // Validate before drawing so a bad brick leaves the main pile intact
        let drawn = main.peek_top()?;
        let target = self.misplaced_slot(tower, drawn)?;
        main.remove_top()?;

        match target {
            Some(slot) => {
                let displaced = tower
                    .replace_at(slot, drawn)
                    .ok_or(GameError::InvalidBrick(drawn))?;
                discard.push_front(displaced);
                Ok(BotMove::PlacedDrawn {
                    brick: drawn,
                    slot,
                    displaced,
                })
            }
            None => {
                discard.push_front(drawn);
                Ok(BotMove::DiscardedDrawn { brick: drawn })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pile::PileKind;
    use pretty_assertions::assert_eq;

    fn ordered_tower() -> Tower {
        Tower::new(vec![2, 8, 14, 19, 26, 33, 38, 45, 50, 58])
    }

    #[test]
    fn test_slot_for_multiples_round_down() {
        assert_eq!(slot_for(6, 6), Some(0));
        assert_eq!(slot_for(12, 6), Some(1));
        assert_eq!(slot_for(18, 6), Some(2));
        assert_eq!(slot_for(60, 6), Some(9));
    }

    #[test]
    fn test_slot_for_other_values() {
        assert_eq!(slot_for(1, 6), Some(0));
        assert_eq!(slot_for(5, 6), Some(0));
        assert_eq!(slot_for(7, 6), Some(1));
        assert_eq!(slot_for(59, 6), Some(9));
        assert_eq!(slot_for(0, 6), None);
    }

    #[test]
    fn test_slot_range_bounds_are_inclusive() {
        let range = SlotRange::for_brick(7, 6).unwrap();
        assert_eq!(range, SlotRange { slot: 1, low: 6, high: 12 });
        assert!(!range.is_misplaced(6));
        assert!(!range.is_misplaced(12));
        assert!(range.is_misplaced(5));
        assert!(range.is_misplaced(13));
    }

    #[test]
    fn test_bot_takes_discard_over_misplaced_brick() {
        let bot = Bot::default();
        let mut tower = ordered_tower();
        tower.replace_at(1, 20);
        let mut main = Pile::from_bricks(PileKind::Main, [30, 31]);
        let mut discard = Pile::from_bricks(PileKind::Discard, [7, 40]);

        let played = bot.play(&mut tower, &mut main, &mut discard).unwrap();

        assert_eq!(
            played,
            BotMove::TookDiscard {
                brick: 7,
                slot: 1,
                displaced: 20
            }
        );
        assert_eq!(tower.get(1), Some(7));
        assert_eq!(discard.to_vec(), vec![20, 40]);
        assert_eq!(main.len(), 2);
    }

    #[test]
    fn test_bot_discards_drawn_brick_when_slot_is_fine() {
        let bot = Bot::default();
        let mut tower = ordered_tower();
        let mut main = Pile::from_bricks(PileKind::Main, [44, 1]);
        let mut discard = Pile::from_bricks(PileKind::Discard, [10]);

        let played = bot.play(&mut tower, &mut main, &mut discard).unwrap();

        assert_eq!(played, BotMove::DiscardedDrawn { brick: 44 });
        assert_eq!(tower, ordered_tower());
        assert_eq!(main.to_vec(), vec![1]);
        assert_eq!(discard.to_vec(), vec![44, 10]);
    }

    #[test]
    fn test_bot_places_drawn_brick_over_misplaced_one() {
        let bot = Bot::default();
        let mut tower = ordered_tower();
        tower.replace_at(4, 59);
        let mut main = Pile::from_bricks(PileKind::Main, [27, 1]);
        let mut discard = Pile::from_bricks(PileKind::Discard, [10]);

        let played = bot.play(&mut tower, &mut main, &mut discard).unwrap();

        assert_eq!(
            played,
            BotMove::PlacedDrawn {
                brick: 27,
                slot: 4,
                displaced: 59
            }
        );
        assert_eq!(tower.get(4), Some(27));
        assert_eq!(discard.to_vec(), vec![59, 10]);
        assert_eq!(main.to_vec(), vec![1]);
    }

    #[test]
    fn test_band_edge_counts_as_placed() {
        let bot = Bot::default();
        let mut tower = ordered_tower();
        tower.replace_at(1, 12);
        let mut main = Pile::from_bricks(PileKind::Main, [44]);
        let mut discard = Pile::from_bricks(PileKind::Discard, [7]);

        let played = bot.play(&mut tower, &mut main, &mut discard).unwrap();

        assert_eq!(played, BotMove::DiscardedDrawn { brick: 44 });
        assert_eq!(tower.get(1), Some(12));
    }

    #[test]
    fn test_bot_needs_a_main_pile_brick() {
        let bot = Bot::default();
        let mut tower = ordered_tower();
        let mut main = Pile::new(PileKind::Main);
        let mut discard = Pile::from_bricks(PileKind::Discard, [10]);

        let err = bot.play(&mut tower, &mut main, &mut discard).unwrap_err();
        assert!(matches!(err, GameError::EmptyPile(PileKind::Main)));
        assert!(err.is_fatal());
        assert_eq!(discard.to_vec(), vec![10]);
    }

    #[test]
    fn test_out_of_range_brick_rejected() {
        let bot = Bot::default();
        let mut tower = ordered_tower();
        let mut main = Pile::from_bricks(PileKind::Main, [61]);
        let mut discard = Pile::from_bricks(PileKind::Discard, [10]);

        let err = bot.play(&mut tower, &mut main, &mut discard).unwrap_err();
        assert!(matches!(err, GameError::InvalidBrick(61)));
        assert_eq!(main.len(), 1);
    }

    #[test]
    fn test_move_events() {
        let event = BotMove::DiscardedDrawn { brick: 3 }.to_event();
        assert_eq!(
            event,
            GameEvent::BrickDiscarded {
                player: Player::Computer,
                brick: 3
            }
        );
    }
}
