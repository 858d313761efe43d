//! Brick piles.
//!
//! This module contains:
//! - The `Brick` value type
//! - `Pile`, a front-ordered sequence used for both the main and discard piles
//! - The refill step that recycles the discard pile into an empty main pile

use crate::game::GameError;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

/// A brick is identified by its value, unique within the deck
pub type Brick = u32;

/// Which shared pile a `Pile` represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PileKind {
    Main,
    Discard,
}

impl fmt::Display for PileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PileKind::Main => write!(f, "main"),
            PileKind::Discard => write!(f, "discard"),
        }
    }
}

/// An ordered pile of bricks. Index 0 is the top.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pile {
    kind: PileKind,
    bricks: VecDeque<Brick>,
}

impl Pile {
    /// Create an empty pile
    pub fn new(kind: PileKind) -> Self {
        Self {
            kind,
            bricks: VecDeque::new(),
        }
    }

    /// Create a pile whose top is the first brick yielded
    pub fn from_bricks(kind: PileKind, bricks: impl IntoIterator<Item = Brick>) -> Self {
        Self {
            kind,
            bricks: bricks.into_iter().collect(),
        }
    }

    pub fn kind(&self) -> PileKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.bricks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bricks.is_empty()
    }

    /// Look at the top brick without removing it
    pub fn peek_top(&self) -> Result<Brick, GameError> {
        self.bricks
            .front()
            .copied()
            .ok_or(GameError::EmptyPile(self.kind))
    }

    /// Remove and return the top brick
    pub fn remove_top(&mut self) -> Result<Brick, GameError> {
        self.bricks
            .pop_front()
            .ok_or(GameError::EmptyPile(self.kind))
    }

    /// Put a brick on top of the pile
    pub fn push_front(&mut self, brick: Brick) {
        self.bricks.push_front(brick);
    }

    /// Randomly permute the pile in place
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.bricks.make_contiguous().shuffle(rng);
    }

    pub fn contains(&self, brick: Brick) -> bool {
        self.bricks.contains(&brick)
    }

    /// Iterate from top to bottom
    pub fn iter(&self) -> impl Iterator<Item = Brick> + '_ {
        self.bricks.iter().copied()
    }

    /// Snapshot of the pile, top first
    pub fn to_vec(&self) -> Vec<Brick> {
        self.bricks.iter().copied().collect()
    }
}

/// Recycle the discard pile once the main pile runs out.
///
/// When `main` is empty the discard pile is shuffled and bricks are moved
/// one at a time from its bottom onto the bottom of `main`, stopping when a
/// single brick is left in `discard`. That leftover brick (the shuffled top)
/// stays as the new discard top. Returns the number of bricks moved.
///
/// Note: only `len - 1` bricks move, so the main pile comes back one brick
/// short of the full discard pile. Changing this alters game balance.
pub fn refill_from_discard_if_empty<R: Rng + ?Sized>(
    main: &mut Pile,
    discard: &mut Pile,
    rng: &mut R,
) -> usize {
    if !main.is_empty() {
        return 0;
    }

    discard.shuffle(rng);
    let transfer = discard.len().saturating_sub(1);
    for _ in 0..transfer {
        if let Some(brick) = discard.bricks.pop_back() {
            main.bricks.push_back(brick);
        }
    }
    transfer
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_peek_does_not_remove() {
        let pile = Pile::from_bricks(PileKind::Main, [4, 8, 15]);
        assert_eq!(pile.peek_top().unwrap(), 4);
        assert_eq!(pile.len(), 3);
    }

    #[test]
    fn test_remove_top_preserves_order() {
        let mut pile = Pile::from_bricks(PileKind::Main, [4, 8, 15, 16]);
        assert_eq!(pile.remove_top().unwrap(), 4);
        assert_eq!(pile.to_vec(), vec![8, 15, 16]);
    }

    #[test]
    fn test_empty_pile_errors() {
        let mut pile = Pile::new(PileKind::Discard);
        assert!(matches!(
            pile.peek_top(),
            Err(GameError::EmptyPile(PileKind::Discard))
        ));
        assert!(matches!(
            pile.remove_top(),
            Err(GameError::EmptyPile(PileKind::Discard))
        ));
    }

    #[test]
    fn test_push_then_remove_round_trip() {
        let mut pile = Pile::from_bricks(PileKind::Discard, [30, 31]);
        pile.push_front(12);
        assert_eq!(pile.remove_top().unwrap(), 12);
        assert_eq!(pile.to_vec(), vec![30, 31]);
    }

    #[test]
    fn test_push_front_orders_newest_first() {
        let mut discard = Pile::from_bricks(PileKind::Discard, [40]);
        discard.push_front(5);
        discard.push_front(9);
        discard.push_front(2);
        assert_eq!(discard.to_vec(), vec![2, 9, 5, 40]);
    }

    #[test]
    fn test_push_onto_empty_pile() {
        let mut pile = Pile::new(PileKind::Discard);
        pile.push_front(7);
        assert_eq!(pile.to_vec(), vec![7]);
    }

    #[test]
    fn test_shuffle_keeps_bricks() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut pile = Pile::from_bricks(PileKind::Main, 1..=60);
        pile.shuffle(&mut rng);

        let mut bricks = pile.to_vec();
        bricks.sort_unstable();
        assert_eq!(bricks, (1..=60).collect::<Vec<_>>());
    }

    #[test]
    fn test_refill_leaves_one_brick_in_discard() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut main = Pile::new(PileKind::Main);
        let mut discard = Pile::from_bricks(PileKind::Discard, 21..=60);

        let moved = refill_from_discard_if_empty(&mut main, &mut discard, &mut rng);

        assert_eq!(moved, 39);
        assert_eq!(main.len(), 39);
        assert_eq!(discard.len(), 1);

        let mut all = main.to_vec();
        all.extend(discard.iter());
        all.sort_unstable();
        assert_eq!(all, (21..=60).collect::<Vec<_>>());
    }

    #[test]
    fn test_refill_skipped_when_main_has_bricks() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut main = Pile::from_bricks(PileKind::Main, [1]);
        let mut discard = Pile::from_bricks(PileKind::Discard, [2, 3, 4]);

        assert_eq!(refill_from_discard_if_empty(&mut main, &mut discard, &mut rng), 0);
        assert_eq!(main.to_vec(), vec![1]);
        assert_eq!(discard.to_vec(), vec![2, 3, 4]);
    }

    #[test]
    fn test_refill_with_single_discard_moves_nothing() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut main = Pile::new(PileKind::Main);
        let mut discard = Pile::from_bricks(PileKind::Discard, [9]);

        assert_eq!(refill_from_discard_if_empty(&mut main, &mut discard, &mut rng), 0);
        assert!(main.is_empty());
        assert!(matches!(main.peek_top(), Err(GameError::EmptyPile(PileKind::Main))));
    }
}
