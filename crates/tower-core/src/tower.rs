//! Player towers.

use crate::pile::Brick;
use serde::{Deserialize, Serialize};

/// A player's fixed-length arrangement of bricks, slot 0 first.
///
/// The length is set by the initial deal and never changes afterwards;
/// bricks are only ever swapped in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tower {
    bricks: Vec<Brick>,
}

impl Tower {
    pub fn new(bricks: Vec<Brick>) -> Self {
        Self { bricks }
    }

    pub fn len(&self) -> usize {
        self.bricks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bricks.is_empty()
    }

    pub fn bricks(&self) -> &[Brick] {
        &self.bricks
    }

    pub fn get(&self, index: usize) -> Option<Brick> {
        self.bricks.get(index).copied()
    }

    pub fn contains(&self, brick: Brick) -> bool {
        self.bricks.contains(&brick)
    }

    /// Slot index holding `brick`, if any
    pub fn position(&self, brick: Brick) -> Option<usize> {
        self.bricks.iter().position(|&b| b == brick)
    }

    /// A tower is stable once its bricks read in ascending order
    pub fn is_stable(&self) -> bool {
        self.bricks.windows(2).all(|pair| pair[0] <= pair[1])
    }

    /// Overwrite the first slot holding `old` with `new`.
    ///
    /// Returns false and leaves the tower untouched if `old` is not present.
    pub fn replace_value(&mut self, old: Brick, new: Brick) -> bool {
        match self.position(old) {
            Some(index) => {
                self.bricks[index] = new;
                true
            }
            None => false,
        }
    }

    /// Overwrite a slot directly, returning the brick that was there
    pub fn replace_at(&mut self, index: usize, brick: Brick) -> Option<Brick> {
        let slot = self.bricks.get_mut(index)?;
        Some(std::mem::replace(slot, brick))
    }
}
