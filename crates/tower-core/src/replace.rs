//! Swapping a brick into a tower.

use crate::pile::{Brick, Pile};
use crate::tower::Tower;

/// Put `candidate` into the slot currently holding `target`.
///
/// On success the displaced `target` goes on top of `discard` and true is
/// returned. If `target` is not in the tower nothing changes and false is
/// returned, so callers can ask for another selection.
pub fn attempt_replace(candidate: Brick, target: Brick, tower: &mut Tower, discard: &mut Pile) -> bool {
    if !tower.replace_value(target, candidate) {
        return false;
    }
    discard.push_front(target);
    true
}
