/// Reveal rules — pure functions, no side effects.
/// These decide what an unrevealed dirt tile turns out to contain,
/// given a uniform random draw. The draw itself happens in the step
/// layer; keeping the rule pure makes the threshold testable.
///
/// Rocks and generation-time metal never pass through here: their
/// content was fixed when the board was generated and entering them
/// only marks the tile explored.

use super::tile::TileKind;

/// Probability that digging into dirt wakes a monster.
pub const MONSTER_CHANCE: f64 = 0.15;

/// Resolve a dirt tile's true content from a uniform draw `r ∈ [0,1)`.
/// A freshly revealed monster gets one grace tick before it may move.
pub fn reveal_roll(r: f64) -> TileKind {
    if r < MONSTER_CHANCE {
        TileKind::Monster { grace: 1 }
    } else {
        TileKind::Empty { has_metal: false }
    }
}
