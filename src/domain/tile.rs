/// Tile kinds and per-tile flags.
/// Content is a tagged variant so impossible combinations
/// (a rock carrying metal, a monster with a deposit) cannot be built.
/// Semantics are queried via methods, not re-derived at call sites.

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TileKind {
    /// Unrevealed ground. Content is decided on first entry attempt.
    Dirt,
    /// Passable ground; `has_metal` holds until the deposit is picked up.
    Empty { has_metal: bool },
    /// Immovable obstruction, fixed at generation.
    Stone,
    /// Mobile obstruction. `grace` counts AI ticks this monster must
    /// still sit out before it may act (1 right after reveal).
    Monster { grace: u8 },
}

impl TileKind {
    /// Does this kind block the player (and other monsters)?
    pub fn is_blocking(self) -> bool {
        matches!(self, TileKind::Stone | TileKind::Monster { .. })
    }

    pub fn is_monster(self) -> bool {
        matches!(self, TileKind::Monster { .. })
    }

    pub fn is_dirt(self) -> bool {
        matches!(self, TileKind::Dirt)
    }

    pub fn has_metal(self) -> bool {
        matches!(self, TileKind::Empty { has_metal: true })
    }
}

/// One cell of the board.
///
/// `explored` — the player stood here or was blocked entering here;
///              drives fog-of-war and monster walkability.
/// `visible`  — content was predetermined at generation (metal/rock)
///              and may be hinted to the renderer before exploration.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Tile {
    pub kind: TileKind,
    pub explored: bool,
    pub visible: bool,
}

impl Tile {
    /// Fresh unrevealed dirt.
    pub fn dirt() -> Self {
        Tile { kind: TileKind::Dirt, explored: false, visible: false }
    }

    /// Generation-time metal deposit, hinted to the renderer.
    pub fn metal() -> Self {
        Tile { kind: TileKind::Empty { has_metal: true }, explored: false, visible: true }
    }

    /// Generation-time rock, hinted to the renderer.
    pub fn stone() -> Self {
        Tile { kind: TileKind::Stone, explored: false, visible: true }
    }
}

impl Default for Tile {
    fn default() -> Self {
        Tile::dirt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocking_kinds() {
        assert!(TileKind::Stone.is_blocking());
        assert!(TileKind::Monster { grace: 0 }.is_blocking());
        assert!(TileKind::Monster { grace: 1 }.is_blocking());
        assert!(!TileKind::Dirt.is_blocking());
        assert!(!TileKind::Empty { has_metal: true }.is_blocking());
    }

    #[test]
    fn metal_only_on_empty() {
        assert!(TileKind::Empty { has_metal: true }.has_metal());
        assert!(!TileKind::Empty { has_metal: false }.has_metal());
        assert!(!TileKind::Dirt.has_metal());
    }

    #[test]
    fn constructors_set_flags() {
        assert!(Tile::metal().visible);
        assert!(!Tile::metal().explored);
        assert!(Tile::stone().visible);
        assert_eq!(Tile::default(), Tile::dirt());
    }
}
