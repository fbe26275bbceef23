/// Board container and procedural generation.
///
/// The field is a fixed 10×10 grid, `tiles[y][x]`, owned exclusively
/// by the world state. Generation shuffles the 99 non-start cells and
/// deals specials off the top: 12 metal deposits, then 4 rocks. The
/// start corner is left as plain dirt so the first step is always
/// legal; everything else stays unrevealed.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::tile::Tile;

/// Board edge length.
pub const SIZE: usize = 10;
/// Metal deposits placed per board; collecting them all wins the round.
pub const METALS: usize = 12;
/// The player's fixed spawn corner, excluded from special placement.
pub const START: (usize, usize) = (0, 0);

/// Fraction of the pool left after start + metals that turns to rock.
const ROCK_RATE: f64 = 0.05;

/// ⌊0.05 × 87⌋ = 4 on the standard board.
pub fn rock_count() -> usize {
    (ROCK_RATE * (SIZE * SIZE - 1 - METALS) as f64).floor() as usize
}

#[derive(Clone, Debug)]
pub struct Board {
    /// Row-major tile grid; `tiles[y][x]`.
    pub tiles: Vec<Vec<Tile>>,
}

impl Board {
    /// Deal a fresh board: Fisher–Yates over the non-start cells,
    /// first `METALS` become deposits, the next `rock_count()` rocks.
    /// Cannot fail; the pool is always large enough.
    pub fn generate(rng: &mut impl Rng) -> Self {
        let mut tiles = vec![vec![Tile::dirt(); SIZE]; SIZE];

        let mut cells: Vec<(usize, usize)> = (0..SIZE)
            .flat_map(|y| (0..SIZE).map(move |x| (x, y)))
            .filter(|&cell| cell != START)
            .collect();
        cells.shuffle(rng);

        let (metal_cells, rest) = cells.split_at(METALS);
        for &(x, y) in metal_cells {
            tiles[y][x] = Tile::metal();
        }
        for &(x, y) in &rest[..rock_count()] {
            tiles[y][x] = Tile::stone();
        }

        Board { tiles }
    }

    #[inline]
    pub fn tile(&self, x: usize, y: usize) -> Tile {
        self.tiles[y][x]
    }

    #[inline]
    pub fn tile_mut(&mut self, x: usize, y: usize) -> &mut Tile {
        &mut self.tiles[y][x]
    }

    /// Signed lookup; `None` when off the board.
    pub fn get(&self, x: i32, y: i32) -> Option<Tile> {
        if x < 0 || y < 0 || x >= SIZE as i32 || y >= SIZE as i32 {
            None
        } else {
            Some(self.tiles[y as usize][x as usize])
        }
    }

    /// Count tiles matching a predicate.
    #[allow(dead_code)]
    pub fn count(&self, pred: impl Fn(Tile) -> bool) -> usize {
        self.tiles
            .iter()
            .flat_map(|row| row.iter())
            .filter(|&&tile| pred(tile))
            .count()
    }
}
