/// Monster AI — greedy pursuit over explored ground.
///
/// Every simulation tick each monster takes at most one step toward
/// the player, judged by Manhattan distance. Monsters only walk on
/// tiles the player has already explored: the fog is solid to them,
/// so a monster can never emerge from unrevealed dirt.
///
/// All monsters decide against a snapshot taken at tick start, then
/// moves apply in row-major scan order. Destination conflicts are not
/// resolved: two monsters may pick the same cell in one tick and
/// merge, the later mover overwriting the earlier.

use super::tile::{Tile, TileKind};

/// Candidate step order: Up, Down, Left, Right.
/// A later direction only wins by strictly shortening the distance,
/// so Up takes ties.
pub const DIRS: [(i32, i32); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

/// Advance every monster one step. Returns true if any monster landed
/// on the player's cell.
pub fn advance(tiles: &mut [Vec<Tile>], px: usize, py: usize) -> bool {
    let snapshot: Vec<Vec<Tile>> = tiles.to_vec();
    let height = snapshot.len();
    let width = snapshot.first().map_or(0, |row| row.len());
    let mut caught = false;

    for y in 0..height {
        for x in 0..width {
            let TileKind::Monster { grace } = snapshot[y][x].kind else { continue };

            // A freshly revealed monster sits out its grace ticks.
            if grace > 0 {
                if let TileKind::Monster { grace } = &mut tiles[y][x].kind {
                    *grace -= 1;
                }
                continue;
            }

            let mut best = manhattan(x, y, px, py);
            let mut target: Option<(usize, usize)> = None;

            for &(dx, dy) in &DIRS {
                let nx = x as i32 + dx;
                let ny = y as i32 + dy;
                if nx < 0 || ny < 0 || nx >= width as i32 || ny >= height as i32 {
                    continue;
                }
                let (nx, ny) = (nx as usize, ny as usize);

                let cell = snapshot[ny][nx];
                if !cell.explored || cell.kind.is_blocking() {
                    continue;
                }

                let dist = manhattan(nx, ny, px, py);
                if dist < best {
                    best = dist;
                    target = Some((nx, ny));
                }
            }

            if let Some((nx, ny)) = target {
                tiles[y][x].kind = TileKind::Empty { has_metal: false };
                tiles[ny][nx].kind = TileKind::Monster { grace: 0 };
                tiles[ny][nx].explored = true;
                if nx == px && ny == py {
                    caught = true;
                }
            }
        }
    }

    caught
}

fn manhattan(x1: usize, y1: usize, x2: usize, y2: usize) -> i32 {
    (x1 as i32 - x2 as i32).abs() + (y1 as i32 - y2 as i32).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 10×10 field of explored bare ground.
    fn open_field() -> Vec<Vec<Tile>> {
        vec![
            vec![
                Tile { kind: TileKind::Empty { has_metal: false }, explored: true, visible: false };
                10
            ];
            10
        ]
    }

    fn put_monster(tiles: &mut [Vec<Tile>], x: usize, y: usize, grace: u8) {
        tiles[y][x].kind = TileKind::Monster { grace };
    }

    fn monster_positions(tiles: &[Vec<Tile>]) -> Vec<(usize, usize)> {
        let mut out = vec![];
        for (y, row) in tiles.iter().enumerate() {
            for (x, tile) in row.iter().enumerate() {
                if tile.kind.is_monster() {
                    out.push((x, y));
                }
            }
        }
        out
    }

    #[test]
    fn tie_break_prefers_up() {
        // Player two cells above with all four neighbors open:
        // only Up shortens the distance, every alternative worsens it.
        let mut tiles = open_field();
        put_monster(&mut tiles, 5, 5, 0);

        let caught = advance(&mut tiles, 5, 3);

        assert!(!caught);
        assert_eq!(monster_positions(&tiles), vec![(5, 4)]);
    }

    #[test]
    fn later_direction_must_strictly_beat_earlier() {
        // Player at (4,4): Up → (5,4) and Left → (4,5) both give
        // distance 1. Up is scanned first and Left may not replace it.
        let mut tiles = open_field();
        put_monster(&mut tiles, 5, 5, 0);

        advance(&mut tiles, 4, 4);

        assert_eq!(monster_positions(&tiles), vec![(5, 4)]);
    }

    #[test]
    fn vacated_cell_becomes_bare_explored_ground() {
        let mut tiles = open_field();
        put_monster(&mut tiles, 5, 5, 0);

        advance(&mut tiles, 5, 0);

        assert_eq!(tiles[5][5].kind, TileKind::Empty { has_metal: false });
        assert!(tiles[5][5].explored);
    }

    #[test]
    fn monsters_do_not_enter_fog() {
        let mut tiles = open_field();
        for row in tiles.iter_mut() {
            for tile in row.iter_mut() {
                tile.explored = false;
                tile.kind = TileKind::Dirt;
            }
        }
        tiles[5][5] = Tile { kind: TileKind::Monster { grace: 0 }, explored: true, visible: false };

        let caught = advance(&mut tiles, 5, 0);

        assert!(!caught);
        assert_eq!(monster_positions(&tiles), vec![(5, 5)]);
    }

    #[test]
    fn stone_blocks_the_only_improving_step() {
        // Player straight up; Up is stone, every other direction
        // worsens the distance: the monster stays put.
        let mut tiles = open_field();
        put_monster(&mut tiles, 5, 5, 0);
        tiles[4][5].kind = TileKind::Stone;

        let caught = advance(&mut tiles, 5, 0);

        assert!(!caught);
        assert_eq!(monster_positions(&tiles), vec![(5, 5)]);
    }

    #[test]
    fn snapshot_monster_blocks_even_after_vacating() {
        // B sits between A and the player and moves out this tick, but
        // A decides from the pre-tick snapshot and still sees it.
        let mut tiles = open_field();
        put_monster(&mut tiles, 5, 4, 0); // B, scanned first (lower row)
        put_monster(&mut tiles, 5, 5, 0); // A

        advance(&mut tiles, 5, 0);

        assert_eq!(monster_positions(&tiles), vec![(5, 3), (5, 5)]);
    }

    #[test]
    fn grace_tick_holds_monster_once_then_releases() {
        let mut tiles = open_field();
        put_monster(&mut tiles, 5, 5, 1);

        // First pass: grace consumed, no movement.
        advance(&mut tiles, 5, 0);
        assert_eq!(monster_positions(&tiles), vec![(5, 5)]);
        assert_eq!(tiles[5][5].kind, TileKind::Monster { grace: 0 });

        // Second pass: free to chase.
        advance(&mut tiles, 5, 0);
        assert_eq!(monster_positions(&tiles), vec![(5, 4)]);
    }

    #[test]
    fn stepping_onto_player_reports_caught() {
        let mut tiles = open_field();
        put_monster(&mut tiles, 5, 5, 0);

        let caught = advance(&mut tiles, 5, 4);

        assert!(caught);
        assert_eq!(monster_positions(&tiles), vec![(5, 4)]);
    }

    #[test]
    fn destination_collision_merges_in_scan_order() {
        // Both monsters resolve to (5,5) from the same snapshot: the
        // fogged cell at (4,4) forces the first one rightward, and the
        // second one steps up into the same cell, overwriting it.
        let mut tiles = open_field();
        tiles[4][4].explored = false;
        put_monster(&mut tiles, 4, 5, 0); // scanned first, goes Right
        put_monster(&mut tiles, 5, 6, 0); // scanned second, goes Up

        let caught = advance(&mut tiles, 5, 4);

        assert!(!caught);
        assert_eq!(monster_positions(&tiles), vec![(5, 5)]);
    }
}
