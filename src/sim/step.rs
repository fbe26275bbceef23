/// Game-state operations — the only writers of WorldState.
///
/// Processing order for a move:
///   1. Phase / bounds gate (silent no-ops)
///   2. First-entry reveal of dirt
///   3. Blocked-entry resolution (rock / monster)
///   4. Metal pickup
///   5. Player relocation
///   6. Win check — in the same operation as the pickup
///
/// The simulation tick runs independently on a fixed cadence but is
/// applied from the same single-threaded loop, so a tick and a move
/// never interleave.

use rand::Rng;

use crate::domain::ai;
use crate::domain::rules;
use crate::domain::tile::TileKind;
use crate::sim::board::METALS;
use crate::sim::event::GameEvent;
use crate::sim::score::{self, NameError, ScoreRecord};
use crate::sim::world::{PendingScore, Phase, Player, WorldState};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SubmitOutcome {
    Saved,
    /// Nothing pending — stale input races are no-ops, not errors.
    Ignored,
}

// ══════════════════════════════════════════════════════════════
// Player move
// ══════════════════════════════════════════════════════════════

pub fn try_move(
    world: &mut WorldState,
    dx: i32,
    dy: i32,
    rng: &mut impl Rng,
) -> Vec<GameEvent> {
    if world.phase != Phase::Playing {
        return vec![];
    }

    let nx = world.player.x as i32 + dx;
    let ny = world.player.y as i32 + dy;
    if world.board.get(nx, ny).is_none() {
        return vec![]; // off the board: silently ignored
    }
    let (nx, ny) = (nx as usize, ny as usize);

    let mut events = Vec::new();

    // First entry into dirt decides its real content. Anything already
    // resolved keeps its kind — a second attempt never re-rolls.
    {
        let tile = world.board.tile_mut(nx, ny);
        if tile.kind.is_dirt() && !tile.explored {
            tile.kind = rules::reveal_roll(rng.random::<f64>());
            if tile.kind.is_monster() {
                events.push(GameEvent::MonsterRevealed { x: nx, y: ny });
            }
        }
        tile.explored = true;
    }

    let kind = world.board.tile(nx, ny).kind;
    if kind.is_blocking() {
        // Exploring a dangerous tile costs the turn, not the round.
        world.board.tile_mut(nx, ny).visible = true;
        events.push(GameEvent::Blocked { x: nx, y: ny, kind });
        return events;
    }

    if kind.has_metal() {
        world.board.tile_mut(nx, ny).kind = TileKind::Empty { has_metal: false };
        world.metal_count += 1;
        events.push(GameEvent::MetalCollected { x: nx, y: ny });
    }

    world.board.tile_mut(nx, ny).visible = true;
    world.player = Player::new(nx, ny);

    if world.metal_count == METALS {
        win(world);
        events.push(GameEvent::AllMetalCollected);
    }

    events
}

fn win(world: &mut WorldState) {
    world.phase = Phase::Won;
    world.pending_score = Some(PendingScore {
        time: world.elapsed_secs(),
        date: score::timestamp(),
    });
}

// ══════════════════════════════════════════════════════════════
// Simulation ticks
// ══════════════════════════════════════════════════════════════

/// One monster pass. Gated to Playing; a catch arms the auto-reset
/// countdown and freezes the round.
pub fn monster_tick(world: &mut WorldState) {
    if world.phase != Phase::Playing {
        return;
    }
    world.tick += 1;

    let caught = ai::advance(&mut world.board.tiles, world.player.x, world.player.y);
    if caught {
        world.phase = Phase::Caught;
        world.caught_ticks_left = world.timing.caught_reset_ticks;
    }
}

/// Countdown toward the automatic fresh round after a catch.
pub fn caught_tick(world: &mut WorldState, rng: &mut impl Rng) {
    if world.phase != Phase::Caught {
        return;
    }
    world.caught_ticks_left = world.caught_ticks_left.saturating_sub(1);
    if world.caught_ticks_left == 0 {
        reset_game(world, rng);
    }
}

// ══════════════════════════════════════════════════════════════
// Reset / score submission
// ══════════════════════════════════════════════════════════════

/// Start a fresh round: new board, player back at the start corner,
/// counters and score entry cleared, clock restarted. Callable from
/// any phase; replacing the round state wholesale is also what cancels
/// a running caught countdown.
pub fn reset_game(world: &mut WorldState, rng: &mut impl Rng) {
    let timing = world.timing.clone();
    let scores = std::mem::take(&mut world.scores);
    *world = WorldState::new(timing, scores, rng);
}

/// Turn the pending score into a durable record under the typed name.
/// Only acts while Won with a score pending; validation failures keep
/// both the pending score and the typed name so the player can fix it.
/// Persistence is the caller's follow-up (the in-memory board is
/// authoritative either way).
pub fn submit_score(world: &mut WorldState) -> Result<SubmitOutcome, NameError> {
    if world.phase != Phase::Won {
        return Ok(SubmitOutcome::Ignored);
    }
    let Some(pending) = world.pending_score.clone() else {
        return Ok(SubmitOutcome::Ignored);
    };

    match ScoreRecord::new(&world.name_input, pending.time, pending.date) {
        Ok(record) => {
            world.scores.insert(record);
            world.pending_score = None;
            world.score_saved = true;
            world.name_error = None;
            Ok(SubmitOutcome::Saved)
        }
        Err(err) => {
            world.name_error = Some(err);
            Err(err)
        }
    }
}
