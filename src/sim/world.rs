/// WorldState: the complete snapshot of a running round.
///
/// One mutable owner, written only by the step functions, read by the
/// renderer. Player moves and the fixed simulation tick both arrive
/// through a single-threaded loop, so a move and a tick are never
/// applied concurrently.
///
/// A round is replaced wholesale on reset — board and player are
/// rebuilt, never patched in place across rounds.

use std::time::Instant;

use rand::Rng;

use crate::config::TimingConfig;
use crate::sim::board::{Board, START};
use crate::sim::score::{NameError, ScoreBoard};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    Playing,
    Caught,
    Won,
}

#[derive(Clone, Copy, Debug)]
pub struct Player {
    pub x: usize,
    pub y: usize,
}

impl Player {
    pub fn new(x: usize, y: usize) -> Self {
        Player { x, y }
    }
}

/// Elapsed time + timestamp captured by the winning move, held until
/// the player names the run (or resets without saving).
#[derive(Clone, Debug)]
pub struct PendingScore {
    pub time: f64,
    pub date: String,
}

pub struct WorldState {
    // ── Round state ──
    pub board: Board,
    pub player: Player,
    pub phase: Phase,
    pub metal_count: usize,
    pub started_at: Instant,
    pub tick: u64,

    /// Auto-reset countdown in ticks, armed when a monster catches the
    /// player. A manual reset replaces the whole round state, which is
    /// also what cancels this.
    pub caught_ticks_left: u32,

    // ── Score entry ──
    pub pending_score: Option<PendingScore>,
    pub name_input: String,
    pub name_error: Option<NameError>,
    pub score_saved: bool,
    pub scores: ScoreBoard,

    // ── Pacing ──
    pub timing: TimingConfig,

    // ── UI ──
    pub message: String,
    pub message_timer: u32,
}

impl WorldState {
    pub fn new(timing: TimingConfig, scores: ScoreBoard, rng: &mut impl Rng) -> Self {
        let mut board = Board::generate(rng);
        board.tile_mut(START.0, START.1).explored = true;

        WorldState {
            board,
            player: Player::new(START.0, START.1),
            phase: Phase::Playing,
            metal_count: 0,
            started_at: Instant::now(),
            tick: 0,
            caught_ticks_left: 0,
            pending_score: None,
            name_input: String::new(),
            name_error: None,
            score_saved: false,
            scores,
            timing,
            message: String::new(),
            message_timer: 0,
        }
    }

    /// Seconds since the round started.
    pub fn elapsed_secs(&self) -> f64 {
        self.started_at.elapsed().as_secs_f64()
    }

    pub fn set_message(&mut self, msg: &str, duration: u32) {
        self.message = msg.to_string();
        self.message_timer = duration;
    }
}
