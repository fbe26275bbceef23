/// Entry point and game loop.

mod config;
mod domain;
mod sim;
mod ui;

use std::time::{Duration, Instant};

use crossterm::event::KeyCode;
use rand::Rng;

use config::GameConfig;
use domain::tile::TileKind;
use sim::board::METALS;
use sim::event::GameEvent;
use sim::score;
use sim::step::{self, SubmitOutcome};
use sim::world::{Phase, WorldState};
use ui::input::InputState;
use ui::renderer::Renderer;

const FRAME_SLEEP: Duration = Duration::from_millis(16);

/// Status message durations, in frames.
const MSG_SHORT: u32 = 90;
const MSG_LONG: u32 = 240;

/// Keep typing past the limit so the "too long" message is reachable,
/// but don't let the buffer grow without bound.
const NAME_BUFFER_CAP: usize = 32;

fn main() {
    let config = GameConfig::load();
    let scores = score::load_scores();

    let mut rng = rand::rng();
    let mut world = WorldState::new(config.timing.clone(), scores, &mut rng);

    let mut renderer = Renderer::new();
    if let Err(e) = renderer.init() {
        eprintln!("Terminal init failed: {e}");
        return;
    }

    let result = game_loop(&mut world, &mut renderer, &mut rng);

    if let Err(e) = renderer.cleanup() {
        eprintln!("Terminal cleanup failed: {e}");
    }
    if let Err(e) = result {
        eprintln!("Game error: {e}");
    }

    println!();
    println!("Thanks for delving the mine!");
}

fn game_loop(
    world: &mut WorldState,
    renderer: &mut Renderer,
    rng: &mut impl Rng,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut kb = InputState::new();
    let tick_rate = Duration::from_millis(world.timing.tick_rate_ms);
    let mut last_tick = Instant::now();

    loop {
        kb.drain_events();

        if kb.ctrl_c_pressed() {
            break;
        }
        if handle_input(world, &kb, rng) {
            break;
        }

        // Fixed simulation cadence; player moves apply between ticks,
        // never during one (single-threaded loop).
        if last_tick.elapsed() >= tick_rate {
            match world.phase {
                Phase::Playing => step::monster_tick(world),
                Phase::Caught => step::caught_tick(world, rng),
                Phase::Won => {}
            }
            last_tick = Instant::now();
        }

        if world.message_timer > 0 {
            world.message_timer -= 1;
            if world.message_timer == 0 {
                world.message.clear();
            }
        }

        renderer.render(world)?;
        std::thread::sleep(FRAME_SLEEP);
    }

    Ok(())
}

// ── Key Constants ──

const KEYS_LEFT: &[KeyCode] = &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')];
const KEYS_RIGHT: &[KeyCode] = &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')];
const KEYS_UP: &[KeyCode] = &[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')];
const KEYS_DOWN: &[KeyCode] = &[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')];
const KEYS_RESET: &[KeyCode] = &[KeyCode::Char('r'), KeyCode::Char('R')];
const KEYS_QUIT: &[KeyCode] = &[KeyCode::Char('q'), KeyCode::Char('Q'), KeyCode::Esc];
const KEYS_CONFIRM: &[KeyCode] = &[KeyCode::Enter];

fn detect_movement(kb: &InputState) -> Option<(i32, i32)> {
    if kb.any_pressed(KEYS_UP) {
        Some((0, -1))
    } else if kb.any_pressed(KEYS_DOWN) {
        Some((0, 1))
    } else if kb.any_pressed(KEYS_LEFT) {
        Some((-1, 0))
    } else if kb.any_pressed(KEYS_RIGHT) {
        Some((1, 0))
    } else {
        None
    }
}

/// Route this frame's input by phase. Returns true to quit.
fn handle_input(world: &mut WorldState, kb: &InputState, rng: &mut impl Rng) -> bool {
    match world.phase {
        // ── Digging ──
        Phase::Playing => {
            if kb.any_pressed(KEYS_QUIT) {
                return true;
            }
            if kb.any_pressed(KEYS_RESET) {
                step::reset_game(world, rng);
                world.set_message("Fresh shaft.", MSG_SHORT);
                return false;
            }
            if let Some((dx, dy)) = detect_movement(kb) {
                let events = step::try_move(world, dx, dy, rng);
                process_events(world, &events);
            }
        }

        // ── Caught: waiting out the auto-reset ──
        Phase::Caught => {
            if kb.any_pressed(KEYS_QUIT) {
                return true;
            }
            if kb.any_pressed(KEYS_RESET) || kb.any_pressed(KEYS_CONFIRM) {
                step::reset_game(world, rng);
            }
        }

        // ── Won: name entry, then the score table ──
        Phase::Won => {
            if world.pending_score.is_some() {
                // The prompt owns the keyboard; letters (including 'r'
                // and 'q') are text here. Esc skips without saving.
                if kb.was_pressed(KeyCode::Esc) {
                    step::reset_game(world, rng);
                    return false;
                }
                for c in kb.typed_chars() {
                    if world.name_input.chars().count() < NAME_BUFFER_CAP {
                        world.name_input.push(c);
                    }
                }
                if kb.was_pressed(KeyCode::Backspace) {
                    world.name_input.pop();
                }
                if kb.was_pressed(KeyCode::Enter) {
                    if let Ok(SubmitOutcome::Saved) = step::submit_score(world) {
                        if let Err(e) = score::save_scores(&world.scores) {
                            world.set_message(&e, MSG_LONG);
                        }
                    }
                }
            } else {
                if kb.any_pressed(KEYS_QUIT) {
                    return true;
                }
                if kb.any_pressed(KEYS_CONFIRM) || kb.any_pressed(KEYS_RESET) {
                    step::reset_game(world, rng);
                }
            }
        }
    }

    false
}

fn process_events(world: &mut WorldState, events: &[GameEvent]) {
    for event in events {
        match event {
            GameEvent::MetalCollected { .. } => {
                let msg = format!("Metal secured ({}/{METALS})", world.metal_count);
                world.set_message(&msg, MSG_SHORT);
            }
            GameEvent::MonsterRevealed { .. } => {
                world.set_message("Something stirs in the dark!", MSG_SHORT);
            }
            GameEvent::Blocked { kind: TileKind::Stone, .. } => {
                world.set_message("Solid rock. No way through.", MSG_SHORT);
            }
            GameEvent::Blocked { .. } => {
                world.set_message("The monster blocks the tunnel!", MSG_SHORT);
            }
            GameEvent::AllMetalCollected => {
                world.set_message("All metal mined!", MSG_LONG);
            }
        }
    }
}
