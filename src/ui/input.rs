/// Input state tracker.
///
/// Collects the key presses that arrived since the previous frame.
/// Movement is discrete — one step per press, and terminal auto-repeat
/// gives held-key walking for free — so only Press/Repeat events
/// matter and Release events are dropped.

use std::time::Duration;

use crossterm::event::{self, poll, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

pub struct InputState {
    /// Press/Repeat events since the last drain, in arrival order.
    pressed: Vec<KeyEvent>,
}

impl InputState {
    pub fn new() -> Self {
        InputState { pressed: Vec::with_capacity(8) }
    }

    /// Drain all pending terminal events without blocking.
    /// Call once per frame, before handling input.
    pub fn drain_events(&mut self) {
        self.pressed.clear();
        while poll(Duration::ZERO).unwrap_or(false) {
            if let Ok(Event::Key(key)) = event::read() {
                if key.kind != KeyEventKind::Release {
                    self.pressed.push(key);
                }
            }
        }
    }

    /// Did this key fire this frame? (press or auto-repeat)
    pub fn was_pressed(&self, code: KeyCode) -> bool {
        self.pressed.iter().any(|k| k.code == code)
    }

    /// Convenience: did any of these keys fire?
    pub fn any_pressed(&self, codes: &[KeyCode]) -> bool {
        codes.iter().any(|c| self.was_pressed(*c))
    }

    /// Printable characters typed this frame, for the name prompt.
    /// Modified keys (Ctrl/Alt chords) are not text.
    pub fn typed_chars(&self) -> impl Iterator<Item = char> + '_ {
        self.pressed.iter().filter_map(|k| {
            if k.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
                return None;
            }
            match k.code {
                KeyCode::Char(c) => Some(c),
                _ => None,
            }
        })
    }

    /// Check if any event this frame was Ctrl+C.
    pub fn ctrl_c_pressed(&self) -> bool {
        self.pressed.iter().any(|k| {
            k.modifiers.contains(KeyModifiers::CONTROL)
                && (k.code == KeyCode::Char('c') || k.code == KeyCode::Char('C'))
        })
    }
}
