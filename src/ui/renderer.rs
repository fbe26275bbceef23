/// Presentation layer: crossterm terminal renderer.
///
/// Owns the terminal for the whole session: raw mode + alternate
/// screen + hidden cursor. Every frame redraws fixed rows, each line
/// padded to the canvas width so stale text is overwritten in place;
/// the screen is only cleared when the overall layout flips between
/// the field view and the score-table view.
///
/// Glyph policy (the core only exposes flags, looks are decided here):
///   player '@' overrides everything; rock '#', monster 'M' and
///   metal '$' show when the tile is visible or explored; unexplored
///   ground is fogged dirt, explored ground a dug-out dark floor.

use std::io::{self, Stdout, Write};

use crossterm::{
    cursor::{self, MoveTo},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use crate::domain::tile::{Tile, TileKind};
use crate::sim::board::{METALS, SIZE};
use crate::sim::score::{ScoreBoard, TOP_DISPLAY};
use crate::sim::world::{Phase, WorldState};

// ── Canvas layout ──

const WIDTH: usize = 48;
const MARGIN: u16 = 2;
const ROW_TITLE: u16 = 0;
const ROW_HUD: u16 = 2;
const ROW_BOARD: u16 = 4;
const ROW_STATUS: u16 = 15;
const ROW_PROMPT: u16 = 17;
const ROW_ERROR: u16 = 18;
const ROW_HELP: u16 = 20;

// ── Palette ──

const FOG_BG: Color = Color::Rgb { r: 94, g: 62, b: 22 };
const REVEALED_BG: Color = Color::Rgb { r: 22, g: 18, b: 14 };

#[derive(Clone, Copy, PartialEq, Eq)]
enum Layout {
    Field,
    Scores,
}

pub struct Renderer {
    out: Stdout,
    last_layout: Option<Layout>,
}

impl Renderer {
    pub fn new() -> Self {
        Renderer { out: io::stdout(), last_layout: None }
    }

    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            Clear(ClearType::All),
        )
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        execute!(self.out, cursor::Show, terminal::LeaveAlternateScreen)?;
        terminal::disable_raw_mode()
    }

    pub fn render(&mut self, world: &WorldState) -> io::Result<()> {
        let layout = if world.phase == Phase::Won && world.score_saved {
            Layout::Scores
        } else {
            Layout::Field
        };
        if self.last_layout != Some(layout) {
            queue!(self.out, Clear(ClearType::All))?;
            self.last_layout = Some(layout);
        }

        self.draw_line(ROW_TITLE, "M I N E   D E L V E R", Color::Yellow)?;
        self.draw_hud(world)?;

        match layout {
            Layout::Field => self.draw_board(world)?,
            Layout::Scores => self.draw_scores(&world.scores)?,
        }

        self.draw_status(world)?;
        self.draw_prompt(world)?;
        self.draw_help(world)?;

        self.out.flush()
    }

    // ── Rows ──

    fn draw_line(&mut self, row: u16, text: &str, fg: Color) -> io::Result<()> {
        queue!(
            self.out,
            MoveTo(MARGIN, row),
            SetForegroundColor(fg),
            Print(format!("{:<width$}", text, width = WIDTH)),
            ResetColor,
        )
    }

    fn draw_hud(&mut self, world: &WorldState) -> io::Result<()> {
        let clock = match (&world.phase, &world.pending_score) {
            (Phase::Won, Some(pending)) => format!("{:.2}s", pending.time),
            _ => format_clock(world.elapsed_secs()),
        };
        let hud = format!("Metal {:>2}/{METALS}    Time {clock}", world.metal_count);
        self.draw_line(ROW_HUD, &hud, Color::White)
    }

    fn draw_board(&mut self, world: &WorldState) -> io::Result<()> {
        for y in 0..SIZE {
            queue!(self.out, MoveTo(MARGIN, ROW_BOARD + y as u16))?;
            for x in 0..SIZE {
                let is_player = x == world.player.x && y == world.player.y;
                let tile = world.board.tile(x, y);
                let (glyph, fg) = tile_glyph(tile, is_player);
                let bg = if tile.explored { REVEALED_BG } else { FOG_BG };
                queue!(
                    self.out,
                    SetForegroundColor(fg),
                    SetBackgroundColor(bg),
                    Print(format!("{glyph} ")),
                )?;
            }
            queue!(self.out, ResetColor)?;
        }
        Ok(())
    }

    fn draw_scores(&mut self, scores: &ScoreBoard) -> io::Result<()> {
        self.draw_line(ROW_BOARD, "BEST RUNS", Color::Yellow)?;
        if scores.is_empty() {
            return self.draw_line(ROW_BOARD + 1, "No runs recorded yet.", Color::DarkGrey);
        }
        let top = scores.top(TOP_DISPLAY);
        for i in 0..TOP_DISPLAY {
            let text = match top.get(i) {
                Some(rec) => format!(
                    "{:>2}. {:<20} {:>8.2}s  {}",
                    i + 1,
                    rec.name,
                    rec.time,
                    rec.date
                ),
                None => String::new(),
            };
            self.draw_line(ROW_BOARD + 1 + i as u16, &text, Color::White)?;
        }
        Ok(())
    }

    fn draw_status(&mut self, world: &WorldState) -> io::Result<()> {
        match world.phase {
            Phase::Caught => {
                let text = format!(
                    "A monster got you! New shaft in {}s",
                    world.caught_ticks_left
                );
                self.draw_line(ROW_STATUS, &text, Color::Red)
            }
            Phase::Won if !world.score_saved => {
                let time = world.pending_score.as_ref().map_or(0.0, |p| p.time);
                let text = format!("You cleared the shaft in {time:.2}s!");
                self.draw_line(ROW_STATUS, &text, Color::Green)
            }
            _ => self.draw_line(ROW_STATUS, &world.message, Color::White),
        }
    }

    fn draw_prompt(&mut self, world: &WorldState) -> io::Result<()> {
        if world.phase == Phase::Won && world.pending_score.is_some() {
            let prompt = format!("Name: {}_", world.name_input);
            self.draw_line(ROW_PROMPT, &prompt, Color::White)?;
            match world.name_error {
                Some(err) => self.draw_line(ROW_ERROR, &err.to_string(), Color::Red),
                None => self.draw_line(ROW_ERROR, "", Color::White),
            }
        } else {
            self.draw_line(ROW_PROMPT, "", Color::White)?;
            self.draw_line(ROW_ERROR, "", Color::White)
        }
    }

    fn draw_help(&mut self, world: &WorldState) -> io::Result<()> {
        let help = match world.phase {
            Phase::Playing => "[Arrows/WASD] move  [R] new shaft  [Q] quit",
            Phase::Caught => "[R/Enter] restart now  [Q] quit",
            Phase::Won if world.pending_score.is_some() => "[Enter] save score  [Esc] skip",
            Phase::Won => "[Enter/R] new shaft  [Q] quit",
        };
        self.draw_line(ROW_HELP, help, Color::DarkGrey)
    }
}

// ── Glyphs ──

fn tile_glyph(tile: Tile, is_player: bool) -> (char, Color) {
    if is_player {
        return ('@', Color::Cyan);
    }
    // Generation-time hints show through the fog; everything else
    // needs exploration first.
    if tile.visible || tile.explored {
        match tile.kind {
            TileKind::Stone => return ('#', Color::Grey),
            TileKind::Monster { .. } => return ('M', Color::Red),
            TileKind::Empty { has_metal: true } => return ('$', Color::Yellow),
            _ => {}
        }
    }
    if tile.explored {
        ('.', Color::DarkGrey)
    } else {
        ('▒', Color::DarkYellow)
    }
}

fn format_clock(secs: f64) -> String {
    let mins = (secs / 60.0) as u64;
    let rem = secs - (mins * 60) as f64;
    format!("{mins}:{rem:04.1}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_glyph_overrides_content() {
        let tile = Tile { kind: TileKind::Stone, explored: true, visible: true };
        assert_eq!(tile_glyph(tile, true).0, '@');
    }

    #[test]
    fn hints_show_through_fog_but_plain_dirt_stays_hidden() {
        assert_eq!(tile_glyph(Tile::metal(), false).0, '$');
        assert_eq!(tile_glyph(Tile::stone(), false).0, '#');
        assert_eq!(tile_glyph(Tile::dirt(), false).0, '▒');
    }

    #[test]
    fn explored_ground_reads_as_floor() {
        let tile = Tile {
            kind: TileKind::Empty { has_metal: false },
            explored: true,
            visible: true,
        };
        assert_eq!(tile_glyph(tile, false).0, '.');
    }

    #[test]
    fn clock_formats_minutes_and_tenths() {
        assert_eq!(format_clock(0.0), "0:00.0");
        assert_eq!(format_clock(43.26), "0:43.3");
        assert_eq!(format_clock(61.0), "1:01.0");
    }
}
