//! Terminal rendering.  Every byte written to the screen goes through here.
//!
//! Each function receives a mutable writer and an immutable `Scene`.  No
//! game logic is performed; world units are scaled onto the terminal grid
//! and every entity is drawn as a placeholder glyph block.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use countdown_shooter::entities::GameStatus;
use countdown_shooter::geometry::Rect;
use countdown_shooter::scene::Scene;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_TIME: Color = Color::Cyan;
const C_PLAYER: Color = Color::Blue;
const C_ENEMY: Color = Color::Red;
const C_BULLET: Color = Color::Green;
const C_PROMPT: Color = Color::White;
const C_HINT: Color = Color::DarkGrey;

// ── World → terminal mapping ──────────────────────────────────────────────────

/// Maps world coordinates onto the cells inside the border.
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    /// Terminal size in cells.
    pub cols: u16,
    pub rows: u16,
    /// World size in units.
    pub world_w: f32,
    pub world_h: f32,
}

impl Viewport {
    // Play area: columns 1..cols-1, rows 2..rows-2 (border + HUD + hint).
    fn left(&self) -> i32 {
        1
    }
    fn top(&self) -> i32 {
        2
    }
    fn inner_cols(&self) -> i32 {
        (self.cols as i32 - 2).max(1)
    }
    fn inner_rows(&self) -> i32 {
        (self.rows as i32 - 4).max(1)
    }

    fn col(&self, x: f32) -> i32 {
        self.left() + (x / self.world_w * self.inner_cols() as f32).floor() as i32
    }

    fn row(&self, y: f32) -> i32 {
        self.top() + (y / self.world_h * self.inner_rows() as f32).floor() as i32
    }

    /// Cells covered by `rect`, clipped to the play area.  Every rect
    /// covers at least one cell so small bullets stay visible.
    fn cells(&self, rect: &Rect) -> Option<(u16, u16, u16, u16)> {
        let c0 = self.col(rect.x);
        let r0 = self.row(rect.y);
        let c1 = self.col(rect.right()).max(c0 + 1);
        let r1 = self.row(rect.bottom()).max(r0 + 1);

        let min_c = self.left();
        let max_c = self.left() + self.inner_cols();
        let min_r = self.top();
        let max_r = self.top() + self.inner_rows();

        let (c0, c1) = (c0.max(min_c), c1.min(max_c));
        let (r0, r1) = (r0.max(min_r), r1.min(max_r));
        if c0 >= c1 || r0 >= r1 {
            return None;
        }
        Some((c0 as u16, r0 as u16, c1 as u16, r1 as u16))
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, scene: &Scene, view: &Viewport) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, view)?;
    draw_hud(out, scene, view)?;

    for enemy in &scene.enemies {
        fill_rect(out, view, &enemy.rect, C_ENEMY, "●")?;
    }
    for bullet in &scene.bullets {
        fill_rect(out, view, bullet, C_BULLET, "║")?;
    }
    if let Some(player) = &scene.player {
        fill_rect(out, view, player, C_PLAYER, "█")?;
    }

    if let Some(message) = scene.overlay_message() {
        let won = scene.overlay.map(|o| o.won).unwrap_or(false);
        draw_banner(out, view, &message, if won { Color::Yellow } else { Color::Red })?;
    }
    if let Some(prompt) = scene.prompt {
        let row = if scene.overlay.is_some() {
            view.rows / 2 + 3
        } else {
            view.rows / 2
        };
        draw_centred(out, view, row, prompt, C_PROMPT)?;
    }

    draw_controls_hint(out, view)?;

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let w = view.cols as usize;
    let h = view.rows;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    // Row 1: top bar
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    // Row h-2: bottom bar
    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    // Side walls
    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(view.cols.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, scene: &Scene, view: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score: {}", scene.hud.score)))?;

    let time_str = format!("Time: {}", scene.hud.seconds_left);
    let tx = view
        .cols
        .saturating_sub(time_str.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(tx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_TIME))?;
    out.queue(Print(&time_str))?;

    if scene.status == GameStatus::Ended && scene.overlay.is_none() {
        draw_centred(out, view, 0, "[ ROUND OVER ]", Color::DarkGrey)?;
    }

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn fill_rect<W: Write>(
    out: &mut W,
    view: &Viewport,
    rect: &Rect,
    color: Color,
    glyph: &str,
) -> std::io::Result<()> {
    let Some((c0, r0, c1, r1)) = view.cells(rect) else {
        return Ok(());
    };
    out.queue(style::SetForegroundColor(color))?;
    let line = glyph.repeat((c1 - c0) as usize);
    for row in r0..r1 {
        out.queue(cursor::MoveTo(c0, row))?;
        out.queue(Print(&line))?;
    }
    Ok(())
}

// ── Text ──────────────────────────────────────────────────────────────────────

fn draw_centred<W: Write>(
    out: &mut W,
    view: &Viewport,
    row: u16,
    text: &str,
    color: Color,
) -> std::io::Result<()> {
    let col = (view.cols / 2).saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

fn draw_banner<W: Write>(
    out: &mut W,
    view: &Viewport,
    message: &str,
    color: Color,
) -> std::io::Result<()> {
    let inner = message.chars().count() + 4;
    let top = format!("╔{}╗", "═".repeat(inner));
    let mid = format!("║  {}  ║", message);
    let bottom = format!("╚{}╝", "═".repeat(inner));

    let start_row = (view.rows / 2).saturating_sub(1);
    for (i, line) in [top, mid, bottom].iter().enumerate() {
        draw_centred(out, view, start_row + i as u16, line, color)?;
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Move   SPACE / ↑ / click : Shoot   Q : Quit"))?;
    Ok(())
}
