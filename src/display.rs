//! Rendering layer. All terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! game state. No game logic is performed; this module only translates
//! world-space state into terminal cells.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use volley_shooter::entities::{Enemy, EnemyKind, GameState, Rect};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_COOLDOWN: Color = Color::Cyan;
const C_PLAYER: Color = Color::Blue;
const C_ENEMY_LIGHT: Color = Color::Green;
const C_ENEMY_SMALL: Color = Color::Magenta;
const C_ENEMY_ARMORED: Color = Color::Grey;
const C_HP_LABEL: Color = Color::White;
const C_BULLET: Color = Color::Red;
const C_LASER: Color = Color::DarkCyan;
const C_HINT: Color = Color::DarkGrey;

const CONTROLS_HINT: &str = "← → / A D : Move   SPACE : Shoot   X : Laser   Q : Quit";

// ── World → terminal mapping ──────────────────────────────────────────────────

/// The playfield area inside the border, and the scale from world units to
/// cells.
struct Viewport {
    left: u16,
    top: u16,
    cols: u16,
    rows: u16,
    sx: f32,
    sy: f32,
}

impl Viewport {
    /// Row 0 is the HUD, row 1 and `height - 2` are the border, the last row
    /// holds the controls hint.
    fn new(term: (u16, u16), state: &GameState) -> Self {
        let (width, height) = term;
        let cols = width.saturating_sub(2).max(1);
        let rows = height.saturating_sub(4).max(1);
        Self {
            left: 1,
            top: 2,
            cols,
            rows,
            sx: cols as f32 / state.width(),
            sy: rows as f32 / state.height(),
        }
    }

    /// Columns covered by `x..x + w`, clipped to the playfield.
    fn columns(&self, x: f32, w: f32) -> Option<(u16, u16)> {
        cell_span(x, w, self.sx, self.cols).map(|(a, b)| (self.left + a, self.left + b))
    }

    /// Rows covered by `y..y + h`, clipped to the playfield.
    fn rows(&self, y: f32, h: f32) -> Option<(u16, u16)> {
        cell_span(y, h, self.sy, self.rows).map(|(a, b)| (self.top + a, self.top + b))
    }
}

fn cell_span(pos: f32, len: f32, scale: f32, cells: u16) -> Option<(u16, u16)> {
    let limit = cells as f32;
    let start = (pos * scale).floor().clamp(0.0, limit);
    let end = ((pos + len) * scale).ceil().clamp(0.0, limit);
    if end <= start {
        return None;
    }
    Some((start as u16, end as u16))
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame onto a terminal of size `term` (columns, rows).
pub fn render<W: Write>(out: &mut W, state: &GameState, term: (u16, u16)) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let vp = Viewport::new(term, state);

    draw_border(out, term)?;
    draw_hud(out, state, term)?;

    for laser in &state.lasers {
        fill(out, &vp, laser.bounds(), '░', C_LASER)?;
    }
    for enemy in &state.enemies {
        draw_enemy(out, &vp, enemy)?;
    }
    for bullet in &state.bullets {
        draw_label(out, &vp, bullet.bounds(), bullet.label, C_BULLET)?;
    }
    fill(out, &vp, state.player.bounds(), '█', C_PLAYER)?;

    draw_controls_hint(out, term)?;

    if state.is_over() {
        draw_game_over(out, state, term)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, term.1.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, term: (u16, u16)) -> std::io::Result<()> {
    let (width, height) = term;
    let w = width as usize;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, height.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..height.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameState, term: (u16, u16)) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(state.score_text()))?;

    let cooldown = state.cooldown_text();
    let rx = term.0.saturating_sub(cooldown.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_COOLDOWN))?;
    out.queue(Print(cooldown))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn fill<W: Write>(
    out: &mut W,
    vp: &Viewport,
    rect: Rect,
    glyph: char,
    color: Color,
) -> std::io::Result<()> {
    let (Some((c0, c1)), Some((r0, r1))) = (vp.columns(rect.x, rect.w), vp.rows(rect.y, rect.h))
    else {
        return Ok(());
    };
    let line: String = std::iter::repeat(glyph).take((c1 - c0) as usize).collect();

    out.queue(style::SetForegroundColor(color))?;
    for row in r0..r1 {
        out.queue(cursor::MoveTo(c0, row))?;
        out.queue(Print(&line))?;
    }
    Ok(())
}

/// Print `text` centred on the top row of `rect`, cut to the rect's width.
fn draw_label<W: Write>(
    out: &mut W,
    vp: &Viewport,
    rect: Rect,
    text: &str,
    color: Color,
) -> std::io::Result<()> {
    let (Some((c0, c1)), Some((r0, _))) = (vp.columns(rect.x, rect.w), vp.rows(rect.y, rect.h))
    else {
        return Ok(());
    };
    let room = (c1 - c0) as usize;
    let shown: String = text.chars().take(room).collect();
    let pad = (room - shown.chars().count()) / 2;

    out.queue(cursor::MoveTo(c0 + pad as u16, r0))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(shown))?;
    Ok(())
}

fn draw_enemy<W: Write>(out: &mut W, vp: &Viewport, enemy: &Enemy) -> std::io::Result<()> {
    let (glyph, color) = match enemy.kind {
        EnemyKind::Light => ('▓', C_ENEMY_LIGHT),
        EnemyKind::Small => ('●', C_ENEMY_SMALL),
        EnemyKind::Armored => ('⬢', C_ENEMY_ARMORED),
    };
    let bounds = enemy.bounds();
    fill(out, vp, bounds, glyph, color)?;

    // Remaining-hits label on the middle row
    let mid = Rect::new(bounds.x, bounds.y + bounds.h / 2.0, bounds.w, bounds.h / 2.0);
    draw_label(out, vp, mid, &enemy.remaining_hits().to_string(), C_HP_LABEL)
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, term: (u16, u16)) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, term.1.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(CONTROLS_HINT))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(
    out: &mut W,
    state: &GameState,
    term: (u16, u16),
) -> std::io::Result<()> {
    let score_line = format!("Final {}", state.score_text());
    let lines: &[(&str, Color)] = &[
        ("╔══════════════════╗", Color::Red),
        ("║    GAME  OVER    ║", Color::Red),
        ("╚══════════════════╝", Color::Red),
        (&score_line, Color::Yellow),
        ("Click or R - Play Again   Q - Quit", Color::White),
    ];

    let cx = term.0 / 2;
    let start_row = (term.1 / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    Ok(())
}
