//! Terminal renderer.
//!
//! Draws a `GameState` onto a character grid: the arena is scaled to the
//! terminal, row 0 carries the HUD and the last row the key hints. Nothing
//! here touches the simulation.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use orc_siege::animation::Clip;
use orc_siege::compute::{HealthBand, HealthBar};
use orc_siege::entities::{Enemy, EnemyKind, GameState, GameStatus, Player, Projectile};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_FLOOR: Color = Color::DarkGreen;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_BEST: Color = Color::DarkYellow;
const C_HUD_ROSTER: Color = Color::Grey;
const C_BUTTON: Color = Color::Cyan;
const C_PLAYER: Color = Color::White;
const C_PLAYER_HURT: Color = Color::Magenta;
const C_ORC_REGULAR: Color = Color::Green;
const C_ORC_SPEED: Color = Color::Yellow;
const C_ORC_GIANT: Color = Color::Red;
const C_CORPSE: Color = Color::DarkGrey;
const C_PROJECTILE: Color = Color::Cyan;
const C_IMPACT: Color = Color::DarkYellow;
const C_HINT: Color = Color::DarkGrey;

const PAUSE_LABEL: &str = "[PAUSE]";
const RESUME_LABEL: &str = "[RESUME]";
const RESTART_LABEL: &str = "[RESTART]";

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Maps the arena onto the terminal grid.  Row 0 is the HUD, the last row
/// holds the controls hint, everything between is playfield.
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
    world_w: f32,
    world_h: f32,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16, state: &GameState) -> Self {
        Self {
            cols,
            rows,
            world_w: state.arena.width,
            world_h: state.arena.height,
        }
    }

    fn field_rows(&self) -> u16 {
        self.rows.saturating_sub(2).max(1)
    }

    /// World point → cell, or `None` if it falls off the grid.
    pub fn to_cell(&self, x: f32, y: f32) -> Option<(u16, u16)> {
        let cx = (x / self.world_w * self.cols as f32).floor();
        let cy = (y / self.world_h * self.field_rows() as f32).floor();
        if cx < 0.0 || cy < 0.0 || cx >= self.cols as f32 || cy >= self.field_rows() as f32 {
            return None;
        }
        Some((cx as u16, cy as u16 + 1))
    }

    /// Cell centre → world point, for playfield cells only.
    pub fn to_world(&self, col: u16, row: u16) -> Option<(f32, f32)> {
        if row == 0 || row > self.field_rows() || col >= self.cols {
            return None;
        }
        let x = (col as f32 + 0.5) / self.cols as f32 * self.world_w;
        let y = ((row - 1) as f32 + 0.5) / self.field_rows() as f32 * self.world_h;
        Some((x, y))
    }
}

// ── HUD buttons ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HudButton {
    Pause,
    Restart,
}

/// Column where the button strip starts on row 0.
fn buttons_col(cols: u16) -> u16 {
    let strip = (RESUME_LABEL.len() + 1 + RESTART_LABEL.len()) as u16;
    cols.saturating_sub(strip + 1)
}

/// Which HUD button, if any, sits under a click.
pub fn hud_button_at(cols: u16, col: u16, row: u16) -> Option<HudButton> {
    if row != 0 {
        return None;
    }
    let start = buttons_col(cols);
    let pause_end = start + RESUME_LABEL.len() as u16;
    let restart_start = pause_end + 1;
    let restart_end = restart_start + RESTART_LABEL.len() as u16;
    if (start..pause_end).contains(&col) {
        Some(HudButton::Pause)
    } else if (restart_start..restart_end).contains(&col) {
        Some(HudButton::Restart)
    } else {
        None
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, state: &GameState, view: &Viewport) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_floor(out, state, view)?;
    draw_hud(out, state, view)?;

    for enemy in &state.enemies {
        draw_enemy(out, enemy, view)?;
    }
    for projectile in &state.projectiles {
        draw_projectile(out, projectile, view)?;
    }

    draw_player(out, &state.player, view)?;
    draw_controls_hint(out, view)?;

    if state.status == GameStatus::GameOver {
        draw_game_over(out, state, view)?;
    } else if state.paused {
        draw_banner(out, view, "PAUSED", Color::Cyan)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Floor ─────────────────────────────────────────────────────────────────────

fn draw_floor<W: Write>(out: &mut W, state: &GameState, view: &Viewport) -> std::io::Result<()> {
    let Some((_, row)) = view.to_cell(0.0, state.arena.floor_y()) else {
        return Ok(());
    };
    out.queue(style::SetForegroundColor(C_FLOOR))?;
    out.queue(cursor::MoveTo(0, row))?;
    out.queue(Print("▀".repeat(view.cols as usize)))?;
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameState, view: &Viewport) -> std::io::Result<()> {
    // Score and best, left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score:{:>6}", state.score)))?;
    out.queue(style::SetForegroundColor(C_HUD_BEST))?;
    out.queue(Print(format!("  Best:{:>6}  ", state.best_score)))?;

    // Health bar
    let bar = state.player.health_bar();
    draw_health_bar(out, &bar)?;

    // Live orcs per kind
    out.queue(style::SetForegroundColor(C_HUD_ROSTER))?;
    out.queue(Print(format!(
        "  Orcs R:{} S:{} G:{}",
        state.roster.regular.len(),
        state.roster.speed.len(),
        state.roster.giant.len()
    )))?;

    // Buttons, right
    let pause_label = if state.paused { RESUME_LABEL } else { PAUSE_LABEL };
    out.queue(cursor::MoveTo(buttons_col(view.cols), 0))?;
    out.queue(style::SetForegroundColor(C_BUTTON))?;
    out.queue(Print(format!(
        "{:<width$} {}",
        pause_label,
        RESTART_LABEL,
        width = RESUME_LABEL.len()
    )))?;

    Ok(())
}

fn band_color(band: HealthBand) -> Color {
    match band {
        HealthBand::Lime => Color::Green,
        HealthBand::Yellow => Color::Yellow,
        HealthBand::Orange => Color::DarkYellow,
        HealthBand::Red => Color::Red,
    }
}

fn draw_health_bar<W: Write>(out: &mut W, bar: &HealthBar) -> std::io::Result<()> {
    const CELLS: usize = 10;
    let filled = ((bar.percent / 100.0) * CELLS as f32).round() as usize;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("HP["))?;
    out.queue(style::SetForegroundColor(band_color(bar.band)))?;
    out.queue(Print("█".repeat(filled.min(CELLS))))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("·".repeat(CELLS - filled.min(CELLS))))?;
    out.queue(Print(format!("]{:>3}%", bar.percent.round() as u32)))?;
    Ok(())
}

// ── Sprites ───────────────────────────────────────────────────────────────────

const PLAYER_IDLE: [&str; 5] = ["☻", "☻", "☺", "☻", "☻"];
const PLAYER_WALK_RIGHT: [&str; 5] = ["☻>", "☻»", "☻>", "☻»", "☻>"];
const PLAYER_WALK_LEFT: [&str; 5] = ["<☻", "«☻", "<☻", "«☻", "<☻"];
const PLAYER_JUMP: [&str; 5] = ["☻", "^☻^", "☻", "^☻^", "☻"];
const PLAYER_HURT: [&str; 5] = ["☹", "☻", "☹", "☻", "☹"];
const PLAYER_DIE: [&str; 5] = ["☹", "☹", "x", "_x_", "___"];

const ORC_DIE: [&str; 7] = ["x", "x", "X", "X", "_x_", "_._", "..."];

const PROJECTILE_SHOOT: [&str; 6] = ["•", "●", "•", "●", "•", "●"];
const PROJECTILE_IMPACT: [&str; 6] = ["✶", "✷", "✸", "✹", "*", "·"];

/// Sprite for a frame; `None` means there is nothing ready to draw.
fn player_sprite(player: &Player) -> Option<&'static str> {
    let frames: &[&str] = match player.anim.clip {
        Clip::Idle => &PLAYER_IDLE,
        Clip::MoveRight => &PLAYER_WALK_RIGHT,
        Clip::MoveLeft => &PLAYER_WALK_LEFT,
        Clip::Jump => &PLAYER_JUMP,
        Clip::Hurt => &PLAYER_HURT,
        Clip::Die => &PLAYER_DIE,
        _ => return None,
    };
    frames.get(player.anim.frame).copied()
}

fn orc_sprite(enemy: &Enemy) -> Option<String> {
    if enemy.anim.clip == Clip::Die {
        return ORC_DIE.get(enemy.anim.frame).map(|s| s.to_string());
    }
    let body = match enemy.kind {
        EnemyKind::Regular => "o",
        EnemyKind::Speed => "ø",
        EnemyKind::Giant => "[Ö]",
    };
    let limb = match (enemy.anim.clip, enemy.anim.frame % 2) {
        (Clip::Attack, _) => "⚔",
        (Clip::Hurt, _) => "!",
        (Clip::Walk, 0) => "/",
        (Clip::Walk, _) => "\\",
        _ => "|",
    };
    Some(if enemy.facing_right {
        format!("{body}{limb}")
    } else {
        format!("{limb}{body}")
    })
}

fn projectile_sprite(projectile: &Projectile) -> Option<&'static str> {
    let frames: &[&str] = match projectile.anim.clip {
        Clip::Shoot => &PROJECTILE_SHOOT,
        Clip::HitOrc | Clip::HitFloor => &PROJECTILE_IMPACT,
        _ => return None,
    };
    frames.get(projectile.anim.frame).copied()
}

// ── Entities ──────────────────────────────────────────────────────────────────

/// Print `sprite` centred on the cell under a world point.  Points off the
/// grid are skipped for this frame.
fn draw_at<W: Write>(
    out: &mut W,
    view: &Viewport,
    x: f32,
    y: f32,
    sprite: &str,
    color: Color,
) -> std::io::Result<()> {
    let Some((col, row)) = view.to_cell(x, y) else {
        return Ok(());
    };
    let half = sprite.chars().count() as u16 / 2;
    out.queue(cursor::MoveTo(col.saturating_sub(half), row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(sprite))?;
    Ok(())
}

fn draw_player<W: Write>(out: &mut W, player: &Player, view: &Viewport) -> std::io::Result<()> {
    let Some(sprite) = player_sprite(player) else {
        return Ok(());
    };
    let color = if player.anim.clip == Clip::Hurt { C_PLAYER_HURT } else { C_PLAYER };
    // Anchor on the bottom edge so the sprite stands on the floor row.
    let (cx, _) = player.center();
    draw_at(out, view, cx, player.y + player.height - 1.0, sprite, color)
}

fn draw_enemy<W: Write>(out: &mut W, enemy: &Enemy, view: &Viewport) -> std::io::Result<()> {
    let Some(sprite) = orc_sprite(enemy) else {
        return Ok(());
    };
    let color = if !enemy.alive {
        C_CORPSE
    } else {
        match enemy.kind {
            EnemyKind::Regular => C_ORC_REGULAR,
            EnemyKind::Speed => C_ORC_SPEED,
            EnemyKind::Giant => C_ORC_GIANT,
        }
    };
    let (cx, _) = enemy.center();
    draw_at(out, view, cx, enemy.y + enemy.height - 1.0, &sprite, color)
}

fn draw_projectile<W: Write>(
    out: &mut W,
    projectile: &Projectile,
    view: &Viewport,
) -> std::io::Result<()> {
    let Some(sprite) = projectile_sprite(projectile) else {
        return Ok(());
    };
    let color = if projectile.in_flight() { C_PROJECTILE } else { C_IMPACT };
    let (cx, cy) = projectile.center();
    draw_at(out, view, cx, cy, sprite, color)
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(
        "← → / A D : Move  ↑ / W : Jump  CLICK : Shoot  SPACE / P : Pause  R : Restart  Q : Quit",
    ))?;
    Ok(())
}

// ── Overlays ──────────────────────────────────────────────────────────────────

fn draw_centered<W: Write>(
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
    text: &str,
    color: Color,
) -> std::io::Result<()> {
    draw_centered(out, view, view.rows / 2, text, color)
}

fn draw_game_over<W: Write>(
    out: &mut W,
    state: &GameState,
    view: &Viewport,
) -> std::io::Result<()> {
    // best_score is folded in on restart, so beating it shows up here first
    let (best_line, best_color) = if state.score > state.best_score {
        (format!("★ NEW BEST {} ★", state.score), Color::Yellow)
    } else {
        (format!("best {}", state.best_score), Color::DarkGrey)
    };

    let lines = [
        ("┌──────────────────────┐".to_string(), Color::Red),
        ("│   THE ORCS BROKE IN  │".to_string(), Color::Red),
        ("└──────────────────────┘".to_string(), Color::Red),
        (format!("score {}", state.score), Color::Yellow),
        (best_line, best_color),
        (String::new(), Color::Reset),
        ("R / [RESTART] to fight again   Q to quit".to_string(), Color::White),
    ];

    let top = (view.rows / 2).saturating_sub(lines.len() as u16 / 2);
    for (i, (text, color)) in lines.iter().enumerate() {
        draw_centered(out, view, top + i as u16, text, *color)?;
    }
    Ok(())
}
