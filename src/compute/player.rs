//! Player operations and per-tick physics.

use tracing::debug;

use crate::animation::{death_animation_complete, Clip};
use crate::constants::{
    HURT_DAMAGE, PLAYER_GRAVITY, PLAYER_HITPOINTS, PLAYER_JUMP_STRENGTH, PLAYER_SPEED,
};
use crate::entities::{Arena, Player};

impl Player {
    pub fn move_left(&mut self) {
        if !self.alive {
            return;
        }
        self.vx = -PLAYER_SPEED;
        self.facing_right = false;
        self.anim.set(Clip::MoveLeft);
    }

    pub fn move_right(&mut self) {
        if !self.alive {
            return;
        }
        self.vx = PLAYER_SPEED;
        self.facing_right = true;
        self.anim.set(Clip::MoveRight);
    }

    /// Halt horizontally; idle again only once grounded.
    pub fn stop(&mut self) {
        if !self.alive {
            return;
        }
        self.vx = 0.0;
        if self.on_ground {
            self.anim.set(Clip::Idle);
        }
    }

    /// Launch upward. A second jump is allowed mid-air.
    pub fn jump(&mut self) {
        if !self.alive || self.jump_count >= self.max_jumps {
            return;
        }
        self.vy = PLAYER_JUMP_STRENGTH;
        self.anim.set(Clip::Jump);
        self.on_ground = false;
        self.jump_count += 1;
    }

    pub fn hurt(&mut self, now_ms: u64) {
        if !self.alive {
            return;
        }
        self.anim.set(Clip::Hurt);
        self.hitpoints = self.hitpoints.saturating_sub(HURT_DAMAGE);
        debug!(hitpoints = self.hitpoints, "player hurt");
        if self.hitpoints == 0 {
            self.die(now_ms);
        }
    }

    /// alive → dead. Only the first call has any effect.
    pub fn die(&mut self, now_ms: u64) {
        if !self.alive {
            return;
        }
        self.anim.set(Clip::Die);
        self.alive = false;
        self.vx = 0.0;
        self.death_time_ms = Some(now_ms);
        debug!(now_ms, "player died");
    }

    pub fn update(&mut self, arena: &Arena, now_ms: u64) {
        if self.on_ground {
            self.vy = 0.0;
            self.jump_count = 0;
        } else {
            self.vy += PLAYER_GRAVITY;
        }

        self.x += self.vx;
        self.y += self.vy;

        let rest_y = arena.floor_y() - self.height;
        if self.y >= rest_y {
            self.y = rest_y;
            self.on_ground = true;
        } else {
            self.on_ground = false;
        }

        self.anim.advance();

        if self.hitpoints == 0 && self.alive {
            self.die(now_ms);
        }
    }

    pub fn is_death_animation_complete(&self, now_ms: u64) -> bool {
        death_animation_complete(&self.anim, self.death_time_ms, now_ms)
    }

    /// The die clip has visibly reached its final frame.
    pub fn is_death_animation_shown(&self) -> bool {
        self.anim.shows_final_frame_of(Clip::Die)
    }

    pub fn health_bar(&self) -> HealthBar {
        health_bar(self.hitpoints)
    }
}

// ── Health bar ────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HealthBand {
    Lime,
    Yellow,
    Orange,
    Red,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HealthBar {
    /// 0.0 ..= 100.0
    pub percent: f32,
    pub band: HealthBand,
}

/// Display ratio and colour band for `hitpoints` out of the player's maximum.
pub fn health_bar(hitpoints: u32) -> HealthBar {
    let percent = (hitpoints as f32 / PLAYER_HITPOINTS as f32 * 100.0).clamp(0.0, 100.0);
    let band = if percent > 75.0 {
        HealthBand::Lime
    } else if percent > 50.0 {
        HealthBand::Yellow
    } else if percent > 25.0 {
        HealthBand::Orange
    } else {
        HealthBand::Red
    };
    HealthBar { percent, band }
}
