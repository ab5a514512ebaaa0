//! Orc behaviour. Regular, speed and giant orcs share this code and differ
//! only in the tuning copied from `EnemyKind` at construction.

use tracing::debug;

use crate::animation::{death_animation_complete, Clip};
use crate::constants::{ATTACK_COOLDOWN_MS, HURT_DAMAGE};
use crate::entities::Enemy;

impl Enemy {
    /// Horizontal distance to `target_x`.
    pub fn distance_to(&self, target_x: f32) -> f32 {
        (target_x - self.x).abs()
    }

    /// Closer than this and the orc stops to swing.
    pub fn melee_range(&self) -> f32 {
        self.width / 2.0
    }

    pub fn in_melee_range(&self, target_x: f32) -> bool {
        self.distance_to(target_x) < self.melee_range()
    }

    /// Walk toward `target_x` unless already within melee range. A target
    /// exactly on top of the orc gives no direction, so nothing changes.
    pub fn move_towards(&mut self, target_x: f32) {
        if !self.alive || self.in_melee_range(target_x) {
            return;
        }
        let dx = target_x - self.x;
        if dx == 0.0 {
            return;
        }
        self.vx = dx.signum() * self.speed;
        self.facing_right = dx > 0.0;
        self.anim.set(Clip::Walk);
    }

    /// Swing if the cooldown has elapsed. Returns whether the attack landed.
    pub fn attack(&mut self, now_ms: u64) -> bool {
        if !self.alive {
            return false;
        }
        let ready = match self.last_attack_ms {
            Some(last) => now_ms.saturating_sub(last) > ATTACK_COOLDOWN_MS,
            None => true,
        };
        if !ready {
            return false;
        }
        self.anim.set(Clip::Attack);
        self.vx = 0.0;
        self.last_attack_ms = Some(now_ms);
        true
    }

    pub fn hurt(&mut self, now_ms: u64) {
        if !self.alive {
            return;
        }
        self.anim.set(Clip::Hurt);
        self.hitpoints = self.hitpoints.saturating_sub(HURT_DAMAGE);
        if self.hitpoints == 0 {
            self.die(now_ms);
        }
    }

    pub fn die(&mut self, now_ms: u64) {
        if !self.alive {
            return;
        }
        self.anim.set(Clip::Die);
        self.alive = false;
        self.vx = 0.0;
        self.death_time_ms = Some(now_ms);
        debug!(id = self.id.0, kind = self.kind.name(), "orc died");
    }

    /// Dead orcs only play out the die clip; live ones walk unless mid-swing.
    pub fn update(&mut self, target_x: f32) {
        if !self.alive {
            self.anim.set(Clip::Die);
            self.anim.advance();
            return;
        }

        if self.anim.clip != Clip::Attack {
            self.move_towards(target_x);
        }

        self.x += self.vx;
        self.anim.advance();
    }

    /// Visual terminal condition: the die clip sits on its final frame.
    pub fn is_dead(&self) -> bool {
        self.anim.shows_final_frame_of(Clip::Die)
    }

    pub fn is_death_animation_complete(&self, now_ms: u64) -> bool {
        death_animation_complete(&self.anim, self.death_time_ms, now_ms)
    }

    /// Canonical cleanup signal: dead and the die clip's wall-clock length has
    /// passed. Once true it stays true.
    pub fn is_finished(&self, now_ms: u64) -> bool {
        !self.alive && self.is_death_animation_complete(now_ms)
    }
}
