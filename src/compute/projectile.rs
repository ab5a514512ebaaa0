//! Aimed ballistic projectiles.

use tracing::debug;

use crate::animation::{Animation, Clip, ClipSet};
use crate::constants::{FRAME_DELAY, PROJECTILE_GRAVITY, PROJECTILE_RADIUS, PROJECTILE_SPEED};
use crate::entities::{EntityId, PendingRemoval, Projectile};

impl Projectile {
    /// Fire from `(x, y)` toward `(target_x, target_y)` at the fixed launch
    /// speed. `(x, y)` becomes the projectile's centre. A target on the
    /// launch point leaves the projectile at rest.
    pub fn launch(id: EntityId, x: f32, y: f32, target_x: f32, target_y: f32) -> Self {
        let dx = target_x - x;
        let dy = target_y - y;
        let (vx, vy) = if dx == 0.0 && dy == 0.0 {
            (0.0, 0.0)
        } else {
            let angle = dy.atan2(dx);
            (angle.cos() * PROJECTILE_SPEED, angle.sin() * PROJECTILE_SPEED)
        };

        Self {
            id,
            x: x - PROJECTILE_RADIUS,
            y: y - PROJECTILE_RADIUS,
            vx,
            vy,
            radius: PROJECTILE_RADIUS,
            anim: Animation::new(ClipSet::Projectile, Clip::Shoot, FRAME_DELAY),
        }
    }

    /// Still flying; impacted projectiles no longer move or hit.
    pub fn in_flight(&self) -> bool {
        self.anim.clip == Clip::Shoot
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.radius, self.y + self.radius)
    }

    pub fn update(&mut self) {
        if self.in_flight() {
            self.vy += PROJECTILE_GRAVITY;
            self.x += self.vx;
            self.y += self.vy;
        }
        self.anim.advance();
    }

    /// Switch to an impact clip and return the removal request for it, or
    /// `None` if the projectile already impacted.
    pub fn impact(&mut self, clip: Clip, frame: u64) -> Option<PendingRemoval> {
        if !self.in_flight() {
            return None;
        }
        self.anim.set(clip);
        self.vx = 0.0;
        self.vy = 0.0;
        debug!(id = self.id.0, clip = clip.name(), frame, "projectile impact");
        Some(PendingRemoval {
            id: self.id,
            due_frame: frame + self.anim.play_ticks(clip),
        })
    }
}
