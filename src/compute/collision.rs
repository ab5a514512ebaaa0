//! Collision and lifecycle resolution, run once per tick after every actor
//! has moved.
//!
//! Removals are collected during the passes and applied afterwards by
//! identity, so nothing is skipped or visited twice when several entities go
//! in the same tick.

use tracing::debug;

use crate::animation::Clip;
use crate::entities::{EntityId, GameState};

/// What a resolve pass did.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResolveReport {
    /// Orcs killed this tick, in the order they died.
    pub kills: Vec<EntityId>,
    pub score_gain: u32,
    /// Landed melee swings on the player.
    pub player_hits: u32,
    pub removed_enemies: Vec<EntityId>,
    pub removed_projectiles: Vec<EntityId>,
}

pub fn resolve(state: &mut GameState, now_ms: u64) -> ResolveReport {
    let mut report = ResolveReport::default();
    let frame = state.frame;
    let arena = state.arena;

    let GameState {
        player,
        enemies,
        projectiles,
        pending_removals,
        score,
        ..
    } = state;

    let mut finished: Vec<EntityId> = Vec::new();

    for enemy in enemies.iter_mut() {
        // ── 1. Death animation played out ────────────────────────────────────
        if enemy.is_finished(now_ms) {
            finished.push(enemy.id);
            continue;
        }

        // ── 2. Melee or chase ────────────────────────────────────────────────
        if enemy.in_melee_range(player.x) {
            enemy.vx = 0.0;
            if enemy.attack(now_ms) {
                player.hurt(now_ms);
                report.player_hits += 1;
            }
        } else {
            enemy.move_towards(player.x);
        }

        // ── 3. Projectile hits ───────────────────────────────────────────────
        // Corpses still stop shots; score only on the alive → dead crossing.
        let hit_radius = enemy.width / 2.0;
        for projectile in projectiles.iter_mut().filter(|p| p.in_flight()) {
            let (ex, ey) = enemy.center();
            let (px, py) = projectile.center();
            if (ex - px).hypot(ey - py) >= hit_radius {
                continue;
            }

            let was_alive = enemy.alive;
            enemy.hurt(now_ms);
            if let Some(removal) = projectile.impact(Clip::HitOrc, frame) {
                pending_removals.push(removal);
            }
            if was_alive && !enemy.alive {
                let value = enemy.kind.score_value();
                *score += value;
                report.score_gain += value;
                report.kills.push(enemy.id);
                debug!(id = enemy.id.0, kind = enemy.kind.name(), value, "orc killed");
            }
        }
    }

    // ── 4. Floor and bounds ──────────────────────────────────────────────────
    let mut escaped: Vec<EntityId> = Vec::new();
    for projectile in projectiles.iter_mut().filter(|p| p.in_flight()) {
        if projectile.y > arena.floor_y() {
            if let Some(removal) = projectile.impact(Clip::HitFloor, frame) {
                pending_removals.push(removal);
            }
        } else if projectile.y > arena.height || projectile.x < 0.0 || projectile.x > arena.width {
            escaped.push(projectile.id);
        }
    }

    // ── Compact ──────────────────────────────────────────────────────────────
    for id in finished {
        if state.remove_enemy(id) {
            debug!(id = id.0, "orc removed");
            report.removed_enemies.push(id);
        }
    }
    for id in escaped {
        if state.remove_projectile(id) {
            report.removed_projectiles.push(id);
        }
    }

    report
}

/// Drop every projectile whose removal is due at the current frame. Requests
/// for ids that are already gone are discarded silently.
pub fn apply_pending_removals(state: &mut GameState) -> Vec<EntityId> {
    let frame = state.frame;
    let (due, waiting): (Vec<_>, Vec<_>) = state
        .pending_removals
        .drain(..)
        .partition(|r| r.due_frame <= frame);
    state.pending_removals = waiting;

    due.into_iter()
        .filter(|r| state.remove_projectile(r.id))
        .map(|r| r.id)
        .collect()
}
