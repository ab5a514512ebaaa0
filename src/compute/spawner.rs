//! Periodic orc spawning at the arena edges.

use rand::Rng;
use tracing::{debug, warn};

use crate::entities::{Enemy, EnemyKind, EntityId, GameState, SpawnTimer};

/// One timer per orc kind, first firing one period after `now_ms`.
pub fn spawn_timers(now_ms: u64) -> Vec<SpawnTimer> {
    EnemyKind::ALL
        .iter()
        .map(|&kind| SpawnTimer {
            kind,
            period_ms: kind.spawn_period_ms(),
            next_due_ms: now_ms + kind.spawn_period_ms(),
        })
        .collect()
}

/// Spawn one `kind` orc at a random edge, standing on the floor.
pub fn spawn_enemy(state: &mut GameState, kind: EnemyKind, rng: &mut impl Rng) -> EntityId {
    let x = if rng.gen_bool(0.5) { 0.0 } else { state.arena.width };
    let y = state.arena.floor_y() - kind.height();
    let id = state.alloc_id();
    state.insert_enemy(Enemy::new(id, kind, x, y));
    debug!(id = id.0, kind = kind.name(), x, "orc spawned");
    id
}

/// Fire every due timer once. A timer that fell more than a period behind
/// drops the missed spawns and re-arms from `now_ms`.
pub fn run_spawners(state: &mut GameState, now_ms: u64, rng: &mut impl Rng) -> Vec<EntityId> {
    let mut spawned = Vec::new();

    for i in 0..state.spawn_timers.len() {
        let timer = &state.spawn_timers[i];
        if now_ms < timer.next_due_ms {
            continue;
        }
        let kind = timer.kind;
        let period = timer.period_ms;
        let mut next_due = timer.next_due_ms + period;
        if next_due <= now_ms {
            warn!(
                kind = kind.name(),
                behind_ms = now_ms - timer.next_due_ms,
                "spawner fell behind"
            );
            next_due = now_ms + period;
        }
        state.spawn_timers[i].next_due_ms = next_due;

        spawned.push(spawn_enemy(state, kind, rng));
    }

    spawned
}
