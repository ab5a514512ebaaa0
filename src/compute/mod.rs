//! Game-logic functions.
//!
//! Every public entry point takes an immutable reference to the current
//! `GameState` (plus the simulation clock and, where needed, an RNG handle)
//! and returns a brand-new `GameState`.  Side effects are limited to the
//! injected RNG and log output.
//!
//! The clock is never read here: `now_ms` is a monotonic millisecond count
//! supplied by the caller, so tests can drive time directly.

pub mod collision;
pub mod enemy;
pub mod player;
pub mod projectile;
pub mod spawner;

use rand::Rng;
use tracing::{debug, info};

use crate::entities::{Arena, EnemyRoster, FrameInput, GameState, GameStatus, Player, Projectile};

pub use collision::{apply_pending_removals, resolve, ResolveReport};
pub use player::{health_bar, HealthBand, HealthBar};
pub use spawner::{run_spawners, spawn_enemy, spawn_timers};

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial game state for an arena, with spawn timers armed from
/// `now_ms`.
pub fn init_state(arena: Arena, now_ms: u64) -> GameState {
    GameState {
        arena,
        player: Player::spawn(&arena),
        enemies: Vec::new(),
        roster: EnemyRoster::default(),
        projectiles: Vec::new(),
        pending_removals: Vec::new(),
        spawn_timers: spawn_timers(now_ms),
        score: 0,
        best_score: 0,
        paused: false,
        status: GameStatus::Playing,
        frame: 0,
        next_id: 1,
    }
}

// ── Discrete actions (pure) ──────────────────────────────────────────────────

/// Fire a projectile from the player's centre toward a world-space target.
pub fn fire(state: &GameState, target_x: f32, target_y: f32) -> GameState {
    if !state.player.alive || state.status == GameStatus::GameOver {
        return state.clone();
    }
    let mut next = state.clone();
    let (x, y) = next.player.center();
    let id = next.alloc_id();
    next.projectiles.push(Projectile::launch(id, x, y, target_x, target_y));
    debug!(id = id.0, target_x, target_y, "projectile fired");
    next
}

/// Flip the pause flag. Ignored once the round is over.
pub fn toggle_pause(state: &GameState) -> GameState {
    if state.status == GameStatus::GameOver {
        return state.clone();
    }
    let paused = !state.paused;
    info!(paused, "pause toggled");
    GameState {
        paused,
        ..state.clone()
    }
}

/// Start a new round. Entities, pending removals and timers are rebuilt from
/// scratch; only the best score and the id counter carry over.
pub fn restart(state: &GameState, now_ms: u64) -> GameState {
    let best_score = state.best_score.max(state.score);
    info!(score = state.score, best_score, "restart");
    GameState {
        best_score,
        next_id: state.next_id,
        ..init_state(state.arena, now_ms)
    }
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the simulation by one frame.
///
/// Spawners run first and keep running while paused; everything else is
/// skipped until the game is unpaused.
pub fn tick(state: &GameState, input: &FrameInput, now_ms: u64, rng: &mut impl Rng) -> GameState {
    let mut next = state.clone();

    // ── 1. Spawn timers ──────────────────────────────────────────────────────
    run_spawners(&mut next, now_ms, rng);

    if next.paused {
        return next;
    }

    // ── 2. Deferred removals due this frame ──────────────────────────────────
    next.frame += 1;
    apply_pending_removals(&mut next);

    // ── 3. Input ─────────────────────────────────────────────────────────────
    apply_input(&mut next.player, input);

    // ── 4. Integrate every actor ─────────────────────────────────────────────
    next.player.update(&next.arena, now_ms);
    for projectile in next.projectiles.iter_mut() {
        projectile.update();
    }
    let player_x = next.player.x;
    for enemy in next.enemies.iter_mut() {
        enemy.update(player_x);
    }

    // ── 5. Collisions & lifecycle ────────────────────────────────────────────
    resolve(&mut next, now_ms);

    // ── 6. Game over ─────────────────────────────────────────────────────────
    if next.status == GameStatus::Playing && next.player.is_death_animation_shown() {
        next.status = GameStatus::GameOver;
        next.paused = true;
        info!(score = next.score, frame = next.frame, "game over");
    }

    next
}

fn apply_input(player: &mut Player, input: &FrameInput) {
    if input.left {
        player.move_left();
    } else if input.right {
        player.move_right();
    } else {
        player.stop();
    }

    if input.jump {
        player.jump();
    }
}
