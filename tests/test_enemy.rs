use orc_siege::animation::Clip;
use orc_siege::compute::*;
use orc_siege::constants::FRAME_MS;
use orc_siege::entities::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn make_state() -> GameState {
    let mut s = init_state(Arena::default(), 0);
    s.spawn_timers.clear();
    s.player.x = 500.0;
    s.player.y = s.arena.floor_y() - s.player.height;
    s.player.on_ground = true;
    s
}

fn orc(kind: EnemyKind, x: f32) -> Enemy {
    let floor = Arena::default().floor_y();
    Enemy::new(EntityId(1), kind, x, floor - kind.height())
}

fn now_at(tick: u64) -> u64 {
    (tick as f64 * FRAME_MS) as u64
}

// ── kind table ────────────────────────────────────────────────────────────────

#[test]
fn kind_tuning_copied_on_construction() {
    let giant = orc(EnemyKind::Giant, 0.0);
    assert_eq!(giant.speed, 0.5);
    assert_eq!(giant.hitpoints, 50);
    assert_eq!((giant.width, giant.height), (200.0, 200.0));

    let speed = orc(EnemyKind::Speed, 0.0);
    assert_eq!(speed.speed, 4.0);
    assert_eq!(speed.width, 90.0);
}

#[test]
fn score_values() {
    assert_eq!(EnemyKind::Regular.score_value(), 75);
    assert_eq!(EnemyKind::Speed.score_value(), 125);
    assert_eq!(EnemyKind::Giant.score_value(), 200);
}

// ── move_towards ──────────────────────────────────────────────────────────────

#[test]
fn move_towards_right() {
    let mut e = orc(EnemyKind::Regular, 0.0);
    e.move_towards(500.0);
    assert_eq!(e.vx, 1.0);
    assert!(e.facing_right);
    assert_eq!(e.anim.clip, Clip::Walk);
}

#[test]
fn move_towards_left() {
    let mut e = orc(EnemyKind::Speed, 1280.0);
    e.move_towards(500.0);
    assert_eq!(e.vx, -4.0);
    assert!(!e.facing_right);
}

#[test]
fn move_towards_in_range_is_noop() {
    let mut e = orc(EnemyKind::Regular, 480.0);
    e.move_towards(500.0);
    assert_eq!(e.vx, 0.0);
    assert_eq!(e.anim.clip, Clip::Idle);
}

#[test]
fn dead_orc_does_not_move() {
    let mut e = orc(EnemyKind::Regular, 0.0);
    e.die(0);
    e.move_towards(500.0);
    e.update(500.0);
    assert_eq!(e.vx, 0.0);
    assert_eq!(e.x, 0.0);
}

// ── attack ────────────────────────────────────────────────────────────────────

#[test]
fn first_attack_always_ready() {
    let mut e = orc(EnemyKind::Regular, 480.0);
    assert!(e.attack(0));
    assert_eq!(e.anim.clip, Clip::Attack);
    assert_eq!(e.last_attack_ms, Some(0));
}

#[test]
fn attack_cooldown_strictly_longer_than_two_seconds() {
    let mut e = orc(EnemyKind::Regular, 480.0);
    assert!(e.attack(10_000));
    assert!(!e.attack(11_000));
    assert!(!e.attack(12_000));
    assert!(e.attack(12_001));
}

#[test]
fn dead_orc_cannot_attack() {
    let mut e = orc(EnemyKind::Regular, 480.0);
    e.die(0);
    assert!(!e.attack(100_000));
}

// ── damage & death ────────────────────────────────────────────────────────────

#[test]
fn regular_dies_on_second_hurt() {
    let mut e = orc(EnemyKind::Regular, 0.0);
    e.hurt(10);
    assert!(e.alive);
    assert_eq!(e.hitpoints, 10);
    e.hurt(20);
    assert!(!e.alive);
    assert_eq!(e.hitpoints, 0);
    assert_eq!(e.death_time_ms, Some(20));
}

#[test]
fn alive_flips_once() {
    let mut e = orc(EnemyKind::Giant, 0.0);
    for t in 0..5 {
        e.hurt(t);
    }
    assert!(!e.alive);
    e.hurt(100);
    e.die(200);
    assert_eq!(e.hitpoints, 0);
    assert_eq!(e.death_time_ms, Some(4));
}

#[test]
fn visual_death_precedes_wall_clock_completion() {
    let mut e = orc(EnemyKind::Regular, 0.0);
    e.die(now_at(0));

    let mut visual = None;
    let mut finished = None;
    for t in 1..=60 {
        e.update(500.0);
        let now = now_at(t);
        if visual.is_none() && e.is_dead() {
            visual = Some(t);
        }
        if finished.is_none() && e.is_finished(now) {
            finished = Some(t);
        }
    }

    // 7 frames × 5 ticks on screen, 583.3 ms on the wall clock
    assert_eq!(visual, Some(30));
    let finished = finished.unwrap();
    assert!(finished > 30);
    assert!(now_at(finished) as f64 >= 35.0 * FRAME_MS);
}

#[test]
fn finished_is_monotonic() {
    let mut e = orc(EnemyKind::Speed, 0.0);
    e.die(1_000);
    assert!(!e.is_finished(1_500));
    for now in [1_584, 1_600, 50_000] {
        assert!(e.is_finished(now));
    }
}

#[test]
fn living_orc_never_finished() {
    let e = orc(EnemyKind::Giant, 0.0);
    assert!(!e.is_finished(u64::MAX));
}

// ── scenario: walk in, then swing on cooldown ─────────────────────────────────

#[test]
fn regular_orc_walks_in_then_attacks_on_cooldown() {
    let mut s = make_state();
    let id = s.alloc_id();
    let y = s.arena.floor_y() - EnemyKind::Regular.height();
    s.insert_enemy(Enemy::new(id, EnemyKind::Regular, 0.0, y));
    let mut rng = StdRng::seed_from_u64(42);
    let idle = FrameInput::default();

    let mut hits: Vec<u64> = Vec::new();
    for t in 1..=1200 {
        let before = s.enemy(id).unwrap().clone();
        let hp_before = s.player.hitpoints;

        s = tick(&s, &idle, now_at(t), &mut rng);

        let after = s.enemy(id).unwrap();
        if !before.in_melee_range(s.player.x) {
            assert!(after.x > before.x, "tick {t}: {} -> {}", before.x, after.x);
        }
        if s.player.hitpoints < hp_before {
            hits.push(now_at(t));
        }
    }

    assert_eq!(s.enemy(id).unwrap().x, 451.0);
    assert!(hits.len() >= 2);
    for pair in hits.windows(2) {
        assert!(pair[1] - pair[0] > 2000);
    }
    assert_eq!(s.player.hitpoints, 100 - 10 * hits.len() as u32);
}
