use orc_siege::animation::Clip;
use orc_siege::compute::*;
use orc_siege::constants::PROJECTILE_RADIUS;
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

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

/// Drop a resting projectile with its top-left corner at `(x, y)`; gravity
/// takes over on the next update.
fn drop_projectile(s: &mut GameState, x: f32, y: f32) -> EntityId {
    let id = s.alloc_id();
    let (cx, cy) = (x + PROJECTILE_RADIUS, y + PROJECTILE_RADIUS);
    s.projectiles.push(Projectile::launch(id, cx, cy, cx, cy));
    id
}

// ── launch ────────────────────────────────────────────────────────────────────

#[test]
fn aim_along_positive_x() {
    let p = Projectile::launch(EntityId(1), 0.0, 0.0, 100.0, 0.0);
    assert_eq!(p.vx, 17.0);
    assert_eq!(p.vy, 0.0);
    assert_eq!(p.anim.clip, Clip::Shoot);
    assert_eq!(p.radius, 20.0);
}

#[test]
fn aim_speed_is_fixed() {
    let p = Projectile::launch(EntityId(1), 10.0, 10.0, 40.0, 50.0);
    assert!((p.vx.hypot(p.vy) - 17.0).abs() < 1e-4);
    assert!(p.vx > 0.0 && p.vy > 0.0);
}

#[test]
fn launch_point_is_the_centre() {
    let p = Projectile::launch(EntityId(1), 550.0, 570.0, 900.0, 100.0);
    assert_eq!(p.center(), (550.0, 570.0));
    assert_eq!((p.x, p.y), (530.0, 550.0));
}

#[test]
fn aim_at_self_is_at_rest() {
    let p = Projectile::launch(EntityId(1), 5.0, 5.0, 5.0, 5.0);
    assert_eq!((p.vx, p.vy), (0.0, 0.0));
}

// ── update ────────────────────────────────────────────────────────────────────

#[test]
fn gravity_applied_before_integration() {
    let mut p = Projectile::launch(EntityId(1), 0.0, 0.0, 100.0, 0.0);
    p.update();
    assert_eq!(p.vy, 0.3);
    assert_eq!(p.x, -20.0 + 17.0);
    assert_eq!(p.y, -20.0 + 0.3);
}

#[test]
fn impacted_projectile_stops() {
    let mut p = Projectile::launch(EntityId(1), 0.0, 0.0, 100.0, 0.0);
    assert!(p.impact(Clip::HitOrc, 7).is_some());
    let (x, y) = (p.x, p.y);
    for _ in 0..10 {
        p.update();
    }
    assert_eq!((p.x, p.y), (x, y));
    assert!(!p.in_flight());
}

#[test]
fn impact_schedules_after_clip_length() {
    let mut p = Projectile::launch(EntityId(9), 0.0, 0.0, 1.0, 0.0);
    let removal = p.impact(Clip::HitFloor, 100).unwrap();
    assert_eq!(removal, PendingRemoval { id: EntityId(9), due_frame: 130 });
    assert_eq!(p.anim.clip, Clip::HitFloor);
}

#[test]
fn second_impact_is_ignored() {
    let mut p = Projectile::launch(EntityId(1), 0.0, 0.0, 1.0, 0.0);
    assert!(p.impact(Clip::HitOrc, 0).is_some());
    assert!(p.impact(Clip::HitFloor, 5).is_none());
    assert_eq!(p.anim.clip, Clip::HitOrc);
}

// ── scenario: floor impact removal ────────────────────────────────────────────

#[test]
fn floor_impact_removed_after_exactly_thirty_frames() {
    let mut s = make_state();
    let floor = s.arena.floor_y();
    let id = drop_projectile(&mut s, 600.0, floor + 1.0);
    let mut rng = seeded_rng();
    let idle = FrameInput::default();

    s = tick(&s, &idle, 16, &mut rng);
    let p = s.projectile(id).unwrap();
    assert_eq!(p.anim.clip, Clip::HitFloor);
    assert_eq!(s.pending_removals, vec![PendingRemoval { id, due_frame: 31 }]);

    for t in 2..=30 {
        s = tick(&s, &idle, t * 16, &mut rng);
        assert!(s.projectile(id).is_some(), "removed early at frame {}", s.frame);
    }
    assert!(s.projectile(id).unwrap().anim.is_on_last_frame());

    s = tick(&s, &idle, 31 * 16, &mut rng);
    assert_eq!(s.frame, 31);
    assert!(s.projectile(id).is_none());
    assert!(s.pending_removals.is_empty());
}

#[test]
fn paused_ticks_do_not_count_toward_removal() {
    let mut s = make_state();
    let floor = s.arena.floor_y();
    let id = drop_projectile(&mut s, 600.0, floor + 1.0);
    let mut rng = seeded_rng();
    let idle = FrameInput::default();

    s = tick(&s, &idle, 16, &mut rng);
    s = toggle_pause(&s);
    for t in 2..100 {
        s = tick(&s, &idle, t * 16, &mut rng);
    }
    assert_eq!(s.frame, 1);
    assert!(s.projectile(id).is_some());
}

#[test]
fn escaped_projectile_removed_immediately() {
    let mut s = make_state();
    let id = drop_projectile(&mut s, -5.0, 300.0);
    let mut rng = seeded_rng();

    s = tick(&s, &FrameInput::default(), 16, &mut rng);
    assert!(s.projectile(id).is_none());
    assert!(s.pending_removals.is_empty());
}

#[test]
fn fired_projectile_flies_until_floor() {
    let mut s = make_state();
    let (cx, cy) = s.player.center();
    s = fire(&s, cx + 100.0, cy);
    let id = s.projectiles[0].id;
    let mut rng = seeded_rng();

    let mut t = 1;
    while s.projectile(id).map_or(false, |p| p.in_flight()) && t < 200 {
        s = tick(&s, &FrameInput::default(), t * 16, &mut rng);
        t += 1;
    }
    let p = s.projectile(id).unwrap();
    assert_eq!(p.anim.clip, Clip::HitFloor);
    assert!(p.x > cx);
}
