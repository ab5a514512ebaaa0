use orc_siege::entities::*;

fn make_state() -> GameState {
    orc_siege::compute::init_state(Arena::default(), 0)
}

fn add_orc(s: &mut GameState, kind: EnemyKind) -> EntityId {
    let id = s.alloc_id();
    s.insert_enemy(Enemy::new(id, kind, 0.0, 0.0));
    id
}

// ── Arena ─────────────────────────────────────────────────────────────────────

#[test]
fn default_arena_dimensions() {
    let a = Arena::default();
    assert_eq!((a.width, a.height), (1280.0, 720.0));
    assert_eq!(a.floor_y(), 620.0);
    assert_eq!(a.origin_x(), 640.0);
}

// ── ids ───────────────────────────────────────────────────────────────────────

#[test]
fn alloc_id_monotonic() {
    let mut s = make_state();
    let a = s.alloc_id();
    let b = s.alloc_id();
    assert_eq!(b.0, a.0 + 1);
}

// ── registry ──────────────────────────────────────────────────────────────────

#[test]
fn insert_lists_enemy_in_its_roster() {
    let mut s = make_state();
    let r = add_orc(&mut s, EnemyKind::Regular);
    let g = add_orc(&mut s, EnemyKind::Giant);

    assert_eq!(s.roster.of(EnemyKind::Regular), &vec![r]);
    assert_eq!(s.roster.of(EnemyKind::Giant), &vec![g]);
    assert!(s.roster.of(EnemyKind::Speed).is_empty());
    assert_eq!(s.roster.len(), 2);
    assert!(s.registry_consistent());
}

#[test]
fn remove_enemy_clears_both_collections() {
    let mut s = make_state();
    let a = add_orc(&mut s, EnemyKind::Speed);
    let b = add_orc(&mut s, EnemyKind::Speed);

    assert!(s.remove_enemy(a));
    assert!(s.enemy(a).is_none());
    assert_eq!(s.roster.speed, vec![b]);
    assert!(s.registry_consistent());
}

#[test]
fn remove_enemy_twice_is_noop() {
    let mut s = make_state();
    let a = add_orc(&mut s, EnemyKind::Regular);
    assert!(s.remove_enemy(a));
    assert!(!s.remove_enemy(a));
    assert!(!s.remove_enemy(EntityId(12_345)));
    assert!(s.enemies.is_empty());
    assert!(s.roster.is_empty());
}

#[test]
fn remove_projectile_by_id() {
    let mut s = make_state();
    let a = s.alloc_id();
    let b = s.alloc_id();
    s.projectiles.push(Projectile::launch(a, 0.0, 0.0, 1.0, 0.0));
    s.projectiles.push(Projectile::launch(b, 0.0, 0.0, 1.0, 0.0));

    assert!(s.remove_projectile(a));
    assert!(!s.remove_projectile(a));
    assert_eq!(s.projectiles.len(), 1);
    assert!(s.projectile(b).is_some());
}

#[test]
fn inconsistent_registry_detected() {
    let mut s = make_state();
    let a = add_orc(&mut s, EnemyKind::Regular);
    s.roster.giant.push(a);
    assert!(!s.registry_consistent());

    s.roster.giant.clear();
    s.roster.regular.clear();
    assert!(!s.registry_consistent());
}

#[test]
fn roster_clear_empties_every_kind() {
    let mut s = make_state();
    for kind in EnemyKind::ALL {
        add_orc(&mut s, kind);
    }
    assert_eq!(s.roster.len(), 3);
    s.roster.clear();
    assert!(s.roster.is_empty());
}
