//! All game entity types: plain data plus identity bookkeeping.
//!
//! Behaviour lives in `compute`; everything here is state that the
//! simulation clones, mutates and hands back.

use crate::animation::{Animation, Clip, ClipSet};
use crate::constants::{
    DEFAULT_ARENA_HEIGHT, DEFAULT_ARENA_WIDTH, FLOOR_MARGIN, FRAME_DELAY, PLAYER_HITPOINTS,
    PLAYER_MAX_JUMPS, SPRITE_HEIGHT, SPRITE_WIDTH,
};

/// Stable identity of an enemy or projectile. Handed out by
/// `GameState::alloc_id` and never reused within a process.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EnemyKind {
    Regular,
    Speed,
    Giant,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 3] = [EnemyKind::Regular, EnemyKind::Speed, EnemyKind::Giant];

    /// Horizontal walk speed, pixels per tick.
    pub fn speed(self) -> f32 {
        match self {
            Self::Regular => 1.0,
            Self::Speed => 4.0,
            Self::Giant => 0.5,
        }
    }

    pub fn hitpoints(self) -> u32 {
        match self {
            Self::Regular => 20,
            Self::Speed => 20,
            Self::Giant => 50,
        }
    }

    pub fn width(self) -> f32 {
        match self {
            Self::Regular => SPRITE_WIDTH,
            Self::Speed => SPRITE_WIDTH - 10.0,
            Self::Giant => SPRITE_WIDTH * 2.0,
        }
    }

    pub fn height(self) -> f32 {
        match self {
            Self::Regular | Self::Speed => SPRITE_HEIGHT,
            Self::Giant => SPRITE_HEIGHT * 2.0,
        }
    }

    /// Score awarded for the kill.
    pub fn score_value(self) -> u32 {
        match self {
            Self::Regular => 75,
            Self::Speed => 125,
            Self::Giant => 200,
        }
    }

    pub fn spawn_period_ms(self) -> u64 {
        match self {
            Self::Regular => 3000,
            Self::Speed => 8000,
            Self::Giant => 15000,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Regular => "regular",
            Self::Speed => "speed",
            Self::Giant => "giant",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

// ── Arena ─────────────────────────────────────────────────────────────────────

/// Playfield bounds in world pixels. `(0, 0)` is the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Y of the floor line; actors stand with their bottom edge on it.
    pub fn floor_y(&self) -> f32 {
        self.height - FLOOR_MARGIN
    }

    /// Horizontal centre.
    pub fn origin_x(&self) -> f32 {
        self.width / 2.0
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new(DEFAULT_ARENA_WIDTH, DEFAULT_ARENA_HEIGHT)
    }
}

// ── Input ─────────────────────────────────────────────────────────────────────

/// Held state of the continuous actions for one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub width: f32,
    pub height: f32,
    pub on_ground: bool,
    pub jump_count: u32,
    pub max_jumps: u32,
    pub hitpoints: u32,
    pub alive: bool,
    pub death_time_ms: Option<u64>,
    pub facing_right: bool,
    pub anim: Animation,
}

impl Player {
    /// Fresh player at the arena's centre with its top edge half a sprite
    /// above the floor line; the first update snaps it onto the floor.
    pub fn spawn(arena: &Arena) -> Self {
        Self {
            x: arena.origin_x() - SPRITE_WIDTH / 2.0,
            y: arena.floor_y() - SPRITE_HEIGHT / 2.0,
            vx: 0.0,
            vy: 0.0,
            width: SPRITE_WIDTH,
            height: SPRITE_HEIGHT,
            on_ground: false,
            jump_count: 0,
            max_jumps: PLAYER_MAX_JUMPS,
            hitpoints: PLAYER_HITPOINTS,
            alive: true,
            death_time_ms: None,
            facing_right: true,
            anim: Animation::new(ClipSet::Player, Clip::Idle, FRAME_DELAY),
        }
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

// ── Enemies ───────────────────────────────────────────────────────────────────

/// One orc. Per-kind differences come from `kind`'s tuning table.
#[derive(Clone, Debug)]
pub struct Enemy {
    pub id: EntityId,
    pub kind: EnemyKind,
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub hitpoints: u32,
    pub alive: bool,
    pub death_time_ms: Option<u64>,
    /// `None` until the first landed attack.
    pub last_attack_ms: Option<u64>,
    pub facing_right: bool,
    pub anim: Animation,
}

impl Enemy {
    pub fn new(id: EntityId, kind: EnemyKind, x: f32, y: f32) -> Self {
        Self {
            id,
            kind,
            x,
            y,
            vx: 0.0,
            width: kind.width(),
            height: kind.height(),
            speed: kind.speed(),
            hitpoints: kind.hitpoints(),
            alive: true,
            death_time_ms: None,
            last_attack_ms: None,
            facing_right: true,
            anim: Animation::new(ClipSet::Orc, Clip::Idle, FRAME_DELAY),
        }
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Per-kind id lists, kept in lock-step with `GameState::enemies`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EnemyRoster {
    pub regular: Vec<EntityId>,
    pub speed: Vec<EntityId>,
    pub giant: Vec<EntityId>,
}

impl EnemyRoster {
    pub fn of(&self, kind: EnemyKind) -> &Vec<EntityId> {
        match kind {
            EnemyKind::Regular => &self.regular,
            EnemyKind::Speed => &self.speed,
            EnemyKind::Giant => &self.giant,
        }
    }

    pub fn of_mut(&mut self, kind: EnemyKind) -> &mut Vec<EntityId> {
        match kind {
            EnemyKind::Regular => &mut self.regular,
            EnemyKind::Speed => &mut self.speed,
            EnemyKind::Giant => &mut self.giant,
        }
    }

    pub fn len(&self) -> usize {
        self.regular.len() + self.speed.len() + self.giant.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.regular.clear();
        self.speed.clear();
        self.giant.clear();
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Projectile {
    pub id: EntityId,
    /// Top-left of the projectile's bounding square.
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub radius: f32,
    pub anim: Animation,
}

/// Request to drop a projectile once `frame` reaches `due_frame`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingRemoval {
    pub id: EntityId,
    pub due_frame: u64,
}

// ── Spawning ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct SpawnTimer {
    pub kind: EnemyKind,
    pub period_ms: u64,
    pub next_due_ms: u64,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire world.  Cloneable so pure update functions can return a new
/// copy without mutating their input.
#[derive(Clone, Debug)]
pub struct GameState {
    pub arena: Arena,
    pub player: Player,
    /// Unified active-enemy collection.
    pub enemies: Vec<Enemy>,
    /// Per-kind bookkeeping for the same enemies.
    pub roster: EnemyRoster,
    pub projectiles: Vec<Projectile>,
    pub pending_removals: Vec<PendingRemoval>,
    pub spawn_timers: Vec<SpawnTimer>,
    pub score: u32,
    /// Best score of this process; folded in on restart.
    pub best_score: u32,
    pub paused: bool,
    pub status: GameStatus,
    /// Simulated (unpaused) ticks since the round began.
    pub frame: u64,
    pub next_id: u64,
}

impl GameState {
    pub fn alloc_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn enemy(&self, id: EntityId) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.id == id)
    }

    pub fn projectile(&self, id: EntityId) -> Option<&Projectile> {
        self.projectiles.iter().find(|p| p.id == id)
    }

    /// Add an enemy to the unified collection and its kind's roster.
    pub fn insert_enemy(&mut self, enemy: Enemy) {
        self.roster.of_mut(enemy.kind).push(enemy.id);
        self.enemies.push(enemy);
    }

    /// Remove an enemy from every collection by identity. Unknown ids are
    /// ignored. Returns whether anything was removed.
    pub fn remove_enemy(&mut self, id: EntityId) -> bool {
        let Some(pos) = self.enemies.iter().position(|e| e.id == id) else {
            return false;
        };
        let enemy = self.enemies.remove(pos);
        self.roster.of_mut(enemy.kind).retain(|&r| r != id);
        true
    }

    /// Remove a projectile by identity. Unknown ids are ignored.
    pub fn remove_projectile(&mut self, id: EntityId) -> bool {
        let before = self.projectiles.len();
        self.projectiles.retain(|p| p.id != id);
        self.projectiles.len() != before
    }

    /// True when every enemy is listed exactly once in the roster of its own
    /// kind and the roster holds nothing else.
    pub fn registry_consistent(&self) -> bool {
        if self.roster.len() != self.enemies.len() {
            return false;
        }
        self.enemies.iter().all(|e| {
            EnemyKind::ALL.iter().all(|&k| {
                let hits = self.roster.of(k).iter().filter(|&&r| r == e.id).count();
                hits == usize::from(k == e.kind)
            })
        })
    }
}
