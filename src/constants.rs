//! Build-time gameplay tuning. Per-kind enemy values live on `EnemyKind`.

// Nominal display refresh
pub const FRAME_MS: f64 = 1000.0 / 60.0;

// Ticks held per animation frame (every entity)
pub const FRAME_DELAY: u32 = 5;

// Default arena, in world pixels
pub const DEFAULT_ARENA_WIDTH: f32 = 1280.0;
pub const DEFAULT_ARENA_HEIGHT: f32 = 720.0;

// Distance from the bottom of the arena to the floor line
pub const FLOOR_MARGIN: f32 = 100.0;

// Base sprite box; orcs scale from it
pub const SPRITE_WIDTH: f32 = 100.0;
pub const SPRITE_HEIGHT: f32 = 100.0;

// Player
pub const PLAYER_SPEED: f32 = 5.0;
pub const PLAYER_GRAVITY: f32 = 0.5;
pub const PLAYER_JUMP_STRENGTH: f32 = -10.0;
pub const PLAYER_MAX_JUMPS: u32 = 2;
pub const PLAYER_HITPOINTS: u32 = 100;

// Damage taken per hurt(), player and orcs alike
pub const HURT_DAMAGE: u32 = 10;

// Orcs
pub const ATTACK_COOLDOWN_MS: u64 = 2000;

// Projectiles
pub const PROJECTILE_SPEED: f32 = 17.0;
pub const PROJECTILE_GRAVITY: f32 = 0.3;
pub const PROJECTILE_RADIUS: f32 = 20.0;
