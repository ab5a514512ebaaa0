//! Clip-based animation state shared by every actor.
//!
//! An `Animation` only counts ticks and frames; which pixels a frame maps to
//! is the renderer's business.

use crate::constants::FRAME_MS;

/// A named ordered sequence of frames for one action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Clip {
    Idle,
    MoveLeft,
    MoveRight,
    Jump,
    Walk,
    Attack,
    Hurt,
    Die,
    Shoot,
    HitOrc,
    HitFloor,
}

impl Clip {
    pub fn name(self) -> &'static str {
        match self {
            Clip::Idle => "idle",
            Clip::MoveLeft => "moveLeft",
            Clip::MoveRight => "moveRight",
            Clip::Jump => "jump",
            Clip::Walk => "walk",
            Clip::Attack => "attack",
            Clip::Hurt => "hurt",
            Clip::Die => "die",
            Clip::Shoot => "shoot",
            Clip::HitOrc => "hitOrc",
            Clip::HitFloor => "hitFloor",
        }
    }

    /// Terminal clips play once and hold their final frame.
    pub fn is_terminal(self) -> bool {
        matches!(self, Clip::Die | Clip::HitOrc | Clip::HitFloor)
    }
}

/// Which sprite sheet family an animation draws from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClipSet {
    Player,
    Orc,
    Projectile,
}

impl ClipSet {
    /// Frame count of `clip` in this set. Clips a set has no sheet for are a
    /// single static pose.
    pub fn frame_count(self, clip: Clip) -> usize {
        match (self, clip) {
            (
                ClipSet::Player,
                Clip::Idle | Clip::MoveLeft | Clip::MoveRight | Clip::Jump | Clip::Hurt | Clip::Die,
            ) => 5,
            (ClipSet::Orc, Clip::Idle | Clip::Walk | Clip::Attack | Clip::Hurt | Clip::Die) => 7,
            (ClipSet::Projectile, Clip::Shoot | Clip::HitOrc | Clip::HitFloor) => 6,
            _ => 1,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Animation {
    pub set: ClipSet,
    pub clip: Clip,
    /// Always in `0..frame_count(clip)`.
    pub frame: usize,
    /// Ticks spent on the current frame.
    pub counter: u32,
    /// Ticks per frame.
    pub frame_delay: u32,
}

impl Animation {
    pub fn new(set: ClipSet, clip: Clip, frame_delay: u32) -> Self {
        Self {
            set,
            clip,
            frame: 0,
            counter: 0,
            frame_delay: frame_delay.max(1),
        }
    }

    pub fn frame_count(&self) -> usize {
        self.set.frame_count(self.clip)
    }

    /// Switch to `clip`. Re-selecting the current clip keeps its progress.
    pub fn set(&mut self, clip: Clip) {
        if self.clip != clip {
            self.clip = clip;
            self.frame = 0;
            self.counter = 0;
        }
    }

    /// One simulation tick.
    pub fn advance(&mut self) {
        self.counter += 1;
        if self.counter < self.frame_delay {
            return;
        }
        self.counter = 0;

        let count = self.frame_count();
        if self.clip.is_terminal() {
            self.frame = (self.frame + 1).min(count - 1);
        } else {
            self.frame = (self.frame + 1) % count;
        }
    }

    pub fn is_on_last_frame(&self) -> bool {
        self.frame == self.frame_count() - 1
    }

    /// Whether the entity is visibly on the final frame of `clip`.
    pub fn shows_final_frame_of(&self, clip: Clip) -> bool {
        self.clip == clip && self.is_on_last_frame()
    }

    /// Ticks a terminal `clip` needs to play through: frames × frame delay.
    pub fn play_ticks(&self, clip: Clip) -> u64 {
        self.set.frame_count(clip) as u64 * u64::from(self.frame_delay)
    }

    /// Nominal wall-clock length of the die clip.
    pub fn death_duration_ms(&self) -> f64 {
        self.play_ticks(Clip::Die) as f64 * FRAME_MS
    }
}

/// Wall-clock death check: `death_time_ms` is `None` while alive.
///
/// Independent of tick cadence, so a slow frame rate never blocks removal.
pub fn death_animation_complete(anim: &Animation, death_time_ms: Option<u64>, now_ms: u64) -> bool {
    match death_time_ms {
        Some(t) => now_ms.saturating_sub(t) as f64 >= anim.death_duration_ms(),
        None => false,
    }
}
