//! All game entity types. Pure data plus a few geometry accessors, no logic.

use crate::config::GameConfig;

// ── Fixed dimensions ─────────────────────────────────────────────────────────

pub const PLAYER_WIDTH: f32 = 50.0;
pub const PLAYER_HEIGHT: f32 = 50.0;

/// Text carried by every bullet.
pub const BULLET_LABEL: &str = "<*>";
/// Collision footprint of a bullet's label.
pub const BULLET_WIDTH: f32 = 100.0;
pub const BULLET_FONT_SIZE: f32 = 20.0;

pub const LASER_WIDTH: f32 = 300.0;
pub const LASERS_PER_VOLLEY: usize = 5;

/// Hits an armored enemy absorbs before it goes down.
pub const ARMORED_HITS: u32 = 3;

// ── Geometry ─────────────────────────────────────────────────────────────────

/// Axis-aligned box in world units, origin at the top-left.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Strict overlap: boxes that only share an edge do not touch.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && self.x + self.w > other.x
            && self.y < other.y + other.h
            && self.y + self.h > other.y
    }
}

// ── Enums ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EnemyKind {
    /// Fast, 60x60, worth 10.
    Light,
    /// Fastest and smallest, 40x40, worth 20.
    Small,
    /// Slow, 60x60, takes `ARMORED_HITS` hits, worth 30.
    Armored,
}

impl EnemyKind {
    /// Spawn order within a frame.
    pub const ALL: [EnemyKind; 3] = [EnemyKind::Light, EnemyKind::Small, EnemyKind::Armored];

    /// Enemies are square.
    pub fn size(self) -> f32 {
        match self {
            EnemyKind::Light => 60.0,
            EnemyKind::Small => 40.0,
            EnemyKind::Armored => 60.0,
        }
    }

    /// Downward speed in world units per frame.
    pub fn speed(self) -> f32 {
        match self {
            EnemyKind::Light => 2.0,
            EnemyKind::Small => 4.0,
            EnemyKind::Armored => 0.5,
        }
    }

    pub fn kill_score(self) -> i64 {
        match self {
            EnemyKind::Light => 10,
            EnemyKind::Small => 20,
            EnemyKind::Armored => 30,
        }
    }

    pub fn is_armored(self) -> bool {
        self == EnemyKind::Armored
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

/// Something that happened during the last step. The shell uses these to
/// refresh its score text and to log; tests use them to audit the score.
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    BulletFired,
    LaserVolley { count: usize },
    EnemySpawned { kind: EnemyKind },
    EnemyKilled { kind: EnemyKind, points: i64 },
    /// An armored enemy absorbed a hit and is still alive.
    ArmoredHit { hits: u32 },
    EnemyLeaked { kind: EnemyKind, penalty: i64 },
    PlayerHit,
}

impl GameEvent {
    /// Score change carried by this event.
    pub fn score_delta(&self) -> i64 {
        match self {
            GameEvent::EnemyKilled { points, .. } => *points,
            GameEvent::EnemyLeaked { penalty, .. } => -*penalty,
            _ => 0,
        }
    }
}

// ── Entities ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Player {
    /// Horizontally centred, resting on the bottom edge.
    pub fn spawn(config: &GameConfig) -> Self {
        Self {
            x: (config.width - PLAYER_WIDTH) / 2.0,
            y: config.height - PLAYER_HEIGHT,
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// X coordinate weapons are aimed from.
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub x: f32,
    pub y: f32,
    pub label: &'static str,
}

impl Bullet {
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, BULLET_WIDTH, BULLET_FONT_SIZE)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Laser {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Laser {
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    pub kind: EnemyKind,
    /// Only ever grows, and only for `EnemyKind::Armored`.
    pub hits: u32,
}

impl Enemy {
    pub fn new(kind: EnemyKind, x: f32, y: f32) -> Self {
        Self { x, y, kind, hits: 0 }
    }

    pub fn size(&self) -> f32 {
        self.kind.size()
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.size(), self.size())
    }

    /// Hits left before this enemy is destroyed.
    pub fn remaining_hits(&self) -> u32 {
        if self.kind.is_armored() {
            ARMORED_HITS.saturating_sub(self.hits)
        } else {
            1
        }
    }
}

// ── Master game state ────────────────────────────────────────────────────────

/// The entire simulation state. Cloneable so `compute::step` can return a
/// fresh value without touching its input.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub lasers: Vec<Laser>,
    pub enemies: Vec<Enemy>,
    pub score: i64,
    pub status: GameStatus,
    /// Frame-clock time of the last bullet.
    pub last_fire_ms: u64,
    /// Frame-clock time of the last laser volley.
    pub last_laser_ms: u64,
    /// Cooldown shown on the HUD. Counts down a fixed 100 ms per frame and is
    /// not derived from `last_laser_ms`, so it drifts with frame timing.
    pub laser_cooldown_remaining_ms: u64,
    pub frame: u64,
    pub config: GameConfig,
    /// Events produced by the most recent step.
    pub events: Vec<GameEvent>,
}

impl GameState {
    pub fn width(&self) -> f32 {
        self.config.width
    }

    pub fn height(&self) -> f32 {
        self.config.height
    }

    pub fn is_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    pub fn score_text(&self) -> String {
        format!("Score: {}", self.score)
    }

    pub fn cooldown_text(&self) -> String {
        format!(
            "Laser Cooldown: {:.1}s",
            self.laser_cooldown_remaining_ms as f64 / 1000.0
        )
    }
}
