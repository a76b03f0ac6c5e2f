/// All game entity types and world constants — pure data, no game logic.

// ── World ─────────────────────────────────────────────────────────────────────

/// Logical play-field size in pixels.  The terminal is scaled onto this.
pub const WIDTH: i32 = 800;
pub const HEIGHT: i32 = 600;

// ── Player ────────────────────────────────────────────────────────────────────

pub const PLAYER_WIDTH: i32 = 50;
pub const PLAYER_HEIGHT: i32 = 40;
pub const PLAYER_SPEED: i32 = 8;
pub const MAX_HEALTH: f32 = 100.0;
/// Minimum gap between two shots, in milliseconds.
pub const SHOOT_DELAY_MS: u64 = 250;
/// Health lost on every frame in which any enemy touches the player.
pub const CONTACT_DAMAGE: f32 = 0.5;

// ── Enemies ───────────────────────────────────────────────────────────────────

pub const ENEMY_WIDTH: i32 = 50;
pub const ENEMY_HEIGHT: i32 = 40;
pub const ENEMY_MIN_SPEED: i32 = 1;
pub const ENEMY_MAX_SPEED: i32 = 4;
/// Spawn band above the screen (upper bound exclusive).
pub const ENEMY_SPAWN_Y_MIN: i32 = -100;
pub const ENEMY_SPAWN_Y_MAX: i32 = -40;
pub const INITIAL_ENEMIES: usize = 8;
pub const SCORE_PER_KILL: u32 = 10;

// ── Bullets ───────────────────────────────────────────────────────────────────

pub const BULLET_WIDTH: i32 = 8;
pub const BULLET_HEIGHT: i32 = 20;
pub const BULLET_SPEED: i32 = 10;

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle in world pixels.  `(x, y)` is the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Rect { x, y, w, h }
    }

    /// Build a rect of the given size whose centre sits on `(cx, cy)`.
    pub const fn centered_on(cx: i32, cy: i32, w: i32, h: i32) -> Self {
        Rect { x: cx - w / 2, y: cy - h / 2, w, h }
    }

    pub const fn top(&self) -> i32 {
        self.y
    }

    pub const fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub const fn left(&self) -> i32 {
        self.x
    }

    pub const fn right(&self) -> i32 {
        self.x + self.w
    }

    pub const fn center_x(&self) -> i32 {
        self.x + self.w / 2
    }

    pub const fn center_y(&self) -> i32 {
        self.y + self.h / 2
    }

    /// Strict overlap: rects that merely share an edge do not collide.
    pub const fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Half-open containment, matching how pixels are addressed.
    pub const fn contains(&self, px: i32, py: i32) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }
}

// ── Player, enemy & projectile ────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    pub rect: Rect,
    pub speed: i32,
    /// Always within `0.0..=MAX_HEALTH`.
    pub health: f32,
    /// Timestamp (ms) of the last shot, or of the session start.
    pub last_shot: u64,
    pub shoot_delay: u64,
}

#[derive(Clone, Debug)]
pub struct Enemy {
    pub rect: Rect,
    /// Pixels per frame, fixed at spawn.
    pub speed: i32,
}

#[derive(Clone, Debug)]
pub struct Bullet {
    pub rect: Rect,
    /// Pixels per frame, upward.
    pub speed: i32,
}

// ── Session ───────────────────────────────────────────────────────────────────

/// One run of the play screen, from spawn until death or abort.
/// Owns every live entity; update functions borrow it mutably.
#[derive(Clone, Debug)]
pub struct Session {
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub bullets: Vec<Bullet>,
    pub score: u32,
    pub frame: u64,
}

/// Directions held during the current frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MoveInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

/// What happened during one call to `compute::tick`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Bullet–enemy pairs destroyed this frame.
    pub kills: u32,
    /// Any enemy overlapped the player this frame.
    pub player_hit: bool,
    /// Health reached zero; the session is over.
    pub player_dead: bool,
}
