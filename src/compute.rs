/// Game-logic functions.
///
/// Every public function works on a borrowed `Session` (or one of its
/// entities) and, where randomness is needed, an injected RNG handle so
/// callers control determinism.  No terminal I/O happens here.

use log::debug;
use rand::Rng;

use crate::entities::{
    Bullet, Enemy, FrameReport, MoveInput, Player, Rect, Session, BULLET_HEIGHT, BULLET_SPEED,
    BULLET_WIDTH, CONTACT_DAMAGE, ENEMY_HEIGHT, ENEMY_MAX_SPEED, ENEMY_MIN_SPEED,
    ENEMY_SPAWN_Y_MAX, ENEMY_SPAWN_Y_MIN, ENEMY_WIDTH, HEIGHT, INITIAL_ENEMIES, MAX_HEALTH,
    PLAYER_HEIGHT, PLAYER_SPEED, PLAYER_WIDTH, SCORE_PER_KILL, SHOOT_DELAY_MS, WIDTH,
};

// ── Constructors ─────────────────────────────────────────────────────────────

/// Player centred horizontally, 50 px above the bottom edge.
pub fn spawn_player(now: u64) -> Player {
    Player {
        rect: Rect::centered_on(WIDTH / 2, HEIGHT - 50, PLAYER_WIDTH, PLAYER_HEIGHT),
        speed: PLAYER_SPEED,
        health: MAX_HEALTH,
        last_shot: now,
        shoot_delay: SHOOT_DELAY_MS,
    }
}

/// A new enemy somewhere in the band above the screen, with a random speed.
pub fn spawn_enemy(rng: &mut impl Rng) -> Enemy {
    let (x, y) = random_spawn_point(rng);
    Enemy {
        rect: Rect::new(x, y, ENEMY_WIDTH, ENEMY_HEIGHT),
        speed: rng.gen_range(ENEMY_MIN_SPEED..=ENEMY_MAX_SPEED),
    }
}

/// Bullet centred on `(cx, cy)` — the ship's top-centre when fired.
pub fn spawn_bullet(cx: i32, cy: i32) -> Bullet {
    Bullet {
        rect: Rect::centered_on(cx, cy, BULLET_WIDTH, BULLET_HEIGHT),
        speed: BULLET_SPEED,
    }
}

/// Fresh session: one player and `INITIAL_ENEMIES` enemies, no bullets.
pub fn new_session(now: u64, rng: &mut impl Rng) -> Session {
    Session {
        player: spawn_player(now),
        enemies: (0..INITIAL_ENEMIES).map(|_| spawn_enemy(rng)).collect(),
        bullets: Vec::new(),
        score: 0,
        frame: 0,
    }
}

fn random_spawn_point(rng: &mut impl Rng) -> (i32, i32) {
    let x = rng.gen_range(0..=WIDTH - ENEMY_WIDTH);
    let y = rng.gen_range(ENEMY_SPAWN_Y_MIN..ENEMY_SPAWN_Y_MAX);
    (x, y)
}

// ── Per-entity updates ───────────────────────────────────────────────────────

/// Apply held directions, then keep the ship fully on screen.
pub fn update_player(player: &mut Player, input: &MoveInput) {
    let r = &mut player.rect;
    if input.left {
        r.x -= player.speed;
    }
    if input.right {
        r.x += player.speed;
    }
    if input.up {
        r.y -= player.speed;
    }
    if input.down {
        r.y += player.speed;
    }
    r.x = r.x.clamp(0, WIDTH - r.w);
    r.y = r.y.clamp(0, HEIGHT - r.h);
}

/// Fire a bullet if the cooldown has elapsed.  Returns `true` when fired.
pub fn player_shoot(session: &mut Session, now: u64) -> bool {
    let player = &mut session.player;
    if now.saturating_sub(player.last_shot) < player.shoot_delay {
        return false;
    }
    player.last_shot = now;
    let bullet = spawn_bullet(player.rect.center_x(), player.rect.top());
    session.bullets.push(bullet);
    true
}

/// Move down; once fully below the screen, wrap back to the spawn band.
pub fn update_enemy(enemy: &mut Enemy, rng: &mut impl Rng) {
    enemy.rect.y += enemy.speed;
    if enemy.rect.top() > HEIGHT {
        let (x, y) = random_spawn_point(rng);
        enemy.rect.x = x;
        enemy.rect.y = y;
    }
}

/// Move every bullet up and drop the ones fully above the top edge.
pub fn update_bullets(bullets: &mut Vec<Bullet>) {
    bullets.retain_mut(|b| {
        b.rect.y -= b.speed;
        b.rect.bottom() >= 0
    });
}

// ── Collision pass ───────────────────────────────────────────────────────────

/// Each bullet that overlaps an enemy takes out the first such enemy.
/// Every destroyed pair scores and is replaced by one new enemy, appended
/// after the pass.  Returns the number of pairs destroyed.
pub fn resolve_bullet_hits(session: &mut Session, rng: &mut impl Rng) -> u32 {
    let Session { bullets, enemies, .. } = &mut *session;
    let mut kills = 0;

    bullets.retain(|bullet| {
        match enemies.iter().position(|e| e.rect.intersects(&bullet.rect)) {
            Some(i) => {
                enemies.remove(i);
                kills += 1;
                false
            }
            None => true,
        }
    });

    for _ in 0..kills {
        session.enemies.push(spawn_enemy(rng));
    }
    session.score += kills * SCORE_PER_KILL;
    kills
}

/// Damage is applied once per frame, however many enemies overlap.
/// Returns `true` if any enemy touched the player.
pub fn resolve_player_contact(session: &mut Session) -> bool {
    let player_rect = session.player.rect;
    let hit = session
        .enemies
        .iter()
        .any(|e| e.rect.intersects(&player_rect));
    if hit {
        let health = &mut session.player.health;
        *health = (*health - CONTACT_DAMAGE).max(0.0);
    }
    hit
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the simulation by one frame: movement for every entity, then
/// the bullet and contact collision passes, in that order.
pub fn tick(session: &mut Session, input: &MoveInput, rng: &mut impl Rng) -> FrameReport {
    update_player(&mut session.player, input);
    for enemy in &mut session.enemies {
        update_enemy(enemy, rng);
    }
    update_bullets(&mut session.bullets);

    let kills = resolve_bullet_hits(session, rng);
    if kills > 0 {
        debug!("frame {}: {} kill(s), score {}", session.frame, kills, session.score);
    }
    let player_hit = resolve_player_contact(session);

    session.frame += 1;

    FrameReport {
        kills,
        player_hit,
        player_dead: session.player.health <= 0.0,
    }
}
