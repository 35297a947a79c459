//! Pure game-logic functions.
//!
//! Every public function takes an immutable reference to the current
//! `GameState` (plus the frame clock or an RNG handle where needed) and
//! returns a brand-new `GameState`. Side effects are limited to the injected
//! RNG.

use rand::Rng;

use crate::config::GameConfig;
use crate::entities::{
    Bullet, Enemy, EnemyKind, GameEvent, GameState, GameStatus, Laser, Player, ARMORED_HITS,
    BULLET_LABEL, LASERS_PER_VOLLEY, LASER_WIDTH,
};
use crate::input::{Action, InputSet};

// ── Per-frame constants ──────────────────────────────────────────────────────

pub const PLAYER_STEP: f32 = 5.0;
pub const BULLET_STEP: f32 = 5.0;
pub const LASER_STEP: f32 = 10.0;

/// Amount the HUD cooldown counts down each frame.
pub const COOLDOWN_TICK_MS: u64 = 100;

/// Score lost when an enemy reaches the bottom.
pub const LEAK_PENALTY: i64 = 10;

/// Bullets leave the paddle this far left of its centre.
const BULLET_EMIT_OFFSET: f32 = 20.0;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial game state for a given configuration.
///
/// The clock starts at 0 and so does `last_laser_ms`, so the laser is first
/// ready after a full cooldown. The HUD starts at the full cooldown to match.
pub fn init_state(config: GameConfig) -> GameState {
    let recharging_ms = config.laser_cooldown_ms;
    GameState {
        player: Player::spawn(&config),
        bullets: Vec::new(),
        lasers: Vec::new(),
        enemies: Vec::new(),
        score: 0,
        status: GameStatus::Playing,
        last_fire_ms: 0,
        last_laser_ms: 0,
        laser_cooldown_remaining_ms: recharging_ms,
        frame: 0,
        config,
        events: Vec::new(),
    }
}

/// Start a new run after a game over. A running game is returned unchanged.
///
/// Weapon timestamps carry over, so a volley fired just before the crash is
/// still recharging afterwards.
pub fn reset(state: &GameState) -> GameState {
    if !state.is_over() {
        return state.clone();
    }
    GameState {
        player: Player::spawn(&state.config),
        bullets: Vec::new(),
        lasers: Vec::new(),
        enemies: Vec::new(),
        score: 0,
        status: GameStatus::Playing,
        laser_cooldown_remaining_ms: 0,
        events: Vec::new(),
        ..state.clone()
    }
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

pub fn move_player_left(state: &GameState) -> GameState {
    let mut next = state.clone();
    shift_player_left(&mut next.player);
    next
}

pub fn move_player_right(state: &GameState) -> GameState {
    let mut next = state.clone();
    let width = next.width();
    shift_player_right(&mut next.player, width);
    next
}

/// Fire one bullet if the debounce interval has passed since the last one.
pub fn fire_bullet(state: &GameState, now_ms: u64) -> GameState {
    let mut next = state.clone();
    try_fire_bullet(&mut next, now_ms);
    next
}

/// Fire a laser volley if the laser has recharged.
pub fn fire_laser_volley(state: &GameState, now_ms: u64) -> GameState {
    let mut next = state.clone();
    try_fire_laser(&mut next, now_ms);
    next
}

pub fn overlaps_player(state: &GameState, enemy: &Enemy) -> bool {
    state.player.bounds().overlaps(&enemy.bounds())
}

fn shift_player_left(player: &mut Player) {
    if player.x > 0.0 {
        player.x = (player.x - PLAYER_STEP).max(0.0);
    }
}

fn shift_player_right(player: &mut Player, width: f32) {
    if player.x + player.width < width {
        player.x = (player.x + PLAYER_STEP).min(width - player.width);
    }
}

fn try_fire_bullet(state: &mut GameState, now_ms: u64) {
    if now_ms.saturating_sub(state.last_fire_ms) <= state.config.fire_interval_ms {
        return;
    }
    state.bullets.push(Bullet {
        x: state.player.center_x() - BULLET_EMIT_OFFSET,
        y: state.player.y,
        label: BULLET_LABEL,
    });
    state.last_fire_ms = now_ms;
    state.events.push(GameEvent::BulletFired);
}

fn try_fire_laser(state: &mut GameState, now_ms: u64) {
    if now_ms.saturating_sub(state.last_laser_ms) <= state.config.laser_cooldown_ms {
        return;
    }
    let laser = Laser {
        x: state.player.center_x() - LASER_WIDTH / 2.0,
        y: 0.0,
        width: LASER_WIDTH,
        height: state.height(),
    };
    state
        .lasers
        .extend(std::iter::repeat(laser).take(LASERS_PER_VOLLEY));
    state.last_laser_ms = now_ms;
    state.laser_cooldown_remaining_ms = state.config.laser_cooldown_ms;
    state.events.push(GameEvent::LaserVolley {
        count: LASERS_PER_VOLLEY,
    });
}

// ── Per-frame step (nearly pure, RNG is injected) ──────────────────────────

/// Advance the simulation by one frame.
///
/// `now_ms` is the shell's frame clock and must never go backwards. All
/// randomness comes through `rng`, so a seeded RNG replays a run exactly.
/// A finished game is returned unchanged until `reset`.
pub fn step(state: &GameState, input: &InputSet, now_ms: u64, rng: &mut impl Rng) -> GameState {
    if state.is_over() {
        return state.clone();
    }

    let mut next = GameState {
        frame: state.frame + 1,
        events: Vec::new(),
        ..state.clone()
    };

    // ── 1. Player movement ───────────────────────────────────────────────────
    if input.is_held(Action::MoveLeft) {
        shift_player_left(&mut next.player);
    }
    if input.is_held(Action::MoveRight) {
        let width = next.width();
        shift_player_right(&mut next.player, width);
    }

    // ── 2–3. Weapons ─────────────────────────────────────────────────────────
    if input.is_held(Action::Fire) {
        try_fire_bullet(&mut next, now_ms);
    }
    if input.is_held(Action::Laser) {
        try_fire_laser(&mut next, now_ms);
    }

    // ── 4. HUD cooldown ──────────────────────────────────────────────────────
    next.laser_cooldown_remaining_ms = next
        .laser_cooldown_remaining_ms
        .saturating_sub(COOLDOWN_TICK_MS);

    // ── 5–6. Projectile motion ───────────────────────────────────────────────
    advance_projectiles(&mut next);

    // ── 7. Spawn ─────────────────────────────────────────────────────────────
    spawn_enemies(&mut next, rng);

    // ── 8–9. Enemy motion & leaks ────────────────────────────────────────────
    advance_enemies(&mut next);

    // ── 10. Enemy ↔ player ───────────────────────────────────────────────────
    // Game over short-circuits the rest of the frame: the colliding enemy
    // stays where it is and no weapon hits are scored.
    if next.enemies.iter().any(|e| overlaps_player(&next, e)) {
        next.status = GameStatus::GameOver;
        next.events.push(GameEvent::PlayerHit);
        return next;
    }

    // ── 11–12. Weapons ↔ enemies ─────────────────────────────────────────────
    resolve_bullet_hits(&mut next);
    resolve_laser_hits(&mut next);

    next
}

fn advance_projectiles(state: &mut GameState) {
    let height = state.height();

    state.bullets = state
        .bullets
        .iter()
        .map(|b| Bullet {
            y: b.y - BULLET_STEP,
            ..b.clone()
        })
        .filter(|b| b.y > 0.0)
        .collect();

    state.lasers = state
        .lasers
        .iter()
        .map(|l| Laser {
            y: l.y + LASER_STEP,
            ..l.clone()
        })
        .filter(|l| l.y < height)
        .collect();
}

/// One independent draw per kind, in `EnemyKind::ALL` order.
fn spawn_enemies(state: &mut GameState, rng: &mut impl Rng) {
    for kind in EnemyKind::ALL {
        if rng.gen::<f64>() < state.config.spawn.for_kind(kind) {
            let x = rng.gen::<f32>() * (state.width() - kind.size());
            state.enemies.push(Enemy::new(kind, x, 0.0));
            state.events.push(GameEvent::EnemySpawned { kind });
        }
    }
}

/// Move enemies down and charge the leak penalty for every one whose bottom
/// edge is now past the playfield. This is the only way an enemy leaves
/// through the bottom, so each leak is charged exactly once.
fn advance_enemies(state: &mut GameState) {
    let height = state.height();
    for enemy in &mut state.enemies {
        enemy.y += enemy.kind.speed();
    }

    let (kept, leaked): (Vec<Enemy>, Vec<Enemy>) = std::mem::take(&mut state.enemies)
        .into_iter()
        .partition(|e| e.y + e.size() <= height);
    state.enemies = kept;

    for enemy in leaked {
        state.score -= LEAK_PENALTY;
        state.events.push(GameEvent::EnemyLeaked {
            kind: enemy.kind,
            penalty: LEAK_PENALTY,
        });
    }
}

// ── Collision resolution ─────────────────────────────────────────────────────
//
// Both passes mark bullets/lasers/enemies for removal while iterating
// read-only, then filter each collection once. Enemies already marked are
// skipped so nothing is scored twice.

fn resolve_bullet_hits(state: &mut GameState) {
    let GameState {
        bullets,
        enemies,
        score,
        events,
        ..
    } = state;

    let mut spent = vec![false; bullets.len()];
    let mut destroyed = vec![false; enemies.len()];

    for (bi, bullet) in bullets.iter().enumerate() {
        let footprint = bullet.bounds();
        for (ei, enemy) in enemies.iter_mut().enumerate() {
            if destroyed[ei] || !footprint.overlaps(&enemy.bounds()) {
                continue;
            }
            if enemy.kind.is_armored() {
                // Armor does not stop the bullet; it keeps flying and can
                // hit the same enemy again next frame.
                destroyed[ei] = absorb_armored_hit(enemy, score, events);
            } else {
                destroyed[ei] = true;
                spent[bi] = true;
                award_kill(enemy.kind, score, events);
                break;
            }
        }
    }

    *bullets = keep_unmarked(std::mem::take(bullets), &spent);
    *enemies = keep_unmarked(std::mem::take(enemies), &destroyed);
}

fn resolve_laser_hits(state: &mut GameState) {
    let GameState {
        lasers,
        enemies,
        score,
        events,
        ..
    } = state;

    let mut spent = vec![false; lasers.len()];
    let mut destroyed = vec![false; enemies.len()];

    for (li, laser) in lasers.iter().enumerate() {
        let beam = laser.bounds();
        for (ei, enemy) in enemies.iter_mut().enumerate() {
            if destroyed[ei] || !beam.overlaps(&enemy.bounds()) {
                continue;
            }
            destroyed[ei] = if enemy.kind.is_armored() {
                absorb_armored_hit(enemy, score, events)
            } else {
                award_kill(enemy.kind, score, events);
                true
            };
            // Unlike bullets, a laser is used up by any contact.
            spent[li] = true;
            break;
        }
    }

    *lasers = keep_unmarked(std::mem::take(lasers), &spent);
    *enemies = keep_unmarked(std::mem::take(enemies), &destroyed);
}

/// Returns `true` when this hit destroys the enemy.
fn absorb_armored_hit(enemy: &mut Enemy, score: &mut i64, events: &mut Vec<GameEvent>) -> bool {
    enemy.hits += 1;
    if enemy.hits >= ARMORED_HITS {
        award_kill(enemy.kind, score, events);
        true
    } else {
        events.push(GameEvent::ArmoredHit { hits: enemy.hits });
        false
    }
}

fn award_kill(kind: EnemyKind, score: &mut i64, events: &mut Vec<GameEvent>) {
    let points = kind.kill_score();
    *score += points;
    events.push(GameEvent::EnemyKilled { kind, points });
}

fn keep_unmarked<T>(items: Vec<T>, marked: &[bool]) -> Vec<T> {
    items
        .into_iter()
        .zip(marked)
        .filter(|&(_, &gone)| !gone)
        .map(|(item, _)| item)
        .collect()
}
