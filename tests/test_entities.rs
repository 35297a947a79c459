use volley_shooter::compute::init_state;
use volley_shooter::config::GameConfig;
use volley_shooter::entities::*;

#[test]
fn rect_overlap_is_strict() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    assert!(a.overlaps(&Rect::new(5.0, 5.0, 10.0, 10.0)));
    assert!(a.overlaps(&Rect::new(2.0, 2.0, 1.0, 1.0))); // contained
    // Shared edges do not count.
    assert!(!a.overlaps(&Rect::new(10.0, 0.0, 10.0, 10.0)));
    assert!(!a.overlaps(&Rect::new(0.0, 10.0, 10.0, 10.0)));
    assert!(!a.overlaps(&Rect::new(-10.0, 0.0, 10.0, 10.0)));
}

#[test]
fn enemy_kind_table() {
    assert_eq!(EnemyKind::Light.size(), 60.0);
    assert_eq!(EnemyKind::Small.size(), 40.0);
    assert_eq!(EnemyKind::Armored.size(), 60.0);

    assert_eq!(EnemyKind::Light.speed(), 2.0);
    assert_eq!(EnemyKind::Small.speed(), 4.0);
    assert_eq!(EnemyKind::Armored.speed(), 0.5);

    assert_eq!(EnemyKind::Light.kill_score(), 10);
    assert_eq!(EnemyKind::Small.kill_score(), 20);
    assert_eq!(EnemyKind::Armored.kill_score(), 30);

    assert!(EnemyKind::Armored.is_armored());
    assert!(!EnemyKind::Light.is_armored());
    assert!(!EnemyKind::Small.is_armored());
}

#[test]
fn remaining_hits_label() {
    let mut armored = Enemy::new(EnemyKind::Armored, 0.0, 0.0);
    assert_eq!(armored.remaining_hits(), 3);
    armored.hits = 2;
    assert_eq!(armored.remaining_hits(), 1);
    assert_eq!(Enemy::new(EnemyKind::Small, 0.0, 0.0).remaining_hits(), 1);
}

#[test]
fn bounds_use_fixed_footprints() {
    let bullet = Bullet { x: 10.0, y: 20.0, label: BULLET_LABEL };
    assert_eq!(bullet.bounds(), Rect::new(10.0, 20.0, 100.0, 20.0));

    let small = Enemy::new(EnemyKind::Small, 5.0, 6.0);
    assert_eq!(small.bounds(), Rect::new(5.0, 6.0, 40.0, 40.0));
}

#[test]
fn only_kills_and_leaks_move_the_score() {
    let kill = GameEvent::EnemyKilled { kind: EnemyKind::Small, points: 20 };
    let leak = GameEvent::EnemyLeaked { kind: EnemyKind::Light, penalty: 10 };
    assert_eq!(kill.score_delta(), 20);
    assert_eq!(leak.score_delta(), -10);
    for quiet in [
        GameEvent::BulletFired,
        GameEvent::LaserVolley { count: 5 },
        GameEvent::EnemySpawned { kind: EnemyKind::Armored },
        GameEvent::ArmoredHit { hits: 2 },
        GameEvent::PlayerHit,
    ] {
        assert_eq!(quiet.score_delta(), 0, "{:?}", quiet);
    }
}

#[test]
fn display_text() {
    let mut s = init_state(GameConfig::default());
    assert_eq!(s.score_text(), "Score: 0");
    assert_eq!(s.cooldown_text(), "Laser Cooldown: 3.0s");

    s.laser_cooldown_remaining_ms = 0;
    assert_eq!(s.cooldown_text(), "Laser Cooldown: 0.0s");

    s.score = 120;
    s.laser_cooldown_remaining_ms = 1300;
    assert_eq!(s.score_text(), "Score: 120");
    assert_eq!(s.cooldown_text(), "Laser Cooldown: 1.3s");
}

#[test]
fn game_state_clone_is_independent() {
    let original = init_state(GameConfig::default());
    let mut cloned = original.clone();

    // Mutating the clone must not affect the original
    cloned.player.x = 99.0;
    cloned.score = 999;
    cloned
        .enemies
        .push(Enemy::new(EnemyKind::Light, 5.0, 5.0));

    assert_eq!(original.player.x, 375.0);
    assert_eq!(original.score, 0);
    assert!(original.enemies.is_empty());
}
