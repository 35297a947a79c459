use std::path::PathBuf;

use volley_shooter::config::{GameConfig, SpawnRates};
use volley_shooter::entities::EnemyKind;
use volley_shooter::error::ConfigError;

fn temp_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "volley_shooter_{}_{}.json",
        name,
        std::process::id()
    ));
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn defaults_match_the_classic_game() {
    let c = GameConfig::default();
    assert_eq!(c.width, 800.0);
    assert_eq!(c.height, 600.0);
    assert_eq!(c.fire_interval_ms, 300);
    assert_eq!(c.laser_cooldown_ms, 3000);
    assert_eq!(c.spawn.for_kind(EnemyKind::Light), 0.02);
    assert_eq!(c.spawn.for_kind(EnemyKind::Small), 0.01);
    assert_eq!(c.spawn.for_kind(EnemyKind::Armored), 0.005);
    assert!(c.validate().is_ok());
}

#[test]
fn partial_json_keeps_other_defaults() {
    let c = GameConfig::from_json_str(r#"{ "width": 1024, "spawn": { "armored": 0.1 } }"#).unwrap();
    assert_eq!(c.width, 1024.0);
    assert_eq!(c.height, 600.0);
    assert_eq!(c.spawn.armored, 0.1);
    assert_eq!(c.spawn.light, 0.02);
}

#[test]
fn empty_object_is_the_default() {
    assert_eq!(GameConfig::from_json_str("{}").unwrap(), GameConfig::default());
}

#[test]
fn malformed_json_is_a_parse_error() {
    let err = GameConfig::from_json_str("{ width: ").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn wrong_field_type_is_a_parse_error() {
    let err = GameConfig::from_json_str(r#"{ "fire_interval_ms": "fast" }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn non_positive_playfield_is_rejected() {
    let err = GameConfig::from_json_str(r#"{ "height": 0 }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn playfield_narrower_than_an_enemy_is_rejected() {
    let err = GameConfig::from_json_str(r#"{ "width": 55 }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn spawn_probability_outside_unit_range_is_rejected() {
    let config = GameConfig {
        spawn: SpawnRates { small: 1.5, ..SpawnRates::default() },
        ..GameConfig::default()
    };
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

    let config = GameConfig {
        spawn: SpawnRates { light: -0.1, ..SpawnRates::default() },
        ..GameConfig::default()
    };
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
}

#[test]
fn none_disables_every_kind() {
    let none = SpawnRates::none();
    for kind in EnemyKind::ALL {
        assert_eq!(none.for_kind(kind), 0.0);
    }
}

#[test]
fn load_reads_a_file() {
    let path = temp_file("load", r#"{ "laser_cooldown_ms": 1500 }"#);
    let c = GameConfig::load(&path).unwrap();
    assert_eq!(c.laser_cooldown_ms, 1500);
    std::fs::remove_file(path).ok();
}

#[test]
fn load_missing_file_is_an_io_error() {
    let path = std::env::temp_dir().join("volley_shooter_does_not_exist.json");
    let err = GameConfig::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("volley_shooter_does_not_exist.json"));
}

#[test]
fn load_or_default_falls_back() {
    assert_eq!(GameConfig::load_or_default(None), GameConfig::default());

    let missing = std::env::temp_dir().join("volley_shooter_missing_too.json");
    assert_eq!(GameConfig::load_or_default(Some(missing.as_path())), GameConfig::default());

    let bad = temp_file("bad", r#"{ "width": -1 }"#);
    assert_eq!(GameConfig::load_or_default(Some(bad.as_path())), GameConfig::default());
    std::fs::remove_file(bad).ok();
}

#[test]
fn load_or_default_uses_a_valid_file() {
    let path = temp_file("valid", r#"{ "fire_interval_ms": 150 }"#);
    let c = GameConfig::load_or_default(Some(path.as_path()));
    assert_eq!(c.fire_interval_ms, 150);
    std::fs::remove_file(path).ok();
}
