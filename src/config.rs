//! Tunables for a run.
//!
//! Every field has a default, so a config file only needs to name what it
//! overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::entities::EnemyKind;
use crate::error::ConfigError;

/// Per-frame spawn probability for each enemy kind.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnRates {
    pub light: f64,
    pub small: f64,
    pub armored: f64,
}

impl Default for SpawnRates {
    fn default() -> Self {
        Self {
            light: 0.02,
            small: 0.01,
            armored: 0.005,
        }
    }
}

impl SpawnRates {
    /// No enemy ever spawns. Handy for scripted scenarios.
    pub fn none() -> Self {
        Self {
            light: 0.0,
            small: 0.0,
            armored: 0.0,
        }
    }

    pub fn for_kind(&self, kind: EnemyKind) -> f64 {
        match kind {
            EnemyKind::Light => self.light,
            EnemyKind::Small => self.small,
            EnemyKind::Armored => self.armored,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Playfield width in world units.
    pub width: f32,
    /// Playfield height in world units.
    pub height: f32,
    /// Minimum gap between two bullets while fire is held.
    pub fire_interval_ms: u64,
    /// Recharge time of the laser volley.
    pub laser_cooldown_ms: u64,
    pub spawn: SpawnRates,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            fire_interval_ms: 300,
            laser_cooldown_ms: 3000,
            spawn: SpawnRates::default(),
        }
    }
}

impl GameConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Load `path` if given, falling back to defaults (with a warning) when
    /// the file is missing or rejected.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };
        match Self::load(path) {
            Ok(config) => {
                tracing::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("{}, using default config", e);
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "playfield must be positive, got {}x{}",
                self.width, self.height
            )));
        }

        // Everything has to fit inside the playfield or spawning and
        // clamping stop making sense.
        let min_width = EnemyKind::ALL
            .iter()
            .map(|k| k.size())
            .fold(crate::entities::PLAYER_WIDTH, f32::max);
        let min_height = crate::entities::PLAYER_HEIGHT;
        if self.width < min_width || self.height < min_height {
            return Err(ConfigError::Invalid(format!(
                "playfield {}x{} is smaller than {}x{}",
                self.width, self.height, min_width, min_height
            )));
        }

        for kind in EnemyKind::ALL {
            let p = self.spawn.for_kind(kind);
            if !(0.0..=1.0).contains(&p) {
                return Err(ConfigError::Invalid(format!(
                    "spawn probability for {:?} must be within [0, 1], got {}",
                    kind, p
                )));
            }
        }

        Ok(())
    }
}
