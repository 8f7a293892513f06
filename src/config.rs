use std::path::Path;

use cgmath::Point3;
use serde::Deserialize;

use crate::entity::{AlienTemplate, EntityKind, UpgradeEffect};
use crate::error::ConfigError;
use crate::spawn::{ClampMode, SpawnPointRange, WaveSettings};

/// Startup configuration of an arena. Everything except `aliens_per_spawn`
/// (see [`ClampMode::Destructive`]) stays constant for the session.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArenaConfig {
    pub spawn_points: Vec<[f32; 3]>,
    pub alien_pool_size: usize,
    pub pickup_pool_size: usize,
    pub min_spawn_interval: f32,
    pub max_spawn_interval: f32,
    pub aliens_per_spawn: u32,
    pub max_aliens_on_screen: u32,
    pub total_aliens: u32,
    pub upgrade_max_spawn_time: f32,
    pub upgrade_fire_rate_multiplier: f32,
    pub rearm_upgrade_on_consume: bool,
    pub spawning: bool,
    pub clamp_mode: ClampMode,
    pub spawn_point_range: SpawnPointRange,
    pub nav_update_interval: f32,
    pub head_destruct_time: f32,
    pub seed: Option<u64>,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self{
            spawn_points: vec![
                [-20.0, 0.0, -20.0],
                [20.0, 0.0, -20.0],
                [-20.0, 0.0, 20.0],
                [20.0, 0.0, 20.0],
                [0.0, 0.0, -28.0],
                [0.0, 0.0, 28.0],
            ],
            alien_pool_size: 10,
            pickup_pool_size: 1,
            min_spawn_interval: 1.0,
            max_spawn_interval: 3.0,
            aliens_per_spawn: 2,
            max_aliens_on_screen: 10,
            total_aliens: 30,
            upgrade_max_spawn_time: 10.0,
            upgrade_fire_rate_multiplier: 2.0,
            rearm_upgrade_on_consume: true,
            spawning: true,
            clamp_mode: ClampMode::Destructive,
            spawn_point_range: SpawnPointRange::ExcludeLast,
            nav_update_interval: 0.5,
            head_destruct_time: 3.0,
            seed: None,
        }
    }
}

impl ArenaConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::Parse { message: e.to_string() })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.spawn_points.is_empty() {
            return Err(ConfigError::NoSpawnPoints);
        }
        if self.alien_pool_size == 0 {
            return Err(ConfigError::EmptyPool { kind: EntityKind::Alien });
        }
        if self.pickup_pool_size == 0 {
            return Err(ConfigError::EmptyPool { kind: EntityKind::Pickup });
        }
        let (min, max) = (self.min_spawn_interval, self.max_spawn_interval);
        if !min.is_finite() || !max.is_finite() || min < 0.0 || min > max {
            return Err(ConfigError::InvalidSpawnInterval { min, max });
        }
        for (field, value) in [
            ("upgrade_max_spawn_time", self.upgrade_max_spawn_time),
            ("nav_update_interval", self.nav_update_interval),
            ("head_destruct_time", self.head_destruct_time),
            ("upgrade_fire_rate_multiplier", self.upgrade_fire_rate_multiplier),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidDuration { field, value });
            }
        }
        Ok(())
    }

    pub fn spawn_positions(&self) -> Vec<Point3<f32>> {
        self.spawn_points.iter().map(|p| Point3::new(p[0], p[1], p[2])).collect()
    }

    pub fn wave_settings(&self) -> WaveSettings {
        WaveSettings{
            max_on_screen: self.max_aliens_on_screen,
            aliens_per_spawn: self.aliens_per_spawn,
            min_spawn_interval: self.min_spawn_interval,
            max_spawn_interval: self.max_spawn_interval,
            clamp_mode: self.clamp_mode,
            spawn_point_range: self.spawn_point_range,
        }
    }

    pub fn alien_template(&self) -> AlienTemplate {
        AlienTemplate{
            nav_update_interval: self.nav_update_interval,
            head_destruct_time: self.head_destruct_time,
            ..AlienTemplate::default()
        }
    }

    pub fn upgrade_effect(&self) -> UpgradeEffect {
        UpgradeEffect::FireRateBoost { multiplier: self.upgrade_fire_rate_multiplier }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(ArenaConfig::default().validate(), Ok(()));
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let config = ArenaConfig::from_toml_str(
            r#"
            spawn_points = [[0.0, 0.0, 5.0], [3.0, 0.0, 5.0], [6.0, 0.0, 5.0]]
            aliens_per_spawn = 5
            clamp_mode = "per_wave"
            spawn_point_range = "all"
            seed = 42
            "#,
        )
        .unwrap();
        assert_eq!(config.spawn_positions()[1], Point3::new(3.0, 0.0, 5.0));
        assert_eq!(config.aliens_per_spawn, 5);
        assert_eq!(config.clamp_mode, ClampMode::PerWave);
        assert_eq!(config.spawn_point_range, SpawnPointRange::All);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.alien_pool_size, 10);
    }

    #[test]
    fn misconfiguration_is_reported() {
        let err = ArenaConfig::from_toml_str("spawn_points = []").unwrap_err();
        assert_eq!(err, ConfigError::NoSpawnPoints);

        let err = ArenaConfig::from_toml_str("alien_pool_size = 0").unwrap_err();
        assert_eq!(err, ConfigError::EmptyPool { kind: EntityKind::Alien });

        let err = ArenaConfig::from_toml_str("pickup_pool_size = 0").unwrap_err();
        assert_eq!(err, ConfigError::EmptyPool { kind: EntityKind::Pickup });

        let err = ArenaConfig::from_toml_str("min_spawn_interval = 4.0\nmax_spawn_interval = 2.0").unwrap_err();
        assert_eq!(err, ConfigError::InvalidSpawnInterval { min: 4.0, max: 2.0 });

        let err = ArenaConfig::from_toml_str("head_destruct_time = -1.0").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDuration { field: "head_destruct_time", .. }));

        assert!(matches!(ArenaConfig::from_toml_str("bogus = 1"), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "total_aliens = 12\nmax_aliens_on_screen = 4").unwrap();
        let config = ArenaConfig::load(file.path()).unwrap();
        assert_eq!(config.total_aliens, 12);
        assert_eq!(config.max_aliens_on_screen, 4);

        let missing = ArenaConfig::load(file.path().with_extension("missing"));
        assert!(matches!(missing, Err(ConfigError::Io { .. })));
    }
}
