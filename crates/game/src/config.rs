//! Session configuration, loaded from YAML.
//!
//! Every field has a default, so an empty document is a valid config that
//! reproduces the stock aircraft.

use std::path::Path;

use aerofighters_common::Rotator;
use aerofighters_flight::{FlightTuning, ProjectileClass, WeaponTuning};
use aerofighters_input::AxisMapping;
use aerofighters_scene::SpringArm;
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Static blocking geometry spawned at session start.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Obstacle {
    Ground { height: f32 },
    Sphere { center: Vec3, radius: f32 },
}

/// Per-aircraft layout and spawn settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PawnConfig {
    pub start_location: Vec3,
    pub start_rotation: Rotator,
    /// Radius of the sphere swept when the aircraft moves.
    pub collision_radius: f32,
    pub spring_arm: SpringArm,
    pub left_muzzle: Vec3,
    pub right_muzzle: Vec3,
    /// `None` disables the guns.
    pub projectile: Option<ProjectileClass>,
    /// Seconds a projectile actor lives before it is despawned.
    pub projectile_lifespan: f32,
}

impl Default for PawnConfig {
    fn default() -> Self {
        Self {
            start_location: Vec3::new(0.0, 0.0, 20_000.0),
            start_rotation: Rotator::ZERO,
            collision_radius: 400.0,
            spring_arm: SpringArm::default(),
            left_muzzle: Vec3::new(550.0, -650.0, -50.0),
            right_muzzle: Vec3::new(550.0, 650.0, -50.0),
            projectile: Some(ProjectileClass::air_projectile()),
            projectile_lifespan: 3.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub flight: FlightTuning,
    pub weapon: WeaponTuning,
    pub pawn: PawnConfig,
    pub bindings: Vec<AxisMapping>,
    pub obstacles: Vec<Obstacle>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            flight: FlightTuning::default(),
            weapon: WeaponTuning::default(),
            pawn: PawnConfig::default(),
            bindings: AxisMapping::defaults(),
            obstacles: vec![Obstacle::Ground { height: 0.0 }],
        }
    }
}

impl GameConfig {
    /// Read and validate a YAML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_yaml_str(&text)?;
        tracing::info!(path = %path.as_ref().display(), "loaded config");
        Ok(config)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        std::fs::write(path, self.to_yaml()?)?;
        Ok(())
    }

    /// Reject tuning the controllers cannot honour.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let f = &self.flight;
        if !(f.min_speed >= 0.0 && f.min_speed <= f.max_speed) {
            return Err(invalid(
                "flight.min_speed",
                format!("must be in [0, max_speed={}], got {}", f.max_speed, f.min_speed),
            ));
        }
        if !(f.acceleration >= 0.0) {
            return Err(invalid(
                "flight.acceleration",
                format!("must be non-negative, got {}", f.acceleration),
            ));
        }
        if !(f.turn_speed >= 0.0) {
            return Err(invalid(
                "flight.turn_speed",
                format!("must be non-negative, got {}", f.turn_speed),
            ));
        }
        if !(self.weapon.fire_rate >= 0.0) {
            return Err(invalid(
                "weapon.fire_rate",
                format!("must be non-negative, got {}", self.weapon.fire_rate),
            ));
        }
        if !(self.pawn.collision_radius > 0.0) {
            return Err(invalid(
                "pawn.collision_radius",
                format!("must be positive, got {}", self.pawn.collision_radius),
            ));
        }
        if !(self.pawn.projectile_lifespan > 0.0) {
            return Err(invalid(
                "pawn.projectile_lifespan",
                format!("must be positive, got {}", self.pawn.projectile_lifespan),
            ));
        }
        for obstacle in &self.obstacles {
            if let Obstacle::Sphere { radius, .. } = obstacle {
                if !(*radius > 0.0) {
                    return Err(invalid(
                        "obstacles.radius",
                        format!("must be positive, got {radius}"),
                    ));
                }
            }
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: String) -> ConfigError {
    ConfigError::Invalid { field, reason }
}
