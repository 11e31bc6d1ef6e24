//! Frame-driven play session.
//!
//! Each [`Session::frame`] runs the same order the host engine would:
//! input dispatch, pawn tick (swept move and contact), then timers.
//!
//! The world's event log only holds the current frame's events, and
//! projectiles are despawned when their lifespan runs out, so a session's
//! footprint does not grow with its length.

use aerofighters_common::{Rotator, Transform};
use aerofighters_input::{InputMap, KeyState};
use aerofighters_kernel::{Collider, World};
use glam::Vec3;
use serde::Serialize;

use crate::config::{GameConfig, Obstacle};
use crate::error::GameError;
use crate::mode::{GameMode, PawnClass};
use crate::pawn::{AeroPawn, PROJECTILE_LIFESPAN, SHOT_TIMER};

/// Snapshot of the possessed pawn after one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameReport {
    pub tick: u64,
    pub elapsed: f32,
    pub speed: f32,
    pub position: Vec3,
    pub rotation: Rotator,
    pub projectiles_spawned: usize,
    pub hit: bool,
    pub hit_normal: Option<Vec3>,
    pub can_fire: bool,
}

pub struct Session {
    mode: GameMode,
    config: GameConfig,
    world: World,
    input: InputMap,
    pawn: Option<AeroPawn>,
}

impl Session {
    /// Build the world, spawn obstacles and possess the mode's default pawn.
    pub fn start(mode: GameMode, config: GameConfig) -> Result<Self, GameError> {
        config.validate()?;
        let mut world = World::new();

        for obstacle in &config.obstacles {
            match *obstacle {
                Obstacle::Ground { height } => {
                    world.spawn(
                        "Ground",
                        Transform::from_position(Vec3::new(0.0, 0.0, height)),
                        Some(Collider::Ground),
                    );
                }
                Obstacle::Sphere { center, radius } => {
                    world.spawn(
                        "Obstacle",
                        Transform::from_position(center),
                        Some(Collider::Sphere { radius }),
                    );
                }
            }
        }

        let pawn = match mode.default_pawn_class {
            PawnClass::AeroFighter => AeroPawn::spawn(&mut world, &config)?,
        };
        let mut input = InputMap::new(config.bindings.clone())?;
        pawn.setup_input(Some(&mut input))?;

        tracing::info!(
            pawn = %mode.default_pawn_class,
            obstacles = config.obstacles.len(),
            "session started"
        );
        Ok(Self {
            mode,
            config,
            world,
            input,
            pawn: Some(pawn),
        })
    }

    pub fn mode(&self) -> &GameMode {
        &self.mode
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn input(&self) -> &InputMap {
        &self.input
    }

    pub fn pawn(&self) -> Option<&AeroPawn> {
        self.pawn.as_ref()
    }

    /// Run one frame of `dt` seconds with `keys` held.
    pub fn frame(&mut self, keys: &KeyState, dt: f32) -> Result<FrameReport, GameError> {
        let _span = tracing::info_span!("frame", tick = self.world.tick() + 1).entered();
        let pawn = self.pawn.as_mut().ok_or(GameError::NoPawn)?;
        self.world.drain_events();

        let mut projectiles_spawned = 0;
        for (axis, value) in self.input.dispatch(keys) {
            projectiles_spawned += pawn.handle_axis(&mut self.world, axis, value, dt)?;
        }

        let hit = pawn.tick(&mut self.world, dt)?;

        for timer in self.world.step(dt) {
            match timer.tag {
                SHOT_TIMER if timer.owner == pawn.id() => pawn.shot_timer_expired(),
                PROJECTILE_LIFESPAN => {
                    self.world.despawn(timer.owner);
                }
                _ => {}
            }
        }

        let transform = self
            .world
            .get(pawn.id())
            .map(|data| data.transform)
            .ok_or(GameError::PawnNotInWorld(pawn.id()))?;

        Ok(FrameReport {
            tick: self.world.tick(),
            elapsed: self.world.elapsed(),
            speed: pawn.flight().forward_speed(),
            position: transform.position,
            rotation: transform.rotator(),
            projectiles_spawned,
            hit: hit.is_some(),
            hit_normal: hit.map(|h| h.normal),
            can_fire: pawn.weapon().can_fire(),
        })
    }

    /// Despawn the pawn. Its pending cooldown is cancelled with it.
    pub fn end(&mut self) -> Option<AeroPawn> {
        let pawn = self.pawn.take()?;
        self.world.despawn(pawn.id());
        tracing::info!(tick = self.world.tick(), "session ended");
        Some(pawn)
    }
}
