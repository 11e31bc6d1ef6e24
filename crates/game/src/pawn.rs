//! The player aircraft actor.
//!
//! The pawn owns its controllers and component tree; the world owns its
//! transform. Every handler that reads or writes the transform takes the
//! world explicitly and reports [`GameError::PawnNotInWorld`] when the actor
//! has gone missing.

use aerofighters_common::{EntityId, Transform};
use aerofighters_flight::{
    CooldownScheduler, FlightController, MuzzlePoses, SpawnRequest, WeaponController,
};
use aerofighters_input::{Axis, InputMap};
use aerofighters_kernel::{Collider, HitResult, TimerHandle, TimerManager, TimerTag, World};
use aerofighters_scene::{NodeId, SceneTree, SpringArm};
use glam::Vec3;

use crate::config::GameConfig;
use crate::error::GameError;
use crate::mode::PawnClass;

/// Tag of the weapon cooldown timer.
pub const SHOT_TIMER: TimerTag = TimerTag(1);
/// Tag of the timer that retires a projectile actor. Owned by the projectile.
pub const PROJECTILE_LIFESPAN: TimerTag = TimerTag(2);

/// Axes the pawn binds, in binding (and therefore dispatch) order.
const BOUND_AXES: [Axis; 5] = [
    Axis::Thrust,
    Axis::MoveUp,
    Axis::LoopRight,
    Axis::TurnRight,
    Axis::FireWeapon,
];

#[derive(Debug, Clone, Copy)]
struct Components {
    camera: NodeId,
    left_muzzle: NodeId,
    right_muzzle: NodeId,
}

#[derive(Debug, Clone)]
pub struct AeroPawn {
    id: EntityId,
    flight: FlightController,
    weapon: WeaponController,
    scene: SceneTree,
    components: Components,
    spring_arm: SpringArm,
    collision_radius: f32,
    projectile_lifespan: f32,
    shot_timer: Option<TimerHandle>,
    camera: Option<Transform>,
}

impl AeroPawn {
    /// Build the pawn and spawn its actor at the configured start pose.
    pub fn spawn(world: &mut World, config: &GameConfig) -> Result<Self, GameError> {
        let pawn = &config.pawn;
        let mut scene = SceneTree::new("PlaneMesh0");
        let root = scene.root();
        let spring_arm = scene.attach("SpringArm0", root, Transform::default())?;
        let camera = scene.attach("Camera0", spring_arm, pawn.spring_arm.socket_transform())?;
        let left_muzzle = scene.attach(
            "LeftMuzzleLocation",
            root,
            Transform::from_position(pawn.left_muzzle),
        )?;
        let right_muzzle = scene.attach(
            "RightMuzzleLocation",
            root,
            Transform::from_position(pawn.right_muzzle),
        )?;

        let start = Transform::from_position_rotator(pawn.start_location, pawn.start_rotation);
        let id = world.spawn(
            PawnClass::AeroFighter.name(),
            start,
            Some(Collider::Sphere {
                radius: pawn.collision_radius,
            }),
        );
        tracing::info!(id = %id.short(), location = ?pawn.start_location, "spawned aero pawn");

        Ok(Self {
            id,
            flight: FlightController::new(config.flight),
            weapon: WeaponController::new(config.weapon, pawn.projectile.clone()),
            scene,
            components: Components {
                camera,
                left_muzzle,
                right_muzzle,
            },
            spring_arm: pawn.spring_arm,
            collision_radius: pawn.collision_radius,
            projectile_lifespan: pawn.projectile_lifespan,
            shot_timer: None,
            camera: None,
        })
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn flight(&self) -> &FlightController {
        &self.flight
    }

    pub fn weapon(&self) -> &WeaponController {
        &self.weapon
    }

    pub fn scene(&self) -> &SceneTree {
        &self.scene
    }

    /// Bind the pawn's axes. A host without an input component cannot fly it.
    pub fn setup_input(&self, input: Option<&mut InputMap>) -> Result<(), GameError> {
        let input = input.ok_or(GameError::MissingInputComponent)?;
        for axis in BOUND_AXES {
            input.bind_axis(axis)?;
        }
        Ok(())
    }

    fn transform(&self, world: &World) -> Result<Transform, GameError> {
        world
            .get(self.id)
            .map(|data| data.transform)
            .ok_or(GameError::PawnNotInWorld(self.id))
    }

    /// Route one dispatched axis value. Returns the number of projectiles spawned.
    pub fn handle_axis(
        &mut self,
        world: &mut World,
        axis: Axis,
        value: f32,
        dt: f32,
    ) -> Result<usize, GameError> {
        match axis {
            Axis::Thrust => self.thrust_input(value, dt),
            Axis::MoveUp => self.move_up_input(value, dt),
            Axis::LoopRight => self.loop_right_input(world, value)?,
            Axis::TurnRight => self.turn_right_input(world, value, dt)?,
            Axis::FireWeapon => return Ok(self.on_fire(world, value)?.len()),
        }
        Ok(0)
    }

    pub fn thrust_input(&mut self, value: f32, dt: f32) {
        self.flight.apply_thrust(value, dt);
    }

    pub fn move_up_input(&mut self, value: f32, dt: f32) {
        self.flight.apply_pitch(value, dt);
    }

    /// Bank directly by `value` degrees when not already turning.
    pub fn loop_right_input(&mut self, world: &mut World, value: f32) -> Result<(), GameError> {
        let current = self.transform(world)?;
        if let Some(offset) = self.flight.apply_roll_assist(value) {
            let mut rotator = current.rotator();
            rotator.roll += offset;
            world.set_rotation(self.id, rotator.to_quat());
        }
        Ok(())
    }

    pub fn turn_right_input(
        &mut self,
        world: &World,
        value: f32,
        dt: f32,
    ) -> Result<(), GameError> {
        let roll = self.transform(world)?.rotator().roll;
        self.flight.apply_yaw(value, dt, roll);
        Ok(())
    }

    /// Fire both guns if the weapon allows it, spawning one projectile actor
    /// per muzzle and arming the cooldown timer. Each projectile gets a
    /// [`PROJECTILE_LIFESPAN`] timer of its own.
    pub fn on_fire(&mut self, world: &mut World, value: f32) -> Result<Vec<EntityId>, GameError> {
        let actor = self.transform(world)?;
        let muzzles = MuzzlePoses {
            left: self.muzzle_pose(self.components.left_muzzle, &actor),
            right: self.muzzle_pose(self.components.right_muzzle, &actor),
        };

        let requests = {
            let mut scheduler = ShotTimer {
                timers: world.timers_mut(),
                owner: self.id,
                handle: &mut self.shot_timer,
            };
            self.weapon.request_fire(value, &muzzles, &mut scheduler)
        };

        Ok(requests
            .into_iter()
            .map(|request| spawn_projectile(world, request, self.projectile_lifespan))
            .collect())
    }

    fn muzzle_pose(&self, node: NodeId, actor: &Transform) -> Transform {
        self.scene.world_transform(node, actor).unwrap_or(*actor)
    }

    /// Advance one frame: swept move, contact response, then rotation.
    pub fn tick(&mut self, world: &mut World, dt: f32) -> Result<Option<HitResult>, GameError> {
        self.transform(world)?;
        let step = self.flight.tick(dt);

        let hit = world.add_local_offset_swept(self.id, step.position_delta, self.collision_radius);
        if let Some(hit) = &hit {
            self.notify_hit(world, hit)?;
        }
        world.add_local_rotation(self.id, step.rotation_delta);

        let actor = self.transform(world)?;
        if let Some(socket) = self.scene.world_transform(self.components.camera, &actor) {
            let location = self.spring_arm.follow(socket.position, dt);
            self.camera = Some(Transform {
                position: location,
                ..socket
            });
        }
        Ok(hit)
    }

    /// Deflect along the surface that blocked the last move.
    pub fn notify_hit(&mut self, world: &mut World, hit: &HitResult) -> Result<(), GameError> {
        let current = self.transform(world)?.rotation;
        let deflected = self.flight.on_surface_contact(current, hit.normal);
        tracing::debug!(other = %hit.other.short(), normal = ?hit.normal, "pawn hit surface");
        world.set_rotation(self.id, deflected);
        Ok(())
    }

    pub fn shot_timer_expired(&mut self) {
        self.shot_timer = None;
        self.weapon.on_cooldown_expired();
    }

    /// Pending cooldown timer, if the guns are cooling down.
    pub fn shot_timer(&self) -> Option<TimerHandle> {
        self.shot_timer
    }

    /// Follow-camera pose after the last tick.
    pub fn camera_pose(&self) -> Option<Transform> {
        self.camera
    }
}

/// Cooldown hook backed by the world's timer manager. Re-arming replaces
/// any timer still pending for this pawn.
struct ShotTimer<'a> {
    timers: &'a mut TimerManager,
    owner: EntityId,
    handle: &'a mut Option<TimerHandle>,
}

impl CooldownScheduler for ShotTimer<'_> {
    fn schedule_cooldown(&mut self, after_seconds: f32) {
        if let Some(previous) = self.handle.take() {
            self.timers.clear_timer(previous);
        }
        *self.handle = Some(self.timers.set_timer(self.owner, SHOT_TIMER, after_seconds));
    }
}

fn spawn_projectile(world: &mut World, request: SpawnRequest, lifespan: f32) -> EntityId {
    let id = world.spawn(
        request.class.name(),
        Transform {
            position: request.location,
            rotation: request.rotation,
            scale: Vec3::ONE,
        },
        None,
    );
    world.timers_mut().set_timer(id, PROJECTILE_LIFESPAN, lifespan);
    id
}
