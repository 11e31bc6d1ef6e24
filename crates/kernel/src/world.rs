use std::collections::BTreeMap;

use aerofighters_common::{EntityId, Rotator, Transform};
use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::collision::{Collider, HitResult};
use crate::timer::{FiredTimer, TimerHandle, TimerManager, TimerTag};

/// Distance (cm) a blocked sweep stops short of the contact point.
const SWEEP_PULLBACK: f32 = 0.1;

/// An event record produced by every mutation to the world.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum WorldEvent {
    /// Actor was spawned with the given class and transform.
    Spawned {
        id: EntityId,
        class: String,
        transform: Transform,
    },
    /// Actor was despawned. Carries the transform it had.
    Despawned { id: EntityId, transform: Transform },
    /// Actor transform was updated.
    TransformUpdated {
        id: EntityId,
        old: Transform,
        new: Transform,
    },
    /// A swept move was blocked.
    Hit { id: EntityId, hit: HitResult },
    /// A timer expired and was handed back to its owner.
    TimerFired {
        handle: TimerHandle,
        owner: EntityId,
        tag: TimerTag,
    },
    /// Simulation advanced one frame.
    Stepped { tick: u64, dt: f32 },
}

/// Per-actor data stored in the world.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityData {
    pub class: String,
    pub transform: Transform,
    pub collider: Option<Collider>,
}

/// The authoritative host state.
///
/// Actors read their transform from here and request changes through explicit
/// operations. BTreeMap keeps iteration (and therefore sweep tie-breaking)
/// deterministic.
#[derive(Debug, Clone, Default)]
pub struct World {
    entities: BTreeMap<EntityId, EntityData>,
    tick: u64,
    elapsed: f32,
    delta_seconds: f32,
    timers: TimerManager,
    /// Append-only event log of all mutations.
    event_log: Vec<WorldEvent>,
}

impl World {
    /// Create an empty world at tick 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames simulated so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Simulated seconds since the world was created.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Length of the last simulated frame.
    pub fn delta_seconds(&self) -> f32 {
        self.delta_seconds
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Number of live actors of the given class.
    pub fn count_class(&self, class: &str) -> usize {
        self.entities.values().filter(|d| d.class == class).count()
    }

    /// Drain and return the event log.
    pub fn drain_events(&mut self) -> Vec<WorldEvent> {
        std::mem::take(&mut self.event_log)
    }

    pub fn events(&self) -> &[WorldEvent] {
        &self.event_log
    }

    pub fn entities(&self) -> &BTreeMap<EntityId, EntityData> {
        &self.entities
    }

    pub fn timers(&self) -> &TimerManager {
        &self.timers
    }

    pub fn timers_mut(&mut self) -> &mut TimerManager {
        &mut self.timers
    }

    /// Spawn a new actor. Returns its id.
    pub fn spawn(
        &mut self,
        class: impl Into<String>,
        transform: Transform,
        collider: Option<Collider>,
    ) -> EntityId {
        let id = EntityId::new();
        self.spawn_with_id(id, class, transform, collider);
        id
    }

    /// Spawn an actor with a specific id.
    pub fn spawn_with_id(
        &mut self,
        id: EntityId,
        class: impl Into<String>,
        transform: Transform,
        collider: Option<Collider>,
    ) {
        let class = class.into();
        tracing::debug!(id = %id.short(), %class, "spawned actor");
        self.entities.insert(
            id,
            EntityData {
                class: class.clone(),
                transform,
                collider,
            },
        );
        self.event_log.push(WorldEvent::Spawned {
            id,
            class,
            transform,
        });
    }

    /// Remove an actor and cancel its timers. Returns the data if it existed.
    pub fn despawn(&mut self, id: EntityId) -> Option<EntityData> {
        let data = self.entities.remove(&id)?;
        let cancelled = self.timers.clear_all_for(id);
        tracing::debug!(id = %id.short(), cancelled, "despawned actor");
        self.event_log.push(WorldEvent::Despawned {
            id,
            transform: data.transform,
        });
        Some(data)
    }

    pub fn get(&self, id: EntityId) -> Option<&EntityData> {
        self.entities.get(&id)
    }

    /// Update an actor's transform and log the change.
    pub fn set_transform(&mut self, id: EntityId, new: Transform) -> bool {
        if let Some(data) = self.entities.get_mut(&id) {
            let old = data.transform;
            data.transform = new;
            self.event_log
                .push(WorldEvent::TransformUpdated { id, old, new });
            true
        } else {
            false
        }
    }

    pub fn set_rotation(&mut self, id: EntityId, rotation: Quat) -> bool {
        let Some(data) = self.entities.get(&id) else {
            return false;
        };
        let new = Transform {
            rotation: rotation.normalize(),
            ..data.transform
        };
        self.set_transform(id, new)
    }

    /// Rotate an actor about its own local axes.
    pub fn add_local_rotation(&mut self, id: EntityId, delta: Rotator) -> bool {
        let Some(data) = self.entities.get(&id) else {
            return false;
        };
        let rotation = data.transform.rotation * delta.to_quat();
        self.set_rotation(id, rotation)
    }

    /// Move an actor by `offset` expressed in its local frame, sweeping a sphere
    /// of `radius` against every other actor's collider.
    ///
    /// Motion stops just short of the first blocking contact, which is logged
    /// and returned. Returns `None` when the path is clear or the actor is unknown.
    pub fn add_local_offset_swept(
        &mut self,
        id: EntityId,
        offset: Vec3,
        radius: f32,
    ) -> Option<HitResult> {
        let current = self.entities.get(&id)?.transform;
        let start = current.position;
        let delta = current.rotation * offset;

        let mut first: Option<HitResult> = None;
        for (other_id, other) in &self.entities {
            if *other_id == id {
                continue;
            }
            let Some(collider) = other.collider else {
                continue;
            };
            let Some((time, normal)) =
                collider.sweep_sphere(other.transform.position, start, delta, radius)
            else {
                continue;
            };
            if first.is_none_or(|f| time < f.time) {
                first = Some(HitResult {
                    other: *other_id,
                    time,
                    location: start + delta * time,
                    normal,
                });
            }
        }

        let travelled = match first {
            Some(hit) => {
                let length = delta.length();
                if length > 0.0 {
                    (hit.time - SWEEP_PULLBACK / length).max(0.0)
                } else {
                    0.0
                }
            }
            None => 1.0,
        };
        self.set_transform(
            id,
            Transform {
                position: start + delta * travelled,
                ..current
            },
        );

        if let Some(hit) = first {
            tracing::debug!(
                id = %id.short(),
                other = %hit.other.short(),
                time = hit.time,
                "swept move blocked"
            );
            self.event_log.push(WorldEvent::Hit { id, hit });
        }
        first
    }

    /// Advance the simulation by one frame of `dt` seconds and return the
    /// timers that expired, earliest first.
    pub fn step(&mut self, dt: f32) -> Vec<FiredTimer> {
        self.tick += 1;
        self.elapsed += dt;
        self.delta_seconds = dt;
        self.event_log.push(WorldEvent::Stepped {
            tick: self.tick,
            dt,
        });

        let fired = self.timers.advance(dt);
        for timer in &fired {
            self.event_log.push(WorldEvent::TimerFired {
                handle: timer.handle,
                owner: timer.owner,
                tag: timer.tag,
            });
        }
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAWN: &str = "AeroFighter";

    #[test]
    fn world_starts_empty() {
        let w = World::new();
        assert_eq!(w.tick(), 0);
        assert_eq!(w.entity_count(), 0);
    }

    #[test]
    fn spawn_and_despawn() {
        let mut w = World::new();
        let id = w.spawn(PAWN, Transform::default(), None);
        assert_eq!(w.entity_count(), 1);
        assert_eq!(w.count_class(PAWN), 1);

        let data = w.despawn(id);
        assert!(data.is_some());
        assert_eq!(w.entity_count(), 0);
        assert!(w.despawn(id).is_none());
    }

    #[test]
    fn step_advances_clock() {
        let mut w = World::new();
        w.step(0.5);
        w.step(0.25);
        assert_eq!(w.tick(), 2);
        assert!((w.elapsed() - 0.75).abs() < 1e-6);
        assert_eq!(w.delta_seconds(), 0.25);
    }

    #[test]
    fn events_are_recorded() {
        let mut w = World::new();
        let id = w.spawn(PAWN, Transform::default(), None);
        w.step(0.1);
        w.despawn(id);
        assert_eq!(w.events().len(), 3); // spawn + step + despawn
    }

    #[test]
    fn drain_events_clears_log() {
        let mut w = World::new();
        w.spawn(PAWN, Transform::default(), None);
        let events = w.drain_events();
        assert_eq!(events.len(), 1);
        assert!(w.events().is_empty());
    }

    #[test]
    fn local_rotation_composes_in_actor_frame() {
        let mut w = World::new();
        let id = w.spawn(
            PAWN,
            Transform::from_position_rotator(Vec3::ZERO, Rotator::new(0.0, 90.0, 0.0)),
            None,
        );
        assert!(w.add_local_rotation(id, Rotator::new(90.0, 0.0, 0.0)));
        let fwd = w.get(id).unwrap().transform.forward();
        assert!((fwd - Vec3::Z).length() < 1e-4);
    }

    #[test]
    fn unblocked_sweep_moves_full_distance_along_heading() {
        let mut w = World::new();
        let id = w.spawn(
            PAWN,
            Transform::from_position_rotator(Vec3::ZERO, Rotator::new(0.0, 90.0, 0.0)),
            None,
        );
        let hit = w.add_local_offset_swept(id, Vec3::new(100.0, 0.0, 0.0), 50.0);
        assert!(hit.is_none());
        let p = w.get(id).unwrap().transform.position;
        assert!((p - Vec3::new(0.0, 100.0, 0.0)).length() < 1e-3);
    }

    #[test]
    fn sweep_stops_at_ground() {
        let mut w = World::new();
        let ground = w.spawn("Ground", Transform::default(), Some(Collider::Ground));
        let id = w.spawn(
            PAWN,
            Transform::from_position_rotator(
                Vec3::new(0.0, 0.0, 200.0),
                Rotator::new(-90.0, 0.0, 0.0),
            ),
            None,
        );

        let hit = w
            .add_local_offset_swept(id, Vec3::new(1000.0, 0.0, 0.0), 50.0)
            .unwrap();
        assert_eq!(hit.other, ground);
        assert!((hit.normal - Vec3::Z).length() < 1e-5);

        let z = w.get(id).unwrap().transform.position.z;
        assert!(z >= 50.0 && z < 51.0, "stopped at z={z}");
        assert!(w.events().iter().any(|e| matches!(e, WorldEvent::Hit { .. })));
    }

    #[test]
    fn sweep_reports_nearest_contact() {
        let mut w = World::new();
        let near = w.spawn(
            "Rock",
            Transform::from_position(Vec3::new(500.0, 0.0, 0.0)),
            Some(Collider::Sphere { radius: 50.0 }),
        );
        w.spawn(
            "Rock",
            Transform::from_position(Vec3::new(900.0, 0.0, 0.0)),
            Some(Collider::Sphere { radius: 50.0 }),
        );
        let id = w.spawn(PAWN, Transform::default(), None);
        let hit = w
            .add_local_offset_swept(id, Vec3::new(2000.0, 0.0, 0.0), 50.0)
            .unwrap();
        assert_eq!(hit.other, near);
    }

    #[test]
    fn sweep_unknown_actor_is_none() {
        let mut w = World::new();
        assert!(w.add_local_offset_swept(EntityId::new(), Vec3::X, 1.0).is_none());
    }

    #[test]
    fn despawn_cancels_owned_timers() {
        let mut w = World::new();
        let id = w.spawn(PAWN, Transform::default(), None);
        w.timers_mut().set_timer(id, TimerTag(1), 0.1);
        w.despawn(id);
        assert!(w.step(1.0).is_empty());
    }

    #[test]
    fn step_returns_and_logs_fired_timers() {
        let mut w = World::new();
        let id = w.spawn(PAWN, Transform::default(), None);
        w.timers_mut().set_timer(id, TimerTag(1), 0.1);
        assert!(w.step(0.05).is_empty());
        let fired = w.step(0.25);
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].owner, id);
        assert!(
            w.events()
                .iter()
                .any(|e| matches!(e, WorldEvent::TimerFired { owner, .. } if *owner == id))
        );
    }
}
