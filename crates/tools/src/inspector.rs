use aerofighters_common::{EntityId, Rotator};
use aerofighters_game::Session;
use aerofighters_kernel::World;
use glam::Vec3;
use serde::Serialize;

/// Session inspector for developer tooling.
///
/// Read-only queries against the world and the possessed pawn, used by the
/// CLI's summaries.
pub struct FlightInspector;

impl FlightInspector {
    pub fn summary(session: &Session) -> SessionSummary {
        let world = session.world();
        let projectile_class = session
            .config()
            .pawn
            .projectile
            .as_ref()
            .map(|class| class.name().to_string());
        SessionSummary {
            tick: world.tick(),
            elapsed: world.elapsed(),
            entity_count: world.entity_count(),
            projectiles: projectile_class
                .as_deref()
                .map_or(0, |class| world.count_class(class)),
            pending_timers: world.timers().pending_count(),
            events: world.events().len(),
        }
    }

    /// Flight state of the possessed pawn, or `None` once the session has ended.
    pub fn pawn(session: &Session) -> Option<PawnInfo> {
        let pawn = session.pawn()?;
        let transform = session.world().get(pawn.id())?.transform;
        let flight = pawn.flight();
        Some(PawnInfo {
            id: pawn.id(),
            position: transform.position,
            rotation: transform.rotator(),
            forward_speed: flight.forward_speed(),
            pitch_rate: flight.pitch_rate(),
            yaw_rate: flight.yaw_rate(),
            roll_rate: flight.roll_rate(),
            can_fire: pawn.weapon().can_fire(),
            camera: pawn.camera_pose().map(|pose| pose.position),
        })
    }

    pub fn inspect_actor(world: &World, id: EntityId) -> Option<ActorInfo> {
        world.get(id).map(|data| ActorInfo {
            id,
            class: data.class.clone(),
            position: data.transform.position,
            rotation: data.transform.rotator(),
        })
    }

    pub fn list_actors(world: &World) -> Vec<EntityId> {
        world.entities().keys().copied().collect()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub tick: u64,
    pub elapsed: f32,
    pub entity_count: usize,
    pub projectiles: usize,
    pub pending_timers: usize,
    pub events: usize,
}

impl std::fmt::Display for SessionSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Session: tick={} elapsed={:.3}s actors={} projectiles={} pending_timers={} events={}",
            self.tick,
            self.elapsed,
            self.entity_count,
            self.projectiles,
            self.pending_timers,
            self.events
        )
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PawnInfo {
    pub id: EntityId,
    pub position: Vec3,
    pub rotation: Rotator,
    pub forward_speed: f32,
    pub pitch_rate: f32,
    pub yaw_rate: f32,
    pub roll_rate: f32,
    pub can_fire: bool,
    pub camera: Option<Vec3>,
}

impl std::fmt::Display for PawnInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Pawn [{}] pos=({:.1}, {:.1}, {:.1}) rot=(p {:.2}, y {:.2}, r {:.2}) ",
            self.id.short(),
            self.position.x,
            self.position.y,
            self.position.z,
            self.rotation.pitch,
            self.rotation.yaw,
            self.rotation.roll,
        )?;
        write!(
            f,
            "speed={:.1} rates=({:.2}, {:.2}, {:.2}) can_fire={}",
            self.forward_speed, self.pitch_rate, self.yaw_rate, self.roll_rate, self.can_fire,
        )
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ActorInfo {
    pub id: EntityId,
    pub class: String,
    pub position: Vec3,
    pub rotation: Rotator,
}

impl std::fmt::Display for ActorInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] pos=({:.2}, {:.2}, {:.2})",
            self.class,
            self.id.short(),
            self.position.x,
            self.position.y,
            self.position.z,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aerofighters_common::Transform;
    use aerofighters_game::{GameConfig, GameMode};
    use aerofighters_input::{Key, KeyState};

    fn session() -> Session {
        Session::start(GameMode::aero_fighters(), GameConfig::default()).unwrap()
    }

    #[test]
    fn summary_fresh_session() {
        let session = session();
        let summary = FlightInspector::summary(&session);
        assert_eq!(summary.tick, 0);
        // Ground plus pawn.
        assert_eq!(summary.entity_count, 2);
        assert_eq!(summary.projectiles, 0);
        assert_eq!(summary.pending_timers, 0);
    }

    #[test]
    fn summary_counts_projectiles_and_cooldown() {
        let mut session = session();
        let fire: KeyState = [Key::Space].into_iter().collect();
        session.frame(&fire, 1.0 / 60.0).unwrap();

        let summary = FlightInspector::summary(&session);
        assert_eq!(summary.tick, 1);
        assert_eq!(summary.projectiles, 2);
        assert_eq!(summary.pending_timers, 3);
        assert!(format!("{summary}").contains("projectiles=2"));
    }

    #[test]
    fn pawn_info_tracks_flight_state() {
        let mut session = session();
        let thrust: KeyState = [Key::W].into_iter().collect();
        session.frame(&thrust, 0.1).unwrap();

        let info = FlightInspector::pawn(&session).unwrap();
        assert!((info.forward_speed - 550.0).abs() < 1e-3);
        assert!(info.camera.is_some());
        assert!(format!("{info}").contains("speed=550.0"));
    }

    #[test]
    fn pawn_info_gone_after_end() {
        let mut session = session();
        session.end();
        assert!(FlightInspector::pawn(&session).is_none());
    }

    #[test]
    fn inspect_actor_found_and_missing() {
        let mut world = World::new();
        let id = world.spawn(
            "Obstacle",
            Transform::from_position(Vec3::new(1.0, 2.0, 3.0)),
            None,
        );
        let info = FlightInspector::inspect_actor(&world, id).unwrap();
        assert_eq!(info.class, "Obstacle");
        assert_eq!(info.position, Vec3::new(1.0, 2.0, 3.0));
        assert!(FlightInspector::inspect_actor(&world, EntityId::new()).is_none());
        assert_eq!(FlightInspector::list_actors(&world), vec![id]);
    }
}
