use aerofighters_common::Transform;
use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Actor class the host instantiates for each shot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectileClass(pub String);

impl ProjectileClass {
    pub fn air_projectile() -> Self {
        Self("AirProjectile".into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponTuning {
    /// Cooldown between volleys, in seconds.
    pub fire_rate: f32,
    /// World-space offset added to each muzzle location. Not rotated with the aircraft.
    pub gun_offset: Vec3,
}

impl Default for WeaponTuning {
    fn default() -> Self {
        Self {
            fire_rate: 0.1,
            gun_offset: Vec3::new(200.0, 0.0, 0.0),
        }
    }
}

/// World poses of the two muzzles at the moment of firing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MuzzlePoses {
    pub left: Transform,
    pub right: Transform,
}

/// Request for the host to spawn one projectile actor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnRequest {
    pub class: ProjectileClass,
    pub location: Vec3,
    pub rotation: Quat,
}

/// Host hook that arranges for [`WeaponController::on_cooldown_expired`] to
/// be called once, `after_seconds` of simulated time from now.
pub trait CooldownScheduler {
    fn schedule_cooldown(&mut self, after_seconds: f32);
}

/// Twin-gun firing gate.
#[derive(Debug, Clone, PartialEq)]
pub struct WeaponController {
    tuning: WeaponTuning,
    projectile: Option<ProjectileClass>,
    can_fire: bool,
}

impl WeaponController {
    pub fn new(tuning: WeaponTuning, projectile: Option<ProjectileClass>) -> Self {
        Self {
            tuning,
            projectile,
            can_fire: true,
        }
    }

    pub fn tuning(&self) -> &WeaponTuning {
        &self.tuning
    }

    pub fn projectile(&self) -> Option<&ProjectileClass> {
        self.projectile.as_ref()
    }

    pub fn can_fire(&self) -> bool {
        self.can_fire
    }

    /// Fire one volley if the trigger is held, the gate is open and a
    /// projectile class is configured. Returns the left and right spawn
    /// requests, or nothing when any of those conditions fails.
    pub fn request_fire(
        &mut self,
        value: f32,
        muzzles: &MuzzlePoses,
        scheduler: &mut impl CooldownScheduler,
    ) -> Vec<SpawnRequest> {
        let Some(class) = self.projectile.as_ref() else {
            return Vec::new();
        };
        if value == 0.0 || !self.can_fire {
            return Vec::new();
        }

        let volley = [muzzles.left, muzzles.right]
            .into_iter()
            .map(|muzzle| SpawnRequest {
                class: class.clone(),
                location: muzzle.position + self.tuning.gun_offset,
                rotation: muzzle.rotation,
            })
            .collect();

        self.can_fire = false;
        scheduler.schedule_cooldown(self.tuning.fire_rate);
        tracing::debug!(class = class.name(), cooldown = self.tuning.fire_rate, "volley fired");
        volley
    }

    pub fn on_cooldown_expired(&mut self) {
        self.can_fire = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aerofighters_common::Rotator;

    #[derive(Default)]
    struct RecordingScheduler {
        scheduled: Vec<f32>,
    }

    impl CooldownScheduler for RecordingScheduler {
        fn schedule_cooldown(&mut self, after_seconds: f32) {
            self.scheduled.push(after_seconds);
        }
    }

    fn muzzles() -> MuzzlePoses {
        MuzzlePoses {
            left: Transform::from_position(Vec3::new(550.0, -650.0, -50.0)),
            right: Transform::from_position(Vec3::new(550.0, 650.0, -50.0)),
        }
    }

    fn armed() -> WeaponController {
        WeaponController::new(WeaponTuning::default(), Some(ProjectileClass::air_projectile()))
    }

    #[test]
    fn fire_emits_two_offset_requests_and_closes_gate() {
        let mut weapon = armed();
        let mut sched = RecordingScheduler::default();
        let shots = weapon.request_fire(1.0, &muzzles(), &mut sched);

        assert_eq!(shots.len(), 2);
        assert_eq!(shots[0].location, Vec3::new(750.0, -650.0, -50.0));
        assert_eq!(shots[1].location, Vec3::new(750.0, 650.0, -50.0));
        assert!(shots.iter().all(|s| s.class == ProjectileClass::air_projectile()));
        assert!(!weapon.can_fire());
        assert_eq!(sched.scheduled, vec![0.1]);
    }

    #[test]
    fn second_request_before_cooldown_is_empty() {
        let mut weapon = armed();
        let mut sched = RecordingScheduler::default();
        assert_eq!(weapon.request_fire(1.0, &muzzles(), &mut sched).len(), 2);
        assert!(weapon.request_fire(1.0, &muzzles(), &mut sched).is_empty());
        assert_eq!(sched.scheduled.len(), 1);
    }

    #[test]
    fn cooldown_expiry_reopens_gate() {
        let mut weapon = armed();
        let mut sched = RecordingScheduler::default();
        weapon.request_fire(1.0, &muzzles(), &mut sched);
        weapon.on_cooldown_expired();
        assert!(weapon.can_fire());
        assert_eq!(weapon.request_fire(0.5, &muzzles(), &mut sched).len(), 2);
    }

    #[test]
    fn no_input_is_noop() {
        let mut weapon = armed();
        let mut sched = RecordingScheduler::default();
        assert!(weapon.request_fire(0.0, &muzzles(), &mut sched).is_empty());
        assert!(weapon.can_fire());
        assert!(sched.scheduled.is_empty());
    }

    #[test]
    fn negative_input_still_fires() {
        let mut weapon = armed();
        let mut sched = RecordingScheduler::default();
        assert_eq!(weapon.request_fire(-1.0, &muzzles(), &mut sched).len(), 2);
    }

    #[test]
    fn unconfigured_projectile_never_fires() {
        let mut weapon = WeaponController::new(WeaponTuning::default(), None);
        let mut sched = RecordingScheduler::default();
        for _ in 0..3 {
            assert!(weapon.request_fire(1.0, &muzzles(), &mut sched).is_empty());
        }
        assert!(weapon.can_fire());
        assert!(sched.scheduled.is_empty());
    }

    #[test]
    fn gun_offset_is_not_rotated_with_muzzle() {
        let mut weapon = armed();
        let mut sched = RecordingScheduler::default();
        let yawed = Rotator::new(0.0, 90.0, 0.0).to_quat();
        let poses = MuzzlePoses {
            left: Transform {
                rotation: yawed,
                ..Transform::default()
            },
            right: Transform {
                rotation: yawed,
                ..Transform::default()
            },
        };
        let shots = weapon.request_fire(1.0, &poses, &mut sched);
        assert_eq!(shots[0].location, Vec3::new(200.0, 0.0, 0.0));
        assert_eq!(shots[0].rotation, yawed);
    }
}
