use aerofighters_common::EntityId;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Blocking shape attached to an actor. Shapes are placed at the actor's position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Collider {
    /// Solid half-space below the horizontal plane through the actor origin.
    Ground,
    Sphere { radius: f32 },
}

/// First blocking contact found during a swept move.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitResult {
    /// The actor that was hit.
    pub other: EntityId,
    /// Fraction of the requested move completed before contact, in [0, 1].
    pub time: f32,
    /// Centre of the swept sphere at contact.
    pub location: Vec3,
    /// Unit surface normal pointing away from the hit shape.
    pub normal: Vec3,
}

impl Collider {
    /// Sweep a sphere of `radius` from `start` along `delta` against this shape
    /// placed at `origin`. Returns the contact time and normal.
    ///
    /// A sphere that already overlaps the shape only blocks motion heading
    /// further into it.
    pub fn sweep_sphere(
        &self,
        origin: Vec3,
        start: Vec3,
        delta: Vec3,
        radius: f32,
    ) -> Option<(f32, Vec3)> {
        match *self {
            Collider::Ground => sweep_ground(origin.z, start, delta, radius),
            Collider::Sphere { radius: r } => sweep_sphere(origin, r + radius, start, delta),
        }
    }
}

fn sweep_ground(plane_z: f32, start: Vec3, delta: Vec3, radius: f32) -> Option<(f32, Vec3)> {
    let separation = start.z - plane_z - radius;
    if separation < 0.0 {
        return (delta.z < 0.0).then_some((0.0, Vec3::Z));
    }
    if delta.z >= 0.0 {
        return None;
    }
    let t = separation / -delta.z;
    (t <= 1.0).then_some((t, Vec3::Z))
}

fn sweep_sphere(
    center: Vec3,
    combined_radius: f32,
    start: Vec3,
    delta: Vec3,
) -> Option<(f32, Vec3)> {
    let m = start - center;
    let b = m.dot(delta);
    let c = m.length_squared() - combined_radius * combined_radius;
    if c <= 0.0 {
        return (b < 0.0).then(|| (0.0, m.try_normalize().unwrap_or(Vec3::Z)));
    }
    let a = delta.length_squared();
    if a <= f32::EPSILON || b >= 0.0 {
        return None;
    }
    let disc = b * b - a * c;
    if disc < 0.0 {
        return None;
    }
    let t = (-b - disc.sqrt()) / a;
    if !(0.0..=1.0).contains(&t) {
        return None;
    }
    let normal = (m + delta * t).try_normalize().unwrap_or(Vec3::Z);
    Some((t, normal))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ground_blocks_descending_sphere() {
        let (t, n) = Collider::Ground
            .sweep_sphere(Vec3::ZERO, Vec3::new(0.0, 0.0, 200.0), Vec3::new(0.0, 0.0, -300.0), 50.0)
            .unwrap();
        assert!((t - 0.5).abs() < 1e-6);
        assert_eq!(n, Vec3::Z);
    }

    #[test]
    fn ground_ignores_climbing_and_level_motion() {
        let start = Vec3::new(0.0, 0.0, 200.0);
        let level = Vec3::new(100.0, 0.0, 0.0);
        let climb = Vec3::new(0.0, 0.0, 10.0);
        assert!(Collider::Ground.sweep_sphere(Vec3::ZERO, start, level, 50.0).is_none());
        assert!(Collider::Ground.sweep_sphere(Vec3::ZERO, start, climb, 50.0).is_none());
    }

    #[test]
    fn ground_out_of_reach_is_no_hit() {
        let hit = Collider::Ground.sweep_sphere(
            Vec3::ZERO,
            Vec3::new(0.0, 0.0, 1000.0),
            Vec3::new(0.0, 0.0, -100.0),
            50.0,
        );
        assert!(hit.is_none());
    }

    #[test]
    fn sphere_head_on_contact() {
        let collider = Collider::Sphere { radius: 100.0 };
        let (t, n) = collider
            .sweep_sphere(
                Vec3::new(1000.0, 0.0, 0.0),
                Vec3::ZERO,
                Vec3::new(2000.0, 0.0, 0.0),
                50.0,
            )
            .unwrap();
        // contact when centre distance reaches 150
        assert!((t - 850.0 / 2000.0).abs() < 1e-5);
        assert!((n - Vec3::NEG_X).length() < 1e-5);
    }

    #[test]
    fn sphere_miss_is_none() {
        let collider = Collider::Sphere { radius: 100.0 };
        let hit = collider.sweep_sphere(
            Vec3::new(1000.0, 500.0, 0.0),
            Vec3::ZERO,
            Vec3::new(2000.0, 0.0, 0.0),
            50.0,
        );
        assert!(hit.is_none());
    }

    #[test]
    fn overlapping_sphere_only_blocks_inward_motion() {
        let collider = Collider::Sphere { radius: 100.0 };
        let inward = collider.sweep_sphere(Vec3::new(50.0, 0.0, 0.0), Vec3::ZERO, Vec3::X, 10.0);
        assert_eq!(inward.map(|(t, _)| t), Some(0.0));
        let outward =
            collider.sweep_sphere(Vec3::new(50.0, 0.0, 0.0), Vec3::ZERO, Vec3::NEG_X, 10.0);
        assert!(outward.is_none());
    }
}
