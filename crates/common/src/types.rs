use glam::{EulerRot, Quat, Vec3};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an actor in the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub Uuid);

impl EntityId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// First eight hex digits, for log lines.
    pub fn short(&self) -> String {
        self.0.simple().to_string()[..8].to_string()
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

/// Spatial transform: position, rotation, scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn from_position_rotator(position: Vec3, rotator: Rotator) -> Self {
        Self {
            position,
            rotation: rotator.to_quat(),
            ..Self::default()
        }
    }

    /// Compose `self` (parent) with `local` (child expressed in the parent frame).
    pub fn mul_transform(&self, local: &Transform) -> Transform {
        Transform {
            position: self.position + self.rotation * (self.scale * local.position),
            rotation: (self.rotation * local.rotation).normalize(),
            scale: self.scale * local.scale,
        }
    }

    /// Unit vector along the local +X axis.
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    pub fn rotator(&self) -> Rotator {
        Rotator::from_quat(self.rotation)
    }
}

/// Euler angles in degrees.
///
/// Positive pitch raises the nose, positive yaw turns right (+X toward +Y),
/// positive roll lowers the right wing. The quaternion form is
/// `Rz(yaw) * Ry(-pitch) * Rx(-roll)`, so roll is applied first in the local frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rotator {
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
}

impl Rotator {
    pub const ZERO: Rotator = Rotator {
        pitch: 0.0,
        yaw: 0.0,
        roll: 0.0,
    };

    pub fn new(pitch: f32, yaw: f32, roll: f32) -> Self {
        Self { pitch, yaw, roll }
    }

    pub fn to_quat(self) -> Quat {
        Quat::from_euler(
            EulerRot::ZYX,
            self.yaw.to_radians(),
            -self.pitch.to_radians(),
            -self.roll.to_radians(),
        )
    }

    pub fn from_quat(q: Quat) -> Self {
        let (z, y, x) = q.normalize().to_euler(EulerRot::ZYX);
        Self {
            pitch: -y.to_degrees(),
            yaw: z.to_degrees(),
            roll: -x.to_degrees(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_vec_close(a: Vec3, b: Vec3) {
        assert!((a - b).length() < 1e-4, "{a:?} != {b:?}");
    }

    #[test]
    fn entity_id_uniqueness() {
        let a = EntityId::new();
        let b = EntityId::new();
        assert_ne!(a, b);
        assert_eq!(a.short().len(), 8);
    }

    #[test]
    fn transform_default_is_identity() {
        let t = Transform::default();
        assert_eq!(t.position, Vec3::ZERO);
        assert_eq!(t.rotation, Quat::IDENTITY);
        assert_eq!(t.scale, Vec3::ONE);
    }

    #[test]
    fn positive_pitch_raises_nose() {
        let fwd = Rotator::new(90.0, 0.0, 0.0).to_quat() * Vec3::X;
        assert_vec_close(fwd, Vec3::Z);
    }

    #[test]
    fn positive_yaw_turns_right() {
        let fwd = Rotator::new(0.0, 90.0, 0.0).to_quat() * Vec3::X;
        assert_vec_close(fwd, Vec3::Y);
    }

    #[test]
    fn positive_roll_lowers_right_wing() {
        let right = Rotator::new(0.0, 0.0, 90.0).to_quat() * Vec3::Y;
        assert_vec_close(right, Vec3::NEG_Z);
    }

    #[test]
    fn rotator_quat_round_trip() {
        let r = Rotator::new(12.5, -40.0, 33.0);
        let back = Rotator::from_quat(r.to_quat());
        assert!((back.pitch - r.pitch).abs() < 1e-3);
        assert!((back.yaw - r.yaw).abs() < 1e-3);
        assert!((back.roll - r.roll).abs() < 1e-3);
    }

    #[test]
    fn mul_transform_applies_parent_rotation() {
        let parent = Transform::from_position_rotator(
            Vec3::new(100.0, 0.0, 0.0),
            Rotator::new(0.0, 90.0, 0.0),
        );
        let child = Transform::from_position(Vec3::new(10.0, 0.0, 0.0));
        let world = parent.mul_transform(&child);
        assert_vec_close(world.position, Vec3::new(100.0, 10.0, 0.0));
        assert_vec_close(world.forward(), Vec3::Y);
    }
}
