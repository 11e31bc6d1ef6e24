use glam::{Quat, Vec3};

use crate::types::Rotator;

/// Squared-distance threshold below which interpolation snaps to the target.
pub const SMALL_NUMBER: f32 = 1e-8;

/// Returns true when `value` is within [`SMALL_NUMBER`] of zero.
pub fn is_nearly_zero(value: f32) -> bool {
    value.abs() <= SMALL_NUMBER
}

/// Move `current` toward `target` by the fraction `clamp(dt * speed, 0, 1)`.
///
/// Never overshoots, so the approach is monotonic for any `dt`. A non-positive
/// `speed` jumps straight to the target.
pub fn interp_to(current: f32, target: f32, dt: f32, speed: f32) -> f32 {
    if speed <= 0.0 {
        return target;
    }
    let dist = target - current;
    if dist * dist < SMALL_NUMBER {
        return target;
    }
    current + dist * (dt * speed).clamp(0.0, 1.0)
}

/// Vector form of [`interp_to`].
pub fn vinterp_to(current: Vec3, target: Vec3, dt: f32, speed: f32) -> Vec3 {
    if speed <= 0.0 {
        return target;
    }
    let dist = target - current;
    if dist.length_squared() < SMALL_NUMBER {
        return target;
    }
    current + dist * (dt * speed).clamp(0.0, 1.0)
}

/// Orientation whose forward (+X) axis points along `direction`, with zero roll.
///
/// A zero-length direction yields the identity.
pub fn orientation_from_direction(direction: Vec3) -> Quat {
    let Some(d) = direction.try_normalize() else {
        return Quat::IDENTITY;
    };
    let yaw = d.y.atan2(d.x).to_degrees();
    let pitch = d.z.atan2((d.x * d.x + d.y * d.y).sqrt()).to_degrees();
    Rotator::new(pitch, yaw, 0.0).to_quat()
}
