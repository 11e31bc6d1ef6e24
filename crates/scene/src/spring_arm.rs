use aerofighters_common::{Transform, vinterp_to};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Boom that holds the follow camera behind its parent.
///
/// The socket sits `target_arm_length` behind the arm origin, shifted by
/// `socket_offset`. With lag enabled the camera chases the socket instead of
/// snapping to it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringArm {
    pub target_arm_length: f32,
    pub socket_offset: Vec3,
    pub enable_camera_lag: bool,
    pub camera_lag_speed: f32,
    #[serde(skip)]
    lagged_location: Option<Vec3>,
}

impl Default for SpringArm {
    fn default() -> Self {
        Self {
            target_arm_length: 350.0,
            socket_offset: Vec3::new(0.0, 0.0, 10.0),
            enable_camera_lag: false,
            camera_lag_speed: 15.0,
            lagged_location: None,
        }
    }
}

impl SpringArm {
    /// Socket pose relative to the arm node.
    pub fn socket_transform(&self) -> Transform {
        Transform::from_position(Vec3::new(-self.target_arm_length, 0.0, 0.0) + self.socket_offset)
    }

    /// Camera location for this frame given where the socket wants it.
    pub fn follow(&mut self, desired: Vec3, dt: f32) -> Vec3 {
        let location = match (self.enable_camera_lag, self.lagged_location) {
            (true, Some(previous)) => vinterp_to(previous, desired, dt, self.camera_lag_speed),
            _ => desired,
        };
        self.lagged_location = Some(location);
        location
    }
}
