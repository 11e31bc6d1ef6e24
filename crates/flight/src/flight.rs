use aerofighters_common::{Rotator, interp_to, is_nearly_zero, orientation_from_direction};
use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Yaw input magnitude above which the aircraft counts as turning.
pub const TURN_DEADZONE: f32 = 0.2;
/// Interpolation speed for every angular rate.
pub const RATE_INTERP_SPEED: f32 = 2.0;
/// Fraction of the way toward the surface orientation applied per contact.
pub const CONTACT_DEFLECTION: f32 = 0.025;

/// Pitch authority lost per degree/second of yaw.
const YAW_PITCH_PENALTY: f32 = 0.2;
/// Bank rate produced per degree/second of yaw while turning.
const BANK_PER_YAW: f32 = 0.5;
/// Roll rate commanded per degree of bank when not turning.
const SELF_RIGHTING_GAIN: f32 = 2.0;
/// Deceleration applied with no thrust input, as a fraction of `acceleration`.
const IDLE_DECELERATION: f32 = 0.5;

/// Handling parameters, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightTuning {
    /// Forward acceleration at full thrust (cm/s²).
    pub acceleration: f32,
    /// Angular rate at full stick deflection (deg/s).
    pub turn_speed: f32,
    pub min_speed: f32,
    pub max_speed: f32,
}

impl Default for FlightTuning {
    fn default() -> Self {
        Self {
            acceleration: 500.0,
            turn_speed: 50.0,
            min_speed: 500.0,
            max_speed: 4000.0,
        }
    }
}

/// Motion produced by one [`FlightController::tick`], in the actor's local frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlightStep {
    pub position_delta: Vec3,
    pub rotation_delta: Rotator,
}

/// Kinematic state of the aircraft.
///
/// Axis handlers accumulate into speed and angular rates; [`tick`](Self::tick)
/// turns them into a local translation and rotation for the host to apply.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightController {
    tuning: FlightTuning,
    forward_speed: f32,
    pitch_rate: f32,
    yaw_rate: f32,
    roll_rate: f32,
    is_turning: bool,
}

impl FlightController {
    pub fn new(tuning: FlightTuning) -> Self {
        Self {
            tuning,
            forward_speed: tuning.min_speed,
            pitch_rate: 0.0,
            yaw_rate: 0.0,
            roll_rate: 0.0,
            is_turning: false,
        }
    }

    pub fn tuning(&self) -> &FlightTuning {
        &self.tuning
    }

    pub fn forward_speed(&self) -> f32 {
        self.forward_speed
    }

    /// Override the current speed, clamped to the tuning limits.
    pub fn set_forward_speed(&mut self, speed: f32) {
        self.forward_speed = speed.clamp(self.tuning.min_speed, self.tuning.max_speed);
    }

    pub fn pitch_rate(&self) -> f32 {
        self.pitch_rate
    }

    pub fn yaw_rate(&self) -> f32 {
        self.yaw_rate
    }

    pub fn roll_rate(&self) -> f32 {
        self.roll_rate
    }

    pub fn is_turning(&self) -> bool {
        self.is_turning
    }

    /// Accelerate with input, otherwise bleed speed at half the acceleration.
    pub fn apply_thrust(&mut self, value: f32, dt: f32) {
        let value = value.clamp(-1.0, 1.0);
        let acceleration = if is_nearly_zero(value) {
            -IDLE_DECELERATION * self.tuning.acceleration
        } else {
            value * self.tuning.acceleration
        };
        self.set_forward_speed(self.forward_speed + acceleration * dt);
    }

    /// Stick up pitches the nose down. Yawing costs some pitch authority.
    pub fn apply_pitch(&mut self, value: f32, dt: f32) {
        let value = value.clamp(-1.0, 1.0);
        let target =
            -value * self.tuning.turn_speed - YAW_PITCH_PENALTY * self.yaw_rate.abs();
        self.pitch_rate = interp_to(self.pitch_rate, target, dt, RATE_INTERP_SPEED);
    }

    /// Yaw toward `value * turn_speed` and update the turning flag.
    ///
    /// While turning the roll rate chases a bank proportional to the yaw rate.
    /// Otherwise it chases a self-righting rate computed from `current_roll`,
    /// the actor's present bank angle in degrees. That rate only reaches the
    /// actor on frames where the aircraft is turning; see [`tick`](Self::tick).
    pub fn apply_yaw(&mut self, value: f32, dt: f32, current_roll: f32) {
        let value = value.clamp(-1.0, 1.0);
        let target = value * self.tuning.turn_speed;
        self.yaw_rate = interp_to(self.yaw_rate, target, dt, RATE_INTERP_SPEED);

        self.is_turning = value.abs() > TURN_DEADZONE;
        let target_roll = if self.is_turning {
            self.yaw_rate * BANK_PER_YAW
        } else {
            -SELF_RIGHTING_GAIN * current_roll
        };
        self.roll_rate = interp_to(self.roll_rate, target_roll, dt, RATE_INTERP_SPEED);
    }

    /// Immediate bank offset in degrees, or `None` when the input is inside the
    /// deadzone or the aircraft is already turning this frame.
    ///
    /// This path bypasses `roll_rate` entirely; the caller adds the offset to
    /// the actor's roll angle as-is.
    pub fn apply_roll_assist(&self, value: f32) -> Option<f32> {
        let value = value.clamp(-1.0, 1.0);
        (!self.is_turning && value.abs() > TURN_DEADZONE).then_some(value)
    }

    /// Consume this frame's rates. Roll is only applied while turning, and the
    /// turning flag is cleared afterwards.
    pub fn tick(&mut self, dt: f32) -> FlightStep {
        let roll = if self.is_turning {
            self.roll_rate * dt
        } else {
            0.0
        };
        self.is_turning = false;

        let step = FlightStep {
            position_delta: Vec3::new(self.forward_speed * dt, 0.0, 0.0),
            rotation_delta: Rotator::new(self.pitch_rate * dt, self.yaw_rate * dt, roll),
        };
        tracing::trace!(
            speed = self.forward_speed,
            pitch = step.rotation_delta.pitch,
            yaw = step.rotation_delta.yaw,
            roll = step.rotation_delta.roll,
            "flight tick"
        );
        step
    }

    /// Deflect along a surface: rotate a fixed fraction of the way from
    /// `current` toward the orientation facing along `surface_normal`.
    pub fn on_surface_contact(&self, current: Quat, surface_normal: Vec3) -> Quat {
        let target = orientation_from_direction(surface_normal);
        current.slerp(target, CONTACT_DEFLECTION).normalize()
    }
}

impl Default for FlightController {
    fn default() -> Self {
        Self::new(FlightTuning::default())
    }
}
