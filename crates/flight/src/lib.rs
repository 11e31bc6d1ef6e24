//! Aircraft controllers. Both are plain state machines driven once per frame;
//! neither owns the actor transform. They return deltas and requests that the
//! host applies.
//!
//! # Invariants
//! - `min_speed <= forward_speed <= max_speed` after every operation.
//! - A successful fire closes the gate until exactly one cooldown expiry reopens it.
//! - Failed fire requests are silent no-ops, never errors.

pub mod flight;
pub mod weapon;

pub use flight::{FlightController, FlightStep, FlightTuning};
pub use weapon::{
    CooldownScheduler, MuzzlePoses, ProjectileClass, SpawnRequest, WeaponController, WeaponTuning,
};
