//! Shared types for the aerofighters workspace: entity identity, transforms,
//! Euler rotators and the scalar/vector interpolation helpers the flight
//! model is built on.
//!
//! # Conventions
//! - Local frame: +X forward, +Y right, +Z up. Distances in centimetres.
//! - Angles in [`Rotator`] are degrees; quaternions are the canonical storage.

pub mod math;
pub mod types;

pub use math::{interp_to, is_nearly_zero, orientation_from_direction, vinterp_to};
pub use types::{EntityId, Rotator, Transform};
