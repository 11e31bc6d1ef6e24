//! Input dispatch: raw key state resolved into the named axes the pawn binds.
//!
//! # Invariants
//! - Axis values are clamped to [-1, 1].
//! - Bound axes are dispatched every frame, in binding order, even when neutral.

pub mod axis;
pub mod bindings;

pub use axis::{Axis, Key};
pub use bindings::{AxisMapping, InputMap, KeyState};

/// Errors from input configuration.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("unknown axis name {0:?}")]
    UnknownAxis(String),
    #[error("unknown key name {0:?}")]
    UnknownKey(String),
    #[error("key {key:?} is mapped to axis {axis:?} more than once")]
    DuplicateMapping { axis: Axis, key: Key },
    #[error("axis {0:?} is already bound")]
    AlreadyBound(Axis),
}
