use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::InputError;

/// A named per-frame input axis. Values are floats in [-1, 1].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Axis {
    Thrust,
    /// Pitch.
    MoveUp,
    /// Direct roll nudge.
    LoopRight,
    /// Yaw.
    TurnRight,
    FireWeapon,
}

impl Axis {
    pub const ALL: [Axis; 5] = [
        Axis::Thrust,
        Axis::MoveUp,
        Axis::LoopRight,
        Axis::TurnRight,
        Axis::FireWeapon,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Axis::Thrust => "Thrust",
            Axis::MoveUp => "MoveUp",
            Axis::LoopRight => "LoopRight",
            Axis::TurnRight => "TurnRight",
            Axis::FireWeapon => "FireWeapon",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Axis {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Axis::ALL
            .into_iter()
            .find(|a| a.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| InputError::UnknownAxis(s.to_string()))
    }
}

/// Physical keys the default bindings and scripted runs can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Key {
    W,
    A,
    S,
    D,
    Q,
    E,
    Up,
    Down,
    Left,
    Right,
    Space,
    LeftMouse,
}

impl Key {
    pub const ALL: [Key; 12] = [
        Key::W,
        Key::A,
        Key::S,
        Key::D,
        Key::Q,
        Key::E,
        Key::Up,
        Key::Down,
        Key::Left,
        Key::Right,
        Key::Space,
        Key::LeftMouse,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Key::W => "W",
            Key::A => "A",
            Key::S => "S",
            Key::D => "D",
            Key::Q => "Q",
            Key::E => "E",
            Key::Up => "Up",
            Key::Down => "Down",
            Key::Left => "Left",
            Key::Right => "Right",
            Key::Space => "Space",
            Key::LeftMouse => "LeftMouse",
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Key {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Key::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| InputError::UnknownKey(s.to_string()))
    }
}
