use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::InputError;
use crate::axis::{Axis, Key};

/// One key contributing `scale` to an axis while held.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisMapping {
    pub axis: Axis,
    pub key: Key,
    pub scale: f32,
}

impl AxisMapping {
    pub fn new(axis: Axis, key: Key, scale: f32) -> Self {
        Self { axis, key, scale }
    }

    /// Keyboard layout used when no configuration overrides it.
    pub fn defaults() -> Vec<AxisMapping> {
        vec![
            AxisMapping::new(Axis::Thrust, Key::W, 1.0),
            AxisMapping::new(Axis::Thrust, Key::S, -1.0),
            AxisMapping::new(Axis::MoveUp, Key::Up, 1.0),
            AxisMapping::new(Axis::MoveUp, Key::Down, -1.0),
            AxisMapping::new(Axis::TurnRight, Key::D, 1.0),
            AxisMapping::new(Axis::TurnRight, Key::A, -1.0),
            AxisMapping::new(Axis::TurnRight, Key::Right, 1.0),
            AxisMapping::new(Axis::TurnRight, Key::Left, -1.0),
            AxisMapping::new(Axis::LoopRight, Key::E, 1.0),
            AxisMapping::new(Axis::LoopRight, Key::Q, -1.0),
            AxisMapping::new(Axis::FireWeapon, Key::Space, 1.0),
            AxisMapping::new(Axis::FireWeapon, Key::LeftMouse, 1.0),
        ]
    }
}

/// Keys held during one frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyState {
    held: BTreeSet<Key>,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        self.held.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.held.remove(&key);
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    pub fn is_empty(&self) -> bool {
        self.held.is_empty()
    }
}

impl FromIterator<Key> for KeyState {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        Self {
            held: iter.into_iter().collect(),
        }
    }
}

/// Axis mappings plus the ordered list of axes an actor has bound.
#[derive(Debug, Clone, Default)]
pub struct InputMap {
    mappings: Vec<AxisMapping>,
    bound: Vec<Axis>,
}

impl InputMap {
    /// Build a map from mappings, rejecting a key mapped twice to the same axis.
    pub fn new(mappings: Vec<AxisMapping>) -> Result<Self, InputError> {
        let mut seen = BTreeSet::new();
        for m in &mappings {
            if !seen.insert((m.axis, m.key)) {
                return Err(InputError::DuplicateMapping {
                    axis: m.axis,
                    key: m.key,
                });
            }
        }
        Ok(Self {
            mappings,
            bound: Vec::new(),
        })
    }

    pub fn with_defaults() -> Self {
        Self {
            mappings: AxisMapping::defaults(),
            bound: Vec::new(),
        }
    }

    pub fn mappings(&self) -> &[AxisMapping] {
        &self.mappings
    }

    /// Register interest in `axis`. Dispatch follows registration order.
    pub fn bind_axis(&mut self, axis: Axis) -> Result<(), InputError> {
        if self.bound.contains(&axis) {
            return Err(InputError::AlreadyBound(axis));
        }
        tracing::debug!(%axis, "bound axis");
        self.bound.push(axis);
        Ok(())
    }

    pub fn bound_axes(&self) -> &[Axis] {
        &self.bound
    }

    /// Sum of the scales of every held key mapped to `axis`, clamped to [-1, 1].
    pub fn axis_value(&self, axis: Axis, keys: &KeyState) -> f32 {
        self.mappings
            .iter()
            .filter(|m| m.axis == axis && keys.is_held(m.key))
            .map(|m| m.scale)
            .sum::<f32>()
            .clamp(-1.0, 1.0)
    }

    /// Values for every bound axis, in binding order.
    pub fn dispatch(&self, keys: &KeyState) -> Vec<(Axis, f32)> {
        self.bound
            .iter()
            .map(|&axis| (axis, self.axis_value(axis, keys)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposing_keys_cancel() {
        let map = InputMap::with_defaults();
        let keys: KeyState = [Key::W, Key::S].into_iter().collect();
        assert_eq!(map.axis_value(Axis::Thrust, &keys), 0.0);
    }

    #[test]
    fn stacked_keys_clamp() {
        let map = InputMap::with_defaults();
        let keys: KeyState = [Key::Space, Key::LeftMouse].into_iter().collect();
        assert_eq!(map.axis_value(Axis::FireWeapon, &keys), 1.0);
    }

    #[test]
    fn negative_scale() {
        let map = InputMap::with_defaults();
        let keys: KeyState = [Key::A].into_iter().collect();
        assert_eq!(map.axis_value(Axis::TurnRight, &keys), -1.0);
    }

    #[test]
    fn every_key_has_a_default_mapping() {
        let defaults = AxisMapping::defaults();
        for key in Key::ALL {
            assert!(defaults.iter().any(|m| m.key == key), "{key} is unmapped");
        }
    }

    #[test]
    fn arrow_keys_turn() {
        let map = InputMap::with_defaults();
        let left: KeyState = [Key::Left].into_iter().collect();
        let both: KeyState = [Key::Right, Key::D].into_iter().collect();
        assert_eq!(map.axis_value(Axis::TurnRight, &left), -1.0);
        assert_eq!(map.axis_value(Axis::TurnRight, &both), 1.0);
    }

    #[test]
    fn duplicate_mapping_rejected() {
        let err = InputMap::new(vec![
            AxisMapping::new(Axis::Thrust, Key::W, 1.0),
            AxisMapping::new(Axis::Thrust, Key::W, 0.5),
        ]);
        assert!(matches!(err, Err(InputError::DuplicateMapping { .. })));
    }

    #[test]
    fn same_key_on_two_axes_is_allowed() {
        assert!(
            InputMap::new(vec![
                AxisMapping::new(Axis::Thrust, Key::W, 1.0),
                AxisMapping::new(Axis::MoveUp, Key::W, 1.0),
            ])
            .is_ok()
        );
    }

    #[test]
    fn dispatch_follows_binding_order_and_includes_neutral_axes() {
        let mut map = InputMap::with_defaults();
        map.bind_axis(Axis::TurnRight).unwrap();
        map.bind_axis(Axis::Thrust).unwrap();
        let keys: KeyState = [Key::W].into_iter().collect();
        assert_eq!(
            map.dispatch(&keys),
            vec![(Axis::TurnRight, 0.0), (Axis::Thrust, 1.0)]
        );
    }

    #[test]
    fn double_bind_rejected() {
        let mut map = InputMap::with_defaults();
        map.bind_axis(Axis::Thrust).unwrap();
        assert!(matches!(
            map.bind_axis(Axis::Thrust),
            Err(InputError::AlreadyBound(Axis::Thrust))
        ));
    }

    #[test]
    fn key_state_press_release() {
        let mut keys = KeyState::new();
        keys.press(Key::Q);
        assert!(keys.is_held(Key::Q));
        keys.release(Key::Q);
        assert!(keys.is_empty());
    }
}
