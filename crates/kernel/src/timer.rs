use std::collections::BTreeMap;

use aerofighters_common::EntityId;
use serde::{Deserialize, Serialize};

/// Handle returned by [`TimerManager::set_timer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerHandle(pub u64);

/// Caller-chosen label telling the owner which callback a timer stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerTag(pub u32);

/// A timer that expired during [`TimerManager::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FiredTimer {
    pub handle: TimerHandle,
    pub owner: EntityId,
    pub tag: TimerTag,
}

#[derive(Debug, Clone, Copy)]
struct PendingTimer {
    owner: EntityId,
    tag: TimerTag,
    fire_at: f32,
}

/// One-shot timers measured in simulated seconds.
///
/// Timers fire at most once. A delay of zero (or less) fires on the next advance.
#[derive(Debug, Clone, Default)]
pub struct TimerManager {
    pending: BTreeMap<TimerHandle, PendingTimer>,
    next_handle: u64,
    now: f32,
}

impl TimerManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulated time seen by the timers.
    pub fn now(&self) -> f32 {
        self.now
    }

    pub fn set_timer(&mut self, owner: EntityId, tag: TimerTag, delay: f32) -> TimerHandle {
        self.next_handle += 1;
        let handle = TimerHandle(self.next_handle);
        let fire_at = self.now + delay.max(0.0);
        self.pending.insert(
            handle,
            PendingTimer {
                owner,
                tag,
                fire_at,
            },
        );
        tracing::trace!(?handle, ?tag, owner = %owner.short(), fire_at, "timer set");
        handle
    }

    /// Cancel a pending timer. Returns false if it already fired or never existed.
    pub fn clear_timer(&mut self, handle: TimerHandle) -> bool {
        self.pending.remove(&handle).is_some()
    }

    /// Cancel every timer owned by `owner`. Returns how many were cancelled.
    pub fn clear_all_for(&mut self, owner: EntityId) -> usize {
        let before = self.pending.len();
        self.pending.retain(|_, t| t.owner != owner);
        before - self.pending.len()
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.pending.contains_key(&handle)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Seconds left before `handle` fires.
    pub fn time_remaining(&self, handle: TimerHandle) -> Option<f32> {
        self.pending
            .get(&handle)
            .map(|t| (t.fire_at - self.now).max(0.0))
    }

    /// Advance simulated time and return every expired timer, earliest first.
    pub fn advance(&mut self, dt: f32) -> Vec<FiredTimer> {
        self.now += dt.max(0.0);
        let now = self.now;
        let mut due: Vec<(f32, TimerHandle)> = self
            .pending
            .iter()
            .filter(|(_, t)| t.fire_at <= now)
            .map(|(h, t)| (t.fire_at, *h))
            .collect();
        due.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

        due.into_iter()
            .filter_map(|(_, handle)| {
                self.pending.remove(&handle).map(|t| FiredTimer {
                    handle,
                    owner: t.owner,
                    tag: t.tag,
                })
            })
            .collect()
    }
}
