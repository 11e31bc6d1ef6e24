//! World Kernel: the host side of the flight module. Owns actor transforms,
//! applies swept motion, reports blocking contacts, runs one-shot timers and
//! realizes spawn requests.
//!
//! # Invariants
//! - Actors never own their transform; every mutation goes through [`World`].
//! - Every mutation appends to the event log.
//! - Despawning an actor cancels all timers it owns, so no callback outlives it.

pub mod collision;
pub mod timer;
pub mod world;

pub use collision::{Collider, HitResult};
pub use timer::{FiredTimer, TimerHandle, TimerManager, TimerTag};
pub use world::{EntityData, World, WorldEvent};
