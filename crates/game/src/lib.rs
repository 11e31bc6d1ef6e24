//! Gameplay layer: the AeroFighter pawn, the game mode that names it as the
//! default pawn, and a session that drives both against the kernel world.
//!
//! # Invariants
//! - The pawn exclusively owns its controllers and component tree.
//! - Per frame: input dispatch, then pawn tick (swept move, contact, rotation), then timers.
//! - The default-pawn binding is a value handed to [`Session::start`], not global state.

pub mod config;
pub mod error;
pub mod mode;
pub mod pawn;
pub mod session;

pub use config::{GameConfig, Obstacle, PawnConfig};
pub use error::{ConfigError, GameError};
pub use mode::{GameMode, PawnClass};
pub use pawn::{AeroPawn, PROJECTILE_LIFESPAN, SHOT_TIMER};
pub use session::{FrameReport, Session};
