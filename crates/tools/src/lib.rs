//! Developer tooling: read-only inspection of a running session.
//!
//! # Invariants
//! - Inspectors never mutate the world or the pawn.

mod inspector;

pub use inspector::{ActorInfo, FlightInspector, PawnInfo, SessionSummary};

pub fn crate_info() -> &'static str {
    concat!("aerofighters-tools v", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("tools"));
    }
}
