use serde::{Deserialize, Serialize};

/// Pawn types a session knows how to spawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PawnClass {
    #[default]
    AeroFighter,
}

impl PawnClass {
    /// Class name the pawn's actor carries in the world.
    pub fn name(&self) -> &'static str {
        match self {
            PawnClass::AeroFighter => "AeroFighter",
        }
    }
}

impl std::fmt::Display for PawnClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Session rules: which pawn the player is handed on start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameMode {
    pub default_pawn_class: PawnClass,
}

impl GameMode {
    pub fn aero_fighters() -> Self {
        Self {
            default_pawn_class: PawnClass::AeroFighter,
        }
    }
}

impl Default for GameMode {
    fn default() -> Self {
        Self::aero_fighters()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aero_fighters_mode_uses_aero_fighter_pawn() {
        let mode = GameMode::default();
        assert_eq!(mode, GameMode::aero_fighters());
        assert_eq!(mode.default_pawn_class.to_string(), "AeroFighter");
    }
}
