use aerofighters_common::EntityId;
use aerofighters_input::InputError;
use aerofighters_scene::SceneError;

/// Errors from loading or validating a [`GameConfig`](crate::GameConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Errors from session setup and the per-frame pawn contract.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("no input component to bind axes to")]
    MissingInputComponent,
    #[error("pawn actor {0:?} is not in the world")]
    PawnNotInWorld(EntityId),
    #[error("session has no possessed pawn")]
    NoPawn,
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Scene(#[from] SceneError),
}
