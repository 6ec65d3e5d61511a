use thiserror::Error;

/// Rejected configuration, reported before a match starts.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Config IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Errors surfaced by the simulation step.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Step duration was zero, negative or not finite
    #[error("Invalid step duration: {0}")]
    InvalidDelta(f32),
    /// The simulation reached a state the collision resolver should have prevented
    #[error("Invariant violation: {0}")]
    Invariant(String),
}
