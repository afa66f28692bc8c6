use thiserror::Error;

/// Rejected configuration values.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("`{field}` must be finite, got {value}")]
    NotFinite { field: &'static str, value: f64 },

    #[error("`{field}` must be greater than zero, got {value}")]
    NotPositive { field: &'static str, value: f64 },

    #[error("`{field}` must lie in {range}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        range: &'static str,
    },

    /// returnSpeed scaled by the snap and focus multipliers exceeds 1.0.
    #[error("combined return speed {effective} exceeds 1.0 (returnSpeed x snapReturnScale x focusReturnScale)")]
    UnstableReturn { effective: f64 },

    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Problems with the decoded source pixels.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("image is not decoded yet ({width}x{height})")]
    NotDecoded { width: u32, height: u32 },

    #[error("expected {expected} RGBA bytes for a {width}x{height} image, got {actual}")]
    LengthMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

/// Errors surfaced by the running effect.
#[derive(Debug, Error)]
pub enum EffectError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Source(#[from] SourceError),

    /// Scheduling or presentation failed on the host side.
    #[error("host failure: {0}")]
    Host(String),
}
