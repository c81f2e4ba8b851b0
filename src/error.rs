//! Error types shared by the generation passes and the pipeline.

use thiserror::Error;

/// Errors raised by grid-level operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridError {
    /// The field has no dynamic range (every value is the same, or it is empty).
    #[error("cannot normalize a field with no dynamic range (all values are {value})")]
    Degenerate { value: f32 },
}

/// Errors raised while interpreting or validating configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown heightmap bias '{0}'")]
    UnknownHeightmapBias(String),
    #[error("unknown rainfall model '{0}'")]
    UnknownRainfallModel(String),
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

/// Failure of a single generation pass.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerationError {
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors that can occur during pipeline execution.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("generator '{generator}' failed: {source}")]
    GeneratorFailed {
        generator: String,
        #[source]
        source: GenerationError,
    },
}
