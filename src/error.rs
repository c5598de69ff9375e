use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the collision sampler and its collaborators.
///
/// Construction-time problems surface as `InvalidParam` before any event is
/// sampled. Failures raised while an event is being prepared propagate through
/// the event loop unchanged and abort the run.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid user or API parameter.
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    /// A collaborator could not produce a nucleon configuration
    /// (e.g., minimum-distance placement exhausted its attempts).
    #[error("sampling failed: {0}")]
    Sampling(String),

    /// Propagated I/O errors from configuration files and event output.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Malformed YAML configuration.
    #[error("configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
