use thiserror::Error;

/// Errors surfaced by graph evaluation.
///
/// Marked `#[non_exhaustive]` so new variants can be added without breaking
/// downstream matches.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ModelError {
    /// A latent variable reachable from the root has no entry in the
    /// supplied value map.
    #[error("no value supplied for latent variable `{0}`")]
    MissingLatent(String),

    /// The dependency graph contains a cycle through the named variable.
    #[error("dependency cycle through variable `{0}`")]
    Cycle(String),

    /// A distribution received the wrong number of parameters.
    #[error("distribution `{family}` expects {expected} parameters, got {got}")]
    ParamCount {
        family: &'static str,
        expected: usize,
        got: usize,
    },

    /// A distribution received parameters outside its valid domain
    /// (e.g. a non-positive scale).
    #[error("invalid parameters for `{family}`: {reason}")]
    InvalidParams {
        family: &'static str,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, ModelError>;
