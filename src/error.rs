use thiserror::Error;

/// Errors raised while loading and compiling the declarative route source.
///
/// All of these are fatal to route-table construction: the table is never
/// published partially built, so startup fails atomically on the first one.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed path '{path}': {reason}")]
    MalformedPath { path: String, reason: String },

    #[error("unrecognized http method: '{0}'")]
    UnknownMethod(String),

    #[error("unrecognized parameter type: '{0}'")]
    UnknownParameterType(String),

    #[error("unrecognized parameter source: '{0}'")]
    UnknownParameterSource(String),

    #[error("invalid parameter pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("at least one callback is required")]
    NoCallbacks,

    #[error("could not find callback in callback map: '{0}'")]
    UnknownCallback(String),

    #[error("multiple routes mount at the same handle path: '{0}'")]
    DuplicateMountPath(String),

    #[error("failed to read route source: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse route source: {0}")]
    Parse(#[from] serde_yaml::Error),
}
