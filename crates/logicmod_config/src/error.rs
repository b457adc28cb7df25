//! Error types for parameter lookup and manifest loading.

/// Errors that can occur when reading parameters or loading a circuit manifest.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An I/O error occurred while reading the manifest file.
    #[error("failed to read configuration: {0}")]
    IoError(#[from] std::io::Error),

    /// The TOML content could not be parsed.
    #[error("failed to parse configuration: {0}")]
    ParseError(String),

    /// A required parameter was not supplied.
    #[error("missing parameter '{0}'")]
    MissingParameter(String),

    /// A parameter was supplied with the wrong type.
    #[error("parameter '{name}' must be {expected}")]
    ParameterType {
        /// The parameter name.
        name: String,
        /// Human-readable description of the expected type.
        expected: &'static str,
    },

    /// Two module instances share the same name.
    #[error("duplicate module name '{0}'")]
    DuplicateModule(String),

    /// A required field is missing from the manifest.
    #[error("missing required field: {0}")]
    MissingField(String),
}
