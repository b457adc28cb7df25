//! Error types for component construction and host pin access.
//!
//! Recompute never fails; every variant here is raised either while a
//! component is declared or when a host addresses its pins.

use logicmod_common::SignalError;
use logicmod_config::ConfigError;

/// Errors that can occur when building a component or driving its pins.
#[derive(Debug, thiserror::Error)]
pub enum ModuleError {
    /// The manifest named a component kind this library does not provide.
    #[error("unknown module kind '{0}'")]
    UnknownKind(String),

    /// No pin with the given name exists on the component.
    #[error("unknown pin '{0}'")]
    UnknownPin(String),

    /// The host tried to drive a pin the component owns.
    #[error("pin '{0}' is an output and cannot be driven by the host")]
    NotAnInput(String),

    /// A component declared the same pin name twice.
    #[error("duplicate pin '{0}'")]
    DuplicatePin(String),

    /// A signal's width does not match the pin it was written to.
    #[error("width mismatch on pin '{pin}': expected {expected}, got {actual}")]
    WidthMismatch {
        /// The pin name.
        pin: String,
        /// The declared pin width.
        expected: u32,
        /// The width of the offered signal.
        actual: u32,
    },

    /// A parameter was present and well-typed but out of range.
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// The parameter name.
        name: String,
        /// Description of the accepted range.
        reason: String,
    },

    /// A parameter lookup failed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A signal or bus width was malformed.
    #[error(transparent)]
    Signal(#[from] SignalError),
}
