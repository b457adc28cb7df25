//! Component parameters and circuit manifests for logicmod.
//!
//! Every component reads its configuration once, at construction, through a
//! typed [`Params`] lookup. A host that keeps its circuit description on disk
//! can use [`load_config`] to read a TOML manifest of module instances into a
//! [`CircuitConfig`].

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod params;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str};
pub use params::{ParamValue, Params};
pub use types::{CircuitConfig, ModuleConfig};
