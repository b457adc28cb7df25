//! Manifest types describing a set of component instances.

use crate::params::Params;
use serde::{Deserialize, Serialize};

/// A circuit manifest: the component instances a host wants built.
///
/// In TOML each instance is a `[[module]]` table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CircuitConfig {
    /// Module instances in declaration order.
    #[serde(default, rename = "module")]
    pub modules: Vec<ModuleConfig>,
}

impl CircuitConfig {
    /// Finds a module instance by name.
    pub fn module(&self, name: &str) -> Option<&ModuleConfig> {
        self.modules.iter().find(|m| m.name == name)
    }
}

/// One component instance: a unique name, a kind and its parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleConfig {
    /// Instance name, unique within the manifest.
    pub name: String,
    /// Component kind, e.g. `"counter"` or `"block_ram"`.
    pub kind: String,
    /// Construction parameters.
    #[serde(default)]
    pub params: Params,
}

impl ModuleConfig {
    /// Creates an instance description with no parameters.
    pub fn new(name: &str, kind: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: kind.to_string(),
            params: Params::new(),
        }
    }

    /// Returns this description with an additional parameter.
    pub fn param(mut self, name: &str, value: impl Into<crate::ParamValue>) -> Self {
        self.params.insert(name, value);
        self
    }
}
