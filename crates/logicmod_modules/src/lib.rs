//! Behavioral models of digital logic components.
//!
//! Each component kind is a [`Behavior`]: it declares named, fixed-width
//! pins from its parameters and, on every recompute, maps its inputs and
//! explicit state to a next state plus output writes. A host engine builds
//! components from a manifest with [`instantiate`], drives inputs through
//! [`LogicModule::set_input`] and calls [`LogicModule::recompute`] until no
//! output changes.
//!
//! Edge-triggered components remember the clock level from their previous
//! recompute, so recomputing several times within one tick never triggers a
//! second edge.

#![warn(missing_docs)]

pub mod components;
pub mod edge;
pub mod error;
pub mod kind;
pub mod limits;
pub mod module;
pub mod pin;

pub use edge::Edge;
pub use error::ModuleError;
pub use kind::{instantiate, instantiate_all, ModuleKind};
pub use module::{Behavior, LogicModule, Module, Transition};
pub use pin::{Pin, PinBank, PinDirection, PinId};

pub use logicmod_common::{BusValue, Logic, Signal};
pub use logicmod_config::{CircuitConfig, ModuleConfig, Params};
