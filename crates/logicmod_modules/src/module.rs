//! The behavior contract shared by every component kind.
//!
//! A component kind implements [`Behavior`]: it declares its pins once from
//! its parameters, then maps the current inputs and its explicit state to a
//! [`Transition`] on every recompute. [`Module`] wraps a behavior with its
//! pins and state and applies those transitions; hosts hold modules as
//! `Box<dyn LogicModule>`.

use crate::error::ModuleError;
use crate::kind::ModuleKind;
use crate::pin::{PinBank, PinDirection, PinId};
use logicmod_common::Signal;
use logicmod_config::Params;
use std::fmt::Debug;

/// The per-kind behavior of a component.
pub trait Behavior: Sized + Send + Debug + 'static {
    /// The kind this behavior implements.
    const KIND: ModuleKind;

    /// Internal state owned by one component instance.
    type State: Clone + Debug + PartialEq + Default + Send;

    /// Reads parameters and declares pins.
    fn declare(params: &Params, pins: &mut PinBank) -> Result<Self, ModuleError>;

    /// Returns the power-on state.
    fn initial_state(&self) -> Self::State;

    /// Computes the next state and output writes from the current inputs.
    ///
    /// Must not have side effects: everything the call changes is returned
    /// in the [`Transition`].
    fn recompute(&self, pins: &PinBank, state: Self::State) -> Transition<Self::State>;
}

/// The result of one recompute: the next state and the output pins to drive.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition<S> {
    /// The component state after this recompute.
    pub state: S,
    /// Output writes, applied in order.
    pub writes: Vec<(PinId, Signal)>,
}

impl<S> Transition<S> {
    /// A transition that leaves every output untouched.
    pub fn hold(state: S) -> Self {
        Self {
            state,
            writes: Vec::new(),
        }
    }

    /// Adds an output write.
    pub fn write(mut self, pin: PinId, signal: Signal) -> Self {
        self.writes.push((pin, signal));
        self
    }
}

/// The object-safe view of a component instance held by a host.
pub trait LogicModule: Send + Debug {
    /// The instance name.
    fn name(&self) -> &str;

    /// The component kind.
    fn kind(&self) -> ModuleKind;

    /// The component's pins.
    fn pins(&self) -> &PinBank;

    /// Drives an input pin.
    fn set_input(&mut self, pin: &str, signal: Signal) -> Result<(), ModuleError>;

    /// Recomputes the component, returning true if any output changed.
    fn recompute(&mut self) -> bool;

    /// Returns the current signal on a pin.
    fn signal(&self, pin: &str) -> Result<Signal, ModuleError> {
        let pins = self.pins();
        Ok(*pins.signal(pins.require(pin)?))
    }

    /// Drives an input pin with a fully driven value of the pin's width.
    fn set_value(&mut self, pin: &str, value: u32) -> Result<(), ModuleError> {
        let pins = self.pins();
        let width = pins.pin(pins.require(pin)?).width;
        self.set_input(pin, Signal::from_u32(value, width))
    }

    /// Returns the driven bits of a pin as an integer.
    fn value(&self, pin: &str) -> Result<u32, ModuleError> {
        Ok(self.signal(pin)?.value())
    }
}

/// A component instance: a behavior, its pins and its current state.
#[derive(Debug)]
pub struct Module<B: Behavior> {
    name: String,
    behavior: B,
    pins: PinBank,
    state: B::State,
}

impl<B: Behavior> Module<B> {
    /// Declares a new instance from its parameters.
    pub fn new(name: &str, params: &Params) -> Result<Self, ModuleError> {
        let mut pins = PinBank::new();
        let behavior = B::declare(params, &mut pins)?;
        let state = behavior.initial_state();
        log::debug!(
            "declared {} module '{}' with {} pins",
            B::KIND,
            name,
            pins.len()
        );
        Ok(Self {
            name: name.to_string(),
            behavior,
            pins,
            state,
        })
    }

    /// Returns the behavior, with its pin handles and fixed configuration.
    pub fn behavior(&self) -> &B {
        &self.behavior
    }

    /// Returns the current internal state.
    pub fn state(&self) -> &B::State {
        &self.state
    }
}

impl<B: Behavior> LogicModule for Module<B> {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ModuleKind {
        B::KIND
    }

    fn pins(&self) -> &PinBank {
        &self.pins
    }

    fn set_input(&mut self, pin: &str, signal: Signal) -> Result<(), ModuleError> {
        let id = self.pins.require(pin)?;
        let declared = self.pins.pin(id);
        if declared.direction != PinDirection::Input {
            return Err(ModuleError::NotAnInput(pin.to_string()));
        }
        if declared.width != signal.width() {
            return Err(ModuleError::WidthMismatch {
                pin: pin.to_string(),
                expected: declared.width,
                actual: signal.width(),
            });
        }
        self.pins.drive(id, signal);
        Ok(())
    }

    fn recompute(&mut self) -> bool {
        let state = std::mem::take(&mut self.state);
        let transition = self.behavior.recompute(&self.pins, state);
        self.state = transition.state;
        let mut changed = false;
        for (id, signal) in transition.writes {
            debug_assert_eq!(self.pins.pin(id).direction, PinDirection::Output);
            if self.pins.drive(id, signal) {
                log::trace!(
                    "{}.{} <= {}",
                    self.name,
                    self.pins.pin(id).name,
                    signal
                );
                changed = true;
            }
        }
        changed
    }
}
