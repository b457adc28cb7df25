//! Component pins and the per-instance pin bank.
//!
//! A [`PinBank`] owns every pin of one component in declaration order. Pins
//! are addressed inside the component by the [`PinId`] returned from
//! [`PinBank::declare`] and by name from the host side.

use crate::error::ModuleError;
use logicmod_common::{BusValue, Signal};
use serde::{Deserialize, Serialize};

/// Opaque, copyable handle for a pin within its component's [`PinBank`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct PinId(u32);

impl PinId {
    /// Creates an ID from a raw `u32` index.
    pub fn from_raw(index: u32) -> Self {
        Self(index)
    }

    /// Returns the raw `u32` index.
    pub fn as_raw(self) -> u32 {
        self.0
    }
}

/// The direction of a pin on a component boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PinDirection {
    /// Written by the host, read by the component.
    Input,
    /// Written by the component, read by the host.
    Output,
}

/// One named, fixed-width pin and the signal currently on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pin {
    /// The pin name, unique within its component.
    pub name: String,
    /// Whether the host or the component drives this pin.
    pub direction: PinDirection,
    /// The bus width in bits.
    pub width: u32,
    /// The current signal.
    pub signal: Signal,
}

/// The pins of one component, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinBank {
    pins: Vec<Pin>,
}

impl PinBank {
    /// Creates an empty pin bank.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a new pin, powered on in high-impedance.
    pub fn declare(
        &mut self,
        name: impl Into<String>,
        direction: PinDirection,
        width: u32,
    ) -> Result<PinId, ModuleError> {
        let name = name.into();
        BusValue::try_new(width)?;
        if self.find(&name).is_some() {
            return Err(ModuleError::DuplicatePin(name));
        }
        let id = PinId::from_raw(self.pins.len() as u32);
        self.pins.push(Pin {
            name,
            direction,
            width,
            signal: Signal::high_z(width),
        });
        Ok(id)
    }

    /// Declares an input pin.
    pub fn input(&mut self, name: impl Into<String>, width: u32) -> Result<PinId, ModuleError> {
        self.declare(name, PinDirection::Input, width)
    }

    /// Declares an output pin.
    pub fn output(&mut self, name: impl Into<String>, width: u32) -> Result<PinId, ModuleError> {
        self.declare(name, PinDirection::Output, width)
    }

    /// Looks up a pin by name.
    pub fn find(&self, name: &str) -> Option<PinId> {
        self.pins
            .iter()
            .position(|p| p.name == name)
            .map(|i| PinId::from_raw(i as u32))
    }

    /// Looks up a pin by name, failing with [`ModuleError::UnknownPin`].
    pub fn require(&self, name: &str) -> Result<PinId, ModuleError> {
        self.find(name)
            .ok_or_else(|| ModuleError::UnknownPin(name.to_string()))
    }

    /// Returns the pin with the given ID.
    ///
    /// # Panics
    ///
    /// Panics if the ID was not issued by this bank.
    pub fn pin(&self, id: PinId) -> &Pin {
        &self.pins[id.as_raw() as usize]
    }

    /// Returns the current signal on a pin.
    pub fn signal(&self, id: PinId) -> &Signal {
        &self.pin(id).signal
    }

    /// Returns the driven bits of a pin as an integer; undriven bits read 0.
    pub fn value(&self, id: PinId) -> u32 {
        self.signal(id).value()
    }

    /// Returns true if bit 0 of the pin is driven high.
    pub fn is_high(&self, id: PinId) -> bool {
        self.signal(id).is_high()
    }

    /// Replaces the signal on a pin, returning true if it changed.
    pub(crate) fn drive(&mut self, id: PinId, signal: Signal) -> bool {
        let pin = &mut self.pins[id.as_raw() as usize];
        debug_assert_eq!(pin.width, signal.width(), "width of pin '{}'", pin.name);
        if pin.signal == signal {
            return false;
        }
        pin.signal = signal;
        true
    }

    /// Returns the number of pins.
    pub fn len(&self) -> usize {
        self.pins.len()
    }

    /// Returns `true` if no pins are declared.
    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }

    /// Iterates over `(ID, &Pin)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (PinId, &Pin)> {
        self.pins
            .iter()
            .enumerate()
            .map(|(i, p)| (PinId::from_raw(i as u32), p))
    }

    /// Iterates over the input pins.
    pub fn inputs(&self) -> impl Iterator<Item = (PinId, &Pin)> {
        self.iter()
            .filter(|(_, p)| p.direction == PinDirection::Input)
    }

    /// Returns a snapshot of every output signal in declaration order.
    pub fn outputs(&self) -> Vec<(PinId, Signal)> {
        self.iter()
            .filter(|(_, p)| p.direction == PinDirection::Output)
            .map(|(id, p)| (id, p.signal))
            .collect()
    }
}
