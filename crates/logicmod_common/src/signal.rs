//! Tri-state signals: a driven level paired with a high-impedance mask.

use crate::bus_value::BusValue;
use crate::error::SignalError;
use crate::logic::Logic;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A tri-state bus value.
///
/// Bit `i` is driven iff bit `i` of the high-impedance mask is 0. The level of
/// an undriven bit carries no meaning; constructors normalise it to 0 so two
/// signals compare equal whenever their driven bits agree and their masks
/// match.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawSignal")]
pub struct Signal {
    level: BusValue,
    high_z: BusValue,
}

#[derive(Deserialize)]
struct RawSignal {
    level: BusValue,
    high_z: BusValue,
}

impl TryFrom<RawSignal> for Signal {
    type Error = SignalError;

    fn try_from(raw: RawSignal) -> Result<Self, SignalError> {
        Self::with_high_z(raw.level, raw.high_z)
    }
}

impl Signal {
    /// Creates a signal with every bit driven low.
    pub fn low(width: u32) -> Self {
        Self::driven(BusValue::all_zero(width))
    }

    /// Creates a signal with every bit driven high.
    pub fn high(width: u32) -> Self {
        Self::driven(BusValue::all_one(width))
    }

    /// Creates a signal with every bit in high-impedance.
    pub fn high_z(width: u32) -> Self {
        Self {
            level: BusValue::all_zero(width),
            high_z: BusValue::all_one(width),
        }
    }

    /// Creates a fully driven signal with the given level.
    pub fn driven(level: BusValue) -> Self {
        Self {
            level,
            high_z: BusValue::all_zero(level.width()),
        }
    }

    /// Creates a fully driven signal from the low `width` bits of `value`.
    pub fn from_u32(value: u32, width: u32) -> Self {
        Self::driven(BusValue::from_u32(value, width))
    }

    /// Creates a fully driven single-bit signal.
    pub fn from_bool(value: bool) -> Self {
        Self::from_u32(u32::from(value), 1)
    }

    /// Creates a signal from an explicit level and high-impedance mask.
    ///
    /// Level bits under the mask are cleared.
    pub fn with_high_z(level: BusValue, high_z: BusValue) -> Result<Self, SignalError> {
        if level.width() != high_z.width() {
            return Err(SignalError::WidthMismatch {
                level: level.width(),
                high_z: high_z.width(),
            });
        }
        Ok(Self {
            level: level & !high_z,
            high_z,
        })
    }

    /// Returns the bus width of this signal.
    pub fn width(&self) -> u32 {
        self.level.width()
    }

    /// Returns the level bits (undriven bits read as 0).
    pub fn level(&self) -> BusValue {
        self.level
    }

    /// Returns the high-impedance mask.
    pub fn high_z_mask(&self) -> BusValue {
        self.high_z
    }

    /// Returns true if every bit is driven.
    pub fn is_driven(&self) -> bool {
        self.high_z.is_all_zero()
    }

    /// Returns true if every bit is in high-impedance.
    pub fn is_high_z(&self) -> bool {
        self.high_z.is_all_one()
    }

    /// Returns the state of a single bit.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.width()`.
    pub fn bit(&self, index: u32) -> Logic {
        if self.high_z.get(index) {
            Logic::Z
        } else {
            Logic::from_bool(self.level.get(index))
        }
    }

    /// Returns the driven bits as an unsigned integer; undriven bits count as 0.
    pub fn value(&self) -> u32 {
        self.level.to_u32() & !self.high_z.to_u32()
    }

    /// Returns true if bit 0 is driven high.
    pub fn is_high(&self) -> bool {
        self.value() & 1 == 1
    }

    /// Parses a string like `"10ZZ"` (MSB first) into a signal.
    pub fn from_literal(s: &str) -> Result<Self, SignalError> {
        let width = s.len() as u32;
        let mut level = BusValue::try_new(width).map_err(|_| invalid_literal(s))?;
        let mut high_z = BusValue::new(width);
        for (i, c) in s.chars().rev().enumerate() {
            match Logic::from_char(c) {
                Some(Logic::Zero) => {}
                Some(Logic::One) => level.set(i as u32, true),
                Some(Logic::Z) => high_z.set(i as u32, true),
                None => return Err(invalid_literal(s)),
            }
        }
        Self::with_high_z(level, high_z)
    }
}

fn invalid_literal(s: &str) -> SignalError {
    SignalError::InvalidLiteral(s.to_string())
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in (0..self.width()).rev() {
            write!(f, "{}", self.bit(i))?;
        }
        Ok(())
    }
}

impl fmt::Debug for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signal({self})")
    }
}
