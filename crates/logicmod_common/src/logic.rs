//! Per-bit tri-state logic values.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The state of a single bit position of a [`Signal`](crate::Signal).
///
/// - `Zero`: driven low
/// - `One`: driven high
/// - `Z`: high-impedance (not driven)
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[repr(u8)]
pub enum Logic {
    /// Driven low (0).
    Zero = 0,
    /// Driven high (1).
    One = 1,
    /// High-impedance (tri-state).
    Z = 2,
}

impl Logic {
    /// Converts a character to a [`Logic`] value.
    ///
    /// Accepts '0', '1', and 'z'/'Z'.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '0' => Some(Logic::Zero),
            '1' => Some(Logic::One),
            'z' | 'Z' => Some(Logic::Z),
            _ => None,
        }
    }

    /// Returns the driven value for a boolean.
    pub fn from_bool(value: bool) -> Self {
        if value {
            Logic::One
        } else {
            Logic::Zero
        }
    }

    /// Returns the driven level, or `None` for high-impedance.
    pub fn to_bool(self) -> Option<bool> {
        match self {
            Logic::Zero => Some(false),
            Logic::One => Some(true),
            Logic::Z => None,
        }
    }

    /// Returns true if the bit is driven (not high-impedance).
    pub fn is_driven(self) -> bool {
        self != Logic::Z
    }
}

impl fmt::Display for Logic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Logic::Zero => write!(f, "0"),
            Logic::One => write!(f, "1"),
            Logic::Z => write!(f, "Z"),
        }
    }
}
