//! Fixed-width bit vectors with exact integer conversion.

use crate::error::SignalError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitAnd, BitOr, BitXor, Not};

/// The widest bus a component can declare.
pub const MAX_WIDTH: u32 = 32;

/// An ordered sequence of `width` bits, bit 0 being the least significant.
///
/// Bits are packed into a single `u32`; bits at or above `width` are always
/// zero. Conversions to and from integers are exact for the low `width` bits.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawBusValue")]
pub struct BusValue {
    width: u32,
    bits: u32,
}

/// Wire form of a [`BusValue`], checked before it becomes one.
#[derive(Deserialize)]
struct RawBusValue {
    width: u32,
    bits: u32,
}

impl TryFrom<RawBusValue> for BusValue {
    type Error = SignalError;

    fn try_from(raw: RawBusValue) -> Result<Self, SignalError> {
        let v = Self::try_new(raw.width)?;
        if raw.bits & !width_mask(raw.width) != 0 {
            return Err(SignalError::ExcessBits {
                width: raw.width,
                bits: raw.bits,
            });
        }
        Ok(Self { bits: raw.bits, ..v })
    }
}

impl BusValue {
    /// Creates a new `BusValue` of the given width with all bits cleared.
    ///
    /// # Panics
    ///
    /// Panics if `width` is not in `1..=32`.
    pub fn new(width: u32) -> Self {
        assert!(
            is_valid_width(width),
            "bus width {width} out of range 1..={MAX_WIDTH}"
        );
        Self { width, bits: 0 }
    }

    /// Creates a new zeroed `BusValue`, rejecting widths outside `1..=32`.
    pub fn try_new(width: u32) -> Result<Self, SignalError> {
        if is_valid_width(width) {
            Ok(Self { width, bits: 0 })
        } else {
            Err(SignalError::InvalidWidth(width))
        }
    }

    /// Creates a `BusValue` from the low `width` bits of `value`.
    pub fn from_u32(value: u32, width: u32) -> Self {
        let mut v = Self::new(width);
        v.bits = value & width_mask(width);
        v
    }

    /// Creates a `BusValue` from the two's complement bits of `value`.
    pub fn from_i32(value: i32, width: u32) -> Self {
        Self::from_u32(value as u32, width)
    }

    /// Creates a `BusValue` with all bits cleared.
    pub fn all_zero(width: u32) -> Self {
        Self::new(width)
    }

    /// Creates a `BusValue` with all bits set.
    pub fn all_one(width: u32) -> Self {
        Self::from_u32(u32::MAX, width)
    }

    /// Returns the number of bits in this value.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the value as an unsigned magnitude.
    pub fn to_u32(&self) -> u32 {
        self.bits
    }

    /// Returns the raw bits reinterpreted as a signed 32-bit integer.
    ///
    /// Only a 32-bit value can come out negative; narrower values are
    /// zero-extended.
    pub fn to_i32(&self) -> i32 {
        self.bits as i32
    }

    /// Gets the bit at the given index.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.width()`.
    pub fn get(&self, index: u32) -> bool {
        assert!(
            index < self.width,
            "index {index} out of bounds for width {}",
            self.width
        );
        (self.bits >> index) & 1 != 0
    }

    /// Sets the bit at the given index.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.width()`.
    pub fn set(&mut self, index: u32, value: bool) {
        assert!(
            index < self.width,
            "index {index} out of bounds for width {}",
            self.width
        );
        if value {
            self.bits |= 1 << index;
        } else {
            self.bits &= !(1 << index);
        }
    }

    /// Returns true if every bit is cleared.
    pub fn is_all_zero(&self) -> bool {
        self.bits == 0
    }

    /// Returns true if every bit is set.
    pub fn is_all_one(&self) -> bool {
        self.bits == width_mask(self.width)
    }
}

/// Returns a mask with the low `width` bits set.
///
/// Widths of 32 or more yield `u32::MAX`.
pub fn width_mask(width: u32) -> u32 {
    if width >= MAX_WIDTH {
        u32::MAX
    } else {
        (1u32 << width) - 1
    }
}

fn is_valid_width(width: u32) -> bool {
    (1..=MAX_WIDTH).contains(&width)
}

impl fmt::Display for BusValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in (0..self.width).rev() {
            write!(f, "{}", if self.get(i) { '1' } else { '0' })?;
        }
        Ok(())
    }
}

impl fmt::Debug for BusValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BusValue({self})")
    }
}

impl BitAnd for BusValue {
    type Output = BusValue;

    fn bitand(self, rhs: Self) -> BusValue {
        assert_eq!(self.width, rhs.width, "BusValue width mismatch in AND");
        BusValue {
            width: self.width,
            bits: self.bits & rhs.bits,
        }
    }
}

impl BitOr for BusValue {
    type Output = BusValue;

    fn bitor(self, rhs: Self) -> BusValue {
        assert_eq!(self.width, rhs.width, "BusValue width mismatch in OR");
        BusValue {
            width: self.width,
            bits: self.bits | rhs.bits,
        }
    }
}

impl BitXor for BusValue {
    type Output = BusValue;

    fn bitxor(self, rhs: Self) -> BusValue {
        assert_eq!(self.width, rhs.width, "BusValue width mismatch in XOR");
        BusValue {
            width: self.width,
            bits: self.bits ^ rhs.bits,
        }
    }
}

impl Not for BusValue {
    type Output = BusValue;

    fn not(self) -> BusValue {
        BusValue {
            width: self.width,
            bits: !self.bits & width_mask(self.width),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_and_width() {
        let v = BusValue::new(8);
        assert_eq!(v.width(), 8);
        assert!(v.is_all_zero());
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn new_rejects_zero_width() {
        BusValue::new(0);
    }

    #[test]
    fn try_new_rejects_wide() {
        assert_eq!(BusValue::try_new(33), Err(SignalError::InvalidWidth(33)));
        assert!(BusValue::try_new(32).is_ok());
    }

    #[test]
    fn from_u32_masks_high_bits() {
        let v = BusValue::from_u32(0x1FF, 8);
        assert_eq!(v.to_u32(), 0xFF);
    }

    #[test]
    fn from_i32_twos_complement() {
        let v = BusValue::from_i32(-1, 4);
        assert_eq!(v.to_u32(), 0xF);
        let w = BusValue::from_i32(-2, 32);
        assert_eq!(w.to_i32(), -2);
        assert_eq!(w.to_u32(), 0xFFFF_FFFE);
    }

    #[test]
    fn set_get() {
        let mut v = BusValue::new(4);
        v.set(1, true);
        v.set(3, true);
        assert!(!v.get(0));
        assert!(v.get(1));
        assert!(!v.get(2));
        assert!(v.get(3));
        v.set(1, false);
        assert_eq!(v.to_u32(), 0b1000);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn get_out_of_bounds() {
        BusValue::new(4).get(4);
    }

    #[test]
    fn all_one_full_width() {
        assert_eq!(BusValue::all_one(32).to_u32(), u32::MAX);
        assert!(BusValue::all_one(5).is_all_one());
        assert_eq!(BusValue::all_one(5).to_u32(), 0b11111);
    }

    #[test]
    fn not_stays_within_width() {
        let v = BusValue::from_u32(0b0101, 4);
        assert_eq!((!v).to_u32(), 0b1010);
        assert_eq!((!BusValue::all_zero(32)).to_u32(), u32::MAX);
    }

    #[test]
    fn bitwise_ops() {
        let a = BusValue::from_u32(0b1100, 4);
        let b = BusValue::from_u32(0b1010, 4);
        assert_eq!(format!("{}", a & b), "1000");
        assert_eq!(format!("{}", a | b), "1110");
        assert_eq!(format!("{}", a ^ b), "0110");
    }

    #[test]
    fn display_and_debug() {
        let v = BusValue::from_u32(5, 4);
        assert_eq!(format!("{v}"), "0101");
        assert_eq!(format!("{v:?}"), "BusValue(0101)");
    }

    #[test]
    fn width_mask_values() {
        assert_eq!(width_mask(1), 1);
        assert_eq!(width_mask(8), 0xFF);
        assert_eq!(width_mask(31), 0x7FFF_FFFF);
        assert_eq!(width_mask(32), u32::MAX);
    }

    #[test]
    fn serde_roundtrip() {
        let v = BusValue::from_u32(0xA5, 8);
        let json = serde_json::to_string(&v).unwrap();
        let back: BusValue = serde_json::from_str(&json).unwrap();
        assert_eq!(v, back);
    }

    #[test]
    fn deserialize_rejects_bits_beyond_width() {
        let err = serde_json::from_str::<BusValue>(r#"{"width":2,"bits":255}"#).unwrap_err();
        assert!(err.to_string().contains("do not fit in width 2"));
    }

    #[test]
    fn deserialize_rejects_bad_width() {
        for json in [r#"{"width":0,"bits":0}"#, r#"{"width":40,"bits":1}"#] {
            let err = serde_json::from_str::<BusValue>(json).unwrap_err();
            assert!(err.to_string().contains("invalid bus width"), "{json}");
        }
    }
}
