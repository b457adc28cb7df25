//! Combinational adder and subtractor.

use crate::error::ModuleError;
use crate::kind::ModuleKind;
use crate::limits::{self, BIT_WIDTH};
use crate::module::{Behavior, Transition};
use crate::pin::{PinBank, PinId};
use logicmod_common::{width_mask, Signal};
use logicmod_config::Params;

/// Adds `a + b + carry_in` in a wider accumulator.
///
/// Returns the sum modulo `2^width` and whether bit `width` of the true sum
/// is set.
pub fn add_with_carry(a: u32, b: u32, carry_in: bool, width: u32) -> (u32, bool) {
    let sum = u64::from(a) + u64::from(b) + u64::from(carry_in);
    let carry = (sum >> width) & 1 == 1;
    (sum as u32 & width_mask(width), carry)
}

/// Subtracts `b` and the borrow from `a`.
///
/// `borrow_in` is true when a borrow is requested. Returns the difference
/// modulo `2^width` and whether the subtraction needed to borrow.
pub fn sub_with_borrow(a: u32, b: u32, borrow_in: bool, width: u32) -> (u32, bool) {
    let subtrahend = u64::from(b) + u64::from(borrow_in);
    let borrow = subtrahend > u64::from(a);
    let diff = u64::from(a).wrapping_sub(subtrahend) as u32;
    (diff & width_mask(width), borrow)
}

/// W-bit adder: `A + B + Cin` on `S`, carry on `Cout`.
#[derive(Debug)]
pub struct Adder {
    width: u32,
    a: PinId,
    b: PinId,
    carry_in: PinId,
    sum: PinId,
    carry_out: PinId,
}

impl Behavior for Adder {
    const KIND: ModuleKind = ModuleKind::Adder;
    type State = ();

    fn declare(params: &Params, pins: &mut PinBank) -> Result<Self, ModuleError> {
        let width = limits::required(params, "bit_width", BIT_WIDTH)?;
        Ok(Self {
            width,
            a: pins.input("A", width)?,
            b: pins.input("B", width)?,
            carry_in: pins.input("Cin", 1)?,
            sum: pins.output("S", width)?,
            carry_out: pins.output("Cout", 1)?,
        })
    }

    fn initial_state(&self) -> Self::State {}

    fn recompute(&self, pins: &PinBank, state: ()) -> Transition<()> {
        let (sum, carry) = add_with_carry(
            pins.value(self.a),
            pins.value(self.b),
            pins.is_high(self.carry_in),
            self.width,
        );
        Transition::hold(state)
            .write(self.sum, Signal::from_u32(sum, self.width))
            .write(self.carry_out, Signal::from_bool(carry))
    }
}

/// W-bit subtractor: `A - B - borrow` on `S`.
///
/// Borrow in (`_Bin`) and borrow out (`_Bout`) are active-low: a low `_Bin`
/// subtracts one more, and `_Bout` goes low when the result wrapped.
#[derive(Debug)]
pub struct Subtract {
    width: u32,
    a: PinId,
    b: PinId,
    borrow_in: PinId,
    diff: PinId,
    borrow_out: PinId,
}

impl Behavior for Subtract {
    const KIND: ModuleKind = ModuleKind::Subtract;
    type State = ();

    fn declare(params: &Params, pins: &mut PinBank) -> Result<Self, ModuleError> {
        let width = limits::required(params, "bit_width", BIT_WIDTH)?;
        Ok(Self {
            width,
            a: pins.input("A", width)?,
            b: pins.input("B", width)?,
            borrow_in: pins.input("_Bin", 1)?,
            diff: pins.output("S", width)?,
            borrow_out: pins.output("_Bout", 1)?,
        })
    }

    fn initial_state(&self) -> Self::State {}

    fn recompute(&self, pins: &PinBank, state: ()) -> Transition<()> {
        let (diff, borrow) = sub_with_borrow(
            pins.value(self.a),
            pins.value(self.b),
            !pins.is_high(self.borrow_in),
            self.width,
        );
        Transition::hold(state)
            .write(self.diff, Signal::from_u32(diff, self.width))
            .write(self.borrow_out, Signal::from_bool(!borrow))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::{LogicModule, Module};

    fn adder(width: u32) -> Module<Adder> {
        Module::new("add", &Params::new().with("bit_width", width)).unwrap()
    }

    fn subtract(width: u32) -> Module<Subtract> {
        Module::new("sub", &Params::new().with("bit_width", width)).unwrap()
    }

    #[test]
    fn add_without_carry() {
        assert_eq!(add_with_carry(3, 4, false, 8), (7, false));
        assert_eq!(add_with_carry(3, 4, true, 8), (8, false));
    }

    #[test]
    fn add_carry_narrow() {
        assert_eq!(add_with_carry(0xFF, 1, false, 8), (0, true));
        assert_eq!(add_with_carry(0xF, 0xF, true, 4), (0xF, true));
    }

    #[test]
    fn add_carry_full_width() {
        assert_eq!(add_with_carry(u32::MAX, 1, false, 32), (0, true));
        assert_eq!(add_with_carry(u32::MAX, 0, true, 32), (0, true));
        assert_eq!(add_with_carry(u32::MAX, u32::MAX, true, 32), (u32::MAX, true));
        assert_eq!(add_with_carry(1 << 31, 1 << 30, false, 32), (0xC000_0000, false));
    }

    #[test]
    fn sub_basic() {
        assert_eq!(sub_with_borrow(7, 4, false, 8), (3, false));
        assert_eq!(sub_with_borrow(7, 4, true, 8), (2, false));
        assert_eq!(sub_with_borrow(4, 4, true, 8), (0xFF, true));
        assert_eq!(sub_with_borrow(0, 1, false, 32), (u32::MAX, true));
        assert_eq!(sub_with_borrow(u32::MAX, u32::MAX, true, 32), (u32::MAX, true));
    }

    #[test]
    fn adder_module() {
        let mut m = adder(8);
        m.set_value("A", 200).unwrap();
        m.set_value("B", 100).unwrap();
        m.set_value("Cin", 0).unwrap();
        assert!(m.recompute());
        assert_eq!(m.value("S").unwrap(), 44);
        assert_eq!(m.value("Cout").unwrap(), 1);
    }

    #[test]
    fn adder_high_z_inputs_read_zero() {
        let mut m = adder(4);
        m.recompute();
        assert_eq!(m.signal("S").unwrap(), Signal::low(4));
        assert_eq!(m.signal("Cout").unwrap(), Signal::low(1));
    }

    #[test]
    fn subtract_module_active_low_borrow() {
        let mut m = subtract(8);
        m.set_value("A", 10).unwrap();
        m.set_value("B", 3).unwrap();
        m.set_value("_Bin", 1).unwrap();
        m.recompute();
        assert_eq!(m.value("S").unwrap(), 7);
        assert_eq!(m.value("_Bout").unwrap(), 1);

        m.set_value("_Bin", 0).unwrap();
        m.recompute();
        assert_eq!(m.value("S").unwrap(), 6);

        m.set_value("B", 11).unwrap();
        m.set_value("_Bin", 1).unwrap();
        m.recompute();
        assert_eq!(m.value("S").unwrap(), 255);
        assert_eq!(m.value("_Bout").unwrap(), 0);
    }

    #[test]
    fn bit_width_required() {
        assert!(Module::<Adder>::new("a", &Params::new()).is_err());
        assert!(Module::<Subtract>::new("s", &Params::new().with("bit_width", 33u32)).is_err());
    }
}
