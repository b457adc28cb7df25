//! Left shifter declaration.

use crate::error::ModuleError;
use crate::kind::ModuleKind;
use crate::limits::{self, BIT_WIDTH};
use crate::module::{Behavior, Transition};
use crate::pin::PinBank;
use logicmod_config::Params;

/// Declares `in` and `out` of `bit_width` bits and a shift `count`.
///
/// No shifting is modelled: `out` is never driven and stays in
/// high-impedance.
#[derive(Debug)]
pub struct LeftShift {
    count: u32,
}

impl LeftShift {
    /// The configured shift distance.
    pub fn count(&self) -> u32 {
        self.count
    }
}

impl Behavior for LeftShift {
    const KIND: ModuleKind = ModuleKind::LeftShift;
    type State = ();

    fn declare(params: &Params, pins: &mut PinBank) -> Result<Self, ModuleError> {
        let width = limits::required(params, "bit_width", BIT_WIDTH)?;
        let count = params.u32_or("count", 0)?;
        pins.input("in", width)?;
        pins.output("out", width)?;
        Ok(Self { count })
    }

    fn initial_state(&self) -> Self::State {}

    fn recompute(&self, _pins: &PinBank, state: ()) -> Transition<()> {
        Transition::hold(state)
    }
}
