//! Multiplexer and demultiplexer.

use crate::error::ModuleError;
use crate::kind::ModuleKind;
use crate::limits::{self, BIT_WIDTH, LINE_COUNT};
use crate::module::{Behavior, Transition};
use crate::pin::{PinBank, PinId};
use logicmod_common::Signal;
use logicmod_config::Params;

fn numbered(
    pins: &mut PinBank,
    prefix: &str,
    count: u32,
    width: u32,
    input: bool,
) -> Result<Vec<PinId>, ModuleError> {
    (0..count)
        .map(|i| {
            let name = format!("{prefix}_{i}");
            if input {
                pins.input(name, width)
            } else {
                pins.output(name, width)
            }
        })
        .collect()
}

/// Routes `in_k` to `out`, where `k` is the value on `select`.
///
/// The selected input's signal is passed through as-is, high-impedance bits
/// included.
#[derive(Debug)]
pub struct Multiplexer {
    select: PinId,
    inputs: Vec<PinId>,
    out: PinId,
}

impl Behavior for Multiplexer {
    const KIND: ModuleKind = ModuleKind::Multiplexer;
    type State = ();

    fn declare(params: &Params, pins: &mut PinBank) -> Result<Self, ModuleError> {
        let select_width = limits::required(params, "select_bit_width", LINE_COUNT)?;
        let width = limits::required(params, "bit_width", BIT_WIDTH)?;
        let select = pins.input("select", select_width)?;
        let out = pins.output("out", width)?;
        let inputs = numbered(pins, "in", 1 << select_width, width, true)?;
        Ok(Self {
            select,
            inputs,
            out,
        })
    }

    fn initial_state(&self) -> Self::State {}

    fn recompute(&self, pins: &PinBank, state: ()) -> Transition<()> {
        let chosen = self.inputs[pins.value(self.select) as usize];
        Transition::hold(state).write(self.out, *pins.signal(chosen))
    }
}

/// Routes `in` to `out_k`, where `k` is the value on `select`; every other
/// output is driven low.
#[derive(Debug)]
pub struct Demultiplexer {
    width: u32,
    select: PinId,
    input: PinId,
    outputs: Vec<PinId>,
}

impl Behavior for Demultiplexer {
    const KIND: ModuleKind = ModuleKind::Demultiplexer;
    type State = ();

    fn declare(params: &Params, pins: &mut PinBank) -> Result<Self, ModuleError> {
        let select_width = limits::required(params, "select_bit_width", LINE_COUNT)?;
        let width = limits::required(params, "bit_width", BIT_WIDTH)?;
        let select = pins.input("select", select_width)?;
        let input = pins.input("in", width)?;
        let outputs = numbered(pins, "out", 1 << select_width, width, false)?;
        Ok(Self {
            width,
            select,
            input,
            outputs,
        })
    }

    fn initial_state(&self) -> Self::State {}

    fn recompute(&self, pins: &PinBank, state: ()) -> Transition<()> {
        let selected = pins.value(self.select) as usize;
        let routed = *pins.signal(self.input);
        self.outputs
            .iter()
            .enumerate()
            .fold(Transition::hold(state), |t, (i, &pin)| {
                let signal = if i == selected {
                    routed
                } else {
                    Signal::low(self.width)
                };
                t.write(pin, signal)
            })
    }
}
