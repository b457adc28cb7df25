//! Priority encoder and one-hot decoder on single-bit lines.

use crate::error::ModuleError;
use crate::kind::ModuleKind;
use crate::limits::{self, LINE_COUNT};
use crate::module::{Behavior, Transition};
use crate::pin::{PinBank, PinId};
use logicmod_common::Signal;
use logicmod_config::Params;

fn lines(pins: &mut PinBank, prefix: &str, count: u32, input: bool) -> Result<Vec<PinId>, ModuleError> {
    (0..count)
        .map(|i| {
            let name = format!("{prefix}_{i}");
            if input {
                pins.input(name, 1)
            } else {
                pins.output(name, 1)
            }
        })
        .collect()
}

/// Priority encoder with `N` outputs and `2^N - 1` inputs.
///
/// If the highest-numbered high input is `in_i` the outputs carry `i + 1`,
/// least significant bit on `out_0`; with no input high they carry 0.
#[derive(Debug)]
pub struct Encoder {
    inputs: Vec<PinId>,
    outputs: Vec<PinId>,
}

impl Behavior for Encoder {
    const KIND: ModuleKind = ModuleKind::Encoder;
    type State = ();

    fn declare(params: &Params, pins: &mut PinBank) -> Result<Self, ModuleError> {
        let n = limits::required(params, "output_pin_count", LINE_COUNT)?;
        let outputs = lines(pins, "out", n, false)?;
        let inputs = lines(pins, "in", (1 << n) - 1, true)?;
        Ok(Self { inputs, outputs })
    }

    fn initial_state(&self) -> Self::State {}

    fn recompute(&self, pins: &PinBank, state: ()) -> Transition<()> {
        let code = self
            .inputs
            .iter()
            .rposition(|&pin| pins.is_high(pin))
            .map_or(0, |i| i + 1);
        self.outputs
            .iter()
            .enumerate()
            .fold(Transition::hold(state), |t, (bit, &pin)| {
                t.write(pin, Signal::from_bool((code >> bit) & 1 == 1))
            })
    }
}

/// Decoder with `N` inputs and `2^N - 1` outputs.
///
/// The inputs form `v`, `in_0` being the least significant bit. For `v > 0`
/// only `out_{v-1}` is high; for `v = 0` every output is low.
#[derive(Debug)]
pub struct Decoder {
    inputs: Vec<PinId>,
    outputs: Vec<PinId>,
}

impl Behavior for Decoder {
    const KIND: ModuleKind = ModuleKind::Decoder;
    type State = ();

    fn declare(params: &Params, pins: &mut PinBank) -> Result<Self, ModuleError> {
        let n = limits::required(params, "input_pin_count", LINE_COUNT)?;
        let inputs = lines(pins, "in", n, true)?;
        let outputs = lines(pins, "out", (1 << n) - 1, false)?;
        Ok(Self { inputs, outputs })
    }

    fn initial_state(&self) -> Self::State {}

    fn recompute(&self, pins: &PinBank, state: ()) -> Transition<()> {
        let v = self
            .inputs
            .iter()
            .enumerate()
            .fold(0usize, |acc, (i, &pin)| acc | (usize::from(pins.is_high(pin)) << i));
        self.outputs
            .iter()
            .enumerate()
            .fold(Transition::hold(state), |t, (i, &pin)| {
                t.write(pin, Signal::from_bool(v > 0 && i == v - 1))
            })
    }
}
