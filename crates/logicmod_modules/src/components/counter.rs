//! Rising-edge counters and the serial-in, parallel-out shift register.

use super::flip_flop::ClockedState;
use crate::edge::Edge;
use crate::error::ModuleError;
use crate::kind::ModuleKind;
use crate::limits::{self, BIT_WIDTH, SHIFT_OUTPUTS};
use crate::module::{Behavior, Transition};
use crate::pin::{PinBank, PinId};
use logicmod_common::{width_mask, Signal};
use logicmod_config::Params;

/// W-bit up counter.
///
/// On each rising edge `Reset` clears the count, otherwise `Enable` adds one,
/// wrapping from `2^W - 1` to 0. `Overflow` is high while the count sits at
/// its maximum, so cascaded counters can use it as an enable.
#[derive(Debug)]
pub struct Counter {
    width: u32,
    enable: PinId,
    reset: PinId,
    clock: PinId,
    out: PinId,
    overflow: PinId,
}

impl Behavior for Counter {
    const KIND: ModuleKind = ModuleKind::Counter;
    type State = ClockedState;

    fn declare(params: &Params, pins: &mut PinBank) -> Result<Self, ModuleError> {
        let width = limits::required(params, "bit_width", BIT_WIDTH)?;
        Ok(Self {
            width,
            enable: pins.input("Enable", 1)?,
            reset: pins.input("Reset", 1)?,
            clock: pins.input("Clock", 1)?,
            out: pins.output("out", width)?,
            overflow: pins.output("Overflow", 1)?,
        })
    }

    fn initial_state(&self) -> ClockedState {
        ClockedState::default()
    }

    fn recompute(&self, pins: &PinBank, state: ClockedState) -> Transition<ClockedState> {
        let clock = pins.is_high(self.clock);
        let mut t = Transition::hold(ClockedState {
            previous_clock: clock,
            ..state
        });
        if !Edge::detect(state.previous_clock, clock).is_rising() {
            return t;
        }
        let max = width_mask(self.width);
        let (value, overflow) = if pins.is_high(self.reset) {
            (0, false)
        } else if pins.is_high(self.enable) {
            let value = if state.data == max { 0 } else { state.data + 1 };
            (value, value == max)
        } else {
            return t;
        };
        t.state.data = value;
        t.write(self.out, Signal::from_u32(value, self.width))
            .write(self.overflow, Signal::from_bool(overflow))
    }
}

/// State of the presettable counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PresetState {
    /// The current count.
    pub value: u32,
    /// Count-down mode, latched on every rising edge.
    pub decrease: bool,
    /// Clock level on the previous recompute.
    pub previous_clock: bool,
}

/// W-bit up/down counter with preset.
///
/// On each rising edge `Decrease` selects the counting direction, then
/// `Reset` clears the count, `Set` loads `in`, or `Enable` steps the count,
/// in that order of priority. `Overflow` is high when the count equals the
/// direction's terminal value: `2^W - 1` counting up, 0 counting down.
#[derive(Debug)]
pub struct CounterPreset {
    width: u32,
    enable: PinId,
    set: PinId,
    reset: PinId,
    decrease: PinId,
    clock: PinId,
    preset: PinId,
    out: PinId,
    overflow: PinId,
}

impl CounterPreset {
    fn terminal(&self, decrease: bool) -> u32 {
        if decrease {
            0
        } else {
            width_mask(self.width)
        }
    }
}

impl Behavior for CounterPreset {
    const KIND: ModuleKind = ModuleKind::CounterPreset;
    type State = PresetState;

    fn declare(params: &Params, pins: &mut PinBank) -> Result<Self, ModuleError> {
        let width = limits::required(params, "bit_width", BIT_WIDTH)?;
        Ok(Self {
            width,
            enable: pins.input("Enable", 1)?,
            set: pins.input("Set", 1)?,
            reset: pins.input("Reset", 1)?,
            decrease: pins.input("Decrease", 1)?,
            clock: pins.input("Clock", 1)?,
            preset: pins.input("in", width)?,
            out: pins.output("out", width)?,
            overflow: pins.output("Overflow", 1)?,
        })
    }

    fn initial_state(&self) -> PresetState {
        PresetState::default()
    }

    fn recompute(&self, pins: &PinBank, state: PresetState) -> Transition<PresetState> {
        let clock = pins.is_high(self.clock);
        let mut t = Transition::hold(PresetState {
            previous_clock: clock,
            ..state
        });
        if !Edge::detect(state.previous_clock, clock).is_rising() {
            return t;
        }
        let decrease = pins.is_high(self.decrease);
        t.state.decrease = decrease;
        let max = width_mask(self.width);
        let value = if pins.is_high(self.reset) {
            0
        } else if pins.is_high(self.set) {
            pins.value(self.preset)
        } else if pins.is_high(self.enable) {
            match (decrease, state.value) {
                (true, 0) => max,
                (true, v) => v - 1,
                (false, v) if v == max => 0,
                (false, v) => v + 1,
            }
        } else {
            return t;
        };
        t.state.value = value;
        let overflow = value == self.terminal(decrease);
        t.write(self.out, Signal::from_u32(value, self.width))
            .write(self.overflow, Signal::from_bool(overflow))
    }
}

/// Serial-in, parallel-out shift register.
///
/// On each rising edge `Reset` clears the register, otherwise `Enable`
/// shifts `in` into bit 0. An undriven `in` shifts in 0. Bit `i` appears on
/// `out_i`.
#[derive(Debug)]
pub struct ShiftRegisterSipo {
    enable: PinId,
    reset: PinId,
    clock: PinId,
    serial: PinId,
    outputs: Vec<PinId>,
}

impl Behavior for ShiftRegisterSipo {
    const KIND: ModuleKind = ModuleKind::ShiftRegisterSipo;
    type State = ClockedState;

    fn declare(params: &Params, pins: &mut PinBank) -> Result<Self, ModuleError> {
        let count = limits::required(params, "output_pin_count", SHIFT_OUTPUTS)?;
        let enable = pins.input("Enable", 1)?;
        let reset = pins.input("Reset", 1)?;
        let clock = pins.input("Clock", 1)?;
        let serial = pins.input("in", 1)?;
        let outputs: Vec<PinId> = (0..count)
            .map(|i| pins.output(format!("out_{i}"), 1))
            .collect::<Result<_, _>>()?;
        Ok(Self {
            enable,
            reset,
            clock,
            serial,
            outputs,
        })
    }

    fn initial_state(&self) -> ClockedState {
        ClockedState::default()
    }

    fn recompute(&self, pins: &PinBank, state: ClockedState) -> Transition<ClockedState> {
        let clock = pins.is_high(self.clock);
        let mut t = Transition::hold(ClockedState {
            previous_clock: clock,
            ..state
        });
        if !Edge::detect(state.previous_clock, clock).is_rising() {
            return t;
        }
        let data = if pins.is_high(self.reset) {
            0
        } else if pins.is_high(self.enable) {
            (state.data << 1) | u32::from(pins.is_high(self.serial))
        } else {
            return t;
        };
        t.state.data = data;
        self.outputs.iter().enumerate().fold(t, |t, (i, &pin)| {
            t.write(pin, Signal::from_bool((data >> i) & 1 == 1))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::{LogicModule, Module};

    fn tick(m: &mut impl LogicModule) {
        m.set_value("Clock", 0).unwrap();
        m.recompute();
        m.set_value("Clock", 1).unwrap();
        m.recompute();
    }

    fn counter(width: u32) -> Module<Counter> {
        let mut m: Module<Counter> =
            Module::new("c", &Params::new().with("bit_width", width)).unwrap();
        m.set_value("Enable", 1).unwrap();
        m.set_value("Reset", 0).unwrap();
        m
    }

    fn preset(width: u32) -> Module<CounterPreset> {
        let mut m: Module<CounterPreset> =
            Module::new("p", &Params::new().with("bit_width", width)).unwrap();
        for pin in ["Enable", "Set", "Reset", "Decrease"] {
            m.set_value(pin, 0).unwrap();
        }
        m
    }

    #[test]
    fn counts_and_wraps() {
        let mut m = counter(2);
        let mut seen = Vec::new();
        for _ in 0..5 {
            tick(&mut m);
            seen.push((m.value("out").unwrap(), m.value("Overflow").unwrap()));
        }
        assert_eq!(seen, vec![(1, 0), (2, 0), (3, 1), (0, 0), (1, 0)]);
    }

    #[test]
    fn reset_has_priority() {
        let mut m = counter(4);
        tick(&mut m);
        tick(&mut m);
        m.set_value("Reset", 1).unwrap();
        tick(&mut m);
        assert_eq!(m.value("out").unwrap(), 0);
        assert_eq!(m.value("Overflow").unwrap(), 0);
    }

    #[test]
    fn disabled_counter_holds_outputs() {
        let mut m = counter(4);
        tick(&mut m);
        m.set_value("Enable", 0).unwrap();
        tick(&mut m);
        assert_eq!(m.value("out").unwrap(), 1);
        assert_eq!(m.state().data, 1);
    }

    #[test]
    fn no_output_before_first_edge() {
        let mut m = counter(4);
        m.set_value("Clock", 0).unwrap();
        assert!(!m.recompute());
        assert!(m.signal("out").unwrap().is_high_z());
    }

    #[test]
    fn full_width_counter_wraps() {
        let mut m = counter(32);
        m.set_value("Reset", 1).unwrap();
        tick(&mut m);
        m.set_value("Reset", 0).unwrap();
        tick(&mut m);
        assert_eq!(m.value("out").unwrap(), 1);
    }

    #[test]
    fn preset_counts_down_and_wraps() {
        let mut m = preset(3);
        m.set_value("Decrease", 1).unwrap();
        m.set_value("Enable", 1).unwrap();
        tick(&mut m);
        assert_eq!(m.value("out").unwrap(), 7);
        assert_eq!(m.value("Overflow").unwrap(), 0);
        for _ in 0..7 {
            tick(&mut m);
        }
        assert_eq!(m.value("out").unwrap(), 0);
        assert_eq!(m.value("Overflow").unwrap(), 1);
    }

    #[test]
    fn preset_load() {
        let mut m = preset(4);
        m.set_value("in", 9).unwrap();
        m.set_value("Set", 1).unwrap();
        tick(&mut m);
        assert_eq!(m.value("out").unwrap(), 9);
        assert_eq!(m.value("Overflow").unwrap(), 0);

        m.set_value("in", 15).unwrap();
        tick(&mut m);
        assert_eq!(m.value("Overflow").unwrap(), 1);

        m.set_value("Set", 0).unwrap();
        m.set_value("Enable", 1).unwrap();
        tick(&mut m);
        assert_eq!(m.value("out").unwrap(), 0);
        assert_eq!(m.value("Overflow").unwrap(), 0);
    }

    #[test]
    fn preset_reset_beats_set() {
        let mut m = preset(4);
        m.set_value("in", 5).unwrap();
        m.set_value("Set", 1).unwrap();
        m.set_value("Reset", 1).unwrap();
        tick(&mut m);
        assert_eq!(m.value("out").unwrap(), 0);
        assert_eq!(m.value("Overflow").unwrap(), 0);
    }

    #[test]
    fn preset_reset_in_count_down_overflows() {
        let mut m = preset(4);
        m.set_value("Decrease", 1).unwrap();
        m.set_value("Reset", 1).unwrap();
        tick(&mut m);
        assert_eq!(m.value("out").unwrap(), 0);
        assert_eq!(m.value("Overflow").unwrap(), 1);
        assert!(m.state().decrease);
    }

    #[test]
    fn decrease_latched_even_when_idle() {
        let mut m = preset(4);
        m.set_value("Decrease", 1).unwrap();
        tick(&mut m);
        assert!(m.state().decrease);
        assert!(m.signal("out").unwrap().is_high_z());
    }

    fn shifter(count: u32) -> Module<ShiftRegisterSipo> {
        let mut m: Module<ShiftRegisterSipo> =
            Module::new("s", &Params::new().with("output_pin_count", count)).unwrap();
        m.set_value("Enable", 1).unwrap();
        m.set_value("Reset", 0).unwrap();
        m
    }

    fn parallel(m: &Module<ShiftRegisterSipo>, count: u32) -> u32 {
        (0..count).fold(0, |acc, i| {
            acc | (m.value(&format!("out_{i}")).unwrap() << i)
        })
    }

    #[test]
    fn shifts_serial_bits_in_at_bit_zero() {
        let mut m = shifter(4);
        for bit in [1, 0, 1, 1] {
            m.set_value("in", bit).unwrap();
            tick(&mut m);
        }
        assert_eq!(parallel(&m, 4), 0b1011);
    }

    #[test]
    fn undriven_serial_input_shifts_zero() {
        let mut m = shifter(3);
        m.set_value("in", 1).unwrap();
        tick(&mut m);
        m.set_input("in", Signal::high_z(1)).unwrap();
        tick(&mut m);
        assert_eq!(parallel(&m, 3), 0b010);
    }

    #[test]
    fn shift_register_reset() {
        let mut m = shifter(2);
        m.set_value("in", 1).unwrap();
        tick(&mut m);
        m.set_value("Reset", 1).unwrap();
        tick(&mut m);
        assert_eq!(parallel(&m, 2), 0);
    }

    #[test]
    fn shift_output_count_checked() {
        let p = Params::new().with("output_pin_count", 33u32);
        assert!(Module::<ShiftRegisterSipo>::new("s", &p).is_err());
    }
}
