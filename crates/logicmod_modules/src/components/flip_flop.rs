//! The SR latch and the flip-flop family.
//!
//! Every storage element here exposes a data output `Q` and its complement
//! `_Q`. Multi-bit variants store a whole word; the JK and T flip-flops and
//! the SR latch are single-bit.

use crate::edge::Edge;
use crate::error::ModuleError;
use crate::kind::ModuleKind;
use crate::limits::{self, BIT_WIDTH};
use crate::module::{Behavior, Transition};
use crate::pin::{PinBank, PinId};
use logicmod_common::{width_mask, Signal};
use logicmod_config::Params;

/// The `Q` / `_Q` output pair of a storage element.
#[derive(Debug, Clone, Copy)]
pub(crate) struct QPair {
    width: u32,
    q: PinId,
    nq: PinId,
}

impl QPair {
    pub(crate) fn declare(pins: &mut PinBank, width: u32) -> Result<Self, ModuleError> {
        Ok(Self {
            width,
            q: pins.output("Q", width)?,
            nq: pins.output("_Q", width)?,
        })
    }

    /// Drives `Q = data` and `_Q = !data`.
    pub(crate) fn drive<S>(&self, t: Transition<S>, data: u32) -> Transition<S> {
        let mask = width_mask(self.width);
        self.drive_raw(t, data & mask, !data & mask)
    }

    /// Drives `_Q` to all ones and leaves `Q` undriven.
    pub(crate) fn drive_complement_high<S>(&self, t: Transition<S>) -> Transition<S> {
        t.write(self.nq, Signal::high(self.width))
    }

    /// Drives both outputs independently.
    pub(crate) fn drive_raw<S>(&self, t: Transition<S>, q: u32, nq: u32) -> Transition<S> {
        t.write(self.q, Signal::from_u32(q, self.width))
            .write(self.nq, Signal::from_u32(nq, self.width))
    }
}

/// Stored word plus the clock level seen on the previous recompute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClockedState {
    /// The stored word.
    pub data: u32,
    /// Clock level on the previous recompute.
    pub previous_clock: bool,
}

/// Combinational set/reset latch.
///
/// `S` sets, `R` resets, neither holds. Asserting both is not a valid
/// storage command: both outputs are driven low and the stored bit is kept.
#[derive(Debug)]
pub struct SrLatch {
    set: PinId,
    reset: PinId,
    out: QPair,
}

impl Behavior for SrLatch {
    const KIND: ModuleKind = ModuleKind::SrLatch;
    type State = bool;

    fn declare(_params: &Params, pins: &mut PinBank) -> Result<Self, ModuleError> {
        Ok(Self {
            set: pins.input("S", 1)?,
            reset: pins.input("R", 1)?,
            out: QPair::declare(pins, 1)?,
        })
    }

    fn initial_state(&self) -> bool {
        false
    }

    fn recompute(&self, pins: &PinBank, stored: bool) -> Transition<bool> {
        match (pins.is_high(self.set), pins.is_high(self.reset)) {
            (true, true) => {
                log::debug!("sr latch: S and R both asserted");
                self.out.drive_raw(Transition::hold(stored), 0, 0)
            }
            (true, false) => self.out.drive(Transition::hold(true), 1),
            (false, true) => self.out.drive(Transition::hold(false), 0),
            (false, false) => self.out.drive(Transition::hold(stored), u32::from(stored)),
        }
    }
}

/// Rising-edge D flip-flop.
#[derive(Debug)]
pub struct DFlipFlop {
    d: PinId,
    clock: PinId,
    out: QPair,
}

impl Behavior for DFlipFlop {
    const KIND: ModuleKind = ModuleKind::DFlipFlop;
    type State = ClockedState;

    fn declare(params: &Params, pins: &mut PinBank) -> Result<Self, ModuleError> {
        let width = limits::required(params, "bit_width", BIT_WIDTH)?;
        Ok(Self {
            d: pins.input("D", width)?,
            clock: pins.input("Clock", 1)?,
            out: QPair::declare(pins, width)?,
        })
    }

    fn initial_state(&self) -> ClockedState {
        ClockedState::default()
    }

    fn recompute(&self, pins: &PinBank, state: ClockedState) -> Transition<ClockedState> {
        let clock = pins.is_high(self.clock);
        let edge = Edge::detect(state.previous_clock, clock);
        if !edge.is_rising() {
            return Transition::hold(ClockedState {
                previous_clock: clock,
                ..state
            });
        }
        let data = pins.value(self.d);
        self.out.drive(
            Transition::hold(ClockedState {
                data,
                previous_clock: clock,
            }),
            data,
        )
    }
}

/// Shared logic of the D flip-flops with set and clear inputs.
///
/// Set and clear are sampled on every recompute and act immediately; with
/// both asserted the stored word becomes all ones and both outputs go high.
/// Otherwise the element behaves as a rising-edge D flip-flop.
#[derive(Debug)]
struct Presettable {
    width: u32,
    d: PinId,
    clock: PinId,
    set: PinId,
    clear: PinId,
    out: QPair,
}

impl Presettable {
    fn declare(pins: &mut PinBank, width: u32, clear_name: &str) -> Result<Self, ModuleError> {
        Ok(Self {
            width,
            d: pins.input("D", width)?,
            clock: pins.input("Clock", 1)?,
            set: pins.input("Set", 1)?,
            clear: pins.input(clear_name, 1)?,
            out: QPair::declare(pins, width)?,
        })
    }

    fn recompute(&self, pins: &PinBank, state: ClockedState) -> Transition<ClockedState> {
        let clock = pins.is_high(self.clock);
        let edge = Edge::detect(state.previous_clock, clock);
        let ones = width_mask(self.width);
        let next = |data| ClockedState {
            data,
            previous_clock: clock,
        };
        match (pins.is_high(self.set), pins.is_high(self.clear)) {
            (true, true) => {
                log::debug!("d flip-flop: set and clear both asserted");
                self.out.drive_raw(Transition::hold(next(ones)), ones, ones)
            }
            (true, false) => self.out.drive(Transition::hold(next(ones)), ones),
            (false, true) => self.out.drive(Transition::hold(next(0)), 0),
            (false, false) if edge.is_rising() => {
                let data = pins.value(self.d);
                self.out.drive(Transition::hold(next(data)), data)
            }
            (false, false) => Transition::hold(next(state.data)),
        }
    }
}

/// D flip-flop with asynchronous `Set` and `Clear`.
///
/// `bit_width` defaults to 1.
#[derive(Debug)]
pub struct DFlipFlopAsync {
    inner: Presettable,
}

impl Behavior for DFlipFlopAsync {
    const KIND: ModuleKind = ModuleKind::DFlipFlopAsync;
    type State = ClockedState;

    fn declare(params: &Params, pins: &mut PinBank) -> Result<Self, ModuleError> {
        let width = limits::optional(params, "bit_width", 1, BIT_WIDTH)?;
        Ok(Self {
            inner: Presettable::declare(pins, width, "Clear")?,
        })
    }

    fn initial_state(&self) -> ClockedState {
        ClockedState::default()
    }

    fn recompute(&self, pins: &PinBank, state: ClockedState) -> Transition<ClockedState> {
        self.inner.recompute(pins, state)
    }
}

/// D flip-flop with `Set` and `Reset` inputs that act as soon as they are asserted.
#[derive(Debug)]
pub struct DFlipFlopSr {
    inner: Presettable,
}

impl Behavior for DFlipFlopSr {
    const KIND: ModuleKind = ModuleKind::DFlipFlopSr;
    type State = ClockedState;

    fn declare(params: &Params, pins: &mut PinBank) -> Result<Self, ModuleError> {
        let width = limits::required(params, "bit_width", BIT_WIDTH)?;
        Ok(Self {
            inner: Presettable::declare(pins, width, "Reset")?,
        })
    }

    fn initial_state(&self) -> ClockedState {
        ClockedState::default()
    }

    fn recompute(&self, pins: &PinBank, state: ClockedState) -> Transition<ClockedState> {
        self.inner.recompute(pins, state)
    }
}

/// Level-sensitive master-slave D flip-flop.
///
/// While the clock is low the input is captured; while it is high the
/// captured word is driven.
#[derive(Debug)]
pub struct DFlipFlopMs {
    d: PinId,
    clock: PinId,
    out: QPair,
}

impl Behavior for DFlipFlopMs {
    const KIND: ModuleKind = ModuleKind::DFlipFlopMs;
    type State = u32;

    fn declare(params: &Params, pins: &mut PinBank) -> Result<Self, ModuleError> {
        let width = limits::required(params, "bit_width", BIT_WIDTH)?;
        Ok(Self {
            d: pins.input("D", width)?,
            clock: pins.input("Clock", 1)?,
            out: QPair::declare(pins, width)?,
        })
    }

    fn initial_state(&self) -> u32 {
        0
    }

    fn recompute(&self, pins: &PinBank, data: u32) -> Transition<u32> {
        if pins.is_high(self.clock) {
            self.out.drive(Transition::hold(data), data)
        } else {
            Transition::hold(pins.value(self.d))
        }
    }
}

/// State of the primary-minor flip-flop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayState {
    /// Word captured on the last rising edge.
    pub data: u32,
    /// Clock level on the previous recompute.
    pub previous_clock: bool,
    /// True until the first recompute has driven the power-on outputs.
    pub first: bool,
}

impl Default for DelayState {
    fn default() -> Self {
        Self {
            data: 0,
            previous_clock: false,
            first: true,
        }
    }
}

/// Primary-minor D flip-flop.
///
/// The input is captured on the rising edge and appears on the outputs at
/// the following falling edge. The first recompute drives `_Q` high and
/// leaves `Q` undriven.
#[derive(Debug)]
pub struct DFlipFlopDelay {
    d: PinId,
    clock: PinId,
    out: QPair,
}

impl Behavior for DFlipFlopDelay {
    const KIND: ModuleKind = ModuleKind::DFlipFlopDelay;
    type State = DelayState;

    fn declare(params: &Params, pins: &mut PinBank) -> Result<Self, ModuleError> {
        let width = limits::required(params, "bit_width", BIT_WIDTH)?;
        Ok(Self {
            d: pins.input("D", width)?,
            clock: pins.input("Clock", 1)?,
            out: QPair::declare(pins, width)?,
        })
    }

    fn initial_state(&self) -> DelayState {
        DelayState::default()
    }

    fn recompute(&self, pins: &PinBank, state: DelayState) -> Transition<DelayState> {
        let clock = pins.is_high(self.clock);
        let mut t = Transition::hold(DelayState {
            previous_clock: clock,
            first: false,
            ..state
        });
        if state.first {
            t = self.out.drive_complement_high(t);
        }
        match Edge::detect(state.previous_clock, clock) {
            Edge::Rising => t.state.data = pins.value(self.d),
            Edge::Falling => {
                let data = t.state.data;
                t = self.out.drive(t, data);
            }
            Edge::Steady => {}
        }
        t
    }
}

/// Single-bit JK flip-flop, rising-edge triggered.
#[derive(Debug)]
pub struct JkFlipFlop {
    j: PinId,
    k: PinId,
    clock: PinId,
    out: QPair,
}

impl Behavior for JkFlipFlop {
    const KIND: ModuleKind = ModuleKind::JkFlipFlop;
    type State = ClockedState;

    fn declare(_params: &Params, pins: &mut PinBank) -> Result<Self, ModuleError> {
        Ok(Self {
            j: pins.input("J", 1)?,
            k: pins.input("K", 1)?,
            clock: pins.input("Clock", 1)?,
            out: QPair::declare(pins, 1)?,
        })
    }

    fn initial_state(&self) -> ClockedState {
        ClockedState::default()
    }

    fn recompute(&self, pins: &PinBank, state: ClockedState) -> Transition<ClockedState> {
        let clock = pins.is_high(self.clock);
        if !Edge::detect(state.previous_clock, clock).is_rising() {
            return Transition::hold(ClockedState {
                previous_clock: clock,
                ..state
            });
        }
        let data = match (pins.is_high(self.j), pins.is_high(self.k)) {
            (false, false) => state.data,
            (true, true) => state.data ^ 1,
            (true, false) => 1,
            (false, true) => 0,
        };
        self.out.drive(
            Transition::hold(ClockedState {
                data,
                previous_clock: clock,
            }),
            data,
        )
    }
}

/// Single-bit toggle flip-flop.
///
/// With `T` low the outputs are refreshed from the stored bit on every
/// recompute; with `T` high the bit toggles on each rising edge.
#[derive(Debug)]
pub struct TFlipFlop {
    t: PinId,
    clock: PinId,
    out: QPair,
}

impl Behavior for TFlipFlop {
    const KIND: ModuleKind = ModuleKind::TFlipFlop;
    type State = ClockedState;

    fn declare(_params: &Params, pins: &mut PinBank) -> Result<Self, ModuleError> {
        Ok(Self {
            t: pins.input("T", 1)?,
            clock: pins.input("Clock", 1)?,
            out: QPair::declare(pins, 1)?,
        })
    }

    fn initial_state(&self) -> ClockedState {
        ClockedState::default()
    }

    fn recompute(&self, pins: &PinBank, state: ClockedState) -> Transition<ClockedState> {
        let clock = pins.is_high(self.clock);
        let edge = Edge::detect(state.previous_clock, clock);
        let next = |data| ClockedState {
            data,
            previous_clock: clock,
        };
        if !pins.is_high(self.t) {
            self.out.drive(Transition::hold(next(state.data)), state.data)
        } else if edge.is_rising() {
            let data = state.data ^ 1;
            self.out.drive(Transition::hold(next(data)), data)
        } else {
            Transition::hold(next(state.data))
        }
    }
}
