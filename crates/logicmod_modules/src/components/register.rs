//! Registers and the dual-read register file.

use super::flip_flop::ClockedState;
use crate::edge::Edge;
use crate::error::ModuleError;
use crate::kind::ModuleKind;
use crate::limits::{self, ADDRESS_WIDTH, BIT_WIDTH};
use crate::module::{Behavior, Transition};
use crate::pin::{PinBank, PinId};
use logicmod_common::Signal;
use logicmod_config::Params;

/// W-bit register that latches `D` on a rising edge while `Enable` is high.
#[derive(Debug)]
pub struct Register {
    width: u32,
    d: PinId,
    clock: PinId,
    enable: PinId,
    q: PinId,
}

impl Behavior for Register {
    const KIND: ModuleKind = ModuleKind::Register;
    type State = ClockedState;

    fn declare(params: &Params, pins: &mut PinBank) -> Result<Self, ModuleError> {
        let width = limits::required(params, "bit_width", BIT_WIDTH)?;
        Ok(Self {
            width,
            d: pins.input("D", width)?,
            clock: pins.input("Clock", 1)?,
            enable: pins.input("Enable", 1)?,
            q: pins.output("Q", width)?,
        })
    }

    fn initial_state(&self) -> ClockedState {
        ClockedState::default()
    }

    fn recompute(&self, pins: &PinBank, state: ClockedState) -> Transition<ClockedState> {
        let clock = pins.is_high(self.clock);
        let rising = Edge::detect(state.previous_clock, clock).is_rising();
        if !rising || !pins.is_high(self.enable) {
            return Transition::hold(ClockedState {
                previous_clock: clock,
                ..state
            });
        }
        let data = pins.value(self.d);
        Transition::hold(ClockedState {
            data,
            previous_clock: clock,
        })
        .write(self.q, Signal::from_u32(data, self.width))
    }
}

/// State of a register file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterFileState {
    /// Register contents, indexed by address.
    pub registers: Vec<u32>,
    /// Clock level on the previous recompute.
    pub previous_clock: bool,
}

/// `2^A` registers of W bits with one write port and two read ports.
///
/// On each rising edge both read ports are driven from the contents as they
/// were before the edge, then `writeData` is stored at `writeAddress` if
/// `writeEnable` is high. Registers power on as 0.
#[derive(Debug)]
pub struct RegisterFile {
    width: u32,
    depth: usize,
    write_address: PinId,
    write_data: PinId,
    write_enable: PinId,
    clock: PinId,
    read_address_a: PinId,
    read_address_b: PinId,
    read_data_a: PinId,
    read_data_b: PinId,
}

impl Behavior for RegisterFile {
    const KIND: ModuleKind = ModuleKind::RegisterFile;
    type State = RegisterFileState;

    fn declare(params: &Params, pins: &mut PinBank) -> Result<Self, ModuleError> {
        let width = limits::required(params, "bit_width", BIT_WIDTH)?;
        let address_width = limits::required(params, "address_bit_width", ADDRESS_WIDTH)?;
        Ok(Self {
            width,
            depth: 1 << address_width,
            write_address: pins.input("writeAddress", address_width)?,
            write_data: pins.input("writeData", width)?,
            write_enable: pins.input("writeEnable", 1)?,
            clock: pins.input("Clock", 1)?,
            read_address_a: pins.input("readAddressA", address_width)?,
            read_address_b: pins.input("readAddressB", address_width)?,
            read_data_a: pins.output("readDataA", width)?,
            read_data_b: pins.output("readDataB", width)?,
        })
    }

    fn initial_state(&self) -> RegisterFileState {
        RegisterFileState {
            registers: vec![0; self.depth],
            previous_clock: false,
        }
    }

    fn recompute(&self, pins: &PinBank, state: RegisterFileState) -> Transition<RegisterFileState> {
        let clock = pins.is_high(self.clock);
        let rising = Edge::detect(state.previous_clock, clock).is_rising();
        let mut next = RegisterFileState {
            previous_clock: clock,
            ..state
        };
        if !rising {
            return Transition::hold(next);
        }
        let a = next.registers[pins.value(self.read_address_a) as usize];
        let b = next.registers[pins.value(self.read_address_b) as usize];
        if pins.is_high(self.write_enable) {
            let address = pins.value(self.write_address) as usize;
            next.registers[address] = pins.value(self.write_data);
        }
        Transition::hold(next)
            .write(self.read_data_a, Signal::from_u32(a, self.width))
            .write(self.read_data_b, Signal::from_u32(b, self.width))
    }
}
