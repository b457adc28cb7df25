//! The closed set of component kinds and the factory that builds them.

use crate::components::{
    Adder, BlockRam, Counter, CounterPreset, DFlipFlop, DFlipFlopAsync, DFlipFlopDelay,
    DFlipFlopMs, DFlipFlopSr, Decoder, Demultiplexer, Encoder, JkFlipFlop, LeftShift,
    Multiplexer, Register, RegisterFile, Rom, ShiftRegisterSipo, SrLatch, Subtract, TFlipFlop,
};
use crate::error::ModuleError;
use crate::module::{LogicModule, Module};
use logicmod_config::{CircuitConfig, ModuleConfig, Params};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Every component kind this library provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleKind {
    /// W-bit adder with carry in and carry out.
    Adder,
    /// W-bit subtractor with active-low borrow in and borrow out.
    Subtract,
    /// Set/reset latch.
    SrLatch,
    /// Rising-edge D flip-flop.
    DFlipFlop,
    /// D flip-flop with asynchronous set and clear.
    DFlipFlopAsync,
    /// D flip-flop with set and reset.
    DFlipFlopSr,
    /// Level-sensitive master-slave D flip-flop.
    DFlipFlopMs,
    /// Primary-minor D flip-flop: stores on the rising edge, outputs on the falling edge.
    DFlipFlopDelay,
    /// JK flip-flop.
    JkFlipFlop,
    /// Toggle flip-flop.
    TFlipFlop,
    /// Up counter with overflow flag.
    Counter,
    /// Up/down counter with preset load.
    CounterPreset,
    /// Serial-in, parallel-out shift register.
    ShiftRegisterSipo,
    /// Enable-gated register.
    Register,
    /// Register file with one write port and two read ports.
    RegisterFile,
    /// Read-only memory with chip select.
    Rom,
    /// Synchronous block RAM.
    BlockRam,
    /// Priority encoder.
    Encoder,
    /// One-hot decoder.
    Decoder,
    /// Multiplexer.
    Multiplexer,
    /// Demultiplexer.
    Demultiplexer,
    /// Left shifter (pins only).
    LeftShift,
}

impl ModuleKind {
    /// All kinds, in declaration order.
    pub const ALL: [ModuleKind; 22] = [
        ModuleKind::Adder,
        ModuleKind::Subtract,
        ModuleKind::SrLatch,
        ModuleKind::DFlipFlop,
        ModuleKind::DFlipFlopAsync,
        ModuleKind::DFlipFlopSr,
        ModuleKind::DFlipFlopMs,
        ModuleKind::DFlipFlopDelay,
        ModuleKind::JkFlipFlop,
        ModuleKind::TFlipFlop,
        ModuleKind::Counter,
        ModuleKind::CounterPreset,
        ModuleKind::ShiftRegisterSipo,
        ModuleKind::Register,
        ModuleKind::RegisterFile,
        ModuleKind::Rom,
        ModuleKind::BlockRam,
        ModuleKind::Encoder,
        ModuleKind::Decoder,
        ModuleKind::Multiplexer,
        ModuleKind::Demultiplexer,
        ModuleKind::LeftShift,
    ];

    /// Returns the manifest name of this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            ModuleKind::Adder => "adder",
            ModuleKind::Subtract => "subtract",
            ModuleKind::SrLatch => "sr_latch",
            ModuleKind::DFlipFlop => "d_flip_flop",
            ModuleKind::DFlipFlopAsync => "d_flip_flop_async",
            ModuleKind::DFlipFlopSr => "d_flip_flop_sr",
            ModuleKind::DFlipFlopMs => "d_flip_flop_ms",
            ModuleKind::DFlipFlopDelay => "d_flip_flop_delay",
            ModuleKind::JkFlipFlop => "jk_flip_flop",
            ModuleKind::TFlipFlop => "t_flip_flop",
            ModuleKind::Counter => "counter",
            ModuleKind::CounterPreset => "counter_preset",
            ModuleKind::ShiftRegisterSipo => "shift_register_sipo",
            ModuleKind::Register => "register",
            ModuleKind::RegisterFile => "register_file",
            ModuleKind::Rom => "rom",
            ModuleKind::BlockRam => "block_ram",
            ModuleKind::Encoder => "encoder",
            ModuleKind::Decoder => "decoder",
            ModuleKind::Multiplexer => "multiplexer",
            ModuleKind::Demultiplexer => "demultiplexer",
            ModuleKind::LeftShift => "left_shift",
        }
    }

    /// Declares a new instance of this kind.
    pub fn build(self, name: &str, params: &Params) -> Result<Box<dyn LogicModule>, ModuleError> {
        fn boxed<B: crate::module::Behavior>(
            name: &str,
            params: &Params,
        ) -> Result<Box<dyn LogicModule>, ModuleError> {
            Ok(Box::new(Module::<B>::new(name, params)?))
        }

        match self {
            ModuleKind::Adder => boxed::<Adder>(name, params),
            ModuleKind::Subtract => boxed::<Subtract>(name, params),
            ModuleKind::SrLatch => boxed::<SrLatch>(name, params),
            ModuleKind::DFlipFlop => boxed::<DFlipFlop>(name, params),
            ModuleKind::DFlipFlopAsync => boxed::<DFlipFlopAsync>(name, params),
            ModuleKind::DFlipFlopSr => boxed::<DFlipFlopSr>(name, params),
            ModuleKind::DFlipFlopMs => boxed::<DFlipFlopMs>(name, params),
            ModuleKind::DFlipFlopDelay => boxed::<DFlipFlopDelay>(name, params),
            ModuleKind::JkFlipFlop => boxed::<JkFlipFlop>(name, params),
            ModuleKind::TFlipFlop => boxed::<TFlipFlop>(name, params),
            ModuleKind::Counter => boxed::<Counter>(name, params),
            ModuleKind::CounterPreset => boxed::<CounterPreset>(name, params),
            ModuleKind::ShiftRegisterSipo => boxed::<ShiftRegisterSipo>(name, params),
            ModuleKind::Register => boxed::<Register>(name, params),
            ModuleKind::RegisterFile => boxed::<RegisterFile>(name, params),
            ModuleKind::Rom => boxed::<Rom>(name, params),
            ModuleKind::BlockRam => boxed::<BlockRam>(name, params),
            ModuleKind::Encoder => boxed::<Encoder>(name, params),
            ModuleKind::Decoder => boxed::<Decoder>(name, params),
            ModuleKind::Multiplexer => boxed::<Multiplexer>(name, params),
            ModuleKind::Demultiplexer => boxed::<Demultiplexer>(name, params),
            ModuleKind::LeftShift => boxed::<LeftShift>(name, params),
        }
    }
}

impl fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModuleKind {
    type Err = ModuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModuleKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| ModuleError::UnknownKind(s.to_string()))
    }
}

/// Builds one component instance from its manifest entry.
pub fn instantiate(config: &ModuleConfig) -> Result<Box<dyn LogicModule>, ModuleError> {
    let kind: ModuleKind = config.kind.parse()?;
    kind.build(&config.name, &config.params)
}

/// Builds every component instance in a manifest, in declaration order.
pub fn instantiate_all(config: &CircuitConfig) -> Result<Vec<Box<dyn LogicModule>>, ModuleError> {
    config.modules.iter().map(instantiate).collect()
}
