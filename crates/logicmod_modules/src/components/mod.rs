//! Behaviors for every component kind.

pub mod arithmetic;
pub mod coding;
pub mod counter;
pub mod flip_flop;
pub mod left_shift;
pub mod memory;
pub mod register;
pub mod routing;

pub use arithmetic::{Adder, Subtract};
pub use coding::{Decoder, Encoder};
pub use counter::{Counter, CounterPreset, ShiftRegisterSipo};
pub use flip_flop::{
    DFlipFlop, DFlipFlopAsync, DFlipFlopDelay, DFlipFlopMs, DFlipFlopSr, JkFlipFlop, SrLatch,
    TFlipFlop,
};
pub use left_shift::LeftShift;
pub use memory::{BlockRam, Rom};
pub use register::{Register, RegisterFile};
pub use routing::{Demultiplexer, Multiplexer};
