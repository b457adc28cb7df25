//! Read-only memory and synchronous block RAM.
//!
//! Both memories hold `2^A` words. Initial contents come from the optional
//! `initial_data` byte sequence, packed little-endian into words of
//! `ceil(W / 8)` bytes; missing words are 0 and excess bytes are ignored.

use crate::edge::Edge;
use crate::error::ModuleError;
use crate::kind::ModuleKind;
use crate::limits::{self, ADDRESS_WIDTH, BIT_WIDTH};
use crate::module::{Behavior, Transition};
use crate::pin::{PinBank, PinId};
use logicmod_common::{pack_words, Signal};
use logicmod_config::Params;

fn initial_words(params: &Params, width: u32, depth: usize) -> Result<Vec<u32>, ModuleError> {
    let bytes = params.bytes("initial_data")?.unwrap_or_default();
    Ok(pack_words(&bytes, width, depth))
}

/// Combinational ROM gated by `chipSelect`.
///
/// With `chipSelect` high `dataOut` shows the word at `address`; with it low
/// `dataOut` is released to high-impedance.
#[derive(Debug)]
pub struct Rom {
    width: u32,
    contents: Vec<u32>,
    address: PinId,
    chip_select: PinId,
    data_out: PinId,
}

impl Rom {
    /// Returns the stored words.
    pub fn contents(&self) -> &[u32] {
        &self.contents
    }
}

impl Behavior for Rom {
    const KIND: ModuleKind = ModuleKind::Rom;
    type State = ();

    fn declare(params: &Params, pins: &mut PinBank) -> Result<Self, ModuleError> {
        let width = limits::required(params, "data_bit_width", BIT_WIDTH)?;
        let address_width = limits::required(params, "address_bit_width", ADDRESS_WIDTH)?;
        Ok(Self {
            width,
            contents: initial_words(params, width, 1 << address_width)?,
            address: pins.input("address", address_width)?,
            chip_select: pins.input("chipSelect", 1)?,
            data_out: pins.output("dataOut", width)?,
        })
    }

    fn initial_state(&self) -> Self::State {}

    fn recompute(&self, pins: &PinBank, state: ()) -> Transition<()> {
        let out = if pins.is_high(self.chip_select) {
            let word = self.contents[pins.value(self.address) as usize];
            Signal::from_u32(word, self.width)
        } else {
            Signal::high_z(self.width)
        };
        Transition::hold(state).write(self.data_out, out)
    }
}

/// State of a block RAM.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockRamState {
    /// Memory contents, indexed by address.
    pub words: Vec<u32>,
    /// Clock level on the previous recompute.
    pub previous_clock: bool,
}

/// Synchronous single-port RAM.
///
/// On each rising edge the word at `address` is read first, from the
/// contents as they were before the edge, and driven on `dataOut` (or
/// high-impedance when `readEnable` is low). Then `dataIn` is written if
/// `writeEnable` is high.
#[derive(Debug)]
pub struct BlockRam {
    width: u32,
    initial: Vec<u32>,
    address: PinId,
    data_in: PinId,
    write_enable: PinId,
    read_enable: PinId,
    clock: PinId,
    data_out: PinId,
}

impl Behavior for BlockRam {
    const KIND: ModuleKind = ModuleKind::BlockRam;
    type State = BlockRamState;

    fn declare(params: &Params, pins: &mut PinBank) -> Result<Self, ModuleError> {
        let width = limits::required(params, "bit_width", BIT_WIDTH)?;
        let address_width = limits::required(params, "address_bit_width", ADDRESS_WIDTH)?;
        Ok(Self {
            width,
            initial: initial_words(params, width, 1 << address_width)?,
            address: pins.input("address", address_width)?,
            data_in: pins.input("dataIn", width)?,
            write_enable: pins.input("writeEnable", 1)?,
            read_enable: pins.input("readEnable", 1)?,
            clock: pins.input("Clock", 1)?,
            data_out: pins.output("dataOut", width)?,
        })
    }

    fn initial_state(&self) -> BlockRamState {
        BlockRamState {
            words: self.initial.clone(),
            previous_clock: false,
        }
    }

    fn recompute(&self, pins: &PinBank, state: BlockRamState) -> Transition<BlockRamState> {
        let clock = pins.is_high(self.clock);
        let rising = Edge::detect(state.previous_clock, clock).is_rising();
        let mut next = BlockRamState {
            previous_clock: clock,
            ..state
        };
        if !rising {
            return Transition::hold(next);
        }
        let address = pins.value(self.address) as usize;
        let out = if pins.is_high(self.read_enable) {
            Signal::from_u32(next.words[address], self.width)
        } else {
            Signal::high_z(self.width)
        };
        if pins.is_high(self.write_enable) {
            next.words[address] = pins.value(self.data_in);
        }
        Transition::hold(next).write(self.data_out, out)
    }
}
