//! Shared foundational types for the logicmod component library.
//!
//! This crate provides the signal model every component is written against:
//! fixed-width [`BusValue`]s, tri-state [`Signal`]s pairing a level with a
//! high-impedance mask, a per-bit [`Logic`] view, and the little-endian word
//! packing used to load initial memory contents.

#![warn(missing_docs)]

pub mod bus_value;
pub mod error;
pub mod logic;
pub mod signal;
pub mod words;

pub use bus_value::{width_mask, BusValue, MAX_WIDTH};
pub use error::SignalError;
pub use logic::Logic;
pub use signal::Signal;
pub use words::pack_words;
