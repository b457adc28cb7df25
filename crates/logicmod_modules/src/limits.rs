//! Range-checked parameter reads shared by all components.

use crate::error::ModuleError;
use logicmod_config::Params;
use std::ops::RangeInclusive;

/// Accepted data bus widths.
pub const BIT_WIDTH: RangeInclusive<u32> = 1..=32;
/// Accepted address bus widths for memories and register files.
pub const ADDRESS_WIDTH: RangeInclusive<u32> = 1..=20;
/// Accepted select widths and encoder/decoder line counts.
pub const LINE_COUNT: RangeInclusive<u32> = 1..=8;
/// Accepted shift register output counts.
pub const SHIFT_OUTPUTS: RangeInclusive<u32> = 1..=32;

/// Reads a required integer parameter and checks it against `range`.
pub fn required(
    params: &Params,
    name: &str,
    range: RangeInclusive<u32>,
) -> Result<u32, ModuleError> {
    check(name, params.u32(name)?, range)
}

/// Reads an optional integer parameter and checks it against `range`.
pub fn optional(
    params: &Params,
    name: &str,
    default: u32,
    range: RangeInclusive<u32>,
) -> Result<u32, ModuleError> {
    check(name, params.u32_or(name, default)?, range)
}

fn check(name: &str, value: u32, range: RangeInclusive<u32>) -> Result<u32, ModuleError> {
    if range.contains(&value) {
        Ok(value)
    } else {
        Err(ModuleError::InvalidParameter {
            name: name.to_string(),
            reason: format!(
                "must be in {}..={}, got {value}",
                range.start(),
                range.end()
            ),
        })
    }
}
