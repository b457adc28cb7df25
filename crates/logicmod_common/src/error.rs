//! Error types for constructing bus values and signals.

/// Errors raised when a bus value or signal is built from invalid parts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignalError {
    /// The requested bit width is outside `1..=32`.
    #[error("invalid bus width {0} (expected 1..=32)")]
    InvalidWidth(u32),

    /// The level and high-impedance mask have different widths.
    #[error("level width {level} does not match high-impedance width {high_z}")]
    WidthMismatch {
        /// Width of the level part.
        level: u32,
        /// Width of the high-impedance mask.
        high_z: u32,
    },

    /// A raw bit pattern has bits set at or above its width.
    #[error("bits {bits:#x} do not fit in width {width}")]
    ExcessBits {
        /// Declared width.
        width: u32,
        /// Offending bit pattern.
        bits: u32,
    },

    /// A textual signal literal contained characters other than `0`, `1`, `z`/`Z`.
    #[error("invalid signal literal '{0}'")]
    InvalidLiteral(String),
}
