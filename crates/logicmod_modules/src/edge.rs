//! Clock edge detection for edge-triggered components.
//!
//! A clocked component keeps the clock level it saw on its previous
//! recompute (initially low) and compares it with the current level. Seeing
//! the same level twice never produces an edge, so recomputing repeatedly
//! within one tick is harmless.

/// The transition observed on a clock input between two recomputes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    /// Low on the previous recompute, high now.
    Rising,
    /// High on the previous recompute, low now.
    Falling,
    /// No change since the previous recompute.
    Steady,
}

impl Edge {
    /// Classifies the transition from `previous` to `current`.
    pub fn detect(previous: bool, current: bool) -> Self {
        let edge = match (previous, current) {
            (false, true) => Edge::Rising,
            (true, false) => Edge::Falling,
            _ => Edge::Steady,
        };
        if edge != Edge::Steady {
            log::trace!("{edge:?} clock edge");
        }
        edge
    }

    /// Returns true for a rising edge.
    pub fn is_rising(self) -> bool {
        self == Edge::Rising
    }

    /// Returns true for a falling edge.
    pub fn is_falling(self) -> bool {
        self == Edge::Falling
    }
}
