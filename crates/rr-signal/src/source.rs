//! Capability traits the controller reads the track through.
//!
//! The grid implements both; tests substitute small hand-written fakes so the
//! block algorithm can be exercised without building a whole grid.

use rr_core::{Position, Rail, SignalId};

/// A signal standing at `from_position` on one end of `rail`.
///
/// Its aspect describes the block on the far side of `from_position`, i.e.
/// the block a train standing at `from_position` would enter by taking
/// `rail`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Signal {
    pub id:            SignalId,
    pub from_position: Position,
    pub rail:          Rail,
}

/// Read access to the built rails.
pub trait RailSource {
    /// Every cell that is an endpoint of at least one rail.
    fn rail_positions(&self) -> Vec<Position>;

    /// Rails touching `pos`; empty if none.
    fn rails_at(&self, pos: Position) -> &[Rail];
}

/// Read access to the placed signals.
pub trait SignalSource {
    /// Signals attached to either end of `rail`.
    fn signals_on(&self, rail: &Rail) -> Vec<Signal>;
}
