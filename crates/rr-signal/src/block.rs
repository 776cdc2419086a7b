//! A single signal block.

use rustc_hash::FxHashSet;

use rr_core::{Position, SignalId, TrainId};

/// A maximal region of track reachable without crossing a signalled rail.
///
/// `interior` cells were reached by flood fill and belong to this block
/// only.  `boundary` cells are the far ends of signalled rails leaving the
/// block; each is also a cell of the neighbouring block.  Blocks are
/// rebuilt wholesale, never edited in place, so only the reservation
/// changes between rebuilds.
#[derive(Debug, Clone, Default)]
pub struct SignalBlock {
    pub(crate) interior:    FxHashSet<Position>,
    pub(crate) boundary:    FxHashSet<Position>,
    /// Signals guarding entry into this block, sorted by id.
    pub(crate) signals:     Vec<SignalId>,
    pub(crate) reserved_by: Option<TrainId>,
}

impl SignalBlock {
    #[inline]
    pub fn contains(&self, pos: Position) -> bool {
        self.interior.contains(&pos) || self.boundary.contains(&pos)
    }

    /// All cells of the block, interior first.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.interior.iter().chain(self.boundary.iter()).copied()
    }

    pub fn interior(&self) -> &FxHashSet<Position> {
        &self.interior
    }

    pub fn boundary(&self) -> &FxHashSet<Position> {
        &self.boundary
    }

    pub fn len(&self) -> usize {
        self.interior.len() + self.boundary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn signals(&self) -> &[SignalId] {
        &self.signals
    }

    /// `true` if at least one signal guards entry into this block.  A block
    /// without one still gates trains; it just has no aspect to show.
    #[inline]
    pub fn is_signalled(&self) -> bool {
        !self.signals.is_empty()
    }

    #[inline]
    pub fn reserved_by(&self) -> Option<TrainId> {
        self.reserved_by
    }
}
