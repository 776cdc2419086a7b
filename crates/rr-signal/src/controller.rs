//! Block partitioning, reservations and signal aspects.
//!
//! # Rebuild
//!
//! ```text
//! available = every rail endpoint (ascending)
//! while available not empty:
//!     flood fill from the smallest available cell
//!         unsignalled rail → traverse
//!         signalled rail   → far end becomes a boundary cell, stop;
//!                            record its signals not standing at this cell
//!     remove the traversed cells from available
//! ```
//!
//! Every cell ends up interior to exactly one block, so the blocks cover all
//! rail endpoints and two blocks can only share boundary cells, which are
//! always endpoints of signalled rails.
//!
//! # Reservations
//!
//! `claims` holds at most one cell per train, in first-claim order.  After
//! any change every block is re-derived: it is reserved by the earliest
//! claim falling inside it, and a train may enter a cell only if no other
//! train holds any block containing it.  Aspects follow: all signals of a
//! reserved block are red, all others green.  Everything is recomputed globally; the track
//! is small enough that this never shows up in a profile.

use std::collections::BTreeSet;

use rustc_hash::FxHashMap;

use rr_core::{Position, SignalColor, SignalId, TrainId};

use crate::{RailSource, SignalBlock, SignalSource};

/// A signal whose aspect changed, with its new colour.
pub type ColorChange = (SignalId, SignalColor);

/// Owns the current block partition and every train's claim.
#[derive(Debug, Default)]
pub struct SignalController {
    blocks:      Vec<SignalBlock>,
    /// Cell → indices into `blocks`.  A boundary cell maps to two or more.
    block_index: FxHashMap<Position, Vec<usize>>,
    claims:      Vec<(TrainId, Position)>,
    colors:      FxHashMap<SignalId, SignalColor>,
}

impl SignalController {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Rebuild ───────────────────────────────────────────────────────────

    /// Discard every block and partition the track again from scratch.
    ///
    /// Existing claims survive and are re-applied to the new blocks; a claim
    /// on a cell that no longer has track simply reserves nothing.
    pub fn create_signal_blocks<R, S>(&mut self, rails: &R, signals: &S) -> Vec<ColorChange>
    where
        R: RailSource + ?Sized,
        S: SignalSource + ?Sized,
    {
        let mut available: BTreeSet<Position> = rails.rail_positions().into_iter().collect();
        let mut blocks = Vec::new();

        while let Some(seed) = available.pop_first() {
            let block = flood_fill(seed, rails, signals);
            for pos in &block.interior {
                available.remove(pos);
            }
            blocks.push(block);
        }

        let mut block_index: FxHashMap<Position, Vec<usize>> = FxHashMap::default();
        for (i, block) in blocks.iter().enumerate() {
            for pos in block.positions() {
                block_index.entry(pos).or_default().push(i);
            }
        }

        log::debug!(
            "rebuilt {} signal blocks over {} cells",
            blocks.len(),
            block_index.len()
        );

        self.blocks = blocks;
        self.block_index = block_index;
        self.recompute()
    }

    // ── Reservations ──────────────────────────────────────────────────────

    /// Record that `train` claims `pos`, replacing any earlier claim by the
    /// same train.
    pub fn reserve(&mut self, train: TrainId, pos: Position) -> Vec<ColorChange> {
        match self.claims.iter_mut().find(|(id, _)| *id == train) {
            Some(claim) => claim.1 = pos,
            None        => self.claims.push((train, pos)),
        }
        self.recompute()
    }

    /// Drop `train`'s claim.  A train with no claim is a no-op.
    pub fn unreserve(&mut self, train: TrainId) -> Vec<ColorChange> {
        let before = self.claims.len();
        self.claims.retain(|(id, _)| *id != train);
        if self.claims.len() == before {
            return Vec::new();
        }
        self.recompute()
    }

    /// The cell currently claimed by `train`.
    pub fn claim(&self, train: TrainId) -> Option<Position> {
        self.claims.iter().find(|(id, _)| *id == train).map(|&(_, p)| p)
    }

    /// The train holding a block containing `pos`, if any.  Whether the
    /// block has signals of its own makes no difference.
    pub fn reserver(&self, pos: Position) -> Option<TrainId> {
        self.blocks_containing(pos).find_map(|b| b.reserved_by)
    }

    /// `true` if no *other* train holds any block containing `pos`.
    pub fn is_reservable_by(&self, pos: Position, train: TrainId) -> bool {
        self.blocks_containing(pos)
            .all(|b| b.reserved_by.is_none_or(|holder| holder == train))
    }

    // ── Queries ───────────────────────────────────────────────────────────

    pub fn blocks(&self) -> &[SignalBlock] {
        &self.blocks
    }

    /// Every block `pos` belongs to (two or more for boundary cells).
    pub fn blocks_containing(&self, pos: Position) -> impl Iterator<Item = &SignalBlock> + '_ {
        self.block_index
            .get(&pos)
            .into_iter()
            .flatten()
            .map(move |&i| &self.blocks[i])
    }

    /// Current aspect of `signal`; `None` if it borders no block.
    pub fn color(&self, signal: SignalId) -> Option<SignalColor> {
        self.colors.get(&signal).copied()
    }

    // ── Internals ─────────────────────────────────────────────────────────

    /// Re-derive every block's reservation and every signal's aspect.
    fn recompute(&mut self) -> Vec<ColorChange> {
        for block in &mut self.blocks {
            block.reserved_by = self
                .claims
                .iter()
                .find(|(_, pos)| block.contains(*pos))
                .map(|&(id, _)| id);
        }

        let mut colors = FxHashMap::default();
        for block in &self.blocks {
            let color = if block.reserved_by.is_some() {
                SignalColor::Red
            } else {
                SignalColor::Green
            };
            for &signal in &block.signals {
                colors.insert(signal, color);
            }
        }

        let mut changes: Vec<ColorChange> = colors
            .iter()
            .filter(|&(id, &color)| self.colors.get(id).copied().unwrap_or_default() != color)
            .map(|(&id, &color)| (id, color))
            .collect();
        changes.sort_unstable_by_key(|&(id, _)| id);

        self.colors = colors;
        changes
    }
}

/// Collect one block starting at `seed`.
fn flood_fill<R, S>(seed: Position, rails: &R, signals: &S) -> SignalBlock
where
    R: RailSource + ?Sized,
    S: SignalSource + ?Sized,
{
    let mut block = SignalBlock::default();
    block.interior.insert(seed);
    let mut stack = vec![seed];

    while let Some(pos) = stack.pop() {
        for rail in rails.rails_at(pos) {
            let far = rail.other_end(pos);
            let on_rail = signals.signals_on(rail);
            if on_rail.is_empty() {
                if block.interior.insert(far) {
                    stack.push(far);
                }
                continue;
            }
            block.boundary.insert(far);
            for signal in on_rail {
                if signal.from_position != pos && !block.signals.contains(&signal.id) {
                    block.signals.push(signal.id);
                }
            }
        }
    }

    // A signalled rail looping back into the region is not a boundary.
    let interior = &block.interior;
    block.boundary.retain(|p| !interior.contains(p));
    block.signals.sort_unstable();
    block
}
