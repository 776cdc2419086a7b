//! Route finding from a cell to a station.
//!
//! # Search
//!
//! Uniform-cost search over cells, one unit of cost per rail.  The first
//! expansion uses the caller's `starting_rails` so a train can pre-filter
//! its first move by reservation state; every later expansion asks the
//! `next_rails` callback with the rail the search arrived by, which keeps
//! the no-immediate-reversal rule of the track graph.
//!
//! The search stops as soon as either end of the target station is popped.
//! A route that reaches the station without running along its platform is
//! extended with the station's internal rails so the train always drives
//! the full length before stopping.
//!
//! Routing never looks at live reservations.  Gating happens one level up,
//! when the train chooses its next rail.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use rustc_hash::FxHashMap;

use rr_core::{Position, Rail};

use crate::Station;

// ── Route ─────────────────────────────────────────────────────────────────────

/// Ordered rails from a start cell to a station.  Empty means "already there".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    rails: Vec<Rail>,
}

impl Route {
    pub fn new(rails: Vec<Rail>) -> Self {
        Self { rails }
    }

    pub fn rails(&self) -> &[Rail] {
        &self.rails
    }

    /// Number of rails (hops).
    pub fn len(&self) -> usize {
        self.rails.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rails.is_empty()
    }

    pub fn first(&self) -> Option<&Rail> {
        self.rails.first()
    }

    pub fn contains(&self, rail: &Rail) -> bool {
        self.rails.contains(rail)
    }
}

// ── Search ────────────────────────────────────────────────────────────────────

/// Shortest route from `start` to `station`.
///
/// `previous` is the rail the caller just drove to reach `start` (if any);
/// it only matters for the arrival check.  Returns `None` when the frontier
/// empties without reaching the station.
pub fn find_route<F>(
    start: Position,
    previous: Option<&Rail>,
    starting_rails: &[Rail],
    station: &Station,
    mut next_rails: F,
) -> Option<Route>
where
    F: FnMut(Position, Option<&Rail>) -> Vec<Rail>,
{
    if station.is_arrival(start, previous) {
        return Some(Route::default());
    }

    // dist[p] = best hop count to p; parent[p] = rail that reached p.
    let mut dist: FxHashMap<Position, u32> = FxHashMap::default();
    let mut parent: FxHashMap<Position, Rail> = FxHashMap::default();
    dist.insert(start, 0);

    // Min-heap on (hops, insertion sequence).  `Reverse` turns the max-heap
    // into a min-heap; the sequence keeps equal-cost pops in push order.
    let mut heap: BinaryHeap<Reverse<(u32, u64, Position)>> = BinaryHeap::new();
    let mut seq = 0u64;
    heap.push(Reverse((0, seq, start)));

    while let Some(Reverse((hops, _, pos))) = heap.pop() {
        // Skip stale heap entries.
        if dist.get(&pos).is_some_and(|&best| hops > best) {
            continue;
        }

        if station.is_end(pos) {
            return Some(reconstruct(&parent, start, pos, station));
        }

        let candidates = if pos == start {
            starting_rails.to_vec()
        } else {
            next_rails(pos, parent.get(&pos))
        };

        for rail in candidates {
            let Ok(far) = rail.try_other_end(pos) else { continue };
            let next = hops + 1;
            if dist.get(&far).is_none_or(|&best| next < best) {
                dist.insert(far, next);
                parent.insert(far, rail);
                seq += 1;
                heap.push(Reverse((next, seq, far)));
            }
        }
    }

    None
}

/// Walk `parent` back from `end` to `start`, then append the platform if
/// the path never ran along it.
fn reconstruct(
    parent: &FxHashMap<Position, Rail>,
    start: Position,
    end: Position,
    station: &Station,
) -> Route {
    let mut rails = Vec::new();
    let mut cur = end;
    while cur != start {
        let Some(&rail) = parent.get(&cur) else { break };
        let Ok(prev) = rail.try_other_end(cur) else { break };
        rails.push(rail);
        cur = prev;
    }
    rails.reverse();

    if !rails.iter().any(|r| station.is_internal_rail(r)) {
        rails.extend(station.internal_rails_from(end));
    }
    Route::new(rails)
}
