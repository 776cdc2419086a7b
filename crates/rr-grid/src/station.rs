//! Stations: straight runs of cells where trains load and unload.
//!
//! ```text
//!   approach.0   ends.0                 ends.1   approach.1
//!       ·  ───────  ■  ──── ■ ──── ■ ────  ■  ───────  ·
//!         approach   └──── internal rails ───┘  approach
//!           rail                                  rail
//! ```
//!
//! Everything derived from the cell list is computed once in
//! [`Station::new`]; a station is never edited in place.  Extending one
//! builds a fresh `Station` under the same id.

use rr_core::{Axis, Position, Rail, StationId};

use crate::{GridError, GridResult};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Station {
    id:             StationId,
    /// Cells in ascending order along `axis`.
    positions:      Vec<Position>,
    axis:           Axis,
    ends:           (Position, Position),
    approaches:     (Position, Position),
    internal_rails: Vec<Rail>,
    /// Internal rails followed by the two approach rails.
    rails:          Vec<Rail>,
}

impl Station {
    /// Build a station over `positions` (any order, duplicates ignored).
    ///
    /// `axis` may be omitted; it is then inferred from the cells, and a
    /// single-cell station defaults to [`Axis::EastWest`].  Returns
    /// [`GridError::NotContiguous`] unless the cells form one unbroken
    /// straight run along the axis.
    pub fn new(id: StationId, positions: &[Position], axis: Option<Axis>) -> GridResult<Self> {
        let mut cells = positions.to_vec();
        cells.sort_unstable();
        cells.dedup();

        let (first, last) = match (cells.first(), cells.last()) {
            (Some(&f), Some(&l)) => (f, l),
            _ => return Err(GridError::NotContiguous),
        };

        let axis = match axis {
            Some(axis) => axis,
            None if cells.len() == 1 => Axis::EastWest,
            None if first.y == last.y => Axis::EastWest,
            None if first.x == last.x => Axis::NorthSouth,
            None => return Err(GridError::NotContiguous),
        };

        let (dx, dy) = axis.step();
        let contiguous = cells.windows(2).all(|w| w[0].offset(dx, dy) == w[1]);
        if !contiguous {
            return Err(GridError::NotContiguous);
        }

        let approaches = (first.offset(-dx, -dy), last.offset(dx, dy));
        let internal_rails = Rail::path(&cells);
        let mut rails = internal_rails.clone();
        rails.push(Rail::new(approaches.0, first));
        rails.push(Rail::new(last, approaches.1));

        Ok(Self {
            id,
            positions: cells,
            axis,
            ends: (first, last),
            approaches,
            internal_rails,
            rails,
        })
    }

    #[inline]
    pub fn id(&self) -> StationId {
        self.id
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    #[inline]
    pub fn axis(&self) -> Axis {
        self.axis
    }

    #[inline]
    pub fn ends(&self) -> (Position, Position) {
        self.ends
    }

    #[inline]
    pub fn approaches(&self) -> (Position, Position) {
        self.approaches
    }

    pub fn internal_rails(&self) -> &[Rail] {
        &self.internal_rails
    }

    pub fn rails(&self) -> &[Rail] {
        &self.rails
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.positions.binary_search(&pos).is_ok()
    }

    #[inline]
    pub fn is_end(&self, pos: Position) -> bool {
        pos == self.ends.0 || pos == self.ends.1
    }

    pub fn is_internal_rail(&self, rail: &Rail) -> bool {
        self.internal_rails.contains(rail)
    }

    /// `true` if a train standing at `pos`, having just driven `previous`,
    /// has finished traversing this station.
    ///
    /// A train must come to rest on an end cell after running along the
    /// platform; merely touching an end from outside does not count, except
    /// on a one-cell station which has no platform to run along.
    pub fn is_arrival(&self, pos: Position, previous: Option<&Rail>) -> bool {
        self.is_end(pos)
            && (self.positions.len() == 1 || previous.is_some_and(|r| self.is_internal_rail(r)))
    }

    /// The internal rails in driving order for a train entering at `entry`.
    pub fn internal_rails_from(&self, entry: Position) -> Vec<Rail> {
        let mut rails = self.internal_rails.clone();
        if entry == self.ends.1 {
            rails.reverse();
        }
        rails
    }

    /// The end cell farthest from `pos`, the one a train entering at `pos`
    /// stops on.
    pub fn far_end(&self, pos: Position) -> Position {
        if pos == self.ends.1 { self.ends.0 } else { self.ends.1 }
    }
}
