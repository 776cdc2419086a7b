//! Placement rules for rails and stations.
//!
//! Validity is reported as data: rails carry a `legal` flag and station
//! proposals yield the list of offending cells.  Only committing turns an
//! illegal placement into an error.

use rr_core::{Axis, Position, Rail, StationId};

use crate::Grid;

impl Grid {
    /// Set each rail's `legal` flag.
    ///
    /// A rail is illegal when it is not between neighbouring cells, when an
    /// endpoint lies outside the bounds or on water or a building, or when
    /// it enters an existing station across the station's axis.
    pub fn mark_illegal(&self, rails: &mut [Rail]) {
        for rail in rails {
            let legal = self.is_rail_legal(rail);
            rail.set_legal(legal);
        }
    }

    pub fn is_rail_legal(&self, rail: &Rail) -> bool {
        if !rail.is_unit_length() {
            return false;
        }
        let (a, b) = rail.endpoints();
        [a, b].into_iter().all(|end| {
            self.bounds.contains(end)
                && !self.is_water(end)
                && !self.has_building_at(end)
                && self
                    .station_at(end)
                    .is_none_or(|station| rail.axis() == Some(station.axis()))
        })
    }

    /// Cells that make a station over `positions` along `axis` illegal.
    ///
    /// Empty means the station may be built.  A proposal with no cell next
    /// to a mine or factory reports every cell.
    pub fn illegal_station_positions(&self, positions: &[Position], axis: Axis) -> Vec<Position> {
        self.station_conflicts(positions, axis, None)
    }

    /// As [`illegal_station_positions`](Self::illegal_station_positions),
    /// treating cells of station `ignore` as free (used when extending it).
    pub(crate) fn station_conflicts(
        &self,
        positions: &[Position],
        axis: Axis,
        ignore: Option<StationId>,
    ) -> Vec<Position> {
        let serves_building = positions.iter().any(|p| {
            p.orthogonal_neighbours().iter().any(|n| self.has_building_at(*n))
        });
        if !serves_building {
            return positions.to_vec();
        }

        positions
            .iter()
            .copied()
            .filter(|&pos| {
                let other_station = self
                    .station_id_at(pos)
                    .is_some_and(|id| Some(id) != ignore);
                let off_axis = self
                    .rails_at_position(pos)
                    .iter()
                    .any(|r| r.axis() != Some(axis));
                !self.bounds.contains(pos)
                    || self.is_water(pos)
                    || self.has_building_at(pos)
                    || other_station
                    || off_axis
            })
            .collect()
    }
}
