//! Map growth on level-up.
//!
//! | Level          | New building(s)            |
//! |----------------|----------------------------|
//! | 1              | one iron mine, one factory |
//! | `n % 3 == 2`   | coal mine                  |
//! | `n % 3 == 0`   | factory                    |
//! | otherwise      | iron mine                  |
//!
//! Every call, level 1 included, first grows the bounds by one cell on each
//! side.  New buildings go on a random free cell inside the new bounds.

use rr_core::{BuildingId, CargoKind, GridBounds, Position, SimRng};

use crate::Grid;

/// What one [`Grid::level_up`] call produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelUp {
    pub created: Vec<BuildingId>,
    pub bounds:  GridBounds,
}

#[derive(Copy, Clone)]
enum Placement {
    Mine(CargoKind),
    Factory,
}

impl Grid {
    /// Grow the map for `new_level` and place its new building(s).
    pub fn level_up(&mut self, new_level: u32, rng: &mut SimRng) -> LevelUp {
        let placements: &[Placement] = match new_level {
            0 | 1 => &[Placement::Mine(CargoKind::Iron), Placement::Factory],
            n if n % 3 == 2 => &[Placement::Mine(CargoKind::Coal)],
            n if n % 3 == 0 => &[Placement::Factory],
            _ => &[Placement::Mine(CargoKind::Iron)],
        };
        self.bounds = self.bounds.expanded();

        let mut created = Vec::with_capacity(placements.len());
        for &placement in placements {
            let Some(pos) = self.random_free_cell(rng) else {
                log::warn!("level {new_level}: no free cell left for a new building");
                break;
            };
            let placed = match placement {
                Placement::Mine(cargo) => self.add_mine(pos, cargo),
                Placement::Factory => self.add_factory(pos),
            };
            match placed {
                Ok(id) => created.push(id),
                Err(e) => log::warn!("level {new_level}: {e}"),
            }
        }

        log::info!(
            "level {new_level}: bounds {}..{}, {} new building(s)",
            self.bounds.min,
            self.bounds.max,
            created.len()
        );
        LevelUp { created, bounds: self.bounds }
    }

    /// A free in-bounds cell with no building next to it, chosen uniformly.
    fn random_free_cell(&self, rng: &mut SimRng) -> Option<Position> {
        let free: Vec<Position> = self
            .bounds
            .cells()
            .filter(|&p| self.is_free(p))
            .filter(|p| p.neighbours().all(|n| !self.has_building_at(n)))
            .collect();
        rng.choose(&free).copied()
    }
}
