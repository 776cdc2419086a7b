//! Fluent builder for constructing a [`World`].

use rr_core::{CargoKind, GameConfig, Position, SimRng};
use rr_grid::Grid;

use crate::{World, WorldError, WorldResult};

/// Fluent builder for [`World`].
///
/// # Optional inputs (have defaults)
///
/// | Method                     | Default                                          |
/// |----------------------------|--------------------------------------------------|
/// | `.starting_buildings(b)`   | `true`: level 1 grows the map, adds mine+factory |
/// | `.mine(pos, cargo)`        | none                                      |
/// | `.factory(pos)`            | none                                      |
/// | `.water(pos)`              | none                                      |
///
/// # Example
///
/// ```rust,ignore
/// let world = WorldBuilder::new(GameConfig::default())
///     .water(Position::new(4, 4))
///     .build()?;
/// ```
pub struct WorldBuilder {
    config:             GameConfig,
    starting_buildings: bool,
    mines:              Vec<(Position, CargoKind)>,
    factories:          Vec<Position>,
    water:              Vec<Position>,
}

impl WorldBuilder {
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            starting_buildings: true,
            mines:              Vec::new(),
            factories:          Vec::new(),
            water:              Vec::new(),
        }
    }

    /// Whether to run the level-1 setup (bounds grown by one cell per side,
    /// one random iron mine and factory).  Turn off to lay out a map by
    /// hand on exactly `initial_bounds`.
    pub fn starting_buildings(mut self, enabled: bool) -> Self {
        self.starting_buildings = enabled;
        self
    }

    pub fn mine(mut self, pos: Position, cargo: CargoKind) -> Self {
        self.mines.push((pos, cargo));
        self
    }

    pub fn factory(mut self, pos: Position) -> Self {
        self.factories.push(pos);
        self
    }

    pub fn water(mut self, pos: Position) -> Self {
        self.water.push(pos);
        self
    }

    /// Validate the configuration, lay out the fixed map and return a
    /// ready-to-tick [`World`].
    pub fn build(self) -> WorldResult<World> {
        self.config
            .validate()
            .map_err(|e| WorldError::Config(e.to_string()))?;

        let mut grid = Grid::with_bounds(self.config.initial_bounds, self.config.max_cargo_at_mine);
        let mut rng = SimRng::new(self.config.seed);

        // Water first so buildings cannot land on it.
        for pos in self.water {
            if !grid.add_water(pos) {
                return Err(WorldError::Config(format!("cannot place water at {pos}")));
            }
        }
        for (pos, cargo) in self.mines {
            grid.add_mine(pos, cargo)?;
        }
        for pos in self.factories {
            grid.add_factory(pos)?;
        }
        if self.starting_buildings {
            grid.level_up(1, &mut rng);
        }

        Ok(World::new(self.config, grid, rng))
    }
}
