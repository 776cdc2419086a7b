//! Game configuration.
//!
//! Typically built with `GameConfig::default()` and tweaked, or loaded from a
//! JSON/TOML file by the application (with the `serde` feature enabled every
//! field is optional in the file and falls back to its default).

use crate::{CoreError, CoreResult, Position};

// ── GridBounds ────────────────────────────────────────────────────────────────

/// Inclusive rectangle of buildable cells.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridBounds {
    pub min: Position,
    pub max: Position,
}

impl GridBounds {
    pub const fn new(min: Position, max: Position) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= self.min.x && pos.x <= self.max.x && pos.y >= self.min.y && pos.y <= self.max.y
    }

    /// The bounds grown by one cell in every direction.
    pub fn expanded(&self) -> Self {
        Self {
            min: self.min.offset(-1, -1),
            max: self.max.offset(1, 1),
        }
    }

    pub fn width(&self) -> i32 {
        self.max.x - self.min.x + 1
    }

    pub fn height(&self) -> i32 {
        self.max.y - self.min.y + 1
    }

    /// Every cell inside the bounds, row by row.
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        (self.min.y..=self.max.y)
            .flat_map(move |y| (self.min.x..=self.max.x).map(move |x| Position::new(x, y)))
    }
}

impl Default for GridBounds {
    fn default() -> Self {
        Self::new(Position::new(0, 0), Position::new(15, 11))
    }
}

// ── TrainConfig ───────────────────────────────────────────────────────────────

/// Per-train movement and loading parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TrainConfig {
    /// Cells per second along each axis.
    pub speed: f32,

    /// How long a train blocked by another train's reservation waits before
    /// trying again, in seconds.
    pub wait_secs: f32,

    /// Units taken from a mine on each station visit.
    pub pickup_per_visit: u32,

    /// Two trains closer than this on both axes (in cells) have collided.
    pub collision_distance: f32,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            speed:              1.0,
            wait_secs:          1.0,
            pickup_per_visit:   1,
            collision_distance: 0.25,
        }
    }
}

// ── GameConfig ────────────────────────────────────────────────────────────────

/// Top-level configuration for a game world.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Buildable area at level 1.  Grows by one cell per side each level.
    pub initial_bounds: GridBounds,

    pub train: TrainConfig,

    /// Seconds between each mine gaining one unit of stock.
    pub mine_production_interval_secs: f32,

    /// Upper bound on a mine's stock.
    pub max_cargo_at_mine: u32,

    /// Score needed to reach level `i + 2` is `level_thresholds[i]`.
    /// Must be strictly increasing.
    pub level_thresholds: Vec<u32>,

    /// Master RNG seed.  The same seed always places buildings identically.
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            initial_bounds:                GridBounds::default(),
            train:                         TrainConfig::default(),
            mine_production_interval_secs: 5.0,
            max_cargo_at_mine:             10,
            level_thresholds:              vec![5, 15, 30, 50, 80, 120, 170, 230],
            seed:                          42,
        }
    }
}

impl GameConfig {
    /// Reject configurations the simulation cannot run with.
    pub fn validate(&self) -> CoreResult<()> {
        let b = &self.initial_bounds;
        if b.min.x > b.max.x || b.min.y > b.max.y {
            return Err(CoreError::Config(format!(
                "initial bounds are empty: {} .. {}",
                b.min, b.max
            )));
        }
        if !(self.train.speed > 0.0) {
            return Err(CoreError::Config(format!("train speed must be positive, got {}", self.train.speed)));
        }
        if self.train.wait_secs < 0.0 {
            return Err(CoreError::Config("train wait time must not be negative".into()));
        }
        if !(self.train.collision_distance > 0.0) {
            return Err(CoreError::Config("collision distance must be positive".into()));
        }
        if !(self.mine_production_interval_secs > 0.0) {
            return Err(CoreError::Config("mine production interval must be positive".into()));
        }
        if self.level_thresholds.windows(2).any(|w| w[0] >= w[1]) {
            return Err(CoreError::Config("level thresholds must be strictly increasing".into()));
        }
        Ok(())
    }

    /// Level reached with `score` points (levels start at 1).
    pub fn level_for_score(&self, score: u32) -> u32 {
        1 + self.level_thresholds.iter().take_while(|&&t| score >= t).count() as u32
    }
}
