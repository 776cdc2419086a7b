//! The train and its per-tick decision procedure.

use rr_core::{CargoHold, Point, Position, Rail, StationId, TrainConfig, TrainId};
use rr_grid::{find_route, BuildingKind, Grid, Route};

use crate::{DestroyReason, TrainError, TrainResult, TrainState, TrainUpdate};

/// A train shuttling between two stations.
///
/// The train holds ids only; the grid it runs on is passed into every call.
#[derive(Clone, Debug)]
pub struct Train {
    id:             TrainId,
    point:          Point,
    /// Cell the train is driving towards.  Its block is reserved.
    target:         Position,
    stations:       (StationId, StationId),
    target_station: StationId,
    /// Rail being driven, `None` when standing at a station ready to turn.
    current_rail:   Option<Rail>,
    /// Rails still to drive after `current_rail`.
    route:          Route,
    route_revision: u64,
    cargo:          CargoHold,
    state:          TrainState,
    selected:       bool,
}

impl Train {
    /// Place a new train on the first cell of station `a`, heading for `a`.
    ///
    /// The first update therefore counts as a visit to `a` and the train
    /// sets off towards `b` from there.  The start cell is reserved
    /// unconditionally.
    pub fn new(id: TrainId, grid: &mut Grid, a: StationId, b: StationId) -> TrainResult<Self> {
        if a == b {
            return Err(TrainError::SameStation(a));
        }
        let start = grid
            .station(a)
            .map(|st| st.positions()[0])
            .ok_or(TrainError::StationNotFound(a))?;
        if grid.station(b).is_none() {
            return Err(TrainError::StationNotFound(b));
        }

        grid.reserve(id, start);
        Ok(Self {
            id,
            point: start.to_point(),
            target: start,
            stations: (a, b),
            target_station: a,
            current_rail: None,
            route: Route::default(),
            route_revision: grid.revision(),
            cargo: CargoHold::new(),
            state: TrainState::EnRoute,
            selected: false,
        })
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn id(&self) -> TrainId {
        self.id
    }

    /// Continuous position in cell units.
    #[inline]
    pub fn position(&self) -> Point {
        self.point
    }

    #[inline]
    pub fn target(&self) -> Position {
        self.target
    }

    pub fn stations(&self) -> (StationId, StationId) {
        self.stations
    }

    pub fn target_station(&self) -> StationId {
        self.target_station
    }

    pub fn current_rail(&self) -> Option<Rail> {
        self.current_rail
    }

    /// Rails left to drive after the current one.
    pub fn route(&self) -> &Route {
        &self.route
    }

    /// Grid revision the cached route was computed against.
    pub fn route_revision(&self) -> u64 {
        self.route_revision
    }

    pub fn cargo(&self) -> &CargoHold {
        &self.cargo
    }

    pub fn state(&self) -> TrainState {
        self.state
    }

    #[inline]
    pub fn is_destroyed(&self) -> bool {
        self.state.is_destroyed()
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    // ── Tick ──────────────────────────────────────────────────────────────

    /// Advance the train by `dt` seconds.
    pub fn update(&mut self, grid: &mut Grid, dt: f32, cfg: &TrainConfig) -> TrainUpdate {
        let mut out = TrainUpdate::default();
        if self.is_destroyed() {
            return out;
        }

        if let Some(rail) = self.current_rail {
            if !grid.has_rail(&rail) {
                self.destroy(grid, DestroyReason::RailRemoved);
                out.destroyed = Some(DestroyReason::RailRemoved);
                return out;
            }
        }

        if grid.revision() != self.route_revision {
            self.refresh_route(grid);
        }

        if let TrainState::Waiting { remaining } = self.state {
            let remaining = remaining - dt;
            self.state = if remaining <= 0.0 {
                TrainState::EnRoute
            } else {
                TrainState::Waiting { remaining }
            };
            return out;
        }

        let goal = self.target.to_point();
        let step = cfg.speed * dt;
        self.point = Point::new(
            approach(self.point.x, goal.x, step),
            approach(self.point.y, goal.y, step),
        );
        if self.point != goal {
            return out;
        }

        self.visit_station(grid, cfg, &mut out);
        if let Err(reason) = self.choose_next_rail(grid, cfg) {
            self.destroy(grid, reason);
            out.destroyed = Some(reason);
        }
        out
    }

    /// Mark the train destroyed and release its reservation.  Returns
    /// `false` if it already was.
    pub fn destroy(&mut self, grid: &mut Grid, reason: DestroyReason) -> bool {
        if self.is_destroyed() {
            return false;
        }
        self.state = TrainState::Destroyed(reason);
        grid.unreserve(self.id);
        log::info!("{} destroyed at {}: {reason}", self.id, self.target);
        true
    }

    // ── Internals ─────────────────────────────────────────────────────────

    /// Load or unload if standing on the cell that completes a visit to the
    /// target station, then turn towards the other terminal.
    fn visit_station(&mut self, grid: &mut Grid, cfg: &TrainConfig, out: &mut TrainUpdate) {
        let arrived = grid
            .station(self.target_station)
            .is_some_and(|st| st.is_arrival(self.target, self.current_rail.as_ref()));
        if !arrived {
            return;
        }

        for building in grid.buildings_serving(self.target_station) {
            let Some(building) = grid.building_mut(building) else { continue };
            match building.kind {
                BuildingKind::Mine { cargo, .. } => {
                    let taken = building.collect(cfg.pickup_per_visit);
                    self.cargo.add(cargo, taken);
                    out.picked_up += taken;
                }
                BuildingKind::Factory => {
                    out.delivered += self.cargo.unload_all();
                }
            }
        }

        log::debug!(
            "{} visited {}: +{} loaded, {} delivered",
            self.id,
            self.target_station,
            out.picked_up,
            out.delivered
        );
        self.target_station = if self.target_station == self.stations.0 {
            self.stations.1
        } else {
            self.stations.0
        };
        self.current_rail = None;
    }

    /// Pick the next rail from `self.target` and reserve its far end, or
    /// start waiting.  `Err` means the train cannot go on.
    fn choose_next_rail(&mut self, grid: &mut Grid, cfg: &TrainConfig) -> Result<(), DestroyReason> {
        let here = self.target;
        let mut candidates = grid.possible_next_rails(here, self.current_rail.as_ref());
        if candidates.is_empty() && self.current_rail.is_some() {
            // Dead end: turn around.
            candidates = grid.possible_next_rails(here, None);
        }

        let (free, blocked): (Vec<Rail>, Vec<Rail>) = candidates
            .into_iter()
            .partition(|rail| grid.is_reservable_by(rail.other_end(here), self.id));

        if free.is_empty() {
            if blocked.is_empty() {
                return Err(DestroyReason::DeadEnd);
            }
            log::debug!("{} waiting at {here}", self.id);
            self.state = TrainState::Waiting { remaining: cfg.wait_secs };
            return Ok(());
        }

        let station = grid.station(self.target_station).ok_or(DestroyReason::Unreachable)?;
        let route = find_route(here, self.current_rail.as_ref(), &free, station, |pos, prev| {
            grid.possible_next_rails(pos, prev)
        })
        .ok_or(DestroyReason::Unreachable)?;

        let Some((&first, rest)) = route.rails().split_first() else {
            return Ok(());
        };
        let next = first.other_end(here);
        self.current_rail = Some(first);
        self.target = next;
        self.route = Route::new(rest.to_vec());
        self.route_revision = grid.revision();
        grid.reserve(self.id, next);
        Ok(())
    }

    /// Recompute the cached route after the track changed.  A route that
    /// can no longer be found is left empty; the decision at the next cell
    /// deals with it.
    fn refresh_route(&mut self, grid: &Grid) {
        self.route_revision = grid.revision();
        let Some(station) = grid.station(self.target_station) else {
            self.route = Route::default();
            return;
        };
        let previous = self.current_rail.as_ref();
        let starting = grid.possible_next_rails(self.target, previous);
        self.route = find_route(self.target, previous, &starting, station, |pos, prev| {
            grid.possible_next_rails(pos, prev)
        })
        .unwrap_or_default();
        log::debug!("{} rerouted: {} rail(s) to {}", self.id, self.route.len(), self.target_station);
    }
}

/// Move `from` towards `to` by at most `step`.
#[inline]
fn approach(from: f32, to: f32, step: f32) -> f32 {
    let delta = to - from;
    if delta.abs() <= step {
        to
    } else {
        from + step.copysign(delta)
    }
}
