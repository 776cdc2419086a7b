//! The authoritative store of built infrastructure.
//!
//! # Layout
//!
//! | Field            | Role                                                 |
//! |------------------|------------------------------------------------------|
//! | `rails`          | every committed rail, ordered                        |
//! | `adjacency`      | cell → rails touching it (connectivity queries)      |
//! | `stations`       | `StationId` → `Station`, plus a cell index           |
//! | `buildings`      | `BuildingId` → `Building`, plus a cell index         |
//! | `signals`        | `SignalId` → `Signal`                                |
//! | `controller`     | signal blocks, reservations, aspects                 |
//! | `events`         | change notifications not yet taken by the owner      |
//!
//! Every structural change bumps [`Grid::revision`] and rebuilds the signal
//! blocks from scratch.  Id-keyed collections are `BTreeMap`s so iteration
//! is creation order.

use std::collections::{BTreeMap, BTreeSet};

use rustc_hash::{FxHashMap, FxHashSet};

use rr_core::{
    Axis, BuildingId, CargoKind, Event, GameConfig, GridBounds, Position, Rail, SignalColor,
    SignalId, StationId, TrainId,
};
use rr_signal::{ColorChange, RailSource, Signal, SignalController, SignalSource};

use crate::{find_route, Building, GridError, GridResult, Route, Station};

pub struct Grid {
    pub(crate) bounds:    GridBounds,
    max_cargo_at_mine:    u32,

    rails:                BTreeSet<Rail>,
    adjacency:            FxHashMap<Position, Vec<Rail>>,
    water:                FxHashSet<Position>,

    stations:             BTreeMap<StationId, Station>,
    station_index:        FxHashMap<Position, StationId>,
    next_station:         StationId,

    buildings:            BTreeMap<BuildingId, Building>,
    building_index:       FxHashMap<Position, BuildingId>,
    next_building:        BuildingId,

    signals:              BTreeMap<SignalId, Signal>,
    next_signal:          SignalId,
    controller:           SignalController,

    preview:              Vec<Rail>,
    revision:             u64,
    events:               Vec<Event>,
}

impl Grid {
    /// An empty grid using `config`'s initial bounds and mine cap.
    pub fn new(config: &GameConfig) -> GridResult<Self> {
        config.validate()?;
        Ok(Self::with_bounds(config.initial_bounds, config.max_cargo_at_mine))
    }

    pub fn with_bounds(bounds: GridBounds, max_cargo_at_mine: u32) -> Self {
        Self {
            bounds,
            max_cargo_at_mine,
            rails: BTreeSet::new(),
            adjacency: FxHashMap::default(),
            water: FxHashSet::default(),
            stations: BTreeMap::new(),
            station_index: FxHashMap::default(),
            next_station: StationId(0),
            buildings: BTreeMap::new(),
            building_index: FxHashMap::default(),
            next_building: BuildingId(0),
            signals: BTreeMap::new(),
            next_signal: SignalId(0),
            controller: SignalController::new(),
            preview: Vec::new(),
            revision: 0,
            events: Vec::new(),
        }
    }

    // ── General queries ───────────────────────────────────────────────────

    #[inline]
    pub fn bounds(&self) -> GridBounds {
        self.bounds
    }

    /// Counter bumped on every change to rails, signals or stations.  A
    /// train holding a route computed at an older revision recomputes it.
    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Drain the change notifications queued since the last call.
    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    /// `true` if nothing but terrain occupies `pos`.
    pub fn is_free(&self, pos: Position) -> bool {
        !self.adjacency.contains_key(&pos)
            && !self.station_index.contains_key(&pos)
            && !self.building_index.contains_key(&pos)
            && !self.water.contains(&pos)
    }

    // ── Rails ─────────────────────────────────────────────────────────────

    pub fn rails(&self) -> impl Iterator<Item = &Rail> + '_ {
        self.rails.iter()
    }

    pub fn rail_count(&self) -> usize {
        self.rails.len()
    }

    pub fn has_rail(&self, rail: &Rail) -> bool {
        self.rails.contains(rail)
    }

    /// Rails touching `pos`; empty if none.
    pub fn rails_at_position(&self, pos: Position) -> &[Rail] {
        self.adjacency.get(&pos).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Rails a train standing at `pos` could take next, excluding the one
    /// it arrived by.  Pass `None` to allow reversing.
    pub fn possible_next_rails(&self, pos: Position, previous: Option<&Rail>) -> Vec<Rail> {
        self.rails_at_position(pos)
            .iter()
            .filter(|&r| Some(r) != previous)
            .copied()
            .collect()
    }

    /// As [`possible_next_rails`](Self::possible_next_rails), also dropping
    /// rails guarded by a red signal standing at `pos`.
    pub fn possible_next_rails_through_green(
        &self,
        pos: Position,
        previous: Option<&Rail>,
    ) -> Vec<Rail> {
        self.possible_next_rails(pos, previous)
            .into_iter()
            .filter(|rail| {
                !self.signals.values().any(|s| {
                    s.rail == *rail
                        && s.from_position == pos
                        && self.controller.color(s.id) == Some(SignalColor::Red)
                })
            })
            .collect()
    }

    /// Commit `rails` to the graph.
    ///
    /// The whole set is rejected with [`GridError::IllegalRails`] if any
    /// member is illegal.  Rails already present are skipped.  Returns the
    /// rails actually added.
    pub fn create_rail(&mut self, rails: &[Rail]) -> GridResult<Vec<Rail>> {
        let mut checked = rails.to_vec();
        self.mark_illegal(&mut checked);
        let illegal: Vec<Rail> = checked.iter().filter(|r| !r.is_legal()).copied().collect();
        if !illegal.is_empty() {
            log::debug!("rejected rail commit: {} of {} illegal", illegal.len(), rails.len());
            return Err(GridError::IllegalRails(illegal));
        }

        let added: Vec<Rail> = checked.into_iter().filter(|r| self.insert_rail(*r)).collect();
        if added.is_empty() {
            return Ok(added);
        }

        self.structure_changed();
        self.auto_create_stations(&added);
        Ok(added)
    }

    /// Remove every rail touching `pos`, with the signals on them and any
    /// station they belonged to.  Returns the removed rails.
    pub fn remove_rail(&mut self, pos: Position) -> Vec<Rail> {
        let Some(removed) = self.adjacency.get(&pos).cloned() else {
            return Vec::new();
        };

        for rail in &removed {
            self.rails.remove(rail);
            let (a, b) = rail.endpoints();
            for end in [a, b] {
                if let Some(list) = self.adjacency.get_mut(&end) {
                    list.retain(|r| r != rail);
                    if list.is_empty() {
                        self.adjacency.remove(&end);
                    }
                }
            }
            self.events.push(Event::RailDestroyed(*rail));
        }

        let dead_signals: Vec<SignalId> = self
            .signals
            .values()
            .filter(|s| removed.contains(&s.rail))
            .map(|s| s.id)
            .collect();
        for id in dead_signals {
            self.signals.remove(&id);
            self.events.push(Event::SignalDestroyed(id));
        }

        let dead_stations: Vec<StationId> = self
            .stations
            .values()
            .filter(|st| st.rails().iter().any(|r| removed.contains(r)))
            .map(Station::id)
            .collect();
        for id in dead_stations {
            self.drop_station(id);
            self.events.push(Event::StationDestroyed(id));
        }

        self.structure_changed();
        removed
    }

    /// Add one rail to the graph; `false` if it was already present.
    fn insert_rail(&mut self, rail: Rail) -> bool {
        if !self.rails.insert(rail) {
            return false;
        }
        let (a, b) = rail.endpoints();
        self.adjacency.entry(a).or_default().push(rail);
        self.adjacency.entry(b).or_default().push(rail);
        self.events.push(Event::RailCreated(rail));
        true
    }

    // ── Placement preview ─────────────────────────────────────────────────

    /// Replace the previewed rails, marking each legal or illegal.
    pub fn set_preview(&mut self, mut rails: Vec<Rail>) {
        self.mark_illegal(&mut rails);
        self.preview = rails;
        self.events.push(Event::PreviewChanged(self.preview.clone()));
    }

    pub fn preview(&self) -> &[Rail] {
        &self.preview
    }

    pub fn clear_preview(&mut self) {
        if !self.preview.is_empty() {
            self.preview.clear();
            self.events.push(Event::PreviewChanged(Vec::new()));
        }
    }

    /// Commit the previewed rails.  On rejection the preview is kept so the
    /// player can see which rails were at fault.
    pub fn commit_preview(&mut self) -> GridResult<Vec<Rail>> {
        let rails = self.preview.clone();
        match self.create_rail(&rails) {
            Ok(added) => {
                self.clear_preview();
                Ok(added)
            }
            Err(e) => {
                log::warn!("preview commit rejected: {e}");
                Err(e)
            }
        }
    }

    // ── Stations ──────────────────────────────────────────────────────────

    pub fn station(&self, id: StationId) -> Option<&Station> {
        self.stations.get(&id)
    }

    pub fn station_at(&self, pos: Position) -> Option<&Station> {
        self.station_index.get(&pos).and_then(|id| self.stations.get(id))
    }

    pub fn stations(&self) -> impl Iterator<Item = &Station> + '_ {
        self.stations.values()
    }

    /// Place a station over `positions` and lay its internal rails.
    pub fn build_station(
        &mut self,
        positions: &[Position],
        axis: Option<Axis>,
    ) -> GridResult<StationId> {
        let id = self.next_station;
        let station = Station::new(id, positions, axis)?;
        let illegal = self.station_conflicts(station.positions(), station.axis(), None);
        if !illegal.is_empty() {
            return Err(GridError::IllegalStation(illegal));
        }
        self.next_station = id.next();
        self.install_station(station);
        self.events.push(Event::StationCreated(id));
        self.structure_changed();
        Ok(id)
    }

    /// Grow station `id` by `positions`.  The station is rebuilt under the
    /// same id and must still be one straight contiguous run.
    pub fn extend_station(&mut self, id: StationId, positions: &[Position]) -> GridResult<StationId> {
        let old = self.stations.get(&id).ok_or(GridError::StationNotFound(id))?;
        let axis = (old.len() > 1).then_some(old.axis());
        let mut cells = old.positions().to_vec();
        cells.extend_from_slice(positions);

        let station = Station::new(id, &cells, axis)?;
        let illegal = self.station_conflicts(station.positions(), station.axis(), Some(id));
        if !illegal.is_empty() {
            return Err(GridError::IllegalStation(illegal));
        }

        self.drop_station(id);
        self.install_station(station);
        self.events.push(Event::StationDestroyed(id));
        self.events.push(Event::StationCreated(id));
        self.structure_changed();
        Ok(id)
    }

    /// Buildings orthogonally adjacent to any cell of `station`, in id order.
    pub fn buildings_serving(&self, station: StationId) -> Vec<BuildingId> {
        let Some(station) = self.stations.get(&station) else {
            return Vec::new();
        };
        let mut ids: Vec<BuildingId> = station
            .positions()
            .iter()
            .flat_map(|p| p.orthogonal_neighbours())
            .filter_map(|p| self.building_index.get(&p).copied())
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    /// Route from station `a` to station `b`; `None` if they are the same,
    /// either is unknown, or `b` is unreachable.
    pub fn find_route_between_stations(&self, a: StationId, b: StationId) -> Option<Route> {
        if a == b {
            return None;
        }
        let from = self.stations.get(&a)?;
        let to = self.stations.get(&b)?;
        let start = from.ends().0;
        find_route(start, None, self.rails_at_position(start), to, |pos, prev| {
            self.possible_next_rails(pos, prev)
        })
    }

    fn install_station(&mut self, station: Station) {
        for &rail in station.internal_rails() {
            self.insert_rail(rail);
        }
        for &pos in station.positions() {
            self.station_index.insert(pos, station.id());
        }
        self.stations.insert(station.id(), station);
    }

    fn drop_station(&mut self, id: StationId) {
        if let Some(station) = self.stations.remove(&id) {
            for pos in station.positions() {
                self.station_index.remove(pos);
            }
        }
    }

    /// Turn straight two-rail junctions beside a building into stations.
    fn auto_create_stations(&mut self, added: &[Rail]) {
        let candidates: BTreeSet<Position> = added
            .iter()
            .flat_map(|r| {
                let (a, b) = r.endpoints();
                [a, b]
            })
            .collect();

        for pos in candidates {
            if self.station_index.contains_key(&pos) {
                continue;
            }
            let beside_building = pos
                .orthogonal_neighbours()
                .iter()
                .any(|n| self.building_index.contains_key(n));
            if !beside_building {
                continue;
            }
            let [first, second] = self.rails_at_position(pos) else {
                continue;
            };
            let axis = match (first.axis(), second.axis()) {
                (Some(a), Some(b)) if a == b => a,
                _ => continue,
            };
            if self.illegal_station_positions(&[pos], axis).is_empty() {
                match self.build_station(&[pos], Some(axis)) {
                    Ok(id) => log::debug!("auto-created {id} at {pos}"),
                    Err(e) => log::debug!("no station at {pos}: {e}"),
                }
            }
        }
    }

    // ── Buildings & terrain ───────────────────────────────────────────────

    pub fn add_mine(&mut self, pos: Position, cargo: CargoKind) -> GridResult<BuildingId> {
        self.add_building(pos, |id| Building::mine(id, pos, cargo))
    }

    pub fn add_factory(&mut self, pos: Position) -> GridResult<BuildingId> {
        self.add_building(pos, |id| Building::factory(id, pos))
    }

    fn add_building(
        &mut self,
        pos: Position,
        make: impl FnOnce(BuildingId) -> Building,
    ) -> GridResult<BuildingId> {
        if !self.is_free(pos) {
            return Err(GridError::Occupied(pos));
        }
        let id = self.next_building;
        self.next_building = id.next();
        self.buildings.insert(id, make(id));
        self.building_index.insert(pos, id);
        self.events.push(Event::BuildingCreated(id));
        Ok(id)
    }

    pub fn building(&self, id: BuildingId) -> Option<&Building> {
        self.buildings.get(&id)
    }

    pub fn building_mut(&mut self, id: BuildingId) -> Option<&mut Building> {
        self.buildings.get_mut(&id)
    }

    pub fn building_at(&self, pos: Position) -> Option<&Building> {
        self.building_index.get(&pos).and_then(|id| self.buildings.get(id))
    }

    pub fn buildings(&self) -> impl Iterator<Item = &Building> + '_ {
        self.buildings.values()
    }

    /// One production step for every mine.  Returns how many mines grew.
    pub fn produce_cargo(&mut self) -> usize {
        let cap = self.max_cargo_at_mine;
        self.buildings
            .values_mut()
            .map(|b| b.produce(cap))
            .filter(|&grew| grew)
            .count()
    }

    /// Mark `pos` as water.  `false` if the cell is not free.
    pub fn add_water(&mut self, pos: Position) -> bool {
        if !self.is_free(pos) {
            return false;
        }
        self.water.insert(pos)
    }

    #[inline]
    pub fn is_water(&self, pos: Position) -> bool {
        self.water.contains(&pos)
    }

    // ── Signals ───────────────────────────────────────────────────────────

    /// Place a signal at `from_position` on `rail`.
    pub fn create_signal(&mut self, from_position: Position, rail: Rail) -> GridResult<SignalId> {
        let Some(&rail) = self.rails.get(&rail) else {
            return Err(GridError::RailNotFound(rail));
        };
        if !rail.has_endpoint(from_position) {
            return Err(GridError::NotAnEndpoint { rail, position: from_position });
        }
        if self.signals.values().any(|s| s.rail == rail && s.from_position == from_position) {
            return Err(GridError::SignalExists { position: from_position, rail });
        }

        let id = self.next_signal;
        self.next_signal = id.next();
        self.signals.insert(id, Signal { id, from_position, rail });
        self.events.push(Event::SignalCreated(id));
        self.structure_changed();
        Ok(id)
    }

    /// Remove a signal; `None` if it does not exist.
    pub fn remove_signal(&mut self, id: SignalId) -> Option<Signal> {
        let signal = self.signals.remove(&id)?;
        self.events.push(Event::SignalDestroyed(id));
        self.structure_changed();
        Some(signal)
    }

    pub fn signal(&self, id: SignalId) -> Option<&Signal> {
        self.signals.get(&id)
    }

    pub fn signals(&self) -> impl Iterator<Item = &Signal> + '_ {
        self.signals.values()
    }

    pub fn signal_color(&self, id: SignalId) -> Option<SignalColor> {
        self.controller.color(id)
    }

    pub fn signal_controller(&self) -> &SignalController {
        &self.controller
    }

    // ── Reservations ──────────────────────────────────────────────────────

    pub fn reserve(&mut self, train: TrainId, pos: Position) {
        let changes = self.controller.reserve(train, pos);
        self.push_color_changes(changes);
    }

    pub fn unreserve(&mut self, train: TrainId) {
        let changes = self.controller.unreserve(train);
        self.push_color_changes(changes);
    }

    pub fn reserver(&self, pos: Position) -> Option<TrainId> {
        self.controller.reserver(pos)
    }

    pub fn is_reservable_by(&self, pos: Position, train: TrainId) -> bool {
        self.controller.is_reservable_by(pos, train)
    }

    // ── Internals ─────────────────────────────────────────────────────────

    /// Bump the revision and rebuild every signal block.
    pub(crate) fn structure_changed(&mut self) {
        self.revision += 1;
        let mut controller = std::mem::take(&mut self.controller);
        let changes = controller.create_signal_blocks(&*self, &*self);
        self.controller = controller;
        self.push_color_changes(changes);
    }

    fn push_color_changes(&mut self, changes: Vec<ColorChange>) {
        self.events.extend(
            changes
                .into_iter()
                .map(|(signal, color)| Event::SignalColorChanged { signal, color }),
        );
    }

    pub(crate) fn station_id_at(&self, pos: Position) -> Option<StationId> {
        self.station_index.get(&pos).copied()
    }

    pub(crate) fn has_building_at(&self, pos: Position) -> bool {
        self.building_index.contains_key(&pos)
    }
}

// ── Capability traits for the signal controller ───────────────────────────────

impl RailSource for Grid {
    fn rail_positions(&self) -> Vec<Position> {
        self.adjacency.keys().copied().collect()
    }

    fn rails_at(&self, pos: Position) -> &[Rail] {
        self.rails_at_position(pos)
    }
}

impl SignalSource for Grid {
    fn signals_on(&self, rail: &Rail) -> Vec<Signal> {
        self.signals.values().filter(|s| s.rail == *rail).copied().collect()
    }
}
