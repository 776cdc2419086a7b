//! The `World` struct and its tick loop.

use std::collections::BTreeMap;

use rr_core::{
    Axis, Event, EventBus, EventKind, GameConfig, Position, Rail, SignalColor, SignalId, SimClock,
    SimRng, StationId, SubscriberId, TrainId,
};
use rr_grid::{Grid, Route, Station};
use rr_signal::Signal;
use rr_train::{DestroyReason, Train, TrainError};

use crate::{Player, WorldError, WorldObserver, WorldResult};

/// All game state behind the front-end.
///
/// The world owns the grid and every train; the grid's signal controller
/// knows trains only by id.  Create via [`WorldBuilder`](crate::WorldBuilder).
pub struct World {
    config:           GameConfig,
    clock:            SimClock,
    grid:             Grid,
    /// Live trains, iterated in creation order.
    trains:           BTreeMap<TrainId, Train>,
    next_train:       TrainId,
    player:           Player,
    rng:              SimRng,
    bus:              EventBus,
    production_timer: f32,
}

impl World {
    pub(crate) fn new(config: GameConfig, grid: Grid, rng: SimRng) -> Self {
        let mut world = Self {
            config,
            clock: SimClock::new(),
            grid,
            trains: BTreeMap::new(),
            next_train: TrainId(0),
            player: Player::new(),
            rng,
            bus: EventBus::new(),
            production_timer: 0.0,
        };
        world.flush();
        world
    }

    // ── Tick ──────────────────────────────────────────────────────────────

    /// Advance the world by `dt` seconds.
    pub fn tick<O: WorldObserver>(&mut self, dt: f32, observer: &mut O) {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);

        // ① Production.
        self.production_timer += dt;
        let interval = self.config.mine_production_interval_secs;
        while self.production_timer >= interval {
            self.production_timer -= interval;
            self.grid.produce_cargo();
        }

        // ② Trains, in creation order.
        let train_cfg = &self.config.train;
        for (&id, train) in self.trains.iter_mut() {
            let update = train.update(&mut self.grid, dt, train_cfg);
            if update.delivered > 0 {
                self.player.add_score(update.delivered);
                observer.on_delivery(id, update.delivered);
            }
            if let Some(reason) = update.destroyed {
                observer.on_train_destroyed(id, reason);
            }
        }

        // ③ Collisions.
        for id in self.colliding_trains() {
            if let Some(train) = self.trains.get_mut(&id) {
                if train.destroy(&mut self.grid, DestroyReason::Collision) {
                    observer.on_train_destroyed(id, DestroyReason::Collision);
                }
            }
        }

        // ④ Cleanup.
        let dead: Vec<TrainId> = self
            .trains
            .values()
            .filter(|t| t.is_destroyed())
            .map(Train::id)
            .collect();
        for id in dead {
            self.trains.remove(&id);
            self.emit(Event::TrainDestroyed(id));
        }

        // ⑤ Level-up.
        for level in self.player.advance_levels(&self.config) {
            let result = self.grid.level_up(level, &mut self.rng);
            self.emit(Event::LevelUp { level });
            observer.on_level_up(level, &result);
        }

        // ⑥ Delivery.
        self.flush();
        self.clock.advance(dt);
        observer.on_tick_end(now, self.trains.len());
    }

    /// Ids of every live train within collision distance of another live
    /// train, ascending.
    fn colliding_trains(&self) -> Vec<TrainId> {
        let limit = self.config.train.collision_distance;
        let live: Vec<&Train> = self.trains.values().filter(|t| !t.is_destroyed()).collect();
        let mut hit = Vec::new();
        for (i, a) in live.iter().enumerate() {
            for b in &live[i + 1..] {
                if a.position().within(b.position(), limit) {
                    hit.push(a.id());
                    hit.push(b.id());
                }
            }
        }
        hit.sort_unstable();
        hit.dedup();
        hit
    }

    // ── Mutations ─────────────────────────────────────────────────────────

    /// Commit a set of rails; all or nothing.
    pub fn build_rails(&mut self, rails: &[Rail]) -> WorldResult<Vec<Rail>> {
        let result = self.grid.create_rail(rails);
        self.flush();
        Ok(result?)
    }

    pub fn remove_rail(&mut self, pos: Position) -> Vec<Rail> {
        let removed = self.grid.remove_rail(pos);
        self.flush();
        removed
    }

    pub fn set_preview(&mut self, rails: Vec<Rail>) {
        self.grid.set_preview(rails);
        self.flush();
    }

    pub fn clear_preview(&mut self) {
        self.grid.clear_preview();
        self.flush();
    }

    pub fn commit_preview(&mut self) -> WorldResult<Vec<Rail>> {
        let result = self.grid.commit_preview();
        self.flush();
        Ok(result?)
    }

    pub fn build_station(&mut self, positions: &[Position], axis: Option<Axis>) -> WorldResult<StationId> {
        let result = self.grid.build_station(positions, axis);
        self.flush();
        Ok(result?)
    }

    pub fn extend_station(&mut self, id: StationId, positions: &[Position]) -> WorldResult<StationId> {
        let result = self.grid.extend_station(id, positions);
        self.flush();
        Ok(result?)
    }

    pub fn create_signal(&mut self, from_position: Position, rail: Rail) -> WorldResult<SignalId> {
        let result = self.grid.create_signal(from_position, rail);
        self.flush();
        Ok(result?)
    }

    pub fn remove_signal(&mut self, id: SignalId) -> Option<Signal> {
        let removed = self.grid.remove_signal(id);
        self.flush();
        removed
    }

    /// Put a new train on station `a`, shuttling to `b`.  The stations must
    /// already be connected.
    pub fn create_train(&mut self, a: StationId, b: StationId) -> WorldResult<TrainId> {
        if a == b {
            return Err(TrainError::SameStation(a).into());
        }
        if self.grid.find_route_between_stations(a, b).is_none() {
            return Err(WorldError::NoRoute { from: a, to: b });
        }

        let id = self.next_train;
        let train = Train::new(id, &mut self.grid, a, b)?;
        self.next_train = id.next();
        self.trains.insert(id, train);
        log::info!("{id} created between {a} and {b}");
        self.emit(Event::TrainCreated(id));
        self.flush();
        Ok(id)
    }

    /// Select `id` and deselect every other train.  `false` if `id` is not
    /// a live train, in which case nothing changes.
    pub fn select_train(&mut self, id: TrainId) -> bool {
        if !self.trains.contains_key(&id) {
            return false;
        }
        for (&other, train) in self.trains.iter_mut() {
            train.set_selected(other == id);
        }
        true
    }

    // ── Queries ───────────────────────────────────────────────────────────

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn station_at(&self, pos: Position) -> Option<&Station> {
        self.grid.station_at(pos)
    }

    pub fn find_route(&self, a: StationId, b: StationId) -> Option<Route> {
        self.grid.find_route_between_stations(a, b)
    }

    pub fn signal_color(&self, id: SignalId) -> Option<SignalColor> {
        self.grid.signal_color(id)
    }

    pub fn trains(&self) -> impl Iterator<Item = &Train> + '_ {
        self.trains.values()
    }

    pub fn train(&self, id: TrainId) -> Option<&Train> {
        self.trains.get(&id)
    }

    pub fn selected_train(&self) -> Option<&Train> {
        self.trains.values().find(|t| t.is_selected())
    }

    // ── Notifications ─────────────────────────────────────────────────────

    pub fn subscribe(&mut self, kinds: &[EventKind]) -> SubscriberId {
        self.bus.subscribe(kinds)
    }

    pub fn subscribe_all(&mut self) -> SubscriberId {
        self.bus.subscribe_all()
    }

    pub fn unsubscribe(&mut self, sub: SubscriberId) {
        self.bus.unsubscribe(sub);
    }

    /// Everything delivered to `sub` since its last drain, oldest first.
    pub fn drain_events(&mut self, sub: SubscriberId) -> Vec<Event> {
        self.bus.drain(sub)
    }

    /// Queue a world-level event behind whatever the grid has queued.
    fn emit(&mut self, event: Event) {
        self.bus.publish_all(self.grid.take_events());
        self.bus.publish(event);
    }

    fn flush(&mut self) {
        self.bus.publish_all(self.grid.take_events());
        self.bus.deliver();
    }
}
