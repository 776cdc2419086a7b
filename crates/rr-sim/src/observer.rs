//! World observer trait for progress reporting and statistics.

use rr_core::{Tick, TrainId};
use rr_grid::LevelUp;
use rr_train::DestroyReason;

/// Callbacks invoked by [`World::tick`][crate::World::tick].
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.  Rendering front-ends should prefer the
/// event mailboxes; observers are for synchronous hooks such as logging or
/// statistics.
pub trait WorldObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called at the end of each tick.  `live_trains` counts trains still on
    /// the map after collisions were resolved.
    fn on_tick_end(&mut self, _tick: Tick, _live_trains: usize) {}

    /// A train unloaded `amount` units at a factory.
    fn on_delivery(&mut self, _train: TrainId, _amount: u32) {}

    fn on_train_destroyed(&mut self, _train: TrainId, _reason: DestroyReason) {}

    fn on_level_up(&mut self, _level: u32, _result: &LevelUp) {}
}

/// A [`WorldObserver`] that does nothing.
pub struct NoopObserver;

impl WorldObserver for NoopObserver {}
