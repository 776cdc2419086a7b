//! `rr-sim`: the world a game front-end drives.
//!
//! # Tick order
//!
//! ```text
//! World::tick(dt):
//!   ① Production  mine timer; every mine gains stock per full interval
//!   ② Trains      Train::update in ascending TrainId order
//!                   (deliveries add to the player's score)
//!   ③ Collisions  live trains closer than collision_distance on both
//!                   axes are destroyed pairwise
//!   ④ Cleanup     destroyed trains are removed, TrainDestroyed queued
//!   ⑤ Level-up    crossing a score threshold grows the map
//!   ⑥ Delivery    queued events are fanned out to subscriber mailboxes
//! ```
//!
//! Every mutating `World` method also ends with step ⑥, so a front-end
//! only ever has to drain its mailbox.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use rr_core::{CargoKind, EventKind, GameConfig, Position, Rail};
//! use rr_sim::{NoopObserver, WorldBuilder};
//!
//! let mut world = WorldBuilder::new(GameConfig::default())
//!     .starting_buildings(false)
//!     .mine(Position::new(1, 1), CargoKind::Iron)
//!     .factory(Position::new(3, 1))
//!     .build()?;
//! let sub = world.subscribe(&[EventKind::TrainDestroyed]);
//! let a = world.build_station(&[Position::new(1, 0)], None)?;
//! let b = world.build_station(&[Position::new(3, 0)], None)?;
//! world.build_rails(&Rail::path(&[Position::new(1, 0), Position::new(2, 0), Position::new(3, 0)]))?;
//! world.create_train(a, b)?;
//! world.tick(0.25, &mut NoopObserver);
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod player;
pub mod world;


pub use builder::WorldBuilder;
pub use error::{WorldError, WorldResult};
pub use observer::{NoopObserver, WorldObserver};
pub use player::Player;
pub use world::World;
