//! `rr-train`: trains and their per-tick state machine.
//!
//! # Crate layout
//!
//! | Module    | Contents                                                   |
//! |-----------|------------------------------------------------------------|
//! | [`state`] | `TrainState`, `DestroyReason`, `TrainUpdate`               |
//! | [`train`] | `Train`: movement, station visits, next-rail decision     |
//! | [`error`] | `TrainError`, `TrainResult<T>`                             |
//!
//! # Movement model
//!
//! A train moves continuously towards one target cell at a time.  On
//! reaching it the train:
//!
//! 1. loads or unloads if the cell completes a visit to its target station;
//! 2. lists the rails it may take next and splits them by whether another
//!    train holds the block beyond;
//! 3. routes to its target station over the free ones, takes the first rail
//!    and reserves its far end before moving on.
//!
//! Nothing here detects collisions; the owner compares positions each tick
//! and calls [`Train::destroy`].

pub mod error;
pub mod state;
pub mod train;


pub use error::{TrainError, TrainResult};
pub use state::{DestroyReason, TrainState, TrainUpdate};
pub use train::Train;
