//! `rr-signal`: traffic-control blocks and the reservation protocol.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                   |
//! |----------------|------------------------------------------------------------|
//! | [`source`]     | `Signal`, `RailSource`, `SignalSource` capability traits   |
//! | [`block`]      | `SignalBlock`: one frozen region of track between signals |
//! | [`controller`] | `SignalController`: rebuild, reserve, unreserve, colours  |
//!
//! # Protocol in one paragraph
//!
//! The track is cut into blocks wherever a rail carries a signal.  A train
//! claims the cell it is about to drive to with [`SignalController::reserve`];
//! every block containing that cell becomes reserved by the train and every
//! signal bordering a reserved block shows red.  Before moving, a train asks
//! [`SignalController::is_reservable_by`] whether the next cell is free for
//! it.  Mutual exclusion holds only as long as every train reserves before it
//! advances and calls [`SignalController::unreserve`] when destroyed.

pub mod block;
pub mod controller;
pub mod source;

#[cfg(test)]
mod tests;

pub use block::SignalBlock;
pub use controller::{ColorChange, SignalController};
pub use rr_core::SignalColor;
pub use source::{RailSource, Signal, SignalSource};
