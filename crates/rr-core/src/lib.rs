//! `rr-core`: foundational types for the `rust_rail` game core.
//!
//! This crate is a dependency of every other `rr-*` crate.  It has no `rr-*`
//! dependencies and only a few external ones (`rand`, `rustc-hash`,
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `TrainId`, `StationId`, `SignalId`, `BuildingId`      |
//! | [`geometry`]    | `Position`, `Point`, `Axis`, `Rail`                   |
//! | [`cargo`]       | `CargoKind`, `CargoHold`                              |
//! | [`config`]      | `GameConfig`, `TrainConfig`, `GridBounds`             |
//! | [`time`]        | `Tick`, `SimClock`                                    |
//! | [`rng`]         | `SimRng` (seeded, deterministic)                      |
//! | [`event`]       | `Event`, `EventKind`, `EventBus`, `SignalColor`       |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public value types.  |

pub mod cargo;
pub mod config;
pub mod error;
pub mod event;
pub mod geometry;
pub mod ids;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use cargo::{CargoHold, CargoKind};
pub use config::{GameConfig, GridBounds, TrainConfig};
pub use error::{CoreError, CoreResult};
pub use event::{Event, EventBus, EventKind, SignalColor, SubscriberId};
pub use geometry::{Axis, Point, Position, Rail};
pub use ids::{BuildingId, SignalId, StationId, TrainId};
pub use rng::SimRng;
pub use time::{SimClock, Tick};
