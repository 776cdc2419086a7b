//! `rr-grid`: the rail graph and everything built on it.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                     |
//! |----------------|--------------------------------------------------------------|
//! | [`grid`]       | `Grid`: rails, signals, stations, buildings, preview, events |
//! | [`station`]    | `Station` and its eagerly derived ends/approaches/rails      |
//! | [`building`]   | `Building`, `BuildingKind` (mines and factories)             |
//! | [`validation`] | `mark_illegal`, `illegal_station_positions`                  |
//! | [`level_up`]   | `LevelUp`, bounds growth and new-building placement          |
//! | [`router`]     | `Route`, `find_route` (uniform-cost search)                  |
//! | [`error`]      | `GridError`, `GridResult<T>`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public value types.     |
//!
//! The grid owns the [`SignalController`](rr_signal::SignalController) and
//! rebuilds its blocks after every structural change.  Trains are not known
//! here; reservations are keyed by [`TrainId`](rr_core::TrainId) only.

pub mod building;
pub mod error;
pub mod grid;
pub mod level_up;
pub mod router;
pub mod station;
pub mod validation;


pub use building::{Building, BuildingKind};
pub use error::{GridError, GridResult};
pub use grid::Grid;
pub use level_up::LevelUp;
pub use router::{find_route, Route};
pub use station::Station;
