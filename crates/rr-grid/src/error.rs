//! Grid error type.

use thiserror::Error;

use rr_core::{CoreError, Position, Rail, StationId};

/// Errors produced by `rr-grid`.
///
/// Placement problems carry the offending rails or cells so a UI can
/// highlight them.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("{} illegal rail(s) in commit", .0.len())]
    IllegalRails(Vec<Rail>),

    #[error("station placement rejected at {} cell(s)", .0.len())]
    IllegalStation(Vec<Position>),

    #[error("rail {0} not found")]
    RailNotFound(Rail),

    #[error("{position} is not an endpoint of {rail}")]
    NotAnEndpoint { rail: Rail, position: Position },

    #[error("a signal already stands at {position} on {rail}")]
    SignalExists { position: Position, rail: Rail },

    #[error("station {0} not found")]
    StationNotFound(StationId),

    #[error("station cells are not a contiguous straight run")]
    NotContiguous,

    #[error("cell {0} is already occupied")]
    Occupied(Position),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type GridResult<T> = Result<T, GridError>;
