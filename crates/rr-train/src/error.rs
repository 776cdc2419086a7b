use rr_core::StationId;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TrainError {
    #[error("a train needs two different stations, got {0} twice")]
    SameStation(StationId),

    #[error("station {0} does not exist")]
    StationNotFound(StationId),
}

pub type TrainResult<T> = Result<T, TrainError>;
