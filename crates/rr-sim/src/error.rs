use rr_core::StationId;
use rr_grid::GridError;
use rr_train::TrainError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorldError {
    #[error("world configuration error: {0}")]
    Config(String),

    #[error("grid: {0}")]
    Grid(#[from] GridError),

    #[error("train: {0}")]
    Train(#[from] TrainError),

    #[error("no route from {from} to {to}")]
    NoRoute { from: StationId, to: StationId },
}

pub type WorldResult<T> = Result<T, WorldError>;
