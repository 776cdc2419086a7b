//! Per-train lifecycle state and per-tick outcome.

use std::fmt;

/// Where a train is in its lifecycle.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TrainState {
    /// Moving towards its target cell, or about to choose the next one.
    #[default]
    EnRoute,
    /// Blocked by another train's reservation; `remaining` seconds left
    /// before it looks again.
    Waiting { remaining: f32 },
    /// Terminal.
    Destroyed(DestroyReason),
}

impl TrainState {
    #[inline]
    pub fn is_destroyed(&self) -> bool {
        matches!(self, TrainState::Destroyed(_))
    }

    #[inline]
    pub fn is_waiting(&self) -> bool {
        matches!(self, TrainState::Waiting { .. })
    }
}

/// Why a train was destroyed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DestroyReason {
    /// The rail it was driving on was removed.
    RailRemoved,
    /// No rail leads on and no other train is in the way.
    DeadEnd,
    /// Its target station cannot be reached (or no longer exists).
    Unreachable,
    /// It came too close to another train.
    Collision,
}

impl DestroyReason {
    pub fn as_str(self) -> &'static str {
        match self {
            DestroyReason::RailRemoved => "rail removed",
            DestroyReason::DeadEnd     => "dead end",
            DestroyReason::Unreachable => "target unreachable",
            DestroyReason::Collision   => "collision",
        }
    }
}

impl fmt::Display for DestroyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What happened during one [`Train::update`](crate::Train::update).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrainUpdate {
    /// Units loaded from mines this tick.
    pub picked_up: u32,
    /// Units unloaded at factories this tick (each is one point of score).
    pub delivered: u32,
    /// Set on the tick the train was destroyed.
    pub destroyed: Option<DestroyReason>,
}
