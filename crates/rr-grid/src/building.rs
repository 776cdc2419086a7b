//! Mines and factories.

use rr_core::{BuildingId, CargoKind, Position};

/// What a building does with cargo.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BuildingKind {
    /// Produces `cargo` on a timer; `stock` is what trains can collect.
    Mine { cargo: CargoKind, stock: u32 },
    /// Accepts every kind of cargo and turns it into score.
    Factory,
}

/// A single-cell mine or factory.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Building {
    pub id:       BuildingId,
    pub position: Position,
    pub kind:     BuildingKind,
}

impl Building {
    pub fn mine(id: BuildingId, position: Position, cargo: CargoKind) -> Self {
        Self { id, position, kind: BuildingKind::Mine { cargo, stock: 0 } }
    }

    pub fn factory(id: BuildingId, position: Position) -> Self {
        Self { id, position, kind: BuildingKind::Factory }
    }

    #[inline]
    pub fn is_mine(&self) -> bool {
        matches!(self.kind, BuildingKind::Mine { .. })
    }

    #[inline]
    pub fn is_factory(&self) -> bool {
        matches!(self.kind, BuildingKind::Factory)
    }

    /// Current stock; always 0 for a factory.
    pub fn stock(&self) -> u32 {
        match self.kind {
            BuildingKind::Mine { stock, .. } => stock,
            BuildingKind::Factory => 0,
        }
    }

    /// The kind of cargo a mine yields.
    pub fn cargo(&self) -> Option<CargoKind> {
        match self.kind {
            BuildingKind::Mine { cargo, .. } => Some(cargo),
            BuildingKind::Factory => None,
        }
    }

    /// Add one unit of stock, never exceeding `cap`.  Returns `true` if the
    /// stock grew.
    pub fn produce(&mut self, cap: u32) -> bool {
        match &mut self.kind {
            BuildingKind::Mine { stock, .. } if *stock < cap => {
                *stock += 1;
                true
            }
            _ => false,
        }
    }

    /// Take up to `max` units from a mine; returns how many were taken.
    pub fn collect(&mut self, max: u32) -> u32 {
        match &mut self.kind {
            BuildingKind::Mine { stock, .. } => {
                let taken = (*stock).min(max);
                *stock -= taken;
                taken
            }
            BuildingKind::Factory => 0,
        }
    }
}
