//! Cargo kinds and the per-train cargo hold.
//!
//! All variants are always compiled in.  Mines produce exactly one kind;
//! factories accept every kind and turn it into score one-for-one.

/// A kind of freight a mine can produce.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CargoKind {
    #[default]
    Iron,
    Coal,
}

impl CargoKind {
    pub const ALL: [CargoKind; 2] = [CargoKind::Iron, CargoKind::Coal];

    #[inline]
    fn slot(self) -> usize {
        match self {
            CargoKind::Iron => 0,
            CargoKind::Coal => 1,
        }
    }

    /// Human-readable label, useful for logs and UI text.
    pub fn as_str(self) -> &'static str {
        match self {
            CargoKind::Iron => "iron",
            CargoKind::Coal => "coal",
        }
    }
}

impl std::fmt::Display for CargoKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a train is currently carrying, one counter per [`CargoKind`].
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CargoHold {
    amounts: [u32; 2],
}

impl CargoHold {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn amount(&self, kind: CargoKind) -> u32 {
        self.amounts[kind.slot()]
    }

    #[inline]
    pub fn add(&mut self, kind: CargoKind, amount: u32) {
        let slot = &mut self.amounts[kind.slot()];
        *slot = slot.saturating_add(amount);
    }

    /// Sum over all kinds.
    pub fn total(&self) -> u32 {
        self.amounts.iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Empty the hold, returning how many units were in it.
    pub fn unload_all(&mut self) -> u32 {
        let total = self.total();
        self.amounts = [0; 2];
        total
    }
}
