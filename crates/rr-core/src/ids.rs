//! Strongly typed, zero-cost identifier wrappers.
//!
//! Ids are handed out sequentially by whichever collection owns the object
//! (the grid for stations, signals and buildings; the world for trains), so
//! they double as a creation-order key.  All ids are `Copy + Ord + Hash`.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID".
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// The id following `self` in issue order.
            #[inline]
            pub fn next(self) -> $name {
                $name(self.0 + 1)
            }

            #[inline]
            pub fn is_valid(self) -> bool {
                self != Self::INVALID
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Identity of a train.  The signal controller only ever sees this id,
    /// never the train itself.
    pub struct TrainId(u32);
}

typed_id! {
    /// Identity of a station in the grid.
    pub struct StationId(u32);
}

typed_id! {
    /// Identity of a signal attached to one end of a rail.
    pub struct SignalId(u32);
}

typed_id! {
    /// Identity of a mine or factory.
    pub struct BuildingId(u32);
}
