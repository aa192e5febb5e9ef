//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.  The inner integer is `pub` to allow
//! direct indexing into arena `Vec`s via `id.0 as usize`, but callers should
//! prefer the `.index()` helpers for clarity.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID" — equivalent to the type's MAX.
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
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
    /// Index of one auxiliary battery unit within its pool's arena.
    pub struct AbuId(u32);
}

typed_id! {
    /// Ordinal of one realized flight cycle within an operating day
    /// (0 = first departure of the day).
    pub struct FlightId(u32);
}

// ── PoolRole ──────────────────────────────────────────────────────────────────

/// Which ground node a pool of ABUs serves.
///
/// `Takeoff` units assist the climb-out and return to the departure pad;
/// `Cruise` units extend the enroute segment and return to the arrival pad.
/// The role is *where the pool lives*, not what one unit is doing right now —
/// per-unit lifecycle state is `abu_pool::AbuState`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PoolRole {
    Takeoff,
    Cruise,
}

impl PoolRole {
    /// Both roles, in the fixed application order (takeoff first).
    pub const ALL: [PoolRole; 2] = [PoolRole::Takeoff, PoolRole::Cruise];

    /// Stable index for `[T; 2]` per-role tables.
    #[inline(always)]
    pub fn index(self) -> usize {
        match self {
            PoolRole::Takeoff => 0,
            PoolRole::Cruise => 1,
        }
    }
}

impl fmt::Display for PoolRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoolRole::Takeoff => write!(f, "takeoff"),
            PoolRole::Cruise => write!(f, "cruise"),
        }
    }
}
