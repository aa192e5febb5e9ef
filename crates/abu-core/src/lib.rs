//! `abu-core` — foundational types for the `abu-sim` fleet-cadence simulator.
//!
//! This crate is a dependency of every other `abu-*` crate.  It intentionally
//! has no `abu-*` dependencies and no required external ones (only optional
//! `serde`).
//!
//! # What lives here
//!
//! | Module   | Contents                                       |
//! |----------|------------------------------------------------|
//! | [`ids`]  | `AbuId`, `FlightId`, `PoolRole`                |
//! | [`time`] | `SimTime` (integer-millisecond simulated time) |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                              |
//! |---------|-----------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types. |

pub mod ids;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use ids::{AbuId, FlightId, PoolRole};
pub use time::SimTime;
