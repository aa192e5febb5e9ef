//! `abu-pool` — the swappable-battery-unit pool.
//!
//! # What lives here
//!
//! | Module    | Contents                                           |
//! |-----------|----------------------------------------------------|
//! | [`unit`]  | `AbuState` lifecycle enum, `AbuUnit`               |
//! | [`pool`]  | `AbuPool` arena + FIFO wait queue                  |
//! | [`error`] | `PoolError`, `PoolResult`                          |
//!
//! # Lifecycle
//!
//! Every unit cycles `IdleCharged → Attached → Returning → Charging →
//! IdleCharged` until the operating day ends; there is no terminal state.
//! The pool owns its units exclusively — a unit never moves between pools —
//! and the unit count is fixed for the lifetime of one simulation, which
//! makes the conservation invariant (states always sum to pool size)
//! mechanically checkable.

pub mod error;
pub mod pool;
pub mod unit;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{PoolError, PoolResult};
pub use pool::{AbuPool, AcquireOutcome, GrantedRequest, PendingRequest, StateCounts};
pub use unit::{AbuState, AbuUnit};
