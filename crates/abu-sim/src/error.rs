//! Error types for abu-sim.

use thiserror::Error;

/// Scheduler construction and run failures.
///
/// `Config` and `Infeasible` both fire before any event is applied; a
/// `Charge`/`Pool` error escaping `run` means the scheduler itself drove a
/// model out of contract, which is a bug, not an operating condition.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    /// The flight's energy requirement exceeds what the packs can deliver.
    ///
    /// Sweep drivers treat this as "skip the point"; direct callers see it
    /// as an error because there is nothing to simulate.
    #[error("infeasible mission: {0}")]
    Infeasible(String),

    #[error("charge model error: {0}")]
    Charge(#[from] abu_charge::ChargeError),

    #[error("pool error: {0}")]
    Pool(#[from] abu_pool::PoolError),
}

/// Alias for `Result<T, SimError>`.
pub type SimResult<T> = Result<T, SimError>;
