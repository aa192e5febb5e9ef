//! Error types for abu-pool.

use abu_core::AbuId;
use thiserror::Error;

/// Pool construction and state-machine violations.
///
/// A transition error means the scheduler drove a unit out of lifecycle
/// order — always a bug, never a recoverable condition.
#[derive(Debug, Error)]
pub enum PoolError {
    #[error("pool size must be at least 1 (got {0})")]
    EmptySize(usize),

    #[error("unit {0} is not a member of this pool")]
    UnknownUnit(AbuId),

    #[error("unit {unit}: cannot {action} while {state}")]
    InvalidTransition {
        unit: AbuId,
        action: &'static str,
        state: &'static str,
    },

    #[error("acquisition of {requested} units exceeds pool size {size}")]
    RequestExceedsPool { requested: usize, size: usize },

    #[error(transparent)]
    Charge(#[from] abu_charge::ChargeError),
}

/// Alias for `Result<T, PoolError>`.
pub type PoolResult<T> = Result<T, PoolError>;
