//! Error types for abu-charge.

use thiserror::Error;

/// Precondition violations in pack construction or charge-time evaluation.
///
/// The model never clamps silently: an SOC outside `[0, 1]` or a
/// non-positive electrical parameter is a caller bug and is surfaced
/// immediately, before any simulation state exists.
#[derive(Debug, Error)]
pub enum ChargeError {
    #[error("{name} = {value} is outside the valid SOC range [0, 1]")]
    SocOutOfRange { name: &'static str, value: f64 },

    #[error("{name} = {value} must be positive")]
    NonPositive { name: &'static str, value: f64 },

    #[error("AC-to-DC efficiency {0} must be in (0, 1]")]
    EfficiencyOutOfRange(f64),

    #[error("energy draw of {requested_kwh} kWh exceeds the {available_kwh} kWh stored in the pack")]
    Overdrawn {
        requested_kwh: f64,
        available_kwh: f64,
    },
}

/// Alias for `Result<T, ChargeError>`.
pub type ChargeResult<T> = Result<T, ChargeError>;
