//! `BatteryPack` — one physical or logical pack (main aircraft pack or one
//! ABU pack).
//!
//! A pack is created once per simulation from capacity/voltage values handed
//! in by the upstream mass/energy sizing, mutated by flight draw (SOC down)
//! and recharge (SOC up), and reset between independent sweep points — never
//! destroyed mid-run.

use crate::{ChargeError, ChargeResult};

/// Electrical state of one battery pack.
///
/// Invariant: `0 ≤ soc ≤ 1` at all times.  Both mutating methods uphold it
/// and fail rather than clamp.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BatteryPack {
    /// Nominal pack voltage [V].
    pub nominal_voltage_v: f64,
    /// Usable energy capacity [kWh].
    pub capacity_kwh: f64,
    /// Chemistry-independent charge-rate limit [1/h] (multiples of capacity
    /// per hour).
    pub max_c_rate: f64,
    /// Current state of charge, fraction of usable capacity.
    soc: f64,
}

impl BatteryPack {
    /// Construct a pack at `soc_initial`.
    ///
    /// Fails fast on non-positive voltage/capacity/C-rate or an SOC outside
    /// `[0, 1]` — these are configuration errors, not simulation outcomes.
    pub fn new(
        nominal_voltage_v: f64,
        capacity_kwh: f64,
        max_c_rate: f64,
        soc_initial: f64,
    ) -> ChargeResult<Self> {
        check_positive("nominal_voltage_v", nominal_voltage_v)?;
        check_positive("capacity_kwh", capacity_kwh)?;
        check_positive("max_c_rate", max_c_rate)?;
        check_soc("soc_initial", soc_initial)?;
        Ok(Self {
            nominal_voltage_v,
            capacity_kwh,
            max_c_rate,
            soc: soc_initial,
        })
    }

    /// Construct a fully charged pack.
    pub fn full(nominal_voltage_v: f64, capacity_kwh: f64, max_c_rate: f64) -> ChargeResult<Self> {
        Self::new(nominal_voltage_v, capacity_kwh, max_c_rate, 1.0)
    }

    /// Current state of charge, fraction of usable capacity.
    #[inline]
    pub fn soc(&self) -> f64 {
        self.soc
    }

    /// Charge capacity expressed in ampere-hours.
    #[inline]
    pub fn capacity_ah(&self) -> f64 {
        self.capacity_kwh * 1_000.0 / self.nominal_voltage_v
    }

    /// Energy currently stored [kWh].
    #[inline]
    pub fn stored_kwh(&self) -> f64 {
        self.soc * self.capacity_kwh
    }

    /// Remove `energy_kwh` from the pack (flight draw).
    ///
    /// Fails with [`ChargeError::Overdrawn`] if the pack does not hold that
    /// much — feasibility is checked before a sweep point runs, so this
    /// firing mid-run indicates an upstream accounting bug.
    pub fn draw_kwh(&mut self, energy_kwh: f64) -> ChargeResult<()> {
        check_positive("energy_kwh", energy_kwh)?;
        let available = self.stored_kwh();
        if energy_kwh > available + 1e-9 {
            return Err(ChargeError::Overdrawn {
                requested_kwh: energy_kwh,
                available_kwh: available,
            });
        }
        self.soc = ((available - energy_kwh) / self.capacity_kwh).max(0.0);
        Ok(())
    }

    /// Set the SOC directly (recharge completion, or post-mission state for a
    /// returned ABU).
    pub fn set_soc(&mut self, soc: f64) -> ChargeResult<()> {
        check_soc("soc", soc)?;
        self.soc = soc;
        Ok(())
    }
}

// ── Validation helpers ────────────────────────────────────────────────────────

pub(crate) fn check_soc(name: &'static str, value: f64) -> ChargeResult<()> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(ChargeError::SocOutOfRange { name, value });
    }
    Ok(())
}

pub(crate) fn check_positive(name: &'static str, value: f64) -> ChargeResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ChargeError::NonPositive { name, value });
    }
    Ok(())
}
